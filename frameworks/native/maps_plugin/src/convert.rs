// Copyright (C) 2024 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversions between the framework model and the provider model.

use std::cmp::Ordering;

use provider_rs::geo::{GeoBoundingBox, GeoCoordinates, ProviderAddress};
use provider_rs::query::{RouteFeature, RouteType, TransportMode as ProviderTransportMode};
use provider_rs::reply::{
    ManeuverAction, PlaceItem, ProviderCategory, ProviderManeuver, ProviderPlace, ProviderRoute,
    RouteLeg, SearchItem,
};

use crate::error::PluginError;
use crate::info::{
    Address, Area, AvoidFeatures, Category, Contact, Coordinates, DistanceUnit, Maneuver, Place,
    Rating, Route, RouteOptimization, Segment, SortBy, TransportMode, TurnType,
};

/// Conversion factors relative to one meter.
const METER_FACTOR: f64 = 1.0;
const KILOMETER_FACTOR: f64 = 0.001;
const FOOT_FACTOR: f64 = 3.2808399;
const YARD_FACTOR: f64 = 1.0936133;

fn unit_factor(unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meter => METER_FACTOR,
        DistanceUnit::Kilometer => KILOMETER_FACTOR,
        DistanceUnit::Foot => FOOT_FACTOR,
        DistanceUnit::Yard => YARD_FACTOR,
    }
}

/// Converts `value` from one distance unit into another.
///
/// # Examples
///
/// ```
/// use maps_plugin::convert::convert_distance;
/// use maps_plugin::info::DistanceUnit;
///
/// let km = convert_distance(1500.0, DistanceUnit::Meter, DistanceUnit::Kilometer);
/// assert!((km - 1.5).abs() < 1e-9);
/// ```
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    value / unit_factor(from) * unit_factor(to)
}

pub fn validate_coordinates(coordinates: &Coordinates) -> Result<(), PluginError> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(PluginError::InvalidParameter)
    }
}

pub fn validate_area(area: &Area) -> Result<(), PluginError> {
    if area.is_valid() {
        Ok(())
    } else {
        Err(PluginError::InvalidParameter)
    }
}

pub fn to_geo(coordinates: &Coordinates) -> GeoCoordinates {
    GeoCoordinates::new(coordinates.latitude, coordinates.longitude)
}

pub fn from_geo(coordinates: &GeoCoordinates) -> Coordinates {
    Coordinates::new(coordinates.latitude, coordinates.longitude)
}

/// Returns the box of a rectangle; a circle has no box.
pub fn to_bounding_box(area: &Area) -> Result<GeoBoundingBox, PluginError> {
    match area {
        Area::Rectangle {
            top_left,
            bottom_right,
        } => Ok(GeoBoundingBox::new(to_geo(top_left), to_geo(bottom_right))),
        Area::Circle { .. } => Err(PluginError::NotSupported),
    }
}

pub fn from_bounding_box(bounding_box: &GeoBoundingBox) -> Area {
    Area::rectangle(
        from_geo(&bounding_box.top_left),
        from_geo(&bounding_box.bottom_right),
    )
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_ref().filter(|value| !value.is_empty()).cloned()
}

pub fn to_provider_address(address: &Address) -> ProviderAddress {
    ProviderAddress {
        label: non_empty(&address.freetext),
        house_number: non_empty(&address.building_number),
        street: non_empty(&address.street),
        district: non_empty(&address.district),
        city: non_empty(&address.city),
        county: non_empty(&address.county),
        state: non_empty(&address.state),
        country: non_empty(&address.country),
        country_code: non_empty(&address.country_code),
        postal_code: non_empty(&address.postal_code),
    }
}

pub fn from_provider_address(address: &ProviderAddress) -> Address {
    Address {
        building_number: non_empty(&address.house_number),
        street: non_empty(&address.street),
        district: non_empty(&address.district),
        city: non_empty(&address.city),
        county: non_empty(&address.county),
        state: non_empty(&address.state),
        country: non_empty(&address.country),
        country_code: non_empty(&address.country_code),
        postal_code: non_empty(&address.postal_code),
        freetext: non_empty(&address.label),
    }
}

fn from_provider_category(category: &ProviderCategory) -> Category {
    Category {
        id: category.id.clone(),
        name: category.title.clone(),
    }
}

/// Converts a rich discovery item. `unit` is the unit distances are
/// reported in.
pub fn place_from_item(item: &PlaceItem, unit: DistanceUnit) -> Place {
    Place {
        id: item.id.clone(),
        name: item.title.clone(),
        uri: item.href.clone(),
        location: from_geo(&item.position),
        address: item.vicinity.as_ref().map(|vicinity| Address {
            freetext: Some(vicinity.clone()),
            ..Address::default()
        }),
        distance: item
            .distance
            .map(|meters| convert_distance(meters, DistanceUnit::Meter, unit)),
        rating: item.average_rating.map(|average| Rating { average, count: 0 }),
        categories: item
            .category
            .iter()
            .map(from_provider_category)
            .collect(),
        ..Place::default()
    }
}

/// Converts a stub discovery item; only its title and link are known.
pub fn place_from_search_item(item: &SearchItem) -> Place {
    Place {
        name: item.title.clone(),
        uri: item.href.clone(),
        ..Place::default()
    }
}

pub fn place_from_details(place: &ProviderPlace) -> Place {
    let mut result = Place::default();
    merge_place_details(&mut result, place);
    result
}

/// Overwrites `place` with what the full record knows; fields the record
/// leaves empty keep their current value.
pub fn merge_place_details(place: &mut Place, details: &ProviderPlace) {
    if !details.id.is_empty() {
        place.id = details.id.clone();
    }
    if !details.name.is_empty() {
        place.name = details.name.clone();
    }
    place.location = from_geo(&details.position);
    if !details.address.is_empty() {
        place.address = Some(from_provider_address(&details.address));
    }
    if !details.categories.is_empty() {
        place.categories = details
            .categories
            .iter()
            .map(from_provider_category)
            .collect();
    }
    if let Some(rating) = &details.rating {
        place.rating = Some(Rating {
            average: rating.average,
            count: rating.count,
        });
    }
    place.contacts = details
        .contacts
        .iter()
        .map(|contact| Contact {
            kind: contact.kind.clone(),
            label: contact.label.clone(),
            value: contact.value.clone(),
        })
        .collect();
    if details.view_uri.is_some() {
        place.supplier_link = details.view_uri.clone();
    }
}

fn category_key(place: &Place) -> &str {
    place
        .categories
        .first()
        .map_or("", |category| category.id.as_str())
}

// Places without the sort key go last; equal keys keep their order.
fn compare_places(a: &Place, b: &Place, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Title => a.name.cmp(&b.name),
        SortBy::Id => a.id.cmp(&b.id),
        SortBy::Distance => match (a.distance, b.distance) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortBy::Rating => match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.average.total_cmp(&x.average),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortBy::Category => category_key(a).cmp(category_key(b)),
    }
}

/// Stable sort of places by `sort_by`.
pub fn sort_places(places: &mut [Place], sort_by: SortBy) {
    places.sort_by(|a, b| compare_places(a, b, sort_by));
}

pub fn to_provider_transport_mode(mode: TransportMode) -> ProviderTransportMode {
    match mode {
        TransportMode::Car => ProviderTransportMode::Car,
        TransportMode::Pedestrian => ProviderTransportMode::Pedestrian,
        TransportMode::PublicTransit => ProviderTransportMode::PublicTransport,
        TransportMode::Truck => ProviderTransportMode::Truck,
        TransportMode::Bicycle => ProviderTransportMode::Bicycle,
    }
}

pub fn to_route_type(optimization: RouteOptimization) -> RouteType {
    match optimization {
        RouteOptimization::Fastest => RouteType::Fastest,
        RouteOptimization::Shortest => RouteType::Shortest,
        RouteOptimization::Balanced => RouteType::Balanced,
    }
}

pub fn to_route_features(avoid: AvoidFeatures) -> Vec<RouteFeature> {
    [
        (AvoidFeatures::TOLL_ROAD, RouteFeature::TollRoad),
        (AvoidFeatures::MOTORWAY, RouteFeature::Motorway),
        (AvoidFeatures::FERRY, RouteFeature::Ferry),
        (AvoidFeatures::TUNNEL, RouteFeature::Tunnel),
        (AvoidFeatures::DIRT_ROAD, RouteFeature::DirtRoad),
    ]
    .into_iter()
    .filter(|(flag, _)| avoid.contains(*flag))
    .map(|(_, feature)| feature)
    .collect()
}

fn to_turn_type(action: ManeuverAction) -> TurnType {
    match action {
        ManeuverAction::Continue => TurnType::Straight,
        ManeuverAction::TurnLeft => TurnType::Left,
        ManeuverAction::TurnRight => TurnType::Right,
        ManeuverAction::SlightLeft => TurnType::BearLeft,
        ManeuverAction::SlightRight => TurnType::BearRight,
        ManeuverAction::UTurn => TurnType::UTurn,
        ManeuverAction::Roundabout => TurnType::Roundabout,
        ManeuverAction::Merge => TurnType::Merge,
        ManeuverAction::Arrive => TurnType::Destination,
    }
}

fn from_maneuver(maneuver: &ProviderManeuver, unit: DistanceUnit) -> Maneuver {
    Maneuver {
        position: from_geo(&maneuver.position),
        instruction: maneuver.instruction.clone(),
        turn: to_turn_type(maneuver.action),
        road_name: maneuver.road_name.clone(),
        distance: convert_distance(maneuver.length, DistanceUnit::Meter, unit),
        duration: maneuver.travel_time,
    }
}

fn from_leg(leg: &RouteLeg, unit: DistanceUnit) -> Segment {
    Segment {
        origin: from_geo(&leg.start),
        destination: from_geo(&leg.end),
        distance: convert_distance(leg.length, DistanceUnit::Meter, unit),
        duration: leg.travel_time,
        maneuvers: leg
            .maneuvers
            .iter()
            .map(|maneuver| from_maneuver(maneuver, unit))
            .collect(),
    }
}

/// Converts one candidate route, reporting lengths in `unit`.
pub fn route_from_provider(route: &ProviderRoute, unit: DistanceUnit, mode: TransportMode) -> Route {
    let segments: Vec<Segment> = route.legs.iter().map(|leg| from_leg(leg, unit)).collect();
    let origin = segments
        .first()
        .map(|segment| segment.origin)
        .or_else(|| route.shape.first().map(from_geo))
        .unwrap_or_default();
    let destination = segments
        .last()
        .map(|segment| segment.destination)
        .or_else(|| route.shape.last().map(from_geo))
        .unwrap_or_default();
    Route {
        id: route.id.clone(),
        origin,
        destination,
        distance: convert_distance(route.length, DistanceUnit::Meter, unit),
        distance_unit: unit,
        duration: route.travel_time,
        transport_mode: mode,
        bounding_box: Some(from_bounding_box(&route.bounding_box)),
        path: route.shape.iter().map(from_geo).collect(),
        segments,
    }
}
