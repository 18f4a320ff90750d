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

//! Framework side data model.
//!
//! These are the values the host framework hands to the plugin and receives
//! back in callbacks: coordinates, areas, addresses, places, routes, and the
//! preference and filter bundles attached to requests.

/// Largest latitude the provider accepts, in degrees.
pub const LATITUDE_LIMIT: f64 = 85.05113;

/// Largest longitude magnitude, in degrees.
pub const LONGITUDE_LIMIT: f64 = 180.0;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if the position lies inside the range the provider
    /// accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use maps_plugin::info::Coordinates;
    ///
    /// assert!(Coordinates::new(85.05113, -180.0).is_valid());
    /// assert!(!Coordinates::new(91.0, 0.0).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        (-LATITUDE_LIMIT..=LATITUDE_LIMIT).contains(&self.latitude)
            && (-LONGITUDE_LIMIT..=LONGITUDE_LIMIT).contains(&self.longitude)
    }
}

/// A geographic area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Area {
    Rectangle {
        top_left: Coordinates,
        bottom_right: Coordinates,
    },
    Circle {
        center: Coordinates,
        /// Radius in meters.
        radius: f64,
    },
}

impl Area {
    pub fn rectangle(top_left: Coordinates, bottom_right: Coordinates) -> Self {
        Area::Rectangle {
            top_left,
            bottom_right,
        }
    }

    pub fn circle(center: Coordinates, radius: f64) -> Self {
        Area::Circle { center, radius }
    }

    /// Returns `true` if every corner or center is a valid position and a
    /// circle has a positive radius.
    pub fn is_valid(&self) -> bool {
        match self {
            Area::Rectangle {
                top_left,
                bottom_right,
            } => top_left.is_valid() && bottom_right.is_valid(),
            Area::Circle { center, radius } => center.is_valid() && *radius > 0.0,
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub building_number: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
    /// One line rendering of the whole address.
    pub freetext: Option<String>,
}

impl Address {
    /// Returns `true` if no field carries text.
    pub fn is_empty(&self) -> bool {
        [
            &self.building_number,
            &self.street,
            &self.district,
            &self.city,
            &self.county,
            &self.state,
            &self.country,
            &self.country_code,
            &self.postal_code,
            &self.freetext,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

/// Unit distances are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Meter,
    Kilometer,
    Foot,
    Yard,
}

/// Key place results are ordered by before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Title,
    Id,
    /// Nearest first.
    Distance,
    /// Best rated first.
    Rating,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Car,
    Pedestrian,
    PublicTransit,
    Truck,
    Bicycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteOptimization {
    #[default]
    Fastest,
    Shortest,
    Balanced,
}

/// Bit set of road features a route should avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvoidFeatures(u32);

impl AvoidFeatures {
    pub const NONE: AvoidFeatures = AvoidFeatures(0);
    pub const TOLL_ROAD: AvoidFeatures = AvoidFeatures(1);
    pub const MOTORWAY: AvoidFeatures = AvoidFeatures(1 << 1);
    pub const FERRY: AvoidFeatures = AvoidFeatures(1 << 2);
    pub const TUNNEL: AvoidFeatures = AvoidFeatures(1 << 3);
    pub const DIRT_ROAD: AvoidFeatures = AvoidFeatures(1 << 4);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: AvoidFeatures) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for AvoidFeatures {
    type Output = AvoidFeatures;

    fn bitor(self, rhs: AvoidFeatures) -> AvoidFeatures {
        AvoidFeatures(self.0 | rhs.0)
    }
}

/// Route calculation options of a [`Preference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteOptions {
    pub transport_mode: TransportMode,
    pub optimization: RouteOptimization,
    pub avoid: AvoidFeatures,
    /// Number of alternative routes requested besides the best one.
    pub alternatives: usize,
}

/// Preference bundle attached to a request or set plugin wide.
///
/// Unset fields fall back to the plugin wide preference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preference {
    pub language: Option<String>,
    pub max_results: Option<usize>,
    pub distance_unit: Option<DistanceUnit>,
    pub sort_by: Option<SortBy>,
    pub route: Option<RouteOptions>,
}

impl Preference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn distance_unit(&mut self, unit: DistanceUnit) -> &mut Self {
        self.distance_unit = Some(unit);
        self
    }

    pub fn sort_by(&mut self, sort_by: SortBy) -> &mut Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn route(&mut self, route: RouteOptions) -> &mut Self {
        self.route = Some(route);
        self
    }

    /// Returns `true` unless a field holds a value no request can use.
    pub fn is_valid(&self) -> bool {
        self.max_results != Some(0) && self.language.as_deref() != Some("")
    }

    /// Fills every unset field of `self` from `base`.
    pub fn merged_over(&self, base: &Preference) -> Preference {
        Preference {
            language: self.language.clone().or_else(|| base.language.clone()),
            max_results: self.max_results.or(base.max_results),
            distance_unit: self.distance_unit.or(base.distance_unit),
            sort_by: self.sort_by.or(base.sort_by),
            route: self.route.or(base.route),
        }
    }
}

/// Filter bundle of a place search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceFilter {
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub place_name: Option<String>,
    pub address: Option<String>,
}

impl PlaceFilter {
    /// Returns `true` if no criterion carries text.
    pub fn is_empty(&self) -> bool {
        [&self.category, &self.keyword, &self.place_name, &self.address]
            .iter()
            .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub kind: String,
    pub label: String,
    pub value: String,
}

/// A place found by a search or fetched by its URI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Place {
    pub id: String,
    pub name: String,
    /// Link the full details of the place are fetched with.
    pub uri: String,
    pub location: Coordinates,
    pub address: Option<Address>,
    /// Distance from the search center, in the requested unit.
    pub distance: Option<f64>,
    pub rating: Option<Rating>,
    pub categories: Vec<Category>,
    pub contacts: Vec<Contact>,
    pub supplier_link: Option<String>,
}

/// Turn instruction of a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnType {
    #[default]
    Straight,
    Left,
    Right,
    BearLeft,
    BearRight,
    UTurn,
    Roundabout,
    Merge,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Maneuver {
    pub position: Coordinates,
    pub instruction: String,
    pub turn: TurnType,
    pub road_name: Option<String>,
    /// Length in the route's distance unit.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: u64,
}

/// The stretch of a route between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub distance: f64,
    pub duration: u64,
    pub maneuvers: Vec<Maneuver>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub id: String,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub distance: f64,
    pub distance_unit: DistanceUnit,
    /// Duration in seconds.
    pub duration: u64,
    pub transport_mode: TransportMode,
    pub bounding_box: Option<Area>,
    pub path: Vec<Coordinates>,
    pub segments: Vec<Segment>,
}

/// Services the host framework may ask the plugin for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Geocode,
    GeocodeInsideArea,
    GeocodeByStructuredAddress,
    ReverseGeocode,
    MultiReverseGeocode,
    SearchPlace,
    SearchPlaceByArea,
    SearchPlaceByAddress,
    SearchPlaceList,
    PlaceDetails,
    SearchRoute,
    SearchRouteWaypoints,
    CancelRequest,
    ViewObjects,
}

/// Optional data a service may fill in its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFeature {
    PlaceAddress,
    PlaceRating,
    PlaceCategories,
    PlaceContacts,
    PlaceMedia,
    PlaceReviews,
    RoutePath,
    RouteSegmentsPath,
    RouteSegmentsManeuvers,
}
