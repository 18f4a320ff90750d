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

//! Module for provider replies.
//!
//! Replies expose a result count and indexed accessors, the shape the reply
//! listeners of the plugin walk through.

use crate::geo::{GeoBoundingBox, GeoCoordinates, ProviderAddress};

/// One candidate location of a (reverse) geocoding reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoLocation {
    pub position: GeoCoordinates,
    pub address: ProviderAddress,
    /// Distance from the reverse geocoded position, in meters.
    pub distance: Option<f64>,
}

/// Reply to a geocoder or reverse geocoder query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoCoderReply {
    results: Vec<GeoLocation>,
}

impl GeoCoderReply {
    pub fn new(results: Vec<GeoLocation>) -> Self {
        Self { results }
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn get(&self, index: usize) -> Option<&GeoLocation> {
        self.results.get(index)
    }

    pub fn results(&self) -> &[GeoLocation] {
        &self.results
    }
}

/// Reply to a batch reverse geocoder query.
///
/// Entries are parallel to the query's positions; `None` marks a position
/// the provider could not resolve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiReverseGeoCoderReply {
    results: Vec<Option<ProviderAddress>>,
}

impl MultiReverseGeoCoderReply {
    pub fn new(results: Vec<Option<ProviderAddress>>) -> Self {
        Self { results }
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn get(&self, index: usize) -> Option<&ProviderAddress> {
        self.results.get(index).and_then(Option::as_ref)
    }
}

/// A place category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderCategory {
    pub id: String,
    pub title: String,
}

/// A rich place record of a discovery reply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceItem {
    pub id: String,
    pub title: String,
    pub position: GeoCoordinates,
    /// Distance from the search center, in meters.
    pub distance: Option<f64>,
    pub average_rating: Option<f64>,
    pub category: Option<ProviderCategory>,
    pub vicinity: Option<String>,
    /// Link to fetch the full place details with.
    pub href: String,
}

/// A stub record of a discovery reply pointing at a follow-up search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchItem {
    pub title: String,
    pub href: String,
}

/// An item of a discovery reply.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkObject {
    Place(PlaceItem),
    Search(SearchItem),
}

/// Reply to a discovery query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscoveryReply {
    items: Vec<LinkObject>,
}

impl DiscoveryReply {
    pub fn new(items: Vec<LinkObject>) -> Self {
        Self { items }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&LinkObject> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[LinkObject] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderRating {
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderContact {
    /// Contact kind such as `phone`, `website` or `email`.
    pub kind: String,
    pub label: String,
    pub value: String,
}

/// Full record of one place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderPlace {
    pub id: String,
    pub name: String,
    pub position: GeoCoordinates,
    pub address: ProviderAddress,
    pub categories: Vec<ProviderCategory>,
    pub rating: Option<ProviderRating>,
    pub contacts: Vec<ProviderContact>,
    pub view_uri: Option<String>,
}

/// Reply to a place details query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetailsReply {
    place: ProviderPlace,
}

impl PlaceDetailsReply {
    pub fn new(place: ProviderPlace) -> Self {
        Self { place }
    }

    pub fn place(&self) -> &ProviderPlace {
        &self.place
    }
}

/// Turn action of a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManeuverAction {
    #[default]
    Continue,
    TurnLeft,
    TurnRight,
    SlightLeft,
    SlightRight,
    UTurn,
    Roundabout,
    Merge,
    Arrive,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderManeuver {
    pub position: GeoCoordinates,
    pub instruction: String,
    pub action: ManeuverAction,
    pub road_name: Option<String>,
    /// Length of the maneuver's stretch, in meters.
    pub length: f64,
    /// Travel time of the maneuver's stretch, in seconds.
    pub travel_time: u64,
}

/// The part of a route between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteLeg {
    pub start: GeoCoordinates,
    pub end: GeoCoordinates,
    pub length: f64,
    pub travel_time: u64,
    pub maneuvers: Vec<ProviderManeuver>,
}

/// One candidate route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderRoute {
    pub id: String,
    /// Total length, in meters.
    pub length: f64,
    /// Total travel time, in seconds.
    pub travel_time: u64,
    pub bounding_box: GeoBoundingBox,
    pub shape: Vec<GeoCoordinates>,
    pub legs: Vec<RouteLeg>,
}

/// Reply to a route query; routes are in provider preference order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteReply {
    routes: Vec<ProviderRoute>,
}

impl RouteReply {
    pub fn new(routes: Vec<ProviderRoute>) -> Self {
        Self { routes }
    }

    pub fn count(&self) -> usize {
        self.routes.len()
    }

    pub fn get(&self, index: usize) -> Option<&ProviderRoute> {
        self.routes.get(index)
    }
}
