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

//! Module for constructing provider queries.
//!
//! Each provider call type has its own query. Queries are built with a
//! fluent `&mut self` interface and handed to the SDK by value.
//!
//! # Examples
//!
//! ```
//! use provider_rs::query::GeoCoderQuery;
//!
//! let mut query = GeoCoderQuery::new();
//! query.search_text("Alexanderplatz, Berlin").language("de-DE").max_results(5);
//! assert!(query.is_valid());
//! ```

use crate::geo::{GeoBoundingBox, GeoCoordinates, ProviderAddress};

/// What a geocoder query resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoCoderInput {
    /// One line free-form address.
    FreeText(String),
    /// Address split into fields.
    Structured(ProviderAddress),
}

/// Forward geocoding query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoCoderQuery {
    input: Option<GeoCoderInput>,
    bounding_box: Option<GeoBoundingBox>,
    language: Option<String>,
    max_results: Option<usize>,
}

impl GeoCoderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&mut self, text: &str) -> &mut Self {
        self.input = Some(GeoCoderInput::FreeText(text.to_string()));
        self
    }

    pub fn address(&mut self, address: ProviderAddress) -> &mut Self {
        self.input = Some(GeoCoderInput::Structured(address));
        self
    }

    /// Restricts results to the given box.
    pub fn bounding_box(&mut self, bounding_box: GeoBoundingBox) -> &mut Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn input(&self) -> Option<&GeoCoderInput> {
        self.input.as_ref()
    }

    pub fn get_bounding_box(&self) -> Option<&GeoBoundingBox> {
        self.bounding_box.as_ref()
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn get_max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// A query is executable once it knows what to resolve.
    pub fn is_valid(&self) -> bool {
        self.input.is_some()
    }
}

/// Reverse geocoding query for a single position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseGeoCoderQuery {
    position: Option<GeoCoordinates>,
    radius: Option<f64>,
    language: Option<String>,
    max_results: Option<usize>,
}

impl ReverseGeoCoderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&mut self, position: GeoCoordinates) -> &mut Self {
        self.position = Some(position);
        self
    }

    /// Search radius around the position, in meters.
    pub fn radius(&mut self, radius: f64) -> &mut Self {
        self.radius = Some(radius);
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn get_position(&self) -> Option<&GeoCoordinates> {
        self.position.as_ref()
    }

    pub fn get_radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn get_max_results(&self) -> Option<usize> {
        self.max_results
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_some()
    }
}

/// Batch reverse geocoding query; the reply is parallel to `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiReverseGeoCoderQuery {
    positions: Vec<GeoCoordinates>,
    language: Option<String>,
}

impl MultiReverseGeoCoderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, position: GeoCoordinates) -> &mut Self {
        self.positions.push(position);
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn positions(&self) -> &[GeoCoordinates] {
        &self.positions
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Flavor of a discovery query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryKind {
    /// Text search.
    #[default]
    Search,
    /// Category browsing inside an area.
    Explore,
    /// Places around a position.
    Around,
}

/// Place discovery query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryQuery {
    kind: DiscoveryKind,
    search_text: Option<String>,
    categories: Vec<String>,
    position: Option<GeoCoordinates>,
    radius: Option<f64>,
    bounding_box: Option<GeoBoundingBox>,
    language: Option<String>,
    max_results: Option<usize>,
}

impl DiscoveryQuery {
    pub fn new(kind: DiscoveryKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn search_text(&mut self, text: &str) -> &mut Self {
        self.search_text = Some(text.to_string());
        self
    }

    pub fn add_category(&mut self, category: &str) -> &mut Self {
        self.categories.push(category.to_string());
        self
    }

    pub fn position(&mut self, position: GeoCoordinates) -> &mut Self {
        self.position = Some(position);
        self
    }

    /// Radius around the position, in meters.
    pub fn radius(&mut self, radius: f64) -> &mut Self {
        self.radius = Some(radius);
        self
    }

    pub fn bounding_box(&mut self, bounding_box: GeoBoundingBox) -> &mut Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn kind(&self) -> DiscoveryKind {
        self.kind
    }

    pub fn get_search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn get_position(&self) -> Option<&GeoCoordinates> {
        self.position.as_ref()
    }

    pub fn get_radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn get_bounding_box(&self) -> Option<&GeoBoundingBox> {
        self.bounding_box.as_ref()
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn get_max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Checks that the query carries what its kind needs.
    pub fn is_valid(&self) -> bool {
        let located = self.position.is_some() || self.bounding_box.is_some();
        match self.kind {
            DiscoveryKind::Search => located && self.search_text.is_some(),
            DiscoveryKind::Explore => located,
            DiscoveryKind::Around => self.position.is_some(),
        }
    }
}

/// Place details query, addressed by the place's link.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceQuery {
    href: String,
    language: Option<String>,
}

impl PlaceQuery {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            language: None,
        }
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        !self.href.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    #[default]
    Car,
    Pedestrian,
    PublicTransport,
    Truck,
    Bicycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteType {
    #[default]
    Fastest,
    Shortest,
    Balanced,
}

/// Road features a route may be asked to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFeature {
    TollRoad,
    Motorway,
    Ferry,
    Tunnel,
    DirtRoad,
}

/// Route calculation query through an ordered list of waypoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteQuery {
    waypoints: Vec<GeoCoordinates>,
    transport_mode: TransportMode,
    route_type: RouteType,
    avoid: Vec<RouteFeature>,
    alternatives: usize,
    language: Option<String>,
}

impl RouteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_waypoint(&mut self, waypoint: GeoCoordinates) -> &mut Self {
        self.waypoints.push(waypoint);
        self
    }

    pub fn transport_mode(&mut self, mode: TransportMode) -> &mut Self {
        self.transport_mode = mode;
        self
    }

    pub fn route_type(&mut self, route_type: RouteType) -> &mut Self {
        self.route_type = route_type;
        self
    }

    pub fn avoid(&mut self, feature: RouteFeature) -> &mut Self {
        if !self.avoid.contains(&feature) {
            self.avoid.push(feature);
        }
        self
    }

    /// Number of alternative routes requested on top of the best one.
    pub fn alternatives(&mut self, alternatives: usize) -> &mut Self {
        self.alternatives = alternatives;
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn waypoints(&self) -> &[GeoCoordinates] {
        &self.waypoints
    }

    pub fn get_transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn get_route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn avoided(&self) -> &[RouteFeature] {
        &self.avoid
    }

    pub fn get_alternatives(&self) -> usize {
        self.alternatives
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.waypoints.len() >= 2
    }
}
