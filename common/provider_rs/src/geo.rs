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

//! Geographic primitives of the provider model.

/// A WGS84 position as the provider understands it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An axis aligned box given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoBoundingBox {
    pub top_left: GeoCoordinates,
    pub bottom_right: GeoCoordinates,
}

impl GeoBoundingBox {
    pub fn new(top_left: GeoCoordinates, bottom_right: GeoCoordinates) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }
}

/// A postal address as returned by, or sent to, the provider.
///
/// Every field is optional; an address with no field set is how the provider
/// represents a position it could not resolve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderAddress {
    pub label: Option<String>,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
}

impl ProviderAddress {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        [
            &self.label,
            &self.house_number,
            &self.street,
            &self.district,
            &self.city,
            &self.county,
            &self.state,
            &self.country,
            &self.country_code,
            &self.postal_code,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}
