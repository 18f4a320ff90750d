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

//! Entry points the host framework calls.
//!
//! Every request entry point validates its input synchronously, before a
//! request id is minted, then creates the request, prepares and starts it.
//! Structural errors never reach the provider. On success the new request id
//! is returned and the callback fires later, from the provider's thread,
//! unless the request is canceled first.

use std::sync::Arc;

use maps_utils::request_id::RequestId;
use maps_utils::{error, info, warn};
use provider_rs::query::DiscoveryKind;
use provider_rs::ProviderSdk;

use crate::callback::{
    GeocodeCallback, MultiReverseGeocodeCallback, PlaceDelivery, PlaceDetailsCallback,
    PlaceListCallback, PlaceSearchCallback, ReverseGeocodeCallback, RouteCallback,
};
use crate::config::{format_provider_key, parse_provider_key, PluginConfig};
use crate::convert::{to_bounding_box, validate_area, validate_coordinates};
use crate::error::{MapsError, PluginError};
use crate::info::{
    Address, Area, Coordinates, DataFeature, Preference, PlaceFilter, ServiceKind,
};
use crate::request::{
    GeocodeRequest, MultiReverseGeocodeRequest, PlaceDetailsRequest, PlaceSearchRequest,
    RequestHandle, ReverseGeocodeRequest, RouteRequest, ServiceOperation,
};
use crate::services::RequestRegistry;

const SUPPORTED_SERVICES: &[ServiceKind] = &[
    ServiceKind::Geocode,
    ServiceKind::GeocodeInsideArea,
    ServiceKind::GeocodeByStructuredAddress,
    ServiceKind::ReverseGeocode,
    ServiceKind::MultiReverseGeocode,
    ServiceKind::SearchPlace,
    ServiceKind::SearchPlaceByArea,
    ServiceKind::SearchPlaceByAddress,
    ServiceKind::SearchPlaceList,
    ServiceKind::PlaceDetails,
    ServiceKind::SearchRoute,
    ServiceKind::SearchRouteWaypoints,
    ServiceKind::CancelRequest,
    ServiceKind::ViewObjects,
];

/// One loaded instance of the plugin.
///
/// Instances loaded by the same host share a [`RequestRegistry`]; see
/// [`MapsPlugin::with_registry`].
pub struct MapsPlugin {
    registry: Arc<RequestRegistry>,
}

impl MapsPlugin {
    /// Creates a plugin instance with its own registry.
    pub fn new(sdk: Arc<dyn ProviderSdk>, config: PluginConfig) -> Self {
        Self::with_registry(RequestRegistry::new(sdk, config))
    }

    /// Creates a plugin instance on a shared registry.
    pub fn with_registry(registry: Arc<RequestRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<RequestRegistry> {
        &self.registry
    }

    /// Loads the plugin, bringing the provider SDK up if this is the first
    /// instance.
    pub fn init(&self) -> Result<(), MapsError> {
        self.registry.acquire()?;
        Ok(())
    }

    /// Unloads the plugin. The last instance terminates every live request.
    pub fn shutdown(&self) -> Result<(), MapsError> {
        self.registry.release()?;
        Ok(())
    }

    /// Sets the provider key, `APP_ID/APP_CODE`.
    pub fn set_provider_key(&self, key: &str) -> Result<(), MapsError> {
        let credentials = parse_provider_key(key)?;
        self.registry.set_credentials(credentials)?;
        info!("provider key updated");
        Ok(())
    }

    pub fn get_provider_key(&self) -> Result<String, MapsError> {
        self.registry
            .config()
            .credentials()
            .map(format_provider_key)
            .ok_or(MapsError::KeyNotAvailable)
    }

    /// Sets the plugin wide preference. Fields left unset keep their
    /// current value.
    pub fn set_preference(&self, preference: &Preference) -> Result<(), MapsError> {
        check_preference(Some(preference))?;
        let merged = preference.merged_over(self.registry.config().preference());
        self.registry.set_preference(merged);
        Ok(())
    }

    pub fn get_preference(&self) -> Preference {
        self.registry.config().preference().clone()
    }

    pub fn is_service_supported(&self, service: ServiceKind) -> bool {
        SUPPORTED_SERVICES.contains(&service)
    }

    /// Checks whether results of `service` can carry `feature`.
    pub fn is_data_supported(&self, service: ServiceKind, feature: DataFeature) -> bool {
        match service {
            ServiceKind::SearchPlace
            | ServiceKind::SearchPlaceByArea
            | ServiceKind::SearchPlaceByAddress
            | ServiceKind::SearchPlaceList
            | ServiceKind::PlaceDetails => matches!(
                feature,
                DataFeature::PlaceAddress
                    | DataFeature::PlaceRating
                    | DataFeature::PlaceCategories
                    | DataFeature::PlaceContacts
            ),
            ServiceKind::SearchRoute | ServiceKind::SearchRouteWaypoints => matches!(
                feature,
                DataFeature::RoutePath
                    | DataFeature::RouteSegmentsPath
                    | DataFeature::RouteSegmentsManeuvers
            ),
            _ => false,
        }
    }

    /// Resolves a one line address into coordinates.
    pub fn geocode(
        &self,
        address: &str,
        preference: Option<&Preference>,
        callback: impl GeocodeCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if address.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        check_preference(preference)?;
        self.submit::<GeocodeRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_text(address)?;
            prepare_optional(request, preference, GeocodeRequest::prepare_preference);
            request.start_geocode()
        })
    }

    /// Resolves a one line address, restricted to a rectangle.
    ///
    /// Circular areas are `NotSupported` by the provider.
    pub fn geocode_inside_area(
        &self,
        address: &str,
        area: &Area,
        preference: Option<&Preference>,
        callback: impl GeocodeCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if address.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        validate_area(area)?;
        to_bounding_box(area)?;
        check_preference(preference)?;
        self.submit::<GeocodeRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_text(address)?;
            request.prepare_area(area)?;
            prepare_optional(request, preference, GeocodeRequest::prepare_preference);
            request.start_geocode()
        })
    }

    pub fn geocode_by_structured_address(
        &self,
        address: &Address,
        preference: Option<&Preference>,
        callback: impl GeocodeCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if address.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        check_preference(preference)?;
        self.submit::<GeocodeRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_address(address)?;
            prepare_optional(request, preference, GeocodeRequest::prepare_preference);
            request.start_geocode()
        })
    }

    /// Finds the address nearest to `position`.
    pub fn reverse_geocode(
        &self,
        position: &Coordinates,
        preference: Option<&Preference>,
        callback: impl ReverseGeocodeCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        validate_coordinates(position)?;
        check_preference(preference)?;
        self.submit::<ReverseGeocodeRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_position(position)?;
            prepare_optional(request, preference, ReverseGeocodeRequest::prepare_preference);
            request.start_reverse_geocode()
        })
    }

    /// Finds the address of every position, answered in one call.
    pub fn multi_reverse_geocode(
        &self,
        positions: &[Coordinates],
        preference: Option<&Preference>,
        callback: impl MultiReverseGeocodeCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if positions.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        positions.iter().try_for_each(validate_coordinates)?;
        check_preference(preference)?;
        self.submit::<MultiReverseGeocodeRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_positions(positions)?;
            prepare_optional(
                request,
                preference,
                MultiReverseGeocodeRequest::prepare_preference,
            );
            request.start_multi_reverse_geocode()
        })
    }

    /// Searches places within `radius` meters of `center`.
    pub fn search_place(
        &self,
        center: &Coordinates,
        radius: f64,
        filter: &PlaceFilter,
        preference: Option<&Preference>,
        callback: impl PlaceSearchCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        validate_coordinates(center)?;
        if !(radius > 0.0) {
            return Err(MapsError::InvalidParameter);
        }
        check_preference(preference)?;
        let kind = discovery_kind(filter, DiscoveryKind::Around);
        self.submit::<PlaceSearchRequest>(
            PlaceDelivery::PerItem(Box::new(callback)),
            |request| {
                request.prepare_query(kind)?;
                request.prepare_position(center, radius)?;
                request.prepare_filter(filter)?;
                prepare_optional(request, preference, PlaceSearchRequest::prepare_preference);
                request.start_place_search()
            },
        )
    }

    /// Searches places inside `area`.
    pub fn search_place_by_area(
        &self,
        area: &Area,
        filter: &PlaceFilter,
        preference: Option<&Preference>,
        callback: impl PlaceSearchCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        validate_area(area)?;
        check_preference(preference)?;
        let kind = discovery_kind(filter, DiscoveryKind::Explore);
        self.submit::<PlaceSearchRequest>(
            PlaceDelivery::PerItem(Box::new(callback)),
            |request| {
                request.prepare_query(kind)?;
                request.prepare_area(area)?;
                request.prepare_filter(filter)?;
                prepare_optional(request, preference, PlaceSearchRequest::prepare_preference);
                request.start_place_search()
            },
        )
    }

    /// Searches places matching a free-form address inside `area`. The
    /// address takes precedence over any text of `filter`.
    pub fn search_place_by_address(
        &self,
        address: &str,
        area: &Area,
        filter: &PlaceFilter,
        preference: Option<&Preference>,
        callback: impl PlaceSearchCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if address.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        validate_area(area)?;
        check_preference(preference)?;
        self.submit::<PlaceSearchRequest>(
            PlaceDelivery::PerItem(Box::new(callback)),
            |request| {
                request.prepare_query(DiscoveryKind::Search)?;
                request.prepare_area(area)?;
                request.prepare_filter(filter)?;
                request.prepare_address(address)?;
                prepare_optional(request, preference, PlaceSearchRequest::prepare_preference);
                request.start_place_search()
            },
        )
    }

    /// Searches places inside `area` and delivers them as one list, without
    /// fetching their details.
    pub fn search_place_list(
        &self,
        area: &Area,
        filter: &PlaceFilter,
        preference: Option<&Preference>,
        callback: impl PlaceListCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        validate_area(area)?;
        check_preference(preference)?;
        let kind = discovery_kind(filter, DiscoveryKind::Explore);
        self.submit::<PlaceSearchRequest>(PlaceDelivery::List(Box::new(callback)), |request| {
            request.prepare_query(kind)?;
            request.prepare_area(area)?;
            request.prepare_filter(filter)?;
            prepare_optional(request, preference, PlaceSearchRequest::prepare_preference);
            request.start_place_search()
        })
    }

    /// Fetches the details of the place behind `url`.
    pub fn get_place_details(
        &self,
        url: &str,
        callback: impl PlaceDetailsCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if url.is_empty() {
            return Err(MapsError::InvalidParameter);
        }
        self.submit::<PlaceDetailsRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_href(url)?;
            request.start_place_details()
        })
    }

    pub fn search_route(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        preference: Option<&Preference>,
        callback: impl RouteCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        self.search_route_waypoints(&[*origin, *destination], preference, callback)
    }

    /// Calculates routes through `waypoints`, origin first.
    pub fn search_route_waypoints(
        &self,
        waypoints: &[Coordinates],
        preference: Option<&Preference>,
        callback: impl RouteCallback + 'static,
    ) -> Result<RequestId, MapsError> {
        if waypoints.len() < 2 {
            return Err(MapsError::InvalidParameter);
        }
        waypoints.iter().try_for_each(validate_coordinates)?;
        check_preference(preference)?;
        self.submit::<RouteRequest>(Box::new(callback), |request| {
            request.prepare_query()?;
            request.prepare_waypoints(waypoints)?;
            prepare_optional(request, preference, RouteRequest::prepare_preference);
            request.start_route()
        })
    }

    /// Cancels a live request. Once this returns the request never calls
    /// back. Unknown or finished requests are `NotFound`.
    pub fn cancel_request(&self, request_id: RequestId) -> Result<(), MapsError> {
        self.registry.cancel_instance(request_id)?;
        Ok(())
    }

    fn submit<R: ServiceOperation>(
        &self,
        callback: R::Callback,
        start: impl FnOnce(&Arc<R>) -> Result<(), PluginError>,
    ) -> Result<RequestId, MapsError> {
        if !self.registry.is_active() {
            error!("{:?} request while the plugin is not initialized", R::KIND);
            return Err(MapsError::InvalidOperation);
        }
        let (request_id, request) = self.registry.create_instance::<R>(callback)?;
        if let Err(e) = start(&request) {
            error!("request {} not started: {}", request_id, e);
            request.destroy();
            return Err(MapsError::from(e));
        }
        Ok(request_id)
    }
}

fn check_preference(preference: Option<&Preference>) -> Result<(), PluginError> {
    match preference {
        Some(preference) if !preference.is_valid() => Err(PluginError::InvalidParameter),
        _ => Ok(()),
    }
}

// A preference only refines a request, so failing to apply it is not fatal.
fn prepare_optional<R: RequestHandle>(
    request: &Arc<R>,
    preference: Option<&Preference>,
    prepare: fn(&R, &Preference) -> Result<(), PluginError>,
) {
    if let Some(preference) = preference {
        if let Err(e) = prepare(request, preference) {
            warn!("request {} preference ignored: {}", request.request_id(), e);
        }
    }
}

fn discovery_kind(filter: &PlaceFilter, without_text: DiscoveryKind) -> DiscoveryKind {
    let has_text = [&filter.keyword, &filter.place_name, &filter.address]
        .into_iter()
        .any(|field| field.as_deref().map_or(false, |value| !value.is_empty()));
    if has_text {
        DiscoveryKind::Search
    } else {
        without_text
    }
}
