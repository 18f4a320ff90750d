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

//! Route calculation.

use std::sync::{Arc, Mutex};

use maps_utils::{error, info};
use provider_rs::query::RouteQuery;
use provider_rs::reply::RouteReply;
use provider_rs::{ProviderError, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::{Candidate, RouteCallback};
use crate::convert::{
    route_from_provider, to_geo, to_provider_transport_mode, to_route_features, to_route_type,
    validate_coordinates,
};
use crate::error::{classify, MapsError, PluginError};
use crate::info::{Coordinates, DistanceUnit, Preference, TransportMode};

/// Calculates routes through an ordered list of waypoints.
///
/// Candidate routes are delivered in provider order until the callback
/// returns `false`.
pub struct RouteRequest {
    core: RequestCore,
    callback: CallbackSlot<Box<dyn RouteCallback>>,
    query: QuerySlot<RouteQuery>,
    /// Applied to the query on start; also picks the unit routes are
    /// reported in.
    preference: Mutex<Preference>,
}

impl ServiceOperation for RouteRequest {
    const KIND: RequestKind = RequestKind::Route;
    type Callback = Box<dyn RouteCallback>;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            callback: CallbackSlot::new(callback),
            query: QuerySlot::new(),
            preference: Mutex::new(Preference::new()),
        }
    }
}

impl RequestHandle for RouteRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.callback.release();
    }
}

impl RouteRequest {
    pub fn prepare_query(&self) -> Result<(), PluginError> {
        self.core.prepare()?;
        self.query.fill(RouteQuery::new());
        *self.preference.lock().unwrap() = self.core.config().preference().clone();
        Ok(())
    }

    /// Sets the waypoints, origin first and destination last.
    pub fn prepare_waypoints(&self, waypoints: &[Coordinates]) -> Result<(), PluginError> {
        if waypoints.len() < 2 {
            return Err(PluginError::InvalidParameter);
        }
        waypoints.iter().try_for_each(validate_coordinates)?;
        self.query.with(|query| {
            for waypoint in waypoints {
                query.add_waypoint(to_geo(waypoint));
            }
            Ok(())
        })
    }

    pub fn prepare_preference(&self, preference: &Preference) -> Result<(), PluginError> {
        let preference = preference.merged_over(self.core.config().preference());
        self.query.with(|_| Ok(()))?;
        *self.preference.lock().unwrap() = preference;
        Ok(())
    }

    fn apply_preference(&self, query: &mut RouteQuery) {
        let preference = self.preference.lock().unwrap();
        let options = preference.route.unwrap_or_default();
        query
            .transport_mode(to_provider_transport_mode(options.transport_mode))
            .route_type(to_route_type(options.optimization))
            .alternatives(options.alternatives);
        for feature in to_route_features(options.avoid) {
            query.avoid(feature);
        }
        if let Some(language) = preference.language.as_deref() {
            query.language(language);
        }
    }

    fn presentation(&self) -> (DistanceUnit, TransportMode) {
        let preference = self.preference.lock().unwrap();
        (
            preference.distance_unit.unwrap_or_default(),
            preference.route.unwrap_or_default().transport_mode,
        )
    }

    pub fn start_route(self: &Arc<Self>) -> Result<(), PluginError> {
        let mut query = self.query.take()?;
        if !query.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.apply_preference(&mut query);
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .route(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }

    fn deliver(&self, reply: &RouteReply) {
        let request_id = self.core.request_id();
        let (unit, mode) = self.presentation();
        let total = reply.count();
        self.callback.with(|callback| {
            if total == 0 {
                callback.on_route(request_id, Err(MapsError::NotFound));
                return;
            }
            for index in 0..total {
                if self.core.is_cancel_requested() {
                    info!("request {} canceled during delivery", request_id);
                    return;
                }
                let Some(route) = reply.get(index) else {
                    return;
                };
                let candidate = Candidate {
                    index,
                    total,
                    item: route_from_provider(route, unit, mode),
                };
                if !callback.on_route(request_id, Ok(candidate)) {
                    info!("request {} stopped after route {}", request_id, index);
                    return;
                }
            }
        });
    }
}

impl ReplyListener<RouteReply> for ReplyHandler<RouteRequest> {
    fn on_reply(&mut self, reply: RouteReply) {
        let request = &self.0;
        if request.core.enter_reply(RequestState::Replied) {
            request.deliver(&reply);
        }
        request.destroy();
    }

    fn on_failure(&mut self, error: ProviderError) {
        let request = &self.0;
        if request.core.enter_reply(RequestState::Failed) {
            error!("request {} failed: {}", request.core.request_id(), error);
            let request_id = request.core.request_id();
            let error = MapsError::from(classify(&error));
            request
                .callback
                .with(|callback| callback.on_route(request_id, Err(error)));
        }
        request.destroy();
    }
}
