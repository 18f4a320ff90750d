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

//! Forward geocoding.

use std::sync::Arc;

use maps_utils::{error, info};
use provider_rs::query::GeoCoderQuery;
use provider_rs::reply::GeoCoderReply;
use provider_rs::{ProviderError, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::{Candidate, GeocodeCallback};
use crate::convert::{from_geo, to_bounding_box, to_provider_address};
use crate::error::{classify, MapsError, PluginError};
use crate::info::{Address, Area, Preference};

/// Resolves an address into coordinates.
///
/// Every candidate of the reply is delivered in provider order until the
/// callback returns `false`.
pub struct GeocodeRequest {
    core: RequestCore,
    callback: CallbackSlot<Box<dyn GeocodeCallback>>,
    query: QuerySlot<GeoCoderQuery>,
}

impl ServiceOperation for GeocodeRequest {
    const KIND: RequestKind = RequestKind::Geocode;
    type Callback = Box<dyn GeocodeCallback>;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            callback: CallbackSlot::new(callback),
            query: QuerySlot::new(),
        }
    }
}

impl RequestHandle for GeocodeRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.callback.release();
    }
}

impl GeocodeRequest {
    pub fn prepare_query(&self) -> Result<(), PluginError> {
        self.core.prepare()?;
        let preference = self.core.config().preference();
        let mut query = GeoCoderQuery::new();
        if let Some(language) = preference.language.as_deref() {
            query.language(language);
        }
        if let Some(max_results) = preference.max_results {
            query.max_results(max_results);
        }
        self.query.fill(query);
        Ok(())
    }

    /// Sets the one line address to resolve.
    pub fn prepare_text(&self, text: &str) -> Result<(), PluginError> {
        if text.is_empty() {
            return Err(PluginError::InvalidParameter);
        }
        self.query.with(|query| {
            query.search_text(text);
            Ok(())
        })
    }

    /// Sets a structured address to resolve.
    pub fn prepare_address(&self, address: &Address) -> Result<(), PluginError> {
        if address.is_empty() {
            return Err(PluginError::InvalidParameter);
        }
        self.query.with(|query| {
            query.address(to_provider_address(address));
            Ok(())
        })
    }

    /// Restricts the candidates to a rectangle. Circles are `NotSupported`.
    pub fn prepare_area(&self, area: &Area) -> Result<(), PluginError> {
        let bounding_box = to_bounding_box(area)?;
        self.query.with(|query| {
            query.bounding_box(bounding_box);
            Ok(())
        })
    }

    pub fn prepare_preference(&self, preference: &Preference) -> Result<(), PluginError> {
        let preference = preference.merged_over(self.core.config().preference());
        self.query.with(|query| {
            if let Some(language) = preference.language.as_deref() {
                query.language(language);
            }
            if let Some(max_results) = preference.max_results {
                query.max_results(max_results);
            }
            Ok(())
        })
    }

    /// Submits the query.
    pub fn start_geocode(self: &Arc<Self>) -> Result<(), PluginError> {
        let query = self.query.take()?;
        if !query.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .geocode(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }

    fn deliver(&self, reply: &GeoCoderReply) {
        let request_id = self.core.request_id();
        let total = reply.count();
        self.callback.with(|callback| {
            if total == 0 {
                callback.on_coordinates(request_id, Err(MapsError::NotFound));
                return;
            }
            for (index, location) in reply.results().iter().enumerate() {
                if self.core.is_cancel_requested() {
                    info!("request {} canceled during delivery", request_id);
                    return;
                }
                let candidate = Candidate {
                    index,
                    total,
                    item: from_geo(&location.position),
                };
                if !callback.on_coordinates(request_id, Ok(candidate)) {
                    return;
                }
            }
        });
    }
}

impl ReplyListener<GeoCoderReply> for ReplyHandler<GeocodeRequest> {
    fn on_reply(&mut self, reply: GeoCoderReply) {
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
                .with(|callback| callback.on_coordinates(request_id, Err(error)));
        }
        request.destroy();
    }
}
