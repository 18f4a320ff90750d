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

//! Batch reverse geocoding.

use std::sync::Arc;

use maps_utils::{error, info};
use provider_rs::query::MultiReverseGeoCoderQuery;
use provider_rs::reply::MultiReverseGeoCoderReply;
use provider_rs::{ProviderError, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::MultiReverseGeocodeCallback;
use crate::convert::{from_provider_address, to_geo, validate_coordinates};
use crate::error::{classify, MapsError, PluginError};
use crate::info::{Address, Coordinates, Preference};

/// Resolves a batch of positions into addresses in one provider call.
pub struct MultiReverseGeocodeRequest {
    core: RequestCore,
    callback: CallbackSlot<Box<dyn MultiReverseGeocodeCallback>>,
    query: QuerySlot<MultiReverseGeoCoderQuery>,
}

impl ServiceOperation for MultiReverseGeocodeRequest {
    const KIND: RequestKind = RequestKind::MultiReverseGeocode;
    type Callback = Box<dyn MultiReverseGeocodeCallback>;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            callback: CallbackSlot::new(callback),
            query: QuerySlot::new(),
        }
    }
}

impl RequestHandle for MultiReverseGeocodeRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.callback.release();
    }
}

impl MultiReverseGeocodeRequest {
    pub fn prepare_query(&self) -> Result<(), PluginError> {
        self.core.prepare()?;
        let mut query = MultiReverseGeoCoderQuery::new();
        if let Some(language) = self.core.config().preference().language.as_deref() {
            query.language(language);
        }
        self.query.fill(query);
        Ok(())
    }

    /// Adds the positions to resolve. All of them must be valid.
    pub fn prepare_positions(&self, positions: &[Coordinates]) -> Result<(), PluginError> {
        if positions.is_empty() {
            return Err(PluginError::InvalidParameter);
        }
        positions.iter().try_for_each(validate_coordinates)?;
        self.query.with(|query| {
            for position in positions {
                query.add_position(to_geo(position));
            }
            Ok(())
        })
    }

    pub fn prepare_preference(&self, preference: &Preference) -> Result<(), PluginError> {
        let preference = preference.merged_over(self.core.config().preference());
        self.query.with(|query| {
            if let Some(language) = preference.language.as_deref() {
                query.language(language);
            }
            Ok(())
        })
    }

    pub fn start_multi_reverse_geocode(self: &Arc<Self>) -> Result<(), PluginError> {
        let query = self.query.take()?;
        if !query.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .multi_reverse_geocode(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }

    fn deliver(&self, reply: &MultiReverseGeoCoderReply) {
        let request_id = self.core.request_id();
        let result = if reply.count() == 0 {
            Err(MapsError::NotFound)
        } else {
            Ok((0..reply.count())
                .map(|index| {
                    reply
                        .get(index)
                        .map(from_provider_address)
                        .unwrap_or_default()
                })
                .collect::<Vec<Address>>())
        };
        self.callback.with(|callback| {
            if self.core.is_cancel_requested() {
                info!("request {} canceled before delivery", request_id);
                return;
            }
            callback.on_addresses(request_id, result);
        });
    }
}

impl ReplyListener<MultiReverseGeoCoderReply> for ReplyHandler<MultiReverseGeocodeRequest> {
    fn on_reply(&mut self, reply: MultiReverseGeoCoderReply) {
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
                .with(|callback| callback.on_addresses(request_id, Err(error)));
        }
        request.destroy();
    }
}
