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

//! Reverse geocoding.

use std::sync::Arc;

use maps_utils::{error, info};
use provider_rs::query::ReverseGeoCoderQuery;
use provider_rs::reply::GeoCoderReply;
use provider_rs::{ProviderError, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::ReverseGeocodeCallback;
use crate::config::TieBreak;
use crate::convert::{from_provider_address, to_geo, validate_coordinates};
use crate::error::{classify, MapsError, PluginError};
use crate::info::{Coordinates, Preference};

/// Picks the index of the nearest candidate.
///
/// Candidates without a distance are never nearer than one with a distance.
/// Among equally near candidates `tie_break` decides. Returns `None` for an
/// empty input.
pub fn select_nearest<I>(distances: I, tie_break: TieBreak) -> Option<usize>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut nearest: Option<(usize, f64)> = None;
    for (index, distance) in distances.into_iter().enumerate() {
        let distance = distance.unwrap_or(f64::INFINITY);
        let closer = match nearest {
            None => true,
            Some((_, best)) => match tie_break {
                TieBreak::FirstSeen => distance < best,
                TieBreak::LastSeen => distance <= best,
            },
        };
        if closer {
            nearest = Some((index, distance));
        }
    }
    nearest.map(|(index, _)| index)
}

/// Resolves a position into the nearest address.
pub struct ReverseGeocodeRequest {
    core: RequestCore,
    callback: CallbackSlot<Box<dyn ReverseGeocodeCallback>>,
    query: QuerySlot<ReverseGeoCoderQuery>,
}

impl ServiceOperation for ReverseGeocodeRequest {
    const KIND: RequestKind = RequestKind::ReverseGeocode;
    type Callback = Box<dyn ReverseGeocodeCallback>;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            callback: CallbackSlot::new(callback),
            query: QuerySlot::new(),
        }
    }
}

impl RequestHandle for ReverseGeocodeRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.callback.release();
    }
}

impl ReverseGeocodeRequest {
    pub fn prepare_query(&self) -> Result<(), PluginError> {
        self.core.prepare()?;
        let mut query = ReverseGeoCoderQuery::new();
        if let Some(language) = self.core.config().preference().language.as_deref() {
            query.language(language);
        }
        self.query.fill(query);
        Ok(())
    }

    pub fn prepare_position(&self, position: &Coordinates) -> Result<(), PluginError> {
        validate_coordinates(position)?;
        self.query.with(|query| {
            query.position(to_geo(position));
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

    pub fn start_reverse_geocode(self: &Arc<Self>) -> Result<(), PluginError> {
        let query = self.query.take()?;
        if !query.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .reverse_geocode(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }

    fn deliver(&self, reply: &GeoCoderReply) {
        let request_id = self.core.request_id();
        let nearest = select_nearest(
            reply.results().iter().map(|location| location.distance),
            self.core.config().nearest_tie_break(),
        );
        let result = nearest
            .and_then(|index| reply.get(index))
            .map(|location| from_provider_address(&location.address))
            .ok_or(MapsError::NotFound);
        self.callback.with(|callback| {
            if self.core.is_cancel_requested() {
                info!("request {} canceled before delivery", request_id);
                return;
            }
            callback.on_address(request_id, result);
        });
    }
}

impl ReplyListener<GeoCoderReply> for ReplyHandler<ReverseGeocodeRequest> {
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
                .with(|callback| callback.on_address(request_id, Err(error)));
        }
        request.destroy();
    }
}
