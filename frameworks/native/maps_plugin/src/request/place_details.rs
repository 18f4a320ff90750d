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

//! Place details.
//!
//! Details are fetched in one of two modes. Standalone, through a
//! [`PlaceDetailsRequest`] the caller created, with the caller called back.
//! Internal, through an [`EnrichmentListener`] a place search issues for one
//! of its found places; the outcome only completes that place in the owning
//! search and never reaches a caller on its own.

use std::sync::Arc;

use maps_utils::{debug, error, info};
use provider_rs::query::PlaceQuery;
use provider_rs::reply::PlaceDetailsReply;
use provider_rs::{ProviderError, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::place::PlaceSearchRequest;
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::PlaceDetailsCallback;
use crate::convert::place_from_details;
use crate::error::{classify, MapsError, PluginError};
use crate::info::Preference;

// The provider query takes the href at construction; it is built on start.
struct DetailsParams {
    href: Option<String>,
    language: Option<String>,
}

/// Fetches the full record of one place by its URI.
pub struct PlaceDetailsRequest {
    core: RequestCore,
    callback: CallbackSlot<Box<dyn PlaceDetailsCallback>>,
    query: QuerySlot<DetailsParams>,
}

impl ServiceOperation for PlaceDetailsRequest {
    const KIND: RequestKind = RequestKind::PlaceDetails;
    type Callback = Box<dyn PlaceDetailsCallback>;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            callback: CallbackSlot::new(callback),
            query: QuerySlot::new(),
        }
    }
}

impl RequestHandle for PlaceDetailsRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.callback.release();
    }
}

impl PlaceDetailsRequest {
    pub fn prepare_query(&self) -> Result<(), PluginError> {
        self.core.prepare()?;
        self.query.fill(DetailsParams {
            href: None,
            language: self.core.config().preference().language.clone(),
        });
        Ok(())
    }

    /// Sets the URI of the place.
    pub fn prepare_href(&self, href: &str) -> Result<(), PluginError> {
        if href.is_empty() {
            return Err(PluginError::InvalidParameter);
        }
        self.query.with(|params| {
            params.href = Some(href.to_string());
            Ok(())
        })
    }

    pub fn prepare_preference(&self, preference: &Preference) -> Result<(), PluginError> {
        let preference = preference.merged_over(self.core.config().preference());
        self.query.with(|params| {
            params.language = preference.language;
            Ok(())
        })
    }

    pub fn start_place_details(self: &Arc<Self>) -> Result<(), PluginError> {
        let params = self.query.take()?;
        let href = params.href.ok_or(PluginError::InvalidParameter)?;
        let mut query = PlaceQuery::new(&href);
        if let Some(language) = params.language.as_deref() {
            query.language(language);
        }
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .place_details(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }
}

impl ReplyListener<PlaceDetailsReply> for ReplyHandler<PlaceDetailsRequest> {
    fn on_reply(&mut self, reply: PlaceDetailsReply) {
        let request = &self.0;
        if request.core.enter_reply(RequestState::Replied) {
            let request_id = request.core.request_id();
            let place = place_from_details(reply.place());
            request.callback.with(|callback| {
                if request.core.is_cancel_requested() {
                    info!("request {} canceled before delivery", request_id);
                    return;
                }
                callback.on_details(request_id, Ok(place));
            });
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
                .with(|callback| callback.on_details(request_id, Err(error)));
        }
        request.destroy();
    }
}

/// Completes one place of a place search with its details.
pub(crate) struct EnrichmentListener {
    owner: Arc<PlaceSearchRequest>,
    index: usize,
}

impl EnrichmentListener {
    pub(crate) fn new(owner: Arc<PlaceSearchRequest>, index: usize) -> Self {
        Self { owner, index }
    }
}

impl ReplyListener<PlaceDetailsReply> for EnrichmentListener {
    fn on_reply(&mut self, reply: PlaceDetailsReply) {
        self.owner.complete_item(self.index, Some(reply.place()));
    }

    fn on_failure(&mut self, error: ProviderError) {
        debug!(
            "request {} details of place {} failed: {}",
            self.owner.core().request_id(),
            self.index,
            error
        );
        self.owner.complete_item(self.index, None);
    }
}
