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

//! Place search.
//!
//! A discovery reply lists rich place items and stub search items. When
//! places are delivered one by one and the plugin is configured to, the
//! details of every rich item are fetched before delivery. Such an item
//! stays *pending* until its details arrive or fail; any other item is
//! complete at once. Results keep reply order, pending ones included, and
//! are flushed to the caller exactly once, the moment every item is
//! complete.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use maps_utils::{debug, error, info, warn};
use provider_rs::query::{DiscoveryKind, DiscoveryQuery, PlaceQuery};
use provider_rs::reply::{DiscoveryReply, LinkObject, ProviderPlace};
use provider_rs::{is_accepted, ProviderError, ProviderRequestId, ReplyListener};

use super::handle::{CallbackSlot, QuerySlot};
use super::place_details::EnrichmentListener;
use super::{ReplyHandler, RequestCore, RequestHandle, RequestKind, RequestState, ServiceOperation};
use crate::callback::{Candidate, PlaceDelivery};
use crate::convert::{
    merge_place_details, place_from_item, place_from_search_item, sort_places, to_bounding_box,
    to_geo, validate_area, validate_coordinates,
};
use crate::error::{classify, MapsError, PluginError};
use crate::info::{Area, Coordinates, DistanceUnit, Place, PlaceFilter, Preference, SortBy};

#[derive(Clone, Default)]
struct PlaceOptions {
    language: Option<String>,
    distance_unit: DistanceUnit,
    sort_by: Option<SortBy>,
}

#[derive(Default)]
struct Aggregation {
    /// Results in reply order; pending items hold their placeholder.
    results: Vec<Place>,
    settled: Vec<bool>,
    /// Outstanding details calls by item index.
    pending_calls: HashMap<usize, ProviderRequestId>,
    total_expected: usize,
    completed: usize,
    flushed: bool,
}

/// Searches places and aggregates their details.
pub struct PlaceSearchRequest {
    core: RequestCore,
    delivery: CallbackSlot<PlaceDelivery>,
    query: QuerySlot<DiscoveryQuery>,
    options: Mutex<PlaceOptions>,
    aggregation: Mutex<Aggregation>,
}

impl ServiceOperation for PlaceSearchRequest {
    const KIND: RequestKind = RequestKind::PlaceSearch;
    type Callback = PlaceDelivery;

    fn create(core: RequestCore, callback: Self::Callback) -> Self {
        Self {
            core,
            delivery: CallbackSlot::new(callback),
            query: QuerySlot::new(),
            options: Mutex::new(PlaceOptions::default()),
            aggregation: Mutex::new(Aggregation::default()),
        }
    }
}

impl RequestHandle for PlaceSearchRequest {
    fn core(&self) -> &RequestCore {
        &self.core
    }

    fn release_callback(&self) {
        self.delivery.release();
    }

    fn provider_request_ids(&self) -> Vec<ProviderRequestId> {
        let mut ids: Vec<ProviderRequestId> = self.core.provider_request_id().into_iter().collect();
        ids.extend(self.aggregation.lock().unwrap().pending_calls.values().copied());
        ids
    }
}

impl PlaceSearchRequest {
    pub fn prepare_query(&self, kind: DiscoveryKind) -> Result<(), PluginError> {
        self.core.prepare()?;
        let preference = self.core.config().preference().clone();
        let mut query = DiscoveryQuery::new(kind);
        if let Some(max_results) = preference.max_results {
            query.max_results(max_results);
        }
        self.query.fill(query);
        self.apply_options(&preference);
        Ok(())
    }

    /// Searches around `center`, within `radius` meters.
    pub fn prepare_position(&self, center: &Coordinates, radius: f64) -> Result<(), PluginError> {
        validate_coordinates(center)?;
        if !(radius > 0.0) {
            return Err(PluginError::InvalidParameter);
        }
        self.query.with(|query| {
            query.position(to_geo(center)).radius(radius);
            Ok(())
        })
    }

    pub fn prepare_area(&self, area: &Area) -> Result<(), PluginError> {
        validate_area(area)?;
        self.query.with(|query| {
            match area {
                Area::Rectangle { .. } => {
                    query.bounding_box(to_bounding_box(area)?);
                }
                Area::Circle { center, radius } => {
                    query.position(to_geo(center)).radius(*radius);
                }
            }
            Ok(())
        })
    }

    /// Narrows the search. Keyword and place name become the search text,
    /// the category a category filter.
    pub fn prepare_filter(&self, filter: &PlaceFilter) -> Result<(), PluginError> {
        let text = [&filter.keyword, &filter.place_name, &filter.address]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|value| !value.is_empty()));
        self.query.with(|query| {
            if let Some(text) = text {
                query.search_text(text);
            }
            if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
                query.add_category(category);
            }
            Ok(())
        })
    }

    /// Searches for a free-form address.
    pub fn prepare_address(&self, address: &str) -> Result<(), PluginError> {
        if address.is_empty() {
            return Err(PluginError::InvalidParameter);
        }
        self.query.with(|query| {
            query.search_text(address);
            Ok(())
        })
    }

    pub fn prepare_preference(&self, preference: &Preference) -> Result<(), PluginError> {
        let preference = preference.merged_over(self.core.config().preference());
        self.query.with(|query| {
            if let Some(max_results) = preference.max_results {
                query.max_results(max_results);
            }
            Ok(())
        })?;
        self.apply_options(&preference);
        Ok(())
    }

    pub fn start_place_search(self: &Arc<Self>) -> Result<(), PluginError> {
        let mut query = self.query.take()?;
        if let Some(language) = self.options().language {
            query.language(&language);
        }
        if !query.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.core.begin_execute()?;
        let id = self
            .core
            .sdk()
            .discover(query, Box::new(ReplyHandler(self.clone())));
        self.core.finish_execute(id)
    }

    fn apply_options(&self, preference: &Preference) {
        let mut options = self.options.lock().unwrap();
        options.language = preference.language.clone();
        options.distance_unit = preference.distance_unit.unwrap_or_default();
        options.sort_by = preference.sort_by;
    }

    fn options(&self) -> PlaceOptions {
        self.options.lock().unwrap().clone()
    }

    fn delivers_per_item(&self) -> bool {
        self.delivery
            .with(|delivery| matches!(delivery, PlaceDelivery::PerItem(_)))
            .unwrap_or(false)
    }

    fn on_discovery(self: &Arc<Self>, reply: &DiscoveryReply) {
        let total = reply.count();
        if total == 0 {
            self.flush_error(MapsError::NotFound);
            return;
        }
        let options = self.options();
        let enrich = self.core.config().auto_fetch_place_details() && self.delivers_per_item();
        let mut fetches = Vec::new();
        let results: Vec<Place> = reply
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                LinkObject::Place(item) => {
                    if enrich && !item.href.is_empty() {
                        fetches.push((index, item.href.clone()));
                    }
                    place_from_item(item, options.distance_unit)
                }
                LinkObject::Search(item) => place_from_search_item(item),
            })
            .collect();
        {
            let mut aggregation = self.aggregation.lock().unwrap();
            aggregation.results = results;
            aggregation.settled = vec![true; total];
            for (index, _) in fetches.iter() {
                aggregation.settled[*index] = false;
            }
            aggregation.total_expected = total;
            aggregation.completed = total - fetches.len();
        }
        debug!(
            "request {} found {} items, {} pending",
            self.core.request_id(),
            total,
            fetches.len()
        );

        for (index, href) in fetches {
            if self.core.is_cancel_requested() {
                self.complete_item(index, None);
                continue;
            }
            let mut query = PlaceQuery::new(&href);
            if let Some(language) = options.language.as_deref() {
                query.language(language);
            }
            let listener = EnrichmentListener::new(self.clone(), index);
            let id = self.core.sdk().place_details(query, Box::new(listener));
            if is_accepted(id) {
                let mut aggregation = self.aggregation.lock().unwrap();
                if !aggregation.settled[index] {
                    aggregation.pending_calls.insert(index, id);
                }
            } else {
                warn!(
                    "request {} details of place {} rejected",
                    self.core.request_id(),
                    index
                );
                self.complete_item(index, None);
            }
        }
        self.try_flush();
    }

    /// Settles a pending item, merging its details if they arrived.
    pub(crate) fn complete_item(&self, index: usize, details: Option<&ProviderPlace>) {
        {
            let mut aggregation = self.aggregation.lock().unwrap();
            match aggregation.settled.get(index) {
                Some(&false) => {}
                _ => return,
            }
            aggregation.settled[index] = true;
            aggregation.pending_calls.remove(&index);
            if let Some(details) = details {
                merge_place_details(&mut aggregation.results[index], details);
            }
            aggregation.completed += 1;
        }
        self.try_flush();
    }

    fn try_flush(&self) {
        let places = {
            let mut aggregation = self.aggregation.lock().unwrap();
            if aggregation.flushed
                || aggregation.total_expected == 0
                || aggregation.completed < aggregation.total_expected
            {
                return;
            }
            aggregation.flushed = true;
            std::mem::take(&mut aggregation.results)
        };
        self.deliver(places);
        self.destroy();
    }

    fn flush_error(&self, error: MapsError) {
        {
            let mut aggregation = self.aggregation.lock().unwrap();
            if aggregation.flushed {
                return;
            }
            aggregation.flushed = true;
        }
        if !self.core.is_cancel_requested() {
            let request_id = self.core.request_id();
            self.delivery.with(|delivery| match delivery {
                PlaceDelivery::PerItem(callback) => {
                    callback.on_place(request_id, Err(error));
                }
                PlaceDelivery::List(callback) => callback.on_places(request_id, Err(error)),
            });
        }
        self.destroy();
    }

    fn deliver(&self, mut places: Vec<Place>) {
        let request_id = self.core.request_id();
        if self.core.is_cancel_requested() {
            info!("request {} canceled before flush", request_id);
            return;
        }
        if let Some(sort_by) = self.options().sort_by {
            sort_places(&mut places, sort_by);
        }
        let total = places.len();
        self.delivery.with(|delivery| match delivery {
            PlaceDelivery::PerItem(callback) => {
                for (index, item) in places.into_iter().enumerate() {
                    if self.core.is_cancel_requested() {
                        info!("request {} canceled during delivery", request_id);
                        break;
                    }
                    let candidate = Candidate { index, total, item };
                    if !callback.on_place(request_id, Ok(candidate)) {
                        break;
                    }
                }
            }
            PlaceDelivery::List(callback) => callback.on_places(request_id, Ok(places)),
        });
    }
}

impl ReplyListener<DiscoveryReply> for ReplyHandler<PlaceSearchRequest> {
    fn on_reply(&mut self, reply: DiscoveryReply) {
        let request = &self.0;
        if request.core.enter_reply(RequestState::Replied) {
            request.on_discovery(&reply);
        } else {
            request.destroy();
        }
    }

    fn on_failure(&mut self, error: ProviderError) {
        let request = &self.0;
        if request.core.enter_reply(RequestState::Failed) {
            error!("request {} failed: {}", request.core.request_id(), error);
            request.flush_error(MapsError::from(classify(&error)));
        } else {
            request.destroy();
        }
    }
}
