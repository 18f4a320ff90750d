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

//! Asynchronous execution contract of the provider SDK.
//!
//! Every query is submitted together with a [`ReplyListener`]. The SDK
//! answers the submission with a [`ProviderRequestId`] and later invokes
//! exactly one of the listener's methods, possibly on another thread and
//! possibly before the submitting call has returned.

use crate::error::ProviderError;
use crate::query::{
    DiscoveryQuery, GeoCoderQuery, MultiReverseGeoCoderQuery, PlaceQuery, ReverseGeoCoderQuery,
    RouteQuery,
};
use crate::reply::{
    DiscoveryReply, GeoCoderReply, MultiReverseGeoCoderReply, PlaceDetailsReply, RouteReply,
};

/// Identifier the SDK assigns to a submitted query.
///
/// A value `<= 0` means the SDK rejected the submission. A rejected
/// submission never invokes its listener.
pub type ProviderRequestId = i64;

/// Returns `true` if `id` identifies an accepted submission.
pub fn is_accepted(id: ProviderRequestId) -> bool {
    id > 0
}

/// Receiver of the outcome of one submitted query.
pub trait ReplyListener<R>: Send {
    /// Called once with the reply of a successful query.
    fn on_reply(&mut self, reply: R);

    /// Called once if the query failed.
    fn on_failure(&mut self, error: ProviderError);
}

/// Application credentials issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub app_id: String,
    pub app_code: String,
}

impl Credentials {
    pub fn new(app_id: &str, app_code: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            app_code: app_code.to_string(),
        }
    }

    /// Returns `true` if both parts are present.
    pub fn is_complete(&self) -> bool {
        !self.app_id.is_empty() && !self.app_code.is_empty()
    }
}

/// The provider SDK.
///
/// Submission methods never block on the network; the outcome arrives through
/// the listener.
pub trait ProviderSdk: Send + Sync {
    /// Brings the SDK up with the given credentials.
    fn initialize(&self, credentials: &Credentials) -> Result<(), ProviderError>;

    /// Sets or clears the HTTP proxy used for subsequent submissions.
    fn set_proxy(&self, proxy: Option<&str>);

    fn geocode(
        &self,
        query: GeoCoderQuery,
        listener: Box<dyn ReplyListener<GeoCoderReply>>,
    ) -> ProviderRequestId;

    fn reverse_geocode(
        &self,
        query: ReverseGeoCoderQuery,
        listener: Box<dyn ReplyListener<GeoCoderReply>>,
    ) -> ProviderRequestId;

    fn multi_reverse_geocode(
        &self,
        query: MultiReverseGeoCoderQuery,
        listener: Box<dyn ReplyListener<MultiReverseGeoCoderReply>>,
    ) -> ProviderRequestId;

    fn discover(
        &self,
        query: DiscoveryQuery,
        listener: Box<dyn ReplyListener<DiscoveryReply>>,
    ) -> ProviderRequestId;

    fn place_details(
        &self,
        query: PlaceQuery,
        listener: Box<dyn ReplyListener<PlaceDetailsReply>>,
    ) -> ProviderRequestId;

    fn route(
        &self,
        query: RouteQuery,
        listener: Box<dyn ReplyListener<RouteReply>>,
    ) -> ProviderRequestId;

    /// Cancels an accepted submission. The listener of a canceled submission
    /// may still be invoked if the reply was already in flight.
    fn cancel(&self, id: ProviderRequestId);

    /// Tears the SDK down. Pending submissions are dropped.
    fn shutdown(&self);
}
