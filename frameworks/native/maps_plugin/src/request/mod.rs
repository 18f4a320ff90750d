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

//! Request kinds.
//!
//! Each kind wraps one provider call type. A request is created by the
//! [`RequestRegistry`](crate::services::RequestRegistry), prepared with
//! `prepare_query` and zero or more `prepare_*` aspect calls, then started.
//! The provider answers through a [`ReplyHandler`], which translates the
//! reply, calls the caller back and destroys the request.

pub mod geocode;
pub mod handle;
pub mod multi_reverse;
pub mod place;
pub mod place_details;
pub mod reverse_geocode;
pub mod route;

use std::sync::Arc;

pub use geocode::GeocodeRequest;
pub use handle::{RequestCore, RequestHandle, RequestState};
pub use multi_reverse::MultiReverseGeocodeRequest;
pub use place::PlaceSearchRequest;
pub use place_details::PlaceDetailsRequest;
pub use reverse_geocode::ReverseGeocodeRequest;
pub use route::RouteRequest;

/// The kinds of request the plugin serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Geocode,
    ReverseGeocode,
    MultiReverseGeocode,
    PlaceSearch,
    PlaceDetails,
    Route,
}

/// A concrete request kind the registry can create.
pub trait ServiceOperation: RequestHandle + Sized + 'static {
    const KIND: RequestKind;

    /// What the caller is called back through.
    type Callback: Send + 'static;

    fn create(core: RequestCore, callback: Self::Callback) -> Self;
}

/// Reply listener handed to the provider with each submission.
///
/// Holds the request alive until the provider is done with it.
pub(crate) struct ReplyHandler<R>(pub(crate) Arc<R>);
