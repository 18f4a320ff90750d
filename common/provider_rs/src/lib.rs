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

//! Rust interface to the mapping provider SDK.
//!
//! This crate describes the provider side of the plugin: the queries the
//! provider understands, the replies it produces, the errors it reports and
//! the asynchronous execution contract of the SDK itself.
//!
//! # Modules
//!
//! * [`geo`] - Coordinates, bounding boxes and addresses
//! * [`query`] - Builders for geocoding, discovery, place and route queries
//! * [`reply`] - Reply objects delivered to reply listeners
//! * [`task`] - The SDK execution contract and reply listener trait
//! * [`error`] - Provider error categories and codes
//! * [`test`] - A scriptable SDK used by unit tests

#![warn(
    missing_docs,
    clippy::redundant_static_lifetimes,
    clippy::enum_variant_names,
    clippy::clone_on_copy,
    clippy::unused_async
)]
#![deny(unused_must_use)]
#![allow(missing_docs, clippy::new_without_default)]

/// Geographic primitives shared by queries and replies.
pub mod geo;

/// Query builders for every provider call type.
pub mod query;

/// Replies handed to reply listeners.
pub mod reply;

/// Asynchronous execution contract of the provider SDK.
pub mod task;

/// Error types reported by the provider SDK.
pub mod error;


pub use error::{ErrorCategory, ProviderError};
pub use task::{is_accepted, Credentials, ProviderRequestId, ProviderSdk, ReplyListener};
