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

//! Maps provider plugin.
//!
//! Adapts a provider SDK to the host framework's maps plugin interface:
//! geocoding, reverse geocoding, place search, place details and routing
//! requests are created in a [`RequestRegistry`], submitted to the provider
//! and answered through the caller's callback. [`MapsPlugin`] holds the entry
//! points the host calls; [`view::ViewObjectStore`] tracks the objects drawn
//! on a map view.

#![allow(unknown_lints, missing_docs, clippy::new_without_default)]

pub mod callback;
pub mod config;
pub mod convert;
pub mod error;
pub mod info;
mod observe;
pub mod plugin;
pub mod request;
pub mod services;
pub mod view;

pub use config::{PluginConfig, PluginConfigBuilder, TieBreak};
pub use error::{MapsError, PluginError};
pub use plugin::MapsPlugin;
pub use services::RequestRegistry;
