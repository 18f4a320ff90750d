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

//! Error kinds of the plugin and their translation.
//!
//! [`PluginError`] is the kind set used inside the plugin. [`MapsError`] is
//! the kind set of the host framework; the two convert into each other one to
//! one. Failures reported by the provider SDK are classified into
//! [`PluginError`] by [`classify`].

use std::fmt;

use provider_rs::error::{ErrorCategory, FinderErrorCode, ProviderError, RouterErrorCode};

/// HTTP statuses meaning the application key was refused.
const KEY_UNAVAILABLE_STATUS: &[i32] = &[401, 402];

/// HTTP statuses meaning the provider could not be reached.
const UNREACHABLE_STATUS: &[i32] = &[404, 407, 502];

/// HTTP statuses meaning the exchange timed out.
const TIMEOUT_STATUS: &[i32] = &[408, 504, 598, 599];

/// HTTP statuses meaning the provider refused to serve.
const UNAVAILABLE_STATUS: &[i32] = &[403, 500, 501, 503];

/// Internal error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PluginError {
    /// Protocol misuse, such as preparing a query twice.
    PermissionDenied = 1,
    OutOfMemory = 2,
    /// Malformed caller input, caught before submission.
    InvalidParameter = 3,
    /// The provider cannot serve this variant of the request.
    NotSupported = 4,
    ConnectionTimeout = 5,
    NetworkUnreachable = 6,
    /// The provider rejected the call or returned unusable data.
    InvalidOperation = 7,
    /// Missing or refused credentials.
    KeyNotAvailable = 8,
    ResourceBusy = 9,
    Canceled = 10,
    /// A legitimate zero-result outcome, or an unknown request id.
    NotFound = 11,
    ServiceNotAvailable = 12,
    Unknown = 13,
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self {
            PluginError::PermissionDenied => "permission denied",
            PluginError::OutOfMemory => "out of memory",
            PluginError::InvalidParameter => "invalid parameter",
            PluginError::NotSupported => "not supported",
            PluginError::ConnectionTimeout => "connection timeout",
            PluginError::NetworkUnreachable => "network unreachable",
            PluginError::InvalidOperation => "invalid operation",
            PluginError::KeyNotAvailable => "key not available",
            PluginError::ResourceBusy => "resource busy",
            PluginError::Canceled => "canceled",
            PluginError::NotFound => "not found",
            PluginError::ServiceNotAvailable => "service not available",
            PluginError::Unknown => "unknown",
        };
        f.write_str(desc)
    }
}

impl std::error::Error for PluginError {}

/// Error kinds of the host framework, with the framework's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MapsError {
    PermissionDenied = -13,
    OutOfMemory = -12,
    InvalidParameter = -22,
    NotSupported = -95,
    ConnectionTimeout = -110,
    NetworkUnreachable = -101,
    InvalidOperation = -38,
    KeyNotAvailable = -126,
    ResourceBusy = -16,
    Canceled = -125,
    NotFound = -2,
    ServiceNotAvailable = -134,
    Unknown = -1,
}

impl MapsError {
    /// Returns the framework's numeric code.
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for MapsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", PluginError::from(*self), self.code())
    }
}

impl std::error::Error for MapsError {}

impl From<PluginError> for MapsError {
    fn from(error: PluginError) -> Self {
        match error {
            PluginError::PermissionDenied => MapsError::PermissionDenied,
            PluginError::OutOfMemory => MapsError::OutOfMemory,
            PluginError::InvalidParameter => MapsError::InvalidParameter,
            PluginError::NotSupported => MapsError::NotSupported,
            PluginError::ConnectionTimeout => MapsError::ConnectionTimeout,
            PluginError::NetworkUnreachable => MapsError::NetworkUnreachable,
            PluginError::InvalidOperation => MapsError::InvalidOperation,
            PluginError::KeyNotAvailable => MapsError::KeyNotAvailable,
            PluginError::ResourceBusy => MapsError::ResourceBusy,
            PluginError::Canceled => MapsError::Canceled,
            PluginError::NotFound => MapsError::NotFound,
            PluginError::ServiceNotAvailable => MapsError::ServiceNotAvailable,
            PluginError::Unknown => MapsError::Unknown,
        }
    }
}

impl From<MapsError> for PluginError {
    fn from(error: MapsError) -> Self {
        match error {
            MapsError::PermissionDenied => PluginError::PermissionDenied,
            MapsError::OutOfMemory => PluginError::OutOfMemory,
            MapsError::InvalidParameter => PluginError::InvalidParameter,
            MapsError::NotSupported => PluginError::NotSupported,
            MapsError::ConnectionTimeout => PluginError::ConnectionTimeout,
            MapsError::NetworkUnreachable => PluginError::NetworkUnreachable,
            MapsError::InvalidOperation => PluginError::InvalidOperation,
            MapsError::KeyNotAvailable => PluginError::KeyNotAvailable,
            MapsError::ResourceBusy => PluginError::ResourceBusy,
            MapsError::Canceled => PluginError::Canceled,
            MapsError::NotFound => PluginError::NotFound,
            MapsError::ServiceNotAvailable => PluginError::ServiceNotAvailable,
            MapsError::Unknown => PluginError::Unknown,
        }
    }
}

/// Classifies an HTTP-like status reported by the provider.
///
/// # Examples
///
/// ```
/// use maps_plugin::error::{from_http_status, PluginError};
///
/// assert_eq!(from_http_status(401), PluginError::KeyNotAvailable);
/// assert_eq!(from_http_status(418), PluginError::InvalidOperation);
/// assert_eq!(from_http_status(200), PluginError::Unknown);
/// ```
pub fn from_http_status(status: i32) -> PluginError {
    match status {
        status if KEY_UNAVAILABLE_STATUS.contains(&status) => PluginError::KeyNotAvailable,
        status if UNREACHABLE_STATUS.contains(&status) => PluginError::NetworkUnreachable,
        status if TIMEOUT_STATUS.contains(&status) => PluginError::ConnectionTimeout,
        status if UNAVAILABLE_STATUS.contains(&status) => PluginError::ServiceNotAvailable,
        400..=499 => PluginError::InvalidOperation,
        500..=599 => PluginError::ServiceNotAvailable,
        _ => PluginError::Unknown,
    }
}

/// Classifies a failure delivered by the provider SDK.
pub fn classify(error: &ProviderError) -> PluginError {
    match error.category() {
        ErrorCategory::Communications => from_http_status(error.code()),
        ErrorCategory::Parser => PluginError::InvalidOperation,
        ErrorCategory::Router => match RouterErrorCode::from(error.code()) {
            RouterErrorCode::InvalidParameters => PluginError::InvalidParameter,
            RouterErrorCode::NoRouteFound => PluginError::NotFound,
            RouterErrorCode::InvalidCredentials => PluginError::KeyNotAvailable,
            RouterErrorCode::GraphDisconnected => PluginError::ServiceNotAvailable,
            RouterErrorCode::Canceled => PluginError::Canceled,
            RouterErrorCode::Unknown => PluginError::Unknown,
        },
        ErrorCategory::Tile => PluginError::ServiceNotAvailable,
        ErrorCategory::Finder => match FinderErrorCode::from(error.code()) {
            FinderErrorCode::NotFound => PluginError::NotFound,
            FinderErrorCode::BadRequest => PluginError::InvalidParameter,
            FinderErrorCode::Unauthorized => PluginError::KeyNotAvailable,
            FinderErrorCode::Busy => PluginError::ResourceBusy,
            FinderErrorCode::Unknown => PluginError::Unknown,
        },
    }
}

impl<'a> From<&'a ProviderError> for PluginError {
    fn from(error: &'a ProviderError) -> Self {
        classify(error)
    }
}
