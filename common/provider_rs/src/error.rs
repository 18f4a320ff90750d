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

//! Error handling for provider SDK operations.
//!
//! The provider reports failures through a category plus a category specific
//! code: an HTTP-like status for communication errors, a [`RouterErrorCode`]
//! for the router and a [`FinderErrorCode`] for the place finder.

use std::fmt;

/// Subsystem of the provider SDK that reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport level failure; the code is an HTTP-like status.
    Communications,
    /// The reply could not be parsed.
    Parser,
    /// Route calculation failure; the code is a [`RouterErrorCode`].
    Router,
    /// Map tile retrieval failure.
    Tile,
    /// Place finder failure; the code is a [`FinderErrorCode`].
    Finder,
}

/// An error delivered to a reply listener's failure callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    category: ErrorCategory,
    code: i32,
    msg: String,
}

impl ProviderError {
    /// Creates a new `ProviderError`.
    ///
    /// # Examples
    ///
    /// ```
    /// use provider_rs::error::{ErrorCategory, ProviderError};
    ///
    /// let error = ProviderError::new(ErrorCategory::Communications, 404, "no such host");
    /// assert_eq!(error.code(), 404);
    /// ```
    pub fn new(category: ErrorCategory, code: i32, msg: impl Into<String>) -> Self {
        Self {
            category,
            code,
            msg: msg.into(),
        }
    }

    /// Shorthand for a communication failure carrying an HTTP status.
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Communications, status as i32, msg)
    }

    pub fn router(code: RouterErrorCode, msg: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Router, code as i32, msg)
    }

    pub fn finder(code: FinderErrorCode, msg: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Finder, code as i32, msg)
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Category specific detail code.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} error {}: {}", self.category, self.code, self.msg)
    }
}

impl std::error::Error for ProviderError {}

/// Detail codes of [`ErrorCategory::Router`] failures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RouterErrorCode {
    /// Waypoints or options were rejected.
    InvalidParameters = 1,
    /// No route connects the waypoints.
    NoRouteFound = 2,
    /// The waypoints lie in disconnected parts of the road graph.
    GraphDisconnected = 3,
    /// The application credentials were refused.
    InvalidCredentials = 4,
    /// The calculation was canceled.
    Canceled = 5,
    #[default]
    Unknown = 99,
}

impl From<i32> for RouterErrorCode {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::InvalidParameters,
            2 => Self::NoRouteFound,
            3 => Self::GraphDisconnected,
            4 => Self::InvalidCredentials,
            5 => Self::Canceled,
            _ => Self::Unknown,
        }
    }
}

/// Detail codes of [`ErrorCategory::Finder`] failures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FinderErrorCode {
    /// The requested place does not exist.
    NotFound = 1,
    /// The query was malformed.
    BadRequest = 2,
    /// The application credentials were refused.
    Unauthorized = 3,
    /// The finder is overloaded.
    Busy = 4,
    #[default]
    Unknown = 99,
}

impl From<i32> for FinderErrorCode {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::NotFound,
            2 => Self::BadRequest,
            3 => Self::Unauthorized,
            4 => Self::Busy,
            _ => Self::Unknown,
        }
    }
}
