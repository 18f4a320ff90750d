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

//! Request identifier utilities.
//!
//! Every request minted by the plugin gets a positive identifier that is
//! unique for the lifetime of the process. Identifiers start at 1 and are
//! never handed out twice, even after the request they named is gone.

use std::fmt::Display;
use std::sync::atomic::{AtomicI32, Ordering};

/// A unique identifier for a plugin request.
///
/// # Examples
///
/// ```rust
/// use maps_utils::request_id::RequestId;
///
/// let id = RequestId::new(7);
/// assert_eq!(id.get(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct RequestId(i32);

impl RequestId {
    /// Wraps a raw identifier value received from the framework.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RequestId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Monotonic source of [`RequestId`]s.
///
/// # Examples
///
/// ```rust
/// use maps_utils::request_id::RequestIdGenerator;
///
/// let generator = RequestIdGenerator::new();
/// let first = generator.next().unwrap();
/// let second = generator.next().unwrap();
/// assert_eq!(first.get(), 1);
/// assert!(second > first);
/// ```
pub struct RequestIdGenerator {
    next: AtomicI32,
}

impl RequestIdGenerator {
    /// Creates a generator whose first identifier is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicI32::new(1),
        }
    }

    /// Hands out the next identifier.
    ///
    /// Returns `None` once the positive `i32` range is exhausted rather than
    /// wrapping around and reusing an identifier.
    pub fn next(&self) -> Option<RequestId> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .ok()
            .map(RequestId)
    }
}
