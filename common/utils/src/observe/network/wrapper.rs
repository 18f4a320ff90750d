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

//! Fan-out of network events to registered observers.

use std::sync::{Arc, Mutex};

use super::Observer;

/// Forwards network events to a shared collection of observers.
pub struct NetObserverWrapper {
    /// Shared collection of observers to receive network event notifications.
    inner: Arc<Mutex<Vec<Box<dyn Observer>>>>,
}

impl NetObserverWrapper {
    /// Creates a new wrapper over the given collection of observers.
    pub fn new(inner: Arc<Mutex<Vec<Box<dyn Observer>>>>) -> Self {
        Self { inner }
    }

    /// Notifies all observers that a network became available.
    pub fn net_available(&self, net_id: i32) {
        let inner = self.inner.lock().unwrap();
        for observer in inner.iter() {
            observer.net_available(net_id);
        }
    }

    /// Notifies all observers that a network was lost.
    pub fn net_lost(&self, net_id: i32) {
        let inner = self.inner.lock().unwrap();
        for observer in inner.iter() {
            observer.net_lost(net_id);
        }
    }

    /// Notifies all observers that the system proxy changed.
    ///
    /// `None` means the proxy was cleared.
    pub fn proxy_changed(&self, proxy: Option<&str>) {
        let inner = self.inner.lock().unwrap();
        for observer in inner.iter() {
            observer.proxy_changed(proxy);
        }
    }
}
