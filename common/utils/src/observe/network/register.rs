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

use std::sync::{Arc, Mutex};

use super::wrapper::NetObserverWrapper;
use super::Observer;

/// Registration point for network observers.
///
/// Events are only forwarded between [`register`](Self::register) and
/// [`unregister`](Self::unregister); outside that window they are dropped.
pub struct NetRegistrar {
    observer: Arc<Mutex<Vec<Box<dyn Observer>>>>,
    registration: Mutex<Option<Arc<NetObserverWrapper>>>,
}

impl NetRegistrar {
    pub fn new() -> Self {
        Self {
            observer: Arc::new(Mutex::new(Vec::new())),
            registration: Mutex::new(None),
        }
    }

    pub fn add_observer(&self, observer: impl Observer + 'static) {
        self.observer.lock().unwrap().push(Box::new(observer));
    }

    /// Drops every observer added so far.
    pub fn clear_observers(&self) {
        self.observer.lock().unwrap().clear();
    }

    pub fn register(&self) -> Result<(), NetRegisterError> {
        let mut registration = self.registration.lock().unwrap();
        if registration.is_some() {
            return Err(NetRegisterError::AlreadyRegistered);
        }
        *registration = Some(Arc::new(NetObserverWrapper::new(self.observer.clone())));
        Ok(())
    }

    pub fn unregister(&self) -> Result<(), NetUnregisterError> {
        match self.registration.lock().unwrap().take() {
            Some(_) => Ok(()),
            None => Err(NetUnregisterError::NotRegistered),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration.lock().unwrap().is_some()
    }

    pub fn notify_net_available(&self, net_id: i32) {
        if let Some(wrapper) = self.wrapper() {
            wrapper.net_available(net_id);
        }
    }

    pub fn notify_net_lost(&self, net_id: i32) {
        if let Some(wrapper) = self.wrapper() {
            wrapper.net_lost(net_id);
        }
    }

    pub fn notify_proxy_changed(&self, proxy: Option<&str>) {
        if let Some(wrapper) = self.wrapper() {
            wrapper.proxy_changed(proxy);
        }
    }

    // Cloned out so the registration lock is not held while observers run.
    fn wrapper(&self) -> Option<Arc<NetObserverWrapper>> {
        self.registration.lock().unwrap().clone()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum NetRegisterError {
    AlreadyRegistered,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NetUnregisterError {
    NotRegistered,
}
