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

//! Request bookkeeping and plugin lifetime.
//!
//! [`RequestRegistry`] mints request ids, owns the table of live requests and
//! reference counts the plugin: the first [`acquire`](RequestRegistry::acquire)
//! brings the provider SDK up, the last [`release`](RequestRegistry::release)
//! terminates every live request and takes the SDK down.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use maps_utils::observe::network::NetRegistrar;
use maps_utils::request_id::{RequestId, RequestIdGenerator};
use maps_utils::{error, info, warn};
use provider_rs::{Credentials, ProviderSdk};

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::info::Preference;
use crate::observe::NetObserver;
use crate::request::{RequestCore, RequestHandle, ServiceOperation};

/// Owner of every live request.
///
/// The registry is created by the host once and shared by every plugin
/// instance the host loads; each instance calls `acquire` on load and
/// `release` on unload.
pub struct RequestRegistry {
    /// Back reference handed to requests so they can unregister themselves.
    weak_self: Weak<RequestRegistry>,
    sdk: Arc<dyn ProviderSdk>,
    config: Mutex<Arc<PluginConfig>>,
    id_generator: RequestIdGenerator,
    /// Live requests by id.
    running: Mutex<HashMap<RequestId, Arc<dyn RequestHandle>>>,
    /// Number of outstanding `acquire` calls. Separate from `running` so
    /// startup and shutdown never wait on request bookkeeping.
    ref_count: Mutex<usize>,
    net_registrar: NetRegistrar,
}

impl RequestRegistry {
    /// Creates a registry driving `sdk`.
    pub fn new(sdk: Arc<dyn ProviderSdk>, config: PluginConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            weak_self: weak_self.clone(),
            sdk,
            config: Mutex::new(Arc::new(config)),
            id_generator: RequestIdGenerator::new(),
            running: Mutex::new(HashMap::new()),
            ref_count: Mutex::new(0),
            net_registrar: NetRegistrar::new(),
        })
    }

    /// Takes a reference on the plugin.
    ///
    /// The first reference initializes the provider SDK with the configured
    /// credentials, applies the configured proxy and starts following network
    /// and proxy changes. If the SDK refuses the credentials the reference is
    /// not taken and `KeyNotAvailable` is returned.
    pub fn acquire(&self) -> Result<(), PluginError> {
        let mut ref_count = self.ref_count.lock().unwrap();
        if *ref_count == 0 {
            let config = self.config();
            let Some(credentials) = config.credentials() else {
                error!("acquire without credentials");
                return Err(PluginError::KeyNotAvailable);
            };
            if let Err(e) = self.sdk.initialize(credentials) {
                error!("provider initialize failed: {}", e);
                return Err(PluginError::KeyNotAvailable);
            }
            self.sdk.set_proxy(config.proxy());
            self.net_registrar
                .add_observer(NetObserver::new(self.sdk.clone()));
            if let Err(e) = self.net_registrar.register() {
                error!("Failed to register network observer: {:?}", e);
            }
            info!("maps plugin initialized");
        }
        *ref_count += 1;
        Ok(())
    }

    /// Drops a reference on the plugin.
    ///
    /// Dropping the last reference terminates every live request, stops
    /// following network changes and shuts the provider SDK down. Returns
    /// `InvalidOperation` if no reference is held.
    pub fn release(&self) -> Result<(), PluginError> {
        let mut ref_count = self.ref_count.lock().unwrap();
        if *ref_count == 0 {
            error!("release without acquire");
            return Err(PluginError::InvalidOperation);
        }
        *ref_count -= 1;
        if *ref_count == 0 {
            self.terminate_all();
            if let Err(e) = self.net_registrar.unregister() {
                warn!("network observer unregister: {:?}", e);
            }
            self.net_registrar.clear_observers();
            self.sdk.shutdown();
            info!("maps plugin shut down");
        }
        Ok(())
    }

    /// Returns `true` while at least one reference is held.
    pub fn is_active(&self) -> bool {
        *self.ref_count.lock().unwrap() > 0
    }

    pub fn ref_count(&self) -> usize {
        *self.ref_count.lock().unwrap()
    }

    /// Creates a request of kind `R` and registers it.
    pub fn create_instance<R: ServiceOperation>(
        &self,
        callback: R::Callback,
    ) -> Result<(RequestId, Arc<R>), PluginError> {
        let Some(request_id) = self.id_generator.next() else {
            error!("request ids exhausted");
            return Err(PluginError::OutOfMemory);
        };
        let core = RequestCore::new(
            request_id,
            R::KIND,
            self.weak_self.clone(),
            self.sdk.clone(),
            self.config(),
        );
        let request = Arc::new(R::create(core, callback));
        let handle: Arc<dyn RequestHandle> = request.clone();
        self.running.lock().unwrap().insert(request_id, handle);
        info!("request {} created, kind {:?}", request_id, R::KIND);
        Ok((request_id, request))
    }

    /// Unregisters a request. Unknown ids are ignored.
    pub fn close_instance(&self, request_id: RequestId) {
        self.running.lock().unwrap().remove(&request_id);
    }

    /// Cancels a live request.
    ///
    /// The request is unregistered, its provider calls are canceled and it
    /// is terminated; it never calls back afterwards. Returns `NotFound` if
    /// no live request has this id.
    pub fn cancel_instance(&self, request_id: RequestId) -> Result<(), PluginError> {
        let Some(handle) = self.running.lock().unwrap().remove(&request_id) else {
            info!("cancel request {} not found", request_id);
            return Err(PluginError::NotFound);
        };
        info!("cancel request {}", request_id);
        for id in handle.provider_request_ids() {
            self.sdk.cancel(id);
        }
        handle.terminate_service();
        Ok(())
    }

    /// Returns the live request with this id.
    pub fn get(&self, request_id: RequestId) -> Option<Arc<dyn RequestHandle>> {
        self.running.lock().unwrap().get(&request_id).cloned()
    }

    pub fn contains(&self, request_id: RequestId) -> bool {
        self.running.lock().unwrap().contains_key(&request_id)
    }

    /// Number of live requests.
    pub fn len(&self) -> usize {
        self.running.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.lock().unwrap().is_empty()
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<PluginConfig> {
        self.config.lock().unwrap().clone()
    }

    /// Replaces the credentials. While the plugin is active the provider SDK
    /// is initialized again with them.
    pub fn set_credentials(&self, credentials: Credentials) -> Result<(), PluginError> {
        let ref_count = self.ref_count.lock().unwrap();
        if *ref_count > 0 {
            if let Err(e) = self.sdk.initialize(&credentials) {
                error!("provider refused new credentials: {}", e);
                return Err(PluginError::KeyNotAvailable);
            }
        }
        self.update_config(|config| config.credentials = Some(credentials));
        Ok(())
    }

    /// Replaces the plugin wide preference.
    pub fn set_preference(&self, preference: Preference) {
        self.update_config(|config| config.preference = preference);
    }

    /// The hub network and proxy changes are reported to.
    pub fn net_registrar(&self) -> &NetRegistrar {
        &self.net_registrar
    }

    /// Provider SDK the registry drives.
    pub fn sdk(&self) -> &Arc<dyn ProviderSdk> {
        &self.sdk
    }

    fn update_config(&self, f: impl FnOnce(&mut PluginConfig)) {
        let mut config = self.config.lock().unwrap();
        let mut updated = PluginConfig::clone(&config);
        f(&mut updated);
        *config = Arc::new(updated);
    }

    // Takes one entry at a time so no registry lock is held while a request
    // terminates.
    fn terminate_all(&self) {
        loop {
            let next = {
                let mut running = self.running.lock().unwrap();
                let request_id = running.keys().next().copied();
                request_id.and_then(|request_id| running.remove(&request_id))
            };
            let Some(handle) = next else {
                break;
            };
            for id in handle.provider_request_ids() {
                self.sdk.cancel(id);
            }
            let request_id = handle.request_id();
            if panic::catch_unwind(AssertUnwindSafe(|| handle.terminate_service())).is_err() {
                error!("request {} panicked while terminating", request_id);
            }
        }
    }
}
