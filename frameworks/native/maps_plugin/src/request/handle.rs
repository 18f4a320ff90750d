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

//! Lifecycle shared by every request kind.
//!
//! A request moves through
//! `Created -> QueryPrepared -> Executing -> {Replied, Failed, Canceled}`.
//! The state is a single atomic so that the caller's thread (prepare, start,
//! cancel) and the provider's thread (reply, failure) agree on who owns the
//! teardown without holding a lock across either path.
//!
//! Teardown is [`RequestHandle::destroy`]. It runs at most once: it drops the
//! caller's callback and unregisters the request. Which thread runs it
//! follows from the state a cancellation finds:
//!
//! * `Created` or `QueryPrepared`: nothing is outstanding, the canceling
//!   thread destroys the request immediately.
//! * `Executing`: a provider call is outstanding. The state becomes
//!   `Canceled` and the reply handler that eventually fires destroys the
//!   request without calling back.
//! * `Replied` or `Failed`: a reply handler is already running. Only the
//!   cancel flag is set; the handler stops delivering and destroys.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, Weak};

use maps_utils::request_id::RequestId;
use maps_utils::{debug, error, info};
use provider_rs::{is_accepted, ProviderRequestId, ProviderSdk};

use super::RequestKind;
use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::services::RequestRegistry;

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestState {
    Created = 0,
    QueryPrepared = 1,
    Executing = 2,
    Replied = 3,
    Failed = 4,
    Canceled = 5,
}

impl From<u8> for RequestState {
    fn from(value: u8) -> Self {
        match value {
            0 => RequestState::Created,
            1 => RequestState::QueryPrepared,
            2 => RequestState::Executing,
            3 => RequestState::Replied,
            4 => RequestState::Failed,
            _ => RequestState::Canceled,
        }
    }
}

/// State common to all request kinds.
pub struct RequestCore {
    request_id: RequestId,
    kind: RequestKind,
    state: AtomicU8,
    cancel_requested: AtomicBool,
    provider_request_id: AtomicI64,
    destroyed: AtomicBool,
    registry: Weak<RequestRegistry>,
    sdk: Arc<dyn ProviderSdk>,
    config: Arc<PluginConfig>,
}

impl RequestCore {
    pub(crate) fn new(
        request_id: RequestId,
        kind: RequestKind,
        registry: Weak<RequestRegistry>,
        sdk: Arc<dyn ProviderSdk>,
        config: Arc<PluginConfig>,
    ) -> Self {
        Self {
            request_id,
            kind,
            state: AtomicU8::new(RequestState::Created as u8),
            cancel_requested: AtomicBool::new(false),
            provider_request_id: AtomicI64::new(0),
            destroyed: AtomicBool::new(false),
            registry,
            sdk,
            config,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn state(&self) -> RequestState {
        RequestState::from(self.state.load(Ordering::Acquire))
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    /// Id of the accepted provider call, if the provider accepted one.
    pub fn provider_request_id(&self) -> Option<ProviderRequestId> {
        let id = self.provider_request_id.load(Ordering::Acquire);
        is_accepted(id).then_some(id)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }

    pub(crate) fn sdk(&self) -> &Arc<dyn ProviderSdk> {
        &self.sdk
    }

    pub(crate) fn config(&self) -> &PluginConfig {
        &self.config
    }

    fn transition(&self, from: RequestState, to: RequestState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// `Created -> QueryPrepared`. Only one preparation is allowed.
    pub(crate) fn prepare(&self) -> Result<(), PluginError> {
        if self.transition(RequestState::Created, RequestState::QueryPrepared) {
            Ok(())
        } else {
            error!(
                "request {} prepare in state {:?}",
                self.request_id,
                self.state()
            );
            Err(PluginError::PermissionDenied)
        }
    }

    /// `QueryPrepared -> Executing`, right before the query is submitted.
    pub(crate) fn begin_execute(&self) -> Result<(), PluginError> {
        if self.transition(RequestState::QueryPrepared, RequestState::Executing) {
            return Ok(());
        }
        match self.state() {
            RequestState::Canceled => Err(PluginError::Canceled),
            state => {
                error!("request {} start in state {:?}", self.request_id, state);
                Err(PluginError::PermissionDenied)
            }
        }
    }

    /// Records the id the provider answered a submission with.
    ///
    /// A rejected submission moves the request to `Failed` and yields
    /// `InvalidOperation`; the caller then destroys the request itself since
    /// no reply will ever arrive.
    pub(crate) fn finish_execute(&self, id: ProviderRequestId) -> Result<(), PluginError> {
        if !is_accepted(id) {
            error!("request {} rejected by provider, id {}", self.request_id, id);
            self.transition(RequestState::Executing, RequestState::Failed);
            return Err(PluginError::InvalidOperation);
        }
        self.provider_request_id.store(id, Ordering::Release);
        debug!("request {} submitted as provider request {}", self.request_id, id);
        // Canceled while the submission was in progress: the canceling
        // thread could not know the id yet.
        if self.state() == RequestState::Canceled {
            self.sdk.cancel(id);
        }
        Ok(())
    }

    /// Claims the outcome of the outstanding provider call.
    ///
    /// Returns `false` if the request was canceled first; the reply handler
    /// must then destroy the request without calling back.
    pub(crate) fn enter_reply(&self, terminal: RequestState) -> bool {
        self.transition(RequestState::Executing, terminal) && !self.is_cancel_requested()
    }

    /// Marks the request canceled. Returns `true` if nothing is outstanding
    /// and the caller must destroy the request now.
    pub(crate) fn request_cancel(&self) -> bool {
        loop {
            let state = self.state();
            match state {
                RequestState::Created | RequestState::QueryPrepared => {
                    if self.transition(state, RequestState::Canceled) {
                        self.cancel_requested.store(true, Ordering::Release);
                        return true;
                    }
                }
                RequestState::Executing => {
                    if self.transition(state, RequestState::Canceled) {
                        self.cancel_requested.store(true, Ordering::Release);
                        debug!("request {} destroy deferred to reply", self.request_id);
                        return false;
                    }
                }
                RequestState::Replied | RequestState::Failed | RequestState::Canceled => {
                    self.cancel_requested.store(true, Ordering::Release);
                    return false;
                }
            }
        }
    }

    /// Runs `release` and unregisters the request, once.
    pub(crate) fn destroy_with(&self, release: impl FnOnce()) -> bool {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return false;
        }
        release();
        if let Some(registry) = self.registry.upgrade() {
            registry.close_instance(self.request_id);
        }
        debug!("request {} destroyed", self.request_id);
        true
    }
}

/// A live request as the registry sees it.
pub trait RequestHandle: Send + Sync {
    fn core(&self) -> &RequestCore;

    /// Drops the caller's callback.
    fn release_callback(&self);

    /// Ids of every outstanding provider call of this request.
    fn provider_request_ids(&self) -> Vec<ProviderRequestId> {
        self.core().provider_request_id().into_iter().collect()
    }

    fn request_id(&self) -> RequestId {
        self.core().request_id()
    }

    /// Tears the request down. Returns `false` if it already was.
    fn destroy(&self) -> bool {
        self.core().destroy_with(|| self.release_callback())
    }

    /// Cancels the request; it never calls back afterwards.
    fn terminate_service(&self) {
        if self.core().request_cancel() {
            info!("request {} terminated before submission", self.request_id());
            self.destroy();
        } else {
            info!("request {} terminated", self.request_id());
        }
    }
}

/// Holder of a query between preparation and submission.
pub(crate) struct QuerySlot<Q> {
    query: Mutex<Option<Q>>,
}

impl<Q> QuerySlot<Q> {
    pub(crate) fn new() -> Self {
        Self {
            query: Mutex::new(None),
        }
    }

    pub(crate) fn fill(&self, query: Q) {
        *self.query.lock().unwrap() = Some(query);
    }

    /// Runs `f` on the prepared query; `PermissionDenied` if there is none.
    pub(crate) fn with<T>(
        &self,
        f: impl FnOnce(&mut Q) -> Result<T, PluginError>,
    ) -> Result<T, PluginError> {
        match self.query.lock().unwrap().as_mut() {
            Some(query) => f(query),
            None => Err(PluginError::PermissionDenied),
        }
    }

    pub(crate) fn take(&self) -> Result<Q, PluginError> {
        self.query
            .lock()
            .unwrap()
            .take()
            .ok_or(PluginError::PermissionDenied)
    }
}

/// Holder of the caller's callback until the request is destroyed.
pub(crate) struct CallbackSlot<C> {
    callback: Mutex<Option<C>>,
}

impl<C> CallbackSlot<C> {
    pub(crate) fn new(callback: C) -> Self {
        Self {
            callback: Mutex::new(Some(callback)),
        }
    }

    /// Runs `f` on the callback unless it was released.
    pub(crate) fn with<T>(&self, f: impl FnOnce(&mut C) -> T) -> Option<T> {
        self.callback.lock().unwrap().as_mut().map(f)
    }

    pub(crate) fn release(&self) {
        let callback = self.callback.lock().unwrap().take();
        drop(callback);
    }
}
