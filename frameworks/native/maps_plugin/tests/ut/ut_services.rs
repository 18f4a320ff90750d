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

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use maps_utils::test::log::init;
use provider_rs::geo::GeoCoordinates;
use provider_rs::reply::{GeoCoderReply, GeoLocation};
use provider_rs::test::StubSdk;

use super::*;
use crate::callback::{Candidate, GeocodeCallback};
use crate::config::PluginConfigBuilder;
use crate::error::MapsError;
use crate::info::Coordinates;
use crate::request::GeocodeRequest;

fn config(with_credentials: bool) -> PluginConfig {
    let mut builder = PluginConfigBuilder::new();
    if with_credentials {
        builder.credentials(Credentials::new("app", "code"));
    }
    builder.build()
}

fn registry(sdk: &Arc<StubSdk>) -> Arc<RequestRegistry> {
    init();
    RequestRegistry::new(sdk.clone(), config(true))
}

fn counting_callback() -> (Box<dyn GeocodeCallback>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback: Box<dyn GeocodeCallback> = Box::new(
        move |_: RequestId, _: Result<Candidate<Coordinates>, MapsError>| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        },
    );
    (callback, calls)
}

fn start_geocode(registry: &RequestRegistry) -> (RequestId, Arc<GeocodeRequest>, Arc<AtomicUsize>) {
    let (callback, calls) = counting_callback();
    let (request_id, request) = registry
        .create_instance::<GeocodeRequest>(callback)
        .unwrap();
    request.prepare_query().unwrap();
    request.prepare_text("Seoul City Hall").unwrap();
    request.start_geocode().unwrap();
    (request_id, request, calls)
}

fn one_result() -> GeoCoderReply {
    GeoCoderReply::new(vec![GeoLocation {
        position: GeoCoordinates::new(37.5665, 126.978),
        ..GeoLocation::default()
    }])
}

// @tc.name: ut_registry_acquire_release
// @tc.desc: Test reference counted plugin lifetime
// @tc.precon: NA
// @tc.step: 1. Acquire twice, then release three times
// @tc.expect: The SDK is initialized on the first acquire, shut down on the
//             last release, and the extra release is an invalid operation
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_registry_acquire_release() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    assert!(!registry.is_active());

    registry.acquire().unwrap();
    assert!(sdk.is_initialized());
    assert!(registry.net_registrar().is_registered());
    registry.acquire().unwrap();
    assert_eq!(registry.ref_count(), 2);

    registry.release().unwrap();
    assert_eq!(sdk.shutdown_count(), 0);
    assert!(registry.is_active());

    registry.release().unwrap();
    assert_eq!(sdk.shutdown_count(), 1);
    assert!(!registry.is_active());
    assert!(!registry.net_registrar().is_registered());

    assert_eq!(registry.release(), Err(PluginError::InvalidOperation));
}

// @tc.name: ut_registry_acquire_without_key
// @tc.desc: Test acquire fails on missing or refused credentials
// @tc.precon: NA
// @tc.step: 1. Acquire without credentials
//           2. Acquire with credentials the SDK refuses
// @tc.expect: Both fail with key not available and take no reference
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_registry_acquire_without_key() {
    init();
    let sdk = Arc::new(StubSdk::new());
    let registry = RequestRegistry::new(sdk.clone(), config(false));
    assert_eq!(registry.acquire(), Err(PluginError::KeyNotAvailable));
    assert_eq!(registry.ref_count(), 0);

    let registry = RequestRegistry::new(sdk.clone(), config(true));
    sdk.set_init_failure(true);
    assert_eq!(registry.acquire(), Err(PluginError::KeyNotAvailable));
    assert_eq!(registry.ref_count(), 0);
    assert!(!sdk.is_initialized());
}

// @tc.name: ut_registry_proxy
// @tc.desc: Test the configured proxy and later proxy changes reach the SDK
// @tc.precon: NA
// @tc.step: 1. Acquire with a configured proxy
//           2. Report a proxy change through the registrar
// @tc.expect: The SDK sees the configured proxy, then the new one
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 2
#[test]
fn ut_registry_proxy() {
    init();
    let sdk = Arc::new(StubSdk::new());
    let mut builder = PluginConfigBuilder::new();
    builder
        .credentials(Credentials::new("app", "code"))
        .proxy("10.0.0.1:3128");
    let registry = RequestRegistry::new(sdk.clone(), builder.build());

    registry.acquire().unwrap();
    assert_eq!(sdk.proxy().as_deref(), Some("10.0.0.1:3128"));
    registry.net_registrar().notify_proxy_changed(Some("10.0.0.2:3128"));
    assert_eq!(sdk.proxy().as_deref(), Some("10.0.0.2:3128"));
}

// @tc.name: ut_registry_ids_increase
// @tc.desc: Test request ids strictly increase and are never reused
// @tc.precon: NA
// @tc.step: 1. Create 100 requests, canceling and closing them in between
// @tc.expect: Every id is larger than the previous one and unique
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 0
#[test]
fn ut_registry_ids_increase() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    registry.acquire().unwrap();

    let mut seen = HashSet::new();
    let mut last: Option<RequestId> = None;
    for i in 0..100 {
        let (callback, _) = counting_callback();
        let (request_id, request) = registry
            .create_instance::<GeocodeRequest>(callback)
            .unwrap();
        if let Some(last) = last {
            assert!(request_id > last);
        }
        assert!(seen.insert(request_id));
        last = Some(request_id);
        if i % 2 == 0 {
            registry.cancel_instance(request_id).unwrap();
        } else {
            request.destroy();
        }
    }
    assert!(registry.is_empty());
}

// @tc.name: ut_registry_close_twice
// @tc.desc: Test closing the same id twice is harmless
// @tc.precon: NA
// @tc.step: 1. Create a request
//           2. Close its id twice
// @tc.expect: The request is gone after the first close, the second is a no-op
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_registry_close_twice() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (callback, _) = counting_callback();
    let (request_id, _request) = registry
        .create_instance::<GeocodeRequest>(callback)
        .unwrap();
    assert!(registry.contains(request_id));

    registry.close_instance(request_id);
    assert!(!registry.contains(request_id));
    registry.close_instance(request_id);
    assert_eq!(registry.len(), 0);
}

// @tc.name: ut_registry_cancel_unknown
// @tc.desc: Test canceling an id that was never allocated
// @tc.precon: NA
// @tc.step: 1. Cancel id 42 on an empty registry
// @tc.expect: Not found
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_registry_cancel_unknown() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    assert_eq!(
        registry.cancel_instance(RequestId::new(42)),
        Err(PluginError::NotFound)
    );
}

// @tc.name: ut_registry_cancel_outstanding
// @tc.desc: Test canceling a request whose provider call is outstanding
// @tc.precon: NA
// @tc.step: 1. Start a geocode request
//           2. Cancel it
//           3. Deliver the provider reply
// @tc.expect: The provider call is canceled, destruction waits for the
//             reply, and the callback never fires
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 0
#[test]
fn ut_registry_cancel_outstanding() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    registry.acquire().unwrap();
    let (request_id, request, calls) = start_geocode(&registry);
    let provider_id = request.core().provider_request_id().unwrap();

    registry.cancel_instance(request_id).unwrap();
    assert_eq!(sdk.canceled(), vec![provider_id]);
    assert!(!registry.contains(request_id));
    assert!(!request.core().is_destroyed());

    assert!(sdk.reply_geocode(provider_id, one_result()));
    assert!(request.core().is_destroyed());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        registry.cancel_instance(request_id),
        Err(PluginError::NotFound)
    );
}

// @tc.name: ut_registry_release_terminates
// @tc.desc: Test the last release terminates every live request
// @tc.precon: NA
// @tc.step: 1. Start one request and create another without starting it
//           2. Release the last reference
//           3. Deliver the started request's reply
// @tc.expect: The registry is empty, the unstarted request is destroyed at
//             once, the started one on its reply, and no callback fires
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_registry_release_terminates() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    registry.acquire().unwrap();
    let (_, started, calls) = start_geocode(&registry);
    let (callback, idle_calls) = counting_callback();
    let (_, idle) = registry
        .create_instance::<GeocodeRequest>(callback)
        .unwrap();
    assert_eq!(registry.len(), 2);

    registry.release().unwrap();
    assert!(registry.is_empty());
    assert!(idle.core().is_destroyed());
    assert!(!started.core().is_destroyed());
    let provider_id = started.core().provider_request_id().unwrap();
    assert_eq!(sdk.canceled(), vec![provider_id]);

    sdk.reply_geocode(provider_id, one_result());
    assert!(started.core().is_destroyed());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(idle_calls.load(Ordering::SeqCst), 0);
}

// @tc.name: ut_registry_set_credentials
// @tc.desc: Test new credentials re-initialize an active SDK
// @tc.precon: NA
// @tc.step: 1. Acquire, then set new credentials
//           2. Make the SDK refuse and set credentials again
// @tc.expect: The SDK holds the new credentials; refused ones are reported
//             as key not available and not stored
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 2
#[test]
fn ut_registry_set_credentials() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    registry.acquire().unwrap();

    registry
        .set_credentials(Credentials::new("other", "secret"))
        .unwrap();
    assert_eq!(sdk.credentials(), Some(Credentials::new("other", "secret")));
    assert_eq!(
        registry.config().credentials(),
        Some(&Credentials::new("other", "secret"))
    );

    sdk.set_init_failure(true);
    assert_eq!(
        registry.set_credentials(Credentials::new("bad", "key")),
        Err(PluginError::KeyNotAvailable)
    );
    assert_eq!(
        registry.config().credentials(),
        Some(&Credentials::new("other", "secret"))
    );
}
