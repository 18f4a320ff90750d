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

use super::*;
use crate::geo::GeoCoordinates;
use crate::reply::GeoLocation;
use crate::test::StubSdk;

struct Recorder {
    replies: Arc<Mutex<Vec<usize>>>,
    failures: Arc<Mutex<Vec<i32>>>,
}

impl ReplyListener<GeoCoderReply> for Recorder {
    fn on_reply(&mut self, reply: GeoCoderReply) {
        self.replies.lock().unwrap().push(reply.count());
    }

    fn on_failure(&mut self, error: ProviderError) {
        self.failures.lock().unwrap().push(error.code());
    }
}

fn recorder() -> (Box<Recorder>, Arc<Mutex<Vec<usize>>>, Arc<Mutex<Vec<i32>>>) {
    let replies = Arc::new(Mutex::new(Vec::new()));
    let failures = Arc::new(Mutex::new(Vec::new()));
    let recorder = Box::new(Recorder {
        replies: replies.clone(),
        failures: failures.clone(),
    });
    (recorder, replies, failures)
}

fn geocode_query() -> GeoCoderQuery {
    let mut query = GeoCoderQuery::new();
    query.search_text("Gangnam-daero 1");
    query
}

// @tc.name: ut_credentials_complete
// @tc.desc: Test Credentials::is_complete
// @tc.precon: NA
// @tc.step: 1. Build complete and partial credentials
// @tc.expect: Only the credentials with both parts are complete
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_credentials_complete() {
    assert!(Credentials::new("id", "code").is_complete());
    assert!(!Credentials::new("id", "").is_complete());
    assert!(!Credentials::default().is_complete());
    assert!(is_accepted(1));
    assert!(!is_accepted(0));
    assert!(!is_accepted(-3));
}

// @tc.name: ut_stub_sdk_reply_once
// @tc.desc: Test that a stub submission is answered exactly once
// @tc.precon: NA
// @tc.step: 1. Submit a geocode query
//           2. Reply twice with the same id
// @tc.expect: Listener sees one reply; the second delivery finds nothing pending
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 0
#[test]
fn ut_stub_sdk_reply_once() {
    let sdk = StubSdk::new();
    let (listener, replies, failures) = recorder();
    let id = sdk.geocode(geocode_query(), listener);
    assert!(is_accepted(id));
    assert_eq!(sdk.pending_ids(), vec![id]);

    let reply = GeoCoderReply::new(vec![GeoLocation {
        position: GeoCoordinates::new(37.5, 127.0),
        ..GeoLocation::default()
    }]);
    assert!(sdk.reply_geocode(id, reply.clone()));
    assert!(!sdk.reply_geocode(id, reply));
    assert_eq!(*replies.lock().unwrap(), vec![1]);
    assert!(failures.lock().unwrap().is_empty());
    assert!(sdk.pending_ids().is_empty());
}

// @tc.name: ut_stub_sdk_reject
// @tc.desc: Test that a rejected submission never reaches its listener
// @tc.precon: NA
// @tc.step: 1. Enable rejection and submit a query
// @tc.expect: The id is not accepted and nothing is pending
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_stub_sdk_reject() {
    let sdk = StubSdk::new();
    sdk.set_reject(true);
    let (listener, replies, failures) = recorder();
    let id = sdk.geocode(geocode_query(), listener);
    assert!(!is_accepted(id));
    assert!(sdk.pending_ids().is_empty());
    assert!(!sdk.fail(id, ProviderError::http(500, "unused")));
    assert!(replies.lock().unwrap().is_empty());
    assert!(failures.lock().unwrap().is_empty());
}

// @tc.name: ut_stub_sdk_fail_after_cancel
// @tc.desc: Test that a canceled submission can still fail
// @tc.precon: NA
// @tc.step: 1. Submit, cancel, then deliver a failure
// @tc.expect: The cancel is recorded and the failure still reaches the listener
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_stub_sdk_fail_after_cancel() {
    let sdk = StubSdk::new();
    let (listener, _replies, failures) = recorder();
    let id = sdk.geocode(geocode_query(), listener);
    sdk.cancel(id);
    assert_eq!(sdk.canceled(), vec![id]);
    assert!(sdk.fail(id, ProviderError::http(408, "timeout")));
    assert_eq!(*failures.lock().unwrap(), vec![408]);
}

// @tc.name: ut_stub_sdk_initialize
// @tc.desc: Test initialize, proxy and shutdown bookkeeping of the stub
// @tc.precon: NA
// @tc.step: 1. Initialize with incomplete then complete credentials
//           2. Set a proxy and shut down
// @tc.expect: Incomplete credentials fail; state follows the calls
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 2
#[test]
fn ut_stub_sdk_initialize() {
    let sdk = StubSdk::new();
    assert!(sdk.initialize(&Credentials::new("id", "")).is_err());
    assert!(!sdk.is_initialized());
    sdk.initialize(&Credentials::new("id", "code")).unwrap();
    assert!(sdk.is_initialized());
    sdk.set_proxy(Some("10.0.0.1:8080"));
    assert_eq!(sdk.proxy().as_deref(), Some("10.0.0.1:8080"));
    sdk.shutdown();
    assert!(!sdk.is_initialized());
    assert_eq!(sdk.shutdown_count(), 1);
}
