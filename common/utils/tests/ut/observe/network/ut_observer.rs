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

use mockall::mock;
use mockall::predicate::eq;

use super::*;

mock! {
    pub Observer {}

    impl Observer for Observer {
        fn net_available(&self, net_id: i32);
        fn net_lost(&self, net_id: i32);
        fn proxy_changed<'a>(&self, proxy: Option<&'a str>);
    }
}

// @tc.name: ut_observer_trait_default_impls
// @tc.desc: Test default implementations of all Observer trait methods
// @tc.precon: NA
// @tc.step: 1. Implement Observer without overriding anything
//           2. Call every method
// @tc.expect: No panic occurs
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 0
#[test]
fn ut_observer_trait_default_impls() {
    struct DefaultObserver;
    impl Observer for DefaultObserver {}

    let observer = DefaultObserver;
    observer.net_available(0);
    observer.net_lost(0);
    observer.proxy_changed(Some("10.0.0.1:8080"));
    observer.proxy_changed(None);
}

// @tc.name: ut_observer_net_available_custom_impl
// @tc.desc: Test mocked net_available receives the network id
// @tc.precon: NA
// @tc.step: 1. Create mock observer expecting net_available(100)
//           2. Call net_available(100)
// @tc.expect: Mock expectation is satisfied
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_observer_net_available_custom_impl() {
    let mut mock = MockObserver::new();
    mock.expect_net_available()
        .with(eq(100))
        .times(1)
        .return_const(());

    mock.net_available(100);
}

// @tc.name: ut_observer_trait_object_safety
// @tc.desc: Verify Observer trait is object-safe
// @tc.precon: NA
// @tc.step: 1. Box a mock observer as dyn Observer
//           2. Call proxy_changed through the trait object
// @tc.expect: Call reaches the mock
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 3
#[test]
fn ut_observer_trait_object_safety() {
    let mut mock = MockObserver::new();
    mock.expect_proxy_changed()
        .withf(|proxy| *proxy == Some("proxy:3128"))
        .times(1)
        .return_const(());
    let observer: Box<dyn Observer> = Box::new(mock);
    observer.proxy_changed(Some("proxy:3128"));
}
