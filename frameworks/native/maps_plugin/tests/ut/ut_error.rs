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

use super::*;

// @tc.name: ut_maps_error_code
// @tc.desc: Test MapsError carries the framework's numeric codes
// @tc.precon: NA
// @tc.step: 1. Read the code of several MapsError kinds
// @tc.expect: Codes match the framework's errno style values
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_maps_error_code() {
    assert_eq!(MapsError::InvalidParameter.code(), -22);
    assert_eq!(MapsError::NotFound.code(), -2);
    assert_eq!(MapsError::KeyNotAvailable.code(), -126);
    assert_eq!(MapsError::Unknown.code(), -1);
    assert_eq!(
        MapsError::ConnectionTimeout.to_string(),
        "connection timeout (-110)"
    );
}

// @tc.name: ut_error_kind_conversion
// @tc.desc: Test PluginError and MapsError convert into each other
// @tc.precon: NA
// @tc.step: 1. Convert every PluginError into MapsError and back
// @tc.expect: The round trip yields the original kind
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_error_kind_conversion() {
    let kinds = [
        PluginError::PermissionDenied,
        PluginError::OutOfMemory,
        PluginError::InvalidParameter,
        PluginError::NotSupported,
        PluginError::ConnectionTimeout,
        PluginError::NetworkUnreachable,
        PluginError::InvalidOperation,
        PluginError::KeyNotAvailable,
        PluginError::ResourceBusy,
        PluginError::Canceled,
        PluginError::NotFound,
        PluginError::ServiceNotAvailable,
        PluginError::Unknown,
    ];
    for kind in kinds {
        assert_eq!(PluginError::from(MapsError::from(kind)), kind);
    }
}

// @tc.name: ut_http_status_classification
// @tc.desc: Test HTTP statuses are classified per status table
// @tc.precon: NA
// @tc.step: 1. Classify credential, reachability, timeout and server statuses
// @tc.expect: Each status lands in its kind; other 4xx are invalid operation
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_http_status_classification() {
    assert_eq!(from_http_status(401), PluginError::KeyNotAvailable);
    assert_eq!(from_http_status(402), PluginError::KeyNotAvailable);
    assert_eq!(from_http_status(404), PluginError::NetworkUnreachable);
    assert_eq!(from_http_status(407), PluginError::NetworkUnreachable);
    assert_eq!(from_http_status(408), PluginError::ConnectionTimeout);
    assert_eq!(from_http_status(504), PluginError::ConnectionTimeout);
    assert_eq!(from_http_status(403), PluginError::ServiceNotAvailable);
    assert_eq!(from_http_status(503), PluginError::ServiceNotAvailable);
    assert_eq!(from_http_status(400), PluginError::InvalidOperation);
    assert_eq!(from_http_status(0), PluginError::Unknown);
}

// @tc.name: ut_classify_provider_error
// @tc.desc: Test provider failures of every category are classified
// @tc.precon: NA
// @tc.step: 1. Build failures of each category
//           2. Classify them
// @tc.expect: Category specific codes map to the matching kind
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_classify_provider_error() {
    assert_eq!(
        classify(&ProviderError::http(408, "timeout")),
        PluginError::ConnectionTimeout
    );
    assert_eq!(
        classify(&ProviderError::new(ErrorCategory::Parser, 0, "bad json")),
        PluginError::InvalidOperation
    );
    assert_eq!(
        classify(&ProviderError::router(RouterErrorCode::NoRouteFound, "none")),
        PluginError::NotFound
    );
    assert_eq!(
        classify(&ProviderError::router(RouterErrorCode::Canceled, "canceled")),
        PluginError::Canceled
    );
    assert_eq!(
        classify(&ProviderError::new(ErrorCategory::Tile, 7, "tile")),
        PluginError::ServiceNotAvailable
    );
    assert_eq!(
        classify(&ProviderError::finder(FinderErrorCode::Busy, "busy")),
        PluginError::ResourceBusy
    );
    assert_eq!(
        PluginError::from(&ProviderError::finder(FinderErrorCode::Unauthorized, "key")),
        PluginError::KeyNotAvailable
    );
}
