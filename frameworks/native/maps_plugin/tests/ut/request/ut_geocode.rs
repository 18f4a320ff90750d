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

use std::sync::Mutex;

use maps_utils::request_id::RequestId;
use maps_utils::test::log::init;
use provider_rs::geo::{GeoCoordinates, ProviderAddress};
use provider_rs::query::GeoCoderInput;
use provider_rs::reply::GeoLocation;
use provider_rs::test::{PendingCall, StubSdk};
use provider_rs::Credentials;

use super::*;
use crate::config::PluginConfigBuilder;
use crate::info::Coordinates;
use crate::services::RequestRegistry;

type Results = Arc<Mutex<Vec<Result<Candidate<Coordinates>, MapsError>>>>;

fn registry(sdk: &Arc<StubSdk>) -> Arc<RequestRegistry> {
    init();
    let mut builder = PluginConfigBuilder::new();
    builder.credentials(Credentials::new("app", "code"));
    let registry = RequestRegistry::new(sdk.clone(), builder.build());
    registry.acquire().unwrap();
    registry
}

fn create(registry: &RequestRegistry, keep_going: usize) -> (Arc<GeocodeRequest>, Results) {
    let results = Results::default();
    let sink = results.clone();
    let callback: Box<dyn GeocodeCallback> = Box::new(
        move |_: RequestId, result: Result<Candidate<Coordinates>, MapsError>| {
            let mut results = sink.lock().unwrap();
            results.push(result);
            results.len() < keep_going
        },
    );
    let (_, request) = registry
        .create_instance::<GeocodeRequest>(callback)
        .unwrap();
    (request, results)
}

fn locations(count: usize) -> GeoCoderReply {
    GeoCoderReply::new(
        (0..count)
            .map(|i| GeoLocation {
                position: GeoCoordinates::new(37.5 + i as f64, 127.0),
                ..GeoLocation::default()
            })
            .collect(),
    )
}

fn take_query(sdk: &StubSdk, id: i64) -> (GeoCoderQuery, Box<dyn ReplyListener<GeoCoderReply>>) {
    match sdk.take(id) {
        Some(PendingCall::Geocode(query, listener)) => (query, listener),
        _ => panic!("no geocode call {}", id),
    }
}

// @tc.name: ut_geocode_free_text
// @tc.desc: Test geocoding a one line address
// @tc.precon: NA
// @tc.step: 1. Start a geocode of a text with the default preference
//           2. Inspect the submitted query and reply with two locations
// @tc.expect: The query carries the text and defaults and both candidates
//             are delivered in order
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 0
#[test]
fn ut_geocode_free_text() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, results) = create(&registry, usize::MAX);
    request.prepare_query().unwrap();
    request.prepare_text("Gangnam-daero 1, Seoul").unwrap();
    request.start_geocode().unwrap();

    let (query, mut listener) = take_query(&sdk, 1);
    assert_eq!(
        query.input(),
        Some(&GeoCoderInput::FreeText("Gangnam-daero 1, Seoul".to_string()))
    );
    assert_eq!(query.get_language(), Some("en-US"));
    assert_eq!(query.get_max_results(), Some(25));
    assert_eq!(query.get_bounding_box(), None);

    listener.on_reply(locations(2));
    let results = results.lock().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0],
        Ok(Candidate {
            index: 0,
            total: 2,
            item: Coordinates::new(37.5, 127.0)
        })
    );
    assert_eq!(results[1].as_ref().unwrap().index, 1);
    assert!(request.core().is_destroyed());
    assert!(registry.is_empty());
}

// @tc.name: ut_geocode_structured
// @tc.desc: Test geocoding a structured address inside an area
// @tc.precon: NA
// @tc.step: 1. Prepare a structured address, a rectangle and a preference
// @tc.expect: The query carries the address fields, the box and the
//             preference values
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_geocode_structured() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, _) = create(&registry, usize::MAX);
    request.prepare_query().unwrap();
    let address = Address {
        street: Some("Teheran-ro".to_string()),
        city: Some("Seoul".to_string()),
        country_code: Some("KR".to_string()),
        ..Address::default()
    };
    request.prepare_address(&address).unwrap();
    request
        .prepare_area(&Area::rectangle(
            Coordinates::new(38.0, 126.0),
            Coordinates::new(37.0, 128.0),
        ))
        .unwrap();
    let mut preference = Preference::new();
    preference.language("ko-KR").max_results(3);
    request.prepare_preference(&preference).unwrap();
    request.start_geocode().unwrap();

    let (query, _) = take_query(&sdk, 1);
    assert_eq!(
        query.input(),
        Some(&GeoCoderInput::Structured(ProviderAddress {
            street: Some("Teheran-ro".to_string()),
            city: Some("Seoul".to_string()),
            country_code: Some("KR".to_string()),
            ..ProviderAddress::default()
        }))
    );
    let bounding_box = query.get_bounding_box().unwrap();
    assert_eq!(bounding_box.top_left, GeoCoordinates::new(38.0, 126.0));
    assert_eq!(bounding_box.bottom_right, GeoCoordinates::new(37.0, 128.0));
    assert_eq!(query.get_language(), Some("ko-KR"));
    assert_eq!(query.get_max_results(), Some(3));
}

// @tc.name: ut_geocode_invalid_input
// @tc.desc: Test inputs geocoding refuses
// @tc.precon: NA
// @tc.step: 1. Prepare an empty text, an empty address and a circle
//           2. Start without any input
// @tc.expect: Invalid parameter or not supported and nothing submitted
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_geocode_invalid_input() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, _) = create(&registry, usize::MAX);
    request.prepare_query().unwrap();
    assert_eq!(request.prepare_text(""), Err(PluginError::InvalidParameter));
    assert_eq!(
        request.prepare_address(&Address::default()),
        Err(PluginError::InvalidParameter)
    );
    assert_eq!(
        request.prepare_area(&Area::circle(Coordinates::new(37.5, 127.0), 500.0)),
        Err(PluginError::NotSupported)
    );
    assert_eq!(request.start_geocode(), Err(PluginError::InvalidParameter));
    assert!(sdk.pending_ids().is_empty());
}

// @tc.name: ut_geocode_no_result
// @tc.desc: Test a reply without candidates
// @tc.precon: NA
// @tc.step: 1. Reply to a geocode with no location
// @tc.expect: One call with not found
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_geocode_no_result() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, results) = create(&registry, usize::MAX);
    request.prepare_query().unwrap();
    request.prepare_text("nowhere").unwrap();
    request.start_geocode().unwrap();

    assert!(sdk.reply_geocode(1, locations(0)));
    assert_eq!(*results.lock().unwrap(), vec![Err(MapsError::NotFound)]);
}

// @tc.name: ut_geocode_stop
// @tc.desc: Test the callback stopping the delivery
// @tc.precon: NA
// @tc.step: 1. Reply with five locations to a callback that stops after two
// @tc.expect: Exactly two calls and the request is destroyed
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_geocode_stop() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, results) = create(&registry, 2);
    request.prepare_query().unwrap();
    request.prepare_text("Seoul").unwrap();
    request.start_geocode().unwrap();

    sdk.reply_geocode(1, locations(5));
    assert_eq!(results.lock().unwrap().len(), 2);
    assert!(request.core().is_destroyed());
}

// @tc.name: ut_geocode_failure
// @tc.desc: Test a provider failure
// @tc.precon: NA
// @tc.step: 1. Fail a geocode with HTTP 408
// @tc.expect: One call with connection timeout and the state is failed
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_geocode_failure() {
    let sdk = Arc::new(StubSdk::new());
    let registry = registry(&sdk);
    let (request, results) = create(&registry, usize::MAX);
    request.prepare_query().unwrap();
    request.prepare_text("Seoul").unwrap();
    request.start_geocode().unwrap();

    sdk.fail(1, ProviderError::http(408, "timeout"));
    assert_eq!(
        *results.lock().unwrap(),
        vec![Err(MapsError::ConnectionTimeout)]
    );
    assert_eq!(request.core().state(), RequestState::Failed);
    assert!(request.core().is_destroyed());
}
