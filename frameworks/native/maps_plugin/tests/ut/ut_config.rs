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

// @tc.name: ut_config_default
// @tc.desc: Test the default plugin configuration
// @tc.precon: NA
// @tc.step: 1. Build a configuration without setting anything
// @tc.expect: No credentials, details fetched automatically, first seen
//             tie break and the default language and result limit
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_config_default() {
    let config = PluginConfig::default();
    assert!(config.credentials().is_none());
    assert!(config.proxy().is_none());
    assert!(config.auto_fetch_place_details());
    assert_eq!(config.nearest_tie_break(), TieBreak::FirstSeen);
    assert_eq!(
        config.preference().language.as_deref(),
        Some(DEFAULT_LANGUAGE)
    );
    assert_eq!(config.preference().max_results, Some(DEFAULT_MAX_RESULTS));
}

// @tc.name: ut_config_builder
// @tc.desc: Test every builder setting reaches the configuration
// @tc.precon: NA
// @tc.step: 1. Set key, proxy, auto fetch, tie break, language and limit
//           2. Build
// @tc.expect: The configuration reports every value set
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_config_builder() {
    let mut builder = PluginConfigBuilder::new();
    builder
        .provider_key("app/code")
        .unwrap()
        .proxy("10.0.0.1:3128")
        .auto_fetch_place_details(false)
        .nearest_tie_break(TieBreak::LastSeen)
        .default_language("ko-KR")
        .default_max_results(5);
    let config = builder.build();
    assert_eq!(config.credentials(), Some(&Credentials::new("app", "code")));
    assert_eq!(config.proxy(), Some("10.0.0.1:3128"));
    assert!(!config.auto_fetch_place_details());
    assert_eq!(config.nearest_tie_break(), TieBreak::LastSeen);
    assert_eq!(config.preference().language.as_deref(), Some("ko-KR"));
    assert_eq!(config.preference().max_results, Some(5));
}

// @tc.name: ut_parse_provider_key
// @tc.desc: Test provider key parsing
// @tc.precon: NA
// @tc.step: 1. Parse a well formed key
//           2. Parse keys missing a part or holding extra separators
// @tc.expect: Only the well formed key parses; the others are invalid
// @tc.type: FUNC
// @tc.require: NA
// @tc.level: Level 1
#[test]
fn ut_parse_provider_key() {
    let credentials = parse_provider_key("app/code").unwrap();
    assert_eq!(credentials.app_id, "app");
    assert_eq!(credentials.app_code, "code");
    assert_eq!(format_provider_key(&credentials), "app/code");

    for key in ["", "app", "app/", "/code", "a/b/c"] {
        assert_eq!(
            parse_provider_key(key),
            Err(PluginError::InvalidParameter),
            "{}",
            key
        );
    }
}
