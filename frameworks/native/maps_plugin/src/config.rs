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

//! Plugin configuration.

use provider_rs::Credentials;

use crate::error::PluginError;
use crate::info::Preference;

/// Language used when neither the request nor the plugin sets one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Result limit used when neither the request nor the plugin sets one.
pub const DEFAULT_MAX_RESULTS: usize = 25;

/// Which candidate wins when several reverse geocoding candidates are
/// equally near.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The first of the nearest candidates, in provider order.
    #[default]
    FirstSeen,
    /// The last of the nearest candidates, in provider order.
    LastSeen,
}

/// Runtime configuration of the plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub(crate) credentials: Option<Credentials>,
    pub(crate) proxy: Option<String>,
    pub(crate) auto_fetch_place_details: bool,
    pub(crate) nearest_tie_break: TieBreak,
    pub(crate) preference: Preference,
}

impl PluginConfig {
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Whether place searches fetch the details of every found place before
    /// delivering results one by one.
    pub fn auto_fetch_place_details(&self) -> bool {
        self.auto_fetch_place_details
    }

    pub fn nearest_tie_break(&self) -> TieBreak {
        self.nearest_tie_break
    }

    /// Plugin wide preference, under which request preferences are merged.
    pub fn preference(&self) -> &Preference {
        &self.preference
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfigBuilder::new().build()
    }
}

/// Builder for [`PluginConfig`].
///
/// # Examples
///
/// ```rust
/// use maps_plugin::config::{PluginConfigBuilder, TieBreak};
///
/// let config = PluginConfigBuilder::new()
///     .provider_key("my-app/my-code")
///     .unwrap()
///     .proxy("10.0.0.1:3128")
///     .nearest_tie_break(TieBreak::LastSeen)
///     .build();
/// assert_eq!(config.credentials().unwrap().app_id, "my-app");
/// ```
pub struct PluginConfigBuilder {
    credentials: Option<Credentials>,
    proxy: Option<String>,
    auto_fetch_place_details: bool,
    nearest_tie_break: TieBreak,
    language: String,
    max_results: usize,
}

impl PluginConfigBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            proxy: None,
            auto_fetch_place_details: true,
            nearest_tie_break: TieBreak::FirstSeen,
            language: DEFAULT_LANGUAGE.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the credentials from a key of the form `APP_ID/APP_CODE`.
    pub fn provider_key(&mut self, key: &str) -> Result<&mut Self, PluginError> {
        self.credentials = Some(parse_provider_key(key)?);
        Ok(self)
    }

    pub fn proxy(&mut self, proxy: &str) -> &mut Self {
        self.proxy = Some(proxy.to_string());
        self
    }

    pub fn auto_fetch_place_details(&mut self, enable: bool) -> &mut Self {
        self.auto_fetch_place_details = enable;
        self
    }

    pub fn nearest_tie_break(&mut self, tie_break: TieBreak) -> &mut Self {
        self.nearest_tie_break = tie_break;
        self
    }

    pub fn default_language(&mut self, language: &str) -> &mut Self {
        self.language = language.to_string();
        self
    }

    pub fn default_max_results(&mut self, max_results: usize) -> &mut Self {
        self.max_results = max_results;
        self
    }

    pub fn build(&self) -> PluginConfig {
        let mut preference = Preference::new();
        preference
            .language(&self.language)
            .max_results(self.max_results);
        PluginConfig {
            credentials: self.credentials.clone(),
            proxy: self.proxy.clone(),
            auto_fetch_place_details: self.auto_fetch_place_details,
            nearest_tie_break: self.nearest_tie_break,
            preference,
        }
    }
}

/// Splits a provider key of the form `APP_ID/APP_CODE`.
pub fn parse_provider_key(key: &str) -> Result<Credentials, PluginError> {
    match key.split_once('/') {
        Some((app_id, app_code))
            if !app_id.is_empty() && !app_code.is_empty() && !app_code.contains('/') =>
        {
            Ok(Credentials::new(app_id, app_code))
        }
        _ => Err(PluginError::InvalidParameter),
    }
}

/// Formats credentials back into a provider key.
pub fn format_provider_key(credentials: &Credentials) -> String {
    format!("{}/{}", credentials.app_id, credentials.app_code)
}
