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

//! Network observation for the plugin.
//!
//! Keeps the provider SDK's proxy in step with the system proxy.

use std::sync::Arc;

use maps_utils::observe::network;
use maps_utils::{info, warn};
use provider_rs::ProviderSdk;

/// Network state observer registered while the plugin is active.
pub(crate) struct NetObserver {
    sdk: Arc<dyn ProviderSdk>,
}

impl NetObserver {
    pub(crate) fn new(sdk: Arc<dyn ProviderSdk>) -> Self {
        Self { sdk }
    }
}

impl network::Observer for NetObserver {
    fn net_available(&self, net_id: i32) {
        info!("net available, net_id: {}", net_id);
    }

    fn net_lost(&self, net_id: i32) {
        warn!("net lost, net_id: {}", net_id);
    }

    /// Pushes the new proxy, or its removal, to the provider SDK.
    fn proxy_changed(&self, proxy: Option<&str>) {
        info!("proxy changed to {:?}", proxy);
        self.sdk.set_proxy(proxy);
    }
}
