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

/// Receiver of network state events.
///
/// Every method has an empty default so implementors only override the events
/// they care about.
#[allow(unused)]
pub trait Observer: Send + Sync {
    fn net_available(&self, net_id: i32) {}
    fn net_lost(&self, net_id: i32) {}
    fn proxy_changed(&self, proxy: Option<&str>) {}
}
