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

//! View objects drawn on the map.
//!
//! [`ViewObjectStore`] maps the framework's view object handles to the
//! renderables a [`Renderer`] created for them. Operations arriving before
//! the rendering surface is ready are queued and replayed in order once it
//! is. No store lock is held across a renderer call, so a renderer may call
//! back into the store. Operations it submits from inside a renderer call
//! run after the current one completes.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, ThreadId};

use maps_utils::{debug, info, warn};

use crate::error::PluginError;
use crate::info::Coordinates;

/// Framework handle of a view object.
pub type ViewObjectId = u64;

/// Renderer handle of a drawn object.
pub type RenderableId = u64;

/// What a view object draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewObject {
    Marker {
        position: Coordinates,
        /// Path of the marker image.
        image: String,
        z_order: i32,
    },
    Polyline {
        points: Vec<Coordinates>,
        /// ARGB line color.
        color: u32,
        width: f32,
    },
    Polygon {
        points: Vec<Coordinates>,
        /// ARGB fill color.
        fill_color: u32,
    },
}

impl ViewObject {
    fn is_valid(&self) -> bool {
        match self {
            ViewObject::Marker { position, .. } => position.is_valid(),
            ViewObject::Polyline { points, .. } => {
                points.len() >= 2 && points.iter().all(Coordinates::is_valid)
            }
            ViewObject::Polygon { points, .. } => {
                points.len() >= 3 && points.iter().all(Coordinates::is_valid)
            }
        }
    }
}

/// Owner of the rendering surface.
pub trait Renderer: Send + Sync {
    /// Draws a new object; `None` if the renderer could not.
    fn create(&self, object: &ViewObject, visible: bool) -> Option<RenderableId>;

    fn update(&self, renderable: RenderableId, object: &ViewObject);

    fn move_to(&self, renderable: RenderableId, position: Coordinates);

    fn set_visible(&self, renderable: RenderableId, visible: bool);

    /// Removes the object from the surface and frees it.
    fn destroy(&self, renderable: RenderableId);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOperation {
    Add {
        id: ViewObjectId,
        object: ViewObject,
        visible: bool,
    },
    Update {
        id: ViewObjectId,
        object: ViewObject,
    },
    Move {
        id: ViewObjectId,
        position: Coordinates,
    },
    SetVisible {
        id: ViewObjectId,
        visible: bool,
    },
    Remove {
        id: ViewObjectId,
    },
    RemoveAll,
}

struct Entry {
    renderable: RenderableId,
    object: ViewObject,
    visible: bool,
}

struct Pending {
    ready: bool,
    queue: VecDeque<ViewOperation>,
    // Thread currently applying operations, if any.
    runner: Option<ThreadId>,
}

pub struct ViewObjectStore {
    renderer: Arc<dyn Renderer>,
    table: Mutex<HashMap<ViewObjectId, Entry>>,
    pending: Mutex<Pending>,
    idle: Condvar,
}

impl ViewObjectStore {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            table: Mutex::new(HashMap::new()),
            pending: Mutex::new(Pending {
                ready: false,
                queue: VecDeque::new(),
                runner: None,
            }),
            idle: Condvar::new(),
        }
    }

    pub fn add(&self, id: ViewObjectId, object: ViewObject, visible: bool) -> Result<(), PluginError> {
        if !object.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.submit(ViewOperation::Add {
            id,
            object,
            visible,
        })
    }

    pub fn update(&self, id: ViewObjectId, object: ViewObject) -> Result<(), PluginError> {
        if !object.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.submit(ViewOperation::Update { id, object })
    }

    /// Moves a marker.
    pub fn move_object(&self, id: ViewObjectId, position: Coordinates) -> Result<(), PluginError> {
        if !position.is_valid() {
            return Err(PluginError::InvalidParameter);
        }
        self.submit(ViewOperation::Move { id, position })
    }

    pub fn set_visible(&self, id: ViewObjectId, visible: bool) -> Result<(), PluginError> {
        self.submit(ViewOperation::SetVisible { id, visible })
    }

    pub fn remove(&self, id: ViewObjectId) -> Result<(), PluginError> {
        self.submit(ViewOperation::Remove { id })
    }

    pub fn remove_all(&self) -> Result<(), PluginError> {
        self.submit(ViewOperation::RemoveAll)
    }

    /// Marks the surface ready and replays the queued operations in order.
    pub fn on_surface_ready(&self) {
        let mut pending = self.pending.lock().unwrap();
        pending.ready = true;
        info!("surface ready, {} queued view operations", pending.queue.len());
        if pending.runner.is_some() {
            return;
        }
        pending.runner = Some(thread::current().id());
        drop(pending);
        self.drain();
    }

    pub fn is_surface_ready(&self) -> bool {
        self.pending.lock().unwrap().ready
    }

    /// Number of operations waiting for the surface.
    pub fn queued(&self) -> usize {
        self.pending.lock().unwrap().queue.len()
    }

    pub fn contains(&self, id: ViewObjectId) -> bool {
        self.table.lock().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().unwrap().is_empty()
    }

    pub fn object(&self, id: ViewObjectId) -> Option<ViewObject> {
        self.table
            .lock()
            .unwrap()
            .get(&id)
            .map(|entry| entry.object.clone())
    }

    pub fn is_visible(&self, id: ViewObjectId) -> Option<bool> {
        self.table.lock().unwrap().get(&id).map(|entry| entry.visible)
    }

    // One thread applies operations at a time. Others wait for it to go idle;
    // the runner itself queues what it submits from inside a renderer call.
    fn submit(&self, operation: ViewOperation) -> Result<(), PluginError> {
        let current = thread::current().id();
        let mut pending = self.pending.lock().unwrap();
        loop {
            if !pending.ready {
                debug!("surface not ready, queue {:?}", operation);
                pending.queue.push_back(operation);
                return Ok(());
            }
            let runner = pending.runner;
            match runner {
                None => break,
                Some(runner) if runner == current => {
                    debug!("submitted from a renderer call, queue {:?}", operation);
                    pending.queue.push_back(operation);
                    return Ok(());
                }
                Some(_) => pending = self.idle.wait(pending).unwrap(),
            }
        }
        pending.runner = Some(current);
        drop(pending);

        let result = self.apply(operation);
        self.drain();
        result
    }

    // Applies queued operations until the queue is empty, then hands the
    // store to the next waiting thread.
    fn drain(&self) {
        loop {
            let operation = {
                let mut pending = self.pending.lock().unwrap();
                match pending.queue.pop_front() {
                    Some(operation) => operation,
                    None => {
                        pending.runner = None;
                        self.idle.notify_all();
                        return;
                    }
                }
            };
            if let Err(e) = self.apply(operation) {
                warn!("queued view operation failed: {}", e);
            }
        }
    }

    fn renderable(&self, id: ViewObjectId) -> Result<RenderableId, PluginError> {
        self.table
            .lock()
            .unwrap()
            .get(&id)
            .map(|entry| entry.renderable)
            .ok_or(PluginError::NotFound)
    }

    fn apply(&self, operation: ViewOperation) -> Result<(), PluginError> {
        match operation {
            ViewOperation::Add {
                id,
                object,
                visible,
            } => {
                if self.contains(id) {
                    return Err(PluginError::InvalidParameter);
                }
                let renderable = self
                    .renderer
                    .create(&object, visible)
                    .ok_or(PluginError::InvalidOperation)?;
                self.table.lock().unwrap().insert(
                    id,
                    Entry {
                        renderable,
                        object,
                        visible,
                    },
                );
            }
            ViewOperation::Update { id, object } => {
                let renderable = self.renderable(id)?;
                self.renderer.update(renderable, &object);
                if let Some(entry) = self.table.lock().unwrap().get_mut(&id) {
                    entry.object = object;
                }
            }
            ViewOperation::Move { id, position } => {
                let renderable = {
                    let table = self.table.lock().unwrap();
                    let entry = table.get(&id).ok_or(PluginError::NotFound)?;
                    if !matches!(entry.object, ViewObject::Marker { .. }) {
                        return Err(PluginError::NotSupported);
                    }
                    entry.renderable
                };
                self.renderer.move_to(renderable, position);
                if let Some(Entry {
                    object: ViewObject::Marker { position: current, .. },
                    ..
                }) = self.table.lock().unwrap().get_mut(&id)
                {
                    *current = position;
                }
            }
            ViewOperation::SetVisible { id, visible } => {
                let renderable = self.renderable(id)?;
                self.renderer.set_visible(renderable, visible);
                if let Some(entry) = self.table.lock().unwrap().get_mut(&id) {
                    entry.visible = visible;
                }
            }
            ViewOperation::Remove { id } => {
                let entry = self
                    .table
                    .lock()
                    .unwrap()
                    .remove(&id)
                    .ok_or(PluginError::NotFound)?;
                self.renderer.destroy(entry.renderable);
            }
            ViewOperation::RemoveAll => {
                let entries: Vec<Entry> = self
                    .table
                    .lock()
                    .unwrap()
                    .drain()
                    .map(|(_, entry)| entry)
                    .collect();
                for entry in entries {
                    self.renderer.destroy(entry.renderable);
                }
            }
        }
        Ok(())
    }
}
