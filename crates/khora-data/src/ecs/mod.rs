// Copyright 2025 eraflo
//
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

//! The sparse-set ECS storage (§3/§4.1/§4.2): entity allocation, dense
//! per-type component stores, systems, groups, singletons, and the event
//! queue, plus the core scene components built on top of them.
//!
//! `Entity`/`Signature`/`Component`/`Singleton` are the shared primitives
//! defined in `khora_core::ecs`; this crate owns the storage that gives
//! those primitives somewhere to live.

mod component_array;
pub mod components;
mod coordinator;
mod group;
mod memento;
mod render_context;
mod system;

pub use component_array::{ComponentArray, DenseComponentArray};
pub use coordinator::{Coordinator, EntityDestroyed};
pub use group::{Group, GroupId, GroupRegistry, PartitionRange};
pub use memento::Memento;
pub use render_context::{CameraContext, LightRef, RenderContext, SceneLights, NO_SCENE};
pub use system::{SystemId, SystemRegistry};

pub use khora_core::ecs::{Component, Entity, Signature, Singleton};
