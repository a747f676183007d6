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

//! The core scene components (§3): transforms, scene membership, cameras,
//! lights, mesh/material references, billboards, hierarchy links, and
//! identity.

mod billboard;
mod camera;
mod hierarchy;
mod identity;
mod light;
mod mesh_material;
mod scene_tag;
mod selected;
mod transform;

pub use billboard::*;
pub use camera::*;
pub use hierarchy::*;
pub use identity::*;
pub use light::*;
pub use mesh_material::*;
pub use scene_tag::*;
pub use selected::*;
pub use transform::*;
