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

//! # Khora Geometry
//!
//! Procedural primitive mesh generation (§4.7): cube, pyramid, tetrahedron,
//! sphere, cylinder and billboard quad, each built once and cached so
//! repeated requests for the same shape share one [`Mesh`].
//!
//! This crate produces CPU-side vertex/index data only; uploading a `Mesh`
//! to a `VertexArrayHandle` is the render backend's job.

mod mesh;
mod primitives;

pub use mesh::{Mesh, Vertex};
pub use primitives::{billboard, cube, cylinder, pyramid, sphere, tetrahedron};
