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

//! Asset loading is out of scope for this crate (mirroring `khora_core::asset`'s
//! own disclaimer): `MeshRef`/`MaterialRef` components carry opaque ids, and
//! the render systems need something to turn those ids into GPU-ready data.
//! [`AssetResolver`] is that seam — the host application supplies an
//! implementation backed by whatever asset pipeline it runs.

use khora_core::asset::AssetUUID;
use khora_core::math::LinearRgba;
use khora_core::renderer::api::{RequiredAttributes, ShaderProgramHandle, VertexArrayHandle};

/// A mesh asset resolved to draw-ready GPU data.
#[derive(Debug, Clone)]
pub struct ResolvedMesh {
    pub vertex_array: VertexArrayHandle,
    pub index_count: u32,
    pub provided_attributes: RequiredAttributes,
}

/// A material asset resolved to a shader program and its base uniforms.
#[derive(Debug, Clone)]
pub struct ResolvedMaterial {
    pub program: ShaderProgramHandle,
    pub base_color: LinearRgba,
}

/// Looks up the GPU-ready data behind a `MeshRef`/`MaterialRef`'s asset id.
///
/// An entity referencing an asset that hasn't finished loading yet is
/// skipped by the render systems, not treated as an error (§3).
pub trait AssetResolver {
    fn resolve_mesh(&self, id: AssetUUID) -> Option<ResolvedMesh>;
    fn resolve_material(&self, id: AssetUUID) -> Option<ResolvedMaterial>;
}
