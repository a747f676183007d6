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

//! `DrawCommand` (§4.6): one GPU draw call's worth of state, built by a
//! render system and consumed by whichever pipeline passes its `filter`
//! intersects.

use std::collections::HashMap;

use khora_core::renderer::api::{PassFilter, ShaderProgramHandle, UniformValue, VertexArrayHandle};

/// Everything a pass needs to issue one indexed draw call.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// The geometry to draw.
    pub vertex_array: VertexArrayHandle,
    /// Number of indices to draw from `vertex_array`.
    pub index_count: u32,
    /// The shader program to bind.
    pub program: ShaderProgramHandle,
    /// Per-draw uniform overrides, applied after the program's own cached
    /// values (e.g. `u_model`, `u_entity_id`).
    pub uniforms: HashMap<String, UniformValue>,
    /// Which passes this command participates in.
    pub filter: PassFilter,
}

impl DrawCommand {
    /// Creates a draw command with no uniform overrides yet.
    pub fn new(
        vertex_array: VertexArrayHandle,
        index_count: u32,
        program: ShaderProgramHandle,
        filter: PassFilter,
    ) -> Self {
        Self {
            vertex_array,
            index_count,
            program,
            uniforms: HashMap::new(),
            filter,
        }
    }

    /// Sets a per-draw uniform override, replacing any existing value.
    pub fn with_uniform(mut self, name: impl Into<String>, value: UniformValue) -> Self {
        self.uniforms.insert(name.into(), value);
        self
    }
}
