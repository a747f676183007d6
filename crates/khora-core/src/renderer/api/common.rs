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

//! Backend-agnostic enums shared across the GPU resource layer.

use crate::khora_bitflags;

/// A backend-agnostic representation of a graphics API.
///
/// Backends are selected at build time (§6); this enum only names which one
/// is active, for diagnostics and for `unknown-api` reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsBackendType {
    /// OpenGL 4.5 core profile, the reference backend.
    OpenGl,
    /// No backend configured.
    #[default]
    Unknown,
}

/// The scalar data type of a vertex attribute or a uniform value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// A single 32-bit float.
    Float,
    /// Two 32-bit floats.
    Vec2,
    /// Three 32-bit floats.
    Vec3,
    /// Four 32-bit floats.
    Vec4,
    /// A single 32-bit signed integer.
    Int,
    /// A single boolean.
    Bool,
    /// A 4x4 matrix of 32-bit floats.
    Mat4,
}

impl DataType {
    /// The number of component scalars this type carries (e.g. `Vec3` is 3).
    pub fn component_count(self) -> u32 {
        match self {
            DataType::Float | DataType::Int | DataType::Bool => 1,
            DataType::Vec2 => 2,
            DataType::Vec3 => 3,
            DataType::Vec4 => 4,
            DataType::Mat4 => 16,
        }
    }

    /// Size in bytes of a single value of this type, assuming 4-byte scalars.
    pub fn size_bytes(self) -> u32 {
        self.component_count() * 4
    }
}

/// The data type of indices in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    /// Indices are 16-bit unsigned integers.
    Uint16,
    /// Indices are 32-bit unsigned integers.
    Uint32,
}

/// The named vertex attribute semantics a mesh can supply and a shader
/// program can require (§4.3, §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeSemantic {
    /// Object-space position (3 floats).
    Position,
    /// Object-space normal (3 floats).
    Normal,
    /// Tangent vector (3 floats).
    Tangent,
    /// Bitangent vector (3 floats).
    Bitangent,
    /// Primary texture coordinate (2 floats).
    Uv0,
    /// Lightmap texture coordinate (2 floats).
    LightmapUv,
    /// Per-vertex entity id, used for picking (1 int).
    EntityId,
}

impl AttributeSemantic {
    /// The bit this semantic occupies in a [`RequiredAttributes`] mask.
    const fn bit(self) -> u32 {
        match self {
            AttributeSemantic::Position => 1 << 0,
            AttributeSemantic::Normal => 1 << 1,
            AttributeSemantic::Tangent => 1 << 2,
            AttributeSemantic::Bitangent => 1 << 3,
            AttributeSemantic::Uv0 => 1 << 4,
            AttributeSemantic::LightmapUv => 1 << 5,
            AttributeSemantic::EntityId => 1 << 6,
        }
    }
}

khora_bitflags! {
    /// A fixed-width bitset of [`AttributeSemantic`]s (§4.3).
    ///
    /// A mesh is *compatible with* a shader program iff the mesh's
    /// `RequiredAttributes` is a superset of the program's required set.
    pub struct RequiredAttributes: u32 {
        const POSITION = 1 << 0;
        const NORMAL = 1 << 1;
        const TANGENT = 1 << 2;
        const BITANGENT = 1 << 3;
        const UV0 = 1 << 4;
        const LIGHTMAP_UV = 1 << 5;
        const ENTITY_ID = 1 << 6;
    }
}

impl RequiredAttributes {
    /// Sets the bit for `semantic`.
    pub fn insert(&mut self, semantic: AttributeSemantic) {
        self.bits |= semantic.bit();
    }

    /// Returns `true` iff `self` is a superset of `required` — every bit set
    /// in `required` is also set in `self`.
    pub fn is_superset_of(&self, required: RequiredAttributes) -> bool {
        (self.bits & required.bits) == required.bits
    }
}

khora_bitflags! {
    /// Which render passes a `DrawCommand` participates in (§4.6).
    pub struct PassFilter: u32 {
        const FORWARD = 1 << 0;
        const OUTLINE = 1 << 1;
        const ENTITY_PICKING = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_attributes_superset() {
        let mut mesh_attrs = RequiredAttributes::NONE;
        mesh_attrs.insert(AttributeSemantic::Position);
        mesh_attrs.insert(AttributeSemantic::Normal);
        mesh_attrs.insert(AttributeSemantic::Uv0);

        let mut program_required = RequiredAttributes::NONE;
        program_required.insert(AttributeSemantic::Position);
        program_required.insert(AttributeSemantic::Normal);

        assert!(mesh_attrs.is_superset_of(program_required));

        program_required.insert(AttributeSemantic::Tangent);
        assert!(!mesh_attrs.is_superset_of(program_required));
    }

    #[test]
    fn data_type_sizes() {
        assert_eq!(DataType::Vec3.size_bytes(), 12);
        assert_eq!(DataType::Mat4.size_bytes(), 64);
    }
}
