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

//! Shader programs and their uniform cache (§4.3).

use super::arena::Handle;
use super::common::{DataType, RequiredAttributes};
use crate::math::{Mat4, Vec2, Vec3, Vec4};
use std::collections::HashMap;

/// The GLSL (or backend-equivalent) source for each supported shader stage,
/// parsed from a `#type vertex` / `#type fragment` file (§6).
#[derive(Debug, Clone)]
pub struct ShaderSources {
    /// Vertex stage source.
    pub vertex: String,
    /// Fragment stage source.
    pub fragment: String,
}

/// Reflected information about one active uniform, gathered after linking.
#[derive(Debug, Clone)]
pub struct UniformInfo {
    /// The uniform's name in the shader source.
    pub name: String,
    /// The uniform's declared type.
    pub data_type: DataType,
    /// Number of elements if this uniform is an array; 1 otherwise.
    pub array_size: u32,
    /// The backend-assigned uniform location.
    pub location: i32,
}

/// Reflected information about one active vertex attribute.
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    /// The attribute's name in the shader source.
    pub name: String,
    /// The attribute's declared type.
    pub data_type: DataType,
    /// The backend-assigned attribute location.
    pub location: i32,
}

/// A value that can be written to a uniform slot.
///
/// The array variants upload every element on every `set` call (§4.3: array
/// uniforms bypass [`UniformCache`] rather than being compared against a
/// previous value), matching `UniformInfo::array_size` reflected for the
/// target uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// A single float.
    Float(f32),
    /// A two-component vector.
    Vec2(Vec2),
    /// A three-component vector.
    Vec3(Vec3),
    /// A four-component vector.
    Vec4(Vec4),
    /// A single signed integer.
    Int(i32),
    /// A boolean, uploaded as an integer by backends that lack a native bool uniform.
    Bool(bool),
    /// A 4x4 matrix.
    Mat4(Mat4),
    /// An array of floats, e.g. `uniform float u_weights[N]`.
    FloatArray(Vec<f32>),
    /// An array of three-component vectors, e.g. point light positions.
    Vec3Array(Vec<Vec3>),
    /// An array of four-component vectors, e.g. light colors.
    Vec4Array(Vec<Vec4>),
    /// An array of 4x4 matrices, e.g. bone/skinning transforms.
    Mat4Array(Vec<Mat4>),
}

impl UniformValue {
    /// Whether this value is an array variant (§4.3: always dirty, never
    /// consulted against the cache).
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            UniformValue::FloatArray(_) | UniformValue::Vec3Array(_) | UniformValue::Vec4Array(_) | UniformValue::Mat4Array(_)
        )
    }
}

/// Whether a [`UniformCache::set`] call actually touched the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The cache already held an equal value; no upload happened.
    CachedNoUpload,
    /// The value differed (or was new); it was written to the cache and
    /// uploaded.
    Uploaded,
    /// `name` is not a reflected uniform; the call was a silent no-op.
    UnknownUniform,
}

/// Name-keyed last-set-value cache for a shader program's scalar/vector
/// uniforms (§4.3). Array uniforms bypass the cache and are not tracked
/// here; callers upload them directly every time.
#[derive(Debug, Default)]
pub struct UniformCache {
    values: HashMap<String, UniformValue>,
}

impl UniformCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to set `name` to `value`.
    ///
    /// Returns [`SetOutcome::CachedNoUpload`] without mutating the cache if
    /// the stored value already equals `value`; [`SetOutcome::Uploaded`] if
    /// it wrote a new value; callers are responsible for checking `name`
    /// against the program's reflected uniforms first and returning
    /// [`SetOutcome::UnknownUniform`] themselves — this cache does not know
    /// a program's reflection.
    pub fn set(&mut self, name: &str, value: UniformValue) -> SetOutcome {
        if self.values.get(name) == Some(&value) {
            return SetOutcome::CachedNoUpload;
        }
        self.values.insert(name.to_string(), value);
        SetOutcome::Uploaded
    }

    /// Returns the cached value for `name`, if any has been set.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }
}

/// Marker type for [`Handle<ShaderProgram>`].
#[derive(Debug)]
pub struct ShaderProgram;
/// A reference-counted handle to a linked, reflected shader program.
pub type ShaderProgramHandle = Handle<ShaderProgram>;

/// The static (reflection-derived) shape of a linked shader program: its
/// uniforms, attributes, and the required-attribute bitset derived from
/// attribute names (§4.3).
#[derive(Debug, Clone, Default)]
pub struct ShaderReflection {
    /// Every active uniform, keyed by name for `O(1)` lookup during `set`.
    pub uniforms: HashMap<String, UniformInfo>,
    /// Every active vertex attribute.
    pub attributes: Vec<AttributeInfo>,
    /// The attribute semantics this program requires a mesh to supply.
    pub required_attributes: RequiredAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_noop_for_equal_value() {
        let mut cache = UniformCache::new();
        assert_eq!(
            cache.set("u_time", UniformValue::Float(1.0)),
            SetOutcome::Uploaded
        );
        assert_eq!(
            cache.set("u_time", UniformValue::Float(1.0)),
            SetOutcome::CachedNoUpload
        );
        assert_eq!(
            cache.set("u_time", UniformValue::Float(2.0)),
            SetOutcome::Uploaded
        );
    }
}
