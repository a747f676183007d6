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

//! The `Transform` component (§3): position, rotation, scale, the matrices
//! derived from them, and the entity's children.
//!
//! Unlike a split transform/global-transform/children design, this single
//! component carries both the local and world matrices plus the child list,
//! matching §3's component list exactly. The transform-matrix system writes
//! `local`/`world` each frame; the transform-hierarchy system then
//! overwrites `world` for every non-root entity by walking `children`.

use khora_core::ecs::{Component, Entity};
use khora_core::math::{Mat4, Quaternion, Vec3};
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// Position, rotation, scale, and the hierarchy this entity roots (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Local translation relative to the parent (or world origin, if none).
    pub translation: Vec3,
    /// Local rotation, relative to the parent.
    pub rotation: Quaternion,
    /// Local scale, relative to the parent.
    pub scale: Vec3,
    /// `T(translation) * R(rotation) * S(scale)`, written by the
    /// transform-matrix system (§4.6). Identity until that system has run.
    pub local_matrix: Mat4,
    /// `local_matrix` composed with every ancestor's `world_matrix`, written
    /// by the transform-hierarchy system (§4.6).
    pub world_matrix: Mat4,
    /// An offset applied to this entity's visual/physical center, relative
    /// to its own origin (e.g. to recenter an off-center mesh).
    pub local_center_offset: Vec3,
    /// Direct children, in traversal order, for the hierarchy system's DFS.
    pub children: Vec<Entity>,
}

impl Component for Transform {}

impl Transform {
    /// Creates an identity transform with no children.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            local_center_offset: Vec3::ZERO,
            children: Vec::new(),
        }
    }

    /// Creates a transform at `translation`, identity rotation/scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Recomputes `local_matrix` from translation/rotation/scale (§3's
    /// invariant: `local = T(pos) * R(quat) * S(scale)`). The transform
    /// matrix system calls this for every transform in the rendered scene.
    pub fn recompute_local(&mut self) {
        self.local_matrix = Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// The persisted fields of a `Transform` (§6): matrices are derived, not
/// saved; `children` is reconstructed by re-parenting on load, not stored
/// in this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformData {
    /// See [`Transform::translation`].
    pub translation: Vec3,
    /// See [`Transform::rotation`].
    pub rotation: Quaternion,
    /// See [`Transform::scale`].
    pub scale: Vec3,
    /// See [`Transform::local_center_offset`].
    pub local_center_offset: Vec3,
}

impl Memento for Transform {
    type Data = TransformData;

    fn save(&self) -> TransformData {
        TransformData {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
            local_center_offset: self.local_center_offset,
        }
    }

    fn restore(data: TransformData) -> Self {
        Self {
            translation: data.translation,
            rotation: data.rotation,
            scale: data.scale,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            local_center_offset: data.local_center_offset,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_no_children_and_identity_matrices() {
        let t = Transform::identity();
        assert!(t.children.is_empty());
        assert_eq!(t.local_matrix, Mat4::IDENTITY);
        assert_eq!(t.world_matrix, Mat4::IDENTITY);
    }

    #[test]
    fn recompute_local_matches_translation() {
        let mut t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        t.recompute_local();
        assert_eq!(t.local_matrix, Mat4::from_translation(t.translation));
    }

    #[test]
    fn memento_round_trips_persisted_fields_only() {
        let mut t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        t.children.push(Entity(7));
        let data = t.save();
        let restored = Transform::restore(data);
        assert_eq!(restored.translation, t.translation);
        assert!(restored.children.is_empty());
    }
}
