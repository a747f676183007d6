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

//! `Parent` and `Root` (§3): the upward link of a scene hierarchy and the
//! aggregate describing a hierarchy's root. The downward links live on
//! [`crate::ecs::components::Transform::children`]; a dedicated hierarchy
//! maintenance system keeps the two in sync.

use khora_core::asset::AssetUUID;
use khora_core::ecs::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// A link from a child entity to its parent (§3). Absence means the entity
/// is a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);

impl Component for Parent {}

/// Marks the root of an instantiated asset hierarchy and aggregates data
/// about it (§3): a display name, the asset it was instantiated from, and
/// how many entities hang off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    /// Display name for this hierarchy root.
    pub name: String,
    /// The asset this hierarchy was instantiated from.
    pub asset_reference: AssetUUID,
    /// Total number of entities in the hierarchy, including the root.
    pub child_count: u32,
}

impl Component for Root {}

impl Memento for Root {
    type Data = Root;

    fn save(&self) -> Root {
        self.clone()
    }

    fn restore(data: Root) -> Self {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_wraps_entity() {
        let p = Parent(Entity(5));
        assert_eq!(p.0, Entity(5));
    }

    #[test]
    fn root_memento_is_identity() {
        let root = Root {
            name: "tree".to_owned(),
            asset_reference: AssetUUID::new(),
            child_count: 4,
        };
        assert_eq!(Root::restore(root.save()), root);
    }
}
