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

//! `MeshRef` and `MaterialRef` (§3): non-owning references to loaded mesh
//! and material assets, by stable id rather than by handle. The render
//! systems resolve these against the asset registry each frame; an entity
//! whose asset has not finished loading is simply skipped.

use khora_core::asset::AssetUUID;
use khora_core::ecs::Component;
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// A non-owning reference to a mesh asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRef(pub AssetUUID);

impl Component for MeshRef {}

impl Memento for MeshRef {
    type Data = MeshRef;

    fn save(&self) -> MeshRef {
        *self
    }

    fn restore(data: MeshRef) -> Self {
        data
    }
}

/// A non-owning reference to a material asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRef(pub AssetUUID);

impl Component for MaterialRef {}

impl Memento for MaterialRef {
    type Data = MaterialRef;

    fn save(&self) -> MaterialRef {
        *self
    }

    fn restore(data: MaterialRef) -> Self {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refs_round_trip_through_memento() {
        let mesh = MeshRef(AssetUUID::new());
        assert_eq!(MeshRef::restore(mesh.save()), mesh);

        let material = MaterialRef(AssetUUID::new());
        assert_eq!(MaterialRef::restore(material.save()), material);
    }
}
