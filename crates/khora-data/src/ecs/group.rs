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

//! Groups (§4.2): an accelerated view over a tuple of component types that
//! keeps the owned stores sorted into the same order, so iteration yields
//! aligned parallel spans with no per-frame re-indexing.
//!
//! Unlike the rest of the coordinator, a group does not know its member
//! types at the type level — `Coordinator::register_group` builds one from
//! closures supplied by the caller, since the owned stores it reorders are
//! reached through the coordinator's type-erased component map. The
//! `Owned`/`NonOwned`/`WriteSingleton` markers in the spec describe the
//! *declaration* shape; here that shape is captured as the set of component
//! type ids a group owns plus the key-extraction closure used to partition.

use khora_core::ecs::Entity;
use std::any::TypeId;
use std::collections::HashMap;

/// A contiguous run of entities sharing a partition key, within a group's
/// entity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    /// The first packed index of this run.
    pub start: usize,
    /// The number of entities in this run.
    pub len: usize,
    /// The partition key shared by every entity in this run.
    pub key: u64,
}

/// A stable id for a registered group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

/// An accelerated, partitionable view over the owned component type ids
/// named at registration (§4.2).
///
/// `entities` mirrors the packed order shared by every owned store; a
/// `reorder` callback (supplied by the coordinator, which alone can reach
/// the type-erased stores) applies a computed permutation to every owned
/// store and to `entities` itself, keeping them in lockstep.
pub struct Group {
    owned_types: Vec<TypeId>,
    entities: Vec<Entity>,
    partitions: Vec<PartitionRange>,
    dirty: bool,
}

impl Group {
    pub(crate) fn new(owned_types: Vec<TypeId>) -> Self {
        Self {
            owned_types,
            entities: Vec::new(),
            partitions: Vec::new(),
            dirty: true,
        }
    }

    /// The owned component types this group keeps aligned.
    pub fn owned_types(&self) -> &[TypeId] {
        &self.owned_types
    }

    /// The entities currently in the group, in the owned stores' shared
    /// packed order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn set_entities(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
        self.dirty = true;
    }

    /// Marks the group's partition as stale. Called by the coordinator
    /// whenever an insertion or removal could change a partitioning key
    /// (§4.2: "invalidated whenever a relevant insertion/removal changes a
    /// key").
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the partition needs to be rebuilt before `partitions()` is
    /// trusted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the up-to-date partition ranges, in key order. Callers must
    /// have already re-sorted `entities` (and every owned store, via the
    /// coordinator's `reorder` step) before calling this with `dirty` clear.
    pub fn partitions(&self) -> &[PartitionRange] {
        &self.partitions
    }

    /// Recomputes `partitions` from the current (already-sorted) `entities`
    /// order and the per-entity key lookup `key_of`. Called by the
    /// coordinator after it re-sorts the owned stores by key.
    pub fn rebuild_partitions<F: Fn(Entity) -> u64>(&mut self, key_of: F) {
        self.partitions.clear();
        let mut i = 0;
        while i < self.entities.len() {
            let key = key_of(self.entities[i]);
            let start = i;
            while i < self.entities.len() && key_of(self.entities[i]) == key {
                i += 1;
            }
            self.partitions.push(PartitionRange {
                start,
                len: i - start,
                key,
            });
        }
        self.dirty = false;
    }
}

/// Holds every group registered on a coordinator, keyed by `GroupId`.
#[derive(Default)]
pub struct GroupRegistry {
    groups: HashMap<GroupId, Group>,
    next_id: u32,
}

impl GroupRegistry {
    /// Registers a new group over `owned_types`. Returns the assigned id.
    pub fn register(&mut self, owned_types: Vec<TypeId>) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.insert(id, Group::new(owned_types));
        id
    }

    /// Borrows a registered group.
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Mutably borrows a registered group.
    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    /// Marks every group owning `type_id` dirty. Called after any insertion
    /// or removal of that component type.
    pub fn mark_dirty_for_type(&mut self, type_id: TypeId) {
        for group in self.groups.values_mut() {
            if group.owned_types.contains(&type_id) {
                group.mark_dirty();
            }
        }
    }
}
