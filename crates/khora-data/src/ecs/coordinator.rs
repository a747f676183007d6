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

//! The ECS coordinator (§4.1): owns entity allocation, every component
//! store, singletons, systems, groups, and the event queue.

use crate::ecs::component_array::{ComponentArray, DenseComponentArray};
use crate::ecs::group::{Group, GroupId, GroupRegistry, PartitionRange};
use crate::ecs::system::{SystemId, SystemRegistry};
use khora_core::error::{EngineError, EngineResult};
use khora_core::ecs::{Component, Entity, Signature, Singleton};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Owns every entity, component store, singleton, system, group, and queued
/// event in the world.
pub struct Coordinator {
    max_entities: u32,
    signatures: Vec<Signature>,
    free_list: Vec<Entity>,
    live_count: u32,

    next_bit: u32,
    component_bits: HashMap<TypeId, u32>,
    component_arrays: HashMap<TypeId, Box<dyn ComponentArray>>,

    singletons: HashMap<TypeId, Box<dyn Any + Send + Sync>>,

    systems: SystemRegistry,
    groups: GroupRegistry,

    events: HashMap<TypeId, Vec<Box<dyn Any + Send + Sync>>>,
}

/// Emitted via `dispatch_events` whenever `destroy_entity` removes an
/// entity (§3: "notifies the global entity-destroyed event").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDestroyed(pub Entity);

impl Coordinator {
    /// Creates an empty coordinator capped at `max_entities` live entities
    /// (§3, default 5000 via `EngineConfig::max_entities`).
    pub fn new(max_entities: u32) -> Self {
        Self {
            max_entities,
            signatures: Vec::new(),
            free_list: Vec::new(),
            live_count: 0,
            next_bit: 0,
            component_bits: HashMap::new(),
            component_arrays: HashMap::new(),
            singletons: HashMap::new(),
            systems: SystemRegistry::default(),
            groups: GroupRegistry::default(),
            events: HashMap::new(),
        }
    }

    // --- Registration ---------------------------------------------------

    /// Registers component type `T`, assigning it a stable bit position.
    /// Idempotent: calling it again for an already-registered type is a
    /// no-op. Registering a type after entities exist is allowed (§4.1) —
    /// existing entities simply have the new bit clear, since `Signature`
    /// grows on demand.
    pub fn register_component<T: Component>(&mut self) -> u32 {
        let type_id = TypeId::of::<T>();
        if let Some(&bit) = self.component_bits.get(&type_id) {
            return bit;
        }
        let bit = self.next_bit;
        self.next_bit += 1;
        self.component_bits.insert(type_id, bit);
        self.component_arrays
            .insert(type_id, Box::new(DenseComponentArray::<T>::default()));
        bit
    }

    /// Registers singleton type `T`, constructing its single instance via
    /// `Default`. Idempotent.
    pub fn register_singleton<T: Singleton>(&mut self) {
        let type_id = TypeId::of::<T>();
        self.singletons
            .entry(type_id)
            .or_insert_with(|| Box::new(T::default()));
    }

    /// Declares a group over `owned_types` (the component types whose
    /// stores this group keeps mutually sorted, §4.2).
    pub fn register_group(&mut self, owned_types: Vec<TypeId>) -> GroupId {
        self.groups.register(owned_types)
    }

    // --- Entities ---------------------------------------------------------

    /// Creates a new entity, reusing a freed id when available. Fails with
    /// `EntityLimitReached` once `max_entities` live entities exist and no
    /// id has been freed (§3: "max ~5000 live").
    pub fn create_entity(&mut self) -> EngineResult<Entity> {
        if let Some(entity) = self.free_list.pop() {
            self.live_count += 1;
            return Ok(entity);
        }
        if self.signatures.len() as u32 >= self.max_entities {
            return Err(EngineError::EntityLimitReached);
        }
        let entity = Entity(self.signatures.len() as u32);
        self.signatures.push(Signature::new());
        self.live_count += 1;
        Ok(entity)
    }

    /// Destroys `entity`: removes every component it carries, returns the
    /// id to the free list, and emits `EntityDestroyed` (§3, §4.1).
    pub fn destroy_entity(&mut self, entity: Entity) {
        let signature = self.signatures[entity.0 as usize].clone();
        for (&type_id, &bit) in self.component_bits.iter() {
            if signature.get(bit) {
                if let Some(store) = self.component_arrays.get_mut(&type_id) {
                    store.remove_untyped(entity);
                }
                self.groups.mark_dirty_for_type(type_id);
            }
        }
        self.signatures[entity.0 as usize] = Signature::new();
        self.systems.notify_destroyed(entity);
        self.free_list.push(entity);
        self.live_count -= 1;
        self.emit(EntityDestroyed(entity));
    }

    /// The number of currently live entities.
    pub fn live_count(&self) -> u32 {
        self.live_count
    }

    // --- Components ---------------------------------------------------------

    fn array<T: Component>(&self) -> &DenseComponentArray<T> {
        self.component_arrays[&TypeId::of::<T>()]
            .as_any()
            .downcast_ref()
            .expect("component store type mismatch")
    }

    fn array_mut<T: Component>(&mut self) -> &mut DenseComponentArray<T> {
        self.component_arrays
            .get_mut(&TypeId::of::<T>())
            .expect("component type not registered")
            .as_any_mut()
            .downcast_mut()
            .expect("component store type mismatch")
    }

    /// Adds component `v` of type `T` to `entity`. Fails with
    /// `ComponentAlreadyPresent` if `entity` already has one (§4.1).
    /// Registers `T` on first use if it has not been registered yet.
    pub fn add<T: Component>(&mut self, entity: Entity, v: T) -> EngineResult<()> {
        let bit = self.register_component::<T>();
        if self.signatures[entity.0 as usize].get(bit) {
            return Err(EngineError::ComponentAlreadyPresent);
        }
        self.array_mut::<T>().insert(entity, v);
        self.signatures[entity.0 as usize].set(bit);

        let signature = self.signatures[entity.0 as usize].clone();
        self.systems.notify_signature_changed(entity, &signature);
        self.groups.mark_dirty_for_type(TypeId::of::<T>());
        Ok(())
    }

    /// Removes `entity`'s component of type `T` via swap-remove. Fails with
    /// `ComponentAbsent` if it has none (§4.1).
    pub fn remove<T: Component>(&mut self, entity: Entity) -> EngineResult<T> {
        let type_id = TypeId::of::<T>();
        let bit = *self
            .component_bits
            .get(&type_id)
            .ok_or(EngineError::ComponentAbsent)?;
        if !self.signatures[entity.0 as usize].get(bit) {
            return Err(EngineError::ComponentAbsent);
        }
        let value = self
            .array_mut::<T>()
            .remove(entity)
            .expect("signature bit set but component missing");
        self.signatures[entity.0 as usize].clear(bit);

        let signature = self.signatures[entity.0 as usize].clone();
        self.systems.notify_signature_changed(entity, &signature);
        self.groups.mark_dirty_for_type(type_id);
        Ok(value)
    }

    /// Returns `true` if `entity` currently has a component of type `T`.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        match self.component_bits.get(&TypeId::of::<T>()) {
            Some(&bit) => self.signatures[entity.0 as usize].get(bit),
            None => false,
        }
    }

    /// Borrows `entity`'s component of type `T`, if present.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.component_arrays.get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<DenseComponentArray<T>>()
            .and_then(|store| store.get(entity))
    }

    /// Mutably borrows `entity`'s component of type `T`, if present.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.component_arrays.get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<DenseComponentArray<T>>()
            .and_then(|store| store.get_mut(entity))
    }

    /// Dense, single-type query: every live component of type `T` plus its
    /// backing entity, in store order (§4.1's `query` operation).
    pub fn query<T: Component>(&self) -> (&[Entity], &[T]) {
        match self.component_arrays.get(&TypeId::of::<T>()) {
            Some(store) => {
                let store = store
                    .as_any()
                    .downcast_ref::<DenseComponentArray<T>>()
                    .expect("component store type mismatch");
                (store.entities(), store.components())
            }
            None => (&[], &[]),
        }
    }

    // --- Singletons ---------------------------------------------------------

    /// Borrows the singleton instance of type `T`.
    pub fn singleton<T: Singleton>(&self) -> &T {
        self.singletons[&TypeId::of::<T>()]
            .downcast_ref()
            .expect("singleton type mismatch")
    }

    /// Mutably borrows the singleton instance of type `T`.
    pub fn singleton_mut<T: Singleton>(&mut self) -> &mut T {
        self.singletons
            .get_mut(&TypeId::of::<T>())
            .expect("singleton not registered")
            .downcast_mut()
            .expect("singleton type mismatch")
    }

    // --- Systems ---------------------------------------------------------

    /// Registers a system matching `required` and excluding `excluded`
    /// (§4.1).
    pub fn register_system(&mut self, required: Signature, excluded: Signature) -> SystemId {
        self.systems.register(required, excluded)
    }

    /// The current entity set matching system `id` (§4.1's
    /// `system_entities` operation).
    pub fn system_entities(&self, id: SystemId) -> impl Iterator<Item = Entity> + '_ {
        self.systems.entities(id).iter().copied()
    }

    // --- Groups / partitions ---------------------------------------------

    /// Rebuilds group `id`'s canonical entity order by `key_fn` applied to
    /// owned component `C`, then applies the matching permutation to every
    /// owned store so iteration yields aligned parallel spans (§4.2).
    /// Deferred: only actually re-sorts if the group is dirty.
    pub fn partition_group<C, K>(&mut self, id: GroupId, key_fn: impl Fn(&C) -> K) -> &[PartitionRange]
    where
        C: Component,
        K: Into<u64>,
    {
        if self.groups.get(id).map(Group::is_dirty).unwrap_or(false) {
            self.resort_group::<C, K>(id, &key_fn);
        }
        self.groups
            .get(id)
            .map(Group::partitions)
            .unwrap_or(&[])
    }

    fn resort_group<C, K>(&mut self, id: GroupId, key_fn: &impl Fn(&C) -> K)
    where
        C: Component,
        K: Into<u64>,
    {
        let owned_types = match self.groups.get(id) {
            Some(group) => group.owned_types().to_vec(),
            None => return,
        };

        let c_store = self.array::<C>();
        let mut entities: Vec<Entity> = c_store.entities().to_vec();
        entities.sort_by_key(|&e| key_fn(c_store.get(e).expect("owned component present")).into());

        for type_id in &owned_types {
            if let Some(store) = self.component_arrays.get_mut(type_id) {
                apply_order(store.as_mut(), &entities);
            }
        }

        let c_store = self.array::<C>();
        let keys: Vec<u64> = entities
            .iter()
            .map(|&e| key_fn(c_store.get(e).expect("owned component present")).into())
            .collect();

        let group = self.groups.get_mut(id).expect("group just looked up");
        group.set_entities(entities);
        let mut index = 0usize;
        group.rebuild_partitions(move |_| {
            let key = keys[index];
            index += 1;
            key
        });
    }

    /// Borrows a registered group's current entity order (not guaranteed
    /// partitioned until `partition_group` has been called at least once).
    pub fn group_entities(&self, id: GroupId) -> &[Entity] {
        self.groups
            .get(id)
            .map(Group::entities)
            .unwrap_or(&[])
    }

    /// Parallel slice of owned component `C` for group `id`, aligned with
    /// `group_entities`/`partition_group`'s order.
    pub fn group_components<C: Component>(&self, _id: GroupId) -> &[C] {
        self.array::<C>().components()
    }

    // --- Events ---------------------------------------------------------

    /// Queues `event` for later delivery via `dispatch_events::<E>`.
    pub fn emit<E: Send + Sync + 'static>(&mut self, event: E) {
        self.events
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(event));
    }

    /// Drains every queued event of type `E`, invoking `handler` on each in
    /// emission order (§4.1's `dispatch_events` operation).
    pub fn dispatch_events<E: Send + Sync + 'static>(&mut self, mut handler: impl FnMut(&E)) {
        if let Some(queue) = self.events.get_mut(&TypeId::of::<E>()) {
            for event in queue.drain(..) {
                if let Ok(event) = event.downcast::<E>() {
                    handler(&event);
                }
            }
        }
    }
}

/// Applies a permutation to a type-erased store so its packed order matches
/// `target_order`. Assumes the store holds exactly the entities in
/// `target_order` (the owned-group invariant, §4.2) — an O(n) in-place
/// permutation via swaps, each entity visited once.
fn apply_order(store: &mut dyn ComponentArray, target_order: &[Entity]) {
    for (i, &entity) in target_order.iter().enumerate() {
        let current = store
            .index_of_untyped(entity)
            .expect("entity missing from owned store during group resort");
        if current != i {
            store.swap_indices_untyped(i, current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pos(i32);
    impl Component for Pos {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Vel(i32);
    impl Component for Vel {}

    #[derive(Default)]
    struct Stats {
        frame: u32,
    }
    impl Singleton for Stats {}

    #[test]
    fn create_reuses_freed_ids() {
        let mut c = Coordinator::new(10);
        let e0 = c.create_entity().unwrap();
        let e1 = c.create_entity().unwrap();
        c.destroy_entity(e0);
        let e2 = c.create_entity().unwrap();
        assert_eq!(e2, e0);
        assert_eq!(c.live_count(), 2);
        let _ = e1;
    }

    #[test]
    fn create_entity_fails_at_cap() {
        let mut c = Coordinator::new(2);
        c.create_entity().unwrap();
        c.create_entity().unwrap();
        assert!(matches!(c.create_entity(), Err(EngineError::EntityLimitReached)));
    }

    #[test]
    fn add_rejects_duplicate_remove_rejects_absent() {
        let mut c = Coordinator::new(10);
        let e = c.create_entity().unwrap();
        c.add(e, Pos(1)).unwrap();
        assert!(matches!(c.add(e, Pos(2)), Err(EngineError::ComponentAlreadyPresent)));
        assert_eq!(c.remove::<Pos>(e).unwrap(), Pos(1));
        assert!(matches!(c.remove::<Pos>(e), Err(EngineError::ComponentAbsent)));
    }

    #[test]
    fn destroy_removes_every_component_and_emits_event() {
        let mut c = Coordinator::new(10);
        let e = c.create_entity().unwrap();
        c.add(e, Pos(1)).unwrap();
        c.add(e, Vel(2)).unwrap();
        c.destroy_entity(e);

        assert!(c.get::<Pos>(e).is_none());
        assert!(c.get::<Vel>(e).is_none());

        let mut destroyed = Vec::new();
        c.dispatch_events::<EntityDestroyed>(|ev| destroyed.push(ev.0));
        assert_eq!(destroyed, vec![e]);
    }

    #[test]
    fn system_membership_follows_add_remove() {
        let mut c = Coordinator::new(10);
        c.register_component::<Pos>();
        c.register_component::<Vel>();
        let mut required = Signature::new();
        required.set(0);
        required.set(1);
        let sys = c.register_system(required, Signature::new());

        let e = c.create_entity().unwrap();
        c.add(e, Pos(0)).unwrap();
        assert_eq!(c.system_entities(sys).count(), 0);
        c.add(e, Vel(0)).unwrap();
        assert_eq!(c.system_entities(sys).collect::<Vec<_>>(), vec![e]);
        c.remove::<Vel>(e).unwrap();
        assert_eq!(c.system_entities(sys).count(), 0);
    }

    #[test]
    fn singleton_reads_and_writes() {
        let mut c = Coordinator::new(10);
        c.register_singleton::<Stats>();
        assert_eq!(c.singleton::<Stats>().frame, 0);
        c.singleton_mut::<Stats>().frame = 5;
        assert_eq!(c.singleton::<Stats>().frame, 5);
    }

    #[test]
    fn group_partition_sorts_owned_store_in_lockstep() {
        let mut c = Coordinator::new(10);
        c.register_component::<Pos>();
        let group = c.register_group(vec![TypeId::of::<Pos>()]);

        let e0 = c.create_entity().unwrap();
        let e1 = c.create_entity().unwrap();
        let e2 = c.create_entity().unwrap();
        c.add(e0, Pos(30)).unwrap();
        c.add(e1, Pos(10)).unwrap();
        c.add(e2, Pos(10)).unwrap();

        let ranges = c.partition_group::<Pos, u64>(group, |p| p.0 as u64).to_vec();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].key, 10);
        assert_eq!(ranges[0].len, 2);
        assert_eq!(ranges[1].key, 30);
        assert_eq!(ranges[1].len, 1);

        let positions = c.group_components::<Pos>(group);
        assert_eq!(positions[0].0, 10);
        assert_eq!(positions[1].0, 10);
        assert_eq!(positions[2].0, 30);
    }
}
