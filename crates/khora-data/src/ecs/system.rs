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

//! System registration (§4.1): a system is named by the required/excluded
//! signature it matches against, and the coordinator keeps its matching
//! entity set current as components are added and removed.

use khora_core::ecs::{Entity, Signature};
use std::collections::BTreeSet;

/// A stable id for a registered system, assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(pub u32);

/// A registered system's membership test plus its current matching entity
/// set. Systems are processed in registration order by default (§4.1); a
/// `BTreeSet` keeps `system_entities` output in a stable order for
/// reproducible iteration without a separate sort step.
pub struct SystemEntry {
    required: Signature,
    excluded: Signature,
    entities: BTreeSet<Entity>,
}

impl SystemEntry {
    fn matches(&self, signature: &Signature) -> bool {
        signature.matches(&self.required, &self.excluded)
    }
}

/// Tracks every registered system and keeps each one's entity set current.
#[derive(Default)]
pub struct SystemRegistry {
    systems: Vec<SystemEntry>,
}

impl SystemRegistry {
    /// Registers a new system requiring `required` and excluding `excluded`.
    /// Returns the assigned `SystemId` (registration order, per §4.1).
    pub fn register(&mut self, required: Signature, excluded: Signature) -> SystemId {
        let id = SystemId(self.systems.len() as u32);
        self.systems.push(SystemEntry {
            required,
            excluded,
            entities: BTreeSet::new(),
        });
        id
    }

    /// Re-evaluates every system's membership for `entity` against its new
    /// `signature`, adding or evicting it as needed. Called after every
    /// `add`/`remove`/`destroy` (§4.1: "notifies every system ... whose
    /// signature now matches"; "removal ... may evict e from multiple
    /// systems").
    pub fn notify_signature_changed(&mut self, entity: Entity, signature: &Signature) {
        for system in &mut self.systems {
            if system.matches(signature) {
                system.entities.insert(entity);
            } else {
                system.entities.remove(&entity);
            }
        }
    }

    /// Removes `entity` from every system's set unconditionally. Called on
    /// `destroy_entity`, after component removal has already driven the
    /// signature to empty.
    pub fn notify_destroyed(&mut self, entity: Entity) {
        for system in &mut self.systems {
            system.entities.remove(&entity);
        }
    }

    /// Returns the entities currently matching `id`, in ascending order.
    pub fn entities(&self, id: SystemId) -> &BTreeSet<Entity> {
        &self.systems[id.0 as usize].entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(bits: &[u32]) -> Signature {
        let mut s = Signature::new();
        for &b in bits {
            s.set(b);
        }
        s
    }

    #[test]
    fn membership_tracks_signature_changes() {
        let mut registry = SystemRegistry::default();
        let id = registry.register(sig(&[0, 1]), Signature::new());

        registry.notify_signature_changed(Entity(0), &sig(&[0]));
        assert!(!registry.entities(id).contains(&Entity(0)));

        registry.notify_signature_changed(Entity(0), &sig(&[0, 1]));
        assert!(registry.entities(id).contains(&Entity(0)));

        registry.notify_signature_changed(Entity(0), &sig(&[1]));
        assert!(!registry.entities(id).contains(&Entity(0)));
    }

    #[test]
    fn destroy_evicts_from_every_system() {
        let mut registry = SystemRegistry::default();
        let id_a = registry.register(sig(&[0]), Signature::new());
        let id_b = registry.register(sig(&[0, 1]), Signature::new());

        registry.notify_signature_changed(Entity(5), &sig(&[0, 1]));
        assert!(registry.entities(id_a).contains(&Entity(5)));
        assert!(registry.entities(id_b).contains(&Entity(5)));

        registry.notify_destroyed(Entity(5));
        assert!(!registry.entities(id_a).contains(&Entity(5)));
        assert!(!registry.entities(id_b).contains(&Entity(5)));
    }
}
