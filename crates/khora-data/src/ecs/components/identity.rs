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

//! `Name` and `Uuid` (§3): a human label and a 128-bit stable identifier,
//! kept as separate components since most entities need one but not both.

use khora_core::ecs::Component;
use serde::{Deserialize, Serialize};

/// A human-readable label for an entity, used by editors and logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Component for Name {}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A stable, persistent identifier for an entity, independent of its
/// transient `Entity` index (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uuid(pub uuid::Uuid);

impl Component for Uuid {}

impl Uuid {
    /// Generates a new random (v4) identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_str() {
        assert_eq!(Name::from("camera"), Name("camera".to_owned()));
    }

    #[test]
    fn fresh_uuids_are_distinct() {
        assert_ne!(Uuid::new(), Uuid::new());
    }
}
