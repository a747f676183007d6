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

//! The per-component save/restore contract (§6).
//!
//! The coordinator persists nothing itself; a component opts into
//! serialization by implementing `Memento`. `Data` contains exactly the
//! fields listed in §3 for that component, not the component's runtime-only
//! fields (a `Camera`'s owned pipeline/framebuffer, for instance, are live
//! GPU resources, not persisted state).

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A component that can be captured as a serializable snapshot and restored
/// from one.
pub trait Memento {
    /// The serializable snapshot type.
    type Data: Serialize + DeserializeOwned;

    /// Captures this component's persisted fields.
    fn save(&self) -> Self::Data;

    /// Reconstructs a component from a previously saved snapshot.
    fn restore(data: Self::Data) -> Self;
}
