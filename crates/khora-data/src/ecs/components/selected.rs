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

//! `Selected` (§4.6): a zero-sized marker tagging an entity for the outline
//! pass. Editors attach and remove it; it carries no state of its own and
//! is never persisted.

use khora_core::ecs::Component;

/// Marks an entity to receive an extra outline draw command this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selected;

impl Component for Selected {}
