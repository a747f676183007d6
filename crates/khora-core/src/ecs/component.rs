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

/// A marker trait for types that can be used as components in the ECS.
///
/// This trait must be implemented for any struct attached to an entity.
/// `'static` ensures components hold no non-static references; `Send + Sync`
/// lets component stores be shared across the engine's subsystems even
/// though all mutation happens on the single main thread.
pub trait Component: 'static + Send + Sync {}

/// A marker trait for singleton components: components with exactly one
/// instance for the lifetime of the coordinator (§3).
pub trait Singleton: 'static + Send + Sync + Default {}
