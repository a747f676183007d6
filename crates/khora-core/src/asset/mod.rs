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

//! Opaque asset handles.
//!
//! The rendering core never loads assets itself (§1, out of scope). Meshes,
//! materials, and textures referenced by ECS components are treated as
//! reference-counted, opaque handles owned by an external asset loader; this
//! module defines the handle type those components hold.

mod handle;
mod uuid;

pub use handle::*;
pub use uuid::*;

/// A marker trait for types that can be managed by the asset system.
///
/// To be considered an asset, a type must be thread-safe (`Send + Sync`)
/// and have a static lifetime (`'static`).
pub trait Asset: Send + Sync + 'static {}
