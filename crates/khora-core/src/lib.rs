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

//! # Khora Core
//!
//! Foundational crate containing the ECS primitives, the GPU resource
//! layer's backend-agnostic contract, math, and the other traits and core
//! types the rendering engine is built from. `khora-core` itself owns no
//! storage and drives no window: the ECS coordinator lives in `khora-data`,
//! the OpenGL backend and windowing in `khora-infra`.

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod ecs;
pub mod error;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod utils;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use utils::timer::Stopwatch;
