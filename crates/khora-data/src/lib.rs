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

//! # Khora Data
//!
//! The sparse-set ECS storage: entity allocation, dense per-type component
//! stores, systems, groups/partitions, singleton components, the event
//! queue, and the core scene components (transform, camera, light,
//! mesh/material references, billboard, hierarchy, identity) built on top
//! of them.
//!
//! `khora-data` owns the one `Coordinator` instance an application runs;
//! `khora-core` supplies the shared `Entity`/`Signature`/`Component` types
//! this crate's storage is built from.

pub mod ecs;
