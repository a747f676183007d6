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

//! Provides a collection of general-purpose utilities for the Khora Engine.
//!
//! This module contains various helper components, macros, and functions that are
//! widely used across different engine crates but are not specific to any single
//! domain like mathematics or rendering.

pub mod bitflags;
pub mod timer;
