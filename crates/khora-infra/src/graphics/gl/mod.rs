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

//! The OpenGL 4.5 core profile reference `GraphicsDevice` backend (§6).
//!
//! Built on `glutin`/`glutin-winit` for context creation and `glow` for the
//! GL call surface, matching the stack `FyroxEngine` uses for the same job.

mod context;
mod device;
mod resources;
mod shader_source;

pub use device::GlDevice;
pub use shader_source::shader_source;
