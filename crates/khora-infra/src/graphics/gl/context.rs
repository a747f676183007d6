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

//! Raw GL context and surface creation from a `khora_core` window handle.
//!
//! `khora-core`'s `Window` trait only promises `HasWindowHandle` +
//! `HasDisplayHandle`; it doesn't hand over a `winit::event_loop`, so the
//! context is built directly against the platform display rather than
//! through `glutin-winit`'s `DisplayBuilder` (which wants an event loop to
//! create its own window).

use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::prelude::GlConfig;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use khora_core::error::{EngineError, EngineResult};
use khora_core::platform::window::KhoraWindowHandle;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

/// A current GL context, its swapchain surface, and the `glow` call table
/// loaded against it.
pub struct GlContextBundle {
    pub context: PossiblyCurrentContext,
    pub surface: Surface<WindowSurface>,
    pub gl: glow::Context,
}

/// Creates an OpenGL 4.5 core-profile context bound to `window`'s surface.
pub fn create(window: &KhoraWindowHandle, width: u32, height: u32) -> EngineResult<GlContextBundle> {
    let display_handle = window
        .display_handle()
        .map_err(|err| EngineError::ApiInitFailed(format!("no display handle: {err}")))?
        .as_raw();
    let window_handle = window
        .window_handle()
        .map_err(|err| EngineError::ApiInitFailed(format!("no window handle: {err}")))?
        .as_raw();

    let preference = display_preference(window_handle);

    // SAFETY: `display_handle` and `window_handle` outlive this call; the
    // resulting `Display`/`Config` only borrow from them for the duration of
    // context creation, not beyond it.
    let display = unsafe { Display::new(display_handle, preference) }
        .map_err(|err| EngineError::ApiInitFailed(format!("failed to open GL display: {err}")))?;

    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(24)
        .with_stencil_size(8)
        .compatible_with_native_window(window_handle)
        .build();

    // SAFETY: `template` only names requirements; `find_configs` does not
    // retain the window handle past this call.
    let config = unsafe { display.find_configs(template) }
        .map_err(|err| EngineError::ApiInitFailed(format!("no compatible GL config: {err}")))?
        .reduce(pick_best_config)
        .ok_or_else(|| EngineError::ApiInitFailed("no GL config matched the surface".to_string()))?;

    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
        .build(Some(window_handle));

    // SAFETY: `window_handle` is valid for the lifetime of the window, which
    // outlives the device.
    let not_current = unsafe { display.create_context(&config, &context_attributes) }
        .map_err(|err| EngineError::ApiInitFailed(format!("failed to create GL context: {err}")))?;

    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle,
        NonZeroU32::new(width.max(1)).unwrap(),
        NonZeroU32::new(height.max(1)).unwrap(),
    );

    // SAFETY: `window_handle` names a live, compatible native window.
    let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
        .map_err(|err| EngineError::ApiInitFailed(format!("failed to create GL surface: {err}")))?;

    let context = not_current
        .make_current(&surface)
        .map_err(|err| EngineError::ApiInitFailed(format!("failed to make GL context current: {err}")))?;

    // SAFETY: `context` is current on this thread for the lifetime of `gl`.
    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            display.get_proc_address(&symbol) as *const _
        })
    };

    Ok(GlContextBundle { context, surface, gl })
}

fn pick_best_config(accum: Config, candidate: Config) -> Config {
    if candidate.num_samples() > accum.num_samples() {
        candidate
    } else {
        accum
    }
}

#[cfg(target_os = "windows")]
fn display_preference(window_handle: raw_window_handle::RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(Some(window_handle))
}

#[cfg(target_os = "macos")]
fn display_preference(_window_handle: raw_window_handle::RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_preference(_window_handle: raw_window_handle::RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}
