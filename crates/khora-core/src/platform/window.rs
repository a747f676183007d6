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

//! Defines the `Window` trait: the boundary between the engine and the
//! host windowing system (§6).
//!
//! The core consumes a `Window`, never creates one; the host application
//! constructs a concrete implementation (the winit-backed one lives in
//! `khora-infra`) and drives it once per frame via [`Window::on_update`].

use crate::error::EngineResult;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::path::PathBuf;
use std::sync::Arc;

/// A marker trait combining the two raw-handle traits so a single
/// `dyn WindowHandle` trait object can be formed.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A thread-safe, reference-counted handle to a window, for passing to a
/// `GraphicsDevice` when creating a render surface.
pub type KhoraWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// A physical key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The backend's raw key code.
    pub key_code: u32,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

/// A mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// The button index (0 = left, 1 = right, 2 = middle, ...).
    pub button: u8,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

type ResizeCallback = Box<dyn FnMut(u32, u32) + Send>;
type CloseCallback = Box<dyn FnMut() + Send>;
type KeyCallback = Box<dyn FnMut(KeyEvent) + Send>;
type MouseButtonCallback = Box<dyn FnMut(MouseButtonEvent) + Send>;
type ScrollCallback = Box<dyn FnMut(f32, f32) + Send>;
type CursorMoveCallback = Box<dyn FnMut(f64, f64) + Send>;
type DropCallback = Box<dyn FnMut(Vec<PathBuf>) + Send>;

/// The windowing contract the engine drives each frame (§6).
///
/// `init` is called once before the main loop starts; `on_update` is called
/// once per frame and is responsible for swapping the render surface and
/// pumping the host event queue, dispatching to whichever callbacks are
/// registered. A `close` request (user-initiated or programmatic) takes
/// effect at the next `on_update` boundary (§5): `is_open` then returns
/// `false` and the application loop exits.
pub trait Window: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Performs backend-specific setup (surface/context creation). Must be
    /// called exactly once, before the first `on_update`.
    fn init(&mut self) -> EngineResult<()>;

    /// Swaps the render surface and pumps pending host events, invoking any
    /// registered callbacks synchronously before returning.
    fn on_update(&mut self);

    /// The inner client area width, in physical pixels.
    fn width(&self) -> u32;

    /// The inner client area height, in physical pixels.
    fn height(&self) -> u32;

    /// Whether the window is still open. Becomes `false` after `close` or
    /// after the host reports the window was closed by the user.
    fn is_open(&self) -> bool;

    /// Requests that the window close at the next `on_update` boundary.
    fn close(&mut self);

    /// The display's scale factor, for HiDPI-aware rendering.
    fn scale_factor(&self) -> f64;

    /// Clones a thread-safe handle usable to create a render surface.
    fn clone_handle_arc(&self) -> KhoraWindowHandle;

    /// A unique identifier for the window.
    fn id(&self) -> u64;

    /// Registers the callback invoked when the window is resized.
    fn set_resize_callback(&mut self, callback: ResizeCallback);

    /// Registers the callback invoked when the window is about to close.
    fn set_close_callback(&mut self, callback: CloseCallback);

    /// Registers the callback invoked on key press/release.
    fn set_key_callback(&mut self, callback: KeyCallback);

    /// Registers the callback invoked on mouse button press/release.
    fn set_mouse_button_callback(&mut self, callback: MouseButtonCallback);

    /// Registers the callback invoked on scroll wheel input.
    fn set_scroll_callback(&mut self, callback: ScrollCallback);

    /// Registers the callback invoked on cursor movement, in physical
    /// pixel coordinates relative to the window's top-left corner.
    fn set_cursor_move_callback(&mut self, callback: CursorMoveCallback);

    /// Registers the callback invoked when files are dropped onto the
    /// window.
    fn set_drop_callback(&mut self, callback: DropCallback);
}
