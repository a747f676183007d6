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

//! A `winit`-based implementation of the engine's `Window` trait.
//!
//! `winit` 0.30 drives windows through an `ApplicationHandler` the event
//! loop calls back into, rather than handing control to the caller. Since
//! `Window::on_update` must return to the caller every frame, `WinitWindow`
//! implements `ApplicationHandler` on itself and drains pending events with
//! `pump_app_events` each call, matching how a game with its own frame loop
//! is expected to use `winit`'s pump-events extension.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use khora_core::error::{EngineError, EngineResult};
use khora_core::platform::window::{KeyEvent, KhoraWindowHandle, MouseButtonEvent, Window};
use raw_window_handle::{DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as NativeWindow, WindowId};

/// A `winit`-backed `Window`. Owns the event loop and pumps it to
/// completion (with a zero timeout) on every `on_update` call.
pub struct WinitWindow {
    event_loop: Option<EventLoop<()>>,
    window: Option<Arc<NativeWindow>>,
    title: String,
    initial_size: (u32, u32),
    is_open: bool,
    resize_callback: Option<Box<dyn FnMut(u32, u32) + Send>>,
    close_callback: Option<Box<dyn FnMut() + Send>>,
    key_callback: Option<Box<dyn FnMut(KeyEvent) + Send>>,
    mouse_button_callback: Option<Box<dyn FnMut(MouseButtonEvent) + Send>>,
    scroll_callback: Option<Box<dyn FnMut(f32, f32) + Send>>,
    cursor_move_callback: Option<Box<dyn FnMut(f64, f64) + Send>>,
    drop_callback: Option<Box<dyn FnMut(Vec<std::path::PathBuf>) + Send>>,
}

impl WinitWindow {
    /// Creates a window that will open at `width`x`height` with `title` once
    /// `init` runs.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            event_loop: None,
            window: None,
            title: title.into(),
            initial_size: (width, height),
            is_open: false,
            resize_callback: None,
            close_callback: None,
            key_callback: None,
            mouse_button_callback: None,
            scroll_callback: None,
            cursor_move_callback: None,
            drop_callback: None,
        }
    }

    fn pump(&mut self, timeout: Duration) {
        let Some(mut event_loop) = self.event_loop.take() else {
            return;
        };
        let status = event_loop.pump_app_events(Some(timeout), self);
        if matches!(status, PumpStatus::Exit(_)) {
            self.is_open = false;
        } else {
            self.event_loop = Some(event_loop);
        }
    }

    fn window_or_panic(&self) -> &NativeWindow {
        self.window
            .as_deref()
            .expect("WinitWindow::init must run before this call")
    }
}

impl ApplicationHandler for WinitWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = NativeWindow::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.initial_size.0, self.initial_size.1))
            .with_visible(true);

        match event_loop.create_window(attributes) {
            Ok(window) => {
                log::info!("winit window created (id: {:?})", window.id());
                self.window = Some(Arc::new(window));
                self.is_open = true;
            }
            Err(err) => log::error!("failed to create winit window: {err}"),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.is_open = false;
                if let Some(callback) = self.close_callback.as_mut() {
                    callback();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(callback) = self.resize_callback.as_mut() {
                    callback(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    let event = KeyEvent {
                        key_code: hash_key_code(code),
                        pressed: key_event.state == ElementState::Pressed,
                    };
                    if key_event.state == ElementState::Pressed && key_event.repeat {
                        return;
                    }
                    if let Some(callback) = self.key_callback.as_mut() {
                        callback(event);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let event = MouseButtonEvent {
                    button: mouse_button_index(button),
                    pressed: state == ElementState::Pressed,
                };
                if let Some(callback) = self.mouse_button_callback.as_mut() {
                    callback(event);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(callback) = self.cursor_move_callback.as_mut() {
                    callback(position.x, position.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy): (f32, f32) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
                };
                if let Some(callback) = self.scroll_callback.as_mut() {
                    callback(dx, dy);
                }
            }
            WindowEvent::DroppedFile(path) => {
                if let Some(callback) = self.drop_callback.as_mut() {
                    callback(vec![path]);
                }
            }
            _ => {}
        }
    }
}

fn hash_key_code(code: winit::keyboard::KeyCode) -> u32 {
    let mut hasher = DefaultHasher::new();
    code.hash(&mut hasher);
    hasher.finish() as u32
}

fn mouse_button_index(button: WinitMouseButton) -> u8 {
    match button {
        WinitMouseButton::Left => 0,
        WinitMouseButton::Right => 1,
        WinitMouseButton::Middle => 2,
        WinitMouseButton::Back => 3,
        WinitMouseButton::Forward => 4,
        WinitMouseButton::Other(id) => id.min(u8::MAX as u16) as u8,
    }
}

impl HasWindowHandle for WinitWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.window_or_panic().window_handle()
    }
}

impl HasDisplayHandle for WinitWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.window_or_panic().display_handle()
    }
}

impl Window for WinitWindow {
    fn init(&mut self) -> EngineResult<()> {
        let event_loop = EventLoop::new().map_err(|err| EngineError::WindowInitFailed(err.to_string()))?;
        self.event_loop = Some(event_loop);
        self.pump(Duration::ZERO);
        if self.window.is_none() {
            return Err(EngineError::WindowInitFailed(
                "winit did not resume the event loop during init".to_string(),
            ));
        }
        Ok(())
    }

    fn on_update(&mut self) {
        self.pump(Duration::ZERO);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn width(&self) -> u32 {
        self.window
            .as_ref()
            .map(|w| w.inner_size().width)
            .unwrap_or(self.initial_size.0)
    }

    fn height(&self) -> u32 {
        self.window
            .as_ref()
            .map(|w| w.inner_size().height)
            .unwrap_or(self.initial_size.1)
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn close(&mut self) {
        self.is_open = false;
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map(|w| w.scale_factor()).unwrap_or(1.0)
    }

    fn clone_handle_arc(&self) -> KhoraWindowHandle {
        self.window.clone().expect("WinitWindow::init must run before this call")
    }

    fn id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.window_or_panic().id().hash(&mut hasher);
        hasher.finish()
    }

    fn set_resize_callback(&mut self, callback: Box<dyn FnMut(u32, u32) + Send>) {
        self.resize_callback = Some(callback);
    }

    fn set_close_callback(&mut self, callback: Box<dyn FnMut() + Send>) {
        self.close_callback = Some(callback);
    }

    fn set_key_callback(&mut self, callback: Box<dyn FnMut(KeyEvent) + Send>) {
        self.key_callback = Some(callback);
    }

    fn set_mouse_button_callback(&mut self, callback: Box<dyn FnMut(MouseButtonEvent) + Send>) {
        self.mouse_button_callback = Some(callback);
    }

    fn set_scroll_callback(&mut self, callback: Box<dyn FnMut(f32, f32) + Send>) {
        self.scroll_callback = Some(callback);
    }

    fn set_cursor_move_callback(&mut self, callback: Box<dyn FnMut(f64, f64) + Send>) {
        self.cursor_move_callback = Some(callback);
    }

    fn set_drop_callback(&mut self, callback: Box<dyn FnMut(Vec<std::path::PathBuf>) + Send>) {
        self.drop_callback = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_button_mapping_matches_convention() {
        assert_eq!(mouse_button_index(WinitMouseButton::Left), 0);
        assert_eq!(mouse_button_index(WinitMouseButton::Right), 1);
        assert_eq!(mouse_button_index(WinitMouseButton::Middle), 2);
        assert_eq!(mouse_button_index(WinitMouseButton::Other(9)), 9);
    }
}
