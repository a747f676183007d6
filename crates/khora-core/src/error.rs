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

//! The flat error taxonomy shared by every crate in the rendering core.
//!
//! Every operation that can fail returns a `Result<_, EngineError>` (or a
//! `Result` over one of the leaf enums below, convertible via `From`). There
//! is no recovery policy inside the core: callers either log and continue
//! with the last good frame (steady-state errors) or propagate to `main` and
//! abort (startup errors), per the propagation policy of the rendering core.

use std::fmt;

/// A single, flat error kind covering every failure mode the rendering core
/// can produce.
#[derive(Debug)]
pub enum EngineError {
    /// No graphics backend was selected at build/init time.
    UnknownApi,
    /// An operation was attempted before the graphics API was initialized.
    ApiNotInitialized,
    /// The graphics API failed to initialize.
    ApiInitFailed(String),
    /// The window failed to initialize.
    WindowInitFailed(String),
    /// A shader stage failed to compile or link.
    ShaderCreationFailed {
        /// Path or label of the offending shader source.
        source: String,
        /// Human-readable reason.
        reason: String,
        /// Line number within the source, if known.
        line: Option<u32>,
    },
    /// `set(name, ..)` referenced a uniform the shader does not reflect.
    ShaderInvalidUniform {
        /// The shader's debug label.
        shader: String,
        /// The uniform name that was not found.
        uniform: String,
    },
    /// A vertex buffer layout with zero attributes was supplied.
    BufferLayoutEmpty,
    /// A framebuffer failed to allocate its attachments.
    FramebufferCreationFailed(String),
    /// A requested color attachment format is not supported.
    FramebufferUnsupportedColorFormat(String),
    /// A requested depth/stencil format is not supported.
    FramebufferUnsupportedDepthFormat(String),
    /// `resize` was called with an invalid size.
    FramebufferResizeFailed {
        /// `true` if the requested size was zero; `false` if it exceeded the
        /// backend's maximum viewport dimensions.
        too_big: bool,
    },
    /// An attachment index was out of range.
    FramebufferInvalidIndex,
    /// A pixel read or clear failed (format mismatch or backend failure).
    FramebufferReadFailed(String),
    /// A texture's pixel format is not supported.
    TextureUnsupportedFormat(String),
    /// Uploaded pixel data did not match `width * height * channels`.
    TextureSizeMismatch,
    /// A texture was constructed with an invalid (zero) size.
    TextureInvalidSize,
    /// An operation was attempted before the renderer was initialized.
    RendererNotInitialized,
    /// A renderer scene lifecycle method was called out of order (e.g. draw
    /// before begin-scene).
    RendererSceneLifecycleFailure(String),
    /// A pipeline was executed without a target framebuffer.
    PipelineNoRenderTarget,
    /// A pipeline's pass graph contains a cycle.
    PipelineCycle,
    /// `add::<T>(e, v)` was called but `e` already has a component of type `T`.
    ComponentAlreadyPresent,
    /// `remove::<T>(e)` was called but `e` has no component of type `T`.
    ComponentAbsent,
    /// `create_entity` was called with every id already live, up to the
    /// configured entity cap.
    EntityLimitReached,
    /// A generic out-of-range index.
    OutOfRange,
    /// A generic validation failure.
    InvalidValue(String),
    /// A referenced file does not exist.
    FileNotFound(String),
    /// The `stb_image`-equivalent decoder failed to load an image.
    ImageLoadFailed(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownApi => write!(f, "no graphics backend is configured"),
            EngineError::ApiNotInitialized => write!(f, "graphics API is not initialized"),
            EngineError::ApiInitFailed(msg) => write!(f, "graphics API init failed: {msg}"),
            EngineError::WindowInitFailed(msg) => write!(f, "window init failed: {msg}"),
            EngineError::ShaderCreationFailed { source, reason, line } => match line {
                Some(line) => write!(f, "shader '{source}' failed at line {line}: {reason}"),
                None => write!(f, "shader '{source}' failed: {reason}"),
            },
            EngineError::ShaderInvalidUniform { shader, uniform } => {
                write!(f, "shader '{shader}' has no uniform named '{uniform}'")
            }
            EngineError::BufferLayoutEmpty => write!(f, "vertex buffer layout has no attributes"),
            EngineError::FramebufferCreationFailed(msg) => {
                write!(f, "framebuffer creation failed: {msg}")
            }
            EngineError::FramebufferUnsupportedColorFormat(msg) => {
                write!(f, "unsupported color attachment format: {msg}")
            }
            EngineError::FramebufferUnsupportedDepthFormat(msg) => {
                write!(f, "unsupported depth/stencil format: {msg}")
            }
            EngineError::FramebufferResizeFailed { too_big } => {
                if *too_big {
                    write!(f, "framebuffer resize failed: exceeds max viewport size")
                } else {
                    write!(f, "framebuffer resize failed: zero or negative dimension")
                }
            }
            EngineError::FramebufferInvalidIndex => write!(f, "framebuffer attachment index out of range"),
            EngineError::FramebufferReadFailed(msg) => write!(f, "framebuffer read failed: {msg}"),
            EngineError::TextureUnsupportedFormat(msg) => write!(f, "unsupported texture format: {msg}"),
            EngineError::TextureSizeMismatch => write!(f, "texture pixel data size mismatch"),
            EngineError::TextureInvalidSize => write!(f, "texture has an invalid (zero) size"),
            EngineError::RendererNotInitialized => write!(f, "renderer is not initialized"),
            EngineError::RendererSceneLifecycleFailure(msg) => {
                write!(f, "renderer scene lifecycle violation: {msg}")
            }
            EngineError::PipelineNoRenderTarget => write!(f, "pipeline has no target framebuffer"),
            EngineError::PipelineCycle => write!(f, "pipeline pass graph contains a cycle"),
            EngineError::ComponentAlreadyPresent => {
                write!(f, "entity already has a component of this type")
            }
            EngineError::ComponentAbsent => write!(f, "entity has no component of this type"),
            EngineError::EntityLimitReached => write!(f, "entity limit reached"),
            EngineError::OutOfRange => write!(f, "index out of range"),
            EngineError::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
            EngineError::FileNotFound(path) => write!(f, "file not found: {path}"),
            EngineError::ImageLoadFailed(msg) => write!(f, "image decode failed: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Convenience alias used throughout the rendering core.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_creation_failed_displays_line_when_known() {
        let err = EngineError::ShaderCreationFailed {
            source: "basic.glsl".into(),
            reason: "unexpected token".into(),
            line: Some(12),
        };
        assert_eq!(
            format!("{err}"),
            "shader 'basic.glsl' failed at line 12: unexpected token"
        );
    }

    #[test]
    fn framebuffer_resize_failed_distinguishes_cause() {
        assert!(format!("{}", EngineError::FramebufferResizeFailed { too_big: true })
            .contains("exceeds"));
        assert!(format!("{}", EngineError::FramebufferResizeFailed { too_big: false })
            .contains("zero or negative"));
    }
}
