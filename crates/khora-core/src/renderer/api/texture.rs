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

//! 2D textures (§3, §6).

use super::arena::Handle;

/// The internal pixel format of a [`Texture2D`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// One 8-bit unsigned-normalized channel.
    R8,
    /// Two 8-bit unsigned-normalized channels.
    Rg8,
    /// Two channels (grey + alpha) uploaded under an `RG16` internal format.
    /// Matches the decoder's historical (and slightly misnamed) treatment
    /// of 2-channel images; see `decode_dynamic_image`.
    Rg16,
    /// Three 8-bit unsigned-normalized channels.
    Rgb8,
    /// Four 8-bit unsigned-normalized channels.
    Rgba8,
}

impl TextureFormat {
    /// Number of channels this format packs per texel.
    pub fn channels(self) -> u32 {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::Rg8 | TextureFormat::Rg16 => 2,
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Maps a decoded image's channel count to the matching format.
    /// Returns `None` for channel counts the decoder does not support
    /// (§6: `texture-unsupported-format`).
    pub fn from_channel_count(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(TextureFormat::R8),
            2 => Some(TextureFormat::Rg16),
            3 => Some(TextureFormat::Rgb8),
            4 => Some(TextureFormat::Rgba8),
            _ => None,
        }
    }
}

/// How a [`Texture2D`] is constructed (§6).
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// An uninitialized RGBA8 texture of the given size.
    Empty { width: u32, height: u32 },
    /// A raw, already-decoded pixel buffer.
    Raw {
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: Vec<u8>,
    },
    /// The bytes of a standard image file (PNG/JPEG), to be decoded by the
    /// backend's image loader.
    EncodedBytes(Vec<u8>),
    /// A filesystem path to a standard image file.
    Path(String),
}

/// Marker type for [`Handle<Texture2D>`].
#[derive(Debug)]
pub struct Texture2D;
/// A reference-counted handle to a GPU 2D texture.
pub type Texture2DHandle = Handle<Texture2D>;

/// The resolved, backend-independent description of a live texture: the
/// values a `Texture2D` carries per §3 once constructed.
#[derive(Debug, Clone)]
pub struct Texture2DDescriptor {
    /// Texture width in texels.
    pub width: u32,
    /// Texture height in texels.
    pub height: u32,
    /// Internal pixel format.
    pub format: TextureFormat,
    /// The path the texture was loaded from, if any.
    pub source_path: Option<String>,
}

impl Texture2DDescriptor {
    /// Expected byte length of a pixel buffer matching this descriptor's
    /// dimensions and format (§3's `uploaded pixel-data size` invariant).
    pub fn expected_pixel_bytes(&self) -> usize {
        self.width as usize * self.height as usize * self.format.channels() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_pixel_bytes_matches_format_channels() {
        let desc = Texture2DDescriptor {
            width: 4,
            height: 2,
            format: TextureFormat::Rgba8,
            source_path: None,
        };
        assert_eq!(desc.expected_pixel_bytes(), 4 * 2 * 4);
    }

    #[test]
    fn unsupported_channel_count_is_rejected() {
        assert!(TextureFormat::from_channel_count(5).is_none());
        assert_eq!(TextureFormat::from_channel_count(3), Some(TextureFormat::Rgb8));
    }
}
