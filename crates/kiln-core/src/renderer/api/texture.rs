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

//! Defines data structures related to textures and pixel payloads.

/// Pixel format of a texture or pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// One 8-bit channel.
    R8,
    /// Two 8-bit channels.
    Rg8,
    /// Three 8-bit channels.
    Rgb8,
    /// Four 8-bit channels.
    #[default]
    Rgba8,
    /// Four 16-bit float channels.
    Rgba16Float,
    /// Four 32-bit float channels.
    Rgba32Float,
    /// 24-bit depth.
    Depth24,
    /// 32-bit float depth.
    Depth32Float,
}

impl TextureFormat {
    /// Size of one pixel in bytes.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::Rg8 => 2,
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
            TextureFormat::Rgba16Float => 8,
            TextureFormat::Rgba32Float => 16,
            TextureFormat::Depth24 => 3,
            TextureFormat::Depth32Float => 4,
        }
    }

    /// Whether this is a depth format.
    pub const fn is_depth(self) -> bool {
        matches!(self, TextureFormat::Depth24 | TextureFormat::Depth32Float)
    }
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear.
    #[default]
    Linear,
    /// Nearest texel of the nearest mipmap.
    NearestMipmapNearest,
    /// Nearest texel, blended between mipmaps.
    NearestMipmapLinear,
    /// Bilinear on the nearest mipmap.
    LinearMipmapNearest,
    /// Trilinear.
    LinearMipmapLinear,
}

/// Addressing outside the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureWrapMode {
    /// Clamp to the edge texel.
    Clamp,
    /// Mirror at every integer boundary.
    Mirror,
    /// Wrap around.
    #[default]
    Repeat,
}

/// Minification and magnification filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureFilter {
    /// Minification filter.
    pub min: TextureFilterMode,
    /// Magnification filter.
    pub mag: TextureFilterMode,
}

/// Wrap modes along S and T.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureWrap {
    /// Horizontal wrap mode.
    pub s: TextureWrapMode,
    /// Vertical wrap mode.
    pub t: TextureWrapMode,
}

/// Everything needed to create a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureParams {
    /// Width of mip level 0.
    pub width: u32,
    /// Height of mip level 0.
    pub height: u32,
    /// Pixel format.
    pub format: TextureFormat,
    /// Sampling filters.
    pub filter: TextureFilter,
    /// Wrap modes.
    pub wrap: TextureWrap,
    /// Number of mip levels, including level 0.
    pub mipmaps: u32,
    /// Maximum anisotropy; `1` disables anisotropic filtering.
    pub anisotropy: u32,
    /// Hint that the texture is updated every frame.
    pub stream: bool,
}

impl TextureParams {
    /// A single-level texture with default sampling.
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            filter: TextureFilter::default(),
            wrap: TextureWrap::default(),
            mipmaps: 1,
            anisotropy: 1,
            stream: false,
        }
    }

    /// Dimensions of mip level `mipmap`; each level halves, never below 1.
    pub fn mip_size(&self, mipmap: u32) -> (u32, u32) {
        let shrink = |v: u32| v.checked_shr(mipmap).unwrap_or(0).max(1);
        (shrink(self.width), shrink(self.height))
    }
}

/// An image in CPU memory. The pixel bytes are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format of `data`.
    pub format: TextureFormat,
    /// Tightly packed rows, top to bottom.
    pub data: Vec<u8>,
}

impl Pixmap {
    /// Allocates a zero-filled pixmap.
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_sizes_halve_and_clamp() {
        let params = TextureParams::new(256, 64, TextureFormat::Rgba8);
        assert_eq!(params.mip_size(0), (256, 64));
        assert_eq!(params.mip_size(2), (64, 16));
        assert_eq!(params.mip_size(7), (2, 1));
        assert_eq!(params.mip_size(40), (1, 1));
    }

    #[test]
    fn pixmap_allocation_matches_format() {
        let p = Pixmap::new(4, 2, TextureFormat::Rgb8);
        assert_eq!(p.data.len(), 24);
        assert!(TextureFormat::Depth24.is_depth());
    }
}
