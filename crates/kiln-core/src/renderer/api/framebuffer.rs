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

//! Framebuffer attachment points, clear flags and viewports.

/// Where a texture is attached to a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferAttachment {
    /// First color output.
    Color0,
    /// Second color output.
    Color1,
    /// Third color output.
    Color2,
    /// Fourth color output.
    Color3,
    /// Depth output.
    Depth,
}

impl FramebufferAttachment {
    /// All attachment points.
    pub const ALL: [FramebufferAttachment; 5] = [
        FramebufferAttachment::Color0,
        FramebufferAttachment::Color1,
        FramebufferAttachment::Color2,
        FramebufferAttachment::Color3,
        FramebufferAttachment::Depth,
    ];
}

/// Which buffers a clear operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearBufferFlags {
    bits: u8,
}

impl ClearBufferFlags {
    /// The color buffers.
    pub const COLOR: Self = Self { bits: 1 << 0 };
    /// The depth buffer.
    pub const DEPTH: Self = Self { bits: 1 << 1 };
    /// Color and depth.
    pub const ALL: Self = Self {
        bits: Self::COLOR.bits | Self::DEPTH.bits,
    };

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Checks if every flag of `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }
}

impl std::ops::BitOr for ClearBufferFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// An axis-aligned rectangle in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl FloatRect {
    /// Creates a rectangle.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_all_covers_color_and_depth() {
        assert!(ClearBufferFlags::ALL.contains(ClearBufferFlags::COLOR));
        assert!(ClearBufferFlags::ALL.contains(ClearBufferFlags::DEPTH));
        assert!(!ClearBufferFlags::COLOR.contains(ClearBufferFlags::DEPTH));
        assert_eq!(ClearBufferFlags::COLOR | ClearBufferFlags::DEPTH, ClearBufferFlags::ALL);
    }
}
