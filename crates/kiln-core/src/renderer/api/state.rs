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

//! Fixed-function pipeline state: capabilities, culling, depth testing, vsync.

use serde::{Deserialize, Serialize};

/// An independently toggleable pipeline feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererCapability {
    /// Fragments are tested against the depth buffer.
    DepthTest,
    /// Fragments that pass write their depth.
    DepthWrite,
    /// Faces selected by the cull mode are discarded.
    CullFace,
}

impl RendererCapability {
    /// All capabilities.
    pub const ALL: [RendererCapability; 3] = [
        RendererCapability::DepthTest,
        RendererCapability::DepthWrite,
        RendererCapability::CullFace,
    ];
}

/// The set of enabled [`RendererCapability`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilityBits {
    bits: u32,
}

impl CapabilityBits {
    /// No capability enabled.
    pub const NONE: Self = Self { bits: 0 };
    /// Depth testing.
    pub const DEPTH_TEST: Self = Self { bits: 1 << 0 };
    /// Depth writes.
    pub const DEPTH_WRITE: Self = Self { bits: 1 << 1 };
    /// Face culling.
    pub const CULL_FACE: Self = Self { bits: 1 << 2 };

    /// Creates a set from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Creates a set holding a single capability.
    pub const fn from_capability(cap: RendererCapability) -> Self {
        match cap {
            RendererCapability::DepthTest => Self::DEPTH_TEST,
            RendererCapability::DepthWrite => Self::DEPTH_WRITE,
            RendererCapability::CullFace => Self::CULL_FACE,
        }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Removes every capability of `other` from this set.
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns a copy with `cap` switched on or off.
    pub const fn with(self, cap: RendererCapability, enabled: bool) -> Self {
        let bit = Self::from_capability(cap);
        if enabled {
            self.union(bit)
        } else {
            self.difference(bit)
        }
    }

    /// Checks whether `cap` is enabled.
    pub const fn contains(&self, cap: RendererCapability) -> bool {
        let bit = Self::from_capability(cap).bits;
        (self.bits & bit) == bit
    }

    /// Checks whether no capability is enabled.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for CapabilityBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for CapabilityBits {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl FromIterator<RendererCapability> for CapabilityBits {
    fn from_iter<I: IntoIterator<Item = RendererCapability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |acc, cap| acc.with(cap, true))
    }
}

/// Which faces are discarded when [`RendererCapability::CullFace`] is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullFaceMode {
    /// Back faces.
    #[default]
    Back,
    /// Front faces.
    Front,
    /// Both faces.
    Both,
}

/// Comparison used by the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthTestFunc {
    /// Never passes.
    Never,
    /// Always passes.
    Always,
    /// Passes if the incoming depth equals the stored depth.
    Equal,
    /// Passes if the incoming depth differs from the stored depth.
    NotEqual,
    /// Passes if the incoming depth is less than the stored depth.
    Less,
    /// Passes if the incoming depth is less than or equal to the stored depth.
    #[default]
    LessEqual,
    /// Passes if the incoming depth is greater than the stored depth.
    Greater,
    /// Passes if the incoming depth is greater than or equal to the stored depth.
    GreaterEqual,
}

/// Presentation synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VsyncMode {
    /// Present immediately.
    None,
    /// Wait for vertical blank.
    #[default]
    Normal,
    /// Wait for vertical blank unless the frame is late.
    Adaptive,
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// One point per vertex.
    Points,
    /// A connected line strip.
    LineStrip,
    /// A closed line strip.
    LineLoop,
    /// One line per two vertices.
    Lines,
    /// A connected triangle strip.
    TriangleStrip,
    /// One triangle per three vertices.
    Triangles,
}

/// Optional backend features that may be queried with `supports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererFeature {
    /// Instanced draws.
    DrawInstanced,
    /// Instanced draws with a non-zero base instance.
    DrawInstancedBaseInstance,
    /// Depth textures usable as framebuffer attachments.
    DepthTexture,
    /// Framebuffers with more than one color output.
    FramebufferMultipleOutputs,
    /// Texture coordinates originate at the bottom-left corner.
    TextureBottomLeftOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_toggles_single_bit() {
        let caps = CapabilityBits::NONE
            .with(RendererCapability::DepthTest, true)
            .with(RendererCapability::CullFace, true);
        assert!(caps.contains(RendererCapability::DepthTest));
        assert!(!caps.contains(RendererCapability::DepthWrite));

        let caps = caps.with(RendererCapability::DepthTest, false);
        assert_eq!(caps, CapabilityBits::CULL_FACE);
        assert_eq!(caps.with(RendererCapability::DepthTest, false), caps);
    }

    #[test]
    fn collect_from_capabilities() {
        let caps: CapabilityBits = RendererCapability::ALL.into_iter().collect();
        assert_eq!(
            caps,
            CapabilityBits::DEPTH_TEST | CapabilityBits::DEPTH_WRITE | CapabilityBits::CULL_FACE
        );
        assert!(CapabilityBits::default().is_empty());
    }
}
