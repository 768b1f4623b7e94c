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

//! Blend state and its packed single-word encoding.
//!
//! A [`BlendMode`] packs six orthogonal parameters (source/destination factor and
//! operation, for color and for alpha) into one `u64`, one byte per field. The
//! byte offset of each field is the discriminant of [`BlendModeComponent`].
//! Packing makes blend modes `Copy` and comparable in a single instruction,
//! which is what lets the renderer skip redundant blend changes.

use serde::{Deserialize, Serialize};

/// A factor applied to the source or destination term of a blend equation.
///
/// Discriminants start at 1 so that a zeroed field never decodes to a valid factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlendFactor {
    /// `dst.a`
    DstAlpha = 0x1,
    /// `1 - dst.a`
    InvDstAlpha = 0x2,
    /// `dst.rgba`
    DstColor = 0x3,
    /// `1 - dst.rgba`
    InvDstColor = 0x4,
    /// `1 - src.a`
    InvSrcAlpha = 0x5,
    /// `1 - src.rgba`
    InvSrcColor = 0x6,
    /// `1`
    One = 0x7,
    /// `src.a`
    SrcAlpha = 0x8,
    /// `src.rgba`
    SrcColor = 0x9,
    /// `0`
    Zero = 0xA,
}

impl BlendFactor {
    /// Every valid factor, in discriminant order.
    pub const ALL: [BlendFactor; 10] = [
        BlendFactor::DstAlpha,
        BlendFactor::InvDstAlpha,
        BlendFactor::DstColor,
        BlendFactor::InvDstColor,
        BlendFactor::InvSrcAlpha,
        BlendFactor::InvSrcColor,
        BlendFactor::One,
        BlendFactor::SrcAlpha,
        BlendFactor::SrcColor,
        BlendFactor::Zero,
    ];

    /// Decodes a raw field value. Returns `None` for anything outside the enumeration.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0x1 => BlendFactor::DstAlpha,
            0x2 => BlendFactor::InvDstAlpha,
            0x3 => BlendFactor::DstColor,
            0x4 => BlendFactor::InvDstColor,
            0x5 => BlendFactor::InvSrcAlpha,
            0x6 => BlendFactor::InvSrcColor,
            0x7 => BlendFactor::One,
            0x8 => BlendFactor::SrcAlpha,
            0x9 => BlendFactor::SrcColor,
            0xA => BlendFactor::Zero,
            _ => return None,
        })
    }
}

/// The operation combining the weighted source and destination terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlendOp {
    /// `dst + src`
    Add = 0x1,
    /// `dst - src`
    Sub = 0x2,
    /// `src - dst`
    RevSub = 0x3,
    /// `min(dst, src)`
    Min = 0x4,
    /// `max(dst, src)`
    Max = 0x5,
}

impl BlendOp {
    /// Every valid operation, in discriminant order.
    pub const ALL: [BlendOp; 5] = [
        BlendOp::Add,
        BlendOp::Sub,
        BlendOp::RevSub,
        BlendOp::Min,
        BlendOp::Max,
    ];

    /// Decodes a raw field value. Returns `None` for anything outside the enumeration.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0x1 => BlendOp::Add,
            0x2 => BlendOp::Sub,
            0x3 => BlendOp::RevSub,
            0x4 => BlendOp::Min,
            0x5 => BlendOp::Max,
            _ => return None,
        })
    }
}

/// Names one of the six fields of a [`BlendMode`].
///
/// The discriminant is the bit offset of the field inside the packed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlendModeComponent {
    /// The color operation.
    ColorOp = 0x00,
    /// The source color factor.
    SrcColor = 0x08,
    /// The destination color factor.
    DstColor = 0x10,
    /// The alpha operation.
    AlphaOp = 0x18,
    /// The source alpha factor.
    SrcAlpha = 0x20,
    /// The destination alpha factor.
    DstAlpha = 0x28,
}

impl BlendModeComponent {
    /// All six components.
    pub const ALL: [BlendModeComponent; 6] = [
        BlendModeComponent::ColorOp,
        BlendModeComponent::SrcColor,
        BlendModeComponent::DstColor,
        BlendModeComponent::AlphaOp,
        BlendModeComponent::SrcAlpha,
        BlendModeComponent::DstAlpha,
    ];

    #[inline]
    const fn shift(self) -> u32 {
        self as u32
    }

    #[inline]
    const fn is_op(self) -> bool {
        matches!(self, BlendModeComponent::ColorOp | BlendModeComponent::AlphaOp)
    }
}

/// One half (color or alpha) of an unpacked blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendComponent {
    /// The operation combining both terms.
    pub op: BlendOp,
    /// The source factor.
    pub src: BlendFactor,
    /// The destination factor.
    pub dst: BlendFactor,
}

/// All six fields of a [`BlendMode`], decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnpackedBlendMode {
    /// The equation applied to the RGB channels.
    pub color: BlendComponent,
    /// The equation applied to the alpha channel.
    pub alpha: BlendComponent,
}

/// A complete blend configuration packed into a single word.
///
/// Only [`BlendMode::compose`] and the validating [`BlendMode::from_bits`] can
/// build one, so every `BlendMode` in existence decodes to valid enumerations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlendMode(u64);

impl BlendMode {
    /// `src * 1 + dst * 0`, i.e. blending disabled.
    pub const NONE: Self = Self::compose(
        BlendFactor::One,
        BlendFactor::Zero,
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::Zero,
        BlendOp::Add,
    );

    /// Classic straight-alpha blending.
    pub const ALPHA: Self = Self::compose(
        BlendFactor::SrcAlpha,
        BlendFactor::InvSrcAlpha,
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::InvSrcAlpha,
        BlendOp::Add,
    );

    /// Blending for colors with premultiplied alpha.
    pub const PREMUL_ALPHA: Self = Self::compose(
        BlendFactor::One,
        BlendFactor::InvSrcAlpha,
        BlendOp::Add,
        BlendFactor::One,
        BlendFactor::InvSrcAlpha,
        BlendOp::Add,
    );

    /// Additive blending.
    pub const ADD: Self = Self::compose(
        BlendFactor::SrcAlpha,
        BlendFactor::One,
        BlendOp::Add,
        BlendFactor::Zero,
        BlendFactor::One,
        BlendOp::Add,
    );

    /// Subtractive blending (`dst - src`).
    pub const SUB: Self = Self::compose(
        BlendFactor::SrcAlpha,
        BlendFactor::One,
        BlendOp::RevSub,
        BlendFactor::Zero,
        BlendFactor::One,
        BlendOp::RevSub,
    );

    /// Multiplicative (modulate) blending.
    pub const MOD: Self = Self::compose(
        BlendFactor::Zero,
        BlendFactor::SrcColor,
        BlendOp::Add,
        BlendFactor::Zero,
        BlendFactor::SrcAlpha,
        BlendOp::Add,
    );

    /// Packs the six blend parameters into a single word.
    pub const fn compose(
        src_color: BlendFactor,
        dst_color: BlendFactor,
        color_op: BlendOp,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
        alpha_op: BlendOp,
    ) -> Self {
        Self(
            ((color_op as u64) << BlendModeComponent::ColorOp.shift())
                | ((src_color as u64) << BlendModeComponent::SrcColor.shift())
                | ((dst_color as u64) << BlendModeComponent::DstColor.shift())
                | ((alpha_op as u64) << BlendModeComponent::AlphaOp.shift())
                | ((src_alpha as u64) << BlendModeComponent::SrcAlpha.shift())
                | ((dst_alpha as u64) << BlendModeComponent::DstAlpha.shift()),
        )
    }

    /// Uses the same equation for color and alpha.
    pub const fn uniform(src: BlendFactor, dst: BlendFactor, op: BlendOp) -> Self {
        Self::compose(src, dst, op, src, dst, op)
    }

    /// Returns the packed representation.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Rebuilds a blend mode from a packed word.
    ///
    /// Returns `None` if any field does not decode to a valid enumeration value or
    /// if bits outside the six fields are set.
    pub fn from_bits(bits: u64) -> Option<Self> {
        if bits >> 48 != 0 {
            return None;
        }

        let mode = Self(bits);
        let valid = BlendModeComponent::ALL.iter().all(|&comp| {
            let raw = mode.component(comp);
            if comp.is_op() {
                BlendOp::from_raw(raw).is_some()
            } else {
                BlendFactor::from_raw(raw).is_some()
            }
        });

        valid.then_some(mode)
    }

    /// Extracts the raw value of a single field.
    #[inline]
    pub const fn component(self, comp: BlendModeComponent) -> u8 {
        ((self.0 >> comp.shift()) & 0xFF) as u8
    }

    /// Extracts a factor field.
    ///
    /// # Panics
    ///
    /// In debug builds, if `comp` names an operation field.
    pub fn factor(self, comp: BlendModeComponent) -> BlendFactor {
        debug_assert!(!comp.is_op(), "{comp:?} is not a blend factor field");
        match BlendFactor::from_raw(self.component(comp)) {
            Some(factor) => factor,
            None => unreachable!("BlendMode {:#014x} holds an invalid factor", self.0),
        }
    }

    /// Extracts an operation field.
    ///
    /// # Panics
    ///
    /// In debug builds, if `comp` names a factor field.
    pub fn op(self, comp: BlendModeComponent) -> BlendOp {
        debug_assert!(comp.is_op(), "{comp:?} is not a blend operation field");
        match BlendOp::from_raw(self.component(comp)) {
            Some(op) => op,
            None => unreachable!("BlendMode {:#014x} holds an invalid operation", self.0),
        }
    }

    /// Decodes all six fields at once.
    pub fn unpack(self) -> UnpackedBlendMode {
        UnpackedBlendMode {
            color: BlendComponent {
                op: self.op(BlendModeComponent::ColorOp),
                src: self.factor(BlendModeComponent::SrcColor),
                dst: self.factor(BlendModeComponent::DstColor),
            },
            alpha: BlendComponent {
                op: self.op(BlendModeComponent::AlphaOp),
                src: self.factor(BlendModeComponent::SrcAlpha),
                dst: self.factor(BlendModeComponent::DstAlpha),
            },
        }
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Debug for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let u = self.unpack();
        f.debug_struct("BlendMode")
            .field("color", &u.color)
            .field("alpha", &u.alpha)
            .finish()
    }
}

impl From<UnpackedBlendMode> for BlendMode {
    fn from(u: UnpackedBlendMode) -> Self {
        Self::compose(
            u.color.src,
            u.color.dst,
            u.color.op,
            u.alpha.src,
            u.alpha.dst,
            u.alpha.op,
        )
    }
}

impl From<BlendMode> for UnpackedBlendMode {
    fn from(mode: BlendMode) -> Self {
        mode.unpack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_tuples() -> impl Iterator<Item = (BlendFactor, BlendFactor, BlendOp, BlendFactor, BlendFactor, BlendOp)> {
        let f = BlendFactor::ALL;
        let o = BlendOp::ALL;
        f.into_iter().flat_map(move |a| {
            f.into_iter().flat_map(move |b| {
                o.into_iter().flat_map(move |c| {
                    f.into_iter().flat_map(move |d| {
                        f.into_iter()
                            .flat_map(move |e| o.into_iter().map(move |g| (a, b, c, d, e, g)))
                    })
                })
            })
        })
    }

    #[test]
    fn every_valid_tuple_survives_unpack() {
        let mut seen = HashSet::new();

        for (sc, dc, co, sa, da, ao) in all_tuples() {
            let mode = BlendMode::compose(sc, dc, co, sa, da, ao);
            let u = mode.unpack();

            assert_eq!((u.color.src, u.color.dst, u.color.op), (sc, dc, co));
            assert_eq!((u.alpha.src, u.alpha.dst, u.alpha.op), (sa, da, ao));
            assert!(seen.insert(mode.bits()), "duplicate encoding for {mode:?}");
        }

        assert_eq!(seen.len(), 10 * 10 * 5 * 10 * 10 * 5);
    }

    #[test]
    fn fields_occupy_their_own_byte() {
        let mode = BlendMode::compose(
            BlendFactor::SrcAlpha,
            BlendFactor::InvSrcAlpha,
            BlendOp::Max,
            BlendFactor::One,
            BlendFactor::Zero,
            BlendOp::RevSub,
        );

        assert_eq!(mode.component(BlendModeComponent::ColorOp), 0x5);
        assert_eq!(mode.component(BlendModeComponent::SrcColor), 0x8);
        assert_eq!(mode.component(BlendModeComponent::DstColor), 0x5);
        assert_eq!(mode.component(BlendModeComponent::AlphaOp), 0x3);
        assert_eq!(mode.component(BlendModeComponent::SrcAlpha), 0x7);
        assert_eq!(mode.component(BlendModeComponent::DstAlpha), 0xA);
        assert_eq!(mode.bits(), 0x0A_07_03_05_08_05);
    }

    #[test]
    fn from_bits_rejects_invalid_fields() {
        assert_eq!(
            BlendMode::from_bits(BlendMode::ALPHA.bits()),
            Some(BlendMode::ALPHA)
        );
        assert_eq!(BlendMode::from_bits(0), None);
        // Color op set to 6, one past MAX.
        assert_eq!(BlendMode::from_bits(BlendMode::ALPHA.bits() & !0xFF | 0x06), None);
        assert_eq!(BlendMode::from_bits(BlendMode::ALPHA.bits() | 1 << 50), None);
    }

    #[test]
    fn presets_are_distinct() {
        let presets = [
            BlendMode::NONE,
            BlendMode::ALPHA,
            BlendMode::PREMUL_ALPHA,
            BlendMode::ADD,
            BlendMode::SUB,
            BlendMode::MOD,
        ];
        let unique: HashSet<_> = presets.iter().copied().collect();
        assert_eq!(unique.len(), presets.len());
        assert_eq!(BlendMode::default(), BlendMode::NONE);
    }

    #[test]
    fn unpacked_conversion_round_trips() {
        let u = BlendMode::PREMUL_ALPHA.unpack();
        assert_eq!(BlendMode::from(u), BlendMode::PREMUL_ALPHA);
        assert_eq!(u.color.src, BlendFactor::One);
        assert_eq!(u.alpha.dst, BlendFactor::InvSrcAlpha);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not a blend factor field")]
    fn factor_extractor_rejects_op_fields() {
        BlendMode::ALPHA.factor(BlendModeComponent::ColorOp);
    }
}
