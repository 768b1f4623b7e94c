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

//! Interleaved vertex layouts.
//!
//! [`plan_interleaved`] turns an ordered list of [`VertexAttribSpec`]s into
//! [`VertexAttribFormat`]s with byte offsets and a shared stride. Attributes are
//! laid out in the order given, each one aligned to its scalar type; the planner
//! never reorders to reduce padding, because callers arrange attributes to match
//! vertex data they have already produced.

use std::mem::{align_of, size_of};

/// The scalar type of a vertex attribute's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribType {
    /// 32-bit float.
    Float,
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UByte,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    UShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UInt,
}

/// Size and alignment of a [`VertexAttribType`], in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribTypeInfo {
    /// Size of one element.
    pub size: usize,
    /// Required alignment of one element.
    pub alignment: usize,
}

impl VertexAttribTypeInfo {
    const fn of<T>() -> Self {
        Self {
            size: size_of::<T>(),
            alignment: align_of::<T>(),
        }
    }
}

impl VertexAttribType {
    /// Returns the size and natural alignment of this scalar type.
    pub const fn info(self) -> VertexAttribTypeInfo {
        match self {
            VertexAttribType::Float => VertexAttribTypeInfo::of::<f32>(),
            VertexAttribType::Byte => VertexAttribTypeInfo::of::<i8>(),
            VertexAttribType::UByte => VertexAttribTypeInfo::of::<u8>(),
            VertexAttribType::Short => VertexAttribTypeInfo::of::<i16>(),
            VertexAttribType::UShort => VertexAttribTypeInfo::of::<u16>(),
            VertexAttribType::Int => VertexAttribTypeInfo::of::<i32>(),
            VertexAttribType::UInt => VertexAttribTypeInfo::of::<u32>(),
        }
    }
}

/// How the shader sees the attribute's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexAttribConversion {
    /// Converted to float as-is.
    #[default]
    Float,
    /// Integers are normalized to `[0, 1]` or `[-1, 1]`.
    FloatNormalized,
    /// Kept as integers.
    Integer,
}

/// What a caller declares about one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribSpec {
    /// Number of elements, in `1..=4`.
    pub elements: u8,
    /// Scalar type of each element.
    pub attrib_type: VertexAttribType,
    /// How the data is presented to the shader. Does not affect the layout.
    pub conversion: VertexAttribConversion,
    /// Instancing divisor; `0` advances per vertex. Does not affect the layout.
    pub divisor: u32,
}

impl VertexAttribSpec {
    /// A per-vertex attribute converted to float.
    pub const fn new(attrib_type: VertexAttribType, elements: u8) -> Self {
        Self {
            elements,
            attrib_type,
            conversion: VertexAttribConversion::Float,
            divisor: 0,
        }
    }

    /// Sets the conversion mode.
    pub const fn with_conversion(mut self, conversion: VertexAttribConversion) -> Self {
        self.conversion = conversion;
        self
    }

    /// Sets the instancing divisor.
    pub const fn with_divisor(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }

    /// Total size of the attribute in bytes.
    pub const fn size(&self) -> usize {
        self.attrib_type.info().size * self.elements as usize
    }
}

/// An attribute placed inside an interleaved buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribFormat {
    /// The caller's declaration.
    pub spec: VertexAttribSpec,
    /// Byte offset from the start of a vertex.
    pub offset: usize,
    /// Byte distance between consecutive vertices; equal for every attribute of one plan.
    pub stride: usize,
    /// Vertex buffer attachment slot the attribute is read from.
    pub attachment: u32,
}

/// Lays out `specs` contiguously in one interleaved buffer bound at `attachment`.
///
/// Each attribute starts at the first offset after the previous one that satisfies
/// its scalar alignment. The final cursor becomes the stride of every format.
///
/// # Panics
///
/// In debug builds, if any spec has an element count outside `1..=4`.
pub fn plan_interleaved(specs: &[VertexAttribSpec], attachment: u32) -> Vec<VertexAttribFormat> {
    let mut cursor = 0usize;

    let mut formats: Vec<VertexAttribFormat> = specs
        .iter()
        .map(|spec| {
            debug_assert!(
                (1..=4).contains(&spec.elements),
                "vertex attribute element count must be in 1..=4, got {}",
                spec.elements
            );

            let info = spec.attrib_type.info();
            let align = info.alignment;
            cursor += (align - (cursor & (align - 1))) & (align - 1);

            let offset = cursor;
            cursor += info.size * spec.elements as usize;

            VertexAttribFormat {
                spec: *spec,
                offset,
                stride: 0,
                attachment,
            }
        })
        .collect();

    for format in &mut formats {
        format.stride = cursor;
    }

    formats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(ty: VertexAttribType, n: u8) -> VertexAttribSpec {
        VertexAttribSpec::new(ty, n)
    }

    #[test]
    fn type_table_matches_native_types() {
        assert_eq!(VertexAttribType::Float.info().size, 4);
        assert_eq!(VertexAttribType::UByte.info().alignment, 1);
        assert_eq!(VertexAttribType::Short.info().size, 2);
        assert_eq!(VertexAttribType::UInt.info().alignment, 4);
    }

    #[test]
    fn mixed_layout_aligns_each_field() {
        let specs = [
            spec(VertexAttribType::Float, 3),
            spec(VertexAttribType::UByte, 4),
            spec(VertexAttribType::Float, 2),
        ];
        let formats = plan_interleaved(&specs, 0);

        let offsets: Vec<_> = formats.iter().map(|f| f.offset).collect();
        assert_eq!(offsets, [0, 12, 16]);
        assert!(formats.iter().all(|f| f.stride == 24 && f.attachment == 0));
        assert_eq!(plan_interleaved(&specs, 0), formats);
    }

    #[test]
    fn padding_is_inserted_not_reordered() {
        let a = plan_interleaved(
            &[spec(VertexAttribType::UByte, 1), spec(VertexAttribType::Float, 1)],
            2,
        );
        assert_eq!((a[0].offset, a[1].offset, a[0].stride), (0, 4, 8));
        assert_eq!(a[0].spec.attrib_type, VertexAttribType::UByte);

        let b = plan_interleaved(
            &[spec(VertexAttribType::Float, 1), spec(VertexAttribType::UByte, 1)],
            2,
        );
        assert_eq!((b[0].offset, b[1].offset, b[0].stride), (0, 4, 5));
        assert!(b.iter().all(|f| f.attachment == 2));
    }

    #[test]
    fn short_after_byte_aligns_to_two() {
        let f = plan_interleaved(
            &[
                spec(VertexAttribType::Byte, 3),
                spec(VertexAttribType::UShort, 2),
                spec(VertexAttribType::Int, 1),
            ],
            0,
        );
        assert_eq!(f.iter().map(|f| f.offset).collect::<Vec<_>>(), [0, 4, 8]);
        assert_eq!(f[0].stride, 12);
    }

    #[test]
    fn empty_input_yields_empty_plan() {
        assert!(plan_interleaved(&[], 0).is_empty());
    }

    #[test]
    fn conversion_and_divisor_do_not_move_offsets() {
        let plain = plan_interleaved(&[spec(VertexAttribType::UByte, 4)], 1);
        let tweaked = plan_interleaved(
            &[spec(VertexAttribType::UByte, 4)
                .with_conversion(VertexAttribConversion::FloatNormalized)
                .with_divisor(1)],
            1,
        );
        assert_eq!(plain[0].offset, tweaked[0].offset);
        assert_eq!(plain[0].stride, tweaked[0].stride);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "element count must be in 1..=4")]
    fn rejects_five_elements() {
        plan_interleaved(&[spec(VertexAttribType::Float, 5)], 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "element count must be in 1..=4")]
    fn rejects_zero_elements() {
        plan_interleaved(&[spec(VertexAttribType::Float, 0)], 0);
    }
}
