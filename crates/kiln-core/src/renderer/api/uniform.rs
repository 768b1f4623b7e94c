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

//! Uniform types and the mapping from Rust values to them.

use crate::math::{Complex, LinearRgba, Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::renderer::api::resource::TextureId;
use std::mem::size_of;

/// The declared type of a shader uniform, fixed when the program is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// `float`
    Float,
    /// `vec2`
    Vec2,
    /// `vec3`
    Vec3,
    /// `vec4`
    Vec4,
    /// `int`
    Int,
    /// `ivec2`
    IVec2,
    /// `ivec3`
    IVec3,
    /// `ivec4`
    IVec4,
    /// Any texture sampler.
    Sampler,
    /// `mat3`
    Mat3,
    /// `mat4`
    Mat4,
}

/// Shape of a single uniform value as transferred to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformTypeInfo {
    /// Number of scalar elements in one value.
    pub elements: usize,
    /// Size of one scalar element in bytes.
    pub element_size: usize,
}

impl UniformTypeInfo {
    /// Size of one whole value in bytes.
    pub const fn size(&self) -> usize {
        self.elements * self.element_size
    }
}

impl UniformType {
    /// Returns the element count and element size of this type.
    pub const fn info(self) -> UniformTypeInfo {
        let (elements, element_size) = match self {
            UniformType::Float => (1, size_of::<f32>()),
            UniformType::Vec2 => (2, size_of::<f32>()),
            UniformType::Vec3 => (3, size_of::<f32>()),
            UniformType::Vec4 => (4, size_of::<f32>()),
            UniformType::Int => (1, size_of::<i32>()),
            UniformType::IVec2 => (2, size_of::<i32>()),
            UniformType::IVec3 => (3, size_of::<i32>()),
            UniformType::IVec4 => (4, size_of::<i32>()),
            UniformType::Sampler => (1, size_of::<TextureId>()),
            UniformType::Mat3 => (9, size_of::<f32>()),
            UniformType::Mat4 => (16, size_of::<f32>()),
        };

        UniformTypeInfo {
            elements,
            element_size,
        }
    }
}

/// A Rust value that can be uploaded to a uniform of type [`Self::TYPE`].
///
/// The value's bytes are passed to the backend unchanged, so implementors must
/// have exactly the layout the type table describes for [`Self::TYPE`].
pub trait UniformValue: bytemuck::Pod {
    /// The uniform type this value is written to.
    const TYPE: UniformType;
}

macro_rules! uniform_values {
    ($($ty:ty => $utype:ident),+ $(,)?) => {
        $(
            impl UniformValue for $ty {
                const TYPE: UniformType = UniformType::$utype;
            }
        )+
    };
}

uniform_values! {
    f32 => Float,
    [f32; 2] => Vec2,
    Vec2 => Vec2,
    Complex => Vec2,
    [f32; 3] => Vec3,
    Vec3 => Vec3,
    [f32; 4] => Vec4,
    Vec4 => Vec4,
    LinearRgba => Vec4,
    i32 => Int,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    TextureId => Sampler,
    [[f32; 3]; 3] => Mat3,
    Mat3 => Mat3,
    [[f32; 4]; 4] => Mat4,
    Mat4 => Mat4,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_matches_table<T: UniformValue>() {
        assert_eq!(
            size_of::<T>(),
            T::TYPE.info().size(),
            "{} does not match the {:?} table entry",
            std::any::type_name::<T>(),
            T::TYPE
        );
    }

    #[test]
    fn table_entries() {
        assert_eq!(UniformType::Vec3.info().elements, 3);
        assert_eq!(UniformType::Mat4.info().size(), 64);
        assert_eq!(UniformType::IVec2.info().element_size, 4);
        assert_eq!(UniformType::Sampler.info().elements, 1);
    }

    #[test]
    fn every_uniform_value_has_table_size() {
        assert_matches_table::<f32>();
        assert_matches_table::<Vec2>();
        assert_matches_table::<Complex>();
        assert_matches_table::<Vec3>();
        assert_matches_table::<Vec4>();
        assert_matches_table::<LinearRgba>();
        assert_matches_table::<i32>();
        assert_matches_table::<[i32; 3]>();
        assert_matches_table::<[i32; 4]>();
        assert_matches_table::<TextureId>();
        assert_matches_table::<Mat3>();
        assert_matches_table::<[[f32; 3]; 3]>();
        assert_matches_table::<Mat4>();
    }
}
