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

//! Column-major 3x3 and 4x4 matrices.

use super::vector::{Vec3, Vec4};

// --- Mat3 ---

/// A 3x3 column-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
    };

    /// Creates a matrix from a column-major array of columns.
    #[inline]
    pub fn from_cols_array(cols: [[f32; 3]; 3]) -> Self {
        Self {
            cols: cols.map(Vec3::from),
        }
    }

    /// Returns the matrix as a column-major array of columns.
    #[inline]
    pub fn to_cols_array(&self) -> [[f32; 3]; 3] {
        self.cols.map(Vec3::to_array)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// --- Mat4 ---

/// A 4x4 column-major matrix, used for 3D transformations and projections.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a matrix from a column-major array of columns.
    #[inline]
    pub fn from_cols_array(cols: [[f32; 4]; 4]) -> Self {
        Self {
            cols: cols.map(Vec4::from),
        }
    }

    /// Returns the matrix as a column-major array of columns.
    #[inline]
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        self.cols.map(Vec4::to_array)
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::new(v.x, v.y, v.z, 1.0);
        m
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrices_have_no_padding() {
        assert_eq!(std::mem::size_of::<Mat3>(), 9 * 4);
        assert_eq!(std::mem::size_of::<Mat4>(), 16 * 4);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(&floats[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(floats[0], 1.0);
    }

    #[test]
    fn cols_array_round_trip() {
        let arr = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(Mat3::from_cols_array(arr).to_cols_array(), arr);
        assert_eq!(Mat3::default(), Mat3::IDENTITY);
    }
}
