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

//! A minimal complex number, carried to shaders as a `vec2`.

/// A complex number with `f32` parts.
///
/// Laid out as `[re, im]` so it is byte-compatible with a `vec2` uniform.
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Complex {
    /// The real part.
    pub re: f32,
    /// The imaginary part.
    pub im: f32,
}

impl Complex {
    /// Creates a complex number from its real and imaginary parts.
    #[inline]
    pub const fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }

    /// Splits the value into `[re, im]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.re, self.im]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_real_then_imaginary() {
        let c = Complex::new(1.5, -2.0);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&c));
        assert_eq!(floats, &[1.5, -2.0]);
        assert_eq!(c.to_array(), [1.5, -2.0]);
    }
}
