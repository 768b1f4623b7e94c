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

//! Typed uniform setters layered over the backend's single untyped upload.
//!
//! Every setter takes an `Option<UniformId>`. `None` means the bound program
//! does not declare the uniform, and the setter does nothing. In debug builds
//! each setter checks that the uniform was declared with the matching type.

use crate::math::{Complex, LinearRgba, Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::renderer::api::{TextureId, UniformId, UniformType, UniformValue};
use crate::renderer::facade::Renderer;
use crate::renderer::traits::RendererBackend;

impl<B: RendererBackend + ?Sized> Renderer<B> {
    #[inline]
    fn assert_uniform_type(&self, uniform: UniformId, expected: UniformType) {
        debug_assert_eq!(
            self.backend.uniform_type(uniform),
            expected,
            "uniform {uniform:?} set with a {expected:?} setter"
        );
    }

    /// Uploads raw bytes without any type check.
    ///
    /// `data` must hold `count` values of the uniform's declared type.
    pub fn uniform_raw(&mut self, uniform: Option<UniformId>, offset: usize, count: usize, data: &[u8]) {
        if let Some(uniform) = uniform {
            self.backend.uniform(uniform, offset, count, data);
        }
    }

    /// Sets a uniform to one value.
    pub fn uniform<T: UniformValue>(&mut self, uniform: Option<UniformId>, value: T) {
        self.uniform_array(uniform, 0, std::slice::from_ref(&value));
    }

    /// Sets consecutive elements of a uniform array, starting at `offset`.
    ///
    /// An empty slice is not forwarded.
    pub fn uniform_array<T: UniformValue>(&mut self, uniform: Option<UniformId>, offset: usize, values: &[T]) {
        let Some(uniform) = uniform else {
            return;
        };
        self.assert_uniform_type(uniform, T::TYPE);
        if values.is_empty() {
            return;
        }
        self.backend
            .uniform(uniform, offset, values.len(), bytemuck::cast_slice(values));
    }

    /// Sets a uniform of the bound program by name.
    ///
    /// The name is resolved on every call.
    pub fn uniform_named<T: UniformValue>(&mut self, name: &str, value: T) {
        let uniform = self.shader_current_uniform(name);
        self.uniform(uniform, value);
    }

    /// Sets elements of a uniform array of the bound program by name.
    pub fn uniform_named_array<T: UniformValue>(&mut self, name: &str, offset: usize, values: &[T]) {
        let uniform = self.shader_current_uniform(name);
        self.uniform_array(uniform, offset, values);
    }

    /// Sets a `float`.
    pub fn uniform_float(&mut self, uniform: Option<UniformId>, value: f32) {
        self.uniform(uniform, value);
    }

    /// Sets elements of a `float[]`.
    pub fn uniform_float_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[f32]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets a `vec2`.
    pub fn uniform_vec2(&mut self, uniform: Option<UniformId>, x: f32, y: f32) {
        self.uniform(uniform, [x, y]);
    }

    /// Sets a `vec2` from a vector.
    pub fn uniform_vec2_vec(&mut self, uniform: Option<UniformId>, value: Vec2) {
        self.uniform(uniform, value);
    }

    /// Sets a `vec2` to `(re, im)`.
    pub fn uniform_vec2_complex(&mut self, uniform: Option<UniformId>, value: Complex) {
        self.uniform(uniform, value.to_array());
    }

    /// Sets elements of a `vec2[]`.
    pub fn uniform_vec2_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[Vec2]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets elements of a `vec2[]`, each to `(re, im)`.
    pub fn uniform_vec2_array_complex(
        &mut self,
        uniform: Option<UniformId>,
        offset: usize,
        values: &[Complex],
    ) {
        if uniform.is_none() {
            return;
        }
        let split: Vec<[f32; 2]> = values.iter().map(|c| c.to_array()).collect();
        self.uniform_array(uniform, offset, &split);
    }

    /// Sets a `vec3`.
    pub fn uniform_vec3(&mut self, uniform: Option<UniformId>, x: f32, y: f32, z: f32) {
        self.uniform(uniform, [x, y, z]);
    }

    /// Sets a `vec3` from a vector.
    pub fn uniform_vec3_vec(&mut self, uniform: Option<UniformId>, value: Vec3) {
        self.uniform(uniform, value);
    }

    /// Sets a `vec3` to the RGB channels of a color.
    pub fn uniform_vec3_rgb(&mut self, uniform: Option<UniformId>, color: LinearRgba) {
        self.uniform(uniform, color.to_rgb_array());
    }

    /// Sets elements of a `vec3[]`.
    pub fn uniform_vec3_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[Vec3]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets a `vec4`.
    pub fn uniform_vec4(&mut self, uniform: Option<UniformId>, x: f32, y: f32, z: f32, w: f32) {
        self.uniform(uniform, [x, y, z, w]);
    }

    /// Sets a `vec4` from a vector.
    pub fn uniform_vec4_vec(&mut self, uniform: Option<UniformId>, value: Vec4) {
        self.uniform(uniform, value);
    }

    /// Sets a `vec4` to a color.
    pub fn uniform_vec4_rgba(&mut self, uniform: Option<UniformId>, color: LinearRgba) {
        self.uniform(uniform, color);
    }

    /// Sets elements of a `vec4[]`.
    pub fn uniform_vec4_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[Vec4]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets a `mat3`.
    pub fn uniform_mat3(&mut self, uniform: Option<UniformId>, value: Mat3) {
        self.uniform(uniform, value);
    }

    /// Sets elements of a `mat3[]`.
    pub fn uniform_mat3_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[Mat3]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets a `mat4`.
    pub fn uniform_mat4(&mut self, uniform: Option<UniformId>, value: Mat4) {
        self.uniform(uniform, value);
    }

    /// Sets elements of a `mat4[]`.
    pub fn uniform_mat4_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[Mat4]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets an `int`.
    pub fn uniform_int(&mut self, uniform: Option<UniformId>, value: i32) {
        self.uniform(uniform, value);
    }

    /// Sets elements of an `int[]`.
    pub fn uniform_int_array(&mut self, uniform: Option<UniformId>, offset: usize, values: &[i32]) {
        self.uniform_array(uniform, offset, values);
    }

    /// Sets an `ivec2`.
    pub fn uniform_ivec2(&mut self, uniform: Option<UniformId>, x: i32, y: i32) {
        self.uniform(uniform, [x, y]);
    }

    /// Sets an `ivec3`.
    pub fn uniform_ivec3(&mut self, uniform: Option<UniformId>, x: i32, y: i32, z: i32) {
        self.uniform(uniform, [x, y, z]);
    }

    /// Sets an `ivec4`.
    pub fn uniform_ivec4(&mut self, uniform: Option<UniformId>, x: i32, y: i32, z: i32, w: i32) {
        self.uniform(uniform, [x, y, z, w]);
    }

    /// Binds a texture to a sampler uniform.
    pub fn uniform_sampler(&mut self, uniform: Option<UniformId>, texture: TextureId) {
        self.uniform(uniform, texture);
    }
}
