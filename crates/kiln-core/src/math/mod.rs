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

//! Small linear-algebra value types used to marshal uniform data.
//!
//! These types are plain `#[repr(C)]` aggregates of `f32` so they can be handed
//! to a backend as raw bytes through [`bytemuck`]. They are deliberately thin:
//! the renderer only needs to carry values, not compute with them.

pub mod color;
pub mod complex;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::complex::Complex;
pub use self::matrix::{Mat3, Mat4};
pub use self::vector::{Vec2, Vec3, Vec4};
