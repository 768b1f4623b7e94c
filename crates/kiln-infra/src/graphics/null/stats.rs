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

//! Call counters and draw logs kept by the [`NullBackend`](super::NullBackend).

use kiln_core::math::LinearRgba;
use kiln_core::renderer::{ClearBufferFlags, FramebufferId, Primitive, VertexArrayId};

/// How many times each backend entry point was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullBackendStats {
    /// `set_capabilities` calls.
    pub capability_changes: usize,
    /// `set_color` calls.
    pub color_changes: usize,
    /// `set_blend_mode` calls.
    pub blend_mode_changes: usize,
    /// `set_cull_face` calls.
    pub cull_face_changes: usize,
    /// `set_depth_func` calls.
    pub depth_func_changes: usize,
    /// `set_shader` calls.
    pub shader_changes: usize,
    /// `set_framebuffer` calls.
    pub framebuffer_changes: usize,
    /// `set_vsync` calls.
    pub vsync_changes: usize,
    /// `uniform` calls.
    pub uniform_uploads: usize,
    /// `framebuffer_clear` calls.
    pub clears: usize,
    /// `swap` calls.
    pub swaps: usize,
}

impl NullBackendStats {
    /// Total number of pipeline state changes, capabilities included.
    pub fn state_changes(&self) -> usize {
        self.capability_changes
            + self.color_changes
            + self.blend_mode_changes
            + self.cull_face_changes
            + self.depth_func_changes
            + self.shader_changes
            + self.framebuffer_changes
    }
}

/// One draw call exactly as the backend received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRecord {
    /// The vertex array drawn from.
    pub array: VertexArrayId,
    /// The primitive topology.
    pub primitive: Primitive,
    /// First vertex, or first index when `indexed`.
    pub first: u32,
    /// Vertex or index count.
    pub count: u32,
    /// Instance count.
    pub instances: u32,
    /// First instance.
    pub base_instance: u32,
    /// Whether this came through `draw_indexed`.
    pub indexed: bool,
}

/// The most recent clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearRecord {
    /// Target; `None` is the default framebuffer.
    pub framebuffer: Option<FramebufferId>,
    /// Buffers cleared.
    pub flags: ClearBufferFlags,
    /// Clear color.
    pub color: LinearRgba,
    /// Clear depth.
    pub depth: f32,
}
