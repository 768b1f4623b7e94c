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

use crate::math::LinearRgba;
use crate::renderer::api::*;
use crate::renderer::error::{RenderError, ResourceError};
use std::fmt::Debug;

/// The fixed capability set a concrete graphics backend implements.
///
/// The backend owns every GPU object; handles are opaque indices into its tables.
/// Methods that take a handle expect it to be live. Passing a destroyed handle is
/// a contract violation and implementations may panic.
///
/// The trait is object safe so a backend can be chosen at runtime and driven as
/// `Renderer<dyn RendererBackend>`.
pub trait RendererBackend: Debug {
    // --- Lifecycle ---

    /// A short, stable name such as `"null"`.
    fn name(&self) -> &'static str;

    /// Prepares the backend. Called once, before any window exists.
    /// ## Errors
    /// * `RenderError::BackendInit` - If the underlying API is unavailable.
    fn init(&mut self, settings: &RendererSettings) -> Result<(), RenderError>;

    /// Finishes initialization once the main window and its context exist.
    fn post_init(&mut self);

    /// Releases every backend resource.
    fn shutdown(&mut self);

    /// Creates a window with a presentable surface.
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, RenderError>;

    /// Checks for an optional feature.
    fn supports(&self, feature: RendererFeature) -> bool;

    // --- Pipeline state ---

    /// The currently enabled capabilities.
    fn capabilities(&self) -> CapabilityBits;
    /// Replaces the enabled capability set.
    fn set_capabilities(&mut self, capabilities: CapabilityBits);

    /// The current draw color.
    fn color(&self) -> LinearRgba;
    /// Sets the draw color.
    fn set_color(&mut self, color: LinearRgba);

    /// The current blend mode.
    fn blend_mode(&self) -> BlendMode;
    /// Sets the blend mode.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// The current cull mode.
    fn cull_face(&self) -> CullFaceMode;
    /// Sets which faces are culled when culling is enabled.
    fn set_cull_face(&mut self, mode: CullFaceMode);

    /// The current depth comparison.
    fn depth_func(&self) -> DepthTestFunc;
    /// Sets the depth comparison.
    fn set_depth_func(&mut self, func: DepthTestFunc);

    /// The bound shader program, if any.
    fn shader(&self) -> Option<ShaderProgramId>;
    /// Binds a shader program.
    fn set_shader(&mut self, program: Option<ShaderProgramId>);

    /// The bound framebuffer; `None` is the default framebuffer.
    fn framebuffer(&self) -> Option<FramebufferId>;
    /// Binds a framebuffer; `None` binds the default framebuffer.
    fn set_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    /// The current swap interval.
    fn vsync(&self) -> VsyncMode;
    /// Sets the swap interval.
    fn set_vsync(&mut self, mode: VsyncMode);

    // --- Shaders ---

    /// Negotiates a shading language. May answer with an alternative the backend accepts.
    fn shader_language_supported(&self, lang: &ShaderLangInfo) -> ShaderLangSupport;

    /// Compiles one shader stage.
    /// ## Errors
    /// * `ResourceError::Shader` - If the source does not compile.
    fn shader_object_compile(
        &mut self,
        source: &ShaderSource,
    ) -> Result<ShaderObjectId, ResourceError>;
    /// Destroys a shader object.
    fn shader_object_destroy(&mut self, object: ShaderObjectId);

    /// Links shader objects into a program and discovers its uniforms.
    /// ## Errors
    /// * `ResourceError::Shader` - If linking fails.
    fn shader_program_link(
        &mut self,
        objects: &[ShaderObjectId],
    ) -> Result<ShaderProgramId, ResourceError>;
    /// Destroys a shader program and the uniforms it owns.
    fn shader_program_destroy(&mut self, program: ShaderProgramId);

    /// Looks up a uniform by name. `None` if the program does not declare it.
    fn shader_uniform(&self, program: ShaderProgramId, name: &str) -> Option<UniformId>;
    /// The declared type of a uniform.
    fn uniform_type(&self, uniform: UniformId) -> UniformType;
    /// Uploads `count` values starting at array element `offset`.
    ///
    /// `data` holds `count` tightly packed values of the uniform's type.
    fn uniform(&mut self, uniform: UniformId, offset: usize, count: usize, data: &[u8]);

    // --- Textures ---

    /// Creates a texture.
    fn texture_create(&mut self, params: &TextureParams) -> Result<TextureId, ResourceError>;
    /// Destroys a texture.
    fn texture_destroy(&mut self, texture: TextureId);
    /// The parameters the texture was created with, including later filter and wrap changes.
    fn texture_params(&self, texture: TextureId) -> TextureParams;
    /// Width and height of a mip level.
    fn texture_size(&self, texture: TextureId, mipmap: u32) -> (u32, u32);
    /// Changes the sampling filters.
    fn texture_set_filter(&mut self, texture: TextureId, filter: TextureFilter);
    /// Changes the wrap modes.
    fn texture_set_wrap(&mut self, texture: TextureId, wrap: TextureWrap);
    /// Replaces a whole mip level.
    fn texture_fill(&mut self, texture: TextureId, mipmap: u32, image: &Pixmap);
    /// Replaces a region of a mip level, with `(x, y)` as the region's corner.
    fn texture_fill_region(&mut self, texture: TextureId, mipmap: u32, x: u32, y: u32, image: &Pixmap);
    /// Discards the texture contents.
    fn texture_invalidate(&mut self, texture: TextureId);
    /// Fills every texel with `color`.
    fn texture_clear(&mut self, texture: TextureId, color: LinearRgba);

    // --- Framebuffers ---

    /// Creates a framebuffer with no attachments.
    fn framebuffer_create(&mut self) -> Result<FramebufferId, ResourceError>;
    /// Destroys a framebuffer. Attached textures are not destroyed.
    fn framebuffer_destroy(&mut self, framebuffer: FramebufferId);
    /// Attaches a texture mip level, or detaches with `None`.
    fn framebuffer_attach(
        &mut self,
        framebuffer: FramebufferId,
        texture: Option<TextureId>,
        mipmap: u32,
        attachment: FramebufferAttachment,
    );
    /// The texture attached at a point, if any.
    fn framebuffer_attachment(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> Option<TextureId>;
    /// The mip level attached at a point.
    fn framebuffer_attachment_mipmap(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> u32;
    /// Sets the viewport of a framebuffer; `None` is the default framebuffer.
    fn framebuffer_set_viewport(&mut self, framebuffer: Option<FramebufferId>, viewport: FloatRect);
    /// The viewport of a framebuffer; `None` is the default framebuffer.
    fn framebuffer_viewport(&self, framebuffer: Option<FramebufferId>) -> FloatRect;
    /// Clears buffers of a framebuffer; `None` is the default framebuffer.
    fn framebuffer_clear(
        &mut self,
        framebuffer: Option<FramebufferId>,
        flags: ClearBufferFlags,
        color: LinearRgba,
        depth: f32,
    );

    // --- Vertex buffers ---

    /// Creates a vertex buffer of `capacity` bytes, optionally with initial contents.
    fn vertex_buffer_create(
        &mut self,
        capacity: usize,
        data: Option<&[u8]>,
    ) -> Result<VertexBufferId, ResourceError>;
    /// Destroys a vertex buffer.
    fn vertex_buffer_destroy(&mut self, buffer: VertexBufferId);
    /// Capacity in bytes.
    fn vertex_buffer_capacity(&self, buffer: VertexBufferId) -> usize;
    /// Writes `data` at byte `offset`.
    fn vertex_buffer_write(&mut self, buffer: VertexBufferId, offset: usize, data: &[u8]);
    /// Discards the buffer contents.
    fn vertex_buffer_invalidate(&mut self, buffer: VertexBufferId);

    // --- Index buffers ---

    /// Creates an index buffer holding up to `capacity` indices.
    fn index_buffer_create(&mut self, capacity: usize) -> Result<IndexBufferId, ResourceError>;
    /// Destroys an index buffer.
    fn index_buffer_destroy(&mut self, buffer: IndexBufferId);
    /// Capacity in indices.
    fn index_buffer_capacity(&self, buffer: IndexBufferId) -> usize;
    /// Write cursor, in indices.
    fn index_buffer_offset(&self, buffer: IndexBufferId) -> usize;
    /// Moves the write cursor.
    fn index_buffer_set_offset(&mut self, buffer: IndexBufferId, offset: usize);
    /// Appends indices at the cursor, each biased by `index_offset`.
    fn index_buffer_add_indices(&mut self, buffer: IndexBufferId, index_offset: u32, indices: &[u16]);
    /// Discards the contents and rewinds the cursor.
    fn index_buffer_invalidate(&mut self, buffer: IndexBufferId);

    // --- Vertex arrays ---

    /// Creates an empty vertex array.
    fn vertex_array_create(&mut self) -> Result<VertexArrayId, ResourceError>;
    /// Destroys a vertex array. Attached buffers are not destroyed.
    fn vertex_array_destroy(&mut self, array: VertexArrayId);
    /// References a vertex buffer at an attachment slot.
    fn vertex_array_attach_vertex_buffer(
        &mut self,
        array: VertexArrayId,
        buffer: VertexBufferId,
        attachment: u32,
    );
    /// References an index buffer, or removes it with `None`.
    fn vertex_array_attach_index_buffer(&mut self, array: VertexArrayId, buffer: Option<IndexBufferId>);
    /// The vertex buffer at a slot, if any.
    fn vertex_array_vertex_attachment(
        &self,
        array: VertexArrayId,
        attachment: u32,
    ) -> Option<VertexBufferId>;
    /// The index buffer, if any.
    fn vertex_array_index_attachment(&self, array: VertexArrayId) -> Option<IndexBufferId>;
    /// Sets the attribute layout; attribute `i` is `formats[i]`.
    fn vertex_array_layout(&mut self, array: VertexArrayId, formats: &[VertexAttribFormat]);

    // --- Debug labels ---

    /// Attaches a human-readable label to a resource.
    fn set_debug_label(&mut self, resource: ResourceId, label: &str);
    /// The label of a resource, or a generated one if none was set.
    fn debug_label(&self, resource: ResourceId) -> String;

    // --- Drawing ---

    /// Draws `count` vertices starting at `first`.
    fn draw(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    );
    /// Draws `count` indices of the array's index buffer starting at `first`.
    fn draw_indexed(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    );

    // --- Frame ---

    /// Presents the back buffer of a window.
    fn swap(&mut self, window: WindowId);
    /// Reads back the default framebuffer, if the backend can.
    fn screenshot(&mut self) -> Option<Pixmap>;
}
