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

//! The dispatch facade: the single entry point for rendering operations.

use crate::math::LinearRgba;
use crate::renderer::api::*;
use crate::renderer::error::{RenderError, ResourceError};
use crate::renderer::state_cache::{StateCache, StateCategories, StateValue};
use crate::renderer::traits::{FrameBatch, RendererBackend};
use log::{info, trace};

/// A rendering context driving one backend.
///
/// `Renderer` validates cheap preconditions, skips state changes that would not
/// change anything, and otherwise forwards every call to the backend unchanged.
/// Backend failures are returned as they are; nothing is retried.
///
/// The backend may be a concrete type or `dyn RendererBackend`.
#[derive(Debug)]
pub struct Renderer<B: RendererBackend + ?Sized> {
    pub(super) backend: Box<B>,
    cache: StateCache,
    settings: RendererSettings,
}

impl<B: RendererBackend + ?Sized> Renderer<B> {
    /// Wraps a backend. Call [`Renderer::init`] before anything else.
    pub fn new(backend: Box<B>, settings: RendererSettings) -> Self {
        Self {
            backend,
            cache: StateCache::new(),
            settings,
        }
    }

    /// Initializes the backend with this renderer's settings.
    pub fn init(&mut self) -> Result<(), RenderError> {
        self.cache.invalidate();
        self.backend.init(&self.settings)
    }

    /// Finishes backend initialization and applies the configured initial state.
    pub fn post_init(&mut self) {
        self.backend.post_init();

        let initial = self.settings.initial_state.clone();
        self.set_vsync(self.settings.vsync);
        self.set_color(initial.color());
        self.set_capabilities(initial.capability_bits());
        self.set_depth_func(initial.depth_func);
        self.set_cull_face(initial.cull_face);
        self.set_blend_mode(initial.blend_mode());
        self.framebuffer_clear(
            None,
            ClearBufferFlags::ALL,
            initial.clear_color(),
            initial.clear_depth,
        );

        info!("Rendering subsystem initialized ({})", self.backend.name());
    }

    /// Shuts the backend down and forgets all cached state.
    pub fn shutdown(&mut self) {
        self.backend.shutdown();
        self.cache.invalidate();
    }

    /// The settings this renderer was created with.
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, for calls the facade does not cover.
    ///
    /// State changed here bypasses the cache; call
    /// [`Renderer::invalidate_state_cache`] afterwards.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the renderer and returns its backend.
    pub fn into_backend(self) -> Box<B> {
        self.backend
    }

    /// Forgets every cached state value. The next set of each category reaches the backend.
    pub fn invalidate_state_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Categories that may have changed since the last [`Renderer::clear_touched_state`].
    pub fn touched_state(&self) -> StateCategories {
        self.cache.touched()
    }

    /// Resets the touched set.
    pub fn clear_touched_state(&mut self) {
        self.cache.clear_touched();
    }

    /// Creates a window.
    pub fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, RenderError> {
        self.backend.create_window(descriptor)
    }

    /// Checks for an optional backend feature.
    pub fn supports(&self, feature: RendererFeature) -> bool {
        self.backend.supports(feature)
    }

    // --- State stack ---

    fn touch(&mut self, category: StateCategories) {
        if !self.cache.touch(category) {
            return;
        }

        let current = if category == StateCategories::CAPABILITIES {
            StateValue::Capabilities(self.backend.capabilities())
        } else if category == StateCategories::COLOR {
            StateValue::Color(self.color())
        } else if category == StateCategories::BLEND_MODE {
            StateValue::BlendMode(self.blend_mode())
        } else if category == StateCategories::CULL_FACE {
            StateValue::CullFace(self.cull_face())
        } else if category == StateCategories::DEPTH_FUNC {
            StateValue::DepthFunc(self.depth_func())
        } else if category == StateCategories::SHADER {
            StateValue::Shader(self.shader())
        } else {
            StateValue::Framebuffer(self.framebuffer())
        };
        self.cache.save(current);
    }

    /// Opens a scope. State changed inside it is rolled back by [`Renderer::pop_state`].
    pub fn push_state(&mut self) {
        self.cache.push();
        trace!("Pushed renderer state (depth {})", self.cache.depth());
    }

    /// Restores every category changed since the matching [`Renderer::push_state`].
    ///
    /// # Panics
    ///
    /// In debug builds, if no scope is open.
    pub fn pop_state(&mut self) {
        let saved = self.cache.pop();
        debug_assert!(saved.is_some(), "pop_state called without a matching push_state");
        let Some(values) = saved else {
            return;
        };

        trace!(
            "Popped renderer state (depth {}), restoring {} categories",
            self.cache.depth(),
            values.len()
        );
        for value in values {
            self.restore(value);
        }
    }

    fn restore(&mut self, value: StateValue) {
        match value {
            StateValue::Capabilities(caps) => {
                if self.backend.capabilities() != caps {
                    self.backend.set_capabilities(caps);
                }
            }
            StateValue::Color(color) => {
                if self.cache.color.is_invalid(&color) {
                    self.backend.set_color(color);
                }
            }
            StateValue::BlendMode(mode) => {
                if self.cache.blend_mode.is_invalid(&mode) {
                    self.backend.set_blend_mode(mode);
                }
            }
            StateValue::CullFace(mode) => {
                if self.cache.cull_face.is_invalid(&mode) {
                    self.backend.set_cull_face(mode);
                }
            }
            StateValue::DepthFunc(func) => {
                if self.cache.depth_func.is_invalid(&func) {
                    self.backend.set_depth_func(func);
                }
            }
            StateValue::Shader(program) => {
                if self.cache.shader.is_invalid(&program) {
                    self.backend.set_shader(program);
                }
            }
            StateValue::Framebuffer(framebuffer) => {
                if self.cache.framebuffer.is_invalid(&framebuffer) {
                    self.backend.set_framebuffer(framebuffer);
                }
            }
        }
        self.cache.record(value);
    }

    // --- Capabilities ---

    /// The enabled capabilities, as reported by the backend.
    pub fn capabilities(&self) -> CapabilityBits {
        self.backend.capabilities()
    }

    /// Replaces the enabled capability set. Forwarded only if it differs from the backend's.
    pub fn set_capabilities(&mut self, capabilities: CapabilityBits) {
        self.touch(StateCategories::CAPABILITIES);
        if self.backend.capabilities() != capabilities {
            self.backend.set_capabilities(capabilities);
        }
    }

    /// Enables or disables one capability.
    pub fn set_capability(&mut self, capability: RendererCapability, value: bool) {
        let capabilities = self.backend.capabilities().with(capability, value);
        self.set_capabilities(capabilities);
    }

    /// Enables one capability.
    pub fn enable(&mut self, capability: RendererCapability) {
        self.set_capability(capability, true);
    }

    /// Disables one capability.
    pub fn disable(&mut self, capability: RendererCapability) {
        self.set_capability(capability, false);
    }

    /// Whether a capability is enabled.
    pub fn capability(&self, capability: RendererCapability) -> bool {
        self.backend.capabilities().contains(capability)
    }

    // --- Pipeline state ---

    /// Sets the draw color.
    pub fn set_color(&mut self, color: LinearRgba) {
        self.touch(StateCategories::COLOR);
        if self.cache.color.is_invalid(&color) {
            self.backend.set_color(color);
            self.cache.color.set(color);
        }
    }

    /// Sets the draw color from components.
    pub fn set_color4(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.set_color(LinearRgba::new(r, g, b, a));
    }

    /// The current draw color.
    pub fn color(&self) -> LinearRgba {
        self.cache.color.get().unwrap_or_else(|| self.backend.color())
    }

    /// Sets the blend mode.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.touch(StateCategories::BLEND_MODE);
        if self.cache.blend_mode.is_invalid(&mode) {
            self.backend.set_blend_mode(mode);
            self.cache.blend_mode.set(mode);
        }
    }

    /// The current blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.cache
            .blend_mode
            .get()
            .unwrap_or_else(|| self.backend.blend_mode())
    }

    /// Sets which faces are culled.
    pub fn set_cull_face(&mut self, mode: CullFaceMode) {
        self.touch(StateCategories::CULL_FACE);
        if self.cache.cull_face.is_invalid(&mode) {
            self.backend.set_cull_face(mode);
            self.cache.cull_face.set(mode);
        }
    }

    /// The current cull mode.
    pub fn cull_face(&self) -> CullFaceMode {
        self.cache
            .cull_face
            .get()
            .unwrap_or_else(|| self.backend.cull_face())
    }

    /// Sets the depth comparison.
    pub fn set_depth_func(&mut self, func: DepthTestFunc) {
        self.touch(StateCategories::DEPTH_FUNC);
        if self.cache.depth_func.is_invalid(&func) {
            self.backend.set_depth_func(func);
            self.cache.depth_func.set(func);
        }
    }

    /// The current depth comparison.
    pub fn depth_func(&self) -> DepthTestFunc {
        self.cache
            .depth_func
            .get()
            .unwrap_or_else(|| self.backend.depth_func())
    }

    /// Binds a shader program, or unbinds with `None`.
    pub fn set_shader(&mut self, program: Option<ShaderProgramId>) {
        self.touch(StateCategories::SHADER);
        if self.cache.shader.is_invalid(&program) {
            self.backend.set_shader(program);
            self.cache.shader.set(program);
        }
    }

    /// The bound shader program.
    pub fn shader(&self) -> Option<ShaderProgramId> {
        self.cache.shader.get().unwrap_or_else(|| self.backend.shader())
    }

    /// Binds a framebuffer; `None` binds the default framebuffer.
    pub fn set_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.touch(StateCategories::FRAMEBUFFER);
        if self.cache.framebuffer.is_invalid(&framebuffer) {
            self.backend.set_framebuffer(framebuffer);
            self.cache.framebuffer.set(framebuffer);
        }
    }

    /// The bound framebuffer; `None` is the default framebuffer.
    pub fn framebuffer(&self) -> Option<FramebufferId> {
        self.cache
            .framebuffer
            .get()
            .unwrap_or_else(|| self.backend.framebuffer())
    }

    /// Sets the swap interval.
    pub fn set_vsync(&mut self, mode: VsyncMode) {
        self.backend.set_vsync(mode);
    }

    /// The current swap interval.
    pub fn vsync(&self) -> VsyncMode {
        self.backend.vsync()
    }

    // --- Shaders ---

    /// Negotiates a shading language with the backend.
    pub fn shader_language_supported(&self, lang: &ShaderLangInfo) -> ShaderLangSupport {
        self.backend.shader_language_supported(lang)
    }

    /// Compiles one shader stage.
    pub fn shader_object_compile(
        &mut self,
        source: &ShaderSource,
    ) -> Result<ShaderObjectId, ResourceError> {
        self.backend.shader_object_compile(source)
    }

    /// Destroys a shader object.
    pub fn shader_object_destroy(&mut self, object: ShaderObjectId) {
        self.backend.shader_object_destroy(object);
    }

    /// Links shader objects into a program.
    pub fn shader_program_link(
        &mut self,
        objects: &[ShaderObjectId],
    ) -> Result<ShaderProgramId, ResourceError> {
        self.backend.shader_program_link(objects)
    }

    /// Destroys a shader program. If it is bound, the cached binding is forgotten.
    pub fn shader_program_destroy(&mut self, program: ShaderProgramId) {
        if self.cache.shader.get() == Some(Some(program)) {
            self.cache.shader.invalidate();
        }
        self.backend.shader_program_destroy(program);
    }

    /// Looks up a uniform of a program by name.
    pub fn shader_uniform(&self, program: ShaderProgramId, name: &str) -> Option<UniformId> {
        self.backend.shader_uniform(program, name)
    }

    /// Looks up a uniform of the bound program by name.
    ///
    /// Returns `None` if no program is bound or it does not declare `name`.
    pub fn shader_current_uniform(&self, name: &str) -> Option<UniformId> {
        self.shader()
            .and_then(|program| self.backend.shader_uniform(program, name))
    }

    /// The declared type of a uniform.
    pub fn uniform_type(&self, uniform: UniformId) -> UniformType {
        self.backend.uniform_type(uniform)
    }

    // --- Textures ---

    /// Creates a texture.
    pub fn texture_create(&mut self, params: &TextureParams) -> Result<TextureId, ResourceError> {
        self.backend.texture_create(params)
    }

    /// Destroys a texture.
    pub fn texture_destroy(&mut self, texture: TextureId) {
        self.backend.texture_destroy(texture);
    }

    /// The current parameters of a texture.
    pub fn texture_params(&self, texture: TextureId) -> TextureParams {
        self.backend.texture_params(texture)
    }

    /// Width and height of a mip level.
    pub fn texture_size(&self, texture: TextureId, mipmap: u32) -> (u32, u32) {
        self.backend.texture_size(texture, mipmap)
    }

    /// Width of a mip level.
    pub fn texture_width(&self, texture: TextureId, mipmap: u32) -> u32 {
        self.backend.texture_size(texture, mipmap).0
    }

    /// Height of a mip level.
    pub fn texture_height(&self, texture: TextureId, mipmap: u32) -> u32 {
        self.backend.texture_size(texture, mipmap).1
    }

    /// Changes the sampling filters of a texture.
    pub fn texture_set_filter(&mut self, texture: TextureId, filter: TextureFilter) {
        self.backend.texture_set_filter(texture, filter);
    }

    /// Changes the wrap modes of a texture.
    pub fn texture_set_wrap(&mut self, texture: TextureId, wrap: TextureWrap) {
        self.backend.texture_set_wrap(texture, wrap);
    }

    /// Replaces a whole mip level.
    pub fn texture_fill(&mut self, texture: TextureId, mipmap: u32, image: &Pixmap) {
        self.backend.texture_fill(texture, mipmap, image);
    }

    /// Replaces a region of a mip level.
    pub fn texture_fill_region(
        &mut self,
        texture: TextureId,
        mipmap: u32,
        x: u32,
        y: u32,
        image: &Pixmap,
    ) {
        self.backend.texture_fill_region(texture, mipmap, x, y, image);
    }

    /// Discards the contents of a texture.
    pub fn texture_invalidate(&mut self, texture: TextureId) {
        self.backend.texture_invalidate(texture);
    }

    /// Fills a texture with one color.
    pub fn texture_clear(&mut self, texture: TextureId, color: LinearRgba) {
        self.backend.texture_clear(texture, color);
    }

    // --- Framebuffers ---

    /// Creates a framebuffer.
    pub fn framebuffer_create(&mut self) -> Result<FramebufferId, ResourceError> {
        self.backend.framebuffer_create()
    }

    /// Destroys a framebuffer. If it is bound, the cached binding is forgotten.
    pub fn framebuffer_destroy(&mut self, framebuffer: FramebufferId) {
        if self.cache.framebuffer.get() == Some(Some(framebuffer)) {
            self.cache.framebuffer.invalidate();
        }
        self.backend.framebuffer_destroy(framebuffer);
    }

    /// Attaches a texture mip level, or detaches with `None`.
    pub fn framebuffer_attach(
        &mut self,
        framebuffer: FramebufferId,
        texture: Option<TextureId>,
        mipmap: u32,
        attachment: FramebufferAttachment,
    ) {
        self.backend
            .framebuffer_attach(framebuffer, texture, mipmap, attachment);
    }

    /// The texture attached at a point.
    pub fn framebuffer_attachment(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> Option<TextureId> {
        self.backend.framebuffer_attachment(framebuffer, attachment)
    }

    /// The mip level attached at a point.
    pub fn framebuffer_attachment_mipmap(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> u32 {
        self.backend
            .framebuffer_attachment_mipmap(framebuffer, attachment)
    }

    /// Sets the viewport of a framebuffer.
    ///
    /// # Panics
    ///
    /// In debug builds, if `w` or `h` is not positive.
    pub fn framebuffer_viewport(
        &mut self,
        framebuffer: Option<FramebufferId>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) {
        self.framebuffer_viewport_rect(framebuffer, FloatRect::new(x, y, w, h));
    }

    /// Sets the viewport of a framebuffer from a rectangle.
    ///
    /// # Panics
    ///
    /// In debug builds, if the rectangle is empty.
    pub fn framebuffer_viewport_rect(&mut self, framebuffer: Option<FramebufferId>, viewport: FloatRect) {
        debug_assert!(viewport.w > 0.0, "viewport width must be positive, got {}", viewport.w);
        debug_assert!(viewport.h > 0.0, "viewport height must be positive, got {}", viewport.h);
        self.backend.framebuffer_set_viewport(framebuffer, viewport);
    }

    /// The viewport of a framebuffer.
    pub fn framebuffer_viewport_current(&self, framebuffer: Option<FramebufferId>) -> FloatRect {
        self.backend.framebuffer_viewport(framebuffer)
    }

    /// Clears buffers of a framebuffer; `None` is the default framebuffer.
    pub fn framebuffer_clear(
        &mut self,
        framebuffer: Option<FramebufferId>,
        flags: ClearBufferFlags,
        color: LinearRgba,
        depth: f32,
    ) {
        self.backend.framebuffer_clear(framebuffer, flags, color, depth);
    }

    // --- Vertex buffers ---

    /// Creates a vertex buffer of `capacity` bytes.
    pub fn vertex_buffer_create(
        &mut self,
        capacity: usize,
        data: Option<&[u8]>,
    ) -> Result<VertexBufferId, ResourceError> {
        self.backend.vertex_buffer_create(capacity, data)
    }

    /// Destroys a vertex buffer.
    pub fn vertex_buffer_destroy(&mut self, buffer: VertexBufferId) {
        self.backend.vertex_buffer_destroy(buffer);
    }

    /// Capacity of a vertex buffer in bytes.
    pub fn vertex_buffer_capacity(&self, buffer: VertexBufferId) -> usize {
        self.backend.vertex_buffer_capacity(buffer)
    }

    /// Writes bytes into a vertex buffer.
    pub fn vertex_buffer_write(&mut self, buffer: VertexBufferId, offset: usize, data: &[u8]) {
        self.backend.vertex_buffer_write(buffer, offset, data);
    }

    /// Discards the contents of a vertex buffer.
    pub fn vertex_buffer_invalidate(&mut self, buffer: VertexBufferId) {
        self.backend.vertex_buffer_invalidate(buffer);
    }

    // --- Index buffers ---

    /// Creates an index buffer holding up to `capacity` indices.
    pub fn index_buffer_create(&mut self, capacity: usize) -> Result<IndexBufferId, ResourceError> {
        self.backend.index_buffer_create(capacity)
    }

    /// Destroys an index buffer.
    pub fn index_buffer_destroy(&mut self, buffer: IndexBufferId) {
        self.backend.index_buffer_destroy(buffer);
    }

    /// Capacity of an index buffer in indices.
    pub fn index_buffer_capacity(&self, buffer: IndexBufferId) -> usize {
        self.backend.index_buffer_capacity(buffer)
    }

    /// Write cursor of an index buffer.
    pub fn index_buffer_offset(&self, buffer: IndexBufferId) -> usize {
        self.backend.index_buffer_offset(buffer)
    }

    /// Moves the write cursor of an index buffer.
    pub fn index_buffer_set_offset(&mut self, buffer: IndexBufferId, offset: usize) {
        self.backend.index_buffer_set_offset(buffer, offset);
    }

    /// Appends indices, each biased by `index_offset`.
    pub fn index_buffer_add_indices(&mut self, buffer: IndexBufferId, index_offset: u32, indices: &[u16]) {
        self.backend
            .index_buffer_add_indices(buffer, index_offset, indices);
    }

    /// Discards the contents of an index buffer.
    pub fn index_buffer_invalidate(&mut self, buffer: IndexBufferId) {
        self.backend.index_buffer_invalidate(buffer);
    }

    // --- Vertex arrays ---

    /// Creates a vertex array.
    pub fn vertex_array_create(&mut self) -> Result<VertexArrayId, ResourceError> {
        self.backend.vertex_array_create()
    }

    /// Destroys a vertex array.
    pub fn vertex_array_destroy(&mut self, array: VertexArrayId) {
        self.backend.vertex_array_destroy(array);
    }

    /// References a vertex buffer at an attachment slot.
    pub fn vertex_array_attach_vertex_buffer(
        &mut self,
        array: VertexArrayId,
        buffer: VertexBufferId,
        attachment: u32,
    ) {
        self.backend
            .vertex_array_attach_vertex_buffer(array, buffer, attachment);
    }

    /// References an index buffer, or removes it with `None`.
    pub fn vertex_array_attach_index_buffer(&mut self, array: VertexArrayId, buffer: Option<IndexBufferId>) {
        self.backend.vertex_array_attach_index_buffer(array, buffer);
    }

    /// The vertex buffer at an attachment slot.
    pub fn vertex_array_vertex_attachment(
        &self,
        array: VertexArrayId,
        attachment: u32,
    ) -> Option<VertexBufferId> {
        self.backend.vertex_array_vertex_attachment(array, attachment)
    }

    /// The index buffer of a vertex array.
    pub fn vertex_array_index_attachment(&self, array: VertexArrayId) -> Option<IndexBufferId> {
        self.backend.vertex_array_index_attachment(array)
    }

    /// Sets the attribute layout of a vertex array.
    pub fn vertex_array_layout(&mut self, array: VertexArrayId, formats: &[VertexAttribFormat]) {
        self.backend.vertex_array_layout(array, formats);
    }

    // --- Debug labels ---

    /// Attaches a debug label to a resource.
    pub fn set_debug_label(&mut self, resource: impl Into<ResourceId>, label: &str) {
        self.backend.set_debug_label(resource.into(), label);
    }

    /// The debug label of a resource.
    pub fn debug_label(&self, resource: impl Into<ResourceId>) -> String {
        self.backend.debug_label(resource.into())
    }

    // --- Drawing ---

    /// Draws `count` vertices starting at `first`.
    pub fn draw(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    ) {
        self.backend
            .draw(array, primitive, first, count, instances, base_instance);
    }

    /// Draws `count` indices starting at `first`.
    pub fn draw_indexed(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    ) {
        self.backend
            .draw_indexed(array, primitive, first, count, instances, base_instance);
    }

    // --- Frame ---

    /// Flushes `batch`, if any, then presents the window.
    pub fn swap(&mut self, window: WindowId, batch: Option<&mut dyn FrameBatch<B>>) {
        if let Some(batch) = batch {
            batch.flush(self);
        }
        self.backend.swap(window);
    }

    /// Reads back the default framebuffer.
    pub fn screenshot(&mut self) -> Option<Pixmap> {
        self.backend.screenshot()
    }
}
