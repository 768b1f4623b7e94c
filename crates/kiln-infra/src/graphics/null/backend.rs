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

//! A headless backend that keeps every object in memory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use kiln_core::math::LinearRgba;
use kiln_core::renderer::{
    BlendMode, CapabilityBits, ClearBufferFlags, CullFaceMode, DepthTestFunc, FloatRect,
    FramebufferAttachment, FramebufferId, GlslProfile, GlslVersion, IndexBufferId, Pixmap,
    Primitive, RenderError, RendererBackend, RendererFeature, RendererSettings, ResourceError,
    ResourceId, ShaderError, ShaderLangInfo, ShaderLangSupport, ShaderObjectId, ShaderProgramId,
    ShaderSource, TextureFilter, TextureFormat, TextureId, TextureParams, TextureWrap,
    UniformId, UniformType, VertexArrayId, VertexAttribFormat, VertexBufferId, VsyncMode,
    WindowDescriptor, WindowId,
};

use super::introspect::scan_uniforms;
use super::resources::{
    encode_texel, FramebufferEntry, IndexBufferEntry, ShaderObjectEntry, ShaderProgramEntry,
    TextureEntry, UniformEntry, VertexArrayEntry, VertexBufferEntry,
};
use super::stats::{ClearRecord, DrawRecord, NullBackendStats};

const BACKEND_NAME: &str = "null";

/// The oldest GLSL version accepted as-is.
const MIN_GLSL_VERSION: u32 = 330;

fn entry<K: Copy + Eq + Hash + Debug, V>(map: &HashMap<K, V>, id: K) -> &V {
    match map.get(&id) {
        Some(entry) => entry,
        None => panic!("NullBackend: dangling handle {id:?}"),
    }
}

fn entry_mut<K: Copy + Eq + Hash + Debug, V>(map: &mut HashMap<K, V>, id: K) -> &mut V {
    match map.get_mut(&id) {
        Some(entry) => entry,
        None => panic!("NullBackend: dangling handle {id:?}"),
    }
}

#[derive(Debug, Clone, Copy)]
struct PipelineState {
    capabilities: CapabilityBits,
    color: LinearRgba,
    blend_mode: BlendMode,
    cull_face: CullFaceMode,
    depth_func: DepthTestFunc,
    shader: Option<ShaderProgramId>,
    framebuffer: Option<FramebufferId>,
    vsync: VsyncMode,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            capabilities: CapabilityBits::NONE,
            color: LinearRgba::WHITE,
            blend_mode: BlendMode::NONE,
            cull_face: CullFaceMode::Back,
            depth_func: DepthTestFunc::Less,
            shader: None,
            framebuffer: None,
            vsync: VsyncMode::Normal,
        }
    }
}

/// A [`RendererBackend`] that renders nothing.
///
/// Every object lives in a hash table keyed by its handle, and every state
/// change, uniform upload and draw call is counted or recorded, which makes
/// the null backend usable both headless and as a test double.
#[derive(Debug, Default)]
pub struct NullBackend {
    initialized: bool,
    state: PipelineState,
    next_id: usize,

    windows: HashMap<WindowId, WindowDescriptor>,
    default_size: Option<(u32, u32)>,
    default_viewport: FloatRect,
    default_clear_color: Option<LinearRgba>,

    textures: HashMap<TextureId, TextureEntry>,
    framebuffers: HashMap<FramebufferId, FramebufferEntry>,
    vertex_buffers: HashMap<VertexBufferId, VertexBufferEntry>,
    index_buffers: HashMap<IndexBufferId, IndexBufferEntry>,
    vertex_arrays: HashMap<VertexArrayId, VertexArrayEntry>,
    shader_objects: HashMap<ShaderObjectId, ShaderObjectEntry>,
    shader_programs: HashMap<ShaderProgramId, ShaderProgramEntry>,
    uniforms: HashMap<UniformId, UniformEntry>,
    labels: HashMap<ResourceId, String>,

    stats: NullBackendStats,
    draws: Vec<DrawRecord>,
    last_clear: Option<ClearRecord>,
}

impl NullBackend {
    /// Creates an uninitialized backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    /// Whether [`RendererBackend::init`] succeeded and no shutdown followed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Call counters since creation or the last [`NullBackend::reset_stats`].
    pub fn stats(&self) -> NullBackendStats {
        self.stats
    }

    /// Every draw call received, oldest first.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// The most recent clear.
    pub fn last_clear(&self) -> Option<ClearRecord> {
        self.last_clear
    }

    /// Zeroes the counters and forgets recorded draws.
    pub fn reset_stats(&mut self) {
        self.stats = NullBackendStats::default();
        self.draws.clear();
        self.last_clear = None;
    }

    /// Number of live GPU objects of every kind.
    pub fn live_resources(&self) -> usize {
        self.textures.len()
            + self.framebuffers.len()
            + self.vertex_buffers.len()
            + self.index_buffers.len()
            + self.vertex_arrays.len()
            + self.shader_objects.len()
            + self.shader_programs.len()
    }

    /// The bytes last uploaded to a uniform, covering the whole array.
    pub fn uniform_data(&self, uniform: UniformId) -> &[u8] {
        &entry(&self.uniforms, uniform).data
    }

    /// The texel bytes of a texture mip level.
    pub fn texture_data(&self, texture: TextureId, mipmap: u32) -> &[u8] {
        &entry(&self.textures, texture).levels[mipmap as usize]
    }

    /// The contents of a vertex buffer.
    pub fn vertex_buffer_data(&self, buffer: VertexBufferId) -> &[u8] {
        &entry(&self.vertex_buffers, buffer).data
    }

    /// The contents of an index buffer.
    pub fn index_buffer_data(&self, buffer: IndexBufferId) -> &[u16] {
        &entry(&self.index_buffers, buffer).indices
    }

    /// The attribute layout of a vertex array.
    pub fn vertex_array_formats(&self, array: VertexArrayId) -> &[VertexAttribFormat] {
        &entry(&self.vertex_arrays, array).layout
    }

    fn assert_live(&self, resource: ResourceId) {
        let live = match resource {
            ResourceId::Texture(id) => self.textures.contains_key(&id),
            ResourceId::Framebuffer(id) => self.framebuffers.contains_key(&id),
            ResourceId::VertexBuffer(id) => self.vertex_buffers.contains_key(&id),
            ResourceId::IndexBuffer(id) => self.index_buffers.contains_key(&id),
            ResourceId::VertexArray(id) => self.vertex_arrays.contains_key(&id),
            ResourceId::ShaderObject(id) => self.shader_objects.contains_key(&id),
            ResourceId::ShaderProgram(id) => self.shader_programs.contains_key(&id),
        };
        assert!(live, "NullBackend: dangling handle {resource:?}");
    }

    fn forget(&mut self, resource: ResourceId) {
        self.labels.remove(&resource);
        log::debug!("NullBackend: Destroyed {resource:?}");
    }

    fn record_draw(&mut self, record: DrawRecord) {
        let array = entry(&self.vertex_arrays, record.array);
        if record.indexed {
            assert!(
                array.index_buffer.is_some(),
                "NullBackend: indexed draw from {:?} without an index buffer",
                record.array
            );
        }
        for buffer in array.vertex_buffers.values() {
            self.assert_live((*buffer).into());
        }
        if let Some(buffer) = array.index_buffer {
            self.assert_live(buffer.into());
        }
        self.draws.push(record);
    }
}

fn max_mip_levels(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).leading_zeros()
}

fn resource_index(resource: ResourceId) -> usize {
    match resource {
        ResourceId::Texture(id) => id.0,
        ResourceId::Framebuffer(id) => id.0,
        ResourceId::VertexBuffer(id) => id.0,
        ResourceId::IndexBuffer(id) => id.0,
        ResourceId::VertexArray(id) => id.0,
        ResourceId::ShaderObject(id) => id.0,
        ResourceId::ShaderProgram(id) => id.0,
    }
}

impl RendererBackend for NullBackend {
    // --- Lifecycle ---

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn init(&mut self, settings: &RendererSettings) -> Result<(), RenderError> {
        if self.initialized {
            return Err(RenderError::BackendInit {
                backend: BACKEND_NAME.to_string(),
                reason: "already initialized".to_string(),
            });
        }
        self.initialized = true;
        self.state.vsync = settings.vsync;
        log::info!("NullBackend: Initialized (vsync: {:?})", settings.vsync);
        Ok(())
    }

    fn post_init(&mut self) {
        log::debug!("NullBackend: Post-init complete");
    }

    fn shutdown(&mut self) {
        let live = self.live_resources();
        if live > 0 {
            log::debug!("NullBackend: Releasing {live} live resources at shutdown");
        }
        *self = Self {
            stats: self.stats,
            draws: std::mem::take(&mut self.draws),
            last_clear: self.last_clear,
            ..Self::default()
        };
        log::info!("NullBackend: Shut down");
    }

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Result<WindowId, RenderError> {
        if descriptor.width == 0 || descriptor.height == 0 {
            return Err(RenderError::BackendInit {
                backend: BACKEND_NAME.to_string(),
                reason: format!(
                    "cannot create a {}x{} window",
                    descriptor.width, descriptor.height
                ),
            });
        }

        let id = WindowId(self.generate_id());
        if self.default_size.is_none() {
            self.default_size = Some((descriptor.width, descriptor.height));
            self.default_viewport =
                FloatRect::new(0.0, 0.0, descriptor.width as f32, descriptor.height as f32);
        }
        self.windows.insert(id, descriptor.clone());
        log::debug!(
            "NullBackend: Created window '{}' ({}x{}) with ID: {id:?}",
            descriptor.title,
            descriptor.width,
            descriptor.height
        );
        Ok(id)
    }

    fn supports(&self, _feature: RendererFeature) -> bool {
        true
    }

    // --- Pipeline state ---

    fn capabilities(&self) -> CapabilityBits {
        self.state.capabilities
    }

    fn set_capabilities(&mut self, capabilities: CapabilityBits) {
        self.stats.capability_changes += 1;
        self.state.capabilities = capabilities;
    }

    fn color(&self) -> LinearRgba {
        self.state.color
    }

    fn set_color(&mut self, color: LinearRgba) {
        self.stats.color_changes += 1;
        self.state.color = color;
    }

    fn blend_mode(&self) -> BlendMode {
        self.state.blend_mode
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.stats.blend_mode_changes += 1;
        self.state.blend_mode = mode;
    }

    fn cull_face(&self) -> CullFaceMode {
        self.state.cull_face
    }

    fn set_cull_face(&mut self, mode: CullFaceMode) {
        self.stats.cull_face_changes += 1;
        self.state.cull_face = mode;
    }

    fn depth_func(&self) -> DepthTestFunc {
        self.state.depth_func
    }

    fn set_depth_func(&mut self, func: DepthTestFunc) {
        self.stats.depth_func_changes += 1;
        self.state.depth_func = func;
    }

    fn shader(&self) -> Option<ShaderProgramId> {
        self.state.shader
    }

    fn set_shader(&mut self, program: Option<ShaderProgramId>) {
        if let Some(program) = program {
            self.assert_live(program.into());
        }
        self.stats.shader_changes += 1;
        self.state.shader = program;
    }

    fn framebuffer(&self) -> Option<FramebufferId> {
        self.state.framebuffer
    }

    fn set_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        if let Some(framebuffer) = framebuffer {
            self.assert_live(framebuffer.into());
        }
        self.stats.framebuffer_changes += 1;
        self.state.framebuffer = framebuffer;
    }

    fn vsync(&self) -> VsyncMode {
        self.state.vsync
    }

    fn set_vsync(&mut self, mode: VsyncMode) {
        self.stats.vsync_changes += 1;
        self.state.vsync = mode;
    }

    // --- Shaders ---

    fn shader_language_supported(&self, lang: &ShaderLangInfo) -> ShaderLangSupport {
        match lang {
            ShaderLangInfo::Glsl(version)
                if version.version >= MIN_GLSL_VERSION
                    && matches!(version.profile, GlslProfile::Core | GlslProfile::None) =>
            {
                ShaderLangSupport::Supported
            }
            ShaderLangInfo::Glsl(_) => ShaderLangSupport::Alternative(ShaderLangInfo::Glsl(
                GlslVersion::new(MIN_GLSL_VERSION, GlslProfile::Core),
            )),
            ShaderLangInfo::Spirv => ShaderLangSupport::Unsupported,
        }
    }

    fn shader_object_compile(
        &mut self,
        source: &ShaderSource,
    ) -> Result<ShaderObjectId, ResourceError> {
        let label = format!("{:?} shader", source.stage);
        let failure = |log: String| ShaderError::CompilationFailed {
            stage: source.stage,
            label: label.clone(),
            log,
        };

        if !self.shader_language_supported(&source.lang).is_supported() {
            return Err(failure(format!("unsupported shading language {:?}", source.lang)).into());
        }
        if source.content.trim().is_empty() {
            return Err(failure("empty shader source".to_string()).into());
        }

        let id = ShaderObjectId(self.generate_id());
        self.shader_objects.insert(
            id,
            ShaderObjectEntry {
                stage: source.stage,
                lang: source.lang,
                source: source.content.clone(),
            },
        );
        log::debug!("NullBackend: Compiled {label} with ID: {id:?}");
        Ok(id)
    }

    fn shader_object_destroy(&mut self, object: ShaderObjectId) {
        self.assert_live(object.into());
        self.shader_objects.remove(&object);
        self.forget(object.into());
    }

    fn shader_program_link(
        &mut self,
        objects: &[ShaderObjectId],
    ) -> Result<ShaderProgramId, ResourceError> {
        if objects.is_empty() {
            return Err(ShaderError::EmptyProgram.into());
        }

        // name -> (type, array size), in declaration order
        let mut declared: Vec<(String, UniformType, usize)> = Vec::new();
        for &object in objects {
            let object_entry = entry(&self.shader_objects, object);
            log::trace!(
                "NullBackend: Linking {:?} object {object:?} ({:?})",
                object_entry.stage,
                object_entry.lang
            );
            for decl in scan_uniforms(&object_entry.source) {
                match declared.iter_mut().find(|(name, ..)| *name == decl.name) {
                    Some((name, utype, _)) if *utype != decl.utype => {
                        return Err(ShaderError::LinkFailed {
                            label: "shader program".to_string(),
                            log: format!(
                                "uniform '{name}' declared as both {utype:?} and {:?}",
                                decl.utype
                            ),
                        }
                        .into());
                    }
                    Some((_, _, size)) => *size = (*size).max(decl.array_size),
                    None => declared.push((decl.name, decl.utype, decl.array_size)),
                }
            }
        }

        let program = ShaderProgramId(self.generate_id());
        let mut uniforms = HashMap::with_capacity(declared.len());
        for (name, utype, array_size) in declared {
            let uniform = UniformId(self.generate_id());
            self.uniforms.insert(
                uniform,
                UniformEntry::new(program, name.clone(), utype, array_size),
            );
            uniforms.insert(name, uniform);
        }

        log::debug!(
            "NullBackend: Linked program {program:?} from {} objects with {} uniforms",
            objects.len(),
            uniforms.len()
        );
        self.shader_programs.insert(
            program,
            ShaderProgramEntry {
                objects: objects.to_vec(),
                uniforms,
            },
        );
        Ok(program)
    }

    fn shader_program_destroy(&mut self, program: ShaderProgramId) {
        self.assert_live(program.into());
        if let Some(removed) = self.shader_programs.remove(&program) {
            for uniform in removed.uniforms.values() {
                self.uniforms.remove(uniform);
            }
            log::trace!(
                "NullBackend: Program {program:?} was linked from {:?}",
                removed.objects
            );
        }
        if self.state.shader == Some(program) {
            self.state.shader = None;
        }
        self.forget(program.into());
    }

    fn shader_uniform(&self, program: ShaderProgramId, name: &str) -> Option<UniformId> {
        entry(&self.shader_programs, program)
            .uniforms
            .get(name)
            .copied()
    }

    fn uniform_type(&self, uniform: UniformId) -> UniformType {
        entry(&self.uniforms, uniform).utype
    }

    fn uniform(&mut self, uniform: UniformId, offset: usize, count: usize, data: &[u8]) {
        self.stats.uniform_uploads += 1;
        let uniform_entry = entry_mut(&mut self.uniforms, uniform);
        debug_assert!(
            self.shader_programs.contains_key(&uniform_entry.program),
            "uniform {uniform:?} outlived its program"
        );
        uniform_entry.write(offset, count, data);
    }

    // --- Textures ---

    fn texture_create(&mut self, params: &TextureParams) -> Result<TextureId, ResourceError> {
        let invalid = |reason: String| ResourceError::InvalidParameters {
            kind: "texture",
            reason,
        };
        if params.width == 0 || params.height == 0 {
            return Err(invalid(format!(
                "zero-sized texture {}x{}",
                params.width, params.height
            )));
        }
        let max_levels = max_mip_levels(params.width, params.height);
        if params.mipmaps == 0 || params.mipmaps > max_levels {
            return Err(invalid(format!(
                "{} mip levels requested, {}x{} allows 1..={max_levels}",
                params.mipmaps, params.width, params.height
            )));
        }

        let id = TextureId(self.generate_id());
        self.textures.insert(id, TextureEntry::new(*params));
        log::debug!(
            "NullBackend: Created {}x{} {:?} texture with ID: {id:?}",
            params.width,
            params.height,
            params.format
        );
        Ok(id)
    }

    fn texture_destroy(&mut self, texture: TextureId) {
        self.assert_live(texture.into());
        self.textures.remove(&texture);
        self.forget(texture.into());
    }

    fn texture_params(&self, texture: TextureId) -> TextureParams {
        entry(&self.textures, texture).params
    }

    fn texture_size(&self, texture: TextureId, mipmap: u32) -> (u32, u32) {
        let params = entry(&self.textures, texture).params;
        assert!(
            mipmap < params.mipmaps,
            "NullBackend: {texture:?} has no mip level {mipmap}"
        );
        params.mip_size(mipmap)
    }

    fn texture_set_filter(&mut self, texture: TextureId, filter: TextureFilter) {
        entry_mut(&mut self.textures, texture).params.filter = filter;
    }

    fn texture_set_wrap(&mut self, texture: TextureId, wrap: TextureWrap) {
        entry_mut(&mut self.textures, texture).params.wrap = wrap;
    }

    fn texture_fill(&mut self, texture: TextureId, mipmap: u32, image: &Pixmap) {
        entry_mut(&mut self.textures, texture).fill(mipmap, image);
    }

    fn texture_fill_region(
        &mut self,
        texture: TextureId,
        mipmap: u32,
        x: u32,
        y: u32,
        image: &Pixmap,
    ) {
        entry_mut(&mut self.textures, texture).fill_region(mipmap, x, y, image);
    }

    fn texture_invalidate(&mut self, texture: TextureId) {
        entry_mut(&mut self.textures, texture).invalidate();
    }

    fn texture_clear(&mut self, texture: TextureId, color: LinearRgba) {
        entry_mut(&mut self.textures, texture).clear(color);
    }

    // --- Framebuffers ---

    fn framebuffer_create(&mut self) -> Result<FramebufferId, ResourceError> {
        let id = FramebufferId(self.generate_id());
        self.framebuffers.insert(id, FramebufferEntry::default());
        log::debug!("NullBackend: Created framebuffer with ID: {id:?}");
        Ok(id)
    }

    fn framebuffer_destroy(&mut self, framebuffer: FramebufferId) {
        self.assert_live(framebuffer.into());
        self.framebuffers.remove(&framebuffer);
        if self.state.framebuffer == Some(framebuffer) {
            self.state.framebuffer = None;
        }
        self.forget(framebuffer.into());
    }

    fn framebuffer_attach(
        &mut self,
        framebuffer: FramebufferId,
        texture: Option<TextureId>,
        mipmap: u32,
        attachment: FramebufferAttachment,
    ) {
        if let Some(texture) = texture {
            let params = entry(&self.textures, texture).params;
            assert!(
                mipmap < params.mipmaps,
                "NullBackend: {texture:?} has no mip level {mipmap}"
            );
            assert_eq!(
                params.format.is_depth(),
                attachment == FramebufferAttachment::Depth,
                "NullBackend: {:?} texture cannot be attached as {attachment:?}",
                params.format
            );
        }

        let fb = entry_mut(&mut self.framebuffers, framebuffer);
        match texture {
            Some(texture) => {
                fb.attachments.insert(attachment, (texture, mipmap));
            }
            None => {
                fb.attachments.remove(&attachment);
            }
        }
    }

    fn framebuffer_attachment(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> Option<TextureId> {
        entry(&self.framebuffers, framebuffer)
            .attachments
            .get(&attachment)
            .map(|&(texture, _)| texture)
    }

    fn framebuffer_attachment_mipmap(
        &self,
        framebuffer: FramebufferId,
        attachment: FramebufferAttachment,
    ) -> u32 {
        entry(&self.framebuffers, framebuffer)
            .attachments
            .get(&attachment)
            .map_or(0, |&(_, mipmap)| mipmap)
    }

    fn framebuffer_set_viewport(&mut self, framebuffer: Option<FramebufferId>, viewport: FloatRect) {
        match framebuffer {
            Some(framebuffer) => entry_mut(&mut self.framebuffers, framebuffer).viewport = viewport,
            None => self.default_viewport = viewport,
        }
    }

    fn framebuffer_viewport(&self, framebuffer: Option<FramebufferId>) -> FloatRect {
        match framebuffer {
            Some(framebuffer) => entry(&self.framebuffers, framebuffer).viewport,
            None => self.default_viewport,
        }
    }

    fn framebuffer_clear(
        &mut self,
        framebuffer: Option<FramebufferId>,
        flags: ClearBufferFlags,
        color: LinearRgba,
        depth: f32,
    ) {
        self.stats.clears += 1;
        self.last_clear = Some(ClearRecord {
            framebuffer,
            flags,
            color,
            depth,
        });

        let Some(framebuffer) = framebuffer else {
            if flags.contains(ClearBufferFlags::COLOR) {
                self.default_clear_color = Some(color);
            }
            return;
        };

        let attachments: Vec<_> = entry(&self.framebuffers, framebuffer)
            .attachments
            .iter()
            .map(|(&attachment, &target)| (attachment, target))
            .collect();
        for (attachment, (texture, mipmap)) in attachments {
            let is_depth = attachment == FramebufferAttachment::Depth;
            let wanted = if is_depth {
                ClearBufferFlags::DEPTH
            } else {
                ClearBufferFlags::COLOR
            };
            if flags.contains(wanted) {
                let value = if is_depth {
                    LinearRgba::new(depth, depth, depth, 1.0)
                } else {
                    color
                };
                entry_mut(&mut self.textures, texture).clear_level(mipmap, value);
            }
        }
    }

    // --- Vertex buffers ---

    fn vertex_buffer_create(
        &mut self,
        capacity: usize,
        data: Option<&[u8]>,
    ) -> Result<VertexBufferId, ResourceError> {
        let mut contents = vec![0; capacity];
        if let Some(data) = data {
            if data.len() > capacity {
                return Err(ResourceError::InvalidParameters {
                    kind: "vertex buffer",
                    reason: format!(
                        "{} bytes of initial data exceed capacity {capacity}",
                        data.len()
                    ),
                });
            }
            contents[..data.len()].copy_from_slice(data);
        }

        let id = VertexBufferId(self.generate_id());
        self.vertex_buffers
            .insert(id, VertexBufferEntry { data: contents });
        log::debug!("NullBackend: Created vertex buffer ({capacity} bytes) with ID: {id:?}");
        Ok(id)
    }

    fn vertex_buffer_destroy(&mut self, buffer: VertexBufferId) {
        self.assert_live(buffer.into());
        self.vertex_buffers.remove(&buffer);
        self.forget(buffer.into());
    }

    fn vertex_buffer_capacity(&self, buffer: VertexBufferId) -> usize {
        entry(&self.vertex_buffers, buffer).data.len()
    }

    fn vertex_buffer_write(&mut self, buffer: VertexBufferId, offset: usize, data: &[u8]) {
        let contents = &mut entry_mut(&mut self.vertex_buffers, buffer).data;
        assert!(
            offset + data.len() <= contents.len(),
            "NullBackend: write of {} bytes at {offset} overflows {buffer:?} ({} bytes)",
            data.len(),
            contents.len()
        );
        contents[offset..offset + data.len()].copy_from_slice(data);
    }

    fn vertex_buffer_invalidate(&mut self, buffer: VertexBufferId) {
        entry_mut(&mut self.vertex_buffers, buffer).data.fill(0);
    }

    // --- Index buffers ---

    fn index_buffer_create(&mut self, capacity: usize) -> Result<IndexBufferId, ResourceError> {
        let id = IndexBufferId(self.generate_id());
        self.index_buffers.insert(
            id,
            IndexBufferEntry {
                indices: vec![0; capacity],
                offset: 0,
            },
        );
        log::debug!("NullBackend: Created index buffer ({capacity} indices) with ID: {id:?}");
        Ok(id)
    }

    fn index_buffer_destroy(&mut self, buffer: IndexBufferId) {
        self.assert_live(buffer.into());
        self.index_buffers.remove(&buffer);
        self.forget(buffer.into());
    }

    fn index_buffer_capacity(&self, buffer: IndexBufferId) -> usize {
        entry(&self.index_buffers, buffer).indices.len()
    }

    fn index_buffer_offset(&self, buffer: IndexBufferId) -> usize {
        entry(&self.index_buffers, buffer).offset
    }

    fn index_buffer_set_offset(&mut self, buffer: IndexBufferId, offset: usize) {
        let ib = entry_mut(&mut self.index_buffers, buffer);
        assert!(
            offset <= ib.indices.len(),
            "NullBackend: offset {offset} past the end of {buffer:?}"
        );
        ib.offset = offset;
    }

    fn index_buffer_add_indices(&mut self, buffer: IndexBufferId, index_offset: u32, indices: &[u16]) {
        let ib = entry_mut(&mut self.index_buffers, buffer);
        let end = ib.offset + indices.len();
        assert!(
            end <= ib.indices.len(),
            "NullBackend: {} indices overflow {buffer:?} at offset {}",
            indices.len(),
            ib.offset
        );
        for (dst, &index) in ib.indices[ib.offset..end].iter_mut().zip(indices) {
            let biased = u32::from(index) + index_offset;
            *dst = match u16::try_from(biased) {
                Ok(v) => v,
                Err(_) => panic!("NullBackend: index {biased} does not fit 16 bits"),
            };
        }
        ib.offset = end;
    }

    fn index_buffer_invalidate(&mut self, buffer: IndexBufferId) {
        let ib = entry_mut(&mut self.index_buffers, buffer);
        ib.indices.fill(0);
        ib.offset = 0;
    }

    // --- Vertex arrays ---

    fn vertex_array_create(&mut self) -> Result<VertexArrayId, ResourceError> {
        let id = VertexArrayId(self.generate_id());
        self.vertex_arrays.insert(id, VertexArrayEntry::default());
        log::debug!("NullBackend: Created vertex array with ID: {id:?}");
        Ok(id)
    }

    fn vertex_array_destroy(&mut self, array: VertexArrayId) {
        self.assert_live(array.into());
        self.vertex_arrays.remove(&array);
        self.forget(array.into());
    }

    fn vertex_array_attach_vertex_buffer(
        &mut self,
        array: VertexArrayId,
        buffer: VertexBufferId,
        attachment: u32,
    ) {
        self.assert_live(buffer.into());
        entry_mut(&mut self.vertex_arrays, array)
            .vertex_buffers
            .insert(attachment, buffer);
    }

    fn vertex_array_attach_index_buffer(&mut self, array: VertexArrayId, buffer: Option<IndexBufferId>) {
        if let Some(buffer) = buffer {
            self.assert_live(buffer.into());
        }
        entry_mut(&mut self.vertex_arrays, array).index_buffer = buffer;
    }

    fn vertex_array_vertex_attachment(
        &self,
        array: VertexArrayId,
        attachment: u32,
    ) -> Option<VertexBufferId> {
        entry(&self.vertex_arrays, array)
            .vertex_buffers
            .get(&attachment)
            .copied()
    }

    fn vertex_array_index_attachment(&self, array: VertexArrayId) -> Option<IndexBufferId> {
        entry(&self.vertex_arrays, array).index_buffer
    }

    fn vertex_array_layout(&mut self, array: VertexArrayId, formats: &[VertexAttribFormat]) {
        entry_mut(&mut self.vertex_arrays, array).layout = formats.to_vec();
    }

    // --- Debug labels ---

    fn set_debug_label(&mut self, resource: ResourceId, label: &str) {
        self.assert_live(resource);
        self.labels.insert(resource, label.to_string());
    }

    fn debug_label(&self, resource: ResourceId) -> String {
        self.assert_live(resource);
        match self.labels.get(&resource) {
            Some(label) => label.clone(),
            None => format!("{} #{}", resource.kind(), resource_index(resource)),
        }
    }

    // --- Drawing ---

    fn draw(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    ) {
        self.record_draw(DrawRecord {
            array,
            primitive,
            first,
            count,
            instances,
            base_instance,
            indexed: false,
        });
    }

    fn draw_indexed(
        &mut self,
        array: VertexArrayId,
        primitive: Primitive,
        first: u32,
        count: u32,
        instances: u32,
        base_instance: u32,
    ) {
        self.record_draw(DrawRecord {
            array,
            primitive,
            first,
            count,
            instances,
            base_instance,
            indexed: true,
        });
    }

    // --- Frame ---

    fn swap(&mut self, window: WindowId) {
        assert!(
            self.windows.contains_key(&window),
            "NullBackend: dangling handle {window:?}"
        );
        self.stats.swaps += 1;
    }

    fn screenshot(&mut self) -> Option<Pixmap> {
        let (width, height) = self.default_size?;
        let mut pixmap = Pixmap::new(width, height, TextureFormat::Rgba8);
        let clear_color = self.default_clear_color.unwrap_or(LinearRgba::BLACK);
        if let Some(texel) = encode_texel(TextureFormat::Rgba8, clear_color) {
            for dst in pixmap.data.chunks_exact_mut(texel.len()) {
                dst.copy_from_slice(&texel);
            }
        }
        Some(pixmap)
    }
}
