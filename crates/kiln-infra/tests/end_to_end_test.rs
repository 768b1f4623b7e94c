mod common;

use common::renderer;
use kiln_core::math::LinearRgba;
use kiln_core::renderer::*;
use kiln_core::Renderer;
use kiln_infra::graphics::null::{DrawRecord, NullBackend};
use kiln_infra::graphics::{create_backend, create_renderer};

#[test]
fn planned_layout_draws_exactly_once() {
    let mut renderer = renderer();

    let formats = plan_interleaved(&[VertexAttribSpec::new(VertexAttribType::Float, 2)], 0);
    assert_eq!(formats.len(), 1);
    assert_eq!(formats[0].stride, 8);
    assert_eq!(formats[0].offset, 0);

    let positions: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    let vbuf = renderer
        .vertex_buffer_create(24, Some(bytemuck::cast_slice(&positions)))
        .unwrap();
    let array = renderer.vertex_array_create().unwrap();
    renderer.vertex_array_attach_vertex_buffer(array, vbuf, 0);
    renderer.vertex_array_layout(array, &formats);

    renderer.draw(array, Primitive::Triangles, 0, 3, 1, 0);

    assert_eq!(
        renderer.backend().draws(),
        &[DrawRecord {
            array,
            primitive: Primitive::Triangles,
            first: 0,
            count: 3,
            instances: 1,
            base_instance: 0,
            indexed: false,
        }]
    );
    assert_eq!(renderer.vertex_array_vertex_attachment(array, 0), Some(vbuf));
    assert_eq!(renderer.backend().vertex_array_formats(array), formats.as_slice());
}

#[test]
#[should_panic(expected = "dangling handle")]
fn drawing_from_destroyed_vertex_buffer_panics() {
    let mut renderer = renderer();
    let vbuf = renderer.vertex_buffer_create(24, None).unwrap();
    let array = renderer.vertex_array_create().unwrap();
    renderer.vertex_array_attach_vertex_buffer(array, vbuf, 0);
    renderer.vertex_buffer_destroy(vbuf);
    renderer.draw(array, Primitive::Triangles, 0, 3, 1, 0);
}

#[test]
#[should_panic(expected = "dangling handle")]
fn drawing_from_destroyed_index_buffer_panics() {
    let mut renderer = renderer();
    let ibuf = renderer.index_buffer_create(3).unwrap();
    let array = renderer.vertex_array_create().unwrap();
    renderer.vertex_array_attach_index_buffer(array, Some(ibuf));
    renderer.index_buffer_destroy(ibuf);
    renderer.draw_indexed(array, Primitive::Triangles, 0, 3, 1, 0);
}

#[test]
fn indexed_draw_passes_parameters_through() {
    let mut renderer = renderer();
    let array = renderer.vertex_array_create().unwrap();
    let ibuf = renderer.index_buffer_create(6).unwrap();
    renderer.index_buffer_add_indices(ibuf, 0, &[0, 1, 2, 2, 1, 3]);
    renderer.vertex_array_attach_index_buffer(array, Some(ibuf));

    renderer.draw_indexed(array, Primitive::TriangleStrip, 2, 4, 3, 1);
    let draw = renderer.backend().draws()[0];
    assert!(draw.indexed);
    assert_eq!(
        (draw.first, draw.count, draw.instances, draw.base_instance),
        (2, 4, 3, 1)
    );
}

struct SpriteBatch {
    queued: u32,
    array: VertexArrayId,
}

impl<B: RendererBackend + ?Sized> FrameBatch<B> for SpriteBatch {
    fn flush(&mut self, renderer: &mut Renderer<B>) {
        if self.queued > 0 {
            renderer.draw(self.array, Primitive::Triangles, 0, self.queued * 6, 1, 0);
            self.queued = 0;
        }
    }
}

#[test]
fn swap_flushes_the_batch_first() {
    let mut renderer = renderer();
    let window = renderer
        .create_window(&WindowDescriptor::new("test", 640, 480))
        .unwrap();
    let array = renderer.vertex_array_create().unwrap();
    let mut batch = SpriteBatch { queued: 2, array };

    renderer.swap(window, Some(&mut batch));
    assert_eq!(batch.queued, 0);
    assert_eq!(renderer.backend().draws().len(), 1);
    assert_eq!(renderer.backend().draws()[0].count, 12);
    assert_eq!(renderer.backend().stats().swaps, 1);

    renderer.swap(window, None);
    assert_eq!(renderer.backend().draws().len(), 1);
    assert_eq!(renderer.backend().stats().swaps, 2);
}

#[test]
fn failed_compilation_is_returned_not_recovered() {
    let mut renderer = renderer();
    let source = ShaderSource::glsl(
        ShaderStage::Fragment,
        GlslVersion::new(330, GlslProfile::Core),
        "",
    );
    let err = renderer.shader_object_compile(&source).unwrap_err();
    assert!(matches!(
        err,
        ResourceError::Shader(ShaderError::CompilationFailed { .. })
    ));
    assert!(matches!(
        renderer.shader_program_link(&[]),
        Err(ResourceError::Shader(ShaderError::EmptyProgram))
    ));
    assert_eq!(renderer.backend().live_resources(), 0);
}

#[test]
fn texture_accessors_derive_from_size() {
    let mut renderer = renderer();
    let mut params = TextureParams::new(64, 16, TextureFormat::Rgba8);
    params.mipmaps = 3;
    let tex = renderer.texture_create(&params).unwrap();

    assert_eq!(renderer.texture_size(tex, 2), (16, 4));
    assert_eq!(renderer.texture_width(tex, 1), 32);
    assert_eq!(renderer.texture_height(tex, 1), 8);

    renderer.texture_set_filter(
        tex,
        TextureFilter {
            min: TextureFilterMode::LinearMipmapLinear,
            mag: TextureFilterMode::Nearest,
        },
    );
    assert_eq!(renderer.texture_params(tex).filter.mag, TextureFilterMode::Nearest);

    renderer.set_debug_label(tex, "atlas");
    assert_eq!(renderer.debug_label(tex), "atlas");
}

#[test]
fn framebuffer_attachments_round_trip() {
    let mut renderer = renderer();
    let color = renderer
        .texture_create(&TextureParams::new(8, 8, TextureFormat::Rgba8))
        .unwrap();
    let depth = renderer
        .texture_create(&TextureParams::new(8, 8, TextureFormat::Depth32Float))
        .unwrap();
    let fb = renderer.framebuffer_create().unwrap();

    renderer.framebuffer_attach(fb, Some(color), 0, FramebufferAttachment::Color0);
    renderer.framebuffer_attach(fb, Some(depth), 0, FramebufferAttachment::Depth);
    assert_eq!(renderer.framebuffer_attachment(fb, FramebufferAttachment::Color0), Some(color));
    assert_eq!(renderer.framebuffer_attachment(fb, FramebufferAttachment::Color1), None);

    renderer.framebuffer_clear(Some(fb), ClearBufferFlags::COLOR, LinearRgba::rgb(1.0, 0.0, 0.0), 1.0);
    assert_eq!(&renderer.backend().texture_data(color, 0)[..4], &[255, 0, 0, 255]);

    renderer.framebuffer_attach(fb, None, 0, FramebufferAttachment::Color0);
    assert_eq!(renderer.framebuffer_attachment(fb, FramebufferAttachment::Color0), None);
}

#[test]
fn screenshot_reflects_default_clear() {
    let mut renderer = renderer();
    assert!(renderer.screenshot().is_none());
    renderer
        .create_window(&WindowDescriptor::new("shot", 2, 2))
        .unwrap();
    renderer.framebuffer_clear(None, ClearBufferFlags::ALL, LinearRgba::rgb(0.0, 0.0, 1.0), 1.0);

    let shot = renderer.screenshot().unwrap();
    assert_eq!((shot.width, shot.height), (2, 2));
    assert_eq!(&shot.data[..4], &[0, 0, 255, 255]);
}

#[test]
fn settings_select_and_initialize_backend() {
    let settings = RendererSettings::from_json_str(r#"{ "backend": "null", "vsync": "none" }"#).unwrap();
    let mut renderer = create_renderer(settings).unwrap();
    renderer.post_init();
    assert_eq!(renderer.backend().name(), "null");
    assert_eq!(renderer.vsync(), VsyncMode::None);
    assert_eq!(renderer.blend_mode(), BlendMode::PREMUL_ALPHA);

    let unknown = RendererSettings::default().with_backend_override(Some("vulkan".into()));
    let err = create_backend(&unknown).unwrap_err();
    assert!(err.to_string().contains("available: null"));
}

#[test]
fn initial_state_is_read_from_json() {
    let json = serde_json::json!({
        "backend": "NULL",
        "initial_state": {
            "capabilities": ["depth_test"],
            "depth_func": "always",
            "cull_face": "front",
            "clear_color": [0.0, 1.0, 0.0, 1.0]
        }
    });
    let settings = RendererSettings::from_json_str(&json.to_string()).unwrap();
    let mut renderer = create_renderer(settings).unwrap();
    renderer.post_init();

    assert_eq!(renderer.capabilities(), CapabilityBits::DEPTH_TEST);
    assert_eq!(renderer.depth_func(), DepthTestFunc::Always);
    assert_eq!(renderer.cull_face(), CullFaceMode::Front);
    assert_eq!(renderer.blend_mode(), BlendMode::PREMUL_ALPHA);

    renderer
        .create_window(&WindowDescriptor::new("json", 1, 1))
        .unwrap();
    let shot = renderer.screenshot().unwrap();
    assert_eq!(shot.data, vec![0, 255, 0, 255]);
}

#[test]
fn double_init_is_a_backend_error() {
    let mut renderer = Renderer::new(Box::new(NullBackend::new()), RendererSettings::default());
    renderer.init().unwrap();
    assert!(matches!(
        renderer.init(),
        Err(RenderError::BackendInit { .. })
    ));
}

#[test]
fn shutdown_releases_everything() {
    let mut renderer = renderer();
    renderer.vertex_array_create().unwrap();
    renderer.framebuffer_create().unwrap();
    assert_eq!(renderer.backend().live_resources(), 2);
    renderer.shutdown();
    assert_eq!(renderer.backend().live_resources(), 0);
    assert!(!renderer.backend().is_initialized());
}
