#![allow(dead_code)]

use kiln_core::renderer::*;
use kiln_core::Renderer;
use kiln_infra::graphics::null::NullBackend;
use kiln_infra::logging::init_test_logging;

/// A fully initialized renderer over a fresh null backend, with counters reset.
pub fn renderer() -> Renderer<NullBackend> {
    init_test_logging();
    let mut renderer = Renderer::new(Box::new(NullBackend::new()), RendererSettings::default());
    renderer.init().unwrap();
    renderer.post_init();
    renderer.backend_mut().reset_stats();
    renderer
}

/// Compiles and links a two-stage GLSL 330 program.
pub fn program(renderer: &mut Renderer<NullBackend>, vertex: &str, fragment: &str) -> ShaderProgramId {
    let version = GlslVersion::new(330, GlslProfile::Core);
    let vs = renderer
        .shader_object_compile(&ShaderSource::glsl(ShaderStage::Vertex, version, vertex))
        .unwrap();
    let fs = renderer
        .shader_object_compile(&ShaderSource::glsl(ShaderStage::Fragment, version, fragment))
        .unwrap();
    renderer.shader_program_link(&[vs, fs]).unwrap()
}

/// Reinterprets uniform bytes as `f32`s.
pub fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(bytemuck::pod_read_unaligned)
        .collect()
}
