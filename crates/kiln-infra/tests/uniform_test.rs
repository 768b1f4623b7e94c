mod common;

use approx::assert_relative_eq;
use common::{floats, program, renderer};
use kiln_core::math::{Complex, LinearRgba, Mat4, Vec3};
use kiln_core::renderer::*;

const VERTEX: &str = "uniform mat4 transform;\nvoid main() {}";
const FRAGMENT: &str = r#"
uniform float time;
uniform vec2 z;
uniform vec2 zs[3];
uniform vec3 tint;
uniform vec4 color;
uniform float weights[4];
uniform sampler2D tex;
void main() {}
"#;

#[test]
fn absent_uniforms_are_silent_no_ops() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));

    renderer.uniform_float(None, 1.0);
    renderer.uniform_mat4(None, Mat4::IDENTITY);
    renderer.uniform_vec2_array_complex(None, 0, &[Complex::new(1.0, 2.0)]);
    renderer.uniform_raw(None, 0, 1, &[0; 4]);
    renderer.uniform_named("not_declared", 1.0f32);

    assert_eq!(renderer.backend().stats().uniform_uploads, 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "set with a Float setter")]
fn float_setter_on_vec3_is_a_contract_violation() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));
    let tint = renderer.shader_current_uniform("tint");
    renderer.uniform_float(tint, 1.0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "set with a Vec2 setter")]
fn empty_complex_array_still_checks_type() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));
    let time = renderer.shader_current_uniform("time");
    renderer.uniform_vec2_array_complex(time, 0, &[]);
}

#[test]
fn empty_complex_array_uploads_nothing() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));
    let zs = renderer.shader_current_uniform("zs");
    renderer.uniform_vec2_array_complex(zs, 0, &[]);
    assert_eq!(renderer.backend().stats().uniform_uploads, 0);
}

#[test]
fn named_setter_resolves_against_bound_program() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));

    renderer.uniform_named("time", 0.25f32);
    let time = renderer.shader_uniform(prog, "time").unwrap();
    assert_eq!(floats(renderer.backend().uniform_data(time)), vec![0.25]);

    renderer.set_shader(None);
    renderer.uniform_named("time", 0.5f32);
    assert_eq!(renderer.backend().stats().uniform_uploads, 1);
}

#[test]
fn complex_values_split_into_real_and_imaginary() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));

    let z = renderer.shader_current_uniform("z");
    renderer.uniform_vec2_complex(z, Complex::new(1.5, -2.0));
    assert_eq!(floats(renderer.backend().uniform_data(z.unwrap())), vec![1.5, -2.0]);

    let zs = renderer.shader_current_uniform("zs");
    renderer.uniform_vec2_array_complex(zs, 1, &[Complex::new(3.0, 4.0), Complex::new(5.0, 6.0)]);
    assert_eq!(
        floats(renderer.backend().uniform_data(zs.unwrap())),
        vec![0.0, 0.0, 3.0, 4.0, 5.0, 6.0]
    );
}

#[test]
fn color_setters_pick_channels() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));
    let rgba = LinearRgba::new(0.1, 0.2, 0.3, 0.4);

    let tint = renderer.shader_current_uniform("tint");
    renderer.uniform_vec3_rgb(tint, rgba);
    let tint_data = floats(renderer.backend().uniform_data(tint.unwrap()));
    assert_eq!(tint_data.len(), 3);
    assert_relative_eq!(tint_data[2], 0.3);

    let color = renderer.shader_current_uniform("color");
    renderer.uniform_vec4_rgba(color, rgba);
    let color_data = floats(renderer.backend().uniform_data(color.unwrap()));
    assert_relative_eq!(color_data[3], 0.4);
}

#[test]
fn typed_setters_upload_expected_bytes() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));

    let transform = renderer.shader_current_uniform("transform");
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    renderer.uniform_mat4(transform, m);
    let data = floats(renderer.backend().uniform_data(transform.unwrap()));
    assert_eq!(data.len(), 16);
    assert_eq!(&data[12..15], &[1.0, 2.0, 3.0]);

    let tex = renderer.shader_current_uniform("tex");
    renderer.uniform_sampler(tex, TextureId(7));
    assert_eq!(
        renderer.backend().uniform_data(tex.unwrap()),
        bytemuck::bytes_of(&TextureId(7))
    );
}

#[test]
fn arrays_upload_once_and_empty_arrays_never() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    renderer.set_shader(Some(prog));
    let weights = renderer.shader_current_uniform("weights");

    renderer.uniform_float_array(weights, 0, &[]);
    assert_eq!(renderer.backend().stats().uniform_uploads, 0);

    renderer.uniform_float_array(weights, 2, &[0.5, 0.75]);
    assert_eq!(renderer.backend().stats().uniform_uploads, 1);
    assert_eq!(
        floats(renderer.backend().uniform_data(weights.unwrap())),
        vec![0.0, 0.0, 0.5, 0.75]
    );
}

#[test]
fn raw_upload_bypasses_type_check() {
    let mut renderer = renderer();
    let prog = program(&mut renderer, VERTEX, FRAGMENT);
    let tint = renderer.shader_uniform(prog, "tint");
    renderer.uniform_raw(tint, 0, 1, bytemuck::cast_slice(&[1.0f32, 2.0, 3.0]));
    assert_eq!(floats(renderer.backend().uniform_data(tint.unwrap())), vec![1.0, 2.0, 3.0]);
}
