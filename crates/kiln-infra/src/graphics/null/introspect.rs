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

//! Discovery of `uniform` declarations in GLSL source text.

use kiln_core::renderer::UniformType;

/// One uniform found in a shader source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDecl {
    /// Declared name.
    pub name: String,
    /// Declared type.
    pub utype: UniformType,
    /// Number of array elements; `1` for non-arrays.
    pub array_size: usize,
}

const PRECISION_QUALIFIERS: [&str; 3] = ["lowp", "mediump", "highp"];

fn uniform_type_from_glsl(name: &str) -> Option<UniformType> {
    let utype = match name {
        "float" => UniformType::Float,
        "vec2" => UniformType::Vec2,
        "vec3" => UniformType::Vec3,
        "vec4" => UniformType::Vec4,
        "int" => UniformType::Int,
        "ivec2" => UniformType::IVec2,
        "ivec3" => UniformType::IVec3,
        "ivec4" => UniformType::IVec4,
        "mat3" => UniformType::Mat3,
        "mat4" => UniformType::Mat4,
        s if s.starts_with("sampler") => UniformType::Sampler,
        _ => return None,
    };
    Some(utype)
}

/// Removes `//` and `/* */` comments and preprocessor lines.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |i| &after[i..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            out.push(' ');
            rest = after.find("*/").map_or("", |i| &after[i + 2..]);
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }

    out.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes a leading `layout(...)` qualifier, if any.
fn strip_layout(statement: &str) -> &str {
    let trimmed = statement.trim_start();
    match trimmed.strip_prefix("layout") {
        Some(after) if after.trim_start().starts_with('(') => {
            after.find(')').map_or("", |i| &after[i + 1..])
        }
        _ => trimmed,
    }
}

fn parse_declarator(declarator: &str) -> Option<(String, usize)> {
    let compact: String = declarator.chars().filter(|c| !c.is_whitespace()).collect();
    let (name, array_size) = match compact.split_once('[') {
        Some((name, size)) => {
            let size = size.strip_suffix(']')?.parse::<usize>().ok()?;
            (name, size)
        }
        None => (compact.as_str(), 1),
    };

    let valid = !name.is_empty()
        && array_size > 0
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    valid.then(|| (name.to_owned(), array_size))
}

/// Finds every `uniform <type> <name>[N];` declaration in `source`.
///
/// Precision and `layout(...)` qualifiers are accepted, as are several
/// comma-separated names per declaration. Uniform blocks and types without a
/// [`UniformType`] are skipped.
pub fn scan_uniforms(source: &str) -> Vec<UniformDecl> {
    let source = strip_comments(source);
    let mut decls = Vec::new();

    for statement in source.split(';') {
        // A statement may start with the tail of a preceding block.
        let statement = statement.rsplit(['{', '}']).next().unwrap_or_default();
        let statement = strip_layout(statement);
        let Some(decl) = statement.trim_start().strip_prefix("uniform") else {
            continue;
        };
        if !decl.starts_with(char::is_whitespace) {
            continue;
        }

        let mut tokens = decl.split_whitespace().peekable();
        while tokens
            .peek()
            .is_some_and(|t| PRECISION_QUALIFIERS.contains(t))
        {
            tokens.next();
        }
        let Some(utype) = tokens.next().and_then(uniform_type_from_glsl) else {
            continue;
        };

        let declarators = tokens.collect::<Vec<_>>().join(" ");
        for declarator in declarators.split(',') {
            if let Some((name, array_size)) = parse_declarator(declarator) {
                decls.push(UniformDecl {
                    name,
                    utype,
                    array_size,
                });
            }
        }
    }

    decls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, utype: UniformType, array_size: usize) -> UniformDecl {
        UniformDecl {
            name: name.to_owned(),
            utype,
            array_size,
        }
    }

    #[test]
    fn finds_plain_and_array_uniforms() {
        let src = r#"
            #version 330 core
            uniform mat4 u_transform;
            uniform vec3 lights[4];
            uniform sampler2D tex;
            void main() {}
        "#;
        assert_eq!(
            scan_uniforms(src),
            vec![
                decl("u_transform", UniformType::Mat4, 1),
                decl("lights", UniformType::Vec3, 4),
                decl("tex", UniformType::Sampler, 1),
            ]
        );
    }

    #[test]
    fn accepts_qualifiers_and_lists() {
        let src = "layout(location = 2) uniform highp float a, b [ 2 ];\nuniform ivec2 size;";
        assert_eq!(
            scan_uniforms(src),
            vec![
                decl("a", UniformType::Float, 1),
                decl("b", UniformType::Float, 2),
                decl("size", UniformType::IVec2, 1),
            ]
        );
    }

    #[test]
    fn ignores_comments_blocks_and_unknown_types() {
        let src = r#"
            // uniform float commented;
            /* uniform vec2 also_commented; */
            uniform Globals { mat4 view; };
            uniform bool flag;
            void main() { gl_FragColor = vec4(1.0); }
            uniform vec4 after_main;
        "#;
        assert_eq!(
            scan_uniforms(src),
            vec![decl("after_main", UniformType::Vec4, 1)]
        );
    }

    #[test]
    fn identifiers_containing_uniform_are_not_declarations() {
        assert!(scan_uniforms("float uniformity; uniformly vec2 x;").is_empty());
    }
}
