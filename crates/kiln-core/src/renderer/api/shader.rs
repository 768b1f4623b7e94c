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

//! Shader sources and shading language negotiation.

use std::fmt;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

/// GLSL profile qualifier of a `#version` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlslProfile {
    /// No profile given.
    None,
    /// `core`
    Core,
    /// `compatibility`
    Compatibility,
    /// `es`
    Es,
}

/// A GLSL version and profile, e.g. `330 core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlslVersion {
    /// Version number as written in `#version`, e.g. `330`.
    pub version: u32,
    /// Profile qualifier.
    pub profile: GlslProfile,
}

impl GlslVersion {
    /// Creates a version.
    pub const fn new(version: u32, profile: GlslProfile) -> Self {
        Self { version, profile }
    }
}

impl fmt::Display for GlslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.profile {
            GlslProfile::None => write!(f, "{}", self.version),
            GlslProfile::Core => write!(f, "{} core", self.version),
            GlslProfile::Compatibility => write!(f, "{} compatibility", self.version),
            GlslProfile::Es => write!(f, "{} es", self.version),
        }
    }
}

/// The language a shader source is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLangInfo {
    /// GLSL of the given version.
    Glsl(GlslVersion),
    /// SPIR-V binary.
    Spirv,
}

/// Answer of a shading language query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLangSupport {
    /// The backend accepts the language as asked.
    Supported,
    /// The backend does not accept it, but accepts this alternative instead.
    Alternative(ShaderLangInfo),
    /// The backend accepts neither it nor any close alternative.
    Unsupported,
}

impl ShaderLangSupport {
    /// Whether the queried language is accepted as-is.
    pub const fn is_supported(&self) -> bool {
        matches!(self, ShaderLangSupport::Supported)
    }
}

/// Source of a single shader stage. The content is passed to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Stage this source is compiled for.
    pub stage: ShaderStage,
    /// Language of `content`.
    pub lang: ShaderLangInfo,
    /// Source text.
    pub content: String,
}

impl ShaderSource {
    /// A GLSL source for `stage`.
    pub fn glsl(stage: ShaderStage, version: GlslVersion, content: impl Into<String>) -> Self {
        Self {
            stage,
            lang: ShaderLangInfo::Glsl(version),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glsl_version_display() {
        assert_eq!(GlslVersion::new(330, GlslProfile::Core).to_string(), "330 core");
        assert_eq!(GlslVersion::new(300, GlslProfile::Es).to_string(), "300 es");
        assert_eq!(GlslVersion::new(120, GlslProfile::None).to_string(), "120");
    }

    #[test]
    fn glsl_source_constructor() {
        let src = ShaderSource::glsl(
            ShaderStage::Fragment,
            GlslVersion::new(330, GlslProfile::Core),
            "void main() {}",
        );
        assert_eq!(src.stage, ShaderStage::Fragment);
        assert_eq!(src.content, "void main() {}");
        assert!(ShaderLangSupport::Supported.is_supported());
    }
}
