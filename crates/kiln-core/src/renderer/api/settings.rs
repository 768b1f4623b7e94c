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

//! Renderer configuration, loadable from JSON.

use super::blend::{BlendMode, UnpackedBlendMode};
use super::state::{CapabilityBits, CullFaceMode, DepthTestFunc, RendererCapability, VsyncMode};
use crate::math::LinearRgba;
use crate::renderer::error::SettingsError;
use serde::{Deserialize, Serialize};

/// Name of the environment variable that overrides [`RendererSettings::backend`].
pub const RENDERER_ENV_VAR: &str = "KILN_RENDERER";

/// Pipeline state applied once the backend is fully initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialState {
    /// Initial draw color, linear RGBA.
    pub color: [f32; 4],
    /// Capabilities enabled at startup; all others are disabled.
    pub capabilities: Vec<RendererCapability>,
    /// Initial depth comparison.
    pub depth_func: DepthTestFunc,
    /// Initial cull mode.
    pub cull_face: CullFaceMode,
    /// Initial blend equation.
    pub blend: UnpackedBlendMode,
    /// Color the default framebuffer is cleared to.
    pub clear_color: [f32; 4],
    /// Depth the default framebuffer is cleared to.
    pub clear_depth: f32,
}

impl InitialState {
    /// The initial draw color.
    pub fn color(&self) -> LinearRgba {
        let [r, g, b, a] = self.color;
        LinearRgba::new(r, g, b, a)
    }

    /// The initial clear color.
    pub fn clear_color(&self) -> LinearRgba {
        let [r, g, b, a] = self.clear_color;
        LinearRgba::new(r, g, b, a)
    }

    /// The initial capability set.
    pub fn capability_bits(&self) -> CapabilityBits {
        self.capabilities.iter().copied().collect()
    }

    /// The initial blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::from(self.blend)
    }
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            color: LinearRgba::WHITE.to_array(),
            capabilities: vec![
                RendererCapability::DepthTest,
                RendererCapability::DepthWrite,
                RendererCapability::CullFace,
            ],
            depth_func: DepthTestFunc::LessEqual,
            cull_face: CullFaceMode::Back,
            blend: BlendMode::PREMUL_ALPHA.unpack(),
            clear_color: LinearRgba::BLACK.to_array(),
            clear_depth: 1.0,
        }
    }
}

/// Configuration handed to the backend at initialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Requested backend by name; `None` picks the default.
    pub backend: Option<String>,
    /// Swap interval.
    pub vsync: VsyncMode,
    /// State applied by [`Renderer::post_init`](crate::renderer::Renderer::post_init).
    pub initial_state: InitialState,
}

impl RendererSettings {
    /// Parses settings from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(SettingsError::Parse)
    }

    /// Serializes the settings as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Parse)
    }

    /// Applies overrides from the process environment (see [`RENDERER_ENV_VAR`]).
    pub fn with_env_overrides(self) -> Self {
        self.with_backend_override(std::env::var(RENDERER_ENV_VAR).ok())
    }

    /// Replaces the requested backend if `name` is a non-empty string.
    pub fn with_backend_override(mut self, name: Option<String>) -> Self {
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.backend = Some(name.trim().to_owned());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_startup_state() {
        let settings = RendererSettings::default();
        let init = &settings.initial_state;
        assert_eq!(settings.backend, None);
        assert_eq!(settings.vsync, VsyncMode::Normal);
        assert_eq!(init.color(), LinearRgba::WHITE);
        assert_eq!(
            init.capability_bits(),
            CapabilityBits::DEPTH_TEST | CapabilityBits::DEPTH_WRITE | CapabilityBits::CULL_FACE
        );
        assert_eq!(init.depth_func, DepthTestFunc::LessEqual);
        assert_eq!(init.cull_face, CullFaceMode::Back);
        assert_eq!(init.blend_mode(), BlendMode::PREMUL_ALPHA);
        assert_eq!(init.clear_color(), LinearRgba::BLACK);
        assert_eq!(init.clear_depth, 1.0);
    }

    #[test]
    fn colors_parse_from_json_arrays() {
        let settings = RendererSettings::from_json_str(
            r#"{ "initial_state": { "color": [0.2, 0.4, 0.6, 0.8], "clear_depth": 0.5 } }"#,
        )
        .unwrap();
        let color = settings.initial_state.color();
        assert_relative_eq!(color.g, 0.4);
        assert_relative_eq!(color.a, 0.8);
        assert_relative_eq!(settings.initial_state.clear_depth, 0.5);
        assert_eq!(settings.initial_state.clear_color(), LinearRgba::BLACK);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = RendererSettings::from_json_str(
            r#"{ "backend": "null", "vsync": "adaptive", "initial_state": { "capabilities": ["depth_test"] } }"#,
        )
        .unwrap();
        assert_eq!(settings.backend.as_deref(), Some("null"));
        assert_eq!(settings.vsync, VsyncMode::Adaptive);
        assert_eq!(settings.initial_state.capability_bits(), CapabilityBits::DEPTH_TEST);
        assert_eq!(settings.initial_state.cull_face, CullFaceMode::Back);
    }

    #[test]
    fn json_round_trip() {
        let mut settings = RendererSettings::default();
        settings.initial_state.depth_func = DepthTestFunc::Always;
        let json = settings.to_json_string().unwrap();
        assert_eq!(RendererSettings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RendererSettings::from_json_str("{ backend: }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn backend_override_ignores_blank_values() {
        let base = RendererSettings::default();
        assert_eq!(base.clone().with_backend_override(Some("  ".into())).backend, None);
        assert_eq!(base.clone().with_backend_override(None).backend, None);
        assert_eq!(
            base.with_backend_override(Some(" gl33 ".into())).backend.as_deref(),
            Some("gl33")
        );
    }
}
