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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::renderer::api::ShaderStage;
use std::fmt;

/// An error raised while compiling a shader object or linking a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// A shader stage failed to compile.
    CompilationFailed {
        /// The stage being compiled.
        stage: ShaderStage,
        /// A descriptive label for the shader object.
        label: String,
        /// The compiler log.
        log: String,
    },
    /// A shader program failed to link.
    LinkFailed {
        /// A descriptive label for the program.
        label: String,
        /// The linker log.
        log: String,
    },
    /// A program was requested from zero shader objects.
    EmptyProgram,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CompilationFailed { stage, label, log } => {
                write!(f, "{stage:?} shader compilation failed for '{label}': {log}")
            }
            ShaderError::LinkFailed { label, log } => {
                write!(f, "Shader program link failed for '{label}': {log}")
            }
            ShaderError::EmptyProgram => {
                write!(f, "A shader program needs at least one shader object.")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation of a GPU resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// The backend could not create the resource.
    CreationFailed {
        /// The kind of resource, e.g. `"texture"`.
        kind: &'static str,
        /// Backend-provided reason.
        reason: String,
    },
    /// The creation parameters are not supported by the backend.
    InvalidParameters {
        /// The kind of resource, e.g. `"texture"`.
        kind: &'static str,
        /// What was wrong with the parameters.
        reason: String,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::CreationFailed { kind, reason } => {
                write!(f, "Failed to create {kind}: {reason}")
            }
            ResourceError::InvalidParameters { kind, reason } => {
                write!(f, "Invalid {kind} parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

/// An error raised while loading renderer settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings document is not valid JSON for [`RendererSettings`](crate::renderer::api::RendererSettings).
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "Invalid renderer settings: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// A high-level error of the rendering subsystem.
#[derive(Debug)]
pub enum RenderError {
    /// The backend failed to initialize.
    BackendInit {
        /// Name of the backend.
        backend: String,
        /// Backend-provided reason.
        reason: String,
    },
    /// No backend with the requested name is available.
    UnknownBackend {
        /// The requested name.
        requested: String,
        /// Names of the backends that are available.
        available: Vec<&'static str>,
    },
    /// An error occurred while managing a GPU resource.
    Resource(ResourceError),
    /// The renderer settings could not be loaded.
    Settings(SettingsError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::BackendInit { backend, reason } => {
                write!(f, "Failed to initialize the '{backend}' backend: {reason}")
            }
            RenderError::UnknownBackend {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Unknown renderer backend '{requested}' (available: {})",
                    available.join(", ")
                )
            }
            RenderError::Resource(err) => {
                write!(f, "Graphics resource operation failed: {err}")
            }
            RenderError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Resource(err) => Some(err),
            RenderError::Settings(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}

impl From<SettingsError> for RenderError {
    fn from(err: SettingsError) -> Self {
        RenderError::Settings(err)
    }
}
