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

//! Backend selection by name.

use anyhow::{Context, Result};

use kiln_core::renderer::{RenderError, Renderer, RendererBackend, RendererSettings};

use super::null::NullBackend;

/// Backend used when the settings do not name one.
pub const DEFAULT_BACKEND: &str = "null";

type BackendConstructor = fn() -> Box<dyn RendererBackend>;

fn null_backend() -> Box<dyn RendererBackend> {
    Box::new(NullBackend::new())
}

const BACKENDS: &[(&str, BackendConstructor)] = &[("null", null_backend)];

/// Names of every backend this build can create.
pub fn available_backends() -> Vec<&'static str> {
    BACKENDS.iter().map(|(name, _)| *name).collect()
}

/// Creates the backend named by `settings.backend`, or the default one.
///
/// Names are matched case-insensitively.
pub fn create_backend(settings: &RendererSettings) -> Result<Box<dyn RendererBackend>> {
    let requested = settings.backend.as_deref().unwrap_or(DEFAULT_BACKEND);

    let Some((name, constructor)) = BACKENDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(requested))
    else {
        return Err(RenderError::UnknownBackend {
            requested: requested.to_string(),
            available: available_backends(),
        }
        .into());
    };

    log::info!("Using the '{name}' renderer backend");
    Ok(constructor())
}

/// Creates the selected backend, wraps it in a [`Renderer`] and initializes it.
pub fn create_renderer(settings: RendererSettings) -> Result<Renderer<dyn RendererBackend>> {
    let backend = create_backend(&settings)?;
    let mut renderer = Renderer::new(backend, settings);
    renderer
        .init()
        .with_context(|| format!("failed to initialize the '{}' backend", renderer.backend().name()))?;
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_is_null() {
        let backend = create_backend(&RendererSettings::default()).unwrap();
        assert_eq!(backend.name(), "null");
    }

    #[test]
    fn names_are_case_insensitive() {
        let settings = RendererSettings {
            backend: Some("NULL".to_string()),
            ..Default::default()
        };
        assert_eq!(create_backend(&settings).unwrap().name(), "null");
    }

    #[test]
    fn unknown_backend_is_reported() {
        let settings = RendererSettings {
            backend: Some("gl33".to_string()),
            ..Default::default()
        };
        let err = create_backend(&settings).unwrap_err();
        match err.downcast_ref::<RenderError>() {
            Some(RenderError::UnknownBackend {
                requested,
                available,
            }) => {
                assert_eq!(requested, "gl33");
                assert_eq!(available, &vec!["null"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
