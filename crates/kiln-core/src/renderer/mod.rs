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

//! The renderer abstraction layer.
//!
//! Everything here is backend-agnostic. [`Renderer`] is the dispatch facade
//! that applications talk to; it forwards to an implementation of
//! [`RendererBackend`] after filtering out redundant state changes. Concrete
//! backends live in the `kiln-infra` crate.

pub mod api;
pub mod error;
mod facade;
pub mod state_cache;
pub mod traits;
mod uniforms;

pub use self::api::*;
pub use self::error::{RenderError, ResourceError, SettingsError, ShaderError};
pub use self::facade::Renderer;
pub use self::state_cache::{StateCategories, StateValue};
pub use self::traits::{FrameBatch, RendererBackend};
