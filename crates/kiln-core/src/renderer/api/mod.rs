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

//! Backend-agnostic rendering API types.
//!
//! - **[`blend`]**: The packed blend mode codec.
//! - **[`vertex`]**: Vertex attribute specs and the interleaved layout planner.
//! - **[`uniform`]**: Uniform type tables and the [`UniformValue`] marshaling trait.
//! - **[`resource`]**: Opaque GPU resource handles.
//! - **[`state`]**: Capabilities and fixed-function pipeline state.
//! - **[`texture`]**, **[`framebuffer`]**, **[`shader`]**, **[`window`]**: Resource descriptions.
//! - **[`settings`]**: Renderer configuration.

pub mod blend;
pub mod framebuffer;
pub mod resource;
pub mod settings;
pub mod shader;
pub mod state;
pub mod texture;
pub mod uniform;
pub mod vertex;
pub mod window;

pub use self::blend::*;
pub use self::framebuffer::*;
pub use self::resource::*;
pub use self::settings::*;
pub use self::shader::*;
pub use self::state::*;
pub use self::texture::*;
pub use self::uniform::*;
pub use self::vertex::*;
pub use self::window::*;
