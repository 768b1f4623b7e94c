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

//! Opaque handles to backend-owned objects.
//!
//! Handles are plain indices. The backend owns what they refer to; the caller
//! decides when to destroy it. Using a handle after destroying it is a contract
//! violation.

macro_rules! handles {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
                bytemuck::Pod, bytemuck::Zeroable,
            )]
            #[repr(transparent)]
            pub struct $name(pub usize);
        )+
    };
}

handles! {
    /// An opaque handle to a texture.
    TextureId,
    /// An opaque handle to an offscreen framebuffer.
    FramebufferId,
    /// An opaque handle to a vertex buffer.
    VertexBufferId,
    /// An opaque handle to an index buffer.
    IndexBufferId,
    /// An opaque handle to a vertex array (a set of buffer bindings plus a layout).
    VertexArrayId,
    /// An opaque handle to a compiled shader stage.
    ShaderObjectId,
    /// An opaque handle to a linked shader program.
    ShaderProgramId,
    /// An opaque handle to a uniform slot of a linked program.
    UniformId,
    /// An opaque handle to a window created by the backend.
    WindowId,
}

/// Any resource that carries a debug label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// A texture.
    Texture(TextureId),
    /// A framebuffer.
    Framebuffer(FramebufferId),
    /// A vertex buffer.
    VertexBuffer(VertexBufferId),
    /// An index buffer.
    IndexBuffer(IndexBufferId),
    /// A vertex array.
    VertexArray(VertexArrayId),
    /// A shader object.
    ShaderObject(ShaderObjectId),
    /// A shader program.
    ShaderProgram(ShaderProgramId),
}

impl ResourceId {
    /// A human readable name for the kind of resource.
    pub const fn kind(&self) -> &'static str {
        match self {
            ResourceId::Texture(_) => "texture",
            ResourceId::Framebuffer(_) => "framebuffer",
            ResourceId::VertexBuffer(_) => "vertex buffer",
            ResourceId::IndexBuffer(_) => "index buffer",
            ResourceId::VertexArray(_) => "vertex array",
            ResourceId::ShaderObject(_) => "shader object",
            ResourceId::ShaderProgram(_) => "shader program",
        }
    }
}

macro_rules! resource_from {
    ($($variant:ident($id:ident)),+ $(,)?) => {
        $(
            impl From<$id> for ResourceId {
                fn from(id: $id) -> Self {
                    ResourceId::$variant(id)
                }
            }
        )+
    };
}

resource_from! {
    Texture(TextureId),
    Framebuffer(FramebufferId),
    VertexBuffer(VertexBufferId),
    IndexBuffer(IndexBufferId),
    VertexArray(VertexArrayId),
    ShaderObject(ShaderObjectId),
    ShaderProgram(ShaderProgramId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_equality_is_by_index() {
        assert_eq!(TextureId(3), TextureId(3));
        assert_ne!(TextureId(3), TextureId(4));
        assert_eq!(std::mem::size_of::<TextureId>(), std::mem::size_of::<usize>());
    }

    #[test]
    fn resource_id_from_handle() {
        let id: ResourceId = VertexArrayId(7).into();
        assert_eq!(id, ResourceId::VertexArray(VertexArrayId(7)));
        assert_eq!(id.kind(), "vertex array");
    }
}
