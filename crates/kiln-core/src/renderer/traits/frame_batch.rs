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

use crate::renderer::traits::RendererBackend;
use crate::renderer::Renderer;

/// Draw batching owned outside the renderer, such as a sprite batch.
///
/// [`Renderer::swap`] flushes it before presenting so that no queued geometry
/// is left out of the frame.
pub trait FrameBatch<B: RendererBackend + ?Sized> {
    /// Submits everything still queued, drawing through `renderer`.
    fn flush(&mut self, renderer: &mut Renderer<B>);
}
