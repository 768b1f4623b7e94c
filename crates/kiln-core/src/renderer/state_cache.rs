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

//! Redundant state change elimination and scoped state rollback.
//!
//! The [`StateCache`] remembers the last value forwarded to the backend for
//! every state category, so that setting an identical value again costs
//! nothing. A cached value that is unknown always forwards. Each setter also
//! marks its category as touched. The touched set only tells callers which
//! categories may differ from a value they read earlier. It never decides
//! whether a call is forwarded.

use crate::math::LinearRgba;
use crate::renderer::api::{
    BlendMode, CapabilityBits, CullFaceMode, DepthTestFunc, FramebufferId, ShaderProgramId,
};
use std::ops::{BitOr, BitOrAssign};

/// A value last sent to the backend, or nothing if unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cached<T>(Option<T>);

impl<T: PartialEq + Copy> Cached<T> {
    /// An unknown value.
    pub const fn empty() -> Self {
        Cached(None)
    }

    /// Forgets the value, forcing the next set to reach the backend.
    pub fn invalidate(&mut self) {
        self.0 = None;
    }

    /// Records a value as current.
    pub fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    /// The cached value, if known.
    pub fn get(&self) -> Option<T> {
        self.0
    }

    /// Whether `new_val` must be forwarded. An unknown value is always invalid.
    pub fn is_invalid(&self, new_val: &T) -> bool {
        match &self.0 {
            Some(t) => t != new_val,
            None => true,
        }
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached(None)
    }
}

/// A set of state categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateCategories {
    bits: u8,
}

impl StateCategories {
    /// No category.
    pub const NONE: Self = Self { bits: 0 };
    /// Enabled capabilities.
    pub const CAPABILITIES: Self = Self { bits: 1 << 0 };
    /// Draw color.
    pub const COLOR: Self = Self { bits: 1 << 1 };
    /// Blend mode.
    pub const BLEND_MODE: Self = Self { bits: 1 << 2 };
    /// Cull mode.
    pub const CULL_FACE: Self = Self { bits: 1 << 3 };
    /// Depth comparison.
    pub const DEPTH_FUNC: Self = Self { bits: 1 << 4 };
    /// Bound shader program.
    pub const SHADER: Self = Self { bits: 1 << 5 };
    /// Bound framebuffer.
    pub const FRAMEBUFFER: Self = Self { bits: 1 << 6 };
    /// Every category.
    pub const ALL: Self = Self { bits: 0x7F };

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Checks if every category of `other` is in this set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl BitOr for StateCategories {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for StateCategories {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// The value of one state category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateValue {
    /// Enabled capabilities.
    Capabilities(CapabilityBits),
    /// Draw color.
    Color(LinearRgba),
    /// Blend mode.
    BlendMode(BlendMode),
    /// Cull mode.
    CullFace(CullFaceMode),
    /// Depth comparison.
    DepthFunc(DepthTestFunc),
    /// Bound shader program.
    Shader(Option<ShaderProgramId>),
    /// Bound framebuffer.
    Framebuffer(Option<FramebufferId>),
}

impl StateValue {
    /// The category this value belongs to.
    pub const fn category(&self) -> StateCategories {
        match self {
            StateValue::Capabilities(_) => StateCategories::CAPABILITIES,
            StateValue::Color(_) => StateCategories::COLOR,
            StateValue::BlendMode(_) => StateCategories::BLEND_MODE,
            StateValue::CullFace(_) => StateCategories::CULL_FACE,
            StateValue::DepthFunc(_) => StateCategories::DEPTH_FUNC,
            StateValue::Shader(_) => StateCategories::SHADER,
            StateValue::Framebuffer(_) => StateCategories::FRAMEBUFFER,
        }
    }
}

/// Values saved by one pushed scope, in the order they were first touched.
#[derive(Debug, Default)]
struct SavedScope {
    saved: StateCategories,
    values: Vec<StateValue>,
}

/// Last known backend state plus the scoped rollback stack.
///
/// Capabilities are not cached here: they are always compared against the
/// backend-reported set.
#[derive(Debug, Default)]
pub struct StateCache {
    /// Draw color.
    pub color: Cached<LinearRgba>,
    /// Blend mode.
    pub blend_mode: Cached<BlendMode>,
    /// Cull mode.
    pub cull_face: Cached<CullFaceMode>,
    /// Depth comparison.
    pub depth_func: Cached<DepthTestFunc>,
    /// Bound shader program.
    pub shader: Cached<Option<ShaderProgramId>>,
    /// Bound framebuffer.
    pub framebuffer: Cached<Option<FramebufferId>>,
    touched: StateCategories,
    stack: Vec<SavedScope>,
}

impl StateCache {
    /// A cache that knows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a category as touched.
    ///
    /// Returns `true` if the innermost pushed scope has not saved this category
    /// yet; the caller must then pass its current value to [`StateCache::save`].
    pub fn touch(&mut self, category: StateCategories) -> bool {
        self.touched |= category;
        self.stack
            .last()
            .is_some_and(|scope| !scope.saved.contains(category))
    }

    /// Saves the value a category had before the innermost scope changed it.
    pub fn save(&mut self, value: StateValue) {
        if let Some(scope) = self.stack.last_mut() {
            let category = value.category();
            if !scope.saved.contains(category) {
                scope.saved |= category;
                scope.values.push(value);
            }
        }
    }

    /// Categories touched since the last [`StateCache::clear_touched`].
    pub fn touched(&self) -> StateCategories {
        self.touched
    }

    /// Clears the touched set.
    pub fn clear_touched(&mut self) {
        self.touched = StateCategories::NONE;
    }

    /// Records a value as current without touching its category.
    pub fn record(&mut self, value: StateValue) {
        match value {
            StateValue::Capabilities(_) => {}
            StateValue::Color(v) => self.color.set(v),
            StateValue::BlendMode(v) => self.blend_mode.set(v),
            StateValue::CullFace(v) => self.cull_face.set(v),
            StateValue::DepthFunc(v) => self.depth_func.set(v),
            StateValue::Shader(v) => self.shader.set(v),
            StateValue::Framebuffer(v) => self.framebuffer.set(v),
        }
    }

    /// Forgets every cached value.
    pub fn invalidate(&mut self) {
        self.color.invalidate();
        self.blend_mode.invalidate();
        self.cull_face.invalidate();
        self.depth_func.invalidate();
        self.shader.invalidate();
        self.framebuffer.invalidate();
    }

    /// Opens a rollback scope.
    pub fn push(&mut self) {
        self.stack.push(SavedScope::default());
    }

    /// Closes the innermost scope and returns the values to restore.
    ///
    /// Returns `None` if no scope is open.
    pub fn pop(&mut self) -> Option<Vec<StateValue>> {
        self.stack.pop().map(|scope| scope.values)
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_empty_is_always_invalid() {
        let mut c: Cached<u32> = Cached::empty();
        assert!(c.is_invalid(&0));
        c.set(3);
        assert!(!c.is_invalid(&3));
        assert!(c.is_invalid(&4));
        c.invalidate();
        assert!(c.is_invalid(&3));
        assert_eq!(c.get(), None);
    }

    #[test]
    fn touch_requests_save_once_per_scope() {
        let mut cache = StateCache::new();
        assert!(!cache.touch(StateCategories::COLOR));

        cache.push();
        assert!(cache.touch(StateCategories::COLOR));
        cache.save(StateValue::Color(LinearRgba::WHITE));
        assert!(!cache.touch(StateCategories::COLOR));
        assert!(cache.touch(StateCategories::SHADER));
        cache.save(StateValue::Shader(None));

        let restored = cache.pop().unwrap();
        assert_eq!(
            restored,
            vec![StateValue::Color(LinearRgba::WHITE), StateValue::Shader(None)]
        );
        assert!(cache.pop().is_none());
    }

    #[test]
    fn nested_scopes_save_independently() {
        let mut cache = StateCache::new();
        cache.push();
        assert!(cache.touch(StateCategories::BLEND_MODE));
        cache.save(StateValue::BlendMode(BlendMode::NONE));
        cache.push();
        assert!(cache.touch(StateCategories::BLEND_MODE));
        cache.save(StateValue::BlendMode(BlendMode::ADD));
        assert_eq!(cache.depth(), 2);
        assert_eq!(cache.pop().unwrap(), vec![StateValue::BlendMode(BlendMode::ADD)]);
        assert_eq!(cache.pop().unwrap(), vec![StateValue::BlendMode(BlendMode::NONE)]);
    }

    #[test]
    fn touched_accumulates_until_cleared() {
        let mut cache = StateCache::new();
        cache.touch(StateCategories::COLOR);
        cache.touch(StateCategories::CULL_FACE);
        assert_eq!(
            cache.touched(),
            StateCategories::COLOR | StateCategories::CULL_FACE
        );
        cache.clear_touched();
        assert!(cache.touched().is_empty());
    }

    #[test]
    fn record_and_invalidate() {
        let mut cache = StateCache::new();
        cache.record(StateValue::DepthFunc(DepthTestFunc::Always));
        assert!(!cache.depth_func.is_invalid(&DepthTestFunc::Always));
        cache.invalidate();
        assert!(cache.depth_func.is_invalid(&DepthTestFunc::Always));
        assert!(cache.touched().is_empty());
    }
}
