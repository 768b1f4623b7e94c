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

//! Window creation parameters.

/// Describes a window the backend should create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    /// Title bar text.
    pub title: String,
    /// Initial horizontal position.
    pub x: i32,
    /// Initial vertical position.
    pub y: i32,
    /// Client area width.
    pub width: u32,
    /// Client area height.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Allow the user to resize the window.
    pub resizable: bool,
}

impl WindowDescriptor {
    /// A windowed, resizable window at the origin.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            x: 0,
            y: 0,
            width,
            height,
            fullscreen: false,
            resizable: true,
        }
    }
}
