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

//! In-memory stand-ins for GPU objects.

use kiln_core::math::LinearRgba;
use kiln_core::renderer::{
    FloatRect, FramebufferAttachment, IndexBufferId, Pixmap, ShaderLangInfo, ShaderObjectId,
    ShaderProgramId, ShaderStage, TextureFormat, TextureId, TextureParams, UniformId,
    UniformType, VertexAttribFormat, VertexBufferId,
};
use std::collections::HashMap;

/// Encodes one texel of `color` in `format`, or `None` if the format has no
/// color channels the null backend can encode.
pub(crate) fn encode_texel(format: TextureFormat, color: LinearRgba) -> Option<Vec<u8>> {
    let channels = color.to_array();
    let unorm = |n: usize| {
        channels[..n]
            .iter()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect::<Vec<u8>>()
    };
    match format {
        TextureFormat::R8 => Some(unorm(1)),
        TextureFormat::Rg8 => Some(unorm(2)),
        TextureFormat::Rgb8 => Some(unorm(3)),
        TextureFormat::Rgba8 => Some(unorm(4)),
        TextureFormat::Rgba32Float => Some(bytemuck::cast_slice(&channels).to_vec()),
        TextureFormat::Rgba16Float | TextureFormat::Depth24 | TextureFormat::Depth32Float => None,
    }
}

#[derive(Debug)]
pub(crate) struct TextureEntry {
    pub params: TextureParams,
    /// Texel bytes of each mip level.
    pub levels: Vec<Vec<u8>>,
}

impl TextureEntry {
    pub fn new(params: TextureParams) -> Self {
        let levels = (0..params.mipmaps)
            .map(|level| {
                let (w, h) = params.mip_size(level);
                vec![0; w as usize * h as usize * params.format.bytes_per_pixel()]
            })
            .collect();
        Self { params, levels }
    }

    fn level_mut(&mut self, mipmap: u32) -> &mut Vec<u8> {
        let count = self.levels.len();
        match self.levels.get_mut(mipmap as usize) {
            Some(level) => level,
            None => panic!("mip level {mipmap} out of range ({count} levels)"),
        }
    }

    pub fn fill(&mut self, mipmap: u32, image: &Pixmap) {
        let (w, h) = self.params.mip_size(mipmap);
        assert_eq!(image.format, self.params.format, "pixmap format mismatch");
        assert_eq!((image.width, image.height), (w, h), "pixmap size mismatch");
        assert_eq!(
            image.data.len(),
            w as usize * h as usize * self.params.format.bytes_per_pixel(),
            "pixmap data length does not match {w}x{h} {:?}",
            image.format
        );
        let level = self.level_mut(mipmap);
        level.clear();
        level.extend_from_slice(&image.data);
    }

    pub fn fill_region(&mut self, mipmap: u32, x: u32, y: u32, image: &Pixmap) {
        let (w, h) = self.params.mip_size(mipmap);
        assert_eq!(image.format, self.params.format, "pixmap format mismatch");
        assert!(
            x + image.width <= w && y + image.height <= h,
            "region {}x{}+{x}+{y} exceeds mip level {mipmap} ({w}x{h})",
            image.width,
            image.height
        );

        let bpp = self.params.format.bytes_per_pixel();
        let row_len = image.width as usize * bpp;
        assert_eq!(
            image.data.len(),
            row_len * image.height as usize,
            "pixmap data length does not match {}x{} {:?}",
            image.width,
            image.height,
            image.format
        );
        let level = self.level_mut(mipmap);
        for (row, src) in image.data.chunks_exact(row_len.max(1)).enumerate() {
            let start = ((y as usize + row) * w as usize + x as usize) * bpp;
            level[start..start + row_len].copy_from_slice(src);
        }
    }

    pub fn clear_level(&mut self, mipmap: u32, color: LinearRgba) {
        let texel = encode_texel(self.params.format, color);
        let level = self.level_mut(mipmap);
        match texel {
            Some(texel) => {
                for dst in level.chunks_exact_mut(texel.len()) {
                    dst.copy_from_slice(&texel);
                }
            }
            None => level.fill(0),
        }
    }

    pub fn clear(&mut self, color: LinearRgba) {
        for mipmap in 0..self.params.mipmaps {
            self.clear_level(mipmap, color);
        }
    }

    pub fn invalidate(&mut self) {
        for level in &mut self.levels {
            level.fill(0);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FramebufferEntry {
    pub attachments: HashMap<FramebufferAttachment, (TextureId, u32)>,
    pub viewport: FloatRect,
}

#[derive(Debug)]
pub(crate) struct VertexBufferEntry {
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct IndexBufferEntry {
    pub indices: Vec<u16>,
    pub offset: usize,
}

#[derive(Debug, Default)]
pub(crate) struct VertexArrayEntry {
    pub vertex_buffers: HashMap<u32, VertexBufferId>,
    pub index_buffer: Option<IndexBufferId>,
    pub layout: Vec<VertexAttribFormat>,
}

#[derive(Debug)]
pub(crate) struct ShaderObjectEntry {
    pub stage: ShaderStage,
    pub lang: ShaderLangInfo,
    pub source: String,
}

#[derive(Debug)]
pub(crate) struct ShaderProgramEntry {
    pub objects: Vec<ShaderObjectId>,
    pub uniforms: HashMap<String, UniformId>,
}

#[derive(Debug)]
pub(crate) struct UniformEntry {
    pub program: ShaderProgramId,
    pub name: String,
    pub utype: UniformType,
    pub array_size: usize,
    /// Last uploaded bytes of the whole array.
    pub data: Vec<u8>,
}

impl UniformEntry {
    pub fn new(program: ShaderProgramId, name: String, utype: UniformType, array_size: usize) -> Self {
        Self {
            program,
            name,
            utype,
            array_size,
            data: vec![0; utype.info().size() * array_size],
        }
    }

    pub fn write(&mut self, offset: usize, count: usize, data: &[u8]) {
        let size = self.utype.info().size();
        assert_eq!(
            data.len(),
            size * count,
            "uniform '{}' expects {count} values of {size} bytes",
            self.name
        );
        assert!(
            offset + count <= self.array_size,
            "uniform '{}' has {} elements, wrote {count} at {offset}",
            self.name,
            self.array_size
        );
        self.data[offset * size..(offset + count) * size].copy_from_slice(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_region_writes_rows_in_place() {
        let mut tex = TextureEntry::new(TextureParams::new(4, 4, TextureFormat::R8));
        let patch = Pixmap {
            width: 2,
            height: 2,
            format: TextureFormat::R8,
            data: vec![1, 2, 3, 4],
        };
        tex.fill_region(0, 1, 2, &patch);
        assert_eq!(
            tex.levels[0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4, 0]
        );
    }

    #[test]
    #[should_panic(expected = "pixmap data length does not match 4x4")]
    fn fill_rejects_truncated_pixmap() {
        let mut tex = TextureEntry::new(TextureParams::new(4, 4, TextureFormat::Rgba8));
        let mut image = Pixmap::new(4, 4, TextureFormat::Rgba8);
        image.data.truncate(3);
        tex.fill(0, &image);
    }

    #[test]
    #[should_panic(expected = "pixmap data length does not match 2x1")]
    fn fill_region_rejects_truncated_pixmap() {
        let mut tex = TextureEntry::new(TextureParams::new(4, 4, TextureFormat::R8));
        let patch = Pixmap {
            width: 2,
            height: 1,
            format: TextureFormat::R8,
            data: vec![1],
        };
        tex.fill_region(0, 0, 0, &patch);
    }

    #[test]
    fn fill_replaces_level_with_full_image() {
        let mut tex = TextureEntry::new(TextureParams::new(2, 1, TextureFormat::Rg8));
        let image = Pixmap {
            width: 2,
            height: 1,
            format: TextureFormat::Rg8,
            data: vec![1, 2, 3, 4],
        };
        tex.fill(0, &image);
        assert_eq!(tex.levels[0], vec![1, 2, 3, 4]);
    }

    #[test]
    fn clear_encodes_unorm_texels() {
        let mut params = TextureParams::new(2, 2, TextureFormat::Rgba8);
        params.mipmaps = 2;
        let mut tex = TextureEntry::new(params);
        tex.clear(LinearRgba::new(1.0, 0.0, 0.5, 1.0));
        assert_eq!(tex.levels[1], vec![255, 0, 128, 255]);
        assert_eq!(&tex.levels[0][4..8], &[255, 0, 128, 255]);
    }

    #[test]
    fn uniform_write_at_offset() {
        let mut u = UniformEntry::new(ShaderProgramId(0), "v".into(), UniformType::Float, 3);
        u.write(1, 2, bytemuck::cast_slice(&[2.0f32, 3.0]));
        let values: Vec<f32> = u
            .data
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        assert_eq!(values, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "has 1 elements")]
    fn uniform_write_past_end_panics() {
        let mut u = UniformEntry::new(ShaderProgramId(0), "m".into(), UniformType::Mat4, 1);
        u.write(1, 1, &[0; 64]);
    }
}
