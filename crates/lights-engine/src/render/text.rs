use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::common::{
    InstanceBuffer, UNIT_QUAD_INDEX_COUNT, UnitQuad, create_viewport_ubo, instanced_pipeline,
    viewport_layout_entry, write_viewport,
};

const ATLAS_SIZE: u32 = 2048;
/// Empty texels around each glyph so linear filtering never bleeds.
const GLYPH_PADDING: u32 = 1;

/// Draws every [`TextCmd`](crate::scene::TextCmd) in a [`DrawList`].
///
/// Glyphs are rasterized by fontdue at physical pixel size on first use and
/// packed into a 2048 x 2048 `R8Unorm` shelf atlas that lives as long as the
/// renderer. Once the atlas is full new glyphs are skipped with a warning.
pub struct TextRenderer {
    gpu: Option<TextGpu>,
    atlas: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, GlyphUv>,
    layout: Layout<()>,
}

struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    atlas: wgpu::Texture,
    quad: UnitQuad,
    instances: InstanceBuffer<GlyphInstance>,
}

#[derive(Debug, Copy, Clone)]
struct GlyphUv {
    min: [f32; 2],
    max: [f32; 2],
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            atlas: ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING),
            glyphs: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.ensure_gpu(ctx);

        let scale = ctx.scale_factor.max(0.01);
        let mut instances: Vec<GlyphInstance> = Vec::new();

        for cmd in draw_list.texts() {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("unknown {:?}, skipping text {:?}", cmd.font, cmd.text);
                continue;
            };

            // Lay out in physical pixels so glyphs rasterize crisply, then
            // divide back to logical pixels for the vertex shader.
            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x * scale,
                y: cmd.origin.y * scale,
                max_width: cmd.max_width.map(|w| w * scale),
                ..LayoutSettings::default()
            });
            self.layout
                .append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            let color = cmd.color.to_array();
            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }

                let uv = match self.glyphs.get(&g.key) {
                    Some(uv) => *uv,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(g.key);
                        let Some(uv) = upload_glyph(
                            ctx,
                            &mut self.atlas,
                            self.gpu.as_ref(),
                            &bitmap,
                            metrics.width,
                            metrics.height,
                        ) else {
                            continue;
                        };
                        self.glyphs.insert(g.key, uv);
                        uv
                    }
                };

                instances.push(GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: uv.min,
                    uv_max: uv.max,
                    color,
                });
            }
        }

        if instances.is_empty() {
            return;
        }

        let Some(gpu) = self.gpu.as_mut() else { return };
        write_viewport(ctx, &gpu.viewport_ubo);
        let Some(instance_vbo) = gpu.instances.upload(ctx, &instances) else {
            return;
        };

        let mut pass = target.load_pass("lights text pass");
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.quad.vbo.slice(..));
        pass.set_vertex_buffer(1, instance_vbo.slice(..));
        pass.set_index_buffer(gpu.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..UNIT_QUAD_INDEX_COUNT, 0, 0..instances.len() as u32);
    }

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) {
        if let Some(gpu) = &self.gpu {
            if gpu.format == ctx.surface_format {
                return;
            }
            log::debug!("surface format changed, rebuilding text pipeline");
        }

        // A fresh atlas texture starts empty, so the cache goes with it.
        self.gpu = Some(TextGpu::new(ctx));
        self.atlas = ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING);
        self.glyphs.clear();
    }
}

impl TextGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("lights text bgl"),
                entries: &[
                    viewport_layout_entry(),
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline = instanced_pipeline(
            ctx,
            "lights text",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        let atlas = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lights text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lights text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = create_viewport_ubo(ctx, "lights text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lights text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            atlas,
            quad: UnitQuad::new(ctx, "lights text"),
            instances: InstanceBuffer::new("lights text instance vbo"),
        }
    }
}

/// Packs and uploads one glyph bitmap; `None` when it is empty or the
/// atlas has no room left.
fn upload_glyph(
    ctx: &RenderCtx<'_>,
    packer: &mut ShelfPacker,
    gpu: Option<&TextGpu>,
    bitmap: &[u8],
    width: usize,
    height: usize,
) -> Option<GlyphUv> {
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (width as u32, height as u32);

    let was_full = packer.is_full();
    let Some((x, y)) = packer.place(w, h) else {
        if !was_full {
            log::warn!("glyph atlas ({ATLAS_SIZE}x{ATLAS_SIZE}) is full, skipping new glyphs");
        }
        return None;
    };
    let atlas = &gpu?.atlas;

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: atlas,
            mip_level: 0,
            origin: wgpu::Origin3d { x, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        bitmap,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(w),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
    );

    let size = ATLAS_SIZE as f32;
    Some(GlyphUv {
        min: [x as f32 / size, y as f32 / size],
        max: [(x + w) as f32 / size, (y + h) as f32 / size],
    })
}

// ── atlas packing ─────────────────────────────────────────────────────────

/// Row-by-row ("shelf") rectangle packer for a square atlas.
#[derive(Debug, Clone)]
struct ShelfPacker {
    size: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            cursor_x: padding,
            cursor_y: padding,
            row_height: 0,
            full: false,
        }
    }

    fn is_full(&self) -> bool {
        self.full
    }

    /// Top-left texel for a `w` x `h` box, or `None` once out of space.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + self.padding > self.size {
            self.cursor_y += self.row_height + self.padding;
            self.cursor_x = self.padding;
            self.row_height = 0;
        }

        if self.cursor_x + w + self.padding > self.size
            || self.cursor_y + h + self.padding > self.size
        {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + self.padding;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_left_to_right() {
        let mut p = ShelfPacker::new(32, 1);
        assert_eq!(p.place(10, 4), Some((1, 1)));
        assert_eq!(p.place(10, 6), Some((12, 1)));
        // 23 + 10 + 1 > 32: wraps below the tallest glyph of the row.
        assert_eq!(p.place(10, 3), Some((1, 8)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.place(14, 14), Some((1, 1)));
        assert_eq!(p.place(4, 4), None);
        assert!(p.is_full());
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_never_fits() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.place(20, 2), None);
    }
}
