use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    InstanceBuffer, UNIT_QUAD_INDEX_COUNT, UnitQuad, create_viewport_ubo, instanced_pipeline,
    viewport_layout_entry, write_viewport,
};

/// Draws every [`QuadCmd`](crate::scene::QuadCmd) in a [`DrawList`] with one
/// instanced call, in paint order.
///
/// Colors are linear premultiplied (`paint::Color`).
#[derive(Default)]
pub struct QuadRenderer {
    gpu: Option<QuadGpu>,
}

struct QuadGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: UnitQuad,
    instances: InstanceBuffer<QuadInstance>,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let instances: Vec<QuadInstance> = draw_list
            .quads()
            .filter_map(|q| {
                let r = q.rect.normalized();
                (!r.is_empty()).then(|| QuadInstance {
                    origin: [r.origin.x, r.origin.y],
                    size: [r.size.x, r.size.y],
                    color: q.color.to_array(),
                })
            })
            .collect();

        if instances.is_empty() {
            return;
        }

        let gpu = self.ensure_gpu(ctx);
        write_viewport(ctx, &gpu.viewport_ubo);
        let Some(instance_vbo) = gpu.instances.upload(ctx, &instances) else {
            return;
        };

        let mut pass = target.load_pass("lights quad pass");
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.quad.vbo.slice(..));
        pass.set_vertex_buffer(1, instance_vbo.slice(..));
        pass.set_index_buffer(gpu.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..UNIT_QUAD_INDEX_COUNT, 0, 0..instances.len() as u32);
    }

    /// Builds GPU state on first use and whenever the surface format changes.
    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) -> &mut QuadGpu {
        if self
            .gpu
            .as_ref()
            .is_some_and(|g| g.format != ctx.surface_format)
        {
            log::debug!("surface format changed, rebuilding quad pipeline");
            self.gpu = None;
        }
        self.gpu.get_or_insert_with(|| QuadGpu::new(ctx))
    }
}

impl QuadGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("lights quad bgl"),
                entries: &[viewport_layout_entry()],
            });

        let pipeline = instanced_pipeline(
            ctx,
            "lights quad",
            include_str!("shaders/quad.wgsl"),
            &bgl,
            QuadInstance::layout(),
        );

        let viewport_ubo = create_viewport_ubo(ctx, "lights quad viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lights quad bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad: UnitQuad::new(ctx, "lights quad"),
            instances: InstanceBuffer::new("lights quad instance vbo"),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
