//! GPU pieces shared by the quad and text renderers.

use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::RenderCtx;

/// Premultiplied "over" blending.
pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
}

const VIEWPORT_UNIFORM_SIZE: u64 = std::mem::size_of::<ViewportUniform>() as u64;

/// Binding 0 of every renderer: the viewport uniform, vertex stage only.
pub(super) fn viewport_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(VIEWPORT_UNIFORM_SIZE),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: VIEWPORT_UNIFORM_SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    let u = ViewportUniform {
        viewport: ctx.viewport.clamped(),
        _pad: [0.0; 2],
    };
    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const UNIT_QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const UNIT_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Index count for one instanced unit quad.
pub(super) const UNIT_QUAD_INDEX_COUNT: u32 = UNIT_QUAD_INDICES.len() as u32;

/// Static `[0, 1]^2` quad every instance is stretched from.
pub(super) struct UnitQuad {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl UnitQuad {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&UNIT_QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&UNIT_QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Grow-only per-instance vertex buffer. Capacity is rounded up to a power of
/// two (at least 64) so steady-state frames never reallocate.
pub(super) struct InstanceBuffer<T> {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) const fn new(label: &'static str) -> Self {
        Self {
            buffer: None,
            capacity: 0,
            label,
            _marker: PhantomData,
        }
    }

    /// Uploads `instances`, growing first if needed.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, instances: &[T]) -> Option<&wgpu::Buffer> {
        if instances.len() > self.capacity || self.buffer.is_none() {
            let capacity = instances.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (capacity * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        Some(buffer)
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Pipeline drawing an instanced unit quad with premultiplied blending into
/// the surface format. The shader must expose `vs_main` and `fs_main`.
pub(super) fn instanced_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'_>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
