use crate::context::RenderTargets;

/// Fixed-function state of a material's pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineOptions {
    /// With depth testing off the pipeline still carries the frame's depth attachment but
    /// neither reads nor writes it.
    pub depth_test: bool,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: Option<wgpu::BlendState>,
    pub topology: wgpu::PrimitiveTopology,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            depth_test: true,
            cull_mode: None,
            blend: Some(wgpu::BlendState::REPLACE),
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

impl PipelineOptions {
    /// Flat 2D demos draw in submission order.
    pub fn flat() -> Self {
        Self {
            depth_test: false,
            ..Default::default()
        }
    }
}

/// A shader module together with the entry point to run.
#[derive(Clone, Copy)]
pub struct Stage<'a> {
    pub module: &'a wgpu::ShaderModule,
    pub entry_point: &'a str,
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    vertex: Stage<'_>,
    fragment: Stage<'_>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    targets: &RenderTargets,
    options: &PipelineOptions,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: vertex.module,
            entry_point: Some(vertex.entry_point),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment.module,
            entry_point: Some(fragment.entry_point),
            targets: &[Some(wgpu::ColorTargetState {
                format: targets.color_format,
                blend: options.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: options.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: options.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: targets.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: options.depth_test,
            depth_compare: if options.depth_test {
                wgpu::CompareFunction::Less
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
