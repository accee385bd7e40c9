use std::num::NonZeroU32;
use std::time::Instant;

use glam::{Mat4, Vec3};
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use wgpu_mandelbulb::animation::{advance, AnimationConfig, AnimationState};
use wgpu_mandelbulb::{
    ensure_buffer, render_frame, FractalParameters, FrameParameters, MarchConfig, Size,
};

const FOV_Y: f32 = 1.0;
const CAMERA_DISTANCE: f32 = 2.5;
const ORBIT_RATE: f32 = 0.1;

fn camera_to_world(elapsed: f32) -> Mat4 {
    let angle = elapsed * ORBIT_RATE;
    let eye = Vec3::new(
        CAMERA_DISTANCE * angle.sin(),
        0.6,
        CAMERA_DISTANCE * angle.cos(),
    );
    Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y).inverse()
}

fn create_result_texture(device: &wgpu::Device, size: Size) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("result-texture"),
        size: wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    })
}

fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("render-bind-group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(texture_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn main() {
    env_logger::init();

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global()
        .unwrap();
    info!("rendering on {} threads", num_cpus::get());

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("mandelbulb")
        .build(&event_loop)
        .unwrap();

    let instance = wgpu::Instance::new(wgpu::Backends::all());

    let window_size = window.inner_size();
    let surface = unsafe { instance.create_surface(&window) };

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: Default::default(),
        force_fallback_adapter: false,
        compatible_surface: Some(&surface),
    }))
    .unwrap();
    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("device"),
            features: wgpu::Features::empty(),
            limits: wgpu::Limits::default(),
        },
        None,
    ))
    .unwrap();

    let mut surface_configuration = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface.get_supported_formats(&adapter)[0],
        width: window_size.width,
        height: window_size.height,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
    };
    surface.configure(&device, &surface_configuration);

    let render_shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("render-shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let render_bind_group_layout =
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("render-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("render-pipeline-layout"),
        bind_group_layouts: &[&render_bind_group_layout],
        push_constant_ranges: &[],
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("render-pipeline"),
        layout: Some(&render_pipeline_layout),
        vertex: wgpu::VertexState {
            module: &render_shader_module,
            entry_point: "vertex_main",
            buffers: &[],
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &render_shader_module,
            entry_point: "fragment_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_configuration.format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
    });

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

    let mut size = Size {
        width: window_size.width,
        height: window_size.height,
    };
    let mut result_texture = create_result_texture(&device, size);
    let mut result_texture_view =
        result_texture.create_view(&wgpu::TextureViewDescriptor::default());
    let mut render_bind_group = create_render_bind_group(
        &device,
        &render_bind_group_layout,
        &result_texture_view,
        &sampler,
    );

    let animation_config = AnimationConfig {
        power_increase_rate: 0.0,
        ..Default::default()
    };
    let mut animation = AnimationState::new(1.0);
    let mut fractal = FractalParameters::default();
    let march_config = MarchConfig::default();
    let light_direction = Vec3::new(-0.4, -1.0, -0.3).normalize();

    let mut buffer = Vec::new();
    let mut elapsed = 0.0_f32;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        let (result_texture, result_texture_view, render_bind_group) = (
            &mut result_texture,
            &mut result_texture_view,
            &mut render_bind_group,
        );

        // To present frames in realtime, *don't* set `control_flow` to `Wait`.
        match event {
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    debug!("resizing to {:?}", new_size);

                    // Minimized windows report 0x0, which neither the
                    // surface nor the texture accepts; keep the last real
                    // size until the window comes back.
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }

                    surface_configuration.width = new_size.width;
                    surface_configuration.height = new_size.height;
                    surface.configure(&device, &surface_configuration);

                    size = Size {
                        width: new_size.width,
                        height: new_size.height,
                    };

                    *result_texture = create_result_texture(&device, size);
                    *result_texture_view =
                        result_texture.create_view(&wgpu::TextureViewDescriptor::default());
                    *render_bind_group = create_render_bind_group(
                        &device,
                        &render_bind_group_layout,
                        result_texture_view,
                        &sampler,
                    );

                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if size.pixel_count() == 0 {
                    return;
                }

                let now = Instant::now();
                let dt = (now - last_frame).as_secs_f32();
                last_frame = now;
                elapsed += dt;

                animation = advance(animation, dt, &animation_config);
                fractal.power = animation.power;

                let frame = FrameParameters {
                    camera_to_world: camera_to_world(elapsed),
                    camera_inverse_projection: Mat4::perspective_rh(
                        FOV_Y,
                        size.width as f32 / size.height as f32,
                        0.1,
                        fractal.max_distance,
                    )
                    .inverse(),
                    light_direction,
                    size,
                };

                buffer = ensure_buffer(std::mem::take(&mut buffer), size);
                render_frame(&frame, &fractal, march_config, &mut buffer);

                queue.write_texture(
                    wgpu::ImageCopyTexture {
                        texture: result_texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    bytemuck::cast_slice(&buffer),
                    wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: NonZeroU32::new(4 * size.width),
                        rows_per_image: None,
                    },
                    wgpu::Extent3d {
                        width: size.width,
                        height: size.height,
                        depth_or_array_layers: 1,
                    },
                );

                let surface_texture = surface.get_current_texture().unwrap();
                let surface_texture_view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let command_encoder = {
                    let mut command_encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

                    command_encoder.push_debug_group("render-pass");
                    {
                        let mut render_pass =
                            command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("render-pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &surface_texture_view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                        store: true,
                                    },
                                })],
                                depth_stencil_attachment: None,
                            });

                        render_pass.set_pipeline(&render_pipeline);
                        render_pass.set_bind_group(0, render_bind_group, &[]);
                        render_pass.draw(0..4, 0..1);
                    }
                    command_encoder.pop_debug_group();

                    command_encoder
                };

                queue.submit([command_encoder.finish()]);
                surface_texture.present();
            }
            _ => {}
        }
    });
}
