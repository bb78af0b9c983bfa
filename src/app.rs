//! Application event loop and asset spawning.
//!
//! The loop owns the scene graph. Every asset in the descriptor is loaded
//! by a spawned task (tokio on native, `spawn_local` on WASM) holding
//! clones of the device/queue handles; a finished task posts a
//! [`SceneEvent`] through the winit proxy and the event-loop thread
//! performs the insertion. Loads are fire-and-forget: a failed task logs
//! the error and posts nothing, leaving the scene untouched. The render
//! loop starts immediately and draws whatever subset has arrived.

use std::{fmt::Debug, iter, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    context::Context,
    data_structures::{
        bounds::Aabb,
        instance::Instance,
        model::{DrawModel, DrawShadow},
        scene_graph::{ModelNode, OutlineNode, Scene, SceneNode},
        texture::Texture,
    },
    resources::{self, load_model_gltf, mk_plane_model},
    scene::{CompositeScene, ModelPlacement, PlaneSurface, SceneDescriptor},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// User events flowing into the winit loop: the one-time init handoff
/// (WASM path) and one event per finished asset load.
pub enum SceneEvent {
    Initialized(Box<AppState>),
    /// A plane or composite scene: one insertion.
    ObjectReady {
        label: String,
        node: Box<dyn SceneNode>,
    },
    /// A placed model and its debug outline: two insertions.
    ModelReady {
        label: String,
        node: Box<dyn SceneNode>,
        outline: Box<dyn SceneNode>,
    },
}

impl Debug for SceneEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::ObjectReady { label, .. } => f.debug_tuple("ObjectReady").field(label).finish(),
            Self::ModelReady { label, .. } => f.debug_tuple("ModelReady").field(label).finish(),
        }
    }
}

/// GPU context plus the live scene graph.
pub struct AppState {
    pub(crate) ctx: Context,
    pub(crate) scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, descriptor: &SceneDescriptor) -> Self {
        let ctx = Context::new(window, descriptor).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        Self {
            ctx,
            scene: Scene::new(),
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
            // The pose is fixed but the aspect ratio just changed.
            self.ctx.camera.write(&self.ctx.queue, &self.ctx.projection);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Re-arm the loop: one render per display refresh, indefinitely.
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let batch = self.scene.collect();

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.shadow.map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            shadow_pass.set_pipeline(&self.ctx.pipelines.shadow);
            if self.ctx.shadow.enabled {
                for instanced in batch.shadow_casters() {
                    shadow_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                    shadow_pass.draw_model_shadow(
                        instanced.model,
                        0..instanced.amount as u32,
                        &self.ctx.shadow.pass_bind_group,
                    );
                }
            }
        }
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            render_pass.set_pipeline(&self.ctx.pipelines.scene);
            for instanced in &batch.solids {
                if instanced.amount == 0 || instanced.instance.size() == 0 {
                    log::warn!("you attempted to render something with zero instances");
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_model_instanced(
                    instanced.model,
                    0..instanced.amount as u32,
                    &self.ctx.camera.bind_group,
                    &self.ctx.lighting.bind_group,
                    &self.ctx.shadow.sample_bind_group,
                );
            }

            render_pass.set_pipeline(&self.ctx.pipelines.outline);
            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            for outline in &batch.outlines {
                render_pass.set_vertex_buffer(0, outline.vertex.slice(..));
                render_pass.set_index_buffer(outline.index.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..outline.amount, 0, 0..1);
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<SceneEvent>,
    descriptor: SceneDescriptor,
    state: Option<AppState>,
    started: bool,
}

impl App {
    fn new(event_loop: &EventLoop<SceneEvent>, descriptor: SceneDescriptor) -> Self {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            descriptor,
            state: None,
            started: false,
        }
    }

    /// Fire one load task per descriptor entry. Tasks complete in any
    /// order; each delivers its nodes through the event queue.
    fn spawn_asset_loads(&self) {
        let state = match &self.state {
            Some(state) => state,
            None => return,
        };
        let device = state.ctx.device.clone();
        let queue = state.ctx.queue.clone();

        for plane in self.descriptor.planes.clone() {
            let (device, queue, proxy) = (device.clone(), queue.clone(), self.proxy.clone());
            self.spawn(async move {
                let label = plane.texture.to_string();
                log::info!("loading plane texture {label}");
                let started = Instant::now();
                match load_plane(&plane, &device, &queue).await {
                    Ok(node) => {
                        log::info!("decoded {label} in {:?}", started.elapsed());
                        let _ = proxy.send_event(SceneEvent::ObjectReady { label, node });
                    }
                    Err(e) => log::error!("failed to load plane {label}: {e}"),
                }
            });
        }

        for placement in self.descriptor.models.clone() {
            let (device, queue, proxy) = (device.clone(), queue.clone(), self.proxy.clone());
            self.spawn(async move {
                let label = placement.asset.to_string();
                log::info!("loading model {label}");
                let started = Instant::now();
                match load_placed_model(&placement, &device, &queue).await {
                    Ok((node, outline)) => {
                        log::info!("decoded {label} in {:?}", started.elapsed());
                        let _ = proxy.send_event(SceneEvent::ModelReady {
                            label,
                            node,
                            outline,
                        });
                    }
                    Err(e) => log::error!("failed to load model {label}: {e}"),
                }
            });
        }

        for composite in self.descriptor.composites.clone() {
            let (device, queue, proxy) = (device.clone(), queue.clone(), self.proxy.clone());
            self.spawn(async move {
                let label = composite.asset.to_string();
                log::info!("loading composite scene {label}");
                let started = Instant::now();
                match load_composite(&composite, &device, &queue).await {
                    Ok(node) => {
                        log::info!("decoded {label} in {:?}", started.elapsed());
                        let _ = proxy.send_event(SceneEvent::ObjectReady { label, node });
                    }
                    Err(e) => log::error!("failed to load composite scene {label}: {e}"),
                }
            });
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&self, fut: impl Future<Output = ()> + Send + 'static) {
        self.async_runtime.spawn(fut);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&self, fut: impl Future<Output = ()> + 'static) {
        wasm_bindgen_futures::spawn_local(fut);
    }
}

impl ApplicationHandler<SceneEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Everything is created once; a second resume must not re-spawn
        // the scene.
        if self.started {
            return;
        }
        self.started = true;

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes();

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let descriptor = self.descriptor.clone();
        let init_future = async move { AppState::new(window, &descriptor).await };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app_state = self.async_runtime.block_on(init_future);
            let size = app_state.ctx.window.inner_size();
            app_state.resize(size.width, size.height);
            app_state.ctx.window.request_redraw();
            self.state = Some(app_state);
            self.spawn_asset_loads();
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let app_state = init_future.await;
                assert!(
                    proxy
                        .send_event(SceneEvent::Initialized(Box::new(app_state)))
                        .is_ok()
                );
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: SceneEvent) {
        match event {
            SceneEvent::Initialized(state) => {
                // This is the message from our wasm `spawn_local`
                self.state = Some(*state);

                // Trigger a resize and redraw now that we are initialized
                let app_state = self.state.as_mut().unwrap();
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
                app_state.ctx.window.request_redraw();
                self.spawn_asset_loads();
            }
            SceneEvent::ObjectReady { label, node } => {
                if let Some(state) = &mut self.state {
                    let count = state.scene.adopt(&label, node);
                    log::info!("{label} resident, scene now holds {count} objects");
                }
            }
            SceneEvent::ModelReady {
                label,
                node,
                outline,
            } => {
                if let Some(state) = &mut self.state {
                    let count = state.scene.adopt_model(&label, node, outline);
                    log::info!("{label} resident, scene now holds {count} objects");
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(_) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

async fn load_plane(
    plane: &PlaneSurface,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Box<dyn SceneNode>> {
    let diffuse = resources::texture::load_texture(plane.texture, device, queue, None).await?;
    let model = mk_plane_model(device, plane.size, diffuse, plane.texture);
    let mut node = ModelNode::from_model(device, model, None);
    node.set_local_transform(plane.placement.to_instance());
    node.set_shadow_flags(plane.shadows);
    node.update_world_transforms(&Instance::default());
    node.write_to_buffers(queue);
    Ok(Box::new(node))
}

async fn load_placed_model(
    placement: &ModelPlacement,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<(Box<dyn SceneNode>, Box<dyn SceneNode>)> {
    let mut node = load_model_gltf(placement.asset, device, queue).await?;
    node.set_local_transform(placement.placement.to_instance());
    node.set_shadow_flags(placement.shadows);
    node.update_world_transforms(&Instance::default());
    node.write_to_buffers(queue);

    // A model with no geometry still gets its two insertions; the outline
    // collapses to a point at the placement position.
    let bounds = node.world_bounds().unwrap_or(Aabb {
        min: placement.placement.position,
        max: placement.placement.position,
    });
    let outline = Box::new(OutlineNode::new(device, &bounds));

    Ok((node, outline))
}

async fn load_composite(
    composite: &CompositeScene,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Box<dyn SceneNode>> {
    // Embedded transforms are trusted as-is: only world propagation runs.
    let mut node = load_model_gltf(composite.asset, device, queue).await?;
    node.update_world_transforms(&Instance::default());
    node.write_to_buffers(queue);
    Ok(node)
}

/// Build the window and event loop, then run the scene until teardown.
pub fn run(descriptor: SceneDescriptor) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<SceneEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, descriptor);

    event_loop.run_app(&mut app)?;

    Ok(())
}
