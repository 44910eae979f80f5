//! Core application state and lifecycle.

use kurbo::Point;
use peniko::Color;
use shapepad_core::board::{Board, BoardAction, BoardChange};
use shapepad_core::config::BoardConfig;
use shapepad_core::frame::FrameDecision;
use shapepad_core::surface::Surface;
use shapepad_core::variant::Variant;
use shapepad_render::{RenderContext, Renderer, VelloRenderer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vello::util::{DeviceHandle, RenderSurface};
use vello::wgpu::{self, PresentMode};
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;
use crate::export::Exporter;
use crate::ui::{UiAction, UiState, render_ui};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Window background around the drawing surface.
    pub background_color: Color,
    /// Top-left of the drawing surface in logical window coordinates.
    pub surface_origin: Point,
    /// Page shown at startup.
    pub initial_variant: Variant,
    /// Board preset (JSON) replacing the stock config of the startup page.
    pub preset: Option<PathBuf>,
    /// Where exported snapshots are written.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Shapepad".to_string(),
            width: 864,
            height: 712,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            surface_origin: Point::new(32.0, 80.0),
            initial_variant: Variant::default(),
            preset: None,
            export_dir: PathBuf::from("."),
        }
    }
}

/// One independent board per page.
struct Pages {
    canvas_painter: Board,
    painter: Board,
    bunny: Board,
}

impl Pages {
    /// Stock boards, with `preset` (if any) applied to the `initial` page.
    fn new(initial: Variant, preset: Option<&Path>) -> Self {
        let mut pages = Self {
            canvas_painter: Board::for_variant(Variant::CanvasPainter),
            painter: Board::for_variant(Variant::Painter),
            bunny: Board::for_variant(Variant::Bunny),
        };
        if let Some(path) = preset {
            match BoardConfig::load(path).and_then(Board::try_new) {
                Ok(board) => *pages.get_mut(initial) = board,
                Err(e) => log::warn!("Ignoring preset {}: {e}", path.display()),
            }
        }
        pages
    }

    fn get(&self, variant: Variant) -> &Board {
        match variant {
            Variant::CanvasPainter => &self.canvas_painter,
            Variant::Painter => &self.painter,
            Variant::Bunny => &self.bunny,
        }
    }

    fn get_mut(&mut self, variant: Variant) -> &mut Board {
        match variant {
            Variant::CanvasPainter => &mut self.canvas_painter,
            Variant::Painter => &mut self.painter,
            Variant::Bunny => &mut self.bunny,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Board> {
        [&mut self.canvas_painter, &mut self.painter, &mut self.bunny].into_iter()
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    pages: Pages,
    events: EventHandler,
    exporter: Exporter,
    config: AppConfig,
}

impl AppState {
    fn board(&self) -> &Board {
        self.pages.get(self.ui_state.variant)
    }

    fn board_mut(&mut self) -> &mut Board {
        self.pages.get_mut(self.ui_state.variant)
    }

    /// Apply an action to the current board and schedule a redraw if it
    /// changed anything.
    fn dispatch(&mut self, action: BoardAction) {
        if self.board_mut().dispatch(action) != BoardChange::None {
            self.sync_ui();
            self.window.request_redraw();
        }
    }

    fn handle_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::Spawn(kind) => self.dispatch(BoardAction::AddShape(kind)),
            UiAction::SelectVariant(variant) if variant != self.ui_state.variant => {
                log::info!("Switching to {}", variant.title());
                self.ui_state.variant = variant;
                let surface = Surface::new(self.config.surface_origin, self.board().config().surface_size);
                self.events.set_surface(surface);
                self.board_mut().frames_mut().invalidate();
                self.sync_ui();
            }
            UiAction::SelectVariant(_) => {}
            UiAction::Export => self.export(),
        }
    }

    fn export(&mut self) {
        let variant = self.ui_state.variant;
        let snapshot = match self.exporter.capture(self.pages.get(variant)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Failed to export {}: {e}", variant.title());
                return;
            }
        };
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(e) = crate::export::write_snapshot(&self.config.export_dir, variant, &snapshot) {
            log::error!("Failed to write snapshot: {e}");
        }
        #[cfg(target_arch = "wasm32")]
        log::warn!("Export of {}x{} snapshot is not available on the web", snapshot.width, snapshot.height);
    }

    /// Shapes into an offscreen texture, that texture onto the window, then
    /// egui on top.
    fn present_frame(
        &mut self,
        gpu: &DeviceHandle,
        textures_delta: &egui::TexturesDelta,
        primitives: &[egui::ClippedPrimitive],
        pixels_per_point: f32,
    ) {
        let (device, queue) = (&gpu.device, &gpu.queue);
        let frame = match self.surface.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Failed to get surface texture: {e:?}");
                return;
            }
        };
        let (width, height) = (self.surface.config.width, self.surface.config.height);

        let shapes_view = offscreen_view(device, width, height);
        let params = RenderParams {
            base_color: self.config.background_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };
        if let Err(e) = self.vello_renderer.render_to_texture(
            device,
            queue,
            self.shape_renderer.scene(),
            &shapes_view,
            &params,
        ) {
            log::error!("Failed to render shapes: {e:?}");
            return;
        }

        let target = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("shapepad frame"),
        });
        self.texture_blitter.copy(device, &mut encoder, &shapes_view, &target);

        for (id, delta) in &textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, delta);
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point,
        };
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, primitives, &screen);
        {
            let overlay = wgpu::RenderPassColorAttachment {
                view: &target,
                resolve_target: None,
                // Draw over the blitted shapes.
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            };
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui overlay"),
                    color_attachments: &[Some(overlay)],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, primitives, &screen);
        }
        queue.submit(std::iter::once(encoder.finish()));

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        frame.present();
    }

    fn sync_ui(&mut self) {
        let board = self.pages.get(self.ui_state.variant);
        self.ui_state.spawn_kinds = board.config().spawn_kinds.clone();
        self.ui_state.shape_count = board.registry().len();
    }
}

/// Vello writes through storage bindings, which WebGPU only allows on
/// `Rgba8Unorm`; the result is blitted to the surface format afterwards.
fn offscreen_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("shapes"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application with default configuration.
    pub async fn run() {
        Self::run_with_config(AppConfig::default()).await;
    }

    /// Run the application.
    pub async fn run_with_config(config: AppConfig) {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {e}");
                return;
            }
        };
        let app = App::with_config(config);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            if let Err(e) = event_loop.run_app(&mut app) {
                log::error!("Event loop error: {e}");
            }
        }
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("Render context not initialized");
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = match vello::Renderer::new(device, RendererOptions::default()) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create Vello renderer: {e:?}");
                return;
            }
        };

        // Vello renders to Rgba8Unorm; the surface format on WebGPU is
        // typically Bgra8Unorm.
        let texture_blitter = wgpu::util::TextureBlitter::new(device, surface.config.format);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let variant = self.config.initial_variant;
        let pages = Pages::new(variant, self.config.preset.as_deref());
        let surface_size = pages.get(variant).config().surface_size;
        let events = EventHandler::new(Surface::new(self.config.surface_origin, surface_size));

        log::info!("Shapepad initialized - {}x{}", surface.config.width, surface.config.height);

        let mut state = AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState {
                variant,
                ..UiState::default()
            },
            pages,
            events,
            exporter: Exporter::new(),
            config: self.config.clone(),
        };
        state.sync_ui();
        self.state = Some(state);
        self.pending_window = None;

        // Request initial redraw
        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        // On WASM, attach a canvas to the DOM
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|document| {
                    if let Some(loading) = document.get_element_by_id("loading") {
                        loading.remove();
                    }
                    document
                        .get_element_by_id("shapepad-canvas")
                        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                        .or_else(|| {
                            let app_div = document.get_element_by_id("app")?;
                            let canvas = document.create_element("canvas").ok()?;
                            canvas.set_id("shapepad-canvas");
                            app_div.append_child(&canvas).ok()?;
                            canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
                        })
                });
            if let Some(canvas) = &canvas {
                canvas.set_width(self.config.width);
                canvas.set_height(self.config.height);
            }

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(canvas)
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self
                .render_cx
                .get_or_insert_with(vello::util::RenderContext::new);

            let surface = match pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            )) {
                Ok(surface) => surface,
                Err(e) => {
                    log::error!("Failed to create surface: {e:?}");
                    event_loop.exit();
                    return;
                }
            };

            // Transmute lifetime to 'static - safe because App owns everything
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // On WASM, handle async initialization
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let size = window.inner_size();
                    let width = size.width.max(1);
                    let height = size.height.max(1);

                    // Get raw pointer to self for async callback
                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        log::info!("Creating surface asynchronously...");
                        let mut render_cx = vello::util::RenderContext::new();

                        match render_cx
                            .create_surface(window_clone.clone(), width, height, PresentMode::AutoVsync)
                            .await
                        {
                            Ok(surface) => {
                                let surface: RenderSurface<'static> =
                                    unsafe { std::mem::transmute(surface) };

                                // SAFETY: WASM is single-threaded and the App is
                                // kept alive by the event loop.
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("Failed to create surface: {:?}", e);
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }

                // Request redraw to keep the event loop running
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }
        let egui_wants_pointer =
            state.egui_ctx.is_pointer_over_area() || state.egui_ctx.wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => {
                for board in state.pages.iter_mut() {
                    board.frames_mut().stop();
                }
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.board_mut().frames_mut().invalidate();
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.board_mut().frames_mut().invalidate();
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                let point = Point::new(logical.x, logical.y);
                // Moves over the toolbar still count as leaving the surface.
                let point = if egui_wants_pointer { Point::new(-1.0, -1.0) } else { point };
                if let Some(action) = state.events.cursor_moved(state.pages.get(state.ui_state.variant), point) {
                    state.dispatch(action);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(action) = state.events.cursor_left(state.pages.get(state.ui_state.variant)) {
                    state.dispatch(action);
                }
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                let pressed = btn_state == ElementState::Pressed;
                if pressed && egui_wants_pointer {
                    return;
                }
                if let Some(action) = state
                    .events
                    .mouse_input(state.pages.get(state.ui_state.variant), button, pressed) {
                    state.dispatch(action);
                }
            }

            WindowEvent::RedrawRequested => {
                // Run egui and collect any action
                let egui_input = state.egui_state.take_egui_input(&state.window);
                let mut ui_action = None;
                let egui_output = state.egui_ctx.run(egui_input, |ctx| {
                    ui_action = render_ui(ctx, &state.ui_state);
                });
                if let Some(action) = ui_action {
                    state.handle_ui_action(action);
                }

                state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
                let egui_primitives =
                    state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

                // Rebuild the scene only when the board asks for it
                let variant = state.ui_state.variant;
                let board = state.pages.get_mut(variant);
                let revision = board.registry().revision();
                let decision = board.frames_mut().next_frame(revision);
                match decision {
                    FrameDecision::Stopped => return,
                    FrameDecision::Skip => {}
                    FrameDecision::Draw => {
                        let board = state.pages.get(variant);
                        let render_ctx = RenderContext::new(board.registry(), board.config().surface_size)
                            .with_scale_factor(state.window.scale_factor())
                            .with_origin(state.config.surface_origin);
                        state.shape_renderer.build_scene(&render_ctx);
                    }
                }

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                state.present_frame(
                    &render_cx.devices[state.surface.dev_id],
                    &egui_output.textures_delta,
                    &egui_primitives,
                    egui_output.pixels_per_point,
                );

                let egui_repaint = egui_output
                    .viewport_output
                    .get(&egui::ViewportId::ROOT)
                    .is_some_and(|viewport| viewport.repaint_delay.is_zero());
                if state.board().frames().wants_next_frame() || egui_repaint {
                    state.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
