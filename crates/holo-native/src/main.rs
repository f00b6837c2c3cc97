mod loader;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use holo_core::gpu::SceneGpu;
use holo_core::texture_set::TEXTURE_SETS;
use holo_core::theme::THEMES;
use holo_core::{
    command_for_key, normalize_pointer, ScanMode, Scanner, SceneConfig, TextureSelection,
};
use winit::event::*;
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use loader::FileTextureLoader;

#[derive(Debug, Parser)]
#[command(name = "holo-scan", about = "Holographic depth scan viewer")]
struct HostOptions {
    /// Theme id (cyberpunk, matrix, ...)
    #[arg(short, long, default_value = holo_core::constants::DEFAULT_THEME_ID)]
    theme: String,

    /// Texture set id
    #[arg(short = 's', long = "texture-set", default_value = holo_core::constants::DEFAULT_TEXTURE_SET_ID)]
    texture_set: String,

    /// 0 = horizontal, 1 = vertical, 2 = radial
    #[arg(short = 'm', long = "scan-mode", default_value_t = 0)]
    scan_mode: u32,

    #[arg(long = "auto-rotate")]
    auto_rotate: bool,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Directory that `/`-rooted texture locators resolve against
    #[arg(long = "asset-root", default_value = "assets")]
    asset_root: PathBuf,
}

impl HostOptions {
    fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        if !THEMES.contains(&self.theme) {
            let valid: Vec<&str> = THEMES.ids().collect();
            anyhow::bail!("unknown theme '{}' (valid: {})", self.theme, valid.join(", "));
        }
        if !TEXTURE_SETS.contains(&self.texture_set) {
            let valid: Vec<&str> = TEXTURE_SETS.ids().collect();
            anyhow::bail!(
                "unknown texture set '{}' (valid: {})",
                self.texture_set,
                valid.join(", ")
            );
        }
        let scan_mode = ScanMode::from_index(self.scan_mode).ok_or_else(|| {
            anyhow::anyhow!("scan mode must be 0, 1 or 2 (got {})", self.scan_mode)
        })?;
        Ok(SceneConfig {
            theme: self.theme.clone(),
            texture: TextureSelection::Registered(self.texture_set.clone()),
            scan_mode,
            auto_rotate: self.auto_rotate,
            ..SceneConfig::default()
        })
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneGpu,
    last_frame: Instant,
    pointer: Vec2,
    shown_title: String,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The scan shader writes display values directly, so skip sRGB encoding.
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!("[host] surface {:?} {}x{}", format, config.width, config.height);

        let scene = SceneGpu::new(&device, format, config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            scene,
            last_frame: Instant::now(),
            pointer: Vec2::ZERO,
            shown_title: String::new(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.scene.resize(&self.device, new_size.width, new_size.height);
    }

    fn track_pointer(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        self.pointer = normalize_pointer(
            position.x as f32,
            position.y as f32,
            self.config.width as f32,
            self.config.height as f32,
        );
    }

    fn update_title(&mut self, scanner: &Scanner<FileTextureLoader>) {
        let reveal = scanner.reveal();
        let mut title = reveal.visible_title();
        if reveal.state().subtitle_visible {
            title.push_str(" | ");
            title.push_str(reveal.subtitle());
        }
        if title.is_empty() {
            title.push_str("holo-scan");
        }
        if title != self.shown_title {
            self.window.set_title(&title);
            self.shown_title = title;
        }
    }

    fn render(&mut self, scanner: &mut Scanner<FileTextureLoader>) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene_frame = scanner.tick(dt, self.pointer);
        self.scene.render(
            &self.device,
            &self.queue,
            &view,
            wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.04,
                a: 1.0,
            },
            &scene_frame,
        );
        frame.present();
        self.update_title(scanner);
        Ok(())
    }
}

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::Enter) => Some("Enter"),
        Key::Named(NamedKey::Escape) => Some("Escape"),
        _ => None,
    }
}

fn handle_key(scanner: &mut Scanner<FileTextureLoader>, event: &KeyEvent) {
    if event.state != ElementState::Pressed || event.repeat {
        return;
    }
    let Some(cmd) = key_name(&event.logical_key).and_then(command_for_key) else {
        return;
    };
    if let Err(err) = scanner.run_command(cmd) {
        log::warn!("[host] {:?} rejected: {err}", cmd);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = HostOptions::parse();
    let initial = options.scene_config()?;
    let mut scanner = Scanner::new(initial, FileTextureLoader::new(options.asset_root.clone()));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("holo-scan")
        .with_inner_size(winit::dpi::PhysicalSize::new(options.width, options.height))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => state.track_pointer(position),
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event, .. },
            ..
        } => handle_key(&mut scanner, &event),
        Event::AboutToWait => match state.render(&mut scanner) {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(_) => {}
        },
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_baseline_scene() {
        let opts = HostOptions::try_parse_from(["holo-scan"]).unwrap();
        assert_eq!(opts.scene_config().unwrap(), SceneConfig::default());
    }

    #[test]
    fn options_flow_into_the_initial_config() {
        let opts = HostOptions::try_parse_from([
            "holo-scan",
            "--theme",
            "matrix",
            "--scan-mode",
            "2",
            "--auto-rotate",
        ])
        .unwrap();
        let config = opts.scene_config().unwrap();
        assert_eq!(config.theme, "matrix");
        assert_eq!(config.scan_mode, ScanMode::Radial);
        assert!(config.auto_rotate);
    }

    #[test]
    fn unknown_ids_list_the_valid_ones() {
        let opts = HostOptions::try_parse_from(["holo-scan", "--theme", "vapor"]).unwrap();
        let msg = opts.scene_config().unwrap_err().to_string();
        assert!(msg.contains("vapor"));
        assert!(msg.contains("cyberpunk"));

        let opts = HostOptions::try_parse_from(["holo-scan", "--scan-mode", "3"]).unwrap();
        assert!(opts.scene_config().is_err());
    }

    #[test]
    fn named_keys_map_to_panel_commands() {
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), Some("Enter"));
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)), Some("Escape"));
        assert_eq!(key_name(&Key::Named(NamedKey::Tab)), None);
    }
}
