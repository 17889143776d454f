//! audioscape - a wireframe room that breathes with the music
//!
//! The lower half of the spectrum lifts the floor, ceiling and walls; the
//! upper half roughens them. The centrepiece pulses with the bass while the
//! camera circles it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use audioscape::audio::AudioSystem;
use audioscape::camera::CameraSystem;
use audioscape::cli::Args;
use audioscape::params::{AnalyserConfig, OrbitCamera, RenderConfig, VisualConfig};
use audioscape::rendering::RenderSystem;
use audioscape::scene::Scene;
use audioscape::terrain::TerrainSystem;

/// Object spin about Y (radians per second)
const OBJECT_SPIN_RATE: f32 = 1.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    scene: Scene,
    terrain: TerrainSystem,
    camera: CameraSystem,
    audio: Option<AudioSystem>,

    // Configuration
    config: VisualConfig,
    render_config: RenderConfig,
    audio_path: Option<PathBuf>,

    // Time tracking
    last_frame: Instant,
}

impl App {
    fn new(args: &Args) -> audioscape::Result<Self> {
        let descriptor = args.scene_descriptor();
        let config = args.visual_config(&descriptor);

        let mut scene = Scene::build(&descriptor, &config)?;
        let terrain = TerrainSystem::new(args.displacement_params());
        terrain.rest(&mut scene);

        Ok(Self {
            window: None,
            render_system: None,
            scene,
            terrain,
            camera: CameraSystem::new(OrbitCamera::default()),
            audio: None,
            config,
            render_config: RenderConfig::default(),
            audio_path: args.audio.clone(),
            last_frame: Instant::now(),
        })
    }

    fn start_audio(&mut self) {
        let Some(path) = self.audio_path.take() else {
            log::info!("No audio file given, terrain stays at rest");
            return;
        };

        match AudioSystem::load(path, AnalyserConfig::default()) {
            Ok(audio) => {
                self.audio = Some(audio);
                self.terrain.drive();
            }
            Err(e) => log::error!("Audio disabled: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("audioscape")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system =
            match pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.scene)) {
                Ok(render_system) => render_system,
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                    return;
                }
            };

        let size = window.inner_size();
        self.render_config.window_width = size.width;
        self.render_config.window_height = size.height;

        log::info!("Window {}x{} ready, press ESC to quit", size.width, size.height);

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.start_audio();
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if tweak(&mut self.config, code) {
                    self.scene.apply_config(&self.config);
                    log::debug!("Config: {:?}", self.config);
                }
            }
            WindowEvent::Resized(size) => {
                self.render_config.window_width = size.width;
                self.render_config.window_height = size.height;
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Update, displace and render a single frame
    fn render_frame(&mut self) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Update step
        let spectrum = self.audio.as_mut().and_then(|audio| audio.spectrum());
        self.terrain.update(spectrum, &self.config);
        self.scene.set_object_scale(self.terrain.object_scale());
        self.scene.spin_object(dt * OBJECT_SPIN_RATE);
        self.camera.advance(dt);

        // Displacement step, phased by wall-clock milliseconds
        let phase_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default();
        self.terrain.displace(&mut self.scene, phase_ms);

        render_system.upload(&mut self.scene);
        render_system.update_uniforms(&self.scene, self.camera.view_proj(&self.render_config));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

/// Apply a keyboard adjustment to the live config, returning whether it changed
fn tweak(config: &mut VisualConfig, code: KeyCode) -> bool {
    let before = config.clone();
    match code {
        KeyCode::ArrowUp => config.multi += 1.0,
        KeyCode::ArrowDown => config.multi -= 1.0,
        KeyCode::ArrowRight => config.object_scale += 1.0,
        KeyCode::ArrowLeft => config.object_scale -= 1.0,
        KeyCode::PageUp => config.plane_rotation_deg += 15.0,
        KeyCode::PageDown => config.plane_rotation_deg -= 15.0,
        _ => return false,
    }
    *config = config.clamped();
    *config != before
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweak_steps_and_clamps() {
        let mut config = VisualConfig::default();

        assert!(tweak(&mut config, KeyCode::ArrowUp));
        assert_eq!(config.multi, 11.0);

        // Object scale already at its maximum
        assert!(!tweak(&mut config, KeyCode::ArrowRight));
        assert_eq!(config.object_scale, 10.0);

        assert!(tweak(&mut config, KeyCode::PageDown));
        assert_eq!(config.plane_rotation_deg, 75.0);

        assert!(!tweak(&mut config, KeyCode::KeyQ));
    }
}
