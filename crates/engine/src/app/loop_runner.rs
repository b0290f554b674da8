use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::ActionStates;
use super::metrics::MetricsAccumulator;
use super::scene::SceneRuntime;
use super::{InputAction, InputSnapshot, Renderer, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub max_frame_delta: Duration,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Engine".to_string(),
            window_width: 800,
            window_height: 600,
            max_frame_delta: Duration::from_millis(100),
            metrics_log_interval: Duration::from_secs(5),
            max_render_fps: Some(60),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Runs `scene` until the window closes or the scene asks to quit. Each
/// redraw performs exactly one update with the measured frame delta, clamped
/// to `max_frame_delta`, followed by one render.
pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(100));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let (surface_width, surface_height) = renderer.size();
    let mut input_collector = InputCollector::new(surface_width, surface_height);
    let mut scene = SceneRuntime::new(scene);
    scene.load();

    info!(
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;
    let window_for_loop = Arc::clone(&window);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        input_collector.set_window_size(new_size.width, new_size.height);
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        input_collector.set_window_size(size.width, size.height);
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::Focused(false) => {
                        input_collector.release_all();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input_collector.handle_keyboard_input(&event);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;
                        let frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);

                        let input_snapshot = input_collector.snapshot_for_update();
                        let command = scene.update(frame_dt.as_secs_f32(), &input_snapshot);
                        metrics_accumulator.record_update();
                        if command == SceneCommand::Quit {
                            info!(reason = "scene_quit", "shutdown_requested");
                            window_target.exit();
                            return;
                        }

                        let elapsed_since_last_present =
                            Instant::now().saturating_duration_since(last_present_instant);
                        let cap_sleep =
                            compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                        if cap_sleep > Duration::ZERO {
                            thread::sleep(cap_sleep);
                        }

                        if let Err(error) = renderer.draw_frame(|canvas| scene.render(canvas)) {
                            warn!(error = %error, "renderer_draw_failed");
                            window_target.exit();
                        }
                        last_present_instant = Instant::now();

                        let next_title = scene.debug_title();
                        if next_title != last_applied_title {
                            match &next_title {
                                Some(title) => window_for_loop.set_title(title),
                                None => window_for_loop.set_title(&config.window_title),
                            }
                            last_applied_title = next_title;
                        }
                        metrics_accumulator.record_frame(raw_frame_dt);

                        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                            scene.metrics_updated(snapshot);
                            info!(
                                fps = snapshot.fps,
                                ups = snapshot.ups,
                                frame_time_ms = snapshot.frame_time_ms,
                                worst_frame_ms = snapshot.worst_frame_ms,
                                "loop_metrics"
                            );
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                scene.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    action_states: ActionStates,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        if let Some(action) = action_for_key(key) {
            self.action_states.set(action, is_pressed);
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Drops held keys when focus is lost so movement does not stick.
    fn release_all(&mut self) {
        self.action_states.release_all();
    }

    fn snapshot_for_update(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.action_states,
            (self.window_width, self.window_height),
        );
        self.action_states.clear_pressed();
        snapshot
    }
}

fn action_for_key(key: PhysicalKey) -> Option<InputAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let action = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => InputAction::MoveUp,
        KeyCode::KeyS | KeyCode::ArrowDown => InputAction::MoveDown,
        KeyCode::KeyA | KeyCode::ArrowLeft => InputAction::MoveLeft,
        KeyCode::KeyD | KeyCode::ArrowRight => InputAction::MoveRight,
        KeyCode::Tab => InputAction::Attack,
        KeyCode::KeyF => InputAction::SpecialAttack,
        KeyCode::KeyQ => InputAction::UsePotion,
        KeyCode::Space => InputAction::Interact,
        KeyCode::KeyM => InputAction::ToggleZoneSelect,
        KeyCode::Escape => InputAction::Cancel,
        KeyCode::KeyR => InputAction::Restart,
        KeyCode::Digit1 | KeyCode::Numpad1 => InputAction::Select1,
        KeyCode::Digit2 | KeyCode::Numpad2 => InputAction::Select2,
        KeyCode::Digit3 | KeyCode::Numpad3 => InputAction::Select3,
        KeyCode::Digit4 | KeyCode::Numpad4 => InputAction::Select4,
        _ => return None,
    };
    Some(action)
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputCollector, code: KeyCode) {
        input.update_action_state_from_physical_key(PhysicalKey::Code(code), true);
    }

    fn release(input: &mut InputCollector, code: KeyCode) {
        input.update_action_state_from_physical_key(PhysicalKey::Code(code), false);
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(100);

        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(16), max_frame_delta),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn attack_press_is_edge_triggered_for_single_update() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Tab);

        let first = input.snapshot_for_update();
        let second = input.snapshot_for_update();

        assert!(first.was_pressed(InputAction::Attack));
        assert!(!second.was_pressed(InputAction::Attack));
        assert!(second.is_down(InputAction::Attack));
    }

    #[test]
    fn key_repeat_does_not_retrigger_edge() {
        let mut input = InputCollector::default();

        press(&mut input, KeyCode::Space);
        let first = input.snapshot_for_update();
        press(&mut input, KeyCode::Space);
        let second = input.snapshot_for_update();
        release(&mut input, KeyCode::Space);
        press(&mut input, KeyCode::Space);
        let third = input.snapshot_for_update();

        assert!(first.was_pressed(InputAction::Interact));
        assert!(!second.was_pressed(InputAction::Interact));
        assert!(third.was_pressed(InputAction::Interact));
    }

    #[test]
    fn tap_between_updates_is_not_lost() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyQ);
        release(&mut input, KeyCode::KeyQ);

        let snapshot = input.snapshot_for_update();

        assert!(snapshot.was_pressed(InputAction::UsePotion));
        assert!(!snapshot.is_down(InputAction::UsePotion));
    }

    #[test]
    fn wasd_and_arrow_keys_map_to_actions() {
        let mut input = InputCollector::default();

        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowLeft);

        let snapshot = input.snapshot_for_update();
        assert!(snapshot.is_down(InputAction::MoveUp));
        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(!snapshot.is_down(InputAction::MoveRight));
    }

    #[test]
    fn key_release_clears_action_state() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyD);
        release(&mut input, KeyCode::KeyD);

        let snapshot = input.snapshot_for_update();
        assert!(!snapshot.is_down(InputAction::MoveRight));
    }

    #[test]
    fn digit_keys_map_to_selections() {
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::Digit3)),
            Some(InputAction::Select3)
        );
        assert_eq!(
            action_for_key(PhysicalKey::Code(KeyCode::Numpad1)),
            Some(InputAction::Select1)
        );
        assert_eq!(action_for_key(PhysicalKey::Code(KeyCode::KeyZ)), None);
    }

    #[test]
    fn release_all_clears_held_movement() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyA);

        input.release_all();
        let snapshot = input.snapshot_for_update();

        assert!(!snapshot.is_down(InputAction::MoveLeft));
    }

    #[test]
    fn snapshot_carries_window_size() {
        let mut input = InputCollector::new(1024, 768);
        input.set_window_size(640, 480);

        assert_eq!(input.snapshot_for_update().window_size(), (640, 480));
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(None), None);
    }

    #[test]
    fn compute_cap_sleep_zero_when_over_budget() {
        let target = target_frame_duration(Some(60));
        assert_eq!(
            compute_cap_sleep(Duration::from_millis(20), target),
            Duration::ZERO
        );
    }

    #[test]
    fn compute_cap_sleep_positive_when_under_budget() {
        let target = target_frame_duration(Some(50));
        let sleep = compute_cap_sleep(Duration::from_millis(5), target);
        assert!(sleep > Duration::from_millis(14));
        assert!(sleep <= Duration::from_millis(15));
    }

    #[test]
    fn normalize_render_fps_cap_disables_zero() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(30)), Some(30));
    }
}
