#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the platformer.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature, so this adapter only draws and polls input.

mod input;

pub use input::KeyBindings;

use anyhow::Result;
use glam::Vec2;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    shapes::{draw_circle, draw_rectangle, draw_triangle},
    text::{draw_text, measure_text},
};
use platformer_core::{Cell, Facing, GameMode};
use platformer_rendering::{
    palette, Color, EntityPresentation, FrameInput, Hud, Presentation, RenderingBackend, Scene,
};
use std::{
    collections::VecDeque,
    sync::mpsc,
    time::{Duration, Instant},
};
use tracing::info;

/// Height of the HUD band reserved above the level, in pixels.
const HUD_HEIGHT: f32 = 36.0;
const HUD_FONT_SIZE: f32 = 24.0;
const OVERLAY_FONT_SIZE: u16 = 32;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_width: i32,
    window_height: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_width: 1024,
            window_height: 480,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Sets the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
        self
    }
}

/// Time spent on one frame, split by stage.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Result<()> + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_width,
            window_height,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (error_sender, error_receiver) = mpsc::channel::<anyhow::Error>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let bindings = KeyBindings::default();

            loop {
                let input = bindings.poll();
                if input.quit {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let simulation_start = Instant::now();
                if let Err(error) = update_scene(frame_dt, input, &mut scene) {
                    let _ = error_sender.send(error);
                    break;
                }
                let simulation = simulation_start.elapsed();

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                draw_tiles(&scene, &metrics);
                for enemy in &scene.enemies {
                    draw_entity(enemy, palette::ENEMY, &metrics);
                }
                if scene.mode != GameMode::Menu {
                    draw_entity(&scene.player, palette::PLAYER, &metrics);
                    draw_hud(&scene.hud);
                }
                if let Some(message) = overlay_message(scene.mode, &scene.hud) {
                    draw_overlay(&message, screen_width, screen_height);
                }
                let render = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation,
                    render,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            fps = per_second,
                            trailing_fps = trailing_ten_seconds,
                            sim_ms = avg_simulation.as_secs_f64() * 1_000.0,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        match error_receiver.try_recv() {
            Ok(error) => Err(error),
            Err(_) => Ok(()),
        }
    }
}

/// Screen-space layout fitting the level grid below the HUD band.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    offset_x: f32,
    offset_y: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let columns = scene.columns() as f32;
        let rows = scene.rows() as f32;
        let available_height = (screen_height - HUD_HEIGHT).max(0.0);

        let cell_step = if columns == 0.0 || rows == 0.0 {
            0.0
        } else {
            (screen_width / columns).min(available_height / rows)
        };

        let offset_x = ((screen_width - columns * cell_step) * 0.5).max(0.0);
        let offset_y = HUD_HEIGHT + ((available_height - rows * cell_step) * 0.5).max(0.0);

        Self {
            offset_x,
            offset_y,
            cell_step,
        }
    }

    /// Converts a position in cells into screen pixels.
    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.cell_step,
            self.offset_y + position.y * self.cell_step,
        )
    }
}

fn draw_tiles(scene: &Scene, metrics: &SceneMetrics) {
    let step = metrics.cell_step;
    for (row, column, cell) in scene.tiles() {
        let Some(color) = palette::cell_color(cell, scene.exit_open) else {
            continue;
        };
        let color = to_macroquad_color(color);
        let origin = metrics.to_screen(Vec2::new(column as f32, row as f32));

        match cell {
            Cell::Coin => {
                let center = origin + Vec2::splat(step * 0.5);
                draw_circle(center.x, center.y, step * 0.3, color);
            }
            Cell::Spike => {
                let base = origin.y + step;
                draw_triangle(
                    MacroquadVec2::new(origin.x, base),
                    MacroquadVec2::new(origin.x + step, base),
                    MacroquadVec2::new(origin.x + step * 0.5, origin.y + step * 0.2),
                    color,
                );
            }
            _ => draw_rectangle(origin.x, origin.y, step, step, color),
        }
    }
}

fn draw_entity(entity: &EntityPresentation, color: Color, metrics: &SceneMetrics) {
    let step = metrics.cell_step;
    let inset = step * 0.1;
    let origin = metrics.to_screen(entity.position);
    let body = to_macroquad_color(color);
    draw_rectangle(
        origin.x + inset,
        origin.y + inset,
        step - 2.0 * inset,
        step * 0.7,
        body,
    );

    let leg_top = origin.y + step * 0.8;
    let leg_width = step * 0.2;
    let shift = stride(entity) * step * 0.1;
    for leg_x in [step * 0.2 + shift, step * 0.6 - shift] {
        draw_rectangle(origin.x + leg_x, leg_top, leg_width, step * 0.2, body);
    }

    let eye_x = match entity.facing {
        Facing::Left => origin.x + step * 0.25,
        Facing::Right => origin.x + step * 0.6,
    };
    let eye = step * 0.15;
    draw_rectangle(
        eye_x,
        origin.y + step * 0.3,
        eye,
        eye,
        to_macroquad_color(palette::TEXT),
    );
}

/// Leg offset direction for the walking pose: zero while standing still,
/// otherwise alternating every quarter cell travelled.
fn stride(entity: &EntityPresentation) -> f32 {
    if !entity.moving {
        return 0.0;
    }
    if (entity.position.x * 4.0).rem_euclid(1.0) < 0.5 {
        1.0
    } else {
        -1.0
    }
}

fn draw_hud(hud: &Hud) {
    let text = hud_text(hud);
    draw_text(
        &text,
        12.0,
        HUD_HEIGHT * 0.7,
        HUD_FONT_SIZE,
        to_macroquad_color(palette::TEXT),
    );
}

fn draw_overlay(message: &str, screen_width: f32, screen_height: f32) {
    let band_height = f32::from(OVERLAY_FONT_SIZE) * 2.5;
    let band_top = (screen_height - band_height) * 0.5;
    draw_rectangle(
        0.0,
        band_top,
        screen_width,
        band_height,
        to_macroquad_color(palette::OVERLAY),
    );

    let dimensions = measure_text(message, None, OVERLAY_FONT_SIZE, 1.0);
    draw_text(
        message,
        (screen_width - dimensions.width) * 0.5,
        band_top + (band_height + dimensions.height) * 0.5,
        f32::from(OVERLAY_FONT_SIZE),
        to_macroquad_color(palette::TEXT),
    );
}

fn hud_text(hud: &Hud) -> String {
    format!(
        "Level {}/{}   Lives {}/{}   Coins {} (total {})   Time {}",
        hud.level_number,
        hud.level_count,
        hud.lives,
        hud.max_lives,
        hud.level_score,
        hud.total_score,
        hud.seconds_remaining,
    )
}

fn overlay_message(mode: GameMode, hud: &Hud) -> Option<String> {
    match mode {
        GameMode::Playing => None,
        GameMode::Menu => Some("Press Enter to start".to_owned()),
        GameMode::Paused => Some("Paused. Press Escape to resume".to_owned()),
        GameMode::Death if hud.lives == 0 => Some("Out of lives. Press Enter".to_owned()),
        GameMode::Death => Some("You died. Press Enter to retry".to_owned()),
        GameMode::GameOver => Some(format!(
            "Game over with {} coins. Press Enter to play again",
            hud.total_score
        )),
        GameMode::Victory => Some(format!(
            "Every level cleared with {} coins. Press Enter",
            hud.total_score
        )),
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_grid(columns: usize, rows: usize) -> Scene {
        let mut scene = Scene::empty();
        scene
            .set_grid(columns, rows, &vec![Cell::Air; columns * rows])
            .expect("valid grid");
        scene
    }

    #[test]
    fn scene_metrics_fit_wide_levels_to_screen_width() {
        let scene = scene_with_grid(20, 5);
        let metrics = SceneMetrics::from_scene(&scene, 400.0, 436.0);

        assert_eq!(metrics.cell_step, 20.0);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.offset_y, HUD_HEIGHT + 150.0);
    }

    #[test]
    fn scene_metrics_center_tall_levels_horizontally() {
        let scene = scene_with_grid(4, 10);
        let metrics = SceneMetrics::from_scene(&scene, 800.0, 536.0);

        assert_eq!(metrics.cell_step, 50.0);
        assert_eq!(metrics.offset_x, 300.0);
        assert_eq!(metrics.offset_y, HUD_HEIGHT);
        assert_eq!(
            metrics.to_screen(Vec2::new(1.5, 2.0)),
            Vec2::new(375.0, HUD_HEIGHT + 100.0)
        );
    }

    #[test]
    fn empty_scene_collapses_metrics() {
        let metrics = SceneMetrics::from_scene(&Scene::empty(), 640.0, 480.0);
        assert_eq!(metrics.cell_step, 0.0);
    }

    #[test]
    fn overlay_only_hidden_while_playing() {
        let hud = Hud {
            lives: 1,
            total_score: 7,
            ..Hud::default()
        };
        assert!(overlay_message(GameMode::Playing, &hud).is_none());
        assert_eq!(
            overlay_message(GameMode::Victory, &hud).as_deref(),
            Some("Every level cleared with 7 coins. Press Enter")
        );
        assert_eq!(
            overlay_message(GameMode::Death, &hud).as_deref(),
            Some("You died. Press Enter to retry")
        );
        assert_eq!(
            overlay_message(GameMode::Death, &Hud::default()).as_deref(),
            Some("Out of lives. Press Enter")
        );
    }

    #[test]
    fn legs_only_stride_while_moving() {
        let standing = EntityPresentation::new(Vec2::new(2.1, 1.0), Facing::Right, false);
        assert_eq!(stride(&standing), 0.0);

        let first = EntityPresentation::new(Vec2::new(2.1, 1.0), Facing::Right, true);
        let second = EntityPresentation::new(Vec2::new(2.4, 1.0), Facing::Right, true);
        assert_eq!(stride(&first), 1.0);
        assert_eq!(stride(&second), -1.0);
    }

    #[test]
    fn hud_text_lists_progress() {
        let hud = Hud {
            lives: 2,
            max_lives: 3,
            level_score: 4,
            total_score: 9,
            seconds_remaining: 41,
            level_number: 2,
            level_count: 3,
        };
        assert_eq!(
            hud_text(&hud),
            "Level 2/3   Lives 2/3   Coins 4 (total 9)   Time 41"
        );
    }

    #[test]
    fn fps_counter_reports_average_frames_per_second() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            simulation: Duration::from_millis(2),
            ..FrameBreakdown::default()
        };
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());
        assert!(counter.record_frame(frame(250)).is_none());

        let metrics = counter
            .record_frame(frame(250))
            .expect("should report FPS after one second of samples");
        assert!((metrics.per_second - 4.0).abs() <= 1e-3);
        assert!((metrics.trailing_ten_seconds - 4.0).abs() <= 1e-3);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(2));
        assert!(counter.record_frame(frame(250)).is_none());
    }

    #[test]
    fn fps_counter_tracks_trailing_ten_second_average() {
        let mut counter = FpsCounter::default();
        let frame = |millis| FrameBreakdown {
            frame: Duration::from_millis(millis),
            ..FrameBreakdown::default()
        };

        for _ in 0..10 {
            for sample in 0..5 {
                let metrics = counter.record_frame(frame(200));
                if sample == 4 {
                    let metrics = metrics.expect("should report every second");
                    assert!((metrics.per_second - 5.0).abs() <= 1e-3);
                } else {
                    assert!(metrics.is_none());
                }
            }
        }

        for sample in 0..10 {
            let metrics = counter.record_frame(frame(100));
            if sample == 9 {
                let metrics = metrics.expect("should report every second");
                assert!((metrics.per_second - 10.0).abs() <= 1e-3);
                assert!((metrics.trailing_ten_seconds - 5.5).abs() <= 1e-3);
            } else {
                assert!(metrics.is_none());
            }
        }
    }
}
