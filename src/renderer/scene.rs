//! Frame scene construction
//!
//! Turns a [`SimState`] into a triangle list in surface pixels. Reads the
//! state only; the random source here drives camera jitter and flame flicker
//! and is never the simulation's.

use glam::Vec2;
use rand::Rng;

use super::shapes::{dashed_vline, rect, rect_outline, rounded_rect, triangle};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{ParticleKind, SimState};

/// Width of the grass strip drawn outside each road edge
const SHOULDER_WIDTH: f32 = 20.0;
const CAR_CORNER_RADIUS: f32 = 8.0;
const CORNER_SEGMENTS: u32 = 4;
const STREAK_WIDTH: f32 = 2.0;
const STREAK_LENGTH: f32 = 20.0;

/// Per-frame presentation options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// The car color picked in the configurator
    pub player_paint: [f32; 4],
    /// Apply the state's camera shake
    pub screen_shake: bool,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            player_paint: colors::DEFAULT_PLAYER,
            screen_shake: true,
        }
    }
}

/// Draw order: road, particles, traffic, player
pub fn build_scene<R: Rng + ?Sized>(state: &SimState, style: &SceneStyle, rng: &mut R) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);

    environment(&mut vertices, state.road_offset);

    for particle in &state.particles {
        let base = match particle.kind {
            ParticleKind::Boost => colors::BOOST_STREAK,
            ParticleKind::Speed => colors::SPEED_STREAK,
        };
        let color = colors::with_alpha(base, particle.life.clamp(0.0, 1.0));
        vertices.extend(rect(
            particle.pos.x,
            particle.pos.y,
            STREAK_WIDTH,
            STREAK_LENGTH,
            color,
        ));
    }

    for obstacle in &state.obstacles {
        car(
            &mut vertices,
            obstacle.pos,
            colors::rgb(obstacle.paint),
            None,
        );
    }

    let flames = state.is_boosting.then(|| [rng.random::<f32>(), rng.random::<f32>()]);
    car(
        &mut vertices,
        Vec2::new(state.player_x, PLAYER_Y),
        style.player_paint,
        Some(PlayerTrim { flames }),
    );

    if style.screen_shake && state.camera_shake > 0.0 {
        let shake = Vec2::new(
            (rng.random::<f32>() - 0.5) * state.camera_shake,
            (rng.random::<f32>() - 0.5) * state.camera_shake,
        );
        for v in &mut vertices {
            v.position[0] += shake.x;
            v.position[1] += shake.y;
        }
    }

    vertices
}

fn environment(vertices: &mut Vec<Vertex>, road_offset: f32) {
    vertices.extend(rect(0.0, 0.0, TRACK_WIDTH, TRACK_HEIGHT, colors::ROAD));

    // Shoulders sit just off the surface; only camera shake reveals them
    vertices.extend(rect(-SHOULDER_WIDTH, 0.0, SHOULDER_WIDTH, TRACK_HEIGHT, colors::GRASS));
    vertices.extend(rect(TRACK_WIDTH, 0.0, SHOULDER_WIDTH, TRACK_HEIGHT, colors::GRASS));

    for lane in 1..LANE_COUNT {
        vertices.extend(dashed_vline(
            lane as f32 * LANE_WIDTH,
            0.0,
            TRACK_HEIGHT,
            2.0,
            MARKING_DASH,
            MARKING_GAP,
            road_offset,
            colors::LANE_MARKING,
        ));
    }

    // Solid edge lines
    vertices.extend(rect(0.5, 0.0, 3.0, TRACK_HEIGHT, colors::EDGE_LINE));
    vertices.extend(rect(TRACK_WIDTH - 3.5, 0.0, 3.0, TRACK_HEIGHT, colors::EDGE_LINE));
}

/// Extra details only the player car gets
struct PlayerTrim {
    /// Flame length jitter (0-1 each), present while boosting
    flames: Option<[f32; 2]>,
}

fn car(vertices: &mut Vec<Vertex>, at: Vec2, paint: [f32; 4], trim: Option<PlayerTrim>) {
    let Vec2 { x, y } = at;

    vertices.extend(rect(x + 4.0, y + 4.0, CAR_WIDTH + 2.0, CAR_HEIGHT + 2.0, colors::CAR_SHADOW));
    vertices.extend(rounded_rect(
        x,
        y,
        CAR_WIDTH,
        CAR_HEIGHT,
        CAR_CORNER_RADIUS,
        paint,
        CORNER_SEGMENTS,
    ));

    // Windshield, rear window, side windows
    vertices.extend(rect(x + 5.0, y + 15.0, 40.0, 20.0, colors::WINDOW));
    vertices.extend(rect(x + 5.0, y + 60.0, 40.0, 15.0, colors::WINDOW));
    vertices.extend(rect(x + 2.0, y + 25.0, 3.0, 30.0, colors::WINDOW));
    vertices.extend(rect(x + 45.0, y + 25.0, 3.0, 30.0, colors::WINDOW));

    let is_player = trim.is_some();
    match trim {
        Some(PlayerTrim { flames }) => {
            vertices.extend(rect(x + 2.0, y + 80.0, 46.0, 8.0, colors::SPOILER));
            vertices.extend(rect(x + 20.0, y, 10.0, CAR_HEIGHT, colors::RACING_STRIPE));

            if let Some([left, right]) = flames {
                let tail = y + CAR_HEIGHT;
                vertices.extend(triangle(
                    Vec2::new(x + 10.0, tail),
                    Vec2::new(x + 15.0, tail + 20.0 + left * 10.0),
                    Vec2::new(x + 20.0, tail),
                    colors::BOOST_FLAME,
                ));
                vertices.extend(triangle(
                    Vec2::new(x + 30.0, tail),
                    Vec2::new(x + 35.0, tail + 20.0 + right * 10.0),
                    Vec2::new(x + 40.0, tail),
                    colors::BOOST_FLAME,
                ));
            }
        }
        None => {
            vertices.extend(rect_outline(x + 10.0, y + 35.0, 30.0, 20.0, 1.0, colors::ROOF_OUTLINE));
        }
    }

    let headlight = if is_player {
        colors::PLAYER_HEADLIGHT
    } else {
        colors::HEADLIGHT
    };
    vertices.extend(rect(x + 5.0, y + 2.0, 10.0, 4.0, headlight));
    vertices.extend(rect(x + 35.0, y + 2.0, 10.0, 4.0, headlight));
    vertices.extend(rect(x + 5.0, y + 86.0, 8.0, 3.0, colors::TAIL_LIGHT));
    vertices.extend(rect(x + 37.0, y + 86.0, 8.0, 3.0, colors::TAIL_LIGHT));
}
