//! Render sampling
//!
//! Converts simulation state into flat instance data that any 2D/3D front
//! end can upload as-is. Nothing here feeds back into the simulation.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::sim::{GamePhase, Point, SnakeGame, TunnelRun};

/// Rendered tile depth cutoff (tiles behind the camera are dropped)
const CULL_Z: f32 = 10.0;
/// Tile overlap so neighbouring slots leave no seam
const TILE_OVERLAP: f32 = 1.02;
const TILE_THICKNESS: f32 = 0.2;
const HOVER_AMPLITUDE: f32 = 0.2;
const HOVER_RATE: f32 = 2.0;

/// One round dot of the snake board, in pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct DotInstance {
    /// Top-left corner
    pub position: [f32; 2],
    pub size: f32,
    pub color: [f32; 4],
}

/// One solid floor tile of the tunnel
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct TileInstance {
    pub position: [f32; 3],
    /// Rotation about the tunnel axis
    pub angle: f32,
    pub scale: [f32; 3],
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER_HEAD: [f32; 4] = rgb(0x00, 0x53, 0x9f);
    pub const PLAYER_TAIL: [f32; 4] = rgb(0x8a, 0x2b, 0xe2);
    pub const MIRROR_HEAD: [f32; 4] = rgb(0xff, 0xd7, 0x00);
    pub const MIRROR_TAIL: [f32; 4] = rgb(0xff, 0x00, 0x55);
    pub const FOOD: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

/// Gradient position of segment `index` in a body of `len`
fn gradient_factor(index: usize, len: usize) -> f32 {
    index as f32 / (len + 5) as f32
}

/// Tail segments fade but never below 40%
fn segment_opacity(index: usize, len: usize) -> f32 {
    (1.0 - index as f32 / (len + 10) as f32).max(0.4)
}

fn cell_origin(p: Point) -> [f32; 2] {
    let center = Vec2::new(p.x as f32, p.y as f32) * GRID_SIZE;
    (center - Vec2::splat(DOT_SIZE / 2.0)).to_array()
}

fn body_dots(body: &[Point], head: [f32; 4], tail: [f32; 4]) -> Vec<DotInstance> {
    let len = body.len();
    let (head, tail) = (Vec4::from_array(head), Vec4::from_array(tail));
    body.iter()
        .enumerate()
        .map(|(i, &p)| {
            let mut color = head.lerp(tail, gradient_factor(i, len));
            color.w = segment_opacity(i, len);
            DotInstance {
                position: cell_origin(p),
                size: DOT_SIZE,
                color: color.to_array(),
            }
        })
        .collect()
}

/// Everything needed to draw one snake frame
#[derive(Debug, Clone, Serialize)]
pub struct SnakeFrame {
    pub player: Vec<DotInstance>,
    pub mirror: Vec<DotInstance>,
    pub food: Vec<DotInstance>,
    pub score: u64,
    pub paused: bool,
    pub game_over: bool,
}

impl SnakeFrame {
    pub fn sample(game: &SnakeGame) -> Self {
        let food = game
            .food
            .iter()
            .map(|&p| DotInstance {
                position: cell_origin(p),
                size: DOT_SIZE,
                color: colors::FOOD,
            })
            .collect();

        Self {
            player: body_dots(&game.snake, colors::PLAYER_HEAD, colors::PLAYER_TAIL),
            mirror: body_dots(&game.mirror(), colors::MIRROR_HEAD, colors::MIRROR_TAIL),
            food,
            score: game.score(),
            paused: game.session.is_paused(),
            game_over: game.session.is_over(),
        }
    }
}

/// Everything needed to draw one tunnel frame
#[derive(Debug, Clone, Serialize)]
pub struct TunnelFrame {
    pub tiles: Vec<TileInstance>,
    /// Tunnel group rotation about its axis
    pub rotation: f32,
    pub player_height: f32,
    pub score: u64,
    pub paused: bool,
    pub game_over: bool,
}

impl TunnelFrame {
    pub fn sample(run: &TunnelRun) -> Self {
        Self {
            tiles: tunnel_tiles(run),
            rotation: run.player.angular_position,
            player_height: player_height(run),
            score: run.score(),
            paused: run.session.is_paused(),
            game_over: run.session.is_over(),
        }
    }
}

/// Solid slots of every visible ring
pub fn tunnel_tiles(run: &TunnelRun) -> Vec<TileInstance> {
    let width = TAU * TUNNEL_RADIUS / SEGMENTS as f32 * TILE_OVERLAP;
    let scale = Vec3::new(width, TILE_THICKNESS, SEGMENT_LENGTH).to_array();
    let mut tiles = Vec::with_capacity(run.path.rings.len() * SEGMENTS);

    for (ring_index, ring) in run.path.rings.iter().enumerate() {
        let z = -(ring_index as f32 * SEGMENT_LENGTH) + run.path.local_offset;
        if z > CULL_Z {
            continue;
        }
        for (slot, _) in ring.slots.iter().enumerate().filter(|(_, solid)| **solid) {
            let angle = slot as f32 / SEGMENTS as f32 * TAU;
            let xy = polar_to_cartesian(TUNNEL_RADIUS, angle);
            tiles.push(TileInstance {
                position: xy.extend(z).to_array(),
                angle: angle - FRAC_PI_2,
                scale,
            });
        }
    }
    tiles
}

/// Drawn player height; bobs gently while waiting to start
pub fn player_height(run: &TunnelRun) -> f32 {
    let base = run.player.vertical_offset;
    if run.session.phase == GamePhase::Ready {
        base + (run.clock * HOVER_RATE).sin() * HOVER_AMPLITUDE
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallPolicy, GridSize, RunnerCommand, TunnelRing};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_instances_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<DotInstance>(), 7 * 4);
        assert_eq!(std::mem::size_of::<TileInstance>(), 7 * 4);
        let dots = [DotInstance::zeroed(); 2];
        assert_eq!(bytemuck::cast_slice::<_, u8>(&dots).len(), 56);
    }

    #[test]
    fn test_snake_dot_gradient_and_fade() {
        let mut game = SnakeGame::new(GridSize::new(25, 25), 3);
        game.snake = vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];
        let frame = SnakeFrame::sample(&game);

        assert_eq!(frame.player.len(), 3);
        assert_eq!(frame.mirror.len(), 3);
        assert_eq!(frame.food.len(), 2);

        let head = frame.player[0];
        assert_eq!(head.position, [5.0 * 40.0 - 6.0, 5.0 * 40.0 - 6.0]);
        assert_eq!(head.color, colors::PLAYER_HEAD);

        // Tail: factor 2/8, opacity 1 - 2/13
        let tail = frame.player[2];
        let expected_r = colors::PLAYER_HEAD[0]
            + (colors::PLAYER_TAIL[0] - colors::PLAYER_HEAD[0]) * 0.25;
        assert!(approx(tail.color[0], expected_r));
        assert!(approx(tail.color[3], 1.0 - 2.0 / 13.0));

        // Mirror head sits on the reflected cell
        assert_eq!(frame.mirror[0].position, cell_origin(Point::new(19, 19)));
        assert_eq!(frame.mirror[0].color, colors::MIRROR_HEAD);
    }

    #[test]
    fn test_opacity_floor() {
        assert_eq!(segment_opacity(0, 1), 1.0);
        assert_eq!(segment_opacity(99, 100), 0.4);
    }

    #[test]
    fn test_tiles_skip_holes_and_culled_rings() {
        let mut run = TunnelRun::new(8, FallPolicy::Fatal);
        for ring in run.path.rings.iter_mut() {
            *ring = TunnelRing::empty();
        }
        run.path.rings[0] = TunnelRing::solid();
        run.path.rings[1].slots[4] = true;

        let tiles = tunnel_tiles(&run);
        assert_eq!(tiles.len(), SEGMENTS + 1);

        let first = tiles[0];
        assert!(approx(first.position[0], TUNNEL_RADIUS));
        assert!(approx(first.position[1], 0.0));
        assert_eq!(first.position[2], 0.0);
        assert!(approx(first.angle, -FRAC_PI_2));

        let last = tiles[SEGMENTS];
        assert!(approx(last.position[2], -SEGMENT_LENGTH));
        assert!(approx(last.position[1], TUNNEL_RADIUS));
        assert!(approx(last.scale[0], TAU * TUNNEL_RADIUS / 16.0 * 1.02));
    }

    #[test]
    fn test_ready_hover_only_before_start() {
        let mut run = TunnelRun::new(8, FallPolicy::Fatal);
        run.clock = std::f32::consts::FRAC_PI_4;
        assert!(approx(player_height(&run), GROUND_LEVEL + HOVER_AMPLITUDE));

        run.press(RunnerCommand::Other, false);
        assert_eq!(player_height(&run), GROUND_LEVEL);

        let frame = TunnelFrame::sample(&run);
        assert_eq!(frame.player_height, GROUND_LEVEL);
        assert_eq!(frame.tiles.len(), tunnel_tiles(&run).len());
    }
}
