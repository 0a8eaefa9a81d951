//! Wraparound grid geometry
//!
//! The mirror snake is never stored: it is always recomputed from the
//! player snake with [`mirror_point`], the 180° rotation about the grid
//! center.

use serde::{Deserialize, Serialize};

use crate::consts::GRID_SIZE;

/// A grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Unit step the snake advances by each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const RIGHT: Heading = Heading { dx: 1, dy: 0 };
    pub const LEFT: Heading = Heading { dx: -1, dy: 0 };
    pub const UP: Heading = Heading { dx: 0, dy: -1 };
    pub const DOWN: Heading = Heading { dx: 0, dy: 1 };

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.dy == 0
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.dx == 0
    }

    pub fn negated(&self) -> Heading {
        Heading {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Cells needed to cover a viewport of the given pixel size
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            cols: (width / GRID_SIZE).ceil().max(0.0) as i32,
            rows: (height / GRID_SIZE).ceil().max(0.0) as i32,
        }
    }

    /// No ticks or food placement happen until this is true
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    /// Cell one step along `heading`, re-entering from the opposite edge
    pub fn step(&self, from: Point, heading: Heading) -> Point {
        Point {
            x: (from.x + heading.dx).rem_euclid(self.cols),
            y: (from.y + heading.dy).rem_euclid(self.rows),
        }
    }

    /// True if the point is inside the grid but not on its outermost ring
    pub fn is_interior(&self, p: Point) -> bool {
        p.x > 0 && p.x < self.cols - 1 && p.y > 0 && p.y < self.rows - 1
    }

    pub fn center(&self) -> Point {
        Point::new(self.cols / 2, self.rows / 2)
    }
}

/// 180° rotation of a cell about the grid center
#[inline]
pub fn mirror_point(p: Point, grid: GridSize) -> Point {
    Point {
        x: grid.cols - 1 - p.x,
        y: grid.rows - 1 - p.y,
    }
}

/// Project every segment of `snake` through [`mirror_point`], head first
pub fn mirror_snake(snake: &[Point], grid: GridSize) -> Vec<Point> {
    snake.iter().map(|&p| mirror_point(p, grid)).collect()
}
