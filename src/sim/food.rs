//! Food placement with a proximity bias toward the snakes

use rand::Rng;

use super::grid::{GridSize, Point, mirror_point};

/// Proximity attempts around a random body segment
pub const PROXIMITY_ATTEMPTS: usize = 10;
/// Maximum offset (cells, each axis) from the reference segment
pub const PROXIMITY_RADIUS: i32 = 5;
/// Uniform interior attempts after the proximity pass fails
pub const UNIFORM_ATTEMPTS: usize = 100;

/// True if food may be placed at `p`: interior, clear of both snakes and
/// of every existing food item
pub fn is_valid_food_cell(p: Point, snake: &[Point], food: &[Point], grid: GridSize) -> bool {
    if !grid.is_interior(p) {
        return false;
    }
    if snake.contains(&p) {
        return false;
    }
    // The mirror occupies p iff the player occupies mirror(p)
    if snake.contains(&mirror_point(p, grid)) {
        return false;
    }
    !food.contains(&p)
}

/// Pick a cell for a new food item.
///
/// Tries cells near a random segment of either snake first, then uniform
/// interior cells. If both passes fail the grid center is returned even if
/// it is occupied.
pub fn spawn_food<R: Rng>(snake: &[Point], food: &[Point], grid: GridSize, rng: &mut R) -> Point {
    if !snake.is_empty() {
        for _ in 0..PROXIMITY_ATTEMPTS {
            let segment = snake[rng.random_range(0..snake.len())];
            let reference = if rng.random_bool(0.5) {
                mirror_point(segment, grid)
            } else {
                segment
            };

            let candidate = Point::new(
                reference.x + rng.random_range(-PROXIMITY_RADIUS..=PROXIMITY_RADIUS),
                reference.y + rng.random_range(-PROXIMITY_RADIUS..=PROXIMITY_RADIUS),
            );
            if is_valid_food_cell(candidate, snake, food, grid) {
                return candidate;
            }
        }
    }

    // Interior is empty on grids thinner than three cells
    if grid.cols > 2 && grid.rows > 2 {
        for _ in 0..UNIFORM_ATTEMPTS {
            let candidate = Point::new(
                rng.random_range(1..grid.cols - 1),
                rng.random_range(1..grid.rows - 1),
            );
            if is_valid_food_cell(candidate, snake, food, grid) {
                return candidate;
            }
        }
    }

    let center = grid.center();
    log::warn!(
        "Food placement exhausted on {}x{} grid, using center {:?}",
        grid.cols,
        grid.rows,
        center
    );
    center
}
