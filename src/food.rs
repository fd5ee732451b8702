use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a random cell the snake does not occupy.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a uniformly random cell that is not occupied by the snake.
///
/// Samples from the set of free cells directly, so the call always
/// terminates. Cost is one pass over the grid plus one over the body.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let occupied: HashSet<Position> = snake.segments().copied().collect();
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(occupied.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
