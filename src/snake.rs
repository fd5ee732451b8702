use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Top-left pixel of this cell for a square cell of `cell_size` pixels.
    #[must_use]
    pub fn to_pixels(self, cell_size: i32) -> (i32, i32) {
        (self.x * cell_size, self.y * cell_size)
    }
}

/// Snake body with deferred growth and a buffered turn.
///
/// Segments are stored oldest first, so the back of the deque is the head.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    target_length: usize,
    direction: Direction,
    buffered_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells whose head is at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let behind = direction.opposite();

        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;
        body.push_front(cell);
        for _ in 1..length {
            cell = cell.step(behind);
            body.push_front(cell);
        }

        Self {
            body,
            target_length: length,
            direction,
            buffered_direction: direction,
        }
    }

    /// Creates a snake from explicit segments listed tail first, head last.
    ///
    /// The target length equals the number of segments.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        let target_length = segments.len();

        Self {
            body: VecDeque::from(segments),
            target_length,
            direction,
            buffered_direction: direction,
        }
    }

    /// Raises the target length by one; the tail stays put on the next tick.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Applies one buffered movement step and returns the new head.
    ///
    /// With `wrap` the head re-enters from the opposite edge; otherwise it may
    /// land outside `bounds` and the caller decides what that means.
    pub fn move_forward(&mut self, bounds: GridSize, wrap: bool) -> Position {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        self.direction = self.buffered_direction;

        let mut next_head = self.head().step(self.direction);
        if wrap {
            next_head = next_head.wrapped(bounds);
        }

        while self.body.len() >= self.target_length {
            let _ = self.body.pop_front();
        }

        self.body.push_back(next_head);
        next_head
    }

    /// Sets the direction for the next move unless it reverses the heading
    /// of the last executed move. The latest accepted input wins.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.buffered_direction = direction;
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Length the body grows toward.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the direction of the last executed move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 40,
        height: 20,
    };

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert_eq!(Position::new(-1, 3).wrapped(bounds), Position::new(9, 3));
        assert_eq!(Position::new(4, 8).wrapped(bounds), Position::new(4, 0));
    }

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let cells: Vec<Position> = snake.segments().copied().collect();

        assert_eq!(
            cells,
            vec![
                Position::new(3, 5),
                Position::new(4, 5),
                Position::new(5, 5)
            ]
        );
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn move_drops_tail_and_keeps_length() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let head = snake.move_forward(BOUNDS, true);

        assert_eq!(head, Position::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.grow();
        snake.move_forward(BOUNDS, true);

        assert_eq!(snake.len(), 4);
        assert!(snake.occupies(Position::new(3, 5)));

        snake.move_forward(BOUNDS, true);
        assert_eq!(snake.len(), 4);
        assert!(!snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn single_cell_snake_moves() {
        let mut snake = Snake::new(Position::new(1, 1), Direction::Down, 1);

        snake.move_forward(BOUNDS, true);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(1, 2));
    }

    #[test]
    fn unwrapped_move_may_leave_bounds() {
        let mut snake = Snake::new(Position::new(39, 0), Direction::Right, 2);

        let head = snake.move_forward(BOUNDS, false);

        assert_eq!(head, Position::new(40, 0));
        assert!(!head.is_within_bounds(BOUNDS));
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 3);

        snake.buffer_direction(Direction::Down);
        snake.move_forward(BOUNDS, true);

        assert_eq!(snake.head(), Position::new(5, 4));
    }

    #[test]
    fn latest_valid_turn_wins() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);
        snake.move_forward(BOUNDS, true);

        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn turns_are_checked_against_last_executed_heading() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Down, 3);

        snake.buffer_direction(Direction::Right);
        snake.buffer_direction(Direction::Up);
        snake.move_forward(BOUNDS, true);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.move_forward(BOUNDS, true);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn head_overlap_ignores_head_itself() {
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Right,
        );
        assert!(!snake.head_overlaps_body());

        let looped = Snake::from_segments(
            vec![
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 0),
                Position::new(1, 0),
            ],
            Direction::Right,
        );
        assert!(looped.head_overlaps_body());
    }

    #[test]
    fn pixel_coordinates_scale_by_cell_size() {
        assert_eq!(Position::new(5, 5).to_pixels(20), (100, 100));
    }
}
