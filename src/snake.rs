use Direction::*;
use MoveResult::*;

/// One grid coordinate. Columns grow to the right, rows grow downwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell one step towards `direction`.
    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl From<(i16, i16)> for Cell {
    fn from((x, y): (i16, i16)) -> Self {
        Cell::new(x, y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Glyph drawn on the snake's head.
    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// The head advanced to `new_head`. `ate` is set when the snake grew instead of moving its tail.
    Moved { new_head: Cell, ate: bool },
    /// The candidate head collided and the game ended. The body is untouched.
    Crashed,
    /// Nothing happened because the game is not running.
    Halted,
}

impl MoveResult {
    pub fn ate(&self) -> bool {
        matches!(self, Moved { ate: true, .. })
    }
}

/// The snake body, tail first and head last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a snake from its body cells, ordered tail to head.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn new(body: &[Cell], direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body: body.to_vec(), direction }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Turns the snake unless `new_direction` would reverse it onto itself.
    /// Returns whether the turn was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// Where the head would land after one step in the current direction.
    pub fn next_head(&self) -> Cell {
        self.head().step(self.direction)
    }

    /// Appends `new_head` and drops the tail unless `grow` is set.
    pub fn move_to(&mut self, new_head: Cell, grow: bool) -> MoveResult {
        self.body.push(new_head);
        if !grow {
            self.body.remove(0);
        }

        Moved { new_head, ate: grow }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Snake {
        Snake::new(&[Cell::new(0, 2), Cell::new(0, 3), Cell::new(0, 4)], Right)
    }

    #[test]
    fn step_moves_one_cell_along_one_axis() {
        let c = Cell::new(5, 5);
        assert_eq!(c.step(Up), Cell::new(5, 4));
        assert_eq!(c.step(Down), Cell::new(5, 6));
        assert_eq!(c.step(Left), Cell::new(4, 5));
        assert_eq!(c.step(Right), Cell::new(6, 5));
    }

    #[test]
    fn opposite_turn_is_ignored() {
        let mut snake = start();
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.get_direction(), Right);

        assert!(snake.set_direction(Down));
        assert_eq!(snake.get_direction(), Down);
        assert!(!snake.set_direction(Up));
        assert_eq!(snake.get_direction(), Down);
    }

    #[test]
    fn move_drops_tail() {
        let mut snake = start();
        let res = snake.move_to(snake.next_head(), false);

        assert_eq!(snake.body(), &[Cell::new(0, 3), Cell::new(0, 4), Cell::new(1, 4)]);
        assert_eq!(res, Moved { new_head: Cell::new(1, 4), ate: false });
        assert!(!res.ate());
    }

    #[test]
    fn growing_move_keeps_tail() {
        let mut snake = start();
        let res = snake.move_to(snake.next_head(), true);

        assert_eq!(snake.body().len(), 4);
        assert_eq!(snake.body()[0], Cell::new(0, 2));
        assert_eq!(snake.head(), Cell::new(1, 4));
        assert!(res.ate());
    }

    #[test]
    fn head_char_follows_direction() {
        let mut snake = start();
        assert_eq!(snake.get_direction().head_char(), '>');
        snake.set_direction(Up);
        assert_eq!(snake.get_direction().head_char(), '^');
    }
}
