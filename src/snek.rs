use std::collections::VecDeque;

pub const DEFAULT_GRID_SIZE: u16 = 20;
/// Smallest arena that still holds the starting snake.
pub const MIN_GRID_SIZE: u16 = 4;
pub const INITIAL_LENGTH: i32 = 4;

/// Square arena. Cells are addressed `0..size` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBounds {
    size: i32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl GridBounds {
    /// Sizes below `MIN_GRID_SIZE` are raised to it.
    pub fn new(size: u16) -> Self {
        GridBounds {
            size: size.max(MIN_GRID_SIZE) as i32,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fallback order tried by the autopilot.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Only the four unit vectors map to a direction.
    pub fn from_delta(delta: PosDelta) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    /// Unbounded step; leaving the grid is for `collides` to notice.
    pub fn step(&self, dir: Direction) -> Pos {
        let delta = PosDelta::from(dir);
        Pos {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}

/// Body is ordered head first.
#[derive(Clone, Debug, PartialEq)]
pub struct Snek {
    body: VecDeque<Pos>,
    direction: Direction,
    pending_direction: Direction,
    growth_pending: bool,
}

impl Snek {
    /// Canonical starting snake: four cells on the middle row, head at x=3, facing right.
    pub fn new(bounds: GridBounds) -> Self {
        let row = bounds.size() / 2;
        let body = (0..INITIAL_LENGTH).rev().map(|x| Pos::new(x, row)).collect();

        Snek {
            body,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            growth_pending: false,
        }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Pos>, direction: Direction) -> Self {
        Snek {
            body: body.into(),
            direction,
            pending_direction: direction,
            growth_pending: false,
        }
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Pos> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    /// Reversals are dropped here, so any number of inputs between two
    /// ticks can never fold the snake back onto itself.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = new_direction;
    }

    pub fn slither(&mut self) {
        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.growth_pending {
            self.growth_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn grow(&mut self) {
        self.growth_pending = true;
    }
}

/// True when the head is off the grid or sits on any other body cell.
pub fn collides(body: &VecDeque<Pos>, bounds: GridBounds) -> bool {
    let Some(&head) = body.front() else {
        return false;
    };

    !bounds.contains(head) || body.iter().skip(1).any(|&cell| cell == head)
}

/// One non-growing step applied to a copy of `body`.
pub fn simulate_step(body: &VecDeque<Pos>, direction: Direction) -> VecDeque<Pos> {
    let mut next = body.clone();
    if let Some(&head) = next.front() {
        next.push_front(head.step(direction));
        next.pop_back();
    }
    next
}
