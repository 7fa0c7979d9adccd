use rand::Rng;

use crate::snek::{GridBounds, Pos, Snek};

/// Distance the opening morsel sits ahead of the head.
const INITIAL_LEAD: i32 = 10;

/// Fixed opening morsel: ten cells right of the head, clamped to the last column.
pub fn spawn_initial(snek: &Snek, bounds: GridBounds) -> Pos {
    let head = snek.head();
    Pos::new((head.x + INITIAL_LEAD).min(bounds.size() - 1), head.y)
}

/// Uniform draw over the grid, redrawn until it misses the snake.
///
/// Loops forever if the snake fills the whole grid.
pub fn spawn_random(snek: &Snek, bounds: GridBounds, rng: &mut impl Rng) -> Pos {
    loop {
        let pos = Pos::new(
            rng.gen_range(0..bounds.size()),
            rng.gen_range(0..bounds.size()),
        );

        if !snek.occupies(pos) {
            return pos;
        }
    }
}
