use log::debug;

use crate::snek::{collides, simulate_step, Direction, GridBounds, Pos, Snek};

/// Greedy one-step lookahead. Never touches the real snake.
pub fn next_direction(snek: &Snek, food: Pos, bounds: GridBounds) -> Direction {
    let preferred = preferred_direction(snek.head(), food);
    if is_safe(snek, preferred, bounds) {
        return preferred;
    }

    fallback_candidates(snek.direction())
        .into_iter()
        .find(|&dir| is_safe(snek, dir, bounds))
        .unwrap_or_else(|| {
            debug!("autopilot boxed in at {:?}", snek.head());
            snek.direction()
        })
}

/// Close the larger gap first. Ties go to the vertical axis.
pub fn preferred_direction(head: Pos, food: Pos) -> Direction {
    let dx = food.x - head.x;
    let dy = food.y - head.y;

    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn fallback_candidates(current: Direction) -> Vec<Direction> {
    Direction::CARDINALS
        .into_iter()
        .filter(|&dir| dir != current.opposite())
        .collect()
}

fn is_safe(snek: &Snek, dir: Direction, bounds: GridBounds) -> bool {
    !collides(&simulate_step(snek.body(), dir), bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_prefers_vertical_axis() {
        assert_eq!(
            preferred_direction(Pos::new(5, 5), Pos::new(7, 7)),
            Direction::Down
        );
        assert_eq!(
            preferred_direction(Pos::new(5, 5), Pos::new(3, 3)),
            Direction::Up
        );
        assert_eq!(
            preferred_direction(Pos::new(5, 5), Pos::new(8, 7)),
            Direction::Right
        );
        assert_eq!(
            preferred_direction(Pos::new(5, 5), Pos::new(1, 7)),
            Direction::Left
        );
        // Food under the head falls through to Up
        assert_eq!(
            preferred_direction(Pos::new(5, 5), Pos::new(5, 5)),
            Direction::Up
        );
    }

    #[test]
    fn test_takes_preferred_when_safe() {
        let snek = Snek::new(GridBounds::default());
        let dir = next_direction(&snek, Pos::new(13, 10), GridBounds::default());
        assert_eq!(dir, Direction::Right);

        let dir = next_direction(&snek, Pos::new(3, 2), GridBounds::default());
        assert_eq!(dir, Direction::Up);
    }

    #[test]
    fn test_never_reverses_into_itself() {
        // Food behind the head: preferred Left is a reversal and collides,
        // Right is the first safe fallback.
        let snek = Snek::new(GridBounds::default());
        let dir = next_direction(&snek, Pos::new(0, 11), GridBounds::default());
        assert_eq!(dir, Direction::Right);

        let dir = next_direction(&snek, Pos::new(0, 10), GridBounds::default());
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn test_fallback_avoids_wall() {
        // Heading up into the top-left corner with food under the head.
        let snek = Snek::from_body(
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)],
            Direction::Up,
        );
        let dir = next_direction(&snek, Pos::new(0, 0), GridBounds::default());
        // Preferred Up leaves the grid; Right is first in the fallback order
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn test_fallback_skips_reverse_candidate() {
        assert_eq!(
            fallback_candidates(Direction::Right),
            vec![Direction::Right, Direction::Down, Direction::Up]
        );
        assert_eq!(
            fallback_candidates(Direction::Up),
            vec![Direction::Right, Direction::Left, Direction::Up]
        );
    }

    #[test]
    fn test_boxed_in_keeps_current_direction() {
        // Top-left corner, moving left, own body below.
        let snek = Snek::from_body(
            vec![
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(1, 1),
                Pos::new(0, 1),
                Pos::new(0, 2),
            ],
            Direction::Left,
        );
        let dir = next_direction(&snek, Pos::new(10, 10), GridBounds::default());
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn test_does_not_mutate_snek() {
        let snek = Snek::new(GridBounds::default());
        let before = snek.clone();
        let _ = next_direction(&snek, Pos::new(0, 0), GridBounds::default());
        assert_eq!(snek, before);
    }
}
