use ratatui::{
    prelude::*,
    style::{Style, Stylize},
    widgets::*,
};

use crate::game::{Game, GameState, SessionView};
use crate::snek::{Direction, Pos};

pub const FOOD_SYMBOL: &str = "●";

pub fn render(frame: &mut Frame, game: &Game) {
    let session = game.session();
    let mut score_text = format!(
        "SNEK    High Score: {}    Score: {}    {} ({} ms)",
        game.high_score(),
        session.score(),
        game.difficulty(),
        game.tick_interval().as_millis()
    );
    if game.autopilot() {
        score_text.push_str("    [Autopilot]");
    }

    let size = frame.area();
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + scores
            Constraint::Min(0),    // Game area
            Constraint::Length(1), // Key help
        ])
        .split(size);

    frame.render_widget(
        Paragraph::new(score_text)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(
            "arrows/wasd steer  space pause  i autopilot  1/2/3 speed  r restart  q quit",
        )
        .style(Style::default().dark_gray()),
        layout[2],
    );

    let grid = session.bounds().size() as u16;
    let arena = centered(layout[1], grid * 2 + 2, grid + 2);

    let title = match game.state() {
        GameState::AwaitingStart(_) => "Ready",
        GameState::Running(_) => "Playing",
        GameState::Paused(_) => "Paused. Press SPACE to continue",
        GameState::GameOver { .. } => "Game over",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner_area = block.inner(arena);
    frame.render_widget(block, arena);
    frame.render_widget(session.view(), inner_area);

    let overlay = match game.state() {
        GameState::AwaitingStart(_) => {
            Some("Press an arrow key to start\nor I for autopilot".to_string())
        }
        GameState::GameOver { final_score, .. } => Some(format!(
            "GAME OVER\nFinal Score: {}\nSPACE to play again, M for menu",
            final_score
        )),
        _ => None,
    };
    if let Some(text) = overlay {
        let text_area = centered(inner_area, inner_area.width, 3);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).bold(),
            text_area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

/// Each grid cell is two terminal columns wide.
fn cell_area(view: &SessionView, area: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    if !view.bounds.contains(Pos::new(x, y)) {
        return None;
    }
    let col = area.x + x as u16 * 2;
    let row = area.y + y as u16;
    if col + 1 >= area.right() || row >= area.bottom() {
        return None;
    }
    Some((col, row))
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for pos in self.body.iter().skip(1) {
            if let Some((col, row)) = cell_area(&self, area, pos.x, pos.y) {
                for dx in 0..2 {
                    buf[(col + dx, row)].set_symbol(" ").set_bg(Color::Green);
                }
            }
        }

        // Head may be off the grid after a fatal step
        if let Some(head) = self.body.front() {
            if let Some((col, row)) = cell_area(&self, area, head.x, head.y) {
                buf[(col, row)]
                    .set_symbol(head_symbol(self.head_direction))
                    .set_fg(Color::Black)
                    .set_bg(Color::Yellow);
                buf[(col + 1, row)].set_symbol(" ").set_bg(Color::Yellow);
            }
        }

        if let Some((col, row)) = cell_area(&self, area, self.food.x, self.food.y) {
            buf[(col, row)]
                .set_symbol(FOOD_SYMBOL)
                .set_fg(Color::LightRed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snek::GridBounds;
    use std::collections::VecDeque;

    fn canonical_view(body: &VecDeque<Pos>) -> SessionView<'_> {
        SessionView {
            bounds: GridBounds::default(),
            body,
            head_direction: Direction::Right,
            food: Pos::new(13, 10),
        }
    }

    #[test]
    fn test_render_draws_snake_and_food() {
        let body: VecDeque<Pos> = vec![
            Pos::new(3, 10),
            Pos::new(2, 10),
            Pos::new(1, 10),
            Pos::new(0, 10),
        ]
        .into();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        canonical_view(&body).render(area, &mut buf);

        assert_eq!(buf[(6, 10)].symbol(), "▶");
        assert_eq!(buf[(6, 10)].bg, Color::Yellow);
        assert_eq!(buf[(4, 10)].bg, Color::Green);
        assert_eq!(buf[(0, 10)].bg, Color::Green);
        assert_eq!(buf[(26, 10)].symbol(), FOOD_SYMBOL);
        assert_eq!(buf[(8, 10)].bg, Color::Reset);
    }

    #[test]
    fn test_render_skips_off_grid_head() {
        let body: VecDeque<Pos> = vec![Pos::new(-1, 10), Pos::new(0, 10)].into();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        canonical_view(&body).render(area, &mut buf);

        assert_eq!(buf[(0, 10)].bg, Color::Green);
    }

    #[test]
    fn test_render_clips_to_small_area() {
        let body: VecDeque<Pos> = vec![Pos::new(3, 10), Pos::new(2, 10)].into();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);

        // Nothing fits; must not index out of bounds
        canonical_view(&body).render(area, &mut buf);
        assert_eq!(buf[(4, 4)].bg, Color::Reset);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 3, 30, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(10, 6, 10, 4));
        assert_eq!(centered(area, 50, 50), area);
    }
}
