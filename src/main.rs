use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use snekrs::render::render;
use snekrs::snek::DEFAULT_GRID_SIZE;
use snekrs::sound::{Silent, SoundSink, TerminalBell};
use snekrs::store::{FileHighScore, HIGH_SCORE_FILE};
use snekrs::{Difficulty, Direction, Game, GameState, GridBounds};

/// Render and input poll period; ticks run on their own cadence.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "snekrs")]
#[command(about = "Snake in the terminal, with an optional autopilot")]
struct Args {
    /// Tick speed
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Start straight away with the autopilot driving
    #[arg(long)]
    ai: bool,

    /// Cells per side of the square arena
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE,
          value_parser = clap::value_parser!(u16).range(12..=40))]
    grid_size: u16,

    #[arg(long, default_value = HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    #[arg(long, default_value = "snekrs.log")]
    log_file: PathBuf,

    /// No terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), io::Error> {
    let args = Args::parse();

    // Set up logging before anything else
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), File::create(&args.log_file)?)
        .map_err(io::Error::other)?;

    info!("Starting Snekrs");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sounds: Box<dyn SoundSink> = if args.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stdout())
    };
    let mut game = Game::new(
        GridBounds::new(args.grid_size),
        args.difficulty,
        Box::new(FileHighScore::new(&args.high_score_file)),
        sounds,
        rng,
    );
    if args.ai {
        game.toggle_autopilot(Instant::now());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Exiting with high score {}", game.high_score());
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, game))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                match command_for(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(command) => apply(game, command, Instant::now()),
                    None => {}
                }
            }
        }

        game.on_frame(Instant::now());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Command {
    Steer(Direction),
    /// Space: pause/resume, or play again from the game over screen
    PauseOrContinue,
    PlayAgain,
    Menu,
    Restart,
    Autopilot,
    SetDifficulty(Difficulty),
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Steer(Direction::Right),
        KeyCode::Char(' ') | KeyCode::Char('p') => Command::PauseOrContinue,
        KeyCode::Enter => Command::PlayAgain,
        KeyCode::Char('m') => Command::Menu,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('i') => Command::Autopilot,
        KeyCode::Char('1') => Command::SetDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => Command::SetDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => Command::SetDifficulty(Difficulty::Hard),
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn apply(game: &mut Game, command: Command, now: Instant) {
    match command {
        Command::Steer(direction) => game.steer(direction, now),
        Command::PauseOrContinue => match game.state() {
            GameState::GameOver { .. } => game.play_again(),
            _ => game.toggle_pause(now),
        },
        Command::PlayAgain => game.play_again(),
        Command::Menu => game.return_to_menu(),
        Command::Restart => game.restart(),
        Command::Autopilot => game.toggle_autopilot(now),
        Command::SetDifficulty(difficulty) => game.set_difficulty(difficulty),
        Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use snekrs::store::HighScoreStore;

    struct NoHighScore;

    impl HighScoreStore for NoHighScore {
        fn load_high_score(&mut self) -> u32 {
            0
        }
        fn save_high_score(&mut self, _score: u32) {}
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_game() -> Game {
        Game::new(
            GridBounds::default(),
            Difficulty::Medium,
            Box::new(NoHighScore),
            Box::new(Silent),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn test_arrow_and_wasd_keys_steer() {
        assert_eq!(
            command_for(press(KeyCode::Up)),
            Some(Command::Steer(Direction::Up))
        );
        assert_eq!(
            command_for(press(KeyCode::Char('a'))),
            Some(Command::Steer(Direction::Left))
        );
        assert_eq!(
            command_for(press(KeyCode::Right)),
            Some(Command::Steer(Direction::Right))
        );
        assert_eq!(
            command_for(press(KeyCode::Char('s'))),
            Some(Command::Steer(Direction::Down))
        );
    }

    #[test]
    fn test_difficulty_hotkeys() {
        assert_eq!(
            command_for(press(KeyCode::Char('1'))),
            Some(Command::SetDifficulty(Difficulty::Easy))
        );
        assert_eq!(
            command_for(press(KeyCode::Char('3'))),
            Some(Command::SetDifficulty(Difficulty::Hard))
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(command_for(press(KeyCode::Char('z'))), None);
        assert_eq!(command_for(press(KeyCode::Tab)), None);

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for(release), None);
    }

    #[test]
    fn test_space_pauses_then_plays_again() {
        let mut game = test_game();
        let t0 = Instant::now();

        apply(&mut game, Command::Steer(Direction::Up), t0);
        apply(&mut game, Command::PauseOrContinue, t0);
        assert!(matches!(game.state(), GameState::Paused(_)));
        apply(&mut game, Command::PauseOrContinue, t0);
        assert!(matches!(game.state(), GameState::Running(_)));

        let mut now = t0;
        for _ in 0..11 {
            now += Difficulty::Medium.tick_interval();
            game.on_frame(now);
        }
        assert!(matches!(game.state(), GameState::GameOver { .. }));

        apply(&mut game, Command::PauseOrContinue, now);
        assert!(matches!(game.state(), GameState::AwaitingStart(_)));
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["snekrs"]);
        assert_eq!(args.difficulty, Difficulty::Medium);
        assert_eq!(args.grid_size, DEFAULT_GRID_SIZE);
        assert!(!args.ai);
        assert_eq!(args.high_score_file, PathBuf::from(HIGH_SCORE_FILE));
    }

    #[test]
    fn test_cli_rejects_tiny_grid() {
        assert!(Args::try_parse_from(["snekrs", "--grid-size", "5"]).is_err());

        let args = Args::try_parse_from(["snekrs", "--difficulty", "hard", "--ai", "--seed", "9"])
            .unwrap();
        assert_eq!(args.difficulty, Difficulty::Hard);
        assert!(args.ai);
        assert_eq!(args.seed, Some(9));
    }
}
