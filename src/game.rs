use clap::ValueEnum;
use log::info;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::time::{Duration, Instant};

use crate::autopilot;
use crate::clock::TickClock;
use crate::morsel::{spawn_initial, spawn_random};
use crate::snek::{collides, Direction, GridBounds, Pos, Snek};
use crate::sound::SoundSink;
use crate::store::HighScoreStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(100),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, PartialEq)]
enum StepResult {
    Ongoing,
    Nommed,
    Collision,
}

/// Everything one play-through mutates.
#[derive(Debug)]
pub struct Session {
    bounds: GridBounds,
    snek: Snek,
    food: Pos,
    score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GridBounds::default())
    }
}

impl Session {
    pub fn new(bounds: GridBounds) -> Self {
        let snek = Snek::new(bounds);
        let food = spawn_initial(&snek, bounds);
        Session {
            bounds,
            snek,
            food,
            score: 0,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn snek(&self) -> &Snek {
        &self.snek
    }

    pub fn food(&self) -> Pos {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// What the render sink gets to see.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            bounds: self.bounds,
            body: self.snek.body(),
            head_direction: self.snek.direction(),
            food: self.food,
        }
    }

    fn slither_on(&mut self, rng: &mut StdRng) -> StepResult {
        self.snek.slither();

        if collides(self.snek.body(), self.bounds) {
            return StepResult::Collision;
        }

        if self.snek.head() == self.food {
            self.snek.grow();
            self.score += 1;
            self.food = spawn_random(&self.snek, self.bounds, rng);
            return StepResult::Nommed;
        }

        StepResult::Ongoing
    }
}

pub struct SessionView<'a> {
    pub bounds: GridBounds,
    pub body: &'a VecDeque<Pos>,
    pub head_direction: Direction,
    pub food: Pos,
}

#[derive(Debug)]
pub enum GameState {
    AwaitingStart(Session),
    Running(Session),
    Paused(Session),
    GameOver { session: Session, final_score: u32 },
}

/// Owns the session and is the only thing that mutates it.
pub struct Game {
    state: GameState,
    bounds: GridBounds,
    high_score: u32,
    difficulty: Difficulty,
    autopilot: bool,
    clock: TickClock,
    rng: StdRng,
    store: Box<dyn HighScoreStore>,
    sounds: Box<dyn SoundSink>,
}

impl Game {
    pub fn new(
        bounds: GridBounds,
        difficulty: Difficulty,
        mut store: Box<dyn HighScoreStore>,
        sounds: Box<dyn SoundSink>,
        rng: StdRng,
    ) -> Self {
        let high_score = store.load_high_score();
        info!("Loaded high score {}", high_score);

        Game {
            state: GameState::AwaitingStart(Session::new(bounds)),
            bounds,
            high_score,
            difficulty,
            autopilot: false,
            clock: TickClock::new(difficulty.tick_interval()),
            rng,
            store,
            sounds,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        match &self.state {
            GameState::AwaitingStart(session)
            | GameState::Running(session)
            | GameState::Paused(session)
            | GameState::GameOver { session, .. } => session,
        }
    }

    fn session_mut(&mut self) -> &mut Session {
        match &mut self.state {
            GameState::AwaitingStart(session)
            | GameState::Running(session)
            | GameState::Paused(session)
            | GameState::GameOver { session, .. } => session,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Interval the clock is ticking at, which lags `difficulty` while paused.
    pub fn tick_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// A directional key. Starts the game from the menu or game over screen,
    /// otherwise steers unless paused or on autopilot.
    pub fn steer(&mut self, direction: Direction, now: Instant) {
        match &mut self.state {
            GameState::AwaitingStart(session) => {
                session.snek.change_direction(direction);
                self.start_session(now);
            }
            GameState::GameOver { .. } => {
                self.reset_session();
                self.session_mut().snek.change_direction(direction);
                self.start_session(now);
            }
            GameState::Running(session) if !self.autopilot => {
                session.snek.change_direction(direction);
            }
            GameState::Running(_) | GameState::Paused(_) => {}
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        let new_state = match &mut self.state {
            GameState::Running(session) => {
                self.clock.stop();
                info!("Paused at score {}", session.score);
                Some(GameState::Paused(mem::take(session)))
            }
            GameState::Paused(session) => {
                // Fresh reference instant, so the pause is not caught up.
                self.clock.start(now);
                info!("Resumed");
                Some(GameState::Running(mem::take(session)))
            }
            _ => None,
        };

        if let Some(new_state) = new_state {
            self.state = new_state;
        }
    }

    /// Starts an autopilot game from the menu or game over screen, otherwise
    /// hands control over to (or back from) the autopilot.
    pub fn toggle_autopilot(&mut self, now: Instant) {
        match self.state {
            GameState::AwaitingStart(_) => {
                self.autopilot = true;
                self.start_session(now);
            }
            GameState::GameOver { .. } => {
                self.reset_session();
                self.autopilot = true;
                self.start_session(now);
            }
            GameState::Running(_) | GameState::Paused(_) => {
                self.autopilot = !self.autopilot;
                info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
            }
        }
    }

    /// Takes effect on the running clock only while actually running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        if let GameState::Running(_) = self.state {
            self.clock.set_interval(difficulty.tick_interval());
        }
        info!("Difficulty set to {}", difficulty);
    }

    /// Back to the start screen from game over, keeping autopilot.
    pub fn play_again(&mut self) {
        if let GameState::GameOver { .. } = self.state {
            self.reset_session();
        }
    }

    /// Back to the start screen from game over in manual mode.
    pub fn return_to_menu(&mut self) {
        if let GameState::GameOver { .. } = self.state {
            self.autopilot = false;
            self.reset_session();
        }
    }

    /// Abandons whatever is going on and returns to the start screen.
    pub fn restart(&mut self) {
        self.autopilot = false;
        self.reset_session();
    }

    /// Called once per frame. Runs at most one tick; returns whether it did.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if !matches!(self.state, GameState::Running(_)) || !self.clock.poll(now) {
            return false;
        }
        self.tick();
        true
    }

    fn tick(&mut self) {
        let (result, score) = match &mut self.state {
            GameState::Running(session) => {
                if self.autopilot {
                    let direction =
                        autopilot::next_direction(&session.snek, session.food, session.bounds);
                    session.snek.change_direction(direction);
                }
                (session.slither_on(&mut self.rng), session.score)
            }
            _ => return,
        };

        match result {
            StepResult::Collision => {
                self.clock.stop();
                self.update_high_score(score);
                self.sounds.on_game_over();
                info!("Game over with score {}", score);

                let session = mem::take(self.session_mut());
                self.state = GameState::GameOver {
                    session,
                    final_score: score,
                };
            }
            StepResult::Nommed => {
                self.sounds.on_eat();
                self.update_high_score(score);
                info!("Nommed, score {}, next food {:?}", score, self.session().food);
            }
            StepResult::Ongoing => {}
        }
    }

    fn start_session(&mut self, now: Instant) {
        let session = mem::take(self.session_mut());
        let mut session = Session { score: 0, ..session };
        session.food = spawn_initial(&session.snek, session.bounds);

        self.clock.set_interval(self.difficulty.tick_interval());
        self.clock.start(now);
        self.sounds.on_session_start();
        info!(
            "Session started ({}, autopilot {})",
            self.difficulty,
            if self.autopilot { "on" } else { "off" }
        );

        self.state = GameState::Running(session);
    }

    fn reset_session(&mut self) {
        self.clock.stop();
        self.state = GameState::AwaitingStart(Session::new(self.bounds));
    }

    fn update_high_score(&mut self, score: u32) {
        if score > self.high_score {
            self.high_score = score;
            self.store.save_high_score(score);
        }
    }
}
