use log::{error, info};
use std::fs;
use std::path::PathBuf;

pub const HIGH_SCORE_FILE: &str = ".snekrs_high_score.txt";

/// Where the best score lives between sessions.
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> u32;
    fn save_high_score(&mut self, score: u32);
}

/// Plain-text integer on disk. Unreadable or garbled files count as zero.
#[derive(Debug)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScore { path: path.into() }
    }
}

impl HighScoreStore for FileHighScore {
    fn load_high_score(&mut self) -> u32 {
        match fs::read_to_string(&self.path).map(|s| s.trim().parse().unwrap_or(0)) {
            Ok(score) => score,
            Err(e) => {
                error!("Error loading high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        match fs::write(&self.path, score.to_string()) {
            Ok(()) => info!("New high score {} saved", score),
            Err(e) => error!("Error saving high score to {}: {}", self.path.display(), e),
        }
    }
}
