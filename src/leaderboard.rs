use crate::consts;
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The best scores across all sessions, highest first, at most one entry per
/// player and at most [`LEADERBOARD_CAP`][consts::LEADERBOARD_CAP] entries
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Leaderboard(Vec<LeaderboardEntry>);

impl Leaderboard {
    pub(crate) fn new() -> Leaderboard {
        Leaderboard::default()
    }

    /// Build a leaderboard from entries in any order, keeping each player's
    /// best score
    fn from_entries(entries: Vec<LeaderboardEntry>) -> Leaderboard {
        let mut board = Leaderboard::new();
        for entry in entries {
            let _ = board.merge(&entry.player, entry.score);
        }
        board
    }

    pub(crate) fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }

    /// Record a finished session's score for `player`.  An existing entry for
    /// the player is only replaced by a strictly higher score.  Returns the
    /// player's 1-based rank afterwards, or `None` if they didn't make the
    /// cut.
    pub(crate) fn merge(&mut self, player: &str, score: u32) -> Option<usize> {
        if let Some(entry) = self.0.iter_mut().find(|e| e.player == player) {
            if score <= entry.score {
                return self.rank_of(player);
            }
            entry.score = score;
        } else {
            self.0.push(LeaderboardEntry {
                score,
                player: player.to_owned(),
            });
        }
        // Stable, so that earlier entries win ties
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::LEADERBOARD_CAP);
        self.rank_of(player)
    }

    pub(crate) fn rank_of(&self, player: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|e| e.player == player)
            .map(|i| i + 1)
    }
}

impl Serialize for Leaderboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LeaderboardEntry>::deserialize(deserializer).map(Leaderboard::from_entries)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct LeaderboardEntry {
    pub(crate) score: u32,
    #[serde(rename = "wallet")]
    pub(crate) player: String,
}

/// Somewhere a [`Leaderboard`] can be kept between runs of the program
pub(crate) trait LeaderboardStore {
    fn load(&self) -> Result<Leaderboard, LoadError>;
    fn save(&self, board: &Leaderboard) -> Result<(), SaveError>;
}

/// Load the leaderboard from `store`.  If it can't be read, the problem is
/// logged, and an empty leaderboard is returned along with the error.
pub(crate) fn load_or_default<S: LeaderboardStore + ?Sized>(
    store: &S,
) -> (Leaderboard, Option<anyhow::Error>) {
    match store.load() {
        Ok(board) => {
            log::info!("Loaded {} leaderboard entries", board.entries().len());
            (board, None)
        }
        Err(e) => {
            let e = anyhow::Error::new(e);
            log::warn!("{e:#}; starting with an empty leaderboard");
            (Leaderboard::new(), Some(e))
        }
    }
}

/// Stores the leaderboard as a JSON array of `{"score": …, "wallet": …}`
/// objects
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: PathBuf) -> JsonFileStore {
        JsonFileStore { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Result<Leaderboard, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Leaderboard::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn save(&self, board: &Leaderboard) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(board).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        log::info!("Leaderboard saved ({} entries)", board.entries().len());
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save leaderboard")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write leaderboard to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to load leaderboard")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read leaderboard file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize leaderboard")]
    Deserialize(#[source] serde_json::Error),
}

/// A store that keeps the leaderboard in memory, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) saved: std::cell::RefCell<Vec<Leaderboard>>,
}

#[cfg(test)]
impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Result<Leaderboard, LoadError> {
        Ok(self.saved.borrow().last().cloned().unwrap_or_default())
    }

    fn save(&self, board: &Leaderboard) -> Result<(), SaveError> {
        self.saved.borrow_mut().push(board.clone());
        Ok(())
    }
}
