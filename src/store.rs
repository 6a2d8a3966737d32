use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{KdError, Result};
use crate::model::Roster;

/// Read and parse the roster file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let text = fs::read_to_string(path).map_err(|e| KdError::RosterRead {
        path: path.to_owned(),
        source: e,
    })?;
    let roster: Roster = serde_json::from_str(&text).map_err(|e| KdError::RosterFormat {
        path: path.to_owned(),
        source: e,
    })?;
    debug!(path = %path.display(), teams = roster.len(), "loaded roster");
    Ok(roster)
}

/// Overwrite the roster file with `roster` as two-space indented JSON.
///
/// Non-ASCII names are written as-is, not escaped.
pub fn save_roster(path: &Path, roster: &Roster) -> Result<()> {
    let text = serde_json::to_string_pretty(roster).map_err(|e| KdError::RosterFormat {
        path: path.to_owned(),
        source: e,
    })?;
    fs::write(path, text).map_err(|e| KdError::RosterWrite {
        path: path.to_owned(),
        source: e,
    })?;
    debug!(path = %path.display(), teams = roster.len(), "saved roster");
    Ok(())
}
