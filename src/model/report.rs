use std::collections::HashMap;

use itertools::Itertools;

/// What happened to one player during a refresh run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOutcome {
    pub team: String,
    /// The player's name as stored, if it had one.
    pub player: Option<String>,
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    /// A fresh K/D was stored.
    Updated(f64),
    /// The lookup failed; the stored K/D, if any, was kept.
    Unchanged { cause: String },
    /// Wildcard or blank slot, never looked up.
    Skipped,
}

impl OutcomeStatus {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            OutcomeStatus::Updated(_) => OutcomeKind::Updated,
            OutcomeStatus::Unchanged { .. } => OutcomeKind::Unchanged,
            OutcomeStatus::Skipped => OutcomeKind::Skipped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutcomeKind {
    Updated,
    Unchanged,
    Skipped,
}

/// Per-player record of a refresh run, in roster order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub outcomes: Vec<PlayerOutcome>,
}

impl RefreshReport {
    pub fn counts(&self) -> HashMap<OutcomeKind, usize> {
        self.outcomes.iter().counts_by(|o| o.status.kind())
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.counts().get(&kind).copied().unwrap_or_default()
    }

    /// Outcomes of players whose lookup failed.
    pub fn failures(&self) -> impl Iterator<Item = &PlayerOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status.kind() == OutcomeKind::Unchanged)
    }

    /// Number of players that were actually looked up.
    pub fn attempted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.kind() != OutcomeKind::Skipped)
            .count()
    }
}
