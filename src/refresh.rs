use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::config::RefreshConfig;
use crate::error::Result;
use crate::fetcher::StatFetcher;
use crate::model::{OutcomeKind, OutcomeStatus, Player, PlayerOutcome, RefreshReport, Roster};
use crate::store;

/// Refreshes the K/D of every rostered player, one player at a time.
///
/// A run loads the roster, looks up each named player in file order with a
/// fixed pause after every lookup, and writes the whole roster back. Lookup
/// failures leave the player's stored K/D as it was; only loading and saving
/// the roster can fail a run.
pub struct Refresher<F> {
    fetcher: F,
    config: RefreshConfig,
}

impl<F: StatFetcher> Refresher<F> {
    pub fn new(fetcher: F, config: RefreshConfig) -> Self {
        Self { fetcher, config }
    }

    /// Load, refresh and save the configured roster.
    #[instrument(skip(self), fields(roster = %self.config.roster_path.display()))]
    pub async fn run(&self) -> Result<RefreshReport> {
        let path = &self.config.roster_path;
        let mut roster = store::load_roster(path)?;
        info!(teams = roster.len(), "refreshing roster");

        let report = self.refresh_roster(&mut roster).await;

        store::save_roster(path, &roster)?;
        info!(
            updated = report.count(OutcomeKind::Updated),
            unchanged = report.count(OutcomeKind::Unchanged),
            skipped = report.count(OutcomeKind::Skipped),
            "refresh complete"
        );
        Ok(report)
    }

    /// Refresh `roster` in memory.
    pub async fn refresh_roster(&self, roster: &mut Roster) -> RefreshReport {
        let mut report = RefreshReport::default();
        for team in roster.iter_mut() {
            let team_name = team.name().to_owned();
            info!(team = %team_name, "refreshing team");
            for player in team.players_mut() {
                let status = self.refresh_player(player).await;
                report.outcomes.push(PlayerOutcome {
                    team: team_name.clone(),
                    player: player.name().map(str::to_owned),
                    status,
                });
            }
        }
        report
    }

    async fn refresh_player(&self, player: &mut Player) -> OutcomeStatus {
        let Some(name) = player.lookup_name().map(str::to_owned) else {
            info!(player = ?player.name(), "skipping unassigned slot");
            return OutcomeStatus::Skipped;
        };

        info!(player = %name, "fetching K/D");
        let status = match self
            .fetcher
            .fetch_kd(&name)
            .await
            .and_then(|kd| player.set_kd(kd).map(|()| kd))
        {
            Ok(kd) => {
                info!(player = %name, kd, "K/D updated");
                OutcomeStatus::Updated(kd)
            }
            Err(e) => {
                warn!(player = %name, error = %e, "K/D left unchanged");
                OutcomeStatus::Unchanged {
                    cause: e.to_string(),
                }
            }
        };

        sleep(self.config.request_delay).await;
        status
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::error::KdError;

    /// Answers from a fixed table; unknown players get a 404.
    #[derive(Default)]
    struct ScriptedFetcher {
        answers: HashMap<String, f64>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn with(answers: &[(&str, f64)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(name, kd)| (name.to_string(), *kd))
                    .collect(),
                calls: RefCell::default(),
            }
        }
    }

    impl StatFetcher for ScriptedFetcher {
        async fn fetch_kd(&self, player: &str) -> Result<f64> {
            self.calls.borrow_mut().push(player.to_owned());
            self.answers
                .get(player)
                .copied()
                .ok_or_else(|| KdError::UnexpectedStatus {
                    url: format!("https://op.gg/pubg/user/{player}"),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    /// Shared sink for formatted log lines.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn config() -> RefreshConfig {
        RefreshConfig {
            request_delay: Duration::ZERO,
            ..RefreshConfig::default()
        }
    }

    fn roster(value: Value) -> Roster {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_skips_wildcard_and_blank_names() {
        let fetcher = ScriptedFetcher::default();
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([{
            "nome": "Alfa",
            "jogadores": [
                {"nome": "*", "KD": 1.5},
                {"nome": ""},
                {"nome": "   ", "KD": 2},
                {"KD": 0.5}
            ]
        }]));
        let before = roster.clone();

        let report = refresher.refresh_roster(&mut roster).await;

        assert_eq!(roster, before);
        assert!(fetcher.calls.borrow().is_empty());
        assert_eq!(report.count(OutcomeKind::Skipped), 4);
    }

    #[tokio::test]
    async fn test_updates_found_players() {
        let fetcher = ScriptedFetcher::with(&[("Zed", 12.5), ("Ana", 0.0)]);
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([
            {"nome": "Alfa", "jogadores": [{"nome": "Zed", "KD": 3.1}]},
            {"nome": "Beta", "jogadores": [{"nome": "Ana"}]}
        ]));

        let report = refresher.refresh_roster(&mut roster).await;

        assert_eq!(roster[0].players()[0].kd(), Some(12.5));
        assert_eq!(roster[1].players()[0].kd(), Some(0.0));
        assert_eq!(report.count(OutcomeKind::Updated), 2);
        assert_eq!(*fetcher.calls.borrow(), vec!["Zed", "Ana"]);
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_previous_value() {
        let fetcher = ScriptedFetcher::default();
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([{
            "nome": "Alfa",
            "jogadores": [{"nome": "Zed", "KD": 3.1}, {"nome": "Ana"}]
        }]));

        let report = refresher.refresh_roster(&mut roster).await;

        assert_eq!(roster[0].players()[0].kd(), Some(3.1));
        assert_eq!(roster[0].players()[1].get("KD"), None);

        let failed: Vec<_> = report
            .failures()
            .filter_map(|o| o.player.as_deref())
            .collect();
        assert_eq!(failed, vec!["Zed", "Ana"]);
        assert!(matches!(
            &report.outcomes[0].status,
            OutcomeStatus::Unchanged { cause } if cause.contains("404")
        ));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_run() {
        let fetcher = ScriptedFetcher::with(&[("Ana", 1.25)]);
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([{
            "nome": "Alfa",
            "jogadores": [{"nome": "Zed"}, {"nome": "Ana"}]
        }]));

        refresher.refresh_roster(&mut roster).await;

        assert_eq!(roster[0].players()[0].get("KD"), None);
        assert_eq!(roster[0].players()[1].kd(), Some(1.25));
    }

    #[tokio::test]
    async fn test_empty_teams_pass_through() {
        let fetcher = ScriptedFetcher::default();
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([{"nome": "Alfa", "jogadores": []}, {"nome": "Beta"}]));
        let before = roster.clone();

        let report = refresher.refresh_roster(&mut roster).await;

        assert_eq!(roster, before);
        assert!(report.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_delay_between_lookups() {
        let fetcher = ScriptedFetcher::with(&[("Zed", 1.0), ("Ana", 2.0)]);
        let delay = Duration::from_millis(50);
        let refresher = Refresher::new(
            &fetcher,
            RefreshConfig {
                request_delay: delay,
                ..RefreshConfig::default()
            },
        );
        let mut roster = roster(json!([{
            "nome": "Alfa",
            "jogadores": [{"nome": "Zed"}, {"nome": "*"}, {"nome": "Ana"}]
        }]));

        let started = std::time::Instant::now();
        refresher.refresh_roster(&mut roster).await;

        assert!(started.elapsed() >= delay * 2);
    }

    #[tokio::test]
    async fn test_failure_is_logged_as_warning() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetcher = ScriptedFetcher::with(&[("Ana", 1.0)]);
        let refresher = Refresher::new(&fetcher, config());
        let mut roster = roster(json!([{
            "nome": "Alfa",
            "jogadores": [{"nome": "Zed"}, {"nome": "Ana"}, {"nome": "*"}]
        }]));
        refresher.refresh_roster(&mut roster).await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<_> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{output}");
        assert!(warnings[0].contains("K/D left unchanged"));
        assert!(warnings[0].contains("Zed"));
    }
}
