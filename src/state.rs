use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::config::Config;
use crate::match_engine::{Match, MatchPhase};
use crate::store::{SnapshotStore, IN_PROGRESS_KEY};

#[derive(Debug, Clone, Serialize)]
pub struct EventEntry {
    pub ts: String,
    pub kind: String,
    pub detail: String,
}

pub struct AppState {
    pub config: RwLock<Config>,
    pub scorecard: RwLock<Match>,
    pub store: Option<Box<dyn SnapshotStore>>,
    pub events: Mutex<VecDeque<EventEntry>>,
}

const MAX_EVENTS: usize = 200;

impl AppState {
    pub fn new(config: Config, store: Option<Box<dyn SnapshotStore>>) -> Arc<Self> {
        Arc::new(Self {
            config: RwLock::new(config),
            scorecard: RwLock::new(Match::default()),
            store,
            events: Mutex::new(VecDeque::with_capacity(MAX_EVENTS)),
        })
    }

    pub fn push_event(&self, kind: &str, detail: &str) {
        let entry = EventEntry {
            ts: chrono::Utc::now().format("%H:%M:%S").to_string(),
            kind: kind.to_string(),
            detail: detail.to_string(),
        };
        let mut events = self.events.lock().unwrap();
        if events.len() >= MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(entry);
    }

    pub fn is_match_running(&self) -> bool {
        matches!(
            self.scorecard.read().unwrap().phase(),
            MatchPhase::Innings1InProgress | MatchPhase::Innings2InProgress
        )
    }

    /// Saves `m` if autosave is on. Failures are logged, never fatal.
    pub fn autosave(&self, m: &Match) {
        if !self.config.read().unwrap().autosave {
            return;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(IN_PROGRESS_KEY, m) {
                tracing::warn!(error = %e, "autosave failed");
                self.push_event("warn", &format!("autosave failed: {e}"));
            }
        }
    }

    pub fn save_now(&self) -> Result<()> {
        let Some(store) = &self.store else {
            bail!("no snapshot store configured");
        };
        let m = self.scorecard.read().unwrap().clone();
        store.save(IN_PROGRESS_KEY, &m)
    }

    /// Replaces the in-memory match with the saved one. Returns false when
    /// nothing was saved; a snapshot that fails validation is an error and
    /// leaves the current match alone.
    pub fn restore(&self) -> Result<bool> {
        let Some(store) = &self.store else {
            bail!("no snapshot store configured");
        };
        match store.load(IN_PROGRESS_KEY)? {
            Some(saved) => {
                if let Err(e) = saved.validate_snapshot() {
                    tracing::warn!(error = %e, "refusing saved match");
                    bail!(e);
                }
                tracing::info!(
                    team_a = %saved.team_a(),
                    team_b = %saved.team_b(),
                    phase = ?saved.phase(),
                    "match restored from snapshot"
                );
                *self.scorecard.write().unwrap() = saved;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reset_for_new_match(&self) {
        *self.scorecard.write().unwrap() = Match::default();
        if let Some(store) = &self.store {
            if let Err(e) = store.clear(IN_PROGRESS_KEY) {
                tracing::warn!(error = %e, "failed to clear saved match");
            }
        }
        self.events.lock().unwrap().clear();
    }
}
