//! Best-effort write of the final session result.

use crate::error::{GameError, Result};
use crate::model::SessionOutcome;
use gloo::storage::{LocalStorage, Storage};

pub trait ResultStore {
    fn save(&mut self, key: &str, outcome: &SessionOutcome) -> Result<()>;
    fn load(&self, key: &str) -> Option<SessionOutcome>;
}

/// Browser `localStorage`, JSON encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl ResultStore for BrowserStore {
    fn save(&mut self, key: &str, outcome: &SessionOutcome) -> Result<()> {
        LocalStorage::set(key, outcome).map_err(|e| GameError::Storage(e.to_string()))
    }

    fn load(&self, key: &str) -> Option<SessionOutcome> {
        LocalStorage::get(key).ok()
    }
}

/// Saves and logs; a failed write never interrupts the game.
pub fn record_outcome<S: ResultStore>(store: &mut S, key: &str, outcome: &SessionOutcome) {
    match store.save(key, outcome) {
        Ok(()) => log::info!("saved result under `{key}`"),
        Err(err) => log::warn!("{err}"),
    }
}

/// Remembers which run already had its result written.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    last_run: Option<u32>,
}

impl OutcomeRecorder {
    /// Records `outcome` the first time it is seen for `run_id`.
    /// Returns true only on that first write.
    pub fn observe<S: ResultStore>(
        &mut self,
        store: &mut S,
        key: &str,
        run_id: u32,
        outcome: Option<&SessionOutcome>,
    ) -> bool {
        let Some(outcome) = outcome else {
            return false;
        };
        if self.last_run == Some(run_id) {
            return false;
        }
        self.last_run = Some(run_id);
        record_outcome(store, key, outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        items: HashMap<String, String>,
        fail: bool,
        writes: usize,
    }

    impl ResultStore for MemoryStore {
        fn save(&mut self, key: &str, outcome: &SessionOutcome) -> Result<()> {
            self.writes += 1;
            if self.fail {
                return Err(GameError::Storage("quota exceeded".into()));
            }
            let raw =
                serde_json::to_string(outcome).map_err(|e| GameError::Storage(e.to_string()))?;
            self.items.insert(key.to_string(), raw);
            Ok(())
        }

        fn load(&self, key: &str) -> Option<SessionOutcome> {
            self.items.get(key).and_then(|raw| serde_json::from_str(raw).ok())
        }
    }

    #[test]
    fn records_latest_outcome() {
        let mut store = MemoryStore::default();
        let first = SessionOutcome {
            won: false,
            score: 2,
            remaining_secs: 0,
        };
        let second = SessionOutcome {
            won: true,
            score: 5,
            remaining_secs: 12,
        };
        record_outcome(&mut store, "k", &first);
        record_outcome(&mut store, "k", &second);
        assert_eq!(store.load("k"), Some(second));
        assert_eq!(
            store.items["k"],
            r#"{"won":true,"score":5,"remaining_secs":12}"#
        );
    }

    #[test]
    fn failed_write_is_swallowed() {
        let mut store = MemoryStore {
            fail: true,
            ..Default::default()
        };
        let outcome = SessionOutcome {
            won: true,
            score: 5,
            remaining_secs: 1,
        };
        record_outcome(&mut store, "k", &outcome);
        assert_eq!(store.load("k"), None);
    }

    #[test]
    fn each_run_is_recorded_once() {
        let mut store = MemoryStore::default();
        let mut recorder = OutcomeRecorder::default();
        let outcome = SessionOutcome {
            won: false,
            score: 3,
            remaining_secs: 0,
        };
        assert!(!recorder.observe(&mut store, "k", 0, None));
        assert!(recorder.observe(&mut store, "k", 0, Some(&outcome)));
        assert!(!recorder.observe(&mut store, "k", 0, Some(&outcome)));
        assert_eq!(store.writes, 1);

        // Restarted run ends again.
        assert!(!recorder.observe(&mut store, "k", 1, None));
        let won = SessionOutcome {
            won: true,
            score: 5,
            remaining_secs: 9,
        };
        assert!(recorder.observe(&mut store, "k", 1, Some(&won)));
        assert_eq!(store.writes, 2);
        assert_eq!(store.load("k"), Some(won));
    }
}
