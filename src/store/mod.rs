//! Persistence boundary for the plan document.
//!
//! Mirrors the per-browser storage the planner syncs into: one JSON
//! document under a fixed namespace key, plus a separate boolean flag
//! recording whether introductory guidance stays suppressed. Store
//! failures are surfaced as values and swallowed by the caller; they never
//! roll back an in-memory transition.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::state::AppState;

/// Namespace key for the persisted plan document.
pub const STATE_KEY: &str = "reuse-planner-state";
/// Key for the onboarding suppression flag.
pub const ONBOARDING_KEY: &str = "hide-onboarding";

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage the planner syncs the plan document into after each transition.
pub trait StateStore: Send {
    fn load_state(&self) -> StoreResult<Option<AppState>>;
    fn save_state(&mut self, state: &AppState) -> StoreResult<()>;
    fn onboarding_suppressed(&self) -> StoreResult<bool>;
    fn suppress_onboarding(&mut self) -> StoreResult<()>;
    /// Drop both persisted keys.
    fn clear(&mut self) -> StoreResult<()>;
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Option<AppState>,
    onboarding_suppressed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Some(state),
            onboarding_suppressed: false,
        }
    }
}

impl StateStore for MemoryStore {
    fn load_state(&self) -> StoreResult<Option<AppState>> {
        Ok(self.state.clone())
    }

    fn save_state(&mut self, state: &AppState) -> StoreResult<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn onboarding_suppressed(&self) -> StoreResult<bool> {
        Ok(self.onboarding_suppressed)
    }

    fn suppress_onboarding(&mut self) -> StoreResult<()> {
        self.onboarding_suppressed = true;
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.state = None;
        self.onboarding_suppressed = false;
        Ok(())
    }
}

/// One JSON document per key under a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn remove_key(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl StateStore for JsonFileStore {
    fn load_state(&self) -> StoreResult<Option<AppState>> {
        let raw = match fs::read_to_string(self.key_path(STATE_KEY)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save_state(&mut self, state: &AppState) -> StoreResult<()> {
        let raw = serde_json::to_string(state)?;
        fs::write(self.key_path(STATE_KEY), raw)?;
        Ok(())
    }

    fn onboarding_suppressed(&self) -> StoreResult<bool> {
        match fs::read_to_string(self.key_path(ONBOARDING_KEY)) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn suppress_onboarding(&mut self) -> StoreResult<()> {
        fs::write(self.key_path(ONBOARDING_KEY), "true")?;
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.remove_key(STATE_KEY)?;
        self.remove_key(ONBOARDING_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "reuse-planner-store-{label}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert!(store.load_state().unwrap().is_none());

        let state = AppState::seed();
        store.save_state(&state).unwrap();
        assert_eq!(store.load_state().unwrap(), Some(state));

        store.suppress_onboarding().unwrap();
        assert!(store.onboarding_suppressed().unwrap());

        store.clear().unwrap();
        assert!(store.load_state().unwrap().is_none());
        assert!(!store.onboarding_suppressed().unwrap());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = scratch_dir("roundtrip");
        let _ = fs::remove_dir_all(&dir);
        let mut store = JsonFileStore::new(&dir).unwrap();

        assert!(store.load_state().unwrap().is_none());
        assert!(!store.onboarding_suppressed().unwrap());

        let mut state = AppState::seed();
        state.ui.show_onboarding = false;
        store.save_state(&state).unwrap();
        store.suppress_onboarding().unwrap();

        let reopened = JsonFileStore::new(&dir).unwrap();
        assert_eq!(reopened.load_state().unwrap(), Some(state));
        assert!(reopened.onboarding_suppressed().unwrap());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_store_clear_removes_both_keys() {
        let dir = scratch_dir("clear");
        let _ = fs::remove_dir_all(&dir);
        let mut store = JsonFileStore::new(&dir).unwrap();

        store.save_state(&AppState::seed()).unwrap();
        store.suppress_onboarding().unwrap();
        store.clear().unwrap();

        assert!(store.load_state().unwrap().is_none());
        assert!(!store.onboarding_suppressed().unwrap());
        // Clearing an already-empty store is a no-op.
        store.clear().unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_state_document_is_an_error() {
        let dir = scratch_dir("corrupt");
        let _ = fs::remove_dir_all(&dir);
        let store = JsonFileStore::new(&dir).unwrap();

        fs::write(dir.join(format!("{STATE_KEY}.json")), "{not json").unwrap();
        assert!(matches!(store.load_state(), Err(StoreError::Serde(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
