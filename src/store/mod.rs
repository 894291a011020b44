//! Durable key-value storage for the goal collection and the theme selection.
//!
//! The record store only ever sees snapshots: it serialises what it is handed
//! and hands back freshly checked copies on load.

mod dir;
mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use std::io;

use crate::core::card::{GoalCard, cards_from_values};
use crate::core::theme::Theme;
use crate::error::{GoalError, Result};

pub const CARDS_KEY: &str = "cards";
pub const THEME_KEY: &str = "theme";

/// Upper bound on the serialised collection, matching the import size limit.
pub const MAX_STORAGE_BYTES: usize = 5 * 1024 * 1024;

/// A flat string store addressed by fixed keys.
pub trait KeyValueStore {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

pub struct RecordStore<S> {
    inner: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn save_cards(&mut self, cards: &[GoalCard]) -> Result<()> {
        let data = serde_json::to_string(cards).map_err(|e| {
            log::error!("Failed to serialise cards: {}", e);
            GoalError::persistence("Error saving data.")
        })?;

        if data.len() > MAX_STORAGE_BYTES {
            return Err(GoalError::persistence(
                "Data is too large to save. Please export some data first.",
            ));
        }

        self.inner.set(CARDS_KEY, &data).map_err(|e| {
            log::error!("Failed to save cards: {}", e);
            if e.kind() == io::ErrorKind::StorageFull {
                GoalError::persistence("Not enough storage space. Please export some data first.")
            } else {
                GoalError::persistence("Error saving data.")
            }
        })
    }

    /// Missing, unreadable or malformed entries load as an empty collection.
    /// Elements that break the card invariant are dropped.
    pub fn load_cards(&self) -> Vec<GoalCard> {
        let raw = match self.inner.get(CARDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read stored cards: {}", e);
                return Vec::new();
            }
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Stored cards are malformed, starting empty: {}", e);
                return Vec::new();
            }
        };

        let (cards, dropped) = cards_from_values(&values);
        if dropped > 0 {
            log::warn!("Dropped {} invalid stored card(s)", dropped);
        }
        cards
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.inner.set(THEME_KEY, theme.as_id()).map_err(|e| {
            log::error!("Failed to save theme: {}", e);
            GoalError::persistence("Error saving theme.")
        })
    }

    /// `None` when no theme is stored or the stored id is unknown.
    pub fn load_theme(&self) -> Option<Theme> {
        match self.inner.get(THEME_KEY) {
            Ok(Some(raw)) => {
                let theme = Theme::from_id(raw.trim());
                if theme.is_none() {
                    log::warn!("Ignoring unknown stored theme {:?}", raw);
                }
                theme
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read stored theme: {}", e);
                None
            }
        }
    }
}
