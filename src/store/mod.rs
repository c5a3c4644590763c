//! File-backed persistence for the three template slots, the bounded
//! system-instruction history, and the version marker. All state lives under
//! one store directory; every operation re-reads the files it touches.

use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::cli::Slot;
use crate::errors::EventcraftError;
use crate::prompt;

pub const HISTORY_CAP: usize = 20;

const HISTORY_FILE: &str = "history.json";
const VERSION_FILE: &str = "VERSION";

type Result<T> = std::result::Result<T, EventcraftError>;

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::SystemInstruction, Slot::UserInput, Slot::Feedback];

    pub fn label(self) -> &'static str {
        match self {
            Slot::SystemInstruction => "system instruction",
            Slot::UserInput => "user input",
            Slot::Feedback => "feedback",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Slot::SystemInstruction => "system_instruction.txt",
            Slot::UserInput => "user_input_template.txt",
            Slot::Feedback => "feedback_template.txt",
        }
    }

    pub fn default_content(self) -> &'static str {
        match self {
            Slot::SystemInstruction => prompt::DEFAULT_SYSTEM_INSTRUCTION,
            Slot::UserInput => prompt::DEFAULT_USER_INPUT_TEMPLATE,
            Slot::Feedback => prompt::DEFAULT_FEEDBACK_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    pub content: String,
    pub saved_at: DateTime<Utc>,
    pub note: String,
}

pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// No IO; call `init` once at startup to seed defaults and apply the
    /// version upgrade.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Startup routine: when the stored version marker differs from this
    /// build's expected version, customized slots are pushed to history and
    /// all slots are re-seeded; then any missing slot file is created.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(storage)?;

        let marker = match fs::read_to_string(self.root.join(VERSION_FILE)) {
            Ok(v) => Some(v),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(storage(e)),
        };
        if marker.as_deref().map(str::trim) != Some(prompt::TEMPLATE_VERSION) {
            self.force_upgrade()?;
            self.write(self.root.join(VERSION_FILE), prompt::TEMPLATE_VERSION)?;
        }

        for slot in Slot::ALL {
            if !self.slot_path(slot).exists() {
                self.save(slot, slot.default_content())?;
            }
        }
        Ok(())
    }

    /// Read-with-side-effect: an absent slot is seeded with its default.
    pub fn get(&self, slot: Slot) -> Result<String> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.save(slot, slot.default_content())?;
                Ok(slot.default_content().to_string())
            }
            Err(e) => Err(storage(e)),
        }
    }

    /// Overwrites the active template. No placeholder validation.
    pub fn save(&self, slot: Slot, content: &str) -> Result<()> {
        self.write(self.slot_path(slot), content)
    }

    pub fn reset(&self, slot: Slot) -> Result<()> {
        self.save(slot, slot.default_content())
    }

    /// Prepends a record and truncates to the most recent `HISTORY_CAP`
    /// entries (FIFO eviction of the oldest).
    pub fn record_history(&self, content: &str, note: &str) -> Result<()> {
        let mut history = self.list_history()?;
        history.insert(
            0,
            TemplateRecord {
                id: Uuid::new_v4().to_string(),
                content: content.to_string(),
                saved_at: Utc::now(),
                note: note.to_string(),
            },
        );
        history.truncate(HISTORY_CAP);
        self.write_history(&history)
    }

    /// Most-recent-first; re-reads storage on every call.
    pub fn list_history(&self) -> Result<Vec<TemplateRecord>> {
        let text = match fs::read_to_string(self.root.join(HISTORY_FILE)) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage(e)),
        };
        serde_json::from_str(&text).map_err(storage)
    }

    /// No-op when the id is absent.
    pub fn delete_history(&self, id: &str) -> Result<()> {
        let mut history = self.list_history()?;
        history.retain(|r| r.id != id);
        self.write_history(&history)
    }

    /// Pushes every customized slot to history with a fixed note, then
    /// restores all three defaults. Idempotent: a second call finds every
    /// slot equal to its default and appends nothing.
    pub fn force_upgrade(&self) -> Result<()> {
        for slot in Slot::ALL {
            if let Ok(current) = fs::read_to_string(self.slot_path(slot)) {
                if current != slot.default_content() {
                    self.record_history(&current, &format!("pre-upgrade {}", slot.label()))?;
                }
            }
            self.save(slot, slot.default_content())?;
        }
        Ok(())
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    fn write(&self, path: PathBuf, content: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(storage)?;
        fs::write(path, content).map_err(storage)
    }

    fn write_history(&self, history: &[TemplateRecord]) -> Result<()> {
        let text = serde_json::to_string_pretty(history).map_err(storage)?;
        self.write(self.root.join(HISTORY_FILE), &text)
    }
}

fn storage(e: impl std::fmt::Display) -> EventcraftError {
    EventcraftError::StorageWrite(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &tempfile::TempDir) -> TemplateStore {
        TemplateStore::open(dir.path().join("store"))
    }

    #[test]
    fn get_seeds_absent_slots_with_defaults() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        let content = store.get(Slot::SystemInstruction).unwrap();
        assert_eq!(content, prompt::DEFAULT_SYSTEM_INSTRUCTION);
        // The side effect persisted the default.
        assert!(dir.path().join("store/system_instruction.txt").exists());
    }

    #[test]
    fn save_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        store.save(Slot::UserInput, "custom {productName}").unwrap();
        assert_eq!(store.get(Slot::UserInput).unwrap(), "custom {productName}");
        store.reset(Slot::UserInput).unwrap();
        assert_eq!(
            store.get(Slot::UserInput).unwrap(),
            prompt::DEFAULT_USER_INPUT_TEMPLATE
        );
    }

    #[test]
    fn history_caps_at_twenty_entries() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        for i in 0..21 {
            store.record_history(&format!("v{i}"), "edit").unwrap();
        }
        let history = store.list_history().unwrap();
        assert_eq!(history.len(), HISTORY_CAP);
        // Most recent first; the oldest entry (v0) was evicted.
        assert_eq!(history[0].content, "v20");
        assert_eq!(history.last().unwrap().content, "v1");
    }

    #[test]
    fn delete_history_removes_one_and_ignores_unknown_ids() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        store.record_history("a", "").unwrap();
        store.record_history("b", "").unwrap();
        let id = store.list_history().unwrap()[0].id.clone();
        store.delete_history(&id).unwrap();
        let history = store.list_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "a");
        store.delete_history("no-such-id").unwrap();
        assert_eq!(store.list_history().unwrap().len(), 1);
    }

    #[test]
    fn force_upgrade_archives_customized_slots_once() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        store.save(Slot::SystemInstruction, "tweaked").unwrap();
        store.force_upgrade().unwrap();

        assert_eq!(
            store.get(Slot::SystemInstruction).unwrap(),
            prompt::DEFAULT_SYSTEM_INSTRUCTION
        );
        let history = store.list_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "tweaked");

        // Second call: slots already match defaults, so nothing is appended.
        store.force_upgrade().unwrap();
        assert_eq!(store.list_history().unwrap().len(), 1);
        assert_eq!(
            store.get(Slot::SystemInstruction).unwrap(),
            prompt::DEFAULT_SYSTEM_INSTRUCTION
        );
    }

    #[test]
    fn init_upgrades_when_version_marker_differs() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        store.init().unwrap();
        store.save(Slot::SystemInstruction, "customized").unwrap();

        // Same version: customized content survives the next startup.
        store.init().unwrap();
        assert_eq!(store.get(Slot::SystemInstruction).unwrap(), "customized");

        // Stale marker: slots are re-seeded and the old value is archived.
        fs::write(store.root().join(VERSION_FILE), "0.1").unwrap();
        store.init().unwrap();
        assert_eq!(
            store.get(Slot::SystemInstruction).unwrap(),
            prompt::DEFAULT_SYSTEM_INSTRUCTION
        );
        let history = store.list_history().unwrap();
        assert_eq!(history[0].content, "customized");
    }

    #[test]
    fn record_ids_are_unique() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        store.record_history("a", "").unwrap();
        store.record_history("b", "").unwrap();
        let history = store.list_history().unwrap();
        assert_ne!(history[0].id, history[1].id);
    }
}
