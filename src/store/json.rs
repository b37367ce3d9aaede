//! File-backed preference store persisted as a flat JSON object.

use std::{
    collections::BTreeMap,
    fs::{OpenOptions, create_dir_all, read_to_string, remove_file, rename},
    io::Write,
    path::{Path, PathBuf},
};

use {
    parking_lot::RwLock,
    serde_json::{Error as SerdeJsonError, Map, Value, from_str, to_string_pretty, to_value},
    tracing::debug,
};

use crate::{
    config::get_prefs_path,
    error::{ErrorReporter, ResultExt, StoreError},
    store::{PrefValue, PreferenceStore},
};

/// Extension of the scratch file a save writes before renaming it into place.
const TEMP_EXTENSION: &str = "json.tmp";

/// Contents of the preferences file.
#[derive(Debug, Default)]
struct Entries {
    /// Entries readable as preference values.
    prefs: BTreeMap<String, PrefValue>,
    /// Entries this store cannot interpret, written back unchanged.
    foreign: BTreeMap<String, Value>,
}

impl Entries {
    /// Merges both maps into one JSON object.
    fn to_json(&self) -> Result<Value, SerdeJsonError> {
        let mut object = Map::new();
        for (key, raw) in &self.foreign {
            object.insert(key.clone(), raw.clone());
        }
        for (key, value) in &self.prefs {
            object.insert(key.clone(), to_value(value)?);
        }
        Ok(Value::Object(object))
    }
}

/// Durable preference store backed by a JSON file.
///
/// The whole file is rewritten on every `put`, before `put` returns, by
/// writing a sibling temp file and renaming it over the target. Keys are
/// kept sorted so the file diffs cleanly. Entries that are not scalar
/// preference values are preserved as they were found.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    /// Current file contents.
    entries: RwLock<Entries>,
    /// Path to the preferences file on disk.
    path: PathBuf,
}

impl JsonPreferenceStore {
    /// Opens the store at the default XDG location.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if an existing file cannot be read or parsed.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(get_prefs_path())
    }

    /// Opens the store at `path`.
    ///
    /// The parent directory is created if needed. A missing file yields an
    /// empty store; nothing is written until the first `put`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the preferences file
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if an existing file cannot be read, is not valid
    /// JSON, or is not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            debug!("Loading preferences from existing file: {:?}", path);
            parse_entries(&read_to_string(&path)?)?
        } else {
            debug!("No preferences file yet at {:?}, starting empty", path);
            Entries::default()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            path,
        })
    }

    /// Gets the preferences file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of every preference entry, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, PrefValue)> {
        self.entries
            .read()
            .prefs
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Writes `entries` to disk atomically.
    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        debug!("Saving preferences to file: {:?}", self.path);
        let contents = to_string_pretty(&entries.to_json()?)?;

        let temp_path = self.path.with_extension(TEMP_EXTENSION);
        let result = write_synced(&temp_path, contents.as_bytes())
            .and_then(|()| rename(&temp_path, &self.path));
        if result.is_err() {
            let _ = remove_file(&temp_path);
        }
        result.map_err(StoreError::from)
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.entries.read().prefs.get(key).cloned()
    }

    fn put(&self, key: &str, value: PrefValue) {
        // Hold the lock through the save so file contents follow put order.
        let mut entries = self.entries.write();
        entries.foreign.remove(key);
        entries.prefs.insert(key.to_string(), value);
        if let Err(error) = self
            .save(&entries)
            .add_contextf(format!("Saving preferences to {}", self.path.display()))
        {
            ErrorReporter::dropped_write(&error, key);
        }
    }
}

/// Writes `contents` to a fresh file at `path` and flushes it to disk.
fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Parses the file contents, setting aside entries that are not scalar
/// preference values.
fn parse_entries(contents: &str) -> Result<Entries, StoreError> {
    let Value::Object(object) = from_str::<Value>(contents)? else {
        return Err(StoreError::invalid_content("expected a JSON object"));
    };

    let mut entries = Entries::default();
    for (key, raw) in object {
        match PrefValue::from_json(&raw) {
            Some(value) => {
                entries.prefs.insert(key, value);
            }
            None => {
                debug!("Keeping unsupported preference value for {}: {}", key, raw);
                entries.foreign.insert(key, raw);
            }
        }
    }
    Ok(entries)
}
