//! Key-value storage backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ConsentError, Result};

/// String key-value storage, the durable home of the consent flags.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Option<String>;

	fn set(&mut self, key: &str, value: &str) -> Result<()>;

	/// Writes several entries. Backends that persist on every write override
	/// this to persist once.
	fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
		for (key, value) in entries {
			self.set(key, value)?;
		}
		Ok(())
	}
}

/// Process-local store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
	entries: BTreeMap<String, String>,
}

impl MemoryStore {
	pub fn entries(&self) -> &BTreeMap<String, String> {
		&self.entries
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// JSON object on disk, rewritten in full on every write.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never see a partial file. The file and its parent
/// directory are created on first write.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	entries: BTreeMap<String, String>,
}

impl FileStore {
	/// Opens the store at `path`. A missing file is an empty store.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let entries = match fs::read_to_string(&path) {
			Ok(text) if text.trim().is_empty() => BTreeMap::new(),
			Ok(text) => serde_json::from_str(&text).map_err(|source| ConsentError::Corrupt {
				path: path.clone(),
				source,
			})?,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
			Err(source) => return Err(ConsentError::Io { path, source }),
		};
		tracing::debug!(path = %path.display(), keys = entries.len(), "opened consent storage");
		Ok(Self { path, entries })
	}

	/// `$XDG_DATA_HOME/bricky/storage.json`, when a data directory is known.
	pub fn default_path() -> Option<PathBuf> {
		dirs::data_dir().map(|dir| dir.join("bricky").join("storage.json"))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn persist(&self) -> Result<()> {
		let io_err = |source| ConsentError::Io {
			path: self.path.clone(),
			source,
		};
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(io_err)?;
		}
		let text = serde_json::to_string_pretty(&self.entries)?;
		let mut tmp = self.path.clone().into_os_string();
		tmp.push(".tmp");
		let tmp = PathBuf::from(tmp);
		fs::write(&tmp, text).map_err(io_err)?;
		fs::rename(&tmp, &self.path).map_err(io_err)
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		self.entries.insert(key.to_string(), value.to_string());
		self.persist()
	}

	fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
		for (key, value) in entries {
			self.entries.insert(key.to_string(), value.clone());
		}
		self.persist()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_file_store_created_on_first_write() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("storage.json");

		let mut store = FileStore::open(&path).unwrap();
		assert_eq!(store.get("analytics_cookies"), None);
		assert!(!path.exists());

		store.set("analytics_cookies", "true").unwrap();
		assert!(path.exists());

		let reopened = FileStore::open(&path).unwrap();
		assert_eq!(reopened.get("analytics_cookies").as_deref(), Some("true"));
	}

	#[test]
	fn test_file_store_keeps_unrelated_keys() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("storage.json");
		fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

		let mut store = FileStore::open(&path).unwrap();
		store
			.set_many(&[("marketing_cookies", "false".into()), ("preference_cookies", "true".into())])
			.unwrap();

		let on_disk: BTreeMap<String, String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
		assert_eq!(on_disk.get("theme").map(String::as_str), Some("dark"));
		assert_eq!(on_disk.len(), 3);
	}

	#[test]
	fn test_corrupt_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("storage.json");
		fs::write(&path, "not json").unwrap();

		let err = FileStore::open(&path).unwrap_err();
		assert!(matches!(err, ConsentError::Corrupt { .. }));
	}
}
