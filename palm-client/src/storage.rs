/* This file is part of the Palm FM client project - https://github.com/palm-fm/palm-client
*
*  Copyright (C) 2025-2026 Palm FM contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::{cell::RefCell, collections::{BTreeMap, HashMap}, fs, io::ErrorKind, path::{Path, PathBuf}, rc::Rc};

use cloneable_errors::{ErrorContext, ResContext};
use log::{debug, error, warn};

/// A string key-value persistence layer.
///
/// Implementations never fail loudly: a broken or unavailable backend reads as
/// empty and swallows writes after logging them.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }
    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Stands in for a persistence layer that is not available at all
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStorage;

impl Storage for NullStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }
    fn set_item(&self, _key: &str, _value: &str) {}
    fn remove_item(&self, _key: &str) {}
}

/// A JSON object on disk, rewritten after every mutation
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the file at `path`. A missing file starts empty, and so does an unreadable one.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match Self::load(&path) {
            Ok(items) => items,
            Err(err) => {
                warn!("Starting with empty storage, failed to load {}: {err:?}", path.display());
                BTreeMap::new()
            },
        };
        Self { path, items: RefCell::new(items) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, ErrorContext> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Storage file {} does not exist yet", path.display());
                return Ok(BTreeMap::new());
            },
            Err(err) => return Err(err).context("Failed to read the storage file"),
        };
        serde_json::from_str(&contents).context("Failed to deserialize the storage file")
    }

    fn persist(&self) {
        let result = serde_json::to_string_pretty(&*self.items.borrow())
            .context("Failed to serialize storage")
            .and_then(|json| fs::write(&self.path, json).context("Failed to write the storage file"));
        if let Err(err) = result {
            error!("Failed to persist storage to {}: {err:?}", self.path.display());
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.persist();
    }
    fn remove_item(&self, key: &str) {
        let removed = self.items.borrow_mut().remove(key).is_some();
        if removed {
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        {
            let storage = FileStorage::open(&path);
            assert_eq!(storage.get_item("device_id"), None);
            storage.set_item("device_id", "abc");
            storage.set_item("username", "Sam");
            storage.remove_item("username");
        }
        let storage = FileStorage::open(&path);
        assert_eq!(storage.path(), path);
        assert_eq!(storage.get_item("device_id").as_deref(), Some("abc"));
        assert_eq!(storage.get_item("username"), None);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        fs::write(&path, "{not json").unwrap();
        let storage = FileStorage::open(&path);
        assert_eq!(storage.get_item("device_id"), None);
        storage.set_item("device_id", "abc");
        assert_eq!(FileStorage::open(&path).get_item("device_id").as_deref(), Some("abc"));
    }

    #[test]
    fn unwritable_file_still_serves_reads() {
        let dir = tempfile::tempdir().unwrap();
        // a directory in place of the file makes every write fail
        let storage = FileStorage::open(dir.path());
        storage.set_item("username", "Sam");
        assert_eq!(storage.get_item("username").as_deref(), Some("Sam"));
    }

    #[test]
    fn null_storage_forgets_everything() {
        let storage = NullStorage;
        storage.set_item("username", "Sam");
        assert_eq!(storage.get_item("username"), None);
    }
}
