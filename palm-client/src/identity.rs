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

use std::collections::BTreeSet;

use chrono::Utc;
use log::warn;
use sha2::{Digest, Sha256};

use crate::{constants::*, storage::Storage, types::TokenGrant};

/// Environment signals folded into a new device id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub user_agent: String,
    /// Screen resolution as (width, height), if there is a screen to speak of
    pub screen: Option<(u32, u32)>,
}

impl Fingerprint {
    fn signal(&self) -> String {
        match self.screen {
            Some((width, height)) => format!("{}-{width}x{height}", self.user_agent),
            None => format!("{}-", self.user_agent),
        }
    }

    /// Base 36 digest of the signals
    pub fn hash(&self) -> String {
        let digest = Sha256::digest(self.signal().as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        to_base36(u64::from_be_bytes(head))
    }
}

pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::with_capacity(13);
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

fn random_segment() -> String {
    match getrandom::u64() {
        Ok(n) => to_base36(n),
        Err(err) => {
            warn!("No randomness available for the device id, falling back to the clock: {err}");
            let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
            let digest = Sha256::digest(nanos.to_be_bytes());
            let mut head = [0u8; 8];
            head.copy_from_slice(&digest[..8]);
            to_base36(u64::from_be_bytes(head))
        },
    }
}

/// Builds a fresh device id: `{millis}-{random}-{random}-{fingerprint}`, every part in base 36
pub fn generate_device_id(fingerprint: &Fingerprint) -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    format!("{}-{}-{}-{}", to_base36(millis), random_segment(), random_segment(), fingerprint.hash())
}

/// Typed access to the locally persisted identity.
///
/// The device id, public token and display name are plain scalars; bookmarked
/// categories and liked reels are id lists cached for optimistic UI, the
/// server stays authoritative for both.
pub struct IdentityStore<S: Storage> {
    storage: S,
    fingerprint: Fingerprint,
}

impl<S: Storage> IdentityStore<S> {
    pub fn new(storage: S, fingerprint: Fingerprint) -> Self {
        Self { storage, fingerprint }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The persisted device id, generated and saved on first use.
    ///
    /// If the storage can't hold on to it, a fresh id is returned every time.
    pub fn device_id(&self) -> String {
        if let Some(stored) = self.storage.get_item(DEVICE_ID_KEY).filter(|id| !id.is_empty()) {
            return stored;
        }
        let id = generate_device_id(&self.fingerprint);
        self.storage.set_item(DEVICE_ID_KEY, &id);
        id
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn save_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
    }

    pub fn username(&self) -> Option<String> {
        self.storage.get_item(USERNAME_KEY).filter(|name| !name.trim().is_empty())
    }

    pub fn save_username(&self, username: &str) {
        self.storage.set_item(USERNAME_KEY, username);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.username().is_some()
    }

    /// Forgets the token and display name. The device id stays.
    pub fn clear_auth(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USERNAME_KEY);
    }

    /// Persists everything a successful token request hands back
    pub fn apply_grant(&self, grant: &TokenGrant) {
        self.save_token(&grant.token);
        self.save_username(&grant.name);
        let ids: Vec<u64> = grant.bookmarked_categories.iter().map(|c| c.id).collect();
        self.save_bookmarked_category_ids(&ids);
    }

    fn load_ids(&self, key: &str) -> Vec<u64> {
        let Some(stored) = self.storage.get_item(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&stored) {
            Ok(ids) => ids,
            Err(err) => {
                warn!("Ignoring malformed value stored under '{key}': {err}");
                Vec::new()
            },
        }
    }

    fn save_ids(&self, key: &str, ids: &[u64]) {
        match serde_json::to_string(ids) {
            Ok(json) => self.storage.set_item(key, &json),
            Err(err) => warn!("Failed to serialize the ids stored under '{key}': {err}"),
        }
    }

    pub fn bookmarked_category_ids(&self) -> Vec<u64> {
        self.load_ids(BOOKMARKED_CATEGORIES_KEY)
    }

    pub fn save_bookmarked_category_ids(&self, ids: &[u64]) {
        self.save_ids(BOOKMARKED_CATEGORIES_KEY, ids);
    }

    pub fn is_category_bookmarked(&self, id: u64) -> bool {
        self.bookmarked_category_ids().contains(&id)
    }

    pub fn add_bookmarked_category_id(&self, id: u64) {
        let mut ids = self.bookmarked_category_ids();
        if !ids.contains(&id) {
            ids.push(id);
            self.save_bookmarked_category_ids(&ids);
        }
    }

    pub fn remove_bookmarked_category_id(&self, id: u64) {
        let mut ids = self.bookmarked_category_ids();
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        if ids.len() != before {
            self.save_bookmarked_category_ids(&ids);
        }
    }

    pub fn liked_reel_ids(&self) -> BTreeSet<u64> {
        self.load_ids(LIKED_REELS_KEY).into_iter().collect()
    }

    pub fn save_liked_reel_ids(&self, ids: &BTreeSet<u64>) {
        self.save_ids(LIKED_REELS_KEY, &ids.iter().copied().collect::<Vec<_>>());
    }

    pub fn is_reel_liked(&self, id: u64) -> bool {
        self.liked_reel_ids().contains(&id)
    }

    /// Returns whether the set changed
    pub fn add_liked_reel(&self, id: u64) -> bool {
        let mut ids = self.liked_reel_ids();
        let changed = ids.insert(id);
        if changed {
            self.save_liked_reel_ids(&ids);
        }
        changed
    }

    /// Returns whether the set changed
    pub fn remove_liked_reel(&self, id: u64) -> bool {
        let mut ids = self.liked_reel_ids();
        let changed = ids.remove(&id);
        if changed {
            self.save_liked_reel_ids(&ids);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{MemoryStorage, NullStorage};

    use super::*;

    fn store() -> IdentityStore<MemoryStorage> {
        IdentityStore::new(MemoryStorage::new(), Fingerprint {
            user_agent: "PalmFmClient/test".to_owned(),
            screen: Some((1920, 1080)),
        })
    }

    #[test]
    fn device_id_is_stable() {
        let store = store();
        let id = store.device_id();
        assert_eq!(id.split('-').count(), 4);
        assert!(id.chars().all(|c| c == '-' || c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(store.device_id(), id);
        store.clear_auth();
        assert_eq!(store.device_id(), id);
    }

    #[test]
    fn fingerprint_hash_is_deterministic() {
        let fingerprint = Fingerprint { user_agent: "ua".to_owned(), screen: None };
        assert_eq!(fingerprint.hash(), fingerprint.clone().hash());
        assert_ne!(fingerprint.hash(), Fingerprint { user_agent: "ua".to_owned(), screen: Some((1, 1)) }.hash());
    }

    #[test]
    fn base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn authentication_needs_token_and_name() {
        let store = store();
        assert!(!store.is_authenticated());
        store.save_token("abc");
        assert!(!store.is_authenticated());
        store.save_username("   ");
        assert!(!store.is_authenticated());
        store.save_username("Sam");
        assert!(store.is_authenticated());
        store.clear_auth();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn malformed_bookmarks_read_as_empty() {
        let store = store();
        store.storage().set_item(BOOKMARKED_CATEGORIES_KEY, "[1, 2,");
        assert_eq!(store.bookmarked_category_ids(), Vec::<u64>::new());
        store.storage().set_item(BOOKMARKED_CATEGORIES_KEY, "{\"id\": 1}");
        assert_eq!(store.bookmarked_category_ids(), Vec::<u64>::new());
        store.add_bookmarked_category_id(3);
        assert_eq!(store.bookmarked_category_ids(), vec![3]);
    }

    #[test]
    fn bookmark_and_like_sets_are_idempotent() {
        let store = store();
        store.add_bookmarked_category_id(5);
        store.add_bookmarked_category_id(5);
        assert_eq!(store.bookmarked_category_ids(), vec![5]);
        store.remove_bookmarked_category_id(5);
        store.remove_bookmarked_category_id(5);
        assert!(store.bookmarked_category_ids().is_empty());

        assert!(store.add_liked_reel(42));
        assert!(!store.add_liked_reel(42));
        assert_eq!(store.liked_reel_ids().len(), 1);
        assert!(store.is_reel_liked(42));
        assert!(store.remove_liked_reel(42));
        assert!(!store.remove_liked_reel(42));
    }

    #[test]
    fn unavailable_storage_degrades_to_empty() {
        let store = IdentityStore::new(NullStorage, Fingerprint::default());
        store.save_token("abc");
        store.save_username("Sam");
        assert_eq!(store.token(), None);
        assert_eq!(store.username(), None);
        assert!(!store.is_authenticated());
        assert!(store.bookmarked_category_ids().is_empty());
        assert!(!store.device_id().is_empty());
    }
}
