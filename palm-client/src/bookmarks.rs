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

use log::{debug, warn};

use crate::{api::{BookmarkToggle, TokenApi}, identity::IdentityStore, storage::Storage, types::TokenGrant};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookmarkOutcome {
    /// No identity yet. The toggle is remembered until [`BookmarkFlow::identity_created`].
    IdentityRequired,
    Changed(BookmarkToggle),
    /// The request failed and nothing changed
    Failed,
}

/// Bookmarking categories, gated on having a public token
pub struct BookmarkFlow<S: Storage> {
    identity: IdentityStore<S>,
    pending: Option<u64>,
}

impl<S: Storage> BookmarkFlow<S> {
    pub fn new(identity: IdentityStore<S>) -> Self {
        Self { identity, pending: None }
    }

    pub fn identity(&self) -> &IdentityStore<S> {
        &self.identity
    }

    pub fn is_bookmarked(&self, category_id: u64) -> bool {
        self.identity.is_category_bookmarked(category_id)
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Bookmarks the category, or removes the bookmark if the cache says it's there
    pub async fn toggle<A: TokenApi>(&mut self, api: &A, category_id: u64) -> BookmarkOutcome {
        match (self.identity.token(), self.identity.username()) {
            (Some(token), Some(_)) => self.perform(api, &token, category_id).await,
            _ => {
                self.pending = Some(category_id);
                BookmarkOutcome::IdentityRequired
            },
        }
    }

    /// Replays the toggle that was waiting for an identity, if any
    pub async fn identity_created<A: TokenApi>(&mut self, api: &A, grant: &TokenGrant) -> Option<BookmarkOutcome> {
        let category_id = self.pending.take()?;
        Some(self.perform(api, &grant.token, category_id).await)
    }

    async fn perform<A: TokenApi>(&self, api: &A, token: &str, category_id: u64) -> BookmarkOutcome {
        let result = if self.identity.is_category_bookmarked(category_id) {
            api.unbookmark_category(token, category_id).await
        } else {
            api.bookmark_category(token, category_id).await
        };
        match result {
            Ok(toggle) => {
                // the server's list wins over whatever the cache assumed
                self.identity.save_bookmarked_category_ids(&toggle.bookmarked_categories);
                debug!("Category {category_id} bookmarked: {}", toggle.is_bookmarked);
                BookmarkOutcome::Changed(toggle)
            },
            Err(err) => {
                warn!("Failed to toggle the bookmark of category {category_id}: {err:?}");
                BookmarkOutcome::Failed
            },
        }
    }
}
