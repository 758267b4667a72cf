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

use cloneable_errors::{bail, ErrorContext};
use log::{debug, info, warn};

use crate::{api::TokenApi, identity::IdentityStore, storage::Storage, types::TokenGrant};

/// The local identity together with the calls that keep it in sync with the server
pub struct Session<S: Storage> {
    identity: IdentityStore<S>,
}

impl<S: Storage> Session<S> {
    pub fn new(identity: IdentityStore<S>) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &IdentityStore<S> {
        &self.identity
    }

    /// Exchanges a display name for a public token and persists the result
    pub async fn create_identity<A: TokenApi>(&self, api: &A, name: &str) -> Result<TokenGrant, ErrorContext> {
        let name = name.trim();
        if name.is_empty() {
            bail!("A display name is required");
        }
        let grant = api.generate_token(name, &self.identity.device_id()).await?;
        self.identity.apply_grant(&grant);
        info!("Created a public token for {}", grant.name);
        Ok(grant)
    }

    /// Refreshes the cached name and bookmarks at startup.
    ///
    /// Both requests run concurrently and each may fail on its own; a failure
    /// only means the cached value stays as it was.
    pub async fn refresh<A: TokenApi>(&self, api: &A) {
        let Some(token) = self.identity.token() else {
            debug!("No public token stored, skipping the profile refresh");
            return;
        };
        let (profile, bookmarks) = futures::join!(
            api.token_profile(&token),
            api.bookmarked_categories(&token)
        );
        match profile {
            Ok(profile) if !profile.name.trim().is_empty() => self.identity.save_username(&profile.name),
            Ok(_) => debug!("The token profile has no name, keeping the cached one"),
            Err(err) => warn!("Failed to refresh the token profile: {err:?}"),
        }
        match bookmarks {
            Ok(categories) => {
                let ids: Vec<u64> = categories.iter().map(|category| category.id).collect();
                self.identity.save_bookmarked_category_ids(&ids);
            },
            Err(err) => warn!("Failed to refresh bookmarked categories: {err:?}"),
        }
    }
}
