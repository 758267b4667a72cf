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

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenerateTokenRequest {
    pub name: RcStr,
    pub device_id: RcStr,
}

/// Response to a token request.
///
/// A device the server already knows gets its previous bookmarks back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: RcStr,
    pub name: RcStr,
    #[serde(default)]
    pub bookmarked_categories: Vec<Category>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenProfile {
    pub name: RcStr,
    #[serde(default)]
    pub bookmarked_categories: Vec<Category>,
    #[serde(default)]
    pub created_at: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: u64,
    pub name: RcStr,
    pub slug: RcStr,
}

/// Response to bookmarking or unbookmarking a category
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BookmarkChange {
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// The full, updated set of bookmarked category ids
    #[serde(default)]
    pub bookmarked_categories: Vec<u64>,
    #[serde(default)]
    pub is_bookmarked: Option<bool>,
}

impl BookmarkChange {
    pub fn contains(&self, category_id: u64) -> bool {
        self.bookmarked_categories.contains(&category_id)
    }
}
