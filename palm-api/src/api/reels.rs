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
pub struct Author {
    pub id: u64,
    pub name: RcStr,
    #[serde(default)]
    pub email: Option<RcStr>,
    #[serde(default)]
    pub role: Option<RcStr>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub avatar_url: Option<RcStr>,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reel {
    pub id: u64,
    pub title: RcStr,
    #[serde(default)]
    pub description: Option<RcStr>,
    pub stream_url: RcStr,
    #[serde(default)]
    pub thumbnail_url: Option<RcStr>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub duration_formatted: Option<RcStr>,
    /// File size in bytes
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_size_formatted: Option<RcStr>,
    #[serde(default)]
    pub mime_type: Option<RcStr>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub reel_id: u64,
    /// Free text chosen by the commenter, not a verified identity
    pub username: RcStr,
    pub comment: RcStr,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
    /// Relative time label computed by the server
    #[serde(default)]
    pub time_ago: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommentRequest {
    pub username: RcStr,
    pub comment: RcStr,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LikeRequest {
    pub username: RcStr,
}

/// Sort orders offered by the reel grid
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantArray)]
pub enum ReelSort {
    #[default]
    #[serde(rename = "-created_at")]
    #[strum(serialize = "-created_at")]
    Newest,
    #[serde(rename = "created_at")]
    #[strum(serialize = "created_at")]
    Oldest,
    #[serde(rename = "-views_count")]
    #[strum(serialize = "-views_count")]
    MostViewed,
    #[serde(rename = "-likes_count")]
    #[strum(serialize = "-likes_count")]
    MostLiked,
}

impl ReelSort {
    /// Parses a `sort` query value, falling back to the default for anything unknown
    pub fn from_query(value: Option<&str>) -> ReelSort {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// The value to put in a `sort` query parameter. The default order is left implicit.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ReelSort::Newest => None,
            other => Some(other.into()),
        }
    }
}
