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

pub const USER_AGENT: &str = concat!("PalmFmClient/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_API_BASE_URL: &str = "https://api.palm-fm.cloud/api";
pub const DEFAULT_SITE_ORIGIN: &str = "https://palm-fm.cloud";

// Page sizes used by the site

pub const REELS_PER_PAGE: usize = 12;
pub const COMMENTS_PER_PAGE: usize = 10;
pub const EPISODES_PER_PAGE: usize = 6;
pub const NEWS_PER_PAGE: usize = 12;
pub const SHOWS_PER_PAGE: usize = 12;
pub const TOP_NEWS_LIMIT: usize = 5;

/// Pagination shows every page number up to this many pages, and ellipses past it
pub const PAGE_BUTTONS_UNCOLLAPSED: u64 = 7;

// Headers

pub const PUBLIC_TOKEN_HEADER: &str = "X-Public-Token";

// Persistence layer keys

pub const DEVICE_ID_KEY: &str = "device_id";
pub const TOKEN_KEY: &str = "public_token";
pub const USERNAME_KEY: &str = "username";
pub const BOOKMARKED_CATEGORIES_KEY: &str = "bookmarked_categories";
pub const LIKED_REELS_KEY: &str = "liked_reels";

// URLs

pub const REELS_ENDPOINT:      &[&str] = &["reels"];
pub const TOKEN_ENDPOINT:      &[&str] = &["token"];
pub const PROFILE_ENDPOINT:    &[&str] = &["token", "profile"];
pub const BOOKMARKS_ENDPOINT:  &[&str] = &["bookmarks"];
pub const HOME_ENDPOINT:       &[&str] = &["home"];
pub const NEWS_ENDPOINT:       &[&str] = &["news"];
pub const TOP_NEWS_ENDPOINT:   &[&str] = &["news", "top"];
pub const CATEGORIES_ENDPOINT: &[&str] = &["categories"];
pub const SHOWS_ENDPOINT:      &[&str] = &["shows"];
pub const SHOWS_TODAY_ENDPOINT:    &[&str] = &["shows", "today"];
pub const SHOWS_SCHEDULE_ENDPOINT: &[&str] = &["shows", "schedule"];
