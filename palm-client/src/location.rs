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

use url::{form_urlencoded, Url};

use crate::{locale::Locale, types::ReelSort};

/// The reel browser's state as it appears in the address bar.
///
/// Defaults are left out of the query string: page 1, newest first, no search
/// and no open reel all serialize to nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReelsLocation {
    pub q: String,
    pub sort: ReelSort,
    pub page: u64,
    pub reel: Option<u64>,
}

impl Default for ReelsLocation {
    fn default() -> Self {
        Self {
            q: String::new(),
            sort: ReelSort::default(),
            page: 1,
            reel: None,
        }
    }
}

impl ReelsLocation {
    /// Parses a query string, with or without the leading `?`.
    /// Values that don't parse fall back to their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut location = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "q" => location.q = value.trim().to_owned(),
                "sort" => location.sort = ReelSort::from_query(Some(&value)),
                "page" => location.page = value.parse().ok().filter(|page| *page >= 1).unwrap_or(1),
                "reel" => location.reel = value.parse().ok(),
                _ => {},
            }
        }
        location
    }

    /// The grid with no reel open. Pages below 1 are clamped to 1.
    pub fn listing(q: &str, sort: ReelSort, page: u64) -> Self {
        Self {
            q: q.trim().to_owned(),
            sort,
            page: page.max(1),
            reel: None,
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            query.append_pair("q", &self.q);
        }
        if let Some(sort) = self.sort.query_value() {
            query.append_pair("sort", sort);
        }
        if let Some(reel) = self.reel {
            query.append_pair("reel", &reel.to_string());
        }
        if self.page > 1 {
            query.append_pair("page", &self.page.to_string());
        }
        query.finish()
    }

    /// Path and query of the reels page, e.g. `/ar/reels?sort=-views_count&page=2`
    pub fn to_path(&self, locale: Locale) -> String {
        let mut path = format!("/{locale}/reels");
        let query = self.to_query();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_to_nothing() {
        assert_eq!(ReelsLocation::default().to_query(), "");
        assert_eq!(ReelsLocation::default().to_path(Locale::Ar), "/ar/reels");
        assert!(ReelsLocation::from_query("?page=1&sort=-created_at").is_default());
    }

    #[test]
    fn closing_a_reel_keeps_the_rest() {
        let mut location = ReelsLocation::from_query("?q=news&sort=-views_count&page=2&reel=7");
        assert_eq!(location.reel, Some(7));
        assert_eq!(location.page, 2);
        assert_eq!(location.sort, ReelSort::MostViewed);
        location.reel = None;
        assert_eq!(location.to_query(), "q=news&sort=-views_count&page=2");
        assert_eq!(ReelsLocation::from_query(&location.to_query()), location);
    }

    #[test]
    fn garbage_falls_back() {
        let location = ReelsLocation::from_query("page=0&reel=abc&sort=random&q=%20%20&utm_source=x");
        assert!(location.is_default());
        let location = ReelsLocation::from_query("page=-3");
        assert_eq!(location.page, 1);
    }

    #[test]
    fn listing_clamps_the_page() {
        let location = ReelsLocation::listing("  jazz ", ReelSort::MostViewed, 0);
        assert_eq!(location.page, 1);
        assert_eq!(location.q, "jazz");
        assert_eq!(location.reel, None);
        assert_eq!(location.to_query(), "q=jazz&sort=-views_count");
        assert_eq!(ReelsLocation::listing("", ReelSort::Newest, 4).page, 4);
    }

    #[test]
    fn search_text_is_encoded() {
        let location = ReelsLocation { q: "راديو نخيل".to_owned(), ..Default::default() };
        let parsed = ReelsLocation::from_url(&Url::parse(&format!("https://palm-fm.cloud{}", location.to_path(Locale::En))).unwrap());
        assert_eq!(parsed, location);
    }
}
