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

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{constants::*, locale::Locale};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    /// Origin used when building shareable links
    pub site_origin: String,
    pub locale: Locale,
    pub reels_per_page: NonZeroUsize,
    pub comments_per_page: NonZeroUsize,
    pub episodes_per_page: NonZeroUsize,
    pub request_timeout_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            site_origin: DEFAULT_SITE_ORIGIN.to_owned(),
            locale: Locale::default(),
            reels_per_page: REELS_PER_PAGE.try_into().unwrap(),
            comments_per_page: COMMENTS_PER_PAGE.try_into().unwrap(),
            episodes_per_page: EPISODES_PER_PAGE.try_into().unwrap(),
            request_timeout_secs: 20.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale": "en", "request_timeout_secs": 7.5}"#).unwrap();
        assert_eq!(settings.locale, Locale::En);
        assert!((settings.request_timeout_secs - 7.5).abs() < f64::EPSILON);
        assert_eq!(settings.reels_per_page.get(), REELS_PER_PAGE);
        assert_eq!(settings, Settings { locale: Locale::En, request_timeout_secs: 7.5, ..Settings::default() });
        assert!(serde_json::from_str::<Settings>(r#"{"comments_per_page": 0}"#).is_err());
    }
}
