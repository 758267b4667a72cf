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

use chrono::{DateTime, Utc};
use cloneable_errors::{bail, ErrorContext, ResContext};
use reqwest::Url;
use serde::Deserialize;

use crate::locale::Locale;

pub trait ReqwestUrlExt {
    #[allow(clippy::result_unit_err)]
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>;
    #[allow(clippy::result_unit_err)]
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
    where I: IntoIterator,
    I::Item: AsRef<str>,
    Self: Sized;
}

impl ReqwestUrlExt for Url {
    fn extend_segments<I>(&mut self, segments: I) -> Result<&mut Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        {
            let mut path = self.path_segments_mut()?;
            path.pop_if_empty().extend(segments);
        }
        Ok(self)
    }
    fn join_segments<I>(&self, segments: I) -> Result<Self, ()>
        where I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.clone();
        url.extend_segments(segments)?;
        Ok(url)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

pub trait ReqwestResponseExt: Sized {
    #[allow(async_fn_in_trait)]  // this is for local use
    async fn check_status(self) -> Result<Self, ErrorContext>;
}

impl ReqwestResponseExt for reqwest::Response {
    async fn check_status(self) -> Result<Self, ErrorContext> {
        let status = self.status();
        if status.is_success() {
            Ok(self)
        } else {
            let body = self.text().await.with_context(|| format!("The server returned a '{status}' status code"))?;
            if let Ok(ApiErrorBody { message: Some(message) }) = serde_json::from_str(&body) {
                bail!("The server returned a '{status}' status code: {message}",);
            }
            bail!("The server returned a '{status}' status code with the following body:\n{body}",);
        }
    }
}

pub trait RenderNumber {
    /// Render an integer the way the given locale writes it:
    /// digits in groups of 3, Arabic-Indic digits for Arabic
    fn render_int(&self, locale: Locale) -> String;
    /// Render an integer in an abbreviated form for counters:
    /// for example: 21370 will become 21.4K
    fn abbreviate_int(&self, locale: Locale) -> String;
}

fn localize_digits(ascii: &str, locale: Locale) -> String {
    ascii.chars()
        .map(|c| match c {
            '0'..='9' => locale.digit(c as u8 - b'0'),
            '.' => locale.decimal_separator(),
            other => other,
        })
        .collect()
}

macro_rules! define_render_number {
    ($type: ident) => {
        impl RenderNumber for $type {
            fn render_int(&self, locale: Locale) -> String {
                let string_n = format!("{self}");
                let chunks = string_n.as_bytes() // digits are ASCII = 1B each
                    .rchunks(3)            // make chunks of 3, starting from end
                    .rev()                 // reverse order of chunks
                    .collect::<Vec<_>>();
                let mut result = String::with_capacity(string_n.len() * 3);
                for (i, chunk) in chunks.into_iter().enumerate() {
                    if i != 0 {
                        result.push(locale.group_separator());
                    }
                    result.extend(chunk.iter().map(|b| locale.digit(b - b'0')));
                }
                result
            }

            #[allow(clippy::cast_possible_truncation)]
            fn abbreviate_int(&self, locale: Locale) -> String {
                let n = *self as u64;
                let (tenths, suffix) = match n {
                    0..=999 => return self.render_int(locale),
                    1_000..=999_999 => ((n + 50) / 100, 'K'),
                    _ => ((n + 50_000) / 100_000, 'M'),
                };
                localize_digits(&format!("{}.{}{suffix}", tenths / 10, tenths % 10), locale)
            }
        }
    };
}

define_render_number!(u32);
define_render_number!(u64);
define_render_number!(usize);

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Render how long ago something was published, in whole minutes, hours or days
pub fn render_relative_time(then: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    // clock skew counts as "just now"
    let minutes = u64::try_from((now - then).num_minutes()).unwrap_or_default();
    let (count, unit) = match minutes {
        0 => return match locale {
            Locale::Ar => "الآن".to_owned(),
            Locale::En => "just now".to_owned(),
        },
        1..60 => (minutes, "minute"),
        60..1440 => (minutes / 60, "hour"),
        _ => (minutes / 1440, "day"),
    };
    let rendered = count.render_int(locale);
    match locale {
        Locale::Ar => {
            let unit = match unit {
                "minute" => "دقيقة",
                "hour" => "ساعة",
                _ => "يوم",
            };
            format!("منذ {rendered} {unit}")
        },
        Locale::En if count == 1 => format!("1 {unit} ago"),
        Locale::En => format!("{rendered} {unit}s ago"),
    }
}
