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

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The two languages the site is published in. Arabic is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }

    pub fn digit(self, d: u8) -> char {
        match self {
            // U+0660 ARABIC-INDIC DIGIT ZERO
            Locale::Ar => char::from_u32(0x0660 + u32::from(d)).unwrap_or('?'),
            Locale::En => char::from(b'0' + d),
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            Locale::Ar => '\u{066C}',
            Locale::En => ',',
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Locale::Ar => '\u{066B}',
            Locale::En => '.',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_round_trips_through_strings() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!(Locale::En.to_string(), "en");
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
        assert_eq!(Locale::Ar.digit(7), '٧');
        assert_eq!(Locale::En.digit(7), '7');
    }
}
