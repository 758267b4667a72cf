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

use crate::constants::PAGE_BUTTONS_UNCOLLAPSED;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Ellipsis,
}

/// Page buttons to show for a listing.
///
/// Short listings get every page. Longer ones keep the first and last page
/// and a window around the current one, collapsing the rest into ellipses.
pub fn page_items(current: u64, last: u64) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if last <= PAGE_BUTTONS_UNCOLLAPSED {
        return (1..=last).map(Page).collect();
    }
    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(last)]
    } else if current >= last - 2 {
        vec![Page(1), Ellipsis, Page(last - 3), Page(last - 2), Page(last - 1), Page(last)]
    } else {
        vec![Page(1), Ellipsis, Page(current - 1), Page(current), Page(current + 1), Ellipsis, Page(last)]
    }
}
