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

/// Monotonic request counter for a single fetch site.
///
/// Every request gets a [`Ticket`]; a response is only applied if its ticket
/// is still the newest one, so a slow response can never overwrite the result
/// of a request issued after it.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued == ticket.0
    }

    /// Makes every outstanding ticket stale without starting a new request
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}
