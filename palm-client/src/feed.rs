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

use cloneable_errors::ErrorContext;
use log::{debug, warn};

use crate::{sequence::{RequestSequence, Ticket}, types::{Paginated, PaginationMeta}};

/// A "load more" list: the first page replaces the contents, later pages are appended.
#[derive(Debug)]
pub struct Feed<T> {
    label: &'static str,
    items: Vec<T>,
    meta: Option<PaginationMeta>,
    loading: bool,
    sequence: RequestSequence,
}

impl<T> Feed<T> {
    /// `label` names the feed in log messages
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            items: Vec::new(),
            meta: None,
            loading: false,
            sequence: RequestSequence::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.meta.as_ref().is_some_and(PaginationMeta::has_next_page)
    }

    /// Empties the feed and drops whatever is still in flight
    pub fn reset(&mut self) {
        self.items.clear();
        self.meta = None;
        self.loading = false;
        self.sequence.invalidate();
    }

    /// Starts loading page 1
    pub fn request_first(&mut self) -> (Ticket, u64) {
        self.loading = true;
        (self.sequence.issue(), 1)
    }

    /// Starts loading the page after the last loaded one, if there is one and nothing is loading
    pub fn request_next(&mut self) -> Option<(Ticket, u64)> {
        if self.loading || !self.has_more() {
            return None;
        }
        let page = self.meta.as_ref().map_or(1, |meta| meta.current_page + 1);
        self.loading = true;
        Some((self.sequence.issue(), page))
    }

    /// Applies a response. Returns false if it was stale and got dropped.
    ///
    /// A failed request leaves the loaded items untouched.
    pub fn apply(&mut self, ticket: Ticket, page: u64, result: Result<Paginated<T>, ErrorContext>) -> bool {
        if !self.sequence.is_current(ticket) {
            debug!("Dropping a stale response for page {page} of the {} feed", self.label);
            return false;
        }
        self.loading = false;
        match result {
            Ok(loaded) => {
                if page <= 1 {
                    self.items = loaded.data;
                } else {
                    self.items.extend(loaded.data);
                }
                self.meta = Some(loaded.meta);
            },
            Err(err) => warn!("Failed to load page {page} of the {} feed: {err:?}", self.label),
        }
        true
    }
}
