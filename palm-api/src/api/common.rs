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

/// A value the backend may send either bare or wrapped in a one-element array.
///
/// Every numeric field of the pagination meta is affected, so all of them go
/// through this type before use.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum MaybeArray<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for MaybeArray<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T: Clone> MaybeArray<T> {
    /// The scalar itself, or the first element of the array
    pub fn first(&self) -> Option<T> {
        match self {
            Self::One(value) => Some(value.clone()),
            Self::Many(values) => values.first().cloned(),
        }
    }
}

impl<T: Clone> MaybeArray<Option<T>> {
    pub fn first_value(&self) -> Option<T> {
        self.first().flatten()
    }
}

const fn default_success() -> bool {
    true
}

/// The `{ success, data, message }` wrapper used by most non-paginated endpoints
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<RcStr>,
}

/// Single-object endpoints answer with either `{ data: T }` or a bare `T`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MetaLink {
    #[serde(default)]
    pub url: Option<RcStr>,
    pub label: RcStr,
    #[serde(default)]
    pub active: bool,
}

/// Pagination meta exactly as the backend sends it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PaginationMetaRaw {
    pub current_page: MaybeArray<Option<u64>>,
    pub from: MaybeArray<Option<u64>>,
    pub last_page: MaybeArray<Option<u64>>,
    pub per_page: MaybeArray<Option<u64>>,
    pub to: MaybeArray<Option<u64>>,
    pub total: MaybeArray<Option<u64>>,
    // only sent by the comment listing
    pub comments_count: MaybeArray<Option<u64>>,
    pub path: Option<RcStr>,
    pub links: Vec<MetaLink>,
}

/// Pagination meta with every field reduced to a plain scalar.
///
/// `total` is advisory: good enough for empty states and for disabling the
/// "last page" buttons, nothing more.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub from: Option<u64>,
    pub last_page: u64,
    pub per_page: u64,
    pub to: Option<u64>,
    pub total: u64,
    pub comments_count: Option<u64>,
    pub path: Option<RcStr>,
    pub links: Vec<MetaLink>,
}

impl PaginationMetaRaw {
    pub fn normalize(self) -> PaginationMeta {
        let current_page = self.current_page.first_value().unwrap_or(1).max(1);
        PaginationMeta {
            current_page,
            from: self.from.first_value(),
            last_page: self.last_page.first_value().unwrap_or(current_page).max(1),
            per_page: self.per_page.first_value().unwrap_or(0),
            to: self.to.first_value(),
            total: self.total.first_value().unwrap_or(0),
            comments_count: self.comments_count.first_value(),
            path: self.path,
            links: self.links,
        }
    }
}

impl From<PaginationMetaRaw> for PaginationMeta {
    fn from(value: PaginationMetaRaw) -> Self {
        value.normalize()
    }
}

impl PaginationMeta {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PaginationLinksRaw {
    pub first: MaybeArray<Option<RcStr>>,
    pub last: MaybeArray<Option<RcStr>>,
    pub prev: MaybeArray<Option<RcStr>>,
    pub next: MaybeArray<Option<RcStr>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PaginationLinks {
    pub first: Option<RcStr>,
    pub last: Option<RcStr>,
    pub prev: Option<RcStr>,
    pub next: Option<RcStr>,
}

impl PaginationLinksRaw {
    pub fn normalize(self) -> PaginationLinks {
        PaginationLinks {
            first: self.first.first_value(),
            last: self.last.first_value(),
            prev: self.prev.first_value(),
            next: self.next.first_value(),
        }
    }
}

/// A paginated listing as sent by the backend
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PaginatedRaw<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: PaginationLinksRaw,
    #[serde(default)]
    pub meta: PaginationMetaRaw,
}

/// A paginated listing with normalized meta and links
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
}

impl<T> PaginatedRaw<T> {
    pub fn normalize(self) -> Paginated<T> {
        Paginated {
            data: self.data,
            links: self.links.normalize(),
            meta: self.meta.normalize(),
        }
    }
}

impl<T> From<PaginatedRaw<T>> for Paginated<T> {
    fn from(value: PaginatedRaw<T>) -> Self {
        value.normalize()
    }
}
