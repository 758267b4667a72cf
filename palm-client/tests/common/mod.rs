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

#![allow(dead_code)]

use std::{cell::RefCell, collections::{BTreeSet, VecDeque}};

use cloneable_errors::{anyhow, ErrorContext};
use palm_client::{
    api::{BookmarkToggle, CommentsQuery, ReelQuery, ReelsApi, TokenApi},
    types::{Category, Comment, CommentRequest, Paginated, PaginatedRaw, Reel, TokenGrant, TokenProfile},
};
use serde_json::json;

/// Everything the fake was asked to do, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Reels(ReelQuery),
    Reel(u64),
    Comments(CommentsQuery),
    PostComment(u64, CommentRequest),
    Like(u64, String),
    Unlike(u64, String),
    GenerateToken { name: String, device_id: String },
    Profile(String),
    Bookmarks(String),
    Bookmark(String, u64),
    Unbookmark(String, u64),
}

/// A scripted stand-in for the REST API.
///
/// Reads pop the next scripted response for their endpoint and fail once the
/// script runs out. Writes succeed unless `fail_writes` is set. Bookmarks are
/// modelled as a server-side set.
#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<Call>>,
    pub reel_lists: RefCell<VecDeque<Result<Paginated<Reel>, ErrorContext>>>,
    pub reels: RefCell<VecDeque<Result<Reel, ErrorContext>>>,
    pub comments: RefCell<VecDeque<Result<Paginated<Comment>, ErrorContext>>>,
    pub grants: RefCell<VecDeque<Result<TokenGrant, ErrorContext>>>,
    pub profile: RefCell<Option<Result<TokenProfile, ErrorContext>>>,
    pub bookmark_list: RefCell<Option<Result<Vec<Category>, ErrorContext>>>,
    pub server_bookmarks: RefCell<BTreeSet<u64>>,
    pub fail_writes: bool,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub fn script_reel_list(&self, result: Result<Paginated<Reel>, ErrorContext>) {
        self.reel_lists.borrow_mut().push_back(result);
    }

    pub fn script_reel(&self, result: Result<Reel, ErrorContext>) {
        self.reels.borrow_mut().push_back(result);
    }

    pub fn script_comments(&self, result: Result<Paginated<Comment>, ErrorContext>) {
        self.comments.borrow_mut().push_back(result);
    }

    pub fn script_grant(&self, result: Result<TokenGrant, ErrorContext>) {
        self.grants.borrow_mut().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn write_result(&self) -> Result<(), ErrorContext> {
        if self.fail_writes {
            Err(anyhow!("500 Internal Server Error"))
        } else {
            Ok(())
        }
    }

    fn bookmark_toggle(&self, category_id: u64) -> BookmarkToggle {
        let ids: Vec<u64> = self.server_bookmarks.borrow().iter().copied().collect();
        BookmarkToggle {
            is_bookmarked: ids.contains(&category_id),
            bookmarked_categories: ids,
        }
    }
}

fn next<T>(queue: &RefCell<VecDeque<Result<T, ErrorContext>>>, what: &str) -> Result<T, ErrorContext> {
    queue.borrow_mut().pop_front().unwrap_or_else(|| Err(anyhow!(format!("nothing scripted for {what}"))))
}

impl ReelsApi for FakeApi {
    async fn reels(&self, query: &ReelQuery) -> Result<Paginated<Reel>, ErrorContext> {
        self.record(Call::Reels(query.clone()));
        next(&self.reel_lists, "reels")
    }

    async fn reel(&self, id: u64) -> Result<Reel, ErrorContext> {
        self.record(Call::Reel(id));
        next(&self.reels, "reel")
    }

    async fn reel_comments(&self, query: &CommentsQuery) -> Result<Paginated<Comment>, ErrorContext> {
        self.record(Call::Comments(query.clone()));
        next(&self.comments, "comments")
    }

    async fn post_comment(&self, reel_id: u64, request: &CommentRequest) -> Result<(), ErrorContext> {
        self.record(Call::PostComment(reel_id, request.clone()));
        self.write_result()
    }

    async fn like_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext> {
        self.record(Call::Like(reel_id, username.to_owned()));
        self.write_result()
    }

    async fn unlike_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext> {
        self.record(Call::Unlike(reel_id, username.to_owned()));
        self.write_result()
    }
}

impl TokenApi for FakeApi {
    async fn generate_token(&self, name: &str, device_id: &str) -> Result<TokenGrant, ErrorContext> {
        self.record(Call::GenerateToken { name: name.to_owned(), device_id: device_id.to_owned() });
        next(&self.grants, "token")
    }

    async fn token_profile(&self, token: &str) -> Result<TokenProfile, ErrorContext> {
        self.record(Call::Profile(token.to_owned()));
        self.profile.borrow_mut().take().unwrap_or_else(|| Err(anyhow!("no profile scripted")))
    }

    async fn bookmarked_categories(&self, token: &str) -> Result<Vec<Category>, ErrorContext> {
        self.record(Call::Bookmarks(token.to_owned()));
        self.bookmark_list.borrow_mut().take().unwrap_or_else(|| Err(anyhow!("no bookmarks scripted")))
    }

    async fn bookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext> {
        self.record(Call::Bookmark(token.to_owned(), category_id));
        self.write_result()?;
        self.server_bookmarks.borrow_mut().insert(category_id);
        Ok(self.bookmark_toggle(category_id))
    }

    async fn unbookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext> {
        self.record(Call::Unbookmark(token.to_owned(), category_id));
        self.write_result()?;
        self.server_bookmarks.borrow_mut().remove(&category_id);
        Ok(self.bookmark_toggle(category_id))
    }
}

// fixtures

pub fn reel(id: u64, likes: u64) -> Reel {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Reel {id}"),
        "stream_url": format!("https://cdn.palm-fm.cloud/reels/{id}.mp4"),
        "views_count": id * 10,
        "likes_count": likes,
        "is_published": true,
    })).unwrap()
}

/// A reel listing in the backend's array-wrapped meta format
pub fn reel_page(reels: Vec<Reel>, current: u64, last: u64) -> Paginated<Reel> {
    let raw: PaginatedRaw<Reel> = serde_json::from_value(json!({
        "data": reels,
        "links": { "first": "…?page=1", "last": null, "prev": null, "next": null },
        "meta": {
            "current_page": [current],
            "last_page": [last],
            "per_page": [12],
            "total": [last * 12],
            "from": [null],
            "to": [null],
        },
    })).unwrap();
    raw.normalize()
}

pub fn comment(id: u64, reel_id: u64, username: &str, text: &str) -> Comment {
    serde_json::from_value(json!({
        "id": id,
        "reel_id": reel_id,
        "username": username,
        "comment": text,
        "is_approved": true,
        "time_ago": "1 minute ago",
    })).unwrap()
}

pub fn comment_page(comments: Vec<Comment>, current: u64, last: u64) -> Paginated<Comment> {
    let raw: PaginatedRaw<Comment> = serde_json::from_value(json!({
        "data": comments,
        "meta": {
            "current_page": current,
            "last_page": last,
            "per_page": 10,
            "total": last * 10,
            "comments_count": [last * 10],
        },
    })).unwrap();
    raw.normalize()
}

pub fn category(id: u64) -> Category {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Category {id}"),
        "slug": format!("category-{id}"),
    })).unwrap()
}

pub fn grant(token: &str, name: &str, bookmarked: &[u64]) -> TokenGrant {
    TokenGrant {
        token: token.into(),
        name: name.into(),
        bookmarked_categories: bookmarked.iter().map(|id| category(*id)).collect(),
    }
}
