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

use futures::future::join_all;
use log::debug;

use super::{Message, ReelBrowser, Request};
use crate::{api::{ReelsApi, TokenApi}, storage::Storage};

impl Request {
    pub async fn execute<A: ReelsApi + TokenApi>(self, api: &A) -> Message {
        match self {
            Request::FetchReels { ticket, query } => Message::ReelsLoaded {
                ticket,
                result: api.reels(&query).await,
            },
            Request::FetchReel { ticket, id } => Message::ReelLoaded {
                ticket,
                result: api.reel(id).await,
            },
            Request::FetchComments { ticket, query } => Message::CommentsLoaded {
                ticket,
                page: query.page,
                result: api.reel_comments(&query).await,
            },
            Request::PostComment { reel_id, request } => Message::CommentPosted {
                reel_id,
                result: api.post_comment(reel_id, &request).await,
            },
            Request::Like { reel_id, username } => Message::LikeFinished {
                reel_id,
                liked: true,
                result: api.like_reel(reel_id, &username).await,
            },
            Request::Unlike { reel_id, username } => Message::LikeFinished {
                reel_id,
                liked: false,
                result: api.unlike_reel(reel_id, &username).await,
            },
            Request::CreateIdentity { name, device_id } => Message::IdentityCreated {
                result: api.generate_token(&name, &device_id).await,
            },
        }
    }
}

/// Executes requests until the browser stops asking for more.
///
/// Requests issued together run concurrently, and their outcomes are applied
/// in the order they were issued.
pub async fn run<S: Storage, A: ReelsApi + TokenApi>(browser: &mut ReelBrowser<S>, api: &A, requests: Vec<Request>) {
    let mut queue = requests;
    while !queue.is_empty() {
        debug!("Executing {} request(s)", queue.len());
        let batch = std::mem::take(&mut queue);
        let messages = join_all(batch.into_iter().map(|request| request.execute(api))).await;
        queue = messages.into_iter()
            .flat_map(|msg| browser.update(msg))
            .collect();
    }
}
