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

mod browser;
mod driver;

use std::{error::Error, fmt::Display};

use cloneable_errors::ErrorContext;

use crate::{api::{CommentsQuery, ReelQuery}, sequence::Ticket, types::{Comment, CommentRequest, Paginated, Reel, TokenGrant}};

pub use browser::ReelBrowser;
pub use driver::run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Viewing {
        /// The collapsible comment panel used on narrow screens
        comments_panel_open: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// An action that was blocked on a missing display name, replayed once one exists
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Comment { reel_id: u64, text: String },
    ToggleLike { reel_id: u64 },
}

/// Work the browser wants done. Fetches carry the ticket their response must present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    FetchReels { ticket: Ticket, query: ReelQuery },
    FetchReel { ticket: Ticket, id: u64 },
    FetchComments { ticket: Ticket, query: CommentsQuery },
    PostComment { reel_id: u64, request: CommentRequest },
    Like { reel_id: u64, username: String },
    Unlike { reel_id: u64, username: String },
    CreateIdentity { name: String, device_id: String },
}

#[derive(Debug)]
pub enum Message {
    ReelsLoaded {
        ticket: Ticket,
        result: Result<Paginated<Reel>, ErrorContext>,
    },
    ReelLoaded {
        ticket: Ticket,
        result: Result<Reel, ErrorContext>,
    },
    CommentsLoaded {
        ticket: Ticket,
        page: u64,
        result: Result<Paginated<Comment>, ErrorContext>,
    },
    CommentPosted {
        reel_id: u64,
        result: Result<(), ErrorContext>,
    },
    LikeFinished {
        reel_id: u64,
        liked: bool,
        result: Result<(), ErrorContext>,
    },
    IdentityCreated {
        result: Result<TokenGrant, ErrorContext>,
    },
}

/// Input refused before anything was sent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    EmptyComment,
    EmptyName,
    NoReelOpen,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::EmptyComment => write!(f, "The comment is empty"),
            Rejection::EmptyName => write!(f, "The name is empty"),
            Rejection::NoReelOpen => write!(f, "No reel is open"),
        }
    }
}

impl Error for Rejection {}
