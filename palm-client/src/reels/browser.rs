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

use std::collections::BTreeSet;

use log::{debug, info, warn};

use super::{Key, Message, Mode, PendingAction, Rejection, Request};
use crate::{
    api::{CommentsQuery, ReelQuery},
    feed::Feed,
    identity::IdentityStore,
    location::ReelsLocation,
    pagination::{page_items, PageItem},
    sequence::{RequestSequence, Ticket},
    settings::Settings,
    storage::Storage,
    types::{Comment, CommentRequest, PaginationMeta, Reel, ReelSort},
};

/// State behind the reel grid and its viewer.
///
/// Nothing in here touches the network. Every user intent returns the
/// [`Request`]s it needs; the caller executes them (see [`super::run`]) and
/// feeds the outcomes back in through [`ReelBrowser::update`].
pub struct ReelBrowser<S: Storage> {
    settings: Settings,
    identity: IdentityStore<S>,
    /// What the address bar shows. Mirrors the requested state,
    /// which can be ahead of the loaded data.
    location: ReelsLocation,
    mode: Mode,

    reels: Vec<Reel>,
    meta: Option<PaginationMeta>,
    loading: bool,
    list_sequence: RequestSequence,
    reel_sequence: RequestSequence,

    selected: Option<Reel>,
    comments: Feed<Comment>,
    posting_comment: bool,
    liked: BTreeSet<u64>,
    likes_in_flight: BTreeSet<u64>,

    prompt: Option<PendingAction>,
    identity_in_flight: bool,

    scroll_locked: bool,
    scroll_to_top: bool,
}

impl<S: Storage> ReelBrowser<S> {
    /// Hydrates the browser from a location, returning the initial fetches
    pub fn create(location: ReelsLocation, identity: IdentityStore<S>, settings: Settings) -> (Self, Vec<Request>) {
        let liked = identity.liked_reel_ids();
        let mut this = Self {
            settings,
            identity,
            location,
            mode: Mode::Browsing,

            reels: Vec::new(),
            meta: None,
            loading: false,
            list_sequence: RequestSequence::default(),
            reel_sequence: RequestSequence::default(),

            selected: None,
            comments: Feed::new("comments"),
            posting_comment: false,
            liked,
            likes_in_flight: BTreeSet::new(),

            prompt: None,
            identity_in_flight: false,

            scroll_locked: false,
            scroll_to_top: false,
        };
        let mut requests = vec![this.fetch_list()];
        if let Some(id) = this.location.reel {
            requests.push(Request::FetchReel { ticket: this.reel_sequence.issue(), id });
        }
        (this, requests)
    }

    fn fetch_list(&mut self) -> Request {
        self.loading = true;
        Request::FetchReels {
            ticket: self.list_sequence.issue(),
            query: ReelQuery {
                page: self.location.page,
                per_page: self.settings.reels_per_page.get(),
                q: self.location.q.clone(),
                sort: self.location.sort,
            },
        }
    }

    fn fetch_comments(&self, ticket: Ticket, reel_id: u64, page: u64) -> Request {
        Request::FetchComments {
            ticket,
            query: CommentsQuery {
                reel_id,
                page,
                per_page: self.settings.comments_per_page.get(),
            },
        }
    }

    fn select(&mut self, reel: Reel) -> Vec<Request> {
        let reel_id = reel.id;
        let comments_panel_open = matches!(self.mode, Mode::Viewing { comments_panel_open: true });
        self.location.reel = Some(reel_id);
        self.selected = Some(reel);
        self.mode = Mode::Viewing { comments_panel_open };
        self.scroll_locked = true;
        self.comments.reset();
        let (ticket, page) = self.comments.request_first();
        vec![self.fetch_comments(ticket, reel_id, page)]
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id()?;
        self.reels.iter().position(|reel| reel.id == id)
    }

    // navigation

    /// Opens the viewer on a reel. Reels missing from the loaded page are fetched first.
    pub fn open_reel(&mut self, id: u64) -> Vec<Request> {
        self.reel_sequence.invalidate();
        if let Some(reel) = self.reels.iter().find(|reel| reel.id == id).cloned() {
            self.select(reel)
        } else {
            debug!("Reel {id} is not on the loaded page, fetching it");
            self.location.reel = Some(id);
            vec![Request::FetchReel { ticket: self.reel_sequence.issue(), id }]
        }
    }

    /// Returns to the grid. Also drops an open identity prompt.
    pub fn close(&mut self) {
        self.reel_sequence.invalidate();
        self.comments.reset();
        self.selected = None;
        self.mode = Mode::Browsing;
        self.location.reel = None;
        self.scroll_locked = false;
        self.dismiss_prompt();
    }

    /// Moves to the next reel of the loaded page. Never crosses into another page.
    pub fn next(&mut self) -> Vec<Request> {
        match self.selected_index() {
            Some(index) if index + 1 < self.reels.len() => {
                let reel = self.reels[index + 1].clone();
                self.select(reel)
            },
            _ => Vec::new(),
        }
    }

    /// Moves to the previous reel of the loaded page. Never crosses into another page.
    pub fn previous(&mut self) -> Vec<Request> {
        match self.selected_index() {
            Some(index) if index > 0 => {
                let reel = self.reels[index - 1].clone();
                self.select(reel)
            },
            _ => Vec::new(),
        }
    }

    pub fn key(&mut self, key: Key) -> Vec<Request> {
        if self.prompt.is_some() {
            if key == Key::Escape {
                self.dismiss_prompt();
            }
            return Vec::new();
        }
        if self.mode == Mode::Browsing {
            return Vec::new();
        }
        // arrows follow reading direction
        let rtl = self.settings.locale.is_rtl();
        match key {
            Key::Escape => {
                self.close();
                Vec::new()
            },
            Key::Right | Key::Down => if rtl { self.previous() } else { self.next() },
            Key::Left | Key::Up => if rtl { self.next() } else { self.previous() },
        }
    }

    pub fn toggle_comments_panel(&mut self) {
        if let Mode::Viewing { ref mut comments_panel_open } = self.mode {
            *comments_panel_open = !*comments_panel_open;
        }
    }

    // listing

    pub fn submit_search(&mut self, q: &str) -> Vec<Request> {
        self.close();
        self.location.q = q.trim().to_owned();
        self.location.page = 1;
        vec![self.fetch_list()]
    }

    pub fn change_sort(&mut self, sort: ReelSort) -> Vec<Request> {
        if sort == self.location.sort {
            return Vec::new();
        }
        self.close();
        self.location.sort = sort;
        self.location.page = 1;
        vec![self.fetch_list()]
    }

    /// Loads another page of the grid. Only possible while browsing, and only
    /// within the last known page count.
    pub fn go_to_page(&mut self, page: u64) -> Vec<Request> {
        if self.mode != Mode::Browsing
            || page < 1
            || self.meta.as_ref().is_some_and(|meta| page > meta.last_page) {
            return Vec::new();
        }
        // a deep link still in flight must not open on top of the new page
        self.reel_sequence.invalidate();
        self.location.page = page;
        self.location.reel = None;
        self.scroll_to_top = true;
        vec![self.fetch_list()]
    }

    // comments, likes and the identity gate

    pub fn load_more_comments(&mut self) -> Vec<Request> {
        let Some(reel_id) = self.selected_id() else {
            return Vec::new();
        };
        match self.comments.request_next() {
            Some((ticket, page)) => vec![self.fetch_comments(ticket, reel_id, page)],
            None => Vec::new(),
        }
    }

    pub fn submit_comment(&mut self, text: &str) -> Result<Vec<Request>, Rejection> {
        let reel_id = self.selected_id().ok_or(Rejection::NoReelOpen)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejection::EmptyComment);
        }
        Ok(self.perform_or_prompt(PendingAction::Comment { reel_id, text: text.to_owned() }))
    }

    /// Likes the open reel, or unlikes it if it's already liked
    pub fn toggle_like(&mut self) -> Result<Vec<Request>, Rejection> {
        let reel_id = self.selected_id().ok_or(Rejection::NoReelOpen)?;
        Ok(self.perform_or_prompt(PendingAction::ToggleLike { reel_id }))
    }

    pub fn submit_identity(&mut self, name: &str) -> Result<Vec<Request>, Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        if self.identity_in_flight {
            return Ok(Vec::new());
        }
        self.identity_in_flight = true;
        Ok(vec![Request::CreateIdentity {
            name: name.to_owned(),
            device_id: self.identity.device_id(),
        }])
    }

    pub fn dismiss_prompt(&mut self) {
        if let Some(action) = self.prompt.take() {
            debug!("Identity prompt dismissed, dropping {action:?}");
        }
    }

    fn perform_or_prompt(&mut self, action: PendingAction) -> Vec<Request> {
        match self.identity.username() {
            Some(username) => self.perform(action, &username),
            None => {
                info!("A display name is needed before continuing");
                self.prompt = Some(action);
                Vec::new()
            },
        }
    }

    fn perform(&mut self, action: PendingAction, username: &str) -> Vec<Request> {
        match action {
            PendingAction::Comment { reel_id, text } => {
                self.posting_comment = true;
                vec![Request::PostComment {
                    reel_id,
                    request: CommentRequest { username: username.into(), comment: text.into() },
                }]
            },
            PendingAction::ToggleLike { reel_id } => {
                if !self.likes_in_flight.insert(reel_id) {
                    debug!("A like change for reel {reel_id} is already in flight");
                    return Vec::new();
                }
                let username = username.to_owned();
                if self.liked.contains(&reel_id) {
                    vec![Request::Unlike { reel_id, username }]
                } else {
                    vec![Request::Like { reel_id, username }]
                }
            },
        }
    }

    fn adjust_likes(&mut self, reel_id: u64, up: bool) {
        let adjust = |reel: &mut Reel| {
            reel.likes_count = if up { reel.likes_count.saturating_add(1) } else { reel.likes_count.saturating_sub(1) };
        };
        if let Some(reel) = self.selected.as_mut().filter(|reel| reel.id == reel_id) {
            adjust(reel);
        }
        if let Some(reel) = self.reels.iter_mut().find(|reel| reel.id == reel_id) {
            adjust(reel);
        }
    }

    pub fn update(&mut self, msg: Message) -> Vec<Request> {
        match msg {
            Message::ReelsLoaded { ticket, result } => {
                if !self.list_sequence.is_current(ticket) {
                    debug!("Dropping a stale reel list response");
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(page) => {
                        self.reels = page.data;
                        self.meta = Some(page.meta);
                    },
                    Err(err) => warn!("Failed to load reels: {err:?}"),
                }
                Vec::new()
            },
            Message::ReelLoaded { ticket, result } => {
                if !self.reel_sequence.is_current(ticket) {
                    debug!("Dropping a stale reel response");
                    return Vec::new();
                }
                match result {
                    Ok(reel) => self.select(reel),
                    Err(err) => {
                        warn!("Failed to load the linked reel: {err:?}");
                        self.location.reel = self.selected_id();
                        Vec::new()
                    },
                }
            },
            Message::CommentsLoaded { ticket, page, result } => {
                self.comments.apply(ticket, page, result);
                Vec::new()
            },
            Message::CommentPosted { reel_id, result } => {
                self.posting_comment = false;
                match result {
                    Ok(()) if self.selected_id() == Some(reel_id) => {
                        let (ticket, page) = self.comments.request_first();
                        vec![self.fetch_comments(ticket, reel_id, page)]
                    },
                    Ok(()) => Vec::new(),
                    Err(err) => {
                        warn!("Failed to post a comment on reel {reel_id}: {err:?}");
                        Vec::new()
                    },
                }
            },
            Message::LikeFinished { reel_id, liked, result } => {
                self.likes_in_flight.remove(&reel_id);
                if let Err(err) = result {
                    warn!("Failed to {} reel {reel_id}: {err:?}", if liked { "like" } else { "unlike" });
                    return Vec::new();
                }
                let changed = if liked { self.liked.insert(reel_id) } else { self.liked.remove(&reel_id) };
                if changed {
                    self.identity.save_liked_reel_ids(&self.liked);
                    self.adjust_likes(reel_id, liked);
                }
                Vec::new()
            },
            Message::IdentityCreated { result } => {
                self.identity_in_flight = false;
                let grant = match result {
                    Ok(grant) => grant,
                    Err(err) => {
                        warn!("Failed to create an identity: {err:?}");
                        return Vec::new();
                    },
                };
                self.identity.apply_grant(&grant);
                info!("Continuing as {}", grant.name);
                match self.prompt.take() {
                    Some(action) if !grant.name.trim().is_empty() => self.perform(action, &grant.name),
                    Some(action) => {
                        warn!("The granted identity has no usable name, dropping {action:?}");
                        Vec::new()
                    },
                    None => Vec::new(),
                }
            },
        }
    }

    // accessors

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn identity(&self) -> &IdentityStore<S> {
        &self.identity
    }

    pub fn location(&self) -> &ReelsLocation {
        &self.location
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&Reel> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected.as_ref().map(|reel| reel.id)
    }

    pub fn comments(&self) -> &Feed<Comment> {
        &self.comments
    }

    pub fn is_posting_comment(&self) -> bool {
        self.posting_comment
    }

    pub fn liked_reels(&self) -> &BTreeSet<u64> {
        &self.liked
    }

    pub fn is_liked(&self, reel_id: u64) -> bool {
        self.liked.contains(&reel_id)
    }

    pub fn is_like_pending(&self, reel_id: u64) -> bool {
        self.likes_in_flight.contains(&reel_id)
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.prompt.as_ref()
    }

    /// Whether the page behind the viewer should stop scrolling
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Returns true once after a page change asked for the viewport to return to the top
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    pub fn has_next_reel(&self) -> bool {
        self.selected_index().is_some_and(|index| index + 1 < self.reels.len())
    }

    pub fn has_previous_reel(&self) -> bool {
        self.selected_index().is_some_and(|index| index > 0)
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        self.meta.as_ref()
            .map(|meta| page_items(meta.current_page, meta.last_page))
            .unwrap_or_default()
    }

    pub fn can_go_previous_page(&self) -> bool {
        !self.loading && self.meta.as_ref().is_some_and(PaginationMeta::has_previous_page)
    }

    pub fn can_go_next_page(&self) -> bool {
        !self.loading && self.meta.as_ref().is_some_and(PaginationMeta::has_next_page)
    }

    /// A link that opens the selected reel directly
    pub fn share_url(&self) -> Option<String> {
        let reel = self.selected.as_ref()?;
        Some(format!(
            "{}/{}/reels?reel={}",
            self.settings.site_origin.trim_end_matches('/'),
            self.settings.locale,
            reel.id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cloneable_errors::anyhow;
    use serde_json::json;

    use crate::{
        identity::Fingerprint,
        locale::Locale,
        storage::MemoryStorage,
        types::{PaginatedRaw, TokenGrant},
    };

    use super::*;

    fn reel(id: u64, likes: u64) -> Reel {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Reel {id}"),
            "stream_url": format!("https://cdn.palm-fm.cloud/reels/{id}.mp4"),
            "likes_count": likes,
        })).unwrap()
    }

    fn listing(ids: &[u64], current: u64, last: u64) -> crate::types::Paginated<Reel> {
        let raw: PaginatedRaw<Reel> = serde_json::from_value(json!({
            "data": ids.iter().map(|id| reel(*id, 0)).collect::<Vec<_>>(),
            "meta": { "current_page": [current], "last_page": [last], "per_page": [12], "total": [last * 12] },
        })).unwrap();
        raw.normalize()
    }

    fn browser_with(location: ReelsLocation, settings: Settings) -> (ReelBrowser<MemoryStorage>, Vec<Request>) {
        let identity = IdentityStore::new(MemoryStorage::new(), Fingerprint::default());
        ReelBrowser::create(location, identity, settings)
    }

    fn list_ticket(requests: &[Request]) -> Ticket {
        match requests.first() {
            Some(Request::FetchReels { ticket, .. }) => *ticket,
            other => panic!("expected a reel list fetch, got {other:?}"),
        }
    }

    /// A browser that has loaded reels 1..=3 on page 1 of 3
    fn loaded(settings: Settings) -> ReelBrowser<MemoryStorage> {
        let (mut browser, requests) = browser_with(ReelsLocation::default(), settings);
        let ticket = list_ticket(&requests);
        browser.update(Message::ReelsLoaded { ticket, result: Ok(listing(&[1, 2, 3], 1, 3)) });
        browser
    }

    fn en() -> Settings {
        Settings { locale: Locale::En, ..Default::default() }
    }

    #[test]
    fn deep_link_opens_viewer_when_the_reel_arrives() {
        let location = ReelsLocation::from_query("sort=-likes_count&reel=9");
        let (mut browser, requests) = browser_with(location, Settings::default());
        assert_eq!(requests.len(), 2);
        assert_matches!(&requests[0], Request::FetchReels { query, .. } if query.sort == ReelSort::MostLiked && query.page == 1);
        let Request::FetchReel { ticket, id: 9 } = requests[1] else {
            panic!("expected a reel fetch, got {:?}", requests[1]);
        };
        assert!(browser.is_loading());
        assert_eq!(browser.mode(), Mode::Browsing);

        let follow_up = browser.update(Message::ReelLoaded { ticket, result: Ok(reel(9, 4)) });
        assert_matches!(browser.mode(), Mode::Viewing { comments_panel_open: false });
        assert!(browser.is_scroll_locked());
        assert_matches!(&follow_up[..], [Request::FetchComments { query, .. }] if query.reel_id == 9 && query.page == 1 && query.per_page == 10);
    }

    #[test]
    fn failed_deep_link_leaves_the_grid() {
        let (mut browser, requests) = browser_with(ReelsLocation::from_query("reel=9"), Settings::default());
        let Request::FetchReel { ticket, .. } = requests[1] else { panic!() };
        browser.update(Message::ReelLoaded { ticket, result: Err(anyhow!("404")) });
        assert_eq!(browser.mode(), Mode::Browsing);
        assert_eq!(browser.location().reel, None);
    }

    #[test]
    fn arrows_follow_reading_direction() {
        let mut browser = loaded(en());
        browser.open_reel(2);
        browser.key(Key::Right);
        assert_eq!(browser.selected_id(), Some(3));
        // last reel of the page, nothing past it
        assert!(browser.key(Key::Down).is_empty());
        assert_eq!(browser.selected_id(), Some(3));
        browser.key(Key::Left);
        browser.key(Key::Up);
        assert_eq!(browser.selected_id(), Some(1));
        assert!(!browser.has_previous_reel());

        let mut browser = loaded(Settings::default());
        browser.open_reel(2);
        browser.key(Key::Right);
        assert_eq!(browser.selected_id(), Some(1));
        browser.key(Key::Left);
        assert_eq!(browser.selected_id(), Some(2));
        assert_eq!(browser.location().reel, Some(2));
    }

    #[test]
    fn escape_closes_the_viewer() {
        let mut browser = loaded(en());
        browser.open_reel(1);
        browser.toggle_comments_panel();
        assert_matches!(browser.mode(), Mode::Viewing { comments_panel_open: true });
        browser.key(Key::Escape);
        assert_eq!(browser.mode(), Mode::Browsing);
        assert!(!browser.is_scroll_locked());
        assert_eq!(browser.location().reel, None);
        assert!(browser.comments().items().is_empty());
    }

    #[test]
    fn stale_list_responses_are_dropped() {
        let mut browser = loaded(en());
        let slow = list_ticket(&browser.change_sort(ReelSort::Oldest));
        let fast = list_ticket(&browser.change_sort(ReelSort::MostViewed));
        browser.update(Message::ReelsLoaded { ticket: fast, result: Ok(listing(&[7, 8], 1, 1)) });
        browser.update(Message::ReelsLoaded { ticket: slow, result: Ok(listing(&[4, 5, 6], 1, 1)) });
        assert_eq!(browser.reels().iter().map(|r| r.id).collect::<Vec<_>>(), [7, 8]);
        assert!(!browser.is_loading());
    }

    #[test]
    fn page_changes_stay_in_bounds() {
        let mut browser = loaded(en());
        assert!(browser.go_to_page(0).is_empty());
        assert!(browser.go_to_page(4).is_empty());
        let requests = browser.go_to_page(3);
        assert_matches!(&requests[..], [Request::FetchReels { query, .. }] if query.page == 3);
        assert!(browser.take_scroll_to_top());
        assert!(!browser.take_scroll_to_top());
        assert!(!browser.can_go_next_page());
        assert_eq!(browser.location().page, 3);

        let mut browser = loaded(en());
        browser.open_reel(1);
        assert!(browser.go_to_page(2).is_empty());
        assert_eq!(browser.location().page, 1);
    }

    fn reel_ticket(requests: &[Request]) -> Ticket {
        match requests.iter().find(|request| matches!(request, Request::FetchReel { .. })) {
            Some(Request::FetchReel { ticket, .. }) => *ticket,
            other => panic!("expected a single reel fetch, got {other:?}"),
        }
    }

    #[test]
    fn page_change_drops_a_pending_deep_link() {
        let (mut browser, requests) = browser_with(ReelsLocation::from_query("reel=9"), en());
        let list = list_ticket(&requests);
        let linked = reel_ticket(&requests);
        browser.update(Message::ReelsLoaded { ticket: list, result: Ok(listing(&[1, 2, 3], 1, 3)) });

        assert_eq!(browser.go_to_page(2).len(), 1);
        assert_eq!(browser.location().reel, None);

        assert!(browser.update(Message::ReelLoaded { ticket: linked, result: Ok(reel(9, 0)) }).is_empty());
        assert_eq!(browser.mode(), Mode::Browsing);
        assert_eq!(browser.selected_id(), None);
        assert_eq!(browser.location().reel, None);
        assert_eq!(browser.location().page, 2);
        assert!(!browser.is_scroll_locked());
    }

    #[test]
    fn closing_drops_a_pending_deep_link() {
        let (mut browser, requests) = browser_with(ReelsLocation::from_query("q=news&reel=9"), en());
        let linked = reel_ticket(&requests);
        browser.close();
        assert_eq!(browser.location().reel, None);

        assert!(browser.update(Message::ReelLoaded { ticket: linked, result: Ok(reel(9, 0)) }).is_empty());
        assert_eq!(browser.mode(), Mode::Browsing);
        assert_eq!(browser.selected_id(), None);
        assert_eq!(browser.location().reel, None);
        assert_eq!(browser.location().q, "news");
    }

    #[test]
    fn same_sort_is_a_no_op() {
        let mut browser = loaded(en());
        assert!(browser.change_sort(ReelSort::Newest).is_empty());
        browser.open_reel(2);
        assert_eq!(browser.change_sort(ReelSort::MostLiked).len(), 1);
        assert_eq!(browser.mode(), Mode::Browsing);
        assert_eq!(browser.location().reel, None);
        assert_eq!(browser.location().sort, ReelSort::MostLiked);
    }

    #[test]
    fn blank_input_is_rejected_locally() {
        let mut browser = loaded(en());
        assert_eq!(browser.submit_comment("hi"), Err(Rejection::NoReelOpen));
        assert_eq!(browser.toggle_like(), Err(Rejection::NoReelOpen));
        browser.open_reel(1);
        assert_eq!(browser.submit_comment("  \n"), Err(Rejection::EmptyComment));
        assert_eq!(browser.submit_identity(" "), Err(Rejection::EmptyName));
        assert!(!browser.prompt_open());
    }

    #[test]
    fn escape_dismisses_the_prompt_first() {
        let mut browser = loaded(en());
        browser.open_reel(1);
        assert_eq!(browser.toggle_like(), Ok(Vec::new()));
        assert_eq!(browser.pending_action(), Some(&PendingAction::ToggleLike { reel_id: 1 }));
        browser.key(Key::Escape);
        assert!(!browser.prompt_open());
        assert_matches!(browser.mode(), Mode::Viewing { .. });
    }

    #[test]
    fn identity_replays_a_pending_like() {
        let mut browser = loaded(en());
        browser.open_reel(2);
        browser.toggle_like().unwrap();
        let requests = browser.submit_identity(" Sam ").unwrap();
        assert_matches!(&requests[..], [Request::CreateIdentity { name, .. }] if name == "Sam");
        // a second submit while the first is in flight does nothing
        assert_eq!(browser.submit_identity("Sam"), Ok(Vec::new()));

        let grant = TokenGrant { token: "abc".into(), name: "Sam".into(), bookmarked_categories: Vec::new() };
        let requests = browser.update(Message::IdentityCreated { result: Ok(grant) });
        assert_eq!(requests, [Request::Like { reel_id: 2, username: "Sam".to_owned() }]);
        assert!(!browser.prompt_open());
        assert!(browser.identity().is_authenticated());
    }

    #[test]
    fn failed_identity_keeps_the_prompt() {
        let mut browser = loaded(en());
        browser.open_reel(2);
        browser.submit_comment("Hello").unwrap();
        browser.submit_identity("Sam").unwrap();
        assert!(browser.update(Message::IdentityCreated { result: Err(anyhow!("offline")) }).is_empty());
        assert!(browser.prompt_open());
        assert_eq!(browser.submit_identity("Sam").map(|r| r.len()), Ok(1));
    }

    #[test]
    fn unlike_saturates_and_guards_in_flight() {
        let identity = IdentityStore::new(MemoryStorage::new(), Fingerprint::default());
        identity.save_username("Sam");
        identity.add_liked_reel(1);
        let (mut browser, requests) = ReelBrowser::create(ReelsLocation::default(), identity, en());
        browser.update(Message::ReelsLoaded { ticket: list_ticket(&requests), result: Ok(listing(&[1, 2], 1, 1)) });
        browser.open_reel(1);
        assert_eq!(browser.toggle_like().unwrap(), [Request::Unlike { reel_id: 1, username: "Sam".to_owned() }]);
        assert!(browser.is_like_pending(1));
        assert_eq!(browser.toggle_like(), Ok(Vec::new()));
        browser.update(Message::LikeFinished { reel_id: 1, liked: false, result: Ok(()) });
        // the server's count was already zero
        assert_eq!(browser.selected().map(|r| r.likes_count), Some(0));
        assert_eq!(browser.reels()[0].likes_count, 0);
        assert!(!browser.identity().is_reel_liked(1));
        assert!(!browser.is_like_pending(1));

        browser.toggle_like().unwrap();
        browser.update(Message::LikeFinished { reel_id: 1, liked: true, result: Err(anyhow!("500")) });
        assert!(!browser.is_liked(1));
        assert_eq!(browser.reels()[0].likes_count, 0);
    }

    #[test]
    fn share_links_point_at_the_reel() {
        let mut browser = loaded(Settings { site_origin: "https://palm-fm.cloud/".to_owned(), ..Default::default() });
        assert_eq!(browser.share_url(), None);
        browser.open_reel(3);
        assert_eq!(browser.share_url().as_deref(), Some("https://palm-fm.cloud/ar/reels?reel=3"));
    }
}
