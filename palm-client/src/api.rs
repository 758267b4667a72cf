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

use std::time::Duration;

use chrono::NaiveDate;
use cloneable_errors::{bail, ErrorContext, ResContext};
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    constants::*,
    settings::Settings,
    types::*,
    utils::{ReqwestResponseExt, ReqwestUrlExt},
};

/// A paginated listing the API can be asked for
pub trait Endpoint {
    type Item: DeserializeOwned;

    fn create_url(&self, base_url: &Url) -> Url;
}

fn listing_url(base_url: &Url, segments: &[&str]) -> Url {
    base_url
        .join_segments(segments)
        .expect("base_url should be a valid base")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReelQuery {
    pub page: u64,
    pub per_page: usize,
    /// Free-text search, ignored when blank
    pub q: String,
    pub sort: ReelSort,
}

impl Default for ReelQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: REELS_PER_PAGE,
            q: String::new(),
            sort: ReelSort::default(),
        }
    }
}

impl Endpoint for ReelQuery {
    type Item = Reel;

    fn create_url(&self, base_url: &Url) -> Url {
        let mut url = listing_url(base_url, REELS_ENDPOINT);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &self.page.max(1).to_string())
                .append_pair("per_page", &self.per_page.to_string());
            let q = self.q.trim();
            if !q.is_empty() {
                query.append_pair("q", q);
            }
            if let Some(sort) = self.sort.query_value() {
                query.append_pair("sort", sort);
            }
        }
        url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentsQuery {
    pub reel_id: u64,
    pub page: u64,
    pub per_page: usize,
}

impl Endpoint for CommentsQuery {
    type Item = Comment;

    fn create_url(&self, base_url: &Url) -> Url {
        let mut url = listing_url(base_url, &["reels", &self.reel_id.to_string(), "comments"]);
        url.query_pairs_mut()
            .append_pair("page", &self.page.max(1).to_string())
            .append_pair("per_page", &self.per_page.to_string());
        url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u64,
    pub per_page: usize,
    pub q: String,
    pub sort: Option<NewsSort>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub featured: Option<bool>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: NEWS_PER_PAGE,
            q: String::new(),
            sort: None,
            category: None,
            date_from: None,
            date_to: None,
            featured: None,
        }
    }
}

impl Endpoint for NewsQuery {
    type Item = News;

    fn create_url(&self, base_url: &Url) -> Url {
        let mut url = listing_url(base_url, NEWS_ENDPOINT);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &self.page.max(1).to_string())
                .append_pair("per_page", &self.per_page.to_string());
            if let Some(ref category) = self.category {
                query.append_pair("category", category);
            }
            if let Some(date_from) = self.date_from {
                query.append_pair("date_from", &date_from.format("%Y-%m-%d").to_string());
            }
            if let Some(date_to) = self.date_to {
                query.append_pair("date_to", &date_to.format("%Y-%m-%d").to_string());
            }
            if let Some(featured) = self.featured {
                query.append_pair("featured", if featured { "true" } else { "false" });
            }
            let q = self.q.trim();
            if !q.is_empty() {
                query.append_pair("q", q);
            }
            if let Some(sort) = self.sort {
                query.append_pair("sort", <&str>::from(sort));
            }
        }
        url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowQuery {
    pub page: u64,
    pub per_page: usize,
    pub day: Option<DayOfWeek>,
    pub featured: Option<bool>,
}

impl Default for ShowQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: SHOWS_PER_PAGE,
            day: None,
            featured: None,
        }
    }
}

impl Endpoint for ShowQuery {
    type Item = Show;

    fn create_url(&self, base_url: &Url) -> Url {
        let mut url = listing_url(base_url, SHOWS_ENDPOINT);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &self.page.max(1).to_string())
                .append_pair("per_page", &self.per_page.to_string());
            if let Some(day) = self.day {
                query.append_pair("day", <&str>::from(day));
            }
            if let Some(featured) = self.featured {
                query.append_pair("featured", if featured { "true" } else { "false" });
            }
        }
        url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodesQuery {
    pub slug: String,
    pub page: u64,
    pub per_page: usize,
}

impl Endpoint for EpisodesQuery {
    type Item = ShowEpisode;

    fn create_url(&self, base_url: &Url) -> Url {
        let mut url = listing_url(base_url, &["shows", &self.slug, "episodes"]);
        url.query_pairs_mut()
            .append_pair("page", &self.page.max(1).to_string())
            .append_pair("per_page", &self.per_page.to_string());
        url
    }
}

/// Result of bookmarking or unbookmarking a category.
///
/// Membership is derived from the returned list rather than from any flag the
/// server sends along.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkToggle {
    pub is_bookmarked: bool,
    pub bookmarked_categories: Vec<u64>,
}

impl BookmarkToggle {
    pub fn from_change(category_id: u64, change: BookmarkChange) -> Self {
        Self {
            is_bookmarked: change.contains(category_id),
            bookmarked_categories: change.bookmarked_categories,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ReelsApi {
    async fn reels(&self, query: &ReelQuery) -> Result<Paginated<Reel>, ErrorContext>;
    async fn reel(&self, id: u64) -> Result<Reel, ErrorContext>;
    async fn reel_comments(&self, query: &CommentsQuery) -> Result<Paginated<Comment>, ErrorContext>;
    async fn post_comment(&self, reel_id: u64, request: &CommentRequest) -> Result<(), ErrorContext>;
    async fn like_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext>;
    async fn unlike_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext>;
}

#[allow(async_fn_in_trait)]
pub trait TokenApi {
    async fn generate_token(&self, name: &str, device_id: &str) -> Result<TokenGrant, ErrorContext>;
    async fn token_profile(&self, token: &str) -> Result<TokenProfile, ErrorContext>;
    async fn bookmarked_categories(&self, token: &str) -> Result<Vec<Category>, ErrorContext>;
    async fn bookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext>;
    async fn unbookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext>;
}

#[allow(async_fn_in_trait)]
pub trait ContentApi {
    async fn home(&self) -> Result<HomeData, ErrorContext>;
    async fn news(&self, query: &NewsQuery) -> Result<Paginated<News>, ErrorContext>;
    async fn news_item(&self, slug: &str) -> Result<News, ErrorContext>;
    async fn top_news(&self, limit: usize) -> Result<Vec<News>, ErrorContext>;
    async fn categories(&self) -> Result<Vec<Category>, ErrorContext>;
    async fn shows(&self, query: &ShowQuery) -> Result<Paginated<Show>, ErrorContext>;
    async fn show(&self, slug: &str) -> Result<Show, ErrorContext>;
    async fn shows_today(&self) -> Result<ShowsToday, ErrorContext>;
    async fn show_schedule(&self) -> Result<WeekSchedule, ErrorContext>;
    async fn show_episodes(&self, query: &EpisodesQuery) -> Result<Paginated<ShowEpisode>, ErrorContext>;
}

fn open_envelope<T>(envelope: Envelope<T>) -> Result<T, ErrorContext> {
    if !envelope.success {
        if let Some(message) = envelope.message {
            bail!("The API reported a failure: {message}",);
        }
        bail!("The API reported a failure without a message");
    }
    Ok(envelope.data)
}

/// [`ReelsApi`], [`TokenApi`] and [`ContentApi`] over HTTP
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ErrorContext> {
        let base_url = Url::parse(&settings.api_base_url)
            .with_context(|| format!("Invalid API base URL: '{}'", settings.api_base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("The API base URL '{base_url}' cannot have path segments appended to it",);
        }
        let timeout = Duration::try_from_secs_f64(settings.request_timeout_secs)
            .context("Invalid request timeout")?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build the HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Url {
        listing_url(&self.base_url, segments)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ErrorContext> {
        request
            .header("Accept", "application/json")
            .send()
            .await
            .context("API request failed")?
            .check_status()
            .await?
            .json::<T>()
            .await
            .context("Failed to deserialize API response")
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ErrorContext> {
        request
            .header("Accept", "application/json")
            .send()
            .await
            .context("API request failed")?
            .check_status()
            .await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ErrorContext> {
        debug!("GET {url}");
        self.send_json(self.client.get(url)).await
    }

    async fn get_with_token<T: DeserializeOwned>(&self, url: Url, token: &str) -> Result<T, ErrorContext> {
        debug!("GET {url} (with token)");
        self.send_json(self.client.get(url).header(PUBLIC_TOKEN_HEADER, token)).await
    }

    pub async fn fetch_page<E: Endpoint>(&self, endpoint: &E) -> Result<Paginated<E::Item>, ErrorContext> {
        let url = endpoint.create_url(&self.base_url);
        self.get::<PaginatedRaw<E::Item>>(url).await.map(PaginatedRaw::normalize)
    }

    async fn change_bookmark(&self, token: &str, category_id: u64, add: bool) -> Result<BookmarkToggle, ErrorContext> {
        let url = self.url(&["bookmarks", &category_id.to_string()]);
        debug!("{} {url}", if add { "POST" } else { "DELETE" });
        let request = if add { self.client.post(url) } else { self.client.delete(url) };
        let envelope: Envelope<BookmarkChange> = self.send_json(request.header(PUBLIC_TOKEN_HEADER, token)).await?;
        open_envelope(envelope).map(|change| BookmarkToggle::from_change(category_id, change))
    }
}

impl ReelsApi for ApiClient {
    async fn reels(&self, query: &ReelQuery) -> Result<Paginated<Reel>, ErrorContext> {
        self.fetch_page(query).await.context("Failed to fetch reels")
    }

    async fn reel(&self, id: u64) -> Result<Reel, ErrorContext> {
        self.get::<MaybeWrapped<Reel>>(self.url(&["reels", &id.to_string()]))
            .await
            .map(MaybeWrapped::into_inner)
            .with_context(|| format!("Failed to fetch reel {id}"))
    }

    async fn reel_comments(&self, query: &CommentsQuery) -> Result<Paginated<Comment>, ErrorContext> {
        self.fetch_page(query).await
            .with_context(|| format!("Failed to fetch comments of reel {}", query.reel_id))
    }

    async fn post_comment(&self, reel_id: u64, request: &CommentRequest) -> Result<(), ErrorContext> {
        let url = self.url(&["reels", &reel_id.to_string(), "comments"]);
        debug!("POST {url}");
        self.send_empty(self.client.post(url).json(request)).await
            .with_context(|| format!("Failed to post a comment on reel {reel_id}"))
    }

    async fn like_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext> {
        let url = self.url(&["reels", &reel_id.to_string(), "like"]);
        debug!("POST {url}");
        let body = LikeRequest { username: username.into() };
        self.send_empty(self.client.post(url).json(&body)).await
            .with_context(|| format!("Failed to like reel {reel_id}"))
    }

    async fn unlike_reel(&self, reel_id: u64, username: &str) -> Result<(), ErrorContext> {
        let url = self.url(&["reels", &reel_id.to_string(), "unlike"]);
        debug!("DELETE {url}");
        let body = LikeRequest { username: username.into() };
        self.send_empty(self.client.delete(url).json(&body)).await
            .with_context(|| format!("Failed to unlike reel {reel_id}"))
    }
}

impl TokenApi for ApiClient {
    async fn generate_token(&self, name: &str, device_id: &str) -> Result<TokenGrant, ErrorContext> {
        let url = self.url(TOKEN_ENDPOINT);
        debug!("POST {url}");
        let body = GenerateTokenRequest { name: name.into(), device_id: device_id.into() };
        let envelope: Envelope<TokenGrant> = self.send_json(self.client.post(url).json(&body)).await
            .context("Failed to generate token")?;
        open_envelope(envelope).context("Failed to generate token")
    }

    async fn token_profile(&self, token: &str) -> Result<TokenProfile, ErrorContext> {
        let envelope: Envelope<TokenProfile> = self.get_with_token(self.url(PROFILE_ENDPOINT), token).await
            .context("Failed to fetch token profile")?;
        open_envelope(envelope).context("Failed to fetch token profile")
    }

    async fn bookmarked_categories(&self, token: &str) -> Result<Vec<Category>, ErrorContext> {
        let envelope: Envelope<Vec<Category>> = self.get_with_token(self.url(BOOKMARKS_ENDPOINT), token).await
            .context("Failed to fetch bookmarked categories")?;
        open_envelope(envelope).context("Failed to fetch bookmarked categories")
    }

    async fn bookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext> {
        self.change_bookmark(token, category_id, true).await
            .with_context(|| format!("Failed to bookmark category {category_id}"))
    }

    async fn unbookmark_category(&self, token: &str, category_id: u64) -> Result<BookmarkToggle, ErrorContext> {
        self.change_bookmark(token, category_id, false).await
            .with_context(|| format!("Failed to unbookmark category {category_id}"))
    }
}

impl ContentApi for ApiClient {
    async fn home(&self) -> Result<HomeData, ErrorContext> {
        let envelope: Envelope<HomeData> = self.get(self.url(HOME_ENDPOINT)).await
            .context("Failed to fetch home data")?;
        open_envelope(envelope).context("Failed to fetch home data")
    }

    async fn news(&self, query: &NewsQuery) -> Result<Paginated<News>, ErrorContext> {
        self.fetch_page(query).await.context("Failed to fetch news list")
    }

    async fn news_item(&self, slug: &str) -> Result<News, ErrorContext> {
        self.get::<MaybeWrapped<News>>(self.url(&["news", slug]))
            .await
            .map(MaybeWrapped::into_inner)
            .with_context(|| format!("Failed to fetch news '{slug}'"))
    }

    async fn top_news(&self, limit: usize) -> Result<Vec<News>, ErrorContext> {
        let mut url = self.url(TOP_NEWS_ENDPOINT);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get::<MaybeWrapped<Vec<News>>>(url)
            .await
            .map(MaybeWrapped::into_inner)
            .context("Failed to fetch top news")
    }

    async fn categories(&self) -> Result<Vec<Category>, ErrorContext> {
        self.get::<MaybeWrapped<Vec<Category>>>(self.url(CATEGORIES_ENDPOINT))
            .await
            .map(MaybeWrapped::into_inner)
            .context("Failed to fetch categories")
    }

    async fn shows(&self, query: &ShowQuery) -> Result<Paginated<Show>, ErrorContext> {
        self.fetch_page(query).await.context("Failed to fetch shows")
    }

    async fn show(&self, slug: &str) -> Result<Show, ErrorContext> {
        self.get::<MaybeWrapped<Show>>(self.url(&["shows", slug]))
            .await
            .map(MaybeWrapped::into_inner)
            .with_context(|| format!("Failed to fetch show '{slug}'"))
    }

    async fn shows_today(&self) -> Result<ShowsToday, ErrorContext> {
        self.get(self.url(SHOWS_TODAY_ENDPOINT)).await
            .context("Failed to fetch today's shows")
    }

    async fn show_schedule(&self) -> Result<WeekSchedule, ErrorContext> {
        self.get::<MaybeWrapped<WeekSchedule>>(self.url(SHOWS_SCHEDULE_ENDPOINT))
            .await
            .map(MaybeWrapped::into_inner)
            .context("Failed to fetch the show schedule")
    }

    async fn show_episodes(&self, query: &EpisodesQuery) -> Result<Paginated<ShowEpisode>, ErrorContext> {
        self.fetch_page(query).await
            .with_context(|| format!("Failed to fetch episodes of show '{}'", query.slug))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn base() -> Url {
        Url::parse("https://api.palm-fm.cloud/api").unwrap()
    }

    #[test]
    fn reel_query_omits_defaults() {
        let url = ReelQuery::default().create_url(&base());
        assert_eq!(url.as_str(), "https://api.palm-fm.cloud/api/reels?page=1&per_page=12");
        let url = ReelQuery { page: 2, q: " قرآن ".to_owned(), sort: ReelSort::MostViewed, ..Default::default() }
            .create_url(&base());
        assert_eq!(url.path(), "/api/reels");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, [
            ("page".to_owned(), "2".to_owned()),
            ("per_page".to_owned(), "12".to_owned()),
            ("q".to_owned(), "قرآن".to_owned()),
            ("sort".to_owned(), "-views_count".to_owned()),
        ]);
    }

    #[test]
    fn comment_and_episode_urls() {
        let url = CommentsQuery { reel_id: 42, page: 3, per_page: COMMENTS_PER_PAGE }.create_url(&base());
        assert_eq!(url.as_str(), "https://api.palm-fm.cloud/api/reels/42/comments?page=3&per_page=10");
        let url = EpisodesQuery { slug: "morning show".to_owned(), page: 1, per_page: EPISODES_PER_PAGE }.create_url(&base());
        assert_eq!(url.as_str(), "https://api.palm-fm.cloud/api/shows/morning%20show/episodes?page=1&per_page=6");
    }

    #[test]
    fn news_filters() {
        let url = NewsQuery {
            category: Some("sport".to_owned()),
            date_from: NaiveDate::from_ymd_opt(2025, 1, 31),
            featured: Some(true),
            sort: Some(NewsSort::MostViewed),
            ..Default::default()
        }.create_url(&base());
        assert_eq!(
            url.as_str(),
            "https://api.palm-fm.cloud/api/news?page=1&per_page=12&category=sport&date_from=2025-01-31&featured=true&sort=-views_count",
        );
        let url = ShowQuery { day: Some(DayOfWeek::Friday), featured: Some(false), ..Default::default() }.create_url(&base());
        assert_eq!(url.as_str(), "https://api.palm-fm.cloud/api/shows?page=1&per_page=12&day=friday&featured=false");
    }

    #[test]
    fn bookmark_membership_comes_from_the_list() {
        let change: BookmarkChange = serde_json::from_str(
            r#"{"category": {"id": 3, "name": "Sport", "slug": "sport"}, "bookmarked_categories": [1, 2], "is_bookmarked": true}"#,
        ).unwrap();
        let toggle = BookmarkToggle::from_change(3, change);
        assert!(!toggle.is_bookmarked);
        assert_eq!(toggle.bookmarked_categories, vec![1, 2]);
    }

    #[test]
    fn client_rejects_unusable_base_urls() {
        let settings = Settings { api_base_url: "mailto:radio@palm-fm.cloud".to_owned(), ..Default::default() };
        assert_matches!(ApiClient::new(&settings), Err(_));
        let settings = Settings { api_base_url: "not a url".to_owned(), ..Default::default() };
        assert_matches!(ApiClient::new(&settings), Err(_));
        let settings = Settings { request_timeout_secs: -1., ..Default::default() };
        assert_matches!(ApiClient::new(&settings), Err(_));
        assert_matches!(ApiClient::new(&Settings::default()), Ok(_));
    }

    #[test]
    fn failed_envelopes_become_errors() {
        let envelope: Envelope<Vec<u64>> = serde_json::from_str(r#"{"success": false, "data": [], "message": "nope"}"#).unwrap();
        assert_matches!(open_envelope(envelope), Err(_));
        let envelope: Envelope<Vec<u64>> = serde_json::from_str(r#"{"data": [7]}"#).unwrap();
        assert_eq!(open_envelope(envelope).unwrap(), vec![7]);
    }
}
