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

use std::{path::PathBuf, rc::Rc};

use chrono::Utc;
use clap::{Parser, Subcommand};
use cloneable_errors::{bail, ErrorContext, ResContext};
use env_logger::Env;
use log::info;
use palm_client::{
    api::{ContentApi, EpisodesQuery, NewsQuery, ShowQuery},
    bookmarks::{BookmarkFlow, BookmarkOutcome},
    constants::*,
    identity::{Fingerprint, IdentityStore},
    location::ReelsLocation,
    reels::{run, ReelBrowser, Request},
    session::Session,
    storage::{FileStorage, Storage},
    types::{DayOfWeek, NewsSort, ReelSort},
    utils::RenderNumber,
    ApiClient,
};
use strum::VariantArray;

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(name = "palm-reels", version, about = "Browse Palm FM reels, news and shows from a terminal")]
struct Args {
    /// Configuration file, created with defaults if missing
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
    /// Display name to register with if an action needs an identity
    #[arg(long, global = true)]
    name: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List reels
    Reels {
        #[arg(long, default_value = "")]
        q: String,
        /// One of -created_at, created_at, -views_count, -likes_count
        #[arg(long, allow_hyphen_values = true, default_value = "-created_at")]
        sort: ReelSort,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Show a reel with its first page of comments
    Open { id: u64 },
    /// List a reel's comments
    Comments {
        id: u64,
        #[arg(long, default_value_t = 1)]
        pages: u64,
    },
    /// Comment on a reel
    Comment { id: u64, text: String },
    Like { id: u64 },
    Unlike { id: u64 },
    /// Print the stored identity, refreshed from the server
    Whoami,
    /// Register a display name for this device
    Login { display_name: String },
    /// Bookmark a news category, or remove the bookmark if it's already set
    Bookmark { category: u64 },
    /// Top stories, breaking news and the newest items per category
    Home,
    /// List the news categories
    Categories,
    News {
        #[arg(long, default_value = "")]
        q: String,
        /// Category slug
        #[arg(long)]
        category: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<NewsSort>,
        #[arg(long)]
        featured: bool,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Read a single news item
    Article { slug: String },
    /// The most read news
    Top {
        #[arg(long, default_value_t = TOP_NEWS_LIMIT)]
        limit: usize,
    },
    Shows {
        #[arg(long)]
        day: Option<DayOfWeek>,
        #[arg(long)]
        featured: bool,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Details of a single show
    Show { slug: String },
    /// Shows airing today
    Today,
    /// The weekly schedule
    Schedule,
    Episodes {
        slug: String,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

struct App {
    api: ApiClient,
    storage: Rc<FileStorage>,
    settings: palm_client::Settings,
    name: Option<String>,
}

impl App {
    fn identity(&self) -> IdentityStore<Rc<FileStorage>> {
        let fingerprint = Fingerprint { user_agent: USER_AGENT.to_owned(), screen: None };
        IdentityStore::new(Rc::clone(&self.storage), fingerprint)
    }

    fn browser(&self, location: ReelsLocation) -> (ReelBrowser<Rc<FileStorage>>, Vec<Request>) {
        ReelBrowser::create(location, self.identity(), self.settings.clone())
    }

    /// Runs `requests`, answering the identity prompt with `--name` if one comes up
    async fn drive<S: Storage>(&self, browser: &mut ReelBrowser<S>, requests: Vec<Request>) -> Result<(), ErrorContext> {
        run(browser, &self.api, requests).await;
        if !browser.prompt_open() {
            return Ok(());
        }
        let Some(name) = self.name.as_deref() else {
            browser.dismiss_prompt();
            bail!("This needs a display name first, pass one with --name");
        };
        let requests = browser.submit_identity(name).context("Invalid display name")?;
        run(browser, &self.api, requests).await;
        if browser.prompt_open() {
            bail!("Failed to register a display name");
        }
        Ok(())
    }

    async fn open(&self, id: u64) -> Result<ReelBrowser<Rc<FileStorage>>, ErrorContext> {
        let (mut browser, requests) = self.browser(ReelsLocation { reel: Some(id), ..ReelsLocation::default() });
        self.drive(&mut browser, requests).await?;
        if browser.selected_id() != Some(id) {
            bail!("Reel {id} could not be loaded",);
        }
        Ok(browser)
    }

    fn print_comments<S: Storage>(&self, browser: &ReelBrowser<S>) {
        let locale = self.settings.locale;
        let now = Utc::now();
        let comments = browser.comments();
        match comments.meta() {
            Some(meta) => println!("Comments ({}):", meta.comments_count.unwrap_or(meta.total).render_int(locale)),
            None => println!("Comments:"),
        }
        if comments.items().is_empty() {
            println!("  (none yet)");
        }
        for comment in comments.items() {
            println!("{}", render::comment_line(comment, now, locale));
        }
    }

    async fn set_like(&self, id: u64, like: bool) -> Result<(), ErrorContext> {
        let mut browser = self.open(id).await?;
        if browser.is_liked(id) == like {
            println!("Reel {id} is already {}", if like { "liked" } else { "not liked" });
            return Ok(());
        }
        let requests = browser.toggle_like().context("Failed to toggle the like")?;
        self.drive(&mut browser, requests).await?;
        if browser.is_liked(id) != like {
            bail!("The server did not accept the change, see the log for details");
        }
        if let Some(reel) = browser.selected() {
            println!("{}", render::reel_line(reel, like, self.settings.locale));
        }
        Ok(())
    }

    async fn execute(&self, command: Command) -> Result<(), ErrorContext> {
        let locale = self.settings.locale;
        let now = Utc::now();
        match command {
            Command::Reels { q, sort, page } => {
                let (mut browser, requests) = self.browser(ReelsLocation::listing(&q, sort, page));
                self.drive(&mut browser, requests).await?;
                if browser.meta().is_none() {
                    bail!("Failed to load reels, see the log for details");
                }
                for reel in browser.reels() {
                    println!("{}", render::reel_line(reel, browser.is_liked(reel.id), locale));
                }
                if let Some(meta) = browser.meta() {
                    println!("\n{} reels  {}", meta.total.render_int(locale), render::page_bar(&browser.page_items(), meta.current_page, locale));
                }
                println!("{}{}", self.settings.site_origin.trim_end_matches('/'), browser.location().to_path(locale));
            },
            Command::Open { id } => {
                let browser = self.open(id).await?;
                if let Some(reel) = browser.selected() {
                    println!("{}", render::reel_details(reel, browser.is_liked(id), now, locale));
                }
                if let Some(url) = browser.share_url() {
                    println!("    share: {url}");
                }
                println!();
                self.print_comments(&browser);
            },
            Command::Comments { id, pages } => {
                let mut browser = self.open(id).await?;
                for _ in 1..pages {
                    if !browser.comments().has_more() {
                        break;
                    }
                    let requests = browser.load_more_comments();
                    self.drive(&mut browser, requests).await?;
                }
                self.print_comments(&browser);
            },
            Command::Comment { id, text } => {
                let mut browser = self.open(id).await?;
                let requests = browser.submit_comment(&text).context("Comment rejected")?;
                self.drive(&mut browser, requests).await?;
                self.print_comments(&browser);
            },
            Command::Like { id } => self.set_like(id, true).await?,
            Command::Unlike { id } => self.set_like(id, false).await?,
            Command::Whoami => {
                let session = Session::new(self.identity());
                session.refresh(&self.api).await;
                let identity = session.identity();
                println!("stored in: {}", self.storage.path().display());
                println!("device:   {}", identity.device_id());
                println!("name:     {}", identity.username().as_deref().unwrap_or("(none)"));
                println!("token:    {}", if identity.token().is_some() { "yes" } else { "no" });
                println!("bookmarks: {:?}", identity.bookmarked_category_ids());
                println!("liked:    {:?}", identity.liked_reel_ids());
            },
            Command::Login { display_name } => {
                let session = Session::new(self.identity());
                let grant = session.create_identity(&self.api, &display_name).await?;
                println!("Registered as {}", grant.name);
            },
            Command::Bookmark { category } => {
                let mut flow = BookmarkFlow::new(self.identity());
                let mut outcome = flow.toggle(&self.api, category).await;
                if outcome == BookmarkOutcome::IdentityRequired {
                    let Some(name) = self.name.as_deref() else {
                        flow.dismiss();
                        bail!("Bookmarking needs a display name first, pass one with --name");
                    };
                    let grant = Session::new(self.identity()).create_identity(&self.api, name).await?;
                    outcome = flow.identity_created(&self.api, &grant).await.unwrap_or(BookmarkOutcome::Failed);
                }
                match outcome {
                    BookmarkOutcome::Changed(toggle) if toggle.is_bookmarked => println!("Bookmarked category {category}"),
                    BookmarkOutcome::Changed(_) => println!("Removed the bookmark on category {category}"),
                    BookmarkOutcome::IdentityRequired | BookmarkOutcome::Failed => {
                        bail!("Failed to change the bookmark, see the log for details");
                    },
                }
            },
            Command::Home => {
                let home = self.api.home().await?;
                let sections = [("Top stories", &home.top_news), ("Breaking", &home.breaking_news)];
                for (title, items) in sections {
                    if items.is_empty() {
                        continue;
                    }
                    println!("{title}:");
                    for item in items {
                        println!("{}", render::news_line(item, now, locale));
                    }
                    println!();
                }
                for category in &home.categories {
                    println!("{} (#{}):", category.name, category.id);
                    for item in &category.news {
                        println!("{}", render::news_line(item, now, locale));
                    }
                    println!();
                }
            },
            Command::Categories => {
                let identity = self.identity();
                for category in self.api.categories().await? {
                    let mark = if identity.is_category_bookmarked(category.id) { '*' } else { ' ' };
                    println!("{mark} #{}  {}  ({} news)", category.id, category.name, category.news_count.render_int(locale));
                }
            },
            Command::News { q, category, sort, featured, page } => {
                let query = NewsQuery {
                    page,
                    per_page: NEWS_PER_PAGE,
                    q,
                    sort,
                    category,
                    featured: featured.then_some(true),
                    ..NewsQuery::default()
                };
                let news = self.api.news(&query).await?;
                for item in &news.data {
                    println!("{}", render::news_line(item, now, locale));
                }
                println!("\n{}", render::page_bar(&palm_client::pagination::page_items(news.meta.current_page, news.meta.last_page), news.meta.current_page, locale));
            },
            Command::Article { slug } => {
                let news = self.api.news_item(&slug).await?;
                println!("{}", render::news_details(&news, now, locale));
                println!("\n{}/{locale}/news/{}", self.settings.site_origin.trim_end_matches('/'), news.slug);
            },
            Command::Top { limit } => {
                for item in &self.api.top_news(limit).await? {
                    println!("{}", render::news_line(item, now, locale));
                }
            },
            Command::Shows { day, featured, page } => {
                let query = ShowQuery { page, per_page: SHOWS_PER_PAGE, day, featured: featured.then_some(true) };
                let shows = self.api.shows(&query).await?;
                for show in &shows.data {
                    println!("{}", render::show_line(show));
                }
            },
            Command::Show { slug } => {
                let show = self.api.show(&slug).await?;
                println!("{}", render::show_details(&show));
                println!("    {}/{locale}/shows/{}", self.settings.site_origin.trim_end_matches('/'), show.slug);
            },
            Command::Today => {
                let today = self.api.shows_today().await?;
                let day: &'static str = today.meta.day.into();
                println!("{day} {}", today.meta.date);
                for show in &today.data {
                    println!("{}", render::show_line(show));
                }
            },
            Command::Schedule => {
                let schedule = self.api.show_schedule().await?;
                for &day in DayOfWeek::VARIANTS {
                    let name: &'static str = day.into();
                    println!("{name}:");
                    for show in schedule.day(day) {
                        println!("{}", render::show_line(show));
                    }
                }
            },
            Command::Episodes { slug, page } => {
                let query = EpisodesQuery { slug, page, per_page: self.settings.episodes_per_page.get() };
                let episodes = self.api.show_episodes(&query).await?;
                for episode in &episodes.data {
                    println!("{}", render::episode_line(episode, now, locale));
                }
            },
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ErrorContext> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let config = config::load_or_create(&args.config)?;
    let app = App {
        api: ApiClient::new(&config.client)?,
        storage: Rc::new(FileStorage::open(&config.identity_path)),
        settings: config.client,
        name: args.name,
    };
    info!("Using {} as the API", app.api.base_url());

    // a login replaces whatever identity we had, no point refreshing it first
    if !matches!(args.command, Command::Login { .. } | Command::Whoami) {
        Session::new(app.identity()).refresh(&app.api).await;
    }
    app.execute(args.command).await
}
