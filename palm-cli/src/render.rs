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

use chrono::{DateTime, Utc};
use palm_client::{
    pagination::PageItem,
    types::{Comment, News, Reel, Show, ShowEpisode},
    utils::{parse_timestamp, render_relative_time, RenderNumber},
    Locale,
};

/// Renders a server timestamp relative to `now`, or passes it through untouched if it doesn't parse
pub fn when(timestamp: Option<&str>, now: DateTime<Utc>, locale: Locale) -> String {
    match timestamp {
        Some(value) => match parse_timestamp(value) {
            Some(then) => render_relative_time(then, now, locale),
            None => value.to_owned(),
        },
        None => String::new(),
    }
}

pub fn reel_line(reel: &Reel, liked: bool, locale: Locale) -> String {
    format!(
        "{heart} #{id}  {title}  ({views} views, {likes} likes{duration})",
        heart = if liked { '♥' } else { ' ' },
        id = reel.id,
        title = reel.title,
        views = reel.views_count.abbreviate_int(locale),
        likes = reel.likes_count.abbreviate_int(locale),
        duration = reel.duration_formatted.as_deref().map(|d| format!(", {d}")).unwrap_or_default(),
    )
}

pub fn reel_details(reel: &Reel, liked: bool, now: DateTime<Utc>, locale: Locale) -> String {
    let mut lines = vec![reel_line(reel, liked, locale)];
    if let Some(description) = reel.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!("    {}", description.trim()));
    }
    if let Some(author) = &reel.author {
        lines.push(format!("    by {}", author.name));
    }
    if reel.created_at.is_some() {
        lines.push(format!("    posted {}", when(reel.created_at.as_deref(), now, locale)));
    }
    lines.push(format!("    stream: {}", reel.stream_url));
    lines.join("\n")
}

pub fn comment_line(comment: &Comment, now: DateTime<Utc>, locale: Locale) -> String {
    // prefer our own rendering, the server's label is only a fallback
    let time = match comment.created_at.as_deref().and_then(parse_timestamp) {
        Some(then) => render_relative_time(then, now, locale),
        None => comment.time_ago.as_deref().unwrap_or_default().to_owned(),
    };
    format!("  {}  [{time}]\n    {}", comment.username, comment.comment)
}

pub fn news_line(news: &News, now: DateTime<Utc>, locale: Locale) -> String {
    format!(
        "{star} {title}  [{category}{time}] ({views} views)\n    {slug}",
        star = if news.is_featured { '*' } else { ' ' },
        title = news.title,
        category = news.category.as_ref().map(|c| format!("{} | ", c.name)).unwrap_or_default(),
        time = when(news.published_at.as_deref(), now, locale),
        views = news.views_count.abbreviate_int(locale),
        slug = news.slug,
    )
}

pub fn news_details(news: &News, now: DateTime<Utc>, locale: Locale) -> String {
    let mut lines = vec![news_line(news, now, locale)];
    if let Some(author) = &news.author {
        lines.push(format!("    by {}", author.name));
    }
    for text in [&news.description, &news.content].into_iter().flatten() {
        let text = text.trim();
        if !text.is_empty() {
            lines.push(String::new());
            lines.push(text.to_owned());
        }
    }
    lines.join("\n")
}

pub fn show_details(show: &Show) -> String {
    let mut lines = vec![show_line(show)];
    if let Some(about) = show.about.as_deref().map(str::trim).filter(|about| !about.is_empty()) {
        lines.push(format!("    {about}"));
    }
    if let Some(url) = &show.stream_url {
        lines.push(format!("    listen: {url}"));
    }
    let contacts = &show.contacts;
    let labelled = [
        ("phone", &contacts.phone),
        ("email", &contacts.email),
        ("website", &contacts.website),
        ("facebook", &contacts.facebook),
        ("instagram", &contacts.instagram),
        ("twitter", &contacts.twitter),
        ("whatsapp", &contacts.whatsapp),
        ("telegram", &contacts.telegram),
        ("viber", &contacts.viber),
    ];
    for (label, value) in labelled {
        if let Some(value) = value {
            lines.push(format!("    {label}: {value}"));
        }
    }
    lines.extend(contacts.other.iter().map(|other| format!("    {other}")));
    lines.join("\n")
}

pub fn show_line(show: &Show) -> String {
    let slots = show.schedule.iter()
        .filter_map(|slot| slot.human_readable.as_deref().or(slot.stream_time.as_deref()))
        .collect::<Vec<_>>()
        .join("; ");
    let mut line = format!("{} {}  ({})", if show.is_featured { '*' } else { ' ' }, show.title, show.slug);
    if !slots.is_empty() {
        line.push_str("\n    ");
        line.push_str(&slots);
    }
    line
}

pub fn episode_line(episode: &ShowEpisode, now: DateTime<Utc>, locale: Locale) -> String {
    let number = episode.episode_number.map(|n| format!("#{} ", n.render_int(locale))).unwrap_or_default();
    let mut line = format!("  {number}{}  {}", episode.title, when(episode.published_at.as_deref(), now, locale));
    if let Some(url) = &episode.youtube_url {
        line.push_str("\n    ");
        line.push_str(url);
    }
    line
}

/// The pagination bar, with the current page in brackets
pub fn page_bar(items: &[PageItem], current: u64, locale: Locale) -> String {
    items.iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{}]", page.render_int(locale)),
            PageItem::Page(page) => page.render_int(locale),
            PageItem::Ellipsis => "…".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
