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

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: RcStr,
    pub slug: RcStr,
    #[serde(default)]
    pub description: Option<RcStr>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub news_count: u64,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct News {
    pub id: u64,
    pub title: RcStr,
    pub slug: RcStr,
    #[serde(default)]
    pub description: Option<RcStr>,
    /// Only present on the detail endpoint
    #[serde(default)]
    pub content: Option<RcStr>,
    #[serde(default)]
    pub cover_url: Option<RcStr>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub published_at: Option<RcStr>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
}

/// Sort orders accepted by the news listing
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantArray)]
pub enum NewsSort {
    #[default]
    #[serde(rename = "-published_at")]
    #[strum(serialize = "-published_at")]
    Latest,
    #[serde(rename = "published_at")]
    #[strum(serialize = "published_at")]
    Earliest,
    #[serde(rename = "-views_count")]
    #[strum(serialize = "-views_count")]
    MostViewed,
    #[serde(rename = "views_count")]
    #[strum(serialize = "views_count")]
    LeastViewed,
    #[serde(rename = "title")]
    #[strum(serialize = "title")]
    TitleAscending,
    #[serde(rename = "-title")]
    #[strum(serialize = "-title")]
    TitleDescending,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HomeCategory {
    pub id: u64,
    pub name: RcStr,
    pub slug: RcStr,
    #[serde(default)]
    pub description: Option<RcStr>,
    #[serde(default)]
    pub news: Vec<News>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HomeData {
    pub top_news: Vec<News>,
    pub breaking_news: Vec<News>,
    pub categories: Vec<HomeCategory>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantArray)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Day names are matched case-insensitively; ones that still don't parse are skipped
/// rather than failing the whole show.
fn lenient_days<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<DayOfWeek>, D::Error> {
    let names = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(names.into_iter()
        .flatten()
        .filter_map(|name| name.trim().to_ascii_lowercase().parse().ok())
        .collect())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShowSlot {
    // the backend really does spell it this way
    #[serde(default, rename = "steam_time", alias = "stream_time")]
    pub stream_time: Option<RcStr>,
    #[serde(default, deserialize_with = "lenient_days")]
    pub days_of_week: Vec<DayOfWeek>,
    #[serde(default)]
    pub human_readable: Option<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ShowContacts {
    pub phone: Option<RcStr>,
    pub facebook: Option<RcStr>,
    pub instagram: Option<RcStr>,
    pub twitter: Option<RcStr>,
    pub whatsapp: Option<RcStr>,
    pub telegram: Option<RcStr>,
    pub viber: Option<RcStr>,
    pub email: Option<RcStr>,
    pub website: Option<RcStr>,
    pub other: Vec<RcStr>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Show {
    pub id: u64,
    pub title: RcStr,
    pub slug: RcStr,
    #[serde(default)]
    pub about: Option<RcStr>,
    #[serde(default)]
    pub schedule: Vec<ShowSlot>,
    #[serde(default)]
    pub stream_url: Option<RcStr>,
    #[serde(default)]
    pub files_url: Option<RcStr>,
    #[serde(default)]
    pub cover_url: Option<RcStr>,
    #[serde(default)]
    pub contacts: ShowContacts,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<RcStr>,
    #[serde(default)]
    pub updated_at: Option<RcStr>,
}

impl Show {
    pub fn airs_on(&self, day: DayOfWeek) -> bool {
        self.schedule.iter().any(|slot| slot.days_of_week.contains(&day))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TodayMeta {
    pub day: DayOfWeek,
    pub date: RcStr,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShowsToday {
    pub data: Vec<Show>,
    pub meta: TodayMeta,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct WeekSchedule {
    pub monday: Vec<Show>,
    pub tuesday: Vec<Show>,
    pub wednesday: Vec<Show>,
    pub thursday: Vec<Show>,
    pub friday: Vec<Show>,
    pub saturday: Vec<Show>,
    pub sunday: Vec<Show>,
}

impl WeekSchedule {
    pub fn day(&self, day: DayOfWeek) -> &[Show] {
        match day {
            DayOfWeek::Monday => &self.monday,
            DayOfWeek::Tuesday => &self.tuesday,
            DayOfWeek::Wednesday => &self.wednesday,
            DayOfWeek::Thursday => &self.thursday,
            DayOfWeek::Friday => &self.friday,
            DayOfWeek::Saturday => &self.saturday,
            DayOfWeek::Sunday => &self.sunday,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShowEpisode {
    pub id: u64,
    pub title: RcStr,
    #[serde(default)]
    pub description: Option<RcStr>,
    #[serde(default)]
    pub episode_number: Option<u64>,
    #[serde(default)]
    pub youtube_url: Option<RcStr>,
    #[serde(default)]
    pub thumbnail_url: Option<RcStr>,
    #[serde(default)]
    pub published_at: Option<RcStr>,
}
