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

pub mod api;
pub mod bookmarks;
pub mod constants;
pub mod feed;
pub mod identity;
pub mod locale;
pub mod location;
pub mod pagination;
pub mod reels;
pub mod sequence;
pub mod session;
pub mod settings;
pub mod storage;
pub mod utils;

pub use palm_api::sync as types;

pub use api::ApiClient;
pub use locale::Locale;
pub use settings::Settings;
