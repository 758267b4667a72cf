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

use std::{fs::File, io::{self, Read, Write}, path::{Path, PathBuf}};

use cloneable_errors::{ErrorContext, ResContext};
use log::info;
use palm_client::Settings;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "palm.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where the device id, token and cached bookmarks/likes are kept
    pub identity_path: PathBuf,
    pub client: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            identity_path: PathBuf::from("palm-identity.json"),
            client: Settings::default(),
        }
    }
}

/// Reads the config at `path`, or writes out the defaults there if the file doesn't exist
pub fn load_or_create(path: &Path) -> Result<AppConfig, ErrorContext> {
    let display = path.display();
    match File::open(path) {
        Ok(mut file) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents).with_context(|| format!("Failed to read {display}"))?;
            toml::from_str(&contents).with_context(|| format!("Failed to deserialize contents of {display}"))
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let cfg = AppConfig::default();
            let serialized = toml::to_string(&cfg).context("Failed to serialize default AppConfig as TOML")?;
            let mut file = File::options().write(true).create_new(true).open(path).with_context(|| format!("Failed to create {display}"))?;
            write!(file, "{serialized}").with_context(|| format!("Failed to write serialized default AppConfig to {display}"))?;
            info!("Wrote the default configuration to {display}");
            Ok(cfg)
        },
        Err(e) => Err(e).with_context(|| format!("Failed to open {display}")),
    }
}
