use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-server preferences kept between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalState {
    pub servers: Vec<ServerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntry {
    pub base_url: String,
    pub last_year: i32,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn last_year(&self, base_url: &str) -> Option<i32> {
        self.servers
            .iter()
            .find(|entry| entry.base_url == base_url)
            .map(|entry| entry.last_year)
    }

    pub fn set_last_year(&mut self, base_url: &str, year: i32) {
        if let Some(entry) = self
            .servers
            .iter_mut()
            .find(|entry| entry.base_url == base_url)
        {
            entry.last_year = year;
            return;
        }

        self.servers.push(ServerEntry {
            base_url: base_url.to_string(),
            last_year: year,
        });
    }
}
