use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, trace};

use super::{ContentSource, RemoteSettings, check_logical_path};
use crate::error::{Result, SkillsError};

/// Corpus served by a raw-content host plus a contents-listing API.
pub struct RemoteSource {
    settings: RemoteSettings,
    client: Client,
}

/// One entry of the contents API directory listing.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

impl RemoteSource {
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| SkillsError::Config(format!("remote source http client: {err}")))?;
        Ok(Self {
            settings: settings.clone(),
            client,
        })
    }

    fn raw_url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.raw_base_url)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.api_base_url)
    }

    fn try_list(&self, path: &str) -> std::result::Result<Vec<String>, String> {
        let url = self.api_url(path);
        let response = self
            .client
            .get(format!("{url}?ref={}", self.settings.branch))
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|err| format!("{url}: {err}"))?;
        if !response.status().is_success() {
            return Err(format!("{url}: HTTP {}", response.status()));
        }
        let entries: Vec<ContentEntry> = response.json().map_err(|err| format!("{url}: {err}"))?;
        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .map(|entry| entry.name)
            .collect();
        names.sort();
        Ok(names)
    }
}

impl ContentSource for RemoteSource {
    fn fetch(&self, path: &str) -> Result<Option<String>> {
        check_logical_path(path)?;
        let url = self.raw_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| SkillsError::Fetch(format!("{url}: {err}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(path, "remote document absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SkillsError::Fetch(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|err| SkillsError::Fetch(format!("{url}: {err}")))?;
        trace!(path, bytes = body.len(), "fetched remote document");
        Ok(Some(body))
    }

    fn list_directory(&self, path: &str) -> Vec<String> {
        if check_logical_path(path).is_err() {
            return Vec::new();
        }
        match self.try_list(path) {
            Ok(names) => names,
            Err(reason) => {
                debug!(path, %reason, "directory listing unavailable");
                Vec::new()
            }
        }
    }

    fn concurrent_fetches(&self) -> bool {
        true
    }
}
