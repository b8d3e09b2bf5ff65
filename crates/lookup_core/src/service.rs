//! Dictionary lookup collaborators.

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::WordResult,
    error::LookupError,
    protocol::{word_result_from_entries, ApiProblem, DictionaryEntry},
};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<WordResult, LookupError>;
}

/// Looks words up against a dictionary API that serves `GET <base>/<word>`.
pub struct HttpLookupService {
    http: Client,
    base_url: Url,
}

impl HttpLookupService {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid dictionary api base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            bail!("dictionary api base url '{base_url}' cannot carry a word path");
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

#[async_trait]
impl LookupService for HttpLookupService {
    async fn lookup(&self, word: &str) -> Result<WordResult, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::not_found(word));
        }

        let res = self
            .http
            .get(self.entry_url(word))
            .send()
            .await
            .map_err(|error| LookupError::transport(error.to_string()))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            let title = res
                .json::<ApiProblem>()
                .await
                .map(|problem| problem.title)
                .unwrap_or_default();
            debug!(word, %title, "dictionary has no entry");
            return Err(LookupError::not_found(word));
        }
        if !status.is_success() {
            warn!(word, %status, "dictionary lookup rejected");
            return Err(LookupError::transport(format!(
                "dictionary returned status {status}"
            )));
        }

        let entries: Vec<DictionaryEntry> = res.json().await.map_err(|error| {
            LookupError::transport(format!("malformed dictionary response: {error}"))
        })?;
        word_result_from_entries(&entries).ok_or_else(|| LookupError::not_found(word))
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
