use crate::{
    cli::types::Username,
    config::TrackerConfig,
    core::http::{FetchOptions, Fetcher, DEFAULT_MAX_ATTEMPTS},
    Result,
};

/// Handle on the CodeChef site plus its third-party JSON API.
#[derive(Debug, Clone)]
pub struct CodeChefClient {
    pub(crate) fetcher: Fetcher,
    site_base: String,
    api_base: String,
    max_attempts: u32,
}

impl CodeChefClient {
    pub fn new(fetcher: Fetcher, site_base: &str, api_base: &str) -> Self {
        Self {
            fetcher,
            site_base: site_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn from_config(config: &TrackerConfig, fetcher: Fetcher) -> Self {
        Self::new(
            fetcher,
            &config.endpoints.codechef,
            &config.endpoints.codechef_api,
        )
        .with_max_attempts(config.max_attempts)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn site_base(&self) -> &str {
        &self.site_base
    }

    pub(crate) fn profile_url(&self, username: &Username) -> String {
        format!("{}/users/{}", self.site_base, username)
    }

    pub(crate) fn heatmap_url(&self, username: &Username) -> String {
        format!("{}/handle/{}", self.api_base, username)
    }

    pub(crate) fn contest_list_url(&self) -> String {
        format!("{}/api/list/contests/all", self.site_base)
    }

    pub(crate) fn html_options(&self) -> FetchOptions {
        FetchOptions::default().with_max_attempts(self.max_attempts)
    }

    pub(crate) fn json_options(&self) -> FetchOptions {
        FetchOptions::json().with_max_attempts(self.max_attempts)
    }

    /// Raw profile page; shared by the profile, heatmap fallback and contest graph paths.
    pub(crate) async fn fetch_profile_html(&self, username: &Username) -> Result<String> {
        self.fetcher
            .fetch_text(&self.profile_url(username), &self.html_options())
            .await
    }
}
