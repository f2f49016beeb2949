use tracing::instrument;

use crate::api::{self, Transport};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::*;

/// The main entry point for talking to the CodeTrack API.
///
/// `CodeTrackClient` wraps a [`reqwest::Client`] and exposes one method per
/// REST endpoint. Every method issues exactly one request and never retries.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> codetrack_client::Result<()> {
/// use codetrack_client::{CodeTrackClient, LeaderboardScope};
///
/// let client = CodeTrackClient::new("https://codetrack.example.com/api")?;
/// let board = client
///     .leaderboard(&LeaderboardScope::State("Karnataka".into()))
///     .await?;
/// println!("{} students ranked", board.leaderboard.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CodeTrackClient {
    transport: Transport,
    config: ClientConfig,
}

impl CodeTrackClient {
    /// Create a client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = config.http_client()?;
        Self::with_client(http, config)
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc. The
    /// config's timeout and credential settings are ignored in that case.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(client, &config.base_url)?;
        Ok(Self { transport, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url().as_str()
    }

    /// Register a new college.
    #[instrument(skip(self))]
    pub async fn create_college(&self, payload: &CreateCollege) -> Result<ApiResponse<College>> {
        api::college::create_college(&self.transport, payload).await
    }

    /// Join a college with its join code.
    #[instrument(skip(self))]
    pub async fn join_college(&self, code: &str) -> Result<ApiResponse<Option<College>>> {
        api::college::join_college(&self.transport, code).await
    }

    /// List every college.
    #[instrument(skip(self))]
    pub async fn colleges(&self) -> Result<ApiResponse<Vec<College>>> {
        api::college::get_colleges(&self.transport).await
    }

    #[instrument(skip(self))]
    pub async fn college_details(&self, college_id: &str) -> Result<ApiResponse<College>> {
        api::college::get_college_details(&self.transport, college_id).await
    }

    #[instrument(skip(self))]
    pub async fn college_stats(&self, college_id: &str) -> Result<ApiResponse<StatsSnapshot>> {
        api::college::get_college_stats(&self.transport, college_id).await
    }

    /// Create a branch inside a college. The backend only allows HODs.
    #[instrument(skip(self))]
    pub async fn create_branch(&self, payload: &CreateBranch) -> Result<ApiResponse<Branch>> {
        api::branch::create_branch(&self.transport, payload).await
    }

    #[instrument(skip(self))]
    pub async fn join_branch(&self, code: &str) -> Result<ApiResponse<Option<Branch>>> {
        api::branch::join_branch(&self.transport, code).await
    }

    #[instrument(skip(self))]
    pub async fn branch_details(&self, branch_id: &str) -> Result<ApiResponse<Branch>> {
        api::branch::get_branch_details(&self.transport, branch_id).await
    }

    #[instrument(skip(self))]
    pub async fn branch_stats(&self, branch_id: &str) -> Result<ApiResponse<StatsSnapshot>> {
        api::branch::get_branch_stats(&self.transport, branch_id).await
    }

    /// Create a section inside a branch. The backend only allows coordinators.
    #[instrument(skip(self))]
    pub async fn create_section(&self, payload: &CreateSection) -> Result<ApiResponse<Section>> {
        api::section::create_section(&self.transport, payload).await
    }

    #[instrument(skip(self))]
    pub async fn join_section(&self, code: &str) -> Result<ApiResponse<Option<Section>>> {
        api::section::join_section(&self.transport, code).await
    }

    #[instrument(skip(self))]
    pub async fn section_details(&self, section_id: &str) -> Result<ApiResponse<Section>> {
        api::section::get_section_details(&self.transport, section_id).await
    }

    #[instrument(skip(self))]
    pub async fn section_stats(&self, section_id: &str) -> Result<ApiResponse<StatsSnapshot>> {
        api::section::get_section_stats(&self.transport, section_id).await
    }

    /// Fetch a leaderboard for any scope.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, scope: &LeaderboardScope) -> Result<LeaderboardResponse> {
        api::leaderboard::get_leaderboard(&self.transport, scope).await
    }

    /// Fetch the all-India leaderboard.
    pub async fn national_leaderboard(&self) -> Result<LeaderboardResponse> {
        self.leaderboard(&LeaderboardScope::National).await
    }

    pub async fn state_leaderboard(&self, state: &str) -> Result<LeaderboardResponse> {
        self.leaderboard(&LeaderboardScope::State(state.to_string()))
            .await
    }

    pub async fn city_leaderboard(&self, city: &str) -> Result<LeaderboardResponse> {
        self.leaderboard(&LeaderboardScope::City(city.to_string()))
            .await
    }
}
