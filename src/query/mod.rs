//! Cached reads and notifying writes on top of [`CodeTrackClient`].
//!
//! Every read is keyed by a [`QueryKey`] and served from the [`QueryCache`]
//! while fresh. Reads that need an id take `Option<&str>` and resolve to
//! `Ok(None)` without touching the network until the id is present.
//! Writes are never cached or retried; on success they invalidate the
//! scopes whose data they change.

mod cache;
mod key;
mod mutation;
mod notify;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

pub use cache::QueryCache;
pub use key::{QueryKey, Scope};
pub use notify::{Notifier, TracingNotifier};
#[cfg(test)]
pub(crate) use notify::testing::RecordingNotifier;

use self::mutation::MutationGuard;
use crate::client::CodeTrackClient;
use crate::error::Result;
use crate::model::*;

/// What a successful write makes outdated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Invalidate {
    Key(QueryKey),
    Scope(Scope),
}

/// Data-fetching front end used by the dashboard views.
pub struct QueryClient {
    client: CodeTrackClient,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
    mutations: MutationGuard,
    stale_time: Duration,
    leaderboard_stale_time: Duration,
}

impl QueryClient {
    /// Wrap `client`, logging notifications through `tracing`.
    pub fn new(client: CodeTrackClient) -> Self {
        Self::with_notifier(client, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(client: CodeTrackClient, notifier: Arc<dyn Notifier>) -> Self {
        let config = client.config();
        Self {
            cache: QueryCache::new(config.cache_capacity),
            stale_time: config.stale_time,
            leaderboard_stale_time: config.leaderboard_stale_time,
            notifier,
            mutations: MutationGuard::default(),
            client,
        }
    }

    pub fn client(&self) -> &CodeTrackClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    fn stale_time_for(&self, key: &QueryKey) -> Duration {
        if key.is_leaderboard() {
            self.leaderboard_stale_time
        } else {
            self.stale_time
        }
    }

    async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let stale_time = self.stale_time_for(&key);
        self.cache
            .fetch(key, stale_time, fetch)
            .await
            .inspect_err(|e| self.notifier.error(&e.user_message()))
    }

    async fn mutate<T, Fut>(
        &self,
        name: &str,
        success_message: &str,
        invalidates: Vec<Invalidate>,
        request: Fut,
    ) -> Result<ApiResponse<T>>
    where
        Fut: Future<Output = Result<ApiResponse<T>>>,
    {
        let result = match self.mutations.begin(name) {
            Ok(_running) => request.await,
            Err(e) => Err(e),
        };
        match result {
            Ok(response) => {
                for target in invalidates {
                    match target {
                        Invalidate::Key(key) => self.cache.invalidate(&key).await,
                        Invalidate::Scope(scope) => self.cache.invalidate_scope(scope).await,
                    }
                }
                self.notifier
                    .success(response.message.as_deref().unwrap_or(success_message));
                Ok(response)
            }
            Err(e) => {
                self.notifier.error(&e.user_message());
                Err(e)
            }
        }
    }

    pub async fn colleges(&self) -> Result<Arc<Vec<College>>> {
        self.query(QueryKey::Colleges, || async {
            self.client.colleges().await.map(|r| r.data)
        })
        .await
    }

    pub async fn college_details(&self, college_id: Option<&str>) -> Result<Option<Arc<College>>> {
        let Some(id) = enabled(college_id) else {
            return Ok(None);
        };
        self.query(QueryKey::CollegeDetails(id.to_string()), || async {
            self.client.college_details(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn college_stats(
        &self,
        college_id: Option<&str>,
    ) -> Result<Option<Arc<StatsSnapshot>>> {
        let Some(id) = enabled(college_id) else {
            return Ok(None);
        };
        self.query(QueryKey::CollegeStats(id.to_string()), || async {
            self.client.college_stats(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn branch_details(&self, branch_id: Option<&str>) -> Result<Option<Arc<Branch>>> {
        let Some(id) = enabled(branch_id) else {
            return Ok(None);
        };
        self.query(QueryKey::BranchDetails(id.to_string()), || async {
            self.client.branch_details(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn branch_stats(&self, branch_id: Option<&str>) -> Result<Option<Arc<StatsSnapshot>>> {
        let Some(id) = enabled(branch_id) else {
            return Ok(None);
        };
        self.query(QueryKey::BranchStats(id.to_string()), || async {
            self.client.branch_stats(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn section_details(&self, section_id: Option<&str>) -> Result<Option<Arc<Section>>> {
        let Some(id) = enabled(section_id) else {
            return Ok(None);
        };
        self.query(QueryKey::SectionDetails(id.to_string()), || async {
            self.client.section_details(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn section_stats(
        &self,
        section_id: Option<&str>,
    ) -> Result<Option<Arc<StatsSnapshot>>> {
        let Some(id) = enabled(section_id) else {
            return Ok(None);
        };
        self.query(QueryKey::SectionStats(id.to_string()), || async {
            self.client.section_stats(id).await.map(|r| r.data)
        })
        .await
        .map(Some)
    }

    pub async fn national_leaderboard(&self) -> Result<Arc<LeaderboardResponse>> {
        self.leaderboard(LeaderboardScope::National).await
    }

    /// State leaderboard, disabled until a state name is chosen.
    pub async fn state_leaderboard(
        &self,
        state: Option<&str>,
    ) -> Result<Option<Arc<LeaderboardResponse>>> {
        let Some(state) = enabled(state) else {
            return Ok(None);
        };
        self.leaderboard(LeaderboardScope::State(state.to_string()))
            .await
            .map(Some)
    }

    /// City leaderboard, disabled until a city name is chosen.
    pub async fn city_leaderboard(
        &self,
        city: Option<&str>,
    ) -> Result<Option<Arc<LeaderboardResponse>>> {
        let Some(city) = enabled(city) else {
            return Ok(None);
        };
        self.leaderboard(LeaderboardScope::City(city.to_string()))
            .await
            .map(Some)
    }

    /// Leaderboard for any scope, always enabled.
    pub async fn leaderboard(&self, scope: LeaderboardScope) -> Result<Arc<LeaderboardResponse>> {
        let key = QueryKey::Leaderboard(scope.clone());
        self.query(key, || async move { self.client.leaderboard(&scope).await })
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_college(&self, payload: &CreateCollege) -> Result<ApiResponse<College>> {
        self.mutate(
            "create college",
            "College created",
            vec![Invalidate::Key(QueryKey::Colleges)],
            self.client.create_college(payload),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn join_college(&self, code: &str) -> Result<ApiResponse<Option<College>>> {
        self.mutate(
            "join college",
            "Joined college",
            vec![Invalidate::Scope(Scope::College)],
            self.client.join_college(code),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_branch(&self, payload: &CreateBranch) -> Result<ApiResponse<Branch>> {
        self.mutate(
            "create branch",
            "Branch created",
            vec![
                Invalidate::Key(QueryKey::CollegeDetails(payload.college_id.trim().to_string())),
                Invalidate::Key(QueryKey::CollegeStats(payload.college_id.trim().to_string())),
            ],
            self.client.create_branch(payload),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn join_branch(&self, code: &str) -> Result<ApiResponse<Option<Branch>>> {
        self.mutate(
            "join branch",
            "Joined branch",
            vec![
                Invalidate::Scope(Scope::Branch),
                Invalidate::Scope(Scope::College),
            ],
            self.client.join_branch(code),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_section(&self, payload: &CreateSection) -> Result<ApiResponse<Section>> {
        self.mutate(
            "create section",
            "Section created",
            vec![
                Invalidate::Key(QueryKey::BranchDetails(payload.branch_id.trim().to_string())),
                Invalidate::Key(QueryKey::BranchStats(payload.branch_id.trim().to_string())),
            ],
            self.client.create_section(payload),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn join_section(&self, code: &str) -> Result<ApiResponse<Option<Section>>> {
        self.mutate(
            "join section",
            "Joined section",
            vec![
                Invalidate::Scope(Scope::Section),
                Invalidate::Scope(Scope::Branch),
                Invalidate::Scope(Scope::College),
                Invalidate::Scope(Scope::Leaderboard),
            ],
            self.client.join_section(code),
        )
        .await
    }
}

/// The trimmed id, or `None` while the query should stay disabled.
fn enabled(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}
