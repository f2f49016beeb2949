use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use super::ViewState;
use crate::analytics::{self, SortKey};
use crate::model::{College, LeaderboardEntry, LeaderboardResponse, LeaderboardScope, ProblemsSolved};
use crate::query::QueryClient;

/// A leaderboard line as displayed, after sorting and filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// 1-based position in the displayed order.
    pub position: usize,
    pub problems: u64,
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
}

/// A sorted, searchable leaderboard table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardView {
    pub scope: LeaderboardScope,
    pub sort: SortKey,
    pub search: String,
    /// Entries before the search filter was applied.
    pub total_entries: usize,
    pub rows: Vec<LeaderboardRow>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl LeaderboardView {
    /// Build the table from an already fetched response.
    pub fn build(
        scope: LeaderboardScope,
        response: &LeaderboardResponse,
        sort: SortKey,
        search: &str,
    ) -> ViewState<Self> {
        let sorted = analytics::sort_entries(&response.leaderboard, sort);
        let rows = analytics::rerank(analytics::filter_by_name(&sorted, search))
            .map(|(position, entry)| LeaderboardRow {
                position,
                problems: entry.problems_solved(),
                entry: entry.clone(),
            })
            .collect_vec();

        if rows.is_empty() {
            return ViewState::Empty;
        }

        let generated_at = response.generated_at.or_else(|| {
            response
                .leaderboard
                .iter()
                .filter_map(|e| e.generated_at.or(e.updated_at))
                .max()
        });

        ViewState::Ready(Self {
            scope,
            sort,
            search: search.trim().to_string(),
            total_entries: response.leaderboard.len(),
            rows,
            generated_at,
        })
    }

    /// Fetch (or reuse) the leaderboard for `scope` and build the table.
    ///
    /// State and city scopes with a blank name stay [`ViewState::Idle`].
    #[instrument(skip(queries))]
    pub async fn load(
        queries: &QueryClient,
        scope: LeaderboardScope,
        sort: SortKey,
        search: &str,
    ) -> ViewState<Self> {
        let response = match &scope {
            LeaderboardScope::National => queries.national_leaderboard().await.map(Some),
            LeaderboardScope::State(name) => queries.state_leaderboard(Some(name.as_str())).await,
            LeaderboardScope::City(name) => queries.city_leaderboard(Some(name.as_str())).await,
        };
        match response {
            Ok(Some(response)) => {
                debug!(entries = response.leaderboard.len(), "building leaderboard view");
                Self::build(scope, &response, sort, search)
            }
            Ok(None) => ViewState::Idle,
            Err(e) => ViewState::Failed(e.user_message()),
        }
    }

    /// Re-sort without refetching.
    pub fn resorted(&self, sort: SortKey) -> Self {
        let entries = self.rows.iter().map(|r| r.entry.clone()).collect_vec();
        let rows = analytics::rerank(analytics::sort_entries(&entries, sort))
            .map(|(position, entry)| LeaderboardRow {
                position,
                problems: entry.problems_solved(),
                entry,
            })
            .collect();
        Self {
            sort,
            rows,
            ..self.clone()
        }
    }
}

/// States and cities that can be picked for a regional leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionOptions {
    pub states: Vec<String>,
    pub cities: Vec<String>,
}

impl RegionOptions {
    /// Distinct, sorted locations of the given colleges. Blank names are skipped.
    pub fn from_colleges(colleges: &[College]) -> Self {
        let distinct = |field: fn(&College) -> &str| {
            colleges
                .iter()
                .map(field)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .sorted_by_key(|s| s.to_lowercase())
                .dedup_by(|a, b| a.eq_ignore_ascii_case(b))
                .collect_vec()
        };
        Self {
            states: distinct(|c| c.location.state.as_str()),
            cities: distinct(|c| c.location.city.as_str()),
        }
    }

    /// Load the college list and derive the options from it.
    pub async fn load(queries: &QueryClient) -> ViewState<Self> {
        match queries.colleges().await {
            Ok(colleges) if colleges.is_empty() => ViewState::Empty,
            Ok(colleges) => ViewState::Ready(Self::from_colleges(&colleges)),
            Err(e) => ViewState::Failed(e.user_message()),
        }
    }

    /// Cities whose name contains `term`, ignoring case. A blank term keeps all.
    pub fn search_cities(&self, term: &str) -> Vec<&str> {
        search(&self.cities, term)
    }

    pub fn search_states(&self, term: &str) -> Vec<&str> {
        search(&self.states, term)
    }
}

fn search<'a>(names: &'a [String], term: &str) -> Vec<&'a str> {
    let term = term.trim().to_lowercase();
    names
        .iter()
        .filter(|n| term.is_empty() || n.to_lowercase().contains(&term))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::api::testing::serve;
    use crate::client::CodeTrackClient;
    use crate::model::Location;
    use crate::query::{Notifier, RecordingNotifier};

    fn response() -> LeaderboardResponse {
        serde_json::from_value(json!({
            "leaderboard": [
                {"rank": 1, "userId": "u1", "name": "Asha Rao", "score": 95.0,
                 "leetcode": {"easy": 10}, "gfg": 1, "updatedAt": "2025-03-02T00:00:00Z"},
                {"rank": 2, "userId": "u2", "name": "Ravi", "score": 80.0,
                 "leetcode": {"easy": 50, "hard": 5}, "gfg": 20, "updatedAt": "2025-03-04T00:00:00Z"},
                {"rank": 3, "userId": "u3", "name": "Meera", "score": 40.0}
            ]
        }))
        .unwrap()
    }

    fn college(city: &str, state: &str) -> College {
        College {
            id: city.to_string(),
            name: format!("College of {city}"),
            location: Location {
                city: city.to_string(),
                state: state.to_string(),
            },
            code: None,
            branches: vec![],
            timestamps: Default::default(),
        }
    }

    #[test]
    fn test_build_sorted_by_problems() {
        let view = LeaderboardView::build(
            LeaderboardScope::National,
            &response(),
            SortKey::Problems,
            "",
        )
        .into_ready()
        .unwrap();
        let names = view.rows.iter().map(|r| r.entry.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Ravi", "Asha Rao", "Meera"]);
        assert_eq!(view.rows[0].problems, 75);
        assert_eq!(view.rows[0].position, 1);
        assert_eq!(view.rows[0].entry.rank, 2);
        assert_eq!(view.total_entries, 3);
        assert_eq!(
            view.generated_at.map(|t| t.to_rfc3339()),
            Some("2025-03-04T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_search_filters_rows() {
        let view = LeaderboardView::build(
            LeaderboardScope::City("Pune".into()),
            &response(),
            SortKey::Rank,
            " asha ",
        )
        .into_ready()
        .unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].entry.user_id, "u1");
        assert_eq!(view.search, "asha");
        assert_eq!(view.total_entries, 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let view = LeaderboardView::build(
            LeaderboardScope::National,
            &response(),
            SortKey::Score,
            "nobody",
        );
        assert_eq!(view, ViewState::Empty);
        let view = LeaderboardView::build(
            LeaderboardScope::National,
            &LeaderboardResponse::default(),
            SortKey::Score,
            "",
        );
        assert_eq!(view, ViewState::Empty);
    }

    #[test]
    fn test_resorted() {
        let view = LeaderboardView::build(
            LeaderboardScope::National,
            &response(),
            SortKey::Problems,
            "",
        )
        .into_ready()
        .unwrap();
        let by_rank = view.resorted(SortKey::Rank);
        let ranks = by_rank.rows.iter().map(|r| (r.position, r.entry.rank)).collect_vec();
        assert_eq!(ranks, vec![(1, 1), (2, 2), (3, 3)]);
        assert_eq!(by_rank.sort, SortKey::Rank);
    }

    #[test]
    fn test_region_options() {
        let colleges = vec![
            college("Pune", "Maharashtra"),
            college("pune", "Maharashtra"),
            college("Chennai", "Tamil Nadu"),
            college("Ajmer", "Rajasthan"),
            college(" ", ""),
        ];
        let options = RegionOptions::from_colleges(&colleges);
        assert_eq!(options.cities, vec!["Ajmer", "Chennai", "Pune"]);
        assert_eq!(options.states, vec!["Maharashtra", "Rajasthan", "Tamil Nadu"]);
        assert_eq!(options.search_cities("EN"), vec!["Chennai"]);
        assert_eq!(options.search_cities("").len(), 3);
        assert_eq!(options.search_states("nadu"), vec!["Tamil Nadu"]);
    }

    #[tokio::test]
    async fn test_load_regional_boards() {
        let router = Router::new()
            .route(
                "/leaderboard/state/{name}",
                get(|| async {
                    (StatusCode::NOT_FOUND, Json(json!({"message": "No students in this state yet"})))
                }),
            )
            .route(
                "/leaderboard/city/{name}",
                get(|| async {
                    Json(json!({"leaderboard": [{"rank": 1, "userId": "u1", "name": "Asha", "score": 3.0}]}))
                }),
            );
        let base = serve(router).await;
        let notes = Arc::new(RecordingNotifier::default());
        let queries = QueryClient::with_notifier(
            CodeTrackClient::new(base).unwrap(),
            Arc::clone(&notes) as Arc<dyn Notifier>,
        );

        let idle = LeaderboardView::load(&queries, LeaderboardScope::City(" ".into()), SortKey::Rank, "").await;
        assert_eq!(idle, ViewState::Idle);

        let city = LeaderboardView::load(&queries, LeaderboardScope::City("Pune".into()), SortKey::Score, "").await;
        assert_eq!(city.ready().map(|v| v.rows.len()), Some(1));

        let state = LeaderboardView::load(&queries, LeaderboardScope::State("Goa".into()), SortKey::Rank, "").await;
        assert_eq!(state.error(), Some("No students in this state yet"));
        assert_eq!(notes.errors(), vec!["No students in this state yet".to_string()]);
    }
}
