use std::collections::BTreeMap;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use super::ViewState;
use crate::analytics::{self, DifficultySplit, GroupSummary};
use crate::error::Result;
use crate::model::{
    Branch, College, LeetCodeCounts, PlatformTotals, ProblemsSolved, Section, StatsSnapshot,
    TopStudent,
};
use crate::query::QueryClient;

/// How many students the "top performers" panel lists.
pub const TOP_STUDENTS: usize = 10;

/// Headline numbers shown at the top of every dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_problems: u64,
    pub leetcode: LeetCodeCounts,
    pub leetcode_total: u64,
    pub gfg: u64,
    pub github_repos: u64,
    pub students: u64,
    pub branches: u64,
    pub sections: u64,
    pub average_score: f64,
    /// Average problems solved per student, one decimal.
    pub problems_per_student: f64,
    pub difficulty: DifficultySplit,
}

impl StatsSummary {
    pub fn from_stats(stats: &StatsSnapshot) -> Self {
        let total_problems = stats.problems_solved();
        let problems_per_student = if stats.student_count == 0 {
            0.0
        } else {
            (total_problems as f64 * 10.0 / stats.student_count as f64).round() / 10.0
        };
        Self {
            total_problems,
            leetcode: stats.totals.leetcode,
            leetcode_total: stats.totals.leetcode.total(),
            gfg: stats.totals.gfg,
            github_repos: stats.totals.github_repos,
            students: stats.student_count,
            branches: stats.branch_count,
            sections: stats.section_count,
            average_score: stats.averages.score,
            problems_per_student,
            difficulty: analytics::difficulty_split(&stats.totals.leetcode),
        }
    }
}

/// Everything a college, branch or section page renders.
#[derive(Debug, Clone)]
pub struct Dashboard<E> {
    pub entity: Arc<E>,
    pub stats: Arc<StatsSnapshot>,
    /// Set when details loaded but stats did not; numbers are then all zero.
    pub stats_error: Option<String>,
    pub summary: StatsSummary,
    /// Per-branch rows for a college, per-section rows for a branch.
    pub breakdown: Vec<GroupSummary>,
    pub top_students: Vec<TopStudent>,
}

pub type CollegeDashboard = Dashboard<College>;
pub type BranchDashboard = Dashboard<Branch>;
pub type SectionDashboard = Dashboard<Section>;

/// Load a college page: details and stats are requested concurrently.
#[instrument(skip(queries))]
pub async fn load_college_dashboard(
    queries: &QueryClient,
    college_id: Option<&str>,
) -> ViewState<CollegeDashboard> {
    let (details, stats) = tokio::join!(
        queries.college_details(college_id),
        queries.college_stats(college_id)
    );
    assemble(details, stats, |s| &s.branches)
}

#[instrument(skip(queries))]
pub async fn load_branch_dashboard(
    queries: &QueryClient,
    branch_id: Option<&str>,
) -> ViewState<BranchDashboard> {
    let (details, stats) = tokio::join!(
        queries.branch_details(branch_id),
        queries.branch_stats(branch_id)
    );
    assemble(details, stats, |s| &s.sections)
}

#[instrument(skip(queries))]
pub async fn load_section_dashboard(
    queries: &QueryClient,
    section_id: Option<&str>,
) -> ViewState<SectionDashboard> {
    let (details, stats) = tokio::join!(
        queries.section_details(section_id),
        queries.section_stats(section_id)
    );
    assemble(details, stats, |_| &EMPTY_GROUPS)
}

static EMPTY_GROUPS: BTreeMap<String, PlatformTotals> = BTreeMap::new();

fn assemble<E>(
    details: Result<Option<Arc<E>>>,
    stats: Result<Option<Arc<StatsSnapshot>>>,
    groups: fn(&StatsSnapshot) -> &BTreeMap<String, PlatformTotals>,
) -> ViewState<Dashboard<E>> {
    let entity = match details {
        Ok(Some(entity)) => entity,
        Ok(None) => return ViewState::Idle,
        Err(e) => return ViewState::Failed(e.user_message()),
    };

    let (stats, stats_error) = match stats {
        Ok(Some(stats)) => (stats, None),
        Ok(None) => (Arc::new(StatsSnapshot::default()), None),
        Err(e) => {
            debug!(error = %e, "stats unavailable, showing zeroed dashboard");
            (Arc::new(StatsSnapshot::default()), Some(e.user_message()))
        }
    };

    ViewState::Ready(Dashboard {
        summary: StatsSummary::from_stats(&stats),
        breakdown: analytics::breakdown(groups(&stats)),
        top_students: top_students(&stats.top_students, TOP_STUDENTS),
        entity,
        stats,
        stats_error,
    })
}

/// Highest scores first; ties go to more problems solved.
pub fn top_students(students: &[TopStudent], limit: usize) -> Vec<TopStudent> {
    students
        .iter()
        .sorted_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.problems_solved().cmp(&a.problems_solved()))
                .then_with(|| a.name.cmp(&b.name))
        })
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::api::testing::serve;
    use crate::client::CodeTrackClient;
    use crate::query::{Notifier, RecordingNotifier};

    async fn queries() -> (QueryClient, Arc<RecordingNotifier>) {
        let router = Router::new()
            .route(
                "/colleges/{id}/details",
                get(|Path(id): Path<String>| async move {
                    if id == "c1" {
                        (StatusCode::OK, Json(json!({"data": {"_id": "c1", "name": "GEC Ajmer"}})))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"message": "College not found"})))
                    }
                }),
            )
            .route(
                "/colleges/{id}/stats",
                get(|| async {
                    Json(json!({"data": {
                        "totals": {"leetcode": {"easy": 50, "medium": 30, "hard": 20}, "gfg": 20, "githubRepos": 9},
                        "averages": {"score": 61.25},
                        "studentCount": 8,
                        "branchCount": 2,
                        "branches": {
                            "ECE": {"leetcode": {"easy": 10}},
                            "CSE": {"leetcode": {"easy": 40, "medium": 30, "hard": 20}, "gfg": 20}
                        },
                        "topStudents": [
                            {"_id": "u1", "name": "Asha", "score": 70.0},
                            {"_id": "u2", "name": "Ravi", "score": 90.0}
                        ]
                    }}))
                }),
            )
            .route(
                "/branches/{id}/details",
                get(|| async { Json(json!({"data": {"_id": "b1", "name": "CSE"}})) }),
            )
            .route(
                "/branches/{id}/stats",
                get(|| async {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"message": "Stats are being recomputed"})))
                }),
            );
        let base = serve(router).await;
        let notes = Arc::new(RecordingNotifier::default());
        let queries = QueryClient::with_notifier(
            CodeTrackClient::new(base).unwrap(),
            Arc::clone(&notes) as Arc<dyn Notifier>,
        );
        (queries, notes)
    }

    #[tokio::test]
    async fn test_college_dashboard_ready() {
        let (queries, _) = queries().await;
        let view = load_college_dashboard(&queries, Some("c1")).await;
        let dashboard = view.into_ready().unwrap();

        assert_eq!(dashboard.entity.name, "GEC Ajmer");
        assert_eq!(dashboard.summary.total_problems, 120);
        assert_eq!(dashboard.summary.leetcode_total, 100);
        assert_eq!(dashboard.summary.problems_per_student, 15.0);
        assert_eq!(dashboard.summary.difficulty.easy, 50.0);
        assert_eq!(dashboard.breakdown[0].name, "CSE");
        assert_eq!(dashboard.breakdown[1].share, 8.3);
        assert_eq!(dashboard.top_students[0].name, "Ravi");
        assert!(dashboard.stats_error.is_none());
    }

    #[tokio::test]
    async fn test_missing_details_fail_the_page() {
        let (queries, notes) = queries().await;
        let view = load_college_dashboard(&queries, Some("nope")).await;
        assert_eq!(view.error(), Some("College not found"));
        assert!(notes.errors().contains(&"College not found".to_string()));
    }

    #[tokio::test]
    async fn test_no_id_is_idle() {
        let (queries, notes) = queries().await;
        let view = load_college_dashboard(&queries, None).await;
        assert_eq!(view.error(), None);
        assert!(matches!(view, ViewState::Idle));
        assert!(notes.errors().is_empty());
    }

    #[tokio::test]
    async fn test_stats_failure_degrades_to_zero() {
        let (queries, notes) = queries().await;
        let dashboard = load_branch_dashboard(&queries, Some("b1"))
            .await
            .into_ready()
            .unwrap();
        assert_eq!(dashboard.entity.name, "CSE");
        assert_eq!(dashboard.summary, StatsSummary::from_stats(&StatsSnapshot::default()));
        assert_eq!(
            dashboard.stats_error.as_deref(),
            Some("Stats are being recomputed")
        );
        assert!(dashboard.breakdown.is_empty());
        assert_eq!(notes.errors(), vec!["Stats are being recomputed".to_string()]);
    }

    #[test]
    fn test_top_students_limit_and_order() {
        let students: Vec<TopStudent> = (0..15)
            .map(|i| TopStudent {
                id: format!("u{i}"),
                name: format!("s{i:02}"),
                score: (i % 5) as f64,
                leetcode: LeetCodeCounts::default(),
                gfg: i,
                github_repos: 0,
            })
            .collect();
        let top = top_students(&students, TOP_STUDENTS);
        assert_eq!(top.len(), TOP_STUDENTS);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(top[0].id, "u14");
    }
}
