use tracing::{debug, instrument};

use crate::api::{require, Transport};
use crate::error::Result;
use crate::model::{LeaderboardResponse, LeaderboardScope};

/// Fetch the leaderboard for a national, state or city scope.
#[instrument(skip(transport), fields(scope = %scope))]
pub(crate) async fn get_leaderboard(
    transport: &Transport,
    scope: &LeaderboardScope,
) -> Result<LeaderboardResponse> {
    let region = match scope {
        LeaderboardScope::National => scope.region(),
        LeaderboardScope::State(_) => require("state name", scope.region())?,
        LeaderboardScope::City(_) => require("city name", scope.region())?,
    };
    let response: LeaderboardResponse = transport
        .get(&["leaderboard", scope.kind(), region])
        .await?;
    debug!(
        region,
        count = response.leaderboard.len(),
        "fetched leaderboard"
    );
    Ok(response)
}
