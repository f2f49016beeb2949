use tracing::{debug, instrument};

use crate::api::{require, Transport};
use crate::error::Result;
use crate::model::{ApiResponse, Branch, CreateBranch, JoinRequest, StatsSnapshot};

#[instrument(skip(transport))]
pub(crate) async fn create_branch(
    transport: &Transport,
    payload: &CreateBranch,
) -> Result<ApiResponse<Branch>> {
    require("branch name", &payload.name)?;
    require("college id", &payload.college_id)?;
    let response: ApiResponse<Branch> = transport.post(&["branches"], payload).await?;
    debug!(id = %response.data.id, "created branch");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn join_branch(
    transport: &Transport,
    code: &str,
) -> Result<ApiResponse<Option<Branch>>> {
    let code = require("join code", code)?;
    transport
        .post(&["branches", "join"], &JoinRequest::new(code))
        .await
}

#[instrument(skip(transport))]
pub(crate) async fn get_branch_details(
    transport: &Transport,
    branch_id: &str,
) -> Result<ApiResponse<Branch>> {
    let branch_id = require("branch id", branch_id)?;
    let response: ApiResponse<Branch> = transport.get(&["branches", branch_id, "details"]).await?;
    debug!(branch_id, name = %response.data.name, "fetched branch details");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn get_branch_stats(
    transport: &Transport,
    branch_id: &str,
) -> Result<ApiResponse<StatsSnapshot>> {
    let branch_id = require("branch id", branch_id)?;
    let response: ApiResponse<StatsSnapshot> =
        transport.get(&["branches", branch_id, "stats"]).await?;
    debug!(
        branch_id,
        students = response.data.student_count,
        sections = response.data.sections.len(),
        "fetched branch stats"
    );
    Ok(response)
}
