use tracing::{debug, instrument};

use crate::api::{require, Transport};
use crate::error::Result;
use crate::model::{ApiResponse, CreateSection, JoinRequest, Section, StatsSnapshot};

#[instrument(skip(transport))]
pub(crate) async fn create_section(
    transport: &Transport,
    payload: &CreateSection,
) -> Result<ApiResponse<Section>> {
    require("section name", &payload.name)?;
    require("branch id", &payload.branch_id)?;
    let response: ApiResponse<Section> = transport.post(&["sections"], payload).await?;
    debug!(id = %response.data.id, "created section");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn join_section(
    transport: &Transport,
    code: &str,
) -> Result<ApiResponse<Option<Section>>> {
    let code = require("join code", code)?;
    transport
        .post(&["sections", "join"], &JoinRequest::new(code))
        .await
}

#[instrument(skip(transport))]
pub(crate) async fn get_section_details(
    transport: &Transport,
    section_id: &str,
) -> Result<ApiResponse<Section>> {
    let section_id = require("section id", section_id)?;
    let response: ApiResponse<Section> =
        transport.get(&["sections", section_id, "details"]).await?;
    debug!(section_id, name = %response.data.name, "fetched section details");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn get_section_stats(
    transport: &Transport,
    section_id: &str,
) -> Result<ApiResponse<StatsSnapshot>> {
    let section_id = require("section id", section_id)?;
    let response: ApiResponse<StatsSnapshot> =
        transport.get(&["sections", section_id, "stats"]).await?;
    debug!(
        section_id,
        students = response.data.student_count,
        "fetched section stats"
    );
    Ok(response)
}
