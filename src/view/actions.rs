use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::model::{CreateBranch, CreateCollege, CreateSection, Role};
use crate::query::QueryClient;

/// Which kind of entity a join code is for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JoinTarget {
    College,
    Branch,
    Section,
}

/// Submit a join code. Returns the confirmation message shown to the user.
#[instrument(skip(queries))]
pub async fn join(queries: &QueryClient, target: JoinTarget, code: &str) -> Result<String> {
    let message = match target {
        JoinTarget::College => queries.join_college(code).await?.message,
        JoinTarget::Branch => queries.join_branch(code).await?.message,
        JoinTarget::Section => queries.join_section(code).await?.message,
    };
    Ok(message.unwrap_or_else(|| format!("Joined {target}")))
}

#[instrument(skip(queries))]
pub async fn create_college_as(
    queries: &QueryClient,
    role: Role,
    payload: &CreateCollege,
) -> Result<String> {
    permit(queries, role.can_create_college(), Role::Hod, "create a college")?;
    let response = queries.create_college(payload).await?;
    Ok(response
        .message
        .unwrap_or_else(|| format!("Created {}", response.data.name)))
}

#[instrument(skip(queries))]
pub async fn create_branch_as(
    queries: &QueryClient,
    role: Role,
    payload: &CreateBranch,
) -> Result<String> {
    permit(queries, role.can_create_branch(), Role::Hod, "create a branch")?;
    let response = queries.create_branch(payload).await?;
    Ok(response
        .message
        .unwrap_or_else(|| format!("Created {}", response.data.name)))
}

#[instrument(skip(queries))]
pub async fn create_section_as(
    queries: &QueryClient,
    role: Role,
    payload: &CreateSection,
) -> Result<String> {
    permit(
        queries,
        role.can_create_section(),
        Role::Coordinator,
        "create a section",
    )?;
    let response = queries.create_section(payload).await?;
    Ok(response
        .message
        .unwrap_or_else(|| format!("Created {}", response.data.name)))
}

fn permit(
    queries: &QueryClient,
    allowed: bool,
    required: Role,
    action: &'static str,
) -> Result<()> {
    if allowed {
        return Ok(());
    }
    let err = Error::Forbidden { required, action };
    queries.notifier().error(&err.user_message());
    Err(err)
}
