use tracing::{debug, instrument};

use crate::api::{require, Transport};
use crate::error::Result;
use crate::model::{ApiResponse, College, CreateCollege, JoinRequest, StatsSnapshot};

#[instrument(skip(transport))]
pub(crate) async fn create_college(
    transport: &Transport,
    payload: &CreateCollege,
) -> Result<ApiResponse<College>> {
    require("college name", &payload.name)?;
    let response: ApiResponse<College> = transport.post(&["colleges"], payload).await?;
    debug!(id = %response.data.id, "created college");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn join_college(
    transport: &Transport,
    code: &str,
) -> Result<ApiResponse<Option<College>>> {
    let code = require("join code", code)?;
    transport
        .post(&["colleges", "join"], &JoinRequest::new(code))
        .await
}

#[instrument(skip(transport))]
pub(crate) async fn get_colleges(transport: &Transport) -> Result<ApiResponse<Vec<College>>> {
    let response: ApiResponse<Vec<College>> = transport.get(&["colleges"]).await?;
    debug!(count = response.data.len(), "fetched colleges");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn get_college_details(
    transport: &Transport,
    college_id: &str,
) -> Result<ApiResponse<College>> {
    let college_id = require("college id", college_id)?;
    let response: ApiResponse<College> = transport
        .get(&["colleges", college_id, "details"])
        .await?;
    debug!(college_id, name = %response.data.name, "fetched college details");
    Ok(response)
}

#[instrument(skip(transport))]
pub(crate) async fn get_college_stats(
    transport: &Transport,
    college_id: &str,
) -> Result<ApiResponse<StatsSnapshot>> {
    let college_id = require("college id", college_id)?;
    let response: ApiResponse<StatsSnapshot> =
        transport.get(&["colleges", college_id, "stats"]).await?;
    debug!(
        college_id,
        students = response.data.student_count,
        branches = response.data.branches.len(),
        "fetched college stats"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::api::testing::{serve, Hits};
    use crate::error::Error;

    fn router(hits: Hits) -> Router {
        Router::new()
            .route(
                "/colleges",
                get(|| async {
                    Json(json!({"data": [
                        {"_id": "c1", "name": "GEC Ajmer", "location": {"city": "Ajmer", "state": "Rajasthan"}},
                        {"_id": "c2", "name": "NIT Trichy", "location": {"city": "Tiruchirappalli", "state": "Tamil Nadu"}}
                    ]}))
                })
                .post(|Json(body): Json<Value>| async move {
                    let name = body["name"].clone();
                    let location = body["location"].clone();
                    Json(json!({"message": "College created", "data": {"_id": "c9", "name": name, "location": location, "code": "NEW-1"}}))
                }),
            )
            .route(
                "/colleges/join",
                post(move |Json(body): Json<Value>| {
                    let hits = hits.clone();
                    async move {
                        hits.record();
                        if body["code"] == "GOOD" {
                            (StatusCode::OK, Json(json!({"message": "Joined college", "data": {"_id": "c1", "name": "GEC Ajmer"}})))
                        } else {
                            (StatusCode::BAD_REQUEST, Json(json!({"message": "Invalid join code"})))
                        }
                    }
                }),
            )
            .route(
                "/colleges/{id}/details",
                get(|Path(id): Path<String>| async move {
                    if id == "c1" {
                        (StatusCode::OK, Json(json!({"data": {"_id": "c1", "name": "GEC Ajmer", "branches": ["b1"]}})))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"message": "College not found"})))
                    }
                }),
            )
            .route(
                "/colleges/{id}/stats",
                get(|| async {
                    Json(json!({"data": {
                        "totals": {"leetcode": {"easy": 5, "medium": 3, "hard": 1}, "gfg": 2},
                        "branches": {"CSE": {"gfg": 2}},
                        "studentCount": 12
                    }}))
                }),
            )
    }

    async fn transport(hits: Hits) -> Transport {
        let base = serve(router(hits)).await;
        Transport::new(reqwest::Client::new(), &base).unwrap()
    }

    #[tokio::test]
    async fn test_get_colleges() {
        let transport = transport(Hits::default()).await;
        let colleges = get_colleges(&transport).await.unwrap();
        assert_eq!(colleges.data.len(), 2);
        assert_eq!(colleges.data[1].location.state, "Tamil Nadu");
    }

    #[tokio::test]
    async fn test_create_college() {
        let transport = transport(Hits::default()).await;
        let payload = CreateCollege::new("IIT Madras", "Chennai", "Tamil Nadu");
        let created = create_college(&transport, &payload).await.unwrap();
        assert_eq!(created.message.as_deref(), Some("College created"));
        assert_eq!(created.data.name, "IIT Madras");
        assert_eq!(created.data.location.city, "Chennai");
    }

    #[tokio::test]
    async fn test_create_college_requires_name() {
        let transport = transport(Hits::default()).await;
        let err = create_college(&transport, &CreateCollege::new(" ", "Pune", "Maharashtra"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }

    #[tokio::test]
    async fn test_join_college() {
        let hits = Hits::default();
        let transport = transport(hits.clone()).await;

        let joined = join_college(&transport, " GOOD ").await.unwrap();
        assert_eq!(joined.message.as_deref(), Some("Joined college"));
        assert_eq!(joined.data.map(|c| c.id), Some("c1".to_string()));

        let err = join_college(&transport, "BAD").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid join code");
        assert_eq!(hits.count(), 2);
    }

    #[tokio::test]
    async fn test_join_college_empty_code_sends_nothing() {
        let hits = Hits::default();
        let transport = transport(hits.clone()).await;
        let err = join_college(&transport, "").await.unwrap_err();
        assert_eq!(err.user_message(), "join code is required");
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_get_college_details() {
        let transport = transport(Hits::default()).await;
        let details = get_college_details(&transport, "c1").await.unwrap();
        assert_eq!(details.data.name, "GEC Ajmer");
        assert_eq!(details.data.branches[0].id(), "b1");

        let err = get_college_details(&transport, "missing").await.unwrap_err();
        assert_eq!(err.user_message(), "College not found");
    }

    #[tokio::test]
    async fn test_get_college_stats() {
        use crate::model::ProblemsSolved;

        let transport = transport(Hits::default()).await;
        let stats = get_college_stats(&transport, "c1").await.unwrap();
        assert_eq!(stats.data.problems_solved(), 11);
        assert_eq!(stats.data.student_count, 12);
        assert_eq!(stats.data.branches["CSE"].gfg, 2);
    }
}
