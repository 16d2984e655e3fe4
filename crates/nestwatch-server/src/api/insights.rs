//! Insights API endpoints: interests, preferences, and weekly summaries.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, Utc};
use nestwatch_core::{timefmt, Interest, Preference, WeeklySummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// Creates the insights router, nested under a child id.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/interests", get(get_interests))
        .route("/preferences", get(get_preferences))
        .route("/summary/weekly", get(get_weekly_summary))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing interests.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct InterestQuery {
    /// Restrict to interests explored within a window: `week`, `month`,
    /// or `all` (default).
    #[param(example = "week")]
    pub period: Option<String>,
}

/// Query parameters for listing preferences.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PreferenceQuery {
    /// When true, each preference carries a sentiment label and
    /// high-confidence flag.
    #[serde(default)]
    pub analysis: bool,
}

/// A preference, optionally enriched with analysis fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferenceReport {
    /// The stored preference.
    #[serde(flatten)]
    pub preference: Preference,
    /// "positive", "negative", or "neutral". Present with `analysis=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_label: Option<String>,
    /// Whether confidence clears the high bar. Present with `analysis=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_confidence: Option<bool>,
}

/// Weekly summary with a display-ready date range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySummaryResponse {
    /// The stored summary.
    #[serde(flatten)]
    pub summary: WeeklySummary,
    /// Covered week as "Dec 18 - Dec 24".
    pub week_range: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Get a child's detected interests, strongest first.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/interests",
    tag = "insights",
    operation_id = "getInterests",
    summary = "Get detected interests",
    description = "Returns interests sorted by strength. `period=week` or \
        `period=month` restricts to recently explored topics.",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        InterestQuery
    ),
    responses(
        (status = 200, description = "Interests retrieved", body = [Interest]),
        (status = 400, description = "Unknown period value")
    )
)]
pub async fn get_interests(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Query(query): Query<InterestQuery>,
) -> ApiResult<Json<Vec<Interest>>> {
    let cutoff = match query.period.as_deref() {
        Some("week") => Some(Utc::now() - Duration::days(7)),
        Some("month") => Some(Utc::now() - Duration::days(30)),
        None | Some("all") => None,
        Some(other) => {
            return Err(ApiError::BadRequest {
                error_code: "invalid_period".to_string(),
                message: format!("Unknown period '{other}'; expected week, month, or all"),
            })
        }
    };

    let state_guard = state.read().await;
    let mut interests = state_guard.storage.load_interests(&child_id)?;
    if let Some(cutoff) = cutoff {
        interests.retain(|i| i.last_explored >= cutoff);
    }
    interests.sort_by(|a, b| b.interest_level.total_cmp(&a.interest_level));
    Ok(Json(interests))
}

/// Get a child's sentiment preferences.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/preferences",
    tag = "insights",
    operation_id = "getPreferences",
    summary = "Get sentiment preferences",
    params(
        ("child_id" = String, Path, description = "Child identifier"),
        PreferenceQuery
    ),
    responses(
        (status = 200, description = "Preferences retrieved", body = [PreferenceReport])
    )
)]
pub async fn get_preferences(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
    Query(query): Query<PreferenceQuery>,
) -> ApiResult<Json<Vec<PreferenceReport>>> {
    let state_guard = state.read().await;
    let preferences = state_guard.storage.load_preferences(&child_id)?;

    let reports = preferences
        .into_iter()
        .map(|preference| {
            let (sentiment_label, high_confidence) = if query.analysis {
                (
                    Some(preference.sentiment_label().to_string()),
                    Some(preference.is_high_confidence()),
                )
            } else {
                (None, None)
            };
            PreferenceReport {
                preference,
                sentiment_label,
                high_confidence,
            }
        })
        .collect();
    Ok(Json(reports))
}

/// Get the latest weekly summary.
#[utoipa::path(
    get,
    path = "/api/children/{child_id}/summary/weekly",
    tag = "insights",
    operation_id = "getWeeklySummary",
    summary = "Get the weekly summary",
    params(
        ("child_id" = String, Path, description = "Child identifier")
    ),
    responses(
        (status = 200, description = "Summary retrieved", body = WeeklySummaryResponse),
        (status = 404, description = "No summary generated yet")
    )
)]
pub async fn get_weekly_summary(
    State(state): State<SharedState>,
    Path(child_id): Path<String>,
) -> ApiResult<Json<WeeklySummaryResponse>> {
    let state_guard = state.read().await;
    let summary = state_guard
        .storage
        .load_summary(&child_id)?
        .ok_or_else(|| ApiError::NotFound {
            error_code: "summary_not_found".to_string(),
            message: format!("No weekly summary has been generated for '{child_id}'"),
        })?;

    let week_range = timefmt::week_range(summary.week_start, summary.week_end);
    Ok(Json(WeeklySummaryResponse {
        summary,
        week_range,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nestwatch_core::{NestwatchConfig, Storage, Trend};
    use tempfile::TempDir;

    use crate::state::AppState;

    fn interest(topic: &str, level: f64, days_ago: i64) -> Interest {
        Interest {
            id: format!("i_{topic}"),
            child_id: "c1".into(),
            topic: topic.into(),
            category: "science".into(),
            interest_level: level,
            frequency: 3,
            keywords: vec![],
            trend_direction: Trend::Stable,
            last_explored: Utc::now() - Duration::days(days_ago),
            created_at: Utc::now(),
        }
    }

    fn preference(topic: &str, sentiment: f64, confidence: f64) -> Preference {
        Preference {
            id: format!("p_{topic}"),
            child_id: "c1".into(),
            topic: topic.into(),
            sentiment,
            confidence,
            frequency: 2,
            category: "food".into(),
            keywords: vec![],
            trend: Trend::Stable,
            last_updated: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn shared_state() -> (TempDir, SharedState) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        let state = AppState::with_parts(NestwatchConfig::default(), storage).into_shared();
        (dir, state)
    }

    #[tokio::test]
    async fn test_interests_sorted_and_filtered_by_period() {
        let (_dir, state) = shared_state();
        {
            let state_guard = state.read().await;
            state_guard
                .storage
                .save_interests(
                    "c1",
                    &[
                        interest("volcanoes", 6.5, 20),
                        interest("dinosaurs", 9.0, 2),
                        interest("trains", 4.0, 1),
                    ],
                )
                .unwrap();
        }

        let all = get_interests(
            State(state.clone()),
            Path("c1".into()),
            Query(InterestQuery { period: None }),
        )
        .await
        .unwrap();
        assert_eq!(all.0.len(), 3);
        assert_eq!(all.0[0].topic, "dinosaurs");
        assert_eq!(all.0[2].topic, "trains");

        let week = get_interests(
            State(state.clone()),
            Path("c1".into()),
            Query(InterestQuery {
                period: Some("week".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(week.0.len(), 2);
        assert!(week.0.iter().all(|i| i.topic != "volcanoes"));

        let bad = get_interests(
            State(state),
            Path("c1".into()),
            Query(InterestQuery {
                period: Some("decade".into()),
            }),
        )
        .await;
        assert!(matches!(bad, Err(ApiError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_preferences_analysis_fields() {
        let (_dir, state) = shared_state();
        {
            let state_guard = state.read().await;
            state_guard
                .storage
                .save_preferences(
                    "c1",
                    &[preference("pasta", 0.8, 0.9), preference("broccoli", -0.5, 0.4)],
                )
                .unwrap();
        }

        let plain = get_preferences(
            State(state.clone()),
            Path("c1".into()),
            Query(PreferenceQuery { analysis: false }),
        )
        .await
        .unwrap();
        assert!(plain.0[0].sentiment_label.is_none());

        let analyzed = get_preferences(
            State(state),
            Path("c1".into()),
            Query(PreferenceQuery { analysis: true }),
        )
        .await
        .unwrap();
        assert_eq!(analyzed.0[0].sentiment_label.as_deref(), Some("positive"));
        assert_eq!(analyzed.0[0].high_confidence, Some(true));
        assert_eq!(analyzed.0[1].sentiment_label.as_deref(), Some("negative"));
        assert_eq!(analyzed.0[1].high_confidence, Some(false));
    }

    #[tokio::test]
    async fn test_weekly_summary_with_range() {
        let (_dir, state) = shared_state();
        {
            let state_guard = state.read().await;
            state_guard
                .storage
                .save_summary(&WeeklySummary {
                    id: "s1".into(),
                    child_id: "c1".into(),
                    week_start: Utc.with_ymd_and_hms(2024, 12, 18, 0, 0, 0).unwrap(),
                    week_end: Utc.with_ymd_and_hms(2024, 12, 24, 23, 59, 59).unwrap(),
                    summary_text: "A curious week".into(),
                    topics_explored: vec!["dinosaurs".into()],
                    new_interests: vec![],
                    conversation_starters: vec![],
                    created_at: Utc::now(),
                })
                .unwrap();
        }

        let response = get_weekly_summary(State(state), Path("c1".into()))
            .await
            .unwrap();
        assert_eq!(response.0.week_range, "Dec 18 - Dec 24");
        assert_eq!(response.0.summary.summary_text, "A curious week");
    }

    #[tokio::test]
    async fn test_missing_summary_is_404() {
        let (_dir, state) = shared_state();
        let result = get_weekly_summary(State(state), Path("c1".into())).await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }
}
