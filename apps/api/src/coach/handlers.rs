//! Axum route handler for interview turns.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::conversation::{validate_history, ConversationTurn, InterviewSession};
use crate::models::role::Role;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    #[serde(default)]
    pub resume_content: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<ConversationTurn>>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub response: String,
}

impl InterviewRequest {
    /// Validates the request and rebuilds the interview session from it.
    pub fn into_session(self) -> Result<InterviewSession, AppError> {
        let resume_text = self
            .resume_content
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Resume content is required".to_string()))?;

        let history = self.conversation_history.unwrap_or_default();
        validate_history(&history).map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(InterviewSession {
            resume_text,
            user_message: self.user_message.unwrap_or_default(),
            history,
            role: self.role,
        })
    }
}

/// POST /interview
///
/// Runs one interview turn. Always answers with coach text unless the request
/// itself is invalid.
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let session = request.into_session()?;

    let response = state.orchestrator.generate_response(&session).await;

    Ok(Json(InterviewResponse {
        success: true,
        response,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization_with_client_field_names() {
        let json = serde_json::json!({
            "resumeContent": "Jane Doe",
            "userMessage": "I refactored the billing service",
            "conversationHistory": [
                {"role": "ai", "content": "Tell me about a project"},
                {"role": "user", "content": "I refactored the billing service"}
            ],
            "role": "Software Engineer"
        });
        let request: InterviewRequest = serde_json::from_value(json).unwrap();
        let session = request.into_session().unwrap();
        assert_eq!(session.role, Role::SoftwareEngineer);
        assert_eq!(session.question_index(), 1);
        assert!(!session.is_opening());
    }

    #[test]
    fn test_optional_fields_default() {
        let request: InterviewRequest =
            serde_json::from_str(r#"{"resumeContent": "Jane", "conversationHistory": null}"#)
                .unwrap();
        let session = request.into_session().unwrap();
        assert_eq!(session.role, Role::General);
        assert!(session.history.is_empty());
        assert!(session.is_opening());
    }

    #[test]
    fn test_missing_resume_is_validation_error() {
        let request: InterviewRequest = serde_json::from_str(r#"{"userMessage": "hi"}"#).unwrap();
        assert!(matches!(request.into_session(), Err(AppError::Validation(_))));

        let request: InterviewRequest =
            serde_json::from_str(r#"{"resumeContent": "   "}"#).unwrap();
        assert!(matches!(request.into_session(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_malformed_history_is_validation_error() {
        let request: InterviewRequest = serde_json::from_value(serde_json::json!({
            "resumeContent": "Jane",
            "userMessage": "answer",
            "conversationHistory": [{"role": "user", "content": "answer"}]
        }))
        .unwrap();
        match request.into_session() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("coach")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
