use async_trait::async_trait;
use thiserror::Error;

use crate::schemas::exam::{Exam, ExamPayload};
use crate::schemas::question::{Question, QuestionPayload};
use crate::schemas::student::Student;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not found: {}", .message.as_deref().unwrap_or("no message"))]
    NotFound { message: Option<String> },
    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend, if any.
    pub(crate) fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::Status { message, .. } => {
                message.as_deref()
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// REST operations consumed by the admin screens.
///
/// Mutations return nothing: callers re-fetch the canonical list after every change.
#[async_trait]
pub(crate) trait AdminApi: Send + Sync {
    async fn list_exams(&self) -> Result<Vec<Exam>, ApiError>;

    async fn get_exam(&self, exam_id: &str) -> Result<Exam, ApiError>;

    async fn create_exam(&self, payload: &ExamPayload) -> Result<(), ApiError>;

    async fn update_exam(&self, exam_id: &str, payload: &ExamPayload) -> Result<(), ApiError>;

    async fn delete_exam(&self, exam_id: &str) -> Result<(), ApiError>;

    async fn assign_exam(&self, exam_id: &str, student_ids: &[String]) -> Result<(), ApiError>;

    async fn list_questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError>;

    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), ApiError>;

    async fn update_question(
        &self,
        question_id: &str,
        payload: &QuestionPayload,
    ) -> Result<(), ApiError>;

    async fn delete_question(&self, question_id: &str) -> Result<(), ApiError>;

    async fn list_students(&self) -> Result<Vec<Student>, ApiError>;
}
