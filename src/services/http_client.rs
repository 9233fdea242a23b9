use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::core::config::{ApiBaseUrl, Settings};
use crate::core::session::AdminSession;
use crate::schemas::exam::{Exam, ExamPayload};
use crate::schemas::question::{Question, QuestionPayload};
use crate::schemas::student::Student;
use crate::schemas::{ApiEnvelope, AssignmentRequest};
use crate::services::api::{AdminApi, ApiError};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub(crate) struct HttpAdminApi {
    client: Client,
    base_url: ApiBaseUrl,
    session: AdminSession,
}

impl HttpAdminApi {
    pub(crate) fn from_settings(
        settings: &Settings,
        session: AdminSession,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.api().connect_timeout())
            .timeout(settings.api().timeout())
            .build()
            .context("Failed to build exam API HTTP client")?;

        Ok(Self::new(client, settings.api().base_url.clone(), session))
    }

    pub(crate) fn new(client: Client, base_url: ApiBaseUrl, session: AdminSession) -> Self {
        Self { client, base_url, session }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let url = self.base_url.join(path);
        let started = Instant::now();

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = self.session.bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, path, %request_id, error = %err, "Exam API request failed");
            ApiError::from(err)
        })?;

        let status = response.status();
        tracing::debug!(
            %method,
            path,
            %request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Exam API responded"
        );

        if status.is_success() {
            return Ok(response);
        }

        let raw_body = response.text().await.unwrap_or_default();
        let message =
            serde_json::from_str::<Value>(&raw_body).ok().and_then(|value| extract_message(&value));
        tracing::warn!(
            %method,
            path,
            %request_id,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "Exam API returned an error status"
        );

        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound { message })
        } else {
            Err(ApiError::Status { status: status.as_u16(), message })
        }
    }

    async fn fetch_data<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        let raw_body = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&raw_body)
            .map_err(|err| ApiError::Decode(format!("{path}: {err}")))?;
        Ok(envelope.data)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        Ok(self.fetch_data::<Vec<T>>(path).await?.unwrap_or_default())
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body).await.map(|_| ())
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_exams(&self) -> Result<Vec<Exam>, ApiError> {
        self.fetch_list("exams").await
    }

    async fn get_exam(&self, exam_id: &str) -> Result<Exam, ApiError> {
        let path = format!("exams/{exam_id}");
        self.fetch_data(&path)
            .await?
            .ok_or_else(|| ApiError::Decode(format!("{path}: response has no data")))
    }

    async fn create_exam(&self, payload: &ExamPayload) -> Result<(), ApiError> {
        self.mutate(Method::POST, "exams", Some(payload)).await
    }

    async fn update_exam(&self, exam_id: &str, payload: &ExamPayload) -> Result<(), ApiError> {
        self.mutate(Method::PUT, &format!("exams/{exam_id}"), Some(payload)).await
    }

    async fn delete_exam(&self, exam_id: &str) -> Result<(), ApiError> {
        self.mutate::<()>(Method::DELETE, &format!("exams/{exam_id}"), None).await
    }

    async fn assign_exam(&self, exam_id: &str, student_ids: &[String]) -> Result<(), ApiError> {
        let body = AssignmentRequest { student_ids: student_ids.to_vec() };
        self.mutate(Method::POST, &format!("exams/{exam_id}/assign"), Some(&body)).await
    }

    async fn list_questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError> {
        self.fetch_list(&format!("questions/exam/{exam_id}")).await
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), ApiError> {
        self.mutate(Method::POST, "questions", Some(payload)).await
    }

    async fn update_question(
        &self,
        question_id: &str,
        payload: &QuestionPayload,
    ) -> Result<(), ApiError> {
        self.mutate(Method::PUT, &format!("questions/{question_id}"), Some(payload)).await
    }

    async fn delete_question(&self, question_id: &str) -> Result<(), ApiError> {
        self.mutate::<()>(Method::DELETE, &format!("questions/{question_id}"), None).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.fetch_list("students").await
    }
}

fn extract_message(payload: &Value) -> Option<String> {
    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }

    match payload.get("detail") {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .or_else(|| item.get("message").and_then(Value::as_str))
                })
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests;
