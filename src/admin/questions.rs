use std::sync::Arc;

use crate::admin::feedback::{Feedback, Notice, Route};
use crate::admin::form::{FormState, Presentation};
use crate::schemas::exam::Exam;
use crate::schemas::question::{OptionLetter, Question, QuestionForm};
use crate::schemas::FormError;
use crate::services::api::AdminApi;

/// Result of loading the question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuestionsLoad {
    Loaded,
    /// The exam exists but its question list could not be fetched; shown as empty.
    NotFoundEmpty,
    /// The exam itself could not be loaded; the screen navigated back to the exam list.
    Unrecoverable,
}

/// Question screen for a single exam.
pub(crate) struct QuestionManager {
    api: Arc<dyn AdminApi>,
    exam_id: String,
    exam: Option<Exam>,
    questions: Vec<Question>,
    form: FormState<QuestionForm>,
}

impl QuestionManager {
    pub(crate) fn new(api: Arc<dyn AdminApi>, exam_id: impl Into<String>) -> Self {
        Self {
            api,
            exam_id: exam_id.into(),
            exam: None,
            questions: Vec::new(),
            form: FormState::default(),
        }
    }

    pub(crate) async fn load(&mut self, ui: &mut dyn Feedback) -> QuestionsLoad {
        match self.api.get_exam(&self.exam_id).await {
            Ok(exam) => self.exam = Some(exam),
            Err(err) => {
                tracing::error!(exam_id = %self.exam_id, error = %err, "Failed to load exam");
                ui.notify(Notice::error("Failed to load exam"));
                ui.navigate(Route::ExamList);
                return QuestionsLoad::Unrecoverable;
            }
        }

        match self.api.list_questions(&self.exam_id).await {
            Ok(questions) => {
                tracing::debug!(
                    exam_id = %self.exam_id,
                    count = questions.len(),
                    "Loaded questions"
                );
                self.questions = questions;
                QuestionsLoad::Loaded
            }
            Err(err) => {
                if err.is_not_found() {
                    tracing::debug!(exam_id = %self.exam_id, "Exam has no questions yet");
                } else {
                    tracing::warn!(
                        exam_id = %self.exam_id,
                        error = %err,
                        "Question list unavailable; showing none"
                    );
                }
                self.questions.clear();
                QuestionsLoad::NotFoundEmpty
            }
        }
    }

    pub(crate) fn exam_id(&self) -> &str {
        &self.exam_id
    }

    pub(crate) fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    pub(crate) fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub(crate) fn form(&self) -> &FormState<QuestionForm> {
        &self.form
    }

    pub(crate) fn toggle_form(&mut self) {
        self.form.toggle_create();
    }

    pub(crate) fn open_create(&mut self) {
        self.form.open_create();
    }

    pub(crate) fn edit_in_panel(&mut self, question_id: &str) -> bool {
        self.open_edit(question_id, Presentation::Panel)
    }

    pub(crate) fn edit_inline(&mut self, question_id: &str) -> bool {
        self.open_edit(question_id, Presentation::Inline)
    }

    fn open_edit(&mut self, question_id: &str, presentation: Presentation) -> bool {
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            return false;
        };
        let draft = QuestionForm::from_question(question);
        self.form.open_edit(question_id, draft, presentation);
        true
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.form.close();
    }

    pub(crate) fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.form.draft_mut().set(field, value)
    }

    pub(crate) fn set_option(&mut self, letter: OptionLetter, text: &str) {
        self.form.draft_mut().set_option(letter, text);
    }

    pub(crate) async fn submit(&mut self, ui: &mut dyn Feedback) -> bool {
        if !self.form.is_open() {
            ui.notify(Notice::error("No question form is open"));
            return false;
        }

        let payload = match self.form.draft().to_payload(&self.exam_id) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "Question form rejected");
                ui.notify(Notice::error(err.to_string()));
                return false;
            }
        };

        let editing_id = self.form.editing_id().map(str::to_string);
        let result = match editing_id.as_deref() {
            Some(question_id) => self.api.update_question(question_id, &payload).await,
            None => self.api.create_question(&payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    exam_id = %self.exam_id,
                    question_id = editing_id.as_deref().unwrap_or("<new>"),
                    "Question saved"
                );
                ui.notify(Notice::success(if editing_id.is_some() {
                    "Question updated successfully"
                } else {
                    "Question created successfully"
                }));
                self.form.close();
                self.load(ui).await;
                true
            }
            Err(err) => {
                tracing::warn!(exam_id = %self.exam_id, error = %err, "Failed to save question");
                ui.notify(Notice::error(err.server_message().unwrap_or("Operation failed")));
                false
            }
        }
    }

    pub(crate) async fn delete(&mut self, question_id: &str, ui: &mut dyn Feedback) -> bool {
        if !ui.confirm("Are you sure you want to delete this question?").await {
            return false;
        }

        match self.api.delete_question(question_id).await {
            Ok(()) => {
                tracing::info!(exam_id = %self.exam_id, question_id, "Question deleted");
                ui.notify(Notice::success("Question deleted successfully"));
                self.load(ui).await;
                true
            }
            Err(err) => {
                tracing::warn!(question_id, error = %err, "Failed to delete question");
                ui.notify(Notice::error("Failed to delete question"));
                false
            }
        }
    }
}
