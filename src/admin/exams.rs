use std::sync::Arc;

use crate::admin::assign::AssignModal;
use crate::admin::feedback::{Feedback, Notice};
use crate::admin::form::{FormState, Presentation};
use crate::schemas::exam::{Exam, ExamForm};
use crate::schemas::student::Student;
use crate::schemas::FormError;
use crate::services::api::AdminApi;

/// Exam list screen: the exam form, deletes and the student assignment modal.
pub(crate) struct ExamManager {
    api: Arc<dyn AdminApi>,
    exams: Vec<Exam>,
    students: Vec<Student>,
    form: FormState<ExamForm>,
    assignment: AssignModal,
}

impl ExamManager {
    pub(crate) fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            exams: Vec::new(),
            students: Vec::new(),
            form: FormState::default(),
            assignment: AssignModal::default(),
        }
    }

    pub(crate) async fn mount(&mut self, ui: &mut dyn Feedback) {
        self.load_exams(ui).await;
        self.load_students(ui).await;
    }

    /// Replaces the list on success; a failure keeps whatever was shown before.
    pub(crate) async fn load_exams(&mut self, ui: &mut dyn Feedback) -> bool {
        match self.api.list_exams().await {
            Ok(exams) => {
                tracing::debug!(count = exams.len(), "Loaded exams");
                self.exams = exams;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to load exams");
                ui.notify(Notice::error("Failed to load exams"));
                false
            }
        }
    }

    pub(crate) async fn load_students(&mut self, ui: &mut dyn Feedback) -> bool {
        match self.api.list_students().await {
            Ok(students) => {
                tracing::debug!(count = students.len(), "Loaded students");
                self.students = students;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to load students");
                ui.notify(Notice::error("Failed to load students"));
                false
            }
        }
    }

    pub(crate) fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub(crate) fn students(&self) -> &[Student] {
        &self.students
    }

    pub(crate) fn form(&self) -> &FormState<ExamForm> {
        &self.form
    }

    pub(crate) fn assignment(&self) -> &AssignModal {
        &self.assignment
    }

    pub(crate) fn toggle_form(&mut self) {
        self.form.toggle_create();
    }

    pub(crate) fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Opens the form prefilled from the listed exam; `false` if the id is not listed.
    pub(crate) fn open_edit(&mut self, exam_id: &str) -> bool {
        let Some(exam) = self.exams.iter().find(|exam| exam.id == exam_id) else {
            return false;
        };
        let draft = ExamForm::from_exam(exam);
        self.form.open_edit(exam_id, draft, Presentation::Panel);
        true
    }

    pub(crate) fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.form.draft_mut().set(field, value)
    }

    pub(crate) fn cancel_form(&mut self) {
        self.form.close();
    }

    pub(crate) async fn submit(&mut self, ui: &mut dyn Feedback) -> bool {
        if !self.form.is_open() {
            ui.notify(Notice::error("No exam form is open"));
            return false;
        }

        let payload = match self.form.draft().to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "Exam form rejected");
                ui.notify(Notice::error(err.to_string()));
                return false;
            }
        };

        let editing_id = self.form.editing_id().map(str::to_string);
        let result = match editing_id.as_deref() {
            Some(exam_id) => self.api.update_exam(exam_id, &payload).await,
            None => self.api.create_exam(&payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    exam_id = editing_id.as_deref().unwrap_or("<new>"),
                    title = %payload.title,
                    "Exam saved"
                );
                ui.notify(Notice::success(if editing_id.is_some() {
                    "Exam updated successfully"
                } else {
                    "Exam created successfully"
                }));
                self.form.close();
                self.load_exams(ui).await;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save exam");
                ui.notify(Notice::error(err.server_message().unwrap_or("Operation failed")));
                false
            }
        }
    }

    pub(crate) async fn delete(&mut self, exam_id: &str, ui: &mut dyn Feedback) -> bool {
        if !ui.confirm("Are you sure you want to delete this exam?").await {
            return false;
        }

        match self.api.delete_exam(exam_id).await {
            Ok(()) => {
                tracing::info!(exam_id, "Exam deleted");
                ui.notify(Notice::success("Exam deleted successfully"));
                self.load_exams(ui).await;
                true
            }
            Err(err) => {
                tracing::warn!(exam_id, error = %err, "Failed to delete exam");
                ui.notify(Notice::error("Failed to delete exam"));
                false
            }
        }
    }

    pub(crate) fn open_assign_modal(&mut self, exam_id: &str) {
        self.assignment.open(exam_id);
    }

    /// Returns the new checkbox state, or `None` when the modal is closed or the
    /// student is not listed.
    pub(crate) fn toggle_student(&mut self, student_id: &str) -> Option<bool> {
        if !self.assignment.is_open() || !self.students.iter().any(|s| s.id == student_id) {
            return None;
        }
        Some(self.assignment.toggle(student_id))
    }

    pub(crate) fn close_assign_modal(&mut self) {
        self.assignment.close();
    }

    pub(crate) async fn confirm_assignment(&mut self, ui: &mut dyn Feedback) -> bool {
        let Some(exam_id) = self.assignment.exam_id().map(str::to_string) else {
            return false;
        };

        if self.assignment.selected().is_empty() {
            ui.notify(Notice::error("Please select at least one student"));
            return false;
        }

        match self.api.assign_exam(&exam_id, self.assignment.selected()).await {
            Ok(()) => {
                tracing::info!(
                    exam_id = %exam_id,
                    students = self.assignment.selected().len(),
                    "Exam assigned"
                );
                ui.notify(Notice::success("Exam assigned to students successfully"));
                self.assignment.close();
                self.load_exams(ui).await;
                true
            }
            Err(err) => {
                tracing::warn!(exam_id = %exam_id, error = %err, "Failed to assign exam");
                ui.notify(Notice::error(err.server_message().unwrap_or("Failed to assign exam")));
                false
            }
        }
    }
}
