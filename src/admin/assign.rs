/// Selection state of the "assign exam to students" modal.
#[derive(Debug, Clone, Default)]
pub(crate) struct AssignModal {
    exam_id: Option<String>,
    selected: Vec<String>,
}

impl AssignModal {
    /// Opening always starts from an empty selection.
    pub(crate) fn open(&mut self, exam_id: impl Into<String>) {
        self.exam_id = Some(exam_id.into());
        self.selected.clear();
    }

    pub(crate) fn close(&mut self) {
        self.exam_id = None;
        self.selected.clear();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.exam_id.is_some()
    }

    pub(crate) fn exam_id(&self) -> Option<&str> {
        self.exam_id.as_deref()
    }

    /// Checkbox semantics; returns whether the student is selected afterwards.
    pub(crate) fn toggle(&mut self, student_id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|id| id == student_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(student_id.to_string());
            true
        }
    }

    pub(crate) fn is_selected(&self, student_id: &str) -> bool {
        self.selected.iter().any(|id| id == student_id)
    }

    pub(crate) fn selected(&self) -> &[String] {
        &self.selected
    }
}
