//! Plain-text views of the admin screens.

use std::fmt;

use crate::admin::assign::AssignModal;
use crate::admin::form::{EditMode, FormState, Presentation};
use crate::core::time::date_part;
use crate::schemas::exam::{Exam, ExamForm};
use crate::schemas::question::{OptionLetter, Question, QuestionForm};
use crate::schemas::student::Student;

pub(crate) struct ExamList<'a>(pub(crate) &'a [Exam]);

impl fmt::Display for ExamList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No exams found");
        }
        for exam in self.0 {
            writeln!(f, "[{}] {}", exam.id, exam.title)?;
            if let Some(description) = exam.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(f, "    {description}")?;
            }
            writeln!(
                f,
                "    Duration: {} min | Total Marks: {} | Questions: {} | Per Q Marks: {}",
                exam.duration, exam.total_marks, exam.total_questions, exam.per_question_marks
            )?;
            write!(
                f,
                "    Date: {} {}-{}",
                date_part(&exam.exam_date),
                exam.start_time,
                exam.end_time
            )?;
            if let Some(passing) = exam.passing_marks {
                write!(f, " | Passing: {passing}")?;
            }
            writeln!(f)?;
            if !exam.assigned_students.is_empty() {
                writeln!(f, "    Assigned to {} student(s)", exam.assigned_students.len())?;
            }
        }
        Ok(())
    }
}

pub(crate) struct ExamFormView<'a>(pub(crate) &'a FormState<ExamForm>);

impl fmt::Display for ExamFormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (heading, action) = match self.0.mode() {
            EditMode::None => return writeln!(f, "No exam form is open"),
            EditMode::Creating => ("Add New Exam", "Create Exam"),
            EditMode::Editing(_) => ("Edit Exam", "Update Exam"),
        };
        writeln!(f, "{heading}")?;
        for (name, value) in self.0.draft().fields() {
            writeln!(f, "  {name:<17}{value}")?;
        }
        writeln!(f, "[save] {action}  [cancel] Cancel")
    }
}

pub(crate) struct AssignView<'a> {
    pub(crate) modal: &'a AssignModal,
    pub(crate) students: &'a [Student],
}

impl fmt::Display for AssignView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(exam_id) = self.modal.exam_id() else {
            return Ok(());
        };
        writeln!(f, "Assign exam {exam_id} to students")?;
        if self.students.is_empty() {
            writeln!(f, "  No students available")?;
        }
        for student in self.students {
            let mark = if self.modal.is_selected(&student.id) { 'x' } else { ' ' };
            write!(f, "  [{mark}] {}", student.name)?;
            if let Some(email) = student.email.as_deref().filter(|e| !e.is_empty()) {
                write!(f, " ({email})")?;
            }
            writeln!(f, " <{}>", student.id)?;
        }
        let selected = self.modal.selected().len();
        writeln!(f, "{selected} selected  [assign confirm] Assign  [assign cancel] Cancel")
    }
}

pub(crate) struct QuestionScreen<'a> {
    pub(crate) exam: Option<&'a Exam>,
    pub(crate) questions: &'a [Question],
    pub(crate) form: &'a FormState<QuestionForm>,
}

impl fmt::Display for QuestionScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exam {
            Some(exam) => writeln!(f, "Questions for {}", exam.title)?,
            None => writeln!(f, "Questions")?,
        }

        if self.form.is_open() && self.form.presentation() == Presentation::Panel {
            let heading = match self.form.mode() {
                EditMode::Editing(_) => "Edit Question",
                EditMode::None | EditMode::Creating => "Add New Question",
            };
            writeln!(f, "{heading}")?;
            write_draft(f, self.form.draft(), "  ")?;
        }

        if self.questions.is_empty() {
            return writeln!(f, "No questions added yet");
        }
        for (index, question) in self.questions.iter().enumerate() {
            if self.form.is_editing_inline(&question.id) {
                writeln!(f, "Q{}. (editing) <{}>", index + 1, question.id)?;
                write_draft(f, self.form.draft(), "    ")?;
                continue;
            }
            writeln!(f, "Q{}. {} <{}>", index + 1, question.question_text, question.id)?;
            for letter in OptionLetter::ALL {
                let text = question.option_text(letter).unwrap_or_default();
                if letter == question.correct_answer {
                    writeln!(f, "    {letter}. {text}  ✓ Correct")?;
                } else {
                    writeln!(f, "    {letter}. {text}")?;
                }
            }
            if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
                writeln!(f, "    Explanation: {explanation}")?;
            }
        }
        Ok(())
    }
}

fn write_draft(f: &mut fmt::Formatter<'_>, draft: &QuestionForm, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}questionText   {}", draft.question_text)?;
    for (letter, text) in OptionLetter::ALL.iter().zip(&draft.options) {
        writeln!(f, "{indent}option{letter}        {text}")?;
    }
    writeln!(f, "{indent}correctAnswer  {}", draft.correct_answer)?;
    writeln!(f, "{indent}explanation    {}", draft.explanation)
}
