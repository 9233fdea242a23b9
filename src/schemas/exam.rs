use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::{date_part, format_clock, format_exam_date, parse_clock, parse_exam_date};
use crate::schemas::{
    null_as_default, parse_integer, parse_optional_integer, require, whole_number, FormError,
};

/// Exam as returned by the backend.
///
/// Marks are read as floats since stored exams may carry fractional values; counts must be
/// whole numbers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Exam {
    #[serde(rename = "_id", alias = "id")]
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    pub(crate) duration: i64,
    pub(crate) total_marks: f64,
    pub(crate) per_question_marks: f64,
    #[serde(default)]
    pub(crate) negative_marking: Option<f64>,
    #[serde(deserialize_with = "whole_number")]
    pub(crate) total_questions: i64,
    pub(crate) exam_date: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    #[serde(default)]
    pub(crate) passing_marks: Option<f64>,
    /// Either ids or populated student documents, depending on the endpoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) assigned_students: Vec<serde_json::Value>,
}

/// Create/update body with every numeric field already coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExamPayload {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub(crate) title: String,
    pub(crate) description: String,
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub(crate) duration: i64,
    #[validate(range(min = 0, message = "totalMarks must be non-negative"))]
    pub(crate) total_marks: i64,
    #[validate(range(min = 0, message = "perQuestionMarks must be non-negative"))]
    pub(crate) per_question_marks: i64,
    #[validate(range(min = 0, message = "negativeMarking must be non-negative"))]
    pub(crate) negative_marking: Option<i64>,
    #[validate(range(min = 0, message = "totalQuestions must be non-negative"))]
    pub(crate) total_questions: i64,
    pub(crate) exam_date: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    #[validate(range(min = 0, message = "passingMarks must be non-negative"))]
    pub(crate) passing_marks: Option<i64>,
}

/// Editable draft of the exam form; every input is kept as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExamForm {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) duration: String,
    pub(crate) total_marks: String,
    pub(crate) per_question_marks: String,
    pub(crate) negative_marking: String,
    pub(crate) total_questions: String,
    pub(crate) exam_date: String,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    pub(crate) passing_marks: String,
}

impl ExamForm {
    pub(crate) fn from_exam(exam: &Exam) -> Self {
        Self {
            title: exam.title.clone(),
            description: exam.description.clone().unwrap_or_default(),
            duration: exam.duration.to_string(),
            total_marks: exam.total_marks.to_string(),
            per_question_marks: exam.per_question_marks.to_string(),
            negative_marking: exam.negative_marking.map(|v| v.to_string()).unwrap_or_default(),
            total_questions: exam.total_questions.to_string(),
            exam_date: date_part(&exam.exam_date).to_string(),
            start_time: exam.start_time.clone(),
            end_time: exam.end_time.clone(),
            passing_marks: exam.passing_marks.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Sets a field by its wire name (`totalMarks`) or snake-case name (`total_marks`).
    pub(crate) fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let slot = match field {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "duration" => &mut self.duration,
            "totalMarks" | "total_marks" => &mut self.total_marks,
            "perQuestionMarks" | "per_question_marks" => &mut self.per_question_marks,
            "negativeMarking" | "negative_marking" => &mut self.negative_marking,
            "totalQuestions" | "total_questions" => &mut self.total_questions,
            "examDate" | "exam_date" => &mut self.exam_date,
            "startTime" | "start_time" => &mut self.start_time,
            "endTime" | "end_time" => &mut self.end_time,
            "passingMarks" | "passing_marks" => &mut self.passing_marks,
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    pub(crate) fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("duration", self.duration.as_str()),
            ("totalMarks", self.total_marks.as_str()),
            ("perQuestionMarks", self.per_question_marks.as_str()),
            ("negativeMarking", self.negative_marking.as_str()),
            ("totalQuestions", self.total_questions.as_str()),
            ("examDate", self.exam_date.as_str()),
            ("startTime", self.start_time.as_str()),
            ("endTime", self.end_time.as_str()),
            ("passingMarks", self.passing_marks.as_str()),
        ]
    }

    pub(crate) fn to_payload(&self) -> Result<ExamPayload, FormError> {
        let title = require("title", &self.title)?.to_string();
        let duration = parse_integer("duration", &self.duration)?;
        let total_marks = parse_integer("totalMarks", &self.total_marks)?;
        let per_question_marks = parse_integer("perQuestionMarks", &self.per_question_marks)?;
        let negative_marking = parse_optional_integer("negativeMarking", &self.negative_marking)?;
        let total_questions = parse_integer("totalQuestions", &self.total_questions)?;
        let passing_marks = parse_optional_integer("passingMarks", &self.passing_marks)?;

        let exam_date = require("examDate", &self.exam_date)?;
        let exam_date = parse_exam_date(exam_date)
            .map(format_exam_date)
            .ok_or_else(|| FormError::InvalidDate { field: "examDate", value: exam_date.into() })?;
        let start_time = clock_field("startTime", &self.start_time)?;
        let end_time = clock_field("endTime", &self.end_time)?;

        let payload = ExamPayload {
            title,
            description: self.description.trim().to_string(),
            duration,
            total_marks,
            per_question_marks,
            negative_marking,
            total_questions,
            exam_date,
            start_time,
            end_time,
            passing_marks,
        };
        payload.validate()?;
        Ok(payload)
    }
}

fn clock_field(field: &'static str, value: &str) -> Result<String, FormError> {
    let raw = require(field, value)?;
    parse_clock(raw)
        .map(format_clock)
        .ok_or_else(|| FormError::InvalidTime { field, value: raw.to_string() })
}
