use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::schemas::{null_as_default, require, FormError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub(crate) enum OptionLetter {
    #[default]
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub(crate) const ALL: [OptionLetter; 4] =
        [OptionLetter::A, OptionLetter::B, OptionLetter::C, OptionLetter::D];

    pub(crate) fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLetter {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionLetter::A),
            "B" => Ok(OptionLetter::B),
            "C" => Ok(OptionLetter::C),
            "D" => Ok(OptionLetter::D),
            _ => Err(FormError::Invalid(format!("option letter must be A-D, got '{value}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub(crate) enum QuestionType {
    #[default]
    #[serde(rename = "mcq", alias = "multiple-choice")]
    Mcq,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionOption {
    pub(crate) option_letter: OptionLetter,
    pub(crate) option_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub(crate) id: String,
    pub(crate) question_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) options: Vec<QuestionOption>,
    pub(crate) correct_answer: OptionLetter,
    #[serde(default)]
    pub(crate) explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) question_type: QuestionType,
}

impl Question {
    pub(crate) fn option_text(&self, letter: OptionLetter) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.option_letter == letter)
            .map(|option| option.option_text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionPayload {
    pub(crate) exam_id: String,
    #[validate(length(min = 1, max = 2000, message = "questionText must be 1-2000 characters"))]
    pub(crate) question_text: String,
    #[validate(custom(function = validate_options))]
    pub(crate) options: Vec<QuestionOption>,
    pub(crate) correct_answer: OptionLetter,
    #[validate(length(max = 2000, message = "explanation must be at most 2000 characters"))]
    pub(crate) explanation: String,
    pub(crate) question_type: QuestionType,
}

fn validate_options(options: &[QuestionOption]) -> Result<(), ValidationError> {
    if options.len() != OptionLetter::ALL.len() {
        return Err(ValidationError::new("exactly_four_options")
            .with_message("a question needs exactly four options".into()));
    }
    for (option, letter) in options.iter().zip(OptionLetter::ALL) {
        if option.option_letter != letter {
            return Err(ValidationError::new("options_out_of_order")
                .with_message("options must be lettered A-D in order".into()));
        }
        if option.option_text.trim().is_empty() {
            return Err(ValidationError::new("option_text_required")
                .with_message(format!("option {letter} must not be empty").into()));
        }
    }
    Ok(())
}

/// Editable draft of a question; shared by the panel form and the inline editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuestionForm {
    pub(crate) question_text: String,
    pub(crate) options: [String; 4],
    pub(crate) correct_answer: OptionLetter,
    pub(crate) explanation: String,
}

impl QuestionForm {
    /// Copies the question so draft edits never reach the listed original.
    pub(crate) fn from_question(question: &Question) -> Self {
        let options = OptionLetter::ALL
            .map(|letter| question.option_text(letter).unwrap_or_default().to_string());
        Self {
            question_text: question.question_text.clone(),
            options,
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn set_option(&mut self, letter: OptionLetter, text: &str) {
        self.options[letter.index()] = text.to_string();
    }

    pub(crate) fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "questionText" | "question_text" | "text" => self.question_text = value.to_string(),
            "correctAnswer" | "correct_answer" | "answer" => self.correct_answer = value.parse()?,
            "explanation" => self.explanation = value.to_string(),
            other => match other.strip_prefix("option") {
                Some(letter) if !letter.is_empty() => self.set_option(letter.parse()?, value),
                _ => return Err(FormError::UnknownField(other.to_string())),
            },
        }
        Ok(())
    }

    pub(crate) fn to_payload(&self, exam_id: &str) -> Result<QuestionPayload, FormError> {
        let question_text = require("questionText", &self.question_text)?.to_string();
        for (letter, text) in OptionLetter::ALL.iter().zip(&self.options) {
            if text.trim().is_empty() {
                return Err(FormError::Missing(option_field(*letter)));
            }
        }

        let options = OptionLetter::ALL
            .iter()
            .zip(&self.options)
            .map(|(letter, text)| QuestionOption {
                option_letter: *letter,
                option_text: text.trim().to_string(),
            })
            .collect();

        let payload = QuestionPayload {
            exam_id: exam_id.to_string(),
            question_text,
            options,
            correct_answer: self.correct_answer,
            explanation: self.explanation.trim().to_string(),
            question_type: QuestionType::Mcq,
        };
        payload.validate()?;
        Ok(payload)
    }
}

fn option_field(letter: OptionLetter) -> &'static str {
    match letter {
        OptionLetter::A => "option A",
        OptionLetter::B => "option B",
        OptionLetter::C => "option C",
        OptionLetter::D => "option D",
    }
}
