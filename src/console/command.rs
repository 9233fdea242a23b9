use thiserror::Error;

use crate::schemas::question::OptionLetter;

pub(crate) const HELP: &str = "\
exams                        list exams
exam new | exam edit <id>    open the exam form
exam toggle                  open a blank exam form, or close the open one
exam delete <id>             delete an exam
assign <examId>              open the assignment modal
assign open <examId>         same, for exam ids such as 'confirm' or 'cancel'
toggle <studentId>           select or deselect a student
assign confirm | assign cancel
questions <examId>           manage the questions of an exam
question new | question edit <id> | question inline <id> | question delete <id>
question toggle              open a blank question form, or close the open one
option <A-D> <text>          set an option of the question draft
set <field> <value>          set a field of the open form
show                         render the current screen
save | cancel                submit or discard the open form
back                         return to the exam list
help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Quit,
    Exams,
    Back,
    Show,
    Save,
    Cancel,
    Set { field: String, value: String },
    ExamNew,
    ExamToggle,
    ExamEdit(String),
    ExamDelete(String),
    Assign(String),
    Toggle(String),
    AssignConfirm,
    AssignCancel,
    Questions(String),
    QuestionNew,
    QuestionToggle,
    QuestionEdit(String),
    QuestionInline(String),
    QuestionDelete(String),
    Option { letter: OptionLetter, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },
    #[error("option letter must be A-D, got '{0}'")]
    InvalidLetter(String),
}

/// Splits off the first word; the remainder keeps its inner spacing.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn required(
    value: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    let (word, _) = split_word(value);
    if word.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(word.to_string())
    }
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let (head, rest) = split_word(line.trim());
        let command = match head.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "exams" => Command::Exams,
            "back" => Command::Back,
            "show" => Command::Show,
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        argument: "a field name",
                    });
                }
                Command::Set { field: field.to_string(), value: value.to_string() }
            }
            "exam" => {
                let (action, arg) = split_word(rest);
                match action {
                    "new" => Command::ExamNew,
                    "toggle" => Command::ExamToggle,
                    "edit" => Command::ExamEdit(required(arg, "exam edit", "an exam id")?),
                    "delete" => Command::ExamDelete(required(arg, "exam delete", "an exam id")?),
                    "" => {
                        return Err(CommandError::MissingArgument {
                            command: "exam",
                            argument: "new, toggle, edit or delete",
                        })
                    }
                    other => return Err(CommandError::Unknown(format!("exam {other}"))),
                }
            }
            "assign" => {
                let (action, arg) = split_word(rest);
                match action {
                    "confirm" => Command::AssignConfirm,
                    "cancel" => Command::AssignCancel,
                    "open" => Command::Assign(required(arg, "assign open", "an exam id")?),
                    _ => Command::Assign(required(rest, "assign", "an exam id")?),
                }
            }
            "toggle" => Command::Toggle(required(rest, "toggle", "a student id")?),
            "questions" => Command::Questions(required(rest, "questions", "an exam id")?),
            "question" => {
                let (action, arg) = split_word(rest);
                match action {
                    "new" => Command::QuestionNew,
                    "toggle" => Command::QuestionToggle,
                    "edit" => {
                        Command::QuestionEdit(required(arg, "question edit", "a question id")?)
                    }
                    "inline" => {
                        Command::QuestionInline(required(arg, "question inline", "a question id")?)
                    }
                    "delete" => {
                        Command::QuestionDelete(required(arg, "question delete", "a question id")?)
                    }
                    "" => {
                        return Err(CommandError::MissingArgument {
                            command: "question",
                            argument: "new, toggle, edit, inline or delete",
                        })
                    }
                    other => return Err(CommandError::Unknown(format!("question {other}"))),
                }
            }
            "option" => {
                let (letter, text) = split_word(rest);
                if letter.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "option",
                        argument: "a letter A-D",
                    });
                }
                let letter = letter
                    .parse::<OptionLetter>()
                    .map_err(|_| CommandError::InvalidLetter(letter.to_string()))?;
                Command::Option { letter, text: text.to_string() }
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
