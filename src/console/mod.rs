//! Interactive line console that drives the admin screens.

pub(crate) mod command;
pub(crate) mod terminal;

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::admin::exams::ExamManager;
use crate::admin::feedback::{Feedback, Notice, Route};
use crate::admin::questions::{QuestionManager, QuestionsLoad};
use crate::admin::render::{AssignView, ExamFormView, ExamList, QuestionScreen};
use crate::core::session::AdminSession;
use crate::services::api::AdminApi;

use self::command::{Command, HELP};
use self::terminal::{Input, Terminal};

enum Flow {
    Quiet,
    Render,
    Quit,
}

pub(crate) struct Console {
    api: Arc<dyn AdminApi>,
    session: AdminSession,
    exams: ExamManager,
    questions: Option<QuestionManager>,
}

impl Console {
    pub(crate) fn new(api: Arc<dyn AdminApi>, session: AdminSession) -> Self {
        let exams = ExamManager::new(api.clone());
        Self { api, session, exams, questions: None }
    }

    /// Reads commands until `quit`, end of input or a shutdown request on the terminal.
    pub(crate) async fn run<R, W>(&mut self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let banner = format!(
            "Exam admin console, signed in as {}. Type 'help' for commands.",
            self.session.display_name()
        );
        terminal.write_line(&banner).await?;
        self.exams.mount(terminal).await;
        terminal.flush_notices().await?;
        self.render(terminal).await?;

        loop {
            terminal.write(&self.prompt()).await?;
            let line = match terminal.read_input().await? {
                Input::Line(line) => line,
                Input::Stopped => {
                    terminal.write_line("").await?;
                    break;
                }
                Input::Closed => {
                    tracing::debug!("Console input closed");
                    break;
                }
            };

            let mut flow = match Command::parse(&line) {
                Ok(Some(command)) => self.dispatch(command, terminal).await?,
                Ok(None) => Flow::Quiet,
                Err(err) => {
                    terminal.notify(Notice::error(err.to_string()));
                    Flow::Quiet
                }
            };
            terminal.flush_notices().await?;

            while let Some(route) = terminal.take_route() {
                self.follow(route, terminal).await;
                terminal.flush_notices().await?;
                flow = Flow::Render;
            }

            match flow {
                Flow::Quit => break,
                Flow::Render => self.render(terminal).await?,
                Flow::Quiet => {}
            }
        }

        tracing::info!("Console closed");
        Ok(())
    }

    fn prompt(&self) -> String {
        match &self.questions {
            Some(questions) => {
                format!("{}@questions/{}> ", self.session.display_name(), questions.exam_id())
            }
            None => format!("{}@exams> ", self.session.display_name()),
        }
    }

    async fn dispatch<R, W>(
        &mut self,
        command: Command,
        terminal: &mut Terminal<R, W>,
    ) -> io::Result<Flow>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let flow = match command {
            Command::Help => {
                terminal.write_line(HELP).await?;
                Flow::Quiet
            }
            Command::Quit => Flow::Quit,
            Command::Show => Flow::Render,
            Command::Exams | Command::Back => {
                terminal.navigate(Route::ExamList);
                Flow::Quiet
            }
            Command::Questions(exam_id) => {
                terminal.navigate(Route::Questions(exam_id));
                Flow::Quiet
            }
            Command::Save => {
                let saved = match self.questions.as_mut() {
                    Some(questions) => questions.submit(terminal).await,
                    None => self.exams.submit(terminal).await,
                };
                rendered_if(saved)
            }
            Command::Cancel => {
                match self.questions.as_mut() {
                    Some(questions) => questions.cancel_edit(),
                    None => self.exams.cancel_form(),
                }
                Flow::Render
            }
            Command::Set { field, value } => {
                let result = match self.questions.as_mut() {
                    Some(questions) if questions.form().is_open() => {
                        questions.set_field(&field, &value).map(|()| true)
                    }
                    None if self.exams.form().is_open() => {
                        self.exams.set_field(&field, &value).map(|()| true)
                    }
                    _ => Ok(false),
                };
                match result {
                    Ok(true) => {}
                    Ok(false) => terminal.notify(Notice::error("No form is open")),
                    Err(err) => terminal.notify(Notice::error(err.to_string())),
                }
                Flow::Quiet
            }
            Command::ExamNew => {
                if let Some(exams) = self.exam_screen(terminal) {
                    exams.open_create();
                }
                Flow::Render
            }
            Command::ExamToggle => {
                if let Some(exams) = self.exam_screen(terminal) {
                    exams.toggle_form();
                }
                Flow::Render
            }
            Command::ExamEdit(exam_id) => {
                if let Some(exams) = self.exam_screen(terminal) {
                    if !exams.open_edit(&exam_id) {
                        terminal.notify(Notice::error(format!("Exam {exam_id} is not listed")));
                    }
                }
                Flow::Render
            }
            Command::ExamDelete(exam_id) => {
                let deleted = match self.exam_screen(terminal) {
                    Some(exams) => exams.delete(&exam_id, terminal).await,
                    None => false,
                };
                rendered_if(deleted)
            }
            Command::Assign(exam_id) => {
                if let Some(exams) = self.exam_screen(terminal) {
                    if exams.exams().iter().any(|exam| exam.id == exam_id) {
                        exams.open_assign_modal(&exam_id);
                    } else {
                        terminal.notify(Notice::error(format!("Exam {exam_id} is not listed")));
                    }
                }
                Flow::Render
            }
            Command::Toggle(student_id) => {
                if let Some(exams) = self.exam_screen(terminal) {
                    if exams.toggle_student(&student_id).is_none() {
                        terminal.notify(Notice::error(format!(
                            "Student {student_id} cannot be toggled; is the assignment open?"
                        )));
                    }
                }
                Flow::Render
            }
            Command::AssignConfirm => match self.exam_screen(terminal) {
                Some(exams) if !exams.assignment().is_open() => {
                    terminal.notify(Notice::error("No assignment is open"));
                    Flow::Quiet
                }
                Some(exams) => {
                    exams.confirm_assignment(terminal).await;
                    Flow::Render
                }
                None => Flow::Quiet,
            },
            Command::AssignCancel => {
                if let Some(exams) = self.exam_screen(terminal) {
                    exams.close_assign_modal();
                }
                Flow::Render
            }
            Command::QuestionNew => {
                if let Some(questions) = self.question_screen(terminal) {
                    questions.open_create();
                }
                Flow::Render
            }
            Command::QuestionToggle => {
                if let Some(questions) = self.question_screen(terminal) {
                    questions.toggle_form();
                }
                Flow::Render
            }
            Command::QuestionEdit(question_id) => {
                if let Some(questions) = self.question_screen(terminal) {
                    if !questions.edit_in_panel(&question_id) {
                        terminal.notify(question_missing(&question_id));
                    }
                }
                Flow::Render
            }
            Command::QuestionInline(question_id) => {
                if let Some(questions) = self.question_screen(terminal) {
                    if !questions.edit_inline(&question_id) {
                        terminal.notify(question_missing(&question_id));
                    }
                }
                Flow::Render
            }
            Command::QuestionDelete(question_id) => {
                let deleted = match self.question_screen(terminal) {
                    Some(questions) => questions.delete(&question_id, terminal).await,
                    None => false,
                };
                rendered_if(deleted)
            }
            Command::Option { letter, text } => {
                match self.question_screen(terminal) {
                    Some(questions) if questions.form().is_open() => {
                        questions.set_option(letter, &text)
                    }
                    Some(_) => terminal.notify(Notice::error("No question form is open")),
                    None => {}
                }
                Flow::Quiet
            }
        };
        Ok(flow)
    }

    async fn follow(&mut self, route: Route, ui: &mut dyn Feedback) {
        match route {
            Route::ExamList => {
                self.questions = None;
                self.exams.load_exams(ui).await;
            }
            Route::Questions(exam_id) => {
                let mut questions = QuestionManager::new(self.api.clone(), exam_id);
                if questions.load(ui).await != QuestionsLoad::Unrecoverable {
                    self.questions = Some(questions);
                }
            }
        }
    }

    fn exam_screen(&mut self, ui: &mut dyn Feedback) -> Option<&mut ExamManager> {
        if self.questions.is_some() {
            ui.notify(Notice::error("Exam commands need the exam list; type 'back' first"));
            return None;
        }
        Some(&mut self.exams)
    }

    fn question_screen(&mut self, ui: &mut dyn Feedback) -> Option<&mut QuestionManager> {
        if self.questions.is_none() {
            ui.notify(Notice::error("Open an exam first with 'questions <examId>'"));
        }
        self.questions.as_mut()
    }

    async fn render<R, W>(&self, terminal: &mut Terminal<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let view = match &self.questions {
            Some(questions) => QuestionScreen {
                exam: questions.exam(),
                questions: questions.questions(),
                form: questions.form(),
            }
            .to_string(),
            None => {
                let mut view = ExamList(self.exams.exams()).to_string();
                if self.exams.form().is_open() {
                    view.push_str(&ExamFormView(self.exams.form()).to_string());
                }
                view.push_str(
                    &AssignView {
                        modal: self.exams.assignment(),
                        students: self.exams.students(),
                    }
                    .to_string(),
                );
                view
            }
        };
        terminal.write(&view).await
    }
}

fn rendered_if(changed: bool) -> Flow {
    if changed {
        Flow::Render
    } else {
        Flow::Quiet
    }
}

fn question_missing(question_id: &str) -> Notice {
    Notice::error(format!("Question {question_id} is not listed"))
}
