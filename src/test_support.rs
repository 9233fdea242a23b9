use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::admin::feedback::{Feedback, Notice, NoticeLevel, Route};
use crate::schemas::exam::{Exam, ExamPayload};
use crate::schemas::question::{
    OptionLetter, Question, QuestionOption, QuestionPayload, QuestionType,
};
use crate::schemas::student::Student;
use crate::services::api::{AdminApi, ApiError};

pub(crate) fn exam(id: &str, title: &str) -> Exam {
    Exam {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        duration: 60,
        total_marks: 100.0,
        per_question_marks: 5.0,
        negative_marking: Some(0.0),
        total_questions: 20,
        exam_date: "2024-05-01T00:00:00.000Z".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        passing_marks: Some(40.0),
        assigned_students: Vec::new(),
    }
}

pub(crate) fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        question_text: text.to_string(),
        options: OptionLetter::ALL
            .iter()
            .map(|letter| QuestionOption {
                option_letter: *letter,
                option_text: format!("answer {letter}"),
            })
            .collect(),
        correct_answer: OptionLetter::A,
        explanation: None,
        question_type: QuestionType::Mcq,
    }
}

pub(crate) fn student(id: &str, name: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: Some(format!("{}@school.test", name.to_lowercase())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListExams,
    GetExam(String),
    CreateExam(ExamPayload),
    UpdateExam(String, ExamPayload),
    DeleteExam(String),
    AssignExam(String, Vec<String>),
    ListQuestions(String),
    CreateQuestion(QuestionPayload),
    UpdateQuestion(String, QuestionPayload),
    DeleteQuestion(String),
    ListStudents,
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateExam(_)
                | Call::UpdateExam(..)
                | Call::DeleteExam(_)
                | Call::AssignExam(..)
                | Call::CreateQuestion(_)
                | Call::UpdateQuestion(..)
                | Call::DeleteQuestion(_)
        )
    }
}

#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    message: Option<String>,
}

impl Failure {
    fn to_error(&self) -> ApiError {
        if self.status == 404 {
            ApiError::NotFound { message: self.message.clone() }
        } else {
            ApiError::Status { status: self.status, message: self.message.clone() }
        }
    }
}

#[derive(Default)]
struct FakeState {
    exams: Vec<Exam>,
    questions: Vec<(String, Question)>,
    students: Vec<Student>,
    calls: Vec<Call>,
    failures: HashMap<&'static str, Failure>,
    next_id: u32,
}

impl FakeState {
    fn check(&self, op: &'static str) -> Result<(), ApiError> {
        match self.failures.get(op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory backend that records every call and can be told to fail per operation.
#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub(crate) fn insert_exam(&self, exam: Exam) {
        self.state.lock().unwrap().exams.push(exam);
    }

    pub(crate) fn insert_question(&self, exam_id: &str, question: Question) {
        self.state.lock().unwrap().questions.push((exam_id.to_string(), question));
    }

    pub(crate) fn insert_student(&self, student: Student) {
        self.state.lock().unwrap().students.push(student);
    }

    /// Makes `op` (the trait method name) fail until `recover` is called.
    pub(crate) fn fail(&self, op: &'static str, status: u16, message: Option<&str>) {
        let failure = Failure { status, message: message.map(str::to_string) };
        self.state.lock().unwrap().failures.insert(op, failure);
    }

    pub(crate) fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn mutation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub(crate) fn assigned_students(&self, exam_id: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .exams
            .iter()
            .find(|exam| exam.id == exam_id)
            .map(|exam| {
                exam.assigned_students
                    .iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn exam_from_payload(id: String, payload: &ExamPayload) -> Exam {
    Exam {
        id,
        title: payload.title.clone(),
        description: Some(payload.description.clone()),
        duration: payload.duration,
        total_marks: payload.total_marks as f64,
        per_question_marks: payload.per_question_marks as f64,
        negative_marking: payload.negative_marking.map(|marks| marks as f64),
        total_questions: payload.total_questions,
        exam_date: payload.exam_date.clone(),
        start_time: payload.start_time.clone(),
        end_time: payload.end_time.clone(),
        passing_marks: payload.passing_marks.map(|marks| marks as f64),
        assigned_students: Vec::new(),
    }
}

fn question_from_payload(id: String, payload: &QuestionPayload) -> Question {
    Question {
        id,
        question_text: payload.question_text.clone(),
        options: payload.options.clone(),
        correct_answer: payload.correct_answer,
        explanation: Some(payload.explanation.clone()).filter(|text| !text.is_empty()),
        question_type: payload.question_type,
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_exams(&self) -> Result<Vec<Exam>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListExams);
        state.check("list_exams")?;
        Ok(state.exams.clone())
    }

    async fn get_exam(&self, exam_id: &str) -> Result<Exam, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetExam(exam_id.to_string()));
        state.check("get_exam")?;
        state
            .exams
            .iter()
            .find(|exam| exam.id == exam_id)
            .cloned()
            .ok_or(ApiError::NotFound { message: Some("Exam not found".to_string()) })
    }

    async fn create_exam(&self, payload: &ExamPayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateExam(payload.clone()));
        state.check("create_exam")?;
        let id = state.next_id("exam");
        state.exams.push(exam_from_payload(id, payload));
        Ok(())
    }

    async fn update_exam(&self, exam_id: &str, payload: &ExamPayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdateExam(exam_id.to_string(), payload.clone()));
        state.check("update_exam")?;
        let exam = state
            .exams
            .iter_mut()
            .find(|exam| exam.id == exam_id)
            .ok_or(ApiError::NotFound { message: Some("Exam not found".to_string()) })?;
        let assigned = std::mem::take(&mut exam.assigned_students);
        *exam = exam_from_payload(exam_id.to_string(), payload);
        exam.assigned_students = assigned;
        Ok(())
    }

    async fn delete_exam(&self, exam_id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteExam(exam_id.to_string()));
        state.check("delete_exam")?;
        state.exams.retain(|exam| exam.id != exam_id);
        state.questions.retain(|(owner, _)| owner != exam_id);
        Ok(())
    }

    async fn assign_exam(&self, exam_id: &str, student_ids: &[String]) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::AssignExam(exam_id.to_string(), student_ids.to_vec()));
        state.check("assign_exam")?;
        let exam = state
            .exams
            .iter_mut()
            .find(|exam| exam.id == exam_id)
            .ok_or(ApiError::NotFound { message: Some("Exam not found".to_string()) })?;
        exam.assigned_students =
            student_ids.iter().map(|id| serde_json::Value::String(id.clone())).collect();
        Ok(())
    }

    async fn list_questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListQuestions(exam_id.to_string()));
        state.check("list_questions")?;
        Ok(state
            .questions
            .iter()
            .filter(|(owner, _)| owner == exam_id)
            .map(|(_, question)| question.clone())
            .collect())
    }

    async fn create_question(&self, payload: &QuestionPayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateQuestion(payload.clone()));
        state.check("create_question")?;
        let id = state.next_id("question");
        let question = question_from_payload(id, payload);
        state.questions.push((payload.exam_id.clone(), question));
        Ok(())
    }

    async fn update_question(
        &self,
        question_id: &str,
        payload: &QuestionPayload,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::UpdateQuestion(question_id.to_string(), payload.clone()));
        state.check("update_question")?;
        let (_, question) = state
            .questions
            .iter_mut()
            .find(|(_, question)| question.id == question_id)
            .ok_or(ApiError::NotFound { message: Some("Question not found".to_string()) })?;
        *question = question_from_payload(question_id.to_string(), payload);
        Ok(())
    }

    async fn delete_question(&self, question_id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteQuestion(question_id.to_string()));
        state.check("delete_question")?;
        state.questions.retain(|(_, question)| question.id != question_id);
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListStudents);
        state.check("list_students")?;
        Ok(state.students.clone())
    }
}

/// Records toasts and navigation; answers confirmation prompts from a script
/// (an empty script declines).
#[derive(Debug, Default)]
pub(crate) struct RecordingFeedback {
    pub(crate) notices: Vec<Notice>,
    pub(crate) prompts: Vec<String>,
    pub(crate) answers: VecDeque<bool>,
    pub(crate) routes: Vec<Route>,
}

impl RecordingFeedback {
    pub(crate) fn last_of(&self, level: NoticeLevel) -> Option<&str> {
        self.notices
            .iter()
            .rev()
            .find(|notice| notice.level == level)
            .map(|notice| notice.message.as_str())
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        self.last_of(NoticeLevel::Error)
    }

    pub(crate) fn last_success(&self) -> Option<&str> {
        self.last_of(NoticeLevel::Success)
    }
}

#[async_trait]
impl Feedback for RecordingFeedback {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}
