use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::*;

#[derive(Default)]
struct Captured {
    authorization: Option<String>,
    request_ids: Vec<String>,
    bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Captured>>;

fn record(state: &Shared, headers: &HeaderMap, body: Option<Value>) {
    let mut captured = state.lock().unwrap();
    captured.authorization =
        headers.get("authorization").and_then(|value| value.to_str().ok()).map(str::to_string);
    if let Some(id) = headers.get(REQUEST_ID_HEADER).and_then(|value| value.to_str().ok()) {
        captured.request_ids.push(id.to_string());
    }
    if let Some(body) = body {
        captured.bodies.push(body);
    }
}

fn exam_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "Unit test exam",
        "duration": 60,
        "totalMarks": 100,
        "perQuestionMarks": 5,
        "negativeMarking": 0,
        "totalQuestions": 20,
        "examDate": "2024-05-01T00:00:00.000Z",
        "startTime": "09:00",
        "endTime": "10:00",
        "passingMarks": 40,
        "assignedStudents": ["s1"]
    })
}

async fn list_exams(State(state): State<Shared>, headers: HeaderMap) -> Json<Value> {
    record(&state, &headers, None);
    let mut legacy = exam_json("e3", "Legacy Quiz");
    legacy["assignedStudents"] = Value::Null;
    legacy["negativeMarking"] = json!(0.25);
    legacy["duration"] = json!(30.0);
    Json(json!({"data": [exam_json("e1", "Midterm"), exam_json("e2", "Final"), legacy]}))
}

async fn get_exam(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, &headers, None);
    if id == "e1" {
        (StatusCode::OK, Json(json!({"data": exam_json("e1", "Midterm")})))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Exam not found"})))
    }
}

async fn create_exam(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, &headers, Some(body.clone()));
    if body["title"] == "Duplicate" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Exam title already exists"})),
        );
    }
    (StatusCode::CREATED, Json(json!({"data": {"_id": "e3"}})))
}

async fn assign_exam(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&state, &headers, Some(body));
    Json(json!({"data": null, "message": "Assigned"}))
}

async fn list_questions(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "e1" {
        (
            StatusCode::OK,
            Json(json!({"data": [{
                "_id": "q1",
                "examId": "e1",
                "questionText": "2 + 2 = ?",
                "options": [
                    {"optionLetter": "A", "optionText": "3"},
                    {"optionLetter": "B", "optionText": "4"},
                    {"optionLetter": "C", "optionText": "5"},
                    {"optionLetter": "D", "optionText": "22"}
                ],
                "correctAnswer": "B",
                "questionType": "mcq"
            }]})),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "No questions found for this exam"})))
    }
}

async fn list_students() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": [{"msg": "database offline"}]})))
}

async fn spawn_stub() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/api/exams", get(list_exams).post(create_exam))
        .route("/api/exams/:id", get(get_exam).delete(|| async { StatusCode::NO_CONTENT }))
        .route("/api/exams/:id/assign", post(assign_exam))
        .route("/api/questions/exam/:id", get(list_questions))
        .route("/api/students", get(list_students))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (format!("http://{addr}/api"), state)
}

fn client_for(base_url: &str, token: Option<&str>) -> HttpAdminApi {
    let base_url = ApiBaseUrl::parse(base_url.to_string()).expect("base url");
    HttpAdminApi::new(Client::new(), base_url, AdminSession::new(token.map(str::to_string), None))
}

#[tokio::test]
async fn list_exams_unwraps_envelope_and_sends_credentials() {
    let (base_url, state) = spawn_stub().await;
    let api = client_for(&base_url, Some("admin-token"));

    let exams = api.list_exams().await.expect("exams");

    assert_eq!(exams.len(), 3);
    assert_eq!(exams[0].id, "e1");
    assert_eq!(exams[1].title, "Final");
    assert_eq!(exams[0].assigned_students.len(), 1);

    let captured = state.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer admin-token"));
    assert_eq!(captured.request_ids.len(), 1);
    assert!(Uuid::parse_str(&captured.request_ids[0]).is_ok());
}

#[tokio::test]
async fn loosely_shaped_exam_does_not_sink_the_list() {
    let (base_url, _state) = spawn_stub().await;
    let api = client_for(&base_url, None);

    let exams = api.list_exams().await.expect("exams");

    let legacy = exams.iter().find(|exam| exam.id == "e3").expect("legacy exam listed");
    assert!(legacy.assigned_students.is_empty());
    assert_eq!(legacy.negative_marking, Some(0.25));
    assert_eq!(legacy.duration, 30);
}

#[tokio::test]
async fn missing_exam_maps_to_not_found_with_message() {
    let (base_url, _state) = spawn_stub().await;
    let api = client_for(&base_url, None);

    let exam = api.get_exam("e1").await.expect("exam");
    assert_eq!(exam.title, "Midterm");

    let err = api.get_exam("nope").await.expect_err("missing exam");
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Exam not found"));
}

#[tokio::test]
async fn create_exam_posts_numbers_and_surfaces_server_message() {
    let (base_url, state) = spawn_stub().await;
    let api = client_for(&base_url, None);

    let payload = ExamPayload {
        title: "Midterm".to_string(),
        description: String::new(),
        duration: 45,
        total_marks: 100,
        per_question_marks: 5,
        negative_marking: None,
        total_questions: 20,
        exam_date: "2024-05-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "09:45".to_string(),
        passing_marks: Some(40),
    };
    api.create_exam(&payload).await.expect("create");

    let duplicate = ExamPayload { title: "Duplicate".to_string(), ..payload };
    let err = api.create_exam(&duplicate).await.expect_err("duplicate");
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert_eq!(err.server_message(), Some("Exam title already exists"));

    let captured = state.lock().unwrap();
    assert_eq!(captured.authorization, None);
    assert_eq!(captured.bodies[0]["duration"], 45);
    assert_eq!(captured.bodies[0]["totalMarks"], 100);
    assert!(captured.bodies[0]["negativeMarking"].is_null());
}

#[tokio::test]
async fn assign_and_delete_accept_empty_payloads() {
    let (base_url, state) = spawn_stub().await;
    let api = client_for(&base_url, Some("t"));

    api.assign_exam("e1", &["s1".to_string(), "s2".to_string()]).await.expect("assign");
    api.delete_exam("e1").await.expect("delete");

    let captured = state.lock().unwrap();
    assert_eq!(captured.bodies[0], json!({"studentIds": ["s1", "s2"]}));
}

#[tokio::test]
async fn question_list_distinguishes_not_found() {
    let (base_url, _state) = spawn_stub().await;
    let api = client_for(&base_url, None);

    let questions = api.list_questions("e1").await.expect("questions");
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].correct_answer, crate::schemas::question::OptionLetter::B);

    let err = api.list_questions("e2").await.expect_err("no questions");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn detail_array_is_joined_into_message() {
    let (base_url, _state) = spawn_stub().await;
    let api = client_for(&base_url, None);

    let err = api.list_students().await.expect_err("students down");
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.server_message(), Some("database offline"));
}

#[test]
fn extract_message_prefers_message_then_error() {
    assert_eq!(extract_message(&json!({"message": "m", "error": "e"})).as_deref(), Some("m"));
    assert_eq!(extract_message(&json!({"error": "e"})).as_deref(), Some("e"));
    assert_eq!(extract_message(&json!({"detail": "d"})).as_deref(), Some("d"));
    assert_eq!(extract_message(&json!({"detail": []})), None);
    assert_eq!(extract_message(&json!({})), None);
}
