#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use quiz_client::{
    app_state::AppState,
    config::Config,
    errors::AppResult,
    http::{ApiRequest, ApiResponse, HttpTransport, Method, RequestBody},
    models::{
        domain::{Answer, Attempt, AttemptOverview, Question, QuestionType, Quiz, TempQuestion, UserAnswer},
        dto::request::{QuestionRequest, QuizRequest, StartAttemptRequest, SubmitAttemptRequest},
    },
};

pub const PASSWORD: &str = "correct-horse";

pub fn test_config() -> Config {
    Config {
        api_base_url: "http://127.0.0.1:8000/api".to_string(),
        request_timeout_secs: 5,
        max_auth_retries: 1,
        username: None,
        password: None,
    }
}

/// Wires the real service graph over an in-memory backend.
pub fn app_with_backend() -> (AppState, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::new());
    let app = AppState::with_transport(test_config(), backend.clone());
    (app, backend)
}

#[derive(Default)]
struct Store {
    next_id: i64,
    quizzes: BTreeMap<i64, Quiz>,
    attempts: BTreeMap<i64, Attempt>,
    temp_questions: BTreeMap<i64, Vec<TempQuestion>>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn persist_answers(&mut self, answers: Vec<Answer>) -> Vec<Answer> {
        answers
            .into_iter()
            .map(|answer| Answer {
                id: Some(answer.id.unwrap_or_else(|| self.next_id())),
                ..answer
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct QuestionIds {
    question_ids: Vec<i64>,
}

/// Backend double that speaks the same paths and payloads as the real API.
///
/// `expire_session` makes every non-auth call answer 401 until a refresh
/// succeeds; `reject_refresh` makes that refresh fail.
pub struct InMemoryBackend {
    store: RwLock<Store>,
    user: RwLock<Option<String>>,
    expired: AtomicBool,
    refresh_rejected: AtomicBool,
    refresh_calls: AtomicU32,
    requests: RwLock<Vec<ApiRequest>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 100,
                ..Store::default()
            }),
            user: RwLock::new(None),
            expired: AtomicBool::new(false),
            refresh_rejected: AtomicBool::new(false),
            refresh_calls: AtomicU32::new(0),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn expire_session(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    pub fn reject_refresh(&self) {
        self.refresh_rejected.store(true, Ordering::SeqCst);
    }

    pub fn refresh_calls(&self) -> u32 {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub async fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    pub async fn quiz(&self, quiz_id: i64) -> Option<Quiz> {
        self.store.read().await.quizzes.get(&quiz_id).cloned()
    }

    pub async fn seed_quiz(&self, title: &str, questions: Vec<(&str, QuestionType, Vec<Answer>)>) -> Quiz {
        let mut store = self.store.write().await;
        let id = store.next_id();
        let mut quiz = Quiz {
            id,
            title: title.to_string(),
            description: String::new(),
            creator: None,
            created_at: Some(Utc::now()),
            questions: Vec::new(),
        };
        for (text, question_type, answers) in questions {
            let question_id = store.next_id();
            let answers = store.persist_answers(answers);
            quiz.questions.push(Question {
                id: question_id,
                text: text.to_string(),
                question_type,
                answers,
            });
        }
        store.quizzes.insert(id, quiz.clone());
        quiz
    }

    pub async fn seed_temp_questions(&self, quiz_id: i64, texts: &[&str]) -> Vec<TempQuestion> {
        let mut store = self.store.write().await;
        let mut created = Vec::new();
        for text in texts {
            let id = store.next_id();
            let answers = store.persist_answers(vec![Answer::new("Yes", true), Answer::new("No", false)]);
            created.push(TempQuestion {
                id,
                text: text.to_string(),
                question_type: QuestionType::MultipleChoice,
                temp_answers: answers,
            });
        }
        store
            .temp_questions
            .entry(quiz_id)
            .or_default()
            .extend(created.clone());
        created
    }

    async fn handle(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let segments: Vec<&str> = request.path.split('/').filter(|s| !s.is_empty()).collect();

        match (request.method, segments.as_slice()) {
            (Method::Post, ["users", "token"]) => return self.login(request).await,
            (Method::Post, ["users", "token", "refresh"]) => return self.refresh().await,
            (Method::Post, ["users", "logout"]) => {
                *self.user.write().await = None;
                return Ok(ApiResponse::no_content());
            }
            (Method::Get, ["users", "auth-check"]) => {
                let user = self.user.read().await.clone();
                let authenticated = user.is_some() && !self.expired.load(Ordering::SeqCst);
                return ApiResponse::ok_json(&json!({"authenticated": authenticated, "username": user}));
            }
            _ => {}
        }

        if self.user.read().await.is_none() || self.expired.load(Ordering::SeqCst) {
            return Ok(unauthorized());
        }

        let mut store = self.store.write().await;
        match (request.method, segments.as_slice()) {
            (Method::Get, ["quizzes"]) => {
                let quizzes: Vec<Quiz> = store.quizzes.values().cloned().collect();
                ApiResponse::ok_json(&quizzes)
            }
            (Method::Post, ["quizzes"]) => {
                let body: QuizRequest = parse(request)?;
                let id = store.next_id();
                let quiz = Quiz {
                    id,
                    title: body.title,
                    description: body.description,
                    creator: None,
                    created_at: Some(Utc::now()),
                    questions: Vec::new(),
                };
                store.quizzes.insert(id, quiz.clone());
                created(&quiz)
            }
            (method, ["quizzes", id]) => {
                let id = parse_id(id);
                let Some(quiz) = store.quizzes.get_mut(&id) else {
                    return Ok(not_found());
                };
                match method {
                    Method::Get => ApiResponse::ok_json(&*quiz),
                    Method::Put => {
                        let body: QuizRequest = parse(request)?;
                        quiz.title = body.title;
                        quiz.description = body.description;
                        ApiResponse::ok_json(&*quiz)
                    }
                    Method::Delete => {
                        store.quizzes.remove(&id);
                        Ok(ApiResponse::no_content())
                    }
                    Method::Post => Ok(not_found()),
                }
            }
            (Method::Get, ["quizzes", id, "questions"]) => {
                match store.quizzes.get(&parse_id(id)) {
                    Some(quiz) => ApiResponse::ok_json(&quiz.questions),
                    None => Ok(not_found()),
                }
            }
            (Method::Post, ["quizzes", id, "questions"]) => {
                let body: QuestionRequest = parse(request)?;
                let quiz_id = parse_id(id);
                if !store.quizzes.contains_key(&quiz_id) {
                    return Ok(not_found());
                }
                let question = Question {
                    id: store.next_id(),
                    text: body.text,
                    question_type: body.question_type,
                    answers: store.persist_answers(body.answers),
                };
                if let Some(quiz) = store.quizzes.get_mut(&quiz_id) {
                    quiz.questions.push(question.clone());
                }
                created(&question)
            }
            (method, ["quizzes", quiz_id, "questions", question_id]) => {
                let quiz_id = parse_id(quiz_id);
                let question_id = parse_id(question_id);
                let answers = match method {
                    Method::Put => {
                        let body: QuestionRequest = parse(request)?;
                        Some((body.text, body.question_type, store.persist_answers(body.answers)))
                    }
                    _ => None,
                };
                let Some(quiz) = store.quizzes.get_mut(&quiz_id) else {
                    return Ok(not_found());
                };
                let Some(position) = quiz.questions.iter().position(|q| q.id == question_id) else {
                    return Ok(not_found());
                };
                match (method, answers) {
                    (Method::Get, _) => ApiResponse::ok_json(&quiz.questions[position]),
                    (Method::Put, Some((text, question_type, answers))) => {
                        let question = &mut quiz.questions[position];
                        question.text = text;
                        question.question_type = question_type;
                        question.answers = answers;
                        ApiResponse::ok_json(&*question)
                    }
                    (Method::Delete, _) => {
                        quiz.questions.remove(position);
                        Ok(ApiResponse::no_content())
                    }
                    _ => Ok(not_found()),
                }
            }
            (Method::Delete, ["quizzes", quiz_id, "questions", question_id, "answers", answer_id]) => {
                let question_id = parse_id(question_id);
                let answer_id = parse_id(answer_id);
                let question = store
                    .quizzes
                    .get_mut(&parse_id(quiz_id))
                    .and_then(|quiz| quiz.questions.iter_mut().find(|q| q.id == question_id));
                match question {
                    Some(question) => {
                        question.answers.retain(|a| a.id != Some(answer_id));
                        Ok(ApiResponse::no_content())
                    }
                    None => Ok(not_found()),
                }
            }
            (Method::Get, ["quizzes", id, "temp-questions"]) => {
                let questions = store
                    .temp_questions
                    .get(&parse_id(id))
                    .cloned()
                    .unwrap_or_default();
                ApiResponse::ok_json(&json!({ "questions": questions }))
            }
            (Method::Post, ["quizzes", id, "temp-questions", "add"]) => {
                let body: QuestionIds = parse(request)?;
                let quiz_id = parse_id(id);
                let pending = store.temp_questions.remove(&quiz_id).unwrap_or_default();
                let (chosen, rest): (Vec<_>, Vec<_>) =
                    pending.into_iter().partition(|q| body.question_ids.contains(&q.id));
                store.temp_questions.insert(quiz_id, rest);
                let mut added = Vec::new();
                for temp in chosen {
                    let question = Question {
                        id: store.next_id(),
                        text: temp.text,
                        question_type: temp.question_type,
                        answers: temp.temp_answers,
                    };
                    added.push(question);
                }
                match store.quizzes.get_mut(&quiz_id) {
                    Some(quiz) => {
                        quiz.questions.extend(added);
                        ApiResponse::ok_json(&json!({"status": "ok"}))
                    }
                    None => Ok(not_found()),
                }
            }
            (Method::Post, ["quizzes", id, "upload"]) => {
                let RequestBody::File(file) = &request.body else {
                    return Ok(bad_request("No file uploaded"));
                };
                let quiz_id = parse_id(id);
                let temp = TempQuestion {
                    id: store.next_id(),
                    text: format!("What is {} about?", file.file_name),
                    question_type: QuestionType::ShortAnswer,
                    temp_answers: store.persist_answers(vec![Answer::new("Testing", true)]),
                };
                store.temp_questions.entry(quiz_id).or_default().push(temp);
                ApiResponse::ok_json(&json!({"status": "processing"}))
            }
            (Method::Post, ["attempts"]) => {
                let body: StartAttemptRequest = parse(request)?;
                if !store.quizzes.contains_key(&body.quiz) {
                    return Ok(not_found());
                }
                let attempt = Attempt {
                    id: store.next_id(),
                    quiz: body.quiz,
                    user: None,
                    start_time: Utc::now(),
                    end_time: None,
                    score: None,
                    user_answers: Vec::new(),
                    correct_answers: None,
                    total_questions: None,
                };
                store.attempts.insert(attempt.id, attempt.clone());
                created(&attempt)
            }
            (Method::Get, ["attempts", "overview"]) => {
                let rows: Vec<AttemptOverview> = store
                    .quizzes
                    .values()
                    .map(|quiz| {
                        let attempts: Vec<&Attempt> =
                            store.attempts.values().filter(|a| a.quiz == quiz.id).collect();
                        AttemptOverview {
                            id: quiz.id,
                            title: quiz.title.clone(),
                            attempt_count: attempts.len() as u32,
                            highest_score: attempts.iter().filter_map(|a| a.score).reduce(f64::max),
                        }
                    })
                    .collect();
                ApiResponse::ok_json(&rows)
            }
            (Method::Get, ["attempts", id]) => match store.attempts.get(&parse_id(id)) {
                Some(attempt) => ApiResponse::ok_json(attempt),
                None => Ok(not_found()),
            },
            (Method::Post, ["attempts", id, "submit"]) => {
                let body: SubmitAttemptRequest = parse(request)?;
                let attempt_id = parse_id(id);
                let Some(quiz) = store
                    .attempts
                    .get(&attempt_id)
                    .and_then(|a| store.quizzes.get(&a.quiz))
                    .cloned()
                else {
                    return Ok(not_found());
                };
                let Some(attempt) = store.attempts.get_mut(&attempt_id) else {
                    return Ok(not_found());
                };
                if attempt.end_time.is_some() {
                    return Ok(bad_request("Attempt already submitted"));
                }
                grade(attempt, &quiz, body);
                ApiResponse::ok_json(&*attempt)
            }
            _ => Ok(not_found()),
        }
    }

    async fn login(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let credentials: Credentials = parse(request)?;
        if credentials.password != PASSWORD {
            return Ok(unauthorized());
        }
        *self.user.write().await = Some(credentials.username.clone());
        self.expired.store(false, Ordering::SeqCst);
        ApiResponse::ok_json(&json!({"username": credentials.username}))
    }

    async fn refresh(&self) -> AppResult<ApiResponse> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        let user = self.user.read().await.clone();
        match user {
            Some(username) if !self.refresh_rejected.load(Ordering::SeqCst) => {
                self.expired.store(false, Ordering::SeqCst);
                ApiResponse::ok_json(&json!({"username": username}))
            }
            _ => Ok(unauthorized()),
        }
    }
}

#[async_trait]
impl HttpTransport for InMemoryBackend {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.requests.write().await.push(request.clone());
        self.handle(&request).await
    }
}

/// Scores the submission the way the backend does: exact answer id for
/// multiple choice, case-insensitive trimmed text for short answers.
fn grade(attempt: &mut Attempt, quiz: &Quiz, submission: SubmitAttemptRequest) {
    let mut correct = 0u32;
    attempt.user_answers = submission
        .answers
        .into_iter()
        .map(|answer| {
            let question = quiz.question(answer.question);
            let is_correct = match question {
                Some(q) if q.question_type == QuestionType::MultipleChoice => answer
                    .selected_answer
                    .and_then(|id| q.answer(id))
                    .map(|a| a.is_correct)
                    .unwrap_or(false),
                Some(q) => match (&answer.text_answer, q.correct_answer()) {
                    (Some(text), Some(expected)) => {
                        text.trim().eq_ignore_ascii_case(expected.text.trim())
                    }
                    _ => false,
                },
                None => false,
            };
            if is_correct {
                correct += 1;
            }
            UserAnswer {
                id: None,
                question: answer.question,
                selected_answer: answer.selected_answer,
                text_answer: answer.text_answer,
                is_correct: Some(is_correct),
            }
        })
        .collect();

    let total = quiz.questions.len() as u32;
    attempt.correct_answers = Some(correct);
    attempt.total_questions = Some(total);
    attempt.score = Some(if total == 0 {
        0.0
    } else {
        f64::from(correct) * 100.0 / f64::from(total)
    });
    attempt.end_time = Some(Utc::now());
}

fn parse_id(segment: &str) -> i64 {
    segment.parse().unwrap_or_default()
}

fn parse<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> AppResult<T> {
    let body = request.json_body().cloned().unwrap_or(Value::Null);
    Ok(serde_json::from_value(body)?)
}

fn created<T: serde::Serialize>(body: &T) -> AppResult<ApiResponse> {
    Ok(ApiResponse::new(StatusCode::CREATED, serde_json::to_string(body)?))
}

fn unauthorized() -> ApiResponse {
    ApiResponse::new(StatusCode::UNAUTHORIZED, r#"{"detail":"Token is invalid or expired"}"#)
}

fn not_found() -> ApiResponse {
    ApiResponse::new(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#)
}

fn bad_request(detail: &str) -> ApiResponse {
    ApiResponse::new(StatusCode::BAD_REQUEST, json!({ "detail": detail }).to_string())
}
