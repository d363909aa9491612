use std::io::Write;

use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    app_state::AppState,
    auth::{require_authenticated, SessionState},
    cli::{
        commands::{parse_line, ShellCommand},
        input::{
            parse_attempt_input, parse_draft_input, parse_edit_input, parse_pager_input,
            AttemptInput, DraftInput, EditInput, PagerInput,
        },
        render,
    },
    errors::{AppError, AppResult},
    http::navigation::{routes, Navigator},
    views::{
        attempt_flow::{self, AttemptState},
        login::{submit_login, LoginForm},
        question_form::{self, QuestionDrafts},
        AttemptsOverview, Dashboard, QuestionBank, QuizDetail, QuizForm, TempReview,
    },
};

/// Interactive front-end. Reads commands line by line and prints views.
pub struct Shell<R, W> {
    app: AppState,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(app: AppState, reader: R, out: W) -> Self {
        Self {
            app,
            lines: reader.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn print(&mut self, text: &str) -> AppResult<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn print_error(&mut self, err: &AppError) -> AppResult<()> {
        log::debug!("Command failed with {}", err.error_code());
        match err {
            AppError::Unauthorized(_) => self.print(&format!("{}\nPlease log in again.\n", err)),
            _ => self.print(&format!("Error: {}\n", err)),
        }
    }

    /// `None` once input is exhausted.
    async fn prompt(&mut self, prompt: &str) -> AppResult<Option<String>> {
        self.print(prompt)?;
        Ok(self.lines.next_line().await?)
    }

    /// Restores or establishes a session, then runs commands until `quit`
    /// or end of input.
    pub async fn run(&mut self) -> AppResult<()> {
        let restored = self.app.auth_service.bootstrap().await;
        match restored {
            SessionState::Authenticated { username, .. } => {
                self.print(&format!("Welcome back, {}.\n", username))?;
            }
            _ => self.auto_login().await?,
        }
        self.print("Type 'help' for commands.\n")?;

        while let Some(line) = self.prompt("quiz> ").await? {
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.print(&format!("{}\n", err))?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => self.print_error(&err)?,
            }
        }

        Ok(())
    }

    /// Logs in with credentials from the configuration, if both are set.
    async fn auto_login(&mut self) -> AppResult<()> {
        let (Some(username), Some(password)) =
            (self.app.config.username.clone(), self.app.config.password.clone())
        else {
            return self.print("Not logged in. Use: login <username>\n");
        };

        let form = LoginForm::new(&username, password);
        let result = submit_login(&form, &self.app.auth_service, self.app.navigator.as_ref()).await;
        match result {
            Ok(username) => self.print(&format!("Logged in as {}.\n", username)),
            Err(err) => self.print_error(&err),
        }
    }

    async fn require_login(&self) -> AppResult<String> {
        require_authenticated(&self.app.session, self.app.navigator.as_ref()).await
    }

    /// Returns `false` when the shell should exit.
    pub async fn execute(&mut self, command: ShellCommand) -> AppResult<bool> {
        match command {
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Help => self.print(render::HELP)?,
            ShellCommand::History => {
                let history = self.app.navigator.history().join("\n");
                self.print(&format!("{}\n", history))?;
            }
            ShellCommand::Whoami => {
                let username = self.app.session.username().await;
                match username {
                    Some(username) => self.print(&format!("{}\n", username))?,
                    None => self.print("Not logged in.\n")?,
                }
            }
            ShellCommand::Login { username } => self.login(username).await?,
            ShellCommand::Logout => {
                self.app.auth_service.logout().await;
                self.app.navigator.navigate(routes::LOGIN);
                self.print("Logged out.\n")?;
            }
            protected => {
                self.require_login().await?;
                self.execute_protected(protected).await?;
            }
        }
        Ok(true)
    }

    async fn execute_protected(&mut self, command: ShellCommand) -> AppResult<()> {
        let quizzes = self.app.quiz_service.clone();

        match command {
            ShellCommand::Quizzes => {
                let mut dashboard = Dashboard::new();
                self.app.navigator.navigate(routes::DASHBOARD);
                quizzes.load_dashboard(&mut dashboard).await;
                self.print(&render::dashboard(&dashboard))
            }
            ShellCommand::Quiz { quiz_id } => {
                let mut detail = QuizDetail::new(quiz_id);
                self.app.navigator.navigate(&routes::quiz(quiz_id));
                quizzes.load_detail(&mut detail).await;
                self.print(&render::quiz_detail(&detail))
            }
            ShellCommand::CreateQuiz { title, description } => {
                let form = QuizForm::new().with_title(&title).with_description(&description);
                let mut dashboard = Dashboard::new();
                let quiz = quizzes.create_quiz(&form, &mut dashboard).await?;
                self.print(&format!("Created quiz [{}] {}\n", quiz.id, quiz.title))?;
                self.print(&render::dashboard(&dashboard))
            }
            ShellCommand::EditQuiz {
                quiz_id,
                title,
                description,
            } => {
                let current = quizzes.get_quiz(quiz_id).await?;
                let mut form = QuizForm::edit(&current);
                if let Some(title) = title {
                    form = form.with_title(&title);
                }
                if let Some(description) = description {
                    form = form.with_description(&description);
                }
                let mut detail = QuizDetail::new(quiz_id);
                quizzes.update_quiz(&form, &mut detail).await?;
                self.print(&render::quiz_detail(&detail))
            }
            ShellCommand::DeleteQuiz { quiz_id } => {
                quizzes.delete_quiz(quiz_id).await?;
                self.print(&format!("Deleted quiz {}.\n", quiz_id))
            }
            ShellCommand::AddQuestions { quiz_id } => self.draft_questions(quiz_id).await,
            ShellCommand::EditQuestion {
                quiz_id,
                question_id,
            } => self.edit_question(quiz_id, question_id).await,
            ShellCommand::DeleteQuestion {
                quiz_id,
                question_id,
            } => {
                let mut detail = QuizDetail::new(quiz_id);
                quizzes.load_detail(&mut detail).await;
                quizzes.delete_question(&mut detail, question_id).await?;
                self.print(&render::quiz_detail(&detail))
            }
            ShellCommand::Bank { quiz_id } => self.browse_bank(quiz_id).await,
            ShellCommand::Upload { quiz_id, path } => {
                quizzes.upload_source(quiz_id, &path).await?;
                self.print(&format!(
                    "Uploaded {}. Review the generated questions with: generated {}\n",
                    path.display(),
                    quiz_id
                ))
            }
            ShellCommand::Generated { quiz_id } => self.review_generated(quiz_id).await,
            ShellCommand::Attempt { quiz_id } => self.take_attempt(quiz_id).await,
            ShellCommand::Review {
                quiz_id,
                attempt_id,
            } => {
                self.app
                    .navigator
                    .navigate(&routes::attempt_review(quiz_id, attempt_id));
                let service = self.app.attempt_service.clone();
                let state = service
                    .load_review(&AttemptState::reviewing(quiz_id, attempt_id))
                    .await?;
                self.print(&render::attempt_state(&state))
            }
            ShellCommand::Attempts => {
                let mut overview = AttemptsOverview::default();
                let service = self.app.attempt_service.clone();
                self.app.navigator.navigate(routes::ATTEMPTS);
                service.load_overview(&mut overview).await;
                self.print(&render::overview(&overview))
            }
            other => Err(AppError::InvalidState(format!("{:?} is handled elsewhere", other))),
        }
    }

    async fn login(&mut self, username: Option<String>) -> AppResult<()> {
        let username = match username.or_else(|| self.app.config.username.clone()) {
            Some(username) => username,
            None => self.prompt("Username: ").await?.unwrap_or_default(),
        };

        let configured = self
            .app
            .config
            .password
            .clone()
            .filter(|_| self.app.config.username.as_deref() == Some(username.as_str()));
        let password = match configured {
            Some(password) => password,
            None => SecretString::from(self.prompt("Password: ").await?.unwrap_or_default()),
        };

        let form = LoginForm::new(&username, password);
        let username = submit_login(&form, &self.app.auth_service, self.app.navigator.as_ref()).await?;
        self.print(&format!("Logged in as {}.\n", username))
    }

    async fn draft_questions(&mut self, quiz_id: i64) -> AppResult<()> {
        let quizzes = self.app.quiz_service.clone();
        let mut drafts = QuestionDrafts::default();
        self.print(
            "Drafting questions. Commands: new, remove <q>, text <q> <text>, type <q> mcq|short,\n\
             answer <q> <text>, correct <q> <a>, drop <q> <a>, show, done, cancel\n",
        )?;

        while let Some(line) = self.prompt("draft> ").await? {
            match parse_draft_input(&line, &drafts) {
                Ok(DraftInput::Actions(actions)) => {
                    let result = actions
                        .into_iter()
                        .try_fold(drafts.clone(), |d, action| question_form::reduce(&d, action));
                    match result {
                        Ok(next) => drafts = next,
                        Err(err) => self.print_error(&err)?,
                    }
                }
                Ok(DraftInput::Show) => self.print(&render::drafts(&drafts))?,
                Ok(DraftInput::Cancel) => return self.print("Discarded drafts.\n"),
                Ok(DraftInput::Done) => {
                    let mut detail = QuizDetail::new(quiz_id);
                    let result = quizzes.add_questions(quiz_id, &drafts, &mut detail).await;
                    match result {
                        Ok(created) => {
                            self.print(&format!("Added {} question(s).\n", created.len()))?;
                            return self.print(&render::quiz_detail(&detail));
                        }
                        Err(err) => self.print_error(&err)?,
                    }
                }
                Err(err) => self.print_error(&err)?,
            }
        }
        Ok(())
    }

    async fn edit_question(&mut self, quiz_id: i64, question_id: i64) -> AppResult<()> {
        let quizzes = self.app.quiz_service.clone();
        let mut form = quizzes.load_question(quiz_id, question_id).await?;
        self.print(&render::edit_form(&form))?;
        self.print(
            "Commands: text <text>, type mcq|short, add <text>, answer <n> <text>, correct <n>,\n\
             delete <n>, show, save, cancel\n",
        )?;

        while let Some(line) = self.prompt("edit> ").await? {
            let outcome = match parse_edit_input(&line) {
                Ok(EditInput::Text(text)) => {
                    form.set_text(&text);
                    Ok(())
                }
                Ok(EditInput::Type(question_type)) => {
                    form.set_type(question_type);
                    Ok(())
                }
                Ok(EditInput::Add(text)) => {
                    form.add_answer();
                    form.set_answer_text(form.answers.len() - 1, &text)
                }
                Ok(EditInput::AnswerText(index, text)) => form.set_answer_text(index, &text),
                Ok(EditInput::Correct(index)) => form.set_correct(index, true),
                Ok(EditInput::Delete(index)) => form.delete_answer(index),
                Ok(EditInput::Show) => self.print(&render::edit_form(&form)),
                Ok(EditInput::Cancel) => return self.print("Discarded changes.\n"),
                Ok(EditInput::Save) => {
                    let mut detail = QuizDetail::new(quiz_id);
                    let result = quizzes.update_question(&mut form, &mut detail).await;
                    match result {
                        Ok(_) => return self.print(&render::quiz_detail(&detail)),
                        Err(err) => Err(err),
                    }
                }
                Err(err) => Err(err),
            };

            if let Err(err) = outcome {
                self.print_error(&err)?;
            }
        }
        Ok(())
    }

    async fn browse_bank(&mut self, quiz_id: i64) -> AppResult<()> {
        let mut bank = QuestionBank::new(quiz_id);
        let quizzes = self.app.quiz_service.clone();
        quizzes.load_question_bank(&mut bank).await;
        self.print(&render::question_bank(&bank))?;
        if bank.questions.value().is_none() {
            return Ok(());
        }

        while let Some(line) = self.prompt("bank [n/p/x <row>/q]> ").await? {
            match parse_pager_input(&line) {
                Ok(PagerInput::Next) => bank.next_page(),
                Ok(PagerInput::Previous) => bank.previous_page(),
                Ok(PagerInput::Toggle(row)) => match bank.visible().get(row).map(|q| q.id) {
                    Some(id) => bank.toggle(id),
                    None => self.print(&format!("There is no row {}\n", row + 1))?,
                },
                Ok(PagerInput::Submit) => {
                    self.print(&format!("Start an attempt with: attempt {}\n", quiz_id))?
                }
                Ok(PagerInput::Quit) => break,
                Err(err) => self.print_error(&err)?,
            }
            self.print(&render::question_bank(&bank))?;
        }
        Ok(())
    }

    async fn review_generated(&mut self, quiz_id: i64) -> AppResult<()> {
        let mut review = TempReview::new(quiz_id);
        let quizzes = self.app.quiz_service.clone();
        self.app.navigator.navigate(&routes::review_questions(quiz_id));
        quizzes.load_temp_questions(&mut review).await;
        self.print(&render::temp_review(&review))?;
        if review.is_empty() {
            return Ok(());
        }

        while let Some(line) = self.prompt("generated [n/p/x/s/q]> ").await? {
            match parse_pager_input(&line) {
                Ok(PagerInput::Next) => review.next(),
                Ok(PagerInput::Previous) => review.previous(),
                Ok(PagerInput::Toggle(_)) => review.toggle_current(),
                Ok(PagerInput::Submit) => {
                    let result = quizzes.add_selected(&mut review).await;
                    match result {
                        Ok(count) => {
                            return self.print(&format!("Added {} question(s) to quiz {}.\n", count, quiz_id))
                        }
                        Err(err) => self.print_error(&err)?,
                    }
                }
                Ok(PagerInput::Quit) => break,
                Err(err) => self.print_error(&err)?,
            }
            self.print(&render::temp_review(&review))?;
        }
        Ok(())
    }

    async fn take_attempt(&mut self, quiz_id: i64) -> AppResult<()> {
        let service = self.app.attempt_service.clone();
        let mut state = service.start(&AttemptState::new(quiz_id)).await?;
        self.print(&render::attempt_state(&state))?;
        if !matches!(state, AttemptState::InProgress(_)) {
            return Ok(());
        }

        while let Some(line) = self.prompt("attempt [n/p/g/l/a/t/c/s/q]> ").await? {
            let Some(sheet) = state.sheet() else { break };

            match parse_attempt_input(&line, sheet) {
                Ok(AttemptInput::Action(action)) => match attempt_flow::reduce(&state, action) {
                    Ok(next) => state = next,
                    Err(err) => self.print_error(&err)?,
                },
                Ok(AttemptInput::Submit) => state = service.submit(&state).await?,
                Ok(AttemptInput::Quit) => return self.print("Attempt left unsubmitted.\n"),
                Err(err) => self.print_error(&err)?,
            }

            self.print(&render::attempt_state(&state))?;
            if matches!(state, AttemptState::Reviewed { .. }) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqwest::StatusCode;
    use serde_json::json;

    use crate::{
        config::Config,
        http::{transport::MockHttpTransport, ApiRequest, ApiResponse},
        models::domain::Attempt,
        test_utils::fixtures,
    };

    fn unauthorized() -> ApiResponse {
        ApiResponse::new(StatusCode::UNAUTHORIZED, r#"{"detail":"Not authenticated"}"#)
    }

    fn anonymous_config() -> Config {
        Config {
            username: None,
            password: None,
            ..Config::test_config()
        }
    }

    async fn run_shell(config: Config, transport: MockHttpTransport, input: &str) -> (AppState, String) {
        let app = AppState::with_transport(config, Arc::new(transport));
        let mut shell = Shell::new(app.clone(), input.as_bytes(), Vec::new());
        shell.run().await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (app, output)
    }

    /// Backend with a live session for `dana`.
    fn logged_in_backend(route: fn(&ApiRequest) -> Option<ApiResponse>) -> MockHttpTransport {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(move |request| {
            if request.path == "/users/auth-check/" {
                return ApiResponse::ok_json(&json!({"authenticated": true, "username": "dana"}));
            }
            Ok(route(&request).unwrap_or_else(|| ApiResponse::new(StatusCode::NOT_FOUND, "{}")))
        });
        transport
    }

    #[tokio::test]
    async fn test_restored_session_lists_quizzes() {
        let transport = logged_in_backend(|request| match request.path.as_str() {
            "/quizzes/" => ApiResponse::ok_json(&vec![fixtures::abc_quiz()]).ok(),
            _ => None,
        });

        let (app, output) = run_shell(anonymous_config(), transport, "whoami\nls\nquit\n").await;

        assert!(output.contains("Welcome back, dana."));
        assert!(output.contains("dana\n"));
        assert!(output.contains("[1] Letters"));
        assert_eq!(app.navigator.current().as_deref(), Some(routes::DASHBOARD));
    }

    #[tokio::test]
    async fn test_protected_command_without_session_redirects_to_login() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|_| Ok(unauthorized()));

        let (app, output) = run_shell(anonymous_config(), transport, "quizzes\n").await;

        assert!(output.contains("Not logged in. Use: login <username>"));
        assert!(output.contains("Unauthorized: Login required\nPlease log in again."));
        assert_eq!(app.navigator.current().as_deref(), Some(routes::LOGIN));
    }

    #[tokio::test]
    async fn test_configured_credentials_log_in_automatically() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|request| match request.path.as_str() {
            "/users/token/" => ApiResponse::ok_json(&json!({"username": "testuser"})),
            _ => Ok(unauthorized()),
        });

        let (app, output) = run_shell(Config::test_config(), transport, "").await;

        assert!(output.contains("Logged in as testuser."));
        assert_eq!(app.session.username().await.as_deref(), Some("testuser"));
        assert_eq!(app.navigator.current().as_deref(), Some(routes::DASHBOARD));
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_shell_running() {
        let transport = logged_in_backend(|_| None);

        let (_, output) = run_shell(anonymous_config(), transport, "dance\nhelp\n").await;

        assert!(output.contains("unrecognized subcommand"));
        assert!(output.contains("Commands:"));
    }

    #[tokio::test]
    async fn test_attempt_with_correct_choice_scores_full_marks() {
        let transport = logged_in_backend(|request| {
            let quiz = fixtures::abc_quiz();
            match (request.method, request.path.as_str()) {
                (crate::http::Method::Post, "/attempts/") => {
                    ApiResponse::ok_json(&fixtures::started_attempt(&quiz)).ok()
                }
                (_, "/quizzes/1/questions/") => ApiResponse::ok_json(&quiz.questions).ok(),
                (_, "/attempts/50/submit/") => Some(ApiResponse::no_content()),
                (_, "/attempts/50") => {
                    let attempt: Attempt =
                        fixtures::submitted_attempt(&quiz, vec![fixtures::mcq_answer(1, 3)], Some(100.0));
                    ApiResponse::ok_json(&attempt).ok()
                }
                (_, "/quizzes/1/") => ApiResponse::ok_json(&quiz).ok(),
                _ => None,
            }
        });

        let (app, output) = run_shell(anonymous_config(), transport, "attempt 1\na 3\ns\n").await;

        assert!(output.contains("  (x) 3. C"));
        assert!(output.contains("Your Score: 100.00%"));
        assert!(output.contains("Correct answers: 1/1"));
        assert_eq!(
            app.navigator.current(),
            Some(routes::attempt_review(1, 50))
        );
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|request| match request.path.as_str() {
            "/users/auth-check/" => ApiResponse::ok_json(&json!({"authenticated": true, "username": "dana"})),
            _ => Ok(ApiResponse::no_content()),
        });

        let (app, output) = run_shell(anonymous_config(), transport, "logout\nwhoami\n").await;

        assert!(output.contains("Logged out."));
        assert!(output.contains("Not logged in.\n"));
        assert_eq!(app.navigator.current().as_deref(), Some(routes::LOGIN));
    }
}
