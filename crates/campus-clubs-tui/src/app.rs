//! Application state management for Campus Clubs.
//!
//! This module contains the core `App` struct that manages all application state,
//! including page state, the signed-in session, and background request coordination.

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use campus_clubs_core::api::{ApiClient, HomeFeed};
use campus_clubs_core::auth::{SessionData, SessionStore};
use campus_clubs_core::config::Config;
use campus_clubs_core::models::{
    Club, Comment, CommentReply, Event, LoginRequest, LoginResponse, NewComment, RegisterRequest,
};

use crate::ui::styles::Palette;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for the display name on the register form.
const MAX_NAME_LENGTH: usize = 80;

/// Maximum length for email input (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for a comment draft.
const MAX_COMMENT_LENGTH: usize = 1000;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Login,
    Home,
    Comments,
    Events,
    Settings,
}

impl Page {
    /// Get the display title for this page.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Welcome",
            Page::Login => "Sign In",
            Page::Home => "Home",
            Page::Comments => "Discussion",
            Page::Events => "Manage Events",
            Page::Settings => "Settings",
        }
    }

    /// Next tab page (wrapping around); pages outside the tab bar go to Home
    pub fn next(&self) -> Self {
        match self {
            Page::Home => Page::Events,
            Page::Events => Page::Settings,
            Page::Settings => Page::Home,
            _ => Page::Home,
        }
    }

    /// Previous tab page (wrapping around); pages outside the tab bar go to Home
    pub fn prev(&self) -> Self {
        match self {
            Page::Home => Page::Settings,
            Page::Events => Page::Home,
            Page::Settings => Page::Events,
            _ => Page::Home,
        }
    }

    /// Pages that require a signed-in user
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Page::Landing | Page::Login)
    }
}

/// Tabs on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTab {
    Events,
    Clubs,
}

impl HomeTab {
    pub fn toggle(&self) -> Self {
        match self {
            HomeTab::Events => HomeTab::Clubs,
            HomeTab::Clubs => HomeTab::Events,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    ConfirmingDelete,
    Composing,
    Quitting,
}

/// Which form the login page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Name,
    Email,
    Password,
    Button,
}

impl LoginFocus {
    pub fn next(&self, mode: AuthMode) -> Self {
        match (self, mode) {
            (LoginFocus::Name, _) => LoginFocus::Email,
            (LoginFocus::Email, _) => LoginFocus::Password,
            (LoginFocus::Password, _) => LoginFocus::Button,
            (LoginFocus::Button, AuthMode::Register) => LoginFocus::Name,
            (LoginFocus::Button, AuthMode::Login) => LoginFocus::Email,
        }
    }

    pub fn prev(&self, mode: AuthMode) -> Self {
        match (self, mode) {
            (LoginFocus::Button, _) => LoginFocus::Password,
            (LoginFocus::Password, _) => LoginFocus::Email,
            (LoginFocus::Email, AuthMode::Register) => LoginFocus::Name,
            (LoginFocus::Email, AuthMode::Login) => LoginFocus::Button,
            (LoginFocus::Name, _) => LoginFocus::Button,
        }
    }
}

/// Login / register form state
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginForm {
    fn new(email: String) -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email,
            password: String::new(),
            focus: LoginFocus::Email,
            error: None,
            loading: false,
        }
    }
}

/// Home page state
#[derive(Debug, Clone)]
pub struct HomeView {
    pub tab: HomeTab,
    pub clubs: Vec<Club>,
    pub events: Vec<Event>,
    pub loading: bool,
    pub event_selection: usize,
    pub club_selection: usize,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            tab: HomeTab::Events,
            clubs: Vec::new(),
            events: Vec::new(),
            loading: false,
            event_selection: 0,
            club_selection: 0,
        }
    }
}

/// Comment thread page state
#[derive(Debug, Clone, Default)]
pub struct CommentsView {
    pub event_uid: String,
    pub event_name: String,
    pub thread: Vec<Comment>,
    pub loading: bool,
    pub error: Option<String>,
    pub selection: usize,
    pub draft: String,
    /// (comment uid, author) when the draft is a reply
    pub reply_to: Option<(String, String)>,
    pub posting: bool,
}

/// Event management page state
#[derive(Debug, Clone, Default)]
pub struct ManageView {
    /// Club the loaded events belong to
    pub club_uid: Option<String>,
    pub events: Vec<Event>,
    pub loading: bool,
    pub error: Option<String>,
    pub selection: usize,
    pub expanded: HashSet<String>,
    /// (event uid, event name) awaiting confirmation
    pub pending_delete: Option<(String, String)>,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned request tasks.
///
/// Failure variants carry the message to display, already resolved to the
/// server's `msg` or the page's fallback text.
#[derive(Debug)]
pub enum TaskResult {
    LoggedIn { email: String, response: LoginResponse },
    LoginFailed(String),
    Registered(String),
    RegisterFailed(String),
    HomeFeed(HomeFeed),
    HomeFeedFailed,
    Joined(String),
    JoinFailed(String),
    ClubEvents { club_uid: String, events: Vec<Event> },
    ClubEventsFailed { club_uid: String, message: String },
    EventDeleted { uid: String },
    DeleteFailed(String),
    Comments { event_uid: String, thread: Vec<Comment> },
    CommentsFailed { event_uid: String, message: String },
    CommentPosted { event_uid: String, parent_uid: Option<String>, comment: Comment },
    CommentFailed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub api: ApiClient,
    pub session: Option<SessionData>,
    /// Write config changes back to disk
    pub persist_config: bool,

    // UI State
    pub state: AppState,
    pub page: Page,
    pub palette: Palette,
    pub settings_selection: usize,

    // Page state
    pub login: LoginForm,
    pub home: HomeView,
    pub comments: CommentsView,
    pub manage: ManageView,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance from config and session on disk
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = config.data_dir().unwrap_or_else(|_| PathBuf::from("./data"));
        debug!(?data_dir, "Data directory configured");

        let sessions = Arc::new(SessionStore::new(data_dir, config.token_storage));
        let api = ApiClient::new(&config.base_url(), sessions.clone())?;
        info!(base_url = api.base_url(), "API client configured");

        Ok(Self::with_parts(config, sessions, api))
    }

    /// Assemble an app from already-built services
    pub fn with_parts(config: Config, sessions: Arc<SessionStore>, api: ApiClient) -> Self {
        let session = match sessions.load() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to load session");
                None
            }
        };
        debug!(has_session = session.is_some(), "Session loaded");

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_email = config.last_email.clone().unwrap_or_default();

        Self {
            config,
            sessions,
            api,
            session,
            persist_config: true,

            state: AppState::Normal,
            page: Page::Landing,
            palette: Palette::default(),
            settings_selection: 0,

            login: LoginForm::new(login_email),
            home: HomeView::default(),
            comments: CommentsView::default(),
            manage: ManageView::default(),

            task_rx: rx,
            task_tx: tx,

            status_message: None,
        }
    }

    /// Pick the first page: Home with a session, Landing without
    pub fn start(&mut self) {
        if self.is_authenticated() {
            self.enter_home();
        } else {
            self.page = Page::Landing;
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if a session with a token is stored
    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|s| s.token.as_deref())
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }

    /// Show the login page in the given mode
    pub fn open_login(&mut self, mode: AuthMode) {
        self.page = Page::Login;
        self.login.mode = mode;
        self.login.error = None;
        self.login.focus = match mode {
            AuthMode::Register => LoginFocus::Name,
            AuthMode::Login if self.login.email.is_empty() => LoginFocus::Email,
            AuthMode::Login => LoginFocus::Password,
        };
    }

    /// Submit the login or register form
    pub fn submit_login_form(&mut self) {
        if self.login.loading {
            return;
        }
        match self.login.mode {
            AuthMode::Login => self.attempt_login(),
            AuthMode::Register => self.attempt_register(),
        }
    }

    fn attempt_login(&mut self) {
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();

        if email.is_empty() || password.is_empty() {
            self.login.error = Some("Email and password required".to_string());
            return;
        }

        self.login.error = None;
        self.login.loading = true;

        let api = self.api.clone();
        self.spawn_task(async move {
            match api.login(&LoginRequest { email: email.clone(), password }).await {
                Ok(response) => TaskResult::LoggedIn { email, response },
                Err(e) => {
                    error!(error = %e, "Login failed");
                    TaskResult::LoginFailed(e.message_or("Failed to login"))
                }
            }
        });
    }

    fn attempt_register(&mut self) {
        let name = self.login.name.trim().to_string();
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            self.login.error = Some("Name, email and password required".to_string());
            return;
        }

        self.login.error = None;
        self.login.loading = true;

        let api = self.api.clone();
        self.spawn_task(async move {
            match api.register(&RegisterRequest { name, email, password }).await {
                Ok(ack) => TaskResult::Registered(ack.message_or("Account created. Please sign in.")),
                Err(e) => {
                    error!(error = %e, "Registration failed");
                    TaskResult::RegisterFailed(e.message_or("Failed to register"))
                }
            }
        });
    }

    fn complete_login(&mut self, email: String, response: LoginResponse) {
        self.login.loading = false;

        let data = SessionData::new(response.access_token, response.uid, Some(email.clone()));
        if let Err(e) = self.sessions.save(&data) {
            error!(error = %e, "Failed to save session");
            self.login.error = Some("Failed to save session".to_string());
            return;
        }

        self.config.last_email = Some(email);
        self.save_config();

        info!(user_uid = %data.user_uid, "Login successful");
        self.session = Some(data);
        self.login.password.clear();
        self.status_message = None;
        self.enter_home();
    }

    fn save_config(&self) {
        if !self.persist_config {
            return;
        }
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    /// Forget the session and return to the landing page
    pub fn logout(&mut self) {
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        info!("Logged out");
        self.session = None;
        self.home = HomeView::default();
        self.comments = CommentsView::default();
        self.manage = ManageView::default();
        self.state = AppState::Normal;
        self.page = Page::Landing;
        self.status_message = Some("Signed out".to_string());
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch to a tab page, fetching its data
    pub fn go_to(&mut self, page: Page) {
        if page.requires_auth() && !self.is_authenticated() {
            self.open_login(AuthMode::Login);
            return;
        }
        match page {
            Page::Home => self.enter_home(),
            Page::Events => self.enter_manage(),
            Page::Comments => self.open_comments(),
            Page::Landing | Page::Login | Page::Settings => self.page = page,
        }
    }

    /// Re-issue the current page's fetch
    pub fn refresh_current_page(&mut self) {
        match self.page {
            Page::Home => self.fetch_home_feed(),
            Page::Events => self.fetch_club_events(),
            Page::Comments => self.fetch_comments(),
            _ => {}
        }
    }

    // =========================================================================
    // Home
    // =========================================================================

    pub fn enter_home(&mut self) {
        self.page = Page::Home;
        self.fetch_home_feed();
    }

    /// Fetch clubs and events together
    pub fn fetch_home_feed(&mut self) {
        self.home.loading = true;

        let api = self.api.clone();
        self.spawn_task(async move {
            match api.fetch_home_feed().await {
                Ok(feed) => TaskResult::HomeFeed(feed),
                Err(e) => {
                    error!(error = %e, "Failed to fetch data");
                    TaskResult::HomeFeedFailed
                }
            }
        });
    }

    pub fn selected_home_event(&self) -> Option<&Event> {
        self.home.events.get(self.home.event_selection)
    }

    pub fn selected_home_club(&self) -> Option<&Club> {
        self.home.clubs.get(self.home.club_selection)
    }

    /// Join the club or event selected on the active home tab
    pub fn join_selected(&mut self) {
        let api = self.api.clone();
        match self.home.tab {
            HomeTab::Clubs => {
                let Some(club) = self.selected_home_club() else { return };
                let uid = club.uid.clone();
                self.status_message = Some(format!("Joining {}...", club.name));
                self.spawn_task(async move {
                    match api.join_club(&uid).await {
                        Ok(ack) => TaskResult::Joined(ack.message_or("Joined club")),
                        Err(e) => TaskResult::JoinFailed(e.message_or("Failed to join club")),
                    }
                });
            }
            HomeTab::Events => {
                let Some(event) = self.selected_home_event() else { return };
                let uid = event.uid.clone();
                self.status_message = Some(format!("Joining {}...", event.name));
                self.spawn_task(async move {
                    match api.join_event(&uid).await {
                        Ok(ack) => TaskResult::Joined(ack.message_or("Joined event")),
                        Err(e) => TaskResult::JoinFailed(e.message_or("Failed to join event")),
                    }
                });
            }
        }
    }

    /// Make the selected home club the one managed on the events page
    pub fn manage_selected_club(&mut self) {
        let Some(club) = self.selected_home_club() else { return };
        let (uid, name) = (club.uid.clone(), club.name.clone());
        self.config.select_club(&uid, &name);
        self.save_config();
        self.enter_manage();
    }

    // =========================================================================
    // Event management
    // =========================================================================

    pub fn enter_manage(&mut self) {
        self.page = Page::Events;
        self.fetch_club_events();
    }

    /// Fetch the managed club's events; no-op without a selected club
    pub fn fetch_club_events(&mut self) {
        let Some(club_uid) = self.config.selected_club_uid.clone() else {
            return;
        };

        if self.manage.club_uid.as_deref() != Some(club_uid.as_str()) {
            self.manage = ManageView {
                club_uid: Some(club_uid.clone()),
                ..ManageView::default()
            };
        }
        self.manage.error = None;
        self.manage.loading = true;

        let api = self.api.clone();
        self.spawn_task(async move {
            match api.club_events(&club_uid).await {
                Ok(events) => TaskResult::ClubEvents { club_uid, events },
                Err(e) => {
                    warn!(error = %e, "Club events fetch failed");
                    TaskResult::ClubEventsFailed {
                        club_uid,
                        message: e.message_or("Failed to fetch events"),
                    }
                }
            }
        });
    }

    pub fn selected_managed_event(&self) -> Option<&Event> {
        self.manage.events.get(self.manage.selection)
    }

    /// Expand or collapse an event's details
    pub fn toggle_expand(&mut self, uid: &str) {
        if !self.manage.expanded.remove(uid) {
            self.manage.expanded.insert(uid.to_string());
        }
    }

    /// Ask for confirmation before deleting the selected event
    pub fn request_delete(&mut self) {
        let Some(event) = self.selected_managed_event() else { return };
        self.manage.pending_delete = Some((event.uid.clone(), event.name.clone()));
        self.state = AppState::ConfirmingDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.manage.pending_delete = None;
        self.state = AppState::Normal;
    }

    /// Issue the delete the user just confirmed
    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some((uid, name)) = self.manage.pending_delete.take() else { return };

        info!(event_uid = %uid, "Deleting event");
        self.status_message = Some(format!("Deleting \"{}\"...", name));

        let api = self.api.clone();
        self.spawn_task(async move {
            match api.delete_event(&uid).await {
                Ok(_) => TaskResult::EventDeleted { uid },
                Err(e) => {
                    error!(error = %e, "Event delete failed");
                    TaskResult::DeleteFailed(e.message_or("Failed to delete event"))
                }
            }
        });
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Open the discussion for the event selected on the home page
    pub fn open_comments(&mut self) {
        let Some(event) = self.selected_home_event() else { return };
        let (uid, name) = (event.uid.clone(), event.name.clone());

        self.comments = CommentsView {
            event_uid: uid,
            event_name: name,
            ..Default::default()
        };
        self.page = Page::Comments;
        self.fetch_comments();
    }

    pub fn fetch_comments(&mut self) {
        if self.comments.event_uid.is_empty() {
            return;
        }
        self.comments.loading = true;
        self.comments.error = None;

        let event_uid = self.comments.event_uid.clone();
        let api = self.api.clone();
        self.spawn_task(async move {
            match api.event_comments(&event_uid).await {
                Ok(thread) => TaskResult::Comments { event_uid, thread },
                Err(e) => {
                    warn!(error = %e, "Comments fetch failed");
                    TaskResult::CommentsFailed {
                        event_uid,
                        message: e.message_or("Failed to load comments"),
                    }
                }
            }
        });
    }

    /// Open the composer, replying to the selected comment when `reply` is set
    pub fn start_compose(&mut self, reply: bool) {
        self.comments.reply_to = if reply {
            let flat = Comment::flatten(&self.comments.thread);
            match flat.get(self.comments.selection) {
                Some(f) => Some((f.comment.uid.clone(), f.comment.user_name.clone())),
                None => return,
            }
        } else {
            None
        };
        self.comments.draft.clear();
        self.state = AppState::Composing;
    }

    pub fn cancel_compose(&mut self) {
        self.comments.draft.clear();
        self.comments.reply_to = None;
        self.state = AppState::Normal;
    }

    /// Post the draft; blank drafts are not sent
    pub fn submit_comment(&mut self) {
        let content = self.comments.draft.trim().to_string();
        if content.is_empty() || self.comments.posting {
            return;
        }

        self.state = AppState::Normal;
        self.comments.posting = true;
        self.comments.draft.clear();

        let event_uid = self.comments.event_uid.clone();
        let parent_uid = self.comments.reply_to.take().map(|(uid, _)| uid);
        let api = self.api.clone();
        self.spawn_task(async move {
            let result = match parent_uid {
                Some(ref parent) => api.reply_to_comment(parent, &CommentReply { content }).await,
                None => {
                    api.create_comment(&NewComment {
                        event_uid: event_uid.clone(),
                        content,
                    })
                    .await
                }
            };
            match result {
                Ok(comment) => TaskResult::CommentPosted { event_uid, parent_uid, comment },
                Err(e) => {
                    warn!(error = %e, "Comment post failed");
                    TaskResult::CommentFailed(e.message_or("Failed to post comment"))
                }
            }
        });
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn select_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.settings_selection = Palette::ALL
            .iter()
            .position(|p| *p == palette)
            .unwrap_or(0);
    }

    pub fn cycle_palette(&mut self) {
        self.select_palette(self.palette.next());
    }

    pub fn reset_palette(&mut self) {
        self.select_palette(Palette::Dark);
    }

    // =========================================================================
    // Background tasks
    // =========================================================================

    /// Run `task` on the runtime and deliver its result to the UI loop
    fn spawn_task<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = task.await;
            Self::send_result(&tx, result).await;
        });
    }

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }
    }

    /// Apply a single task result to page state.
    pub fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LoggedIn { email, response } => {
                self.complete_login(email, response);
            }
            TaskResult::LoginFailed(message) | TaskResult::RegisterFailed(message) => {
                self.login.loading = false;
                self.login.error = Some(message);
            }
            TaskResult::Registered(message) => {
                self.login.loading = false;
                self.login.mode = AuthMode::Login;
                self.login.password.clear();
                self.login.focus = LoginFocus::Password;
                self.status_message = Some(message);
            }
            TaskResult::HomeFeed(feed) => {
                self.home.loading = false;
                self.home.clubs = feed.clubs;
                self.home.events = feed.events;
                self.home.club_selection = clamp_selection(self.home.club_selection, self.home.clubs.len());
                self.home.event_selection = clamp_selection(self.home.event_selection, self.home.events.len());
            }
            TaskResult::HomeFeedFailed => {
                self.home.loading = false;
                self.home.clubs.clear();
                self.home.events.clear();
            }
            TaskResult::Joined(message) | TaskResult::JoinFailed(message) => {
                self.status_message = Some(message);
            }
            TaskResult::ClubEvents { club_uid, events } => {
                if self.config.selected_club_uid.as_deref() != Some(club_uid.as_str()) {
                    debug!(%club_uid, "Ignoring events for a club no longer selected");
                    return;
                }
                self.manage.loading = false;
                self.manage.events = events;
                self.manage.selection = clamp_selection(self.manage.selection, self.manage.events.len());
            }
            TaskResult::ClubEventsFailed { club_uid, message } => {
                if self.config.selected_club_uid.as_deref() != Some(club_uid.as_str()) {
                    return;
                }
                self.manage.loading = false;
                self.manage.error = Some(message);
            }
            TaskResult::EventDeleted { uid } => {
                self.manage.events.retain(|e| e.uid != uid);
                self.manage.expanded.remove(&uid);
                self.manage.selection = clamp_selection(self.manage.selection, self.manage.events.len());
                self.status_message = Some("Event deleted".to_string());
            }
            TaskResult::DeleteFailed(message) => {
                self.status_message = Some(message);
            }
            TaskResult::Comments { event_uid, thread } => {
                if event_uid != self.comments.event_uid {
                    return;
                }
                self.comments.loading = false;
                self.comments.thread = thread;
                let total = Comment::count(&self.comments.thread);
                self.comments.selection = clamp_selection(self.comments.selection, total);
            }
            TaskResult::CommentsFailed { event_uid, message } => {
                if event_uid != self.comments.event_uid {
                    return;
                }
                self.comments.loading = false;
                self.comments.error = Some(message);
            }
            TaskResult::CommentPosted { event_uid, parent_uid, comment } => {
                if event_uid != self.comments.event_uid {
                    return;
                }
                self.comments.posting = false;
                match parent_uid {
                    Some(parent) => {
                        if !Comment::insert_reply(&mut self.comments.thread, &parent, comment) {
                            debug!(%parent, "Reply parent not in thread");
                        }
                    }
                    // Threads are newest first
                    None => self.comments.thread.insert(0, comment),
                }
            }
            TaskResult::CommentFailed(message) => {
                self.comments.posting = false;
                self.comments.error = Some(message);
            }
        }
    }

    /// Email of the signed-in user, for the status bar
    pub fn signed_in_as(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.email.as_deref())
    }

    /// Name of the club chosen for event management
    pub fn managed_club_name(&self) -> Option<&str> {
        self.config
            .selected_club_uid
            .as_ref()
            .and(self.config.selected_club_name.as_deref())
    }
}

/// Keep a selection index inside a list of `len` items
fn clamp_selection(selection: usize, len: usize) -> usize {
    selection.min(len.saturating_sub(1))
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_name_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NAME_LENGTH && is_valid_input_char(c)
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_comment_char(current_len: usize, c: char) -> bool {
    current_len < MAX_COMMENT_LENGTH && is_valid_input_char(c)
}

/// App with a throwaway session directory and no config writes
#[cfg(test)]
pub(crate) fn test_app(name: &str) -> App {
    use campus_clubs_core::auth::{NoToken, TokenStorage};

    let dir = std::env::temp_dir().join(format!("campus-clubs-app-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let sessions = Arc::new(SessionStore::new(dir, TokenStorage::File));
    let api = ApiClient::new("http://127.0.0.1:9", Arc::new(NoToken)).unwrap();
    let mut app = App::with_parts(Config::default(), sessions, api);
    app.persist_config = false;
    app
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use campus_clubs_core::models::Ack;

    fn event(uid: &str, name: &str) -> Event {
        serde_json::from_value(serde_json::json!({"uid": uid, "name": name})).unwrap()
    }

    fn comment(uid: &str, content: &str) -> Comment {
        serde_json::from_value(serde_json::json!({"uid": uid, "content": content})).unwrap()
    }

    // -------------------------------------------------------------------------
    // Page Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_page_next() {
        assert_eq!(Page::Home.next(), Page::Events);
        assert_eq!(Page::Events.next(), Page::Settings);
        assert_eq!(Page::Settings.next(), Page::Home); // Wraps around
        assert_eq!(Page::Comments.next(), Page::Home);
    }

    #[test]
    fn test_page_prev() {
        assert_eq!(Page::Home.prev(), Page::Settings); // Wraps around
        assert_eq!(Page::Settings.prev(), Page::Events);
        assert_eq!(Page::Events.prev(), Page::Home);
    }

    #[test]
    fn test_login_focus_cycle() {
        assert_eq!(LoginFocus::Button.next(AuthMode::Login), LoginFocus::Email);
        assert_eq!(LoginFocus::Button.next(AuthMode::Register), LoginFocus::Name);
        assert_eq!(LoginFocus::Email.prev(AuthMode::Login), LoginFocus::Button);
        assert_eq!(LoginFocus::Email.prev(AuthMode::Register), LoginFocus::Name);
    }

    // -------------------------------------------------------------------------
    // State Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_starts_on_landing_without_session() {
        let mut app = test_app("landing");
        assert!(!app.is_authenticated());
        app.start();
        assert_eq!(app.page, Page::Landing);
    }

    #[test]
    fn test_go_to_requires_auth() {
        let mut app = test_app("guard");
        app.go_to(Page::Settings);
        assert_eq!(app.page, Page::Login);
    }

    #[test]
    fn test_login_requires_fields() {
        let mut app = test_app("login-fields");
        app.open_login(AuthMode::Login);
        app.submit_login_form();
        assert_eq!(app.login.error.as_deref(), Some("Email and password required"));
        assert!(!app.login.loading);
    }

    #[test]
    fn test_login_failure_shows_message() {
        let mut app = test_app("login-fail");
        app.login.loading = true;
        app.process_task_result(TaskResult::LoginFailed("Failed to login".to_string()));
        assert!(!app.login.loading);
        assert_eq!(app.login.error.as_deref(), Some("Failed to login"));
    }

    #[test]
    fn test_registered_switches_to_login() {
        let mut app = test_app("registered");
        app.open_login(AuthMode::Register);
        app.login.password = "pw".to_string();
        app.process_task_result(TaskResult::Registered(
            Ack::default().message_or("Account created. Please sign in."),
        ));
        assert_eq!(app.login.mode, AuthMode::Login);
        assert!(app.login.password.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Account created. Please sign in."));
    }

    #[test]
    fn test_home_feed_failure_leaves_empty_lists() {
        let mut app = test_app("home-fail");
        app.home.loading = true;
        app.process_task_result(TaskResult::HomeFeedFailed);
        assert!(!app.home.loading);
        assert!(app.home.clubs.is_empty());
        assert!(app.home.events.is_empty());
    }

    #[test]
    fn test_home_feed_populates_both_lists() {
        let mut app = test_app("home-ok");
        app.home.loading = true;
        app.home.event_selection = 5;
        app.process_task_result(TaskResult::HomeFeed(HomeFeed {
            clubs: vec![serde_json::from_str(r#"{"uid": "c1", "name": "Chess"}"#).unwrap()],
            events: vec![event("e1", "Blitz"), event("e2", "Rapid")],
        }));
        assert!(!app.home.loading);
        assert_eq!(app.home.clubs.len(), 1);
        assert_eq!(app.home.event_selection, 1);
    }

    #[test]
    fn test_toggle_expand() {
        let mut app = test_app("expand");
        app.toggle_expand("e1");
        assert!(app.manage.expanded.contains("e1"));
        app.toggle_expand("e2");
        app.toggle_expand("e1");
        assert!(!app.manage.expanded.contains("e1"));
        assert!(app.manage.expanded.contains("e2"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut app = test_app("delete-confirm");
        app.manage.events = vec![event("e1", "Blitz"), event("e2", "Rapid")];
        app.manage.selection = 1;

        app.request_delete();
        assert_eq!(app.state, AppState::ConfirmingDelete);
        assert_eq!(
            app.manage.pending_delete,
            Some(("e2".to_string(), "Rapid".to_string()))
        );

        app.cancel_delete();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.manage.pending_delete.is_none());
        assert_eq!(app.manage.events.len(), 2);
    }

    #[test]
    fn test_event_deleted_removes_locally() {
        let mut app = test_app("deleted");
        app.manage.events = vec![event("e1", "Blitz"), event("e2", "Rapid")];
        app.manage.selection = 1;
        app.manage.expanded.insert("e2".to_string());

        app.process_task_result(TaskResult::EventDeleted { uid: "e2".to_string() });
        assert_eq!(app.manage.events.len(), 1);
        assert_eq!(app.manage.selection, 0);
        assert!(app.manage.expanded.is_empty());
    }

    #[test]
    fn test_delete_failure_keeps_event() {
        let mut app = test_app("delete-fail");
        app.manage.events = vec![event("e1", "Blitz")];
        app.process_task_result(TaskResult::DeleteFailed("Failed to delete event".to_string()));
        assert_eq!(app.manage.events.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Failed to delete event"));
    }

    #[test]
    fn test_club_events_for_other_club_ignored() {
        let mut app = test_app("stale-club");
        app.config.select_club("c2", "Debate");
        app.manage.loading = true;

        app.process_task_result(TaskResult::ClubEvents {
            club_uid: "c1".to_string(),
            events: vec![event("e1", "Blitz")],
        });
        assert!(app.manage.events.is_empty());
        assert!(app.manage.loading);

        app.process_task_result(TaskResult::ClubEventsFailed {
            club_uid: "c2".to_string(),
            message: "Failed to fetch events".to_string(),
        });
        assert!(!app.manage.loading);
        assert_eq!(app.manage.error.as_deref(), Some("Failed to fetch events"));
    }

    #[tokio::test]
    async fn test_switching_club_drops_previous_events() {
        let mut app = test_app("switch-club");
        app.config.select_club("c1", "Chess");
        app.fetch_club_events();
        app.process_task_result(TaskResult::ClubEvents {
            club_uid: "c1".to_string(),
            events: vec![event("e1", "Chess Blitz")],
        });
        app.manage.expanded.insert("e1".to_string());
        assert_eq!(app.manage.events.len(), 1);

        app.config.select_club("c2", "Debate");
        app.fetch_club_events();
        assert!(app.manage.events.is_empty());
        assert!(app.manage.expanded.is_empty());
        assert_eq!(app.manage.club_uid.as_deref(), Some("c2"));

        app.process_task_result(TaskResult::ClubEventsFailed {
            club_uid: "c2".to_string(),
            message: "Failed to fetch events".to_string(),
        });
        assert_eq!(app.managed_club_name(), Some("Debate"));
        assert!(app.manage.events.is_empty());
        assert_eq!(app.manage.error.as_deref(), Some("Failed to fetch events"));

        app.request_delete();
        assert!(app.manage.pending_delete.is_none());
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_refetching_same_club_keeps_expanded() {
        let mut app = test_app("same-club");
        app.config.select_club("c1", "Chess");
        app.fetch_club_events();
        app.process_task_result(TaskResult::ClubEvents {
            club_uid: "c1".to_string(),
            events: vec![event("e1", "Chess Blitz")],
        });
        app.manage.expanded.insert("e1".to_string());

        app.fetch_club_events();
        assert_eq!(app.manage.events.len(), 1);
        assert!(app.manage.expanded.contains("e1"));
    }

    #[test]
    fn test_fetch_club_events_without_club_is_noop() {
        let mut app = test_app("no-club");
        app.fetch_club_events();
        assert!(!app.manage.loading);
        assert!(app.managed_club_name().is_none());
    }

    #[test]
    fn test_comment_posted_top_level_and_reply() {
        let mut app = test_app("comments");
        app.comments.event_uid = "e1".to_string();
        app.comments.thread = vec![comment("c1", "First")];
        app.comments.posting = true;

        app.process_task_result(TaskResult::CommentPosted {
            event_uid: "e1".to_string(),
            parent_uid: None,
            comment: comment("c2", "Second"),
        });
        assert!(!app.comments.posting);
        assert_eq!(app.comments.thread[0].uid, "c2");

        app.process_task_result(TaskResult::CommentPosted {
            event_uid: "e1".to_string(),
            parent_uid: Some("c1".to_string()),
            comment: comment("r1", "Reply"),
        });
        assert_eq!(app.comments.thread[1].replies[0].uid, "r1");

        // Results for another event are dropped
        app.process_task_result(TaskResult::CommentPosted {
            event_uid: "e9".to_string(),
            parent_uid: None,
            comment: comment("x", "Elsewhere"),
        });
        assert_eq!(Comment::count(&app.comments.thread), 3);
    }

    #[test]
    fn test_blank_comment_not_submitted() {
        let mut app = test_app("blank");
        app.comments.event_uid = "e1".to_string();
        app.state = AppState::Composing;
        app.comments.draft = "   ".to_string();
        app.submit_comment();
        assert_eq!(app.state, AppState::Composing);
        assert!(!app.comments.posting);
    }

    #[test]
    fn test_start_reply_targets_selection() {
        let mut app = test_app("reply");
        app.comments.thread = vec![comment("c1", "First")];
        app.comments.thread[0].replies.push(comment("r1", "Nested"));
        app.comments.selection = 1;

        app.start_compose(true);
        assert_eq!(app.state, AppState::Composing);
        assert_eq!(
            app.comments.reply_to,
            Some(("r1".to_string(), "Unknown".to_string()))
        );
    }

    #[test]
    fn test_palette_actions() {
        let mut app = test_app("palette");
        app.select_palette(Palette::Ocean);
        assert_eq!(app.palette, Palette::Ocean);
        app.cycle_palette();
        assert_eq!(app.palette, Palette::Sunset);
        app.reset_palette();
        assert_eq!(app.palette, Palette::Dark);
        assert_eq!(Palette::ALL[app.settings_selection], Palette::Dark);
    }

    #[tokio::test]
    async fn test_logged_in_saves_session() {
        let mut app = test_app("logged-in");
        app.process_task_result(TaskResult::LoggedIn {
            email: "ada@campus.edu".to_string(),
            response: serde_json::from_str(r#"{"access_token": "tok", "uid": "u1"}"#).unwrap(),
        });

        assert!(app.is_authenticated());
        assert_eq!(app.page, Page::Home);
        assert!(app.home.loading);
        assert_eq!(app.signed_in_as(), Some("ada@campus.edu"));
        let stored = app.sessions.load().unwrap().unwrap();
        assert_eq!(stored.user_uid, "u1");
        assert_eq!(stored.token.as_deref(), Some("tok"));

        app.logout();
        assert!(!app.is_authenticated());
        assert_eq!(app.page, Page::Landing);
        assert!(app.sessions.load().unwrap().is_none());
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_email_char() {
        assert!(can_add_email_char(0, 'a'));
        assert!(can_add_email_char(0, '@'));
        assert!(!can_add_email_char(0, ' '));
        assert!(!can_add_email_char(MAX_EMAIL_LENGTH, 'a'));
        assert!(!can_add_email_char(0, '\n'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(can_add_password_char(0, ' '));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\x00'));
    }

    #[test]
    fn test_can_add_comment_char() {
        assert!(can_add_comment_char(0, ' '));
        assert!(can_add_comment_char(999, 'z'));
        assert!(!can_add_comment_char(1000, 'z'));
        assert!(!can_add_comment_char(0, '\t'));
        assert!(can_add_name_char(0, 'Z'));
        assert!(!can_add_name_char(MAX_NAME_LENGTH, 'Z'));
    }
}
