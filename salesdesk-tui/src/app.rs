//! Application shell: phases, event loop, and fetch/mutation dispatch.
//!
//! All I/O runs as spawned tasks reporting back over one app-event channel;
//! fetch completions carry their request token so the owning loader can
//! discard superseded responses. Events for a workspace that has been torn
//! down (logout) are dropped on the floor.

use std::time::Duration;
use std::time::Instant;

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use salesdesk_lib::CrmClient;
use salesdesk_lib::api::files;
use salesdesk_lib::api::leads;
use salesdesk_lib::api::meetings;
use salesdesk_lib::api::notes;
use salesdesk_lib::api::officers;
use salesdesk_lib::api::users;
use salesdesk_lib::auth::StaticTokenProvider;
use salesdesk_lib::error::FetchError;
use salesdesk_lib::fetch::FetchResult;
use salesdesk_lib::fetch::LoadPhase;
use salesdesk_lib::fetch::RequestTicket;
use salesdesk_lib::fetch::RequestToken;
use salesdesk_lib::model::Lead;
use salesdesk_lib::model::Meeting;
use salesdesk_lib::model::Note;
use salesdesk_lib::model::Role;
use salesdesk_lib::model::SalesOfficer;
use salesdesk_lib::model::FileEntry;
use salesdesk_lib::model::UserAccount;
use salesdesk_lib::session::Session;
use salesdesk_lib::validation::CellValue;
use salesdesk_lib::validation::Registry;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::modals::AssignPicker;
use crate::modals::ChallengeModal;
use crate::modals::ConfirmModal;
use crate::modals::Modal;
use crate::modals::ModalOutcome;
use crate::modals::NoteEntry;
use crate::modals::PendingAction;
use crate::notify::Notices;
use crate::paths;
use crate::screen::ListScreen;
use crate::screen::ScreenAction;
use crate::screen::dashboard::DashboardScreen;
use crate::screen::files::FilesScreen;
use crate::screen::leads::LeadsScreen;
use crate::screen::meetings::MeetingsScreen;
use crate::screen::notes::NotesScreen;
use crate::screen::officers::OfficersScreen;
use crate::screen::roles::RolesScreen;
use crate::screen::users::UsersScreen;
use crate::settings::SettingsProvider;
use crate::settings::SqliteBackend;
use crate::settings::keys;
use crate::table::render_popup;
use crate::widgets::Spinner;
use crate::widgets::TextInput;

/// The workspace tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Leads,
    Officers,
    Meetings,
    Notes,
    Files,
    Users,
    Roles,
}

impl Tab {
    const ALL: [Tab; 8] = [
        Tab::Dashboard,
        Tab::Leads,
        Tab::Officers,
        Tab::Meetings,
        Tab::Notes,
        Tab::Files,
        Tab::Users,
        Tab::Roles,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Leads => "Leads",
            Tab::Officers => "Officers",
            Tab::Meetings => "Meetings",
            Tab::Notes => "Notes",
            Tab::Files => "Files",
            Tab::Users => "Users",
            Tab::Roles => "Roles",
        }
    }

    fn next(self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }
}

/// A completed list fetch, routed back to its owning loader.
pub enum FetchDone {
    Leads(RequestToken, Result<FetchResult<Lead>, FetchError>),
    Officers(RequestToken, Result<FetchResult<SalesOfficer>, FetchError>),
    Meetings(RequestToken, Result<FetchResult<Meeting>, FetchError>),
    Notes(RequestToken, Result<FetchResult<Note>, FetchError>),
    Files(RequestToken, Result<FetchResult<FileEntry>, FetchError>),
    Users(RequestToken, Result<FetchResult<UserAccount>, FetchError>),
    Roles(RequestToken, Result<FetchResult<Role>, FetchError>),
    DashLeads(RequestToken, Result<FetchResult<Lead>, FetchError>),
    DashMeetings(RequestToken, Result<FetchResult<Meeting>, FetchError>),
}

/// Events produced by spawned tasks.
pub enum AppEvent {
    SessionResult(Box<Result<(CrmClient, Session), String>>),
    Fetch(FetchDone),
    OfficerOptions(Result<Vec<SalesOfficer>, FetchError>),
    RoleOptions(Result<Vec<Role>, FetchError>),
    ActionDone { tab: Tab, message: String },
    ActionFailed { tab: Tab, error: FetchError },
}

enum Phase {
    Login(LoginForm),
    Connecting,
    Ready(Box<Workspace>),
}

struct LoginForm {
    url: TextInput,
    token: TextInput,
    token_focused: bool,
    error: Option<String>,
}

impl LoginForm {
    fn new(url: String) -> Self {
        Self {
            url: TextInput::with_value(url),
            token: TextInput::new(),
            token_focused: false,
            error: None,
        }
    }
}

/// Runs the application to completion.
pub async fn run(terminal: &mut DefaultTerminal) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = paths::settings_db().ok_or("cannot determine a data directory")?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let settings = SettingsProvider::new(SqliteBackend::new(&db_path).await?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(settings, tx);
    app.bootstrap().await;

    let mut events = crossterm::event::EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(120));

    while !app.should_quit {
        terminal.draw(|frame| app.draw(frame))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.on_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => log::error!("input stream error: {e}"),
                None => break,
            },
            Some(event) = rx.recv() => app.on_event(event),
            _ = tick.tick() => app.on_tick(),
        }
    }

    Ok(())
}

struct App {
    settings: SettingsProvider,
    tx: mpsc::UnboundedSender<AppEvent>,
    phase: Phase,
    spinner: Spinner,
    should_quit: bool,
}

impl App {
    fn new(settings: SettingsProvider, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            settings,
            tx,
            phase: Phase::Login(LoginForm::new(String::new())),
            spinner: Spinner::default(),
            should_quit: false,
        }
    }

    /// Reads the persisted client state and reconnects when possible.
    async fn bootstrap(&mut self) {
        let url: Option<String> = self.settings.get(keys::BASE_URL).await.ok().flatten();
        let token: Option<String> = self.settings.get(keys::ACCESS_TOKEN).await.ok().flatten();

        match (url, token) {
            (Some(url), Some(token)) => self.start_connect(url, token, false),
            (url, _) => {
                self.phase = Phase::Login(LoginForm::new(url.unwrap_or_default()));
            }
        }
    }

    fn start_connect(&mut self, url: String, token: String, remember: bool) {
        let client = CrmClient::builder()
            .url(&url)
            .token_provider(StaticTokenProvider::new(token.clone()))
            .build();
        let client = match client {
            Ok(client) => client,
            Err(e) => {
                let mut form = LoginForm::new(url);
                form.error = Some(e.to_string());
                self.phase = Phase::Login(form);
                return;
            }
        };

        if remember {
            let settings = self.settings.clone();
            let url = url.clone();
            tokio::spawn(async move {
                let _ = settings.set(keys::BASE_URL, &url).await;
                let _ = settings.set(keys::ACCESS_TOKEN, &token).await;
            });
        }

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match Session::establish(&client).await {
                Ok(session) => Ok((client, session)),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(AppEvent::SessionResult(Box::new(result)));
        });
        self.phase = Phase::Connecting;
    }

    fn logout(&mut self) {
        let settings = self.settings.clone();
        tokio::spawn(async move {
            let _ = settings.delete(keys::ACCESS_TOKEN).await;
            let _ = settings.delete(keys::USER_TYPE).await;
        });
        let url = match &self.phase {
            Phase::Ready(ws) => ws.client.base_url().to_string(),
            _ => String::new(),
        };
        // Dropping the workspace clears the session context; late events
        // from its tasks find no receiver state to mutate.
        self.phase = Phase::Login(LoginForm::new(url));
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('l')
            && matches!(self.phase, Phase::Ready(_))
        {
            self.logout();
            return;
        }

        match &mut self.phase {
            Phase::Login(form) => match key.code {
                KeyCode::Tab | KeyCode::BackTab => form.token_focused = !form.token_focused,
                KeyCode::Enter => {
                    let url = form.url.value().trim().to_string();
                    let token = form.token.value().trim().to_string();
                    if url.is_empty() || token.is_empty() {
                        form.error = Some("Both URL and token are required".into());
                    } else {
                        self.start_connect(url, token, true);
                    }
                }
                _ => {
                    if form.token_focused {
                        form.token.handle_key(key);
                    } else {
                        form.url.handle_key(key);
                    }
                    form.error = None;
                }
            },
            Phase::Connecting => {}
            Phase::Ready(workspace) => workspace.on_key(key),
        }
    }

    fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionResult(result) => {
                // A stale connect result after logout or re-login.
                if !matches!(self.phase, Phase::Connecting) {
                    return;
                }
                match *result {
                    Ok((client, session)) => {
                        let user_type = session.user().user_type.clone();
                        if let Some(hint) = &user_type {
                            let settings = self.settings.clone();
                            let hint = hint.clone();
                            tokio::spawn(async move {
                                let _ = settings.set(keys::USER_TYPE, &hint).await;
                            });
                        }
                        let mut workspace = Workspace::new(client, session, self.tx.clone());
                        // The user-type hint only picks the landing tab.
                        if user_type.as_deref() == Some("ADMIN") {
                            workspace.activate(Tab::Users);
                        } else {
                            workspace.activate(Tab::Dashboard);
                        }
                        workspace.load_options();
                        self.phase = Phase::Ready(Box::new(workspace));
                    }
                    Err(message) => {
                        let mut form = LoginForm::new(String::new());
                        form.error = Some(message);
                        self.phase = Phase::Login(form);
                    }
                }
            }
            other => {
                if let Phase::Ready(workspace) = &mut self.phase {
                    workspace.on_event(other);
                }
            }
        }
    }

    fn on_tick(&mut self) {
        self.spinner.tick();
        if let Phase::Ready(workspace) = &mut self.phase {
            workspace.on_tick();
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        match &self.phase {
            Phase::Login(form) => draw_login(frame, form),
            Phase::Connecting => {
                let line = Line::from(format!("{} connecting…", self.spinner.glyph()));
                frame.render_widget(Paragraph::new(line), frame.area());
            }
            Phase::Ready(workspace) => workspace.draw(frame, self.spinner.glyph()),
        }
    }
}

fn draw_login(frame: &mut Frame, form: &LoginForm) {
    let area = frame.area();
    let width = area.width.saturating_sub(8).min(64).max(30);
    let height = 8;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    let field = |label: &str, input: &TextInput, focused: bool| -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(format!("{label:>7}: "), style)];
        if focused {
            spans.extend(input.line(style).spans);
        } else {
            spans.push(Span::styled(input.value().to_string(), style));
        }
        Line::from(spans)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Salesdesk",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("URL", &form.url, !form.token_focused),
        field("Token", &form.token, form.token_focused),
        Line::from(""),
        Line::from(Span::styled(
            "Tab switches fields · Enter signs in · Ctrl+Q quits",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Sign in")),
        popup,
    );
}

struct Workspace {
    client: CrmClient,
    session: Session,
    registry: Registry,
    tx: mpsc::UnboundedSender<AppEvent>,
    tab: Tab,
    officers: Vec<SalesOfficer>,
    roles: Vec<Role>,
    dashboard: DashboardScreen,
    leads: LeadsScreen,
    officers_screen: OfficersScreen,
    meetings: MeetingsScreen,
    notes: NotesScreen,
    files: FilesScreen,
    users: UsersScreen,
    roles_screen: RolesScreen,
    notices: Notices,
    modal: Option<Modal>,
}

impl Workspace {
    fn new(client: CrmClient, session: Session, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let mut registry = Registry::with_builtins();
        // Custom validator backing the injected money editor.
        registry.register_predicate(
            "money",
            "Enter a non-negative amount like 12500.00",
            |s| {
                s.is_empty()
                    || s.parse::<f64>()
                        .map(|v| v.is_finite() && v >= 0.0)
                        .unwrap_or(false)
            },
        );

        Self {
            client,
            session,
            registry,
            tx,
            tab: Tab::Dashboard,
            officers: Vec::new(),
            roles: Vec::new(),
            dashboard: DashboardScreen::new(),
            leads: LeadsScreen::new(),
            officers_screen: OfficersScreen::new(),
            meetings: MeetingsScreen::new(),
            notes: NotesScreen::new(),
            files: FilesScreen::new(),
            users: UsersScreen::new(),
            roles_screen: RolesScreen::new(),
            notices: Notices::default(),
            modal: None,
        }
    }

    /// Startup loaders: officer and role option lists for the pickers.
    fn load_options(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::OfficerOptions(officers::options(&client).await));
        });
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::RoleOptions(users::role_options(&client).await));
        });
    }

    /// Switches tab and triggers the initial fetch when needed.
    fn activate(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Dashboard => {
                if self.dashboard.leads.phase() == LoadPhase::Idle {
                    self.refresh_dashboard();
                }
            }
            Tab::Leads => {
                if let Some(ticket) = self.leads.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Officers => {
                if let Some(ticket) = self.officers_screen.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Meetings => {
                if let Some(ticket) = self.meetings.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Notes => {
                if let Some(ticket) = self.notes.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Files => {
                if let Some(ticket) = self.files.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Users => {
                if let Some(ticket) = self.users.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
            Tab::Roles => {
                if let Some(ticket) = self.roles_screen.list.ensure_loaded() {
                    self.dispatch_fetch(tab, ticket);
                }
            }
        }
    }

    fn refresh_dashboard(&mut self) {
        let (leads_ticket, meetings_ticket) = self.dashboard.refresh();
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = leads::list(&client, &leads_ticket.query).await;
            let _ = tx.send(AppEvent::Fetch(FetchDone::DashLeads(
                leads_ticket.token,
                result,
            )));
        });
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = meetings::list(&client, &meetings_ticket.query).await;
            let _ = tx.send(AppEvent::Fetch(FetchDone::DashMeetings(
                meetings_ticket.token,
                result,
            )));
        });
    }

    /// Runs a list query for a tab as a spawned task.
    fn dispatch_fetch(&self, tab: Tab, ticket: RequestTicket) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestTicket { token, query } = ticket;
            let done = match tab {
                Tab::Dashboard => {
                    log::warn!("dashboard fetches use refresh_dashboard");
                    return;
                }
                Tab::Leads => FetchDone::Leads(token, leads::list(&client, &query).await),
                Tab::Officers => {
                    FetchDone::Officers(token, officers::list(&client, &query).await)
                }
                Tab::Meetings => {
                    FetchDone::Meetings(token, meetings::list(&client, &query).await)
                }
                Tab::Notes => FetchDone::Notes(token, notes::list(&client, &query).await),
                Tab::Files => FetchDone::Files(token, files::list(&client, &query).await),
                Tab::Users => FetchDone::Users(token, users::list(&client, &query).await),
                Tab::Roles => FetchDone::Roles(token, users::list_roles(&client, &query).await),
            };
            let _ = tx.send(AppEvent::Fetch(done));
        });
    }

    /// Runs a mutating call, reporting completion as an action event.
    fn spawn_mutation<F, Fut>(&self, tab: Tab, message: &str, run: F)
    where
        F: FnOnce(CrmClient) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), FetchError>> + Send + 'static,
    {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let message = message.to_string();
        tokio::spawn(async move {
            match run(client).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::ActionDone { tab, message });
                }
                Err(error) => {
                    let _ = tx.send(AppEvent::ActionFailed { tab, error });
                }
            }
        });
    }

    fn on_key(&mut self, key: KeyEvent) {
        if let Some(modal) = &mut self.modal {
            match modal.handle_key(key) {
                ModalOutcome::Pending => {}
                ModalOutcome::Cancelled => self.modal = None,
                ModalOutcome::Confirmed(action) => {
                    self.modal = None;
                    self.execute(action);
                }
                ModalOutcome::Assigned { ids, officer } => {
                    self.modal = None;
                    self.spawn_mutation(Tab::Leads, "Leads assigned", move |client| async move {
                        leads::bulk_assign(&client, &ids, officer).await
                    });
                }
                ModalOutcome::NoteSubmitted { lead, body } => {
                    self.modal = None;
                    self.spawn_mutation(Tab::Notes, "Note added", move |client| async move {
                        notes::create(&client, lead, &body).await
                    });
                }
            }
            return;
        }

        if !self.captures_input() {
            match key.code {
                KeyCode::Tab => {
                    self.activate(self.tab.next());
                    return;
                }
                KeyCode::Char(c @ '1'..='8') => {
                    let idx = (c as usize) - ('1' as usize);
                    self.activate(Tab::ALL[idx]);
                    return;
                }
                KeyCode::Esc => {
                    self.notices.dismiss();
                    return;
                }
                _ => {}
            }
        }

        let action = match self.tab {
            Tab::Dashboard => {
                if key.code == KeyCode::Char('r') {
                    self.refresh_dashboard();
                }
                ScreenAction::None
            }
            Tab::Leads => self.leads.handle_key(key, &self.session, &self.registry),
            Tab::Officers => self
                .officers_screen
                .handle_key(key, &self.session, &self.registry),
            Tab::Meetings => self.meetings.handle_key(key, &self.session, &self.registry),
            Tab::Notes => self.notes.handle_key(key, &self.session, &self.registry),
            Tab::Files => self.files.handle_key(key, &self.session, &self.registry),
            Tab::Users => {
                self.users
                    .handle_key(key, &self.session, &self.registry, &self.roles)
            }
            Tab::Roles => self
                .roles_screen
                .handle_key(key, &self.session, &self.registry),
        };
        self.perform(action);
    }

    fn captures_input(&self) -> bool {
        fn captures<R>(list: &ListScreen<R>) -> bool {
            list.editor.is_some()
                || list.filter.is_some()
                || list.search.as_ref().is_some_and(|s| s.focused)
        }
        match self.tab {
            Tab::Dashboard => false,
            Tab::Leads => captures(&self.leads.list),
            Tab::Officers => captures(&self.officers_screen.list),
            Tab::Meetings => captures(&self.meetings.list),
            Tab::Notes => captures(&self.notes.list),
            Tab::Files => captures(&self.files.list),
            Tab::Users => captures(&self.users.list),
            Tab::Roles => captures(&self.roles_screen.list),
        }
    }

    fn perform(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Fetch(ticket) => self.dispatch_fetch(self.tab, ticket),
            ScreenAction::Commit {
                row_id,
                field,
                value,
                complete,
            } => self.commit_cell(row_id, field, value, complete),
            ScreenAction::Delete(id) => {
                let (message, pending) = match self.tab {
                    Tab::Leads => ("Delete this lead?", PendingAction::DeleteLead(id)),
                    Tab::Officers => ("Delete this officer?", PendingAction::DeleteOfficer(id)),
                    Tab::Meetings => ("Delete this meeting?", PendingAction::DeleteMeeting(id)),
                    Tab::Notes => ("Delete this note?", PendingAction::DeleteNote(id)),
                    Tab::Files => ("Delete this file?", PendingAction::DeleteFile(id)),
                    _ => return,
                };
                self.modal = Some(Modal::Confirm(ConfirmModal::new(message, pending)));
            }
            ScreenAction::BulkDelete(ids) => {
                let message = format!("Permanently delete {} lead(s)?", ids.len());
                self.modal = Some(Modal::Challenge(ChallengeModal::new(
                    message,
                    PendingAction::BulkDeleteLeads(ids),
                )));
            }
            ScreenAction::BulkAssign(ids) => {
                if self.officers.is_empty() {
                    self.notices.warn("Officer list is still loading");
                    return;
                }
                let options: Vec<(Uuid, String)> = self
                    .officers
                    .iter()
                    .map(|o| (o.id, o.full_name()))
                    .collect();
                self.modal = Some(Modal::Assign(AssignPicker::new(ids, options)));
            }
            ScreenAction::Merge { primary, duplicate } => {
                self.modal = Some(Modal::Confirm(ConfirmModal::new(
                    "Merge the newer lead into the older one?",
                    PendingAction::MergeLeads { primary, duplicate },
                )));
            }
            ScreenAction::AddNote(lead) => {
                self.modal = Some(Modal::Note(NoteEntry::new(lead)));
            }
        }
    }

    /// Commits an inline cell edit against the tab's entity endpoint.
    fn commit_cell(&mut self, row_id: Uuid, field: &'static str, value: CellValue, complete: bool) {
        let json = value.to_json();
        match self.tab {
            Tab::Leads if complete => {
                // The column asked for the complete object: patch the whole
                // row with the field replaced.
                let Some(lead) = self
                    .leads
                    .list
                    .rows()
                    .iter()
                    .find(|l| l.id == row_id)
                    .cloned()
                else {
                    return;
                };
                let mut body = match serde_json::to_value(&lead) {
                    Ok(serde_json::Value::Object(map)) => map,
                    _ => return,
                };
                body.insert(field.to_string(), json);
                let body = serde_json::Value::Object(body);
                self.spawn_mutation(Tab::Leads, "Lead updated", move |client| async move {
                    leads::update(&client, row_id, &body).await
                });
            }
            Tab::Leads => {
                self.spawn_mutation(Tab::Leads, "Lead updated", move |client| async move {
                    leads::update_field(&client, row_id, field, json).await
                });
            }
            Tab::Officers => {
                self.spawn_mutation(Tab::Officers, "Officer updated", move |client| async move {
                    officers::update_field(&client, row_id, field, json).await
                });
            }
            Tab::Meetings => {
                self.spawn_mutation(Tab::Meetings, "Meeting updated", move |client| async move {
                    meetings::update_field(&client, row_id, field, json).await
                });
            }
            Tab::Users => {
                self.spawn_mutation(Tab::Users, "User updated", move |client| async move {
                    users::update_field(&client, row_id, field, json).await
                });
            }
            _ => {}
        }
    }

    fn execute(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteLead(id) => {
                self.spawn_mutation(Tab::Leads, "Lead deleted", move |client| async move {
                    leads::delete(&client, id).await
                });
            }
            PendingAction::BulkDeleteLeads(ids) => {
                let message = format!("{} lead(s) deleted", ids.len());
                self.spawn_mutation(Tab::Leads, &message, move |client| async move {
                    leads::bulk_delete(&client, &ids).await
                });
            }
            PendingAction::MergeLeads { primary, duplicate } => {
                self.spawn_mutation(Tab::Leads, "Leads merged", move |client| async move {
                    leads::merge(&client, primary, duplicate).await
                });
            }
            PendingAction::DeleteOfficer(id) => {
                self.spawn_mutation(Tab::Officers, "Officer deleted", move |client| async move {
                    officers::delete(&client, id).await
                });
            }
            PendingAction::DeleteMeeting(id) => {
                self.spawn_mutation(Tab::Meetings, "Meeting deleted", move |client| async move {
                    meetings::delete(&client, id).await
                });
            }
            PendingAction::DeleteNote(id) => {
                self.spawn_mutation(Tab::Notes, "Note deleted", move |client| async move {
                    notes::delete(&client, id).await
                });
            }
            PendingAction::DeleteFile(id) => {
                self.spawn_mutation(Tab::Files, "File deleted", move |client| async move {
                    files::delete(&client, id).await
                });
            }
        }
    }

    fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Fetch(done) => self.on_fetch(done),
            AppEvent::OfficerOptions(result) => match result {
                Ok(officers) => self.officers = officers,
                Err(e) => self.notices.warn(format!("Officer list failed: {e}")),
            },
            AppEvent::RoleOptions(result) => match result {
                Ok(roles) => self.roles = roles,
                Err(e) => self.notices.warn(format!("Role list failed: {e}")),
            },
            AppEvent::ActionDone { tab, message } => {
                self.notices.info(message);
                self.refetch_tab(tab);
            }
            AppEvent::ActionFailed { tab, error } => {
                self.notices.error(format!("{}: {error}", tab.title()));
            }
            AppEvent::SessionResult(_) => {}
        }
    }

    fn on_fetch(&mut self, done: FetchDone) {
        fn apply<R>(
            screen_list: &mut ListScreen<R>,
            token: RequestToken,
            outcome: Result<FetchResult<R>, FetchError>,
            notices: &mut Notices,
            what: &str,
        ) {
            let error_text = outcome.as_ref().err().map(|e| e.to_string());
            if screen_list.on_fetch(token, outcome) {
                if let Some(text) = error_text {
                    notices.error(format!("{what}: {text}"));
                }
            }
        }

        match done {
            FetchDone::Leads(token, outcome) => {
                apply(&mut self.leads.list, token, outcome, &mut self.notices, "Leads")
            }
            FetchDone::Officers(token, outcome) => apply(
                &mut self.officers_screen.list,
                token,
                outcome,
                &mut self.notices,
                "Officers",
            ),
            FetchDone::Meetings(token, outcome) => apply(
                &mut self.meetings.list,
                token,
                outcome,
                &mut self.notices,
                "Meetings",
            ),
            FetchDone::Notes(token, outcome) => {
                apply(&mut self.notes.list, token, outcome, &mut self.notices, "Notes")
            }
            FetchDone::Files(token, outcome) => {
                apply(&mut self.files.list, token, outcome, &mut self.notices, "Files")
            }
            FetchDone::Users(token, outcome) => {
                apply(&mut self.users.list, token, outcome, &mut self.notices, "Users")
            }
            FetchDone::Roles(token, outcome) => apply(
                &mut self.roles_screen.list,
                token,
                outcome,
                &mut self.notices,
                "Roles",
            ),
            FetchDone::DashLeads(token, outcome) => {
                if let Err(e) = &outcome {
                    self.notices.error(format!("Dashboard: {e}"));
                }
                self.dashboard.leads.complete(token, outcome);
            }
            FetchDone::DashMeetings(token, outcome) => {
                if let Err(e) = &outcome {
                    self.notices.error(format!("Dashboard: {e}"));
                }
                self.dashboard.meetings.complete(token, outcome);
            }
        }
    }

    fn refetch_tab(&mut self, tab: Tab) {
        let ticket = match tab {
            Tab::Dashboard => {
                self.refresh_dashboard();
                return;
            }
            Tab::Leads => {
                self.leads.list.grid.clear_marks();
                self.leads.list.loader.refetch()
            }
            Tab::Officers => self.officers_screen.list.loader.refetch(),
            Tab::Meetings => self.meetings.list.loader.refetch(),
            Tab::Notes => self.notes.list.loader.refetch(),
            Tab::Files => self.files.list.loader.refetch(),
            Tab::Users => self.users.list.loader.refetch(),
            Tab::Roles => self.roles_screen.list.loader.refetch(),
        };
        self.dispatch_fetch(tab, ticket);
    }

    fn on_tick(&mut self) {
        self.notices.expire(Instant::now());

        let now = Instant::now();
        let ticket = match self.tab {
            Tab::Dashboard => None,
            Tab::Leads => self.leads.list.on_tick(now),
            Tab::Officers => self.officers_screen.list.on_tick(now),
            Tab::Meetings => self.meetings.list.on_tick(now),
            Tab::Notes => self.notes.list.on_tick(now),
            Tab::Files => self.files.list.on_tick(now),
            Tab::Users => self.users.list.on_tick(now),
            Tab::Roles => self.roles_screen.list.on_tick(now),
        };
        if let Some(ticket) = ticket {
            self.dispatch_fetch(self.tab, ticket);
        }
    }

    fn is_loading(&self) -> bool {
        match self.tab {
            Tab::Dashboard => {
                self.dashboard.leads.is_loading() || self.dashboard.meetings.is_loading()
            }
            Tab::Leads => self.leads.list.loader.is_loading(),
            Tab::Officers => self.officers_screen.list.loader.is_loading(),
            Tab::Meetings => self.meetings.list.loader.is_loading(),
            Tab::Notes => self.notes.list.loader.is_loading(),
            Tab::Files => self.files.list.loader.is_loading(),
            Tab::Users => self.users.list.loader.is_loading(),
            Tab::Roles => self.roles_screen.list.loader.is_loading(),
        }
    }

    fn draw(&self, frame: &mut Frame, spinner_glyph: &str) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

        // Tab bar.
        let mut spans = Vec::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let style = if *tab == self.tab {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

        let glyph = self.is_loading().then_some(spinner_glyph);
        match self.tab {
            Tab::Dashboard => self.dashboard.view(frame, chunks[1], glyph),
            Tab::Leads => self.leads.view(frame, chunks[1], glyph),
            Tab::Officers => self.officers_screen.view(frame, chunks[1], glyph),
            Tab::Meetings => self.meetings.view(frame, chunks[1], glyph),
            Tab::Notes => self.notes.view(frame, chunks[1], glyph),
            Tab::Files => self.files.view(frame, chunks[1], glyph),
            Tab::Users => self.users.view(frame, chunks[1], &self.roles, glyph),
            Tab::Roles => self.roles_screen.view(frame, chunks[1], glyph),
        }

        // Status bar.
        let status = format!(
            "{} ({}) · Tab/1-8 screens · j/k h/l move · s sort · f filter · / search · e edit · space mark · r refresh · Ctrl+L logout · Ctrl+Q quit",
            self.session.user().username,
            self.session.user().role,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status,
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[2],
        );

        // Notices overlay, top-right of the body.
        if !self.notices.is_empty() {
            let lines: Vec<Line> = self
                .notices
                .iter()
                .map(|n| {
                    let color = match n.level {
                        crate::notify::Level::Info => Color::Green,
                        crate::notify::Level::Warn => Color::Yellow,
                        crate::notify::Level::Error => Color::Red,
                    };
                    Line::from(Span::styled(
                        n.text.clone(),
                        Style::default().fg(color),
                    ))
                })
                .collect();
            let width = chunks[1].width.min(48);
            let height = (lines.len() as u16 + 2).min(8);
            let area = Rect::new(
                chunks[1].x + chunks[1].width - width,
                chunks[1].y,
                width,
                height,
            );
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
                area,
            );
        }

        if let Some(modal) = &self.modal {
            let (title, lines) = modal.render();
            render_popup(frame, chunks[1], &title, lines);
        }
    }
}
