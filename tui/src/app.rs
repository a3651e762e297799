//! Main TUI application state and logic
//!
//! Key handling only changes local state and returns `Action`s; `dispatch`
//! turns actions into blocking requests on tokio's blocking pool, and
//! workers report back through an unbounded channel. Every finished
//! mutation schedules a full fetch. Fetches are applied in arrival order,
//! so the last response to arrive is what gets displayed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use todo_core::{
    fetch_with_retry, CreationForm, HttpResponse, ListContainer, Mutation, MutationOutcome,
    SurfaceKey, TodoClient, TodoItem, Transport, TransportError, UpdateSurfaces,
};

use crate::config::Config;
use crate::events::{Action, AppEvent};
use crate::ui;

/// Which part of the screen receives keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
    Surface(SurfaceKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    pub list: ListContainer,
    pub form: CreationForm,
    pub surfaces: UpdateSurfaces,
    pub focus: Focus,
    pub selected: usize,
    pub status: Option<Status>,
    /// Last list fetch failure; cleared by the next successful fetch.
    pub fetch_error: Option<String>,
    pub in_flight: usize,
    pub should_quit: bool,
    transport: Arc<dyn Transport>,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = unbounded_channel();
        let client = TodoClient::new(&config.api_url);
        Self {
            list: ListContainer::new(client),
            form: CreationForm::new(config.clear_on_submit),
            surfaces: UpdateSurfaces::new(),
            focus: Focus::Input,
            selected: 0,
            status: None,
            fetch_error: None,
            in_flight: 0,
            should_quit: false,
            config,
            transport,
            tx,
            rx,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.dispatch(Action::Fetch {
            retries: self.config.initial_fetch_retries,
        });

        loop {
            terminal.draw(|f| ui::draw(f, self))?;

            while let Ok(event) = self.rx.try_recv() {
                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action);
                }
            }

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = crossterm::event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = self.handle_key(key) {
                            self.dispatch(action);
                        }
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("leaving event loop with {} request(s) in flight", self.in_flight);
        Ok(())
    }

    /// Wait for the next worker report.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn selected_item(&self) -> Option<&TodoItem> {
        self.list.items().get(self.selected)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    /// Handle keyboard input events
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match self.focus.clone() {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
            Focus::Surface(surface) => self.handle_surface_key(surface, key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::Mutate(self.form.submit())),
            KeyCode::Backspace => {
                self.form.pop();
                None
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => {
                self.focus = Focus::List;
                None
            }
            KeyCode::Char(c) => {
                self.form.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Some(Action::Quit)
            }
            KeyCode::Tab | KeyCode::Char('a') | KeyCode::Char('i') => {
                self.focus = Focus::Input;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.list.items().len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('r') => Some(Action::Fetch { retries: 0 }),
            KeyCode::Char('u') => {
                self.toggle_selected_surface();
                None
            }
            KeyCode::Enter => {
                let item = self.selected_item()?.clone();
                let key = SurfaceKey::for_item(&item.id);
                if self.surfaces.is_open(&key) {
                    self.focus = Focus::Surface(key);
                } else {
                    self.toggle_selected_surface();
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let row = self.list.rows().into_iter().nth(self.selected)?;
                Some(Action::Mutate(row.delete_control().confirm()))
            }
            _ => None,
        }
    }

    fn toggle_selected_surface(&mut self) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        if self.surfaces.toggle(&item).is_open() {
            debug!(id = %item.id, "opened update surface");
            self.focus = Focus::Surface(SurfaceKey::for_item(&item.id));
        }
    }

    fn handle_surface_key(&mut self, surface: SurfaceKey, key: KeyEvent) -> Option<Action> {
        let cancel_behavior = self.config.cancel_behavior;
        let Some(control) = self.surfaces.get_mut(&surface) else {
            self.focus = Focus::List;
            return None;
        };
        match key.code {
            KeyCode::Enter => {
                self.focus = Focus::List;
                control.confirm().map(Action::Mutate)
            }
            KeyCode::Esc => {
                self.focus = Focus::List;
                control.cancel(cancel_behavior).map(Action::Mutate)
            }
            // Ctrl+X always discards, even when Esc is set to persist.
            KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::List;
                control.close();
                None
            }
            // Leave the surface open and go back to the list.
            KeyCode::Tab => {
                self.focus = Focus::List;
                None
            }
            KeyCode::Backspace => {
                control.pop();
                None
            }
            KeyCode::Char(c) => {
                control.push(c);
                None
            }
            _ => None,
        }
    }

    /// Apply a worker report; may ask for a follow-up fetch.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Action> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            AppEvent::FetchFinished(result) => {
                self.apply_fetch(result);
                None
            }
            AppEvent::MutationFinished { mutation, result } => {
                let outcome = MutationOutcome::from_response(self.list.client(), &result);
                self.report_mutation(&mutation, &outcome);
                Some(Action::Fetch { retries: 0 })
            }
        }
    }

    fn apply_fetch(&mut self, result: Result<HttpResponse, TransportError>) {
        match self.list.apply_fetch(result) {
            Ok(count) => {
                self.surfaces.retain_items(self.list.items());
                if self.selected >= count {
                    self.selected = count.saturating_sub(1);
                }
                let stale_surface = matches!(
                    &self.focus,
                    Focus::Surface(key) if self.surfaces.get(key).is_none()
                );
                if stale_surface {
                    self.focus = Focus::List;
                }
                self.fetch_error = None;
            }
            Err(e) => self.fetch_error = Some(format!("refresh failed: {e}")),
        }
    }

    fn report_mutation(&mut self, mutation: &Mutation, outcome: &MutationOutcome) {
        info!(verb = mutation.verb(), %outcome, "mutation finished");
        if outcome.is_applied() {
            self.set_status(format!("{} ok", mutation.verb()));
        } else {
            self.set_error(format!("{} failed: {outcome}", mutation.verb()));
        }
    }

    /// Start the work described by `action` on a blocking worker.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {}
            Action::Fetch { retries } => {
                let request = self.list.fetch_request();
                let delay = self.config.retry_delay();
                self.spawn(move |transport| {
                    AppEvent::FetchFinished(fetch_with_retry(transport, request, retries, delay))
                });
            }
            Action::Mutate(mutation) => match mutation.to_request(self.list.client()) {
                Ok(request) => {
                    debug!(verb = mutation.verb(), "dispatching mutation");
                    self.spawn(move |transport| AppEvent::MutationFinished {
                        result: transport.execute(request),
                        mutation,
                    });
                }
                Err(e) => {
                    let outcome = MutationOutcome::Unsent(e.to_string());
                    self.report_mutation(&mutation, &outcome);
                    self.dispatch(Action::Fetch { retries: 0 });
                }
            },
        }
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn Transport) -> AppEvent + Send + 'static,
    {
        self.in_flight += 1;
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let event = job(transport.as_ref());
            if tx.send(event).is_err() {
                debug!("event loop gone, dropping worker result");
            }
        });
    }
}
