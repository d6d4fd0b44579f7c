/// Main TUI application
///
/// All UI state (selection, rows, details, dialogs, viewport flag) lives
/// here and is only mutated on the task running `run_loop`. The refresh
/// scheduler talks to it through channels.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::{
    EntryKind, FetchResult, MetricCatalog, MetricProvider, RefreshScheduler, RefreshUpdate,
    SanitizedError, SelectionState, Transition,
};
use crate::screens::{Dashboard, Overlays, ViewportChange, ViewportGuard};
use crate::utils::{AppConfig, INPUT_POLL_INTERVAL};

pub struct App {
    catalog: Arc<MetricCatalog>,
    provider: Arc<dyn MetricProvider>,
    config: Arc<AppConfig>,
    dashboard: Dashboard,
    selection: SelectionState,
    viewport: ViewportGuard,
    error_dialog: Option<SanitizedError>,
    should_quit: bool,
    // Background refresh plumbing
    selection_tx: watch::Sender<usize>,
    refresh_tx: Option<mpsc::UnboundedSender<RefreshUpdate>>,
    refresh_rx: mpsc::UnboundedReceiver<RefreshUpdate>,
    shutdown: CancellationToken,
    scheduler_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn MetricProvider>) -> Self {
        let catalog = MetricCatalog::standard();
        let dashboard = Dashboard::new(&catalog);
        let selection = SelectionState::new(catalog.len());
        let viewport = ViewportGuard::new(config.min_terminal_width);

        let (selection_tx, _) = watch::channel(selection.current());
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            catalog,
            provider,
            config,
            dashboard,
            selection,
            viewport,
            error_dialog: None,
            should_quit: false,
            selection_tx,
            refresh_tx: Some(refresh_tx),
            refresh_rx,
            shutdown: CancellationToken::new(),
            scheduler_handle: None,
        };

        // Eager fetch so the details pane has data on first paint
        app.load_entry(app.selection.current());
        app
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportGuard {
        &self.viewport
    }

    pub fn error_dialog(&self) -> Option<&SanitizedError> {
        self.error_dialog.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e).context("Failed to initialize terminal");
            }
        };

        self.start_scheduler();
        tracing::info!("dashboard started");

        let result = self.run_loop(&mut terminal);

        self.stop_scheduler().await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!("dashboard stopped");
        result
    }

    fn run_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            // Apply queued updates from the refresh scheduler (non-blocking)
            while let Ok(update) = self.refresh_rx.try_recv() {
                self.apply_refresh(update);
            }

            terminal.draw(|f| self.draw(f))?;

            if event::poll(INPUT_POLL_INTERVAL)? {
                // Resize events need no handling: the next draw observes the new width
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Spawn the refresh timer. Needs a tokio runtime; only the first call
    /// has an effect.
    pub fn start_scheduler(&mut self) {
        let Some(updates) = self.refresh_tx.take() else {
            return;
        };

        let scheduler = RefreshScheduler::new(
            self.config.refresh_interval,
            self.catalog.clone(),
            self.provider.clone(),
            self.selection_tx.subscribe(),
            updates,
            self.shutdown.clone(),
        );
        self.scheduler_handle = Some(scheduler.spawn());
    }

    async fn stop_scheduler(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.scheduler_handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "refresh scheduler ended abnormally");
            }
        }
    }

    /// Draw one frame; the viewport guard sees the width of every frame
    pub fn draw(&mut self, frame: &mut Frame) {
        match self.viewport.observe(frame.size().width) {
            Some(ViewportChange::WarningShown) => {
                tracing::info!(width = frame.size().width, min = self.config.min_terminal_width, "terminal too narrow");
            }
            Some(ViewportChange::LayoutRestored) => {
                tracing::info!(width = frame.size().width, "terminal width restored");
            }
            None => {}
        }

        self.dashboard.render(
            frame,
            &self.catalog,
            &self.config,
            self.selection.current(),
            Overlays {
                error: self.error_dialog.as_ref(),
                width_warning: self.viewport.warning(),
            },
        );
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        let key = key_event.code;

        if key == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // Width warning blocks everything behind it
        if self.viewport.warning().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.viewport.acknowledge();
            }
            return;
        }

        // Error dialog must be acknowledged before navigating on
        if self.error_dialog.is_some() {
            if matches!(
                key,
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('o')
            ) {
                self.error_dialog = None;
            }
            return;
        }

        match key {
            KeyCode::Up => {
                let transition = self.selection.prev();
                self.on_transition(transition);
            }
            KeyCode::Down => {
                let transition = self.selection.next();
                self.on_transition(transition);
            }
            KeyCode::Home => {
                let transition = self.selection.first();
                self.on_transition(transition);
            }
            KeyCode::End => {
                let transition = self.selection.last();
                self.on_transition(transition);
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char(c) => self.select_shortcut(c),
            _ => {}
        }
    }

    fn select_shortcut(&mut self, key: char) {
        let Some(index) = self.catalog.index_of_shortcut(key) else {
            return;
        };
        let transition = self.selection.select(index);
        self.on_transition(transition);

        // Shortcuts select and activate; for data entries selecting is enough
        if self.catalog.get(index).map(|e| e.kind) == Some(EntryKind::Quit) {
            self.quit();
        }
    }

    /// Navigation handler: runs once per actual change of selection
    fn on_transition(&mut self, transition: Option<Transition>) {
        let Some(Transition { from, to }) = transition else {
            return;
        };
        tracing::debug!(from, to, "selection changed");

        if let Some(entry) = self.catalog.get(from) {
            self.dashboard.restore_row(from, entry);
        }
        self.selection_tx.send_replace(to);
        self.load_entry(to);
    }

    /// Enter on the current entry
    fn activate(&mut self) {
        let index = self.selection.current();
        match self.catalog.get(index).map(|e| e.kind) {
            Some(EntryKind::Metric(_)) => self.load_entry(index),
            Some(EntryKind::Quit) => self.quit(),
            None => {}
        }
    }

    /// Fetch (or show the fixed text of) an entry on the UI thread.
    /// Failures raise the error dialog.
    fn load_entry(&mut self, index: usize) {
        let Some(entry) = self.catalog.get(index) else {
            return;
        };

        let Some(metric) = entry.metric() else {
            self.dashboard.apply_static(index, entry);
            return;
        };

        let result = self.provider.fetch(metric);
        self.apply_navigation_result(index, &result);
    }

    fn apply_navigation_result(&mut self, index: usize, result: &FetchResult) {
        self.dashboard.apply_result(index, result);
        if let Some(err) = result.error {
            tracing::debug!(index, error = %err, "fetch failed, showing dialog");
            self.error_dialog = Some(err);
        }
    }

    /// Apply a queued scheduler result. Returns whether anything changed.
    pub fn apply_refresh(&mut self, update: RefreshUpdate) -> bool {
        if self.shutdown.is_cancelled() {
            return false;
        }
        // The user may have moved on since the tick read the selection
        if update.index != self.selection.current() {
            tracing::trace!(index = update.index, "discarding refresh for unselected entry");
            return false;
        }
        if !update.result.is_ok() {
            return false;
        }

        self.dashboard.apply_result(update.index, &update.result);
        true
    }

    /// Stop the application; later calls are no-ops
    pub fn quit(&mut self) {
        if self.should_quit {
            return;
        }
        self.should_quit = true;
        self.shutdown.cancel();
        tracing::info!("quit requested");
    }
}
