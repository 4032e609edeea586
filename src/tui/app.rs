use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::drag::{
    Board, CommitOutcome, DispatchOutcome, PointerEvent, PointerKind, TickHandle, TickOutcome,
    TickQueue,
};
use crate::io::storage::FileStorage;
use crate::model::{Config, NoteId};
use crate::ops::note_ops::NoteStore;

use super::input::{self, EditBuffer};
use super::render;
use super::surface::{CellSize, ListSurface};
use super::theme::Theme;

/// Longest wait for input when no tick is pending
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Two header presses closer than this edit the title
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The add-note input has focus
    Add,
    EditTitle,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub ticks: TickQueue,
    pub surface: ListSurface,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the committed display order
    pub cursor: usize,
    /// Buffer for the add-note input and the title editor
    pub input: EditBuffer,
    /// One-shot message shown in the status row
    pub status: Option<String>,
    /// Kind reported for mouse input
    pub pointer_kind: PointerKind,
    last_header_click: Option<Instant>,
}

impl App {
    pub fn new(store: NoteStore, config: &Config) -> Self {
        let mut app = App {
            board: Board::from_config(store, config),
            ticks: TickQueue::new(Instant::now()),
            surface: ListSurface::new(CellSize::from_config(&config.ui)),
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            input: EditBuffer::default(),
            status: None,
            pointer_kind: if config.drag.mouse_as_touch {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            },
            last_header_click: None,
        };
        app.sync_rows();
        app
    }

    /// Note under the cursor, in committed display order
    pub fn selected_note(&self) -> Option<NoteId> {
        self.board.store().display().get(self.cursor).map(|n| n.id)
    }

    pub fn display_index_of(&self, id: NoteId) -> Option<usize> {
        self.board
            .store()
            .display()
            .iter()
            .position(|n| n.id == id)
    }

    /// Push the committed order to the surface and keep the cursor in range
    pub fn sync_rows(&mut self) {
        let ids: Vec<NoteId> = self.board.store().display().iter().map(|n| n.id).collect();
        self.cursor = self.cursor.min(ids.len().saturating_sub(1));
        self.surface.set_rows(ids);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.board.store().notes().len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
        self.surface.ensure_visible(self.cursor);
    }

    /// Forward a pointer event to the board
    pub fn dispatch(&mut self, event: PointerEvent) -> DispatchOutcome {
        self.sync_rows();
        let outcome = self
            .board
            .dispatch(event, &mut self.surface, &mut self.ticks);
        match outcome {
            DispatchOutcome::Toggled(_) | DispatchOutcome::Deleted(_) => self.sync_rows(),
            DispatchOutcome::Committed(CommitOutcome::Moved { source, .. }) => {
                self.sync_rows();
                if let Some(idx) = self.display_index_of(source) {
                    self.cursor = idx;
                }
            }
            _ => {}
        }
        self.collect_persist_error();
        outcome
    }

    pub fn on_tick(&mut self, handle: TickHandle) -> TickOutcome {
        self.board.on_tick(handle, &mut self.surface, &mut self.ticks)
    }

    /// Advance the tick clock and run everything due
    pub fn run_due_ticks(&mut self, now: Instant) {
        self.ticks.set_now(now);
        for handle in self.ticks.take_due() {
            self.on_tick(handle);
        }
    }

    /// Abandon any gesture in progress (focus lost, shutdown)
    pub fn cancel_gesture(&mut self) {
        self.board.teardown(&mut self.ticks);
    }

    /// Record a press on the header; true when it completes a double-click
    pub fn register_header_click(&mut self, at: Instant) -> bool {
        match self.last_header_click.take() {
            Some(prev) if at.saturating_duration_since(prev) <= DOUBLE_CLICK => true,
            _ => {
                self.last_header_click = Some(at);
                false
            }
        }
    }

    /// Surface a failed save in the status row
    pub fn collect_persist_error(&mut self) {
        if let Some(err) = self.board.take_persist_error() {
            self.status = Some(format!("Could not save: {}", err));
        }
    }
}

/// Run the TUI application
pub fn run(config: &Config, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStorage::open(data_dir)?;
    log::info!("event=storage_open path={}", storage.path().display());
    let store = NoteStore::load(Box::new(storage), config.storage.persist_empty);
    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // No tick may outlive the view
    app.cancel_gesture();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = app
            .ticks
            .time_until_next()
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => input::handle_focus_lost(app),
                _ => {}
            }
        }
        app.run_due_ticks(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
