use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use crate::io::autosave::{AutosaveEvent, Autosaver, SharedDocument, lock, shared};
use crate::io::document_io::{load_document, save_document};
use crate::model::config::Settings;
use crate::model::document::{Document, Mode};
use crate::ops::{line_ops, view};

use super::editor::LineEditor;
use super::input;
use super::render;
use super::theme::Theme;

/// Main application state
pub struct App {
    pub doc: SharedDocument,
    pub settings: Settings,
    pub theme: Theme,
    /// Line editor attached to the selected line in Edit mode
    pub editor: Option<LineEditor>,
    /// Caret column carried across lines while editing
    pub last_caret: usize,
    pub show_help: bool,
    /// Set while the save-before-quit prompt is up; holds the mode to go
    /// back to if the prompt is cancelled
    pub confirm_quit: Option<Mode>,
    /// One-shot message shown in the status row (errors mostly)
    pub status_message: Option<String>,
    pub last_saved: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(mut doc: Document, settings: Settings) -> Self {
        view::set_filter(&mut doc, settings.filter);
        let theme = Theme::from_config(&settings.ui);
        App {
            doc: shared(doc),
            settings,
            theme,
            editor: None,
            last_caret: 0,
            show_help: false,
            confirm_quit: None,
            status_message: None,
            last_saved: None,
            should_quit: false,
        }
    }

    /// Changes not yet on disk, counting text still in the editor
    pub fn has_unsaved_changes(&self, doc: &Document) -> bool {
        if doc.is_modified() {
            return true;
        }
        match (&self.editor, doc.selected_line()) {
            (Some(editor), Some((_, line))) => editor.text() != line,
            _ => false,
        }
    }

    /// Save to the settings path, reporting failure in the status row
    pub fn save(&mut self, doc: &mut Document) -> bool {
        match save_document(doc, &self.settings.path) {
            Ok(()) => {
                self.last_saved = Some(Local::now());
                self.status_message = None;
                true
            }
            Err(e) => {
                error!(error = %e, "save failed");
                self.status_message = Some(e.to_string());
                false
            }
        }
    }

    pub fn handle_autosave(&mut self, event: AutosaveEvent) {
        match event {
            AutosaveEvent::Saved => self.last_saved = Some(Local::now()),
            AutosaveEvent::Failed(msg) => {
                self.status_message = Some(format!("autosave failed: {}", msg));
            }
        }
    }

    /// Start editing the selected line, creating one if the view is empty.
    /// `caret` of `None` puts the caret at the end of the line.
    pub fn enter_edit(&mut self, doc: &mut Document, caret: Option<usize>) {
        line_ops::ensure_line_for_edit(doc);
        view::set_mode(doc, Mode::Edit);
        self.attach_editor(doc, caret.unwrap_or(usize::MAX));
        self.last_caret = self.editor.as_ref().map_or(0, LineEditor::caret);
    }

    /// Leave Edit mode, keeping the edited text. A task left without a
    /// description is dropped.
    pub fn exit_edit(&mut self, doc: &mut Document) {
        self.detach_editor(doc);
        line_ops::finish_edit(doc);
        view::set_mode(doc, Mode::Task);
    }

    /// Put the editor on the selected line
    pub fn attach_editor(&mut self, doc: &Document, caret: usize) {
        let text = doc.selected_line().map_or("", |(_, line)| line);
        self.editor = Some(LineEditor::new(text, caret));
    }

    /// Write the editor text back to the selected line and drop the editor
    pub fn detach_editor(&mut self, doc: &mut Document) {
        if let Some(editor) = self.editor.take() {
            line_ops::commit_edit(doc, editor.text());
        }
    }

    /// Quit, asking first when there are unsaved changes
    pub fn request_quit(&mut self, doc: &mut Document) {
        if doc.mode() == Mode::Edit {
            self.exit_edit(doc);
        }
        let resume = doc.mode();
        view::set_mode(doc, Mode::Exit);
        if doc.is_modified() {
            self.confirm_quit = Some(resume);
        } else {
            self.should_quit = true;
        }
    }

    pub fn cancel_quit(&mut self, doc: &mut Document) {
        if let Some(mode) = self.confirm_quit.take() {
            view::set_mode(doc, mode);
        }
    }
}

/// Run the editor on the file named in `settings`
pub fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&settings.path)?;
    let mut app = App::new(doc, settings);

    let (autosaver, autosave_events) = match app.settings.autosave {
        Some(interval) => {
            let (tx, rx) = mpsc::channel();
            let saver =
                Autosaver::spawn(app.doc.clone(), app.settings.path.clone(), interval, tx)?;
            (Some(saver), Some(rx))
        }
        None => (None, None),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, autosave_events.as_ref());

    if let Some(saver) = autosaver {
        saver.stop();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!("exit");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    autosave_events: Option<&Receiver<AutosaveEvent>>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        {
            let shared = app.doc.clone();
            let mut doc = lock(&shared);
            terminal.draw(|frame| render::render(frame, app, &mut doc))?;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(events) = autosave_events {
            while let Ok(event) = events.try_recv() {
                app.handle_autosave(event);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
