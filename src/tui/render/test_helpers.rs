use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStorage;
use crate::model::Config;
use crate::ops::note_ops::NoteStore;
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over in-memory storage holding `texts` in order.
pub fn app_with_notes(texts: &[&str]) -> App {
    let mut store = NoteStore::load(Box::new(MemoryStorage::new()), false);
    for text in texts {
        store.add_note(text).unwrap();
    }
    App::new(store, &Config::default())
}

/// Like `app_with_notes`, after one full frame so the list geometry is known.
/// The list starts at terminal row 2.
pub fn layout_app(texts: &[&str], w: u16, h: u16) -> App {
    let mut app = app_with_notes(texts);
    render_to_string(w, h, |frame, _| {
        super::render(frame, &mut app);
    });
    app
}
