use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use reqwest::StatusCode;
use tokio::runtime::Handle;

use crate::api::ApiError;
use crate::api::fake::FakeApi;
use crate::model::{Task, TaskId, TaskUpdate, UiConfig};
use crate::ops::controller::Outcome;
use crate::ops::{Controller, Dispatcher, Operation};
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

/// Render the whole screen
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

pub fn task(id: u64, title: &str, completed: bool) -> Task {
    Task {
        id: TaskId(id),
        title: title.into(),
        completed,
        created_at: None,
    }
}

/// An app whose controller has already loaded `tasks`.
/// Must be called inside a tokio runtime.
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let mut controller = Controller::new(FakeApi::with_tasks(tasks.clone()));
    let request = controller.begin(Operation::LoadAll);
    controller.finish(request.ticket, Ok(Outcome::Loaded(tasks)));
    App::new(
        controller,
        Dispatcher::new(Handle::current()),
        "http://test".into(),
        &UiConfig::default(),
    )
}

/// Record a failed update of `id` in the controller's error slot
pub fn fail_update(app: &mut App, id: TaskId, status: StatusCode) {
    let request = app.controller.begin(Operation::Update {
        id,
        update: TaskUpdate::completed(true),
    });
    app.controller.finish(
        request.ticket,
        Err(ApiError::Status {
            status,
            body: String::new(),
        }),
    );
}
