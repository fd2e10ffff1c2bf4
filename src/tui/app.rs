use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::api::HttpTaskApi;
use crate::model::{NewTask, TaskUpdate, UiConfig};
use crate::ops::{Controller, Dispatcher, Operation};

use super::editor::TaskEditor;
use super::input;
use super::list_view::{ListIntent, ListView};
use super::render;
use super::theme::Theme;

/// Which widget receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    List,
}

/// Everything `run` needs to start the TUI
#[derive(Debug, Clone)]
pub struct TuiSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub ui: UiConfig,
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub dispatcher: Dispatcher,
    pub editor: TaskEditor,
    pub list: ListView,
    pub focus: Focus,
    pub theme: Theme,
    /// Shown in the header
    pub base_url: String,
    pub show_key_hints: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        controller: Controller,
        dispatcher: Dispatcher,
        base_url: String,
        ui: &UiConfig,
    ) -> Self {
        App {
            controller,
            dispatcher,
            editor: TaskEditor::new(),
            list: ListView::new(),
            focus: Focus::List,
            theme: Theme::from_config(ui),
            base_url,
            show_key_hints: ui.show_key_hints,
            should_quit: false,
        }
    }

    fn submit(&mut self, op: Operation) {
        self.dispatcher.submit(&mut self.controller, op);
    }

    /// Fetch the whole list again
    pub fn reload(&mut self) {
        self.submit(Operation::LoadAll);
    }

    /// Submit the editor's title, if any
    pub fn submit_editor(&mut self) {
        if let Some(title) = self.editor.submit() {
            self.submit(Operation::Create(NewTask::new(title)));
        }
    }

    /// Route a list intent to the controller
    pub fn handle_list_intent(&mut self, intent: ListIntent) {
        match intent {
            ListIntent::Toggle(id) => {
                self.dispatcher.toggle(&mut self.controller, id);
            }
            ListIntent::Save { id, title } => self.submit(Operation::Update {
                id,
                update: TaskUpdate::title(title),
            }),
            ListIntent::Delete(id) => self.submit(Operation::Delete(id)),
        }
    }

    /// Apply finished requests. Returns how many were applied.
    pub fn sync(&mut self) -> usize {
        let applied = self.dispatcher.drain(&mut self.controller);
        if applied > 0 {
            self.list.clamp(self.controller.tasks());
        }
        applied
    }
}

/// Run the TUI application
pub fn run(settings: TuiSettings) -> Result<(), Box<dyn std::error::Error>> {
    // Declared first so it outlives the app: dropping the app aborts its
    // outstanding requests on this runtime.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let api = HttpTaskApi::new(&settings.base_url, settings.timeout)?;
    let controller = Controller::new(Arc::new(api));
    let dispatcher = Dispatcher::new(runtime.handle().clone());
    let mut app = App::new(controller, dispatcher, settings.base_url, &settings.ui);
    info!(base_url = %app.base_url, "starting tui");
    app.reload();

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

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!(in_flight = app.dispatcher.in_flight(), "tui exiting");
    drop(app);
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync();
        terminal.draw(|frame| render::render(frame, app))?;

        // Short poll so responses show up promptly without a keypress
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::model::{Task, TaskId};
    use pretty_assertions::assert_eq;
    use tokio::runtime::Handle;

    fn task(id: u64, title: &str) -> Task {
        Task {
            id: TaskId(id),
            title: title.into(),
            completed: false,
            created_at: None,
        }
    }

    fn app_over(fake: &Arc<FakeApi>) -> App {
        let controller = Controller::new(fake.clone());
        let dispatcher = Dispatcher::new(Handle::current());
        App::new(
            controller,
            dispatcher,
            "http://test".into(),
            &UiConfig::default(),
        )
    }

    async fn settle(app: &mut App) {
        while app.dispatcher.apply_next(&mut app.controller).await.is_some() {}
        app.list.clamp(app.controller.tasks());
    }

    #[tokio::test]
    async fn editor_submit_creates_task() {
        let fake = FakeApi::with_tasks(vec![]);
        let mut app = app_over(&fake);
        app.editor.input.insert_str("  Buy milk ");

        app.submit_editor();
        settle(&mut app).await;

        assert_eq!(fake.calls(), vec![Call::Create(NewTask::new("Buy milk"))]);
        assert_eq!(app.controller.tasks().len(), 1);
        assert!(app.editor.input.is_empty());
    }

    #[tokio::test]
    async fn blank_editor_submit_sends_nothing() {
        let fake = FakeApi::with_tasks(vec![]);
        let mut app = app_over(&fake);
        app.editor.input.insert_str("   ");
        app.submit_editor();
        assert_eq!(app.dispatcher.in_flight(), 0);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn save_intent_sends_title_only() {
        let fake = FakeApi::with_tasks(vec![task(1, "A")]);
        let mut app = app_over(&fake);
        app.reload();
        settle(&mut app).await;
        fake.clear_calls();

        app.handle_list_intent(ListIntent::Save {
            id: TaskId(1),
            title: "B".into(),
        });
        settle(&mut app).await;

        assert_eq!(
            fake.calls(),
            vec![Call::Update(TaskId(1), TaskUpdate::title("B"))]
        );
        assert_eq!(app.controller.tasks()[0].title, "B");
    }

    #[tokio::test]
    async fn delete_intent_clamps_cursor() {
        let fake = FakeApi::with_tasks(vec![task(1, "A"), task(2, "B")]);
        let mut app = app_over(&fake);
        app.reload();
        settle(&mut app).await;
        app.list.jump_bottom(2);

        app.handle_list_intent(ListIntent::Delete(TaskId(2)));
        settle(&mut app).await;

        assert_eq!(app.controller.tasks(), &[task(1, "A")]);
        assert_eq!(app.list.cursor, 0);
    }
}
