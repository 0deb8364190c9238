mod dialogs;

pub use dialogs::{run_modal, SharedSurface, TuiDialogs, TuiSurface};

use crate::app::{App, Platform};
use crate::config::Config;
use crate::error::Result;
use crate::file::DiskFileStore;
use crate::input::{Action, Command, CommandResult, EditAction, KeyMap, Notice};
use crate::platform::{default_clipboard, SystemClock};
use crate::ui::{MenuBar, MenuEvent, MessageBox, RenderView, Renderer};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use dialogs::{terminal_error, terminal_init_error, POLL_INTERVAL};
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// ステータスメッセージの表示時間
const MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// 端末を準備してエディタを起動する
pub fn run(config: &Config, initial_file: Option<PathBuf>) -> Result<()> {
    enter_terminal()?;
    let session_result = run_session(config, initial_file);
    let cleanup_result = leave_terminal();
    session_result.and(cleanup_result)
}

fn run_session(config: &Config, initial_file: Option<PathBuf>) -> Result<()> {
    let surface = TuiSurface::new(CrosstermBackend::new(stdout()))?.shared();
    let dialogs = TuiDialogs::new(surface.clone());

    let platform = Platform {
        files: Box::new(DiskFileStore::new()),
        file_dialog: Box::new(dialogs.clone()),
        font_dialog: Box::new(dialogs.clone()),
        prompt: Box::new(dialogs),
        clipboard: default_clipboard(config.system_clipboard),
        clock: Box::new(SystemClock),
    };

    let mut app = App::new(config, platform);
    let startup = initial_file.map(|path| app.open_path(path));

    let mut tui = TuiApplication::new(app, surface);
    if let Some(result) = startup {
        tui.apply(result)?;
    }
    tui.run()
}

/// 一時表示中のメッセージ
struct StatusMessage {
    text: String,
    shown_at: Instant,
}

pub struct TuiApplication<B: Backend> {
    app: App,
    surface: SharedSurface<B>,
    renderer: Renderer,
    keymap: KeyMap,
    menu: MenuBar,
    message: Option<StatusMessage>,
}

impl<B: Backend> TuiApplication<B> {
    pub fn new(app: App, surface: SharedSurface<B>) -> Self {
        Self {
            app,
            surface,
            renderer: Renderer::new(),
            keymap: KeyMap::new(),
            menu: MenuBar::new(),
            message: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        while self.app.is_running() {
            self.expire_message();
            self.render()?;

            if event::poll(POLL_INTERVAL).map_err(|err| terminal_error("event poll", err))? {
                let event = event::read().map_err(|err| terminal_error("event read", err))?;
                self.handle_event(event)?;
            }
        }

        log::info!("editor closed");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let view = RenderView {
            state: self.app.state(),
            menu: &self.menu,
            message: self.message.as_ref().map(|message| message.text.as_str()),
        };
        self.surface.borrow_mut().draw_main(&mut self.renderer, &view)
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                let result = self.app.edit(EditAction::InsertText(text));
                self.apply(result)
            }
            Event::Resize(_, _) | Event::Mouse(_) | Event::FocusGained | Event::FocusLost => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        if self.menu.is_open() {
            return match self.menu.handle_key(key) {
                MenuEvent::Selected(command) => self.run_command(command),
                MenuEvent::None | MenuEvent::Closed => Ok(()),
            };
        }

        match self.keymap.resolve(&key) {
            Action::Command(command) => self.run_command(command),
            Action::Edit(action) => {
                let result = self.app.edit(action);
                self.apply(result)
            }
            Action::Move { movement, extend } => {
                self.app.move_caret(movement, extend);
                Ok(())
            }
            Action::SelectAll => {
                self.app.select_all();
                Ok(())
            }
            Action::OpenMenu(Some(access_key)) => {
                self.menu.open_by_key(access_key);
                Ok(())
            }
            Action::OpenMenu(None) => {
                self.menu.open(0);
                Ok(())
            }
            Action::Ignore => Ok(()),
        }
    }

    fn run_command(&mut self, command: Command) -> Result<()> {
        let result = self.app.dispatch(command);
        if matches!(command, Command::New | Command::Open) && result.needs_refresh {
            self.renderer.reset_viewport();
        }
        self.apply(result)
    }

    /// コマンド結果の通知を表示する
    fn apply(&mut self, result: CommandResult) -> Result<()> {
        match result.notice {
            Some(Notice::Status(text)) => {
                self.message = Some(StatusMessage {
                    text,
                    shown_at: Instant::now(),
                });
            }
            Some(Notice::Info { title, body }) => {
                self.render()?;
                run_modal(&self.surface, MessageBox::info(title, body))?;
            }
            Some(Notice::Error(body)) => {
                self.render()?;
                run_modal(&self.surface, MessageBox::error(body))?;
            }
            None => {}
        }
        Ok(())
    }

    fn expire_message(&mut self) {
        if let Some(message) = &self.message {
            if message.shown_at.elapsed() >= MESSAGE_DURATION {
                self.message = None;
            }
        }
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_init_error("enable raw mode", err))?;
    let mut out = stdout();
    if let Err(err) = execute!(out, EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(terminal_init_error("enter alternate screen", err));
    }
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}
