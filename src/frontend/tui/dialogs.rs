//! 端末上のモーダルダイアログ
//!
//! メイン画面を背景に残したままポップアップを描画し、
//! 閉じるまでキー入力を受け取る入れ子のイベントループを回す。

use crate::editor::FontSpec;
use crate::error::{NoteError, Result, UiError};
use crate::file::FileFilter;
use crate::platform::{DialogOutcome, FileDialog, FontDialog, SaveChoice, SavePrompt};
use crate::ui::{
    FileDialogMode, FileDialogState, FontDialogState, ModalDialog, ModalStep, RenderView,
    Renderer, SavePromptState,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, buffer::Buffer, Terminal};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// イベント待ちの間隔
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// 端末と直前のメイン画面
pub struct TuiSurface<B: Backend> {
    terminal: Terminal<B>,
    /// ダイアログの背景に使う最後のメイン画面
    backdrop: Option<Buffer>,
}

/// メインループとダイアログで共有する端末
pub type SharedSurface<B> = Rc<RefCell<TuiSurface<B>>>;

impl<B: Backend> TuiSurface<B> {
    pub fn new(backend: B) -> Result<Self> {
        let terminal =
            Terminal::new(backend).map_err(|err| terminal_init_error("terminal init", err))?;
        Ok(Self {
            terminal,
            backdrop: None,
        })
    }

    pub fn shared(self) -> SharedSurface<B> {
        Rc::new(RefCell::new(self))
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// メイン画面を描画し、背景として保存する
    pub fn draw_main(&mut self, renderer: &mut Renderer, view: &RenderView<'_>) -> Result<()> {
        let completed = self
            .terminal
            .draw(|frame| renderer.render(frame, view))
            .map_err(|err| terminal_error("render", err))?;
        self.backdrop = Some(completed.buffer.clone());
        Ok(())
    }

    /// 保存済みの背景にダイアログを重ねて描画する
    pub fn draw_modal<D: ModalDialog>(&mut self, dialog: &D) -> Result<()> {
        let backdrop = self.backdrop.as_ref();
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                if let Some(backdrop) = backdrop.filter(|buffer| buffer.area == area) {
                    frame.buffer_mut().merge(backdrop);
                }
                dialog.render(frame, area);
            })
            .map_err(|err| terminal_error("render dialog", err))?;
        Ok(())
    }
}

/// ダイアログが閉じるまでキー入力を処理する
pub fn run_modal<B: Backend, D: ModalDialog>(
    surface: &SharedSurface<B>,
    mut dialog: D,
) -> Result<D::Output> {
    loop {
        surface.borrow_mut().draw_modal(&dialog)?;

        if !event::poll(POLL_INTERVAL).map_err(|err| terminal_error("event poll", err))? {
            continue;
        }
        if let Event::Key(key) = event::read().map_err(|err| terminal_error("event read", err))? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if let ModalStep::Finish(output) = dialog.handle_key(key) {
                return Ok(output);
            }
        }
    }
}

/// 端末ダイアログによるプラットフォーム機能
pub struct TuiDialogs<B: Backend> {
    surface: SharedSurface<B>,
}

impl<B: Backend> Clone for TuiDialogs<B> {
    fn clone(&self) -> Self {
        Self {
            surface: Rc::clone(&self.surface),
        }
    }
}

impl<B: Backend> TuiDialogs<B> {
    pub fn new(surface: SharedSurface<B>) -> Self {
        Self { surface }
    }
}

impl<B: Backend> FileDialog for TuiDialogs<B> {
    fn pick_open(&mut self, filters: &[FileFilter]) -> Result<DialogOutcome<PathBuf>> {
        run_modal(
            &self.surface,
            FileDialogState::new(FileDialogMode::Open, filters, None),
        )
    }

    fn pick_save(
        &mut self,
        filters: &[FileFilter],
        suggested: Option<&Path>,
    ) -> Result<DialogOutcome<PathBuf>> {
        run_modal(
            &self.surface,
            FileDialogState::new(FileDialogMode::Save, filters, suggested),
        )
    }
}

impl<B: Backend> FontDialog for TuiDialogs<B> {
    fn pick_font(&mut self, current: &FontSpec) -> Result<DialogOutcome<FontSpec>> {
        run_modal(&self.surface, FontDialogState::new(current))
    }
}

impl<B: Backend> SavePrompt for TuiDialogs<B> {
    fn confirm_save(&mut self, message: &str) -> Result<SaveChoice> {
        run_modal(&self.surface, SavePromptState::new(message))
    }
}

pub(crate) fn terminal_init_error(context: &str, err: impl std::fmt::Display) -> NoteError {
    NoteError::Ui(UiError::TerminalInit {
        message: format!("{}: {}", context, err),
    })
}

pub(crate) fn terminal_error(context: &str, err: impl std::fmt::Display) -> NoteError {
    NoteError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
