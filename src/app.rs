//! メインアプリケーション構造体
//!
//! エディタ状態・編集履歴・プラットフォーム機能を所有し、
//! コマンドとユーザー編集を処理するコントローラー。
//! UI フレームワークには依存しない。

use crate::buffer::{Document, Movement};
use crate::config::Config;
use crate::editor::stamp::format_stamp;
use crate::editor::{EditorState, HistoryRecorder, StampKind};
use crate::error::{ErrorDisplay, ErrorLevel, FileError, NoteError, Result};
use crate::file::{FileStore, DEFAULT_FILTERS};
use crate::input::commands::{Command, CommandResult, EditAction};
use crate::platform::{Clipboard, Clock, DialogOutcome, FileDialog, FontDialog, SaveChoice, SavePrompt};
use std::path::PathBuf;

/// 未保存確認の文言
pub const UNSAVED_MESSAGE: &str = "現在の内容が保存されていません。保存しますか？";

/// コントローラーへ注入するプラットフォーム機能
pub struct Platform {
    pub files: Box<dyn FileStore>,
    pub file_dialog: Box<dyn FileDialog>,
    pub font_dialog: Box<dyn FontDialog>,
    pub prompt: Box<dyn SavePrompt>,
    pub clipboard: Box<dyn Clipboard>,
    pub clock: Box<dyn Clock>,
}

/// コマンドハンドラ
type Handler = fn(&mut App) -> Result<CommandResult>;

/// コマンドとハンドラの対応表
fn handler_for(command: Command) -> Handler {
    match command {
        Command::About => App::show_about,
        Command::AboutIcon => App::show_about_icon,
        Command::Exit => App::exit,
        Command::New => App::new_file,
        Command::Open => App::open_file,
        Command::Save => App::save_file,
        Command::SaveAs => App::save_file_as,
        Command::Undo => App::undo,
        Command::Redo => App::redo,
        Command::Cut => App::cut,
        Command::Copy => App::copy,
        Command::Paste => App::paste,
        Command::Font => App::choose_font,
        Command::InsertDate => |app: &mut App| app.insert_stamp(StampKind::Date),
        Command::InsertTime => |app: &mut App| app.insert_stamp(StampKind::Time),
    }
}

/// メインアプリケーション構造体
pub struct App {
    /// エディタ状態
    state: EditorState,
    /// 編集履歴（ドキュメントの変更リスナーとしても登録済み）
    history: HistoryRecorder,
    /// プラットフォーム機能
    platform: Platform,
    /// アプリケーション実行状態
    running: bool,
}

impl App {
    /// 新しいアプリケーションインスタンスを作成
    pub fn new(config: &Config, platform: Platform) -> Self {
        let mut state = EditorState::new(config);
        let history = HistoryRecorder::new();
        state.document.add_change_listener(Box::new(history.clone()));

        Self {
            state,
            history,
            platform,
            running: true,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    /// 編集履歴（確認用）
    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// コマンドを実行
    ///
    /// 失敗はエラー通知付きの結果に変換し、状態は変更前のまま残る
    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        log::debug!("dispatch {}", command.id());
        let handler = handler_for(command);
        match handler(self) {
            Ok(result) => {
                if result.should_quit {
                    self.running = false;
                }
                result
            }
            Err(err) => report_error(command.id(), &err),
        }
    }

    /// ユーザーによる直接編集を適用
    pub fn edit(&mut self, action: EditAction) -> CommandResult {
        match action {
            EditAction::InsertChar(ch) => self.insert_user_text(ch.encode_utf8(&mut [0u8; 4])),
            EditAction::InsertText(text) => self.insert_user_text(&normalize_newlines(&text)),
            EditAction::Newline => self.insert_user_text("\n"),
            EditAction::DeleteBackward => changed(self.state.document.delete_backward()),
            EditAction::DeleteForward => changed(self.state.document.delete_forward()),
        }
    }

    /// キャレットを移動
    pub fn move_caret(&mut self, movement: Movement, extend: bool) {
        self.state.document.move_caret(movement, extend);
    }

    /// 全体を選択
    pub fn select_all(&mut self) {
        self.state.document.select_all();
    }

    /// 起動時に指定されたファイルを開く
    ///
    /// 存在しないパスは空のドキュメントとして関連付ける
    pub fn open_path(&mut self, path: PathBuf) -> CommandResult {
        if path.is_dir() {
            let err = NoteError::File(FileError::IsDirectory {
                path: path.display().to_string(),
            });
            return report_error("open-path", &err);
        }
        if !path.exists() {
            self.state.document.load(String::new(), Some(path));
            self.history.reset();
            return CommandResult::success_with_message("新しいファイル");
        }
        match self.load_from(path) {
            Ok(result) => result,
            Err(err) => report_error("open-path", &err),
        }
    }

    fn new_file(&mut self) -> Result<CommandResult> {
        if !self.confirm_unsaved()? {
            return Ok(CommandResult::success_no_refresh());
        }
        self.state.document.clear();
        self.history.reset();
        Ok(CommandResult::success())
    }

    fn open_file(&mut self) -> Result<CommandResult> {
        if !self.confirm_unsaved()? {
            return Ok(CommandResult::success_no_refresh());
        }
        match self.platform.file_dialog.pick_open(&DEFAULT_FILTERS)? {
            DialogOutcome::Selected(path) => self.load_from(path),
            DialogOutcome::Cancelled => Ok(CommandResult::success_no_refresh()),
        }
    }

    fn load_from(&mut self, path: PathBuf) -> Result<CommandResult> {
        let content = self.platform.files.read_to_string(&path)?;
        log::info!("opened {}", path.display());
        self.state.document.load(content, Some(path));
        self.history.reset();
        let name = self.state.document.file_name().unwrap_or_default();
        Ok(CommandResult::success_with_message(format!("{} を開きました", name)))
    }

    fn save_file(&mut self) -> Result<CommandResult> {
        Ok(self.save()?.unwrap_or_else(CommandResult::success_no_refresh))
    }

    fn save_file_as(&mut self) -> Result<CommandResult> {
        Ok(self.save_as()?.unwrap_or_else(CommandResult::success_no_refresh))
    }

    /// 保存（パス未設定なら名前を付けて保存）
    ///
    /// ダイアログがキャンセルされた場合は `None`
    fn save(&mut self) -> Result<Option<CommandResult>> {
        match self.state.document.path().map(|path| path.to_path_buf()) {
            Some(path) => self.write_to(path).map(Some),
            None => self.save_as(),
        }
    }

    fn save_as(&mut self) -> Result<Option<CommandResult>> {
        let suggested = self.state.document.path().map(|path| path.to_path_buf());
        match self
            .platform
            .file_dialog
            .pick_save(&DEFAULT_FILTERS, suggested.as_deref())?
        {
            DialogOutcome::Selected(path) => self.write_to(path).map(Some),
            DialogOutcome::Cancelled => Ok(None),
        }
    }

    /// 書き込みに成功した場合だけパスと保存状態を更新する
    fn write_to(&mut self, path: PathBuf) -> Result<CommandResult> {
        self.platform
            .files
            .write(&path, self.state.document.text())?;
        log::info!("saved {}", path.display());
        self.state.document.set_path(path);
        self.state.document.mark_saved();
        let name = self.state.document.file_name().unwrap_or_default();
        Ok(CommandResult::success_with_message(format!("{} を保存しました", name)))
    }

    fn exit(&mut self) -> Result<CommandResult> {
        if !self.confirm_unsaved()? {
            return Ok(CommandResult::success_no_refresh());
        }
        Ok(CommandResult::quit())
    }

    /// 未保存の変更があれば確認する
    ///
    /// 続行してよければ `true`。「はい」で保存がキャンセルされた場合は中止する
    fn confirm_unsaved(&mut self) -> Result<bool> {
        if !self.state.document.is_modified() {
            return Ok(true);
        }
        match self.platform.prompt.confirm_save(UNSAVED_MESSAGE)? {
            SaveChoice::Yes => Ok(self.save()?.is_some()),
            SaveChoice::No => Ok(true),
            SaveChoice::Cancel => Ok(false),
        }
    }

    fn undo(&mut self) -> Result<CommandResult> {
        let current = self.state.document.text().to_string();
        match self.history.undo(current) {
            Some(restored) => {
                self.replay(restored);
                Ok(CommandResult::success())
            }
            None => Ok(CommandResult::rejected("元に戻す操作はありません")),
        }
    }

    fn redo(&mut self) -> Result<CommandResult> {
        let current = self.state.document.text().to_string();
        match self.history.redo(current) {
            Some(restored) => {
                self.replay(restored);
                Ok(CommandResult::success())
            }
            None => Ok(CommandResult::rejected("やり直す操作はありません")),
        }
    }

    /// 履歴のテキストを書き戻す（この変更は記録しない）
    fn replay(&mut self, text: String) {
        let document = &mut self.state.document;
        self.history.with_suspended(|| document.replace_all(text));
    }

    fn cut(&mut self) -> Result<CommandResult> {
        let Some(text) = self.state.document.selected_text() else {
            return Ok(CommandResult::success_no_refresh());
        };
        self.platform.clipboard.set_text(&text)?;
        self.state.document.delete_selection();
        Ok(CommandResult::success())
    }

    fn copy(&mut self) -> Result<CommandResult> {
        let Some(text) = self.state.document.selected_text() else {
            return Ok(CommandResult::success_no_refresh());
        };
        self.platform.clipboard.set_text(&text)?;
        Ok(CommandResult::success_no_refresh())
    }

    fn paste(&mut self) -> Result<CommandResult> {
        match self.platform.clipboard.get_text()? {
            Some(text) => Ok(self.insert_user_text(&normalize_newlines(&text))),
            None => Ok(CommandResult::success_no_refresh()),
        }
    }

    fn choose_font(&mut self) -> Result<CommandResult> {
        match self.platform.font_dialog.pick_font(&self.state.font)? {
            DialogOutcome::Selected(font) => {
                log::debug!("font changed to {}", font);
                self.state.font = font;
                Ok(CommandResult::success())
            }
            DialogOutcome::Cancelled => Ok(CommandResult::success_no_refresh()),
        }
    }

    fn insert_stamp(&mut self, kind: StampKind) -> Result<CommandResult> {
        let format = match kind {
            StampKind::Date => &self.state.date_format,
            StampKind::Time => &self.state.time_format,
        };
        let stamp = format_stamp(self.platform.clock.now(), format)?;
        Ok(self.insert_user_text(&stamp))
    }

    fn show_about(&mut self) -> Result<CommandResult> {
        Ok(CommandResult::info(
            "Noteについて",
            format!(
                "Note - {}\nシンプルなプレーンテキストエディタ",
                env!("CARGO_PKG_VERSION")
            ),
        ))
    }

    fn show_about_icon(&mut self) -> Result<CommandResult> {
        Ok(CommandResult::info(
            "アイコンについて",
            "Post it icons created by Saepul Nahwan - Flaticon: https://www.flaticon.com/free-icons/post-it",
        ))
    }

    /// ユーザー入力としてテキストを挿入（文字数上限を確認）
    fn insert_user_text(&mut self, text: &str) -> CommandResult {
        if text.is_empty() {
            return CommandResult::success_no_refresh();
        }
        if self.state.would_exceed_limit(text) {
            return CommandResult::rejected(format!(
                "文字数の上限（{}文字）を超えるため入力できません",
                self.state.max_chars
            ));
        }
        changed(self.state.document.insert_str(text))
    }
}

fn changed(modified: bool) -> CommandResult {
    if modified {
        CommandResult::success()
    } else {
        CommandResult::success_no_refresh()
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn report_error(context: &str, err: &NoteError) -> CommandResult {
    let display = ErrorDisplay::new(err);
    match display.level {
        ErrorLevel::Warning => log::warn!("{} failed: {}", context, err),
        ErrorLevel::Error | ErrorLevel::Fatal => log::error!("{} failed: {}", context, err),
    }
    CommandResult::error(display.message)
}
