//! テスト用のプラットフォーム機能の偽物
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use note::config::Config;
use note::editor::FontSpec;
use note::error::{FileError, NoteError, Result};
use note::file::{FileFilter, FileStore};
use note::input::EditAction;
use note::platform::{
    Clipboard, DialogOutcome, FileDialog, FixedClock, FontDialog, SaveChoice, SavePrompt,
};
use note::{App, Platform};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// ダイアログへの応答キューと、呼び出し内容の記録
#[derive(Debug, Default)]
pub struct Script {
    pub open_answers: VecDeque<DialogOutcome<PathBuf>>,
    pub save_answers: VecDeque<DialogOutcome<PathBuf>>,
    pub font_answers: VecDeque<DialogOutcome<FontSpec>>,
    pub prompt_answers: VecDeque<SaveChoice>,
    pub prompts: Vec<String>,
    pub save_suggestions: Vec<Option<PathBuf>>,
    pub filter_patterns: Vec<String>,
}

#[derive(Clone, Default)]
pub struct ScriptedDialogs(pub Rc<RefCell<Script>>);

impl ScriptedDialogs {
    pub fn answer_open(&self, path: impl Into<PathBuf>) {
        self.0
            .borrow_mut()
            .open_answers
            .push_back(DialogOutcome::Selected(path.into()));
    }

    pub fn answer_save(&self, path: impl Into<PathBuf>) {
        self.0
            .borrow_mut()
            .save_answers
            .push_back(DialogOutcome::Selected(path.into()));
    }

    pub fn cancel_save(&self) {
        self.0
            .borrow_mut()
            .save_answers
            .push_back(DialogOutcome::Cancelled);
    }

    pub fn answer_font(&self, font: FontSpec) {
        self.0
            .borrow_mut()
            .font_answers
            .push_back(DialogOutcome::Selected(font));
    }

    pub fn answer_prompt(&self, choice: SaveChoice) {
        self.0.borrow_mut().prompt_answers.push_back(choice);
    }

    pub fn prompt_count(&self) -> usize {
        self.0.borrow().prompts.len()
    }

    pub fn save_dialog_count(&self) -> usize {
        self.0.borrow().save_suggestions.len()
    }
}

impl FileDialog for ScriptedDialogs {
    fn pick_open(&mut self, filters: &[FileFilter]) -> Result<DialogOutcome<PathBuf>> {
        let mut script = self.0.borrow_mut();
        script.filter_patterns = filters.iter().map(|f| f.pattern()).collect();
        Ok(script
            .open_answers
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled))
    }

    fn pick_save(
        &mut self,
        filters: &[FileFilter],
        suggested: Option<&Path>,
    ) -> Result<DialogOutcome<PathBuf>> {
        let mut script = self.0.borrow_mut();
        script.filter_patterns = filters.iter().map(|f| f.pattern()).collect();
        script.save_suggestions.push(suggested.map(Path::to_path_buf));
        Ok(script
            .save_answers
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled))
    }
}

impl FontDialog for ScriptedDialogs {
    fn pick_font(&mut self, _current: &FontSpec) -> Result<DialogOutcome<FontSpec>> {
        Ok(self
            .0
            .borrow_mut()
            .font_answers
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled))
    }
}

impl SavePrompt for ScriptedDialogs {
    fn confirm_save(&mut self, message: &str) -> Result<SaveChoice> {
        let mut script = self.0.borrow_mut();
        script.prompts.push(message.to_string());
        Ok(script
            .prompt_answers
            .pop_front()
            .unwrap_or(SaveChoice::Cancel))
    }
}

#[derive(Debug, Default)]
pub struct FilesState {
    pub files: HashMap<PathBuf, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: usize,
}

/// 失敗を注入できるメモリ上のファイル保存先
#[derive(Clone, Default)]
pub struct MemoryFiles(pub Rc<RefCell<FilesState>>);

impl MemoryFiles {
    pub fn put(&self, path: impl Into<PathBuf>, content: &str) {
        self.0
            .borrow_mut()
            .files
            .insert(path.into(), content.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.0.borrow().files.get(path.as_ref()).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.0.borrow_mut().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl FileStore for MemoryFiles {
    fn read_to_string(&mut self, path: &Path) -> Result<String> {
        let state = self.0.borrow();
        if state.fail_reads {
            return Err(NoteError::File(FileError::PermissionDenied {
                path: path.display().to_string(),
            }));
        }
        state.files.get(path).cloned().ok_or_else(|| {
            NoteError::File(FileError::NotFound {
                path: path.display().to_string(),
            })
        })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(NoteError::File(FileError::PermissionDenied {
                path: path.display().to_string(),
            }));
        }
        state.writes += 1;
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// テストから中身を確認できるクリップボード
#[derive(Clone, Default)]
pub struct SharedClipboard(pub Rc<RefCell<Option<String>>>);

impl SharedClipboard {
    pub fn contents(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    pub fn set(&self, text: &str) {
        *self.0.borrow_mut() = Some(text.to_string());
    }
}

impl Clipboard for SharedClipboard {
    fn get_text(&mut self) -> Result<Option<String>> {
        Ok(self.0.borrow().clone().filter(|text| !text.is_empty()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        *self.0.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

pub fn fixed_moment() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|date| date.and_hms_opt(9, 7, 3))
        .unwrap()
}

pub struct Harness {
    pub app: App,
    pub dialogs: ScriptedDialogs,
    pub files: MemoryFiles,
    pub clipboard: SharedClipboard,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let dialogs = ScriptedDialogs::default();
        let files = MemoryFiles::default();
        let clipboard = SharedClipboard::default();

        let platform = Platform {
            files: Box::new(files.clone()),
            file_dialog: Box::new(dialogs.clone()),
            font_dialog: Box::new(dialogs.clone()),
            prompt: Box::new(dialogs.clone()),
            clipboard: Box::new(clipboard.clone()),
            clock: Box::new(FixedClock(fixed_moment())),
        };

        Self {
            app: App::new(&config, platform),
            dialogs,
            files,
            clipboard,
        }
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let action = if ch == '\n' {
                EditAction::Newline
            } else {
                EditAction::InsertChar(ch)
            };
            self.app.edit(action);
        }
    }

    pub fn text(&self) -> &str {
        self.app.document().text()
    }
}
