//! クリップボード
//!
//! OS のクリップボード（arboard）と、使えない環境向けのメモリ実装

use crate::error::{NoteError, Result};

/// クリップボードの抽象化
pub trait Clipboard {
    /// テキストを取得（空なら `None`）
    fn get_text(&mut self) -> Result<Option<String>>;

    /// テキストを設定
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// OS のクリップボード
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(clipboard_error)?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<Option<String>> {
        match self.inner.get_text() {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(clipboard_error(err)),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text.to_string()).map_err(clipboard_error)
    }
}

fn clipboard_error(err: arboard::Error) -> NoteError {
    NoteError::Clipboard(err.to_string())
}

/// プロセス内だけで完結するクリップボード
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<Option<String>> {
        Ok(self.content.clone().filter(|text| !text.is_empty()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.content = Some(text.to_string());
        Ok(())
    }
}

/// 設定に応じたクリップボードを用意する
///
/// OS のクリップボードが使えない場合（ディスプレイの無い環境など）はメモリ実装になる
pub fn default_clipboard(use_system: bool) -> Box<dyn Clipboard> {
    if use_system {
        match SystemClipboard::new() {
            Ok(clipboard) => return Box::new(clipboard),
            Err(err) => log::warn!("system clipboard unavailable, using in-memory clipboard: {}", err),
        }
    }
    Box::new(MemoryClipboard::new())
}
