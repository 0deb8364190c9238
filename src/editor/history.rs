//! 編集履歴（アンドゥ／リドゥ）
//!
//! 全文スナップショットを二つのスタックで管理する。
//! 位置ポインタは持たず、undo/redo はスタック先頭同士を交換するだけ。

use std::cell::RefCell;
use std::rc::Rc;

use crate::buffer::{ChangeEvent, ChangeListener};

/// 履歴管理マネージャ
///
/// * `record_edit` はユーザー編集の直前状態を積み、リドゥを破棄する
/// * `undo` / `redo` は空なら何もせず `None` を返す
/// * 容量制限はない
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    undo: Vec<T>,
    redo: Vec<T>,
}

impl<T> Default for HistoryManager<T> {
    fn default() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }
}

impl<T> HistoryManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ユーザー編集を記録（`previous` は編集直前のテキスト）
    pub fn record_edit(&mut self, previous: T) {
        self.undo.push(previous);
        self.redo.clear();
    }

    /// 直前の状態を取り出す
    ///
    /// 取り出せた場合は `current` をリドゥ側へ積む
    pub fn undo(&mut self, current: T) -> Option<T> {
        let restored = self.undo.pop()?;
        self.redo.push(current);
        Some(restored)
    }

    /// 取り消した状態を取り出す
    ///
    /// 取り出せた場合は `current` をアンドゥ側へ積む
    pub fn redo(&mut self, current: T) -> Option<T> {
        let restored = self.redo.pop()?;
        self.undo.push(current);
        Some(restored)
    }

    /// 両方の履歴を破棄
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

/// 履歴記録器
///
/// ドキュメントの変更リスナーとして登録し、ユーザー編集だけを履歴へ積む。
/// undo/redo の再適用中は `with_suspended` で記録を止める。
#[derive(Clone, Default)]
pub struct HistoryRecorder {
    inner: Rc<RefCell<HistoryRecorderState>>,
}

#[derive(Debug, Default)]
struct HistoryRecorderState {
    history: HistoryManager<String>,
    suspended: bool,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録を止めた状態で `f` を実行する
    pub fn with_suspended<R>(&self, f: impl FnOnce() -> R) -> R {
        let was_suspended = std::mem::replace(&mut self.inner.borrow_mut().suspended, true);
        let result = f();
        self.inner.borrow_mut().suspended = was_suspended;
        result
    }

    pub fn is_suspended(&self) -> bool {
        self.inner.borrow().suspended
    }

    pub fn undo(&self, current: String) -> Option<String> {
        self.inner.borrow_mut().history.undo(current)
    }

    pub fn redo(&self, current: String) -> Option<String> {
        self.inner.borrow_mut().history.redo(current)
    }

    pub fn reset(&self) {
        self.inner.borrow_mut().history.reset();
    }

    pub fn can_undo(&self) -> bool {
        self.inner.borrow().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.borrow().history.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.inner.borrow().history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.inner.borrow().history.redo_len()
    }
}

impl ChangeListener for HistoryRecorder {
    fn on_change(&mut self, event: &ChangeEvent) {
        let mut state = self.inner.borrow_mut();
        if state.suspended {
            return;
        }
        match event {
            ChangeEvent::TextChanged { previous } => state.history.record_edit(previous.clone()),
        }
    }
}
