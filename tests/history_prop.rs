//! 元に戻す／やり直しのプロパティテスト
//!
//! ランダムな入力・Undo・Redo をコントローラーに与え、
//! 二つのスタックだけで表した期待値と比較する

mod common;

use common::Harness;
use note::buffer::Movement;
use note::input::{Command, EditAction};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

#[derive(Debug, Clone)]
enum Operation {
    Type(char),
    Backspace,
    Undo,
    Redo,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => proptest::char::range('a', 'z').prop_map(Operation::Type),
        1 => Just(Operation::Backspace),
        2 => Just(Operation::Undo),
        2 => Just(Operation::Redo),
    ]
}

/// 期待される履歴（Undo スタックと Redo スタック）
#[derive(Default)]
struct Model {
    text: String,
    undo: Vec<String>,
    redo: Vec<String>,
}

impl Model {
    fn edit(&mut self, next: String) {
        if next != self.text {
            self.undo.push(std::mem::replace(&mut self.text, next));
            self.redo.clear();
        }
    }

    fn undo(&mut self) {
        if let Some(previous) = self.undo.pop() {
            self.redo.push(std::mem::replace(&mut self.text, previous));
        }
    }

    fn redo(&mut self) {
        if let Some(next) = self.redo.pop() {
            self.undo.push(std::mem::replace(&mut self.text, next));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn history_matches_two_stack_model(ops in proptest::collection::vec(operation_strategy(), 0..40)) {
        let mut h = Harness::new();
        let mut model = Model::default();

        for op in ops {
            h.app.move_caret(Movement::DocumentEnd, false);
            match op {
                Operation::Type(ch) => {
                    h.app.edit(EditAction::InsertChar(ch));
                    let mut next = model.text.clone();
                    next.push(ch);
                    model.edit(next);
                }
                Operation::Backspace => {
                    h.app.edit(EditAction::DeleteBackward);
                    let mut next = model.text.clone();
                    next.pop();
                    model.edit(next);
                }
                Operation::Undo => {
                    h.app.dispatch(Command::Undo);
                    model.undo();
                }
                Operation::Redo => {
                    h.app.dispatch(Command::Redo);
                    model.redo();
                }
            }

            prop_assert_eq!(h.text(), model.text.as_str());
            prop_assert_eq!(h.app.history().undo_len(), model.undo.len());
            prop_assert_eq!(h.app.history().redo_len(), model.redo.len());
        }
    }

    #[test]
    fn undo_all_then_redo_all_round_trips(text in "[a-z ]{0,24}") {
        let mut h = Harness::new();
        h.type_text(&text);
        let edits = h.app.history().undo_len();

        for _ in 0..edits {
            h.app.dispatch(Command::Undo);
        }
        prop_assert_eq!(h.text(), "");
        prop_assert!(!h.app.history().can_undo());

        for _ in 0..edits {
            h.app.dispatch(Command::Redo);
        }
        prop_assert_eq!(h.text(), text.as_str());
        prop_assert!(!h.app.history().can_redo());
    }
}
