//! カーソル位置管理
//!
//! テキスト内のキャレット位置（文字単位）と行・列の対応を扱う

/// カーソル位置を表現する構造体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// 文字位置（0ベース）
    pub char_pos: usize,
    /// 行番号（0ベース）
    pub line: usize,
    /// 列番号（0ベース、文字単位）
    pub column: usize,
}

impl CursorPosition {
    /// 指定された位置にカーソルを作成
    pub fn at(char_pos: usize, line: usize, column: usize) -> Self {
        Self {
            char_pos,
            line,
            column,
        }
    }

    /// テキスト中の文字位置から行・列を計算
    ///
    /// 範囲外の位置はテキスト末尾に丸める
    pub fn locate(text: &str, char_pos: usize) -> Self {
        let mut line = 0;
        let mut column = 0;
        let mut consumed = 0;

        for ch in text.chars() {
            if consumed == char_pos {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
            consumed += 1;
        }

        Self::at(consumed, line, column)
    }

    /// ステータスバー表示用の行番号（1ベース）
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// ステータスバー表示用の列番号（1ベース）
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

/// キャレット移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_across_lines() {
        let text = "ab\ncde\n";
        assert_eq!(CursorPosition::locate(text, 0), CursorPosition::at(0, 0, 0));
        assert_eq!(CursorPosition::locate(text, 2), CursorPosition::at(2, 0, 2));
        assert_eq!(CursorPosition::locate(text, 3), CursorPosition::at(3, 1, 0));
        assert_eq!(CursorPosition::locate(text, 7), CursorPosition::at(7, 2, 0));
    }

    #[test]
    fn test_locate_clamps_and_counts_chars() {
        let text = "日本語";
        let pos = CursorPosition::locate(text, 99);
        assert_eq!(pos, CursorPosition::at(3, 0, 3));
        assert_eq!(pos.display_line(), 1);
        assert_eq!(pos.display_column(), 4);
    }
}
