//! ビューポート管理
//!
//! テキストエリアに表示する範囲（縦横のスクロール位置）を管理する。

/// タブの表示幅
pub const TAB_WIDTH: usize = 4;

/// 文字の表示幅（制御文字は幅なし）
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// 文字列の表示幅
pub fn text_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportManager {
    /// 表示の開始行
    top_line: usize,
    /// 表示の開始桁（表示幅単位）
    left_column: usize,
    /// 表示可能な行数
    height: usize,
    /// 表示可能な桁数
    width: usize,
}

impl ViewportManager {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            height: height.max(1),
            width: width.max(1),
        }
    }

    /// ビューポートの寸法を更新
    pub fn set_dimensions(&mut self, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);
    }

    /// キャレットが画面内に収まるようスクロールする
    ///
    /// `cursor_column` は行頭からの表示幅。戻り値はスクロールが発生したかどうか
    pub fn ensure_visible(&mut self, cursor_line: usize, cursor_column: usize) -> bool {
        let before = (self.top_line, self.left_column);

        if cursor_line < self.top_line {
            self.top_line = cursor_line;
        } else if cursor_line >= self.top_line + self.height {
            // 下へはみ出したらキャレット行を中央に置く
            self.top_line = cursor_line.saturating_sub(self.height / 2);
        }

        if cursor_column < self.left_column {
            self.left_column = cursor_column;
        } else if cursor_column >= self.left_column + self.width {
            self.left_column = cursor_column + 1 - self.width;
        }

        before != (self.top_line, self.left_column)
    }

    /// 先頭へ戻す（ドキュメントの切り替え時）
    pub fn reset(&mut self) {
        self.top_line = 0;
        self.left_column = 0;
    }

    /// 現在の表示開始行を取得
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// 現在の表示開始桁を取得
    pub fn left_column(&self) -> usize {
        self.left_column
    }

    /// 表示領域の高さを取得
    pub fn height(&self) -> usize {
        self.height
    }

    /// 表示領域の幅を取得
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_visible_scrolls_up() {
        let mut viewport = ViewportManager::new(10, 80);
        assert!(!viewport.ensure_visible(5, 0));
        assert_eq!(viewport.top_line(), 0);

        viewport.ensure_visible(30, 0);
        assert!(viewport.ensure_visible(2, 0));
        assert_eq!(viewport.top_line(), 2);
    }

    #[test]
    fn test_ensure_visible_scrolls_down_to_center() {
        let mut viewport = ViewportManager::new(4, 80);
        assert!(viewport.ensure_visible(10, 0));
        assert_eq!(viewport.top_line(), 8);
        assert!(viewport.top_line() + viewport.height() > 10);
    }

    #[test]
    fn test_horizontal_scroll() {
        let mut viewport = ViewportManager::new(5, 10);
        viewport.ensure_visible(0, 15);
        assert_eq!(viewport.left_column(), 6);

        viewport.ensure_visible(0, 3);
        assert_eq!(viewport.left_column(), 3);

        viewport.reset();
        assert_eq!((viewport.top_line(), viewport.left_column()), (0, 0));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width("日本"), 4);
        assert_eq!(text_width("\tx"), TAB_WIDTH + 1);
    }
}
