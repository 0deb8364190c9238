//! パス処理ユーティリティ
//!
//! ダイアログに入力されたパスの展開、正規化、絶対パス化

use crate::error::{NoteError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// パスを正規化（. や .. を解決）
pub fn normalize_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                _ => {
                    return Err(NoteError::Path(
                        "パスが不正です: ルートを超えた親ディレクトリ参照".to_string(),
                    ));
                }
            },
            _ => components.push(component),
        }
    }

    Ok(components.iter().collect())
}

/// 相対パスを絶対パスに変換
pub fn to_absolute<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = env::current_dir().map_err(|e| {
            NoteError::Path(format!("現在のディレクトリが取得できません: {}", e))
        })?;
        Ok(current_dir.join(path))
    }
}

/// ダイアログ入力を実際のパスへ展開
///
/// `~` と環境変数を展開し、絶対パス化してから正規化する
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NoteError::Path("パスが入力されていません".to_string()));
    }

    let expanded = shellexpand::full(trimmed)
        .map_err(|e| NoteError::Path(format!("環境変数展開エラー: {}", e)))?;

    normalize_path(to_absolute(PathBuf::from(expanded.as_ref()))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let normalized = normalize_path("./a/../b/./c").unwrap();
        assert_eq!(normalized, PathBuf::from("b/c"));
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert!(normalize_path("../outside").is_err());
        assert!(normalize_path("/..").is_err());
    }

    #[test]
    fn test_expand_path_is_absolute() {
        let expanded = expand_path("notes/./memo.txt").unwrap();
        assert!(expanded.is_absolute());
        assert!(expanded.ends_with("notes/memo.txt"));
    }

    #[test]
    fn test_expand_path_env_var() {
        env::set_var("NOTE_TEST_DIR", "/var/notes");
        let expanded = expand_path("$NOTE_TEST_DIR/today.txt").unwrap();
        assert_eq!(expanded, PathBuf::from("/var/notes/today.txt"));
    }

    #[test]
    fn test_expand_path_rejects_blank() {
        assert!(expand_path("   ").is_err());
    }
}
