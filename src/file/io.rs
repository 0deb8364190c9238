//! ファイルI/O操作
//!
//! テキストファイル全体の読み込みと上書き保存

use crate::error::{FileError, NoteError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// UTF-8 の BOM
const UTF8_BOM: &str = "\u{feff}";

/// ファイル保存先の抽象化
///
/// コントローラーへ注入し、テストでは偽物に差し替える
pub trait FileStore {
    /// ファイル全体をテキストとして読み込む
    fn read_to_string(&mut self, path: &Path) -> Result<String>;

    /// テキストでファイル全体を上書きする
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// ディスク上のファイルを扱う実装
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileStore;

impl DiskFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for DiskFileStore {
    fn read_to_string(&mut self, path: &Path) -> Result<String> {
        // ディレクトリではないことを確認
        if path.is_dir() {
            return Err(NoteError::File(FileError::IsDirectory {
                path: path.display().to_string(),
            }));
        }

        let bytes = fs::read(path).map_err(|err| FileError::from_io(&err, path))?;
        let content = String::from_utf8(bytes).map_err(|err| FileError::Encoding {
            message: format!("{}: {}", path.display(), err.utf8_error()),
        })?;

        Ok(match content.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => content,
        })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() || path.file_name().is_none() {
            return Err(NoteError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        // シンボリックリンクはリンク先を書き換える
        let target = resolve_link(path);

        // 一時ファイルに書き込んでから置き換える
        let temp_path = temp_path_for(&target);
        if let Err(err) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(FileError::from_io(&err, path).into());
        }
        // 既存ファイルのパーミッションを引き継ぐ
        if let Ok(metadata) = fs::metadata(&target) {
            if let Err(err) = fs::set_permissions(&temp_path, metadata.permissions()) {
                let _ = fs::remove_file(&temp_path);
                return Err(FileError::from_io(&err, path).into());
            }
        }
        if let Err(err) = fs::rename(&temp_path, &target) {
            let _ = fs::remove_file(&temp_path);
            return Err(FileError::from_io(&err, path).into());
        }

        Ok(())
    }
}

/// シンボリックリンクを実体のパスへ解決する
///
/// リンク先が存在しない場合はリンクの指す場所をそのまま使う
fn resolve_link(path: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return path.to_path_buf();
    }
    fs::canonicalize(path)
        .or_else(|_| {
            fs::read_link(path).map(|link| match path.parent() {
                Some(parent) => parent.join(link),
                None => link,
            })
        })
        .unwrap_or_else(|_| path.to_path_buf())
}

/// 同じディレクトリ内の一時ファイルパス
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.note-tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\nこんにちは！";
        let mut store = DiskFileStore::new();

        store.write(&file_path, content).unwrap();
        assert_eq!(store.read_to_string(&file_path).unwrap(), content);
        assert!(!temp_path_for(&file_path).exists());
    }

    #[test]
    fn test_write_overwrites_whole_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("memo.txt");
        fs::write(&file_path, "a much longer original content").unwrap();

        DiskFileStore::new().write(&file_path, "short").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink_updates_target() {
        let temp_dir = tempdir().unwrap();
        let real_path = temp_dir.path().join("real.txt");
        let link_path = temp_dir.path().join("link.txt");
        fs::write(&real_path, "secret").unwrap();
        std::os::unix::fs::symlink(&real_path, &link_path).unwrap();

        DiskFileStore::new().write(&link_path, "edited").unwrap();

        assert!(fs::symlink_metadata(&link_path)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(fs::read_to_string(&real_path).unwrap(), "edited");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("private.txt");
        fs::write(&file_path, "secret").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o600)).unwrap();

        DiskFileStore::new().write(&file_path, "edited").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "edited");
    }

    #[test]
    fn test_read_strips_bom() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("bom.txt");
        fs::write(&file_path, "\u{feff}memo").unwrap();

        assert_eq!(DiskFileStore::new().read_to_string(&file_path).unwrap(), "memo");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("missing.txt");

        match DiskFileStore::new().read_to_string(&file_path) {
            Err(NoteError::File(FileError::NotFound { path })) => {
                assert!(path.ends_with("missing.txt"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("binary.txt");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            DiskFileStore::new().read_to_string(&file_path),
            Err(NoteError::File(FileError::Encoding { .. }))
        ));
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let mut store = DiskFileStore::new();

        assert!(matches!(
            store.read_to_string(temp_dir.path()),
            Err(NoteError::File(FileError::IsDirectory { .. }))
        ));
        assert!(matches!(
            store.write(temp_dir.path(), "x"),
            Err(NoteError::File(FileError::InvalidPath { .. }))
        ));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("no").join("such").join("dir.txt");

        assert!(DiskFileStore::new().write(&file_path, "x").is_err());
        assert!(!file_path.exists());
    }
}
