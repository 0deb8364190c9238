//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod dialog;
pub mod menu;
pub mod renderer;
pub mod status;
pub mod viewport;

// 公開API
pub use dialog::{
    FileDialogMode, FileDialogState, FontDialogState, LineInput, MessageBox, ModalDialog,
    ModalStep, SavePromptState,
};
pub use menu::{default_menus, Menu, MenuBar, MenuEvent, MenuItem};
pub use renderer::{screen_layout, RenderView, Renderer};
pub use status::{char_count_label, StatusInfo, UNTITLED_LABEL};
pub use viewport::ViewportManager;
