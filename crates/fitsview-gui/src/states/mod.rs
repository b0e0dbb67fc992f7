mod dialogs;
mod ui;
mod viewport;

pub use dialogs::{NormDialogState, Popup, PopupKind};
pub use ui::UIState;
pub use viewport::ViewportState;
