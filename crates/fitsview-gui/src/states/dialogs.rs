use fitsview_core::normalize::{NormalizationState, ScaleMode};
use fitsview_core::render::Histogram;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Info,
    Error,
}

/// A blocking message box.
pub struct Popup {
    pub title: String,
    pub message: String,
    pub kind: PopupKind,
}

impl Popup {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: PopupKind::Info,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: PopupKind::Error,
        }
    }
}

/// Fields of the normalization dialog. Text is kept raw until Apply.
pub struct NormDialogState {
    pub open: bool,
    pub mode: ScaleMode,
    pub vmin_text: String,
    pub vmax_text: String,
    /// Distribution of the loaded image, rebuilt on load.
    pub histogram: Option<Histogram>,
}

impl Default for NormDialogState {
    fn default() -> Self {
        Self::from_state(&NormalizationState::default())
    }
}

impl NormDialogState {
    pub fn from_state(state: &NormalizationState) -> Self {
        Self {
            open: false,
            mode: state.mode,
            vmin_text: state.vmin_percentile.to_string(),
            vmax_text: state.vmax_percentile.to_string(),
            histogram: None,
        }
    }

    /// Reset the fields to the committed state, keeping the histogram.
    pub fn sync(&mut self, state: &NormalizationState) {
        self.mode = state.mode;
        self.vmin_text = state.vmin_percentile.to_string();
        self.vmax_text = state.vmax_percentile.to_string();
    }
}
