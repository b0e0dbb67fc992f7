use super::dialogs::{NormDialogState, Popup};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Label of the command the worker is running.
    pub running_task: Option<String>,

    /// Drag on the image draws an ROI instead of panning.
    pub roi_mode: bool,

    pub norm_dialog: NormDialogState,
    pub show_header: bool,
    pub header_text: String,

    /// Modal message queue; the front entry is shown.
    pub popups: Vec<Popup>,

    /// Pixel under the cursor and its value.
    pub cursor_readout: Option<(usize, usize, f64)>,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn is_busy(&self) -> bool {
        self.running_task.is_some()
    }

    pub fn push_popup(&mut self, popup: Popup) {
        self.popups.push(popup);
    }
}
