use crate::controller::Presenter;
use crate::notification::Notification;
use crate::session::Progress;

/// In-memory text area plus whatever the controller last reported to it.
/// The TUI renders straight from this.
#[derive(Debug, Clone)]
pub struct Surface {
    text: String,
    input_enabled: bool,
    progress: Progress,
    dialog: Option<Notification>,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            input_enabled: true,
            // replaced by the controller's first report as soon as it takes ownership
            progress: Progress {
                elapsed_secs: 0,
                duration_secs: 0,
            },
            dialog: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn dialog(&self) -> Option<&Notification> {
        self.dialog.as_ref()
    }

    /// Returns false when the text area is disabled
    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.text.pop();
        true
    }

    pub fn dismiss_dialog(&mut self) -> Option<Notification> {
        self.dialog.take()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for Surface {
    fn show_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn clear_text(&mut self) {
        self.text.clear();
    }

    fn notify(&mut self, notification: Notification) {
        self.dialog = Some(notification);
    }
}
