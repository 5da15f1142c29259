//! Alert notifier

use booking::page::Notifier;
use tracing::warn;

/// Shows confirmations with `window.alert`.
#[derive(Debug)]
pub(crate) struct AlertNotifier {
    window: web_sys::Window,
}

impl AlertNotifier {
    pub(crate) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        if let Err(error) = self.window.alert_with_message(message) {
            warn!(?error, "failed to show booking confirmation");
        }
    }
}
