//! Blocking prompt capability injected into the store boundary.

use log::warn;

/// Confirmation and alert dialogs owned by the host surface.
pub trait Prompter {
    /// Asks a yes/no question; `true` means proceed.
    fn confirm(&self, message: &str) -> bool;
    /// Shows a blocking error the user must acknowledge.
    fn alert(&self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &P {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Prompter that accepts every confirmation and drops alerts into the log.
///
/// Used by non-interactive callers that already obtained consent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn alert(&self, message: &str) {
        warn!(
            "event=alert module=interaction status=unattended chars={}",
            message.chars().count()
        );
    }
}
