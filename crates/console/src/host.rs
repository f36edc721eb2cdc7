//! Collaborators the host page provides.
//!
//! Required ones are handed to [`ConsoleBuilder`](crate::ConsoleBuilder) at
//! startup; the optional notifier and refresh trigger are resolved once there
//! and never looked up again.

use stockroom_core::ProductId;

use crate::dialog::DialogKind;
use crate::view::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Modal-dialog primitive: show/hide by dialog instance.
pub trait ModalHost: Send + Sync {
    fn show(&self, dialog: DialogKind);
    fn hide(&self, dialog: DialogKind);
}

/// The element the product list is mounted into.
pub trait ResultsContainer: Send + Sync {
    /// Replace everything in the container.
    fn replace(&self, view: &ResultsView);
}

/// Opens the restock dialog, which lives outside the console.
pub trait RestockOpener: Send + Sync {
    fn open_restock(&self, id: ProductId, name: &str, stock: f64);
}

/// The page's embedded CSRF token field.
pub trait CsrfSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Toast-style notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Reloads the product list after a mutation.
pub trait RefreshTrigger: Send + Sync {
    fn refresh(&self);
}

/// Blocking alert used when no [`Notifier`] is installed.
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Default [`Alert`]: writes the message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlert;

impl Alert for LogAlert {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "blocking alert");
    }
}

/// A fixed token, for hosts that read the field once at load.
#[derive(Debug, Clone)]
pub struct StaticCsrf(pub Option<String>);

impl CsrfSource for StaticCsrf {
    fn token(&self) -> Option<String> {
        self.0.clone().filter(|t| !t.is_empty())
    }
}
