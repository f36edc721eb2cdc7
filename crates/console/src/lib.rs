//! `stockroom-console`
//!
//! **Responsibility:** the product-list screen of the stock room client.
//!
//! This crate provides:
//! - Rendering a product list into a typed view tree (and HTML for hosts that
//!   mount markup)
//! - The Edit and Delete dialogs: population, busy buttons, submission
//! - Reconciling server responses with dialog state, notices and list refresh
//!
//! The console is a **thin shell** around the product API: the server stays the
//! authority, nothing is validated or cached client-side.

pub mod api;
pub mod config;
pub mod console;
pub mod dialog;
pub mod error;
pub mod host;
pub mod markup;
pub mod render;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiResponse, CsrfToken, HttpProductApi, ProductApi, CSRF_HEADER};
pub use config::ConsoleConfig;
pub use console::{ConsoleBuilder, InventoryConsole, SubmitOutcome};
pub use dialog::{ActionButton, ButtonState, DeleteTarget, DialogKind, DialogTarget, EditField, EditForm};
pub use error::{ConfigError, ConsoleError, TransportError};
pub use host::{
    Alert, CsrfSource, LogAlert, ModalHost, NoticeKind, Notifier, RefreshTrigger, RestockOpener,
    ResultsContainer, StaticCsrf,
};
pub use render::render;
pub use view::{Action, Element, Node, ProductCard, ResultsView, ViewerContext};
