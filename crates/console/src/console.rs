//! The inventory console: renders the product list and drives the Edit and
//! Delete dialogs through their request lifecycle.
//!
//! Everything runs on the host's UI task. A submit suspends only while its
//! request is outstanding; the dialog's button stays busy for exactly that
//! window, and a second submit of the same dialog during it is ignored.

use std::future::Future;
use std::sync::Arc;

use stockroom_core::ProductId;
use stockroom_products::{ProductRecord, ProductUpdate, SellingPrices};

use crate::api::{ApiResponse, CsrfToken, HttpProductApi, ProductApi};
use crate::config::ConsoleConfig;
use crate::dialog::{
    ButtonState, DeleteTarget, Dialog, DialogKind, DialogTarget, EditField, EditForm,
};
use crate::error::{ConsoleError, TransportError};
use crate::host::{
    Alert, CsrfSource, LogAlert, ModalHost, NoticeKind, Notifier, RefreshTrigger, RestockOpener,
    ResultsContainer,
};
use crate::render::render;
use crate::view::{Action, ViewerContext};

/// User-facing text for one kind of submission.
struct Notices {
    busy_label: &'static str,
    succeeded: &'static str,
    failed: &'static str,
    errored: &'static str,
}

const EDIT: Notices = Notices {
    busy_label: "Updating...",
    succeeded: "Product updated successfully",
    failed: "Failed to update product",
    errored: "Error updating product",
};

const DELETE: Notices = Notices {
    busy_label: "Deleting...",
    succeeded: "Product deleted successfully",
    failed: "Failed to delete product",
    errored: "Error deleting product",
};

/// How a submit settled. Errors never escape a submit; this says which path ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server confirmed. Dialog closed, list refresh requested.
    Succeeded { updated: Option<ProductUpdate> },
    /// Server answered with `success: false`. Dialog stays open.
    Rejected { message: String },
    /// No usable answer (network, parse, missing token). Dialog stays open.
    Failed,
    /// Same dialog already has a request in flight; nothing was sent.
    Suppressed,
    /// The dialog is not open.
    NoTarget,
}

pub struct InventoryConsole {
    api: Arc<dyn ProductApi>,
    modals: Arc<dyn ModalHost>,
    results: Arc<dyn ResultsContainer>,
    restock: Arc<dyn RestockOpener>,
    csrf: Arc<dyn CsrfSource>,
    notifier: Option<Arc<dyn Notifier>>,
    refresh: Option<Arc<dyn RefreshTrigger>>,
    alert: Arc<dyn Alert>,
    edit: Dialog<EditForm>,
    delete: Dialog<DeleteTarget>,
}

impl core::fmt::Debug for InventoryConsole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryConsole")
            .field("edit", &self.edit)
            .field("delete", &self.delete)
            .field("notifier", &self.notifier.is_some())
            .field("refresh", &self.refresh.is_some())
            .finish_non_exhaustive()
    }
}

impl InventoryConsole {
    pub fn builder(config: ConsoleConfig) -> ConsoleBuilder {
        ConsoleBuilder::new(config)
    }

    /// Render `products` and replace the whole results container with them.
    pub fn display_products(&self, products: &[ProductRecord], viewer: ViewerContext) {
        let view = render(products, viewer.can_delete());
        tracing::debug!(
            products = products.len(),
            can_delete = viewer.can_delete(),
            "displaying products"
        );
        self.results.replace(&view);
    }

    /// Run the callback bound to a trigger.
    pub fn dispatch(&self, action: &Action) {
        match action {
            Action::Restock { id, name, stock } => self.open_restock(*id, name, *stock),
            Action::Edit {
                id,
                name,
                purchase_price,
                prices,
            } => self.open_edit(*id, name, *purchase_price, prices),
            Action::Delete { id, name } => self.open_delete(*id, name),
        }
    }

    pub fn open_restock(&self, id: ProductId, name: &str, stock: f64) {
        self.restock.open_restock(id, name, stock);
    }

    /// Fill the Edit form with the trigger's values and show it.
    pub fn open_edit(&self, id: ProductId, name: &str, purchase_price: f64, prices: &SellingPrices) {
        self.edit
            .load(EditForm::populated(id, name, purchase_price, prices));
        tracing::debug!(product_id = %id, dialog = %DialogKind::Edit, "dialog opened");
        self.modals.show(DialogKind::Edit);
    }

    /// Fill the Delete dialog's hidden id and name label and show it.
    pub fn open_delete(&self, id: ProductId, name: &str) {
        self.delete.load(DeleteTarget::new(id, name));
        tracing::debug!(product_id = %id, dialog = %DialogKind::Delete, "dialog opened");
        self.modals.show(DialogKind::Delete);
    }

    /// User input into the open Edit form. Returns `false` if it is not open.
    pub fn set_edit_field(&self, field: EditField, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit.update(move |form| form.set(field, value))
    }

    pub fn edit_form(&self) -> Option<EditForm> {
        self.edit.target()
    }

    pub fn delete_target(&self) -> Option<DeleteTarget> {
        self.delete.target()
    }

    pub fn button_state(&self, dialog: DialogKind) -> ButtonState {
        match dialog {
            DialogKind::Edit => self.edit.button().state(),
            DialogKind::Delete => self.delete.button().state(),
        }
    }

    /// The user closed the dialog without submitting.
    pub fn dismiss(&self, dialog: DialogKind) {
        match dialog {
            DialogKind::Edit => self.edit.clear(),
            DialogKind::Delete => self.delete.clear(),
        }
        self.modals.hide(dialog);
    }

    /// Send the Edit form's current values to the update endpoint.
    pub async fn submit_edit(&self) -> SubmitOutcome {
        let api = &self.api;
        self.submit(&self.edit, &EDIT, move |id, form, csrf| async move {
            api.update_product(id, &form, &csrf).await
        })
        .await
    }

    /// Ask the delete endpoint to remove the Delete dialog's product.
    pub async fn submit_delete(&self) -> SubmitOutcome {
        let api = &self.api;
        self.submit(&self.delete, &DELETE, move |id, _target, csrf| async move {
            api.delete_product(id, &csrf).await
        })
        .await
    }

    async fn submit<T, F, Fut>(&self, dialog: &Dialog<T>, notices: &Notices, send: F) -> SubmitOutcome
    where
        T: DialogTarget,
        F: FnOnce(ProductId, T, CsrfToken) -> Fut,
        Fut: Future<Output = Result<ApiResponse, TransportError>>,
    {
        let kind = dialog.kind();

        // Held until this function returns, whichever way it returns.
        let Some(_busy) = dialog.button().enter_busy(notices.busy_label) else {
            tracing::debug!(dialog = %kind, "request already in flight; submit ignored");
            return SubmitOutcome::Suppressed;
        };

        let Some(target) = dialog.target() else {
            tracing::warn!(dialog = %kind, "submit without an open dialog");
            return SubmitOutcome::NoTarget;
        };

        let request = target
            .target_id()
            .map_err(|e| TransportError::InvalidTarget(e.to_string()))
            .and_then(|id| Ok((id, self.csrf_token()?)));

        let result = match request {
            Ok((id, csrf)) => {
                tracing::info!(dialog = %kind, product_id = %id, "submitting");
                send(id, target, csrf).await
            }
            Err(err) => Err(err),
        };

        self.settle(dialog, notices, result)
    }

    fn settle<T: DialogTarget>(
        &self,
        dialog: &Dialog<T>,
        notices: &Notices,
        result: Result<ApiResponse, TransportError>,
    ) -> SubmitOutcome {
        let kind = dialog.kind();
        match result {
            Ok(resp) if resp.success => {
                let message = resp
                    .message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(notices.succeeded);
                self.notify(message, NoticeKind::Success);

                dialog.clear();
                self.modals.hide(kind);
                if let Some(refresh) = &self.refresh {
                    refresh.refresh();
                }

                if let Some(product) = &resp.product {
                    tracing::info!(
                        dialog = %kind,
                        product_id = %product.id,
                        name = %product.name,
                        selling_price_usd = %product.selling_price_usd,
                        "server confirmed"
                    );
                } else {
                    tracing::info!(dialog = %kind, "server confirmed");
                }

                SubmitOutcome::Succeeded {
                    updated: resp.product,
                }
            }
            Ok(resp) => {
                let message = resp
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| notices.failed.to_string());
                tracing::info!(dialog = %kind, error = %message, "server rejected request");
                self.notify(&message, NoticeKind::Error);
                SubmitOutcome::Rejected { message }
            }
            Err(err) => {
                tracing::error!(dialog = %kind, error = %err, "request failed");
                self.notify(notices.errored, NoticeKind::Error);
                SubmitOutcome::Failed
            }
        }
    }

    fn csrf_token(&self) -> Result<CsrfToken, TransportError> {
        self.csrf
            .token()
            .map(CsrfToken::new)
            .ok_or(TransportError::MissingCsrfToken)
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        tracing::debug!(kind = kind.as_str(), toast = self.notifier.is_some(), "notice");
        match &self.notifier {
            Some(notifier) => notifier.notify(message, kind),
            None => self.alert.alert(message),
        }
    }
}

/// Startup registration: collects the host's collaborators into a console.
pub struct ConsoleBuilder {
    config: ConsoleConfig,
    api: Option<Arc<dyn ProductApi>>,
    modals: Option<Arc<dyn ModalHost>>,
    results: Option<Arc<dyn ResultsContainer>>,
    restock: Option<Arc<dyn RestockOpener>>,
    csrf: Option<Arc<dyn CsrfSource>>,
    notifier: Option<Arc<dyn Notifier>>,
    refresh: Option<Arc<dyn RefreshTrigger>>,
    alert: Option<Arc<dyn Alert>>,
}

impl ConsoleBuilder {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            api: None,
            modals: None,
            results: None,
            restock: None,
            csrf: None,
            notifier: None,
            refresh: None,
            alert: None,
        }
    }

    /// Defaults to [`HttpProductApi`] built from the config.
    pub fn api(mut self, api: Arc<dyn ProductApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn modals(mut self, modals: Arc<dyn ModalHost>) -> Self {
        self.modals = Some(modals);
        self
    }

    pub fn results(mut self, results: Arc<dyn ResultsContainer>) -> Self {
        self.results = Some(results);
        self
    }

    pub fn restock(mut self, restock: Arc<dyn RestockOpener>) -> Self {
        self.restock = Some(restock);
        self
    }

    pub fn csrf(mut self, csrf: Arc<dyn CsrfSource>) -> Self {
        self.csrf = Some(csrf);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn refresh(mut self, refresh: Arc<dyn RefreshTrigger>) -> Self {
        self.refresh = Some(refresh);
        self
    }

    /// Defaults to [`LogAlert`].
    pub fn alert(mut self, alert: Arc<dyn Alert>) -> Self {
        self.alert = Some(alert);
        self
    }

    pub fn build(self) -> Result<Arc<InventoryConsole>, ConsoleError> {
        let modals = self
            .modals
            .ok_or(ConsoleError::MissingCollaborator("modals"))?;
        let results = self
            .results
            .ok_or(ConsoleError::MissingCollaborator("results"))?;
        let restock = self
            .restock
            .ok_or(ConsoleError::MissingCollaborator("restock"))?;
        let csrf = self.csrf.ok_or(ConsoleError::MissingCollaborator("csrf"))?;

        let api: Arc<dyn ProductApi> = match self.api {
            Some(api) => api,
            None => Arc::new(HttpProductApi::from_config(&self.config)?),
        };

        tracing::info!(
            api_base_url = %self.config.api_base_url,
            notifier = self.notifier.is_some(),
            refresh = self.refresh.is_some(),
            "inventory console registered"
        );

        Ok(Arc::new(InventoryConsole {
            api,
            modals,
            results,
            restock,
            csrf,
            notifier: self.notifier,
            refresh: self.refresh,
            alert: self.alert.unwrap_or_else(|| Arc::new(LogAlert)),
            edit: Dialog::new(DialogKind::Edit, "Save Changes"),
            delete: Dialog::new(DialogKind::Delete, "Delete Product"),
        }))
    }
}
