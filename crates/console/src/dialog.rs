//! Dialog state: the Edit and Delete dialogs and their action buttons.

use std::sync::{Mutex, MutexGuard, PoisonError};

use stockroom_core::{DomainResult, ProductId};
use stockroom_products::SellingPrices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Edit,
    Delete,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Edit => "edit",
            DialogKind::Delete => "delete",
        }
    }
}

impl core::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields of the Edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    PurchasePrice,
    PriceUsd,
    PriceSos,
    PriceEtb,
}

/// Current values of the Edit dialog's form, as text.
///
/// Values are whatever is in the inputs right now; nothing is parsed or
/// checked here, the server decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    /// Hidden field.
    pub product_id: String,
    pub name: String,
    pub purchase_price: String,
    pub price_usd: String,
    pub price_sos: String,
    pub price_etb: String,
}

impl EditForm {
    pub fn populated(
        id: ProductId,
        name: &str,
        purchase_price: f64,
        prices: &SellingPrices,
    ) -> Self {
        Self {
            product_id: id.to_string(),
            name: name.to_string(),
            purchase_price: purchase_price.to_string(),
            price_usd: prices.usd.to_string(),
            price_sos: prices.sos.to_string(),
            price_etb: prices.etb.to_string(),
        }
    }

    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        let slot = match field {
            EditField::Name => &mut self.name,
            EditField::PurchasePrice => &mut self.purchase_price,
            EditField::PriceUsd => &mut self.price_usd,
            EditField::PriceSos => &mut self.price_sos,
            EditField::PriceEtb => &mut self.price_etb,
        };
        *slot = value.into();
    }

    /// Form body in input order, keyed by the server's field names.
    pub fn encoded_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("product_id", self.product_id.as_str()),
            ("name", self.name.as_str()),
            ("purchase_price", self.purchase_price.as_str()),
            ("selling_price_usd", self.price_usd.as_str()),
            ("selling_price_sos", self.price_sos.as_str()),
            ("selling_price_etb", self.price_etb.as_str()),
        ]
    }
}

/// Contents of the Delete dialog: hidden id plus the name label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub product_id: String,
    pub name: String,
}

impl DeleteTarget {
    pub fn new(id: ProductId, name: &str) -> Self {
        Self {
            product_id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Dialog contents that name the product they act on.
pub trait DialogTarget: Clone {
    fn target_id(&self) -> DomainResult<ProductId>;
}

impl DialogTarget for EditForm {
    fn target_id(&self) -> DomainResult<ProductId> {
        self.product_id.parse()
    }
}

impl DialogTarget for DeleteTarget {
    fn target_id(&self) -> DomainResult<ProductId> {
        self.product_id.parse()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

/// A dialog's primary action button.
#[derive(Debug)]
pub struct ActionButton {
    idle_label: String,
    state: Mutex<ButtonState>,
}

impl ActionButton {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            state: Mutex::new(ButtonState {
                label: label.clone(),
                disabled: false,
            }),
            idle_label: label,
        }
    }

    pub fn state(&self) -> ButtonState {
        lock(&self.state).clone()
    }

    /// Disable the button and show `busy_label` until the guard drops.
    ///
    /// Returns `None` if the button is already busy.
    pub fn enter_busy(&self, busy_label: &str) -> Option<BusyGuard<'_>> {
        let mut state = lock(&self.state);
        if state.disabled {
            return None;
        }
        state.disabled = true;
        state.label = busy_label.to_string();
        Some(BusyGuard { button: self })
    }
}

/// Restores the button to its idle label and enabled state on drop.
#[must_use = "the button is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard<'a> {
    button: &'a ActionButton,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(&self.button.state);
        state.label = self.button.idle_label.clone();
        state.disabled = false;
    }
}

/// One dialog instance: its current target (if open) and its action button.
#[derive(Debug)]
pub struct Dialog<T> {
    kind: DialogKind,
    target: Mutex<Option<T>>,
    button: ActionButton,
}

impl<T: DialogTarget> Dialog<T> {
    pub fn new(kind: DialogKind, button_label: &str) -> Self {
        Self {
            kind,
            target: Mutex::new(None),
            button: ActionButton::new(button_label),
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn button(&self) -> &ActionButton {
        &self.button
    }

    /// Replace whatever the dialog held.
    pub fn load(&self, target: T) {
        *lock(&self.target) = Some(target);
    }

    pub fn target(&self) -> Option<T> {
        lock(&self.target).clone()
    }

    pub fn clear(&self) {
        *lock(&self.target) = None;
    }

    /// Mutate the open target. Returns `false` if the dialog is not open.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        match lock(&self.target).as_mut() {
            Some(target) => {
                f(target);
                true
            }
            None => false,
        }
    }
}
