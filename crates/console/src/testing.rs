//! Recording fakes for the host collaborators.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use stockroom_core::ProductId;
use stockroom_products::{ProductRecord, SellingPrices};
use tokio::sync::Notify;

use crate::api::{ApiResponse, CsrfToken, ProductApi};
use crate::config::ConsoleConfig;
use crate::console::{ConsoleBuilder, InventoryConsole};
use crate::dialog::{DialogKind, EditForm, lock};
use crate::error::TransportError;
use crate::host::{
    Alert, ModalHost, NoticeKind, Notifier, RefreshTrigger, RestockOpener, ResultsContainer,
    StaticCsrf,
};
use crate::view::ResultsView;

pub(crate) const TOKEN: &str = "tok-123";

pub(crate) fn product(id: u64, name: &str) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: "Acme".to_string(),
        category: "Hardware".to_string(),
        current_stock: 10.0,
        low_stock_threshold: 5.0,
        purchase_price: 3.0,
        prices: SellingPrices::new(4.5, 2565.0, 253.0),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    Update {
        id: ProductId,
        form: EditForm,
        csrf: String,
    },
    Delete {
        id: ProductId,
        csrf: String,
    },
}

/// Holds a request open until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
    pub started: Notify,
    pub release: Notify,
}

pub(crate) struct FakeApi {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    calls: Mutex<Vec<ApiCall>>,
    gate: Option<Gate>,
}

impl FakeApi {
    pub fn replying(response: Result<ApiResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([response])),
            calls: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    pub fn gated(response: Result<ApiResponse, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([response])),
            calls: Mutex::new(Vec::new()),
            gate: Some(Gate::default()),
        })
    }

    pub fn gate(&self) -> &Gate {
        self.gate.as_ref().expect("api was not built gated")
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    async fn reply(&self) -> Result<ApiResponse, TransportError> {
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        let next = lock(&self.responses).pop_front();
        next.unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

#[async_trait]
impl ProductApi for FakeApi {
    async fn update_product(
        &self,
        id: ProductId,
        form: &EditForm,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError> {
        lock(&self.calls).push(ApiCall::Update {
            id,
            form: form.clone(),
            csrf: csrf.as_str().to_string(),
        });
        self.reply().await
    }

    async fn delete_product(
        &self,
        id: ProductId,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError> {
        lock(&self.calls).push(ApiCall::Delete {
            id,
            csrf: csrf.as_str().to_string(),
        });
        self.reply().await
    }
}

#[derive(Default)]
pub(crate) struct RecordingModals {
    events: Mutex<Vec<(DialogKind, bool)>>,
}

impl RecordingModals {
    pub fn is_visible(&self, kind: DialogKind) -> bool {
        lock(&self.events)
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .is_some_and(|(_, shown)| *shown)
    }

    pub fn show_count(&self, kind: DialogKind) -> usize {
        lock(&self.events)
            .iter()
            .filter(|(k, shown)| *k == kind && *shown)
            .count()
    }
}

impl ModalHost for RecordingModals {
    fn show(&self, dialog: DialogKind) {
        lock(&self.events).push((dialog, true));
    }

    fn hide(&self, dialog: DialogKind) {
        lock(&self.events).push((dialog, false));
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeKind)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        lock(&self.notices).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        lock(&self.notices).push((message.to_string(), kind));
    }
}

#[derive(Default)]
pub(crate) struct RecordingAlert {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlert {
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct CountingRefresh {
    count: AtomicUsize,
}

impl CountingRefresh {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl RefreshTrigger for CountingRefresh {
    fn refresh(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct RecordingResults {
    mounted: Mutex<Vec<ResultsView>>,
}

impl RecordingResults {
    pub fn mounts(&self) -> usize {
        lock(&self.mounted).len()
    }

    pub fn current(&self) -> Option<ResultsView> {
        lock(&self.mounted).last().cloned()
    }
}

impl ResultsContainer for RecordingResults {
    fn replace(&self, view: &ResultsView) {
        lock(&self.mounted).push(view.clone());
    }
}

#[derive(Default)]
pub(crate) struct RecordingRestock {
    opened: Mutex<Vec<(ProductId, String, f64)>>,
}

impl RecordingRestock {
    pub fn opened(&self) -> Vec<(ProductId, String, f64)> {
        lock(&self.opened).clone()
    }
}

impl RestockOpener for RecordingRestock {
    fn open_restock(&self, id: ProductId, name: &str, stock: f64) {
        lock(&self.opened).push((id, name.to_string(), stock));
    }
}

/// A console wired to recording fakes.
pub(crate) struct Harness {
    pub console: Arc<InventoryConsole>,
    pub api: Arc<FakeApi>,
    pub modals: Arc<RecordingModals>,
    pub notifier: Arc<RecordingNotifier>,
    pub alert: Arc<RecordingAlert>,
    pub refresh: Arc<CountingRefresh>,
    pub results: Arc<RecordingResults>,
    pub restock: Arc<RecordingRestock>,
}

impl Harness {
    /// Notifier and refresh trigger installed.
    pub fn new(api: Arc<FakeApi>) -> Self {
        Self::build(api, Some(TOKEN), true)
    }

    /// Neither notifier nor refresh trigger installed.
    pub fn bare(api: Arc<FakeApi>) -> Self {
        Self::build(api, Some(TOKEN), false)
    }

    pub fn without_csrf(api: Arc<FakeApi>) -> Self {
        Self::build(api, None, true)
    }

    fn build(api: Arc<FakeApi>, token: Option<&str>, optional: bool) -> Self {
        let modals = Arc::new(RecordingModals::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let alert = Arc::new(RecordingAlert::default());
        let refresh = Arc::new(CountingRefresh::default());
        let results = Arc::new(RecordingResults::default());
        let restock = Arc::new(RecordingRestock::default());

        let mut builder = ConsoleBuilder::new(ConsoleConfig::default())
            .api(api.clone())
            .modals(modals.clone())
            .results(results.clone())
            .restock(restock.clone())
            .csrf(Arc::new(StaticCsrf(token.map(str::to_string))))
            .alert(alert.clone());
        if optional {
            builder = builder.notifier(notifier.clone()).refresh(refresh.clone());
        }

        Self {
            console: builder.build().expect("all collaborators provided"),
            api,
            modals,
            notifier,
            alert,
            refresh,
            results,
            restock,
        }
    }
}
