//! Typed view tree produced by the renderer.
//!
//! Triggers carry their dialog arguments as an [`Action`] value instead of an
//! interpolated script string, so product text never has to survive a round
//! trip through quoting.

use stockroom_core::ProductId;
use stockroom_products::SellingPrices;

/// What the current viewer may do. Resolved once per render pass by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerContext {
    pub is_superuser: bool,
}

impl ViewerContext {
    pub fn superuser() -> Self {
        Self { is_superuser: true }
    }

    pub fn staff() -> Self {
        Self { is_superuser: false }
    }

    /// Delete is reserved for superusers.
    pub fn can_delete(&self) -> bool {
        self.is_superuser
    }
}

/// Callback bound to a trigger. Carries everything its dialog needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Restock {
        id: ProductId,
        name: String,
        stock: f64,
    },
    Edit {
        id: ProductId,
        name: String,
        purchase_price: f64,
        prices: SellingPrices,
    },
    Delete {
        id: ProductId,
        name: String,
    },
}

impl Action {
    pub fn product_id(&self) -> ProductId {
        match self {
            Action::Restock { id, .. } | Action::Edit { id, .. } | Action::Delete { id, .. } => *id,
        }
    }

    pub fn product_name(&self) -> &str {
        match self {
            Action::Restock { name, .. }
            | Action::Edit { name, .. }
            | Action::Delete { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Depth-first walk over every element in the subtree, this one included.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(self, &mut out);
        out
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}

fn collect_elements<'a>(node: &'a Node, out: &mut Vec<&'a Element>) {
    if let Node::Element(el) = node {
        out.push(el);
        for child in &el.children {
            collect_elements(child, out);
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub class: String,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub on_click: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
            on_click: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::text(value))
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    fn text_content_starts_with(&self, prefix: &str) -> bool {
        self.children
            .iter()
            .map(Node::text_content)
            .collect::<String>()
            .trim_start()
            .starts_with(prefix)
    }
}

/// One product's card in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub low_stock: bool,
    pub root: Node,
}

impl ProductCard {
    /// Bound trigger actions, in on-screen order.
    pub fn actions(&self) -> Vec<&Action> {
        self.root
            .elements()
            .into_iter()
            .filter_map(|el| el.on_click.as_ref())
            .collect()
    }

    pub fn stock_badge(&self) -> Option<&Element> {
        self.root
            .elements()
            .into_iter()
            .find(|el| el.has_class("badge") && el.text_content_starts_with("Stock:"))
    }

    pub fn has_low_stock_tag(&self) -> bool {
        self.root
            .elements()
            .into_iter()
            .any(|el| el.has_class("bg-warning"))
    }
}

/// Whatever currently fills the results container.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// No products: placeholder only, no triggers.
    Empty,
    Cards(Vec<ProductCard>),
}

impl ResultsView {
    pub const PLACEHOLDER: &'static str = "No products found";

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            ResultsView::Empty => &[],
            ResultsView::Cards(cards) => cards,
        }
    }

    pub fn actions(&self) -> Vec<&Action> {
        self.cards().iter().flat_map(ProductCard::actions).collect()
    }

    pub fn count_actions(&self, pred: impl Fn(&Action) -> bool) -> usize {
        self.actions().into_iter().filter(|a| pred(a)).count()
    }

    /// Root nodes to mount in the container.
    pub fn to_nodes(&self) -> Vec<Node> {
        match self {
            ResultsView::Empty => vec![
                Element::new("div")
                    .class("text-muted text-center py-5")
                    .text(Self::PLACEHOLDER)
                    .into(),
            ],
            ResultsView::Cards(cards) => cards.iter().map(|c| c.root.clone()).collect(),
        }
    }
}
