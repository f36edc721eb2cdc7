//! Product list renderer.

use stockroom_products::ProductRecord;

use crate::view::{Action, Element, Node, ProductCard, ResultsView};

/// Build the results view for `products`, preserving input order.
///
/// Pure: the console mounts the result, this function touches nothing.
pub fn render(products: &[ProductRecord], can_delete: bool) -> ResultsView {
    if products.is_empty() {
        return ResultsView::Empty;
    }

    ResultsView::Cards(
        products
            .iter()
            .map(|product| render_card(product, can_delete))
            .collect(),
    )
}

fn render_card(product: &ProductRecord, can_delete: bool) -> ProductCard {
    let low_stock = product.is_low_stock();

    let stock_badge = Element::new("span")
        .class(if low_stock {
            "badge bg-danger"
        } else {
            "badge bg-success"
        })
        .text(format!("Stock: {}", product.current_stock));

    let mut badges = Element::new("div").class("mt-1").child(stock_badge);
    if low_stock {
        badges = badges.child(
            Element::new("span")
                .class("badge bg-warning ms-1")
                .text("Low Stock"),
        );
    }

    let details = Element::new("div")
        .class("flex-grow-1")
        .child(Element::new("div").class("fw-bold").text(product.name.clone()))
        .child(
            Element::new("div")
                .class("text-muted small")
                .text(format!("{} \u{2022} {}", product.brand, product.category)),
        )
        .child(badges)
        .child(
            Element::new("div")
                .class("text-muted small mt-1")
                .text(product.prices.summary()),
        );

    let mut actions = Element::new("div")
        .class("d-flex flex-column gap-1")
        .child(trigger(
            "btn btn-sm btn-primary",
            "fas fa-plus",
            "Restock",
            Action::Restock {
                id: product.id,
                name: product.name.clone(),
                stock: product.current_stock,
            },
        ))
        .child(trigger(
            "btn btn-sm btn-outline-secondary",
            "fas fa-edit",
            "Edit",
            Action::Edit {
                id: product.id,
                name: product.name.clone(),
                purchase_price: product.purchase_price,
                prices: product.prices,
            },
        ));
    if can_delete {
        actions = actions.child(trigger(
            "btn btn-sm btn-outline-danger",
            "fas fa-trash",
            "Delete",
            Action::Delete {
                id: product.id,
                name: product.name.clone(),
            },
        ));
    }

    let root = Element::new("div").class("card mb-2").child(
        Element::new("div").class("card-body p-3").child(
            Element::new("div")
                .class("d-flex justify-content-between align-items-start")
                .child(details)
                .child(actions),
        ),
    );

    ProductCard {
        product_id: product.id,
        low_stock,
        root: Node::Element(root),
    }
}

fn trigger(class: &str, icon: &str, label: &str, action: Action) -> Element {
    Element::new("button")
        .attr("type", "button")
        .class(class)
        .child(Element::new("i").class(icon))
        .text(format!(" {label}"))
        .on_click(action)
}
