//! HTML serialization of the view tree, for hosts that mount markup.
//!
//! Bound actions become `onclick` call expressions against the page's dialog
//! entry points. Names travel as single-quoted script strings, so they are
//! script-escaped first and then attribute-escaped like every other value.

use std::fmt::Write;

use crate::view::{Action, Element, Node, ResultsView};

/// Serialize the whole results container.
pub fn to_html(view: &ResultsView) -> String {
    let mut out = String::new();
    for node in view.to_nodes() {
        write_node(&mut out, &node);
    }
    out
}

/// Backslash-escape `\`, `'` and line terminators so `name` can sit inside a
/// single-quoted script string without ending it early.
pub fn escape_single_quotes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '\\' | '\'' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text or a double-quoted attribute value.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Script call the page runs when the trigger is clicked.
pub fn call_expression(action: &Action) -> String {
    match action {
        Action::Restock { id, name, stock } => format!(
            "openRestockModal({id}, '{}', {stock})",
            escape_single_quotes(name)
        ),
        Action::Edit {
            id,
            name,
            purchase_price,
            prices,
        } => format!(
            "openEditModal({id}, '{}', {purchase_price}, {}, {}, {})",
            escape_single_quotes(name),
            prices.usd,
            prices.sos,
            prices.etb
        ),
        Action::Delete { id, name } => {
            format!("confirmDelete({id}, '{}')", escape_single_quotes(name))
        }
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &Element) {
    let _ = write!(out, "<{}", el.tag);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {name}=\"{}\"", escape_html(value));
    }
    if !el.class.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_html(&el.class));
    }
    if let Some(action) = &el.on_click {
        let _ = write!(out, " onclick=\"{}\"", escape_html(&call_expression(action)));
    }
    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", el.tag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::testing::product;
    use proptest::prelude::*;
    use stockroom_core::ProductId;
    use stockroom_products::SellingPrices;

    /// Read a single-quoted script string starting right after the opening
    /// quote. Returns the decoded value and whatever follows the closing quote.
    /// Raw line terminators end the string with a syntax error, so they
    /// yield `None` like an unterminated string does.
    fn read_quoted(src: &str) -> Option<(String, &str)> {
        let mut value = String::new();
        let mut chars = src.char_indices();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next()?.1 {
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    'u' => {
                        let hex: String = (0..4)
                            .map(|_| chars.next().map(|(_, c)| c))
                            .collect::<Option<_>>()?;
                        let code = u32::from_str_radix(&hex, 16).ok()?;
                        value.push(char::from_u32(code)?);
                    }
                    other => value.push(other),
                },
                '\'' => return Some((value, &src[i + 1..])),
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
                _ => value.push(ch),
            }
        }
        None
    }

    fn unescape_html(value: &str) -> String {
        value
            .replace("&#39;", "'")
            .replace("&quot;", "\"")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    #[test]
    fn escapes_every_quote_in_name() {
        let escaped = escape_single_quotes("O'Brien's Mix");
        assert_eq!(escaped, r"O\'Brien\'s Mix");

        let unescaped_quotes = escaped
            .char_indices()
            .filter(|&(i, c)| c == '\'' && !escaped[..i].ends_with('\\'))
            .count();
        assert_eq!(unescaped_quotes, 0);
    }

    #[test]
    fn line_breaks_in_name_stay_escaped() {
        let action = Action::Delete {
            id: ProductId::new(1),
            name: "O'Brien\nMix\r\u{2028}\u{2029}".to_string(),
        };

        let call = call_expression(&action);
        assert_eq!(call, r"confirmDelete(1, 'O\'Brien\nMix\r\u2028\u2029')");
        assert!(!call.contains(['\n', '\r', '\u{2028}', '\u{2029}']));

        let rest = call.strip_prefix("confirmDelete(1, '").unwrap();
        let (decoded, tail) = read_quoted(rest).unwrap();
        assert_eq!(decoded, "O'Brien\nMix\r\u{2028}\u{2029}");
        assert_eq!(tail, ")");
    }

    #[test]
    fn edit_call_expression_keeps_argument_list_intact() {
        let action = Action::Edit {
            id: ProductId::new(7),
            name: "O'Brien's Mix".to_string(),
            purchase_price: 3.0,
            prices: SellingPrices::new(4.5, 2565.0, 253.0),
        };

        let call = call_expression(&action);
        let rest = call.strip_prefix("openEditModal(7, '").unwrap();
        let (name, tail) = read_quoted(rest).unwrap();
        assert_eq!(name, "O'Brien's Mix");
        assert_eq!(tail, ", 3, 4.5, 2565, 253)");
    }

    #[test]
    fn empty_view_serializes_placeholder() {
        assert_eq!(
            to_html(&ResultsView::Empty),
            r#"<div class="text-muted text-center py-5">No products found</div>"#
        );
    }

    #[test]
    fn card_markup_escapes_text_and_binds_triggers() {
        let html = to_html(&render(&[product(3, "<b>Bolt</b> & Nut")], true));

        assert!(html.contains("&lt;b&gt;Bolt&lt;/b&gt; &amp; Nut"));
        assert!(!html.contains("<b>Bolt"));
        assert!(html.contains(r#"onclick="openRestockModal(3, &#39;"#));
        assert!(html.contains(r#"onclick="openEditModal(3, &#39;"#));
        assert!(html.contains(r#"onclick="confirmDelete(3, &#39;"#));
        assert!(html.contains(r#"<button type="button" class="btn btn-sm btn-outline-danger""#));
    }

    #[test]
    fn markup_omits_delete_without_permission() {
        let html = to_html(&render(&[product(3, "Bolt")], false));
        assert!(!html.contains("confirmDelete"));
        assert!(html.contains("openEditModal"));
    }

    proptest! {
        #[test]
        fn quoted_names_round_trip_through_call_expression(
            name in "(.|[\\n\\r\u{2028}\u{2029}'\\\\]){0,32}"
        ) {
            let action = Action::Delete { id: ProductId::new(1), name: name.clone() };
            let call = call_expression(&action);
            let rest = call.strip_prefix("confirmDelete(1, '").unwrap();
            let (decoded, tail) = read_quoted(rest).unwrap();
            prop_assert_eq!(decoded, name);
            prop_assert_eq!(tail, ")");
        }

        #[test]
        fn onclick_attribute_decodes_to_intact_call(name in "[a-z' \"<>&\\\\\n\r\u{2028}\u{2029}]{0,16}") {
            let html = to_html(&render(&[product(5, &name)], false));
            let start = html.find("onclick=\"openEditModal(").unwrap() + "onclick=\"".len();
            let end = start + html[start..].find('"').unwrap();
            let call = unescape_html(&html[start..end]);

            let rest = call.strip_prefix("openEditModal(5, '").unwrap();
            let (decoded, _) = read_quoted(rest).unwrap();
            prop_assert_eq!(decoded, name);
        }
    }
}
