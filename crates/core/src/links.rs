use crate::dom::Dom;
use crate::error::Result;

pub const TEL_PREFIX: &str = "tel:";

/// Anchors whose destination starts with [`TEL_PREFIX`].
pub const TEL_LINK_SELECTOR: &str = "a[href^=\"tel:\"]";

/// Returns the number exactly as written in a `tel:` destination: prefix
/// stripped, surrounding whitespace trimmed, nothing else touched.
///
/// `None` when `href` does not start with the prefix.
#[must_use]
pub fn extract_phone_number(href: &str) -> Option<String> {
    href.strip_prefix(TEL_PREFIX).map(|number| number.trim().to_owned())
}

/// Telephone links currently present in the document.
///
/// # Errors
/// Returns an error if the document rejects the selector.
pub fn find_tel_links<D: Dom>(dom: &D) -> Result<Vec<D::Element>> {
    dom.query_selector_all(TEL_LINK_SELECTOR)
}
