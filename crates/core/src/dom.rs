//! Capabilities the component consumes from its host: the document tree, the
//! navigation target, the task queue and the code-generation library.
//!
//! The browser binding lives in `telqr-web`; tests substitute in-memory fakes.

use crate::error::Result;
use futures::future::LocalBoxFuture;
use std::fmt;
use strum_macros::{AsRefStr, Display};
use telqr_domain::config::QrCodeOptions;
use telqr_domain::{CorrectLevel, StyleGroup};

/// DOM events the component subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Click,
    Load,
    Error,
}

/// The event object handed to listeners.
pub trait DomEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

pub type Listener = Box<dyn Fn(&dyn DomEvent)>;

/// A registered listener. Dropping it unsubscribes and frees the callback.
pub trait EventSubscription: 'static {
    /// Keeps the listener registered for the rest of the page's life.
    fn forget(self);
}

/// Document, navigation and scheduling surface of the hosting page.
///
/// Implementations are cheap handles; clones address the same document.
pub trait Dom: Clone + 'static {
    type Element: Clone + PartialEq + fmt::Debug + 'static;
    type Subscription: EventSubscription;

    /// Device/browser identification string, if the runtime reports one.
    fn user_agent(&self) -> Option<String>;

    /// Elements currently in the document matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    fn create_element(&self, tag: &str) -> Result<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<()>;

    fn set_text(&self, element: &Self::Element, text: &str);

    /// Sets one inline style property (CSS name, e.g. `border-radius`).
    fn set_style(&self, element: &Self::Element, property: &str, value: &str) -> Result<()>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;

    fn append_to_body(&self, element: &Self::Element) -> Result<()>;

    fn append_to_head(&self, element: &Self::Element) -> Result<()>;

    /// Detaches `element` (and its subtree) from the document. No-op when detached.
    fn remove(&self, element: &Self::Element);

    /// Subscribes `listener` until the returned subscription is dropped.
    fn add_event_listener(
        &self,
        element: &Self::Element,
        kind: EventKind,
        listener: Listener,
    ) -> Result<Self::Subscription>;

    /// Points the active document at `href`.
    fn navigate(&self, href: &str) -> Result<()>;

    /// Queues `task` on the runtime's single-threaded executor.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// The code-generation library.
pub trait QrRenderer<D: Dom>: 'static {
    /// Whether the library is already present in the page (no script load needed).
    fn is_available(&self) -> bool;

    /// Renders the code for `request` as children of `container`.
    ///
    /// # Errors
    /// Returns an error when the library is missing or rejects the options.
    fn render(&self, dom: &D, container: &D::Element, request: &QrRequest) -> Result<()>;
}

/// Options passed to the code-generation library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    /// Encoded payload, the `tel:` URI of the number.
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub correct_level: CorrectLevel,
    pub color_dark: String,
    pub color_light: String,
}

impl QrRequest {
    #[must_use]
    pub fn for_number(number: &str, options: &QrCodeOptions) -> Self {
        Self {
            text: format!("{}{number}", crate::links::TEL_PREFIX),
            width: options.width,
            height: options.height,
            correct_level: options.correct_level,
            color_dark: options.color_dark.clone(),
            color_light: options.color_light.clone(),
        }
    }
}

/// Assigns every property of `group` as an inline style of `element`.
///
/// # Errors
/// Propagates the first property the document rejects.
pub fn apply_styles<D: Dom>(dom: &D, element: &D::Element, group: &StyleGroup) -> Result<()> {
    for (property, value) in group.iter() {
        dom.set_style(element, property, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_the_tel_uri() {
        let request = QrRequest::for_number("555-0100", &QrCodeOptions::default());
        assert_eq!(request.text, "tel:555-0100");
        assert_eq!((request.width, request.height), (180, 180));
        assert_eq!(request.correct_level, CorrectLevel::M);
    }

    #[test]
    fn event_kinds_use_dom_names() {
        assert_eq!(EventKind::Click.as_ref(), "click");
        assert_eq!(EventKind::Error.to_string(), "error");
    }
}
