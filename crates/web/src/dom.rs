use futures::future::LocalBoxFuture;
use js_sys::Reflect;
use telqr::{Dom, DomEvent, EventKind, EventSubscription, Listener, Result, TelQrError};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Window};

/// [`Dom`] over the page's `window` and `document`.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Binds to the global `window`.
    ///
    /// # Errors
    /// Returns a DOM error outside a browsing context (workers, Node).
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| TelQrError::dom("no global window"))?;
        let document =
            window.document().ok_or_else(|| TelQrError::dom("window has no document"))?;
        Ok(Self { window, document })
    }

    fn navigator_property(&self, name: &str) -> Option<String> {
        Reflect::get(&self.window.navigator(), &JsValue::from_str(name)).ok()?.as_string()
    }
}

/// Browser event handed to core listeners.
struct WebEvent(Event);

impl DomEvent for WebEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// Listener registered on an element. Dropping it removes the listener and
/// releases the JS closure.
#[derive(Debug)]
pub struct WebSubscription {
    target: Element,
    kind: EventKind,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl EventSubscription for WebSubscription {
    fn forget(mut self) {
        if let Some(callback) = self.callback.take() {
            callback.forget();
        }
    }
}

impl Drop for WebSubscription {
    fn drop(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let removed = self.target.remove_event_listener_with_callback(self.kind.as_ref(), function);
        if let Err(err) = removed {
            warn!(err = %describe(&err), kind = %self.kind, "Removing event listener failed");
        }
    }
}

/// Maps a thrown JS value to a DOM error tagged with what was being attempted.
pub(crate) fn js_error(context: &'static str) -> impl FnOnce(JsValue) -> TelQrError {
    move |value| TelQrError::Dom {
        message: describe(&value).into(),
        context: Some(context.into()),
    }
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

impl Dom for WebDom {
    type Element = Element;
    type Subscription = WebSubscription;

    fn user_agent(&self) -> Option<String> {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        self.window
            .navigator()
            .user_agent()
            .ok()
            .and_then(non_empty)
            .or_else(|| self.navigator_property("vendor").and_then(non_empty))
            .or_else(|| {
                Reflect::get(&self.window, &JsValue::from_str("opera"))
                    .ok()
                    .and_then(|value| value.as_string())
                    .and_then(non_empty)
            })
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let nodes =
            self.document.query_selector_all(selector).map_err(js_error("Querying links"))?;
        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn create_element(&self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(js_error("Creating element"))
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<()> {
        element.set_attribute(name, value).map_err(js_error("Setting attribute"))
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) -> Result<()> {
        let element = element.dyn_ref::<HtmlElement>().ok_or_else(|| {
            TelQrError::dom(format!("<{}> cannot carry inline styles", element.tag_name()))
        })?;
        element.style().set_property(property, value).map_err(js_error("Setting style"))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_child(child).map(drop).map_err(js_error("Appending child"))
    }

    fn append_to_body(&self, element: &Element) -> Result<()> {
        let body = self.document.body().ok_or_else(|| TelQrError::dom("document has no body"))?;
        body.append_child(element).map(drop).map_err(js_error("Appending to body"))
    }

    fn append_to_head(&self, element: &Element) -> Result<()> {
        let head = self.document.head().ok_or_else(|| TelQrError::dom("document has no head"))?;
        head.append_child(element).map(drop).map_err(js_error("Appending to head"))
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn add_event_listener(
        &self,
        element: &Element,
        kind: EventKind,
        listener: Listener,
    ) -> Result<WebSubscription> {
        let callback =
            Closure::<dyn FnMut(Event)>::new(move |event: Event| listener(&WebEvent(event)));
        element
            .add_event_listener_with_callback(kind.as_ref(), callback.as_ref().unchecked_ref())
            .map_err(js_error("Adding event listener"))?;
        Ok(WebSubscription { target: element.clone(), kind, callback: Some(callback) })
    }

    fn navigate(&self, href: &str) -> Result<()> {
        self.window.location().set_href(href).map_err(js_error("Navigating"))
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
