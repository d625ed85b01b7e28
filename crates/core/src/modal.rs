//! The call dialog: backdrop, dialog surface, number, code, instructions and
//! the fallback dial button.

use crate::dom::{Dom, DomEvent, EventKind, QrRenderer, QrRequest, apply_styles};
use crate::error::{Result, TelQrErrorExt};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use telqr_domain::{StyleGroup, TelQrConfig};
use tracing::{error, info};

pub const BACKDROP_CLASS: &str = "qr-modal-backdrop";
pub const DIALOG_CLASS: &str = "qr-modal";
pub const CODE_CLASS: &str = "qr-modal-code";

/// Layout the backdrop needs regardless of configuration.
const BACKDROP_LAYOUT: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "9999"),
];

const DIALOG_LAYOUT: &[(&str, &str)] = &[("text-align", "center"), ("position", "relative")];

/// Surfaces of the visible dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSession<E> {
    pub backdrop: E,
    pub dialog: E,
}

/// The visible dialog together with the listeners wired to its surfaces.
struct OpenDialog<D: Dom> {
    session: ModalSession<D::Element>,
    _subscriptions: Vec<D::Subscription>,
}

type SessionCell<D> = RefCell<Option<OpenDialog<D>>>;

/// Builds and tears down the dialog. At most one session is visible.
pub struct ModalPresenter<D: Dom, R: QrRenderer<D>> {
    dom: D,
    renderer: Rc<R>,
    config: Rc<TelQrConfig>,
    session: Rc<SessionCell<D>>,
}

impl<D: Dom, R: QrRenderer<D>> ModalPresenter<D, R> {
    pub fn new(dom: D, renderer: Rc<R>, config: Rc<TelQrConfig>) -> Self {
        Self { dom, renderer, config, session: Rc::new(RefCell::new(None)) }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.borrow().is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<ModalSession<D::Element>> {
        self.session.borrow().as_ref().map(|open| open.session.clone())
    }

    /// Shows the dialog for `number`, replacing any dialog already open.
    ///
    /// The backdrop is inserted into the document only once fully populated.
    ///
    /// # Errors
    /// Returns an error if the document or the renderer rejects an operation;
    /// nothing is inserted in that case.
    pub fn open(&self, number: &str, href: &str) -> Result<()> {
        self.close();

        let backdrop = self.dom.create_element("div")?;
        self.dom.set_attribute(&backdrop, "class", BACKDROP_CLASS)?;

        let dialog = self.dom.create_element("div")?;
        self.dom.set_attribute(&dialog, "class", DIALOG_CLASS)?;
        self.dom.set_attribute(&dialog, "role", "dialog")?;
        self.dom.set_attribute(&dialog, "aria-label", &self.config.show_to_call_text)?;

        let mut subscriptions = Vec::with_capacity(3);
        self.wire_dismissal(&backdrop, &dialog, &mut subscriptions)?;
        self.dom.append_child(&backdrop, &dialog)?;
        self.apply_surface_styles(&backdrop, &dialog)?;
        self.populate(&dialog, number, href, &mut subscriptions)?;

        self.dom.append_to_body(&backdrop).context("Inserting call dialog")?;
        *self.session.borrow_mut() = Some(OpenDialog {
            session: ModalSession { backdrop, dialog },
            _subscriptions: subscriptions,
        });
        info!(number, "Call dialog opened");

        Ok(())
    }

    /// Removes the dialog, if any. Returns whether a dialog was open.
    pub fn close(&self) -> bool {
        teardown(&self.dom, &self.session)
    }

    fn wire_dismissal(
        &self,
        backdrop: &D::Element,
        dialog: &D::Element,
        subscriptions: &mut Vec<D::Subscription>,
    ) -> Result<()> {
        let dom = self.dom.clone();
        let session: Weak<SessionCell<D>> = Rc::downgrade(&self.session);
        subscriptions.push(self.dom.add_event_listener(
            backdrop,
            EventKind::Click,
            Box::new(move |_: &dyn DomEvent| {
                if let Some(session) = session.upgrade() {
                    teardown(&dom, &session);
                }
            }),
        )?);

        subscriptions.push(self.dom.add_event_listener(
            dialog,
            EventKind::Click,
            Box::new(|event: &dyn DomEvent| event.stop_propagation()),
        )?);
        Ok(())
    }

    fn apply_surface_styles(&self, backdrop: &D::Element, dialog: &D::Element) -> Result<()> {
        let styling = &self.config.styling;

        let mut backdrop_style = StyleGroup::from_pairs(BACKDROP_LAYOUT);
        backdrop_style.merge(styling.backdrop.iter());
        apply_styles(&self.dom, backdrop, &backdrop_style)?;

        let mut dialog_style = StyleGroup::from_pairs(DIALOG_LAYOUT);
        dialog_style.merge(styling.modal.iter());
        apply_styles(&self.dom, dialog, &dialog_style)
    }

    fn populate(
        &self,
        dialog: &D::Element,
        number: &str,
        href: &str,
        subscriptions: &mut Vec<D::Subscription>,
    ) -> Result<()> {
        let styling = &self.config.styling;

        let title = self.styled_element("div", &styling.title)?;
        self.dom.set_text(&title, number);
        self.dom.append_child(dialog, &title)?;

        let code = self.dom.create_element("div")?;
        self.dom.set_attribute(&code, "class", CODE_CLASS)?;
        self.dom.append_child(dialog, &code)?;
        let request = QrRequest::for_number(number, &self.config.qr_code);
        self.renderer.render(&self.dom, &code, &request).context("Rendering call code")?;

        let description = self.styled_element("div", &styling.description)?;
        self.dom.set_text(&description, &self.config.scan_to_call_text);
        self.dom.append_child(dialog, &description)?;

        let button = self.styled_element("button", &styling.button)?;
        self.dom.set_attribute(&button, "type", "button")?;
        self.dom.set_text(&button, &self.config.button_text);
        let dom = self.dom.clone();
        let href = href.to_owned();
        subscriptions.push(self.dom.add_event_listener(
            &button,
            EventKind::Click,
            Box::new(move |_: &dyn DomEvent| {
                if let Err(err) = dom.navigate(&href) {
                    error!(%err, href = %href, "Fallback dial navigation failed");
                }
            }),
        )?);
        self.dom.append_child(dialog, &button)
    }

    fn styled_element(&self, tag: &str, style: &StyleGroup) -> Result<D::Element> {
        let element = self.dom.create_element(tag)?;
        apply_styles(&self.dom, &element, style)?;
        Ok(element)
    }
}

/// Detaches the dialog and drops its listeners.
fn teardown<D: Dom>(dom: &D, session: &SessionCell<D>) -> bool {
    let Some(open) = session.borrow_mut().take() else {
        return false;
    };
    dom.remove(&open.session.backdrop);
    drop(open);
    info!("Call dialog closed");
    true
}

impl<D: Dom, R: QrRenderer<D>> Clone for ModalPresenter<D, R> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            renderer: Rc::clone(&self.renderer),
            config: Rc::clone(&self.config),
            session: Rc::clone(&self.session),
        }
    }
}

impl<D: Dom, R: QrRenderer<D>> fmt::Debug for ModalPresenter<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalPresenter")
            .field("session", &self.session())
            .finish_non_exhaustive()
    }
}
