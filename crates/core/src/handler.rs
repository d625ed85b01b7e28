use crate::device::{DeviceClass, DeviceClassifier};
use crate::dom::{Dom, DomEvent, EventKind, EventSubscription, QrRenderer};
use crate::error::{Result, TelQrError};
use crate::links::{extract_phone_number, find_tel_links};
use crate::loader::{LoaderState, ResourceLoader};
use crate::modal::{ModalPresenter, ModalSession};
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};
use telqr_domain::TelQrConfig;
use tracing::{debug, error, instrument};
use typed_builder::TypedBuilder;

/// Construction options for [`TelLinkHandler`].
#[derive(TypedBuilder)]
#[builder(build_method(vis = "pub", into = Result<TelLinkHandler<D, R>>))]
pub struct TelLinkHandlerOptions<D: Dom, R: QrRenderer<D>> {
    dom: D,
    renderer: R,
    #[builder(default)]
    config: TelQrConfig,
}

impl<D: Dom, R: QrRenderer<D>> From<TelLinkHandlerOptions<D, R>> for Result<TelLinkHandler<D, R>> {
    fn from(options: TelLinkHandlerOptions<D, R>) -> Self {
        TelLinkHandler::new(options.dom, options.renderer, options.config)
    }
}

/// Turns every `tel:` link of the document into a call-code dialog trigger on
/// desktop runtimes. On handheld runtimes it stays inert.
///
/// Cloning is cheap and yields a handle to the same handler.
pub struct TelLinkHandler<D: Dom, R: QrRenderer<D>> {
    inner: Rc<HandlerInner<D, R>>,
}

pub struct HandlerInner<D: Dom, R: QrRenderer<D>> {
    dom: D,
    config: Rc<TelQrConfig>,
    device: DeviceClass,
    links: RefCell<Vec<D::Element>>,
    loader: ResourceLoader<D, R>,
    presenter: ModalPresenter<D, R>,
}

impl<D: Dom, R: QrRenderer<D>> Deref for TelLinkHandler<D, R> {
    type Target = HandlerInner<D, R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<D: Dom, R: QrRenderer<D>> TelLinkHandler<D, R> {
    /// Returns a builder; only `dom` and `renderer` are required.
    #[must_use]
    pub fn builder() -> TelLinkHandlerOptionsBuilder<D, R> {
        TelLinkHandlerOptions::builder()
    }

    /// Classifies the runtime and, on desktop, intercepts every `tel:` link.
    ///
    /// # Errors
    /// Returns an error if the document rejects the link query or a listener.
    pub fn new(dom: D, renderer: R, config: TelQrConfig) -> Result<Self> {
        let classifier = DeviceClassifier::new(config.signature_table);
        let user_agent = dom.user_agent();
        let device = classifier.classify_optional(user_agent.as_deref());
        debug!(%device, table = %classifier.table(), "Classified runtime");

        let renderer = Rc::new(renderer);
        let config = Rc::new(config);
        let handler = Self {
            inner: Rc::new(HandlerInner {
                loader: ResourceLoader::new(
                    dom.clone(),
                    Rc::clone(&renderer),
                    config.library_url.as_str(),
                ),
                presenter: ModalPresenter::new(dom.clone(), renderer, Rc::clone(&config)),
                dom,
                config,
                device,
                links: RefCell::new(Vec::new()),
            }),
        };

        if device == DeviceClass::Desktop {
            handler.bind()?;
        }

        Ok(handler)
    }

    fn bind(&self) -> Result<()> {
        let links = find_tel_links(&self.dom)?;
        for link in &links {
            self.intercept(link)?;
        }
        debug!(count = links.len(), "Bound tel links");
        *self.links.borrow_mut() = links;
        Ok(())
    }

    fn intercept(&self, link: &D::Element) -> Result<()> {
        let handler: Weak<HandlerInner<D, R>> = Rc::downgrade(&self.inner);
        let target = link.clone();
        let subscription = self.dom.add_event_listener(
            link,
            EventKind::Click,
            Box::new(move |event: &dyn DomEvent| {
                // A released handler leaves the link to dial natively.
                let Some(inner) = handler.upgrade() else {
                    return;
                };
                event.prevent_default();
                let dom = inner.dom.clone();
                let handler = Self { inner };
                let link = target.clone();
                dom.spawn_local(Box::pin(async move {
                    if let Err(err) = handler.activate(&link).await {
                        error!(%err, "Tel link activation failed");
                    }
                }));
            }),
        )?;
        subscription.forget();
        Ok(())
    }

    /// Runs the click pipeline for `link`: extract the number, make sure the
    /// code library is loaded, then show the dialog.
    ///
    /// # Errors
    /// Returns [`TelQrError::InvalidLink`] for a non-`tel:` destination and
    /// [`TelQrError::ResourceLoad`] when the library cannot be loaded; in both
    /// cases no dialog is created.
    #[instrument(skip_all)]
    pub async fn activate(&self, link: &D::Element) -> Result<()> {
        let href = self.dom.attribute(link, "href").unwrap_or_default();
        let Some(number) = extract_phone_number(&href) else {
            return Err(TelQrError::InvalidLink { href, context: None });
        };

        self.loader.ensure_ready().await?;
        self.presenter.open(&number, &href)
    }

    /// Dismisses the open dialog. Returns whether one was open.
    pub fn close_modal(&self) -> bool {
        self.presenter.close()
    }
}

impl<D: Dom, R: QrRenderer<D>> HandlerInner<D, R> {
    #[must_use]
    pub fn config(&self) -> &TelQrConfig {
        &self.config
    }

    #[must_use]
    pub const fn device_class(&self) -> DeviceClass {
        self.device
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.device == DeviceClass::Mobile
    }

    /// Links intercepted at construction. Empty on handheld runtimes.
    #[must_use]
    pub fn links(&self) -> Vec<D::Element> {
        self.links.borrow().clone()
    }

    #[must_use]
    pub fn loader_state(&self) -> LoaderState {
        self.loader.state()
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.presenter.is_open()
    }

    #[must_use]
    pub fn modal_session(&self) -> Option<ModalSession<D::Element>> {
        self.presenter.session()
    }
}

impl<D: Dom, R: QrRenderer<D>> Clone for TelLinkHandler<D, R> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<D: Dom, R: QrRenderer<D>> fmt::Debug for TelLinkHandler<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelLinkHandler")
            .field("device", &self.device)
            .field("links", &self.links.borrow().len())
            .field("loader", &self.loader)
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}

impl<D: Dom, R: QrRenderer<D>> fmt::Debug for HandlerInner<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerInner").field("device", &self.device).finish_non_exhaustive()
    }
}
