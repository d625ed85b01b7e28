//! Lazy, single-flight loading of the code-generation script.

use crate::dom::{Dom, DomEvent, EventKind, QrRenderer};
use crate::error::{Result, TelQrError};
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use strum_macros::Display;
use tracing::{debug, warn};

type LoadOutcome = std::result::Result<(), Cow<'static, str>>;
type PendingLoad = Shared<LocalBoxFuture<'static, LoadOutcome>>;

/// Observable loader state. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoaderState {
    NotRequested,
    Loading,
    Ready,
}

enum Slot {
    NotRequested,
    Loading(PendingLoad),
    Ready,
}

impl Slot {
    const fn state(&self) -> LoaderState {
        match self {
            Self::NotRequested => LoaderState::NotRequested,
            Self::Loading(_) => LoaderState::Loading,
            Self::Ready => LoaderState::Ready,
        }
    }
}

/// Ensures the code-generation library is present before first use.
///
/// Concurrent callers share one in-flight script load. A failed load is not
/// cached: the next call injects a fresh script tag.
pub struct ResourceLoader<D: Dom, R: QrRenderer<D>> {
    dom: D,
    renderer: Rc<R>,
    url: Rc<str>,
    slot: Rc<RefCell<Slot>>,
}

impl<D: Dom, R: QrRenderer<D>> ResourceLoader<D, R> {
    pub fn new(dom: D, renderer: Rc<R>, url: impl Into<Rc<str>>) -> Self {
        Self { dom, renderer, url: url.into(), slot: Rc::new(RefCell::new(Slot::NotRequested)) }
    }

    #[must_use]
    pub fn state(&self) -> LoaderState {
        self.slot.borrow().state()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolves once the library is usable.
    ///
    /// # Errors
    /// Returns [`TelQrError::ResourceLoad`] if the script reports a load
    /// failure, or a DOM error if the script tag cannot be injected.
    pub async fn ensure_ready(&self) -> Result<()> {
        let pending = {
            let mut slot = self.slot.borrow_mut();
            match &*slot {
                Slot::Ready => return Ok(()),
                Slot::Loading(pending) => pending.clone(),
                Slot::NotRequested if self.renderer.is_available() => {
                    debug!("QR library already present, skipping script load");
                    *slot = Slot::Ready;
                    return Ok(());
                },
                Slot::NotRequested => {
                    let pending = self.inject()?;
                    *slot = Slot::Loading(pending.clone());
                    pending
                },
            }
        };

        pending.await.map_err(|message| TelQrError::ResourceLoad {
            message,
            context: Some(Cow::Owned(self.url.to_string())),
        })
    }

    fn inject(&self) -> Result<PendingLoad> {
        let script = self.dom.create_element("script")?;
        self.dom.set_attribute(&script, "src", &self.url)?;

        let (tx, rx) = oneshot::channel::<LoadOutcome>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let mut subscriptions = Vec::with_capacity(2);
        for kind in [EventKind::Load, EventKind::Error] {
            let tx = Rc::clone(&tx);
            let subscription = self.dom.add_event_listener(
                &script,
                kind,
                Box::new(move |_: &dyn DomEvent| {
                    if let Some(tx) = tx.borrow_mut().take() {
                        let outcome = match kind {
                            EventKind::Load => Ok(()),
                            _ => Err(Cow::Borrowed("script failed to load")),
                        };
                        let _ = tx.send(outcome);
                    }
                }),
            )?;
            subscriptions.push(subscription);
        }
        self.dom.append_to_head(&script)?;
        debug!(url = %self.url, "Injected QR library script");

        let slot = Rc::clone(&self.slot);
        let url = Rc::clone(&self.url);
        let settle = async move {
            let outcome =
                rx.await.unwrap_or_else(|_| Err(Cow::Borrowed("script listener was dropped")));
            drop(subscriptions);
            match &outcome {
                Ok(()) => {
                    debug!(url = %url, "QR library loaded");
                    *slot.borrow_mut() = Slot::Ready;
                },
                Err(reason) => {
                    warn!(url = %url, %reason, "QR library failed to load");
                    *slot.borrow_mut() = Slot::NotRequested;
                },
            }
            outcome
        };

        Ok(settle.boxed_local().shared())
    }
}

impl<D: Dom, R: QrRenderer<D>> Clone for ResourceLoader<D, R> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            renderer: Rc::clone(&self.renderer),
            url: Rc::clone(&self.url),
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<D: Dom, R: QrRenderer<D>> fmt::Debug for ResourceLoader<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLoader")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
