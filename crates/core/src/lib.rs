//! # TelQr
//!
//! Intercepts `tel:` links on desktop browsers and shows a dialog with a
//! scannable code of the number, so the call can be placed from a phone.
//! On handheld browsers the links keep their native behavior.
//!
//! The component is written against two capabilities supplied by the host:
//! a [`Dom`] (document, navigation, task queue) and a [`QrRenderer`] (the
//! code-generation library). `telqr-web` provides the browser versions.
//!
//! ## Pipeline
//!
//! 1. [`DeviceClassifier`] decides once, at construction, whether the runtime
//!    is handheld. If so, nothing else happens.
//! 2. Every `a[href^="tel:"]` gets one click interceptor.
//! 3. A click awaits [`ResourceLoader::ensure_ready`], which injects the
//!    library script at most once at a time.
//! 4. [`ModalPresenter`] replaces any open dialog with a new one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use telqr::{TelLinkHandler, domain::TelQrConfig};
//!
//! let handler = TelLinkHandler::builder()
//!     .dom(dom)
//!     .renderer(renderer)
//!     .config(TelQrConfig::from_json(&serde_json::json!({ "buttonText": "Dial" })))
//!     .build()?;
//! ```

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod device;
pub mod dom;
mod error;
pub mod handler;
pub mod links;
pub mod loader;
pub mod modal;

pub use crate::device::{DeviceClass, DeviceClassifier, Signature, SignatureKind};
pub use crate::dom::{Dom, DomEvent, EventKind, EventSubscription, Listener, QrRenderer, QrRequest};
pub use crate::error::{Result, TelQrError, TelQrErrorExt};
pub use crate::handler::{HandlerInner, TelLinkHandler, TelLinkHandlerOptions};
pub use crate::links::{TEL_LINK_SELECTOR, TEL_PREFIX, extract_phone_number};
pub use crate::loader::{LoaderState, ResourceLoader};
pub use crate::modal::{ModalPresenter, ModalSession};
pub use telqr_domain as domain;
