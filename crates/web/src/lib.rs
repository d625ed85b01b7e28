//! # TelQr for the browser
//!
//! Binds the `telqr` component to the live page through `web-sys` and renders
//! call codes with qrcode.js, loaded on first use.
//!
//! ```js
//! import init, { TelQr } from "./telqr_web.js";
//!
//! await init();
//! const telqr = new TelQr({ buttonText: "Dial", qrCode: { width: 200 } });
//! ```
// wasm-bindgen expands exports into unsafe glue.
#![allow(unsafe_code)]

mod dom;
mod qrcode;

pub use crate::dom::{WebDom, WebSubscription};
pub use crate::qrcode::JsQrCode;

use std::sync::Once;
use telqr::domain::{TelQrConfig, TelQrConfigOverrides};
use telqr::{TelLinkHandler, TelQrError};
use telqr_logger::{LevelFilter, Logger};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Exported component. Constructing it scans the document for `tel:` links.
#[wasm_bindgen(js_name = TelQr)]
#[derive(Debug)]
pub struct TelQr {
    handler: TelLinkHandler<WebDom, JsQrCode>,
}

#[wasm_bindgen(js_class = TelQr)]
impl TelQr {
    /// Accepts an optional options object; malformed fields fall back to defaults.
    ///
    /// # Errors
    /// Throws when there is no document or a link cannot be wired.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Self, JsValue> {
        init_runtime();

        let handler = TelLinkHandler::builder()
            .dom(WebDom::from_window().map_err(to_js)?)
            .renderer(JsQrCode)
            .config(read_config(config))
            .build()
            .map_err(to_js)?;

        Ok(Self { handler })
    }

    #[wasm_bindgen(getter, js_name = isMobile)]
    pub fn is_mobile(&self) -> bool {
        self.handler.is_mobile()
    }

    /// Number of links intercepted at construction.
    #[wasm_bindgen(getter, js_name = linkCount)]
    pub fn link_count(&self) -> usize {
        self.handler.links().len()
    }

    #[wasm_bindgen(getter, js_name = isModalOpen)]
    pub fn is_modal_open(&self) -> bool {
        self.handler.is_modal_open()
    }

    /// The effective configuration after merging caller options.
    ///
    /// # Errors
    /// Throws if the configuration cannot be converted to a JS object.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.handler.config()).map_err(JsValue::from)
    }

    /// Dismisses the open dialog. Returns whether one was open.
    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) -> bool {
        self.handler.close_modal()
    }
}

fn read_config(value: JsValue) -> TelQrConfig {
    if value.is_undefined() || value.is_null() {
        return TelQrConfig::default();
    }
    match serde_wasm_bindgen::from_value::<TelQrConfigOverrides>(value) {
        Ok(overrides) => TelQrConfig::from_overrides(overrides),
        Err(err) => {
            warn!(%err, "Ignoring unreadable TelQr options");
            TelQrConfig::default()
        },
    }
}

fn to_js(err: TelQrError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn init_runtime() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        #[cfg(feature = "console-panic")]
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
        }));

        if let Err(err) = Logger::builder().name("telqr").level(LevelFilter::INFO).init() {
            web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
        }
    });
}
