use crate::dom::{WebDom, js_error};
use js_sys::{Array, Function, Object, Reflect};
use telqr::{QrRenderer, QrRequest, Result, TelQrError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Global published by qrcode.js.
const CONSTRUCTOR: &str = "QRCode";

/// Renders through the page's `QRCode` constructor (qrcode.js).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsQrCode;

impl JsQrCode {
    fn constructor() -> Option<Function> {
        Reflect::get(&js_sys::global(), &JsValue::from_str(CONSTRUCTOR))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(drop)
        .map_err(js_error("Building QRCode options"))
}

impl QrRenderer<WebDom> for JsQrCode {
    fn is_available(&self) -> bool {
        Self::constructor().is_some()
    }

    fn render(&self, _dom: &WebDom, container: &Element, request: &QrRequest) -> Result<()> {
        let constructor = Self::constructor()
            .ok_or_else(|| TelQrError::resource_load(format!("{CONSTRUCTOR} is not defined")))?;

        let levels = Reflect::get(&constructor, &JsValue::from_str("CorrectLevel"))
            .map_err(js_error("Reading QRCode.CorrectLevel"))?;
        let level = Reflect::get(&levels, &JsValue::from_str(request.correct_level.as_ref()))
            .map_err(js_error("Reading QRCode.CorrectLevel"))?;

        let options = Object::new();
        set(&options, "text", &JsValue::from_str(&request.text))?;
        set(&options, "width", &JsValue::from(request.width))?;
        set(&options, "height", &JsValue::from(request.height))?;
        set(&options, "colorDark", &JsValue::from_str(&request.color_dark))?;
        set(&options, "colorLight", &JsValue::from_str(&request.color_light))?;
        set(&options, "correctLevel", &level)?;

        let target: &JsValue = container.as_ref();
        Reflect::construct(&constructor, &Array::of2(target, &options))
            .map_err(js_error("Constructing QRCode"))?;
        Ok(())
    }
}
