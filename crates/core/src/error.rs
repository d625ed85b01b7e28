//! # TelQr Errors
//!
//! Every failure of the click pipeline is scoped to the click that triggered
//! it; nothing here is fatal to the host page.

use std::borrow::Cow;

/// Errors raised by the TelQr component.
#[derive(Debug, thiserror::Error)]
pub enum TelQrError {
    /// The code-generation script could not be loaded.
    #[error("Resource load error{}: {message}", format_context(.context))]
    ResourceLoad { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The document refused an operation (element creation, insertion, listener wiring).
    #[error("DOM error{}: {message}", format_context(.context))]
    Dom { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The activated link does not carry a `tel:` destination.
    #[error("Invalid telephone link{}: {href:?}", format_context(.context))]
    InvalidLink { href: String, context: Option<Cow<'static, str>> },

    /// Reading a configuration file or environment overrides failed.
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues.
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

pub type Result<T, E = TelQrError> = std::result::Result<T, E>;

impl TelQrError {
    pub fn dom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Dom { message: message.into(), context: None }
    }

    pub fn resource_load(message: impl Into<Cow<'static, str>>) -> Self {
        Self::ResourceLoad { message: message.into(), context: None }
    }
}

/// Adds `.context(..)` to results that carry, or convert into, a [`TelQrError`].
pub trait TelQrErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> TelQrErrorExt<T> for Result<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut err| {
            match &mut err {
                TelQrError::ResourceLoad { context: c, .. }
                | TelQrError::Dom { context: c, .. }
                | TelQrError::InvalidLink { context: c, .. }
                | TelQrError::Internal { context: c, .. } => *c = Some(context.into()),
                #[cfg(not(target_arch = "wasm32"))]
                TelQrError::Config { context: c, .. } => *c = Some(context.into()),
            }
            err
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> TelQrErrorExt<T> for std::result::Result<T, config::ConfigError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| TelQrError::Config { source, context: Some(context.into()) })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for TelQrError {
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

impl From<&'static str> for TelQrError {
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for TelQrError {
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
