use anyhow::Result;
use std::path::Path;
use telqr::config::load_config;
use telqr::domain::SignatureTable;
use telqr::{DeviceClassifier, TelQrError, extract_phone_number};
use tracing::debug;

/// Prints `desktop`, or `mobile` followed by the signature that matched.
pub fn classify(user_agent: &str, table: SignatureTable) -> Result<()> {
    let classifier = DeviceClassifier::new(table);
    match classifier.matched_signature(user_agent) {
        Some(signature) => {
            debug!(kind = %signature.kind, pattern = signature.pattern, %table, "Matched");
            println!("mobile\t{}\t{}", signature.kind, signature.pattern);
        },
        None => println!("desktop"),
    }
    Ok(())
}

pub fn extract(href: &str) -> Result<()> {
    let number = extract_phone_number(href)
        .ok_or_else(|| TelQrError::InvalidLink { href: href.to_owned(), context: None })?;
    println!("{number}");
    Ok(())
}

pub fn config(file: Option<&Path>) -> Result<()> {
    let config = load_config(file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
