#![cfg(not(target_arch = "wasm32"))]

use telqr_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_reports_existing_subscriber() {
    let _logger = Logger::builder()
        .name("telqr-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("telqr-init-twice-again")
        .level(LevelFilter::DEBUG)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "got {err}");
}
