//! Shared fixtures for node integration tests.

/// Header value shaped like a real edge emission, score 63.
#[allow(dead_code)]
pub const FIXTURE_HEADER: &str = "uuid=964d54b7-0821-413a-a4d6-8131770ec8d5;requestid=2e2d4c;status=0;score=63;risk=udfp:1325;trust=ugp:us;general=di:1;allow=0;action=monitor";

/// Builds request header pairs around one risk header value.
#[allow(dead_code)]
pub fn request_headers(
    name: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    vec![
        ("Host", "login.example.test"),
        ("User-Agent", "Mozilla/5.0"),
        (name, value),
        ("Accept", "text/html"),
    ]
}

/// Installs a test-writer tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
