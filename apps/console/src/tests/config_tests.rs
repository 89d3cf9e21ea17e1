use super::{normalize_api_url, Settings};

#[test]
fn defaults_point_at_the_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "http://127.0.0.1:5000");
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn bare_host_and_port_get_an_http_scheme() {
    assert_eq!(normalize_api_url("10.0.0.4:5000"), "http://10.0.0.4:5000");
}

#[test]
fn explicit_schemes_are_preserved() {
    assert_eq!(
        normalize_api_url("https://farm.example.com"),
        "https://farm.example.com"
    );
}

#[test]
fn trailing_slashes_are_dropped() {
    assert_eq!(
        normalize_api_url("http://127.0.0.1:5000///"),
        "http://127.0.0.1:5000"
    );
}

#[test]
fn a_blank_url_falls_back_to_the_default() {
    assert_eq!(normalize_api_url("   "), Settings::default().api_url);
}
