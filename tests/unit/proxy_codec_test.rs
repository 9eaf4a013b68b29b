//! Unit tests for the proxy URL codecs.

use portal_browser::services::proxy_codec::{
    decode_uri_component, encode_uri_component, PlainCodec, ProxyCodec, UrlCodec, XorCodec,
};
use portal_browser::types::errors::CodecError;
use portal_browser::types::settings::{ProxyBackend, ProxySettings};

fn uv() -> ProxyCodec {
    ProxyCodec::for_backend(ProxyBackend::Ultraviolet, &ProxySettings::default())
}

fn sj() -> ProxyCodec {
    ProxyCodec::for_backend(ProxyBackend::Scramjet, &ProxySettings::default())
}

#[test]
fn test_from_settings_follows_backend() {
    let mut settings = ProxySettings::default();
    assert_eq!(ProxyCodec::from_settings(&settings).backend(), ProxyBackend::Scramjet);
    settings.backend = ProxyBackend::Ultraviolet;
    let codec = ProxyCodec::from_settings(&settings);
    assert_eq!(codec.backend(), ProxyBackend::Ultraviolet);
    assert_eq!(codec.prefix(), "/uv/service/");
}

#[test]
fn test_scramjet_encode() {
    assert_eq!(
        sj().encode("https://example.com/"),
        "/scramjet/https%3A%2F%2Fexample.com%2F"
    );
}

#[test]
fn test_ultraviolet_encode() {
    let encoded = uv().encode("https://example.com");
    assert!(encoded.starts_with("/uv/service/hvtrs8%2F-"));
    assert_eq!(uv().decode(&encoded).unwrap(), "https://example.com");
}

#[test]
fn test_decode_absolute_src() {
    let src = format!("http://localhost:8080{}", sj().encode("https://example.com/a?b=c"));
    assert_eq!(sj().decode(&src).unwrap(), "https://example.com/a?b=c");
}

#[test]
fn test_decode_rejects_other_prefix() {
    let proxied = uv().encode("https://example.com");
    assert!(matches!(sj().decode(&proxied), Err(CodecError::PrefixMismatch(_))));
    assert!(!sj().owns(&proxied));
    assert!(uv().owns(&proxied));
}

#[test]
fn test_backends_disagree() {
    let url = "https://example.com/path";
    assert_ne!(XorCodec.encode_segment(url), PlainCodec.encode_segment(url));
}

#[test]
fn test_custom_prefix() {
    let settings = ProxySettings {
        scramjet_prefix: "/sj/".to_string(),
        ..ProxySettings::default()
    };
    let codec = ProxyCodec::from_settings(&settings);
    assert_eq!(codec.encode("a b"), "/sj/a%20b");
    assert_eq!(codec.decode("/sj/a%20b").unwrap(), "a b");
}

#[test]
fn test_uri_component_unicode() {
    assert_eq!(encode_uri_component("é"), "%C3%A9");
    assert_eq!(decode_uri_component("%C3%A9").unwrap(), "é");
}
