//! Proxy URL codecs.
//!
//! Each reverse-proxy runtime mounts itself under a path prefix and expects the
//! destination URL as one opaque path segment after it. Ultraviolet obfuscates
//! the URL with a character XOR before percent-encoding; Scramjet only
//! percent-encodes. The two formats are mutually incompatible, so a source
//! produced by one backend must never be decoded by the other.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::errors::CodecError;
use crate::types::settings::{ProxyBackend, ProxySettings};

/// Characters `encodeURIComponent` leaves untouched, everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes with `encodeURIComponent` semantics.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Reverses [`encode_uri_component`].
pub fn decode_uri_component(input: &str) -> Result<String, CodecError> {
    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| CodecError::Malformed(e.to_string()))
}

/// Transform between a real URL and the segment placed after a proxy prefix.
pub trait UrlCodec {
    fn encode_segment(&self, url: &str) -> String;
    fn decode_segment(&self, segment: &str) -> Result<String, CodecError>;
}

/// XOR-2 on every odd-indexed character, then percent-encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorCodec;

impl XorCodec {
    fn xor_odd(input: &str) -> String {
        input
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i % 2 == 1 {
                    char::from_u32(c as u32 ^ 2).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

impl UrlCodec for XorCodec {
    fn encode_segment(&self, url: &str) -> String {
        encode_uri_component(&Self::xor_odd(url))
    }

    /// A raw `?` can only come from the page itself, so anything after it is
    /// kept verbatim.
    fn decode_segment(&self, segment: &str) -> Result<String, CodecError> {
        let (input, search) = match segment.split_once('?') {
            Some((input, search)) => (input, Some(search)),
            None => (segment, None),
        };
        let mut decoded = Self::xor_odd(&decode_uri_component(input)?);
        if let Some(search) = search {
            decoded.push('?');
            decoded.push_str(search);
        }
        Ok(decoded)
    }
}

/// Plain percent-encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl UrlCodec for PlainCodec {
    fn encode_segment(&self, url: &str) -> String {
        encode_uri_component(url)
    }

    fn decode_segment(&self, segment: &str) -> Result<String, CodecError> {
        decode_uri_component(segment)
    }
}

/// The codec of one proxy backend, bound to the prefix it is mounted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyCodec {
    Ultraviolet { prefix: String },
    Scramjet { prefix: String },
}

impl ProxyCodec {
    /// Codec for the backend currently selected in `settings`.
    pub fn from_settings(settings: &ProxySettings) -> Self {
        Self::for_backend(settings.backend, settings)
    }

    pub fn for_backend(backend: ProxyBackend, settings: &ProxySettings) -> Self {
        match backend {
            ProxyBackend::Ultraviolet => ProxyCodec::Ultraviolet {
                prefix: settings.ultraviolet_prefix.clone(),
            },
            ProxyBackend::Scramjet => ProxyCodec::Scramjet {
                prefix: settings.scramjet_prefix.clone(),
            },
        }
    }

    pub fn backend(&self) -> ProxyBackend {
        match self {
            ProxyCodec::Ultraviolet { .. } => ProxyBackend::Ultraviolet,
            ProxyCodec::Scramjet { .. } => ProxyBackend::Scramjet,
        }
    }

    pub fn prefix(&self) -> &str {
        match self {
            ProxyCodec::Ultraviolet { prefix } | ProxyCodec::Scramjet { prefix } => prefix,
        }
    }

    fn codec(&self) -> &dyn UrlCodec {
        match self {
            ProxyCodec::Ultraviolet { .. } => &XorCodec,
            ProxyCodec::Scramjet { .. } => &PlainCodec,
        }
    }

    /// Proxied path for a real destination URL.
    pub fn encode(&self, url: &str) -> String {
        format!("{}{}", self.prefix(), self.codec().encode_segment(url))
    }

    /// Real destination behind a proxied source.
    ///
    /// `src` may be a bare path or an absolute URL on the portal's origin.
    pub fn decode(&self, src: &str) -> Result<String, CodecError> {
        let start = src
            .find(self.prefix())
            .ok_or_else(|| CodecError::PrefixMismatch(src.to_string()))?;
        let segment = &src[start + self.prefix().len()..];
        self.codec().decode_segment(segment)
    }

    /// Whether `src` is mounted under this codec's prefix.
    pub fn owns(&self, src: &str) -> bool {
        src.contains(self.prefix())
    }
}
