//! OAuth 1.0a request signing (HMAC-SHA1), as required by the v1.1 API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use urlencoding::encode;

use crate::credentials::Credentials;
use crate::error::TwitterError;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// Per-request values that must be fresh for every call.
#[derive(Debug, Clone)]
pub struct Nonce {
    pub value: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let value = rng
            .sample_iter(Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        Self {
            value,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Builds the `Authorization` header for a request.
///
/// `params` are the query and form-body parameters of the request, unencoded;
/// they take part in the signature but are not repeated in the header.
pub fn authorization_header(
    creds: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &Nonce,
) -> Result<String, TwitterError> {
    let timestamp = nonce.timestamp.to_string();
    let mut oauth_params = vec![
        ("oauth_consumer_key", creds.consumer_key.as_str()),
        ("oauth_nonce", nonce.value.as_str()),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", creds.access_token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend_from_slice(params);
    let base = signature_base_string(method, url, &all_params);
    let key = signing_key(&creds.consumer_secret, &creds.access_token_secret);
    let signature = sign(&key, &base)?;

    oauth_params.push(("oauth_signature", signature.as_str()));
    oauth_params.sort();

    let fields: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect();

    Ok(format!("OAuth {}", fields.join(", ")))
}

/// Percent-encodes and sorts every parameter, then joins them as `k=v&...`.
fn parameter_string(params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned()))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&parameter_string(params))
    )
}

fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", encode(consumer_secret), encode(token_secret))
}

fn sign(key: &str, base: &str) -> Result<String, TwitterError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
