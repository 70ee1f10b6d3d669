use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use super::oauth::{self, Nonce};
use super::{Account, Publisher, Status};
use crate::config::TwitterConfig;
use crate::credentials::Credentials;
use crate::error::TwitterError;

const USER_AGENT: &str = concat!("idlesbot/", env!("CARGO_PKG_VERSION"));

/// Twitter v1.1 REST client authenticated with OAuth 1.0a user context.
pub struct TwitterClient {
    creds: Credentials,
    api_base: String,
    client: reqwest::Client,
}

impl TwitterClient {
    pub fn new(creds: Credentials, config: &TwitterConfig) -> Result<Self, TwitterError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self::with_http_client(
            creds,
            config.api_base.clone(),
            builder.build()?,
        ))
    }

    pub fn with_http_client(
        creds: Credentials,
        api_base: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            creds,
            api_base: api_base.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Signs and sends one request, then decodes a 2xx body as `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<T, TwitterError> {
        let url = self.endpoint(path);

        let mut signed = query.to_vec();
        signed.extend_from_slice(form);
        let nonce = Nonce::generate(&mut rand::rng());
        let authorization =
            oauth::authorization_header(&self.creds, method.as_str(), &url, &signed, &nonce)?;

        let request_url = if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, encode_pairs(query))
        };

        let mut request = self
            .client
            .request(method, &request_url)
            .header(AUTHORIZATION, authorization);
        if !form.is_empty() {
            request = request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encode_pairs(form));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TwitterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| TwitterError::Decode { source, body })
    }
}

/// Encodes pairs the same way the signature does, so the two always agree.
fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn verify_credentials(&self) -> Result<Account, TwitterError> {
        self.call(
            Method::GET,
            "account/verify_credentials.json",
            &[("include_email", "true"), ("skip_status", "true")],
            &[],
        )
        .await
    }

    async fn post_status(&self, text: &str) -> Result<Status, TwitterError> {
        self.call(Method::POST, "statuses/update.json", &[], &[("status", text)])
            .await
    }
}
