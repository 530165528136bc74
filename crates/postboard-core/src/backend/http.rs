//! HTTP backend speaking the tRPC JSON envelope of the web app.
//!
//! Procedures:
//! - `GET  api/trpc/post.getAll`      -> `{"result":{"data":[Post]}}`
//! - `POST api/trpc/post.create`      -> `{"result":{"data":Post}}`
//! - `GET  api/trpc/auth.getSession`  -> `{"result":{"data":Session|null}}`
//!
//! Sign-in is a browser flow (`api/auth/signin`); sign-out is a POST to
//! `api/auth/signout`.

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use postboard_types::{CreatePostInput, Post, Session};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::{PostApi, SessionApi, SignIn};
use crate::config::HttpConfig;

const SESSION_COOKIE: &str = "next-auth.session-token";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: EnvelopeResult<T>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResult<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Remote backend.
#[derive(Debug)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).with_context(|| format!("Invalid base URL '{}'", config.base_url))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = config.session_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}"))
                .context("Session token contains invalid header characters")?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path '{path}'"))
    }

    async fn query<T: DeserializeOwned>(&self, procedure: &str) -> Result<T> {
        let url = self.endpoint(&format!("api/trpc/{procedure}"))?;
        tracing::debug!(%url, "trpc query");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {procedure} failed"))?;
        decode(procedure, response).await
    }

    async fn mutate<T: DeserializeOwned>(
        &self,
        procedure: &str,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let url = self.endpoint(&format!("api/trpc/{procedure}"))?;
        tracing::debug!(%url, "trpc mutation");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {procedure} failed"))?;
        decode(procedure, response).await
    }
}

/// Unwraps the tRPC envelope, turning error envelopes into errors.
async fn decode<T: DeserializeOwned>(procedure: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .with_context(|| format!("Failed to read {procedure} response"))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&text).map_or_else(
            |_not_envelope| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            },
            |envelope| envelope.error.message,
        );
        tracing::warn!(procedure, %status, %message, "trpc call failed");
        anyhow::bail!("{procedure} failed ({status}): {message}");
    }

    let envelope: Envelope<T> = serde_json::from_str(&text)
        .with_context(|| format!("Unexpected {procedure} response shape"))?;
    Ok(envelope.result.data)
}

impl PostApi for HttpBackend {
    fn list_posts(&self) -> BoxFuture<'_, Result<Vec<Post>>> {
        Box::pin(self.query("post.getAll"))
    }

    fn create_post(&self, input: CreatePostInput) -> BoxFuture<'_, Result<Post>> {
        Box::pin(async move { self.mutate("post.create", &input).await })
    }
}

impl SessionApi for HttpBackend {
    fn get_session(&self) -> BoxFuture<'_, Result<Option<Session>>> {
        Box::pin(self.query("auth.getSession"))
    }

    fn sign_in(&self) -> BoxFuture<'_, Result<SignIn>> {
        Box::pin(async move {
            let url = self.endpoint("api/auth/signin")?;
            Ok(SignIn::OpenBrowser {
                url: url.to_string(),
            })
        })
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let url = self.endpoint("api/auth/signout")?;
            let response = self
                .http
                .post(url)
                .send()
                .await
                .context("Sign-out request failed")?;
            let status = response.status();
            if !status.is_success() && !status.is_redirection() {
                anyhow::bail!("Sign-out failed ({status})");
            }
            Ok(())
        })
    }
}
