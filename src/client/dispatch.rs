//! The single request path every public operation funnels through.
//!
//! Composes the absolute URL, attaches basic auth, sends through the
//! agent, reads the whole body and only then decodes it into the shape
//! the caller asked for.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::Body;
use url::Url;

use super::{Client, Credentials};
use crate::errors::{OtsError, Result};

/// Method and body of one exchange.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Request<'a> {
    Get,
    PostEmpty,
    PostForm(&'a [(&'a str, &'a str)]),
}

impl Request<'_> {
    fn method(&self) -> &'static str {
        match self {
            Request::Get => "GET",
            Request::PostEmpty | Request::PostForm(_) => "POST",
        }
    }
}

impl Client {
    /// Send one request to `route` and decode the JSON response as `T`.
    ///
    /// Fails at the first broken stage; no partial value is ever returned.
    pub(crate) fn dispatch<T: DeserializeOwned>(
        &self,
        request: Request<'_>,
        route: &[&str],
    ) -> Result<T> {
        let method = request.method();
        let route_name = route.first().copied().unwrap_or_default();

        let url = endpoint(&self.base_url, route).map_err(|e| {
            warn!("{method}: unable to build request URL");
            e
        })?;
        let auth = basic_auth(&self.credentials);

        debug!("{method} {route_name}");

        let sent = match request {
            Request::Get => self
                .agent
                .get(url.as_str())
                .header("Authorization", &auth)
                .call(),
            Request::PostEmpty => self
                .agent
                .post(url.as_str())
                .header("Authorization", &auth)
                .send_empty(),
            Request::PostForm(fields) => self
                .agent
                .post(url.as_str())
                .header("Authorization", &auth)
                .send_form(fields.iter().copied()),
        };
        let mut response: Response<Body> = sent.map_err(|e| {
            warn!("{method}: unable to send request to {route_name}: {e}");
            OtsError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_vec().map_err(|e| {
            warn!("{method}: unable to read response from {route_name}: {e}");
            OtsError::Read(e)
        })?;

        serde_json::from_slice(&body).map_err(|source| {
            warn!("{method}: unable to decode response from {route_name} (HTTP {status})");
            OtsError::Decode { status, source }
        })
    }
}

/// Append `route` segments to `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &str, route: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| OtsError::InvalidUrl(format!("{base}: {e}")))?;

    url.path_segments_mut()
        .map_err(|()| OtsError::InvalidUrl(format!("{base}: cannot carry a path")))?
        .pop_if_empty()
        .extend(route);

    Ok(url)
}

/// Build the `Authorization` header value for HTTP basic auth.
pub(crate) fn basic_auth(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.username(), credentials.token());
    format!("Basic {}", BASE64.encode(pair))
}

// ── Tests ────────────────────────────────────────────────────────────
