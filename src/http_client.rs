use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

pub fn http_client(token: &str, timeout: Duration) -> Result<Client> {
    http_client_builder(token, timeout)?
        .build()
        .context("failed to build http client")
}

/// Client settings shared by every request: timeout plus auth and agent headers.
pub fn http_client_builder(token: &str, timeout: Duration) -> Result<ClientBuilder> {
    let mut headers = HeaderMap::new();
    let mut auth =
        HeaderValue::from_str(token).context("authorization token is not a valid header value")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(USER_AGENT, HeaderValue::from_static("team_ledger/0.1"));

    Ok(Client::builder().timeout(timeout).default_headers(headers))
}
