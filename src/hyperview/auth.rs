//! OAuth2 client-credentials token exchange.

use crate::config::ApiConfig;
use crate::hyperview::error::HyperviewError;
use serde::Deserialize;

const TOKEN_PATH: &str = "/connect/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges the configured client credentials for a bearer token.
///
/// One POST with a form-encoded `client_id`/`client_secret`/`grant_type`
/// body. A non-success status or a response body without an `access_token`
/// field is fatal; there is no retry.
pub(crate) async fn acquire_token(
    http: &reqwest::Client,
    config: &ApiConfig,
) -> Result<String, HyperviewError> {
    let url = format!("{}{}", config.base_url.trim_end_matches('/'), TOKEN_PATH);
    let params = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "client_credentials"),
    ];

    let response = http
        .post(&url)
        .form(&params)
        .send()
        .await
        .map_err(|e| HyperviewError::TokenRequest {
            url: url.clone(),
            source: e,
        })?;

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            return Err(match e.status() {
                Some(status) => HyperviewError::TokenStatus {
                    url,
                    status,
                    source: e,
                },
                None => HyperviewError::TokenRequest { url, source: e },
            })
        }
    };

    let body: TokenResponse =
        response
            .json()
            .await
            .map_err(|e| HyperviewError::TokenDecode { url, source: e })?;
    Ok(body.access_token)
}
