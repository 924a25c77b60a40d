//! Base64 JSON state carried through app redirects.

use serde::{Deserialize, Serialize};

use crate::crypto::{decode_b64_string, encode_b64};
use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

use super::origin::is_valid_origin;

/// Where the login app should send the browser once it is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(rename = "authorizerURL", default)]
    pub authorizer_url: String,
    #[serde(rename = "redirectURL", default)]
    pub redirect_url: String,
}

impl AppState {
    /// Check the redirect against the allowed origins and require the
    /// authorizer URL to be this server's own `AUTHORIZER_URL`.
    pub fn validate(&self, allowed_origins: &[String], authorizer_url: &str) -> AppResult<()> {
        if !is_valid_origin(&self.redirect_url, allowed_origins) {
            return Err(AppError::validation("invalid redirect url"));
        }
        if self.authorizer_url.is_empty() {
            return Err(AppError::validation("invalid authorizer url"));
        }
        if self.authorizer_url.trim_end_matches('/') != authorizer_url.trim().trim_end_matches('/') {
            return Err(AppError::validation("invalid host url"));
        }
        Ok(())
    }
}

/// Encode a state value for a query string.
pub fn encode_app_state(state: &AppState) -> AppResult<String> {
    let json = serde_json::to_string(state)?;
    Ok(encode_b64(json))
}

/// Decode a state value. Trailing `/` is trimmed from both URLs.
pub fn decode_app_state(encoded: &str) -> AppResult<AppState> {
    let json = decode_b64_string(encoded)?;
    let mut state: AppState = serde_json::from_str(&json).map_err(|e| {
        AppError::with_source(ErrorKind::Decode, format!("Malformed app state: {e}"), e)
    })?;

    state.authorizer_url = state.authorizer_url.trim_end_matches('/').to_string();
    state.redirect_url = state.redirect_url.trim_end_matches('/').to_string();
    Ok(state)
}
