//! API utilities for frontend-backend communication
//!
//! Every endpoint answers with the `ApiResponse<T>` envelope. The helpers
//! below unwrap it and classify failures into `ApiError`:
//! - network / unreadable body -> `Transport`
//! - `success = false` -> `Business` with the server message as is

use contracts::shared::{ApiError, ApiResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Backend port used when `PURCHASING_API_PORT` is not set at build time
pub const DEFAULT_API_PORT: &str = "3000";

fn api_port() -> &'static str {
    option_env!("PURCHASING_API_PORT").unwrap_or(DEFAULT_API_PORT)
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location and the
/// backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api_port())
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/material/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Путь ресурса: `item_path("/api/rfq", id)` -> `/api/rfq/<id>`.
/// Идентификатор кодируется: серверные id не обязаны быть UUID.
pub fn item_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, urlencoding::encode(id))
}

fn transport(e: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Read the envelope from any response, including non-2xx ones that
/// still carry `{ success: false, message }`
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(transport)?;
    match serde_json::from_str::<ApiResponse<T>>(&text) {
        Ok(envelope) => Ok(envelope),
        Err(e) if (200..300).contains(&status) => {
            Err(ApiError::Transport(format!("некорректный ответ сервера ({})", e)))
        }
        Err(_) => Err(ApiError::Transport(format!("HTTP {}", status))),
    }
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(transport)?;
    read_envelope::<T>(response).await?.into_result()
}

/// GET, where "not found" and a rejected envelope mean "no data"
pub async fn get_optional<T: DeserializeOwned>(path: &str) -> Result<Option<T>, ApiError> {
    let response = Request::get(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(transport)?;
    if response.status() == 404 {
        return Ok(None);
    }
    let envelope = read_envelope::<T>(response).await?;
    if !envelope.success {
        log::warn!(
            "GET {} rejected: {}",
            path,
            envelope.message.as_deref().unwrap_or_default()
        );
        return Ok(None);
    }
    Ok(envelope.result)
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = Request::post(&api_url(path))
        .header("Accept", "application/json")
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_envelope::<T>(response).await?.into_result()
}

/// POST without a meaningful result (commands)
pub async fn post_command<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let response = Request::post(&api_url(path))
        .header("Accept", "application/json")
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_envelope::<serde_json::Value>(response).await?.into_unit()
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = Request::put(&api_url(path))
        .header("Accept", "application/json")
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_envelope::<T>(response).await?.into_result()
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let response = Request::delete(&api_url(path))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(transport)?;
    read_envelope::<serde_json::Value>(response).await?.into_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_encodes_identifier() {
        assert_eq!(item_path("/api/unit", "kg"), "/api/unit/kg");
        assert_eq!(item_path("/api/unit", "a b/c"), "/api/unit/a%20b%2Fc");
    }
}
