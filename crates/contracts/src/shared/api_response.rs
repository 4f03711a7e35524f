//! Конверт ответа backend API и классификация ошибок фронтенда
//!
//! Каждый endpoint отвечает `{ success, message?, result }`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Текст по умолчанию, если сервер отклонил запрос без сообщения
pub const DEFAULT_BUSINESS_ERROR: &str = "Операция отклонена сервером";

/// Конверт ответа API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            message: None,
            result: Some(result),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            result: None,
        }
    }

    /// Извлечь результат.
    ///
    /// `success = false` превращается в `ApiError::Business` с сообщением
    /// сервера без изменений.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Business(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BUSINESS_ERROR.to_string()),
            ));
        }
        self.result
            .ok_or_else(|| ApiError::Transport("Пустой результат в ответе сервера".to_string()))
    }

    /// Для операций без полезной нагрузки (delete, activate, ...)
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Business(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BUSINESS_ERROR.to_string()),
            ))
        }
    }
}

/// Ошибки, которые видит экран
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Локальная проверка не пройдена, запрос не отправлялся
    #[error("{0}")]
    Validation(String),

    /// Сеть, HTTP статус без конверта, некорректный JSON
    #[error("Ошибка сети: {0}")]
    Transport(String),

    /// Бизнес-правило backend (сообщение сервера как есть)
    #[error("{0}")]
    Business(String),
}

impl ApiError {
    /// Ошибки запроса показываются всплывающим уведомлением,
    /// ошибки проверки - в самой форме.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<crate::domain::common::LineValidationError> for ApiError {
    fn from(e: crate::domain::common::LineValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<crate::domain::a004_unit_conversion::UnitRegistryError> for ApiError {
    fn from(e: crate::domain::a004_unit_conversion::UnitRegistryError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_envelope_yields_result() {
        let json = r#"{"success":true,"result":[1,2,3]}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_business_message_is_verbatim() {
        let json = r#"{"success":false,"message":"Нельзя удалить базовую единицу","result":null}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_result(),
            Err(ApiError::Business("Нельзя удалить базовую единицу".to_string()))
        );
    }

    #[test]
    fn test_business_error_without_message_uses_fallback() {
        let json = r#"{"success":false}"#;
        let resp: ApiResponse<()> = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_unit(),
            Err(ApiError::Business(DEFAULT_BUSINESS_ERROR.to_string()))
        );
    }

    #[test]
    fn test_missing_result_is_transport_error() {
        let resp: ApiResponse<String> = ApiResponse {
            success: true,
            message: None,
            result: None,
        };
        assert!(resp.into_result().unwrap_err().is_transient());
    }
}
