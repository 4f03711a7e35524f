//! Отображение непрозрачных серверных токенов (шаг workflow, статус документа)
//!
//! Сервер владеет набором значений. Клиент знает только несколько
//! распространённых токенов ради цвета и подписи; всё остальное
//! показывается простой подписью без предположений о смысле.

use serde::{Deserialize, Serialize};

/// Цветовая окраска бейджа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenTone {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

impl TokenTone {
    /// Модификатор CSS класса бейджа
    pub fn css_modifier(&self) -> &'static str {
        match self {
            TokenTone::Neutral => "badge--neutral",
            TokenTone::Info => "badge--info",
            TokenTone::Warning => "badge--warning",
            TokenTone::Success => "badge--success",
            TokenTone::Danger => "badge--danger",
        }
    }
}

/// Как показать токен пользователю
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPresentation {
    pub label: String,
    pub tone: TokenTone,
    /// Токен есть в таблице известных значений
    pub known: bool,
}

/// Известные токены статусов и шагов: (токен, подпись, окраска)
pub const KNOWN_TOKENS: &[(&str, &str, TokenTone)] = &[
    ("draft", "Черновик", TokenTone::Neutral),
    ("submitted", "Отправлен", TokenTone::Info),
    ("pending_approval", "На согласовании", TokenTone::Warning),
    ("in_review", "На рассмотрении", TokenTone::Warning),
    ("approved", "Согласован", TokenTone::Success),
    ("rejected", "Отклонён", TokenTone::Danger),
    ("cancelled", "Отменён", TokenTone::Danger),
    ("sent", "Отправлен поставщику", TokenTone::Info),
    ("quoted", "Получено предложение", TokenTone::Info),
    ("ordered", "Заказан", TokenTone::Success),
    ("received", "Получен", TokenTone::Success),
    ("closed", "Закрыт", TokenTone::Neutral),
    ("completed", "Завершён", TokenTone::Success),
];

impl TokenPresentation {
    /// Подобрать отображение для токена.
    ///
    /// Неизвестный токен: подпись = `fallback_name`, если оно непустое,
    /// иначе сам токен; окраска нейтральная.
    pub fn resolve(token: &str, fallback_name: &str) -> Self {
        let normalized = token.trim().to_ascii_lowercase();
        if let Some((_, label, tone)) = KNOWN_TOKENS.iter().find(|(t, _, _)| *t == normalized) {
            let label = if fallback_name.trim().is_empty() {
                (*label).to_string()
            } else {
                fallback_name.trim().to_string()
            };
            return Self {
                label,
                tone: *tone,
                known: true,
            };
        }

        let label = if fallback_name.trim().is_empty() {
            token.to_string()
        } else {
            fallback_name.trim().to_string()
        };
        Self {
            label,
            tone: TokenTone::Neutral,
            known: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_token_gets_tone() {
        let p = TokenPresentation::resolve("approved", "");
        assert_eq!(p.label, "Согласован");
        assert_eq!(p.tone, TokenTone::Success);
        assert!(p.known);
    }

    #[test]
    fn test_server_name_wins_over_builtin_label() {
        let p = TokenPresentation::resolve("Pending_Approval", "Согласование у директора");
        assert_eq!(p.label, "Согласование у директора");
        assert_eq!(p.tone, TokenTone::Warning);
    }

    #[test]
    fn test_unknown_token_falls_back_to_plain_label() {
        let p = TokenPresentation::resolve("Activity_0x9fz", "Проверка бюджета");
        assert_eq!(p.label, "Проверка бюджета");
        assert_eq!(p.tone, TokenTone::Neutral);
        assert!(!p.known);

        let raw = TokenPresentation::resolve("Activity_0x9fz", "  ");
        assert_eq!(raw.label, "Activity_0x9fz");
    }
}
