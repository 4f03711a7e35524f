//! Категории страниц, открываемых во вкладках
//!
//! Корневой элемент каждой страницы получает:
//!   - `id` в формате `{entity}--{category}` (например `"a005_purchase_requisition--detail"`)
//!   - `data-page-category` с одной из констант ниже
//!
//! По части до `--` страница находится поиском по каталогу `domain/`.

/// Список записей
pub const PAGE_CAT_LIST: &str = "list";

/// Карточка записи (просмотр/редактирование)
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Служебный инструмент (пересчёт единиц и т.п.)
pub const PAGE_CAT_TOOL: &str = "tool";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_TOOL];

/// Проверка формата `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_material--list"));
        assert!(is_valid_page_id("a004_unit_conversion--tool"));
        assert!(!is_valid_page_id("a003_material"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a003_material--dashboard"));
    }
}
