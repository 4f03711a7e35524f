//! Заголовки и ключи вкладок.
//!
//! Для агрегатов заголовок списка берётся из `AggregateRoot::list_name`.

use contracts::domain::a001_unit::Unit;
use contracts::domain::a002_material_category::MaterialCategory;
use contracts::domain::a003_material::Material;
use contracts::domain::a005_purchase_requisition::PurchaseRequisition;
use contracts::domain::a006_purchase_order::PurchaseOrder;
use contracts::domain::a007_rfq::Rfq;
use contracts::domain::common::AggregateRoot;

/// Заголовок вкладки по ключу; пустая строка для неизвестных ключей.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_unit" => Unit::list_name(),
        "a002_material_category" => MaterialCategory::list_name(),
        "a003_material" => Material::list_name(),
        "a004_unit_conversion" => "Коэффициенты пересчёта",
        "a004_unit_conversion_convert" => "Пересчёт единиц",
        "a005_purchase_requisition" => PurchaseRequisition::list_name(),
        "a006_purchase_order" => PurchaseOrder::list_name(),
        "a007_rfq" => Rfq::list_name(),
        _ => "",
    }
}

/// Ключ детальной вкладки: `a001_unit_detail_<id>`, для новой записи `..._new`.
pub fn detail_tab_key<A: AggregateRoot>(id: Option<&str>) -> String {
    format!("{}{}", A::detail_key_prefix(), id.unwrap_or("new"))
}

/// Ключ вкладки нового документа на основании заявки: `..._detail_from_<id>`
pub fn derived_tab_key<A: AggregateRoot>(requisition_id: &str) -> String {
    format!("{}from_{}", A::detail_key_prefix(), requisition_id)
}

/// Заголовок детальной вкладки: «<элемент> · <идентификатор>».
pub fn detail_tab_label(entity_label: &'static str, identifier: &str) -> String {
    if identifier.is_empty() {
        format!("{} (новый)", entity_label)
    } else {
        format!("{} · {}", entity_label, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_labels_come_from_aggregates() {
        assert_eq!(tab_label_for_key("a003_material"), "Материалы");
        assert_eq!(tab_label_for_key("a007_rfq"), "Запросы КП");
        assert_eq!(tab_label_for_key("nope"), "");
    }

    #[test]
    fn test_detail_key_format() {
        assert_eq!(detail_tab_key::<Unit>(Some("42")), "a001_unit_detail_42");
        assert_eq!(
            detail_tab_key::<PurchaseOrder>(None),
            "a006_purchase_order_detail_new"
        );
        assert_eq!(derived_tab_key::<Rfq>("r1"), "a007_rfq_detail_from_r1");
    }

    #[test]
    fn test_detail_label() {
        assert_eq!(detail_tab_label("Материал", "M-01"), "Материал · M-01");
        assert_eq!(detail_tab_label("Материал", ""), "Материал (новый)");
    }
}
