//! Ключ вкладки → View. Все ключи вкладок собраны здесь.

use crate::domain::a001_unit::ui::details::UnitDetails;
use crate::domain::a001_unit::ui::list::UnitList;
use crate::domain::a002_material_category::ui::details::MaterialCategoryDetails;
use crate::domain::a002_material_category::ui::list::MaterialCategoryList;
use crate::domain::a003_material::ui::details::MaterialDetails;
use crate::domain::a003_material::ui::list::MaterialList;
use crate::domain::a004_unit_conversion::ui::convert::UnitConverter;
use crate::domain::a004_unit_conversion::ui::details::UnitConversionDetails;
use crate::domain::a004_unit_conversion::ui::list::UnitConversionList;
use crate::domain::a005_purchase_requisition::ui::details::PurchaseRequisitionDetails;
use crate::domain::a005_purchase_requisition::ui::list::PurchaseRequisitionList;
use crate::domain::a006_purchase_order::ui::details::PurchaseOrderDetails;
use crate::domain::a006_purchase_order::ui::list::PurchaseOrderList;
use crate::domain::a007_rfq::ui::details::RfqDetails;
use crate::domain::a007_rfq::ui::list::RfqList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

/// Что открыть в детальной вкладке
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTarget {
    New,
    Existing(String),
    /// Новый документ, заполненный по заявке
    FromRequisition(String),
}

impl DetailTarget {
    pub fn id(&self) -> Option<String> {
        match self {
            DetailTarget::Existing(id) => Some(id.clone()),
            _ => None,
        }
    }

    pub fn requisition_id(&self) -> Option<String> {
        match self {
            DetailTarget::FromRequisition(id) => Some(id.clone()),
            _ => None,
        }
    }
}

/// Разбор ключа `<prefix><id>`, `<prefix>new` или `<prefix>from_<id>`
pub fn parse_detail_key(key: &str, prefix: &str) -> Option<DetailTarget> {
    let rest = key.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    if rest == "new" {
        return Some(DetailTarget::New);
    }
    match rest.strip_prefix("from_") {
        Some("") => None,
        Some(req_id) => Some(DetailTarget::FromRequisition(req_id.to_string())),
        None => Some(DetailTarget::Existing(rest.to_string())),
    }
}

/// Контент вкладки по ключу; для неизвестных ключей - заглушка.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| {
        tabs_store.close_tab(&key_for_close);
    });

    let detail = |prefix: &str| parse_detail_key(key, prefix);

    match key {
        // Справочники
        "a001_unit" => view! { <UnitList /> }.into_any(),
        "a002_material_category" => view! { <MaterialCategoryList /> }.into_any(),
        "a003_material" => view! { <MaterialList /> }.into_any(),
        "a004_unit_conversion" => view! { <UnitConversionList /> }.into_any(),
        "a004_unit_conversion_convert" => view! { <UnitConverter /> }.into_any(),

        // Документы
        "a005_purchase_requisition" => view! { <PurchaseRequisitionList /> }.into_any(),
        "a006_purchase_order" => view! { <PurchaseOrderList /> }.into_any(),
        "a007_rfq" => view! { <RfqList /> }.into_any(),

        _ => {
            if let Some(target) = detail("a001_unit_detail_") {
                view! { <UnitDetails id=target.id() on_close=on_close /> }.into_any()
            } else if let Some(target) = detail("a002_material_category_detail_") {
                view! { <MaterialCategoryDetails id=target.id() on_close=on_close /> }.into_any()
            } else if let Some(target) = detail("a003_material_detail_") {
                view! { <MaterialDetails id=target.id() on_close=on_close /> }.into_any()
            } else if let Some(target) = detail("a004_unit_conversion_detail_") {
                view! { <UnitConversionDetails id=target.id() on_close=on_close /> }.into_any()
            } else if let Some(target) = detail("a005_purchase_requisition_detail_") {
                view! { <PurchaseRequisitionDetails id=target.id() on_close=on_close /> }.into_any()
            } else if let Some(target) = detail("a006_purchase_order_detail_") {
                view! {
                    <PurchaseOrderDetails
                        id=target.id()
                        from_requisition=target.requisition_id()
                        on_close=on_close
                    />
                }
                .into_any()
            } else if let Some(target) = detail("a007_rfq_detail_") {
                view! {
                    <RfqDetails
                        id=target.id()
                        from_requisition=target.requisition_id()
                        on_close=on_close
                    />
                }
                .into_any()
            } else {
                log!("Unknown tab key: {}", key);
                view! { <div class="placeholder">"Раздел не найден"</div> }.into_any()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_existing_and_new() {
        assert_eq!(
            parse_detail_key("a001_unit_detail_abc", "a001_unit_detail_"),
            Some(DetailTarget::Existing("abc".into()))
        );
        assert_eq!(
            parse_detail_key("a001_unit_detail_new", "a001_unit_detail_"),
            Some(DetailTarget::New)
        );
    }

    #[test]
    fn test_parse_from_requisition() {
        let target = parse_detail_key("a007_rfq_detail_from_r1", "a007_rfq_detail_");
        assert_eq!(target, Some(DetailTarget::FromRequisition("r1".into())));
        assert_eq!(target.and_then(|t| t.id()), None);
    }

    #[test]
    fn test_parse_rejects_foreign_or_empty_keys() {
        assert_eq!(parse_detail_key("a001_unit", "a001_unit_detail_"), None);
        assert_eq!(parse_detail_key("a001_unit_detail_", "a001_unit_detail_"), None);
        assert_eq!(parse_detail_key("a007_rfq_detail_from_", "a007_rfq_detail_"), None);
    }
}
