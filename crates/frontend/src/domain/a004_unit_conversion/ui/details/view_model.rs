use crate::domain::{a001_unit, a004_unit_conversion::api};
use crate::shared::form_utils::{number_from_text, opt};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_plain;
use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::{
    validate_new_conversion, UnitConversion, UnitConversionDto,
};
use contracts::shared::{ApiError, ReferenceItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub fn unit_items(units: &[Unit]) -> Vec<ReferenceItem> {
    units
        .iter()
        .filter(|u| u.is_active())
        .map(|u| ReferenceItem {
            id: u.to_string_id(),
            code: u.base.code.clone(),
            name: u.display_label(),
        })
        .collect()
}

/// Проверка формы: поля, затем правила с учётом сохранённых коэффициентов
pub fn check(dto: &UnitConversionDto, existing: &[UnitConversion]) -> Result<(), ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    validate_new_conversion(dto, existing)?;
    Ok(())
}

#[derive(Clone, Copy)]
pub struct UnitConversionDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub from_unit_id: RwSignal<String>,
    pub to_unit_id: RwSignal<String>,
    pub factor: RwSignal<String>,
    pub note: RwSignal<String>,
    /// Загруженная запись (для предупреждения об использовании)
    pub original: RwSignal<Option<UnitConversion>>,

    pub units: RwSignal<Vec<Unit>>,
    pub existing: RwSignal<Vec<UnitConversion>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl UnitConversionDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            from_unit_id: RwSignal::new(String::new()),
            to_unit_id: RwSignal::new(String::new()),
            factor: RwSignal::new(String::new()),
            note: RwSignal::new(String::new()),
            original: RwSignal::new(None),
            units: RwSignal::new(Vec::new()),
            existing: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn unit_options(&self) -> Signal<Vec<ReferenceItem>> {
        let units = self.units;
        Signal::derive(move || units.with(|u| unit_items(u)))
    }

    pub fn edit_warning(&self) -> Signal<Option<String>> {
        let original = self.original;
        Signal::derive(move || original.with(|o| o.as_ref().and_then(UnitConversion::edit_warning)))
    }

    /// Справочник единиц и сохранённые коэффициенты (для проверки дублей)
    pub fn load_references(&self) {
        let units = self.units;
        let existing = self.existing;
        spawn_local(async move {
            match a001_unit::api::fetch_list().await {
                Ok(list) => {
                    let _ = units.try_set(list);
                }
                Err(e) => log::warn!("units not loaded: {}", e),
            }
            match api::fetch_list().await {
                Ok(list) => {
                    let _ = existing.try_set(list);
                }
                Err(e) => log::warn!("unit conversions not loaded: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(c) => this.fill(c),
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    pub fn to_dto(&self) -> UnitConversionDto {
        UnitConversionDto {
            id: self.id.get_untracked(),
            from_unit_id: self.from_unit_id.get_untracked(),
            to_unit_id: self.to_unit_id.get_untracked(),
            conversion_factor: number_from_text(&self.factor.get_untracked()),
            note: opt(self.note.get_untracked()),
        }
    }

    pub fn save(&self, on_saved: Callback<UnitConversion>) {
        if self.saving.get_untracked() {
            return;
        }
        let dto = self.to_dto();
        if let Err(e) = self.existing.with_untracked(|existing| check(&dto, existing)) {
            self.error.set(Some(e.to_string()));
            return;
        }

        let this = *self;
        let notifications = use_notifications();
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(c) => {
                    notifications.success("Коэффициент сохранён");
                    this.fill(c.clone());
                    on_saved.run(c);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    fn fill(&self, c: UnitConversion) {
        let _ = self.id.try_set(Some(c.to_string_id()));
        let _ = self.from_unit_id.try_set(c.from_unit_id.clone());
        let _ = self.to_unit_id.try_set(c.to_unit_id.clone());
        let _ = self.factor.try_set(format_plain(c.conversion_factor));
        let _ = self.note.try_set(c.note.clone().unwrap_or_default());
        let _ = self.original.try_set(Some(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::UnitConversionId;
    use contracts::domain::common::EntityMetadata;

    fn dto(from: &str, to: &str, factor: f64) -> UnitConversionDto {
        UnitConversionDto {
            id: None,
            from_unit_id: from.into(),
            to_unit_id: to.into(),
            conversion_factor: factor,
            note: None,
        }
    }

    #[test]
    fn test_check_rejects_reflexive_conversion() {
        let err = check(&dto("kg", "kg", 1.0), &[]).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_check_rejects_stored_pair() {
        let stored = UnitConversion {
            id: UnitConversionId::new_v4(),
            from_unit_id: "t".into(),
            to_unit_id: "kg".into(),
            conversion_factor: 1000.0,
            usage_count: 0,
            note: None,
            from_unit_code: None,
            to_unit_code: None,
            metadata: EntityMetadata::default(),
        };
        assert!(check(&dto("t", "kg", 1000.0), &[stored.clone()]).is_err());
        assert!(check(&dto("kg", "t", 0.001), &[stored]).is_ok());
    }

    #[test]
    fn test_check_rejects_unparsed_factor() {
        assert!(check(&dto("t", "kg", f64::NAN), &[]).is_err());
    }
}
