//! Правила набора единиц одного материала
//!
//! Бэкенд владеет данными, но клиент проверяет каждое изменение заранее:
//! запрос, нарушающий правило, не отправляется.

use super::{is_valid_factor, AddMaterialUnitRequest, MaterialUnit, UnitRegistryError};

/// План добавления единицы: готовый запрос и (при замене базовой)
/// id единицы, которая перестаёт быть базовой
#[derive(Debug, Clone, PartialEq)]
pub struct AddUnitPlan {
    pub request: AddMaterialUnitRequest,
    pub supersedes: Option<String>,
}

/// Единицы, привязанные к одному материалу
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialUnitSet {
    material_id: String,
    units: Vec<MaterialUnit>,
}

impl MaterialUnitSet {
    pub fn new(material_id: impl Into<String>, units: Vec<MaterialUnit>) -> Self {
        Self {
            material_id: material_id.into(),
            units,
        }
    }

    pub fn material_id(&self) -> &str {
        &self.material_id
    }

    pub fn units(&self) -> &[MaterialUnit] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn find(&self, unit_id: &str) -> Option<&MaterialUnit> {
        self.units.iter().find(|u| u.unit_id == unit_id)
    }

    pub fn contains(&self, unit_id: &str) -> bool {
        self.find(unit_id).is_some()
    }

    pub fn base_unit(&self) -> Option<&MaterialUnit> {
        self.units.iter().find(|u| u.is_base_unit)
    }

    fn base_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_base_unit).count()
    }

    /// Для материала ещё не выбрана базовая единица
    pub fn needs_configuration(&self) -> bool {
        self.base_unit().is_none()
    }

    /// Проверка целостности набора (в том числе данных, пришедших с сервера)
    pub fn validate(&self) -> Result<(), UnitRegistryError> {
        if self.units.is_empty() {
            return Ok(());
        }
        match self.base_count() {
            0 => return Err(UnitRegistryError::NoBaseUnit),
            1 => {}
            count => return Err(UnitRegistryError::MultipleBaseUnits { count }),
        }
        if self.units.iter().any(|u| !is_valid_factor(u.factor())) {
            return Err(UnitRegistryError::InvalidFactor);
        }
        Ok(())
    }

    /// Подготовка запроса на добавление единицы.
    ///
    /// Первая единица материала обязана быть базовой. Новая базовая при
    /// существующей вытесняет её; `conversion_factor` тогда задаёт,
    /// сколько старых базовых единиц содержится в одной новой.
    pub fn plan_add(
        &self,
        unit_id: &str,
        is_base_unit: bool,
        conversion_factor: f64,
    ) -> Result<AddUnitPlan, UnitRegistryError> {
        if self.contains(unit_id) {
            return Err(UnitRegistryError::AlreadyBound {
                unit_id: unit_id.to_string(),
            });
        }
        let count = self.base_count();
        if count > 1 {
            return Err(UnitRegistryError::MultipleBaseUnits { count });
        }

        let current_base = self.base_unit().map(|u| u.unit_id.clone());
        let (factor, supersedes) = match (is_base_unit, current_base) {
            (true, None) => (1.0, None),
            (true, Some(old)) => {
                if !is_valid_factor(conversion_factor) {
                    return Err(UnitRegistryError::InvalidFactor);
                }
                (conversion_factor, Some(old))
            }
            (false, None) => return Err(UnitRegistryError::BaseUnitRequired),
            (false, Some(_)) => {
                if !is_valid_factor(conversion_factor) {
                    return Err(UnitRegistryError::InvalidFactor);
                }
                (conversion_factor, None)
            }
        };

        Ok(AddUnitPlan {
            request: AddMaterialUnitRequest {
                material_id: self.material_id.clone(),
                unit_id: unit_id.to_string(),
                is_base_unit,
                conversion_factor: factor,
                replace_base: supersedes.is_some(),
            },
            supersedes,
        })
    }

    /// Набор после выполнения плана (для предпросмотра и проверки)
    pub fn apply_add(&self, plan: &AddUnitPlan) -> MaterialUnitSet {
        let request = &plan.request;
        let mut units: Vec<MaterialUnit> = if plan.supersedes.is_some() {
            self.units
                .iter()
                .map(|u| MaterialUnit {
                    is_base_unit: false,
                    conversion_factor: u.factor() / request.conversion_factor,
                    ..u.clone()
                })
                .collect()
        } else {
            self.units.clone()
        };

        units.push(MaterialUnit::new(
            &request.material_id,
            &request.unit_id,
            request.is_base_unit,
            request.conversion_factor,
        ));

        MaterialUnitSet::new(self.material_id.clone(), units)
    }

    pub fn check_remove(&self, unit_id: &str) -> Result<(), UnitRegistryError> {
        match self.find(unit_id) {
            None => Err(UnitRegistryError::NotBound {
                unit_id: unit_id.to_string(),
            }),
            Some(u) if u.is_base_unit => Err(UnitRegistryError::CannotRemoveBaseUnit),
            Some(_) => Ok(()),
        }
    }

    /// `Ok(false)` - единица уже базовая, запрос не нужен
    pub fn check_set_base(&self, unit_id: &str) -> Result<bool, UnitRegistryError> {
        match self.find(unit_id) {
            None => Err(UnitRegistryError::NotBound {
                unit_id: unit_id.to_string(),
            }),
            Some(u) => Ok(!u.is_base_unit),
        }
    }

    /// Набор после переноса базовой единицы: каждый коэффициент делится
    /// на прежний коэффициент новой базовой
    pub fn rebase_preview(&self, new_base_id: &str) -> Result<MaterialUnitSet, UnitRegistryError> {
        let pivot = self
            .find(new_base_id)
            .ok_or_else(|| UnitRegistryError::NotBound {
                unit_id: new_base_id.to_string(),
            })?
            .factor();
        if !is_valid_factor(pivot) {
            return Err(UnitRegistryError::InvalidFactor);
        }

        let units = self
            .units
            .iter()
            .map(|u| {
                let is_base = u.unit_id == new_base_id;
                MaterialUnit {
                    is_base_unit: is_base,
                    conversion_factor: if is_base { 1.0 } else { u.factor() / pivot },
                    ..u.clone()
                }
            })
            .collect();

        Ok(MaterialUnitSet::new(self.material_id.clone(), units))
    }

    fn factor_of(&self, unit_id: &str) -> Result<f64, UnitRegistryError> {
        if self.needs_configuration() {
            return Err(UnitRegistryError::BaseUnitRequired);
        }
        self.find(unit_id)
            .map(MaterialUnit::factor)
            .ok_or_else(|| UnitRegistryError::NotBound {
                unit_id: unit_id.to_string(),
            })
    }

    /// Количество в базовых единицах материала
    pub fn to_base(&self, quantity: f64, unit_id: &str) -> Result<f64, UnitRegistryError> {
        Ok(quantity * self.factor_of(unit_id)?)
    }

    /// Пересчёт между двумя единицами материала: qty × f(from) / f(to)
    pub fn convert(&self, quantity: f64, from_unit_id: &str, to_unit_id: &str) -> Result<f64, UnitRegistryError> {
        let from = self.factor_of(from_unit_id)?;
        let to = self.factor_of(to_unit_id)?;
        if !is_valid_factor(to) {
            return Err(UnitRegistryError::InvalidFactor);
        }
        Ok(quantity * from / to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, base: bool, factor: f64) -> MaterialUnit {
        MaterialUnit::new("m1", id, base, factor)
    }

    fn sand() -> MaterialUnitSet {
        // песок: базовая - кг, тонна = 1000 кг, мешок = 50 кг
        MaterialUnitSet::new("m1", vec![unit("kg", true, 1.0), unit("t", false, 1000.0), unit("bag", false, 50.0)])
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_empty_set_needs_configuration() {
        let set = MaterialUnitSet::new("m1", vec![]);
        assert!(set.needs_configuration());
        assert!(set.validate().is_ok());
        assert!(!sand().needs_configuration());
    }

    #[test]
    fn test_first_unit_must_be_base() {
        let set = MaterialUnitSet::new("m1", vec![]);
        assert_eq!(set.plan_add("kg", false, 1.0), Err(UnitRegistryError::BaseUnitRequired));

        let plan = set.plan_add("kg", true, 7.0).unwrap();
        assert_eq!(plan.request.conversion_factor, 1.0);
        assert!(!plan.request.replace_base);
        assert!(plan.supersedes.is_none());
        assert!(set.apply_add(&plan).validate().is_ok());
    }

    #[test]
    fn test_adding_bound_unit_is_rejected() {
        let result = sand().plan_add("t", false, 1000.0);
        assert_eq!(result, Err(UnitRegistryError::AlreadyBound { unit_id: "t".into() }));
    }

    #[test]
    fn test_non_base_requires_positive_factor() {
        assert_eq!(sand().plan_add("box", false, 0.0), Err(UnitRegistryError::InvalidFactor));
        assert_eq!(sand().plan_add("box", false, -3.0), Err(UnitRegistryError::InvalidFactor));
        assert!(sand().plan_add("box", false, 12.0).is_ok());
    }

    #[test]
    fn test_new_base_replaces_existing_base() {
        let set = sand();
        // грамм как новая базовая: 1 г = 0.001 кг
        let plan = set.plan_add("g", true, 0.001).unwrap();
        assert_eq!(plan.supersedes.as_deref(), Some("kg"));
        assert!(plan.request.replace_base);

        let after = set.apply_add(&plan);
        assert!(after.validate().is_ok());
        assert_eq!(after.units().iter().filter(|u| u.is_base_unit).count(), 1);
        assert_eq!(after.base_unit().map(|u| u.unit_id.as_str()), Some("g"));
        assert_close(after.find("kg").unwrap().factor(), 1000.0);
        assert_close(after.find("t").unwrap().factor(), 1_000_000.0);
    }

    #[test]
    fn test_validate_rejects_two_bases() {
        let broken = MaterialUnitSet::new("m1", vec![unit("kg", true, 1.0), unit("t", true, 1.0)]);
        assert_eq!(broken.validate(), Err(UnitRegistryError::MultipleBaseUnits { count: 2 }));
        assert_eq!(
            broken.plan_add("g", false, 0.001),
            Err(UnitRegistryError::MultipleBaseUnits { count: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_units_without_base() {
        let broken = MaterialUnitSet::new("m1", vec![unit("t", false, 1000.0)]);
        assert_eq!(broken.validate(), Err(UnitRegistryError::NoBaseUnit));
    }

    #[test]
    fn test_base_unit_cannot_be_removed() {
        let set = sand();
        assert_eq!(set.check_remove("kg"), Err(UnitRegistryError::CannotRemoveBaseUnit));
        assert!(set.check_remove("bag").is_ok());
        assert_eq!(set.check_remove("box"), Err(UnitRegistryError::NotBound { unit_id: "box".into() }));
    }

    #[test]
    fn test_set_base_on_current_base_is_noop() {
        let set = sand();
        assert_eq!(set.check_set_base("kg"), Ok(false));
        assert_eq!(set.check_set_base("t"), Ok(true));
        assert!(set.check_set_base("box").is_err());
    }

    #[test]
    fn test_rebase_preview_keeps_new_base_at_one() {
        let preview = sand().rebase_preview("t").unwrap();
        assert!(preview.validate().is_ok());
        assert_eq!(preview.base_unit().map(|u| u.unit_id.as_str()), Some("t"));
        assert_close(preview.find("t").unwrap().factor(), 1.0);
        assert_close(preview.find("kg").unwrap().factor(), 0.001);
        assert_close(preview.find("bag").unwrap().factor(), 0.05);
    }

    #[test]
    fn test_convert_within_material() {
        let set = sand();
        assert_close(set.convert(2.0, "t", "kg").unwrap(), 2000.0);
        assert_close(set.convert(3.0, "t", "bag").unwrap(), 60.0);
        assert_close(set.to_base(4.0, "bag").unwrap(), 200.0);
        assert!(set.convert(1.0, "t", "box").is_err());
    }

    #[test]
    fn test_convert_without_configuration_fails() {
        let set = MaterialUnitSet::new("m1", vec![]);
        assert_eq!(set.to_base(1.0, "kg"), Err(UnitRegistryError::BaseUnitRequired));
    }
}
