use thiserror::Error;

/// Нарушения правил единиц измерения, обнаруженные до отправки запроса
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitRegistryError {
    #[error("Единица уже привязана к материалу")]
    AlreadyBound { unit_id: String },

    #[error("Единица не привязана к материалу")]
    NotBound { unit_id: String },

    #[error("Для материала не настроены единицы: сначала добавьте базовую единицу")]
    BaseUnitRequired,

    #[error("У материала нет базовой единицы")]
    NoBaseUnit,

    #[error("У материала несколько базовых единиц ({count}), должна быть ровно одна")]
    MultipleBaseUnits { count: usize },

    #[error("Нельзя удалить базовую единицу материала")]
    CannotRemoveBaseUnit,

    #[error("Коэффициент пересчёта должен быть числом больше нуля")]
    InvalidFactor,

    #[error("Единицы «из» и «в» должны различаться")]
    SameUnit,

    #[error("Коэффициент для этой пары единиц уже существует")]
    DuplicatePair,

    #[error("Не найден путь пересчёта между единицами")]
    NoConversionPath { from: String, to: String },
}
