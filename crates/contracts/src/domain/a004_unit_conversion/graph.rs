//! Граф пересчёта между глобальными единицами
//!
//! Рёбра: прямые коэффициенты `UnitConversion`, обратные к ним (1/f) и
//! объявления единиц "кратна базовой". Путь ищется обходом в ширину,
//! поэтому прямой коэффициент всегда предпочтительнее цепочки.

use super::{is_valid_factor, UnitConversion, UnitRegistryError};
use crate::domain::a001_unit::Unit;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct ConversionGraph {
    edges: HashMap<String, Vec<(String, f64)>>,
}

impl ConversionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conversions(conversions: &[UnitConversion]) -> Self {
        let mut graph = Self::new();
        for c in conversions {
            graph.add_conversion(&c.from_unit_id, &c.to_unit_id, c.conversion_factor);
        }
        graph
    }

    /// Добавить объявления единиц: 1 unit = conversion_rate × base_unit
    pub fn with_units(mut self, units: &[Unit]) -> Self {
        for unit in units {
            if let (Some(base), Some(rate)) = (unit.base_unit_id.as_deref(), unit.conversion_rate) {
                self.add_conversion(&unit.to_string_id(), base, rate);
            }
        }
        self
    }

    /// Ребро from -> to и обратное к нему. Некорректные коэффициенты
    /// и петли пропускаются.
    pub fn add_conversion(&mut self, from: &str, to: &str, factor: f64) {
        if from == to || !is_valid_factor(factor) {
            return;
        }
        self.edges
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), factor));
        self.edges
            .entry(to.to_string())
            .or_default()
            .push((from.to_string(), 1.0 / factor));
    }

    /// Множитель: 1 from = factor × to
    pub fn factor(&self, from: &str, to: &str) -> Result<f64, UnitRegistryError> {
        if from == to {
            return Ok(1.0);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, f64)> = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 1.0));

        while let Some((node, acc)) = queue.pop_front() {
            let Some(next) = self.edges.get(node) else {
                continue;
            };
            for (target, f) in next {
                if !visited.insert(target.as_str()) {
                    continue;
                }
                let product = acc * f;
                if target == to {
                    return Ok(product);
                }
                queue.push_back((target.as_str(), product));
            }
        }

        Err(UnitRegistryError::NoConversionPath {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn convert(&self, quantity: f64, from: &str, to: &str) -> Result<f64, UnitRegistryError> {
        Ok(quantity * self.factor(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    fn sample() -> ConversionGraph {
        let mut g = ConversionGraph::new();
        g.add_conversion("t", "kg", 1000.0);
        g.add_conversion("kg", "g", 1000.0);
        g.add_conversion("box", "pc", 12.0);
        g
    }

    #[test]
    fn test_identical_units_return_quantity() {
        assert_eq!(sample().convert(5.0, "kg", "kg"), Ok(5.0));
        assert_eq!(ConversionGraph::new().convert(2.5, "x", "x"), Ok(2.5));
    }

    #[test]
    fn test_direct_and_inverse_edges() {
        let g = sample();
        assert_close(g.convert(2.0, "t", "kg").unwrap(), 2000.0);
        assert_close(g.convert(500.0, "kg", "t").unwrap(), 0.5);
    }

    #[test]
    fn test_multi_hop_path() {
        let g = sample();
        assert_close(g.convert(1.0, "t", "g").unwrap(), 1_000_000.0);
        assert_close(g.convert(3000.0, "g", "kg").unwrap(), 3.0);
    }

    #[test]
    fn test_missing_path_is_reported() {
        let result = sample().convert(1.0, "kg", "pc");
        assert_eq!(
            result,
            Err(UnitRegistryError::NoConversionPath { from: "kg".into(), to: "pc".into() })
        );
    }

    #[test]
    fn test_unit_declarations_become_edges() {
        let kg = Unit::new_for_insert("KG".into(), "Килограмм".into(), "кг".into(), None, None);
        let t = Unit::new_for_insert(
            "T".into(),
            "Тонна".into(),
            "т".into(),
            Some(kg.to_string_id()),
            Some(1000.0),
        );
        let g = ConversionGraph::new().with_units(&[kg.clone(), t.clone()]);
        assert_close(g.convert(1500.0, &kg.to_string_id(), &t.to_string_id()).unwrap(), 1.5);
    }

    #[test]
    fn test_invalid_factors_are_ignored() {
        let mut g = ConversionGraph::new();
        g.add_conversion("a", "b", 0.0);
        g.add_conversion("a", "a", 2.0);
        assert!(g.factor("a", "b").is_err());
    }
}
