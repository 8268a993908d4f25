use crate::errors::BudgetError;
use crate::models::budget::BudgetItem;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

pub const SLIDER_STEP: i64 = 10;
pub const SLIDER_FLOOR_MAX: i64 = 2000;

#[derive(Debug, Clone, Copy)]
pub struct ItemEditor<'a> {
    item: &'a BudgetItem,
}

impl<'a> ItemEditor<'a> {
    pub fn new(item: &'a BudgetItem) -> Self {
        Self { item }
    }

    pub fn value(&self) -> Decimal {
        self.item.amount()
    }

    pub fn disabled(&self) -> bool {
        self.item.is_fixed
    }

    pub fn max(&self) -> Decimal {
        slider_max(self.item.planned_amount)
    }

    pub fn fraction(&self) -> f64 {
        let max = self.max();
        if max <= Decimal::ZERO {
            return 0.0;
        }
        let ratio = (self.value() / max).min(Decimal::ONE).max(Decimal::ZERO);
        ratio.to_f64().unwrap_or(0.0)
    }

    pub fn request(&self, raw: Decimal) -> Option<Decimal> {
        if self.disabled() {
            return None;
        }
        let clamped = raw.max(Decimal::ZERO).min(self.max());
        Some(quantize(clamped, Decimal::from(SLIDER_STEP)))
    }

    pub fn nudge(&self, steps: i64) -> Option<Decimal> {
        self.request(self.value() + Decimal::from(steps * SLIDER_STEP))
    }

    /// Typed amounts are snapped and clamped like slider moves.
    pub fn parse_entry(&self, input: &str) -> Result<Option<Decimal>, BudgetError> {
        let amount = Decimal::from_str(input.trim()).map_err(|_| {
            BudgetError::ValidationFailed(format!("'{}' is not a valid amount", input.trim()))
        })?;
        if amount < Decimal::ZERO {
            return Err(BudgetError::ValidationFailed("Amount cannot be negative".to_string()));
        }
        Ok(self.request(amount))
    }
}

pub fn slider_max(planned: Decimal) -> Decimal {
    (planned * Decimal::TWO).max(Decimal::from(SLIDER_FLOOR_MAX))
}

pub fn quantize(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).floor() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(planned: i64, actual: i64) -> BudgetItem {
        let mut item = BudgetItem::new("i".to_string(), "Fuel".to_string(), Decimal::from(actual), false);
        item.planned_amount = Decimal::from(planned);
        item
    }

    fn fixed(amount: i64) -> BudgetItem {
        BudgetItem::new("r".to_string(), "Rent".to_string(), Decimal::from(amount), true)
    }

    #[test]
    fn test_quantize_snaps_down() {
        let step = Decimal::from(10);
        assert_eq!(quantize(Decimal::from(137), step), Decimal::from(130));
        assert_eq!(quantize(Decimal::from(135), step), Decimal::from(130));
        assert_eq!(quantize(Decimal::from(130), step), Decimal::from(130));
        assert_eq!(quantize(Decimal::new(95, 1), step), Decimal::ZERO);
    }

    #[test]
    fn test_slider_max_has_floor() {
        assert_eq!(slider_max(Decimal::from(150)), Decimal::from(2000));
        assert_eq!(slider_max(Decimal::from(1500)), Decimal::from(3000));
    }

    #[test]
    fn test_request_quantizes_and_clamps() {
        let item = variable(200, 150);
        let editor = ItemEditor::new(&item);
        assert_eq!(editor.request(Decimal::from(137)), Some(Decimal::from(130)));
        assert_eq!(editor.request(Decimal::from(-40)), Some(Decimal::ZERO));
        assert_eq!(editor.request(Decimal::from(9999)), Some(Decimal::from(2000)));
    }

    #[test]
    fn test_fixed_item_never_requests() {
        let item = fixed(1500);
        let editor = ItemEditor::new(&item);
        assert!(editor.disabled());
        assert_eq!(editor.request(Decimal::from(1200)), None);
        assert_eq!(editor.nudge(1), None);
        assert_eq!(editor.parse_entry("100").unwrap(), None);
    }

    #[test]
    fn test_nudge_moves_by_step() {
        let item = variable(200, 150);
        let editor = ItemEditor::new(&item);
        assert_eq!(editor.nudge(1), Some(Decimal::from(160)));
        assert_eq!(editor.nudge(-2), Some(Decimal::from(130)));
        assert_eq!(editor.nudge(-100), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_entry_validation() {
        let item = variable(200, 150);
        let editor = ItemEditor::new(&item);
        assert_eq!(editor.parse_entry(" 175.50 ").unwrap(), Some(Decimal::from(170)));

        let err = editor.parse_entry("abc").unwrap_err();
        assert!(matches!(err, BudgetError::ValidationFailed(_)));

        let err = editor.parse_entry("-5").unwrap_err();
        assert_eq!(err, BudgetError::ValidationFailed("Amount cannot be negative".to_string()));
    }

    #[test]
    fn test_parse_entry_snaps_and_clamps() {
        let item = variable(150, 150);
        let editor = ItemEditor::new(&item);
        assert_eq!(editor.parse_entry("137").unwrap(), Some(Decimal::from(130)));
        assert_eq!(editor.parse_entry("999999").unwrap(), Some(Decimal::from(2000)));
        assert_eq!(editor.parse_entry("0").unwrap(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_fraction() {
        let item = variable(200, 500);
        let editor = ItemEditor::new(&item);
        assert!((editor.fraction() - 0.25).abs() < 1e-9);
    }
}
