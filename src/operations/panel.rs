use crate::models::budget::{BudgetCategory, BudgetItem};
use crate::operations::editor::ItemEditor;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy)]
pub struct CategoryPanel<'a> {
    category: &'a BudgetCategory,
}

pub struct ItemLine<'a> {
    pub item: &'a BudgetItem,
    pub editor: ItemEditor<'a>,
}

impl ItemLine<'_> {
    pub fn shows_planned(&self) -> bool {
        self.item.planned_amount != self.item.actual_amount
    }

    pub fn status_label(&self) -> &'static str {
        if self.item.is_fixed { "Fixed" } else { "Variable" }
    }
}

impl<'a> CategoryPanel<'a> {
    pub fn new(category: &'a BudgetCategory) -> Self {
        Self { category }
    }

    pub fn name(&self) -> &'a str {
        &self.category.name
    }

    pub fn lines(self) -> impl Iterator<Item = ItemLine<'a>> + 'a {
        self.category.items.iter().map(|item| ItemLine {
            item,
            editor: ItemEditor::new(item),
        })
    }

    pub fn planned_subtotal(&self) -> Decimal {
        self.sum(|item| item.planned_amount)
    }

    pub fn actual_subtotal(&self) -> Decimal {
        self.sum(|item| item.amount())
    }

    pub fn fixed_subtotal(&self) -> Decimal {
        self.sum(|item| if item.is_fixed { item.amount() } else { Decimal::ZERO })
    }

    pub fn variable_subtotal(&self) -> Decimal {
        self.sum(|item| if item.is_fixed { Decimal::ZERO } else { item.amount() })
    }

    pub fn shows_planned(&self) -> bool {
        self.lines().any(|line| line.shows_planned())
    }

    fn sum(&self, value: impl Fn(&BudgetItem) -> Decimal) -> Decimal {
        self.category
            .items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + value(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing() -> BudgetCategory {
        let mut utilities = BudgetItem::new("u".to_string(), "Utilities".to_string(), Decimal::from(200), false);
        utilities.planned_amount = Decimal::from(250);
        BudgetCategory::new(
            "h".to_string(),
            "Housing & Utilities".to_string(),
            vec![
                BudgetItem::new("r".to_string(), "Rent/Mortgage".to_string(), Decimal::from(1500), true),
                utilities,
            ],
        )
    }

    #[test]
    fn test_subtotals() {
        let category = housing();
        let panel = CategoryPanel::new(&category);
        assert_eq!(panel.actual_subtotal(), Decimal::from(1700));
        assert_eq!(panel.planned_subtotal(), Decimal::from(1750));
        assert_eq!(panel.fixed_subtotal(), Decimal::from(1500));
        assert_eq!(panel.variable_subtotal(), Decimal::from(200));
    }

    #[test]
    fn test_lines_follow_item_order() {
        let category = housing();
        let panel = CategoryPanel::new(&category);
        let lines: Vec<ItemLine> = panel.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item.name, "Rent/Mortgage");
        assert_eq!(lines[0].status_label(), "Fixed");
        assert!(lines[0].editor.disabled());
        assert!(!lines[0].shows_planned());
        assert!(lines[1].shows_planned());
        assert!(panel.shows_planned());
    }

    #[test]
    fn test_empty_category() {
        let category = BudgetCategory::new("e".to_string(), "Empty".to_string(), vec![]);
        let panel = CategoryPanel::new(&category);
        assert_eq!(panel.actual_subtotal(), Decimal::ZERO);
        assert_eq!(panel.lines().count(), 0);
    }
}
