//! Conversions between the wire schemas and the planner's domain types.

use api_types::budget::{BudgetLineKind, BudgetSave, BudgetSaveItem, BudgetSection, BudgetYear};
use engine::{LineItem, LineKind, Money, RemoteId, SaveLine};

use crate::ClientError;

pub fn line_kind(kind: BudgetLineKind) -> LineKind {
    match kind {
        BudgetLineKind::Income => LineKind::Income,
        BudgetLineKind::Expense => LineKind::Expense,
    }
}

pub fn wire_kind(kind: LineKind) -> BudgetLineKind {
    match kind {
        LineKind::Income => BudgetLineKind::Income,
        LineKind::Expense => BudgetLineKind::Expense,
    }
}

/// Flattens the categorized sections of a budget into persisted lines:
/// income first, then expense, in server order.
pub fn lines_from_budget(budget: &BudgetYear) -> Result<Vec<LineItem>, ClientError> {
    let mut lines = Vec::new();
    push_section(&mut lines, LineKind::Income, &budget.income)?;
    push_section(&mut lines, LineKind::Expense, &budget.expense)?;
    Ok(lines)
}

fn push_section(
    lines: &mut Vec<LineItem>,
    kind: LineKind,
    section: &BudgetSection,
) -> Result<(), ClientError> {
    for group in &section.categories {
        for entry in &group.items {
            let amount = Money::from_major(entry.amount)
                .map_err(|err| ClientError::Decode(format!("line {}: {err}", entry.id)))?;
            if amount.is_negative() {
                return Err(ClientError::Decode(format!(
                    "line {}: negative amount",
                    entry.id
                )));
            }
            lines.push(LineItem::persisted(
                RemoteId(entry.id),
                kind,
                group.category.as_str(),
                entry.item.as_str(),
                amount,
            ));
        }
    }
    Ok(())
}

pub fn save_payload(year: i32, lines: &[SaveLine]) -> BudgetSave {
    BudgetSave {
        year,
        items: lines
            .iter()
            .map(|line| BudgetSaveItem {
                kind: wire_kind(line.kind),
                category: line.category.clone(),
                item: line.label.clone(),
                amount: line.amount.to_major(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use api_types::budget::{BudgetSummary, CategoryEntry, CategoryGroup};

    use super::*;

    fn budget(income_amount: f64) -> BudgetYear {
        BudgetYear {
            year: 2025,
            items: Vec::new(),
            income: BudgetSection {
                categories: vec![CategoryGroup {
                    category: "A. Temel ve Düzenli Gelirler".to_string(),
                    items: vec![
                        CategoryEntry {
                            id: 7,
                            item: "Üyelik Aidatları (Yıllık)".to_string(),
                            amount: income_amount,
                        },
                        CategoryEntry {
                            id: 8,
                            item: "Düzenli Bağışlar".to_string(),
                            amount: 250.5,
                        },
                    ],
                }],
                total: income_amount + 250.5,
            },
            expense: BudgetSection {
                categories: vec![CategoryGroup {
                    category: "1. Personel Giderleri".to_string(),
                    items: vec![CategoryEntry {
                        id: 9,
                        item: "Maaş ve Ücretler".to_string(),
                        amount: 400.0,
                    }],
                }],
                total: 400.0,
            },
            summary: BudgetSummary::default(),
        }
    }

    #[test]
    fn flattens_categories_with_remote_ids() {
        let lines = lines_from_budget(&budget(1000.0)).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].remote_id(), Some(RemoteId(7)));
        assert_eq!(lines[0].category, "A. Temel ve Düzenli Gelirler");
        assert_eq!(lines[0].amount, Money::new(100_000));
        assert_eq!(lines[1].amount, Money::new(25_050));
        assert_eq!(lines[2].kind, LineKind::Expense);
        assert_eq!(lines[2].label, "Maaş ve Ücretler");
    }

    #[test]
    fn rejects_negative_wire_amount() {
        assert!(matches!(
            lines_from_budget(&budget(-1.0)),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn save_payload_renames_label_to_item() {
        let lines = vec![SaveLine {
            kind: LineKind::Expense,
            category: "1. Personel Giderleri".to_string(),
            label: "Maaş ve Ücretler".to_string(),
            amount: Money::new(40_000),
        }];
        let payload = save_payload(2025, &lines);
        assert_eq!(payload.year, 2025);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].kind, BudgetLineKind::Expense);
        assert_eq!(payload.items[0].item, "Maaş ve Ücretler");
        assert_eq!(payload.items[0].amount, 400.0);
    }
}
