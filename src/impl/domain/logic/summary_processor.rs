use std::collections::HashMap;

use crate::entities::{
    Category, CategoryTotal, SpendingSummary, Transaction, UNCATEGORIZED_COLOR,
};

pub(crate) struct SummaryProcessor<'a> {
    transactions: &'a [&'a Transaction],
    categories: &'a [Category],
}

impl<'a> SummaryProcessor<'a> {
    pub(crate) fn new(transactions: &'a [&'a Transaction], categories: &'a [Category]) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    pub(crate) fn process(self) -> SpendingSummary {
        let total_spent = self.transactions.iter().map(|t| t.amount).sum();

        let sums: HashMap<&str, f64> =
            self.transactions
                .iter()
                .fold(HashMap::new(), |mut map, t| {
                    *map.entry(t.category.as_str()).or_default() += t.amount;
                    map
                });

        let mut by_category: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(name, value)| CategoryTotal {
                name: name.to_string(),
                value,
                color: self.color_of(name),
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.name.cmp(&b.name))
        });

        SpendingSummary {
            total_spent,
            by_category,
        }
    }

    /// Categories are matched by name; unknown names get the neutral color.
    fn color_of(&self, name: &str) -> String {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map_or(UNCATEGORIZED_COLOR, |c| c.color.as_str())
            .to_string()
    }
}

/// Newest calendar day first; same-day entries by creation time, newest first.
pub(crate) fn sort_for_listing(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::default_categories;

    fn tx(amount: f64, category: &str, date: &str, created_at: i64) -> Transaction {
        Transaction {
            id: format!("{category}-{created_at}"),
            amount,
            category: category.to_string(),
            description: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            created_at,
        }
    }

    #[test]
    fn test_breakdown_sorted_by_value() {
        let txs = vec![
            tx(100.0, "Shopping", "2024-05-01", 1),
            tx(250.0, "Food & Dining", "2024-05-01", 2),
            tx(50.0, "Shopping", "2024-05-02", 3),
            tx(20.0, "Deleted Category", "2024-05-02", 4),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();
        let categories = default_categories();
        let summary = SummaryProcessor::new(&refs, &categories).process();

        assert_eq!(summary.total_spent, 420.0);
        let names: Vec<&str> = summary.by_category.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food & Dining", "Shopping", "Deleted Category"]);
        assert_eq!(summary.by_category[1].value, 150.0);
        assert_eq!(summary.by_category[0].color, "#f87171");
        assert_eq!(summary.by_category[2].color, UNCATEGORIZED_COLOR);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SummaryProcessor::new(&[], &[]).process();
        assert_eq!(summary.total_spent, 0.0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_listing_order() {
        let mut txs = vec![
            tx(1.0, "a", "2024-05-01", 10),
            tx(1.0, "b", "2024-05-03", 5),
            tx(1.0, "c", "2024-05-01", 20),
        ];
        sort_for_listing(&mut txs);
        let order: Vec<&str> = txs.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }
}
