#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total_spent: f64,
    /// Sorted by value, largest first.
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactBalance {
    pub contact_id: String,
    /// Positive: the contact owes us. Negative: we owe the contact.
    pub net: f64,
}
