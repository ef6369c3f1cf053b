use std::collections::{HashMap, HashSet};

use crate::entities::{Contact, ContactBalance, DebtEntry};

/// Read-only view deriving balances from the contact and debt collections.
/// Net balance per contact is never stored.
pub struct DebtLedger<'a> {
    contacts: &'a [Contact],
    debts: &'a [DebtEntry],
}

impl<'a> DebtLedger<'a> {
    pub fn new(contacts: &'a [Contact], debts: &'a [DebtEntry]) -> Self {
        Self { contacts, debts }
    }

    /// Sum of `lent` minus sum of `borrow` for the given contact.
    pub fn net_balance(&self, contact_id: &str) -> f64 {
        self.debts
            .iter()
            .filter(|d| d.contact_id == contact_id)
            .map(DebtEntry::signed_amount)
            .sum()
    }

    /// One entry per known contact, in contact order.
    pub fn balances(&self) -> Vec<ContactBalance> {
        let sums: HashMap<&str, f64> = self.debts.iter().fold(HashMap::new(), |mut map, d| {
            *map.entry(d.contact_id.as_str()).or_default() += d.signed_amount();
            map
        });
        self.contacts
            .iter()
            .map(|c| ContactBalance {
                contact_id: c.id.clone(),
                net: sums.get(c.id.as_str()).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Net position across every entry, orphaned ones included.
    pub fn total_balance(&self) -> f64 {
        self.debts.iter().map(DebtEntry::signed_amount).sum()
    }

    /// Entries for one contact, most recently created first.
    pub fn entries_for(&self, contact_id: &str) -> Vec<&'a DebtEntry> {
        let mut entries: Vec<&DebtEntry> = self
            .debts
            .iter()
            .filter(|d| d.contact_id == contact_id)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    /// Entries whose contact no longer exists.
    pub fn orphaned(&self) -> Vec<&'a DebtEntry> {
        let known: HashSet<&str> = self.contacts.iter().map(|c| c.id.as_str()).collect();
        self.debts
            .iter()
            .filter(|d| !known.contains(d.contact_id.as_str()))
            .collect()
    }
}
