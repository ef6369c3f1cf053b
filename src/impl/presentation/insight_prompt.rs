use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::warn;

use crate::entities::Transaction;

/// Shown when the insight generator is unavailable.
pub const INSIGHT_FALLBACK: &str =
    "Could not generate insights at this time. Keep tracking your expenses!";

/// External text generator (ex. a hosted language model). The ledger never
/// depends on it succeeding.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ServerError>;
}

pub fn build_insight_prompt(transactions: &[Transaction]) -> String {
    let summary = transactions
        .iter()
        .map(|t| {
            format!(
                "{}: {} in {} ({})",
                t.date.format("%Y-%m-%d"),
                t.amount,
                t.category,
                t.description.as_deref().unwrap_or("no description"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Analyze these user transactions and provide 3 brief, actionable financial insights or \
         observations.\nKeep it encouraging and professional. Max 100 words total.\n\n\
         Transactions:\n{}",
        if summary.is_empty() {
            "No transactions yet."
        } else {
            summary.as_str()
        }
    )
}

pub async fn insights_or_fallback<G>(generator: &G, transactions: &[Transaction]) -> String
where
    G: InsightGenerator + ?Sized,
{
    match generator
        .generate(&build_insight_prompt(transactions))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(error = ?e, "insight generation failed");
            INSIGHT_FALLBACK.to_string()
        }
    }
}
