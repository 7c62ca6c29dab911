//! Store summary CSV output
//!
//! Writes the per-store ingestion result (name, owner, computed balance) as
//! CSV. Summaries are written in the order provided; the repository layer
//! already yields stores sorted by name for deterministic output.

use std::io::Write;

use serde::Serialize;

use crate::core::services::StoreSummary;
use crate::types::CnabError;

#[derive(Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    owner_name: &'a str,
    balance: String,
}

/// Write store summaries to CSV with columns: name, owner_name, balance
///
/// # Errors
///
/// Returns [`CnabError::Io`] if writing fails.
pub fn write_store_summaries_csv(
    summaries: &[StoreSummary],
    output: &mut dyn Write,
) -> Result<(), CnabError> {
    let mut writer = csv::Writer::from_writer(output);

    for summary in summaries {
        writer
            .serialize(SummaryRow {
                name: &summary.name,
                owner_name: &summary.owner_name,
                // Two-decimal fixed point, matching the file format
                balance: format!("{:.2}", summary.balance),
            })
            .map_err(|e| CnabError::Io {
                message: e.to_string(),
            })?;
    }

    writer.flush().map_err(CnabError::from)
}
