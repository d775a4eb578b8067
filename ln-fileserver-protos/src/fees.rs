// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Fee arithmetic shared by server and client.
//!
//! Both sides of a conversation must quote the exact same amounts, so the
//! formulas live here next to the wire types instead of being duplicated.
//! All arithmetic is integer-only with division truncating toward zero:
//! partial kilobytes and partial hours are not billed.

use crate::types::FeeReport;

/// The smallest invoice the payment network accepts, in millisatoshis.
pub const INVOICE_QUANTUM_MSAT: i64 = 1000;

/// Sentinel replacing the payment request whenever the computed cost is
/// exactly zero. Clients skip the payment step for such quotes.
pub const FREE_INVOICE: &str = "free";

/// Storage cost of a single uploaded chunk held for `store_duration_secs`.
pub fn chunk_storage_cost(fees: &FeeReport, chunk_bytes: i64, store_duration_secs: i64) -> i64 {
	fees.msat_per_kb_per_hour * (chunk_bytes / 1024) * (store_duration_secs / 3600)
}

/// Bandwidth cost of a single downloaded chunk.
pub fn chunk_download_cost(fees: &FeeReport, chunk_bytes: i64) -> i64 {
	fees.msat_per_kb_downloaded * (chunk_bytes / 1024)
}

/// End-to-end estimate for uploading `file_bytes` stored for
/// `store_duration_secs`, including the base fee.
pub fn estimate_upload(fees: &FeeReport, file_bytes: i64, store_duration_secs: i64) -> i64 {
	fees.msat_base_cost
		+ fees.msat_per_kb_per_hour * (file_bytes / 1024) * (store_duration_secs / 3600)
}

/// Rounds a computed cost up to the invoice quantum. Zero stays zero: "free"
/// is a distinct outcome from "minimum".
pub fn quantize_invoice_msat(msat: i64) -> i64 {
	if msat == 0 {
		0
	} else {
		msat.max(INVOICE_QUANTUM_MSAT)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fee_report(base: i64, per_kb_per_hour: i64, per_kb_downloaded: i64) -> FeeReport {
		FeeReport {
			msat_base_cost: base,
			msat_per_kb_per_hour: per_kb_per_hour,
			msat_per_kb_downloaded: per_kb_downloaded,
		}
	}

	#[test]
	fn storage_cost_truncates_partial_units() {
		let fees = fee_report(0, 7, 0);

		// Partial kilobytes cost nothing.
		assert_eq!(chunk_storage_cost(&fees, 1023, 7200), 0);
		// Partial hours cost nothing.
		assert_eq!(chunk_storage_cost(&fees, 4096, 3599), 0);
		// Both divisions truncate independently.
		assert_eq!(chunk_storage_cost(&fees, 2560, 5400), 7 * 2 * 1);
	}

	#[test]
	fn download_cost_truncates_partial_kilobytes() {
		let fees = fee_report(0, 0, 3);

		assert_eq!(chunk_download_cost(&fees, 1023), 0);
		assert_eq!(chunk_download_cost(&fees, 1024), 3);
		assert_eq!(chunk_download_cost(&fees, 1024 * 1024), 3 * 1024);
	}

	#[test]
	fn upload_estimate_includes_base_cost() {
		let fees = fee_report(1000, 1, 1);

		// A 5 MiB file stored for one hour.
		let five_mib = 5 * 1024 * 1024;
		assert_eq!(estimate_upload(&fees, five_mib, 3600), 1000 + 5 * 1024);
		// Below a full kilobyte only the base fee remains.
		assert_eq!(estimate_upload(&fees, 512, 3600), 1000);
	}

	#[test]
	fn per_chunk_costs_sum_to_the_estimate() {
		let fees = fee_report(1000, 1, 1);

		// Five 1 MiB chunks stored for an hour, as a chunked client sends them.
		let per_chunk = chunk_storage_cost(&fees, 1024 * 1024, 3600);
		assert_eq!(per_chunk, 1024);
		assert_eq!(
			fees.msat_base_cost + 5 * per_chunk,
			estimate_upload(&fees, 5 * 1024 * 1024, 3600)
		);
	}

	#[test]
	fn quantize_clamps_up_but_keeps_zero_free() {
		assert_eq!(quantize_invoice_msat(0), 0);
		assert_eq!(quantize_invoice_msat(1), 1000);
		assert_eq!(quantize_invoice_msat(999), 1000);
		assert_eq!(quantize_invoice_msat(1000), 1000);
		assert_eq!(quantize_invoice_msat(1024), 1024);
	}
}
