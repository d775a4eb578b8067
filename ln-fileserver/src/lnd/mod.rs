// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Capabilities consumed from the backing Lightning node.
//!
//! The protocol engines only ever need four operations: create an invoice,
//! learn of its settlement, sign a message, and verify one. They are modeled
//! as a trait so tests can run against a scripted node.

pub(crate) mod lnd_client;

use std::fmt;

use async_trait::async_trait;
use tokio::sync::oneshot;

pub(crate) use lnd_client::LndClient;

/// How long a quoted invoice remains payable.
pub(crate) const INVOICE_EXPIRY_SECS: i64 = 60;

/// An error reported by the backing Lightning node.
#[derive(Clone, Debug)]
pub(crate) struct LndError {
	message: String,
}

impl LndError {
	pub(crate) fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

impl fmt::Display for LndError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)
	}
}

impl std::error::Error for LndError {}

/// A freshly created invoice: the payable request string and the payment
/// hash under which settlement can be watched.
#[derive(Clone, Debug)]
pub(crate) struct InvoiceTicket {
	pub(crate) payment_request: String,
	pub(crate) r_hash: Vec<u8>,
}

/// Resolves once the first SETTLED event for a watched invoice arrives.
///
/// Dropping an unresolved `Settlement` tears the underlying watch down, so
/// a call that exits early never leaks a watcher on the node.
pub(crate) struct Settlement {
	rx: oneshot::Receiver<Result<(), LndError>>,
}

impl Settlement {
	pub(crate) fn new(rx: oneshot::Receiver<Result<(), LndError>>) -> Self {
		Self { rx }
	}

	pub(crate) async fn settled(self) -> Result<(), LndError> {
		match self.rx.await {
			Ok(result) => result,
			Err(_) => Err(LndError::new("settlement watch ended before the invoice settled")),
		}
	}
}

#[async_trait]
pub(crate) trait LightningNode: Send + Sync {
	/// Creates an invoice over `value_msat` with the given memo and expiry.
	async fn create_invoice(
		&self, memo: &str, value_msat: i64, expiry_secs: i64,
	) -> Result<InvoiceTicket, LndError>;

	/// Starts watching the invoice identified by `r_hash` for settlement.
	async fn watch_invoice(&self, r_hash: Vec<u8>) -> Result<Settlement, LndError>;

	/// Signs `msg` with the node's identity key.
	async fn sign_message(&self, msg: &[u8]) -> Result<String, LndError>;

	/// Verifies `signature` over `msg` and returns the recovered pubkey.
	async fn verify_message(&self, msg: &[u8], signature: &str) -> Result<String, LndError>;

	/// Creates an invoice and immediately starts watching it, returning the
	/// payment request to forward to the peer and the settlement handle.
	async fn create_and_listen(
		&self, memo: &str, value_msat: i64, expiry_secs: i64,
	) -> Result<(String, Settlement), LndError> {
		let ticket = self.create_invoice(memo, value_msat, expiry_secs).await?;
		let settlement = self.watch_invoice(ticket.r_hash).await?;
		Ok((ticket.payment_request, settlement))
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::sync::atomic::{AtomicU64, Ordering};
	use std::sync::Mutex;

	use super::*;

	#[derive(Clone, Debug, PartialEq, Eq)]
	pub(crate) struct RecordedInvoice {
		pub(crate) memo: String,
		pub(crate) value_msat: i64,
	}

	/// A scripted Lightning node. In `auto` mode every watched invoice
	/// settles immediately; in `manual` mode settlements are held back until
	/// [`MockLightning::settle_next`] releases them.
	pub(crate) struct MockLightning {
		identity: String,
		auto_settle: bool,
		invoices: Mutex<Vec<RecordedInvoice>>,
		pending: Mutex<Vec<oneshot::Sender<Result<(), LndError>>>>,
		next_r_hash: AtomicU64,
	}

	impl MockLightning {
		pub(crate) fn auto(identity: &str) -> Self {
			Self::new(identity, true)
		}

		pub(crate) fn manual(identity: &str) -> Self {
			Self::new(identity, false)
		}

		fn new(identity: &str, auto_settle: bool) -> Self {
			Self {
				identity: identity.to_string(),
				auto_settle,
				invoices: Mutex::new(Vec::new()),
				pending: Mutex::new(Vec::new()),
				next_r_hash: AtomicU64::new(0),
			}
		}

		pub(crate) fn invoices(&self) -> Vec<RecordedInvoice> {
			self.invoices.lock().unwrap().clone()
		}

		/// Settles the oldest held-back invoice. Returns false if none is
		/// pending.
		pub(crate) fn settle_next(&self) -> bool {
			let mut pending = self.pending.lock().unwrap();
			if pending.is_empty() {
				return false;
			}
			let tx = pending.remove(0);
			tx.send(Ok(())).is_ok()
		}

		pub(crate) fn pending_count(&self) -> usize {
			self.pending.lock().unwrap().len()
		}
	}

	#[async_trait]
	impl LightningNode for MockLightning {
		async fn create_invoice(
			&self, memo: &str, value_msat: i64, _expiry_secs: i64,
		) -> Result<InvoiceTicket, LndError> {
			self.invoices
				.lock()
				.unwrap()
				.push(RecordedInvoice { memo: memo.to_string(), value_msat });
			let r_hash = self.next_r_hash.fetch_add(1, Ordering::SeqCst);
			Ok(InvoiceTicket {
				payment_request: format!("lnmock{}x{}", value_msat, r_hash),
				r_hash: r_hash.to_be_bytes().to_vec(),
			})
		}

		async fn watch_invoice(&self, _r_hash: Vec<u8>) -> Result<Settlement, LndError> {
			let (tx, rx) = oneshot::channel();
			if self.auto_settle {
				let _ = tx.send(Ok(()));
			} else {
				self.pending.lock().unwrap().push(tx);
			}
			Ok(Settlement::new(rx))
		}

		async fn sign_message(&self, _msg: &[u8]) -> Result<String, LndError> {
			Ok(format!("sig:{}", self.identity))
		}

		async fn verify_message(&self, _msg: &[u8], signature: &str) -> Result<String, LndError> {
			if signature == "fail" {
				return Err(LndError::new("verification unavailable"));
			}
			Ok(signature.strip_prefix("sig:").unwrap_or_default().to_string())
		}
	}
}
