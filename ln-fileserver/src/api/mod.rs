pub(crate) mod download_file;
pub(crate) mod error;
pub(crate) mod get_info;
pub(crate) mod list_files;
pub(crate) mod upload_file;

use std::time::Duration;

use ln_fileserver_protos::fees;
use tokio::sync::mpsc;
use tonic::Status;

use crate::api::error::{ErrorCode, FileServerError};
use crate::lnd::INVOICE_EXPIRY_SECS;
use crate::service::Context;

// Invoice expiry plus slack: a settlement that has not been observed by then
// would be rejected at the Lightning layer anyway, so the engine gives up
// rather than staying blocked on the watch.
const SETTLEMENT_TIMEOUT: Duration = Duration::from_secs(INVOICE_EXPIRY_SECS as u64 + 15);

/// Sends one response frame, treating a gone peer as cancellation.
pub(crate) async fn send_frame<R>(
	tx: &mpsc::Sender<Result<R, Status>>, frame: R,
) -> Result<(), FileServerError> {
	tx.send(Ok(frame))
		.await
		.map_err(|_| FileServerError::new(ErrorCode::Canceled, "client went away"))
}

/// Quotes `amount_msat` toward the peer and blocks until the invoice is
/// settled. The amount is quantized first; a zero quote short-circuits to the
/// "free" sentinel with no invoice issued and no settlement awaited.
pub(crate) async fn charge<R>(
	context: &Context, tx: &mpsc::Sender<Result<R, Status>>, memo: &str, amount_msat: i64,
	invoice_frame: impl Fn(String) -> R,
) -> Result<(), FileServerError> {
	let amount_msat = fees::quantize_invoice_msat(amount_msat);
	if amount_msat == 0 {
		return send_frame(tx, invoice_frame(fees::FREE_INVOICE.to_string())).await;
	}

	let (payment_request, settlement) = context
		.lightning
		.create_and_listen(memo, amount_msat, INVOICE_EXPIRY_SECS)
		.await
		.map_err(|e| {
			FileServerError::new(
				ErrorCode::PaymentSystem,
				format!("unable to create invoice: {}", e),
			)
		})?;
	send_frame(tx, invoice_frame(payment_request)).await?;

	tokio::select! {
		_ = tx.closed() => {
			Err(FileServerError::new(
				ErrorCode::Canceled,
				"client went away while awaiting payment",
			))
		},
		result = tokio::time::timeout(SETTLEMENT_TIMEOUT, settlement.settled()) => match result {
			Err(_) => Err(FileServerError::new(
				ErrorCode::PaymentTimeout,
				"invoice was not settled before it expired",
			)),
			Ok(Err(e)) => Err(FileServerError::new(
				ErrorCode::PaymentSystem,
				format!("settlement watch failed: {}", e),
			)),
			Ok(Ok(())) => Ok(()),
		},
	}
}
