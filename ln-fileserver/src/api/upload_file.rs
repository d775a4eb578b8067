// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! The upload conversation.
//!
//! The client opens with a `NewFileSlot`, then alternates chunk frames with
//! invoice settlements until it sends `finished`. The server quotes exactly
//! one invoice per frame and a chunk is only written once its invoice has
//! been observed settled, so unpaid bytes never touch disk. Nothing becomes
//! visible to `ListFiles` until the final frame has been processed: a failed
//! or abandoned upload leaves neither a slot nor a blob behind.

use ln_fileserver_protos::api::{
	upload_file_request, upload_file_response, UploadFileRequest, UploadFileResponse,
};
use ln_fileserver_protos::fees;
use ln_fileserver_protos::types::InvoiceResponse;
use log::{debug, warn};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tonic::Status;

use crate::api::error::{ErrorCode, FileServerError};
use crate::api::{charge, send_frame};
use crate::io::file_store::FileSlot;
use crate::service::Context;
use crate::util::proto_adapter::file_slot_to_proto;
use crate::util::unix_time_now;

pub(crate) const UPLOAD_FILE_PATH: &str = "/api.PrivateFileStore/UploadFile";

const MIN_STORE_DURATION_SECS: i64 = 3600;
const BASE_FEE_MEMO: &str = "Create Fileslot";
const CHUNK_FEE_MEMO: &str = "Uploading Chunk";

fn invoice_frame(invoice: String) -> UploadFileResponse {
	UploadFileResponse {
		event: Some(upload_file_response::Event::Invoice(InvoiceResponse { invoice })),
	}
}

/// Drives one upload conversation to completion.
pub(crate) async fn run_upload<S>(
	context: Context, mut inbound: S, tx: mpsc::Sender<Result<UploadFileResponse, Status>>,
) -> Result<(), FileServerError>
where
	S: Stream<Item = Result<UploadFileRequest, Status>> + Unpin + Send,
{
	let new_slot = match read_frame(&mut inbound).await? {
		Some(UploadFileRequest { event: Some(upload_file_request::Event::Slot(slot)) }) => slot,
		Some(_) | None => {
			return Err(FileServerError::new(
				ErrorCode::InvalidArgument,
				"expected NewFileSlot as the opening frame",
			));
		},
	};

	let store_duration_secs = new_slot.deletion_date - unix_time_now();
	if store_duration_secs < MIN_STORE_DURATION_SECS {
		return Err(FileServerError::new(
			ErrorCode::FailedPrecondition,
			"minimum store time is 1 hour",
		));
	}

	let slot = context
		.store
		.new_slot(&context.pubkey, &new_slot.filename, &new_slot.description, new_slot.deletion_date)
		.await?;
	let slot_id = slot.id.clone();
	debug!("upload of '{}' started by {} as slot {}", new_slot.filename, context.pubkey, slot_id);

	match drive(&context, &mut inbound, &tx, slot, store_duration_secs).await {
		Ok(true) => Ok(()),
		Ok(false) => {
			// The peer hung up without sending Finished. Nothing was
			// finalized, so no slot becomes visible.
			warn!("upload stream of slot {} ended before Finished, discarding", slot_id);
			context.store.discard_blob(&context.pubkey, &slot_id).await?;
			Ok(())
		},
		Err(e) => {
			if let Err(discard_err) = context.store.discard_blob(&context.pubkey, &slot_id).await
			{
				warn!("unable to discard blob of slot {}: {}", slot_id, discard_err);
			}
			Err(e)
		},
	}
}

/// Runs the charge/write loop. Returns false if the peer stream ended before
/// a `finished` frame.
async fn drive<S>(
	context: &Context, inbound: &mut S, tx: &mpsc::Sender<Result<UploadFileResponse, Status>>,
	slot: FileSlot, store_duration_secs: i64,
) -> Result<bool, FileServerError>
where
	S: Stream<Item = Result<UploadFileRequest, Status>> + Unpin + Send,
{
	let mut writer = context.store.open_writer(&context.pubkey, &slot.id).await?;

	charge(context, tx, BASE_FEE_MEMO, context.fee_report.msat_base_cost, invoice_frame).await?;

	loop {
		let frame = match read_frame(inbound).await? {
			Some(frame) => frame,
			None => return Ok(false),
		};
		match frame.event {
			Some(upload_file_request::Event::Chunk(chunk)) => {
				let cost = fees::chunk_storage_cost(
					&context.fee_report,
					chunk.content.len() as i64,
					store_duration_secs,
				);
				// Settlement strictly precedes the write.
				charge(context, tx, CHUNK_FEE_MEMO, cost, invoice_frame).await?;
				writer.write_all(&chunk.content).await?;
			},
			Some(upload_file_request::Event::Finished(_)) => break,
			Some(upload_file_request::Event::Slot(_)) | None => {
				return Err(FileServerError::new(
					ErrorCode::InvalidArgument,
					"unexpected frame: the upload already has a file slot",
				));
			},
		}
	}

	writer.flush().await?;
	let finalized = context.store.finalize(&context.pubkey, slot, &mut writer).await?;
	debug!("slot {} finalized with {} bytes", finalized.id, finalized.bytes);
	send_frame(
		tx,
		UploadFileResponse {
			event: Some(upload_file_response::Event::FinishedFile(file_slot_to_proto(finalized))),
		},
	)
	.await?;
	Ok(true)
}

async fn read_frame<S>(inbound: &mut S) -> Result<Option<UploadFileRequest>, FileServerError>
where
	S: Stream<Item = Result<UploadFileRequest, Status>> + Unpin + Send,
{
	match inbound.next().await {
		Some(Ok(frame)) => Ok(Some(frame)),
		Some(Err(status)) => Err(FileServerError::new(
			ErrorCode::Canceled,
			format!("failed to read from the client stream: {}", status),
		)),
		None => Ok(None),
	}
}
