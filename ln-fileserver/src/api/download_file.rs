// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! The download conversation.
//!
//! The server opens with the slot metadata, then quotes an invoice before
//! every chunk it sends, so unpaid clients receive no content. The stream
//! terminates with a single empty `finished` frame once the blob is
//! exhausted.

use std::io;

use ln_fileserver_protos::api::{download_file_response, DownloadFileRequest, DownloadFileResponse};
use ln_fileserver_protos::fees;
use ln_fileserver_protos::types::{Empty, FileChunk, InvoiceResponse};
use log::debug;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tonic::Status;

use crate::api::error::{ErrorCode, FileServerError};
use crate::api::{charge, send_frame};
use crate::service::Context;
use crate::util::proto_adapter::file_slot_to_proto;

pub(crate) const DOWNLOAD_FILE_PATH: &str = "/api.PrivateFileStore/DownloadFile";

const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024;
const CHUNK_FEE_MEMO: &str = "Downloading Chunk";

fn invoice_frame(invoice: String) -> DownloadFileResponse {
	DownloadFileResponse {
		event: Some(download_file_response::Event::Invoice(InvoiceResponse { invoice })),
	}
}

/// Drives one download conversation to completion.
pub(crate) async fn run_download(
	context: Context, request: DownloadFileRequest,
	tx: mpsc::Sender<Result<DownloadFileResponse, Status>>,
) -> Result<(), FileServerError> {
	let slot =
		context.store.get_slot(&context.pubkey, &request.file_id).await.map_err(|e| {
			if e.kind() == io::ErrorKind::NotFound {
				FileServerError::new(
					ErrorCode::NotFound,
					format!("no file with id {}", request.file_id),
				)
			} else {
				e.into()
			}
		})?;
	let mut reader = context.store.open_reader(&context.pubkey, &slot.id).await?;
	debug!("download of slot {} started by {}", slot.id, context.pubkey);

	send_frame(
		&tx,
		DownloadFileResponse {
			event: Some(download_file_response::Event::FileInfo(file_slot_to_proto(slot))),
		},
	)
	.await?;

	let mut buf = vec![0u8; DOWNLOAD_CHUNK_SIZE];
	loop {
		let n = read_chunk(&mut reader, &mut buf).await?;
		if n == 0 {
			break;
		}

		let cost = fees::chunk_download_cost(&context.fee_report, n as i64);
		// Settlement strictly precedes the send.
		charge(&context, &tx, CHUNK_FEE_MEMO, cost, invoice_frame).await?;
		send_frame(
			&tx,
			DownloadFileResponse {
				event: Some(download_file_response::Event::Chunk(FileChunk {
					content: buf[..n].to_vec(),
				})),
			},
		)
		.await?;
	}

	send_frame(
		&tx,
		DownloadFileResponse { event: Some(download_file_response::Event::Finished(Empty {})) },
	)
	.await
}

/// Fills `buf` as far as the blob allows, so every chunk except the last has
/// the full chunk size.
async fn read_chunk(reader: &mut tokio::fs::File, buf: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		let n = reader.read(&mut buf[filled..]).await?;
		if n == 0 {
			break;
		}
		filled += n;
	}
	Ok(filled)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use ln_fileserver_protos::types::FeeReport;
	use tokio::io::AsyncWriteExt;
	use tokio::sync::mpsc::error::TryRecvError;

	use super::*;
	use crate::io::file_store::testing::scratch_dir;
	use crate::io::file_store::{FileSlot, FileStore};
	use crate::lnd::testing::{MockLightning, RecordedInvoice};

	const PUBKEY: &str = "03cafebabe99";

	fn context(
		fee_report: FeeReport, lightning: Arc<MockLightning>, store: Arc<FileStore>,
	) -> Context {
		Context { fee_report, lightning, store, pubkey: PUBKEY.to_string() }
	}

	async fn seed_file(store: &FileStore, filename: &str, content: &[u8]) -> FileSlot {
		let slot = store.new_slot(PUBKEY, filename, "", 4102444800).await.unwrap();
		let mut writer = store.open_writer(PUBKEY, &slot.id).await.unwrap();
		writer.write_all(content).await.unwrap();
		writer.flush().await.unwrap();
		store.finalize(PUBKEY, slot, &mut writer).await.unwrap()
	}

	async fn run_to_completion(
		context: Context, file_id: &str,
	) -> (Result<(), FileServerError>, Vec<DownloadFileResponse>) {
		let (tx, mut rx) = mpsc::channel(32);
		let result =
			run_download(context, DownloadFileRequest { file_id: file_id.to_string() }, tx).await;
		let mut responses = Vec::new();
		while let Some(frame) = rx.recv().await {
			responses.push(frame.unwrap());
		}
		(result, responses)
	}

	#[tokio::test]
	async fn unknown_file_id_yields_not_found_and_no_bytes() {
		let store = Arc::new(FileStore::new(scratch_dir("download-unknown")).await.unwrap());
		let lightning = Arc::new(MockLightning::auto(PUBKEY));
		store.get_or_create_user(PUBKEY).await.unwrap();

		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 0 };
		let (result, responses) =
			run_to_completion(context(fee_report, lightning, store), "nope").await;

		assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
		assert!(responses.is_empty());
	}

	#[tokio::test]
	async fn free_download_returns_identical_bytes() {
		let store = Arc::new(FileStore::new(scratch_dir("download-free")).await.unwrap());
		let lightning = Arc::new(MockLightning::auto(PUBKEY));
		let content: Vec<u8> = (0..3072u32).map(|i| (i % 251) as u8).collect();
		let slot = seed_file(&store, "notes.txt", &content).await;

		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 0 };
		let (result, responses) =
			run_to_completion(context(fee_report, Arc::clone(&lightning), store), &slot.id).await;
		result.unwrap();

		// file_info, invoice, chunk, finished.
		assert_eq!(responses.len(), 4);
		match &responses[0].event {
			Some(download_file_response::Event::FileInfo(info)) => {
				assert_eq!(info.file_id, slot.id);
				assert_eq!(info.bytes, content.len() as i64);
			},
			other => panic!("expected file info, got {:?}", other),
		}
		match &responses[1].event {
			Some(download_file_response::Event::Invoice(invoice)) => {
				assert_eq!(invoice.invoice, "free");
			},
			other => panic!("expected invoice, got {:?}", other),
		}
		match &responses[2].event {
			Some(download_file_response::Event::Chunk(chunk)) => {
				assert_eq!(chunk.content, content);
			},
			other => panic!("expected chunk, got {:?}", other),
		}
		assert!(matches!(
			responses[3].event,
			Some(download_file_response::Event::Finished(_))
		));
		assert!(lightning.invoices().is_empty());
	}

	#[tokio::test]
	async fn every_chunk_is_preceded_by_its_invoice() {
		let store = Arc::new(FileStore::new(scratch_dir("download-paid")).await.unwrap());
		let lightning = Arc::new(MockLightning::auto(PUBKEY));
		// 2 MiB + 512 KiB: two full chunks and a clamped partial one.
		let content = vec![5u8; 2 * 1024 * 1024 + 512 * 1024];
		let slot = seed_file(&store, "paid.bin", &content).await;

		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 1 };
		let (result, responses) =
			run_to_completion(context(fee_report, Arc::clone(&lightning), store), &slot.id).await;
		result.unwrap();

		assert_eq!(
			lightning.invoices(),
			vec![
				RecordedInvoice { memo: CHUNK_FEE_MEMO.to_string(), value_msat: 1024 },
				RecordedInvoice { memo: CHUNK_FEE_MEMO.to_string(), value_msat: 1024 },
				RecordedInvoice { memo: CHUNK_FEE_MEMO.to_string(), value_msat: 1000 },
			]
		);

		// Strict frame order: info, then invoice/chunk pairs, then finished.
		let mut frames = responses.into_iter();
		assert!(matches!(
			frames.next().unwrap().event,
			Some(download_file_response::Event::FileInfo(_))
		));
		let mut delivered = Vec::new();
		loop {
			match frames.next().unwrap().event {
				Some(download_file_response::Event::Invoice(_)) => {
					match frames.next().unwrap().event {
						Some(download_file_response::Event::Chunk(chunk)) => {
							delivered.extend_from_slice(&chunk.content);
						},
						other => panic!("invoice must be followed by its chunk, got {:?}", other),
					}
				},
				Some(download_file_response::Event::Finished(_)) => break,
				other => panic!("unexpected frame {:?}", other),
			}
		}
		assert!(frames.next().is_none());
		assert_eq!(delivered, content);
	}

	#[tokio::test]
	async fn chunk_is_withheld_until_settlement() {
		let store = Arc::new(FileStore::new(scratch_dir("download-ordering")).await.unwrap());
		let lightning = Arc::new(MockLightning::manual(PUBKEY));
		let content = vec![3u8; 4096];
		let slot = seed_file(&store, "held.bin", &content).await;

		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 1 };
		let (tx, mut rx) = mpsc::channel(8);
		let engine = tokio::spawn(run_download(
			context(fee_report, Arc::clone(&lightning), store),
			DownloadFileRequest { file_id: slot.id.clone() },
			tx,
		));

		assert!(matches!(
			rx.recv().await.unwrap().unwrap().event,
			Some(download_file_response::Event::FileInfo(_))
		));
		assert!(matches!(
			rx.recv().await.unwrap().unwrap().event,
			Some(download_file_response::Event::Invoice(_))
		));

		// Unsettled: no chunk may be in flight.
		assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
		assert_eq!(lightning.pending_count(), 1);

		assert!(lightning.settle_next());
		match rx.recv().await.unwrap().unwrap().event {
			Some(download_file_response::Event::Chunk(chunk)) => {
				assert_eq!(chunk.content, content);
			},
			other => panic!("expected chunk after settlement, got {:?}", other),
		}
		assert!(matches!(
			rx.recv().await.unwrap().unwrap().event,
			Some(download_file_response::Event::Finished(_))
		));
		engine.await.unwrap().unwrap();
	}

	#[tokio::test]
	async fn uploaded_file_round_trips_byte_identical() {
		use ln_fileserver_protos::api::{
			upload_file_request, upload_file_response, UploadFileRequest,
		};
		use ln_fileserver_protos::types::Empty;

		use crate::api::upload_file::run_upload;
		use crate::util::unix_time_now;

		let store = Arc::new(FileStore::new(scratch_dir("round-trip")).await.unwrap());
		let lightning = Arc::new(MockLightning::auto(PUBKEY));
		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 0 };
		let content: Vec<u8> = (0..(3 * 1024 * 1024 + 77)).map(|i| (i % 241) as u8).collect();

		// Upload in two chunks.
		let mut frames = vec![UploadFileRequest {
			event: Some(upload_file_request::Event::Slot(
				ln_fileserver_protos::api::NewFileSlot {
					deletion_date: unix_time_now() + 7200,
					filename: "round.bin".to_string(),
					description: String::new(),
				},
			)),
		}];
		for half in content.chunks(2 * 1024 * 1024) {
			frames.push(UploadFileRequest {
				event: Some(upload_file_request::Event::Chunk(FileChunk {
					content: half.to_vec(),
				})),
			});
		}
		frames.push(UploadFileRequest {
			event: Some(upload_file_request::Event::Finished(Empty {})),
		});

		let (up_tx, mut up_rx) = mpsc::channel(32);
		run_upload(
			context(fee_report, Arc::clone(&lightning), Arc::clone(&store)),
			tokio_stream::iter(frames.into_iter().map(Ok)),
			up_tx,
		)
		.await
		.unwrap();
		let mut uploaded = None;
		while let Some(frame) = up_rx.recv().await {
			if let Some(upload_file_response::Event::FinishedFile(slot)) = frame.unwrap().event {
				uploaded = Some(slot);
			}
		}
		let uploaded = uploaded.expect("upload must terminate with the persisted slot");
		assert_eq!(uploaded.bytes, content.len() as i64);

		// Download it back and compare.
		let (result, responses) = run_to_completion(
			context(fee_report, Arc::clone(&lightning), store),
			&uploaded.file_id,
		)
		.await;
		result.unwrap();

		let mut downloaded = Vec::new();
		for response in &responses {
			if let Some(download_file_response::Event::Chunk(chunk)) = &response.event {
				downloaded.extend_from_slice(&chunk.content);
			}
		}
		assert_eq!(downloaded, content);
		match &responses[0].event {
			Some(download_file_response::Event::FileInfo(info)) => {
				assert_eq!(info.sha_checksum, uploaded.sha_checksum);
			},
			other => panic!("expected file info, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn cancelled_download_stops_at_the_pending_invoice() {
		let store = Arc::new(FileStore::new(scratch_dir("download-cancel")).await.unwrap());
		let lightning = Arc::new(MockLightning::manual(PUBKEY));
		let content = vec![8u8; 2048];
		let slot = seed_file(&store, "dropped.bin", &content).await;

		let fee_report =
			FeeReport { msat_base_cost: 0, msat_per_kb_per_hour: 0, msat_per_kb_downloaded: 1 };
		let (tx, mut rx) = mpsc::channel(8);
		let engine = tokio::spawn(run_download(
			context(fee_report, Arc::clone(&lightning), store),
			DownloadFileRequest { file_id: slot.id.clone() },
			tx,
		));

		assert!(matches!(
			rx.recv().await.unwrap().unwrap().event,
			Some(download_file_response::Event::FileInfo(_))
		));
		assert!(matches!(
			rx.recv().await.unwrap().unwrap().event,
			Some(download_file_response::Event::Invoice(_))
		));

		// The client goes away instead of paying.
		drop(rx);

		let err = engine.await.unwrap().unwrap_err();
		assert_eq!(err.code, ErrorCode::Canceled);
	}
}
