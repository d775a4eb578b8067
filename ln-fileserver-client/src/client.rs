// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use fedimint_tonic_lnd::lnrpc;
use ln_fileserver_protos::api::private_file_store_client::PrivateFileStoreClient;
use ln_fileserver_protos::api::{
	download_file_response, upload_file_request, upload_file_response, DownloadFileRequest,
	DownloadFileResponse, GetInfoRequest, ListFilesRequest, NewFileSlot, UploadFileRequest,
	UploadFileResponse,
};
use ln_fileserver_protos::auth::{AUTH_MSG, PUBKEY_METADATA_KEY, SIG_METADATA_KEY};
use ln_fileserver_protos::fees;
use ln_fileserver_protos::types::{Empty, FeeReport, FileChunk, FileSlot};
use log::{debug, info};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tokio_stream::wrappers::ReceiverStream;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;
use tonic::{Request, Streaming};

use crate::error::ClientError;

/// Default chunk size for uploads.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// A connected client of one ln-fileserver, authenticating as the identity
/// of the given lnd node and paying quoted invoices through it.
pub struct FileServerClient {
	grpc: PrivateFileStoreClient<Channel>,
	lnd: Arc<Mutex<fedimint_tonic_lnd::Client>>,
	identity_pubkey: String,
}

impl FileServerClient {
	/// Connects to the file server at `server_address`. The lnd connection is
	/// verified with a `GetInfo` call; its identity pubkey becomes this
	/// client's identity towards the server.
	pub async fn connect(
		server_address: String, lnd: fedimint_tonic_lnd::Client,
	) -> Result<Self, ClientError> {
		let lnd = Arc::new(Mutex::new(lnd));
		let identity_pubkey = {
			let mut client = lnd.lock().await;
			client
				.lightning()
				.get_info(lnrpc::GetInfoRequest {})
				.await
				.map_err(|e| ClientError::Lnd(format!("get_info failed: {}", e)))?
				.into_inner()
				.identity_pubkey
		};
		debug!("authenticating to {} as {}", server_address, identity_pubkey);

		let grpc = PrivateFileStoreClient::connect(server_address).await?;
		Ok(Self { grpc, lnd, identity_pubkey })
	}

	pub fn identity_pubkey(&self) -> &str {
		&self.identity_pubkey
	}

	/// Wraps `inner` in a request carrying a freshly signed authentication
	/// challenge.
	async fn authenticated<T>(&self, inner: T) -> Result<Request<T>, ClientError> {
		let signature = {
			let mut client = self.lnd.lock().await;
			client
				.lightning()
				.sign_message(lnrpc::SignMessageRequest {
					msg: AUTH_MSG.as_bytes().to_vec(),
					..Default::default()
				})
				.await
				.map_err(|e| ClientError::Lnd(format!("sign_message failed: {}", e)))?
				.into_inner()
				.signature
		};

		let mut request = Request::new(inner);
		let metadata = request.metadata_mut();
		metadata.insert(PUBKEY_METADATA_KEY, ascii_value(&self.identity_pubkey)?);
		metadata.insert(SIG_METADATA_KEY, ascii_value(&signature)?);
		Ok(request)
	}

	pub async fn get_info(&mut self) -> Result<FeeReport, ClientError> {
		let response = self.grpc.get_info(GetInfoRequest {}).await?.into_inner();
		response
			.fee_report
			.ok_or_else(|| ClientError::Protocol("missing fee report".to_string()))
	}

	pub async fn list_files(&mut self) -> Result<Vec<FileSlot>, ClientError> {
		let request = self.authenticated(ListFilesRequest {}).await?;
		Ok(self.grpc.list_files(request).await?.into_inner().files)
	}

	/// Estimates the total upload fee for a file of `file_bytes` stored for
	/// `store_duration_secs`, using the server's current fee schedule.
	pub async fn estimate_upload_fee(
		&mut self, file_bytes: i64, store_duration_secs: i64,
	) -> Result<i64, ClientError> {
		let fee_report = self.get_info().await?;
		Ok(fees::estimate_upload(&fee_report, file_bytes, store_duration_secs))
	}

	/// Uploads the file at `path`, paying every quoted invoice. Returns the
	/// persisted slot and the total amount paid in millisatoshis.
	pub async fn upload_file(
		&mut self, path: &Path, store_duration_secs: i64, description: &str, chunk_size: usize,
	) -> Result<(FileSlot, i64), ClientError> {
		let mut file = tokio::fs::File::open(path).await?;
		let filename = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| "file".to_string());

		let (tx, rx) = mpsc::channel(8);
		let request = self.authenticated(ReceiverStream::new(rx)).await?;
		let mut inbound = self.grpc.upload_file(request).await?.into_inner();

		send_request(
			&tx,
			UploadFileRequest {
				event: Some(upload_file_request::Event::Slot(NewFileSlot {
					deletion_date: unix_time_now() + store_duration_secs,
					filename: filename.clone(),
					description: description.to_string(),
				})),
			},
		)
		.await?;
		let mut total_paid_msat = self.pay_invoice_frame(&mut inbound).await?;

		let mut buf = vec![0u8; chunk_size.max(1)];
		loop {
			let n = file.read(&mut buf).await?;
			if n == 0 {
				break;
			}
			send_request(
				&tx,
				UploadFileRequest {
					event: Some(upload_file_request::Event::Chunk(FileChunk {
						content: buf[..n].to_vec(),
					})),
				},
			)
			.await?;
			total_paid_msat += self.pay_invoice_frame(&mut inbound).await?;
			debug!("uploaded chunk of {} bytes", n);
		}

		send_request(
			&tx,
			UploadFileRequest { event: Some(upload_file_request::Event::Finished(Empty {})) },
		)
		.await?;
		let slot = match inbound.message().await? {
			Some(UploadFileResponse {
				event: Some(upload_file_response::Event::FinishedFile(slot)),
			}) => slot,
			other => {
				return Err(ClientError::Protocol(format!(
					"expected finished file, got {:?}",
					other
				)));
			},
		};
		info!("uploaded '{}' as {} paying {} msat", filename, slot.file_id, total_paid_msat);
		Ok((slot, total_paid_msat))
	}

	/// Downloads the file identified by `file_id` into `dir`, paying every
	/// quoted invoice. Returns the slot metadata, the written path and the
	/// total amount paid in millisatoshis.
	pub async fn download_file(
		&mut self, file_id: &str, dir: &Path,
	) -> Result<(FileSlot, PathBuf, i64), ClientError> {
		let request =
			self.authenticated(DownloadFileRequest { file_id: file_id.to_string() }).await?;
		let mut inbound = self.grpc.download_file(request).await?.into_inner();

		let info = match inbound.message().await? {
			Some(DownloadFileResponse {
				event: Some(download_file_response::Event::FileInfo(info)),
			}) => info,
			other => {
				return Err(ClientError::Protocol(format!("expected file info, got {:?}", other)));
			},
		};

		// Drop any directory components the server may have put in the name.
		let filename = Path::new(&info.filename)
			.file_name()
			.map(OsString::from)
			.unwrap_or_else(|| OsString::from(&info.file_id));
		let target = dir.join(filename);
		let mut file = tokio::fs::File::create(&target).await?;

		let mut total_paid_msat = 0i64;
		loop {
			let frame = match inbound.message().await? {
				Some(frame) => frame,
				None => {
					return Err(ClientError::Protocol(
						"stream ended before the finished frame".to_string(),
					));
				},
			};
			match frame.event {
				Some(download_file_response::Event::Invoice(invoice)) => {
					total_paid_msat += self.pay(&invoice.invoice).await?;
				},
				Some(download_file_response::Event::Chunk(chunk)) => {
					file.write_all(&chunk.content).await?;
					debug!("downloaded chunk of {} bytes", chunk.content.len());
				},
				Some(download_file_response::Event::Finished(_)) => break,
				Some(download_file_response::Event::FileInfo(_)) | None => {
					return Err(ClientError::Protocol("unexpected frame".to_string()));
				},
			}
		}
		file.flush().await?;
		info!(
			"downloaded {} to {} paying {} msat",
			info.file_id,
			target.display(),
			total_paid_msat
		);
		Ok((info, target, total_paid_msat))
	}

	async fn pay_invoice_frame(
		&mut self, inbound: &mut Streaming<UploadFileResponse>,
	) -> Result<i64, ClientError> {
		match inbound.message().await? {
			Some(UploadFileResponse { event: Some(upload_file_response::Event::Invoice(invoice)) }) => {
				self.pay(&invoice.invoice).await
			},
			other => Err(ClientError::Protocol(format!("expected invoice, got {:?}", other))),
		}
	}

	/// Pays one quoted invoice, skipping the "free" sentinel. Returns the
	/// total routed amount in millisatoshis.
	async fn pay(&self, payment_request: &str) -> Result<i64, ClientError> {
		if payment_request == fees::FREE_INVOICE {
			return Ok(0);
		}

		let mut client = self.lnd.lock().await;
		let response = client
			.lightning()
			.send_payment_sync(lnrpc::SendRequest {
				payment_request: payment_request.to_string(),
				..Default::default()
			})
			.await
			.map_err(|e| ClientError::Lnd(format!("send_payment_sync failed: {}", e)))?
			.into_inner();
		if !response.payment_error.is_empty() {
			return Err(ClientError::Payment(response.payment_error));
		}
		Ok(response.payment_route.map(|route| route.total_amt_msat).unwrap_or_default())
	}
}

async fn send_request(
	tx: &mpsc::Sender<UploadFileRequest>, request: UploadFileRequest,
) -> Result<(), ClientError> {
	tx.send(request)
		.await
		.map_err(|_| ClientError::Protocol("upload stream closed by the server".to_string()))
}

fn ascii_value(value: &str) -> Result<MetadataValue<Ascii>, ClientError> {
	value
		.parse()
		.map_err(|_| ClientError::Protocol(format!("metadata value is not ascii: {}", value)))
}

fn unix_time_now() -> i64 {
	SystemTime::now().duration_since(UNIX_EPOCH).expect("Time must be > 1970").as_secs() as i64
}
