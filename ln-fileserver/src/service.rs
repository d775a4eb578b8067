use std::sync::Arc;

use ln_fileserver_protos::api::private_file_store_server::PrivateFileStore;
use ln_fileserver_protos::api::{
	DownloadFileRequest, DownloadFileResponse, GetInfoRequest, GetInfoResponse, ListFilesRequest,
	ListFilesResponse, UploadFileRequest, UploadFileResponse,
};
use ln_fileserver_protos::types::FeeReport;
use log::error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::metadata::MetadataMap;
use tonic::{Request, Response, Status, Streaming};

use crate::api::download_file::{run_download, DOWNLOAD_FILE_PATH};
use crate::api::get_info::{handle_get_info_request, GET_INFO_PATH};
use crate::api::list_files::{handle_list_files_request, LIST_FILES_PATH};
use crate::api::upload_file::{run_upload, UPLOAD_FILE_PATH};
use crate::auth::{require_pubkey, Authenticator};
use crate::io::file_store::FileStore;
use crate::lnd::LightningNode;

// The protocol is strictly interleaved, so a shallow response buffer
// suffices and keeps at most one chunk conversation in flight per session.
const STREAM_BUFFER: usize = 8;

pub(crate) struct FileServer {
	fee_report: FeeReport,
	lightning: Arc<dyn LightningNode>,
	store: Arc<FileStore>,
	auth: Authenticator,
}

/// Everything an authenticated call needs, with the verified caller identity
/// as a first-class field rather than a metadata lookup.
#[derive(Clone)]
pub(crate) struct Context {
	pub(crate) fee_report: FeeReport,
	pub(crate) lightning: Arc<dyn LightningNode>,
	pub(crate) store: Arc<FileStore>,
	pub(crate) pubkey: String,
}

impl FileServer {
	pub(crate) fn new(
		fee_report: FeeReport, lightning: Arc<dyn LightningNode>, store: Arc<FileStore>,
	) -> Self {
		let auth = Authenticator::new(Arc::clone(&lightning), [GET_INFO_PATH.to_string()]);
		Self { fee_report, lightning, store, auth }
	}

	async fn authenticated_context(
		&self, full_method: &str, metadata: &MetadataMap,
	) -> Result<Context, Status> {
		let pubkey = self.auth.authenticate(full_method, metadata).await?;
		let pubkey = require_pubkey(pubkey)?;
		Ok(Context {
			fee_report: self.fee_report,
			lightning: Arc::clone(&self.lightning),
			store: Arc::clone(&self.store),
			pubkey,
		})
	}
}

#[tonic::async_trait]
impl PrivateFileStore for FileServer {
	async fn get_info(
		&self, request: Request<GetInfoRequest>,
	) -> Result<Response<GetInfoResponse>, Status> {
		// Public method: the allowlist stage waves it through, there is no
		// caller identity to establish.
		self.auth.authenticate(GET_INFO_PATH, request.metadata()).await.map_err(Status::from)?;
		Ok(Response::new(handle_get_info_request(self.fee_report)))
	}

	async fn list_files(
		&self, request: Request<ListFilesRequest>,
	) -> Result<Response<ListFilesResponse>, Status> {
		let context = self.authenticated_context(LIST_FILES_PATH, request.metadata()).await?;
		let response = handle_list_files_request(context).await?;
		Ok(Response::new(response))
	}

	type UploadFileStream = ReceiverStream<Result<UploadFileResponse, Status>>;

	async fn upload_file(
		&self, request: Request<Streaming<UploadFileRequest>>,
	) -> Result<Response<Self::UploadFileStream>, Status> {
		let context = self.authenticated_context(UPLOAD_FILE_PATH, request.metadata()).await?;
		let inbound = request.into_inner();

		let (tx, rx) = mpsc::channel(STREAM_BUFFER);
		tokio::spawn(async move {
			if let Err(e) = run_upload(context, inbound, tx.clone()).await {
				error!("upload failed: {}", e);
				let _ = tx.send(Err(e.into())).await;
			}
		});
		Ok(Response::new(ReceiverStream::new(rx)))
	}

	type DownloadFileStream = ReceiverStream<Result<DownloadFileResponse, Status>>;

	async fn download_file(
		&self, request: Request<DownloadFileRequest>,
	) -> Result<Response<Self::DownloadFileStream>, Status> {
		let context = self.authenticated_context(DOWNLOAD_FILE_PATH, request.metadata()).await?;
		let download_request = request.into_inner();

		let (tx, rx) = mpsc::channel(STREAM_BUFFER);
		tokio::spawn(async move {
			if let Err(e) = run_download(context, download_request, tx.clone()).await {
				error!("download failed: {}", e);
				let _ = tx.send(Err(e.into())).await;
			}
		});
		Ok(Response::new(ReceiverStream::new(rx)))
	}
}
