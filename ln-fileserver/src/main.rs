mod api;
mod auth;
mod io;
mod lnd;
mod service;
mod util;

use std::sync::Arc;

use clap::Parser;
use ln_fileserver_protos::api::private_file_store_server::PrivateFileStoreServer;
use log::{error, info};
use tokio::signal::unix::SignalKind;
use tonic::transport::Server;

use crate::io::file_store::FileStore;
use crate::lnd::LndClient;
use crate::service::FileServer;
use crate::util::config::{load_config, ArgsConfig};

fn main() {
	let args = ArgsConfig::parse();
	let config = match load_config(&args) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("Invalid configuration: {}", e);
			std::process::exit(-1);
		},
	};

	env_logger::Builder::new().filter_level(config.log_level).init();

	let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
		Ok(runtime) => runtime,
		Err(e) => {
			eprintln!("Failed to setup tokio runtime: {}", e);
			std::process::exit(-1);
		},
	};

	runtime.block_on(async {
		let lnd = match LndClient::connect(&config.lnd).await {
			Ok(lnd) => lnd,
			Err(e) => {
				error!("Unable to connect to lnd: {}", e);
				std::process::exit(-1);
			},
		};
		let identity = match lnd.identity_pubkey().await {
			Ok(identity) => identity,
			Err(e) => {
				error!("Unable to get info from lnd: {}", e);
				std::process::exit(-1);
			},
		};
		info!("Connected to lnd node {}", identity);

		let store = match FileStore::new(config.data_dir.clone()).await {
			Ok(store) => store,
			Err(e) => {
				error!("Unable to create data dir {}: {}", config.data_dir.display(), e);
				std::process::exit(-1);
			},
		};

		let file_server =
			FileServer::new(config.fee_report, Arc::new(lnd), Arc::new(store));

		let mut sigterm_stream = match tokio::signal::unix::signal(SignalKind::terminate()) {
			Ok(stream) => stream,
			Err(e) => {
				error!("Failed to register for SIGTERM stream: {}", e);
				std::process::exit(-1);
			},
		};
		let shutdown = async move {
			tokio::select! {
				_ = tokio::signal::ctrl_c() => info!("Received CTRL-C, shutting down.."),
				_ = sigterm_stream.recv() => info!("Received SIGTERM, shutting down.."),
			}
		};

		info!("Serving grpc on {}", config.grpc_addr);
		if let Err(e) = Server::builder()
			.add_service(PrivateFileStoreServer::new(file_server))
			.serve_with_shutdown(config.grpc_addr, shutdown)
			.await
		{
			error!("grpc server failed: {}", e);
			std::process::exit(-1);
		}
	});

	info!("Shutdown complete..");
}
