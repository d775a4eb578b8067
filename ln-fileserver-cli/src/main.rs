// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ln_fileserver_client::client::{FileServerClient, DEFAULT_CHUNK_SIZE};

#[derive(Parser)]
#[command(name = "lnfscli", version, about = "cli for the lightning network fileserver")]
struct Cli {
	#[arg(
		long,
		env = "LN_FILESERVER_LND_ADDRESS",
		help = "The gRPC address of the local lnd node, e.g. https://127.0.0.1:10009."
	)]
	lnd_address: String,

	#[arg(long, env = "LN_FILESERVER_LND_CERT_PATH", help = "Path to the lnd TLS certificate.")]
	lnd_cert_path: PathBuf,

	#[arg(long, env = "LN_FILESERVER_LND_MACAROON_PATH", help = "Path to the lnd macaroon.")]
	lnd_macaroon_path: PathBuf,

	#[arg(long, default_value = "http://127.0.0.1:9090", help = "Target fileserver.")]
	target: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Returns information of the ln-fileserver.
	Getinfo,
	/// Returns all user owned files.
	Listfiles,
	/// Estimates the fee of uploading a file.
	Uploadfee {
		#[arg(long, help = "Path to the file to upload.")]
		file: PathBuf,
		#[arg(long, help = "Storage time in seconds.")]
		store_duration: i64,
	},
	/// Uploads a file to the ln-fileserver.
	Upload {
		#[arg(long, help = "Path to the file to upload.")]
		file: PathBuf,
		#[arg(long, help = "Duration of storage in seconds.")]
		store_duration: i64,
		#[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Byte size of uploaded chunks.")]
		chunk_size: usize,
		#[arg(long, default_value = "", help = "Description of the file.")]
		description: String,
		#[arg(long, help = "If set, doesn't wait for fee confirmation.")]
		force: bool,
	},
	/// Downloads a file from the ln-fileserver.
	Download {
		#[arg(long, help = "Id of the file to download.")]
		id: String,
		#[arg(long, default_value = ".", help = "Where to download to.")]
		dir: PathBuf,
	},
}

#[tokio::main]
async fn main() {
	env_logger::init();
	let cli = Cli::parse();
	if let Err(e) = run(cli).await {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	let lnd = fedimint_tonic_lnd::connect(
		cli.lnd_address.clone(),
		cli.lnd_cert_path.clone(),
		cli.lnd_macaroon_path.clone(),
	)
	.await
	.map_err(|e| format!("unable to connect to lnd: {:?}", e))?;
	let mut client = FileServerClient::connect(cli.target.clone(), lnd).await?;

	match cli.command {
		Command::Getinfo => {
			let fee_report = client.get_info().await?;
			print_json(&fee_report)?;
		},
		Command::Listfiles => {
			let files = client.list_files().await?;
			print_json(&files)?;
		},
		Command::Uploadfee { file, store_duration } => {
			let file_bytes = tokio::fs::metadata(&file).await?.len() as i64;
			let fee = client.estimate_upload_fee(file_bytes, store_duration).await?;
			println!("File: {}, fee: {} msat", file.display(), fee);
		},
		Command::Upload { file, store_duration, chunk_size, description, force } => {
			if !force {
				let file_bytes = tokio::fs::metadata(&file).await?.len() as i64;
				let fee = client.estimate_upload_fee(file_bytes, store_duration).await?;
				println!("Uploading file: {}, estimated fee: {} msat", file.display(), fee);
				if !prompt_for_confirmation("Confirm upload (yes/no): ") {
					return Err("aborted upload".into());
				}
			}
			let (slot, total_paid_msat) =
				client.upload_file(&file, store_duration, &description, chunk_size).await?;
			print_json(&slot)?;
			println!("Paid a total of {} msat", total_paid_msat);
		},
		Command::Download { id, dir } => {
			let (slot, target, total_paid_msat) = client.download_file(&id, &dir).await?;
			println!("Downloaded {} to {}", slot.filename, target.display());
			println!("Paid a total of {} msat", total_paid_msat);
		},
	}
	Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn prompt_for_confirmation(msg: &str) -> bool {
	loop {
		print!("{}", msg);
		let _ = std::io::stdout().flush();

		let mut answer = String::new();
		if std::io::stdin().read_line(&mut answer).is_err() {
			return false;
		}
		match answer.trim().to_lowercase().as_str() {
			"yes" => return true,
			"no" => return false,
			_ => continue,
		}
	}
}
