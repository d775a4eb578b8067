// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::{fs, io};

use clap::Parser;
use ln_fileserver_protos::types::FeeReport;
use log::LevelFilter;
use serde::Deserialize;

const DEFAULT_GRPC_ADDRESS: &str = "0.0.0.0:9090";
const DEFAULT_MSAT_BASE_FEE: i64 = 1000;
const DEFAULT_MSAT_PER_KB_PER_HOUR: i64 = 1;
const DEFAULT_MSAT_PER_KB_DOWNLOADED: i64 = 1;

/// Configuration for the file server.
#[derive(Debug)]
pub struct Config {
	pub grpc_addr: SocketAddr,
	pub data_dir: PathBuf,
	pub lnd: LndConfig,
	pub fee_report: FeeReport,
	pub log_level: LevelFilter,
}

/// Connection parameters of the backing LND node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LndConfig {
	pub address: String,
	pub cert_path: PathBuf,
	pub macaroon_path: PathBuf,
}

/// A builder for `Config`.
#[derive(Default)]
struct ConfigBuilder {
	grpc_address: Option<String>,
	data_dir: Option<String>,
	lnd_address: Option<String>,
	lnd_cert_path: Option<String>,
	lnd_macaroon_path: Option<String>,
	msat_base_fee: Option<i64>,
	msat_per_kb_per_hour: Option<i64>,
	msat_per_kb_downloaded: Option<i64>,
	log_level: Option<String>,
}

impl ConfigBuilder {
	fn merge_toml(&mut self, toml: TomlConfig) {
		if let Some(server) = toml.server {
			self.grpc_address = server.grpc_address.or(self.grpc_address.clone());
			self.data_dir = server.data_dir.or(self.data_dir.clone());
		}

		if let Some(lnd) = toml.lnd {
			self.lnd_address = lnd.address.or(self.lnd_address.clone());
			self.lnd_cert_path = lnd.cert_path.or(self.lnd_cert_path.clone());
			self.lnd_macaroon_path = lnd.macaroon_path.or(self.lnd_macaroon_path.clone());
		}

		if let Some(fees) = toml.fees {
			self.msat_base_fee = fees.msat_base_cost.or(self.msat_base_fee);
			self.msat_per_kb_per_hour = fees.msat_per_kb_per_hour.or(self.msat_per_kb_per_hour);
			self.msat_per_kb_downloaded =
				fees.msat_per_kb_downloaded.or(self.msat_per_kb_downloaded);
		}

		if let Some(log) = toml.log {
			self.log_level = log.level.or(self.log_level.clone());
		}
	}

	fn merge_args(&mut self, args: &ArgsConfig) {
		if let Some(grpc_address) = &args.grpc_address {
			self.grpc_address = Some(grpc_address.clone());
		}

		if let Some(data_dir) = &args.data_dir {
			self.data_dir = Some(data_dir.clone());
		}

		if let Some(lnd_address) = &args.lnd_address {
			self.lnd_address = Some(lnd_address.clone());
		}

		if let Some(lnd_cert_path) = &args.lnd_cert_path {
			self.lnd_cert_path = Some(lnd_cert_path.clone());
		}

		if let Some(lnd_macaroon_path) = &args.lnd_macaroon_path {
			self.lnd_macaroon_path = Some(lnd_macaroon_path.clone());
		}

		if let Some(msat_base_fee) = args.msat_base_fee {
			self.msat_base_fee = Some(msat_base_fee);
		}

		if let Some(msat_per_kb_per_hour) = args.msat_per_kb_per_hour {
			self.msat_per_kb_per_hour = Some(msat_per_kb_per_hour);
		}

		if let Some(msat_per_kb_downloaded) = args.msat_per_kb_downloaded {
			self.msat_per_kb_downloaded = Some(msat_per_kb_downloaded);
		}
	}

	fn build(self) -> io::Result<Config> {
		let grpc_addr = self
			.grpc_address
			.unwrap_or_else(|| DEFAULT_GRPC_ADDRESS.to_string())
			.parse::<SocketAddr>()
			.map_err(|e| {
				io::Error::new(
					io::ErrorKind::InvalidInput,
					format!("Invalid grpc address configured: {}", e),
				)
			})?;

		let data_dir = PathBuf::from(self.data_dir.ok_or_else(|| missing_field_err("data_dir"))?);

		let lnd = LndConfig {
			address: self.lnd_address.ok_or_else(|| missing_field_err("lnd_address"))?,
			cert_path: PathBuf::from(
				self.lnd_cert_path.ok_or_else(|| missing_field_err("lnd_cert_path"))?,
			),
			macaroon_path: PathBuf::from(
				self.lnd_macaroon_path.ok_or_else(|| missing_field_err("lnd_macaroon_path"))?,
			),
		};

		let fee_report = FeeReport {
			msat_base_cost: self.msat_base_fee.unwrap_or(DEFAULT_MSAT_BASE_FEE),
			msat_per_kb_per_hour: self
				.msat_per_kb_per_hour
				.unwrap_or(DEFAULT_MSAT_PER_KB_PER_HOUR),
			msat_per_kb_downloaded: self
				.msat_per_kb_downloaded
				.unwrap_or(DEFAULT_MSAT_PER_KB_DOWNLOADED),
		};

		let log_level = self
			.log_level
			.as_ref()
			.map(|level_str| {
				LevelFilter::from_str(level_str).map_err(|e| {
					io::Error::new(
						io::ErrorKind::InvalidInput,
						format!("Invalid log level configured: {}", e),
					)
				})
			})
			.transpose()?
			.unwrap_or(LevelFilter::Debug);

		Ok(Config { grpc_addr, data_dir, lnd, fee_report, log_level })
	}
}

/// Configuration loaded from a TOML file.
#[derive(Deserialize)]
pub struct TomlConfig {
	server: Option<ServerConfig>,
	lnd: Option<LndTomlConfig>,
	fees: Option<FeesConfig>,
	log: Option<LogConfig>,
}

#[derive(Deserialize)]
struct ServerConfig {
	grpc_address: Option<String>,
	data_dir: Option<String>,
}

#[derive(Deserialize)]
struct LndTomlConfig {
	address: Option<String>,
	cert_path: Option<String>,
	macaroon_path: Option<String>,
}

#[derive(Deserialize)]
struct FeesConfig {
	msat_base_cost: Option<i64>,
	msat_per_kb_per_hour: Option<i64>,
	msat_per_kb_downloaded: Option<i64>,
}

#[derive(Deserialize)]
struct LogConfig {
	level: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
	version,
	about = "Lightning file server configuration",
	long_about = None,
	override_usage = "ln-fileserver [config_path]"
)]
pub struct ArgsConfig {
	#[arg(required = false, help = "The configuration file for running the file server.")]
	config_file: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_GRPC_ADDRESS",
		help = "The address the gRPC listener binds to."
	)]
	grpc_address: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_DATA_DIR",
		help = "The root directory for persisted user files."
	)]
	data_dir: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_LND_ADDRESS",
		help = "The gRPC address of the backing lnd node, e.g. https://127.0.0.1:10009."
	)]
	lnd_address: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_LND_CERT_PATH",
		help = "Path to the lnd TLS certificate."
	)]
	lnd_cert_path: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_LND_MACAROON_PATH",
		help = "Path to the lnd macaroon authorizing invoice, sign and verify calls."
	)]
	lnd_macaroon_path: Option<String>,

	#[arg(
		long,
		env = "LN_FILESERVER_MSAT_BASE_FEE",
		help = "Millisatoshi base fee charged when a file slot is opened."
	)]
	msat_base_fee: Option<i64>,

	#[arg(
		long,
		env = "LN_FILESERVER_MSAT_PER_KB_PER_HOUR",
		help = "Millisatoshis per kilobyte per hour stored."
	)]
	msat_per_kb_per_hour: Option<i64>,

	#[arg(
		long,
		env = "LN_FILESERVER_MSAT_PER_KB_DOWNLOADED",
		help = "Millisatoshis per kilobyte downloaded."
	)]
	msat_per_kb_downloaded: Option<i64>,
}

pub fn load_config(args: &ArgsConfig) -> io::Result<Config> {
	let mut builder = ConfigBuilder::default();

	if let Some(path) = &args.config_file {
		let content = fs::read_to_string(path).map_err(|e| {
			io::Error::new(e.kind(), format!("Failed to read config file '{}': {}", path, e))
		})?;
		let toml_config: TomlConfig = toml::from_str(&content).map_err(|e| {
			io::Error::new(
				io::ErrorKind::InvalidData,
				format!("Config file contains invalid TOML format: {}", e),
			)
		})?;

		builder.merge_toml(toml_config);
	}

	builder.merge_args(args);

	builder.build()
}

fn missing_field_err(field: &str) -> io::Error {
	io::Error::new(
		io::ErrorKind::InvalidInput,
		format!(
			"Missing `{}`. Please provide it via config file, CLI argument, or environment variable.",
			field
		),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	const DEFAULT_CONFIG: &str = r#"
				[server]
				grpc_address = "127.0.0.1:9735"
				data_dir = "/tmp/ln-fileserver"

				[lnd]
				address = "https://127.0.0.1:10009"
				cert_path = "/path/to/tls.cert"
				macaroon_path = "/path/to/admin.macaroon"

				[fees]
				msat_base_cost = 2500
				msat_per_kb_per_hour = 2
				msat_per_kb_downloaded = 3

				[log]
				level = "Trace"
				"#;

	fn empty_args_config() -> ArgsConfig {
		ArgsConfig {
			config_file: None,
			grpc_address: None,
			data_dir: None,
			lnd_address: None,
			lnd_cert_path: None,
			lnd_macaroon_path: None,
			msat_base_fee: None,
			msat_per_kb_per_hour: None,
			msat_per_kb_downloaded: None,
		}
	}

	fn missing_field_msg(field: &str) -> String {
		format!(
			"Missing `{}`. Please provide it via config file, CLI argument, or environment variable.",
			field
		)
	}

	#[test]
	fn test_config_from_file() {
		let storage_path = std::env::temp_dir();
		let config_file_name = "test_fileserver_config_from_file.toml";

		fs::write(storage_path.join(config_file_name), DEFAULT_CONFIG).unwrap();

		let mut args_config = empty_args_config();
		args_config.config_file =
			Some(storage_path.join(config_file_name).to_string_lossy().to_string());

		let config = load_config(&args_config).unwrap();

		assert_eq!(config.grpc_addr, "127.0.0.1:9735".parse::<SocketAddr>().unwrap());
		assert_eq!(config.data_dir, PathBuf::from("/tmp/ln-fileserver"));
		assert_eq!(
			config.lnd,
			LndConfig {
				address: "https://127.0.0.1:10009".to_string(),
				cert_path: PathBuf::from("/path/to/tls.cert"),
				macaroon_path: PathBuf::from("/path/to/admin.macaroon"),
			}
		);
		assert_eq!(
			config.fee_report,
			FeeReport {
				msat_base_cost: 2500,
				msat_per_kb_per_hour: 2,
				msat_per_kb_downloaded: 3
			}
		);
		assert_eq!(config.log_level, LevelFilter::Trace);
	}

	#[test]
	fn test_config_defaults() {
		let storage_path = std::env::temp_dir();
		let config_file_name = "test_fileserver_config_defaults.toml";

		// Only the required fields: everything else falls back to defaults.
		let toml_config = r#"
				[server]
				data_dir = "/tmp/ln-fileserver"

				[lnd]
				address = "https://127.0.0.1:10009"
				cert_path = "/path/to/tls.cert"
				macaroon_path = "/path/to/admin.macaroon"
				"#;

		fs::write(storage_path.join(config_file_name), toml_config).unwrap();

		let mut args_config = empty_args_config();
		args_config.config_file =
			Some(storage_path.join(config_file_name).to_string_lossy().to_string());

		let config = load_config(&args_config).unwrap();

		assert_eq!(config.grpc_addr, DEFAULT_GRPC_ADDRESS.parse::<SocketAddr>().unwrap());
		assert_eq!(
			config.fee_report,
			FeeReport {
				msat_base_cost: DEFAULT_MSAT_BASE_FEE,
				msat_per_kb_per_hour: DEFAULT_MSAT_PER_KB_PER_HOUR,
				msat_per_kb_downloaded: DEFAULT_MSAT_PER_KB_DOWNLOADED,
			}
		);
		assert_eq!(config.log_level, LevelFilter::Debug);
	}

	#[test]
	fn test_config_missing_fields_in_file() {
		let storage_path = std::env::temp_dir();
		let config_file_name = "test_fileserver_config_missing_fields.toml";

		let mut args_config = empty_args_config();
		args_config.config_file =
			Some(storage_path.join(config_file_name).to_string_lossy().to_string());

		macro_rules! validate_missing {
			($field:expr, $err_msg:expr) => {
				let mut toml_config = DEFAULT_CONFIG.to_string();
				toml_config = remove_config_line(&toml_config, $field);
				fs::write(storage_path.join(config_file_name), &toml_config).unwrap();
				let result = load_config(&args_config);
				assert!(result.is_err());
				let err = result.unwrap_err();
				assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
				assert_eq!(err.to_string(), $err_msg);
			};
		}

		validate_missing!("macaroon_path", missing_field_msg("lnd_macaroon_path"));
		validate_missing!("cert_path", missing_field_msg("lnd_cert_path"));
		validate_missing!("address =", missing_field_msg("lnd_address"));
		validate_missing!("data_dir", missing_field_msg("data_dir"));
	}

	fn remove_config_line(config: &str, key: &str) -> String {
		config
			.lines()
			.filter(|line| !line.trim_start().starts_with(key))
			.collect::<Vec<_>>()
			.join("\n")
	}

	#[test]
	fn test_args_config_overrides_file() {
		let storage_path = std::env::temp_dir();
		let config_file_name = "test_fileserver_args_override.toml";

		fs::write(storage_path.join(config_file_name), DEFAULT_CONFIG).unwrap();

		let mut args_config = empty_args_config();
		args_config.config_file =
			Some(storage_path.join(config_file_name).to_string_lossy().to_string());
		args_config.grpc_address = Some("127.0.0.1:9999".to_string());
		args_config.msat_base_fee = Some(0);

		let config = load_config(&args_config).unwrap();

		assert_eq!(config.grpc_addr, "127.0.0.1:9999".parse::<SocketAddr>().unwrap());
		assert_eq!(config.fee_report.msat_base_cost, 0);
		// Values without an override stay as configured in the file.
		assert_eq!(config.fee_report.msat_per_kb_per_hour, 2);
	}
}
