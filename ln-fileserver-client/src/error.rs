// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use std::fmt;
use std::io;

/// Errors surfaced by [`FileServerClient`](crate::client::FileServerClient).
#[derive(Debug)]
pub enum ClientError {
	/// Establishing or using the gRPC connection failed.
	Transport(tonic::transport::Error),
	/// The server answered a call with an error status.
	Rpc(tonic::Status),
	/// A call against the local lnd node failed.
	Lnd(String),
	/// An invoice payment failed.
	Payment(String),
	/// The server violated the conversation protocol.
	Protocol(String),
	/// Local file I/O failed.
	Io(io::Error),
}

impl fmt::Display for ClientError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ClientError::Transport(e) => write!(f, "transport error: {}", e),
			ClientError::Rpc(status) => {
				write!(f, "rpc failed: {} ({:?})", status.message(), status.code())
			},
			ClientError::Lnd(message) => write!(f, "lnd error: {}", message),
			ClientError::Payment(message) => write!(f, "payment failed: {}", message),
			ClientError::Protocol(message) => write!(f, "protocol violation: {}", message),
			ClientError::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for ClientError {}

impl From<tonic::transport::Error> for ClientError {
	fn from(error: tonic::transport::Error) -> Self {
		ClientError::Transport(error)
	}
}

impl From<tonic::Status> for ClientError {
	fn from(status: tonic::Status) -> Self {
		ClientError::Rpc(status)
	}
}

impl From<io::Error> for ClientError {
	fn from(error: io::Error) -> Self {
		ClientError::Io(error)
	}
}
