use std::fmt;
use std::io;

use tonic::Status;

/// An error surfaced by a request handler or protocol engine.
#[derive(Debug)]
pub(crate) struct FileServerError {
	// The error message containing a generic description of the error condition in English.
	// It is intended for a human audience only and should not be parsed to extract any
	// information programmatically. Client-side code may use it for logging only.
	pub(crate) message: String,

	// The error code uniquely identifying an error condition.
	// It is meant to be read and understood programmatically by code that detects/handles
	// errors by type.
	pub(crate) code: ErrorCode,
}

impl FileServerError {
	pub(crate) fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self { message: message.into(), code }
	}
}

impl fmt::Display for FileServerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}: {}", self.code, self.message)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ErrorCode {
	/// Signature invalid or the recovered pubkey mismatched the supplied one.
	Unauthenticated,

	/// Missing metadata field, malformed opening frame, or a frame out of
	/// state-machine order.
	InvalidArgument,

	/// A request precondition does not hold, e.g. the minimum storage time.
	FailedPrecondition,

	/// User or file slot absent.
	NotFound,

	/// Invoice creation or the settlement watch failed.
	PaymentSystem,

	/// Settlement was not observed before cancellation or expiry.
	PaymentTimeout,

	/// Metadata or blob I/O failure.
	Storage,

	/// The client disconnected or the call deadline was exceeded.
	Canceled,

	/// Everything else.
	Internal,
}

impl From<FileServerError> for Status {
	fn from(error: FileServerError) -> Self {
		let FileServerError { message, code } = error;
		match code {
			ErrorCode::Unauthenticated => Status::unauthenticated(message),
			ErrorCode::InvalidArgument => Status::invalid_argument(message),
			ErrorCode::FailedPrecondition => Status::failed_precondition(message),
			ErrorCode::NotFound => Status::not_found(message),
			ErrorCode::PaymentSystem => Status::internal(message),
			ErrorCode::PaymentTimeout => Status::deadline_exceeded(message),
			ErrorCode::Storage => Status::internal(message),
			ErrorCode::Canceled => Status::cancelled(message),
			ErrorCode::Internal => Status::internal(message),
		}
	}
}

impl From<io::Error> for FileServerError {
	fn from(error: io::Error) -> Self {
		let code = if error.kind() == io::ErrorKind::NotFound {
			ErrorCode::NotFound
		} else {
			ErrorCode::Storage
		};
		Self::new(code, error.to_string())
	}
}
