// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Per-call signature authentication.
//!
//! Every authenticated call carries `pubkey` and `sig` metadata entries,
//! where the signature covers the fixed challenge string
//! [`AUTH_MSG`](ln_fileserver_protos::auth::AUTH_MSG). The check runs in two
//! stages: a public-method allowlist that bypasses verification entirely,
//! then signature verification against the server's own Lightning node. The
//! caller is whoever the node recovers from the signature.

use std::collections::HashSet;
use std::sync::Arc;

use ln_fileserver_protos::auth::{AUTH_MSG, PUBKEY_METADATA_KEY, SIG_METADATA_KEY};
use tonic::metadata::MetadataMap;

use crate::api::error::{ErrorCode, FileServerError};
use crate::lnd::LightningNode;

pub(crate) struct Authenticator {
	lightning: Arc<dyn LightningNode>,
	public_methods: HashSet<String>,
}

impl Authenticator {
	/// `public_methods` holds fully-qualified gRPC method names exempt from
	/// verification; the wildcard `"*"` exempts every method.
	pub(crate) fn new(
		lightning: Arc<dyn LightningNode>, public_methods: impl IntoIterator<Item = String>,
	) -> Self {
		Self { lightning, public_methods: public_methods.into_iter().collect() }
	}

	fn is_public(&self, full_method: &str) -> bool {
		self.public_methods.contains("*") || self.public_methods.contains(full_method)
	}

	/// Authenticates one call. Returns `None` for public methods and the
	/// verified pubkey otherwise.
	pub(crate) async fn authenticate(
		&self, full_method: &str, metadata: &MetadataMap,
	) -> Result<Option<String>, FileServerError> {
		if self.is_public(full_method) {
			return Ok(None);
		}

		let pubkey = metadata_value(metadata, PUBKEY_METADATA_KEY).ok_or_else(|| {
			FileServerError::new(ErrorCode::InvalidArgument, "missing pubkey in metadata")
		})?;
		let sig = metadata_value(metadata, SIG_METADATA_KEY).ok_or_else(|| {
			FileServerError::new(ErrorCode::InvalidArgument, "missing sig in metadata")
		})?;

		let recovered =
			self.lightning.verify_message(AUTH_MSG.as_bytes(), &sig).await.map_err(|e| {
				FileServerError::new(
					ErrorCode::Internal,
					format!("unable to process signature: {}", e),
				)
			})?;
		if recovered.trim() != pubkey {
			return Err(FileServerError::new(ErrorCode::Unauthenticated, "invalid signature"));
		}
		Ok(Some(pubkey))
	}
}

/// Authenticated handlers must not run without a verified caller, even if a
/// misconfigured allowlist let the call through.
pub(crate) fn require_pubkey(pubkey: Option<String>) -> Result<String, FileServerError> {
	pubkey.ok_or_else(|| {
		FileServerError::new(
			ErrorCode::Unauthenticated,
			"authenticated method reached without a verified pubkey",
		)
	})
}

fn metadata_value(metadata: &MetadataMap, key: &str) -> Option<String> {
	metadata
		.get(key)
		.and_then(|value| value.to_str().ok())
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lnd::testing::MockLightning;

	const METHOD: &str = "/api.PrivateFileStore/ListFiles";
	const PUBLIC_METHOD: &str = "/api.PrivateFileStore/GetInfo";
	const PUBKEY: &str = "02abcdef0123";

	fn authenticator() -> Authenticator {
		Authenticator::new(
			Arc::new(MockLightning::auto(PUBKEY)),
			[PUBLIC_METHOD.to_string()],
		)
	}

	fn metadata(pubkey: Option<&str>, sig: Option<&str>) -> MetadataMap {
		let mut metadata = MetadataMap::new();
		if let Some(pubkey) = pubkey {
			metadata.insert("pubkey", pubkey.parse().unwrap());
		}
		if let Some(sig) = sig {
			metadata.insert("sig", sig.parse().unwrap());
		}
		metadata
	}

	#[tokio::test]
	async fn accepts_valid_signature() {
		let auth = authenticator();
		let md = metadata(Some(PUBKEY), Some(&format!("sig:{}", PUBKEY)));

		let verified = auth.authenticate(METHOD, &md).await.unwrap();
		assert_eq!(verified.as_deref(), Some(PUBKEY));
	}

	#[tokio::test]
	async fn trims_whitespace_before_comparison() {
		let auth = authenticator();
		let md = metadata(Some(" 02abcdef0123 "), Some(&format!("sig:{}", PUBKEY)));

		let verified = auth.authenticate(METHOD, &md).await.unwrap();
		assert_eq!(verified.as_deref(), Some(PUBKEY));
	}

	#[tokio::test]
	async fn missing_fields_are_invalid_argument() {
		let auth = authenticator();

		let err = auth.authenticate(METHOD, &metadata(None, None)).await.unwrap_err();
		assert_eq!(err.code, ErrorCode::InvalidArgument);

		let err =
			auth.authenticate(METHOD, &metadata(Some(PUBKEY), None)).await.unwrap_err();
		assert_eq!(err.code, ErrorCode::InvalidArgument);

		let err =
			auth.authenticate(METHOD, &metadata(None, Some("sig:x"))).await.unwrap_err();
		assert_eq!(err.code, ErrorCode::InvalidArgument);
	}

	#[tokio::test]
	async fn recovered_pubkey_mismatch_is_unauthenticated() {
		let auth = authenticator();
		let md = metadata(Some(PUBKEY), Some("sig:03somebodyelse"));

		let err = auth.authenticate(METHOD, &md).await.unwrap_err();
		assert_eq!(err.code, ErrorCode::Unauthenticated);
	}

	#[tokio::test]
	async fn verification_failure_surfaces_as_internal() {
		let auth = authenticator();
		let md = metadata(Some(PUBKEY), Some("fail"));

		let err = auth.authenticate(METHOD, &md).await.unwrap_err();
		assert_eq!(err.code, ErrorCode::Internal);
	}

	#[tokio::test]
	async fn public_method_bypasses_verification() {
		let auth = authenticator();

		// No metadata at all, still accepted, and no pubkey in the context.
		let verified = auth.authenticate(PUBLIC_METHOD, &MetadataMap::new()).await.unwrap();
		assert!(verified.is_none());
	}

	#[tokio::test]
	async fn wildcard_makes_every_method_public() {
		let auth = Authenticator::new(
			Arc::new(MockLightning::auto(PUBKEY)),
			["*".to_string()],
		);

		let verified = auth.authenticate(METHOD, &MetadataMap::new()).await.unwrap();
		assert!(verified.is_none());
	}

	#[test]
	fn require_pubkey_rejects_missing_context() {
		let err = require_pubkey(None).unwrap_err();
		assert_eq!(err.code, ErrorCode::Unauthenticated);
		assert_eq!(require_pubkey(Some(PUBKEY.to_string())).unwrap(), PUBKEY);
	}
}
