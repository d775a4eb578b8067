// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use std::sync::Arc;

use async_trait::async_trait;
use fedimint_tonic_lnd::invoicesrpc::SubscribeSingleInvoiceRequest;
use fedimint_tonic_lnd::lnrpc;
use log::warn;
use tokio::sync::{oneshot, Mutex};

use crate::lnd::{InvoiceTicket, LightningNode, LndError, Settlement};
use crate::util::config::LndConfig;

/// [`LightningNode`] backed by an external LND node over its gRPC API.
pub(crate) struct LndClient {
	// The underlying client hands out `&mut` sub-clients, so concurrent RPC
	// sessions serialize their calls through this mutex. Calls are short;
	// settlement watches run on their own task and hold no lock.
	client: Arc<Mutex<fedimint_tonic_lnd::Client>>,
}

impl LndClient {
	pub(crate) async fn connect(config: &LndConfig) -> Result<Self, LndError> {
		let client = fedimint_tonic_lnd::connect(
			config.address.clone(),
			config.cert_path.clone(),
			config.macaroon_path.clone(),
		)
		.await
		.map_err(|e| LndError::new(format!("unable to connect to lnd: {:?}", e)))?;
		Ok(Self { client: Arc::new(Mutex::new(client)) })
	}

	/// Returns the identity pubkey of the backing node, verifying the
	/// connection along the way.
	pub(crate) async fn identity_pubkey(&self) -> Result<String, LndError> {
		let mut client = self.client.lock().await;
		let info = client
			.lightning()
			.get_info(lnrpc::GetInfoRequest {})
			.await
			.map_err(|e| LndError::new(format!("get_info failed: {}", e)))?
			.into_inner();
		Ok(info.identity_pubkey)
	}
}

#[async_trait]
impl LightningNode for LndClient {
	async fn create_invoice(
		&self, memo: &str, value_msat: i64, expiry_secs: i64,
	) -> Result<InvoiceTicket, LndError> {
		let invoice = lnrpc::Invoice {
			memo: memo.to_string(),
			value_msat,
			expiry: expiry_secs,
			..Default::default()
		};
		let mut client = self.client.lock().await;
		let response = client
			.lightning()
			.add_invoice(invoice)
			.await
			.map_err(|e| LndError::new(format!("add_invoice failed: {}", e)))?
			.into_inner();
		Ok(InvoiceTicket { payment_request: response.payment_request, r_hash: response.r_hash })
	}

	async fn watch_invoice(&self, r_hash: Vec<u8>) -> Result<Settlement, LndError> {
		let mut stream = {
			let mut client = self.client.lock().await;
			client
				.invoices()
				.subscribe_single_invoice(SubscribeSingleInvoiceRequest { r_hash })
				.await
				.map_err(|e| LndError::new(format!("subscribe_single_invoice failed: {}", e)))?
				.into_inner()
		};

		let (mut tx, rx) = oneshot::channel();
		tokio::spawn(async move {
			let watch = async {
				loop {
					match stream.message().await {
						Ok(Some(invoice)) => {
							if invoice.state == lnrpc::invoice::InvoiceState::Settled as i32 {
								return Ok(());
							}
						},
						Ok(None) => {
							return Err(LndError::new(
								"invoice watch stream closed before settlement",
							));
						},
						Err(e) => {
							return Err(LndError::new(format!("invoice watch failed: {}", e)));
						},
					}
				}
			};
			tokio::select! {
				// The engine dropped its settlement handle; stop watching.
				_ = tx.closed() => {},
				result = watch => {
					if let Err(e) = &result {
						warn!("invoice settlement watch errored: {}", e);
					}
					let _ = tx.send(result);
				},
			}
		});
		Ok(Settlement::new(rx))
	}

	async fn sign_message(&self, msg: &[u8]) -> Result<String, LndError> {
		let mut client = self.client.lock().await;
		let response = client
			.lightning()
			.sign_message(lnrpc::SignMessageRequest { msg: msg.to_vec(), ..Default::default() })
			.await
			.map_err(|e| LndError::new(format!("sign_message failed: {}", e)))?
			.into_inner();
		Ok(response.signature)
	}

	async fn verify_message(&self, msg: &[u8], signature: &str) -> Result<String, LndError> {
		let mut client = self.client.lock().await;
		let response = client
			.lightning()
			.verify_message(lnrpc::VerifyMessageRequest {
				msg: msg.to_vec(),
				signature: signature.to_string(),
				..Default::default()
			})
			.await
			.map_err(|e| LndError::new(format!("verify_message failed: {}", e)))?
			.into_inner();
		// `valid` only holds when the signer is present in the node's channel
		// graph; the recovered pubkey is the actual authentication check.
		Ok(response.pubkey)
	}
}
