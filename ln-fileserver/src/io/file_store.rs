// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Owner-scoped file catalog and blob storage.
//!
//! Layout on disk: one directory per user keyed by pubkey, holding a
//! `user.json` catalog of slots plus one opaque blob file per slot id.
//! Every operation is scoped by pubkey, so cross-tenant access is impossible
//! by construction. Catalog mutations for one user are serialized behind a
//! per-user lock and persisted atomically via temp-file rename.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use hex::DisplayHex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::util::unix_time_now;

const USER_CONFIG_FILE: &str = "user.json";
const HASH_BUF_SIZE: usize = 64 * 1024;

/// A file slot as persisted in the per-user catalog.
///
/// This type is separate from the proto `FileSlot` to decouple the storage
/// format from the API format; `bytes`, `sha256_checksum` and
/// `creation_date` stay at their defaults until [`FileStore::finalize`] has
/// run for the slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FileSlot {
	pub(crate) id: String,
	pub(crate) filename: String,
	pub(crate) description: String,
	#[serde(default)]
	pub(crate) sha256_checksum: String,
	#[serde(default)]
	pub(crate) bytes: i64,
	#[serde(default)]
	pub(crate) creation_date: i64,
	pub(crate) deletion_date: i64,
}

/// The per-user catalog record. One per user, created lazily on first file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct UserConfig {
	pub(crate) pubkey: String,
	#[serde(default)]
	pub(crate) file_slots: HashMap<String, FileSlot>,
}

pub(crate) struct FileStore {
	base_dir: PathBuf,
	user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileStore {
	pub(crate) async fn new(base_dir: PathBuf) -> io::Result<Self> {
		fs::create_dir_all(&base_dir).await?;
		Ok(Self { base_dir, user_locks: Mutex::new(HashMap::new()) })
	}

	fn user_dir(&self, pubkey: &str) -> PathBuf {
		self.base_dir.join(pubkey)
	}

	fn config_path(&self, pubkey: &str) -> PathBuf {
		self.user_dir(pubkey).join(USER_CONFIG_FILE)
	}

	fn blob_path(&self, pubkey: &str, slot_id: &str) -> PathBuf {
		self.user_dir(pubkey).join(slot_id)
	}

	async fn lock_user(&self, pubkey: &str) -> OwnedMutexGuard<()> {
		let lock = {
			let mut locks = self.user_locks.lock().await;
			Arc::clone(locks.entry(pubkey.to_string()).or_default())
		};
		lock.lock_owned().await
	}

	async fn read_config(&self, pubkey: &str) -> io::Result<UserConfig> {
		let bytes = match fs::read(self.config_path(pubkey)).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(io::Error::new(io::ErrorKind::NotFound, "no user config found"));
			},
			Err(e) => return Err(e),
		};
		serde_json::from_slice(&bytes).map_err(|e| {
			io::Error::new(
				io::ErrorKind::InvalidData,
				format!("unable to decode user config: {}", e),
			)
		})
	}

	async fn persist_config(&self, config: &UserConfig) -> io::Result<()> {
		let path = self.config_path(&config.pubkey);
		let tmp_path = path.with_extension("json.tmp");
		let bytes = serde_json::to_vec_pretty(config).map_err(|e| {
			io::Error::new(
				io::ErrorKind::InvalidData,
				format!("unable to encode user config: {}", e),
			)
		})?;
		fs::write(&tmp_path, &bytes).await?;
		fs::rename(&tmp_path, &path).await
	}

	/// Creates the user record if it does not exist yet. Caller must hold the
	/// user lock.
	async fn ensure_user(&self, pubkey: &str) -> io::Result<UserConfig> {
		match self.read_config(pubkey).await {
			Ok(config) => Ok(config),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				fs::create_dir_all(self.user_dir(pubkey)).await?;
				let config =
					UserConfig { pubkey: pubkey.to_string(), file_slots: HashMap::new() };
				self.persist_config(&config).await?;
				Ok(config)
			},
			Err(e) => Err(e),
		}
	}

	/// Returns all slots owned by `pubkey`, failing with `NotFound` for
	/// unknown users.
	pub(crate) async fn list_slots(&self, pubkey: &str) -> io::Result<HashMap<String, FileSlot>> {
		Ok(self.read_config(pubkey).await?.file_slots)
	}

	pub(crate) async fn get_or_create_user(&self, pubkey: &str) -> io::Result<UserConfig> {
		let _guard = self.lock_user(pubkey).await;
		self.ensure_user(pubkey).await
	}

	/// Allocates a fresh slot for an upload in progress. The slot is not
	/// recorded in the catalog until [`FileStore::finalize`].
	pub(crate) async fn new_slot(
		&self, pubkey: &str, filename: &str, description: &str, deletion_date: i64,
	) -> io::Result<FileSlot> {
		let _guard = self.lock_user(pubkey).await;
		self.ensure_user(pubkey).await?;

		let mut id_bytes = [0u8; 16];
		rand::thread_rng().fill(&mut id_bytes);
		Ok(FileSlot {
			id: id_bytes.to_lower_hex_string(),
			filename: filename.to_string(),
			description: description.to_string(),
			sha256_checksum: String::new(),
			bytes: 0,
			creation_date: 0,
			deletion_date,
		})
	}

	/// Opens the blob of an in-progress upload. The handle is readable as
	/// well, since [`FileStore::finalize`] hashes through it afterwards.
	pub(crate) async fn open_writer(&self, pubkey: &str, slot_id: &str) -> io::Result<fs::File> {
		fs::OpenOptions::new()
			.read(true)
			.write(true)
			.create(true)
			.truncate(true)
			.open(self.blob_path(pubkey, slot_id))
			.await
	}

	pub(crate) async fn open_reader(&self, pubkey: &str, slot_id: &str) -> io::Result<fs::File> {
		fs::File::open(self.blob_path(pubkey, slot_id)).await
	}

	/// Completes an upload: computes size and checksum of the written blob,
	/// stamps the creation time and records the slot in the catalog.
	pub(crate) async fn finalize(
		&self, pubkey: &str, mut slot: FileSlot, file: &mut fs::File,
	) -> io::Result<FileSlot> {
		file.seek(io::SeekFrom::Start(0)).await?;
		let mut hasher = Sha256::new();
		let mut buf = vec![0u8; HASH_BUF_SIZE];
		loop {
			let n = file.read(&mut buf).await?;
			if n == 0 {
				break;
			}
			hasher.update(&buf[..n]);
		}
		let digest: [u8; 32] = hasher.finalize().into();
		slot.sha256_checksum = digest.to_lower_hex_string();
		slot.bytes = file.metadata().await?.len() as i64;
		slot.creation_date = unix_time_now();

		let _guard = self.lock_user(pubkey).await;
		let mut config = self.read_config(pubkey).await?;
		config.file_slots.insert(slot.id.clone(), slot.clone());
		self.persist_config(&config).await?;
		Ok(slot)
	}

	pub(crate) async fn get_slot(&self, pubkey: &str, slot_id: &str) -> io::Result<FileSlot> {
		let config = self.read_config(pubkey).await?;
		config.file_slots.get(slot_id).cloned().ok_or_else(|| {
			io::Error::new(io::ErrorKind::NotFound, "file not found or user does not own file")
		})
	}

	/// Removes the blob of an upload that will never be finalized. Missing
	/// blobs are fine: the writer may never have been opened.
	pub(crate) async fn discard_blob(&self, pubkey: &str, slot_id: &str) -> io::Result<()> {
		match fs::remove_file(self.blob_path(pubkey, slot_id)).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e),
		}
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::path::PathBuf;

	use rand::Rng;

	/// A unique scratch directory for one test, under the system temp dir.
	pub(crate) fn scratch_dir(tag: &str) -> PathBuf {
		let nonce: u64 = rand::thread_rng().gen();
		std::env::temp_dir().join(format!("ln-fileserver-{}-{:016x}", tag, nonce))
	}
}

#[cfg(test)]
mod tests {
	use tokio::io::AsyncWriteExt;

	use super::testing::scratch_dir;
	use super::*;

	const PUBKEY: &str = "02aabbccdd";
	const OTHER_PUBKEY: &str = "03ffeeddcc";

	async fn new_store(tag: &str) -> FileStore {
		FileStore::new(scratch_dir(tag)).await.unwrap()
	}

	#[tokio::test]
	async fn get_or_create_user_is_idempotent() {
		let store = new_store("store-create").await;

		let created = store.get_or_create_user(PUBKEY).await.unwrap();
		assert_eq!(created.pubkey, PUBKEY);
		assert!(created.file_slots.is_empty());

		let again = store.get_or_create_user(PUBKEY).await.unwrap();
		assert_eq!(again.pubkey, PUBKEY);
		assert!(again.file_slots.is_empty());
	}

	#[tokio::test]
	async fn unknown_user_is_not_found() {
		let store = new_store("store-unknown").await;

		let err = store.list_slots(PUBKEY).await.unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[tokio::test]
	async fn new_slot_creates_user_and_unique_ids() {
		let store = new_store("store-slots").await;

		let first = store.new_slot(PUBKEY, "a.txt", "first", 4000).await.unwrap();
		let second = store.new_slot(PUBKEY, "b.txt", "second", 4000).await.unwrap();
		assert_ne!(first.id, second.id);
		assert!(first.sha256_checksum.is_empty());
		assert_eq!(first.bytes, 0);
		assert_eq!(first.creation_date, 0);

		// The user now exists, but neither slot is in the catalog yet.
		assert!(store.list_slots(PUBKEY).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn finalize_records_size_checksum_and_slot() {
		let store = new_store("store-finalize").await;
		let content = b"lightning pays for these bytes";

		let slot = store.new_slot(PUBKEY, "paid.bin", "", 7200).await.unwrap();
		let mut writer = store.open_writer(PUBKEY, &slot.id).await.unwrap();
		writer.write_all(content).await.unwrap();
		writer.flush().await.unwrap();

		let finalized = store.finalize(PUBKEY, slot.clone(), &mut writer).await.unwrap();
		assert_eq!(finalized.bytes, content.len() as i64);
		assert!(finalized.creation_date > 0);
		let expected: [u8; 32] = Sha256::digest(content).into();
		assert_eq!(finalized.sha256_checksum, expected.to_lower_hex_string());

		let listed = store.list_slots(PUBKEY).await.unwrap();
		assert_eq!(listed.len(), 1);
		assert_eq!(listed.get(&slot.id), Some(&finalized));
		assert_eq!(store.get_slot(PUBKEY, &slot.id).await.unwrap(), finalized);
	}

	#[tokio::test]
	async fn slots_are_tenant_scoped() {
		let store = new_store("store-tenants").await;

		let slot = store.new_slot(PUBKEY, "mine.txt", "", 7200).await.unwrap();
		let mut writer = store.open_writer(PUBKEY, &slot.id).await.unwrap();
		writer.write_all(b"private").await.unwrap();
		writer.flush().await.unwrap();
		store.finalize(PUBKEY, slot.clone(), &mut writer).await.unwrap();

		store.get_or_create_user(OTHER_PUBKEY).await.unwrap();
		let err = store.get_slot(OTHER_PUBKEY, &slot.id).await.unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[tokio::test]
	async fn discard_blob_removes_unfinalized_bytes() {
		let store = new_store("store-discard").await;

		let slot = store.new_slot(PUBKEY, "gone.txt", "", 7200).await.unwrap();
		let mut writer = store.open_writer(PUBKEY, &slot.id).await.unwrap();
		writer.write_all(b"never paid for").await.unwrap();
		writer.flush().await.unwrap();
		drop(writer);

		store.discard_blob(PUBKEY, &slot.id).await.unwrap();
		assert!(store.open_reader(PUBKEY, &slot.id).await.is_err());
		// Discarding twice is fine.
		store.discard_blob(PUBKEY, &slot.id).await.unwrap();
	}
}
