// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use ln_fileserver_protos::api::ListFilesResponse;
use ln_fileserver_protos::types::FileSlot;

use crate::api::error::FileServerError;
use crate::service::Context;
use crate::util::proto_adapter::file_slot_to_proto;

pub(crate) const LIST_FILES_PATH: &str = "/api.PrivateFileStore/ListFiles";

pub(crate) async fn handle_list_files_request(
	context: Context,
) -> Result<ListFilesResponse, FileServerError> {
	let slots = context.store.list_slots(&context.pubkey).await?;

	let mut files: Vec<FileSlot> = slots.into_values().map(file_slot_to_proto).collect();
	files.sort_by(|a, b| {
		a.creation_date.cmp(&b.creation_date).then_with(|| a.file_id.cmp(&b.file_id))
	});
	Ok(ListFilesResponse { files })
}
