// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use ln_fileserver_protos::types;

use crate::io::file_store::FileSlot;

pub(crate) fn file_slot_to_proto(slot: FileSlot) -> types::FileSlot {
	types::FileSlot {
		file_id: slot.id,
		filename: slot.filename,
		description: slot.description,
		sha_checksum: slot.sha256_checksum,
		bytes: slot.bytes,
		creation_date: slot.creation_date,
		deletion_date: slot.deletion_date,
	}
}
