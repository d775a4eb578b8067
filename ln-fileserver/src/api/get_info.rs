// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

use ln_fileserver_protos::api::GetInfoResponse;
use ln_fileserver_protos::types::FeeReport;

pub(crate) const GET_INFO_PATH: &str = "/api.PrivateFileStore/GetInfo";

pub(crate) fn handle_get_info_request(fee_report: FeeReport) -> GetInfoResponse {
	GetInfoResponse { fee_report: Some(fee_report) }
}
