// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Client library for the ln-fileserver.
//!
//! Wraps the generated gRPC client with per-call signature authentication
//! and drives the paid upload and download conversations, settling every
//! quoted invoice through the caller's own lnd node.

pub mod client;
pub mod error;

pub use ln_fileserver_protos;
