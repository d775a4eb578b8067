// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Wire schema of the ln-fileserver API.
//!
//! The `api` and `types` modules are generated from the protobuf definitions
//! under `src/proto/` and checked in, so that regular builds never need
//! `protoc`. Regenerate with `RUSTFLAGS="--cfg genproto" cargo build`.
//!
//! The hand-written modules hold the parts of the protocol contract both
//! sides must agree on beyond message framing: the authentication challenge
//! ([`auth`]) and the fee arithmetic ([`fees`]).

pub mod api;
pub mod auth;
pub mod fees;
pub mod types;
