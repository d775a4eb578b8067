// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! The per-call authentication contract.
//!
//! Authenticated calls carry two metadata entries: the caller's node identity
//! key and a signature over [`AUTH_MSG`] produced by that node's
//! `SignMessage`. The server accepts the call iff the pubkey its own node
//! recovers from the signature equals the supplied one.

/// The fixed challenge string every client signs.
pub const AUTH_MSG: &str = "lndprivatefileserver";

/// Metadata key carrying the hex-encoded identity pubkey.
pub const PUBKEY_METADATA_KEY: &str = "pubkey";

/// Metadata key carrying the signature over [`AUTH_MSG`].
pub const SIG_METADATA_KEY: &str = "sig";
