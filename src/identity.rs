// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Node identity derived from Endorsement Key material.

use sha2::{Digest, Sha256};

use crate::ek::EndorsementKey;
use crate::error::HashError;

/// Name this attestor registers under on both the agent and server side.
pub const PLUGIN_NAME: &str = "tpm";

/// Derives the stable identifier of an EK: the SHA-256 digest of the public
/// key's SubjectPublicKeyInfo DER encoding, rendered as lowercase hex.
///
/// The certificate never contributes, so material with and without one
/// yields the same identifier for the same key.
pub fn pub_key_hash(ek: &EndorsementKey) -> Result<String, HashError> {
    let der = ek.public_key.to_spki_der()?;
    Ok(hex::encode(Sha256::digest(der)))
}

/// Composes the SPIFFE ID an attested node is admitted under.
///
/// `trust_domain` is taken verbatim; supplying a valid trust domain name is
/// the caller's responsibility. Distinct hashes yield distinct IDs.
pub fn agent_id(trust_domain: &str, pub_hash: &str) -> String {
    format!(
        "spiffe://{}/{}",
        trust_domain,
        ["spire", "agent", PLUGIN_NAME, pub_hash].join("/")
    )
}
