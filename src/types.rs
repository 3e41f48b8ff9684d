// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Value types moved between the attestation exchange's participants.
//!
//! These only carry the artifacts defined elsewhere in this crate; how they
//! are framed on the wire is the transport's business.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Material a node presents when joining the trust domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttestationData {
    // PEM encoded EK material, as produced by [`crate::encode_ek`]
    pub ek: Vec<u8>,
    // Attestation key parameters from the TPM driver, forwarded verbatim
    pub ak: serde_json::Value,
}

/// The two blobs of a `TPM2_MakeCredential` output. Only the TPM holding
/// the EK private half can recover the secret from them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedCredential {
    // Protected credential structure
    pub credential: Vec<u8>,
    // Encrypted seed the credential is protected with
    pub secret: Vec<u8>,
}

/// Challenge sent back against presented EK material.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Challenge {
    pub encrypted_credential: EncryptedCredential,
}

/// The recovered credential secret a node answers a [`Challenge`] with.
/// Wiped from memory on drop.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ChallengeResponse {
    pub secret: Vec<u8>,
}

/// Attestation key identifiers previously recorded for a node, kept in the
/// order they were recorded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KeyData {
    pub keys: Vec<String>,
}
