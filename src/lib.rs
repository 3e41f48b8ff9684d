// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Identity material handling for TPM-based node attestation.
//!
//! A node joining the trust domain proves possession of its TPM Endorsement
//! Key (EK). This crate implements the pieces both sides of that exchange
//! share:
//! - [`ek`]: the EK data model and its PEM transport encoding (optional
//!   manufacturer certificate plus the public key),
//! - [`identity`]: the stable SHA-256 identifier derived from the EK public
//!   key alone, and the SPIFFE ID an attested node is admitted under,
//! - [`types`]: the value types moved between agent and server during the
//!   credential-activation exchange.
//!
//! Obtaining the EK from hardware, validating certificate chains and the
//! activation cryptography itself live with the callers; this crate only
//! defines the data encodings and the identifier derivation they agree on.

pub mod ek;
pub mod error;
pub mod identity;
pub mod types;

pub use ek::{decode_ek, encode_ek, EkPublicKey, EndorsementKey};
pub use error::{DecodeError, EncodeError, HashError};
pub use identity::{agent_id, pub_key_hash, PLUGIN_NAME};
pub use types::{AttestationData, Challenge, ChallengeResponse, EncryptedCredential, KeyData};
