// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

use rsa::pkcs8::spki;
use thiserror::Error;

/// Errors from encoding EK material for transport.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("certificate encoding failed: {0}")]
    Certificate(#[source] openssl::error::ErrorStack),

    #[error("public key encoding failed: {0}")]
    PublicKey(#[source] spki::Error),
}

/// Errors from decoding transported EK material.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input contains no armored block at all.
    #[error("invalid EK material: no armored block found")]
    InvalidInput,

    #[error("certificate parse failed: {0}")]
    Certificate(#[source] openssl::error::ErrorStack),

    #[error("public key parse failed: {0}")]
    PublicKey(#[source] spki::Error),

    #[error("unrecognized block type: {0}")]
    UnrecognizedBlockType(String),

    /// The input decoded without ever populating the public key slot.
    #[error("EK material carries no public key block")]
    MissingPublicKey,
}

/// Error from deriving the EK identity digest.
#[derive(Debug, Error)]
#[error("public key serialization failed: {0}")]
pub struct HashError(#[from] spki::Error);
