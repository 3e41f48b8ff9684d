// Copyright (c) 2025 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Endorsement Key material and its transport encoding.
//!
//! EK material travels as one or two concatenated armored blocks: the
//! manufacturer certificate (when the TPM carries one) and the EK public
//! key. The public key block is what identity derivation consumes, so it is
//! the only mandatory one. Block order is not significant on decode;
//! encoding always emits the certificate first.

use std::str::FromStr;

use base64::Engine;
use log::warn;
use openssl::x509::X509;
use rsa::pkcs8::{spki, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::RsaPublicKey;
use strum::EnumString;

use crate::error::{DecodeError, EncodeError};

const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";

/// Block tags admitted in EK material.
#[derive(Debug, PartialEq, Eq, EnumString)]
enum BlockKind {
    #[strum(serialize = "CERTIFICATE")]
    Certificate,

    #[strum(serialize = "PUBLIC KEY")]
    PublicKey,
}

/// A TPM Endorsement Key, read out of hardware or decoded from transport
/// bytes. Treated as immutable once built.
#[derive(Clone, Debug)]
pub struct EndorsementKey {
    /// Manufacturer EK certificate, when the source material included one.
    pub certificate: Option<X509>,
    /// The EK public key.
    pub public_key: EkPublicKey,
}

/// The public half of an Endorsement Key.
///
/// Deployed TPMs carry RSA-2048 or ECDSA P-256 EKs. The canonical binary
/// encoding depends on the algorithm, so the distinction stays explicit.
#[derive(Clone, Debug)]
pub enum EkPublicKey {
    Rsa(RsaPublicKey),
    Ec(p256::PublicKey),
}

impl EkPublicKey {
    /// Canonical SubjectPublicKeyInfo DER encoding of the key. This is the
    /// byte sequence identity derivation is defined over.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, spki::Error> {
        let doc = match self {
            Self::Rsa(key) => key.to_public_key_der()?,
            Self::Ec(key) => key.to_public_key_der()?,
        };
        Ok(doc.into_vec())
    }

    fn to_pem(&self) -> Result<String, spki::Error> {
        match self {
            Self::Rsa(key) => key.to_public_key_pem(LineEnding::LF),
            Self::Ec(key) => key.to_public_key_pem(LineEnding::LF),
        }
    }

    fn from_spki_der(der: &[u8]) -> Result<Self, DecodeError> {
        if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
            return Ok(Self::Rsa(key));
        }
        p256::PublicKey::from_public_key_der(der)
            .map(Self::Ec)
            .map_err(DecodeError::PublicKey)
    }
}

/// Encodes EK material for transport: the certificate block first when
/// present, then the public key block. No other metadata is embedded.
pub fn encode_ek(ek: &EndorsementKey) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();

    if let Some(certificate) = &ek.certificate {
        let pem = certificate.to_pem().map_err(EncodeError::Certificate)?;
        out.extend_from_slice(&pem);
    }

    let pem = ek.public_key.to_pem().map_err(EncodeError::PublicKey)?;
    out.extend_from_slice(pem.as_bytes());

    Ok(out)
}

/// Decodes transported EK material.
///
/// The first armored block must parse. One more block is decoded when the
/// remaining bytes frame one, a later block of the same kind replacing the
/// earlier. Remaining bytes that do not frame a block are ignored, so a
/// single public key block is valid input. Input whose blocks never yield a
/// public key is rejected.
pub fn decode_ek(data: &[u8]) -> Result<EndorsementKey, DecodeError> {
    let text = std::str::from_utf8(data).map_err(|_| DecodeError::InvalidInput)?;

    let mut certificate = None;
    let mut public_key = None;

    let (block, rest) = next_block(text).ok_or(DecodeError::InvalidInput)?;
    store_block(block, &mut certificate, &mut public_key)?;

    if let Some((block, _)) = next_block(rest) {
        store_block(block, &mut certificate, &mut public_key)?;
    }

    let public_key = public_key.ok_or(DecodeError::MissingPublicKey)?;
    Ok(EndorsementKey {
        certificate,
        public_key,
    })
}

/// One armored block cut out of the input: its tag and decoded payload.
struct Block {
    tag: String,
    der: Vec<u8>,
}

/// Classifies a block by tag and writes it into the matching slot.
fn store_block(
    block: Block,
    certificate: &mut Option<X509>,
    public_key: &mut Option<EkPublicKey>,
) -> Result<(), DecodeError> {
    match BlockKind::from_str(&block.tag) {
        Ok(BlockKind::Certificate) => {
            let cert = X509::from_der(&block.der).map_err(DecodeError::Certificate)?;
            if certificate.replace(cert).is_some() {
                warn!("EK material carries two CERTIFICATE blocks, keeping the later one");
            }
        }
        Ok(BlockKind::PublicKey) => {
            let key = EkPublicKey::from_spki_der(&block.der)?;
            if public_key.replace(key).is_some() {
                warn!("EK material carries two PUBLIC KEY blocks, keeping the later one");
            }
        }
        Err(_) => return Err(DecodeError::UnrecognizedBlockType(block.tag)),
    }
    Ok(())
}

/// Scans `input` for the next well-formed armored block, skipping anything
/// that does not frame and base64-decode. Returns the block and the input
/// remaining after it.
fn next_block(mut input: &str) -> Option<(Block, &str)> {
    loop {
        let start = input.find(BEGIN_MARKER)?;
        let after_begin = &input[start + BEGIN_MARKER.len()..];

        let tag_len = after_begin.find("-----")?;
        let tag = &after_begin[..tag_len];
        if tag.is_empty() || tag.contains('\n') {
            input = after_begin;
            continue;
        }

        let body = &after_begin[tag_len + 5..];
        let end_marker = format!("{END_MARKER}{tag}-----");
        let Some(end) = body.find(&end_marker) else {
            // Unterminated block, scan on for a later one.
            input = after_begin;
            continue;
        };
        let rest = &body[end + end_marker.len()..];

        let payload: String = body[..end]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        match base64::engine::general_purpose::STANDARD.decode(payload) {
            Ok(der) => {
                return Some((
                    Block {
                        tag: tag.to_string(),
                        der,
                    },
                    rest,
                ))
            }
            // Framed but not decodable, scan past it.
            Err(_) => input = rest,
        }
    }
}
