//! Hashing and encoding primitives for the goform login protocol.
//!
//! Everything here is pure and deterministic. The firmware accepts the login
//! password in one of three encodings; which one a given firmware build
//! expects is not advertised in any response we have sampled, so the choice
//! is left to the caller (see [`PasswordEncoding`]).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use md5::Md5;
use sha2::{Digest, Sha256};

/// Password encoding variant expected by the firmware's LOGIN handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordEncoding {
    /// `sha256_hex(base64(password))`
    Sha256Base64,
    /// `sha256_hex(sha256_hex(password) + challenge)`, salted with the
    /// per-session LD challenge. The variant observed on current firmware.
    #[default]
    DoubleSha256WithChallenge,
    /// `base64(password)`, used by the oldest firmware builds.
    PlainBase64,
}

/// SHA-256 of the UTF-8 bytes of `input`, as uppercase hex.
pub fn sha256_hex(input: &str) -> String {
    hex::encode_upper(Sha256::digest(input.as_bytes()))
}

/// MD5 of the UTF-8 bytes of `input`, as uppercase hex.
///
/// Used only for the SMS change fingerprint, never for authentication.
pub fn md5_hex(input: &str) -> String {
    hex::encode_upper(Md5::digest(input.as_bytes()))
}

/// Standard Base64 of the UTF-8 bytes of `input`.
pub fn base64_utf8(input: &str) -> String {
    BASE64.encode(input.as_bytes())
}

/// Computes the login hash for `password` under the given encoding.
///
/// `challenge` is the per-session LD value; the two non-challenge variants
/// ignore it.
pub fn password_hash(password: &str, challenge: &str, encoding: PasswordEncoding) -> String {
    match encoding {
        PasswordEncoding::Sha256Base64 => sha256_hex(&base64_utf8(password)),
        PasswordEncoding::DoubleSha256WithChallenge => {
            let mut salted = sha256_hex(password);
            salted.push_str(challenge);
            sha256_hex(&salted)
        }
        PasswordEncoding::PlainBase64 => base64_utf8(password),
    }
}

/// Decodes the firmware's hex-wrapped UTF-16 SMS body encoding.
///
/// The field is a run of hex byte pairs: one header byte, then big-endian
/// UTF-16 code units. Only the low byte of each code unit is kept, so the
/// decode starts at character offset 2 and takes one byte pair at stride 4.
///
/// Decoding is best-effort: the field is device-controlled and arrives with
/// no length or charset guarantees, so malformed chunks are skipped rather
/// than reported.
pub fn decode_hex_utf16(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::new();
    let mut i = 2;
    while i + 2 <= bytes.len() {
        if let Some(b) = std::str::from_utf8(&bytes[i..i + 2])
            .ok()
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        {
            out.push(b as char);
        }
        i += 4;
    }
    out
}
