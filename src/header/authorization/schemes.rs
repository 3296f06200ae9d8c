//! Per-scheme credential grammars.
//!
//! Digest and AWS credentials are comma-separated `key=value` lists. The list
//! is split on every comma before quotes are looked at, so a quoted value that
//! contains a comma is not supported. One malformed part fails the whole list.

use std::collections::HashMap;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use super::credential::{
    ApiKeyCredential, AwsCredential, BasicCredential, BearerCredential, DigestCredential,
};
use super::{AuthorizationError, AuthorizationScheme};

const DIGEST_REQUIRED: [&str; 8] = [
    "username", "realm", "nonce", "uri", "response", "qop", "nc", "cnonce",
];

const AWS_REQUIRED: [&str; 3] = ["Credential", "SignedHeaders", "Signature"];

const AWS_SIGNATURE_LEN: usize = 64;

/// Standard alphabet; `=` padding optional but checked when present, and
/// non-zero trailing bits allowed.
const BASIC_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub(super) fn api_key(credentials: &str) -> ApiKeyCredential {
    ApiKeyCredential::new(credentials)
}

pub(super) fn bearer(credentials: &str) -> BearerCredential {
    BearerCredential::new(credentials)
}

/// Standard-alphabet base64 with ASCII whitespace skipped, then
/// `user:password` split on the first colon.
///
/// Bytes outside the alphabet, a dangling single character in the last group
/// and misplaced or surplus `=` are rejected.
pub(super) fn basic(credentials: &str) -> Result<BasicCredential, AuthorizationError> {
    let compact: Vec<u8> = credentials
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let decoded = BASIC_ENGINE.decode(compact)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthorizationError::InvalidUtf8)?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthorizationError::MissingColon)?;

    Ok(BasicCredential::new(username, password))
}

pub(super) fn digest(credentials: &str) -> Result<DigestCredential, AuthorizationError> {
    let scheme = AuthorizationScheme::Digest;
    let mut params: HashMap<String, String> = HashMap::new();

    for (key, value) in key_value_parts(scheme, credentials, is_digest_value)? {
        params.insert(key.to_lowercase(), value.trim_matches('"').to_owned());
    }

    if let Some(&name) = DIGEST_REQUIRED.iter().find(|name| !params.contains_key(**name)) {
        return Err(AuthorizationError::MissingParameter { scheme, name });
    }

    // Every required key is present from here on.
    let mut take = |name: &'static str| {
        params
            .remove(name)
            .ok_or(AuthorizationError::MissingParameter { scheme, name })
    };

    let credential = DigestCredential::new(
        take("username")?,
        take("realm")?,
        take("nonce")?,
        take("uri")?,
        take("response")?,
        take("qop")?,
        take("nc")?,
        take("cnonce")?,
    );

    let credential = match params.remove("opaque") {
        Some(opaque) => credential.with_opaque(opaque),
        None => credential,
    };
    let credential = match params.remove("algorithm") {
        Some(algorithm) => credential.with_algorithm(algorithm),
        None => credential,
    };

    Ok(credential)
}

pub(super) fn aws(credentials: &str) -> Result<AwsCredential, AuthorizationError> {
    let scheme = AuthorizationScheme::Aws;
    let params: HashMap<&str, &str> =
        key_value_parts(scheme, credentials, is_aws_value)?.into_iter().collect();

    let get = |name: &'static str| {
        params
            .get(name)
            .copied()
            .ok_or(AuthorizationError::MissingParameter { scheme, name })
    };

    let [credential_scope, signed_headers, signature] = [
        get(AWS_REQUIRED[0])?,
        get(AWS_REQUIRED[1])?,
        get(AWS_REQUIRED[2])?,
    ];

    if signature.len() != AWS_SIGNATURE_LEN || !signature.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AuthorizationError::InvalidSignature);
    }

    Ok(AwsCredential::new(
        scheme.as_str(),
        credential_scope,
        signed_headers,
        signature,
    ))
}

/// Splits `credentials` on commas into trimmed `key=value` pairs.
///
/// Keys are `[A-Za-z0-9_-]+`; the first `=` ends the key. `value_ok` decides
/// the value grammar. Fails on the first part that does not fit.
fn key_value_parts<'a>(
    scheme: AuthorizationScheme,
    credentials: &'a str,
    value_ok: fn(&str) -> bool,
) -> Result<Vec<(&'a str, &'a str)>, AuthorizationError> {
    credentials
        .split(',')
        .enumerate()
        .map(|(position, part)| {
            part.trim()
                .split_once('=')
                .filter(|&(key, value)| is_token(key) && value_ok(value))
                .ok_or(AuthorizationError::MalformedParameter { scheme, position })
        })
        .collect()
}

fn is_token(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Either a quoted string with no inner quotes, or a bare run with no quotes
/// at all (possibly empty).
fn is_digest_value(value: &str) -> bool {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => !inner.contains('"'),
        None => !value.contains('"'),
    }
}

/// A non-empty run without commas or spaces.
fn is_aws_value(value: &str) -> bool {
    !value.is_empty() && !value.contains([',', ' '])
}
