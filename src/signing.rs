//! Keyed document signatures and verification URLs.
//!
//! The signature covers a fixed, ordered subset of record fields so the
//! same record and key always produce the same hex digest. No timestamp or
//! randomness enters the signed payload.

use crate::record::PermitRecord;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Canonical signed payload. Field order is the serialization order, so the
/// JSON bytes are stable for a given record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedFields<'a> {
    reference: &'a str,
    name: String,
    issue_date: &'a str,
}

/// HMAC-SHA256 hex digest over the record's primary reference, holder name
/// and issue date.
pub fn compute_signature(record: &PermitRecord, key: &str) -> String {
    let payload = SignedFields {
        reference: record.primary_reference().unwrap_or(""),
        name: record.full_name(),
        issue_date: &record.issue_date,
    };
    let canonical =
        serde_json::to_string(&payload).expect("signed payload serialization cannot fail");
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Public verification URL printed on documents:
/// `{base}/verify/{primary reference}`.
pub fn public_verification_url(record: &PermitRecord, base: &str) -> String {
    format!(
        "{}/verify/{}",
        base.trim_end_matches('/'),
        record.primary_reference().unwrap_or("")
    )
}

/// Internal verification-page URL for a stored record id.
pub fn document_verification_url(id: u64, base: &str) -> String {
    format!("{}/permits/{id}/verify-document", base.trim_end_matches('/'))
}
