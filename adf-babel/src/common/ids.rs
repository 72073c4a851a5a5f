//! Local identifiers for task lists, task items, statuses and pending media.

use chrono::Utc;
use rand::Rng;

/// Prefix of the placeholder id carried by media that has not been uploaded.
pub const PENDING_PREFIX: &str = "__PENDING_UPLOAD_";
const PENDING_SUFFIX: &str = "__";

/// Returns `<low 32 bits of the clock in ns, hex>-<16 random hex digits>`.
pub fn generate_local_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() & 0xFFFF_FFFF;
    let mut bytes = [0u8; 8];
    rand::rng().fill(&mut bytes);
    format!("{nanos:x}-{}", hex::encode(bytes))
}

/// A fresh placeholder id for a media node awaiting upload.
pub fn pending_media_id() -> String {
    format!("{PENDING_PREFIX}{}{PENDING_SUFFIX}", generate_local_id())
}

pub fn is_pending_media_id(id: &str) -> bool {
    id.starts_with(PENDING_PREFIX) && id.ends_with(PENDING_SUFFIX)
}
