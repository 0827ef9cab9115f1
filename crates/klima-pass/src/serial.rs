//! Serial number of an issued pass.
//!
//! The serial is the hex MD5 of `"{name}_{unix_millis}"`. It is unique enough
//! for one pass per holder per millisecond but carries no content identity:
//! identical requests at different instants get different serials, and the
//! same name at the same millisecond collides.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};

pub fn serial_number(name: &str, issued_at: DateTime<Utc>) -> String {
    let seed = format!("{}_{}", name, issued_at.timestamp_millis());
    hex::encode(Md5::digest(seed.as_bytes()))
}
