//! Constants shared across the pass service.

/// Content type of a signed wallet pass archive.
pub const PKPASS_CONTENT_TYPE: &str = "application/vnd.apple.pkpass";

/// File extension used when a pass is persisted or downloaded.
pub const PKPASS_EXTENSION: &str = "pkpass";

/// Default request body ceiling in MiB.
pub const DEFAULT_MAX_BODY_SIZE_MB: usize = 15;

/// Default bound on a single pipeline invocation.
pub const DEFAULT_SIGNING_TIMEOUT_SECS: u64 = 10;

/// Default listen port, matching the mobile client's default server address.
pub const DEFAULT_PORT: u16 = 3000;

/// File names inside the certificate directory.
pub const WWDR_CERT_FILE: &str = "wwdr.pem";
pub const SIGNER_CERT_FILE: &str = "signerCert.pem";
pub const SIGNER_KEY_FILE: &str = "signerKey.key";

/// Default bound on in-flight HTTP requests across all routes.
pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 256;
