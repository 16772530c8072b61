//! S3-compatible presigned upload URLs.
//!
//! [`PresignedUrlStager`] signs a path-style `PUT` for one staging object with
//! AWS Signature Version 4, query-string form. The URL carries the credential
//! scope, expiry and signature; the uploading client needs no credentials but
//! must send `Content-Type: image/*`, which is part of the signed headers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;
use tracing::debug;

use super::{StagingError, StagingKey, UploadStager};

/// Upload window handed to clients unless configured otherwise.
pub const DEFAULT_UPLOAD_TTL: Duration = Duration::from_secs(900);

/// Longest window SigV4 allows (7 days).
pub const MAX_UPLOAD_TTL: Duration = Duration::from_secs(604_800);

/// Content type every upload must declare.
pub const UPLOAD_CONTENT_TYPE: &str = "image/*";

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";
const SIGNED_HEADERS: &str = "content-type;host";

/// Reject windows outside `1s..=7d`.
pub fn validate_ttl(ttl: Duration) -> Result<(), StagingError> {
    if ttl.as_secs() == 0 || ttl > MAX_UPLOAD_TTL {
        return Err(StagingError::InvalidTtl {
            ttl,
            max: MAX_UPLOAD_TTL,
        });
    }
    Ok(())
}

/// Presigns uploads into one bucket of an S3-compatible endpoint.
#[derive(Clone)]
pub struct PresignedUrlStager {
    endpoint: String,
    host: String,
    bucket: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
}

impl std::fmt::Debug for PresignedUrlStager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresignedUrlStager")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

impl PresignedUrlStager {
    pub fn new(
        endpoint: &str,
        bucket: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<Self, StagingError> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let host = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .unwrap_or(&endpoint)
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();
        if host.is_empty() {
            return Err(StagingError::Service(format!(
                "endpoint '{endpoint}' has no host"
            )));
        }
        for (name, value) in [
            ("bucket", bucket),
            ("region", region),
            ("access key id", access_key_id),
            ("secret access key", secret_access_key),
        ] {
            if value.is_empty() {
                return Err(StagingError::Service(format!("{name} is not configured")));
            }
        }
        Ok(Self {
            endpoint,
            host,
            bucket: bucket.to_string(),
            region: region.to_string(),
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Presign a `PUT` of `key` valid for `ttl` from `now`.
    pub fn presign_put(
        &self,
        key: &StagingKey,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, StagingError> {
        validate_ttl(ttl)?;
        let date = now.format("%Y%m%d").to_string();
        let timestamp = now.format("%Y%m%dT%H%M%SZ").to_string();
        let scope = format!("{date}/{}/{SERVICE}/aws4_request", self.region);
        let path = encode(&format!("/{}/{key}", self.bucket), true);

        let query = BTreeMap::from([
            ("X-Amz-Algorithm", ALGORITHM.to_string()),
            (
                "X-Amz-Credential",
                format!("{}/{scope}", self.access_key_id),
            ),
            ("X-Amz-Date", timestamp.clone()),
            ("X-Amz-Expires", ttl.as_secs().to_string()),
            ("X-Amz-SignedHeaders", SIGNED_HEADERS.to_string()),
        ]);
        let query = query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k, false), encode(v, false)))
            .collect::<Vec<_>>()
            .join("&");

        let canonical_request = format!(
            "PUT\n{path}\n{query}\ncontent-type:{UPLOAD_CONTENT_TYPE}\nhost:{}\n\n{SIGNED_HEADERS}\nUNSIGNED-PAYLOAD",
            self.host
        );
        let string_to_sign = format!(
            "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );
        let signature = self.signature(&date, &string_to_sign)?;
        Ok(format!(
            "{}{path}?{query}&X-Amz-Signature={signature}",
            self.endpoint
        ))
    }

    fn signature(&self, date: &str, string_to_sign: &str) -> Result<String, StagingError> {
        let secret = format!("AWS4{}", self.secret_access_key);
        let mut key = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
        for part in [self.region.as_bytes(), SERVICE.as_bytes(), b"aws4_request"] {
            key = hmac_sha256(&key, part)?;
        }
        Ok(hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?))
    }
}

#[async_trait]
impl UploadStager for PresignedUrlStager {
    async fn issue_upload_target(
        &self,
        key: &StagingKey,
        ttl: Duration,
    ) -> Result<String, StagingError> {
        let url = self.presign_put(key, ttl, Utc::now())?;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "Issued upload target");
        Ok(url)
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, StagingError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| StagingError::Service(format!("invalid signing key: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// SigV4 URI encoding. `/` is kept only in paths.
fn encode(value: &str, keep_slash: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b'/' if keep_slash => out.push('/'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}
