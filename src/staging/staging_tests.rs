use super::*;
use crate::item::types::Geometry;
use chrono::TimeZone;

fn sample_key() -> StagingKey {
    StagingKey::new(
        "gallery-1",
        "a0V",
        "0b7e4c52-0bd5-4e7c-a8f3-4a7d2f8a1c11",
        Geometry::new(10, 20, 100, 150),
    )
    .unwrap()
}

fn stager() -> PresignedUrlStager {
    PresignedUrlStager::new(
        "http://localhost:9000/",
        "staging",
        "eu-west-1",
        "test-access-key",
        "test-secret-key",
    )
    .unwrap()
}

fn fixed_now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(2024, 8, 24, 10, 0, 0).unwrap()
}

#[test]
fn test_staging_key_format() {
    assert_eq!(
        sample_key().to_string(),
        "gallery-1/a0V/0b7e4c52-0bd5-4e7c-a8f3-4a7d2f8a1c11/10:20:100:150"
    );
}

#[test]
fn test_staging_key_parse() {
    let parsed: StagingKey = "gallery-1/a0V/0b7e4c52-0bd5-4e7c-a8f3-4a7d2f8a1c11/10:20:100:150"
        .parse()
        .unwrap();
    assert_eq!(parsed, sample_key());
}

#[test]
fn test_staging_key_parse_rejects_malformed() {
    for bad in [
        "gallery/a0/photo",
        "gallery/a0/photo/1:2:3",
        "gallery/a0/photo/1:2:3:4/extra",
        "/a0/photo/1:2:3:4",
        "gallery/a0/photo/a:b:c:d",
    ] {
        let err = bad.parse::<StagingKey>().unwrap_err();
        assert!(matches!(err, StagingError::InvalidKey(_)), "{bad}: {err}");
    }
}

#[test]
fn test_staging_key_rejects_slash_in_component() {
    let err = StagingKey::new("a/b", "a0", "p", Geometry::new(0, 0, 1, 1)).unwrap_err();
    assert!(matches!(err, StagingError::InvalidKey(_)));
}

#[test]
fn test_validate_ttl() {
    assert!(validate_ttl(DEFAULT_UPLOAD_TTL).is_ok());
    assert!(validate_ttl(MAX_UPLOAD_TTL).is_ok());
    assert!(validate_ttl(std::time::Duration::ZERO).is_err());
    assert!(validate_ttl(MAX_UPLOAD_TTL + std::time::Duration::from_secs(1)).is_err());
}

#[test]
fn test_presigned_put_url_shape() {
    let url = stager()
        .presign_put(&sample_key(), DEFAULT_UPLOAD_TTL, fixed_now())
        .unwrap();
    assert!(url.starts_with(
        "http://localhost:9000/staging/gallery-1/a0V/0b7e4c52-0bd5-4e7c-a8f3-4a7d2f8a1c11/10%3A20%3A100%3A150?"
    ));
    assert!(url.contains("X-Amz-Algorithm=AWS4-HMAC-SHA256"));
    assert!(url.contains(
        "X-Amz-Credential=test-access-key%2F20240824%2Feu-west-1%2Fs3%2Faws4_request"
    ));
    assert!(url.contains("X-Amz-Date=20240824T100000Z"));
    assert!(url.contains("X-Amz-Expires=900"));
    assert!(url.contains("X-Amz-SignedHeaders=content-type%3Bhost"));
    let signature = url.rsplit("X-Amz-Signature=").next().unwrap();
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_presigned_put_signature_depends_on_key() {
    let stager = stager();
    let first = stager
        .presign_put(&sample_key(), DEFAULT_UPLOAD_TTL, fixed_now())
        .unwrap();
    let again = stager
        .presign_put(&sample_key(), DEFAULT_UPLOAD_TTL, fixed_now())
        .unwrap();
    assert_eq!(first, again);

    let mut other = sample_key();
    other.geometry = Geometry::new(0, 0, 10, 10);
    let different = stager
        .presign_put(&other, DEFAULT_UPLOAD_TTL, fixed_now())
        .unwrap();
    assert_ne!(
        first.rsplit('=').next().unwrap(),
        different.rsplit('=').next().unwrap()
    );
}

#[test]
fn test_presign_rejects_bad_ttl() {
    let err = stager()
        .presign_put(&sample_key(), std::time::Duration::ZERO, fixed_now())
        .unwrap_err();
    assert!(matches!(err, StagingError::InvalidTtl { .. }));
}

#[test]
fn test_stager_requires_configuration() {
    assert!(PresignedUrlStager::new("http://localhost:9000", "", "r", "a", "s").is_err());
    assert!(PresignedUrlStager::new("https://", "b", "r", "a", "s").is_err());
    assert!(PresignedUrlStager::new("http://localhost:9000", "b", "r", "", "s").is_err());
}

#[tokio::test]
async fn test_issue_upload_target_through_trait() {
    let stager: Box<dyn UploadStager> = Box::new(stager());
    let url = stager
        .issue_upload_target(&sample_key(), DEFAULT_UPLOAD_TTL)
        .await
        .unwrap();
    assert!(url.starts_with("http://localhost:9000/staging/gallery-1/"));
}
