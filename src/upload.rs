//! Publishing of trend artifacts to S3.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{info, warn};

use crate::output::ARTIFACT_FILES;

/// Object key for an artifact under an optional prefix such as `"trends/"`.
pub fn object_key(prefix: &str, file_name: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{prefix}{file_name}")
    } else {
        format!("{prefix}/{file_name}")
    }
}

pub fn gzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Uploads every artifact found in `dir`, returning how many were sent.
///
/// Artifacts missing from `dir` are logged and skipped. With `gzip`, bodies
/// are compressed and sent with `Content-Encoding: gzip` under the same key.
#[tracing::instrument(skip(client))]
pub async fn upload_artifacts(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    prefix: &str,
    dir: &Path,
    gzip: bool,
) -> Result<usize> {
    let mut upload_count = 0;

    for file_name in ARTIFACT_FILES {
        let path = dir.join(file_name);
        if !path.exists() {
            warn!(file = file_name, "Artifact missing, skipping upload");
            continue;
        }

        let contents =
            std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let body = if gzip { gzip_bytes(&contents)? } else { contents };

        let key = object_key(prefix, file_name);
        put_json(client, bucket, &key, body, gzip).await?;
        info!(key = %key, "Uploaded artifact");
        upload_count += 1;
    }

    info!(upload_count, "S3 upload complete");
    Ok(upload_count)
}

async fn put_json(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    gzip: bool,
) -> Result<()> {
    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type("application/json");
    if gzip {
        request = request.content_encoding("gzip");
    }

    request
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{key}"))?;
    Ok(())
}
