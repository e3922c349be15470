//! MinIO/S3-compatible storage client
//!
//! Gallery images live under a public prefix with anonymous read access so a
//! CDN (or the bucket's public endpoint) can serve them directly. Uploads go
//! either through the server (multipart revision) or straight from the client
//! via presigned PUT URLs.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// MinIO/S3-compatible storage client
pub struct ObjectStore {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    presigned_url_expiry_secs: u32,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    /// Access key for AWS Signature v4 signing
    access_key: String,
    /// Secret key for AWS Signature v4 signing
    secret_key: String,
    /// Region name for AWS Signature v4 signing
    region_name: String,
    /// HTTP client for bucket policy operations
    http_client: Client,
}

impl ObjectStore {
    /// Create a new storage client from configuration.
    ///
    /// Construction is offline; call [`Self::ensure_bucket_exists`] and
    /// [`Self::set_public_read_policy`] at startup.
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create storage bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            bucket,
            region,
            credentials,
            presigned_url_expiry_secs: config.presigned_url_expiry_secs,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            public_prefix: config.public_prefix,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create bucket - if it already exists, MinIO will return an error
        // which we can safely ignore
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                // Bucket already exists - this is fine
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    /// Create the bucket
    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Set public read policy for the public prefix
    ///
    /// This allows anonymous read access to objects under the public prefix
    /// (e.g., `public/*`), which is what lets the CDN serve gallery images.
    pub async fn set_public_read_policy(&self) -> Result<(), AppError> {
        let bucket_name = self.bucket.name();
        let public_prefix = &self.public_prefix;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/{public_prefix}/*")]
                }
            ]
        });

        let policy_str = policy.to_string();

        match self
            .put_bucket_policy_with_sigv4(&bucket_name, &policy_str)
            .await
        {
            Ok(_) => {
                info!(
                    "Set public read policy for {}/{}/*",
                    bucket_name, public_prefix
                );
                Ok(())
            }
            Err(e) => {
                // Log warning but don't fail startup - policy can be set manually
                warn!(
                    "Failed to set bucket policy for '{}': {}. \
                    You may need to set the policy manually using: \
                    mc anonymous set download minio/{}/{}",
                    bucket_name, e, bucket_name, public_prefix
                );
                Ok(())
            }
        }
    }

    /// Put bucket policy using AWS Signature v4
    async fn put_bucket_policy_with_sigv4(
        &self,
        bucket_name: &str,
        policy: &str,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        // Parse endpoint to get host
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let port = endpoint_url.port();
        let host_header = match port {
            Some(p) => format!("{}:{}", host, p),
            None => host.to_string(),
        };

        // Build the URL for PUT bucket policy
        let url = format!("{}/{}?policy", self.endpoint, bucket_name);

        // Calculate payload hash
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        // Create canonical request
        let canonical_uri = format!("/{}", bucket_name);
        let canonical_querystring = "policy=";
        let canonical_headers = format!(
            "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            host_header, payload_hash, amz_date
        );
        let signed_headers = "host;x-amz-content-sha256;x-amz-date";

        let canonical_request = format!(
            "PUT\n{}\n{}\n{}\n{}\n{}",
            canonical_uri, canonical_querystring, canonical_headers, signed_headers, payload_hash
        );

        // Create string to sign
        let algorithm = "AWS4-HMAC-SHA256";
        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            algorithm, amz_date, credential_scope, canonical_request_hash
        );

        // Calculate signature
        let signature = self.calculate_signature(&date_stamp, &string_to_sign)?;

        // Create authorization header
        let authorization_header = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            algorithm, self.access_key, credential_scope, signed_headers, signature
        );

        // Make the request
        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization_header)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Internal(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    /// Calculate AWS Signature v4 signature
    fn calculate_signature(
        &self,
        date_stamp: &str,
        string_to_sign: &str,
    ) -> Result<String, AppError> {
        // Step 1: Create signing key
        let k_date = Self::hmac_sha256(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date_stamp.as_bytes(),
        )?;
        let k_region = Self::hmac_sha256(&k_date, self.region_name.as_bytes())?;
        let k_service = Self::hmac_sha256(&k_region, b"s3")?;
        let k_signing = Self::hmac_sha256(&k_service, b"aws4_request")?;

        // Step 2: Calculate signature
        let signature = Self::hmac_sha256(&k_signing, string_to_sign.as_bytes())?;
        Ok(hex::encode(signature))
    }

    /// HMAC-SHA256 helper
    fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Generate a fresh object key for a gallery image under the public
    /// prefix, e.g. `public/gallery/3f2a….jpg`.
    pub fn generate_image_key(&self, extension: &str) -> String {
        format!(
            "{}/gallery/{}.{}",
            self.public_prefix,
            Uuid::new_v4(),
            extension
        )
    }

    /// Upload an object to the storage
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to upload object '{}': {}", key, e)))?;

        debug!(
            "Uploaded object '{}' to bucket '{}'",
            key,
            self.bucket.name()
        );
        Ok(key.to_string())
    }

    /// Generate a presigned PUT URL so a client can upload binary content
    /// straight to the bucket, bypassing the API process.
    pub async fn presign_put(&self, key: &str) -> Result<String, AppError> {
        let url = self
            .bucket
            .presign_put(key, self.presigned_url_expiry_secs, None, None)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to generate presigned PUT URL for '{}': {}",
                    key, e
                ))
            })?;

        Ok(url)
    }

    /// Delete an object from the storage
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete object '{}': {}", key, e)))?;

        debug!(
            "Deleted object '{}' from bucket '{}'",
            key,
            self.bucket.name()
        );
        Ok(())
    }

    /// Direct public URL for an object (requires the public-read policy)
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Get the presigned URL expiry time in seconds
    pub fn presigned_url_expiry_secs(&self) -> u32 {
        self.presigned_url_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> ObjectStore {
        ObjectStore::new(StorageConfig {
            endpoint: "http://localhost:9000".to_string(),
            public_endpoint: "http://cdn.local:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket: "decora-gallery".to_string(),
            region: "us-east-1".to_string(),
            public_prefix: "public".to_string(),
            presigned_url_expiry_secs: 900,
        })
        .unwrap()
    }

    #[test]
    fn image_keys_are_unique_and_prefixed() {
        let store = test_store();
        let a = store.generate_image_key("jpg");
        let b = store.generate_image_key("jpg");

        assert!(a.starts_with("public/gallery/"));
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn public_url_uses_public_endpoint() {
        let store = test_store();
        assert_eq!(
            store.public_url("public/gallery/x.png"),
            "http://cdn.local:9000/decora-gallery/public/gallery/x.png"
        );
    }

    #[tokio::test]
    async fn presign_put_is_signed_and_time_limited() {
        let store = test_store();
        let url = store.presign_put("public/gallery/x.png").await.unwrap();

        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("X-Amz-Expires=900"));
    }
}
