use aws_config::BehaviorVersion;
use aws_sdk_s3::{config::Region, primitives::ByteStream, Client};
use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, prelude::Result};

pub async fn client() -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.s3_region.clone()))
        .endpoint_url(&settings.s3_endpoint)
        .load()
        .await;
    let conf = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();
    Client::from_conf(conf)
}

pub async fn create_bucket(
    client: &Client,
    bucket_name: &str,
) -> Result<Option<aws_sdk_s3::operation::create_bucket::CreateBucketOutput>> {
    let constraint =
        aws_sdk_s3::types::BucketLocationConstraint::from(settings.s3_region.as_str());
    let cfg = aws_sdk_s3::types::CreateBucketConfiguration::builder()
        .location_constraint(constraint)
        .build();
    let create = client
        .create_bucket()
        .create_bucket_configuration(cfg)
        .bucket(bucket_name)
        .send()
        .await;
    create.map(Some).or_else(|err| {
        if err
            .as_service_error()
            .map(|se| se.is_bucket_already_exists() || se.is_bucket_already_owned_by_you())
            == Some(true)
        {
            Ok(None)
        } else {
            Err(StandardError::new("ERR-S3-001").interpolate_err(err.to_string()))
        }
    })
}

pub trait S3Ops {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        mime_type: &str,
    ) -> Result<()>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

impl S3Ops for Client {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        mime_type: &str,
    ) -> Result<()> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(mime_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-S3-002").interpolate_err(e.to_string()))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let output = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StandardError::new("ERR-S3-003").interpolate_err(e.to_string()))?;
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StandardError::new("ERR-S3-003").interpolate_err(e.to_string()))?;
        Ok(bytes.into_bytes().to_vec())
    }
}
