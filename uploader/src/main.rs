use std::sync::Arc;

use anyhow::Context;
use aws_sdk_s3::Client as S3Client;
use clap::Parser;
use media_storage::{LinkFormatter, MediaUploader, RasterEncoder, S3ObjectStore};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use uploader::{cli::Cli, images::load_source_image, types::Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let environment = Environment::from_env();

    // Logs go to stderr; stdout carries only the resulting links
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let images = cli
        .paths
        .iter()
        .map(|path| load_source_image(path, cli.thumbnail_size))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bucket = cli.bucket.unwrap_or_else(|| environment.s3_bucket());
    info!(
        "Uploading {} images to bucket {} in {:?} environment",
        images.len(),
        bucket,
        environment
    );

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let store = Arc::new(S3ObjectStore::new(s3_client, bucket));
    let uploader = MediaUploader::new(
        store,
        RasterEncoder,
        LinkFormatter::new(environment.public_host()),
    );

    let links = uploader
        .upload_images(&images)
        .await
        .context("Image upload failed")?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&links)?
    } else {
        serde_json::to_string(&links)?
    };
    println!("{output}");

    Ok(())
}
