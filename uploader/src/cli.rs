//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// Default bounding box edge for thumbnails, in pixels
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Upload images and their thumbnails to object storage
#[derive(Debug, Parser)]
#[command(name = "uploader", version)]
pub struct Cli {
    /// Image files to upload (png, jpeg or gif)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Longest edge of generated thumbnails
    #[arg(long, default_value_t = DEFAULT_THUMBNAIL_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub thumbnail_size: u32,

    /// Bucket to upload to, overriding `S3_BUCKET_NAME`
    #[arg(long)]
    pub bucket: Option<String>,

    /// Pretty-print the resulting links
    #[arg(long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["uploader", "a.png", "b.jpg"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
        assert_eq!(cli.thumbnail_size, DEFAULT_THUMBNAIL_SIZE);
        assert_eq!(cli.bucket, None);
        assert!(!cli.pretty);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "uploader",
            "--thumbnail-size",
            "64",
            "--bucket",
            "photos",
            "--pretty",
            "a.gif",
        ])
        .unwrap();
        assert_eq!(cli.thumbnail_size, 64);
        assert_eq!(cli.bucket.as_deref(), Some("photos"));
        assert!(cli.pretty);
    }

    #[test]
    fn test_requires_paths_and_positive_size() {
        assert!(Cli::try_parse_from(["uploader"]).is_err());
        assert!(Cli::try_parse_from(["uploader", "--thumbnail-size", "0", "a.png"]).is_err());
    }
}
