use futures::stream::{self, Stream, StreamExt};
use image::imageops::FilterType;
use thiserror::Error;
use tokio::task;

use crate::api::{ApiError, PhotoClient};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbnailError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("could not decode thumbnail: {0}")]
    Decode(String),

    #[error("thumbnail worker failed: {0}")]
    Worker(String),
}

/// Decoded RGBA pixels ready to hand to the renderer
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Download a thumbnail and prepare it for a square grid cell
pub async fn load_thumbnail(
    client: PhotoClient,
    url: String,
    size: u32,
) -> Result<Thumbnail, ThumbnailError> {
    let bytes = client.fetch_thumbnail(&url).await?;
    prepare(bytes, size).await
}

/// Load a batch of thumbnails with at most `concurrency` downloads in flight.
///
/// Jobs are `(index, url)` pairs. Results come out in completion order,
/// tagged with their index. Dropping the stream cancels whatever is still
/// pending.
pub fn load_all(
    client: PhotoClient,
    jobs: Vec<(usize, String)>,
    size: u32,
    concurrency: usize,
) -> impl Stream<Item = (usize, Result<Thumbnail, ThumbnailError>)> {
    stream::iter(jobs)
        .map(move |(index, url)| {
            let client = client.clone();
            async move { (index, load_thumbnail(client, url, size).await) }
        })
        .buffer_unordered(concurrency.max(1))
}

/// Decode and resize encoded image bytes.
///
/// Decoding is CPU-bound, so it runs on the blocking pool.
pub async fn prepare(bytes: Vec<u8>, size: u32) -> Result<Thumbnail, ThumbnailError> {
    task::spawn_blocking(move || prepare_blocking(&bytes, size))
        .await
        .map_err(|e| ThumbnailError::Worker(e.to_string()))?
}

fn prepare_blocking(bytes: &[u8], size: u32) -> Result<Thumbnail, ThumbnailError> {
    let img = image::load_from_memory(bytes).map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    // Fill the cell and crop the overflow, like object-fit: cover
    let size = size.max(1);
    let rgba = img.resize_to_fill(size, size, FilterType::Lanczos3).to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Thumbnail {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_prepare_fills_square() {
        let thumb = prepare(png(300, 150), 164).await.unwrap();

        assert_eq!((thumb.width, thumb.height), (164, 164));
        assert_eq!(thumb.pixels.len(), 164 * 164 * 4);
        // Solid source stays (close to) solid after resampling
        let center = ((82 * 164 + 82) * 4) as usize;
        let px = &thumb.pixels[center..center + 4];
        assert!(px[0] > 190 && px[1] < 50 && px[2] < 50 && px[3] == 255);
    }

    #[tokio::test]
    async fn test_prepare_rejects_garbage() {
        let result = prepare(b"definitely not an image".to_vec(), 64).await;
        assert!(matches!(result, Err(ThumbnailError::Decode(_))));
    }

    fn client() -> PhotoClient {
        let config = crate::config::Config {
            api_url: "http://api.test".into(),
            thumbnail_size: 164,
            request_timeout: std::time::Duration::from_secs(2),
            thumbnail_concurrency: 2,
        };
        PhotoClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_load_all_yields_every_job_once() {
        // Unparsable URLs fail before any network access
        let jobs: Vec<(usize, String)> = (0..7).map(|i| (i * 2, format!("::bad{i}"))).collect();
        let results: Vec<_> = load_all(client(), jobs, 64, 2).collect().await;

        let mut indices: Vec<usize> = results.iter().map(|(index, _)| *index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 2, 4, 6, 8, 10, 12]);
        assert!(results
            .iter()
            .all(|(_, r)| matches!(r, Err(ThumbnailError::Fetch(ApiError::InvalidUrl { .. })))));
    }

    #[tokio::test]
    async fn test_load_all_zero_concurrency_still_runs() {
        let jobs = vec![(3, "::bad".to_string())];
        let results: Vec<_> = load_all(client(), jobs, 64, 0).collect().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 3);
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let thumb = prepare_blocking(&png(10, 10), 0).unwrap();
        assert_eq!((thumb.width, thumb.height), (1, 1));
    }
}
