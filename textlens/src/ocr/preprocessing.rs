use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, GenericImageView, GrayImage, ImageFormat, ImageReader};

use crate::config::OcrConfig;
use crate::error::{Result, TextlensError};

/// Normalize an upload before recognition.
///
/// 1. Decodes the image (format guessed from the bytes)
/// 2. Rejects images smaller than `min_image_dimension` on either side
/// 3. Downscales so neither side exceeds `max_image_dimension`
/// 4. Converts to grayscale and stretches the histogram to full range
///
/// Returns PNG bytes. Decode failures are reported as recognition errors,
/// since they mean the upload is not a readable image.
pub fn preprocess_image(bytes: &[u8], config: &OcrConfig) -> Result<Vec<u8>> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| TextlensError::OcrRecognition(format!("Failed to read image: {e}")))?
        .decode()
        .map_err(|e| TextlensError::OcrRecognition(format!("Failed to decode image: {e}")))?;

    let (width, height) = img.dimensions();
    let min = config.min_image_dimension;
    if width < min || height < min {
        return Err(TextlensError::OcrRecognition(format!(
            "Image too small: {width}x{height}, minimum {min}x{min}"
        )));
    }

    let img = downscale(img, config.max_image_dimension);
    let gray = stretch_contrast(img.to_luma8());

    let mut output = Vec::new();
    gray.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| TextlensError::Internal(format!("Failed to encode image: {e}")))?;

    Ok(output)
}

fn downscale(img: DynamicImage, max_dim: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_dim && height <= max_dim {
        return img;
    }
    // resize() keeps the aspect ratio and fits within the bounds.
    img.resize(max_dim, max_dim, FilterType::Lanczos3)
}

/// Linear histogram stretch: darkest pixel maps to 0, lightest to 255.
fn stretch_contrast(mut gray: GrayImage) -> GrayImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if hi <= lo {
        return gray;
    }

    let range = (hi - lo) as f32;
    for pixel in gray.pixels_mut() {
        pixel[0] = (((pixel[0] - lo) as f32 / range) * 255.0).round() as u8;
    }
    gray
}
