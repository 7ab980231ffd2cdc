//! Gradient-based blur scoring.
//!
//! The score of a frame is the mean Sobel gradient magnitude of its luma
//! channel. Flat regions contribute nothing; hard edges contribute a lot,
//! so a higher score means a sharper frame. Scores are not normalized
//! against resolution.

use image::{DynamicImage, GrayImage};

const SOBEL_X: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Compute the blur score of a decoded frame.
///
/// The frame is converted to 8-bit luma, filtered with the 3×3 Sobel
/// operator in both directions, and the per-pixel Euclidean magnitude is
/// averaged over the whole image. An empty image scores `0.0`.
///
/// # Example
///
/// ```
/// use framesift::blur_score;
/// use image::{DynamicImage, RgbImage};
///
/// let flat = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, image::Rgb([90, 90, 90])));
/// assert_eq!(blur_score(&flat), 0.0);
/// ```
pub fn blur_score(frame: &DynamicImage) -> f64 {
    luma_blur_score(&frame.to_luma8())
}

/// Compute the blur score of an already single-channel image.
pub fn luma_blur_score(gray: &GrayImage) -> f64 {
    let pixel_count = gray.width() as usize * gray.height() as usize;
    if pixel_count == 0 {
        return 0.0;
    }

    let (gradient_x, gradient_y) = sobel_gradients(gray);
    let total: f64 = gradient_x
        .iter()
        .zip(&gradient_y)
        .map(|(gx, gy)| gx.hypot(*gy))
        .sum();

    total / pixel_count as f64
}

/// Horizontal and vertical Sobel responses, row-major.
///
/// Borders are handled by reflecting around the edge pixel without
/// repeating it (`dcb|abcd|cba`).
pub fn sobel_gradients(gray: &GrayImage) -> (Vec<f64>, Vec<f64>) {
    let (width, height) = (gray.width() as i64, gray.height() as i64);
    let capacity = (width * height) as usize;
    let mut gradient_x = Vec::with_capacity(capacity);
    let mut gradient_y = Vec::with_capacity(capacity);

    for y in 0..height {
        for x in 0..width {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for (row, dy) in (-1..=1).enumerate() {
                let sample_y = reflect_101(y + dy, height);
                for (column, dx) in (-1..=1).enumerate() {
                    let sample_x = reflect_101(x + dx, width);
                    let value = gray.get_pixel(sample_x, sample_y).0[0] as f64;
                    gx += SOBEL_X[row][column] * value;
                    gy += SOBEL_Y[row][column] * value;
                }
            }
            gradient_x.push(gx);
            gradient_y.push(gy);
        }
    }

    (gradient_x, gradient_y)
}

fn reflect_101(index: i64, length: i64) -> u32 {
    if length == 1 {
        return 0;
    }
    let reflected = if index < 0 {
        -index
    } else if index >= length {
        2 * length - 2 - index
    } else {
        index
    };
    reflected as u32
}
