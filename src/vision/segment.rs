//! Color segmentation: HSV thresholding followed by morphological cleanup

use super::color::HsvRange;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

const MASK_ON: Luma<u8> = Luma([255]);
const MASK_OFF: Luma<u8> = Luma([0]);

/// Convert one RGB pixel to 8-bit HSV (hue in degrees / 2, 0..=179)
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max;
    let saturation = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // 360 degrees map to 180; a hue that rounds up to 180 is the same as 0
    let hue = ((hue / 2.0).round() as u32 % 180) as u8;
    [hue, saturation.round() as u8, value.round() as u8]
}

/// Convert a whole frame once so each color threshold can reuse it
pub fn frame_to_hsv(frame: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(frame.width(), frame.height());
    for (x, y, pixel) in frame.enumerate_pixels() {
        hsv.put_pixel(x, y, Rgb(rgb_to_hsv(*pixel)));
    }
    hsv
}

/// Raw membership mask of an already converted HSV frame
pub fn threshold(hsv: &RgbImage, range: &HsvRange) -> GrayImage {
    let mut mask = GrayImage::new(hsv.width(), hsv.height());
    for (x, y, pixel) in hsv.enumerate_pixels() {
        let on = range.contains(pixel.0);
        mask.put_pixel(x, y, if on { MASK_ON } else { MASK_OFF });
    }
    mask
}

/// Close small holes, then remove small speckles.
///
/// Closing must run first so thin piece edges are not eroded away before
/// they have been joined up.
pub fn denoise(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    let closed = close(mask, Norm::LInf, radius);
    open(&closed, Norm::LInf, radius)
}

/// Full segmentation of one color in an HSV frame
pub fn segment(hsv: &RgbImage, range: &HsvRange, radius: u8) -> GrayImage {
    denoise(&threshold(hsv, range), radius)
}
