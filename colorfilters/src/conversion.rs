//! 8-bit colorspace conversions.
//!
//! Every converter takes an RGB image and returns the channels in the order the
//! target colorspace names them (so the BGR "conversion" only reorders). Value
//! scaling follows the common 8-bit conventions: hue is stored as degrees / 2,
//! L* is stretched to 0-255 and signed chroma channels are offset.

use image::{Luma, Rgb};

/// A converted image, one byte per channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelImage {
    Three(image::RgbImage),
    Single(image::GrayImage),
}

impl ChannelImage {
    pub fn width(&self) -> u32 {
        match self {
            ChannelImage::Three(image) => image.width(),
            ChannelImage::Single(image) => image.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ChannelImage::Three(image) => image.height(),
            ChannelImage::Single(image) => image.height(),
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            ChannelImage::Three(_) => 3,
            ChannelImage::Single(_) => 1,
        }
    }

    /// Channel values of a single pixel.
    pub fn channels(&self, x: u32, y: u32) -> &[u8] {
        match self {
            ChannelImage::Three(image) => image.get_pixel(x, y).0.as_slice(),
            ChannelImage::Single(image) => image.get_pixel(x, y).0.as_slice(),
        }
    }
}

pub(crate) fn to_bgr(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, bgr_pixel))
}

pub(crate) fn to_hsv(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, hsv_pixel))
}

pub(crate) fn to_hls(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, hls_pixel))
}

pub(crate) fn to_lab(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, lab_pixel))
}

pub(crate) fn to_luv(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, luv_pixel))
}

pub(crate) fn to_ycrcb(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, ycrcb_pixel))
}

pub(crate) fn to_xyz(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Three(imageproc::map::map_colors(image, xyz_pixel))
}

pub(crate) fn to_grayscale(image: &image::RgbImage) -> ChannelImage {
    ChannelImage::Single(imageproc::map::map_colors(image, gray_pixel))
}

#[inline(always)]
fn saturate(value: f64) -> u8 {
    value.round_ties_even().clamp(0., 255.) as u8
}

#[inline(always)]
fn unpack(pixel: Rgb<u8>) -> (f64, f64, f64) {
    let [r, g, b] = pixel.0;
    (r as f64, g as f64, b as f64)
}

fn bgr_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = pixel.0;
    Rgb([b, g, r])
}

/// Hue in degrees (0..360), zero for achromatic colors.
fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0. {
        return 0.;
    }
    let hue = if max == r {
        60. * (g - b) / delta
    } else if max == g {
        120. + 60. * (b - r) / delta
    } else {
        240. + 60. * (r - g) / delta
    };
    if hue < 0. {
        hue + 360.
    } else {
        hue
    }
}

/// Degrees to the 0..180 byte representation; 360° wraps back to 0.
fn half_hue(hue: f64) -> u8 {
    let half = saturate(hue / 2.);
    if half >= 180 {
        half - 180
    } else {
        half
    }
}

fn hsv_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let (r, g, b) = unpack(pixel);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max == 0. { 0. } else { 255. * delta / max };
    let h = hue_degrees(r, g, b, max, delta);
    Rgb([half_hue(h), saturate(s), saturate(max)])
}

fn hls_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let (r, g, b) = unpack(pixel);
    let max = r.max(g).max(b) / 255.;
    let min = r.min(g).min(b) / 255.;
    let delta = max - min;
    let l = (max + min) / 2.;
    let s = if delta == 0. {
        0.
    } else if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2. - max - min)
    };
    let h = hue_degrees(r / 255., g / 255., b / 255., max, delta);
    Rgb([half_hue(h), saturate(l * 255.), saturate(s * 255.)])
}

const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// D65 white point, row sums of [`RGB_TO_XYZ`].
const WHITE_X: f64 = 0.950456;
const WHITE_Z: f64 = 1.088754;

fn matrix_mul(m: &[[f64; 3]; 3], (r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    (
        m[0][0] * r + m[0][1] * g + m[0][2] * b,
        m[1][0] * r + m[1][1] * g + m[1][2] * b,
        m[2][0] * r + m[2][1] * g + m[2][2] * b,
    )
}

fn srgb_to_linear(value: f64) -> f64 {
    let value = value / 255.;
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Gamma-decoded XYZ with Y in 0..1.
fn linear_xyz(pixel: Rgb<u8>) -> (f64, f64, f64) {
    let (r, g, b) = unpack(pixel);
    matrix_mul(
        &RGB_TO_XYZ,
        (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)),
    )
}

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 903.3;

fn lightness(y: f64) -> f64 {
    if y > EPSILON {
        116. * y.cbrt() - 16.
    } else {
        KAPPA * y
    }
}

fn lab_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let (x, y, z) = linear_xyz(pixel);
    let f = |t: f64| {
        if t > EPSILON {
            t.cbrt()
        } else {
            7.787 * t + 16. / 116.
        }
    };
    let (fx, fy, fz) = (f(x / WHITE_X), f(y), f(z / WHITE_Z));
    let l = lightness(y);
    let a = 500. * (fx - fy);
    let b = 200. * (fy - fz);
    Rgb([saturate(l * 255. / 100.), saturate(a + 128.), saturate(b + 128.)])
}

fn luv_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    const WHITE_U: f64 = 0.19793943;
    const WHITE_V: f64 = 0.46831096;
    let (x, y, z) = linear_xyz(pixel);
    let l = lightness(y);
    let denominator = x + 15. * y + 3. * z;
    let (u, v) = if denominator == 0. {
        (0., 0.)
    } else {
        let u_prime = 4. * x / denominator;
        let v_prime = 9. * y / denominator;
        (13. * l * (u_prime - WHITE_U), 13. * l * (v_prime - WHITE_V))
    };
    Rgb([
        saturate(l * 255. / 100.),
        saturate((u + 134.) * 255. / 354.),
        saturate((v + 140.) * 255. / 262.),
    ])
}

fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.299 * r + 0.587 * g + 0.114 * b
}

fn ycrcb_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let (r, g, b) = unpack(pixel);
    let y = luma(r, g, b);
    let cr = (r - y) * 0.713 + 128.;
    let cb = (b - y) * 0.564 + 128.;
    Rgb([saturate(y), saturate(cr), saturate(cb)])
}

/// Linear matrix on the raw byte values, no gamma decoding.
fn xyz_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let (x, y, z) = matrix_mul(&RGB_TO_XYZ, unpack(pixel));
    Rgb([saturate(x), saturate(y), saturate(z)])
}

fn gray_pixel(pixel: Rgb<u8>) -> Luma<u8> {
    let (r, g, b) = unpack(pixel);
    Luma([saturate(luma(r, g, b))])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn bgr_reorders_channels() {
        assert_eq!(bgr_pixel(Rgb([50, 100, 200])), Rgb([200, 100, 50]));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_pixel(RED), Rgb([0, 255, 255]));
        assert_eq!(hsv_pixel(GREEN), Rgb([60, 255, 255]));
        assert_eq!(hsv_pixel(BLUE), Rgb([120, 255, 255]));
        assert_eq!(hsv_pixel(WHITE), Rgb([0, 0, 255]));
        assert_eq!(hsv_pixel(BLACK), Rgb([0, 0, 0]));
    }

    #[test]
    fn hsv_hue_stays_below_180() {
        // magenta-ish red, hue just below 360°
        let Rgb([h, _, _]) = hsv_pixel(Rgb([255, 0, 1]));
        assert!(h < 180, "{h}");
    }

    #[test]
    fn hls_primaries() {
        assert_eq!(hls_pixel(RED), Rgb([0, 128, 255]));
        assert_eq!(hls_pixel(BLUE), Rgb([120, 128, 255]));
        assert_eq!(hls_pixel(WHITE), Rgb([0, 255, 0]));
        assert_eq!(hls_pixel(BLACK), Rgb([0, 0, 0]));
    }

    #[test]
    fn lab_neutral_axis() {
        assert_eq!(lab_pixel(WHITE), Rgb([255, 128, 128]));
        assert_eq!(lab_pixel(BLACK), Rgb([0, 128, 128]));
        let Rgb([l, a, b]) = lab_pixel(Rgb([128, 128, 128]));
        assert!((135..=138).contains(&l), "{l}");
        assert_eq!((a, b), (128, 128));
    }

    #[test]
    fn lab_red_is_red() {
        let Rgb([_, a, b]) = lab_pixel(RED);
        assert!(a > 200, "{a}");
        assert!(b > 180, "{b}");
    }

    #[test]
    fn luv_neutral_axis() {
        let Rgb([l, u, v]) = luv_pixel(WHITE);
        assert_eq!(l, 255);
        assert!((96..=97).contains(&u), "{u}");
        assert!((136..=137).contains(&v), "{v}");
        assert_eq!(luv_pixel(BLACK), Rgb([0, 97, 136]));
    }

    #[test]
    fn ycrcb_reference_values() {
        assert_eq!(ycrcb_pixel(WHITE), Rgb([255, 128, 128]));
        assert_eq!(ycrcb_pixel(BLACK), Rgb([0, 128, 128]));
        let Rgb([y, cr, cb]) = ycrcb_pixel(RED);
        assert_eq!(y, 76);
        assert!(cr > 200);
        assert!(cb < 128);
    }

    #[test]
    fn xyz_saturates() {
        assert_eq!(xyz_pixel(WHITE), Rgb([242, 255, 255]));
        assert_eq!(xyz_pixel(BLACK), Rgb([0, 0, 0]));
    }

    #[test]
    fn grayscale_weights() {
        assert_eq!(gray_pixel(Rgb([50, 100, 200])), Luma([96]));
        assert_eq!(gray_pixel(WHITE), Luma([255]));
    }

    #[test]
    fn converted_images_keep_dimensions() {
        let image = image::RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        for converted in [to_hsv(&image), to_grayscale(&image)] {
            assert_eq!((converted.width(), converted.height()), (4, 3));
        }
        assert_eq!(to_lab(&image).channel_count(), 3);
        let gray = to_grayscale(&image);
        assert_eq!(gray.channel_count(), 1);
        assert_eq!(gray.channels(3, 2).len(), 1);
    }
}
