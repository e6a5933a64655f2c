use crate::{bounds, Colorspace, Error, ThresholdResult};

/// Thresholds `image` in `colorspace` straight from the six percentage slider
/// positions `[ch1 min, ch1 max, ch2 min, ch2 max, ch3 min, ch3 max]`.
///
/// # Panics
/// If a position is above [`bounds::SLIDER_RANGE`].
pub fn threshold(
    image: &image::RgbImage,
    colorspace: Colorspace,
    slider_positions: [u8; 6],
) -> Result<ThresholdResult, Error> {
    let (lower, upper) = bounds::bounds_from_sliders(colorspace, slider_positions);
    ThresholdResult::compute(image, colorspace, lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, ThresholdSession};

    fn checkerboard() -> image::RgbImage {
        image::RgbImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([220, 30, 30])
            } else {
                image::Rgb([30, 30, 220])
            }
        })
    }

    #[test]
    fn agrees_with_session() {
        let positions = [0, 20, 50, 100, 50, 100];
        let result = threshold(&checkerboard(), Colorspace::Hsv, positions).unwrap();

        let mut session = ThresholdSession::with_colorspace(checkerboard(), Colorspace::Hsv).unwrap();
        for (i, pair) in positions.chunks_exact(2).enumerate() {
            session.set_channel_bound(i, Edge::Lower, pair[0]);
            session.set_channel_bound(i, Edge::Upper, pair[1]);
        }
        assert_eq!(result, session.finish());
    }

    #[test]
    fn picks_red_squares_in_hsv() {
        let result = threshold(&checkerboard(), Colorspace::Hsv, [0, 10, 50, 100, 50, 100]).unwrap();
        assert_eq!(result.lower.as_slice(), [0, 128, 128]);
        assert_eq!(result.upper.as_slice(), [18, 255, 255]);
        assert_eq!(result.mask.get_pixel(0, 0), &crate::HIT);
        assert_eq!(result.mask.get_pixel(1, 0), &crate::MISSED);
    }

    #[test]
    fn grayscale_reads_first_pair_only() {
        let result = threshold(&checkerboard(), Colorspace::Grayscale, [0, 100, 99, 1, 99, 1]).unwrap();
        assert_eq!(result.lower.len(), 1);
        assert!(result.mask.pixels().all(|p| p == &crate::HIT));
    }

    #[test]
    fn empty_image_is_an_error() {
        let empty = image::RgbImage::new(0, 0);
        assert!(matches!(
            threshold(&empty, Colorspace::Bgr, [0, 100, 0, 100, 0, 100]),
            Err(Error::EmptyImage { .. })
        ));
    }
}
