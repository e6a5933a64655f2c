use crate::conversion::ChannelImage;
use crate::BoundVector;

/// Binary mask of the pixels whose every channel lies inside
/// `lower[i]..=upper[i]`. A channel with `lower > upper` matches nothing.
pub fn in_range(
    image: &ChannelImage,
    lower: &BoundVector,
    upper: &BoundVector,
) -> image::GrayImage {
    assert_eq!(
        lower.len(),
        image.channel_count(),
        "lower bound does not match the image channels"
    );
    assert_eq!(
        upper.len(),
        image.channel_count(),
        "upper bound does not match the image channels"
    );
    image::GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let inside = itertools::izip!(lower.iter(), upper.iter(), image.channels(x, y))
            .all(|(lower, upper, value)| lower <= value && value <= upper);
        if inside {
            crate::HIT
        } else {
            crate::MISSED
        }
    })
}

/// Keeps the pixels of `image` where `mask` is nonzero and blacks out the rest.
pub fn apply_mask(image: &image::RgbImage, mask: &image::GrayImage) -> image::RgbImage {
    assert_eq!(
        image.dimensions(),
        mask.dimensions(),
        "mask and image sizes differ"
    );
    imageproc::map::map_pixels(image, |x, y, p| {
        if mask.get_pixel(x, y) != &crate::MISSED {
            p
        } else {
            crate::BACKGROUND
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Colorspace;

    fn two_pixels() -> image::RgbImage {
        let mut image = image::RgbImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgb([50, 100, 200]));
        image.put_pixel(1, 0, image::Rgb([10, 20, 30]));
        image
    }

    #[test]
    fn mask_is_inclusive() {
        let converted = Colorspace::Bgr.spec().convert(&two_pixels());
        let lower = BoundVector::new(Colorspace::Bgr, vec![200, 100, 50]);
        let upper = BoundVector::new(Colorspace::Bgr, vec![200, 100, 50]);
        let mask = in_range(&converted, &lower, &upper);
        assert_eq!(mask.get_pixel(0, 0), &crate::HIT);
        assert_eq!(mask.get_pixel(1, 0), &crate::MISSED);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let converted = Colorspace::Bgr.spec().convert(&two_pixels());
        let lower = BoundVector::new(Colorspace::Bgr, vec![0, 200, 0]);
        let upper = BoundVector::new(Colorspace::Bgr, vec![255, 10, 255]);
        let mask = in_range(&converted, &lower, &upper);
        assert!(mask.pixels().all(|p| p == &crate::MISSED));
    }

    #[test]
    fn masked_image_keeps_original_colors() {
        let image = two_pixels();
        let mut mask = image::GrayImage::new(2, 1);
        mask.put_pixel(0, 0, crate::HIT);
        let masked = apply_mask(&image, &mask);
        assert_eq!(masked.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(masked.get_pixel(1, 0), &crate::BACKGROUND);
    }

    #[test]
    fn any_nonzero_mask_value_keeps_the_pixel() {
        let image = two_pixels();
        let mut mask = image::GrayImage::new(2, 1);
        mask.put_pixel(0, 0, image::Luma([1]));
        let masked = apply_mask(&image, &mask);
        assert_eq!(masked.get_pixel(0, 0), image.get_pixel(0, 0));
        assert_eq!(masked.get_pixel(1, 0), &crate::BACKGROUND);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn bound_length_must_match_channels() {
        let converted = Colorspace::Grayscale.spec().convert(&two_pixels());
        let lower = BoundVector::full_range(Colorspace::Bgr, crate::Edge::Lower);
        let upper = BoundVector::full_range(Colorspace::Bgr, crate::Edge::Upper);
        in_range(&converted, &lower, &upper);
    }
}
