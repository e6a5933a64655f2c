/// Halves `image` until it fits into `max_width` x `max_height`.
///
/// # Panics
/// If the box has a zero side.
pub fn preview_image(image: &image::RgbImage, max_width: u32, max_height: u32) -> image::RgbImage {
    assert!(
        max_width > 0 && max_height > 0,
        "preview box {max_width}x{max_height} is empty"
    );
    let mut preview = image.clone();
    while preview.width() > max_width || preview.height() > max_height {
        let width = preview.width().div_ceil(2);
        let height = preview.height().div_ceil(2);
        preview = image::imageops::resize(
            &preview,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
    }
    if preview.dimensions() != image.dimensions() {
        log::debug!(
            "Preview scaled from {:?} to {:?}",
            image.dimensions(),
            preview.dimensions()
        );
    }
    preview
}

/// Mask (as gray) on the left, masked image on the right.
pub fn side_by_side(mask: &image::GrayImage, masked: &image::RgbImage) -> image::RgbImage {
    assert_eq!(
        mask.dimensions(),
        masked.dimensions(),
        "mask and masked image sizes differ"
    );
    let (width, height) = masked.dimensions();
    image::RgbImage::from_fn(width * 2, height, |x, y| {
        if x < width {
            let image::Luma([value]) = *mask.get_pixel(x, y);
            image::Rgb([value, value, value])
        } else {
            *masked.get_pixel(x - width, y)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_untouched() {
        let image = image::RgbImage::from_pixel(20, 10, image::Rgb([1, 2, 3]));
        assert_eq!(preview_image(&image, 600, 600), image);
    }

    #[test]
    fn large_images_are_halved_until_they_fit() {
        let image = image::RgbImage::new(1601, 500);
        let preview = preview_image(&image, 600, 600);
        assert_eq!(preview.dimensions(), (401, 125));
    }

    #[test]
    fn side_by_side_layout() {
        let mut mask = image::GrayImage::new(2, 1);
        mask.put_pixel(1, 0, crate::HIT);
        let masked = image::RgbImage::from_pixel(2, 1, image::Rgb([9, 8, 7]));
        let combined = side_by_side(&mask, &masked);
        assert_eq!(combined.dimensions(), (4, 1));
        assert_eq!(combined.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
        assert_eq!(combined.get_pixel(1, 0), &image::Rgb([255, 255, 255]));
        assert_eq!(combined.get_pixel(3, 0), &image::Rgb([9, 8, 7]));
    }
}
