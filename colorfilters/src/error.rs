#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("unknown colorspace '{0}', expected one of bgr, hsv, hls, lab, luv, ycc, xyz, gray")]
    UnknownColorspace(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
