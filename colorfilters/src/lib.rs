#![warn(clippy::all, rust_2018_idioms)]

mod bounds;
pub use bounds::{
    bounds_from_sliders, native_to_slider, remap_channel, slider_to_native, BoundVector,
    ChannelRange, Edge, SLIDER_RANGE,
};

mod colorspace;
pub use colorspace::{Colorspace, ColorspaceSpec};

pub mod conversion;
pub use conversion::ChannelImage;

mod error;
pub use error::Error;

mod filtering;
pub use filtering::{apply_mask, in_range};

mod preview;
pub use preview::{preview_image, side_by_side};

mod session;
pub use session::{DisplayMode, Displayed, ThresholdResult, ThresholdSession};

mod threshold;
pub use threshold::threshold;

pub(crate) const HIT: image::Luma<u8> = image::Luma([255]);
pub(crate) const MISSED: image::Luma<u8> = image::Luma([0]);
pub(crate) const BACKGROUND: image::Rgb<u8> = image::Rgb([0, 0, 0]);
