use crate::conversion::{self, ChannelImage};
use crate::ChannelRange;

/// The eight colorspaces a session can threshold in.
///
/// The declaration order is the keyboard order: `1` selects [`Colorspace::Bgr`],
/// `8` selects [`Colorspace::Grayscale`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::VariantArray,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Colorspace {
    #[default]
    #[strum(to_string = "BGR")]
    Bgr,
    #[strum(to_string = "HSV")]
    Hsv,
    #[strum(to_string = "HLS")]
    Hls,
    #[strum(to_string = "Lab")]
    Lab,
    #[strum(to_string = "Luv")]
    Luv,
    #[strum(to_string = "YCrCb", serialize = "ycc")]
    YCrCb,
    #[strum(to_string = "XYZ")]
    Xyz,
    #[strum(to_string = "Gray", serialize = "grayscale")]
    Grayscale,
}

/// Static description of a colorspace: its channels, their native ranges and
/// how to get there from an RGB image.
#[derive(Debug)]
pub struct ColorspaceSpec {
    pub colorspace: Colorspace,
    /// Short name used on the command line.
    pub key: &'static str,
    pub channel_names: &'static [&'static str],
    pub channel_mins: &'static [u8],
    pub channel_maxes: &'static [u8],
    /// Channel 0 is a hue angle stored as degrees / 2.
    pub hue_family: bool,
    pub converter: fn(&image::RgbImage) -> ChannelImage,
}

static SPECS: [ColorspaceSpec; 8] = [
    ColorspaceSpec {
        colorspace: Colorspace::Bgr,
        key: "bgr",
        channel_names: &["B", "G", "R"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[255, 255, 255],
        hue_family: false,
        converter: conversion::to_bgr,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Hsv,
        key: "hsv",
        channel_names: &["H", "S", "V"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[180, 255, 255],
        hue_family: true,
        converter: conversion::to_hsv,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Hls,
        key: "hls",
        channel_names: &["H", "L", "S"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[180, 255, 255],
        hue_family: true,
        converter: conversion::to_hls,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Lab,
        key: "lab",
        channel_names: &["L", "a", "b"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[255, 255, 255],
        hue_family: false,
        converter: conversion::to_lab,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Luv,
        key: "luv",
        channel_names: &["L", "u", "v"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[255, 255, 255],
        hue_family: false,
        converter: conversion::to_luv,
    },
    ColorspaceSpec {
        colorspace: Colorspace::YCrCb,
        key: "ycc",
        channel_names: &["Y", "Cr", "Cb"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[255, 255, 255],
        hue_family: false,
        converter: conversion::to_ycrcb,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Xyz,
        key: "xyz",
        channel_names: &["X", "Y", "Z"],
        channel_mins: &[0, 0, 0],
        channel_maxes: &[255, 255, 255],
        hue_family: false,
        converter: conversion::to_xyz,
    },
    ColorspaceSpec {
        colorspace: Colorspace::Grayscale,
        key: "gray",
        channel_names: &["L"],
        channel_mins: &[0],
        channel_maxes: &[255],
        hue_family: false,
        converter: conversion::to_grayscale,
    },
];

impl Colorspace {
    pub fn spec(self) -> &'static ColorspaceSpec {
        &SPECS[self as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        use strum::VariantArray;
        Self::VARIANTS.get(index).copied()
    }

    /// Accepts the short key (`ycc`) as well as the label (`YCrCb`), ignoring case.
    pub fn from_key(key: &str) -> Result<Self, crate::Error> {
        key.trim()
            .parse()
            .map_err(|_| crate::Error::UnknownColorspace(key.to_string()))
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn channel_count(self) -> usize {
        self.spec().channel_count()
    }

    pub fn is_hue_family(self) -> bool {
        self.spec().hue_family
    }
}

impl ColorspaceSpec {
    pub fn channel_count(&self) -> usize {
        self.channel_names.len()
    }

    /// # Panics
    /// If `channel` is not a channel of this colorspace.
    pub fn channel_range(&self, channel: usize) -> ChannelRange {
        assert!(
            channel < self.channel_count(),
            "channel {channel} out of range for {} ({} channels)",
            self.colorspace,
            self.channel_count()
        );
        ChannelRange::new(self.channel_mins[channel], self.channel_maxes[channel])
    }

    pub fn channel_ranges(&self) -> impl Iterator<Item = ChannelRange> + '_ {
        (0..self.channel_count()).map(|channel| self.channel_range(channel))
    }

    pub fn convert(&self, image: &image::RgbImage) -> ChannelImage {
        (self.converter)(image)
    }
}
