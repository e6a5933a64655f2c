//! Mapping between slider positions and native channel bounds.
//!
//! Sliders are percentages: [`SLIDER_RANGE`] is the same for every colorspace
//! and every channel. All rescaling rounds half to even.

use crate::Colorspace;

/// An inclusive range of byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

impl ChannelRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> u8 {
        self.max - self.min
    }

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Position range of every bound slider.
pub const SLIDER_RANGE: ChannelRange = ChannelRange::new(0, 100);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Edge {
    Lower,
    Upper,
}

impl Edge {
    pub fn label(&self) -> &'static str {
        match self {
            Edge::Lower => "min",
            Edge::Upper => "max",
        }
    }

    /// Value of this edge when the bound spans the whole channel.
    pub fn full_range_value(&self, range: ChannelRange) -> u8 {
        match self {
            Edge::Lower => range.min,
            Edge::Upper => range.max,
        }
    }
}

#[inline(always)]
fn round_to_u8(value: f64) -> u8 {
    value.round_ties_even().clamp(0., 255.) as u8
}

/// Linear rescale of a slider position into a channel's native range.
///
/// # Panics
/// If `position` is outside of `slider`; the caller is expected to clamp.
pub fn slider_to_native(position: u8, slider: ChannelRange, channel: ChannelRange) -> u8 {
    assert!(
        slider.contains(position),
        "slider position {position} outside of {}..={}",
        slider.min,
        slider.max
    );
    let offset = (position - slider.min) as f64;
    round_to_u8(offset * channel.span() as f64 / slider.span() as f64 + channel.min as f64)
}

/// Inverse of [`slider_to_native`], used to move sliders after the bounds
/// changed underneath them.
///
/// # Panics
/// If `native` is outside of `channel`.
pub fn native_to_slider(native: u8, slider: ChannelRange, channel: ChannelRange) -> u8 {
    assert!(
        channel.contains(native),
        "native value {native} outside of {}..={}",
        channel.min,
        channel.max
    );
    if channel.span() == 0 {
        return slider.min;
    }
    let offset = (native - channel.min) as f64;
    round_to_u8(offset * slider.span() as f64 / channel.span() as f64 + slider.min as f64)
}

/// Rescales a channel value between a hue range (0-180) and a byte range
/// (0-255).
pub fn remap_channel(value: u8, from: ChannelRange, to: ChannelRange) -> u8 {
    let offset = value.saturating_sub(from.min) as f64;
    let remapped = round_to_u8(offset * to.span() as f64 / from.span() as f64 + to.min as f64);
    remapped.clamp(to.min, to.max)
}

/// Per-channel inclusive limit, one entry per channel of the colorspace it was
/// made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundVector(Vec<u8>);

impl BoundVector {
    /// The bound that lets every value of `colorspace` through on `edge`.
    pub fn full_range(colorspace: Colorspace, edge: Edge) -> Self {
        Self(
            colorspace
                .spec()
                .channel_ranges()
                .map(|range| edge.full_range_value(range))
                .collect(),
        )
    }

    /// # Panics
    /// If the length or any value does not fit `colorspace`.
    pub fn new(colorspace: Colorspace, values: Vec<u8>) -> Self {
        let bound = Self(values);
        bound.assert_fits(colorspace);
        bound
    }

    /// # Panics
    /// If the length or any value does not fit `colorspace`.
    pub fn assert_fits(&self, colorspace: Colorspace) {
        let spec = colorspace.spec();
        assert_eq!(
            self.len(),
            spec.channel_count(),
            "{colorspace} needs {} bound values",
            spec.channel_count()
        );
        for (channel, (value, range)) in self.iter().zip(spec.channel_ranges()).enumerate() {
            assert!(
                range.contains(*value),
                "bound {value} of {colorspace} channel {channel} outside of {}..={}",
                range.min,
                range.max
            );
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn get(&self, channel: usize) -> Option<u8> {
        self.0.get(channel).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.0.iter()
    }

    pub(crate) fn set(&mut self, channel: usize, value: u8) {
        self.0[channel] = value;
    }

    /// Re-expresses this bound, made for `from`, in the native units of `to`.
    ///
    /// Channel 0 is rescaled when exactly one side is a hue colorspace. Channels
    /// the source does not have are opened to the full range of `to`, channels
    /// the target does not have are dropped.
    pub fn renormalize(&self, edge: Edge, from: Colorspace, to: Colorspace) -> Self {
        let from_spec = from.spec();
        let to_spec = to.spec();
        let mut values: Vec<u8> = to_spec
            .channel_ranges()
            .enumerate()
            .map(|(channel, range)| match self.get(channel) {
                Some(value) if channel < from_spec.channel_count() => {
                    value.clamp(range.min, range.max)
                }
                _ => edge.full_range_value(range),
            })
            .collect();
        if from_spec.hue_family != to_spec.hue_family {
            values[0] = remap_channel(
                self.get(0).unwrap_or(values[0]),
                from_spec.channel_range(0),
                to_spec.channel_range(0),
            );
        }
        Self(values)
    }
}

impl std::ops::Index<usize> for BoundVector {
    type Output = u8;

    fn index(&self, channel: usize) -> &u8 {
        &self.0[channel]
    }
}

impl std::fmt::Display for BoundVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

/// Bounds from the six percentage sliders `[ch1 min, ch1 max, ch2 min, ch2 max,
/// ch3 min, ch3 max]`. Grayscale only reads the first pair.
pub fn bounds_from_sliders(
    colorspace: Colorspace,
    positions: [u8; 6],
) -> (BoundVector, BoundVector) {
    let spec = colorspace.spec();
    let (lower, upper): (Vec<u8>, Vec<u8>) = spec
        .channel_ranges()
        .zip(positions.chunks_exact(2))
        .map(|(range, pair)| {
            (
                slider_to_native(pair[0], SLIDER_RANGE, range),
                slider_to_native(pair[1], SLIDER_RANGE, range),
            )
        })
        .unzip();
    (BoundVector(lower), BoundVector(upper))
}
