use crate::conversion::ChannelImage;
use crate::{bounds, filtering, BoundVector, Colorspace, Edge, Error};

/// Which derived image the display layer should render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DisplayMode {
    Mask,
    #[default]
    Masked,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Mask => DisplayMode::Masked,
            DisplayMode::Masked => DisplayMode::Mask,
        }
    }
}

/// Borrowed view of the image currently selected by the [`DisplayMode`].
#[derive(Debug, Clone, Copy)]
pub enum Displayed<'a> {
    Mask(&'a image::GrayImage),
    Masked(&'a image::RgbImage),
}

/// Everything a finished session hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub colorspace: Colorspace,
    pub lower: BoundVector,
    pub upper: BoundVector,
    pub mask: image::GrayImage,
    pub masked: image::RgbImage,
}

impl ThresholdResult {
    /// Thresholds `image` in `colorspace` without keeping any session state.
    ///
    /// # Panics
    /// If a bound does not fit `colorspace`.
    pub fn compute(
        image: &image::RgbImage,
        colorspace: Colorspace,
        lower: BoundVector,
        upper: BoundVector,
    ) -> Result<Self, Error> {
        check_not_empty(image)?;
        lower.assert_fits(colorspace);
        upper.assert_fits(colorspace);
        let converted = colorspace.spec().convert(image);
        let mask = filtering::in_range(&converted, &lower, &upper);
        let masked = filtering::apply_mask(image, &mask);
        Ok(Self {
            colorspace,
            lower,
            upper,
            mask,
            masked,
        })
    }
}

fn check_not_empty(image: &image::RgbImage) -> Result<(), Error> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    Ok(())
}

/// Live thresholding state of one image.
///
/// Every mutation recomputes the mask and the masked image before returning
/// and raises the redisplay flag, which the render step clears with
/// [`ThresholdSession::take_redisplay`].
#[derive(Debug, Clone)]
pub struct ThresholdSession {
    colorspace: Colorspace,
    lower: BoundVector,
    upper: BoundVector,
    original: image::RgbImage,
    converted: ChannelImage,
    mask: image::GrayImage,
    masked: image::RgbImage,
    display_mode: DisplayMode,
    redisplay: bool,
}

impl ThresholdSession {
    /// Starts in BGR with bounds covering every value.
    pub fn new(image: image::RgbImage) -> Result<Self, Error> {
        Self::with_colorspace(image, Colorspace::default())
    }

    pub fn with_colorspace(image: image::RgbImage, colorspace: Colorspace) -> Result<Self, Error> {
        Self::with_bounds(
            image,
            colorspace,
            BoundVector::full_range(colorspace, Edge::Lower),
            BoundVector::full_range(colorspace, Edge::Upper),
        )
    }

    /// # Panics
    /// If a bound does not fit `colorspace`.
    pub fn with_bounds(
        image: image::RgbImage,
        colorspace: Colorspace,
        lower: BoundVector,
        upper: BoundVector,
    ) -> Result<Self, Error> {
        check_not_empty(&image)?;
        lower.assert_fits(colorspace);
        upper.assert_fits(colorspace);
        log::info!(
            "Thresholding session on {}x{} image in {colorspace}",
            image.width(),
            image.height()
        );
        let converted = colorspace.spec().convert(&image);
        let mut session = Self {
            colorspace,
            lower,
            upper,
            mask: image::GrayImage::new(image.width(), image.height()),
            masked: image::RgbImage::new(image.width(), image.height()),
            original: image,
            converted,
            display_mode: DisplayMode::default(),
            redisplay: true,
        };
        session.recompute();
        Ok(session)
    }

    /// Moves one edge of one channel to the native value of a slider position.
    ///
    /// # Panics
    /// If `channel` does not exist in the current colorspace or `position` is
    /// outside of [`bounds::SLIDER_RANGE`].
    pub fn set_channel_bound(&mut self, channel: usize, edge: Edge, position: u8) {
        let range = self.colorspace.spec().channel_range(channel);
        let value = bounds::slider_to_native(position, bounds::SLIDER_RANGE, range);
        log::debug!(
            "{} {} {} -> {value} (slider {position})",
            self.colorspace,
            self.colorspace.spec().channel_names[channel],
            edge.label()
        );
        match edge {
            Edge::Lower => self.lower.set(channel, value),
            Edge::Upper => self.upper.set(channel, value),
        }
        self.recompute();
    }

    /// Switches the working colorspace, keeping the bounds in the units of the
    /// new one. Switching to the current colorspace does nothing.
    pub fn switch_colorspace(&mut self, colorspace: Colorspace) {
        if colorspace == self.colorspace {
            return;
        }
        let from = self.colorspace;
        self.lower = self.lower.renormalize(Edge::Lower, from, colorspace);
        self.upper = self.upper.renormalize(Edge::Upper, from, colorspace);
        self.converted = colorspace.spec().convert(&self.original);
        self.colorspace = colorspace;
        log::debug!(
            "Colorspace {from} -> {colorspace}, bounds {} - {}",
            self.lower,
            self.upper
        );
        self.recompute();
    }

    pub fn toggle_display_mode(&mut self) {
        self.display_mode = self.display_mode.toggled();
        self.redisplay = true;
    }

    fn recompute(&mut self) {
        self.mask = filtering::in_range(&self.converted, &self.lower, &self.upper);
        self.masked = filtering::apply_mask(&self.original, &self.mask);
        self.redisplay = true;
    }

    /// Returns whether anything changed since the last call.
    pub fn take_redisplay(&mut self) -> bool {
        std::mem::take(&mut self.redisplay)
    }

    pub fn current_bounds(&self) -> (&BoundVector, &BoundVector) {
        (&self.lower, &self.upper)
    }

    pub fn current_colorspace(&self) -> Colorspace {
        self.colorspace
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn original(&self) -> &image::RgbImage {
        &self.original
    }

    pub fn converted_image(&self) -> &ChannelImage {
        &self.converted
    }

    pub fn mask(&self) -> &image::GrayImage {
        &self.mask
    }

    pub fn masked_image(&self) -> &image::RgbImage {
        &self.masked
    }

    pub fn displayed_image(&self) -> Displayed<'_> {
        match self.display_mode {
            DisplayMode::Mask => Displayed::Mask(&self.mask),
            DisplayMode::Masked => Displayed::Masked(&self.masked),
        }
    }

    /// Thresholds another image (usually the full resolution original of a
    /// preview) with the current colorspace and bounds.
    pub fn apply_to(&self, image: &image::RgbImage) -> Result<ThresholdResult, Error> {
        ThresholdResult::compute(
            image,
            self.colorspace,
            self.lower.clone(),
            self.upper.clone(),
        )
    }

    pub fn finish(self) -> ThresholdResult {
        log::info!(
            "Session finished in {} between {} and {}",
            self.colorspace,
            self.lower,
            self.upper
        );
        ThresholdResult {
            colorspace: self.colorspace,
            lower: self.lower,
            upper: self.upper,
            mask: self.mask,
            masked: self.masked,
        }
    }
}
