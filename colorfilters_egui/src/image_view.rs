/// A texture-backed image that is only re-uploaded after [`ImageView::invalidate`].
pub(crate) struct ImageView {
    name: &'static str,
    texture: Option<egui::TextureHandle>,
    stale: bool,
}
impl std::fmt::Debug for ImageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageView").field("name", &self.name).finish()
    }
}

impl ImageView {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            texture: None,
            stale: true,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.stale = true;
    }

    fn load(&mut self, ui: &mut egui::Ui, image: impl FnOnce() -> egui::ColorImage) {
        if !std::mem::take(&mut self.stale) && self.texture.is_some() {
            return;
        }
        let image = image();
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                let texture = ui
                    .ctx()
                    .load_texture(self.name, image, egui::TextureOptions::NEAREST);
                self.texture = Some(texture);
            }
        }
    }

    /// Returns the hovered pixel, if any.
    #[must_use]
    pub(crate) fn show_rgb(
        &mut self,
        ui: &mut egui::Ui,
        image: &image::RgbImage,
    ) -> Option<(u32, u32)> {
        let size = [image.width() as usize, image.height() as usize];
        self.load(ui, || egui::ColorImage::from_rgb(size, image.as_raw()));
        self.show(ui, image.dimensions())
    }

    /// Returns the hovered pixel, if any.
    #[must_use]
    pub(crate) fn show_gray(
        &mut self,
        ui: &mut egui::Ui,
        image: &image::GrayImage,
    ) -> Option<(u32, u32)> {
        let size = [image.width() as usize, image.height() as usize];
        self.load(ui, || egui::ColorImage::from_gray(size, image.as_raw()));
        self.show(ui, image.dimensions())
    }

    fn show(&self, ui: &mut egui::Ui, dimensions: (u32, u32)) -> Option<(u32, u32)> {
        let texture = self.texture.as_ref()?;
        let size = fit(dimensions, ui.available_size_before_wrap());
        let image = egui::Image::from_texture(egui::load::SizedTexture {
            id: texture.id(),
            size,
        })
        .sense(egui::Sense::hover());
        let response = egui::Widget::ui(image, ui);
        response
            .hover_pos()
            .and_then(|pos| position_converter(pos, response.rect, dimensions))
    }
}

/// Largest size with the image's aspect ratio that fits into `available`.
fn fit((width, height): (u32, u32), available: egui::Vec2) -> egui::Vec2 {
    let scale = (available.x / width as f32).min(available.y / height as f32);
    egui::vec2(width as f32 * scale, height as f32 * scale)
}

#[must_use]
fn position_converter(
    pos: egui::Pos2,
    rect: egui::Rect,
    (width, height): (u32, u32),
) -> Option<(u32, u32)> {
    let relative = (pos - rect.min) / rect.size();
    if !(0. ..=1.).contains(&relative.x) || !(0. ..=1.).contains(&relative.y) {
        return None;
    }
    let x = ((relative.x * width as f32) as u32).min(width - 1);
    let y = ((relative.y * height as f32) as u32).min(height - 1);
    Some((x, y))
}
