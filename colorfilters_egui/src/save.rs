use colorfilters::ThresholdSession;

/// Buttons that write the current mask or masked image to disk.
#[derive(Debug, Default)]
pub(crate) struct SaveButtons {
    error: Option<String>,
}

impl SaveButtons {
    pub(crate) fn show(&mut self, ui: &mut egui::Ui, session: &ThresholdSession) {
        if ui.button("💾 Save mask").clicked() {
            self.save_with_dialog("mask.png", |path| session.mask().save(path));
        }
        if ui.button("💾 Save masked image").clicked() {
            self.save_with_dialog("masked.png", |path| session.masked_image().save(path));
        }
        if ui.button("💾 Save combined").clicked() {
            self.save_with_dialog("combined.png", |path| {
                colorfilters::side_by_side(session.mask(), session.masked_image()).save(path)
            });
        }
        if let Some(error) = &self.error {
            crate::app::show_error(ui, error);
        }
    }

    fn save_with_dialog(
        &mut self,
        file_name: &str,
        save: impl FnOnce(&std::path::Path) -> image::ImageResult<()>,
    ) {
        let dialog = rfd::FileDialog::new()
            .set_title("Save image to")
            .set_file_name(file_name)
            .add_filter("PNG image", &["png"]);
        let Some(path) = dialog.save_file() else {
            return;
        };
        match save(&path) {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", path.display());
                self.error = Some(e.to_string());
            }
        }
    }
}
