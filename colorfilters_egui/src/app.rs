use std::{cell::RefCell, rc::Rc};

use colorfilters::{BoundVector, Colorspace, DisplayMode, Displayed, ThresholdSession};
use strum::VariantArray;

use crate::{
    image_view::ImageView,
    input::{self, Command},
    save::SaveButtons,
    settings::Settings,
    sliders::SliderPanel,
};

/// Colorspace and bounds of the session at the time the window closed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub colorspace: Colorspace,
    pub lower: BoundVector,
    pub upper: BoundVector,
}

impl SessionSnapshot {
    fn of(session: &ThresholdSession) -> Self {
        let (lower, upper) = session.current_bounds();
        Self {
            colorspace: session.current_colorspace(),
            lower: lower.clone(),
            upper: upper.clone(),
        }
    }
}

/// What the window starts from.
pub struct Launch {
    pub session: ThresholdSession,
    /// A colorspace given on the command line wins over the stored one.
    pub colorspace_from_cli: bool,
    /// Show mask and masked image next to each other.
    pub multi_window: bool,
    /// Filled with the latest state, readable after the event loop returned.
    pub snapshot: Rc<RefCell<Option<SessionSnapshot>>>,
}

pub struct ColorFiltersApp {
    settings: Settings,
    session: ThresholdSession,
    sliders: SliderPanel,
    mask_view: ImageView,
    masked_view: ImageView,
    save_buttons: SaveButtons,
    multi_window: bool,
    hovered: Option<(u32, u32)>,
    snapshot: Rc<RefCell<Option<SessionSnapshot>>>,
}

impl ColorFiltersApp {
    pub fn new(cc: &eframe::CreationContext<'_>, launch: Launch) -> Self {
        let settings: Settings = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Settings::default()
        };
        Self::with_settings(settings, launch)
    }

    fn with_settings(mut settings: Settings, launch: Launch) -> Self {
        let Launch {
            mut session,
            colorspace_from_cli,
            multi_window,
            snapshot,
        } = launch;
        if colorspace_from_cli {
            settings.colorspace = session.current_colorspace();
        } else if settings.colorspace != session.current_colorspace() {
            session.switch_colorspace(settings.colorspace);
        }
        if settings.display_mode != session.display_mode() {
            session.toggle_display_mode();
        }
        let app = Self {
            settings,
            sliders: SliderPanel::new(&session),
            session,
            mask_view: ImageView::new("mask"),
            masked_view: ImageView::new("masked"),
            save_buttons: SaveButtons::default(),
            multi_window,
            hovered: None,
            snapshot,
        };
        app.publish();
        app
    }

    fn apply(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::SetBound {
                colorspace,
                channel,
                edge,
                position,
            } => {
                if colorspace != self.session.current_colorspace() {
                    log::debug!("Dropped {colorspace} bound change after a colorspace switch");
                    return;
                }
                self.session.set_channel_bound(channel, edge, position);
            }
            Command::SwitchColorspace(colorspace) => {
                self.session.switch_colorspace(colorspace);
                self.sliders.sync(&self.session);
                self.settings.colorspace = colorspace;
            }
            Command::ToggleDisplayMode => {
                self.session.toggle_display_mode();
                self.settings.display_mode = self.session.display_mode();
            }
            Command::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
        self.publish();
    }

    /// Panel commands were made against the colorspace the panel was drawn
    /// for, so they run before this frame's key presses.
    fn apply_frame(&mut self, ctx: &egui::Context, panel: Vec<Command>, keys: Vec<Command>) {
        for command in panel.into_iter().chain(keys) {
            self.apply(ctx, command);
        }
    }

    fn publish(&self) {
        *self.snapshot.borrow_mut() = Some(SessionSnapshot::of(&self.session));
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, commands: &mut Vec<Command>) {
        let current = self.session.current_colorspace();
        ui.heading("Colorspace");
        for (index, colorspace) in Colorspace::VARIANTS.iter().enumerate() {
            let selected = *colorspace == current;
            if ui
                .selectable_label(selected, format!("{} {colorspace}", index + 1))
                .clicked()
                && !selected
            {
                commands.push(Command::SwitchColorspace(*colorspace));
            }
        }
        ui.separator();

        self.sliders.show(ui, current.spec(), commands);
        let (lower, upper) = self.session.current_bounds();
        ui.label(format!("lower {lower}"));
        ui.label(format!("upper {upper}"));

        let toggle = match self.session.display_mode() {
            DisplayMode::Mask => "Show masked image",
            DisplayMode::Masked => "Show mask",
        };
        if ui.button(toggle).clicked() {
            commands.push(Command::ToggleDisplayMode);
        }

        if let Some((x, y)) = self.hovered {
            let converted = self.session.converted_image();
            if x < converted.width() && y < converted.height() {
                ui.label(format!(
                    "({x}, {y}) {current} {:?}",
                    converted.channels(x, y)
                ));
            }
        }
        ui.separator();

        self.save_buttons.show(ui, &self.session);
        ui.separator();

        // Light/dark mode
        {
            let is_dark = &mut self.settings.is_dark;
            let label = match *is_dark {
                true => "🌙->☀",
                false => "☀->🌙",
            };
            if ui.button(label).clicked() {
                *is_dark = !*is_dark;
            }
        }
        ui.small("[1]-[8] colorspace, [space]/[m] mask, [q]/[esc] close");
    }

    fn show_images(&mut self, ui: &mut egui::Ui) {
        self.hovered = if self.multi_window {
            let mut hovered = None;
            ui.columns(2, |columns| {
                let mask = self.mask_view.show_gray(&mut columns[0], self.session.mask());
                let masked = self
                    .masked_view
                    .show_rgb(&mut columns[1], self.session.masked_image());
                hovered = mask.or(masked);
            });
            hovered
        } else {
            match self.session.displayed_image() {
                Displayed::Mask(mask) => self.mask_view.show_gray(ui, mask),
                Displayed::Masked(masked) => self.masked_view.show_rgb(ui, masked),
            }
        };
    }
}

impl eframe::App for ColorFiltersApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(match self.settings.is_dark {
            true => egui::Visuals::dark(),
            false => egui::Visuals::light(),
        });

        let mut commands = Vec::new();
        egui::SidePanel::left("controls").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.show_controls(ui, &mut commands));
        });
        self.apply_frame(ctx, commands, input::read_commands(ctx));

        if self.session.take_redisplay() {
            self.mask_view.invalidate();
            self.masked_view.invalidate();
        }
        egui::CentralPanel::default().show(ctx, |ui| self.show_images(ui));
    }
}

pub(crate) fn show_error(ui: &mut egui::Ui, error: &str) {
    ui.heading(
        egui::RichText::new(error)
            .background_color(egui::Color32::RED)
            .color(egui::Color32::WHITE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(colorspace: Colorspace, colorspace_from_cli: bool) -> Launch {
        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 200, 30]));
        Launch {
            session: ThresholdSession::with_colorspace(image, colorspace).unwrap(),
            colorspace_from_cli,
            multi_window: false,
            snapshot: Default::default(),
        }
    }

    #[test]
    fn stored_settings_restore_colorspace_and_display_mode() {
        let settings = Settings {
            colorspace: Colorspace::Lab,
            display_mode: DisplayMode::Mask,
            is_dark: true,
        };
        let app = ColorFiltersApp::with_settings(settings, launch(Colorspace::Bgr, false));
        assert_eq!(app.session.current_colorspace(), Colorspace::Lab);
        assert_eq!(app.session.display_mode(), DisplayMode::Mask);
        assert_eq!(app.settings, settings);
    }

    #[test]
    fn command_line_colorspace_wins() {
        let settings = Settings {
            colorspace: Colorspace::Lab,
            ..Default::default()
        };
        let app = ColorFiltersApp::with_settings(settings, launch(Colorspace::Hsv, true));
        assert_eq!(app.session.current_colorspace(), Colorspace::Hsv);
        assert_eq!(app.settings.colorspace, Colorspace::Hsv);
    }

    #[test]
    fn commands_update_the_snapshot() {
        let launch = launch(Colorspace::Bgr, true);
        let snapshot = launch.snapshot.clone();
        let mut app = ColorFiltersApp::with_settings(Settings::default(), launch);
        let ctx = egui::Context::default();
        app.apply(
            &ctx,
            Command::SetBound {
                colorspace: Colorspace::Bgr,
                channel: 1,
                edge: colorfilters::Edge::Lower,
                position: 50,
            },
        );
        app.apply(&ctx, Command::SwitchColorspace(Colorspace::Grayscale));

        let snapshot = snapshot.borrow().clone().unwrap();
        assert_eq!(snapshot.colorspace, Colorspace::Grayscale);
        assert_eq!(snapshot.lower.as_slice(), [0]);
        assert_eq!(snapshot.upper.as_slice(), [255]);
        assert_eq!(app.settings.colorspace, Colorspace::Grayscale);
    }

    fn upper_bound(colorspace: Colorspace, channel: usize, position: u8) -> Command {
        Command::SetBound {
            colorspace,
            channel,
            edge: colorfilters::Edge::Upper,
            position,
        }
    }

    #[test]
    fn slider_change_lands_before_key_switch_in_the_same_frame() {
        let mut app = ColorFiltersApp::with_settings(Settings::default(), launch(Colorspace::Bgr, true));
        let ctx = egui::Context::default();
        app.apply_frame(
            &ctx,
            vec![upper_bound(Colorspace::Bgr, 2, 40)],
            vec![Command::SwitchColorspace(Colorspace::Grayscale)],
        );
        assert_eq!(app.session.current_colorspace(), Colorspace::Grayscale);
        let (lower, upper) = app.session.current_bounds();
        assert_eq!(lower.as_slice(), [0]);
        assert_eq!(upper.as_slice(), [255]);
        assert_eq!(app.sliders.positions(), [[0, 100]]);
    }

    #[test]
    fn bound_change_for_a_previous_colorspace_is_dropped() {
        let mut app = ColorFiltersApp::with_settings(Settings::default(), launch(Colorspace::Bgr, true));
        let ctx = egui::Context::default();
        app.apply_frame(
            &ctx,
            vec![
                Command::SwitchColorspace(Colorspace::Grayscale),
                upper_bound(Colorspace::Bgr, 2, 40),
            ],
            vec![],
        );
        assert_eq!(app.session.current_colorspace(), Colorspace::Grayscale);
        assert_eq!(app.session.current_bounds().1.as_slice(), [255]);
    }

    #[test]
    fn sliders_follow_a_same_frame_switch_into_hue() {
        let mut app = ColorFiltersApp::with_settings(Settings::default(), launch(Colorspace::Bgr, true));
        let ctx = egui::Context::default();
        app.apply_frame(
            &ctx,
            vec![upper_bound(Colorspace::Bgr, 0, 70)],
            vec![Command::SwitchColorspace(Colorspace::Hsv)],
        );
        assert_eq!(app.session.current_bounds().1.as_slice(), [126, 255, 255]);
        assert_eq!(app.sliders.positions()[0], [0, 70]);
    }
}
