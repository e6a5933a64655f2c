use colorfilters::{native_to_slider, ColorspaceSpec, Edge, ThresholdSession, SLIDER_RANGE};

use crate::input::Command;

const EDGES: [Edge; 2] = [Edge::Lower, Edge::Upper];

/// Min/max slider pair for every channel of the active colorspace.
#[derive(Debug, Default)]
pub(crate) struct SliderPanel {
    positions: Vec<[u8; 2]>,
}

impl SliderPanel {
    pub(crate) fn new(session: &ThresholdSession) -> Self {
        let mut panel = Self::default();
        panel.sync(session);
        panel
    }

    /// Moves the sliders to the session's bounds, e.g. after a colorspace
    /// switch rescaled them.
    pub(crate) fn sync(&mut self, session: &ThresholdSession) {
        let spec = session.current_colorspace().spec();
        let (lower, upper) = session.current_bounds();
        self.positions = spec
            .channel_ranges()
            .enumerate()
            .map(|(channel, range)| {
                [
                    native_to_slider(lower[channel], SLIDER_RANGE, range),
                    native_to_slider(upper[channel], SLIDER_RANGE, range),
                ]
            })
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> &[[u8; 2]] {
        &self.positions
    }

    pub(crate) fn show(
        &mut self,
        ui: &mut egui::Ui,
        spec: &ColorspaceSpec,
        commands: &mut Vec<Command>,
    ) {
        for (channel, (name, positions)) in spec
            .channel_names
            .iter()
            .zip(self.positions.iter_mut())
            .enumerate()
        {
            for (edge, position) in EDGES.into_iter().zip(positions.iter_mut()) {
                let slider = egui::Slider::new(position, SLIDER_RANGE.min..=SLIDER_RANGE.max)
                    .text(format!("{name} {}", edge.label()));
                if ui.add(slider).changed() {
                    commands.push(Command::SetBound {
                        colorspace: spec.colorspace,
                        channel,
                        edge,
                        position: *position,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorfilters::Colorspace;

    fn session() -> ThresholdSession {
        ThresholdSession::new(image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]))).unwrap()
    }

    #[test]
    fn starts_fully_open() {
        let panel = SliderPanel::new(&session());
        assert_eq!(panel.positions, vec![[0, 100]; 3]);
    }

    #[test]
    fn follows_colorspace_switches() {
        let mut session = session();
        session.set_channel_bound(0, Edge::Lower, 30);
        session.set_channel_bound(0, Edge::Upper, 70);
        session.switch_colorspace(Colorspace::Hsv);
        let mut panel = SliderPanel::default();
        panel.sync(&session);
        assert_eq!(panel.positions[0], [30, 70]);
        session.switch_colorspace(Colorspace::Grayscale);
        panel.sync(&session);
        assert_eq!(panel.positions, vec![[30, 70]]);
    }
}
