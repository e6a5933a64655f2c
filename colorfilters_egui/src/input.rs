use colorfilters::{Colorspace, Edge};

/// Everything the window can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// `colorspace` is the one the slider was drawn for.
    SetBound {
        colorspace: Colorspace,
        channel: usize,
        edge: Edge,
        position: u8,
    },
    SwitchColorspace(Colorspace),
    ToggleDisplayMode,
    Close,
}

/// `1`..`8` in colorspace order.
const COLORSPACE_KEYS: [egui::Key; 8] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
    egui::Key::Num8,
];

pub(crate) fn command_for_key(key: egui::Key) -> Option<Command> {
    if let Some(index) = COLORSPACE_KEYS.iter().position(|k| *k == key) {
        return Colorspace::from_index(index).map(Command::SwitchColorspace);
    }
    match key {
        egui::Key::Space | egui::Key::M => Some(Command::ToggleDisplayMode),
        egui::Key::Q | egui::Key::Escape => Some(Command::Close),
        _ => None,
    }
}

/// Commands for the keys pressed since the last frame, in press order.
pub(crate) fn read_commands(ctx: &egui::Context) -> Vec<Command> {
    ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => command_for_key(*key),
                _ => None,
            })
            .collect()
    })
}
