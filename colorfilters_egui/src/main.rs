#![warn(clippy::all, rust_2018_idioms)]

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use clap::Parser;
use colorfilters::{Colorspace, ThresholdResult, ThresholdSession};
use colorfilters_egui::{ColorFiltersApp, Launch};

/// Threshold an image interactively in one of eight colorspaces.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Image to threshold
    image: PathBuf,

    /// Initial colorspace: bgr, hsv, hls, lab, luv, ycc, xyz or gray
    #[arg(value_parser = parse_colorspace)]
    colorspace: Option<Colorspace>,

    /// Show mask and masked image side by side at full resolution
    #[arg(long)]
    multi_window: bool,

    /// Write the final mask to this file
    #[arg(long, value_name = "PATH")]
    save_mask: Option<PathBuf>,

    /// Write the final masked image to this file
    #[arg(long, value_name = "PATH")]
    save_masked: Option<PathBuf>,

    /// Largest width and height of the displayed preview
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    preview_size: u32,
}

fn parse_colorspace(key: &str) -> Result<Colorspace, colorfilters::Error> {
    Colorspace::from_key(key)
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Threshold(#[from] colorfilters::Error),
    #[error("could not load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("could not save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("window failed: {0}")]
    Window(#[from] eframe::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let image = image::open(&cli.image)
        .map_err(|source| Error::Load {
            path: cli.image.clone(),
            source,
        })?
        .to_rgb8();
    let displayed = if cli.multi_window {
        image.clone()
    } else {
        colorfilters::preview_image(&image, cli.preview_size, cli.preview_size)
    };
    log::info!(
        "Loaded {} ({}x{}), displaying {}x{}",
        cli.image.display(),
        image.width(),
        image.height(),
        displayed.width(),
        displayed.height()
    );

    let colorspace = cli.colorspace.unwrap_or_default();
    let snapshot = Rc::new(RefCell::new(None));
    let launch = Launch {
        session: ThresholdSession::with_colorspace(displayed, colorspace)?,
        colorspace_from_cli: cli.colorspace.is_some(),
        multi_window: cli.multi_window,
        snapshot: snapshot.clone(),
    };

    println!("Press [q] or [esc] to close the window.");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("colorfilters: {}", cli.image.display()))
            .with_inner_size([1100.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "colorfilters",
        options,
        Box::new(move |cc| Box::new(ColorFiltersApp::new(cc, launch))),
    )?;

    let Some(snapshot) = snapshot.borrow_mut().take() else {
        return Ok(());
    };
    let result = ThresholdResult::compute(&image, snapshot.colorspace, snapshot.lower, snapshot.upper)?;
    println!(
        "Image filtered in {} between {} and {}.",
        result.colorspace, result.lower, result.upper
    );
    save(cli.save_mask, &result.mask)?;
    save(cli.save_masked, &result.masked)?;
    Ok(())
}

fn save<P, C>(path: Option<PathBuf>, image: &image::ImageBuffer<P, C>) -> Result<(), Error>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    let Some(path) = path else {
        return Ok(());
    };
    image.save(&path).map_err(|source| Error::Save {
        path: path.clone(),
        source,
    })?;
    log::info!("Saved {}", path.display());
    Ok(())
}
