//! `panoview` command-line entry point.

use std::path::PathBuf;

use clap::Parser;
use panoview::{query, Options, Viewer};

/// Look around 360° equirectangular panoramas.
#[derive(Debug, Parser)]
#[command(name = "panoview", version, about)]
struct Cli {
    /// Image to show first, relative to the image directory.
    #[arg(long, value_name = "NAME")]
    pano: Option<String>,

    /// URL query string carrying `pano=NAME`, as in a shared link.
    #[arg(long, value_name = "QS", conflicts_with = "pano")]
    query: Option<String>,

    /// Directory holding the panoramas.
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// Image list: a path relative to the image directory, or a URL.
    #[arg(long, value_name = "PATH_OR_URL")]
    list: Option<String>,

    /// TOML options file.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Result<Options, panoview::PanoError> {
        let mut options = match &self.options {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(dir) = &self.images {
            options.images.directory.clone_from(dir);
        }
        if let Some(list) = &self.list {
            options.images.list.clone_from(list);
        }
        Ok(options)
    }

    fn requested_image(&self) -> Option<String> {
        self.pano
            .clone()
            .or_else(|| self.query.as_deref().and_then(query::pano_from_query))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = match cli.options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let initial_image = query::resolve_initial_image(
        cli.requested_image().as_deref(),
        &options.images.default_image,
    );

    let result = Viewer::builder()
        .with_options(options)
        .with_initial_image(initial_image)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
