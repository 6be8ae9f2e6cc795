mod prompt;

use crate::prompt::Prompter;
use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use vasarely::{timed, Tiler, TilingConfig};

/// CLI for drawing hexagon tilings, optionally warped by an emerging sphere.
#[derive(Debug, StructOpt)]
#[structopt(name = "vasarely")]
struct Opt {
    /// Path to a config file that defines the tiling to be drawn. Supported
    /// formats: JSON, TOML. Any field left out of the file uses its default
    /// value. If neither this nor `--interactive` is given, the default
    /// tiling is drawn.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Prompt for each tiling parameter on the command line, instead of
    /// reading them from a config file
    #[structopt(short, long)]
    interactive: bool,

    /// If given, the rendered tiling will be saved to this directory. The
    /// exact files that appear in the directory are defined by the output
    /// formats. See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the tiling in. Supported formats:
    ///
    /// svg - 2D rendering of the tiling
    ///
    /// json - The list of draw commands that make up the tiling, which can
    ///   be replayed onto any other drawing backend
    ///
    /// cfg - The full config used for the tiling, in TOML format
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Render the tiling as a 2D SVG
    Svg,
    /// Export the draw commands as JSON
    Json,
    /// Export the tiling's full config in a human-readable file
    Cfg,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
            Self::Cfg => "toml",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<TilingConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the tiling in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    tiler: &Tiler,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        tiler: &Tiler,
    ) -> anyhow::Result<Vec<u8>> {
        let bytes = match output_format {
            OutputFormat::Svg => tiler.render_as_svg()?.into_bytes(),
            OutputFormat::Json => tiler.render_as_json()?.into_bytes(),
            OutputFormat::Cfg => {
                // Go through a toml Value, which knows to put plain values
                // ahead of tables
                let value = toml::Value::try_from(tiler.config())
                    .context("error serializing config")?;
                toml::to_string_pretty(&value)
                    .context("error serializing config")?
                    .into_bytes()
            }
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("vasarely")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, tiler)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match (opt.config, opt.interactive) {
        (Some(config_path), false) => {
            let config = load_config(&config_path)?;
            info!("Loaded config from {:?}", &config_path);
            config
        }
        (None, true) => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stderr());
            prompter.tiling_config()?
        }
        (None, false) => TilingConfig::default(),
        (Some(_), true) => bail!(
            "pass at most one of --config (to load parameters from a file) \
            or --interactive (to enter them by hand)"
        ),
    };
    let tiler = Tiler::new(config)?;
    info!("Drawing tiling with config {:#?}", tiler.config());

    save_outputs(opt.output.as_deref(), &opt.output_formats, &tiler)?;
    Ok(())
}

/// If an output dir was specified, write out output format(s) there. Returns
/// the number of files written.
fn save_outputs(
    output_dir: Option<&Path>,
    output_formats: &[OutputFormat],
    tiler: &Tiler,
) -> anyhow::Result<usize> {
    let output_dir = match output_dir {
        Some(output_dir) => output_dir,
        None => {
            warn!("No output dir given, nothing will be saved");
            return Ok(0);
        }
    };
    if output_formats.is_empty() {
        bail!("output dir was specified, but no output formats were given")
    }
    fs::create_dir_all(output_dir).with_context(|| {
        format!("error creating output dir {:?}", output_dir)
    })?;
    for output_format in output_formats {
        gen_output(output_dir, *output_format, tiler)?;
    }
    Ok(output_formats.len())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
