use std::cell::Cell;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Result};
use clap::Parser;

use qrsvg_core::{Ecl, Mode, Segment, Version};
use qrsvg_render::{ErrorHandler, Length, LogoSpec, Payload, QrSvg, RenderConfig, Size, SvgWriter};

#[derive(Parser)]
#[command(name = "qrsvg_cli")]
#[command(version)]
#[command(about = "Render QR codes as SVG from the command line", long_about = None)]
struct Cli {
    #[arg(help = "Text to encode. Read from --input or stdin if unspecified")]
    value: Option<String>,
    #[arg(short, long, help = "Input file holding the text to encode")]
    input: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Output file or stdout if unspecified",
        long_help = "Output file or stdout if unspecified. The output file must have the .svg extension"
    )]
    output: Option<PathBuf>,
    #[arg(short, long, help = "TOML file with display parameters, overridden by the flags below")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Side length of the drawing [default: 128]")]
    size: Option<String>,
    #[arg(long, help = "Background color [default: transparent]")]
    bg: Option<String>,
    #[arg(long, help = "Module color [default: black]")]
    fg: Option<String>,
    #[arg(long, value_parser = parse_ecl, help = "Error correction level: L, M, Q or H")]
    ecl: Option<Ecl>,
    #[arg(long, value_parser = parse_version, help = "QR version, from 1 to 40")]
    qr_version: Option<Version>,
    #[arg(long, help = "Logo image source")]
    logo: Option<String>,
    #[arg(long, requires = "logo", help = "Logo width, absolute or a percentage such as 20%")]
    logo_width: Option<String>,
    #[arg(long, requires = "logo", help = "Logo height, absolute or a percentage such as 20%")]
    logo_height: Option<String>,
    #[arg(long, requires = "logo")]
    logo_x: Option<f64>,
    #[arg(long, requires = "logo")]
    logo_y: Option<f64>,
    #[arg(long, requires = "logo")]
    logo_opacity: Option<f64>,
    #[arg(long, requires = "logo", help = "Center the logo on the drawing")]
    centerize: bool,
    #[arg(long, requires = "logo", help = "Draw the logo under the modules")]
    as_background: bool,
    #[arg(
        long,
        value_parser = parse_segment_mode,
        help = "Encode the value as a single segment: num, alnum, bytes, kanji or auto",
        long_help = "Encode the value as a single segment with the given mode: num, alnum, bytes, kanji, or auto to \
                     pick the most compact mode able to hold the whole value"
    )]
    segment_mode: Option<SegmentMode>,
    #[arg(long, conflicts_with = "segment_mode", help = "Pack text into bytes before encoding it")]
    legacy_bytes: bool,
    #[arg(long, help = "Write the SVG document on a single line")]
    compact: bool,
    #[arg(long, help = "Fail if any error is reported, even when a degraded drawing was produced")]
    strict: bool,
}

/// How the value is split into segments.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SegmentMode {
    Auto,
    Fixed(Mode),
}

fn parse_segment_mode(value: &str) -> Result<SegmentMode, String> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Ok(SegmentMode::Auto);
    }
    value.parse().map(SegmentMode::Fixed)
}

/// Build the payload handed to the encoder.
fn payload(value: String, mode: Option<SegmentMode>) -> Payload {
    match mode {
        None => Payload::Text(value),
        Some(SegmentMode::Auto) => Payload::Segments(vec![Segment::auto(value)]),
        Some(SegmentMode::Fixed(mode)) => Payload::Segments(vec![Segment::new(mode, value)]),
    }
}

fn parse_ecl(value: &str) -> Result<Ecl, String> {
    value.parse()
}

fn parse_version(value: &str) -> Result<Version, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("invalid QR version '{}'", value))?;
    Version::try_from(number)
}

fn parse_length(value: &str) -> Length {
    match value.trim().parse::<f64>() {
        Ok(px) => Length::Px(px),
        Err(_) => Length::Text(value.to_string()),
    }
}

fn parse_size(value: &str) -> Size {
    match value.trim().parse::<f64>() {
        Ok(px) => Size::Px(px),
        Err(_) => Size::Text(value.to_string()),
    }
}

impl Cli {
    /// Merge the flags into `config`.
    fn apply(&self, config: &mut RenderConfig) {
        let display = &mut config.display;
        if let Some(size) = &self.size {
            display.size = parse_size(size);
        }
        if let Some(bg) = &self.bg {
            display.bg_color = bg.as_str().into();
        }
        if let Some(fg) = &self.fg {
            display.fg_color = fg.as_str().into();
        }
        if self.ecl.is_some() {
            display.ecl = self.ecl;
        }
        if self.qr_version.is_some() {
            display.version = self.qr_version;
        }
        display.legacy_bytes |= self.legacy_bytes;

        if let Some(href) = &self.logo {
            let mut logo = config.logo.take().unwrap_or_default();
            logo.href = href.clone();
            config.logo = Some(logo);
        }
        if let Some(logo) = config.logo.as_mut() {
            merge_logo(self, logo);
        }
    }
}

fn merge_logo(cli: &Cli, logo: &mut LogoSpec) {
    if let Some(width) = &cli.logo_width {
        logo.width = Some(parse_length(width));
    }
    if let Some(height) = &cli.logo_height {
        logo.height = Some(parse_length(height));
    }
    logo.x = cli.logo_x.or(logo.x);
    logo.y = cli.logo_y.or(logo.y);
    logo.opacity = cli.logo_opacity.or(logo.opacity);
    if cli.centerize {
        logo.centerized = Some(true);
    }
    if cli.as_background {
        logo.as_background = Some(true);
    }
}

fn read_value(cli: &Cli) -> Result<String> {
    if let Some(value) = &cli.value {
        return Ok(value.clone());
    }
    let mut bytes = Vec::new();
    match &cli.input {
        Some(path) => {
            File::open(path)?.read_to_end(&mut bytes)?;
        }
        None => {
            std::io::stdin().read_to_end(&mut bytes)?;
        }
    }
    let text = String::from_utf8(bytes)?;
    // Files and pipes usually end with a newline that is not part of the value.
    Ok(text.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // Before doing anything, make sure the requested output is valid.
    if let Some(path) = &cli.output {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("svg") => {}
            Some(invalid) => bail!("invalid output extension '{}'", invalid),
            None => bail!("requested output has no extension"),
        }
    }

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load_from_file(path)?,
        None => RenderConfig::load_or_default(),
    };
    cli.apply(&mut config);

    let value = read_value(&cli)?;
    let failures = Rc::new(Cell::new(0usize));
    let counter = failures.clone();
    let handler = ErrorHandler::new(move |message| {
        counter.set(counter.get() + 1);
        log::error!("{}", message);
    });
    let props = config
        .props(payload(value, cli.segment_mode))
        .with_on_error(handler);

    let mut qr = QrSvg::new().with_legacy_bytes(config.display.legacy_bytes);
    let Some(drawing) = qr.render(&props) else {
        bail!("nothing was rendered");
    };
    if cli.strict && failures.get() > 0 {
        bail!("{} error(s) reported while rendering", failures.get());
    }

    let mut writer = SvgWriter::new().with_xml_declaration(cli.output.is_some());
    if cli.compact {
        writer = writer.compact();
    }
    match &cli.output {
        Some(path) => {
            let mut output = BufWriter::new(File::create(path)?);
            writer.render(&mut output, &drawing)?;
            output.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut output = stdout.lock();
            writer.render(&mut output, &drawing)?;
        }
    }
    Ok(())
}
