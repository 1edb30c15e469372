use bodymap::render::raster::{self, RasterError, RasterOptions};
use bodymap::render::{AssetSource, HeadlessBodyMap, HeadlessError, MemorySource};
use bodymap::{BodyMapConfig, BodyPart, ConditionIndex, Placement, format_label, tables};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BODYMAP_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    BodyMap(bodymap::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::BodyMap(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bodymap::Error> for CliError {
    fn from(value: bodymap::Error) -> Self {
        Self::BodyMap(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Default)]
enum Command {
    Parts,
    Label(String),
    #[default]
    Render,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    assets: Option<String>,
    config: Option<String>,
    hover: Option<String>,
    select: Option<String>,
    read_only: bool,
    diagram_id: Option<String>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartOut {
    id: BodyPart,
    label: String,
    asset_file: Option<&'static str>,
    placement: Option<Placement>,
}

fn usage() -> &'static str {
    "bodymap-cli\n\
\n\
USAGE:\n\
  bodymap-cli parts [--pretty]\n\
  bodymap-cli label <identifier>\n\
  bodymap-cli [render] [--assets <dir>] [--config <path>] [--hover <part>] [--select <part>] [--read-only] [--id <diagram-id>] [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--out <path>] [<conditions.json>|-]\n\
\n\
NOTES:\n\
  - Conditions are a JSON array of {\"bodyPart\": \"...\", \"description\": \"...\"}.\n\
  - If <conditions.json> is omitted or '-', conditions are read from stdin.\n\
  - --assets serves a directory under the configured asset route; without it the silhouette\n\
    is referenced by URL and organs fall back to their hit regions.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - Set BODYMAP_LOG (e.g. BODYMAP_LOG=debug) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parts" => args.command = Command::Parts,
            "render" => args.command = Command::Render,
            "label" => {
                let Some(identifier) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.command = Command::Label(identifier.clone());
            }
            "--pretty" => args.pretty = true,
            "--read-only" => args.read_only = true,
            "--assets" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.assets = Some(dir.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--hover" => {
                let Some(part) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.hover = Some(part.clone());
            }
            "--select" => {
                let Some(part) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select = Some(part.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn parse_part(raw: Option<&str>) -> Result<Option<BodyPart>, CliError> {
    raw.map(BodyPart::from_str).transpose().map_err(CliError::from)
}

fn load_config(path: Option<&str>) -> Result<BodyMapConfig, CliError> {
    match path {
        None => Ok(BodyMapConfig::default()),
        Some(path) => Ok(BodyMapConfig::from_json_str(&std::fs::read_to_string(path)?)?),
    }
}

fn render_with<S>(
    renderer: &HeadlessBodyMap,
    source: S,
    conditions: ConditionIndex,
) -> Result<String, CliError>
where
    S: AssetSource + 'static,
{
    let rendered = renderer.render_sync(source, conditions.conditions().to_vec())?;
    let failed = rendered.report.failed.len();
    if failed > 0 {
        tracing::warn!(
            failed,
            loaded = rendered.report.loaded.len(),
            "some assets failed to load; affected parts fall back to hit regions"
        );
    }
    Ok(rendered.svg)
}

fn run(args: Args) -> Result<(), CliError> {
    match &args.command {
        Command::Parts => {
            let parts: Vec<PartOut> = BodyPart::ALL
                .into_iter()
                .map(|part| PartOut {
                    id: part,
                    label: part.label(),
                    asset_file: tables::asset_file(part),
                    placement: tables::placement(part),
                })
                .collect();
            write_json(&parts, args.pretty)
        }
        Command::Label(identifier) => {
            println!("{}", format_label(identifier));
            Ok(())
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let conditions = ConditionIndex::from_json_str(&text)?;
            let config = load_config(args.config.as_deref())?;

            let mut renderer = HeadlessBodyMap::new()
                .with_config(config)
                .read_only(args.read_only)
                .hover(parse_part(args.hover.as_deref())?)
                .select(parse_part(args.select.as_deref())?);
            if let Some(id) = args.diagram_id.as_deref() {
                renderer = renderer.with_diagram_id(id);
            }

            tracing::info!(
                conditions = conditions.conditions().len(),
                assets = args.assets.as_deref().unwrap_or("<none>"),
                "rendering body map"
            );
            let svg = match args.assets.as_deref() {
                Some(dir) => render_with(&renderer, renderer.static_dir_source(dir), conditions)?,
                None => render_with(&renderer, MemorySource::new(), conditions)?,
            };

            let raster_opts = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };
            let out = || {
                args.out.clone().unwrap_or_else(|| {
                    default_raster_out_path(
                        args.input.as_deref(),
                        args.render_format.extension(),
                    )
                    .to_string_lossy()
                    .to_string()
                })
            };

            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref())?,
                RenderFormat::Png => {
                    write_bytes(&raster::svg_to_png(&svg, &raster_opts)?, &out())?
                }
                RenderFormat::Jpeg => {
                    write_bytes(&raster::svg_to_jpeg(&svg, &raster_opts)?, &out())?
                }
                RenderFormat::Pdf => write_bytes(&raster::svg_to_pdf(&svg)?, &out())?,
            }
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("bodymap-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn render_is_the_default_command() {
        let args = parse_args(&argv(&["conditions.json"])).unwrap();
        assert!(matches!(args.command, Command::Render));
        assert_eq!(args.input.as_deref(), Some("conditions.json"));
        assert_eq!(args.render_format, RenderFormat::Svg);
    }

    #[test]
    fn parses_render_flags() {
        let args = parse_args(&argv(&[
            "render",
            "--assets",
            "fixtures/body-parts",
            "--hover",
            "heart",
            "--select",
            "large_intestine",
            "--read-only",
            "--format",
            "JPEG",
            "--scale",
            "2",
            "-",
        ]))
        .unwrap();
        assert_eq!(args.assets.as_deref(), Some("fixtures/body-parts"));
        assert_eq!(args.hover.as_deref(), Some("heart"));
        assert!(args.read_only);
        assert_eq!(args.render_format, RenderFormat::Jpeg);
        assert_eq!(args.render_scale, 2.0);
        assert_eq!(args.input.as_deref(), Some("-"));
        assert_eq!(
            parse_part(args.select.as_deref()).unwrap(),
            Some(BodyPart::LargeIntestine)
        );
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(matches!(
            parse_args(&argv(&["--scale", "0"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["label"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--unknown"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn raster_out_path_follows_input() {
        assert_eq!(
            default_raster_out_path(Some("cases/heart.json"), "png"),
            std::path::PathBuf::from("cases/heart.png")
        );
        assert_eq!(
            default_raster_out_path(None, "pdf"),
            std::path::PathBuf::from("out.pdf")
        );
    }
}
