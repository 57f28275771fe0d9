#![deny(unsafe_code)]
//! CLI binary for the theme-lab editor core.
//!
//! Subcommands:
//! - `inspect <hex>`: show every representation of a color
//! - `colors <file>`: list the editable colors of one theme
//! - `set <file> <path> <hex>`: change one color and write the document
//! - `oklch <l> <c> <h>`: canonical hex for an OKLCH value

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use theme_lab_core::{
    extract_theme_colors, gamut_map, is_in_gamut, parse_full, to_hex, to_oklch, ChangeTracker,
    Color, ColorPath, ExtractionRules, ThemeFamily,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "theme-lab", about = "Inspect and edit colors in theme documents")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Extraction rules as a JSON string (missing fields keep their defaults).
    #[arg(long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show hex, RGB, HSL and OKLCH for a hex color.
    Inspect {
        /// Hex color (#RGB, #RGBA, #RRGGBB or #RRGGBBAA).
        hex: String,
    },
    /// List every editable color in one theme.
    Colors {
        /// Theme family JSON file.
        file: PathBuf,

        /// Index of the theme within the family.
        #[arg(short, long, default_value_t = 0)]
        theme: usize,
    },
    /// Set one color and write the updated document.
    Set {
        /// Theme family JSON file.
        file: PathBuf,

        /// Encoded color path as printed by `colors` (e.g. "players/[0]/cursor").
        path: String,

        /// New hex color.
        hex: String,

        /// Index of the theme within the family.
        #[arg(short, long, default_value_t = 0)]
        theme: usize,

        /// Output file path (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert an OKLCH value to its canonical hex, gamut-mapping if needed.
    #[command(allow_negative_numbers = true)]
    Oklch {
        /// Lightness in [0, 1].
        l: f64,
        /// Chroma (unbounded).
        c: f64,
        /// Hue in degrees.
        h: f64,

        /// Alpha in [0, 1].
        #[arg(short, long, default_value_t = 1.0)]
        alpha: f64,
    },
}

fn load(file: &Path) -> Result<ThemeFamily, CliError> {
    let text = fs::read_to_string(file)
        .map_err(|e| CliError::Io(format!("{}: {e}", file.display())))?;
    let doc = ThemeFamily::from_json(&text)?;
    debug!(file = %file.display(), themes = doc.themes.len(), "loaded theme family");
    Ok(doc)
}

fn load_rules(cli_rules: Option<&str>) -> Result<ExtractionRules, CliError> {
    match cli_rules {
        Some(text) => ExtractionRules::from_json(text)
            .map_err(|e| CliError::Input(format!("invalid --rules JSON: {e}"))),
        None => Ok(ExtractionRules::default()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Command::Inspect { hex } => {
            let parsed = parse_full(&hex)
                .ok_or_else(|| CliError::Input(format!("not a hex color: {hex:?}")))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                let rgb = parsed.rgb;
                let hsl = parsed.hsl;
                let lch = parsed.oklch;
                println!("hex    {}", parsed.hex);
                println!("rgb    {} {} {}", rgb.r, rgb.g, rgb.b);
                println!("hsl    {} {}% {}%", hsl.h, hsl.s, hsl.l);
                println!("oklch  {} {} {}", lch.l, lch.c, lch.h);
                println!("alpha  {}", parsed.alpha);
            }
        }
        Command::Colors { file, theme } => {
            let doc = load(&file)?;
            let entries = extract_theme_colors(&doc, theme, &rules)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}\t{}\t{}", entry.path_key(), entry.display_key, entry.value);
                }
            }
        }
        Command::Set {
            file,
            path,
            hex,
            theme,
            output,
        } => {
            let mut tracker = ChangeTracker::new(load(&file)?);
            let path = ColorPath::decode(&path)?;
            tracker.apply_color(theme, &path, &hex)?;
            let text = tracker.current().to_json_pretty()?;

            match output {
                Some(out) => {
                    fs::write(&out, text + "\n")
                        .map_err(|e| CliError::Io(format!("{}: {e}", out.display())))?;
                    if cli.json {
                        let summary = serde_json::json!({
                            "path": path.encode(),
                            "display_key": path.display_key(),
                            "changed": tracker.is_dirty(),
                            "output": out.display().to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        println!("set {} -> {}", path.display_key(), out.display());
                    }
                }
                None => {
                    println!("{text}");
                    if !tracker.is_dirty() {
                        eprintln!("note: {} already had that value", path.display_key());
                    }
                }
            }
        }
        Command::Oklch { l, c, h, alpha } => {
            let color = Color::from_oklch(l, c, h, alpha);
            let in_gamut = is_in_gamut(color);
            let hex = to_hex(color, false);
            let mapped = to_oklch(gamut_map(color));
            if cli.json {
                let info = serde_json::json!({
                    "hex": hex,
                    "in_gamut": in_gamut,
                    "requested": to_oklch(color),
                    "mapped": mapped,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{hex}");
                if !in_gamut {
                    eprintln!(
                        "out of sRGB gamut; chroma reduced to {} (l {} h {})",
                        mapped.c, mapped.l, mapped.h
                    );
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("warn"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
