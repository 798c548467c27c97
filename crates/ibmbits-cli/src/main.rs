//! ibmbits CLI: inspect and produce mainframe field encodings.
//!
//! `ibmbits decode` turns hex field bytes into a value, `ibmbits encode`
//! does the reverse and `ibmbits codepages` lists the EBCDIC code pages.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::Result;

use ibmbits::CodecConfig;

use commands::decode::Window;
use commands::encode::PackedLayout;
use commands::FieldKind;
use output::{print_json, OutputFormat};

/// ibmbits CLI.
#[derive(Parser)]
#[command(name = "ibmbits", version, about = "IBM mainframe field encodings")]
struct Cli {
    /// Codec configuration file (TOML).
    #[arg(long, global = true, env = "IBMBITS_CONFIG")]
    config: Option<PathBuf>,

    /// Code page name or CCSID, overriding the configuration.
    #[arg(long = "code-page", global = true)]
    code_page: Option<String>,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode hex field bytes to a value.
    Decode(DecodeArgs),
    /// Encode a value to hex field bytes.
    Encode(EncodeArgs),
    /// List supported code pages.
    Codepages,
}

#[derive(Args)]
struct DecodeArgs {
    /// Field kind.
    #[arg(value_enum)]
    kind: FieldKind,

    /// Field bytes as hex (whitespace allowed).
    hex: String,

    /// Digits to the right of the decimal point (packed only).
    #[arg(long, default_value_t = 0)]
    scale: u32,

    /// First byte of the field within the input.
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Field length in bytes (defaults to the rest of the input).
    #[arg(long)]
    length: Option<usize>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Field kind.
    #[arg(value_enum)]
    kind: FieldKind,

    /// Value to encode.
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Integer digits of a fixed-width packed field.
    #[arg(long, requires = "decimals")]
    digits: Option<usize>,

    /// Fraction digits of a fixed-width packed field.
    #[arg(long, requires = "digits")]
    decimals: Option<usize>,

    /// Use the unsigned sign nibble (0xF) for a fixed-width packed field.
    #[arg(long)]
    unsigned: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let format = OutputFormat::parse(&cli.format);
    let config = load_config(cli.config.as_deref(), cli.code_page)?;

    match cli.command {
        Commands::Decode(args) => {
            let window = Window {
                offset: args.offset,
                length: args.length,
            };
            let out = commands::decode::run(args.kind, &args.hex, window, args.scale, &config)?;
            if format.is_json() {
                print_json(&out);
            } else {
                match out.sign {
                    Some(sign) => println!("{} ({:?})", out.value, sign),
                    None => println!("{}", out.value),
                }
            }
        }
        Commands::Encode(args) => {
            let layout = match (args.digits, args.decimals) {
                (Some(integer_digits), Some(decimal_digits)) => Some(PackedLayout {
                    integer_digits,
                    decimal_digits,
                    signed: !args.unsigned,
                }),
                _ => None,
            };
            let out = commands::encode::run(args.kind, &args.value, layout, &config)?;
            if format.is_json() {
                print_json(&out);
            } else {
                println!("{}", out.hex);
            }
        }
        Commands::Codepages => {
            let pages = commands::codepages::run();
            if format.is_json() {
                print_json(&pages);
            } else {
                for page in &pages {
                    println!("{:<8} {}", page.name, page.ccsid);
                }
            }
        }
    }

    Ok(())
}

/// Load the configuration file if given, then apply the code page override.
fn load_config(path: Option<&std::path::Path>, code_page: Option<String>) -> Result<CodecConfig> {
    let mut config = match path {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    if let Some(code_page) = code_page {
        config.code_page = code_page;
        config.code_page()?;
    }
    tracing::debug!(code_page = %config.code_page, "using codec configuration");
    Ok(config)
}
