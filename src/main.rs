//! Gridjson - Convert spreadsheet regions into JSON records

mod config;
mod logger;

use anyhow::{Context, bail};
use gridjson_core::script::compile_header_key;
use gridjson_core::storage::{load_header_specs, load_sheet, to_json_string, write_json};
use gridjson_core::{ConvertOptions, HeaderType, convert};
use gridjson_engine::engine::DefaultRange;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: gridjson [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    Sheet to convert (.json, .grd or .csv)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -r, --range <A1:B2>       Region to convert instead of the sheet extent");
    eprintln!("  -t, --header-type <TYPE>  Header axes to detect: col, row or both");
    eprintln!("  -d, --data-range <A1:B2>  Data body instead of the inferred one");
    eprintln!("  --headers <FILE>          JSON header definitions (disables detection)");
    eprintln!("  --default-range <A1:B2>   Extent used when the sheet declares none");
    eprintln!("  --throw                   Fail on the first conversion error");
    eprintln!("  --skip-blank-rows         Leave out rows without content");
    eprintln!("  --header-key-col <EXPR>   Rhai expression producing column labels");
    eprintln!("  --header-key-row <EXPR>   Rhai expression producing row labels");
    eprintln!("  --config <FILE>           Read defaults from this config file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -o, --output <FILE>       Write JSON to a file instead of stdout");
    eprintln!("  --compact                 Print JSON on a single line");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Args {
    file_path: Option<PathBuf>,
    range: Option<String>,
    header_type: Option<HeaderType>,
    data_range: Option<String>,
    headers_file: Option<PathBuf>,
    default_range: Option<String>,
    throw_error: bool,
    skip_blank_rows: bool,
    header_key_col: Option<String>,
    header_key_row: Option<String>,
    config_file: Option<PathBuf>,
    no_config: bool,
    output_file: Option<PathBuf>,
    compact: bool,
}

fn require_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(value) => value.to_string(),
        None => {
            eprintln!("Error: {} requires {}", flag, what);
            std::process::exit(1);
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-r" | "--range" => {
                i += 1;
                parsed.range = Some(require_value(&args, i, flag, "a range"));
            }
            "-t" | "--header-type" => {
                i += 1;
                let value = require_value(&args, i, flag, "a value");
                match value.parse::<HeaderType>() {
                    Ok(header_type) => parsed.header_type = Some(header_type),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "-d" | "--data-range" => {
                i += 1;
                parsed.data_range = Some(require_value(&args, i, flag, "a range"));
            }
            "--headers" => {
                i += 1;
                parsed.headers_file = Some(PathBuf::from(require_value(&args, i, flag, "a file path")));
            }
            "--default-range" => {
                i += 1;
                parsed.default_range = Some(require_value(&args, i, flag, "a range"));
            }
            "--throw" => parsed.throw_error = true,
            "--skip-blank-rows" => parsed.skip_blank_rows = true,
            "--header-key-col" => {
                i += 1;
                parsed.header_key_col = Some(require_value(&args, i, flag, "an expression"));
            }
            "--header-key-row" => {
                i += 1;
                parsed.header_key_row = Some(require_value(&args, i, flag, "an expression"));
            }
            "--config" => {
                i += 1;
                parsed.config_file = Some(PathBuf::from(require_value(&args, i, flag, "a file path")));
            }
            "--no-config" => parsed.no_config = true,
            "-o" | "--output" => {
                i += 1;
                parsed.output_file = Some(PathBuf::from(require_value(&args, i, flag, "a file path")));
            }
            "--compact" => parsed.compact = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    parsed
}

/// Command line flags win over config values.
fn build_options(args: &Args, config: config::Config) -> anyhow::Result<(ConvertOptions, bool)> {
    let mut options = ConvertOptions {
        range: args.range.clone(),
        header_type: args.header_type.or(config.header_type),
        data_range: args.data_range.clone(),
        throw_error: args.throw_error || config.throw_error.unwrap_or(false),
        skip_blank_rows: args.skip_blank_rows || config.skip_blank_rows.unwrap_or(false),
        ..ConvertOptions::default()
    };

    if let Some(default_range) = args.default_range.clone().or(config.default_range) {
        options.default_range = Some(DefaultRange::Text(default_range));
    }

    if let Some(path) = &args.headers_file {
        let specs = load_header_specs(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        options.headers = Some(specs);
    }

    if let Some(script) = args.header_key_col.as_deref().or(config.header_key_col.as_deref()) {
        options.header_keys.col = Some(compile_header_key(script)?);
    }
    if let Some(script) = args.header_key_row.as_deref().or(config.header_key_row.as_deref()) {
        options.header_keys.row = Some(compile_header_key(script)?);
    }

    let pretty = !args.compact && config.pretty.unwrap_or(true);
    Ok((options, pretty))
}

fn run(args: Args) -> anyhow::Result<()> {
    let Some(file_path) = args.file_path.clone() else {
        print_usage();
        bail!("missing input file");
    };

    let config = if args.no_config {
        config::Config::default()
    } else {
        let (config, warnings) = config::load_config(args.config_file.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        config
    };

    let (options, pretty) = build_options(&args, config)?;
    let sheet = load_sheet(&file_path)
        .with_context(|| format!("Failed to load {}", file_path.display()))?;
    // Recovered errors in `conversion.diagnostics` were already logged.
    let conversion = convert(&sheet, &options)?;

    let value = conversion.to_json();
    match &args.output_file {
        Some(output_path) => {
            write_json(output_path, &value, pretty)?;
            eprintln!("Wrote {} records to {}", conversion.records.len(), output_path.display());
        }
        None => println!("{}", to_json_string(&value, pretty)?),
    }
    Ok(())
}

fn main() {
    let args = parse_args();
    logger::init();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
