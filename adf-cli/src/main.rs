// Command-line interface for adf
//
// This binary converts documents between extended Markdown and ADF wire JSON,
// and offers an inspect command to see how a markdown file is parsed.
//
// The core capabilities use the adf-babel crate; this binary only handles
// argument parsing, configuration layering, file I/O and logging setup.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  adf <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  adf convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  adf inspect <path> [<transform>]      - Execute a transform (defaults to "ast-treeviz")
//  adf --list-formats                    - List conversion formats
//  adf --list-transforms                 - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix; keys that name a configuration
// setting (pretty, allow-pending-media, include-inline) override it, anything
// else is handed to the target format, which rejects keys it does not know.
// Example:
//  adf notes.md --to adf --extra-allow-pending-media --extra-pretty false

use adf_cli::transforms;

use adf_babel::{Format, FormatRegistry};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

/// `--extra-*` keys that override configuration values, with their config path.
const CONFIG_OVERRIDES: &[(&str, &str)] = &[
    ("pretty", "convert.adf.pretty"),
    ("allow-pending-media", "convert.adf.allow_pending_media"),
    ("include-inline", "inspect.treeviz.include_inline"),
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            // A following argument is the value unless it is another flag
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between extended Markdown and ADF documents")
        .long_about(
            "adf converts documents between extended Markdown and the ADF wire JSON\n\
            used by Atlassian products.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markdown, adf, treeviz)\n  \
            - inspect: View how a markdown file is parsed\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            adf notes.md --to adf                       # Markdown to wire JSON (stdout)\n  \
            adf page.json --to markdown -o page.md      # Wire JSON to a markdown file\n  \
            adf inspect notes.md                        # View the parsed document tree\n  \
            adf notes.md --to adf --extra-pretty false  # Compact JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging (overrides RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a markdown file is parsed")
                .long_about(
                    "View the document model a markdown file parses into.\n\n\
                    Transforms:\n  \
                    - ast-treeviz:   Document tree visualization (default)\n  \
                    - ast-json:      Document model as JSON\n  \
                    - adf-json:      Wire JSON, keeping unresolved local images\n  \
                    - md-roundtrip:  Markdown rendered back from the parsed model\n\n\
                    Extra Parameters:\n  \
                    --extra-include-inline   List inline nodes in ast-treeviz output\n\n\
                    Examples:\n  \
                    adf inspect notes.md                         # Tree visualization\n  \
                    adf inspect notes.md md-roundtrip            # Check what survives a round trip\n  \
                    adf inspect notes.md --extra-include-inline  # Tree with inline nodes",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'ast-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Extended Markdown (.md, .markdown)\n  \
                    - adf:      ADF wire JSON (.json, .adf)\n  \
                    - treeviz:  Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    adf convert notes.md --to adf            # Markdown to wire JSON\n  \
                    adf convert page.json --to markdown      # Wire JSON to markdown\n  \
                    adf notes.md --to adf -o notes.json      # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the default convert subcommand
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }
    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );
    init_logging(&config, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                exit_with("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                exit_with("input is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                exit_with("--to is required");
            };

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match FormatRegistry::default().detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let params = build_inspect_params(config, extra_params);
    tracing::debug!(path, transform, "running inspect transform");

    let output = transforms::execute_transform(&source, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    tracing::debug!(input, from, to, "converting");
    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let format_options = build_format_params(to, config, extra_params);
    let mut text = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            tracing::debug!(path, "wrote output");
        }
        None => print!("{text}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let Ok(format) = registry.get(&format_name) else {
            continue;
        };
        let mut directions = Vec::new();
        if format.supports_parsing() {
            directions.push("read");
        }
        if format.supports_serialization() {
            directions.push("write");
        }
        println!(
            "  {format_name:<10} {} [{}] (.{})",
            format.description(),
            directions.join("/"),
            format.file_extensions().join(", .")
        );
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  ast-treeviz   - Document tree visualization (default)");
    println!("  ast-json      - Document model as JSON");
    println!("  adf-json      - Wire JSON, keeping unresolved local images");
    println!("  md-roundtrip  - Markdown rendered back from the parsed model\n");

    println!("Extra parameters:");
    println!("  include-inline  - List inline nodes in ast-treeviz output");
}

/// Layer `adf.toml` from the working directory, then `--config`, then any
/// `--extra-*` keys that name a config setting (removed from `extra_params`).
fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    apply_config_overrides(loader, extra_params)
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_config_overrides(mut loader: Loader, extra_params: &mut HashMap<String, String>) -> Loader {
    for (flag, key) in CONFIG_OVERRIDES {
        if let Some(raw) = extra_params.remove(*flag) {
            loader = loader
                .set_override(key, parse_bool_arg(flag, &raw))
                .unwrap_or_else(|err| {
                    eprintln!("Invalid override for --extra-{flag}: {err}");
                    std::process::exit(1);
                });
        }
    }
    loader
}

fn build_inspect_params(
    config: &AdfConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    if config.inspect.treeviz.include_inline {
        params.insert("include-inline".to_string(), "true".to_string());
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

/// Serialization parameters for the target format: configured defaults, then
/// whatever `--extra-*` keys were left after config overrides.
fn build_format_params(
    to: &str,
    config: &AdfConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = match to {
        "adf" => config.convert.adf.to_params(),
        "treeviz" => build_inspect_params(config, &HashMap::new()),
        _ => HashMap::new(),
    };

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn init_logging(config: &AdfConfig, verbose: bool) {
    // --verbose forces debug, otherwise RUST_LOG or the configured filter
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
