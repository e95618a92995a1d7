// Command-line interface for the WikiText transcoder
//
// This binary converts wiki pages between WikiText (the storage format) and HTML (what the
// rich-text editor speaks), and offers a couple of views into the document tree for debugging.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. Reading from stdin (input `-`) needs
// an explicit --from.
// Usage:
//  wikitext <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  wikitext convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  wikitext roundtrip <input>           - WikiText -> HTML -> WikiText, exits 2 on drift
//  wikitext inspect <path> [<transform>] - Execute a transform (defaults to "ast-treeviz")
//  wikitext --list-formats              - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// Keys that mirror configuration (promote-row-headers, trailing-newline) override the loaded
// config; everything else is handed to the target format.
// Example:
//  wikitext page.wiki --to html --extra-promote-row-headers false

use wiki_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wiki_babel::{FormatRegistry, ParseOptions};
use wiki_config::{Loader, WikiConfig};

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
    Command::new("wikitext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert wiki pages between WikiText and HTML")
        .long_about(
            "wikitext converts wiki pages between the WikiText storage format and HTML.\n\n\
            Commands:\n  \
            - convert:   Transform between document formats (default)\n  \
            - roundtrip: Check that a page survives WikiText -> HTML -> WikiText\n  \
            - inspect:   View the parsed document tree\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            wikitext page.wiki --to html                       # Convert to HTML (stdout)\n  \
            wikitext page.html --to wikitext -o page.wiki      # HTML to WikiText file\n  \
            wikitext roundtrip page.wiki                       # Check for drift\n  \
            wikitext inspect page.wiki --extra-ast-full        # Tree view with inline nodes",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a wiki.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - wikitext: WikiText (.wiki, .wikitext)\n  \
                    - html:     HTML fragment (.html, .htm)\n  \
                    - treeviz:  Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Use '-' as input to read from stdin (requires --from).\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    wikitext convert page.wiki --to html               # Convert to HTML (stdout)\n  \
                    wikitext convert page.html --to wikitext -o p.wiki # HTML to WikiText file\n  \
                    cat page.wiki | wikitext - --from wikitext --to html\n  \
                    wikitext page.wiki --to html                       # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
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
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: wikitext, html, treeviz\n\
                            Use the format name, not the file extension.",
                        )
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
        .subcommand(
            Command::new("roundtrip")
                .about("Convert WikiText to HTML and back, reporting drift")
                .long_about(
                    "Convert a WikiText page to HTML and back again, the way the editor does.\n\n\
                    The result is printed to stdout. The exit code is 2 when the result differs\n\
                    from the input (ignoring surrounding whitespace and line endings).\n\n\
                    Examples:\n  \
                    wikitext roundtrip page.wiki\n  \
                    wikitext roundtrip page.wiki --extra-promote-row-headers false",
                )
                .arg(
                    Arg::new("input")
                        .help("WikiText file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed document tree")
                .long_about(
                    "View the document tree a page parses into.\n\n\
                    Transforms (stage-format):\n  \
                    - ast-treeviz:  tree visualization (default)\n  \
                    - ast-json:     JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-ast-full      Show inline nodes in the tree visualization\n\n\
                    Examples:\n  \
                    wikitext inspect page.wiki                   # Tree visualization\n  \
                    wikitext inspect page.html ast-json          # JSON from HTML input\n  \
                    wikitext inspect page.wiki --extra-ast-full  # Include inline nodes",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to a WikiText or HTML file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'ast-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&cleaned_args) {
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

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_tracing(&config, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("roundtrip", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_roundtrip_command(input, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("ast-treeviz");
            let from = resolve_from(path, sub_matches.get_one::<String>("from"));
            handle_inspect_command(path, &from, transform, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// A bare input path (no subcommand) means `convert`.
fn should_inject_convert(args: &[String]) -> bool {
    match args.get(1) {
        Some(first) => {
            (first == "-" || !first.starts_with('-'))
                && !["convert", "roundtrip", "inspect", "help"].contains(&first.as_str())
        }
        None => false,
    }
}

/// Use the explicit `--from`, else detect it from the file extension.
fn resolve_from(input: &str, explicit: Option<&String>) -> String {
    if let Some(from) = explicit {
        return from.to_string();
    }
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn init_tracing(config: &WikiConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &WikiConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);
    debug!(from, to, bytes = source.len(), "converting");

    let options = ParseOptions::from(&config.convert.tables);
    let doc = transforms::load_document(&source, from, &options).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    write_output(output, &result, config);
}

/// Handle the roundtrip command
fn handle_roundtrip_command(input: &str, config: &WikiConfig) {
    let source = read_input(input);
    let options = ParseOptions::from(&config.convert.tables);

    let html = wiki_babel::wikitext_to_html_with_options(&source, &options);
    let result = wiki_babel::html_to_wikitext(&html);

    write_output(None, &result, config);

    if normalize(&source) != normalize(&result) {
        eprintln!("Round trip changed the document");
        std::process::exit(2);
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    from: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &WikiConfig,
) {
    let source = read_input(path);
    let options = ParseOptions::from(&config.convert.tables);

    let output = transforms::execute_transform(&source, from, transform, &options, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{}", finish_output(&output, config.convert.output.trailing_newline));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let direction = match registry.get(&format_name) {
            Ok(format) if format.supports_parsing() && format.supports_serialization() => {
                "in/out"
            }
            Ok(format) if format.supports_serialization() => "out",
            _ => "in",
        };
        println!("  {format_name:<10} {direction}");
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return source;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str, config: &WikiConfig) {
    let text = finish_output(text, config.convert.output.trailing_newline);
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Strip trailing newlines, then end non-empty output with exactly one when asked to.
fn finish_output(text: &str, trailing_newline: bool) -> String {
    let mut out = text.trim_end_matches(['\n', '\r']).to_string();
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Comparison key for round trips: line endings unified, outer whitespace dropped.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

fn load_cli_config(explicit_path: Option<&str>) -> WikiConfig {
    let loader = Loader::new().with_optional_file("wiki.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut WikiConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["promote-row-headers", "row-headers"]) {
        config.convert.tables.promote_row_headers = parse_bool_arg("promote-row-headers", &raw);
    }
    if let Some(raw) = extra_params.remove("trailing-newline") {
        config.convert.output.trailing_newline = parse_bool_arg("trailing-newline", &raw);
    }
    if let Some(level) = take_override(extra_params, &["log-level"]) {
        config.logging.level = level;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
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
