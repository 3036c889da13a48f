// Command-line interface for md2odp
//
// Renders a markdown file as slides and inserts them into a copy of an existing presentation.
// The template supplies master pages and styles; the output is written as a new file.
//
// Usage:
//  md2odp <input.md|-> <template.odp> <output.odp> [--page N] [--no-autofit]
//         [--highlight-style NAME] [--break-master [NAME]] [--content-master [NAME]]
//         [--code-font NAME] [--config PATH]
//
// Settings are layered: built-in defaults, ./md2odp.toml, --config file, then flags.
// Passing an empty or unknown master page name lists the masters available in the template.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use md2odp::{convert, ConvertOptions, ConvertOutcome, Presentation, MASTER_PAGE_HELP};
use md2odp_config::{ConfigError, Loader, Md2OdpConfig};
use std::fs;
use std::io::Read;
use std::path::Path;

fn build_cli() -> Command {
    Command::new("md2odp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown into slides of an OpenDocument presentation")
        .long_about(
            "md2odp renders a markdown document as presentation slides and inserts them into \
            a copy of an existing ODP file.\n\n\
            Level 1 headings start section break slides, level 2 headings content slides. \
            Everything below a heading goes onto its slide.\n\n\
            Examples:\n  \
            md2odp talk.md template.odp talk.odp                 # Append slides\n  \
            md2odp talk.md template.odp talk.odp -p 0            # Insert at the front\n  \
            cat talk.md | md2odp - template.odp talk.odp         # Read markdown from stdin\n  \
            md2odp talk.md template.odp talk.odp --content-master  # List master pages",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Markdown file to convert, '-' reads standard input")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("template")
                .help("Presentation providing master pages and styles")
                .required(true)
                .index(2)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .help("Presentation file to write")
                .required(true)
                .index(3)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("page")
                .short('p')
                .long("page")
                .value_name("N")
                .help(
                    "Append markdown after given page. Negative numbers count from the end of \
                    the slide stack. [Defaults to -1]",
                )
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("no-autofit")
                .short('n')
                .long("no-autofit")
                .help("Use to disable auto-shrinking font in text boxes, to fit available space.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("highlight-style")
                .short('s')
                .long("highlight-style")
                .value_name("STYLE")
                .help(
                    "Set highlighting color style for syntax-highlighting of code snippets. \
                    Accepts syntect theme names and colorful, default, friendly, emacs",
                )
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("break-master")
                .long("break-master")
                .value_name("NAME")
                .help(
                    "Use master page for section break slides. List available ones if called \
                    with empty or unknown name",
                )
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            Arg::new("content-master")
                .long("content-master")
                .value_name("NAME")
                .help(
                    "Use master page for content slides. List available ones if called with \
                    empty or unknown name",
                )
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            Arg::new("code-font")
                .long("code-font")
                .value_name("FONT")
                .help("Font used for code snippets"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a md2odp.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log slide and image progress")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_cli_config(&matches);
    let mut options = ConvertOptions::from(&config);

    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let template = matches
        .get_one::<String>("template")
        .expect("template is required");
    let output = matches
        .get_one::<String>("output")
        .expect("output is required");

    let markdown = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading input '{input}': {e}");
        std::process::exit(1);
    });
    if input != "-" {
        options.render.base_dir = Path::new(input).parent().map(Path::to_path_buf);
    }

    let mut presentation = Presentation::open(template).unwrap_or_else(|e| {
        eprintln!("Error opening template '{template}': {e}");
        std::process::exit(1);
    });

    match convert(&markdown, &mut presentation, &options) {
        Ok(ConvertOutcome::Inserted { pages, images }) => {
            if let Err(e) = presentation.save(output) {
                eprintln!("Error writing '{output}': {e}");
                std::process::exit(1);
            }
            log::info!("Wrote {pages} slides and {images} images to {output}");
        }
        Ok(ConvertOutcome::UnknownMasterPage { available }) => {
            print_master_pages(&available);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut markdown = String::new();
        std::io::stdin().read_to_string(&mut markdown)?;
        Ok(markdown)
    } else {
        fs::read_to_string(input)
    }
}

fn print_master_pages(available: &[String]) {
    println!("{MASTER_PAGE_HELP}");
    for name in available {
        println!(" - {name}");
    }
}

/// Defaults, then `md2odp.toml` in the working directory, then `--config`, then flags.
fn load_cli_config(matches: &ArgMatches) -> Md2OdpConfig {
    let loader = Loader::new().with_optional_file("md2odp.toml");
    let loader = match matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    apply_flag_overrides(loader, matches)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_flag_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, ConfigError> {
    if let Some(page) = matches.get_one::<i64>("page") {
        loader = loader.set_override("insert.page", *page)?;
    }
    if matches.get_flag("no-autofit") {
        loader = loader.set_override("render.autofit_text", false)?;
    }
    for (flag, key) in [
        ("highlight-style", "render.highlight_style"),
        ("break-master", "render.break_master"),
        ("content-master", "render.content_master"),
        ("code-font", "render.code_font"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    Ok(loader)
}
