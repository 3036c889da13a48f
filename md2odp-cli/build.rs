use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("md2odp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown into slides of an OpenDocument presentation")
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
                .help("Append markdown after given page")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("no-autofit")
                .short('n')
                .long("no-autofit")
                .help("Disable auto-shrinking font in text boxes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("highlight-style")
                .short('s')
                .long("highlight-style")
                .value_name("STYLE")
                .help("Color style for syntax-highlighting of code snippets")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("break-master")
                .long("break-master")
                .value_name("NAME")
                .help("Master page for section break slides")
                .num_args(0..=1),
        )
        .arg(
            Arg::new("content-master")
                .long("content-master")
                .value_name("NAME")
                .help("Master page for content slides")
                .num_args(0..=1),
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "md2odp", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "md2odp", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "md2odp", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
