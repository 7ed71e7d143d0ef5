//! keytap-engine CLI
//!
//! Command-line frontend over the suggestion engine: `suggest` runs a
//! single word through dictionary + keyboard geometry, `inspect` dumps
//! dictionary header/lookup information without running correction.

use clap::{Parser, Subcommand, ValueEnum};
use keytap_engine::{
    Dictionary, EngineOptions, Formatter, HumanFormatter, InputState, JsonFormatter,
    KeyboardGeometry, ProximityInfo, Session, ShortFormatter,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Soft-keyboard suggestion engine.
#[derive(Parser, Debug)]
#[command(name = "keytap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging (`RUST_LOG` still takes precedence if set).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce ranked suggestions for a typed word.
    Suggest {
        /// Path to a binary dictionary (v1 or v2 format).
        dictionary: PathBuf,

        /// The word or letter sequence the user typed.
        word: String,

        /// Optional keyboard layout JSON, for touch-proximity correction.
        #[arg(short, long)]
        keyboard: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Maximum number of suggestions to print.
        #[arg(short, long, default_value = "10")]
        max: usize,

        /// Use the strict (1-error) correction budget instead of the
        /// default (2-error) one.
        #[arg(long)]
        strict: bool,
    },
    /// Print dictionary header and a single word's frequency.
    Inspect {
        /// Path to a binary dictionary (v1 or v2 format).
        dictionary: PathBuf,

        /// Look up this word's stored frequency, if present.
        word: Option<String>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output.
    Human,
    /// JSON output.
    Json,
    /// Compact single-line output.
    Short,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("keytap_engine=debug")
            .init();
    }

    let result = match &cli.command {
        Command::Suggest {
            dictionary,
            word,
            keyboard,
            format,
            max,
            strict,
        } => run_suggest(dictionary, word, keyboard.as_deref(), *format, *max, *strict),
        Command::Inspect { dictionary, word } => run_inspect(dictionary, word.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_proximity(path: &std::path::Path) -> Result<ProximityInfo, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let geometry: KeyboardGeometry = serde_json::from_str(&text)
        .map_err(|e| format!("keyboard layout parse error: {e}"))?;
    Ok(ProximityInfo::new(geometry)?)
}

fn run_suggest(
    dictionary_path: &std::path::Path,
    word: &str,
    keyboard_path: Option<&std::path::Path>,
    format: OutputFormat,
    max: usize,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(dictionary_path)?;
    let dict = Dictionary::open(&bytes)?;

    let proximity = keyboard_path.map(load_proximity).transpose()?;

    let mut options = if strict {
        EngineOptions::strict()
    } else {
        EngineOptions::new()
    };
    options.max_words = max;

    let mut session = Session::new(&dict, proximity.as_ref(), options);
    let input = InputState::from_codes(&word.encode_utf16().collect::<Vec<_>>());
    let suggestions = session.get_suggestions(&input);

    let rendered = match format {
        OutputFormat::Human => HumanFormatter { verbose: true }.format_list(word, &suggestions),
        OutputFormat::Json => JsonFormatter.format_list(word, &suggestions),
        OutputFormat::Short => ShortFormatter.format_list(word, &suggestions),
    };
    println!("{rendered}");
    Ok(())
}

fn run_inspect(
    dictionary_path: &std::path::Path,
    word: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(dictionary_path)?;
    let dict = Dictionary::open(&bytes)?;
    let header = dict.header();

    println!("version:            {}", header.version);
    println!("option_flags:       0x{:04X}", header.option_flags);
    println!("body_offset:        {}", header.body_offset);
    println!(
        "german_umlaut:      {}",
        header.requires_german_umlaut()
    );
    println!(
        "french_ligatures:   {}",
        header.requires_french_ligatures()
    );

    if let Some(w) = word {
        let codes: Vec<u16> = w.encode_utf16().collect();
        match dict.get_frequency(&codes) {
            Some(freq) => println!("frequency({w}):     {freq}"),
            None => println!("frequency({w}):     not found"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing_suggest() {
        let cli = Cli::try_parse_from(["keytap", "suggest", "dict.bin", "helo"]).unwrap();
        assert!(matches!(cli.command, Command::Suggest { .. }));
    }

    #[test]
    fn test_args_parsing_inspect() {
        let cli = Cli::try_parse_from(["keytap", "inspect", "dict.bin"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect { .. }));
    }

    #[test]
    fn test_format_flag() {
        let cli =
            Cli::try_parse_from(["keytap", "suggest", "-f", "json", "dict.bin", "helo"]).unwrap();
        match cli.command {
            Command::Suggest { format, .. } => assert!(matches!(format, OutputFormat::Json)),
            Command::Inspect { .. } => panic!("wrong subcommand parsed"),
        }
    }
}
