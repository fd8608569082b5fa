use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use pageclip::host::{copy_words, splice_clipboard};
use pageclip::input::resolve_text;
use pageclip::{Placement, SystemClipboard, ToolError, Words};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Inspect and edit text by word index
///
/// Splits text on whitespace the way the browser helpers do, reports word
/// offsets in UTF-16 code units, and moves word ranges through the system
/// clipboard.
#[derive(Parser, Debug)]
#[command(name = "pageclip")]
#[command(version, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every word with its offsets
    Words {
        #[command(flatten)]
        source: Source,

        /// Print a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Print the start and end offsets of one word
    Boundary {
        index: usize,

        #[command(flatten)]
        source: Source,
    },
    /// Copy words START..=END, joined by single spaces, to the clipboard
    Copy {
        start: usize,
        end: usize,

        #[command(flatten)]
        source: Source,
    },
    /// Print the text with the clipboard content placed at a word
    #[command(group(ArgGroup::new("placement").required(true).args(["before", "after", "replace"])))]
    Paste {
        index: usize,

        #[arg(long)]
        before: bool,

        #[arg(long)]
        after: bool,

        #[arg(long)]
        replace: bool,

        #[command(flatten)]
        source: Source,
    },
}

#[derive(ClapArgs, Debug)]
struct Source {
    /// Text to operate on (use '-' for stdin)
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl Source {
    fn read(&self) -> Result<String, ToolError> {
        resolve_text(self.text.as_deref(), self.file.as_deref())
    }
}

#[derive(Serialize)]
struct WordEntry<'a> {
    index: usize,
    word: &'a str,
    start: usize,
    end: usize,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn placement(before: bool, after: bool) -> Placement {
    if before {
        Placement::Before
    } else if after {
        Placement::After
    } else {
        Placement::Replace
    }
}

fn run(args: Args) -> Result<(), ToolError> {
    match args.command {
        Command::Words { source, json } => {
            let text = source.read()?;
            let words = Words::new(&text);
            let entries: Vec<_> = words
                .iter()
                .zip(words.boundaries())
                .enumerate()
                .map(|(index, (word, boundary))| WordEntry {
                    index,
                    word,
                    start: boundary.start,
                    end: boundary.end,
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}\t{}\t{}\t{}", entry.index, entry.start, entry.end, entry.word);
                }
            }
        }
        Command::Boundary { index, source } => {
            let text = source.read()?;
            let boundary = Words::new(&text).boundary(index)?;
            println!("{} {}", boundary.start, boundary.end);
        }
        Command::Copy { start, end, source } => {
            let text = source.read()?;
            Words::new(&text).check_range(start, end)?;
            let mut clipboard = SystemClipboard::new()?;
            let copied = copy_words(&mut clipboard, &text, start, end)?;
            tracing::debug!(start, end, "copied word range");
            if !args.quiet {
                eprintln!("Copied {} bytes to clipboard", copied.len());
            }
        }
        Command::Paste {
            index,
            before,
            after,
            replace: _,
            source,
        } => {
            let text = source.read()?;
            Words::new(&text).check_index(index)?;
            let mut clipboard = SystemClipboard::new()?;
            let spliced = splice_clipboard(&mut clipboard, &text, index, placement(before, after))?;
            println!("{}", spliced);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
