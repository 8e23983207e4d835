mod config;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use livehtml_core::{
    EditorConfig, EditorSurface, LiveSession, MarkupSurface, MemoryEditor, Position,
    apply_style_property, color, file,
};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "livehtml - HTML/CSS hinting and live preview", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL config file
    #[arg(long, env = "LIVEHTML_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document the way the live preview shows it
    Preview {
        /// Document to render
        source: PathBuf,

        /// Write the rendered document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List hint candidates at a position
    Hint {
        source: PathBuf,

        /// Line, 1-based
        #[arg(long)]
        line: usize,

        /// Column in characters, 1-based
        #[arg(long)]
        col: usize,

        /// Print the full hint result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Accept a hint candidate at a position
    Complete {
        source: PathBuf,

        /// Line, 1-based
        #[arg(long)]
        line: usize,

        /// Column in characters, 1-based
        #[arg(long)]
        col: usize,

        /// Candidate to accept, 0 is what Tab picks
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Write the edited document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set an inline style property on one line
    Style {
        source: PathBuf,

        /// Line, 1-based
        #[arg(long)]
        line: usize,

        property: String,

        value: String,

        /// Write the edited document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize a legacy color value, e.g. "255 0 0"
    Color { value: String },
}

fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview { source, output } => preview(&source, output.as_deref(), config),
        Commands::Hint {
            source,
            line,
            col,
            json,
        } => hint(&source, position(line, col)?, json, config),
        Commands::Complete {
            source,
            line,
            col,
            index,
            output,
        } => complete(&source, position(line, col)?, index, output.as_deref(), config),
        Commands::Style {
            source,
            line,
            property,
            value,
            output,
        } => style(&source, position(line, 1)?.line, &property, &value, output.as_deref()),
        Commands::Color { value } => {
            println!("{}", color::normalize(&value));
            Ok(())
        }
    }
}

/// Command-line positions are 1-based.
fn position(line: usize, col: usize) -> Result<Position> {
    if line == 0 || col == 0 {
        return Err(miette::miette!(
            help = "the first character of the document is --line 1 --col 1",
            "lines and columns start at 1"
        ));
    }
    Ok(Position::new(line - 1, col - 1))
}

fn open_session(
    source: &Path,
    cursor: Position,
    config: EditorConfig,
) -> Result<LiveSession<MemoryEditor, MarkupSurface>> {
    let text = file::load_from(source)?;
    let mut session = LiveSession::new(MemoryEditor::new(""), MarkupSurface::new(), config);
    session.load(text.as_bytes());

    if cursor.line >= session.editor().line_count() {
        return Err(miette::miette!(
            "{} has {} lines, no line {}",
            source.display(),
            session.editor().line_count(),
            cursor.line + 1
        ));
    }
    session.editor_mut().set_cursor(cursor);
    Ok(session)
}

fn preview(source: &Path, output: Option<&Path>, config: EditorConfig) -> Result<()> {
    let text = file::load_from(source)?;
    let mut session = LiveSession::new(MemoryEditor::new(""), MarkupSurface::new(), config);
    session.editor_mut().set_full_text(&text);
    let report = session.on_content_changed();
    if report.failures > 0 {
        tracing::warn!(failures = report.failures, "some preview fixes were skipped");
    }

    let (_, surface) = session.into_parts();
    emit(&surface.into_document(), output)
}

fn hint(source: &Path, cursor: Position, json: bool, config: EditorConfig) -> Result<()> {
    let mut session = open_session(source, cursor, config)?;
    let hints = session.show_hints().cloned();

    if json {
        println!("{}", serde_json::to_string_pretty(&hints).into_diagnostic()?);
        return Ok(());
    }

    match hints {
        Some(hints) => {
            for candidate in &hints.candidates {
                println!("{}", candidate.label);
            }
        }
        None => eprintln!("no hints at {}:{}", cursor.line + 1, cursor.ch + 1),
    }
    Ok(())
}

fn complete(
    source: &Path,
    cursor: Position,
    index: usize,
    output: Option<&Path>,
    config: EditorConfig,
) -> Result<()> {
    let mut session = open_session(source, cursor, config)?;
    let Some(count) = session.show_hints().map(|hints| hints.candidates.len()) else {
        return Err(miette::miette!(
            "no hints at {}:{}",
            cursor.line + 1,
            cursor.ch + 1
        ));
    };
    if !session.accept(index) {
        return Err(miette::miette!(
            "candidate {index} out of range, {count} available"
        ));
    }
    emit(&session.editor().full_text(), output)
}

fn style(
    source: &Path,
    line: usize,
    property: &str,
    value: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut editor = MemoryEditor::new(&file::load_from(source)?);
    let Some(text) = editor.line_text(line) else {
        return Err(miette::miette!(
            "{} has {} lines, no line {}",
            source.display(),
            editor.line_count(),
            line + 1
        ));
    };

    let edit = apply_style_property(&text, property, value);
    if !edit.is_changed() {
        tracing::warn!(
            property,
            line = line + 1,
            "property not present in style attribute, nothing written"
        );
    }
    editor.replace_range(
        &edit.line,
        Position::new(line, 0),
        Position::new(line, text.chars().count()),
    );
    emit(&editor.full_text(), output)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            file::save(text, &name).write_to(path)?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
