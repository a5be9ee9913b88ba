use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use lingua_common::telemetry::{self, TelemetryConfig};
use lingua_common::{DictionaryStore, Document};
use lingua_fragments::render::to_bracketed;
use lingua_fragments::{
    ActionOutcome, EngineConfig, FragmentAction, FragmentData, FragmentLayer, FragmentType, Fragmentable,
    MarkData, NoteData, OverlapPolicy, PlainText, Range, RandomIds, SpanRenderer,
    SpellingOverlay, execute_action,
};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tracing::Level;

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(version, about = "Lingua - annotate and render language-learning texts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config.kdl (default: $CONFIG/lingua/config.kdl)
    #[arg(long, global = true, env = "LINGUA_CONFIG")]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document
    Render {
        #[command(flatten)]
        doc: DocArgs,

        /// Output format (default: spelling when show-spelling is on, else plain)
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Dictionary JSON file, overriding the config
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Dim everything except this fragment
        #[arg(long)]
        highlight: Option<String>,

        #[arg(long, value_enum)]
        overlap_policy: Option<PolicyArg>,
    },
    /// Annotate a range with a new fragment
    Wrap {
        #[command(flatten)]
        doc: DocArgs,

        #[command(flatten)]
        range: RangeArgs,

        #[arg(long = "type", value_enum)]
        kind: WrapKind,

        #[command(flatten)]
        payload: PayloadArgs,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Strip fragments of one type from a range
    Unwrap {
        #[command(flatten)]
        doc: DocArgs,

        #[command(flatten)]
        range: RangeArgs,

        #[arg(long = "type", value_enum)]
        kind: UnwrapKind,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Remove one fragment by id
    Remove {
        #[command(flatten)]
        doc: DocArgs,

        id: String,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Report ranges, overlaps and ids the renderer would trip over
    Check {
        #[command(flatten)]
        doc: DocArgs,
    },
}

#[derive(Args)]
struct DocArgs {
    /// Stored document (one Fragmentable or an array of them)
    document: PathBuf,

    /// Block to operate on; required when the document has several
    #[arg(long)]
    block: Option<String>,
}

#[derive(Args)]
struct RangeArgs {
    /// Start offset, UTF-16 code units
    #[arg(long)]
    start: usize,

    /// End offset, UTF-16 code units
    #[arg(long)]
    end: usize,
}

impl RangeArgs {
    fn range(&self) -> Range {
        Range::new(self.start, self.end)
    }
}

#[derive(Args)]
struct PayloadArgs {
    /// Dictionary id (Word)
    #[arg(long, required_if_eq("kind", "word"))]
    dict_id: Option<String>,

    /// Translation (Sentence)
    #[arg(long)]
    translation: Option<String>,

    /// Comment (Mark)
    #[arg(long)]
    comment: Option<String>,

    /// Color (Mark)
    #[arg(long)]
    color: Option<String>,

    /// Note text (Note)
    #[arg(long)]
    note: Option<String>,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the edited document back to its file
    #[arg(long, conflicts_with = "output")]
    in_place: bool,

    /// Write the edited document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    Spans,
    Spelling,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Halt,
    Skip,
}

impl From<PolicyArg> for OverlapPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Halt => OverlapPolicy::Halt,
            PolicyArg::Skip => OverlapPolicy::Skip,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WrapKind {
    Word,
    Sentence,
    Mark,
    Note,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnwrapKind {
    Word,
    Sentence,
    Mark,
    Note,
    Highlight,
}

impl From<UnwrapKind> for FragmentType {
    fn from(kind: UnwrapKind) -> Self {
        match kind {
            UnwrapKind::Word => FragmentType::Word,
            UnwrapKind::Sentence => FragmentType::Sentence,
            UnwrapKind::Mark => FragmentType::Mark,
            UnwrapKind::Note => FragmentType::Note,
            UnwrapKind::Highlight => FragmentType::Highlight,
        }
    }
}

fn main() -> Result<()> {
    init_miette()?;

    let cli = Cli::parse();

    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    telemetry::init(TelemetryConfig::from_env("lingua").with_level(level));

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            doc,
            format,
            dictionary,
            highlight,
            overlap_policy,
        } => {
            let mut engine = config.engine;
            if let Some(policy) = overlap_policy {
                engine.overlap_policy = policy.into();
            }
            let dictionary = dictionary.or(config.dictionary);
            render_document(&doc, format, dictionary.as_deref(), highlight.as_deref(), &engine)?;
        }
        Commands::Wrap {
            doc,
            range,
            kind,
            payload,
            out,
        } => {
            let action = FragmentAction::Wrap {
                selection: Some(range.range()),
                data: payload.into_data(kind),
            };
            edit_document(&doc, action, &out)?;
        }
        Commands::Unwrap {
            doc,
            range,
            kind,
            out,
        } => {
            let action = FragmentAction::Unwrap {
                selection: Some(range.range()),
                ty: kind.into(),
            };
            edit_document(&doc, action, &out)?;
        }
        Commands::Remove { doc, id, out } => {
            let action = FragmentAction::Remove { id: id.into() };
            edit_document(&doc, action, &out)?;
        }
        Commands::Check { doc } => check_document(&doc)?,
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<CliConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CliConfig::default_path(),
    };
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Ok(CliConfig::load(&path)?)
        }
        None => Ok(CliConfig::default()),
    }
}

impl PayloadArgs {
    fn into_data(self, kind: WrapKind) -> FragmentData {
        match kind {
            WrapKind::Word => FragmentData::word(self.dict_id.unwrap_or_default()),
            WrapKind::Sentence => FragmentData::sentence(self.translation.unwrap_or_default()),
            WrapKind::Mark => FragmentData::Mark(MarkData {
                comment: self.comment,
                color: self.color,
            }),
            WrapKind::Note => FragmentData::Note(NoteData {
                note: self.note.unwrap_or_default(),
            }),
        }
    }
}

/// The block a command applies to: `--block`, or the only one there is.
fn target_block(doc: &Document, block: Option<&str>) -> Result<String> {
    if let Some(block) = block {
        return Ok(block.to_string());
    }
    doc.sole().map(|f| f.id.to_string()).ok_or_else(|| {
        miette::miette!(
            help = "pass --block <id>",
            "the document has {} blocks",
            doc.fragmentables.len()
        )
    })
}

/// Blocks to render: the one named by `--block`, or all of them.
fn selected<'a>(doc: &'a Document, block: Option<&str>) -> Result<Vec<&'a Fragmentable>> {
    match block {
        Some(id) => doc
            .fragmentable(id)
            .map(|f| vec![f])
            .ok_or_else(|| miette::miette!("no block with id {id:?}")),
        None => Ok(doc.fragmentables.iter().collect()),
    }
}

#[derive(Serialize)]
struct BlockSpans<'a, T> {
    id: &'a str,
    spans: T,
}

fn render_document(
    args: &DocArgs,
    format: Option<Format>,
    dictionary: Option<&Path>,
    highlight: Option<&str>,
    engine: &EngineConfig,
) -> Result<()> {
    let mut doc = Document::load(&args.document)?;
    doc.set_show_spelling(engine.show_spelling);
    let dictionary = dictionary.map(DictionaryStore::load).transpose()?;

    if let Some(id) = highlight {
        let found = doc
            .fragmentables
            .iter_mut()
            .fold(false, |found, f| f.set_highlight(id) || found);
        if !found {
            tracing::warn!(fragment = id, "highlight target not found, rendering normally");
        }
    }

    let blocks = selected(&doc, args.block.as_deref())?;

    if let Some(Format::Spans) = format {
        let mut renderer = SpanRenderer::new(dictionary.as_ref());
        let rendered: Vec<_> = blocks
            .into_iter()
            .map(|block| BlockSpans {
                id: &block.id,
                spans: block.render(engine, &mut renderer),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered).into_diagnostic()?);
        return Ok(());
    }

    let mut overlay = SpellingOverlay::new(dictionary.as_ref());
    for block in blocks {
        // Without an explicit format each block follows its own spelling toggle.
        let spelling = match format {
            Some(Format::Spelling) => true,
            Some(_) => false,
            None => block.show_spelling,
        };
        if spelling {
            println!("{}", to_bracketed(&block.render(engine, &mut overlay)));
        } else {
            println!("{}", PlainText::export(&block.render(engine, &mut PlainText)));
        }
    }
    Ok(())
}

fn edit_document(args: &DocArgs, action: FragmentAction, out: &OutputArgs) -> Result<()> {
    let mut doc = Document::load(&args.document)?;
    let target = target_block(&doc, args.block.as_deref())?;

    if doc.fragmentable(&target).is_none() {
        return Err(miette::miette!("no block with id {target:?}"));
    }

    let outcome = execute_action(&mut doc, &target, action, &mut RandomIds)?;
    match &outcome {
        ActionOutcome::Noop => eprintln!("⚠ Nothing to change"),
        ActionOutcome::Created(id) => eprintln!("✓ Created {id}"),
        ActionOutcome::Unwrapped(fragments) => {
            for fragment in fragments {
                eprintln!("✓ Unwrapped {} {} {}", fragment.fragment_type(), fragment.id, fragment.range);
            }
        }
        ActionOutcome::Removed(fragment) => {
            eprintln!("✓ Removed {} {}", fragment.fragment_type(), fragment.id)
        }
        ActionOutcome::Updated(_) | ActionOutcome::Highlighted(_) => {}
    }

    if out.in_place {
        doc.save(&args.document)?;
        eprintln!("✓ Saved {}", args.document.display());
    } else if let Some(path) = &out.output {
        doc.save(path)?;
        eprintln!("✓ Saved {}", path.display());
    } else {
        println!("{}", doc.to_json()?);
    }
    Ok(())
}

fn check_document(args: &DocArgs) -> Result<()> {
    let doc = Document::load(&args.document)?;
    let mut total = 0;
    for block in selected(&doc, args.block.as_deref())? {
        for issue in block.validate() {
            println!("{}: {issue}", block.id);
            total += 1;
        }
    }
    if total > 0 {
        return Err(miette::miette!(
            help = "the renderer truncates output at the first overlap or bad range",
            "found {total} issue(s) in {}",
            args.document.display()
        ));
    }
    eprintln!("✓ No issues");
    Ok(())
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(3)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
