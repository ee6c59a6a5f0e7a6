//! pdfscript CLI - structured transcripts from extracted PDF fragments

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfscript::render::TranscriptBlock;
use pdfscript::sync::{ScrollContainer, ScrollOutcome};
use pdfscript::{
    load_file_with_options, BuildOptions, Document, JsonFormat, PageSelection, RenderOptions,
    StructuralNode, SurfaceId, SyncOptions, Viewer,
};

#[derive(Parser)]
#[command(name = "pdfscript")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn extracted PDF fragments into linked transcripts", long_about = None)]
struct Cli {
    /// Input extraction response (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the transcript as Markdown, text, and JSON
    Convert {
        /// Input extraction response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print the structured transcript
    #[command(alias = "md")]
    Transcript {
        /// Input extraction response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: TranscriptFormat,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Omit "Page N" labels
        #[arg(long)]
        no_labels: bool,

        /// Reject malformed fragment records instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Convert the transcript to JSON
    Json {
        /// Input extraction response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show document information
    Info {
        /// Input extraction response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Click the page overlay and show where the transcript scrolls
    Select {
        /// Input extraction response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed)
        #[arg(long)]
        page: u32,

        /// Horizontal click position, in overlay pixels
        #[arg(long)]
        x: f32,

        /// Vertical click position, in overlay pixels
        #[arg(long)]
        y: f32,

        /// Overlay scale (page units to pixels)
        #[arg(long, default_value = "1.5")]
        scale: f32,

        /// Transcript viewport height, in pixels
        #[arg(long, default_value = "600")]
        viewport: f32,

        /// Scroll alignment
        #[arg(long, value_enum, default_value = "center")]
        align: Align,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TranscriptFormat {
    /// Markdown with heading markers
    Markdown,
    /// Plain text
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Align {
    /// Center the target in the viewport
    Center,
    /// Scroll as little as possible
    Nearest,
}

impl From<Align> for pdfscript::ScrollAlign {
    fn from(align: Align) -> Self {
        match align {
            Align::Center => pdfscript::ScrollAlign::Center,
            Align::Nearest => pdfscript::ScrollAlign::Nearest,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref()),
        Some(Commands::Transcript {
            input,
            output,
            format,
            pages,
            no_labels,
            strict,
        }) => cmd_transcript(
            &input,
            output.as_deref(),
            format,
            pages.as_deref(),
            !no_labels,
            strict,
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
            pages,
        }) => cmd_json(&input, output.as_deref(), compact, pages.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Select {
            input,
            page,
            x,
            y,
            scale,
            viewport,
            align,
        }) => cmd_select(&input, page, x, y, scale, viewport, align),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: pdfscript <FILE> [OUTPUT]".yellow());
                println!("       pdfscript --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn load(input: &Path, strict: bool) -> Result<Document, Box<dyn std::error::Error>> {
    // Lenient by default so one bad record does not hide the whole transcript
    let options = if strict {
        BuildOptions::new()
    } else {
        BuildOptions::new().lenient()
    };
    Ok(load_file_with_options(input, options)?)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_transcript", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Building transcript...");
    let doc = load(input, false)?;
    pb.inc(1);

    let render_options = RenderOptions::new();

    pb.set_message("Generating Markdown...");
    let markdown = pdfscript::render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("transcript.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = pdfscript::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("transcript.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = pdfscript::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("document.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} transcript.md", "├─".dimmed());
    println!("  {} transcript.txt", "├─".dimmed());
    println!("  {} document.json", "└─".dimmed());

    Ok(())
}

fn cmd_transcript(
    input: &Path,
    output: Option<&Path>,
    format: TranscriptFormat,
    pages: Option<&str>,
    labels: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = parse_pages(pages)?;
    let doc = load(input, strict)?;

    let render_options = RenderOptions::new()
        .with_pages(page_selection)
        .with_page_labels(labels);

    let content = match format {
        TranscriptFormat::Markdown => pdfscript::render::to_markdown(&doc, &render_options)?,
        TranscriptFormat::Text => pdfscript::render::to_text(&doc, &render_options)?,
    };

    write_or_print(output, &content)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = parse_pages(pages)?;
    let doc = load(input, false)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let render_options = RenderOptions::new().with_pages(page_selection);
    let json = pdfscript::render::to_json_with_options(&doc, &render_options, format)?;

    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input, false)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    if let (Some(first), Some(last)) = (doc.pages.first(), doc.pages.last()) {
        println!(
            "{}: {}-{}",
            "Page labels".bold(),
            first.label(),
            last.label()
        );
    }

    let headings: usize = doc.pages.iter().map(|s| s.headings().count()).sum();
    let paragraphs: usize = doc
        .pages
        .iter()
        .flat_map(|s| s.nodes.iter())
        .filter(|n| n.is_paragraph())
        .count();

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    println!("{}: {}", "Fragments".bold(), doc.fragment_count());
    println!("{}: {}", "Headings".bold(), headings);
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    let outline: Vec<_> = doc
        .pages
        .iter()
        .flat_map(|s| s.nodes.iter())
        .filter_map(|node| match node {
            StructuralNode::Heading { level, fragment } => Some((level.as_u8(), fragment)),
            StructuralNode::Paragraph(_) => None,
        })
        .collect();

    if !outline.is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (level, fragment) in outline {
            let indent = "  ".repeat(level.saturating_sub(1) as usize);
            println!(
                "{}{} {}",
                indent,
                fragment.text.trim(),
                format!("(p. {})", fragment.page + 1).dimmed()
            );
        }
    }

    Ok(())
}

fn cmd_select(
    input: &Path,
    page: u32,
    x: f32,
    y: f32,
    scale: f32,
    viewport: f32,
    align: Align,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_index = page
        .checked_sub(1)
        .ok_or("Page numbers start at 1")?;
    let doc = load(input, false)?;
    if doc.get_page(page_index).is_none() {
        return Err(pdfscript::Error::PageOutOfRange(page, doc.page_count()).into());
    }

    let render_options = RenderOptions::new().with_scale(scale);
    let sync_options = SyncOptions::new().with_align(align.into());
    let mut viewer = Viewer::with_options(doc, render_options, sync_options);

    viewer.render_pdf();
    let selection = viewer
        .click_pdf(page_index, x, y)
        .ok_or_else(|| format!("No fragment at ({}, {}) on page {}", x, y, page))?;
    viewer.pump_events();

    println!("{}", "Selection".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {:?}", "Text".bold(), selection.text);
    println!("{}: {}", "Page".bold(), selection.page + 1);
    println!("{}: {:?}", "BBox".bold(), selection.bbox.components());
    println!("{}: {}", "Key".bold(), selection.key());

    let content_height = viewer.render_transcript().content_height;
    let mut container = ScrollContainer::new(640.0, viewport, content_height);
    let outcome = viewer.refresh(SurfaceId::Transcript, &mut container);

    println!();
    println!("{}", "Transcript".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let layout = viewer.transcript().layout();
    let heading = layout
        .blocks
        .iter()
        .take_while(|block| !block.spans().iter().any(|s| s.highlighted))
        .filter_map(|block| match block {
            TranscriptBlock::Heading { span, .. } => Some(span.fragment.text.as_str()),
            _ => None,
        })
        .last();
    if let Some(heading) = heading {
        println!("{}: {}", "Under heading".bold(), heading.trim());
    }

    match outcome {
        ScrollOutcome::Scrolled { top, .. } => {
            println!("{}: {}", "Scrolled to".green(), top);
        }
        ScrollOutcome::AlreadyVisible(_) => {
            println!("{}", "Already visible; no scroll".green());
        }
        other => {
            println!("{}: {:?}", "No scroll".yellow(), other);
        }
    }
    if let Some(span) = layout.highlighted() {
        println!(
            "{}: x={} y={} w={} h={}",
            "Highlighted span".bold(),
            span.rect.x,
            span.rect.y,
            span.rect.width,
            span.rect.height
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfscript".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Linked PDF transcript tool");
    println!();
    println!("License: MIT");
}
