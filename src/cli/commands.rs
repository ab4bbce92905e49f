use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Code block extraction, technology detection and live preview for LLM answers
#[derive(Parser, Debug)]
#[command(
    name = "codepeek",
    about = "Code block extraction, technology detection and live preview for LLM answers",
    version,
    long_about = "codepeek reads a markdown answer produced by a language model, splits it into \
                  prose and code blocks, detects the front-end and back-end technologies the \
                  code uses, and synthesizes a self-contained HTML document for previewing it."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Split an answer into segments and detect technologies",
        long_about = "Parses fenced code blocks out of a markdown answer and reports the ordered \
                      text/code segments together with the detected technologies.\n\n\
                      Examples:\n  \
                      codepeek parse answer.md\n  \
                      cat answer.md | codepeek parse --format json"
    )]
    Parse(InputArgs),

    #[command(
        about = "Report whether an answer's code can be previewed",
        long_about = "Derives the preview capability of an answer: warnings, suggestions, the \
                      UI framework used for the preview and the CSS CDNs to include.\n\n\
                      Examples:\n  \
                      codepeek analyze answer.md\n  \
                      codepeek analyze answer.md --format yaml"
    )]
    Analyze(InputArgs),

    #[command(
        about = "Build a self-contained HTML preview document",
        long_about = "Builds the HTML document used to preview the answer's code. Exits with \
                      status 2 when every detected technology is non-previewable.\n\n\
                      Examples:\n  \
                      codepeek preview answer.md -o preview.html\n  \
                      codepeek preview answer.md --dark-mode"
    )]
    Preview(PreviewArgs),

    #[command(
        about = "Render an answer to display markup",
        long_about = "Renders prose through the lightweight markdown renderer and code blocks \
                      with headers, technology badges and copy buttons.\n\n\
                      Examples:\n  \
                      codepeek render answer.md -o answer.html"
    )]
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(
        value_name = "INPUT",
        help = "Markdown file to read (reads stdin when omitted or '-')"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[arg(
        value_name = "INPUT",
        help = "Markdown file to read (reads stdin when omitted or '-')"
    )]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Render the preview with a dark background")]
    pub dark_mode: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the document to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(
        value_name = "INPUT",
        help = "Markdown file to read (reads stdin when omitted or '-')"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the markup to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
