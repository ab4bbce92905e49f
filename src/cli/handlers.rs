//! Command handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on errors, and 2
//! when a preview is refused because nothing detected can be previewed.

use super::commands::{InputArgs, PreviewArgs, RenderArgs};
use super::output::OutputFormatter;
use crate::config::CodepeekConfig;
use crate::render::{capability_markup, technology_badges};
use crate::session::{PreviewOutcome, PreviewSession, ResponseAnalysis, SessionError};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_BLOCKED: i32 = 2;

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            if atty::is(atty::Stream::Stdin) {
                bail!("No input: pass a markdown file or pipe an answer on stdin");
            }
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

fn load_config() -> Result<CodepeekConfig> {
    let config = CodepeekConfig::default();
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn analyze_input(session: &mut PreviewSession, input: Option<&Path>) -> Result<ResponseAnalysis> {
    let text = read_input(input)?;
    debug!(bytes = text.len(), "Read answer");
    let id = session.begin_request();
    Ok(session.complete_request(id, &text)?.clone())
}

fn report(result: Result<i32>) -> i32 {
    result.unwrap_or_else(|e| {
        error!("{:#}", e);
        EXIT_ERROR
    })
}

pub fn handle_parse(args: &InputArgs) -> i32 {
    report(run_parse(args))
}

fn run_parse(args: &InputArgs) -> Result<i32> {
    let config = load_config()?;
    let mut session = PreviewSession::new(config.assets);
    let analysis = analyze_input(&mut session, args.input.as_deref())?;
    let output = OutputFormatter::new(args.format.into()).format_analysis(&analysis)?;
    println!("{}", output);
    Ok(EXIT_OK)
}

pub fn handle_analyze(args: &InputArgs) -> i32 {
    report(run_analyze(args))
}

fn run_analyze(args: &InputArgs) -> Result<i32> {
    let config = load_config()?;
    let mut session = PreviewSession::new(config.assets);
    let analysis = analyze_input(&mut session, args.input.as_deref())?;
    let output =
        OutputFormatter::new(args.format.into()).format_capability(&analysis.capability())?;
    println!("{}", output);
    Ok(EXIT_OK)
}

pub fn handle_preview(args: &PreviewArgs) -> i32 {
    report(run_preview(args))
}

fn run_preview(args: &PreviewArgs) -> Result<i32> {
    let config = load_config()?;
    let dark_mode = args.dark_mode || config.dark_mode;
    let mut session = PreviewSession::new(config.assets);
    analyze_input(&mut session, args.input.as_deref())?;

    match session.preview(dark_mode) {
        Ok(PreviewOutcome::Ready {
            document,
            label,
            warnings,
        }) => {
            for warning in &warnings {
                warn!("{}", warning);
            }
            info!("Preview built with {}", label);
            write_output(args.output.as_ref(), &document)?;
            Ok(EXIT_OK)
        }
        Ok(PreviewOutcome::Blocked {
            warnings,
            suggestions,
        }) => {
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            for suggestion in &suggestions {
                eprintln!("suggestion: {}", suggestion);
            }
            Ok(EXIT_BLOCKED)
        }
        Err(SessionError::NothingToPreview) => {
            eprintln!("No previewable code found (expected html, jsx, tsx or vue blocks)");
            Ok(EXIT_ERROR)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    report(run_render(args))
}

fn run_render(args: &RenderArgs) -> Result<i32> {
    let config = load_config()?;
    let mut session = PreviewSession::new(config.assets);
    let analysis = analyze_input(&mut session, args.input.as_deref())?;

    let mut markup = String::new();
    if !analysis.technologies.is_empty() {
        markup.push_str(&format!(
            "<div class=\"tech-badges\">{}</div>\n",
            technology_badges(&analysis.technologies)
        ));
    }
    markup.push_str(&analysis.markup());
    if !analysis.capability().can_preview {
        markup.push_str(&capability_markup(&analysis.capability()));
    }
    write_output(args.output.as_ref(), &markup)?;
    Ok(EXIT_OK)
}
