//! Analyze command: score a prompt and report anti-patterns.

use std::fmt::{Display, Write as _};
use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream, Style};
use tracing::{debug, info, instrument, warn};

use promptlab_core::config::Config;
use promptlab_core::enhance::{self, EnhanceSettings, EnhancementResult};
use promptlab_core::render;
use promptlab_core::{AnalysisResult, Severity};

use super::{read_input_file, read_input_stream};

const PREVIEW_CHARS: usize = 200;
const OVERALL_BAR_WIDTH: usize = 30;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Prompt text. Falls back to --file, then piped stdin.
    pub prompt: Option<String>,

    /// Read the prompt from a file.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<Utf8PathBuf>,

    /// Render the report as Markdown (ignored with --json).
    #[arg(long)]
    pub markdown: bool,

    /// Ask a remote model for an improved prompt (needs PROMPTLAB_API_KEY).
    #[arg(long)]
    pub enhance: bool,

    /// Enhancement provider: openai or anthropic.
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Fail when the overall score is below this value (0-10).
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,
}

/// Analyze a prompt and print the report.
#[instrument(name = "cmd_analyze", skip_all, fields(enhance = args.enhance))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = ?args.file,
        markdown = args.markdown,
        json = global_json,
        "executing analyze command"
    );

    let prompt = read_prompt(&args, max_input)?;
    if prompt.trim().is_empty() {
        bail!("prompt is empty");
    }

    let result = promptlab_core::analyze(&prompt);

    let enhancement = if args.enhance {
        let mut settings = EnhanceSettings::from_config(config);
        if let Some(ref provider) = args.provider {
            settings = settings.with_provider(provider.as_str());
        }
        enhance_prompt(&prompt, &result, &settings)?
    } else {
        None
    };

    if global_json {
        println!("{}", render::render_json(&result, enhancement.as_ref())?);
    } else if args.markdown {
        print!("{}", render::render_markdown(&result, enhancement.as_ref()));
    } else {
        print!("{}", render_text(&result, enhancement.as_ref()));
    }

    let overall = result.overall_score();
    info!(
        overall,
        anti_patterns = result.anti_patterns.len(),
        "analysis completed"
    );

    if let Some(min) = args.min_score.or(config.min_score)
        && overall < min
    {
        bail!("overall score {overall:.1} is below minimum {min:.1}");
    }

    Ok(())
}

/// Resolve the prompt: non-empty argument, then file, then piped stdin.
fn read_prompt(args: &AnalyzeArgs, max_input: Option<usize>) -> anyhow::Result<String> {
    if let Some(prompt) = args.prompt.as_deref().filter(|p| !p.is_empty()) {
        if let Some(max) = max_input
            && prompt.len() > max
        {
            bail!(
                "input too large: prompt is {} bytes (limit: {max} bytes)",
                prompt.len()
            );
        }
        return Ok(prompt.to_string());
    }

    if let Some(ref path) = args.file {
        return read_input_file(path, max_input);
    }

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return read_input_stream(stdin.lock(), max_input);
    }

    bail!(
        "no prompt provided\n\n\
         Pass a prompt as an argument, use --file, or pipe via stdin:\n  \
         promptlab analyze \"Your prompt here\"\n  \
         promptlab analyze --file prompt.txt\n  \
         echo \"Your prompt\" | promptlab analyze"
    )
}

/// Run the remote enhancer behind a spinner.
///
/// Enhancement failures are reported and swallowed; only a runtime that
/// cannot start is an error.
fn enhance_prompt(
    prompt: &str,
    result: &AnalysisResult,
    settings: &EnhanceSettings,
) -> anyhow::Result<Option<EnhancementResult>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime for enhancement")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Enhancing prompt with {}...", settings.provider));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = runtime.block_on(enhance::enhance(prompt, result, settings));
    spinner.finish_and_clear();

    match outcome {
        Ok(enhancement) => Ok(Some(enhancement)),
        Err(err) => {
            warn!(error = %err, "enhancement skipped");
            eprintln!(
                "{} {err}",
                "Enhancement skipped:".if_supports_color(Stream::Stderr, |t| t.yellow())
            );
            Ok(None)
        }
    }
}

fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

fn score_style(score: f64) -> Style {
    match score {
        s if s >= 8.0 => Style::new().green(),
        s if s >= 6.0 => Style::new().yellow(),
        s if s >= 4.0 => Style::new().bright_red(),
        _ => Style::new().red(),
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::High => Style::new().red().bold(),
        Severity::Medium => Style::new().yellow().bold(),
        Severity::Low => Style::new().blue().bold(),
    }
}

/// `[====------]` with `round(score / 10 * width)` filled cells.
fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score / 10.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
}

fn preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let mut out: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

/// Render the terminal report.
fn render_text(result: &AnalysisResult, enhancement: Option<&EnhancementResult>) -> String {
    let mut out = String::new();
    let heading = Style::new().cyan().bold();
    let dim = Style::new().dimmed();

    let _ = writeln!(out, "\n{}\n", paint("PromptLab Analysis Report", heading));

    let _ = writeln!(out, "{}", paint("Prompt", dim));
    for line in preview(&result.prompt).lines() {
        let _ = writeln!(out, "  {line}");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "  {} {}    {} {}\n",
        paint("Words:", dim),
        result.word_count,
        paint("Sentences:", dim),
        result.sentence_count
    );

    let overall = result.overall_score();
    let _ = writeln!(
        out,
        "  {} {} ({})",
        paint("Overall Score:", Style::new().bold()),
        paint(format!("{overall:.1}/10"), score_style(overall).bold()),
        result.overall_label()
    );
    let _ = writeln!(out, "  {}\n", score_bar(overall, OVERALL_BAR_WIDTH));

    let _ = writeln!(out, "{}", paint("Dimension Scores", heading));
    let _ = writeln!(
        out,
        "  {}",
        paint(
            format!("{:<12} {:>7}  {:<10} {}", "Dimension", "Score", "Rating", "Details"),
            Style::new().bold()
        )
    );
    for dim_score in &result.dimensions {
        let style = score_style(dim_score.score);
        let _ = writeln!(
            out,
            "  {:<12} {}  {} {}",
            dim_score.name(),
            paint(format!("{:>7}", format!("{:.1}/10", dim_score.score)), style),
            paint(format!("{:<10}", dim_score.label()), style),
            dim_score.details
        );
    }
    out.push('\n');

    if !result.anti_patterns.is_empty() {
        let _ = writeln!(
            out,
            "{}\n",
            paint("Anti-Patterns Detected", Style::new().red().bold())
        );
        for detected in &result.anti_patterns {
            let pattern = detected.pattern;
            let _ = writeln!(
                out,
                "  {} {}",
                paint(
                    format!("[{}]", pattern.severity.as_str().to_uppercase()),
                    severity_style(pattern.severity)
                ),
                paint(pattern.name, Style::new().bold())
            );
            let _ = writeln!(out, "      {}", pattern.description);
            if !detected.evidence.is_empty() {
                let _ = writeln!(
                    out,
                    "      {}",
                    paint(format!("Evidence: {}", detected.evidence), dim)
                );
            }
            out.push('\n');
        }
    }

    if !result.suggestions.is_empty() {
        let _ = writeln!(
            out,
            "{}\n",
            paint("Suggestions for Improvement", Style::new().green().bold())
        );
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {suggestion}", i + 1);
        }
        out.push('\n');
    }

    if let Some(enhancement) = enhancement {
        let _ = writeln!(
            out,
            "{}",
            paint(
                format!(
                    "AI-Enhanced Prompt ({}/{})",
                    enhancement.provider, enhancement.model
                ),
                Style::new().magenta().bold()
            )
        );
        for line in enhancement.improved_prompt.lines() {
            let _ = writeln!(out, "  {line}");
        }
        out.push('\n');
        if !enhancement.explanation.is_empty() {
            let _ = writeln!(out, "  {}\n", paint(&enhancement.explanation, dim));
        }
    }

    out
}
