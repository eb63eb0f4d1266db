use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use critique::cli::Cli;
use critique::config::{self, Config};
use critique::credentials::{Credential, CredentialStore};
use critique::report;
use critique::session::{AnalysisError, AnalysisSession};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "critique", &mut io::stdout());
        return Ok(());
    }

    if cli.print_config {
        config::print_default_config();
        return Ok(());
    }

    let mut config = Config::load();
    config.apply_env_overrides();
    if let Some(model) = &cli.model {
        config.api.model = model.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }

    let store = CredentialStore::new();

    if cli.set_key {
        prompt_for_key(&store)?;
        if cli.file.is_none() && cli.code.is_none() {
            return Ok(());
        }
    } else if store.load().is_none() {
        // Only prompt on a terminal; piped runs must use --set-key.
        if io::stdin().is_terminal() {
            eprintln!("{}", "No API key configured.".yellow());
            prompt_for_key(&store)?;
        } else {
            bail!("no API key configured; run `critique --set-key` first");
        }
    }

    let code = read_code(&cli)?;

    let mut session = AnalysisSession::new(store, &config);

    if cli.debug {
        print_debug_section("Rendered prompt", &session.preview_prompt(&code, cli.mode));
        print_debug_section(
            "Request",
            &format!(
                "model: {}\ntimeout: {}s\nendpoint: {}",
                config.api.model,
                config.api.timeout_secs,
                config.endpoint()
            ),
        );
    }

    if !cli.quiet {
        eprintln!(
            "{}",
            format!(
                "Analyzing ({}) with {}...",
                cli.mode.label(),
                report::model_label(&config.api.model)
            )
            .dimmed()
        );
    }

    match session.analyze(&code, cli.mode).await {
        Ok(report) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if cli.quiet {
                println!("{}", report.body);
            } else {
                report::print_report(&report);
            }
            Ok(())
        }
        Err(AnalysisError::EmptyInput) => {
            bail!("no code to analyze; pass a file, --code, or pipe source on stdin")
        }
        Err(AnalysisError::MissingCredential) => {
            bail!("no API key configured; run `critique --set-key` first")
        }
        Err(AnalysisError::Api { kind, message }) => {
            report::print_failure(kind, &message);
            std::process::exit(1);
        }
    }
}

/// Resolve the code to analyze: inline flag, file argument, or stdin.
fn read_code(cli: &Cli) -> Result<String> {
    if let Some(code) = &cli.code {
        return Ok(code.clone());
    }

    match &cli.file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        Some(_) => read_stdin(),
        None => {
            if io::stdin().is_terminal() {
                bail!("no code to analyze; pass a file, --code, or pipe source on stdin");
            }
            read_stdin()
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Read a key from the terminal and persist it.
fn prompt_for_key(store: &CredentialStore) -> Result<()> {
    eprint!("{} ", "Enter your OpenRouter API key:".bold());
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read the API key")?;

    let key = line.trim();
    if key.is_empty() {
        bail!("the API key cannot be empty");
    }

    store.save(&Credential::new(key))?;

    if let Some(path) = store.path() {
        eprintln!("{}", format!("Key saved to {}", path.display()).dimmed());
    }

    Ok(())
}

fn print_debug_section(title: &str, body: &str) {
    eprintln!("{}", format!("=== DEBUG: {title} ===").yellow().bold());
    if body.trim().is_empty() {
        eprintln!("{}", "| <empty>".dimmed());
    } else {
        for line in body.lines() {
            eprintln!("{}", format!("| {line}").bright_white());
        }
    }
    eprintln!();
}
