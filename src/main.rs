use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use sasslex::error::ErrorCollector;
use sasslex::lexer::{format_tokens, StackEvent, TokenKind};
use sasslex::{languages, tokenize_with, Grammar, LexerConfig};

#[derive(Parser)]
#[command(name = "sasslex")]
#[command(author, version, about = "Tokenize Sass and SCSS stylesheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with lexer settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a stylesheet
    Tokens {
        /// The stylesheet to tokenize
        input: PathBuf,

        /// Grammar tag
        #[arg(short, long, default_value = "sass")]
        lang: String,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,

        /// Also print the state stack events
        #[arg(long)]
        events: bool,
    },

    /// Report every region no rule accounts for
    Check {
        /// The stylesheet to check
        input: PathBuf,

        /// Grammar tag
        #[arg(short, long, default_value = "sass")]
        lang: String,
    },

    /// List the built-in grammars
    Languages,
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Tokens {
            input,
            lang,
            json,
            events,
        } => tokens(input, &lang, json, events, config),
        Commands::Check { input, lang } => check(input, &lang, config),
        Commands::Languages => list_languages(),
    });

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<LexerConfig> {
    let Some(path) = path else {
        return Ok(LexerConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = LexerConfig::from_json_str(&json)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;
    log::debug!("loaded {:?}", config);
    Ok(config)
}

fn find_grammar(lang: &str) -> Result<&'static Grammar> {
    match languages::find(lang) {
        Some(grammar) => Ok(grammar?),
        None => anyhow::bail!("Unknown language `{}`, see `sasslex languages`", lang),
    }
}

/// A loaded source file, registered for diagnostics.
struct SourceState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl SourceState {
    fn new(source_file: PathBuf) -> Result<Self> {
        let source = fs::read_to_string(&source_file)
            .with_context(|| format!("Failed to read source file: {:?}", source_file))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_error(&self, diagnostic: &Diagnostic<usize>) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, diagnostic)?;
        Ok(())
    }
}

fn tokens(input: PathBuf, lang: &str, json: bool, events: bool, config: LexerConfig) -> Result<()> {
    let grammar = find_grammar(lang)?;
    let state = SourceState::new(input)?;
    let config = if events { config.with_events() } else { config };

    let mut scanner = tokenize_with(grammar, &state.source, &config);
    let tokens: Vec<_> = scanner.by_ref().collect();
    log::debug!("{} tokens", tokens.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            let name = token.kind.qualname();
            let kind = if token.kind == TokenKind::Error {
                name.as_str().red().bold()
            } else {
                name.as_str().cyan()
            };
            println!("{:>6}  {:<28} {:?}", token.offset, kind, token.text);
        }
    }

    if events {
        println!("{}", "=== Stack events ===".blue().bold());
        for event in scanner.events() {
            println!("{}", describe_event(grammar, event));
        }
    }

    if log::log_enabled!(log::Level::Trace) {
        log::trace!("\n{}", format_tokens(&tokens));
    }
    Ok(())
}

fn describe_event(grammar: &Grammar, event: &StackEvent) -> String {
    match *event {
        StackEvent::Push(id) => format!("push {}", grammar.state_name(id)),
        StackEvent::Pop(id) => format!("pop {}", grammar.state_name(id)),
        StackEvent::PopRefused(id) => format!("pop refused at {}", grammar.state_name(id)),
        StackEvent::Reset { discarded } => format!("reset ({} discarded)", discarded),
        StackEvent::BlockEnter(id) => format!("block enter {}", grammar.state_name(id)),
        StackEvent::BlockExit(id) => format!("block exit {}", grammar.state_name(id)),
    }
}

fn check(input: PathBuf, lang: &str, config: LexerConfig) -> Result<()> {
    log::info!("Checking {:?}", input);

    let grammar = find_grammar(lang)?;
    let state = SourceState::new(input)?;

    let mut errors = ErrorCollector::new();
    errors.add_tokens(tokenize_with(grammar, &state.source, &config), state.file_id);

    for error in errors.errors() {
        state.report_error(&error.to_diagnostic())?;
    }

    if errors.has_errors() {
        anyhow::bail!("{} lexical errors", errors.error_count());
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn list_languages() -> Result<()> {
    for grammar in languages::all()? {
        let metadata = grammar.metadata();
        println!(
            "{:<8} {}  {}",
            metadata.tag.as_str().bold(),
            metadata.name,
            metadata.filenames.join(", ").as_str().dimmed()
        );
        if !metadata.description.is_empty() {
            println!("         {}", metadata.description);
        }
    }
    Ok(())
}
