// tinylang: tokenizer, parser and syntax tree explorer

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rustc_hash::FxHashMap;
use tracing::{debug, info, Level};

use tinylang::dump;
use tinylang::generator::{ProgramGenerator, DEFAULT_STATEMENT_COUNT};
use tinylang::parser::{parse_source_with_depth, tokenize, DEFAULT_MAX_DEPTH};
use tinylang::ui::App;

#[derive(Parser)]
#[command(name = "tinylang")]
#[command(about = "Tokenize, parse and inspect tinylang programs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse source, tokens and syntax tree in a terminal UI
    View {
        /// Input file ("-" for stdin)
        file: PathBuf,
    },

    /// Print the syntax tree
    Dump {
        /// Input file ("-" for stdin)
        file: PathBuf,
    },

    /// Print the token stream
    Tokens {
        /// Input file ("-" for stdin)
        file: PathBuf,
    },

    /// Print a random valid program
    Generate {
        /// Top-level statements after the leading declarations
        #[arg(short = 'n', long, default_value_t = DEFAULT_STATEMENT_COUNT)]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Parse many random programs and report the first failure
    Fuzz {
        /// Number of programs to generate
        #[arg(long, default_value_t = 100)]
        iterations: u64,
        /// Top-level statements per program
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
        /// Seed of the first program; program i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    match cli.command {
        Commands::View { file } => view(&file, cli.max_depth),
        Commands::Dump { file } => {
            let source = read_source(&file)?;
            let program = parse_source_with_depth(&source, cli.max_depth)?;
            info!(statements = program.len(), "parsed successfully");
            print!("{}", dump::render(&program));
            Ok(())
        }
        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            let tokens = tokenize(&source)?;
            info!(tokens = tokens.len(), "tokenized successfully");
            for token in &tokens {
                println!(
                    "{:>8} {:<10} '{}'",
                    token.location.to_string(),
                    token.kind.name(),
                    token.text
                );
            }
            Ok(())
        }
        Commands::Generate { count, seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            debug!(seed, count, "generating program");
            print!("{}", ProgramGenerator::seeded(seed).generate(count));
            Ok(())
        }
        Commands::Fuzz {
            iterations,
            count,
            seed,
        } => fuzz(iterations, count, seed, cli.max_depth),
    }
}

/// Read the whole input file, or stdin for "-"
fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }

    info!(file = %path.display(), "reading source");
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn view(path: &Path, max_depth: usize) -> anyhow::Result<()> {
    let source = read_source(path)?;
    let app_name = path.display().to_string();

    let mut app = App::new(app_name, source, max_depth);
    match &app.error {
        Some(err) => info!(error = %err, "front-end failed; showing diagnostic"),
        None => info!(tree_lines = app.tree_lines.len(), "tree ready"),
    }

    let screen = RawScreen::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let res = app.run(&mut terminal);

    terminal.show_cursor()?;
    screen.leave()?;

    res.context("terminal UI failed")
}

/// Raw mode plus the alternate screen, undone on drop if setup or the UI
/// bails out early.
struct RawScreen {
    active: bool,
}

impl RawScreen {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let screen = RawScreen { active: true };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(screen)
    }

    fn leave(mut self) -> io::Result<()> {
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

fn fuzz(iterations: u64, count: usize, seed: u64, max_depth: usize) -> anyhow::Result<()> {
    let mut totals: FxHashMap<&'static str, usize> = FxHashMap::default();
    let mut statements = 0;

    for i in 0..iterations {
        let program_seed = seed.wrapping_add(i);
        let source = ProgramGenerator::seeded(program_seed).generate(count);

        let program = match parse_source_with_depth(&source, max_depth) {
            Ok(program) => program,
            Err(err) => bail!("seed {} failed: {}\n{}", program_seed, err, source),
        };
        debug!(seed = program_seed, statements = program.len(), "parsed");

        statements += program.len();
        for (kind, n) in dump::node_counts(&program) {
            *totals.entry(kind).or_insert(0) += n;
        }

        if (i + 1) % 100 == 0 {
            info!(done = i + 1, iterations, "fuzz progress");
        }
    }

    let nodes: usize = totals.values().sum();
    println!(
        "{} program(s) parsed: {} statement(s), {} node(s)",
        iterations, statements, nodes
    );

    let mut kinds: Vec<_> = totals.into_iter().collect();
    kinds.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (kind, n) in kinds {
        println!("{:>10} {}", kind, n);
    }

    Ok(())
}
