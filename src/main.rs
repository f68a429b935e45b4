use chrono::Local;
use clap::{Parser, Subcommand};
use feedpress::config::{self, SiteConfig};
use feedpress::feed::HttpFetcher;
use feedpress::output;
use feedpress::pipeline::{self, Outcome, Paths};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedpress")]
#[command(about = "Turn RSS deal feeds into markdown, a static site, and a newsletter")]
#[command(long_about = "\
Turn RSS deal feeds into markdown, a static site, and a newsletter

Fetch writes a snapshot of every post; the other stages render it:

  site.config.json      # Site name and feed sources
  data/posts.json       # Snapshot written by `fetch`
  content/              # `write`: YYYY-MM-DD-<slug>.md per post
  dist/                 # `site`: index.html + <slug>.html per post
  dist/newsletter.json  # `newsletter`: subject, html, text

Set RUST_LOG (e.g. RUST_LOG=feedpress=debug) for detailed logs.

Run 'feedpress gen-config' to print an example site.config.json.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "site.config.json", global = true)]
    config: PathBuf,

    /// Directory holding the posts.json snapshot
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Markdown output directory
    #[arg(long, default_value = "content", global = true)]
    content_dir: PathBuf,

    /// Site and newsletter output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all configured feeds into the snapshot
    Fetch,
    /// Write one markdown file per post
    Write,
    /// Render the static HTML site
    Site,
    /// Build newsletter.json from the newest posts
    Newsletter,
    /// Run every stage: fetch → write → site → newsletter
    Build,
    /// Print an example site.config.json
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = Paths {
        data_dir: cli.data_dir.clone(),
        content_dir: cli.content_dir.clone(),
        output_dir: cli.output.clone(),
    };

    match cli.command {
        Command::Fetch => {
            let config = config::load_config(&cli.config)?;
            fetch(&config, &paths)?;
        }
        Command::Write => write_markdown(&paths)?,
        Command::Site => {
            let config = config::load_config(&cli.config)?;
            site(&config, &paths)?;
        }
        Command::Newsletter => newsletter(&paths)?,
        Command::Build => {
            let config = config::load_config(&cli.config)?;

            println!("==> Stage 1: Fetching {} sources", config.rss_sources().count());
            fetch(&config, &paths)?;

            println!("==> Stage 2: Writing markdown → {}", paths.content_dir.display());
            write_markdown(&paths)?;

            println!("==> Stage 3: Rendering site → {}", paths.output_dir.display());
            site(&config, &paths)?;

            println!("==> Stage 4: Building newsletter");
            newsletter(&paths)?;

            println!("==> Build complete: {}", paths.output_dir.display());
        }
        Command::GenConfig => {
            println!("{}", config::stock_config_json());
        }
    }

    Ok(())
}

fn fetch(config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_fetch_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = pipeline::run_fetch(config, paths, &fetcher, Some(tx));
    // The sender is dropped inside run_fetch, so the printer drains and exits.
    if printer.join().is_err() {
        tracing::warn!("progress printer panicked");
    }
    let posts = result?;
    output::print_snapshot_output(posts.len(), paths.store().path());
    Ok(())
}

fn write_markdown(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let date_stamp = Local::now().format("%Y-%m-%d").to_string();
    match pipeline::run_markdown(paths, &date_stamp)? {
        Outcome::Done(written) => output::print_markdown_output(written, &paths.content_dir),
        Outcome::NoInput(snapshot) => output::print_missing_input("write", &snapshot),
    }
    Ok(())
}

fn site(config: &SiteConfig, paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::run_site(paths, config)? {
        Outcome::Done(summary) => output::print_site_output(&summary, &paths.output_dir),
        Outcome::NoInput(snapshot) => output::print_missing_input("site", &snapshot),
    }
    Ok(())
}

fn newsletter(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::run_newsletter(paths, &Local::now())? {
        Outcome::Done(report) => output::print_newsletter_output(
            &report.newsletter,
            report.items,
            &paths.newsletter_path(),
        ),
        Outcome::NoInput(snapshot) => output::print_missing_input("newsletter", &snapshot),
    }
    Ok(())
}
