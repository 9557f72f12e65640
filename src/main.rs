use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, warn};

use blogfresh::articles::models::{ArticleCollection, ContentType, Freshness};
use blogfresh::articles::view::{effective_articles, ArticleFilter, FreshnessSummary};
use blogfresh::config::Config;
use blogfresh::db::models::OverridePatch;
use blogfresh::db::{OverrideStore, SqliteOverrideStore};

/// blogfresh: editorial freshness scoring for blog article exports.
///
/// Classifies every article in the CMS export by content type, scores how
/// urgently it needs a review, and explains why.
#[derive(Parser)]
#[command(name = "blogfresh", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the override database
    Init,

    /// Show the classified article table
    Report {
        /// Only show articles in this tier (fresh, aging, stale, needs-update)
        #[arg(long)]
        freshness: Option<Freshness>,

        /// Only show this content type (evergreen, semi-evergreen, time-sensitive, news)
        #[arg(long)]
        content_type: Option<ContentType>,

        /// Only show articles with this category
        #[arg(long)]
        category: Option<String>,

        /// Only show articles with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only show articles whose title or URL contains this text
        #[arg(long)]
        search: Option<String>,

        /// Max rows to print (default: all)
        #[arg(long)]
        limit: Option<usize>,

        /// Also write a Markdown review queue to this path
        #[arg(long)]
        markdown: Option<String>,
    },

    /// Show one article with its reasoning
    Show {
        /// Article id from the report
        id: usize,
    },

    /// Show freshness stat cards and system status
    Stats,

    /// Export articles, vocabularies and overrides as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Manage editorial overrides
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },
}

#[derive(Subcommand)]
enum OverrideAction {
    /// Set or update an article's override
    Set {
        /// Article id from the report
        id: usize,

        #[arg(long)]
        freshness: Option<Freshness>,

        #[arg(long)]
        content_type: Option<ContentType>,

        /// Editor note (pass an empty string to clear it)
        #[arg(long)]
        note: Option<String>,
    },

    /// Remove an article's override
    Clear {
        /// Article id from the report
        id: usize,
    },

    /// List stored overrides
    List,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blogfresh=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing override database...");
            let store = blogfresh::db::open_store(&config.db_path)?;
            let table_count = store.table_count()?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: put the CMS export at {}", config.csv_path.display());
            println!("  (or set BLOGFRESH_CSV_PATH in your .env file)");
            println!("\nThen run: blogfresh report");
        }

        Commands::Report {
            freshness,
            content_type,
            category,
            tag,
            search,
            limit,
            markdown,
        } => {
            let store = blogfresh::db::open_store(&config.db_path)?;
            let collection = load_articles(&config, &store)?;
            let overrides = store.list_overrides()?;

            let filter = ArticleFilter {
                freshness,
                content_type,
                category,
                tag,
                search,
            };
            let all = effective_articles(&collection, &overrides);
            let mut shown = filter.apply(&all);
            if let Some(limit) = limit {
                shown.truncate(limit);
            }

            blogfresh::output::terminal::display_article_table(&shown, all.len());

            if let Some(path) = markdown {
                let report_path = blogfresh::output::markdown::generate_report(
                    &collection,
                    &overrides,
                    config.reference_now()?,
                    &path,
                )?;
                println!("\nMarkdown report written to: {}", report_path.display());
            }
        }

        Commands::Show { id } => {
            let store = blogfresh::db::open_store(&config.db_path)?;
            let collection = load_articles(&config, &store)?;
            let overrides = store.list_overrides()?;

            let all = effective_articles(&collection, &overrides);
            match all.iter().find(|a| a.record.id == id) {
                Some(article) => blogfresh::output::terminal::display_article_detail(article),
                None => anyhow::bail!(
                    "No article with id {id} in this load ({} articles).",
                    collection.len()
                ),
            }
        }

        Commands::Stats => {
            let db_exists = std::path::Path::new(&config.db_path).exists();
            let store = if db_exists {
                blogfresh::db::open_store(&config.db_path)?
            } else {
                SqliteOverrideStore::in_memory()?
            };

            blogfresh::status::show(&config, &store)?;

            if config.csv_path.exists() {
                let collection = load_articles(&config, &store)?;
                let overrides = store.list_overrides()?;
                let all = effective_articles(&collection, &overrides);
                let summary = FreshnessSummary::from_articles(&all);
                blogfresh::output::terminal::display_summary(&summary, &collection);
            }
        }

        Commands::Export { output } => {
            let store = blogfresh::db::open_store(&config.db_path)?;
            let collection = load_articles(&config, &store)?;
            let overrides = store.list_overrides()?;

            match output {
                Some(path) => {
                    let written =
                        blogfresh::output::export::write_export(&collection, &overrides, &path)?;
                    println!(
                        "Exported {} articles to {}",
                        collection.len(),
                        written.display().to_string().bold()
                    );
                }
                None => println!(
                    "{}",
                    blogfresh::output::export::render_export(&collection, &overrides)?
                ),
            }
        }

        Commands::Override { action } => {
            let store = blogfresh::db::open_store(&config.db_path)?;
            run_override(action, &config, &store)?;
        }
    }

    Ok(())
}

fn run_override(action: OverrideAction, config: &Config, store: &dyn OverrideStore) -> Result<()> {
    match action {
        OverrideAction::Set {
            id,
            freshness,
            content_type,
            note,
        } => {
            if freshness.is_none() && content_type.is_none() && note.is_none() {
                anyhow::bail!("Nothing to set. Pass --freshness, --content-type or --note.");
            }

            // Ids are only stable within one load, so check against the
            // current export before storing anything.
            let collection = load_articles(config, store)?;
            if collection.get(id).is_none() {
                anyhow::bail!(
                    "No article with id {id} in this load ({} articles).",
                    collection.len()
                );
            }

            let patch = OverridePatch {
                freshness,
                content_type,
                note,
            };
            match store.apply_patch(id, &patch)? {
                Some(stored) => {
                    info!(article_id = id, "Override stored");
                    blogfresh::output::terminal::display_overrides(&[stored]);
                }
                None => println!("Override for #{id} is now empty and was removed."),
            }
        }

        OverrideAction::Clear { id } => {
            if store.clear_override(id)? {
                println!("Override for #{id} removed.");
            } else {
                println!("No override stored for #{id}.");
            }
        }

        OverrideAction::List => {
            let overrides = store.list_overrides()?;
            blogfresh::output::terminal::display_overrides(&overrides);
        }
    }

    Ok(())
}

/// Load and classify the export, recording the load in the store.
fn load_articles(config: &Config, store: &dyn OverrideStore) -> Result<ArticleCollection> {
    config.require_csv()?;
    let now = config.reference_now()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Classifying {}...", config.csv_path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result =
        blogfresh::pipeline::load::load_csv(&config.csv_path, now, &config.pipeline_options());
    spinner.finish_and_clear();
    let collection = result?;

    if collection.is_empty() {
        warn!(
            path = %config.csv_path.display(),
            "Export loaded but no rows passed the filters"
        );
    }

    let recorded = store
        .set_load_state(blogfresh::status::LAST_LOADED_AT, &now.to_rfc3339())
        .and_then(|_| {
            store.set_load_state(
                blogfresh::status::LAST_SOURCE,
                &config.csv_path.display().to_string(),
            )
        });
    if let Err(e) = recorded {
        warn!(error = %e, "Failed to record load state");
    }

    Ok(collection)
}
