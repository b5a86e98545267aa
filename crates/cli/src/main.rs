use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::BookCatalog;
use feature_builder::{DEFAULT_MAX_WORDS, FeatureBuilder, ReviewPreprocessor};
use llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, SummaryClient, SummaryConfig};
use recommender::{BookRecommendation, BookRecommender, RecommenderConfig};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

/// BookRecs - Book Recommendation Engine
#[derive(Parser)]
#[command(name = "book-recs")]
#[command(about = "Book recommendations from review text, with generated summaries", long_about = None)]
struct Cli {
    /// Path to the combined-feature dataset
    #[arg(short, long, global = true, default_value = "data/books_combined_features.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined-feature dataset from the clustered dataset
    BuildFeatures {
        /// Clustered dataset CSV
        #[arg(long)]
        input: PathBuf,

        /// Where to write the combined-feature CSV (overwritten)
        #[arg(long)]
        output: PathBuf,

        /// Review words kept per book
        #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
        max_words: usize,
    },

    /// Lemmatize reviews and add sentiment and keyword genre columns
    Preprocess {
        /// Raw reviews CSV
        #[arg(long)]
        input: PathBuf,

        /// Where to write the processed CSV (overwritten)
        #[arg(long)]
        output: PathBuf,

        #[arg(long, default_value = "all_texts")]
        text_column: String,

        /// Used for genre assignment when present
        #[arg(long, default_value = "categories")]
        categories_column: String,
    },

    /// Recommend books for a single query
    Recommend {
        /// What you are looking for, e.g. "adventure in space"
        #[arg(long)]
        query: String,

        /// Only recommend books from this cluster
        #[arg(long)]
        cluster: Option<String>,

        #[command(flatten)]
        summary: SummaryArgs,
    },

    /// Read queries from stdin until `:quit`
    Interactive {
        #[command(flatten)]
        summary: SummaryArgs,
    },

    /// List the cluster labels in the dataset
    Clusters,

    /// Render exploratory SVG charts for the dataset
    Plot {
        /// Directory for the SVG files
        #[arg(long, default_value = "plots")]
        out_dir: PathBuf,
    },
}

/// Chat-completion endpoint settings
#[derive(Args)]
struct SummaryArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
}

impl SummaryArgs {
    fn client(&self) -> Result<SummaryClient> {
        let config = SummaryConfig::new(&self.api_key)
            .with_base_url(&self.base_url)
            .with_model(&self.model);
        SummaryClient::new(config).context("Failed to build summary client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildFeatures {
            input,
            output,
            max_words,
        } => handle_build_features(&input, &output, max_words)?,
        Commands::Preprocess {
            input,
            output,
            text_column,
            categories_column,
        } => handle_preprocess(&input, &output, text_column, categories_column)?,
        Commands::Recommend {
            query,
            cluster,
            summary,
        } => {
            let recommender = build_recommender(&cli.data, &summary)?;
            handle_recommend(&recommender, &query, cluster.as_deref()).await?
        }
        Commands::Interactive { summary } => {
            let recommender = build_recommender(&cli.data, &summary)?;
            handle_interactive(&recommender).await?
        }
        Commands::Clusters => handle_clusters(&load_catalog(&cli.data)?),
        Commands::Plot { out_dir } => handle_plot(&load_catalog(&cli.data)?, &out_dir)?,
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<BookCatalog> {
    println!("Loading book dataset from {}...", path.display());
    let start = Instant::now();
    let catalog = BookCatalog::load_from_file(path)
        .with_context(|| format!("Failed to load book dataset {}", path.display()))?;
    println!(
        "{} Loaded {} books in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(catalog)
}

fn build_recommender(data: &Path, summary: &SummaryArgs) -> Result<BookRecommender> {
    let catalog = Arc::new(load_catalog(data)?);
    let start = Instant::now();
    let recommender = BookRecommender::new(catalog, summary.client()?, RecommenderConfig::default())?;
    println!("{} Fitted TF-IDF model in {:?}", "✓".green(), start.elapsed());
    Ok(recommender)
}

/// Handle the 'build-features' command
fn handle_build_features(input: &Path, output: &Path, max_words: usize) -> Result<()> {
    let rows = FeatureBuilder::new()
        .with_max_words(max_words)
        .run(input, output)?;
    println!(
        "{} Wrote {} books to {}",
        "✓".green(),
        rows,
        output.display()
    );
    Ok(())
}

/// Handle the 'preprocess' command
fn handle_preprocess(
    input: &Path,
    output: &Path,
    text_column: String,
    categories_column: String,
) -> Result<()> {
    let rows = ReviewPreprocessor::new()
        .with_text_column(text_column)
        .with_categories_column(categories_column)
        .run(input, output)?;
    println!(
        "{} Wrote {} processed rows to {}",
        "✓".green(),
        rows,
        output.display()
    );
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    recommender: &BookRecommender,
    query: &str,
    cluster: Option<&str>,
) -> Result<()> {
    let recommendations = recommender.recommend(query, cluster).await?;
    print_recommendations(&recommendations);
    Ok(())
}

/// One line of REPL input
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Query(String),
    Cluster(String),
    All,
    Clusters,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Query(line.to_string());
        };

        // Cluster labels may contain spaces
        if let Some(label) = command
            .strip_prefix("cluster")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(str::trim)
            .filter(|label| !label.is_empty())
        {
            return Self::Cluster(label.to_string());
        }

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("all"), None) => Self::All,
            (Some("clusters"), None) => Self::Clusters,
            (Some("help"), None) => Self::Help,
            (Some("quit" | "q" | "exit"), None) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

fn print_repl_help() {
    println!("{}", "Type what you'd like to read about, or:".bold());
    println!("  {}  only recommend from one cluster", ":cluster <label>".cyan());
    println!("  {}              recommend from every cluster", ":all".cyan());
    println!("  {}         list cluster labels", ":clusters".cyan());
    println!("  {}             leave", ":quit".cyan());
}

/// Handle the 'interactive' command
async fn handle_interactive(recommender: &BookRecommender) -> Result<()> {
    print_repl_help();

    let mut cluster: Option<String> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let prompt = match &cluster {
            Some(label) => format!("book-recs [cluster {}]> ", label),
            None => "book-recs> ".to_string(),
        };
        print!("{}", prompt.bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Query(query) => {
                if let Err(err) = handle_recommend(recommender, &query, cluster.as_deref()).await {
                    println!("{}", format!("Error: {:#}", err).red());
                }
            }
            ReplCommand::Cluster(label) => {
                if recommender.catalog().has_cluster(&label) {
                    println!("Filtering to cluster {}", label.green());
                    cluster = Some(label);
                } else {
                    println!("{}", format!("Unknown cluster '{}'", label).red());
                }
            }
            ReplCommand::All => {
                cluster = None;
                println!("Recommending from all clusters");
            }
            ReplCommand::Clusters => println!("{}", recommender.clusters().join(", ")),
            ReplCommand::Help => print_repl_help(),
            ReplCommand::Quit => break,
            ReplCommand::Empty => {}
            ReplCommand::Unknown(input) => {
                println!("{}", format!("Unknown command '{}', try :help", input).red());
            }
        }
    }
    Ok(())
}

/// Handle the 'clusters' command
fn handle_clusters(catalog: &BookCatalog) {
    println!("{}", "Clusters:".bold().blue());
    for label in catalog.clusters() {
        println!("  {} ({} books)", label, catalog.rows_in_cluster(&label).len());
    }
}

/// Handle the 'plot' command
fn handle_plot(catalog: &BookCatalog, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let written = |name: &str| {
        println!("{} {}", "✓".green(), out_dir.join(name).display());
    };

    let (scores, sentiments): (Vec<f64>, Vec<f64>) = catalog
        .books()
        .iter()
        .filter_map(|book| Some((book.avg_score?, book.sentiment_score?)))
        .unzip();

    if scores.is_empty() {
        tracing::warn!("No books with both a score and a sentiment, skipping score charts");
    } else {
        viz::two_plot_distribution(&out_dir.join("score_distributions.svg"), &scores, &sentiments)?;
        written("score_distributions.svg");
        viz::scatter_plot(&out_dir.join("sentiment_vs_score.svg"), &sentiments, &scores)?;
        written("sentiment_vs_score.svg");
    }

    let genre_counts = catalog.genre_counts();
    if !genre_counts.is_empty() {
        viz::bar_plot(&out_dir.join("books_per_genre.svg"), &genre_counts)?;
        written("books_per_genre.svg");
    }

    let mut by_genre: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut by_cluster: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for book in catalog.books() {
        if let Some(score) = book.avg_score {
            by_genre.entry(book.genre_label.clone()).or_default().push(score);
        }
        if let Some(sentiment) = book.sentiment_score {
            by_cluster
                .entry(book.cluster_label.clone())
                .or_default()
                .push(sentiment);
        }
    }
    if !by_genre.is_empty() {
        let groups: Vec<(String, Vec<f64>)> = by_genre.into_iter().collect();
        viz::violin_plot(
            &out_dir.join("score_by_genre.svg"),
            &groups,
            "Average Score by Genre",
            "Average Score",
        )?;
        written("score_by_genre.svg");
    }
    if !by_cluster.is_empty() {
        let groups: Vec<(String, Vec<f64>)> = by_cluster.into_iter().collect();
        viz::violin_plot(
            &out_dir.join("sentiment_by_cluster.svg"),
            &groups,
            "Sentiment Score by Cluster",
            "Sentiment Score",
        )?;
        written("sentiment_by_cluster.svg");
    }

    let table = catalog.cluster_genre_proportions();
    if !table.genres.is_empty() && !table.clusters.is_empty() {
        viz::heatmap_plot(&out_dir.join("genre_cluster_heatmap.svg"), &table)?;
        written("genre_cluster_heatmap.svg");
    }
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[BookRecommendation]) {
    if recommendations.is_empty() {
        println!(
            "{}",
            "No matching books found. Try a different description.".yellow()
        );
        return;
    }

    println!("{}", "Recommended Books:".bold().blue());
    for rec in recommendations {
        println!("{} {}", format!("{}.", rec.rank).green(), rec.title.bold());
        let authors = if rec.authors.is_empty() {
            "Unknown"
        } else {
            rec.authors.as_str()
        };
        println!("   {} {}", "Authors:".cyan(), authors);
        println!("   {} {}", "Rating:".cyan(), format_rating(rec.avg_score));
        println!("   {} {}", "Sentiment:".cyan(), format_score(rec.sentiment_score));
        println!("   {} {}", "Summary:".cyan(), rec.summary.text);
        if let Some(error) = &rec.summary.error {
            println!("   {}", error.red());
        }
        println!("   {} {}", "Cluster:".cyan(), rec.cluster_label);
    }
}

/// Rating as stored, keeping one decimal for whole numbers
fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{:.1}", r),
        Some(r) => r.to_string(),
        None => "n/a".to_string(),
    }
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "n/a".to_string())
}
