use clap::{Args, Parser, Subcommand};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use fnd_core::{Config, Error, Result};
use fnd_inference::{create_model, ClickbaitClassifier, SentimentScorer};
use fnd_sources::{create_source, init_logging, AnalysisManager};
use fnd_storage::{create_storage, export::write_csv};
use fnd_web::{create_app, AppState};
use std::io::{self, IsTerminal, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, Level};

mod report;

use report::Painter;

const CSV_FILENAME: &str = "combined_analysis.csv";

#[derive(Parser, Debug)]
#[command(name = "fnd", author, version, about = "Clickbait and sentiment analysis of news coverage", long_about = None)]
pub struct Cli {
    /// Storage backend for analyzed rows: sqlite or memory
    #[arg(long, global = true, default_value = "sqlite")]
    storage: String,
    /// SQLite database file (FND_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// Sentiment model: lexicon or huggingface (FND_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,
    /// Hugging Face model id (FND_MODEL_NAME)
    #[arg(long, global = true)]
    model_name: Option<String>,
    /// Directory for the CSV export (FND_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, classify and score articles for a keyword (default)
    Analyze(AnalyzeArgs),
    /// Serve the web dashboard
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
        /// Article source: newsapi or sample
        #[arg(long, default_value = "newsapi")]
        source: String,
    },
    /// Print the stored article count per clickbait label
    Counts,
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    /// Search keyword, prompted for when missing
    #[arg(short, long)]
    keyword: Option<String>,
    /// Result page, random in 1..=5 when missing
    #[arg(long)]
    page: Option<u32>,
    /// Articles per page, 1..=100 (FND_PAGE_SIZE)
    #[arg(long)]
    page_size: Option<u32>,
    /// Article source: newsapi or sample
    #[arg(long)]
    source: Option<String>,
    /// Skip the interactive article selection
    #[arg(long)]
    no_select: bool,
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(model) = &cli.model {
        config.model.kind = model.parse()?;
    }
    if let Some(name) = &cli.model_name {
        config.model.model_name = name.clone();
    }
    if let Some(path) = &cli.database {
        config.database_path = path.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(Commands::Analyze(AnalyzeArgs { page_size: Some(size), .. })) = &cli.command {
        config.news_api.page_size = fnd_core::config::parse_page_size(&size.to_string())?;
    }
    Ok(())
}

async fn build_manager(config: &Config, cli: &Cli, source: &str) -> Result<AnalysisManager> {
    // Load the model first so a broken model aborts before any request is made.
    let model = create_model(&config.model)?;
    let source = create_source(source, &config.news_api)?;
    let storage = create_storage(&cli.storage, &config.database_path).await?;
    Ok(AnalysisManager::new(
        source,
        SentimentScorer::new(model, config.model.max_input_chars),
        ClickbaitClassifier::new(&config.clickbait_phrases),
        storage,
        config.news_api.page_size,
    ))
}

fn prompt_keyword() -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Keyword to analyze")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("keyword must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| Error::External(e.into()))
}

fn select_articles(report: &fnd_sources::AnalysisReport, painter: Painter) -> Result<()> {
    let term = Term::stdout();
    let mut items: Vec<String> = report
        .rows
        .iter()
        .map(|row| format!("{}. {}", row.index, row.article.title))
        .collect();
    items.push("Done".to_string());

    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Show article details")
            .items(&items)
            .default(0)
            .interact_on_opt(&term)
            .map_err(|e| Error::External(e.into()))?;
        match choice.and_then(|i| report.rows.get(i)) {
            Some(row) => report::render_article(&mut io::stdout(), row, report.keyword(), painter)?,
            None => return Ok(()),
        }
    }
}

async fn analyze(cli: &Cli, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let source = args.source.as_deref().unwrap_or("newsapi");
    let manager = build_manager(config, cli, source).await?;
    analyze_with(&manager, args, config).await
}

/// Render the report and write the CSV before storing, so a storage failure
/// still leaves the user with the results.
async fn analyze_with(manager: &AnalysisManager, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let painter = Painter::new(io::stdout().is_terminal());

    let keyword = match &args.keyword {
        Some(keyword) => keyword.clone(),
        None if interactive => prompt_keyword()?,
        None => return Err(Error::InvalidInput("--keyword is required when not running in a terminal".to_string())),
    };

    let report = manager.analyze(&keyword, args.page).await?;
    let mut stdout = io::stdout().lock();
    report::render_report(&mut stdout, &report, painter)?;
    stdout.flush()?;
    drop(stdout);

    if report.is_empty() {
        info!("No articles found for '{}'", report.keyword());
        return Ok(());
    }

    if interactive && !args.no_select {
        select_articles(&report, painter)?;
    }

    let csv_path = config.output_dir.join(CSV_FILENAME);
    write_csv(&csv_path, &report.rows)?;
    println!();
    println!("📄 Results written to {}", csv_path.display());

    manager.persist(&report).await?;
    let counts = manager.clickbait_counts().await?;
    println!();
    report::render_counts(&mut io::stdout(), &counts, painter)?;
    Ok(())
}

async fn serve(cli: &Cli, config: &Config, addr: SocketAddr, source: &str) -> Result<()> {
    let manager = build_manager(config, cli, source).await?;
    let app = create_app(AppState::new(Arc::new(manager))).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn counts(cli: &Cli, config: &Config) -> Result<()> {
    let storage = create_storage(&cli.storage, &config.database_path).await?;
    let counts = storage.clickbait_counts().await?;
    report::render_counts(&mut io::stdout(), &counts, Painter::new(io::stdout().is_terminal()))?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli)?;
    info!("⚙️ Configuration loaded: {:?}", config);

    match &cli.command {
        None => analyze(&cli, &AnalyzeArgs::default(), &config).await,
        Some(Commands::Analyze(args)) => analyze(&cli, args, &config).await,
        Some(Commands::Serve { addr, source }) => serve(&cli, &config, *addr, source).await,
        Some(Commands::Counts) => counts(&cli, &config).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fnd_core::config::DEFAULT_CLICKBAIT_PHRASES;
    use fnd_core::{AnalyzedArticle, LabelCount, ModelKind, ResultStorage, RunInfo};
    use fnd_sources::SampleSource;

    struct FailingStorage;

    #[async_trait]
    impl ResultStorage for FailingStorage {
        async fn append_results(&self, _run: &RunInfo, _rows: &[AnalyzedArticle]) -> Result<usize> {
            Err(Error::Database("database is locked".to_string()))
        }

        async fn clickbait_counts(&self) -> Result<Vec<LabelCount>> {
            Err(Error::Database("database is locked".to_string()))
        }

        async fn row_count(&self) -> Result<usize> {
            Err(Error::Database("database is locked".to_string()))
        }
    }

    fn lexicon_config(output_dir: PathBuf) -> Config {
        let mut config = Config {
            output_dir,
            ..Config::default()
        };
        config.model.kind = ModelKind::Lexicon;
        config
    }

    fn sample_args() -> AnalyzeArgs {
        AnalyzeArgs {
            keyword: Some("iphone".to_string()),
            page: Some(1),
            source: Some("sample".to_string()),
            no_select: true,
            ..AnalyzeArgs::default()
        }
    }

    #[test]
    fn test_analyze_is_the_default_command() {
        let cli = Cli::try_parse_from(["fnd"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.storage, "sqlite");
    }

    #[test]
    fn test_parse_analyze_with_global_flags() {
        let cli = Cli::try_parse_from([
            "fnd", "analyze", "--keyword", "iphone", "--page", "3", "--source", "sample", "--no-select",
            "--storage", "memory", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.storage, "memory");
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.keyword.as_deref(), Some("iphone"));
                assert_eq!(args.page, Some(3));
                assert_eq!(args.source.as_deref(), Some("sample"));
                assert!(args.no_select);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["fnd", "serve"]).unwrap();
        match cli.command {
            Some(Commands::Serve { addr, source }) => {
                assert_eq!(addr.to_string(), "127.0.0.1:8501");
                assert_eq!(source, "newsapi");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_configuration() {
        let cli = Cli::try_parse_from([
            "fnd", "--model", "hf", "--model-name", "cardiffnlp/twitter-roberta-base-sentiment",
            "--database", "/tmp/x.db", "analyze", "--page-size", "50",
        ])
        .unwrap();
        let mut config = Config::default();
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.model.kind, ModelKind::HuggingFace);
        assert_eq!(config.model.model_name, "cardiffnlp/twitter-roberta-base-sentiment");
        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.news_api.page_size, 50);

        let cli = Cli::try_parse_from(["fnd", "analyze", "--page-size", "500"]).unwrap();
        assert!(apply_overrides(&mut Config::default(), &cli).is_err());
    }

    #[tokio::test]
    async fn test_sample_analysis_writes_csv_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["fnd", "--storage", "memory", "analyze"]).unwrap();
        let config = lexicon_config(dir.path().join("out"));
        analyze(&cli, &sample_args(), &config).await.unwrap();
        let csv = std::fs::read_to_string(dir.path().join("out").join(CSV_FILENAME)).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_default_model_without_token_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from(["fnd", "--storage", "memory", "analyze"]).unwrap();
        let config = Config {
            output_dir: dir.path().join("out"),
            ..Config::default()
        };
        let err = analyze(&cli, &sample_args(), &config).await.unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_storage_failure_after_csv_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = lexicon_config(dir.path().join("out"));
        let manager = AnalysisManager::new(
            Arc::new(SampleSource::new()),
            SentimentScorer::new(create_model(&config.model).unwrap(), config.model.max_input_chars),
            ClickbaitClassifier::new(DEFAULT_CLICKBAIT_PHRASES),
            Arc::new(FailingStorage),
            config.news_api.page_size,
        );

        let err = analyze_with(&manager, &sample_args(), &config).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        let csv = std::fs::read_to_string(dir.path().join("out").join(CSV_FILENAME)).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }
}
