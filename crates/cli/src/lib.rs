use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, EnvOverrides, Overrides};
use hostel_search::HostelSearch;
use http_api::HttpState;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod http_api;
mod server_security;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "hostel-search")]
#[command(about = "Free-text search over the hostel catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./hostel-search.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read records from a JSON file (env: HOSTEL_STORE_FILE)
    #[arg(long, global = true, conflicts_with = "store_url")]
    store_file: Option<PathBuf>,

    /// Read records from a hosted REST table (env: HOSTEL_STORE_URL)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Include underlying error detail in failure replies (env: HOSTEL_ENV=development)
    #[arg(long, global = true)]
    dev: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the JSON reply
    Search(SearchArgs),

    /// Serve the search API over HTTP (GET /api/search?q=&limit=)
    ServeHttp(ServeArgs),

    /// Print the JSON schema of the search reply
    Schema,
}

#[derive(Args)]
struct SearchArgs {
    /// Search query (blank returns example queries)
    #[arg(default_value = "")]
    query: String,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:7700
    #[arg(long, default_value = "127.0.0.1:7700")]
    bind: String,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for JSON in one-shot mode
    if matches!(cli.command, Commands::Search(_) | Commands::Schema) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let overrides = Overrides {
        config_path: cli.config.clone(),
        store_file: cli.store_file.clone(),
        store_url: cli.store_url.clone(),
        dev: cli.dev,
    };

    match cli.command {
        Commands::Search(args) => run_search(args, &overrides).await?,
        Commands::ServeHttp(args) => serve_http(args, &overrides).await?,
        Commands::Schema => print_stdout(&hostel_protocol::response_schema()?)?,
    }

    Ok(())
}

fn load_engine(overrides: &Overrides) -> Result<(HostelSearch, AppConfig)> {
    let config = AppConfig::load(overrides, &EnvOverrides::from_env())
        .context("Failed to load configuration")?;
    let store = config.build_store()?;
    log::debug!("Using record store: {}", store.describe());
    Ok((HostelSearch::new(store, config.search.clone()), config))
}

async fn run_search(args: SearchArgs, overrides: &Overrides) -> Result<()> {
    let (search, config) = load_engine(overrides)?;
    let (_, response) =
        http_api::execute_search(&search, &args.query, args.limit, config.expose_errors).await;

    let text = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        hostel_protocol::serialize_json(&response)?
    };
    print_stdout(&text)?;

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve_http(args: ServeArgs, overrides: &Overrides) -> Result<()> {
    let addrs = server_security::resolve_guarded_bind_addrs(&args.bind, args.public).await?;
    let (search, config) = load_engine(overrides)?;

    let store = search.store_description();
    let state = Arc::new(HttpState {
        search,
        expose_errors: config.expose_errors,
    });
    let app = http_api::router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    print_stdout(&format!("Serving search API: {base_url}/api/search"))?;
    print_stdout(&format!("Health endpoint: {base_url}/health"))?;
    print_stdout(&format!("Record store: {store}"))?;
    if config.expose_errors {
        print_stdout("Development mode: failure replies include error detail")?;
    }
    if args.public {
        let addrs = addrs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        print_stdout(&format!(
            "Public bind enabled (--public). Resolved addresses: {addrs}"
        ))?;
    }

    print_stdout(&format!("Try: curl '{base_url}/api/search?q=girls&limit=5'"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
