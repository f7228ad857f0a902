use journalism_advisor::application::controllers::{
    health_controller::{health_handler, root_handler},
    mcp_controller::AdvisorServer,
    terminal_controller::run_terminal,
};
use journalism_advisor::models::{AdvisorConfig, DEFAULT_ESTIMATED_TOTAL_STEPS};
use journalism_advisor::services::{AdvisorSession, DecisionTree, ProgressEstimator, ToolCatalog};
use random_source::{RandomSource, SeededRandom, ThreadRandom};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::service::QuitReason;
use rmcp::transport::{stdio, IntoTransport};
use rmcp::{serve_server, RoleServer};
use axum::routing::get;
use tower::ServiceBuilder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Parser)]
#[command(name = "journalism_advisor")]
#[command(about = "Journalism AI Advisor - recommends AI tools and prompts for newsroom tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Decision tree JSON file (default: built-in journalism tree)
    #[arg(long, env = "ADVISOR_TREE", global = true)]
    tree: Option<PathBuf>,

    /// Tool profile JSON file (default: built-in catalog)
    #[arg(long, env = "ADVISOR_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Expected number of questions, used to estimate progress
    #[arg(long, env = "ADVISOR_ESTIMATED_STEPS", default_value_t = DEFAULT_ESTIMATED_TOTAL_STEPS, global = true)]
    estimated_steps: u32,

    /// Host address to bind to (default: 0.0.0.0)
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind to (default: 8080)
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Run MCP server in stdio mode
    Stdio,
    /// Run MCP server in HTTP mode (default)
    Http {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
    /// Answer the questionnaire in this terminal
    Interactive {
        /// Seed for "surprise me" picks, for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Load and validate the decision tree, then print its statistics
    Validate,
}

/// Everything loaded once at start-up and shared by all sessions.
struct Resources {
    tree: Arc<DecisionTree>,
    catalog: Arc<ToolCatalog>,
    progress: ProgressEstimator,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Interactive { .. }) => "warn",
        _ => "info",
    };
    init_tracing(default_level);

    let mut config = AdvisorConfig::new(cli.estimated_steps)?;
    if let Some(path) = cli.tree {
        config = config.with_tree_path(path);
    }
    if let Some(path) = cli.catalog {
        config = config.with_catalog_path(path);
    }

    match cli.command {
        Some(Commands::Stdio) => run_stdio_mode(load_resources(&config)?),
        Some(Commands::Http { host, port }) => {
            run_http(load_resources(&config)?, &host.unwrap_or(cli.host), port.unwrap_or(cli.port))
        }
        Some(Commands::Interactive { seed }) => {
            let resources = load_resources(&config)?;
            match seed {
                Some(seed) => run_interactive_mode(resources, &mut SeededRandom::from_seed(seed)),
                None => run_interactive_mode(resources, &mut ThreadRandom),
            }
        }
        Some(Commands::Validate) => run_validate_mode(&config),
        None => run_http(load_resources(&config)?, &cli.host, cli.port), // Default to HTTP mode
    }
}

/// Logs go to stderr so the stdio transport keeps stdout to itself.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_tree(config: &AdvisorConfig) -> anyhow::Result<DecisionTree> {
    let tree = match config.tree_path {
        Some(ref path) => DecisionTree::from_path(path)?,
        None => DecisionTree::builtin()?,
    };
    Ok(tree)
}

fn load_resources(config: &AdvisorConfig) -> anyhow::Result<Resources> {
    let tree = load_tree(config)?;
    let catalog = match config.catalog_path {
        Some(ref path) => ToolCatalog::from_path(path)?,
        None => ToolCatalog::builtin()?,
    };
    let progress = ProgressEstimator::from_config(config)?;

    info!(
        nodes = tree.len(),
        profiles = catalog.profiles().len(),
        estimated_steps = progress.estimated_total_steps(),
        "Advisor resources loaded"
    );

    Ok(Resources {
        tree: Arc::new(tree),
        catalog: Arc::new(catalog),
        progress,
    })
}

fn run_validate_mode(config: &AdvisorConfig) -> anyhow::Result<()> {
    let tree = match load_tree(config) {
        Ok(tree) => tree,
        Err(e) => {
            error!(error = %e, "Decision tree is invalid");
            return Err(e);
        }
    };
    let stats = tree.stats()?;
    println!("Decision tree is valid");
    print!("{}", stats);
    Ok(())
}

fn run_interactive_mode<S: RandomSource>(resources: Resources, random: &mut S) -> anyhow::Result<()> {
    let mut session = AdvisorSession::new(resources.tree, resources.catalog, resources.progress);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_terminal(&mut session, stdin.lock(), &mut stdout, random)?;
    Ok(())
}

fn run_http(resources: Resources, host: &str, port: u16) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(run_http_mode(resources, host, port))
}

fn run_stdio_mode(resources: Resources) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        info!("Journalism AI Advisor MCP server starting in stdio mode");

        let server = AdvisorServer::new(resources.tree, resources.catalog, resources.progress);
        let reason = serve_until_closed(server, stdio()).await?;
        info!(reason = ?reason, "MCP stdio transport closed");

        Ok(())
    })
}

/// Serves one MCP client until the transport closes.
/// Initialization failures and a crashed service task are both errors.
async fn serve_until_closed<T, E, A>(server: AdvisorServer, transport: T) -> anyhow::Result<QuitReason>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let running_service = serve_server(server, transport).await?;
    let reason = running_service.waiting().await?;
    Ok(reason)
}

async fn run_http_mode(resources: Resources, host: &str, port: u16) -> anyhow::Result<()> {
    let bind_address = format!("{}:{}", host, port);

    // Each MCP session gets its own server instance, and with it its own navigation state
    let Resources { tree, catalog, progress } = resources;
    let service = StreamableHttpService::new(
        move || Ok(AdvisorServer::new(tree.clone(), catalog.clone(), progress)),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    // Set up a permissive CORS layer for development
    let cors_layer = ServiceBuilder::new().layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", service)
        .route("/health", get(health_handler))
        .route("/", get(root_handler));

    let tcp_listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(address = %bind_address, "Journalism AI Advisor MCP server starting");
    info!("MCP endpoint: http://{}/mcp", bind_address);
    info!("Health check: http://{}/health", bind_address);

    let app = router.layer(cors_layer);
    axum::serve(tcp_listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Graceful shutdown signal received");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
