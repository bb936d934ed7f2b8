//! EDD Mini API server
//!
//! Serves a customer's purchased add-ons and signed download links over HTTP:
//!   ema-server serve --catalog site.json --meta-db meta.db --signing-secret ...
//!
//! Issue (or look up) a customer's API keys:
//!   ema-server keys --catalog site.json --meta-db meta.db --user jane@example.com

use std::{fs, path::PathBuf, sync::Arc};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use ema_api::{build_router, ApiState, SiteCatalog, ADDONS_ROUTE};
use ema_auth::{
    compute_hash, resolve_user, CredentialStore, MemoryMetaStore, SqliteMetaStore,
    UserIdentifier, UserMetaStore,
};
use ema_commerce::{PurchaseReporter, SignedUrlIssuer, DEFAULT_LINK_TTL_SECS};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ema-server")]
#[command(about = "EDD Mini API: customer add-ons and download links")]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SiteArgs {
    /// JSON catalog with user accounts and commerce records
    #[arg(long, env = "EMA_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// SQLite file holding user meta (API keys); in-memory when omitted
    #[arg(long, env = "EMA_META_DB", global = true)]
    meta_db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// Print a user's API keys, issuing them if needed
    Keys {
        /// Email address or numeric id of the user
        #[arg(long)]
        user: String,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "EMA_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Base URL download links are issued under
    #[arg(long, env = "EMA_DOWNLOAD_BASE", default_value = "http://127.0.0.1:8080/")]
    download_base: String,

    /// Secret used to sign download links
    #[arg(long, env = "EMA_SIGNING_SECRET", hide_env_values = true)]
    signing_secret: String,

    /// Lifetime of issued download links, in seconds
    #[arg(long, default_value_t = DEFAULT_LINK_TTL_SECS)]
    link_ttl_secs: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let catalog = load_catalog(cli.site.catalog.as_ref())?;
    let meta = open_meta_store(cli.site.meta_db.as_ref())?;

    match cli.command {
        Command::Serve(args) => serve(args, catalog, meta).await,
        Command::Keys { user } => print_keys(&user, catalog, meta),
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<SiteCatalog> {
    let Some(path) = path else {
        warn!("No catalog given; serving an empty site");
        return Ok(SiteCatalog::default());
    };
    info!("Loading catalog from {:?}", path);
    let json = fs::read_to_string(path).context("Failed to read catalog file")?;
    SiteCatalog::from_json(&json).context("Failed to parse catalog file")
}

fn open_meta_store(path: Option<&PathBuf>) -> Result<Arc<dyn UserMetaStore>> {
    match path {
        Some(path) => {
            info!("Opening meta store at {:?}", path);
            let store = SqliteMetaStore::open(path).context("Failed to open meta store")?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("No meta store given; API keys will not survive a restart");
            Ok(Arc::new(MemoryMetaStore::new()))
        }
    }
}

async fn serve(args: ServeArgs, catalog: SiteCatalog, meta: Arc<dyn UserMetaStore>) -> Result<()> {
    let (users, commerce) = catalog.into_services().context("Invalid catalog")?;
    info!("Catalog holds {} user accounts", users.len());

    let link_ttl = chrono::Duration::try_seconds(args.link_ttl_secs)
        .with_context(|| format!("Link ttl of {} seconds is out of range", args.link_ttl_secs))?;
    let issuer = SignedUrlIssuer::new(
        &args.download_base,
        args.signing_secret.into_bytes(),
        link_ttl,
    )
    .context("Invalid download link settings")?;

    let state = Arc::new(ApiState::new(
        Arc::new(users),
        CredentialStore::new(meta),
        PurchaseReporter::new(Arc::new(commerce), Arc::new(issuer)),
    ));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let local_addr = listener.local_addr().context("Failed to read local address")?;

    println!("\n========================================");
    println!("  EDD Mini API Running");
    println!("========================================");
    println!("  Listening: http://{}", local_addr);
    println!("  Route:     GET {}", ADDONS_ROUTE);
    println!("========================================\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
        })
        .await
        .context("HTTP server failed")
}

fn print_keys(user: &str, catalog: SiteCatalog, meta: Arc<dyn UserMetaStore>) -> Result<()> {
    let (users, _) = catalog.into_services().context("Invalid catalog")?;
    let identifier = UserIdentifier::parse(user)
        .ok_or_else(|| anyhow!("'{user}' is neither an email address nor a user id"))?;
    let account = resolve_user(&users, &identifier).context("Unknown user")?;
    let credential = CredentialStore::new(meta)
        .get_or_create(&account)
        .context("Failed to load API keys")?;

    println!("user:        {} ({})", account.email, account.id);
    println!("api_key:     {}", credential.public_key);
    println!("private_key: {}", credential.private_key);
    println!(
        "api_token:   {}",
        compute_hash(&credential.public_key, &credential.private_key)
    );
    Ok(())
}
