use clap::{Parser, Subcommand};
use output_gal::config::{self, PushFormat};
use output_gal::push;
use output_gal::server::GalleryServer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "output-gal")]
#[command(about = "Gallery server for image-generation output directories")]
#[command(long_about = "\
Gallery server for image-generation output directories

Point `serve` at the folder your generation pipeline writes into and browse
it as a paginated HTML gallery with lazy-loaded thumbnails. Every request
re-reads the directory, so the page always reflects what is on disk right
now. Any path other than the gallery page serves raw file bytes from the
same directory.

`push` streams image files to a remote endpoint over a WebSocket,
base64-encoded inside JSON envelopes, for receivers that want generated
images delivered instead of browsed.

Configuration lives in gallery.toml (run 'output-gal gen-config' for a
documented stock file); flags override file values.")]
#[command(version = version_string())]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Shared overrides for the gallery server.
#[derive(clap::Args, Clone)]
struct ServeArgs {
    /// TCP port to bind on all interfaces
    #[arg(long)]
    port: Option<u16>,

    /// Gallery directory to serve
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Images per gallery page
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(clap::Args, Clone)]
struct PushArgs {
    /// Image files to push, in send order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// WebSocket endpoint (http/https URLs are converted)
    #[arg(long)]
    endpoint: Option<String>,

    /// Wire format images are re-encoded to
    #[arg(long, value_enum)]
    format: Option<PushFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the gallery directory over HTTP
    Serve(ServeArgs),
    /// Push image files to a remote endpoint over a WebSocket
    Push(PushArgs),
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Serve(args) => {
            if let Some(port) = args.port {
                config.server.port = port;
            }
            if let Some(directory) = args.directory {
                config.server.directory = directory;
            }
            if let Some(page_size) = args.page_size {
                config.server.page_size = page_size;
            }
            config.validate()?;

            let server = GalleryServer::new(config.server);
            // Standalone binary: block on the server thread until it dies.
            if let Some(handle) = server.start_background() {
                handle
                    .join()
                    .map_err(|_| "gallery server thread panicked")?;
            }
        }
        Command::Push(args) => {
            if let Some(endpoint) = args.endpoint {
                config.push.endpoint = endpoint;
            }
            if let Some(format) = args.format {
                config.push.format = format;
            }

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let sent = runtime.block_on(push::push_images(
                &config.push.endpoint,
                &args.files,
                config.push.format,
            ))?;
            println!("Pushed {} images to {}", sent, config.push.endpoint);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
