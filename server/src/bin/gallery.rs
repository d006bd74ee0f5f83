use std::{net::SocketAddr, sync::Arc};

use camino::Utf8PathBuf as PathBuf;
use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

use gallery::{
    app_state::{AppState, SharedState},
    opener::SystemOpener,
    routes,
    terminal::{FileTarget, TerminalInteraction},
};
use gallery_core::{
    config::{self, Config},
    controller::{PageState, RenderOutcome},
    model::{AssetId, UploadForm},
    render::HtmlBuffer,
    search::SearchHandle,
    GalleryController, HttpAssetApi,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    config: Option<String>,
    /// Backend base url, overrides the config file
    #[arg(long)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the gallery page
    Serve,
    /// Render the asset list once
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Read search text from stdin line by line and keep rerendering into a file
    Watch {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "gallery.html")]
        out: String,
    },
    Upload {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        link: String,
        #[arg(long, default_value = "")]
        uploader: String,
    },
    Delete {
        id: String,
    },
    /// Open an asset's download link
    Download {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "1");
    }
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::from_env("GALLERY_LOG"))
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => config::read_config(&PathBuf::from(path.as_str())).await?,
        None => Config::default(),
    };
    if let Some(api_base) = &args.api_base {
        config.api_base = config::parse_api_base(api_base)?;
    }
    let api = HttpAssetApi::new(config.api_base.clone());

    match args.command {
        Command::Serve => serve(config, api).await,
        Command::List { category, search } => {
            let controller =
                GalleryController::new(api, HtmlBuffer::new(), PageState::new(category, search));
            controller.refresh().await;
            println!("{}", controller.target().contents());
            Ok(())
        }
        Command::Watch { category, out } => watch(config, api, category, out).await,
        Command::Upload {
            name,
            category,
            link,
            uploader,
        } => {
            let controller =
                GalleryController::new(api, HtmlBuffer::new(), PageState::default());
            let mut form = UploadForm {
                is_open: true,
                name,
                category,
                link,
                uploader,
            };
            controller
                .create(&TerminalInteraction::stdin(), &mut form)
                .await;
            Ok(())
        }
        Command::Delete { id } => {
            let controller =
                GalleryController::new(api, HtmlBuffer::new(), PageState::default());
            let id = AssetId::from(id);
            let asset = controller
                .find_asset(&id)
                .await
                .wrap_err("error loading assets")?;
            match asset {
                Some(asset) => {
                    controller
                        .delete(&TerminalInteraction::stdin(), &asset.id, &asset.uploader)
                        .await;
                }
                None => println!("No asset with id {}", id),
            }
            Ok(())
        }
        Command::Download { id } => {
            let controller =
                GalleryController::new(api, HtmlBuffer::new(), PageState::default());
            let id = AssetId::from(id);
            let asset = controller
                .find_asset(&id)
                .await
                .wrap_err("error loading assets")?;
            match asset {
                Some(asset) => controller.download(&SystemOpener::default(), &asset.link).await,
                None => {
                    println!("No asset with id {}", id);
                    Ok(())
                }
            }
        }
    }
}

async fn serve(config: Config, api: HttpAssetApi) -> Result<()> {
    info!(api_base = %config.api_base, "Starting up...");
    let shared_state: SharedState = Arc::new(AppState { api: Arc::new(api) });
    let app = routes::router()
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().include_headers(true))
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                ),
        )
        .with_state(shared_state);
    let listener = tokio::net::TcpListener::bind(SocketAddr::new(config.address, config.port))
        .await
        .wrap_err("Error binding socket")?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;
    info!("Shutting down...");
    Ok(())
}

async fn watch(
    config: Config,
    api: HttpAssetApi,
    category: Option<String>,
    out: String,
) -> Result<()> {
    let controller = Arc::new(GalleryController::new(
        api,
        FileTarget::new(PathBuf::from(out.as_str())),
        PageState::new(category, String::new()),
    ));
    let outcome = controller.initial_load().await.0;
    info!(?outcome, out = %out, "initial render");
    let (handle, join) = SearchHandle::new(controller.clone(), config.search_debounce);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.inputs().set_search(line);
        handle.input_changed()?;
    }
    drop(handle);
    let last = join.await.wrap_err("search task failed")?;
    if let Some(RenderOutcome::Failed) = last {
        eprintln!("Failed to load assets from server.");
    }
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("Unable to listen for shutdown signal: {}", err);
            std::process::exit(1);
        }
    }
}
