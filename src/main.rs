use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use deckboard::config::{mapbox_api_token, DemoConfig};
use deckboard::demos::Demo;
use deckboard::{common, export, gallery, server};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve a demo scene as a single-page app
    Serve {
        #[clap(short, long, value_enum)]
        demo: Demo,
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Write a demo's scene document to a file
    Render {
        #[clap(short, long, value_enum)]
        demo: Demo,
        #[clap(short, long)]
        output: String,
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Serve a directory of pre-rendered screenshots as a gallery
    Gallery {
        #[clap(short, long)]
        dir: String,
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve { demo, port, config } => {
            let config = DemoConfig::load(config.as_deref())?;
            info!("Serving demo: {}", demo.name());
            let page = demo.load(&config).await?;
            let app = server::app::create_demo_app(
                &page,
                mapbox_api_token().as_deref(),
                config.cors_origin.as_deref(),
            )?;
            server::start_server(port.unwrap_or(config.port), app).await?;
        }
        Commands::Render {
            demo,
            output,
            config,
        } => {
            let config = DemoConfig::load(config.as_deref())?;
            info!("Rendering demo scene: {}", demo.name());
            let page = demo.load(&config).await?;
            let document = export::to_json::render(&page.deck)
                .map_err(|e| anyhow::anyhow!("failed to render scene: {}", e))?;
            common::write_string_to_file(&output, &document)?;
            info!("Scene written to {}", output);
        }
        Commands::Gallery { dir, port, config } => {
            let config = DemoConfig::load(config.as_deref())?;
            info!("Serving gallery from {}", dir);
            let images = gallery::load_images(std::path::Path::new(&dir))?;
            let app = server::app::create_gallery_app(&images, config.cors_origin.as_deref())?;
            server::start_server(port.unwrap_or(config.port), app).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
