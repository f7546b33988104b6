//! universalia — HTTP server for the translator UI.
//!
//! ```text
//! API_KEY=... universalia [--port 2004] [--host 127.0.0.1] [--voice Kore]
//! ```

use clap::Parser;
use tracing::{error, info, warn};

use universalia_lib::client::GeminiClient;
use universalia_lib::playback::RodioOutput;
use universalia_lib::session::TranslatorSession;
use universalia_lib::universalia_core::types::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_SPEECH_MODEL, DEFAULT_TRANSLATION_MODEL,
    DEFAULT_VOICE,
};

/// universalia — Chinese ⇄ Universalia translator backed by Gemini
#[derive(Parser)]
#[command(name = "universalia", version, about)]
struct Cli {
    /// Listen port
    #[arg(long, default_value = "2004")]
    port: u16,
    /// Listen host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Gemini API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Model used for structured translation
    #[arg(long, default_value = DEFAULT_TRANSLATION_MODEL)]
    translation_model: String,
    /// Model used for speech synthesis
    #[arg(long, default_value = DEFAULT_SPEECH_MODEL)]
    speech_model: String,
    /// Prebuilt TTS voice
    #[arg(long, default_value = DEFAULT_VOICE)]
    voice: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "universalia=info,universalia_lib=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        base_url: cli.base_url,
        translation_model: cli.translation_model,
        speech_model: cli.speech_model,
        voice: cli.voice,
        ..ClientConfig::from_env()
    };
    if config.credential().is_none() {
        warn!("API_KEY is not set; every translation will fail until it is");
    }

    let session = TranslatorSession::new(GeminiClient::new(config), RodioOutput::default());
    let app = universalia_lib::server::router(session);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("universalia listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
