use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use pdf_audio_reader::audio::output::{write_segments, Manifest};
use pdf_audio_reader::cli::Cli;
use pdf_audio_reader::config::constants::PREVIEW_CHARS;
use pdf_audio_reader::config::ReaderConfig;
use pdf_audio_reader::error::{ReaderError, Result};
use pdf_audio_reader::logging::{init_logging, log_platform_info, LogConfig};
use pdf_audio_reader::progress::TerminalProgress;
use pdf_audio_reader::services::conversion::{convert_pdf, ConversionRequest};
use pdf_audio_reader::session::Session;
use pdf_audio_reader::tts::{select_voice, ElevenLabsClient, ElevenLabsConfig, SpeechProvider};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (silently ignore if it doesn't)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Progress bars carry the interactive output; the console only shows warnings
    // unless RUST_LOG says otherwise
    let log_config = LogConfig::from_env().quiet();
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };
    log_platform_info();

    let mut config = ReaderConfig::from_env();
    cli.apply(&mut config);

    match run(&cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: ReaderConfig) -> Result<()> {
    let mut session = Session::new(&config);
    if let Some(api_key) = cli.api_key_override() {
        session.set_api_key(api_key);
    }
    if !session.has_api_key() {
        return Err(ReaderError::MissingApiKey);
    }

    let client = ElevenLabsClient::new(ElevenLabsConfig {
        api_key: session.api_key().to_string(),
        ..ElevenLabsConfig::from_reader_config(&config)
    })?;

    let voices = client.list_voices().await?;

    if cli.list_voices {
        for voice in &voices {
            match &voice.category {
                Some(category) => println!("{:<24} {} ({})", voice.name, voice.voice_id, category),
                None => println!("{:<24} {}", voice.name, voice.voice_id),
            }
        }
        return Ok(());
    }

    let voice = select_voice(&voices, cli.voice.as_deref())?;

    let Some(path) = cli.pdf.as_deref() else {
        return Err(ReaderError::InvalidPdf("no PDF file given".to_string()));
    };
    let pdf_bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = ?path, error = %e, "Failed to read PDF");
        ReaderError::Io(e)
    })?;
    let file_name = display_name(path);

    let mut progress = TerminalProgress::new();
    if cli.preview {
        progress = progress.with_preview(PREVIEW_CHARS);
    }

    let request = ConversionRequest::new(&file_name, &pdf_bytes, voice, &config);
    let output = match convert_pdf(&mut session, &client, request, &mut progress).await {
        Ok(output) => {
            progress.complete();
            output
        }
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    let manifest = Manifest::new(
        &output.file_name,
        &output.voice.name,
        &output.model_id,
        &output.segments,
    );
    let written = write_segments(&config.output_dir, &manifest, &output.segments).await?;

    println!(
        "Converted {} into {} audio part(s) with voice {}:",
        output.file_name,
        written.len(),
        output.voice.name
    );
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}

/// File name used to label the audio parts
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string())
}
