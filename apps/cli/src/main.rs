use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use asciify::client::{Gateway, HttpGateway, DEFAULT_GATEWAY_URL};
use asciify::models::{FontName, GenerationResult, Justify, DEFAULT_WIDTH, WIDTH_MAX, WIDTH_MIN};
use asciify::session::browser::DEFAULT_PREVIEW_TEXT;
use asciify::session::generator::{DEFAULT_FONT, DEFAULT_TEXT};
use asciify::session::{FontBrowser, GeneratorSession, Notice, PreviewOutcome, RandomSession};

#[derive(Parser)]
#[command(name = "asciify", about = "Turn text into ASCII art through the asciify gateway")]
struct Cli {
    /// Gateway base address
    #[arg(long, global = true, env = "ASCIIFY_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway: String,
    /// Seconds to wait for a single gateway call
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render text with a chosen font and layout
    Generate {
        #[arg(short, long, default_value = DEFAULT_TEXT)]
        text: String,
        #[arg(short, long, default_value = DEFAULT_FONT)]
        font: String,
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_WIDTH,
            value_parser = clap::value_parser!(u32).range(WIDTH_MIN as i64..=WIDTH_MAX as i64)
        )]
        width: u32,
        #[arg(short, long, value_enum, default_value_t = JustifyArg::Center)]
        justify: JustifyArg,
    },
    /// List fonts, optionally filtered, and preview one
    Fonts {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        preview: Option<String>,
        #[arg(long, default_value = DEFAULT_PREVIEW_TEXT)]
        preview_text: String,
    },
    /// Render random art; with --text only the font is random
    Random {
        #[arg(short, long, default_value = "")]
        text: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum JustifyArg {
    Left,
    Center,
    Right,
}

impl From<JustifyArg> for Justify {
    fn from(arg: JustifyArg) -> Self {
        match arg {
            JustifyArg::Left => Justify::Left,
            JustifyArg::Center => Justify::Center,
            JustifyArg::Right => Justify::Right,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", env!("CARGO_CRATE_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let gateway: Arc<dyn Gateway> = Arc::new(
        HttpGateway::new(cli.gateway.clone(), Duration::from_secs(cli.timeout))
            .context("failed to build HTTP client")?,
    );

    match cli.command {
        Cmd::Generate {
            text,
            font,
            width,
            justify,
        } => {
            let session = GeneratorSession::new(gateway);
            if session.load_fonts().await.is_err() {
                report(session.take_notice());
            }

            let font = FontName::from(font);
            if !session.snapshot().fonts.contains(&font) {
                warn!("{font} is not in the font catalog; sending it anyway");
            }
            session.set_text(text);
            session.set_font(font);
            session.set_width(width);
            session.set_justify(justify.into());

            let outcome = session.generate().await;
            report(session.take_notice());
            print_art("Result", &outcome?);
        }
        Cmd::Fonts {
            search,
            preview,
            preview_text,
        } => {
            let browser = FontBrowser::new(gateway);
            let loaded = browser.load_fonts().await;
            report(browser.take_notice());
            loaded?;

            browser.set_search_term(search);
            let filtered = browser.filtered();
            for font in &filtered {
                println!("{font}");
            }
            println!("{} fonts available", filtered.len());

            if let Some(font) = preview {
                browser.set_preview_text(preview_text);
                let outcome = browser.preview_font(FontName::from(font.as_str())).await;
                report(browser.take_notice());
                if let PreviewOutcome::Shown(result) = outcome? {
                    println!();
                    println!("Preview of \"{font}\" font");
                    println!("{}", result.ascii_art);
                }
            }
        }
        Cmd::Random { text } => {
            let session = RandomSession::new(gateway);
            session.set_custom_text(text);
            eprintln!("{}", session.mode().hint());

            let outcome = session.generate_random().await;
            report(session.take_notice());
            print_art("Random ASCII Art", &outcome?);
        }
    }

    Ok(())
}

fn report(notice: Option<Notice>) {
    if let Some(notice) = notice {
        eprintln!("{}: {}", notice.title, notice.description);
    }
}

fn print_art(heading: &str, result: &GenerationResult) {
    println!("{heading} (Font: {})", result.font_used);
    println!("{}", result.ascii_art);
}
