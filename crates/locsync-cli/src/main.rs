use async_trait::async_trait;
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod ui;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Whether ✔/ℹ chatter is suppressed (`--quiet`). Warnings and errors
/// always go through.
pub fn is_quiet() -> bool {
    QUIET.get().copied().unwrap_or(false)
}

#[derive(Parser)]
#[command(
    name = "locsync",
    version,
    about = "Keep CSV localization tables in sync (Rust)"
)]
struct Cli {
    /// Выключить цветной вывод
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress ✔/ℹ output, keep warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Заполнить пустые ячейки машинным переводом
    Fill {
        /// CSV table: key column first, then one column per language
        #[arg(short, long)]
        csv: PathBuf,
        /// Language column that already holds the text to translate
        #[arg(long)]
        source_lang: Option<String>,
        /// dummy | google | libre
        #[arg(long)]
        provider: Option<String>,
        /// Where to write the result (default: over --csv)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        backup: bool,
        /// Budget for one row's provider call, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long, default_value_t = false)]
        no_cache: bool,
        /// text | json
        #[arg(long, default_value = "text")]
        format: String,
        /// Show what would be requested without calling the provider
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Проверить таблицу на проблемы
    Check {
        #[arg(short, long)]
        csv: PathBuf,
        #[arg(long)]
        source_lang: Option<String>,
        /// text | json
        #[arg(long, default_value = "text")]
        format: String,
        /// Exit non-zero when issues were found
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Добавить колонку языка
    AddLang {
        #[arg(short, long)]
        csv: PathBuf,
        #[arg(long)]
        lang: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        backup: bool,
    },

    /// Добавить строку с новым ключом
    AddKey {
        #[arg(short, long)]
        csv: PathBuf,
        /// Key to add (default: generated New_Key_<n>)
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        backup: bool,
    },

    /// Записать значение в одну ячейку
    Set {
        #[arg(short, long)]
        csv: PathBuf,
        #[arg(long)]
        key: String,
        #[arg(long)]
        lang: String,
        #[arg(long)]
        value: String,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        backup: bool,
    },

    /// Выгрузить JSON-схемы отчётов
    Schema {
        #[arg(long, default_value = "")]
        out_dir: PathBuf,
    },
}

#[async_trait]
trait Runnable {
    async fn run(self, use_color: bool) -> Result<()>;
}

#[async_trait]
impl Runnable for Commands {
    async fn run(self, use_color: bool) -> Result<()> {
        let cmd_name = format!("{:?}", self);
        info!("▶ Starting command: {}", cmd_name);

        let result = match self {
            Commands::Fill {
                csv,
                source_lang,
                provider,
                out,
                backup,
                timeout_ms,
                no_cache,
                format,
                dry_run,
            } => {
                commands::fill::run_fill(
                    csv,
                    source_lang,
                    provider,
                    out,
                    backup,
                    timeout_ms,
                    no_cache,
                    format,
                    dry_run,
                    use_color,
                )
                .await
            }
            Commands::Check {
                csv,
                source_lang,
                format,
                strict,
            } => commands::check::run_check(csv, source_lang, format, strict, use_color),
            Commands::AddLang {
                csv,
                lang,
                out,
                backup,
            } => commands::add_lang::run_add_lang(csv, lang, out, backup),
            Commands::AddKey {
                csv,
                key,
                out,
                backup,
            } => commands::add_key::run_add_key(csv, key, out, backup),
            Commands::Set {
                csv,
                key,
                lang,
                value,
                out,
                backup,
            } => commands::set_cell::run_set(csv, key, lang, value, out, backup),
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
        };

        match &result {
            Ok(_) => info!("✔ Finished command: {}", cmd_name),
            Err(e) => error!("✖ Command {} failed: {:?}", cmd_name, e),
        }

        result
    }
}

fn init_tracing(quiet: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "locsync.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_console = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_console)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let _ = QUIET.set(cli.quiet);
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    cli.cmd.run(use_color).await
}
