use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{bail, eyre, Result};
use locsync_domain::{PassStatus, RowOutcome, SyncRunReport};
use locsync_services::sync::{missing_targets, run_sync, CancelFlag, SyncOptions, DEFAULT_TIMEOUT_MS};
use locsync_translate::{make_translator, Provider, ProviderOptions};

#[allow(clippy::too_many_arguments)]
pub async fn run_fill(
    csv: PathBuf,
    source_lang: Option<String>,
    provider: Option<String>,
    out: Option<PathBuf>,
    backup: bool,
    timeout_ms: Option<u64>,
    no_cache: bool,
    format: String,
    dry_run: bool,
    use_color: bool,
) -> Result<()> {
    tracing::debug!(event = "fill_args", csv = ?csv, source_lang = ?source_lang, provider = ?provider, timeout_ms = ?timeout_ms, dry_run = dry_run);

    let cfg = locsync_config::load_config().unwrap_or_default();

    let Some(source) = super::resolve_source_lang(source_lang) else {
        crate::ui_err!(
            "no source language: pass --source-lang or set `source_lang` in locsync.toml"
        );
        std::process::exit(2);
    };

    let mut table = locsync_csv::read_table_from_path(&csv)?;
    if !table.has_language(&source) {
        bail!(
            "source language `{source}` is not a column of {} (have: {})",
            csv.display(),
            table.languages().join(", ")
        );
    }

    if dry_run {
        let mut rows_planned = 0usize;
        let mut cells_planned = 0usize;
        for idx in 0..table.len() {
            if table.get(idx, &source).unwrap_or_default().is_empty() {
                continue;
            }
            let targets = missing_targets(&table, idx, &source);
            if targets.is_empty() {
                continue;
            }
            println!(
                "  {}  → {}",
                table.key(idx).unwrap_or_default(),
                targets.join(", ")
            );
            rows_planned += 1;
            cells_planned += targets.len();
        }
        println!("DRY-RUN: would request {cells_planned} cell(s) across {rows_planned} row(s)");
        return Ok(());
    }

    let provider: Provider = provider
        .or_else(|| cfg.provider.clone())
        .unwrap_or_else(|| "google".to_string())
        .parse()
        .map_err(|e: String| eyre!(e))?;
    let timeout_ms = timeout_ms.or(cfg.timeout_ms).unwrap_or(DEFAULT_TIMEOUT_MS);
    let translate_cfg = cfg.translate.clone().unwrap_or_default();
    let translator = make_translator(&ProviderOptions {
        provider,
        timeout_ms,
        cache_size: if no_cache {
            0
        } else {
            cfg.cache_size.unwrap_or(1024)
        },
        google_endpoint: translate_cfg.google_endpoint,
        libre_endpoint: translate_cfg.libre_endpoint,
        libre_api_key: translate_cfg.libre_api_key,
    })?;

    let opts = SyncOptions {
        timeout: Duration::from_millis(timeout_ms),
        cancel: CancelFlag::new(),
    };
    {
        let cancel = opts.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                crate::ui_warn!("stopping after the current row…");
                cancel.cancel();
            }
        });
    }

    let total_rows = table.len();
    let run = run_sync(&mut table, &source, translator.as_ref(), &opts).await?;

    // даже прерванный проход сохраняет уже заполненные ячейки
    let backup = backup || cfg.fill.as_ref().and_then(|f| f.backup).unwrap_or(false);
    let out = out.or_else(|| {
        cfg.fill
            .as_ref()
            .and_then(|f| f.out.clone())
            .map(PathBuf::from)
    });
    let target = super::save_table(&csv, out, backup, &table)?;
    crate::ui_ok!("saved {}", target.display());

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &run.report)?;
        return Ok(());
    }
    render_text(&run.report, total_rows, use_color);
    Ok(())
}

fn render_text(report: &SyncRunReport, total_rows: usize, use_color: bool) {
    for row in &report.outcomes {
        match &row.outcome {
            RowOutcome::PartiallyFailed { failures, .. } => {
                for f in failures {
                    if use_color {
                        use owo_colors::OwoColorize;
                        println!("⚠ {} [{}]: {}", row.key.green(), f.lang.yellow(), f.reason);
                    } else {
                        println!("⚠ {} [{}]: {}", row.key, f.lang, f.reason);
                    }
                }
            }
            RowOutcome::Failed { reason } => {
                if use_color {
                    use owo_colors::OwoColorize;
                    println!("✖ {}: {}", row.key.red(), reason);
                } else {
                    println!("✖ {}: {}", row.key, reason);
                }
            }
            RowOutcome::Skipped | RowOutcome::Succeeded { .. } => {}
        }
    }

    let s = &report.summary;
    let marker = if s.partial == 0 && s.failed == 0 {
        "✔"
    } else {
        "⚠"
    };
    println!(
        "{} filled {} cell(s) in {} row(s): {} ok, {} partial, {} failed, {} skipped",
        marker, s.cells_filled, s.rows, s.succeeded, s.partial, s.failed, s.skipped
    );
    if report.status == PassStatus::Cancelled {
        println!("⚠ pass cancelled after {} of {} row(s)", s.rows, total_rows);
    }
}
