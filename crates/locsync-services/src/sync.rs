use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use locsync_core::LocTable;
use locsync_domain::{
    LanguageFailure, PassStatus, RowOutcome, RowReport, SyncRunReport, SyncSummary, SCHEMA_VERSION,
};
use locsync_translate::{translate_all, Translator};
use thiserror::Error;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source language `{0}` is not a column of this table")]
    InvalidSourceLanguage(String),
}

/// Cooperative stop switch. Flipping it does not interrupt the row in
/// flight; the pass checks it before starting the next row.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Budget for one row's provider call; elapsing it fails the row.
    pub timeout: Duration,
    pub cancel: CancelFlag,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cancel: CancelFlag::new(),
        }
    }
}

/// Failing rows collected during a pass, in row order. Skipped and fully
/// succeeded rows are never recorded here.
#[derive(Debug, Default)]
pub struct SyncErrorLog {
    entries: Vec<(String, RowOutcome)>,
}

impl SyncErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, outcome: &RowOutcome) {
        if matches!(
            outcome,
            RowOutcome::PartiallyFailed { .. } | RowOutcome::Failed { .. }
        ) {
            self.entries.push((key.to_string(), outcome.clone()));
        }
    }

    pub fn snapshot(&self) -> &[(String, RowOutcome)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a finished (or cancelled) pass produced.
#[derive(Debug)]
pub struct SyncRun {
    pub report: SyncRunReport,
    pub errors: SyncErrorLog,
}

/// Languages whose cell in `row` is still empty, excluding the source
/// language. Order follows the table header.
pub fn missing_targets(table: &LocTable, row: usize, source_lang: &str) -> Vec<String> {
    table
        .languages()
        .iter()
        .filter(|lang| lang.as_str() != source_lang)
        .filter(|lang| {
            table
                .get(row, lang)
                .map(|cell| cell.is_empty())
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Runs one fill pass over the whole table.
///
/// Rows are visited top to bottom, one provider call per row covering all
/// of its missing languages. A failing row never aborts the pass; merged
/// cells stay merged even when the pass is cancelled half-way.
pub async fn run_sync(
    table: &mut LocTable,
    source_lang: &str,
    translator: &dyn Translator,
    opts: &SyncOptions,
) -> Result<SyncRun, SyncError> {
    if !table.has_language(source_lang) {
        return Err(SyncError::InvalidSourceLanguage(source_lang.to_string()));
    }

    let mut outcomes: Vec<RowReport> = Vec::with_capacity(table.len());
    let mut summary = SyncSummary::default();
    let mut errors = SyncErrorLog::new();
    let mut status = PassStatus::Completed;

    for idx in 0..table.len() {
        if opts.cancel.is_cancelled() {
            status = PassStatus::Cancelled;
            break;
        }
        let key = table.key(idx).unwrap_or_default().to_string();
        let row = sync_row(table, idx, source_lang, translator, opts).await;
        tracing::debug!(
            event = "sync_row",
            row = idx,
            key = %key,
            outcome = ?row.outcome,
            filled = row.filled,
            "row processed"
        );
        match &row.outcome {
            RowOutcome::Skipped => summary.skipped += 1,
            RowOutcome::Succeeded { .. } => summary.succeeded += 1,
            RowOutcome::PartiallyFailed { .. } => summary.partial += 1,
            RowOutcome::Failed { .. } => summary.failed += 1,
        }
        summary.cells_filled += row.filled;
        summary.cells_failed += row.failed;
        errors.record(&key, &row.outcome);
        outcomes.push(RowReport {
            row: idx,
            key,
            outcome: row.outcome,
        });
    }
    summary.rows = outcomes.len();

    Ok(SyncRun {
        report: SyncRunReport {
            schema_version: SCHEMA_VERSION,
            status,
            outcomes,
            summary,
        },
        errors,
    })
}

struct RowSync {
    outcome: RowOutcome,
    filled: usize,
    failed: usize,
}

async fn sync_row(
    table: &mut LocTable,
    idx: usize,
    source_lang: &str,
    translator: &dyn Translator,
    opts: &SyncOptions,
) -> RowSync {
    let source_text = table.get(idx, source_lang).unwrap_or_default().to_string();
    let targets = missing_targets(table, idx, source_lang);
    if source_text.is_empty() || targets.is_empty() {
        return RowSync {
            outcome: RowOutcome::Skipped,
            filled: 0,
            failed: 0,
        };
    }

    let call = translate_all(translator, &source_text, source_lang, &targets);
    let result = match tokio::time::timeout(opts.timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            return RowSync {
                outcome: RowOutcome::Failed {
                    reason: err.to_string(),
                },
                filled: 0,
                failed: targets.len(),
            }
        }
        Err(_) => {
            return RowSync {
                outcome: RowOutcome::Failed {
                    reason: format!("provider call timed out after {}ms", opts.timeout.as_millis()),
                },
                filled: 0,
                failed: targets.len(),
            }
        }
    };

    // merge: only cells that are still empty receive a value
    let mut filled: Vec<String> = Vec::new();
    for (lang, text) in &result.translated {
        let still_empty = table
            .get(idx, lang)
            .map(|cell| cell.is_empty())
            .unwrap_or(false);
        if still_empty && table.set_cell(idx, lang, text.clone()).is_ok() {
            filled.push(lang.clone());
        }
    }

    let failures: Vec<LanguageFailure> = result
        .failed
        .iter()
        .map(|(lang, err)| LanguageFailure {
            lang: lang.clone(),
            reason: err.to_string(),
        })
        .collect();

    let filled_count = filled.len();
    let failed_count = failures.len();
    let outcome = if failures.is_empty() {
        RowOutcome::Succeeded { filled }
    } else if !filled.is_empty() {
        RowOutcome::PartiallyFailed { filled, failures }
    } else {
        // nothing merged at all, e.g. the network was down for every language
        let reason = failures
            .iter()
            .map(|f| format!("{}: {}", f.lang, f.reason))
            .collect::<Vec<_>>()
            .join("; ");
        RowOutcome::Failed { reason }
    };

    RowSync {
        outcome,
        filled: filled_count,
        failed: failed_count,
    }
}
