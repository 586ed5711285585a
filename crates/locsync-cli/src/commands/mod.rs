pub mod add_key;
pub mod add_lang;
pub mod check;
pub mod fill;
pub mod schema;
pub mod set_cell;

use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use locsync_core::LocTable;

/// Resolves the source language: CLI flag first, then locsync.toml. There
/// is no positional fallback; guessing a column would silently translate
/// from the wrong language.
pub(crate) fn resolve_source_lang(flag: Option<String>) -> Option<String> {
    flag.or_else(|| {
        locsync_config::load_config()
            .unwrap_or_default()
            .source_lang
    })
}

/// Writes the table to `out` (or back over `src`), optionally keeping a
/// `.csv.bak` copy of the previous file. Returns the path written to.
pub(crate) fn save_table(
    src: &Path,
    out: Option<PathBuf>,
    backup: bool,
    table: &LocTable,
) -> Result<PathBuf> {
    let target = out.unwrap_or_else(|| src.to_path_buf());
    if backup && target.exists() {
        let bak = target.with_extension("csv.bak");
        std::fs::copy(&target, &bak)?;
        tracing::warn!("backup: {} → {}", target.display(), bak.display());
    }
    locsync_csv::write_table_to_path(&target, table)?;
    Ok(target)
}
