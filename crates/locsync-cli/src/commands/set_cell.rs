use std::path::PathBuf;

use color_eyre::eyre::{bail, Result};

pub fn run_set(
    csv: PathBuf,
    key: String,
    lang: String,
    value: String,
    out: Option<PathBuf>,
    backup: bool,
) -> Result<()> {
    tracing::debug!(event = "set_args", csv = ?csv, key = %key, lang = %lang);

    let mut table = locsync_csv::read_table_from_path(&csv)?;
    let Some(idx) = table.find_key(&key) else {
        bail!("key `{key}` not found in {}", csv.display());
    };
    table.set_cell(idx, &lang, value)?;
    let target = super::save_table(&csv, out, backup, &table)?;
    crate::ui_ok!("set `{}`.`{}`, saved {}", key, lang, target.display());
    Ok(())
}
