use std::path::PathBuf;

use color_eyre::eyre::Result;

pub fn run_add_key(
    csv: PathBuf,
    key: Option<String>,
    out: Option<PathBuf>,
    backup: bool,
) -> Result<()> {
    tracing::debug!(event = "add_key_args", csv = ?csv, key = ?key);

    let mut table = locsync_csv::read_table_from_path(&csv)?;
    if let Some(k) = key.as_deref() {
        if table.find_key(k).is_some() {
            crate::ui_warn!("key `{}` already exists, adding another row with the same key", k);
        }
    }
    let used = table.add_key(key);
    let target = super::save_table(&csv, out, backup, &table)?;
    crate::ui_ok!("added key `{}`, saved {}", used, target.display());
    Ok(())
}
