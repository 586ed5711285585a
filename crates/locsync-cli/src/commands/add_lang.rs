use std::path::PathBuf;

use color_eyre::eyre::Result;

pub fn run_add_lang(csv: PathBuf, lang: String, out: Option<PathBuf>, backup: bool) -> Result<()> {
    tracing::debug!(event = "add_lang_args", csv = ?csv, lang = %lang);

    let mut table = locsync_csv::read_table_from_path(&csv)?;
    table.add_language(&lang)?;
    let rows = table.len();
    let target = super::save_table(&csv, out, backup, &table)?;
    crate::ui_ok!(
        "added language `{}` ({} row(s) back-filled), saved {}",
        lang,
        rows,
        target.display()
    );
    Ok(())
}
