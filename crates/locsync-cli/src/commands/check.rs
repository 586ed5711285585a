use std::path::PathBuf;

use color_eyre::eyre::Result;

pub fn run_check(
    csv: PathBuf,
    source_lang: Option<String>,
    format: String,
    strict: bool,
    use_color: bool,
) -> Result<()> {
    tracing::debug!(event = "check_args", csv = ?csv, source_lang = ?source_lang, strict = strict);

    let Some(source) = super::resolve_source_lang(source_lang) else {
        crate::ui_err!(
            "no source language: pass --source-lang or set `source_lang` in locsync.toml"
        );
        std::process::exit(2);
    };

    let table = locsync_csv::read_table_from_path(&csv)?;
    let issues = locsync_validate::check_table(&table, &source)?;

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &issues)?;
    } else if issues.is_empty() {
        if use_color {
            use owo_colors::OwoColorize;
            println!("{} table is clean", "✔".green());
        } else {
            println!("✔ table is clean");
        }
    } else {
        for issue in &issues {
            let tag = match issue.kind.as_str() {
                "duplicate" => "⚠",
                "empty-source" => "✖",
                "missing" => "ℹ",
                _ => "•",
            };
            let subject = issue
                .key
                .as_deref()
                .or(issue.lang.as_deref())
                .unwrap_or("-");
            if use_color {
                use owo_colors::OwoColorize;
                println!("{} [{}] {}: {}", tag, issue.kind, subject.green(), issue.message);
            } else {
                println!("{} [{}] {}: {}", tag, issue.kind, subject, issue.message);
            }
        }
    }

    if strict && !issues.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
