use std::collections::{BTreeSet, HashMap};

use color_eyre::eyre::{bail, Result};
use locsync_core::LocTable;
use locsync_domain::{CheckIssue, SCHEMA_VERSION};
use regex::Regex;

/// Запустить все проверки таблицы.
///
/// Issue kinds: "duplicate" | "empty-source" | "missing" | "placeholder".
/// The free-text message is a hint for humans; tools should switch on
/// `kind` and the structured fields.
pub fn check_table(table: &LocTable, source_lang: &str) -> Result<Vec<CheckIssue>> {
    if !table.has_language(source_lang) {
        bail!(
            "source language `{source_lang}` is not a column of this table (have: {})",
            table.languages().join(", ")
        );
    }

    let mut issues = Vec::new();

    // --- Дубликаты ключей ---
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for idx in 0..table.len() {
        let key = table.key(idx).unwrap_or("");
        if let Some(count) = seen.get(key) {
            issues.push(CheckIssue {
                schema_version: SCHEMA_VERSION,
                kind: "duplicate".into(),
                key: Some(key.to_string()),
                lang: None,
                count: Some(*count),
                message: format!("key `{key}` appears more than once"),
            });
        }
        *seen.entry(table.key(idx).unwrap_or("")).or_insert(0) += 1;
    }

    // --- Пустые ячейки исходного языка ---
    for idx in 0..table.len() {
        let cell = table.get(idx, source_lang).unwrap_or("");
        if cell.is_empty() {
            issues.push(CheckIssue {
                schema_version: SCHEMA_VERSION,
                kind: "empty-source".into(),
                key: table.key(idx).map(str::to_string),
                lang: Some(source_lang.to_string()),
                count: None,
                message: "source cell is empty, nothing can be translated".into(),
            });
        }
    }

    // --- Сколько ячеек не хватает в каждом языке ---
    for lang in table.languages() {
        if lang == source_lang {
            continue;
        }
        let missing = (0..table.len())
            .filter(|&idx| table.get(idx, lang).map(str::is_empty).unwrap_or(true))
            .count();
        if missing > 0 {
            issues.push(CheckIssue {
                schema_version: SCHEMA_VERSION,
                kind: "missing".into(),
                key: None,
                lang: Some(lang.clone()),
                count: Some(missing),
                message: format!("{missing} cell(s) still untranslated in `{lang}`"),
            });
        }
    }

    // --- Плейсхолдеры: перевод должен сохранять их набор ---
    let re = Regex::new(r"(\{\w+\}|\{\d+\}|%s|%d)").unwrap();
    for idx in 0..table.len() {
        let source = table.get(idx, source_lang).unwrap_or("");
        let wanted: BTreeSet<String> = re
            .find_iter(source)
            .map(|m| m.as_str().to_string())
            .collect();
        for lang in table.languages() {
            if lang == source_lang {
                continue;
            }
            let cell = table.get(idx, lang).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            let got: BTreeSet<String> =
                re.find_iter(cell).map(|m| m.as_str().to_string()).collect();
            if got != wanted {
                let missing: Vec<_> = wanted.difference(&got).cloned().collect();
                let extra: Vec<_> = got.difference(&wanted).cloned().collect();
                issues.push(CheckIssue {
                    schema_version: SCHEMA_VERSION,
                    kind: "placeholder".into(),
                    key: table.key(idx).map(str::to_string),
                    lang: Some(lang.clone()),
                    count: None,
                    message: format!(
                        "placeholders differ from `{source_lang}`: missing [{}], extra [{}]",
                        missing.join(", "),
                        extra.join(", ")
                    ),
                });
            }
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> LocTable {
        let mut t =
            LocTable::new(vec!["id".into(), "en".into(), "fr".into(), "de".into()]).unwrap();
        for row in rows {
            t.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        t
    }

    #[test]
    fn reports_duplicates_empty_sources_and_missing_counts() {
        let t = table(&[
            &["greet", "Hello", "Bonjour", ""],
            &["greet", "Hi", "", ""], // дубликат ключа
            &["blank", "", "", "Leer"],
        ]);
        let issues = check_table(&t, "en").unwrap();

        let kinds: Vec<_> = issues.iter().map(|i| i.kind.as_str()).collect();
        assert!(kinds.contains(&"duplicate"));
        assert!(kinds.contains(&"empty-source"));

        let missing_fr = issues
            .iter()
            .find(|i| i.kind == "missing" && i.lang.as_deref() == Some("fr"))
            .unwrap();
        assert_eq!(missing_fr.count, Some(2));
        let missing_de = issues
            .iter()
            .find(|i| i.kind == "missing" && i.lang.as_deref() == Some("de"))
            .unwrap();
        assert_eq!(missing_de.count, Some(2));
    }

    #[test]
    fn placeholder_sets_must_survive_translation() {
        let t = table(&[
            &["welcome", "Hello {name}!", "Bonjour {name} !", "Hallo %s!"],
            &["plain", "Bye", "Au revoir", "Tschüss"],
        ]);
        let issues = check_table(&t, "en").unwrap();
        let placeholder: Vec<_> = issues.iter().filter(|i| i.kind == "placeholder").collect();
        assert_eq!(placeholder.len(), 1);
        assert_eq!(placeholder[0].lang.as_deref(), Some("de"));
        assert!(placeholder[0].message.contains("{name}"));
        assert!(placeholder[0].message.contains("%s"));
    }

    #[test]
    fn unknown_source_language_is_an_error() {
        let t = table(&[&["k", "a", "b", "c"]]);
        assert!(check_table(&t, "es").is_err());
    }

    #[test]
    fn untranslated_cells_are_not_checked_for_placeholders() {
        let t = table(&[&["welcome", "Hello {name}!", "", ""]]);
        let issues = check_table(&t, "en").unwrap();
        assert!(issues.iter().all(|i| i.kind != "placeholder"));
    }
}
