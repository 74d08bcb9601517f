//! Human-readable update report.

use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

use crate::change::ChangeSet;
use crate::Result;

/// Timestamp format used in reports and run markers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RULE_WIDTH: usize = 50;

/// Render a change set as report text.
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn render(changes: &ChangeSet, timestamp: NaiveDateTime) -> String {
    let mut lines = vec![
        format!("Rule update report - {}", timestamp.format(TIMESTAMP_FORMAT)),
        "=".repeat(RULE_WIDTH),
    ];

    let sections = [
        ("Modified files:", &changes.modified),
        ("Added files:", &changes.added),
        ("Removed files:", &changes.removed),
    ];
    for (title, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(title.to_string());
        lines.extend(paths.iter().map(|p| format!("- {}", p)));
    }

    if changes.is_empty() {
        lines.push(String::new());
        lines.push("No updates found".to_string());
    }

    lines.join("\n")
}

/// Write the report to `destination` and echo it to stdout.
pub fn write(text: &str, destination: &Path) -> Result<()> {
    fs::write(destination, text)?;
    println!("{}", text);
    log::debug!("Wrote update report to {:?}", destination);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_render_no_updates() {
        let text = render(&ChangeSet::default(), timestamp());
        let expected = format!(
            "Rule update report - 2026-10-19 08:30:00\n{}\n\nNo updates found",
            "=".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_sections_in_order() {
        let changes = ChangeSet {
            modified: vec!["geosite/cn.yaml".to_string()],
            added: vec!["geoip/us.yaml".to_string(), "geoip/jp.yaml".to_string()],
            removed: vec!["geosite/old.yaml".to_string()],
        };
        let text = render(&changes, timestamp());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Rule update report - 2026-10-19 08:30:00");
        assert_eq!(
            &lines[2..],
            &[
                "",
                "Modified files:",
                "- geosite/cn.yaml",
                "",
                "Added files:",
                "- geoip/us.yaml",
                "- geoip/jp.yaml",
                "",
                "Removed files:",
                "- geosite/old.yaml",
            ]
        );
        assert!(!text.contains("No updates found"));
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let changes = ChangeSet {
            added: vec!["a.yaml".to_string()],
            ..Default::default()
        };
        let text = render(&changes, timestamp());
        assert!(text.contains("Added files:"));
        assert!(!text.contains("Modified files:"));
        assert!(!text.contains("Removed files:"));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("update_report.txt");
        fs::write(&path, "stale report with more text than the new one").unwrap();

        write("fresh", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }
}
