//! Parses the `--file` site list into `SiteConfig`s.
//!
//! Grounded on `get_sites` in the system this crate is modeled on: one site
//! per line, four comma-separated fields, unique names, positive
//! floating-point interval/timeout. Any violation aborts startup with a
//! message naming the offending 1-based line number.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::{MonitorError, Result};
use crate::models::SiteConfig;

/// Reads and validates the site list at `path`.
pub fn parse_sites(path: &Path) -> Result<Vec<SiteConfig>> {
    let contents = std::fs::read_to_string(path).map_err(|_| MonitorError::InputFileMissing {
        path: path.display().to_string(),
    })?;

    let mut sites = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (idx, line) in contents.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [name, url, interval, timeout] = fields.as_slice() else {
            return Err(MonitorError::input_file(
                line_number,
                format!("expected 4 comma-separated fields, found {}", fields.len()),
            ));
        };

        if name.is_empty() {
            return Err(MonitorError::input_file(line_number, "site name must not be empty"));
        }
        if !seen_names.insert((*name).to_string()) {
            return Err(MonitorError::input_file(line_number, format!("duplicate site name '{name}'")));
        }

        let interval = parse_positive_seconds(interval)
            .ok_or_else(|| MonitorError::input_file(line_number, format!("invalid interval '{interval}'")))?;
        let timeout = parse_positive_seconds(timeout)
            .ok_or_else(|| MonitorError::input_file(line_number, format!("invalid timeout '{timeout}'")))?;

        sites.push(SiteConfig::new(*name, *url, interval, timeout));
    }

    Ok(sites)
}

fn parse_positive_seconds(field: &str) -> Option<Duration> {
    let seconds: f64 = field.parse().ok()?;
    if seconds > 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_valid_sites() {
        let file = write_file("a,http://a.com,1.0,5.0\nb,http://b.com,2.5,10\n");
        let sites = parse_sites(file.path()).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].name, "a");
        assert_eq!(sites[1].interval, Duration::from_secs_f64(2.5));
    }

    #[test]
    fn rejects_duplicate_names() {
        let file = write_file("a,http://a.com,1.0,5.0\na,http://b.com,1.0,5.0\n");
        let err = parse_sites(file.path()).unwrap_err();
        match err {
            MonitorError::InputFile { line, .. } => assert_eq!(line, 2),
            _ => panic!("wrong error variant"),
        }
    }

    #[test]
    fn rejects_malformed_line() {
        let file = write_file("a,http://a.com,1.0\n");
        let err = parse_sites(file.path()).unwrap_err();
        match err {
            MonitorError::InputFile { line, .. } => assert_eq!(line, 1),
            _ => panic!("wrong error variant"),
        }
    }

    #[test]
    fn rejects_nonpositive_numbers() {
        let file = write_file("a,http://a.com,0,5.0\n");
        let err = parse_sites(file.path()).unwrap_err();
        match err {
            MonitorError::InputFile { line, .. } => assert_eq!(line, 1),
            _ => panic!("wrong error variant"),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = parse_sites(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, MonitorError::InputFileMissing { .. }));
    }
}
