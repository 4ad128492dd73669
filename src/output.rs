use crate::error::CrawlError;
use crate::results::CrawlReport;
use std::fs;
use std::path::Path;

/// Write the report as pretty-printed UTF-8 JSON, replacing any existing file
pub fn write_report(report: &CrawlReport, path: &Path) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CrawlError::Output {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| CrawlError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    ::log::debug!("Report written to {}", path.display());
    Ok(())
}
