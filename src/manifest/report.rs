//! Status-line reporting around a generation.

use super::{ManifestError, ManifestReport, generate};
use crate::config::AppConfig;
use crate::logger;
use crate::utils::plural::plural_count;

/// Regenerate the manifest and update the status line.
pub fn regenerate(config: &AppConfig) -> Result<ManifestReport, ManifestError> {
    let report = generate(config)?;
    logger::status_success(&summary(config, &report));
    Ok(report)
}

/// Show a failed generation on the status line.
pub fn report_failure(error: &ManifestError) {
    let detail = std::error::Error::source(error)
        .map(ToString::to_string)
        .unwrap_or_default();
    logger::status_error(&error.to_string(), &detail);
}

fn summary(config: &AppConfig, report: &ManifestReport) -> String {
    let mut message = format!(
        "{}: {}, {}",
        config.assets.manifest.display(),
        plural_count(report.images, "image"),
        plural_count(report.sounds, "sound")
    );
    if report.skipped > 0 {
        message.push_str(&format!(" ({} skipped)", report.skipped));
    }
    message
}
