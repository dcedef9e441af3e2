//! Combined-format selection
//!
//! Sources list formats best first, so "highest quality" is simply the first
//! format that survives the filter. Bitrate and resolution are never compared
//! here.

use super::models::VideoFormat;

/// Constraints a format must meet to be served.
#[derive(Debug, Clone, Default)]
pub struct FormatFilter {
    /// Only accept this container (case-insensitive) when set.
    pub container: Option<String>,
}

impl FormatFilter {
    pub fn with_container(container: Option<String>) -> Self {
        Self { container }
    }

    pub fn accepts(&self, format: &VideoFormat) -> bool {
        if !format.is_combined() {
            return false;
        }
        match &self.container {
            Some(wanted) => format
                .container
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
            None => true,
        }
    }
}

/// Pick the highest-ranked combined format, or `None` if nothing qualifies.
pub fn choose_combined_format<'a>(
    formats: &'a [VideoFormat],
    filter: &FormatFilter,
) -> Option<&'a VideoFormat> {
    formats.iter().find(|f| filter.accepts(f))
}
