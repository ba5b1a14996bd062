//! Issue body composition.
//!
//! Layout of a composed body:
//!
//! ```text
//! **Core:** <core>
//! **System:** <system>
//! **Module Version:** <module>      (only when a module version is given)
//!
//! <free text body>
//! <module settings fragment>        (only when well-formed)
//! <module list fragment>            (only when well-formed)
//! ```

use std::fmt::Write;

use crate::report::{BugReport, VersionInformation};

pub const DETAILS_OPEN: &str = "<details>";
pub const DETAILS_CLOSE: &str = "</details>";

/// GitHub rejects issue bodies longer than this many characters.
pub const GITHUB_BODY_LIMIT: usize = 65_536;

/// A module settings fragment must end with `</details>` followed by exactly
/// one newline.
pub fn is_module_settings_fragment(html: &str) -> bool {
    html.starts_with(DETAILS_OPEN) && html.ends_with("</details>\n")
}

/// A module list fragment must end with `</details>`; no trailing newline is
/// required.
pub fn is_module_list_fragment(html: &str) -> bool {
    html.starts_with(DETAILS_OPEN) && html.ends_with(DETAILS_CLOSE)
}

/// Markdown header lines describing the reporter's versions.
pub fn version_header(version: &VersionInformation) -> String {
    let mut header = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(header, "**Core:** {}", version.core);
    let _ = writeln!(header, "**System:** {}", version.system);
    if let Some(module) = version.module_version() {
        let _ = writeln!(header, "**Module Version:** {module}");
    }
    header
}

/// Build the issue body for `report`.
///
/// The free text is copied verbatim. HTML fragments that do not satisfy
/// their wrapping rule are left out.
pub fn compose_issue_body(report: &BugReport) -> String {
    let mut body = report
        .version_information
        .as_ref()
        .map(version_header)
        .unwrap_or_default();

    body.push('\n');
    body.push_str(&report.body);

    if let Some(settings) = report
        .module_settings_html
        .as_deref()
        .filter(|html| is_module_settings_fragment(html))
    {
        body.push('\n');
        body.push_str(settings);
    }

    if let Some(list) = report
        .module_list_html
        .as_deref()
        .filter(|html| is_module_list_fragment(html))
    {
        body.push('\n');
        body.push_str(list);
    }

    body
}
