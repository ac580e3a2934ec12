// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serialization/export adapters: persisted JSON documents and
//! standalone SVG renderings of a project.

pub mod json;
pub mod svg;

pub use json::{from_json, to_json, DocumentError, FlowDocument, FORMAT_VERSION};
pub use svg::{to_svg, SvgError};

use chrono::NaiveDate;

/// Build a dated download file name from a project name, e.g.
/// `data_pipeline_flow-2026-08-30.svg`
pub fn download_file_name(project_name: &str, extension: &str, date: NaiveDate) -> String {
    let slug: String = project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{slug}-{date}.{extension}")
}
