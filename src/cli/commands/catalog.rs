//! Catalog command.

use crate::cli::args::{CatalogSection, OutputFormat};
use crate::error::PlungeError;
use crate::features::catalog::{presets, protocols, techniques};
use crate::output::{
    format_catalog_json, format_presets_pretty, format_protocols_pretty, format_techniques_pretty,
};

/// Execute catalog command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn catalog(
    section: Option<CatalogSection>,
    format: OutputFormat,
) -> Result<String, PlungeError> {
    let show = |s: CatalogSection| section.is_none() || section == Some(s);

    match format {
        OutputFormat::Json => format_catalog_json(
            show(CatalogSection::Breathing).then(techniques),
            show(CatalogSection::Contrast).then(protocols),
            show(CatalogSection::Thermal).then(presets),
        ),
        OutputFormat::Pretty => {
            let mut sections = Vec::new();
            if show(CatalogSection::Breathing) {
                sections.push(format_techniques_pretty(techniques()));
            }
            if show(CatalogSection::Contrast) {
                sections.push(format_protocols_pretty(protocols()));
            }
            if show(CatalogSection::Thermal) {
                sections.push(format_presets_pretty(presets()));
            }
            Ok(sections.join("\n"))
        }
    }
}
