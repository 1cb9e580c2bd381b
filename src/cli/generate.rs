use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::debug;

use crate::error::{EstimateError, Result};
use crate::fmt::text;
use crate::models::EstimateRecord;
use crate::pdf::{PdfOptions, PdfRenderer};
use crate::settings::Settings;
use crate::template;

/// Write `bytes` to `path` through a temp file in the same directory, so the
/// final name only ever holds a complete PDF.
fn write_pdf(bytes: &[u8], path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| EstimateError::Io(e.error))?;
    Ok(())
}

/// Load the record and template, populate, render and write the PDF.
/// Returns the written path.
pub fn run(data: Option<String>, settings: &Settings, renderer: &dyn PdfRenderer) -> Result<PathBuf> {
    println!("{}", "Starting PDF generation...".bold());

    let name = data.unwrap_or_else(|| settings.default_data.clone());
    let data_path = settings.data_path(&name);
    println!("Loading data from: {}", data_path.display());
    if !data_path.exists() {
        return Err(EstimateError::DataNotFound(data_path));
    }
    let record = EstimateRecord::load(&data_path)?;
    let insured = text(record.lookup("insured.name"));
    println!("{} {insured}", "Loaded data for:".green());
    debug!(
        categories = record.line_items.len(),
        items = record.item_count(),
        "estimate loaded"
    );

    let template_path = settings.template_path();
    println!("Loading template from: {}", template_path.display());
    if !template_path.exists() {
        return Err(EstimateError::TemplateNotFound(template_path));
    }
    let template_text = std::fs::read_to_string(&template_path)?;
    println!("{}", "Template loaded".green());

    let filename = record.output_filename()?;

    println!("Populating template with data...");
    let html = template::populate(&template_text, &record, &settings.layout());
    println!("{}", "Template populated".green());

    let output_dir = settings.output_dir();
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
        println!("Created output directory: {}", output_dir.display());
    }
    let output_path = output_dir.join(filename);

    let bytes = renderer.render(&html, &PdfOptions::letter())?;
    write_pdf(&bytes, &output_path)?;

    let size_kb = (bytes.len() as f64 / 1024.0).round();
    println!();
    println!("{}", "PDF generated successfully!".green().bold());
    println!("Output: {}", output_path.display());
    println!("Size: {size_kb} KB");
    Ok(output_path)
}
