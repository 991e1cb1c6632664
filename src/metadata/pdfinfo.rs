//! PDF metadata via poppler's `pdfinfo`.

use async_trait::async_trait;
use std::io::Write;

use super::{ExtractedMetadata, MetadataError, MetadataExtractor};
use crate::models::FileClass;
use crate::utils::parse_pdf_date;

/// Metadata extractor that shells out to `pdfinfo -rawdates`.
#[derive(Debug, Clone)]
pub struct PdfInfoExtractor {
    binary: String,
}

impl Default for PdfInfoExtractor {
    fn default() -> Self {
        Self {
            binary: "pdfinfo".to_string(),
        }
    }
}

impl PdfInfoExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `pdfinfo` binary.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

#[async_trait]
impl MetadataExtractor for PdfInfoExtractor {
    async fn extract(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Option<ExtractedMetadata>, MetadataError> {
        if FileClass::from_filename(filename) != FileClass::Pdf {
            return Ok(None);
        }

        let mut temp = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        temp.write_all(bytes)?;
        temp.flush()?;

        let output = tokio::process::Command::new(&self.binary)
            .arg("-rawdates")
            .arg(temp.path())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(Some(parse_pdfinfo_output(&stdout)))
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(MetadataError::ExtractionFailed(format!(
                    "pdfinfo failed for {}: {}",
                    filename,
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MetadataError::ToolNotFound(self.binary.clone()))
            }
            Err(e) => Err(MetadataError::Io(e)),
        }
    }
}

/// Parse `pdfinfo` key/value output.
///
/// `Subject` maps to the description; `Keywords` is split on commas and
/// semicolons; `CreationDate` must be a raw PDF date string.
pub fn parse_pdfinfo_output(output: &str) -> ExtractedMetadata {
    let mut metadata = ExtractedMetadata::default();

    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim() {
            "Title" => metadata.title = Some(value.to_string()),
            "Subject" => metadata.description = Some(value.to_string()),
            "Author" => metadata.author = Some(value.to_string()),
            "Keywords" => {
                metadata.keywords = value
                    .split([',', ';'])
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "CreationDate" => metadata.created = parse_pdf_date(value),
            _ => {}
        }
    }

    metadata
}
