use std::io::BufReader;

use anyhow::{Context, Result};

use super::{JsonTableSet, TabulaExtractionRequest, TabulaExtractor};

/// [TabulaExtractor] running Tabula in the JVM attached to the current thread.
///
/// Must be created and run on the main thread.
pub struct SingleThreadedTabulaExtractor<'env> {
    env: tabula::TabulaEnv<'env>,
}

impl<'env> SingleThreadedTabulaExtractor<'env> {
    pub fn new(env: tabula::TabulaEnv<'env>) -> Self {
        Self { env }
    }

    /// Attaches the current thread to `vm`.
    pub fn attach(vm: &'env tabula::TabulaVM) -> Result<Self> {
        vm.attach()
            .context("attaching to TabulaVM")
            .map(Self::new)
    }
}

impl TabulaExtractor for SingleThreadedTabulaExtractor<'_> {
    fn extract_tables(&self, request: TabulaExtractionRequest) -> Result<JsonTableSet> {
        log::debug!("Running Tabula with {:?}.", request);

        // Whole pages only, so no page areas.
        let tabula = self
            .env
            .configure_tabula(
                None,
                request.pages.as_deref(),
                tabula::OutputFormat::Json,
                request.guess,
                request.method.to_tabula_extraction_method(),
                request.use_returns,
                request.password.as_deref(),
            )
            .context("configuring Tabula")?;

        let json_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for Tabula output")?;
        tabula
            .parse_document_into(&request.pdf_path, json_file.path())
            .with_context(|| format!("running Tabula on {:?}", request.pdf_path))?;

        let table_set = JsonTableSet::from_reader(BufReader::new(json_file))?;
        log::debug!(
            "Tabula found {} table(s) in {:?}.",
            table_set.0.len(),
            request.pdf_path
        );
        Ok(table_set)
    }
}
