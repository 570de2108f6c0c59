//! services/client/src/planner/export_task.rs
//!
//! Downloads the itinerary as a document and saves it under a fixed name.
//!
//! The bytes first land in a uniquely named temporary file next to the target
//! and are then renamed into place, so concurrent exports never see each
//! other's half-written output. A temporary file that is not persisted is
//! deleted when it goes out of scope.

use crate::planner::state::PlanHandle;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use travel_planner_core::{
    ports::{DocumentExportService, PortError},
    Itinerary,
};

/// The alert shown to the user whenever an export fails.
pub const EXPORT_FAILED_NOTICE: &str = "Nie udało się pobrać PDF";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("There is no plan to export")]
    NoItinerary,

    #[error("Export request failed: {0}")]
    Request(#[from] PortError),

    #[error("The service returned an empty document")]
    EmptyDocument,

    #[error("Could not save the document: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// The text to alert the user with.
    pub fn notice(&self) -> &'static str {
        EXPORT_FAILED_NOTICE
    }
}

/// A document that was saved to disk.
#[derive(Debug, Clone)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub size: usize,
    pub saved_at: DateTime<Utc>,
}

pub struct ArtifactExporter {
    documents: Arc<dyn DocumentExportService>,
    plans: PlanHandle,
    output_dir: PathBuf,
    file_name: String,
}

impl ArtifactExporter {
    pub fn new(
        documents: Arc<dyn DocumentExportService>,
        plans: PlanHandle,
        output_dir: PathBuf,
        file_name: String,
    ) -> Self {
        Self {
            documents,
            plans,
            output_dir,
            file_name,
        }
    }

    /// Where a successful export ends up.
    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Exports whatever itinerary is current.
    pub async fn export_current(&self) -> Result<SavedArtifact, ExportError> {
        let plan = self
            .plans
            .current_itinerary()
            .ok_or_else(|| report(ExportError::NoItinerary))?;
        self.export(&plan).await
    }

    /// Requests the document for `itinerary` and saves it. Each call is independent.
    pub async fn export(&self, itinerary: &Itinerary) -> Result<SavedArtifact, ExportError> {
        let document = self
            .documents
            .export_document(itinerary)
            .await
            .map_err(|e| report(e.into()))?;
        if document.is_empty() {
            return Err(report(ExportError::EmptyDocument));
        }

        let size = document.len();
        let dir = self.output_dir.clone();
        let target = self.target_path();
        let path = tokio::task::spawn_blocking(move || save_atomically(&dir, &target, &document))
            .await
            .map_err(|e| report(io::Error::new(io::ErrorKind::Other, e).into()))?
            .map_err(|e| report(e.into()))?;

        info!("Saved {} ({} bytes)", path.display(), size);
        Ok(SavedArtifact {
            path,
            size,
            saved_at: Utc::now(),
        })
    }
}

fn report(error: ExportError) -> ExportError {
    error!("{}: {}", EXPORT_FAILED_NOTICE, error);
    error
}

fn save_atomically(dir: &Path, target: &Path, document: &Bytes) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut part = tempfile::Builder::new()
        .prefix(".plan-")
        .suffix(".part")
        .tempfile_in(dir)?;
    part.write_all(document)?;
    part.as_file().sync_all()?;
    part.persist(target).map_err(|e| e.error)?;

    Ok(target.to_path_buf())
}
