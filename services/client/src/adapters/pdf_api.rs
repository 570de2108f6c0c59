//! services/client/src/adapters/pdf_api.rs
//!
//! This module contains the adapter for the document export endpoint.
//! It implements the `DocumentExportService` port from the `core` crate.

use crate::adapters::{
    http::ServiceClient,
    protocol::{ItineraryPayload, PdfRequest},
};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use travel_planner_core::{
    ports::{DocumentExportService, PortResult},
    Itinerary,
};

pub const SAVE_PDF_PATH: &str = "/api/save-pdf";

/// An adapter that implements `DocumentExportService` over the planner's HTTP API.
#[derive(Clone)]
pub struct HttpPdfAdapter {
    client: ServiceClient,
}

impl HttpPdfAdapter {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentExportService for HttpPdfAdapter {
    async fn export_document(&self, plan: &Itinerary) -> PortResult<Bytes> {
        let request = PdfRequest {
            plan: ItineraryPayload::from(plan),
        };
        let response = self.client.post_json(SAVE_PDF_PATH, &request).await?;
        let document = self.client.read_bytes(response).await?;

        debug!("Received a document of {} bytes", document.len());
        Ok(document)
    }
}
