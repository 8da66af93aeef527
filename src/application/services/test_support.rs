use crate::application::ports::{PageFetcher, ReplayTransport};
use crate::domain::entities::{CachedResponse, PendingDocument, PendingTrip};
use crate::domain::value_objects::PageRequest;
use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted page fetcher keyed by "<METHOD> <url>". Unknown requests get
/// a 404; `go_offline` makes every fetch fail with a network error.
pub struct StubFetcher {
    offline: AtomicBool,
    responses: Mutex<HashMap<String, CachedResponse>>,
    fetches: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            offline: AtomicBool::new(false),
            responses: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn respond(&self, key: &str, status: u16, body: &'static [u8]) {
        self.responses.lock().unwrap().insert(
            key.to_string(),
            CachedResponse::new(status, vec![], Bytes::from_static(body), 0),
        );
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<CachedResponse, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Network("connection refused".to_string()));
        }
        let key = request.key().as_str().to_string();
        let responses = self.responses.lock().unwrap();
        Ok(responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| CachedResponse::new(404, vec![], Bytes::new(), 0)))
    }
}

/// Replay transport that records acknowledged submissions. Rejects trips
/// whose payload `destination`, or documents whose file name, matches a
/// configured value.
pub struct StubTransport {
    offline: AtomicBool,
    rejected_destinations: Mutex<Vec<String>>,
    rejected_files: Mutex<Vec<String>>,
    pub submitted_trips: Mutex<Vec<PendingTrip>>,
    pub uploaded_documents: Mutex<Vec<PendingDocument>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            offline: AtomicBool::new(false),
            rejected_destinations: Mutex::new(Vec::new()),
            rejected_files: Mutex::new(Vec::new()),
            submitted_trips: Mutex::new(Vec::new()),
            uploaded_documents: Mutex::new(Vec::new()),
        }
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    pub fn reject_destination(&self, name: &str) {
        self.rejected_destinations
            .lock()
            .unwrap()
            .push(name.to_string());
    }

    pub fn reject_file(&self, name: &str) {
        self.rejected_files.lock().unwrap().push(name.to_string());
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted_trips.lock().unwrap().len()
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploaded_documents.lock().unwrap().len()
    }
}

#[async_trait]
impl ReplayTransport for StubTransport {
    async fn submit_trip(&self, trip: &PendingTrip) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Network("connection refused".to_string()));
        }
        let destination = trip.payload["destination"].as_str().unwrap_or_default();
        if self
            .rejected_destinations
            .lock()
            .unwrap()
            .iter()
            .any(|d| d == destination)
        {
            return Err(AppError::Network(format!(
                "Trip replay rejected with status 422 ({destination})"
            )));
        }
        self.submitted_trips.lock().unwrap().push(trip.clone());
        Ok(())
    }

    async fn upload_document(&self, document: &PendingDocument) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Network("connection refused".to_string()));
        }
        if self
            .rejected_files
            .lock()
            .unwrap()
            .iter()
            .any(|f| f == &document.file_name)
        {
            return Err(AppError::Network(format!(
                "Document replay rejected with status 422 ({})",
                document.file_name
            )));
        }
        self.uploaded_documents
            .lock()
            .unwrap()
            .push(document.clone());
        Ok(())
    }
}
