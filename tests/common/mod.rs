//! Shared fakes for the publish integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smile_publisher::adapters::lims::LimsApi;
use smile_publisher::adapters::messaging::{MessagePublisher, PublisherConnector};
use smile_publisher::domain::{
    Delivery, MessagingError, Request, Result, SampleManifest, SampleStub, SourceError,
};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory message bus recording every publish
#[derive(Default)]
pub struct RecordingBus {
    pub published: Mutex<Vec<(String, Vec<u8>)>>,
    pub connects: Mutex<usize>,
    pub shutdowns: Mutex<usize>,
    pub refuse_connections: bool,
}

impl RecordingBus {
    pub fn refusing() -> Self {
        Self {
            refuse_connections: true,
            ..Default::default()
        }
    }

    pub fn topics(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock().unwrap()
    }

    pub fn shutdowns(&self) -> usize {
        *self.shutdowns.lock().unwrap()
    }
}

struct RecordingConnection(Arc<RecordingBus>);

#[async_trait]
impl MessagePublisher for RecordingConnection {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        self.0
            .published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        *self.0.shutdowns.lock().unwrap() += 1;
        Ok(())
    }
}

pub struct RecordingConnector(pub Arc<RecordingBus>);

#[async_trait]
impl PublisherConnector for RecordingConnector {
    async fn connect(&self) -> Result<Box<dyn MessagePublisher>> {
        *self.0.connects.lock().unwrap() += 1;
        if self.0.refuse_connections {
            return Err(MessagingError::ConnectionFailed {
                url: "tls://127.0.0.1:4222".to_string(),
                message: "connection refused".to_string(),
            }
            .into());
        }
        Ok(Box::new(RecordingConnection(self.0.clone())))
    }
}

/// LIMS fake backed by maps
#[derive(Default)]
pub struct FakeLims {
    pub requests: HashMap<String, Request>,
    pub unreachable_requests: HashSet<String>,
    pub failing_samples: HashSet<String>,
    pub deliveries: Vec<Delivery>,
    pub manifest_calls: Mutex<Vec<String>>,
    pub delivery_queries: Mutex<Vec<DateTime<Utc>>>,
}

impl FakeLims {
    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.insert(request.request_id.clone(), request);
        self
    }

    pub fn manifest_calls(&self) -> Vec<String> {
        self.manifest_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LimsApi for FakeLims {
    async fn fetch_request(&self, request_id: &str) -> Result<Request> {
        let url = format!("getRequestSamples?request={request_id}");
        if self.unreachable_requests.contains(request_id) {
            return Err(SourceError::Transport {
                url,
                message: "connection reset".to_string(),
            }
            .into());
        }
        self.requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| SourceError::Status { url, status: 404 }.into())
    }

    async fn fetch_sample_manifest(&self, sample_id: &str) -> Result<SampleManifest> {
        self.manifest_calls
            .lock()
            .unwrap()
            .push(sample_id.to_string());
        if self.failing_samples.contains(sample_id) {
            return Err(SourceError::Status {
                url: format!("getSampleManifest?igoSampleId={sample_id}"),
                status: 500,
            }
            .into());
        }
        Ok(SampleManifest {
            igo_id: sample_id.to_string(),
            cmo_sample_name: format!("C-{sample_id}"),
            ..Default::default()
        })
    }

    async fn fetch_deliveries(&self, since: DateTime<Utc>) -> Result<Vec<Delivery>> {
        self.delivery_queries.lock().unwrap().push(since);
        Ok(self.deliveries.clone())
    }
}

/// A request with `sample_count` completed samples named `<id>_1`, `<id>_2`, ...
pub fn request(request_id: &str, is_cmo: bool, sample_count: usize) -> Request {
    Request {
        request_id: request_id.to_string(),
        recipe: "WholeExomeSequencing".to_string(),
        lab_head_name: "Jane Doe".to_string(),
        is_cmo_request: is_cmo,
        samples: (1..=sample_count)
            .map(|n| SampleStub {
                igo_sample_id: format!("{request_id}_{n}"),
                igo_complete: true,
            })
            .collect(),
        ..Default::default()
    }
}

/// Shared buffer that collects formatted log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's log output into a buffer until the guard is dropped
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
