#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use netoverride_application::ports::{
    Datagram, DatagramFlow, MappingSnapshotSource, ResolverControl, UpstreamForwarder,
};
use netoverride_domain::{DomainError, FlowEndpoint, MappingRecord, ResolverPreferences};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn record(domain: &str, destination: &str) -> MappingRecord {
    MappingRecord::new(&format!("id-{domain}"), domain, destination).unwrap()
}

// ── MockSnapshotSource ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSnapshotSource {
    records: Mutex<Vec<MappingRecord>>,
    failure: Mutex<Option<DomainError>>,
    pulls: AtomicUsize,
}

impl MockSnapshotSource {
    pub fn new(records: Vec<MappingRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn set_records(&self, records: Vec<MappingRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn pull_count(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MappingSnapshotSource for MockSnapshotSource {
    async fn pull(&self) -> Result<Vec<MappingRecord>, DomainError> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().clone())
    }
}

// ── MockForwarder ──────────────────────────────────────────────────────────

/// Answers every query with `reply_prefix ++ query` unless a delay or a
/// failure is configured for the transaction ID.
#[derive(Default)]
pub struct MockForwarder {
    reply_prefix: Vec<u8>,
    delays: Mutex<HashMap<u16, Duration>>,
    fail: Mutex<bool>,
    calls: Mutex<Vec<(Vec<u8>, FlowEndpoint)>>,
}

impl MockForwarder {
    pub fn new(reply_prefix: &[u8]) -> Self {
        Self {
            reply_prefix: reply_prefix.to_vec(),
            ..Default::default()
        }
    }

    pub fn delay_for(&self, txid: u16, delay: Duration) {
        self.delays.lock().unwrap().insert(txid, delay);
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, FlowEndpoint)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reply_for(&self, query: &[u8]) -> Vec<u8> {
        let mut reply = self.reply_prefix.clone();
        reply.extend_from_slice(query);
        reply
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, query: &[u8], target: &FlowEndpoint) -> Result<Bytes, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_vec(), target.clone()));

        let txid = u16::from_be_bytes([query[0], query[1]]);
        let delay = self.delays.lock().unwrap().get(&txid).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail.lock().unwrap() {
            return Err(DomainError::UpstreamTimeout {
                server: target.to_string(),
            });
        }
        Ok(Bytes::from(self.reply_for(query)))
    }
}

// ── MockFlow ───────────────────────────────────────────────────────────────

/// Serves scripted read batches, then reports the flow as closed.
pub struct MockFlow {
    remote: FlowEndpoint,
    batches: Mutex<VecDeque<Vec<Datagram>>>,
    written: Mutex<Vec<Datagram>>,
    fail_writes: bool,
}

impl MockFlow {
    pub fn new(remote: &str, batches: Vec<Vec<Vec<u8>>>) -> Self {
        let batches = batches
            .into_iter()
            .map(|batch| {
                batch
                    .into_iter()
                    .map(|payload| Datagram::new(payload, None))
                    .collect()
            })
            .collect();
        Self {
            remote: remote.parse().unwrap(),
            batches: Mutex::new(batches),
            written: Mutex::new(Vec::new()),
            fail_writes: false,
        }
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.payload.to_vec())
            .collect()
    }

    pub async fn wait_for_writes(&self, count: usize) -> Vec<Vec<u8>> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let written = self.written();
            if written.len() >= count || tokio::time::Instant::now() >= deadline {
                return written;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl DatagramFlow for MockFlow {
    async fn read_datagrams(&self) -> Result<Vec<Datagram>, DomainError> {
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(DomainError::FlowClosed)
    }

    async fn write_datagrams(&self, datagrams: Vec<Datagram>) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::FlowIo("write refused".to_string()));
        }
        self.written.lock().unwrap().extend(datagrams);
        Ok(())
    }

    fn remote_endpoint(&self) -> &FlowEndpoint {
        &self.remote
    }
}

// ── MockResolverControl ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockResolverControl {
    prefs: Mutex<ResolverPreferences>,
    fail_save: bool,
    saves: AtomicUsize,
}

impl MockResolverControl {
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Default::default()
        }
    }

    pub fn prefs(&self) -> ResolverPreferences {
        self.prefs.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolverControl for MockResolverControl {
    async fn load(&self) -> Result<ResolverPreferences, DomainError> {
        Ok(self.prefs.lock().unwrap().clone())
    }

    async fn save(&self, prefs: &ResolverPreferences) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::ResolverControl("permission denied".to_string()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.prefs.lock().unwrap() = prefs.clone();
        Ok(())
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
