//! In-memory stand-ins for both generations of store client.
//!
//! A stub answers every get with its canned response and swallows every put.
//! Responses share their item, so answering a get copies nothing. Neither holds a transport, so no call leaves the process.

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::trace;

use crate::legacy;
use crate::model::{GetItemRequest, GetItemResponse, PutItemRequest, PutItemResponse, StoreClient};
use crate::Result;

/// Counts what a stub was asked to do. Put payloads are passed through
/// `black_box` so the work that built them cannot be optimized away.
#[derive(Debug, Default)]
pub struct SideEffects {
    gets: AtomicU64,
    puts: AtomicU64,
}

impl SideEffects {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn puts(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    pub fn calls(&self) -> u64 {
        self.gets() + self.puts()
    }

    fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    fn record_put<P>(&self, payload: P) {
        black_box(payload);
        self.puts.fetch_add(1, Ordering::Relaxed);
    }
}

/// Stub for the current client, used under the enhanced mapper.
#[derive(Debug)]
pub struct StubStoreClient {
    canned: GetItemResponse,
    effects: Arc<SideEffects>,
}

impl StubStoreClient {
    pub fn new(canned: GetItemResponse, effects: Arc<SideEffects>) -> Self {
        Self { canned, effects }
    }

    pub fn canned(&self) -> &GetItemResponse {
        &self.canned
    }

    pub fn effects(&self) -> &Arc<SideEffects> {
        &self.effects
    }
}

impl StoreClient for StubStoreClient {
    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse> {
        trace!("stub get_item on '{}'", request.table_name);
        self.effects.record_get();
        Ok(self.canned.clone())
    }

    fn put_item(&self, request: PutItemRequest) -> Result<PutItemResponse> {
        trace!("stub put_item on '{}'", request.table_name);
        self.effects.record_put(request);
        Ok(PutItemResponse)
    }
}

/// Stub for the previous-generation client, used under the legacy mapper.
#[derive(Debug)]
pub struct StubLegacyClient {
    canned: legacy::GetItemResult,
    effects: Arc<SideEffects>,
}

impl StubLegacyClient {
    pub fn new(canned: legacy::GetItemResult, effects: Arc<SideEffects>) -> Self {
        Self { canned, effects }
    }

    pub fn canned(&self) -> &legacy::GetItemResult {
        &self.canned
    }

    pub fn effects(&self) -> &Arc<SideEffects> {
        &self.effects
    }
}

impl legacy::StoreClient for StubLegacyClient {
    fn get_item(&self, request: legacy::GetItemRequest) -> Result<legacy::GetItemResult> {
        trace!("legacy stub get_item on '{}'", request.table_name);
        self.effects.record_get();
        Ok(self.canned.clone())
    }

    fn put_item(&self, request: legacy::PutItemRequest) -> Result<legacy::PutItemResult> {
        trace!("legacy stub put_item on '{}'", request.table_name);
        self.effects.record_put(request);
        Ok(legacy::PutItemResult)
    }
}
