//! Shared test utilities: recording clients and case visitors.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use mapper_benchmarks::legacy;
use mapper_benchmarks::model::{
    GetItemRequest, GetItemResponse, PutItemRequest, PutItemResponse, StoreClient,
};
use mapper_benchmarks::{MapperError, Result};

// =============================================================================
// Recording clients
// =============================================================================

/// Current-generation client that remembers every request and answers gets
/// with a fixed response.
#[derive(Default)]
pub struct RecordingClient {
    pub response: GetItemResponse,
    pub gets: Mutex<Vec<GetItemRequest>>,
    pub puts: Mutex<Vec<PutItemRequest>>,
}

impl RecordingClient {
    pub fn answering(response: GetItemResponse) -> Self {
        Self {
            response,
            ..Default::default()
        }
    }
}

impl StoreClient for RecordingClient {
    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse> {
        self.gets.lock().unwrap().push(request);
        Ok(self.response.clone())
    }

    fn put_item(&self, request: PutItemRequest) -> Result<PutItemResponse> {
        self.puts.lock().unwrap().push(request);
        Ok(PutItemResponse)
    }
}

/// Legacy client that remembers every request.
#[derive(Default)]
pub struct RecordingLegacyClient {
    pub result: legacy::GetItemResult,
    pub gets: Mutex<Vec<legacy::GetItemRequest>>,
    pub puts: Mutex<Vec<legacy::PutItemRequest>>,
}

impl RecordingLegacyClient {
    pub fn answering(result: legacy::GetItemResult) -> Self {
        Self {
            result,
            ..Default::default()
        }
    }
}

impl legacy::StoreClient for RecordingLegacyClient {
    fn get_item(&self, request: legacy::GetItemRequest) -> Result<legacy::GetItemResult> {
        self.gets.lock().unwrap().push(request);
        Ok(self.result.clone())
    }

    fn put_item(&self, request: legacy::PutItemRequest) -> Result<legacy::PutItemResult> {
        self.puts.lock().unwrap().push(request);
        Ok(legacy::PutItemResult)
    }
}

/// Client whose every call fails.
pub struct FailingClient;

impl StoreClient for FailingClient {
    fn get_item(&self, _: GetItemRequest) -> Result<GetItemResponse> {
        Err(MapperError::Client("connection refused".into()))
    }

    fn put_item(&self, _: PutItemRequest) -> Result<PutItemResponse> {
        Err(MapperError::Client("connection refused".into()))
    }
}

/// Legacy client whose every call fails.
pub struct FailingLegacyClient;

impl legacy::StoreClient for FailingLegacyClient {
    fn get_item(&self, _: legacy::GetItemRequest) -> Result<legacy::GetItemResult> {
        Err(MapperError::Client("connection reset".into()))
    }

    fn put_item(&self, _: legacy::PutItemRequest) -> Result<legacy::PutItemResult> {
        Err(MapperError::Client("connection reset".into()))
    }
}

// =============================================================================
// Config helpers
// =============================================================================

/// Environment-style lookup over a fixed set of variables.
pub fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}
