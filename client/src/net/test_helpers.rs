//! Scripted transport and fixtures for exchange tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use super::http::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};
use super::interceptor::Interceptor;
use crate::state::session::SessionStore;
use crate::util::cookie::MemoryCookieJar;
use crate::util::storage::MemoryStorage;

/// Cookie payload decoding to `{"id":"42"}`.
pub const TOKEN_42: &str = "header.eyJpZCI6IjQyIn0.sig";

/// Transport that replays queued outcomes and records what it was sent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    outcomes: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn push(&self, outcome: Result<ApiResponse, ApiError>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(response(200, &[], "")))
    }
}

pub fn response(status: u16, headers: &[(&str, &str)], body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        body: body.to_owned(),
    }
}

/// Everything a test needs to drive and inspect one client.
pub struct Harness {
    pub client: ApiClient<ScriptedTransport>,
    pub transport: ScriptedTransport,
    pub session: SessionStore,
    pub cookies: MemoryCookieJar,
    pub storage: MemoryStorage,
}

pub fn harness() -> Harness {
    let storage = MemoryStorage::new();
    let cookies = MemoryCookieJar::new();
    let session = SessionStore::new(Arc::new(storage.clone()));
    let interceptor = Interceptor::new(session.clone(), Arc::new(cookies.clone()));
    let transport = ScriptedTransport::default();
    let client = ApiClient::new(transport.clone(), interceptor);
    Harness { client, transport, session, cookies, storage }
}
