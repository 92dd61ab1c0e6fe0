//! HTTP exchange types and the intercepted client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through [`ApiClient::send`]. The client runs the
//! interceptor's pre-hook (default headers) before handing the request to a
//! [`Transport`], then the post-hook on the outcome, success or failure,
//! before the caller sees it.
//!
//! ERROR HANDLING
//! ==============
//! Transports only fail when no response exists (network failure, blocked
//! request). Any received response, including 4xx/5xx, reaches the
//! post-hook; non-2xx statuses are then surfaced as [`ApiError::Status`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::interceptor::Interceptor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One file field of a `multipart/form-data` body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    Text(String),
    /// Encoded by the transport; the browser picks the boundary and the
    /// content-type header.
    Multipart(Vec<FormPart>),
}

/// Outgoing request. Header names are matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Attach a JSON body and content type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn with_json<B: Serialize>(self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let mut request = self.with_header("content-type", "application/json");
        request.body = Some(RequestBody::Text(raw));
        Ok(request)
    }

    /// Attach a multipart form body. Any explicit content type is dropped.
    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.headers.retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    /// Text body, if the request carries one.
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Received response, whatever its status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The exchange produced no response at all.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("request failed with status {}", .0.status)]
    Status(ApiResponse),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Response attached to the error, if the server answered.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status(response) => Some(response),
            _ => None,
        }
    }
}

/// Sends one request and returns whatever the server answered.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Browser `fetch` transport via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as FetchMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => FetchMethod::GET,
                Method::Post => FetchMethod::POST,
                Method::Put => FetchMethod::PUT,
                Method::Delete => FetchMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let sent = match request.body {
                Some(RequestBody::Text(body)) => {
                    builder
                        .body(body)
                        .map_err(|e| ApiError::Network(e.to_string()))?
                        .send()
                        .await
                }
                Some(RequestBody::Multipart(parts)) => {
                    builder
                        .body(form_data(&parts)?)
                        .map_err(|e| ApiError::Network(e.to_string()))?
                        .send()
                        .await
                }
                None => builder.send().await,
            };
            let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let headers = response.headers().entries().collect();
            let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse { status, headers, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Network("fetch is only available in the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
fn form_data(parts: &[FormPart]) -> Result<web_sys::FormData, ApiError> {
    let js_err = |value: wasm_bindgen::JsValue| ApiError::Encode(format!("{value:?}"));
    let form = web_sys::FormData::new().map_err(js_err)?;
    for part in parts {
        let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(part.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&part.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&chunks, &options).map_err(js_err)?;
        form.append_with_blob_and_filename(&part.name, &blob, &part.file_name).map_err(js_err)?;
    }
    Ok(form)
}

/// HTTP client with the interceptor composed around its transport.
pub struct ApiClient<T = FetchTransport> {
    transport: Arc<T>,
    interceptor: Interceptor,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), interceptor: self.interceptor.clone() }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, interceptor: Interceptor) -> Self {
        Self { transport: Arc::new(transport), interceptor }
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    /// Send `request` through the interceptor.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response arrived and
    /// [`ApiError::Status`] for non-2xx responses. The post-hook has already
    /// run in both cases.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.interceptor.before_send(&mut request);
        match self.transport.send(request).await {
            Ok(response) => {
                self.interceptor.after_exchange(Some(&response)).await;
                if response.is_success() { Ok(response) } else { Err(ApiError::Status(response)) }
            }
            Err(err) => {
                self.interceptor.after_exchange(err.response()).await;
                Err(err)
            }
        }
    }

    /// `GET url` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`].
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, ApiError> {
        self.send(ApiRequest::get(url)).await?.json()
    }

    /// `POST url` with a JSON body, returning the raw response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Encode`].
    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(url).with_json(body)?).await
    }

    /// `PUT url` with a JSON body, returning the raw response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Encode`].
    pub async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(url).with_json(body)?).await
    }
}
