//! HTTP implementation of [`BillsStore`] for the browser build.

use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use log::debug;
use serde::de::DeserializeOwned;
use shared::{Bill, UpdateBillRequest, UploadResult};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use super::session::SessionProvider;
use super::store::{BillsStore, StoreError, StoreResult, UploadRequest};

/// API client for the bills endpoints
#[derive(Clone)]
pub struct HttpStore {
    base_url: String,
    session: Rc<dyn SessionProvider>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, session: Rc<dyn SessionProvider>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(request: Request) -> StoreResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(target: "store", "Server error {}: {}", status, message);
            Err(StoreError::Http { status, message })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Browser(format!("{:?}", value))
}

/// Multipart body carrying the receipt and its owner
fn upload_form(request: &UploadRequest) -> StoreResult<FormData> {
    let bytes = js_sys::Uint8Array::from(request.file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&request.file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &blob, request.file.file_name())
        .map_err(js_error)?;
    form.append_with_str("email", &request.email).map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl BillsStore for HttpStore {
    async fn list(&self) -> StoreResult<Vec<Bill>> {
        let url = format!("{}/bills", self.base_url);
        debug!(target: "store", "GET {}", url);
        let request = self
            .authorized(Request::get(&url))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::decode(Self::send(request).await?).await
    }

    async fn create(&self, request: UploadRequest) -> StoreResult<UploadResult> {
        let url = format!("{}/bills", self.base_url);
        debug!(target: "store", "POST {} ({})", url, request.file.file_name());
        let form = upload_form(&request)?;
        let request = self
            .authorized(Request::post(&url))
            .body(form)
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::decode(Self::send(request).await?).await
    }

    async fn update(&self, request: UpdateBillRequest) -> StoreResult<()> {
        let url = format!("{}/bills/{}", self.base_url, request.selector);
        debug!(target: "store", "PATCH {}", url);
        let request = self
            .authorized(Request::patch(&url))
            .header("Content-Type", "application/json")
            .body(request.data)
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::send(request).await?;
        Ok(())
    }
}
