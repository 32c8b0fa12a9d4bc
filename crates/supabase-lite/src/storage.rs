//! Object storage: uploads with progress, public URLs, removal.

use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Blob, Event, ProgressEvent, XmlHttpRequest};

use crate::client::Client;
use crate::error::{error_message, parse_body, ServiceError, ServiceResult};

/// Bucket-level object storage contract.
#[async_trait(?Send)]
pub trait ObjectStorage {
    type Body;

    /// Upload `body` to `bucket/path`, reporting progress as a 0-100 percentage.
    /// Returns the object's public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: &Self::Body,
        content_type: &str,
        on_progress: Rc<dyn Fn(u8)>,
    ) -> ServiceResult<String>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> ServiceResult<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Inverse of `public_url`; `None` for URLs outside the bucket.
    fn object_path(&self, bucket: &str, public_url: &str) -> Option<String>;
}

pub fn public_object_url(storage_url: &str, bucket: &str, path: &str) -> String {
    format!("{}/object/public/{}/{}", storage_url, bucket, path.trim_start_matches('/'))
}

pub fn object_path_from_url(storage_url: &str, bucket: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/object/public/{}/", storage_url, bucket);
    url.strip_prefix(&prefix)
        .map(|path| path.split(['?', '#']).next().unwrap_or(path))
        .filter(|path| !path.is_empty())
        .map(str::to_string)
}

pub fn progress_percent(loaded: f64, total: f64) -> u8 {
    if total <= 0.0 {
        return 0;
    }
    ((loaded / total) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Serialize)]
struct RemoveBody<'a> {
    prefixes: &'a [String],
}

type UploadSender = Rc<RefCell<Option<oneshot::Sender<ServiceResult<()>>>>>;

fn finish(sender: &UploadSender, result: ServiceResult<()>) {
    if let Some(tx) = sender.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

#[async_trait(?Send)]
impl ObjectStorage for Client {
    type Body = Blob;

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: &Blob,
        content_type: &str,
        on_progress: Rc<dyn Fn(u8)>,
    ) -> ServiceResult<String> {
        let url = format!("{}/object/{}/{}", self.config().storage_url(), bucket, path);

        let xhr = XmlHttpRequest::new()?;
        xhr.open_with_async("POST", &url, true)?;
        xhr.set_request_header("apikey", self.config().anon_key())?;
        xhr.set_request_header("Authorization", &format!("Bearer {}", self.bearer()))?;
        xhr.set_request_header("Content-Type", content_type)?;
        xhr.set_request_header("x-upsert", "false")?;

        let (tx, rx) = oneshot::channel();
        let sender: UploadSender = Rc::new(RefCell::new(Some(tx)));

        let on_upload_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
            if ev.length_computable() {
                on_progress(progress_percent(ev.loaded(), ev.total()));
            }
        });
        xhr.upload()?
            .set_onprogress(Some(on_upload_progress.as_ref().unchecked_ref()));

        let on_load = {
            let sender = Rc::clone(&sender);
            let xhr = xhr.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let status = xhr.status().unwrap_or(0);
                let body = xhr.response_text().ok().flatten().unwrap_or_default();
                finish(&sender, parse_body(status, &body).map(|_| ()));
            })
        };
        xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let on_error = {
            let sender = Rc::clone(&sender);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                finish(&sender, Err(ServiceError::Network("upload failed".to_string())));
            })
        };
        xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        xhr.send_with_opt_blob(Some(body))?;

        let result = rx
            .await
            .unwrap_or_else(|_| Err(ServiceError::Network("upload aborted".to_string())));

        // Closures must outlive the request.
        drop((on_upload_progress, on_load, on_error));

        result?;
        log::debug!("uploaded {}/{}", bucket, path);
        Ok(self.public_url(bucket, path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> ServiceResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let url = format!("{}/object/{}", self.config().storage_url(), bucket);
        let response = self
            .authorize(Request::delete(&url))
            .json(&RemoveBody { prefixes: paths })?
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(ServiceError::Rejected { status, message: error_message(&text) });
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_object_url(&self.config().storage_url(), bucket, path)
    }

    fn object_path(&self, bucket: &str, public_url: &str) -> Option<String> {
        object_path_from_url(&self.config().storage_url(), bucket, public_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORAGE: &str = "https://abc.supabase.co/storage/v1";

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_object_url(STORAGE, "project-media", "videos/a.mp4"),
            "https://abc.supabase.co/storage/v1/object/public/project-media/videos/a.mp4"
        );
    }

    #[test]
    fn test_object_path_from_url() {
        let url = public_object_url(STORAGE, "project-media", "videos/a.mp4");
        assert_eq!(
            object_path_from_url(STORAGE, "project-media", &url).as_deref(),
            Some("videos/a.mp4")
        );
        assert_eq!(
            object_path_from_url(STORAGE, "project-media", &format!("{}?t=1", url)).as_deref(),
            Some("videos/a.mp4")
        );
        assert_eq!(object_path_from_url(STORAGE, "other", &url), None);
        assert_eq!(object_path_from_url(STORAGE, "project-media", "https://youtu.be/x"), None);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 0.0), 0);
        assert_eq!(progress_percent(50.0, 200.0), 25);
        assert_eq!(progress_percent(1.0, 3.0), 33);
        assert_eq!(progress_percent(300.0, 200.0), 100);
    }
}
