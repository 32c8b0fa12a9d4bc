//! Media Commands
//!
//! Project video uploads into object storage.

use std::rc::Rc;
use supabase_lite::{ObjectStorage, ServiceError};
use thiserror::Error;
use uuid::Uuid;

pub const VIDEO_BUCKET: &str = "project-media";
/// 100 MiB
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("Please upload a valid video file")]
    NotVideo,
    #[error("Video file size must be less than 100MB")]
    TooLarge,
    #[error("Error uploading video: {0}")]
    Service(#[from] ServiceError),
}

/// What we know about a picked file before touching the network.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl VideoFile {
    pub fn validate(&self) -> Result<(), UploadError> {
        if !self.mime.starts_with("video/") {
            return Err(UploadError::NotVideo);
        }
        if self.size > MAX_VIDEO_BYTES {
            return Err(UploadError::TooLarge);
        }
        Ok(())
    }

    /// File extension from the name, else the MIME subtype.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .or_else(|| self.mime.strip_prefix("video/"))
            .unwrap_or("mp4")
            .to_ascii_lowercase()
    }
}

/// `videos/<uuid>.<ext>`
pub fn video_path(file: &VideoFile) -> String {
    format!("videos/{}.{}", Uuid::new_v4(), file.extension())
}

/// Validate, then upload. Returns the public URL for the draft.
pub async fn upload_video<S: ObjectStorage + ?Sized>(
    storage: &S,
    file: &VideoFile,
    body: &S::Body,
    on_progress: Rc<dyn Fn(u8)>,
) -> Result<String, UploadError> {
    file.validate()?;
    let path = video_path(file);
    let url = storage
        .upload(VIDEO_BUCKET, &path, body, &file.mime, on_progress)
        .await?;
    log::info!("uploaded video {} ({} bytes)", path, file.size);
    Ok(url)
}

/// Videos touched while one project form is open.
///
/// An upload only becomes referenced when the form is saved, and a saved
/// video stops being referenced when it is replaced or removed. Whatever is
/// left unreferenced is handed back for deletion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoSession {
    saved: Option<String>,
    uploaded: Vec<String>,
}

impl VideoSession {
    pub fn new(saved: Option<String>) -> Self {
        Self { saved: saved.filter(|url| !url.is_empty()), uploaded: Vec::new() }
    }

    pub fn record_upload(&mut self, url: String) {
        self.uploaded.push(url);
    }

    /// The form was saved with `kept` as its video (empty for none).
    pub fn take_after_save(&mut self, kept: &str) -> Vec<String> {
        let mut orphans: Vec<String> = self.saved.take().into_iter().chain(self.uploaded.drain(..)).collect();
        orphans.retain(|url| url != kept);
        orphans.dedup();
        self.saved = (!kept.is_empty()).then(|| kept.to_string());
        orphans
    }

    /// The form was closed without saving: this session's uploads are unused.
    pub fn take_after_cancel(&mut self) -> Vec<String> {
        let saved = self.saved.clone();
        self.uploaded.drain(..).filter(|url| Some(url) != saved.as_ref()).collect()
    }
}

/// Remove videos hosted in the project bucket. Other URLs are left alone and
/// a failed removal is only logged.
pub async fn discard_videos<S: ObjectStorage + ?Sized>(storage: &S, urls: &[String]) {
    let paths: Vec<String> = urls
        .iter()
        .filter_map(|url| storage.object_path(VIDEO_BUCKET, url))
        .collect();
    if paths.is_empty() {
        return;
    }
    match storage.remove(VIDEO_BUCKET, &paths).await {
        Ok(()) => log::info!("removed {} unused video(s)", paths.len()),
        Err(e) => log::error!("failed to remove unused videos {:?}: {}", paths, e),
    }
}
