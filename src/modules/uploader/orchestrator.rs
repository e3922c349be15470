use tracing::{info, warn};

use crate::features::gallery::dtos::GalleryImageResponseDto;
use crate::features::gallery::models::Category;
use crate::modules::uploader::transport::{CreateGalleryRequest, UploadError, UploadTransport};

/// One locally selected file
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A full submission: metadata plus the selected files
#[derive(Debug, Clone)]
pub struct UploadPlan {
    pub title: String,
    pub category: Category,
    pub keywords: Vec<String>,
    pub files: Vec<UploadItem>,
}

/// Per-file lifecycle as surfaced to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

/// Receives status transitions and progress percentages during a run
pub trait UploadObserver: Send + Sync {
    fn on_status(&self, index: usize, status: FileStatus);
    fn on_progress(&self, index: usize, percent: u8);
}

/// Observer that ignores everything
impl UploadObserver for () {
    fn on_status(&self, _index: usize, _status: FileStatus) {}
    fn on_progress(&self, _index: usize, _percent: u8) {}
}

/// Sequences a gallery submission against an [`UploadTransport`].
///
/// Per file: presign (terminal on failure), then PUT with up to
/// [`Self::MAX_ATTEMPTS`] attempts. Any exhausted retry budget aborts the
/// whole submission before the record-creation call, so partial submissions
/// are never committed.
pub struct UploadOrchestrator<T: UploadTransport> {
    transport: T,
    max_attempts: u32,
}

impl<T: UploadTransport> UploadOrchestrator<T> {
    pub const MAX_ATTEMPTS: u32 = 3;

    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_attempts: Self::MAX_ATTEMPTS,
        }
    }

    #[cfg(test)]
    fn with_max_attempts(transport: T, max_attempts: u32) -> Self {
        Self {
            transport,
            max_attempts,
        }
    }

    pub async fn run(
        &self,
        plan: UploadPlan,
        observer: &dyn UploadObserver,
    ) -> Result<GalleryImageResponseDto, UploadError> {
        if plan.files.is_empty() {
            return Err(UploadError::Invalid(
                "Select at least one file to upload".to_string(),
            ));
        }
        if plan.title.trim().is_empty() {
            return Err(UploadError::Invalid("Title is required".to_string()));
        }

        let mut uploaded_keys = Vec::with_capacity(plan.files.len());

        for (index, file) in plan.files.iter().enumerate() {
            observer.on_status(index, FileStatus::Pending);

            // Presign failure is terminal for the whole submission.
            let target = match self
                .transport
                .presign(&file.filename, &file.content_type)
                .await
            {
                Ok(target) => target,
                Err(e) => {
                    observer.on_status(index, FileStatus::Error);
                    return Err(e);
                }
            };

            // Only mark uploading once the presign succeeded.
            observer.on_status(index, FileStatus::Uploading);

            let mut attempts = 0;
            let mut last_error: Option<UploadError> = None;
            let uploaded = loop {
                attempts += 1;
                let result = self
                    .transport
                    .put(
                        &target.upload_url,
                        &file.content_type,
                        file.data.clone(),
                        &|percent| observer.on_progress(index, percent),
                    )
                    .await;

                match result {
                    Ok(()) => break true,
                    Err(e) => {
                        warn!(
                            "Upload attempt {}/{} failed for '{}': {}",
                            attempts, self.max_attempts, file.filename, e
                        );
                        last_error = Some(e);
                        if attempts >= self.max_attempts {
                            break false;
                        }
                    }
                }
            };

            if !uploaded {
                observer.on_status(index, FileStatus::Error);
                return Err(last_error
                    .unwrap_or_else(|| UploadError::Transfer("Upload failed".to_string())));
            }

            observer.on_progress(index, 100);
            observer.on_status(index, FileStatus::Success);
            uploaded_keys.push(target.object_key);
        }

        info!(
            "All {} file(s) uploaded, creating gallery record",
            uploaded_keys.len()
        );

        self.transport
            .create_item(CreateGalleryRequest {
                title: plan.title,
                category: plan.category,
                keywords: plan.keywords,
                image_keys: uploaded_keys,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::features::gallery::dtos::PresignUploadResponseDto;

    /// Scripted transport: fails the PUT for a chosen filename a chosen
    /// number of times, records every call.
    #[derive(Default)]
    struct ScriptedTransport {
        fail_presign_for: Option<String>,
        fail_put_for: Option<String>,
        put_failures: u32,
        put_attempts: AtomicU32,
        created: Mutex<Vec<CreateGalleryRequest>>,
    }

    #[async_trait]
    impl UploadTransport for ScriptedTransport {
        async fn presign(
            &self,
            filename: &str,
            _content_type: &str,
        ) -> Result<PresignUploadResponseDto, UploadError> {
            if self.fail_presign_for.as_deref() == Some(filename) {
                return Err(UploadError::Presign("scripted presign failure".to_string()));
            }
            Ok(PresignUploadResponseDto {
                upload_url: format!("http://storage.local/{}", filename),
                object_key: format!("public/gallery/{}", filename),
            })
        }

        async fn put(
            &self,
            upload_url: &str,
            _content_type: &str,
            data: Vec<u8>,
            progress: &(dyn Fn(u8) + Send + Sync),
        ) -> Result<(), UploadError> {
            if let Some(name) = self.fail_put_for.as_deref() {
                if upload_url.ends_with(name) {
                    let attempt = self.put_attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if attempt <= self.put_failures {
                        return Err(UploadError::Transfer(
                            "scripted transfer failure".to_string(),
                        ));
                    }
                }
            }
            progress(50);
            let _ = data;
            Ok(())
        }

        async fn create_item(
            &self,
            request: CreateGalleryRequest,
        ) -> Result<GalleryImageResponseDto, UploadError> {
            let image_keys = request.image_keys.clone();
            self.created.lock().unwrap().push(request);
            Ok(GalleryImageResponseDto {
                id: Uuid::new_v4(),
                design_id: "BALLOON-001".to_string(),
                title: "scripted".to_string(),
                category: "birthdays".to_string(),
                keywords: vec![],
                image_urls: image_keys.clone(),
                image_keys,
                created_at: Utc::now(),
            })
        }
    }

    /// Observer recording every status transition and progress report
    #[derive(Default)]
    struct RecordingObserver {
        statuses: Mutex<Vec<(usize, FileStatus)>>,
        progress: Mutex<Vec<(usize, u8)>>,
    }

    impl UploadObserver for RecordingObserver {
        fn on_status(&self, index: usize, status: FileStatus) {
            self.statuses.lock().unwrap().push((index, status));
        }
        fn on_progress(&self, index: usize, percent: u8) {
            self.progress.lock().unwrap().push((index, percent));
        }
    }

    fn plan(filenames: &[&str]) -> UploadPlan {
        UploadPlan {
            title: "Birthday arch".to_string(),
            category: Category::Birthdays,
            keywords: vec!["arch".to_string()],
            files: filenames
                .iter()
                .map(|name| UploadItem {
                    filename: name.to_string(),
                    content_type: "image/jpeg".to_string(),
                    data: vec![0u8; 128],
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn all_files_succeed_creates_one_record_with_all_keys() {
        let transport = ScriptedTransport::default();
        let orchestrator = UploadOrchestrator::new(transport);
        let observer = RecordingObserver::default();

        let created = orchestrator
            .run(plan(&["a.jpg", "b.jpg", "c.jpg"]), &observer)
            .await
            .unwrap();

        assert_eq!(created.image_keys.len(), 3);
        assert_eq!(created.image_keys[0], "public/gallery/a.jpg");
        assert_eq!(created.image_keys[2], "public/gallery/c.jpg");

        let statuses = observer.statuses.lock().unwrap();
        assert!(statuses.contains(&(2, FileStatus::Success)));
    }

    #[tokio::test]
    async fn transient_failure_retries_then_succeeds() {
        let transport = ScriptedTransport {
            fail_put_for: Some("a.jpg".to_string()),
            put_failures: 2,
            ..Default::default()
        };
        let orchestrator = UploadOrchestrator::new(transport);

        let created = orchestrator.run(plan(&["a.jpg"]), &()).await.unwrap();

        assert_eq!(created.image_keys.len(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_abort_without_creating_a_record() {
        let transport = ScriptedTransport {
            fail_put_for: Some("b.jpg".to_string()),
            put_failures: 3,
            ..Default::default()
        };
        let orchestrator = UploadOrchestrator::new(transport);
        let observer = RecordingObserver::default();

        let err = orchestrator
            .run(plan(&["a.jpg", "b.jpg"]), &observer)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Transfer(_)));
        assert_eq!(
            orchestrator.transport.put_attempts.load(Ordering::SeqCst),
            3
        );
        assert!(orchestrator.transport.created.lock().unwrap().is_empty());

        let statuses = observer.statuses.lock().unwrap();
        assert!(statuses.contains(&(0, FileStatus::Success)));
        assert!(statuses.contains(&(1, FileStatus::Error)));
    }

    #[tokio::test]
    async fn presign_failure_aborts_immediately_without_put() {
        let transport = ScriptedTransport {
            fail_presign_for: Some("a.jpg".to_string()),
            ..Default::default()
        };
        let orchestrator = UploadOrchestrator::new(transport);
        let observer = RecordingObserver::default();

        let err = orchestrator.run(plan(&["a.jpg"]), &observer).await.unwrap_err();

        assert!(matches!(err, UploadError::Presign(_)));
        assert_eq!(
            orchestrator.transport.put_attempts.load(Ordering::SeqCst),
            0
        );
        assert!(orchestrator.transport.created.lock().unwrap().is_empty());

        // The file never transitions to uploading when presign fails.
        let statuses = observer.statuses.lock().unwrap();
        assert!(!statuses.contains(&(0, FileStatus::Uploading)));
        assert!(statuses.contains(&(0, FileStatus::Error)));
    }

    #[tokio::test]
    async fn empty_plan_is_rejected() {
        let orchestrator = UploadOrchestrator::new(ScriptedTransport::default());
        let err = orchestrator.run(plan(&[]), &()).await.unwrap_err();
        assert!(matches!(err, UploadError::Invalid(_)));
    }

    #[tokio::test]
    async fn custom_attempt_budget_is_honored() {
        let transport = ScriptedTransport {
            fail_put_for: Some("a.jpg".to_string()),
            put_failures: 1,
            ..Default::default()
        };
        let orchestrator = UploadOrchestrator::with_max_attempts(transport, 1);

        assert!(orchestrator.run(plan(&["a.jpg"]), &()).await.is_err());
        assert_eq!(
            orchestrator.transport.put_attempts.load(Ordering::SeqCst),
            1
        );
    }
}
