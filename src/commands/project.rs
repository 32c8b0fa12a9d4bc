//! Project Commands

use serde::Serialize;
use supabase_lite::{Filter, ObjectStorage, Query, ServiceResult, TableApi};

use super::{discard_videos, non_empty, to_row};
use crate::models::{Project, ProjectCategory};
use crate::store::Record;

/// Editable project fields. Blank URLs are sent as null.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub image_url: String,
    pub video_url: String,
    pub demo_url: String,
    pub code_url: String,
}

#[derive(Serialize)]
struct ProjectRow<'a> {
    title: &'a str,
    description: &'a str,
    category: ProjectCategory,
    image_url: Option<String>,
    video_url: Option<String>,
    demo_url: Option<String>,
    code_url: Option<String>,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            category: project.category,
            image_url: text(&project.image_url),
            video_url: text(&project.video_url),
            demo_url: text(&project.demo_url),
            code_url: text(&project.code_url),
        }
    }

    fn row(&self) -> ProjectRow<'_> {
        ProjectRow {
            title: self.title.trim(),
            description: &self.description,
            category: self.category,
            image_url: non_empty(&self.image_url),
            video_url: non_empty(&self.video_url),
            demo_url: non_empty(&self.demo_url),
            code_url: non_empty(&self.code_url),
        }
    }
}

/// Newest first
pub fn project_query() -> Query {
    Query::new().order("created_at", false)
}

pub async fn create_project<A: TableApi + ?Sized>(api: &A, draft: &ProjectDraft) -> ServiceResult<()> {
    api.insert(Project::TABLE, vec![to_row(&draft.row())?]).await
}

pub async fn update_project<A: TableApi + ?Sized>(api: &A, id: &str, draft: &ProjectDraft) -> ServiceResult<()> {
    api.update(Project::TABLE, to_row(&draft.row())?, &[Filter::eq("id", id)])
        .await
}

/// Delete the row, then its uploaded video if it lives in the project bucket.
/// A failed video removal is logged; the row is already gone.
pub async fn delete_project<A, S>(api: &A, storage: &S, project: &Project) -> ServiceResult<()>
where
    A: TableApi + ?Sized,
    S: ObjectStorage + ?Sized,
{
    api.delete(Project::TABLE, &[Filter::eq("id", &project.id)]).await?;

    if let Some(url) = &project.video_url {
        discard_videos(storage, std::slice::from_ref(url)).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeApi, FakeStorage};
    use crate::commands::VIDEO_BUCKET;
    use serde_json::json;

    fn project(video_url: Option<&str>) -> Project {
        Project {
            id: "p1".into(),
            title: "Shop".into(),
            description: "".into(),
            category: ProjectCategory::WebDesign,
            image_url: None,
            video_url: video_url.map(str::to_string),
            demo_url: None,
            code_url: None,
            created_at: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_sends_nulls_for_blank_urls() {
        let api = FakeApi::default();
        let draft = ProjectDraft {
            title: " Shop ".into(),
            description: "Rebuilt checkout".into(),
            category: ProjectCategory::UiUx,
            demo_url: "https://shop.example".into(),
            ..Default::default()
        };
        create_project(&api, &draft).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::Insert {
                table: "projects".into(),
                rows: vec![json!({
                    "title": "Shop",
                    "description": "Rebuilt checkout",
                    "category": "ui-ux",
                    "image_url": null,
                    "video_url": null,
                    "demo_url": "https://shop.example",
                    "code_url": null
                })],
            }]
        );
    }

    #[tokio::test]
    async fn test_update_targets_id() {
        let api = FakeApi::default();
        let draft = ProjectDraft::from_project(&project(None));
        update_project(&api, "p1", &draft).await.unwrap();
        match &api.calls()[0] {
            Call::Update { table, filters, .. } => {
                assert_eq!(table, "projects");
                assert_eq!(filters, &vec!["id=eq.p1".to_string()]);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_removes_hosted_video() {
        let api = FakeApi::default();
        let storage = FakeStorage::default();
        let url = storage.public_url(VIDEO_BUCKET, "videos/abc.mp4");

        delete_project(&api, &storage, &project(Some(&url))).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::Delete { table: "projects".into(), filters: vec!["id=eq.p1".into()] }]
        );
        assert_eq!(
            storage.removals.borrow().clone(),
            vec![("project-media".to_string(), vec!["videos/abc.mp4".to_string()])]
        );
    }

    #[tokio::test]
    async fn test_delete_leaves_external_video_alone() {
        let api = FakeApi::default();
        let storage = FakeStorage::default();
        delete_project(&api, &storage, &project(Some("https://youtu.be/xyz"))).await.unwrap();
        delete_project(&api, &storage, &project(None)).await.unwrap();
        assert!(storage.removals.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_row_delete_keeps_video() {
        let api = FakeApi::failing(supabase_lite::ServiceError::Network("offline".into()));
        let storage = FakeStorage::default();
        let url = storage.public_url(VIDEO_BUCKET, "videos/abc.mp4");
        assert!(delete_project(&api, &storage, &project(Some(&url))).await.is_err());
        assert!(storage.removals.borrow().is_empty());
    }
}
