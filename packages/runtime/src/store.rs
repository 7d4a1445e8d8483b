//! Persistence boundary and its in-memory test double.

use crate::auth::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formcraft_model::Project;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilter {
    /// Case-insensitive title substring.
    pub title_contains: Option<String>,
}

impl ListFilter {
    fn matches(&self, project: &Project) -> bool {
        match &self.title_contains {
            Some(needle) => project
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
}

/// What a listing shows without loading the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub title: String,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub page_count: usize,
    pub field_count: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            version: project.version,
            updated_at: project.updated_at,
            page_count: project.pages.len(),
            field_count: project.fields.len(),
        }
    }
}

/// Persistence collaborator. Implementations live outside the core.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Persist a document, returning the stored copy.
    async fn save(&self, project: &Project) -> Result<Project, StoreError>;

    /// `None` when the id is unknown; that is not an error.
    async fn load(&self, id: &str) -> Result<Option<Project>, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Documents the given user owns or collaborates on, newest first.
    async fn list(
        &self,
        owner: &UserId,
        pagination: Pagination,
        filter: ListFilter,
    ) -> Result<PageOf<ProjectSummary>, StoreError>;
}

/// In-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Mutex<HashMap<String, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn save(&self, project: &Project) -> Result<Project, StoreError> {
        let mut projects = self
            .projects
            .lock()
            .map_err(|_| StoreError::Other("store poisoned".to_string()))?;
        projects.insert(project.id.clone(), project.clone());
        Ok(project.clone())
    }

    async fn load(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let projects = self
            .projects
            .lock()
            .map_err(|_| StoreError::Other("store poisoned".to_string()))?;
        Ok(projects.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut projects = self
            .projects
            .lock()
            .map_err(|_| StoreError::Other("store poisoned".to_string()))?;
        projects.remove(id);
        Ok(())
    }

    async fn list(
        &self,
        owner: &UserId,
        pagination: Pagination,
        filter: ListFilter,
    ) -> Result<PageOf<ProjectSummary>, StoreError> {
        let projects = self
            .projects
            .lock()
            .map_err(|_| StoreError::Other("store poisoned".to_string()))?;

        let mut matching: Vec<&Project> = projects
            .values()
            .filter(|p| {
                p.created_by.as_deref() == Some(owner.as_str())
                    || p.collaborators.iter().any(|c| c == owner.as_str())
            })
            .filter(|p| filter.matches(p))
            .collect();
        // Newest first; id as the tie-breaker keeps paging stable.
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(pagination.offset)
            .take(pagination.limit)
            .map(ProjectSummary::from)
            .collect();

        Ok(PageOf {
            items,
            total,
            offset: pagination.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned_project(title: &str, owner: &str) -> Project {
        let mut project = Project::new(title);
        project.created_by = Some(owner.to_string());
        project
    }

    #[tokio::test]
    async fn test_save_load_delete_round_trip() {
        let store = MemoryStore::new();
        let project = owned_project("Survey", "user-1");

        store.save(&project).await.unwrap();
        let loaded = store.load(&project.id).await.unwrap();
        assert_eq!(loaded, Some(project.clone()));

        store.delete(&project.id).await.unwrap();
        assert_eq!(store.load(&project.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_unknown_id_is_none_not_error() {
        let store = MemoryStore::new();
        assert_eq!(store.load("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_scopes_to_owner_and_filters() {
        let store = MemoryStore::new();
        store.save(&owned_project("Alpha Survey", "user-1")).await.unwrap();
        store.save(&owned_project("Beta Form", "user-1")).await.unwrap();
        store.save(&owned_project("Gamma Survey", "user-2")).await.unwrap();

        let page = store
            .list(
                &UserId::new("user-1"),
                Pagination::default(),
                ListFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);

        let page = store
            .list(
                &UserId::new("user-1"),
                Pagination::default(),
                ListFilter {
                    title_contains: Some("survey".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Alpha Survey");
    }

    #[tokio::test]
    async fn test_collaborators_see_shared_projects() {
        let store = MemoryStore::new();
        let mut project = owned_project("Shared", "user-1");
        project.collaborators.push("user-2".to_string());
        store.save(&project).await.unwrap();

        let page = store
            .list(
                &UserId::new("user-2"),
                Pagination::default(),
                ListFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_pagination_windows() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .save(&owned_project(&format!("Form {}", i), "user-1"))
                .await
                .unwrap();
        }

        let page = store
            .list(
                &UserId::new("user-1"),
                Pagination { offset: 3, limit: 2 },
                ListFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.offset, 3);
    }
}
