//! In-memory implementation of `ContentRepository` for testing.
//!
//! HashMap-backed storage behind tokio RwLocks. Seeding helpers build the
//! site hierarchy that the production schema gets from the site-builder
//! flows. All data is lost when the repository is dropped.

use crate::models::{
    NewPage, NewSection, NewSectionContent, NewSite, NewTemplate, PageRow, SectionContentRow,
    SectionRow, SiteRow, TemplateRow,
};
use crate::repository::ContentRepository;
use crate::DatabaseResult;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfinder_core::SiteStatus;
use wayfinder_error::{DatabaseError, DatabaseErrorKind};

/// In-memory repository mirroring the diesel contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sites: Arc<RwLock<HashMap<Uuid, SiteRow>>>,
    pages: Arc<RwLock<HashMap<Uuid, PageRow>>>,
    templates: Arc<RwLock<HashMap<Uuid, TemplateRow>>>,
    sections: Arc<RwLock<HashMap<Uuid, SectionRow>>>,
    contents: Arc<RwLock<HashMap<(Uuid, String), SectionContentRow>>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a site, returning the stored row.
    pub async fn insert_site(&self, new: NewSite) -> SiteRow {
        let now = Utc::now();
        let row = SiteRow {
            id: Uuid::new_v4(),
            name: new.name,
            subdomain: new.subdomain,
            site_type: new.site_type,
            status: new.status,
            languages: new.languages,
            default_language: new.default_language,
            features: new.features,
            theme: new.theme,
            seo_settings: new.seo_settings,
            created_at: now,
            updated_at: now,
        };
        self.sites.write().await.insert(row.id, row.clone());
        row
    }

    /// Seeds a page.
    pub async fn insert_page(&self, new: NewPage) -> PageRow {
        let now = Utc::now();
        let row = PageRow {
            id: Uuid::new_v4(),
            site_id: new.site_id,
            page_type: new.page_type,
            slug: new.slug,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.pages.write().await.insert(row.id, row.clone());
        row
    }

    /// Seeds a template.
    pub async fn insert_template(&self, new: NewTemplate) -> TemplateRow {
        let now = Utc::now();
        let row = TemplateRow {
            id: Uuid::new_v4(),
            name: new.name,
            component_name: new.component_name,
            category: new.category,
            schema: new.schema,
            system_prompt: new.system_prompt,
            user_prompt_template: new.user_prompt_template,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        };
        self.templates.write().await.insert(row.id, row.clone());
        row
    }

    /// Seeds a section.
    pub async fn insert_section(&self, new: NewSection) -> SectionRow {
        let now = Utc::now();
        let row = SectionRow {
            id: Uuid::new_v4(),
            page_id: new.page_id,
            template_id: new.template_id,
            position: new.position,
            created_at: now,
            updated_at: now,
        };
        self.sections.write().await.insert(row.id, row.clone());
        row
    }

    /// Number of stored content rows (for testing).
    pub async fn content_count(&self) -> usize {
        self.contents.read().await.len()
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn get_site(&self, site_id: Uuid) -> DatabaseResult<Option<SiteRow>> {
        Ok(self.sites.read().await.get(&site_id).cloned())
    }

    async fn get_page(&self, page_id: Uuid) -> DatabaseResult<Option<PageRow>> {
        Ok(self.pages.read().await.get(&page_id).cloned())
    }

    async fn list_pages(&self, site_id: Uuid) -> DatabaseResult<Vec<PageRow>> {
        let pages = self.pages.read().await;
        let mut rows: Vec<PageRow> = pages
            .values()
            .filter(|p| p.site_id == site_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.created_at);
        Ok(rows)
    }

    async fn get_section(&self, section_id: Uuid) -> DatabaseResult<Option<SectionRow>> {
        Ok(self.sections.read().await.get(&section_id).cloned())
    }

    async fn list_sections(&self, page_id: Uuid) -> DatabaseResult<Vec<SectionRow>> {
        let sections = self.sections.read().await;
        let mut rows: Vec<SectionRow> = sections
            .values()
            .filter(|s| s.page_id == page_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.position);
        Ok(rows)
    }

    async fn get_template(&self, template_id: Uuid) -> DatabaseResult<Option<TemplateRow>> {
        Ok(self.templates.read().await.get(&template_id).cloned())
    }

    async fn find_section_content(
        &self,
        section_id: Uuid,
        language: &str,
    ) -> DatabaseResult<Option<SectionContentRow>> {
        Ok(self
            .contents
            .read()
            .await
            .get(&(section_id, language.to_string()))
            .cloned())
    }

    async fn upsert_section_content(
        &self,
        input: NewSectionContent,
    ) -> DatabaseResult<SectionContentRow> {
        let now = Utc::now();
        let key = (input.section_id, input.language.clone());
        let mut contents = self.contents.write().await;

        let row = match contents.get(&key) {
            Some(existing) => SectionContentRow {
                id: existing.id,
                section_id: input.section_id,
                language: input.language,
                data: input.data,
                image_urls: input.image_urls,
                generated_by: input.generated_by,
                generated_at: now,
                version: existing.version + 1,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => SectionContentRow {
                id: Uuid::new_v4(),
                section_id: input.section_id,
                language: input.language,
                data: input.data,
                image_urls: input.image_urls,
                generated_by: input.generated_by,
                generated_at: now,
                version: 1,
                created_at: now,
                updated_at: now,
            },
        };

        contents.insert(key, row.clone());
        Ok(row)
    }

    async fn update_site_status(&self, site_id: Uuid, status: SiteStatus) -> DatabaseResult<()> {
        let mut sites = self.sites.write().await;
        let site = sites
            .get_mut(&site_id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        site.status = status.as_str().to_string();
        site.updated_at = Utc::now();
        Ok(())
    }
}
