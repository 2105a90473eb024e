//! The `ContentRepository` trait: everything the generation pipeline needs
//! from the relational store.
//!
//! The worker reads the site hierarchy, checks for existing content, upserts
//! generated rows, and flips site status. Site, page, and section creation
//! belong to the site-builder flows and have no operations here.

use crate::models::{
    NewSectionContent, PageRow, SectionContentRow, SectionRow, SiteRow, TemplateRow,
};
use crate::DatabaseResult;
use async_trait::async_trait;
use uuid::Uuid;
use wayfinder_core::SiteStatus;

/// Persistence operations used by the content generation pipeline.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Loads one site.
    async fn get_site(&self, site_id: Uuid) -> DatabaseResult<Option<SiteRow>>;

    /// Loads one page.
    async fn get_page(&self, page_id: Uuid) -> DatabaseResult<Option<PageRow>>;

    /// Lists a site's pages.
    async fn list_pages(&self, site_id: Uuid) -> DatabaseResult<Vec<PageRow>>;

    /// Loads one section.
    async fn get_section(&self, section_id: Uuid) -> DatabaseResult<Option<SectionRow>>;

    /// Lists a page's sections ordered by position ascending.
    async fn list_sections(&self, page_id: Uuid) -> DatabaseResult<Vec<SectionRow>>;

    /// Loads one template.
    async fn get_template(&self, template_id: Uuid) -> DatabaseResult<Option<TemplateRow>>;

    /// Finds the content row for a (section, language) pair, if any.
    async fn find_section_content(
        &self,
        section_id: Uuid,
        language: &str,
    ) -> DatabaseResult<Option<SectionContentRow>>;

    /// Inserts or updates the content row for a (section, language) pair.
    ///
    /// An existing row keeps its id, gets the new data, `generated_by`, and
    /// `generated_at`, and has its version bumped; a fresh row starts at
    /// version 1.
    async fn upsert_section_content(
        &self,
        input: NewSectionContent,
    ) -> DatabaseResult<SectionContentRow>;

    /// Sets a site's status.
    async fn update_site_status(&self, site_id: Uuid, status: SiteStatus) -> DatabaseResult<()>;
}
