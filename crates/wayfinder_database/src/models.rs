//! Diesel models for the site content hierarchy.
//!
//! Row structs are read-only views with getters; `New*` structs are the
//! insertable shapes. The generation pipeline never creates sites, pages,
//! or sections, so only `NewSectionContent` is exercised by the worker.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Database row for the sites table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, derive_getters::Getters)]
#[diesel(table_name = crate::schema::sites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteRow {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) subdomain: String,
    pub(crate) site_type: String,
    pub(crate) status: String,
    pub(crate) languages: Vec<String>,
    pub(crate) default_language: String,
    pub(crate) features: Value,
    pub(crate) theme: Value,
    pub(crate) seo_settings: Value,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Database row for the pages table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, derive_getters::Getters)]
#[diesel(table_name = crate::schema::pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PageRow {
    pub(crate) id: Uuid,
    pub(crate) site_id: Uuid,
    pub(crate) page_type: String,
    pub(crate) slug: String,
    pub(crate) status: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Database row for the templates table.
///
/// Templates are shared across sites and treated as immutable during
/// generation.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, derive_getters::Getters)]
#[diesel(table_name = crate::schema::templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateRow {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) component_name: String,
    pub(crate) category: String,
    pub(crate) schema: Value,
    pub(crate) system_prompt: String,
    pub(crate) user_prompt_template: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl TemplateRow {
    /// Converts this row into the prompt-facing template shape.
    pub fn to_spec(&self) -> wayfinder_core::TemplateSpec {
        wayfinder_core::TemplateSpec::new(
            self.id,
            &self.name,
            &self.category,
            &self.system_prompt,
            &self.user_prompt_template,
            self.schema.clone(),
        )
    }
}

/// Database row for the sections table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, derive_getters::Getters)]
#[diesel(table_name = crate::schema::sections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SectionRow {
    pub(crate) id: Uuid,
    pub(crate) page_id: Uuid,
    pub(crate) template_id: Uuid,
    pub(crate) position: i32,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Database row for the section_contents table.
///
/// At most one row exists per (section_id, language); the upsert path relies
/// on the unique constraint rather than find-then-write.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize, derive_getters::Getters)]
#[diesel(table_name = crate::schema::section_contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SectionContentRow {
    pub(crate) id: Uuid,
    pub(crate) section_id: Uuid,
    pub(crate) language: String,
    pub(crate) data: Value,
    pub(crate) image_urls: Vec<String>,
    pub(crate) generated_by: String,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) version: i32,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Insertable struct for a new site.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::sites)]
pub struct NewSite {
    pub name: String,
    pub subdomain: String,
    pub site_type: String,
    pub status: String,
    pub languages: Vec<String>,
    pub default_language: String,
    pub features: Value,
    pub theme: Value,
    pub seo_settings: Value,
}

/// Insertable struct for a new page.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::pages)]
pub struct NewPage {
    pub site_id: Uuid,
    pub page_type: String,
    pub slug: String,
    pub status: String,
}

/// Insertable struct for a new template.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::templates)]
pub struct NewTemplate {
    pub name: String,
    pub component_name: String,
    pub category: String,
    pub schema: Value,
    pub system_prompt: String,
    pub user_prompt_template: String,
    pub is_active: bool,
}

/// Insertable struct for a new section.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::sections)]
pub struct NewSection {
    pub page_id: Uuid,
    pub template_id: Uuid,
    pub position: i32,
}

/// Insertable struct for generated section content.
///
/// `version` and `generated_at` are filled by the upsert: version starts at
/// 1 on insert and is bumped on conflict.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::section_contents)]
pub struct NewSectionContent {
    pub section_id: Uuid,
    pub language: String,
    pub data: Value,
    pub image_urls: Vec<String>,
    pub generated_by: String,
}
