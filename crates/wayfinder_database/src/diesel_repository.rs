//! Diesel-backed `ContentRepository` over a PostgreSQL pool.
//!
//! Diesel is blocking, so every operation runs on the tokio blocking pool.

use crate::connection::PgPool;
use crate::models::{
    NewSectionContent, PageRow, SectionContentRow, SectionRow, SiteRow, TemplateRow,
};
use crate::repository::ContentRepository;
use crate::schema::{pages, section_contents, sections, sites, templates};
use crate::DatabaseResult;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::instrument;
use uuid::Uuid;
use wayfinder_core::SiteStatus;
use wayfinder_error::{DatabaseError, DatabaseErrorKind};

/// Repository over a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct DieselRepository {
    pool: PgPool,
}

impl DieselRepository {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a repository from `DATABASE_URL`.
    pub fn from_env() -> DatabaseResult<Self> {
        Ok(Self::new(crate::connection::create_pool()?))
    }

    async fn run<T, F>(&self, f: F) -> DatabaseResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "blocking task failed: {e}"
            )))
        })?
    }
}

#[async_trait]
impl ContentRepository for DieselRepository {
    #[instrument(skip(self), fields(site_id = %site_id))]
    async fn get_site(&self, site_id: Uuid) -> DatabaseResult<Option<SiteRow>> {
        self.run(move |conn| {
            sites::table
                .find(site_id)
                .select(SiteRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(page_id = %page_id))]
    async fn get_page(&self, page_id: Uuid) -> DatabaseResult<Option<PageRow>> {
        self.run(move |conn| {
            pages::table
                .find(page_id)
                .select(PageRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(site_id = %site_id))]
    async fn list_pages(&self, site_id: Uuid) -> DatabaseResult<Vec<PageRow>> {
        self.run(move |conn| {
            pages::table
                .filter(pages::site_id.eq(site_id))
                .order(pages::created_at.asc())
                .select(PageRow::as_select())
                .load(conn)
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(section_id = %section_id))]
    async fn get_section(&self, section_id: Uuid) -> DatabaseResult<Option<SectionRow>> {
        self.run(move |conn| {
            sections::table
                .find(section_id)
                .select(SectionRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(page_id = %page_id))]
    async fn list_sections(&self, page_id: Uuid) -> DatabaseResult<Vec<SectionRow>> {
        self.run(move |conn| {
            sections::table
                .filter(sections::page_id.eq(page_id))
                .order(sections::position.asc())
                .select(SectionRow::as_select())
                .load(conn)
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(template_id = %template_id))]
    async fn get_template(&self, template_id: Uuid) -> DatabaseResult<Option<TemplateRow>> {
        self.run(move |conn| {
            templates::table
                .find(template_id)
                .select(TemplateRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(section_id = %section_id))]
    async fn find_section_content(
        &self,
        section_id: Uuid,
        language: &str,
    ) -> DatabaseResult<Option<SectionContentRow>> {
        let language = language.to_string();
        self.run(move |conn| {
            section_contents::table
                .filter(section_contents::section_id.eq(section_id))
                .filter(section_contents::language.eq(language))
                .select(SectionContentRow::as_select())
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self, input), fields(section_id = %input.section_id, language = %input.language))]
    async fn upsert_section_content(
        &self,
        input: NewSectionContent,
    ) -> DatabaseResult<SectionContentRow> {
        self.run(move |conn| {
            diesel::insert_into(section_contents::table)
                .values(&input)
                .on_conflict((section_contents::section_id, section_contents::language))
                .do_update()
                .set((
                    section_contents::data.eq(&input.data),
                    section_contents::image_urls.eq(&input.image_urls),
                    section_contents::generated_by.eq(&input.generated_by),
                    section_contents::generated_at.eq(diesel::dsl::now),
                    section_contents::version.eq(section_contents::version + 1),
                    section_contents::updated_at.eq(diesel::dsl::now),
                ))
                .returning(SectionContentRow::as_returning())
                .get_result(conn)
                .map_err(DatabaseError::from)
        })
        .await
    }

    #[instrument(skip(self), fields(site_id = %site_id, status = %status))]
    async fn update_site_status(&self, site_id: Uuid, status: SiteStatus) -> DatabaseResult<()> {
        self.run(move |conn| {
            let updated = diesel::update(sites::table.find(site_id))
                .set((
                    sites::status.eq(status.as_str()),
                    sites::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)
                .map_err(DatabaseError::from)?;

            if updated == 0 {
                return Err(DatabaseError::new(DatabaseErrorKind::NotFound));
            }
            Ok(())
        })
        .await
    }
}
