//! The generation job worker: scope resolution, skip policy, persistence,
//! and job lifecycle reporting.

use crate::section::generate_section_content;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use wayfinder_cache::SiteCache;
use wayfinder_core::SiteStatus;
use wayfinder_database::{
    ContentRepository, NewSectionContent, SectionRow, SiteRow, TemplateRow,
};
use wayfinder_error::{WayfinderError, WorkerError, WorkerErrorKind};
use wayfinder_gemini::{ContentDriver, ContentGenerator};
use wayfinder_queue::{Delivery, GenerationJob, JobQueue};
use wayfinder_schema::{ContentValidator, TemplateRef};

/// Summary of one processed job.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct JobOutcome {
    /// Sections that got at least one new content row
    sections_generated: usize,
    /// Sections visited, including skipped ones
    sections_processed: usize,
    /// Sections in the resolved scope
    total_sections: usize,
}

struct ResolvedScope {
    site: SiteRow,
    sections: Vec<(SectionRow, TemplateRow)>,
    languages: Vec<String>,
    full_site: bool,
}

/// Consumes generation jobs and persists the results.
pub struct GenerationWorker<D: ContentDriver, R: ContentRepository> {
    repository: R,
    generator: ContentGenerator<D>,
    validator: ContentValidator,
    cache: Option<Arc<Mutex<SiteCache>>>,
}

impl<D: ContentDriver, R: ContentRepository> GenerationWorker<D, R> {
    /// Creates a worker over a repository and generator.
    pub fn new(repository: R, generator: ContentGenerator<D>) -> Self {
        Self {
            repository,
            generator,
            validator: ContentValidator::new(),
            cache: None,
        }
    }

    /// Attaches a read cache to invalidate after content mutations.
    pub fn with_cache(mut self, cache: Arc<Mutex<SiteCache>>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Consumes deliveries until the queue closes.
    pub async fn run(&self, queue: Arc<dyn JobQueue>) {
        info!(queue = queue.name(), "Worker consuming deliveries");
        while let Some(delivery) = queue.next_delivery().await {
            self.process_delivery(queue.as_ref(), delivery).await;
        }
        info!("Queue closed; worker stopping");
    }

    /// Processes one delivery and reports the terminal state to the queue.
    ///
    /// A scope resolution error fails the delivery, which the queue retries
    /// up to its delivery limit before marking the job Failed.
    #[instrument(skip(self, queue, delivery), fields(job_id = %delivery.job_id, site_id = %delivery.job.site_id))]
    pub async fn process_delivery(&self, queue: &dyn JobQueue, delivery: Delivery) {
        match self
            .execute(&delivery.job, Some((queue, delivery.job_id)))
            .await
        {
            Ok(outcome) => {
                queue
                    .complete(delivery.job_id, *outcome.sections_generated())
                    .await;
            }
            Err(e) => {
                warn!(error = %e, "Job processing failed");
                queue.retry_or_fail(delivery, &e.to_string()).await;
            }
        }
    }

    /// Processes one job without queue bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns an error when scope resolution fails (missing site, page,
    /// section, or template, or an inactive template) or the repository
    /// errors. Per-language content failures are logged, not returned.
    pub async fn process_job(&self, job: &GenerationJob) -> Result<JobOutcome, WayfinderError> {
        self.execute(job, None).await
    }

    #[instrument(skip(self, job, status), fields(site_id = %job.site_id, regenerate = job.regenerate))]
    async fn execute(
        &self,
        job: &GenerationJob,
        status: Option<(&dyn JobQueue, Uuid)>,
    ) -> Result<JobOutcome, WayfinderError> {
        let scope = self.resolve(job).await?;
        let total = scope.sections.len();
        let base = base_context(&scope.site);

        info!(
            sections = total,
            languages = scope.languages.len(),
            full_site = scope.full_site,
            "Job scope resolved"
        );

        let mut processed = 0usize;
        let mut generated = 0usize;
        let mut persisted_any = false;

        for (section, template) in &scope.sections {
            let section_id = *section.id();

            if !job.regenerate && self.has_all_languages(section_id, &scope.languages).await? {
                debug!(%section_id, "Content exists for every language in scope; skipping");
                processed += 1;
                report_progress(status, processed, total).await;
                continue;
            }

            let spec = template.to_spec();
            let result =
                generate_section_content(&self.generator, section_id, &spec, &base, &scope.languages)
                    .await;

            let mut section_rows = 0usize;
            for entry in result.contents() {
                let content = entry.content();
                let language = entry.language();

                if !*content.success() {
                    warn!(
                        %section_id,
                        language,
                        error = content.error().as_deref().unwrap_or("unknown"),
                        "Generation failed for language"
                    );
                    continue;
                }
                let Some(data) = content.data() else {
                    continue;
                };

                let template_ref = TemplateRef {
                    id: *template.id(),
                    name: template.name(),
                    category: template.category(),
                    schema: template.schema(),
                };
                let outcome = self.validator.validate_content(data, &template_ref);
                for warning in outcome.warnings() {
                    debug!(
                        %section_id,
                        language,
                        path = warning.path(),
                        message = warning.message(),
                        "Content validation warning"
                    );
                }
                if !outcome.is_valid() {
                    warn!(
                        %section_id,
                        language,
                        errors = %outcome.format_errors(),
                        "Generated content failed validation; not persisted"
                    );
                    continue;
                }

                let data = outcome.into_sanitized().unwrap_or_else(|| data.clone());
                let row = self
                    .repository
                    .upsert_section_content(NewSectionContent {
                        section_id,
                        language: language.clone(),
                        data,
                        image_urls: vec![],
                        generated_by: content.model().clone(),
                    })
                    .await?;

                debug!(%section_id, language, version = row.version(), "Section content persisted");
                section_rows += 1;
                persisted_any = true;
            }

            if section_rows > 0 {
                generated += 1;
            }
            processed += 1;
            report_progress(status, processed, total).await;
        }

        if scope.full_site {
            self.repository
                .update_site_status(*scope.site.id(), SiteStatus::Published)
                .await?;
            info!(site_id = %scope.site.id(), "Full-site run complete; site published");
        }

        if let Some(cache) = &self.cache
            && (persisted_any || scope.full_site)
            && let Ok(mut guard) = cache.lock()
        {
            guard.invalidate_site(*scope.site.id());
        }

        Ok(JobOutcome {
            sections_generated: generated,
            sections_processed: processed,
            total_sections: total,
        })
    }

    async fn resolve(&self, job: &GenerationJob) -> Result<ResolvedScope, WayfinderError> {
        let site = self
            .repository
            .get_site(job.site_id)
            .await?
            .ok_or_else(|| {
                WorkerError::new(WorkerErrorKind::SiteNotFound(job.site_id.to_string()))
            })?;

        let sections = if let Some(section_id) = job.section_id {
            let section = self
                .repository
                .get_section(section_id)
                .await?
                .ok_or_else(|| {
                    WorkerError::new(WorkerErrorKind::SectionNotFound(section_id.to_string()))
                })?;
            vec![section]
        } else if let Some(page_id) = job.page_id {
            self.repository
                .get_page(page_id)
                .await?
                .ok_or_else(|| {
                    WorkerError::new(WorkerErrorKind::PageNotFound(page_id.to_string()))
                })?;
            self.repository.list_sections(page_id).await?
        } else {
            let mut all = Vec::new();
            for page in self.repository.list_pages(job.site_id).await? {
                all.extend(self.repository.list_sections(*page.id()).await?);
            }
            all
        };

        let mut resolved = Vec::with_capacity(sections.len());
        for section in sections {
            let template = self
                .repository
                .get_template(*section.template_id())
                .await?
                .ok_or_else(|| {
                    WorkerError::new(WorkerErrorKind::TemplateNotFound(
                        section.template_id().to_string(),
                    ))
                })?;
            if !template.is_active() {
                return Err(WorkerError::new(WorkerErrorKind::TemplateInactive(
                    template.name().clone(),
                ))
                .into());
            }
            resolved.push((section, template));
        }

        let languages = match &job.language {
            Some(language) => vec![language.clone()],
            None => site.languages().clone(),
        };

        Ok(ResolvedScope {
            full_site: job.section_id.is_none() && job.page_id.is_none(),
            site,
            sections: resolved,
            languages,
        })
    }

    async fn has_all_languages(
        &self,
        section_id: Uuid,
        languages: &[String],
    ) -> Result<bool, WayfinderError> {
        for language in languages {
            if self
                .repository
                .find_section_content(section_id, language)
                .await?
                .is_none()
            {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn base_context(site: &SiteRow) -> wayfinder_core::GenerationContext {
    wayfinder_core::GenerationContext::new()
        .with("siteName", site.name().clone())
        .with("siteType", site.site_type().clone())
        .with("subdomain", site.subdomain().clone())
}

async fn report_progress(status: Option<(&dyn JobQueue, Uuid)>, processed: usize, total: usize) {
    if let Some((queue, job_id)) = status {
        let progress = processed as f32 / total.max(1) as f32 * 100.0;
        queue.set_progress(job_id, progress).await;
    }
}
