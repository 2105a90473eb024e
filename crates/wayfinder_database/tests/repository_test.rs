//! Tests for the in-memory content repository.

use serde_json::json;
use uuid::Uuid;
use wayfinder_core::SiteStatus;
use wayfinder_database::{
    ContentRepository, InMemoryRepository, NewPage, NewSection, NewSectionContent, NewSite,
    NewTemplate,
};

fn rome_site() -> NewSite {
    NewSite {
        name: "Rome Tourism".to_string(),
        subdomain: "rome".to_string(),
        site_type: "CITY".to_string(),
        status: "DRAFT".to_string(),
        languages: vec!["en".to_string(), "es".to_string()],
        default_language: "en".to_string(),
        features: json!({}),
        theme: json!({}),
        seo_settings: json!({}),
    }
}

fn hero_template() -> NewTemplate {
    NewTemplate {
        name: "hero-banner".to_string(),
        component_name: "HeroBanner".to_string(),
        category: "hero".to_string(),
        schema: json!({"type": "object"}),
        system_prompt: "You write tourism copy.".to_string(),
        user_prompt_template: "Generate a hero for {siteName}".to_string(),
        is_active: true,
    }
}

fn content_for(section_id: Uuid, language: &str) -> NewSectionContent {
    NewSectionContent {
        section_id,
        language: language.to_string(),
        data: json!({"headline": "Discover Rome"}),
        image_urls: vec![],
        generated_by: "gemini-2.0-flash".to_string(),
    }
}

#[tokio::test]
async fn test_get_site_roundtrip() {
    let repo = InMemoryRepository::new();
    let site = repo.insert_site(rome_site()).await;

    let loaded = repo.get_site(*site.id()).await.unwrap().unwrap();
    assert_eq!(loaded.name(), "Rome Tourism");
    assert_eq!(loaded.languages().len(), 2);

    assert!(repo.get_site(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_sections_ordered_by_position() {
    let repo = InMemoryRepository::new();
    let site = repo.insert_site(rome_site()).await;
    let template = repo.insert_template(hero_template()).await;
    let page = repo
        .insert_page(NewPage {
            site_id: *site.id(),
            page_type: "HOME".to_string(),
            slug: "home".to_string(),
            status: "DRAFT".to_string(),
        })
        .await;

    for position in [3, 1, 2] {
        repo.insert_section(NewSection {
            page_id: *page.id(),
            template_id: *template.id(),
            position,
        })
        .await;
    }

    let sections = repo.list_sections(*page.id()).await.unwrap();
    let positions: Vec<i32> = sections.iter().map(|s| *s.position()).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_upsert_inserts_at_version_one() {
    let repo = InMemoryRepository::new();
    let section_id = Uuid::new_v4();

    let row = repo
        .upsert_section_content(content_for(section_id, "en"))
        .await
        .unwrap();

    assert_eq!(*row.version(), 1);
    assert_eq!(row.language(), "en");
    assert_eq!(row.generated_by(), "gemini-2.0-flash");
}

#[tokio::test]
async fn test_upsert_bumps_version_and_keeps_id() {
    let repo = InMemoryRepository::new();
    let section_id = Uuid::new_v4();

    let first = repo
        .upsert_section_content(content_for(section_id, "en"))
        .await
        .unwrap();

    let mut regenerated = content_for(section_id, "en");
    regenerated.data = json!({"headline": "Rome Reimagined"});
    let second = repo.upsert_section_content(regenerated).await.unwrap();

    assert_eq!(second.id(), first.id());
    assert_eq!(*second.version(), 2);
    assert_eq!(second.data()["headline"], "Rome Reimagined");
    assert_eq!(repo.content_count().await, 1);
}

#[tokio::test]
async fn test_upsert_keeps_languages_separate() {
    let repo = InMemoryRepository::new();
    let section_id = Uuid::new_v4();

    repo.upsert_section_content(content_for(section_id, "en"))
        .await
        .unwrap();
    repo.upsert_section_content(content_for(section_id, "es"))
        .await
        .unwrap();

    assert_eq!(repo.content_count().await, 2);
    let es = repo
        .find_section_content(section_id, "es")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*es.version(), 1);
    assert!(
        repo.find_section_content(section_id, "fr")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_site_status() {
    let repo = InMemoryRepository::new();
    let site = repo.insert_site(rome_site()).await;

    repo.update_site_status(*site.id(), SiteStatus::Published)
        .await
        .unwrap();

    let loaded = repo.get_site(*site.id()).await.unwrap().unwrap();
    assert_eq!(loaded.status(), "PUBLISHED");

    assert!(
        repo.update_site_status(Uuid::new_v4(), SiteStatus::Published)
            .await
            .is_err()
    );
}
