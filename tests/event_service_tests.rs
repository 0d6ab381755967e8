mod common;

use std::sync::Arc;

use common::InMemoryEventRepository;
use openscholar_backend::dto::event_dto::{CreateEventRequest, UpdateEventRequest};
use openscholar_backend::service::event_service::{EventService, EventServiceImpl};
use openscholar_backend::util::error::ServiceError;

fn setup() -> (EventServiceImpl, Arc<InMemoryEventRepository>) {
    let event_repo = Arc::new(InMemoryEventRepository::default());
    (EventServiceImpl::new(event_repo.clone()), event_repo)
}

fn event_request(title: &str, date: &str) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: "An event".to_string(),
        date: date.to_string(),
        location: "Main hall".to_string(),
        link: None,
    }
}

#[tokio::test]
async fn test_public_events_upcoming_soonest_first() {
    let (service, _) = setup();

    // One past event and two future ones, created out of order
    service
        .create_event(event_request("long past", "2020-01-01T10:00:00Z"))
        .await
        .unwrap();
    service
        .create_event(event_request("later", "2100-06-01T10:00:00Z"))
        .await
        .unwrap();
    service
        .create_event(event_request("sooner", "2100-01-01T10:00:00Z"))
        .await
        .unwrap();

    let events = service.public_events().await.unwrap();
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["sooner", "later"]);
}

#[tokio::test]
async fn test_create_event_rejects_bad_date() {
    let (service, repo) = setup();
    let err = service
        .create_event(event_request("bad", "next tuesday"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(repo.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_event_normalizes_date_to_utc() {
    let (service, _) = setup();
    let view = service
        .create_event(event_request("offset", "2100-01-01T12:00:00+02:00"))
        .await
        .unwrap();
    assert_eq!(view.date, "2100-01-01T10:00:00+00:00");
}

#[tokio::test]
async fn test_update_and_delete_event() {
    let (service, _) = setup();
    let created = service
        .create_event(event_request("workshop", "2100-01-01T10:00:00Z"))
        .await
        .unwrap();

    let updated = service
        .update_event(
            &created.id,
            UpdateEventRequest {
                title: Some("renamed workshop".to_string()),
                description: None,
                date: None,
                location: None,
                link: Some("https://example.com/register".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "renamed workshop");
    assert_eq!(updated.link.as_deref(), Some("https://example.com/register"));
    // Untouched fields survive
    assert_eq!(updated.location, "Main hall");

    service.delete_event(&created.id).await.unwrap();
    let err = service
        .update_event(
            &created.id,
            UpdateEventRequest {
                title: Some("ghost".to_string()),
                description: None,
                date: None,
                location: None,
                link: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_unknown_event() {
    let (service, _) = setup();
    let err = service
        .delete_event(&bson::oid::ObjectId::new().to_hex())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
