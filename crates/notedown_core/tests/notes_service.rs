use notedown_core::{
    JsonNoteRepository, NoteService, NoteServiceError, SearchQuery,
};

fn service_in(dir: &tempfile::TempDir) -> NoteService<JsonNoteRepository> {
    NoteService::new(JsonNoteRepository::open(dir.path().join("notes.json")))
}

#[test]
fn create_then_list_derives_preview_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    service
        .create_note(
            "Trip",
            "# Plan\n\n![cover](images/map.png)\nPack **light** and early",
        )
        .unwrap();

    let listed = service.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    let item = &listed[0];
    assert_eq!(item.title, "Trip");
    assert_eq!(item.preview_image.as_deref(), Some("images/map.png"));
    let preview = item.preview_text.as_deref().unwrap_or("");
    assert!(preview.contains("Plan"));
    assert!(!preview.contains('#'));
    assert!(!preview.contains('*'));
}

#[test]
fn update_content_is_full_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let created = service.create_note("Draft", "old body").unwrap();
    let updated = service.update_content(created.id, "new body").unwrap();
    assert_eq!(updated.content, "new body");
    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn rename_keeps_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let created = service.create_note("Untitled", "kept").unwrap();
    let renamed = service.rename_note(created.id, "Named").unwrap();
    assert_eq!(renamed.title, "Named");
    assert_eq!(renamed.content, "kept");
}

#[test]
fn unknown_note_maps_to_semantic_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let ghost = uuid::Uuid::new_v4();
    assert!(matches!(
        service.update_content(ghost, "x"),
        Err(NoteServiceError::NoteNotFound(id)) if id == ghost
    ));
    assert!(matches!(
        service.delete_note(ghost),
        Err(NoteServiceError::NoteNotFound(id)) if id == ghost
    ));
}

#[test]
fn delete_removes_note_from_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let keep = service.create_note("keep", "").unwrap();
    let gone = service.create_note("gone", "").unwrap();
    service.delete_note(gone.id).unwrap();

    let listed = service.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[test]
fn search_finds_title_and_content_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = service_in(&dir);

    let by_content = service.create_note("Errands", "buy MILK and bread").unwrap();
    let by_title = service.create_note("Milk log", "nothing relevant").unwrap();
    service.create_note("Other", "unrelated").unwrap();

    let hits = service
        .search_notes(&SearchQuery {
            text: "milk".to_string(),
            limit: None,
        })
        .unwrap();

    let ids: Vec<_> = hits.iter().map(|hit| hit.note_id).collect();
    assert_eq!(hits.len(), 2);
    assert!(ids.contains(&by_content.id));
    assert!(ids.contains(&by_title.id));
}
