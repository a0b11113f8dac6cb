use jot_core::note::NoteRepository;
use jot_infrastructure::JsonNoteRepository;
use tempfile::TempDir;

#[tokio::test]
async fn test_open_creates_empty_notes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data/notes.json");

    let repo = JsonNoteRepository::open(path.clone()).expect("Should open store");

    assert!(path.exists(), "Opening should create the notes file");
    assert!(repo.root_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_notes_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");

    {
        let repo = JsonNoteRepository::open(path.clone()).unwrap();
        let parent = repo.create("house", "", None).await.unwrap();
        repo.create("paint fence", "", Some(&parent.id)).await.unwrap();
        repo.mark_done(&parent.id).await.unwrap();
    }

    let repo = JsonNoteRepository::open(path).unwrap();
    let house = repo.find_by_id("1").await.unwrap();
    assert_eq!(house.len(), 1);
    assert!(house[0].done);
    assert_eq!(repo.find_children("1").await.unwrap().len(), 1);

    // The id counter is persisted too.
    let next = repo.create("garden", "", None).await.unwrap();
    assert_eq!(next.id, "3");
}

#[tokio::test]
async fn test_persisted_layout_matches_notes_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.json");
    let repo = JsonNoteRepository::open(path.clone()).unwrap();
    repo.create("groceries", "", None).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["last_note_id"], 1);
    assert_eq!(raw["notes"][0]["title"], "groceries");
    assert_eq!(raw["notes"][0]["parent_id"], serde_json::Value::Null);
    assert_eq!(raw["notes"][0]["deleted"], false);
}

#[tokio::test]
async fn test_title_search_then_id_lookup_agree() {
    let repo = JsonNoteRepository::in_memory();
    repo.create("groceries", "", None).await.unwrap();
    repo.create("grocery", "", None).await.unwrap();

    for hit in repo.find_by_title("groceries").await.unwrap() {
        let by_id = repo.find_by_id(&hit.note.id).await.unwrap();
        assert_eq!(by_id, vec![hit.note]);
    }
}
