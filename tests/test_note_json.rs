use anyhow::Result;
use notedesk::domain::Note;
use serde_json::json;

#[test]
fn given_note_when_serializing_to_json_then_contains_all_fields() -> Result<()> {
    // Arrange
    let note = Note {
        id: 17,
        content: "# Title".to_string(),
        created_at: "2024-05-01T10:00:00".to_string(),
        tags: vec!["tag1".to_string(), "tag2".to_string()],
    };

    // Act
    let json = serde_json::to_string_pretty(&note)?;

    // Assert
    assert!(json.contains(r#""id": 17"#));
    assert!(json.contains(r##""content": "# Title""##));
    assert!(json.contains(r#""created_at": "2024-05-01T10:00:00""#));
    assert!(json.contains(r#""tag1""#));
    assert!(json.contains(r#""tag2""#));
    Ok(())
}

#[test]
fn given_server_note_with_tag_objects_when_deserializing_then_keeps_names() -> Result<()> {
    // Arrange
    let value = json!({
        "id": 3,
        "content": "body",
        "created_at": "2024-01-01",
        "tags": [{ "id": 1, "name": "work" }, "home"]
    });

    // Act
    let note: Note = serde_json::from_value(value)?;

    // Assert
    assert_eq!(note.tags, vec!["work".to_string(), "home".to_string()]);
    Ok(())
}

#[test]
fn given_note_without_optional_fields_when_deserializing_then_uses_defaults() -> Result<()> {
    let note: Note = serde_json::from_value(json!({ "id": 4, "tags": null }))?;

    assert_eq!(note.content, "");
    assert_eq!(note.created_at, "");
    assert!(note.tags.is_empty());
    Ok(())
}

#[test]
fn given_note_with_empty_tags_when_serializing_then_produces_empty_array() -> Result<()> {
    let note = Note {
        id: 5,
        content: String::new(),
        created_at: String::new(),
        tags: vec![],
    };

    let json = serde_json::to_string(&note)?;

    assert!(json.contains(r#""tags":[]"#));
    Ok(())
}
