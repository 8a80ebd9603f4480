use blog_core::{Author, Post, PostCategory, ValidationError};

#[test]
fn author_new_starts_unsaved() {
    let author = Author::new("Ada").unwrap();

    assert_eq!(author.id(), None);
    assert_eq!(author.name(), "Ada");
    assert_eq!(author.phone_number(), None);
    assert_eq!(author.created_at(), None);
    assert!(!author.is_persisted());
}

#[test]
fn author_new_rejects_empty_name() {
    assert_eq!(
        Author::new("").unwrap_err(),
        ValidationError::EmptyAuthorName
    );
}

#[test]
fn rejected_author_assignment_keeps_previous_value() {
    let mut author = Author::new("Ada").unwrap();
    author.set_phone_number(Some("1234567890".to_string())).unwrap();

    for bad in ["12345", "123456789a"] {
        let err = author.set_phone_number(Some(bad.to_string())).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhoneNumber);
        assert_eq!(author.phone_number(), Some("1234567890"));
    }

    assert!(author.set_name("").is_err());
    assert_eq!(author.name(), "Ada");

    author.set_phone_number(None).unwrap();
    assert_eq!(author.phone_number(), None);
}

#[test]
fn rejected_post_assignment_keeps_previous_value() {
    let mut post = Post::new("Top 10 Facts").unwrap();
    post.set_content(Some("c".repeat(260))).unwrap();
    post.set_summary(Some("brief".to_string())).unwrap();
    post.set_category(Some("Non-Fiction")).unwrap();

    assert!(post.set_title("Boring News").is_err());
    assert!(post.set_content(Some("c".repeat(10))).is_err());
    assert!(post.set_summary(Some("s".repeat(300))).is_err());
    assert!(post.set_category(Some("Drama")).is_err());

    assert_eq!(post.title(), "Top 10 Facts");
    assert_eq!(post.content().map(str::len), Some(260));
    assert_eq!(post.summary(), Some("brief"));
    assert_eq!(post.category(), Some(PostCategory::NonFiction));
}

#[test]
fn author_serializes_with_column_names() {
    let mut author = Author::new("Ada").unwrap();
    author.set_phone_number(Some("1234567890".to_string())).unwrap();

    let json = serde_json::to_value(&author).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["phone_number"], "1234567890");
    assert!(json["id"].is_null());

    let decoded: Author = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, author);
}

#[test]
fn post_category_serializes_as_label() {
    let mut post = Post::new("Guess Who").unwrap();
    post.set_category(Some("Non-Fiction")).unwrap();

    let json = serde_json::to_value(&post).unwrap();
    assert_eq!(json["category"], "Non-Fiction");
    assert!(json["content"].is_null());
}

#[test]
fn deserialize_runs_field_validators() {
    let bad_phone = serde_json::json!({ "name": "Ada", "phone_number": "12345" });
    let err = serde_json::from_value::<Author>(bad_phone).unwrap_err();
    assert!(err.to_string().contains("exactly 10 digits"), "{err}");

    let bad_title = serde_json::json!({ "title": "Boring News" });
    assert!(serde_json::from_value::<Post>(bad_title).is_err());

    let bad_category = serde_json::json!({ "title": "Top Secret", "category": "Drama" });
    let err = serde_json::from_value::<Post>(bad_category).unwrap_err();
    assert!(err.to_string().contains("Non-Fiction"), "{err}");
}

#[test]
fn display_representation() {
    let author = Author::new("Ada").unwrap();
    assert_eq!(author.to_string(), "Author(id=None, name=Ada)");

    let post = Post::new("Secret Recipe").unwrap();
    assert_eq!(
        post.to_string(),
        "Post(id=None, title=Secret Recipe, content=None, summary=None)"
    );
}
