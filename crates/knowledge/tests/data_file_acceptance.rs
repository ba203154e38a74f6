use std::fs;

use knowledge::{KnowledgeBase, KnowledgeError, KnowledgeSource};
use shared::domain::BinCategory;

#[test]
fn loads_data_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recycling.toml");
    fs::write(
        &path,
        r#"
[[entries]]
keyword = "milk carton"
instruction = "Recycle in the Paper Bin (flatten it)."

[[items]]
icon = "🧃"
category = "paper"
description = "Juice Carton"

[[items]]
icon = "🥫"
category = "metal"
description = "Tin Can"
"#,
    )
    .expect("write data file");

    let knowledge = KnowledgeBase::load(&path).expect("load");
    assert_eq!(knowledge.source(), &KnowledgeSource::File(path.clone()));
    assert_eq!(knowledge.entries()[0].keyword, "milk carton");
    assert_eq!(knowledge.items().len(), 2);
    assert_eq!(knowledge.items()[1].category, BinCategory::Metal);
}

#[test]
fn missing_file_is_an_explicit_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = KnowledgeBase::load(&path).expect_err("should fail");
    assert!(matches!(err, KnowledgeError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn broken_file_falls_back_to_builtin_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[entries]\nkeyword = ").expect("write data file");

    let knowledge = KnowledgeBase::load_or_builtin(Some(&path));
    assert_eq!(knowledge.source(), &KnowledgeSource::Builtin);
    assert_eq!(knowledge.entries(), KnowledgeBase::builtin().entries());
}

#[test]
fn no_path_uses_builtin_data() {
    let knowledge = KnowledgeBase::load_or_builtin(None);
    assert_eq!(knowledge.source(), &KnowledgeSource::Builtin);
    assert_eq!(knowledge.items().len(), 33);
}
