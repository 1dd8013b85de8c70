//! Integration tests for loading template libraries from disk

use std::collections::HashMap;
use std::fs;

use pretty_assertions::assert_eq;
use prompt_library::{FormatRegistry, Template, TemplateError, TemplateLibrary};

fn greeting() -> Template {
    Template::new("Hello, World!")
        .with_name("greeting")
        .with_role("system")
}

fn farewell() -> Template {
    Template::new("Goodbye, World!")
        .with_name("farewell")
        .with_role("user")
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");

    let library = TemplateLibrary::from_path(&path).expect("Should load");
    assert_eq!(library.len(), 1);
    assert_eq!(library.get("greeting").expect("Should exist"), &greeting());
}

#[test]
fn test_from_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");
    farewell()
        .save(Some(dir.path().join("farewell.json").as_path()))
        .expect("Should save");

    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    assert_eq!(library.names(), vec!["farewell", "greeting"]);
    assert_eq!(library.get("greeting").expect("Should exist"), &greeting());
    assert_eq!(library.get("farewell").expect("Should exist"), &farewell());
}

#[test]
fn test_directory_mixes_json_and_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");
    fs::write(
        dir.path().join("summary.toml"),
        r#"
content = "Summarize:\n{text}"
name = "summary"
"#,
    )
    .expect("write");

    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    let summary = library.get("summary").expect("Should exist");
    assert_eq!(summary.role(), "user");
    assert_eq!(summary.inputs().expect("Should parse"), vec!["text"]);
}

#[test]
fn test_directory_ignores_other_files_and_subdirectories() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");
    fs::write(dir.path().join("notes.txt"), "not a template").expect("write");
    fs::write(dir.path().join("README"), "# prompts").expect("write");

    let nested = dir.path().join("nested");
    fs::create_dir(&nested).expect("mkdir");
    farewell()
        .save(Some(nested.join("farewell.json").as_path()))
        .expect("Should save");

    let mut library = TemplateLibrary::new();
    let loaded = library.load_path(dir.path()).expect("Should load");
    assert_eq!(loaded, 1);
    assert_eq!(library.names(), vec!["greeting"]);
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    assert!(library.is_empty());
}

#[test]
fn test_name_collision_last_file_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    Template::new("first")
        .with_name("shared")
        .save(Some(dir.path().join("a.json").as_path()))
        .expect("Should save");
    Template::new("second")
        .with_name("shared")
        .save(Some(dir.path().join("b.json").as_path()))
        .expect("Should save");

    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    assert_eq!(library.len(), 1);
    assert_eq!(library.get("shared").expect("Should exist").content(), "second");
}

#[test]
fn test_from_nonexistent_file() {
    let err = TemplateLibrary::from_path("nonexistent.json").expect_err("Should fail");
    assert!(matches!(err, TemplateError::FileNotFound { .. }));
}

#[test]
fn test_from_nonexistent_directory() {
    let err = TemplateLibrary::from_path("nonexistent_dir").expect_err("Should fail");
    assert!(err.is_not_found());
}

#[test]
fn test_bad_file_keeps_earlier_templates() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("a_greeting.json").as_path()))
        .expect("Should save");
    fs::write(dir.path().join("b_broken.json"), "{ not json").expect("write");
    farewell()
        .save(Some(dir.path().join("c_farewell.json").as_path()))
        .expect("Should save");

    let mut library = TemplateLibrary::new();
    let err = library.load_path(dir.path()).expect_err("Should fail");
    assert!(matches!(err, TemplateError::Parse { .. }));
    assert!(err.to_string().contains("b_broken.json"));
    assert!(library.contains("greeting"));
    assert!(!library.contains("farewell"));
}

#[test]
fn test_unnamed_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Template::new("no name")
        .save(Some(dir.path().join("anon.json").as_path()))
        .expect("Should save");

    let err = TemplateLibrary::from_path(&path).expect_err("Should fail");
    assert!(matches!(err, TemplateError::InvalidArgument { .. }));
}

#[test]
fn test_single_file_with_unknown_extension_parsed_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("greeting.prompt");
    fs::write(&path, greeting().to_json().expect("Should serialize")).expect("write");

    let library = TemplateLibrary::from_path(&path).expect("Should load");
    assert_eq!(library.get("greeting").expect("Should exist"), &greeting());
}

#[test]
fn test_custom_format_in_directory_scan() {
    fn decode_markdown(content: &str) -> Result<serde_json::Value, String> {
        let (header, body) = content
            .split_once("\n---\n")
            .ok_or("missing '---' separator")?;
        let name = header.trim().trim_start_matches("# ").to_string();
        Ok(serde_json::json!({ "name": name, "content": body, "role": "system" }))
    }

    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("reviewer.md"),
        "# reviewer\n---\nReview this diff:\n{diff}",
    )
    .expect("write");

    let mut formats = FormatRegistry::default();
    formats.register("md", decode_markdown);
    let mut library = TemplateLibrary::new().with_formats(formats);
    library.load_path(dir.path()).expect("Should load");

    let reviewer = library.get("reviewer").expect("Should exist");
    let inputs = HashMap::from([("diff".to_string(), "+ added".to_string())]);
    let message = reviewer.message(&inputs).expect("Should render");
    assert_eq!(message.content, "Review this diff:\n+ added");
    assert_eq!(message.role, "system");
}

#[test]
fn test_delete_then_get() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");

    let mut library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    library.delete("greeting").expect("Should delete");
    let err = library.get("greeting").expect_err("Should fail");
    assert!(matches!(err, TemplateError::NotFound { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlinked_template_followed() {
    let source = tempfile::tempdir().expect("tempdir");
    let target = greeting()
        .save(Some(source.path().join("greeting.json").as_path()))
        .expect("Should save");

    let dir = tempfile::tempdir().expect("tempdir");
    std::os::unix::fs::symlink(&target, dir.path().join("linked.json")).expect("symlink");

    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    assert!(library.contains("greeting"));
}

#[cfg(unix)]
#[test]
fn test_dangling_link_with_other_extension_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    greeting()
        .save(Some(dir.path().join("greeting.json").as_path()))
        .expect("Should save");
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("notes.txt"))
        .expect("symlink");

    let library = TemplateLibrary::from_path(dir.path()).expect("Should load");
    assert_eq!(library.names(), vec!["greeting"]);
}

#[cfg(unix)]
#[test]
fn test_dangling_link_to_template_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("linked.json"))
        .expect("symlink");

    let err = TemplateLibrary::from_path(dir.path()).expect_err("Should fail");
    assert!(err.is_not_found());
}
