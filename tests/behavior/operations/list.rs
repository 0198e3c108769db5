use crate::*;
use filegate::error::{ErrorCode, Result};
use filegate::items::{Item, ItemInfo};
use filegate::provider::ItemLoader;
use libtest_mimic::Trial;
use serde_json::json;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_list_sorts_directories_first,
        test_list_reports_sizes_and_timestamps,
        test_list_detects_sub_directories,
        test_list_missing_directory_fails,
        test_list_applies_extension_filter,
        test_list_rejects_escaping_path,
    ));
}

async fn test_list_sorts_directories_first() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.mkdir("zeta");
    sandbox.mkdir("alpha");
    sandbox.write_file("a.txt", b"one");
    sandbox.write_file("z.txt", b"two");

    let result = exec(&sandbox.processor(), "GetDirContents", json!({ "pathInfo": [] })).await;
    assert!(result.success);
    let items = result.result.expect("listing items");
    assert_eq!(items.len(), 4);

    let first_file = items.iter().position(|item| !item.is_directory()).unwrap();
    assert!(
        items[..first_file].iter().all(Item::is_directory),
        "directories must precede files: {items:?}"
    );
    assert!(items[first_file..].iter().all(|item| !item.is_directory()));
    Ok(())
}

async fn test_list_reports_sizes_and_timestamps() -> Result<()> {
    let sandbox = Sandbox::new();
    let content = random_bytes(2048);
    sandbox.write_file("data.bin", &content);

    let items = sandbox
        .provider()
        .list_items(&ItemInfo::directory(""))
        .await?;
    let file = items
        .iter()
        .find_map(|item| match item {
            Item::File(file) if file.name == "data.bin" => Some(file),
            _ => None,
        })
        .expect("data.bin listed");
    assert_eq!(file.size, content.len() as u64);
    assert!(!file.date_modified.is_empty());
    Ok(())
}

async fn test_list_detects_sub_directories() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.mkdir("nested/inner");
    sandbox.mkdir("flat");
    sandbox.write_file("flat/file.txt", b"x");

    let items = sandbox
        .provider()
        .list_items(&ItemInfo::directory(""))
        .await?;
    for item in items {
        if let Item::Directory(directory) = item {
            match directory.name.as_str() {
                "nested" => assert!(directory.has_sub_directories),
                "flat" => assert!(!directory.has_sub_directories),
                other => panic!("unexpected directory {other}"),
            }
        }
    }
    Ok(())
}

async fn test_list_missing_directory_fails() -> Result<()> {
    let sandbox = Sandbox::new();
    let result = exec(
        &sandbox.processor(),
        "GetDirContents",
        json!({ "pathInfo": path_info("ghost") }),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::DirectoryNotFound));
    Ok(())
}

async fn test_list_applies_extension_filter() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("keep.txt", b"keep");
    sandbox.write_file("drop.bin", b"drop");
    sandbox.mkdir("docs");

    let processor = sandbox
        .processor_with(|configuration| {
            configuration.allowed_file_extensions = vec![".txt".to_string()];
        });
    let result = exec(&processor, "GetDirContents", json!({ "pathInfo": [] })).await;
    assert!(result.success);
    let names: Vec<_> = result
        .result
        .expect("listing items")
        .iter()
        .map(|item| item.name().to_string())
        .collect();
    assert!(names.contains(&"keep.txt".to_string()));
    assert!(names.contains(&"docs".to_string()), "directories always pass");
    assert!(!names.contains(&"drop.bin".to_string()));
    Ok(())
}

async fn test_list_rejects_escaping_path() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("safe.txt", b"safe");

    let result = exec(
        &sandbox.processor(),
        "GetDirContents",
        json!({ "pathInfo": [{ "name": ".." }, { "name": "elsewhere" }] }),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::Other));
    Ok(())
}
