use crate::*;
use filegate::error::{ErrorCode, Result};
use libtest_mimic::Trial;
use serde_json::json;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_remove_file,
        test_remove_directory_recursively,
        test_remove_missing_file,
        test_remove_missing_directory,
    ));
}

async fn test_remove_file() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("victim.txt", b"bye");
    sandbox.write_file("bystander.txt", b"still here");

    let result = exec(
        &sandbox.processor(),
        "Remove",
        json!({ "pathInfo": path_info("victim.txt"), "isDirectory": false }),
    )
    .await;
    assert!(result.success);
    assert!(!sandbox.exists("victim.txt"));
    assert!(sandbox.exists("bystander.txt"));
    Ok(())
}

async fn test_remove_directory_recursively() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("tree/deep/leaf.txt", b"leaf");
    sandbox.write_file("tree/file.txt", b"file");

    let result = exec(
        &sandbox.processor(),
        "Remove",
        json!({ "pathInfo": path_info("tree"), "isDirectory": true }),
    )
    .await;
    assert!(result.success);
    assert!(!sandbox.exists("tree"));
    Ok(())
}

async fn test_remove_missing_file() -> Result<()> {
    let sandbox = Sandbox::new();
    let result = exec(
        &sandbox.processor(),
        "Remove",
        json!({ "pathInfo": path_info("ghost.txt"), "isDirectory": false }),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::FileNotFound));
    Ok(())
}

async fn test_remove_missing_directory() -> Result<()> {
    let sandbox = Sandbox::new();
    let result = exec(
        &sandbox.processor(),
        "Remove",
        json!({ "pathInfo": path_info("ghost"), "isDirectory": true }),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::DirectoryNotFound));
    Ok(())
}
