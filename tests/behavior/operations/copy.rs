use crate::*;
use filegate::error::{ErrorCode, Result};
use libtest_mimic::Trial;
use serde_json::json;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        test_copy_file_to_other_directory,
        test_copy_into_own_directory_synthesizes_name,
        test_copy_synthesized_names_accumulate,
        test_copy_directory_recursively,
        test_copy_creates_missing_destination,
        test_copy_missing_file,
    ));
}

async fn test_copy_file_to_other_directory() -> Result<()> {
    let sandbox = Sandbox::new();
    let content = random_bytes(4096);
    sandbox.write_file("a/doc.txt", &content);
    sandbox.mkdir("b");

    let result = exec(
        &sandbox.processor(),
        "Copy",
        json!({
            "sourcePathInfo": path_info("a/doc.txt"),
            "destinationPathInfo": path_info("b"),
            "sourceIsDirectory": false,
        }),
    )
    .await;
    assert!(result.success);
    assert_eq!(sandbox.read_file("b/doc.txt"), content);
    assert_eq!(sandbox.read_file("a/doc.txt"), content);
    Ok(())
}

async fn test_copy_into_own_directory_synthesizes_name() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("a/doc.txt", b"original");

    let result = exec(
        &sandbox.processor(),
        "Copy",
        json!({
            "sourcePathInfo": path_info("a/doc.txt"),
            "destinationPathInfo": path_info("a"),
            "sourceIsDirectory": false,
        }),
    )
    .await;
    assert!(result.success);
    assert_eq!(sandbox.read_file("a/doc - Copy.txt"), b"original");
    assert_eq!(sandbox.read_file("a/doc.txt"), b"original");
    Ok(())
}

async fn test_copy_synthesized_names_accumulate() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("a/doc.txt", b"original");

    let processor = sandbox.processor();
    let arguments = json!({
        "sourcePathInfo": path_info("a/doc.txt"),
        "destinationPathInfo": path_info("a"),
        "sourceIsDirectory": false,
    });
    assert!(exec(&processor, "Copy", arguments.clone()).await.success);
    assert!(exec(&processor, "Copy", arguments).await.success);

    assert!(sandbox.exists("a/doc - Copy.txt"));
    assert!(sandbox.exists("a/doc - Copy - Copy.txt"));
    assert_eq!(sandbox.read_file("a/doc.txt"), b"original");
    Ok(())
}

async fn test_copy_directory_recursively() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("src/deep/leaf.txt", b"leaf");
    sandbox.write_file("src/top.txt", b"top");
    sandbox.mkdir("dest");

    let result = exec(
        &sandbox.processor(),
        "Copy",
        json!({
            "sourcePathInfo": path_info("src"),
            "destinationPathInfo": path_info("dest"),
            "sourceIsDirectory": true,
        }),
    )
    .await;
    assert!(result.success);
    assert_eq!(sandbox.read_file("dest/src/deep/leaf.txt"), b"leaf");
    assert_eq!(sandbox.read_file("dest/src/top.txt"), b"top");
    assert_eq!(sandbox.read_file("src/top.txt"), b"top");
    Ok(())
}

async fn test_copy_creates_missing_destination() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.write_file("a/doc.txt", b"payload");

    let result = exec(
        &sandbox.processor(),
        "Copy",
        json!({
            "sourcePathInfo": path_info("a/doc.txt"),
            "destinationPathInfo": path_info("brand/new"),
            "sourceIsDirectory": false,
        }),
    )
    .await;
    assert!(result.success);
    assert_eq!(sandbox.read_file("brand/new/doc.txt"), b"payload");
    Ok(())
}

async fn test_copy_missing_file() -> Result<()> {
    let sandbox = Sandbox::new();
    sandbox.mkdir("dest");
    let result = exec(
        &sandbox.processor(),
        "Copy",
        json!({
            "sourcePathInfo": path_info("ghost.txt"),
            "destinationPathInfo": path_info("dest"),
            "sourceIsDirectory": false,
        }),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_code, Some(ErrorCode::FileNotFound));
    Ok(())
}
