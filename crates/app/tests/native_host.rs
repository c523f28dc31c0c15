//! File-backed hosting configured from the environment
#![cfg(not(target_arch = "wasm32"))]

use tempfile::TempDir;

use todo_app::{host, HeadlessSurface, UiEvent};
use todo_core::TodoConfig;

#[test]
fn test_open_from_env_uses_configured_file() {
    let temp_dir = TempDir::new().unwrap();
    // Only test in this binary, so no other thread reads the environment
    std::env::set_var("TODO_DATA_DIR", temp_dir.path());
    std::env::set_var("TODO_STORAGE_KEY", "chores");
    std::env::set_var("TODO_PRETTY_JSON", "1");

    let mut app = host::open_from_env(HeadlessSurface::new()).unwrap();
    app.surface_mut().type_text("Take out bins");
    app.handle(UiEvent::AddClicked);
    drop(app);

    let config = TodoConfig::from_env().unwrap();
    let raw = std::fs::read_to_string(config.storage_path()).unwrap();
    let file: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let stored = file["chores"].as_str().unwrap();
    assert!(stored.contains("Take out bins"));
    assert!(stored.contains('\n'));

    let reopened = host::open_from_env(HeadlessSurface::new()).unwrap();
    assert_eq!(reopened.surface().task_texts(), ["Take out bins"]);
}
