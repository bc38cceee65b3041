use std::fs;
use std::panic::{self, AssertUnwindSafe};

use fs_fixture::{create_fixture, FileTree};

#[test]
fn scope_exit_removes_fixture() -> Result<(), Box<dyn std::error::Error>> {
    fs_fixture::logging::init_test_logging();
    let root = {
        let fixture = create_fixture(FileTree::new().file("a", "a"))?;
        assert!(fixture.path().exists());
        fixture.path().to_path_buf()
    };
    assert!(!root.exists());
    Ok(())
}

#[test]
fn debug_keeps_fixture_after_scope() -> Result<(), Box<dyn std::error::Error>> {
    let root = {
        let mut fixture = create_fixture(FileTree::new().file("a", "a"))?;
        fixture.debug();
        fixture.path().to_path_buf()
    };
    assert!(root.join("a").exists());
    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn debug_with_returns_callback_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut fixture = create_fixture(FileTree::new().file("a", "hello"))?;
    let root = fixture.path().to_path_buf();

    let read = fixture.debug_with(|fx| fx.read_to_string("a"))?;
    assert_eq!(read, "hello");
    assert!(!fixture.is_cleanup_enabled());

    drop(fixture);
    assert!(root.exists());
    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn debug_with_keeps_fixture_when_callback_panics() -> Result<(), Box<dyn std::error::Error>> {
    let mut fixture = create_fixture(FileTree::new())?;
    let root = fixture.path().to_path_buf();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        fixture.debug_with(|_| panic!("callback failed"));
    }));
    assert!(outcome.is_err());

    drop(fixture);
    assert!(root.exists());
    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn close_reports_and_removes() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = create_fixture(FileTree::new().dir("d", FileTree::new().file("f", "x")))?;
    let root = fixture.path().to_path_buf();
    fixture.close()?;
    assert!(!root.exists());
    Ok(())
}

#[test]
fn dropping_after_manual_removal_is_quiet() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = create_fixture(FileTree::new().file("a", "a"))?;
    let root = fixture.path().to_path_buf();
    fixture.remove("")?;
    drop(fixture);
    assert!(!root.exists());
    Ok(())
}
