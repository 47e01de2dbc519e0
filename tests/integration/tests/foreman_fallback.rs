//! Toolchain resolution against real directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use mandolin_toolchain::{LINTER_BINARY, MANIFEST_FILE, resolve_toolchain_in};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

/// Lays out a workspace root with a manifest and a fake home with the
/// foreman-managed linter installed.
fn foreman_fixture() -> (tempfile::TempDir, tempfile::TempDir, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    touch(&root.path().join(MANIFEST_FILE));
    let binary = home.path().join(".foreman").join("bin").join(LINTER_BINARY);
    touch(&binary);
    (root, home, binary)
}

#[test]
fn explicit_setting_bypasses_foreman_lookup() {
    let (root, home, _binary) = foreman_fixture();

    // Even with a manifest and an installed binary present, a non-empty
    // explicit setting wins verbatim and carries no rule-config directory.
    let resolved = resolve_toolchain_in(
        "/custom/lute",
        &[root.path().to_path_buf()],
        Some(home.path().to_path_buf()),
    )
    .unwrap();

    assert_eq!(resolved.executable, PathBuf::from("/custom/lute"));
    assert_eq!(resolved.rule_config_dir, None);
}

#[test]
fn foreman_install_is_found_via_manifest() {
    let (root, home, binary) = foreman_fixture();

    let resolved = resolve_toolchain_in(
        "",
        &[root.path().to_path_buf()],
        Some(home.path().to_path_buf()),
    )
    .unwrap();

    assert_eq!(resolved.executable, binary);
    assert_eq!(resolved.rule_config_dir, Some(root.path().to_path_buf()));
}

#[test]
fn missing_manifest_and_missing_binary_both_collapse_to_not_found() {
    let home_with_binary = tempfile::tempdir().unwrap();
    touch(
        &home_with_binary
            .path()
            .join(".foreman")
            .join("bin")
            .join(LINTER_BINARY),
    );
    let bare_root = tempfile::tempdir().unwrap();

    // A workspace without a manifest never consults the install path.
    assert!(
        resolve_toolchain_in(
            "",
            &[bare_root.path().to_path_buf()],
            Some(home_with_binary.path().to_path_buf()),
        )
        .is_none()
    );

    // A manifest without the managed binary is equally a miss.
    let root_with_manifest = tempfile::tempdir().unwrap();
    touch(&root_with_manifest.path().join(MANIFEST_FILE));
    let empty_home = tempfile::tempdir().unwrap();

    assert!(
        resolve_toolchain_in(
            "",
            &[root_with_manifest.path().to_path_buf()],
            Some(empty_home.path().to_path_buf()),
        )
        .is_none()
    );

    // And so is having no workspace roots at all.
    assert!(resolve_toolchain_in("", &[], Some(home_with_binary.path().to_path_buf())).is_none());
}

#[test]
fn manifest_in_second_root_still_resolves() {
    let (manifest_root, home, _binary) = foreman_fixture();
    let bare_root = tempfile::tempdir().unwrap();

    let roots = vec![
        bare_root.path().to_path_buf(),
        manifest_root.path().to_path_buf(),
    ];
    let resolved = resolve_toolchain_in("", &roots, Some(home.path().to_path_buf())).unwrap();

    assert_eq!(
        resolved.rule_config_dir,
        Some(manifest_root.path().to_path_buf())
    );
}
