//! Asserts the generated dependency manifest is up to date with respect to
//! the requirements list it was derived from.
//!
//! It re-hashes the requirements list and compares the digest to the one
//! recorded in the existing generated manifest. The build harness points the
//! test at its inputs through the `_TEST_*` environment variables.

use std::fs::{self, File};
use std::path::PathBuf;

use depsync::generate::write_manifest;
use depsync::locate::resolve_env_path;
use depsync::manifest::{Manifest, ManifestFile};

const REQUIREMENTS_ENV: &str = "_TEST_REQUIREMENTS";
const MANIFEST_ENV: &str = "_TEST_MANIFEST";
const GENERATOR_HASH_ENV: &str = "_TEST_MANIFEST_GENERATOR_HASH";

/// Resolve an environment variable to a filesystem path, aborting the test
/// with the offending variable or path and the underlying cause on failure.
fn resolved_env_path(var: &str) -> PathBuf {
    match resolve_env_path(var) {
        Ok(path) => path,
        Err(e) => panic!("{}", e),
    }
}

/// Run the verification procedure against whatever the `_TEST_*` variables
/// point at. Setup failures abort; a stale manifest fails with the file's
/// real location and remediation instructions.
fn verify_manifest_is_up_to_date() {
    let requirements_path = resolved_env_path(REQUIREMENTS_ENV);
    let manifest_path = resolved_env_path(MANIFEST_ENV);

    let manifest_file = match ManifestFile::decode(&manifest_path) {
        Ok(file) => file,
        Err(e) => panic!("decoding manifest file: {}", e),
    };

    if manifest_file.integrity.is_empty() {
        panic!("failed to find the manifest integrity digest");
    }

    let generator_hash_path = resolved_env_path(GENERATOR_HASH_ENV);

    let mut generator_hash = File::open(&generator_hash_path)
        .unwrap_or_else(|e| panic!("opening {:?}: {}", generator_hash_path, e));
    let mut requirements = File::open(&requirements_path)
        .unwrap_or_else(|e| panic!("opening {:?}: {}", requirements_path, e));

    let valid = manifest_file
        .verify_integrity(&mut generator_hash, &mut requirements)
        .unwrap_or_else(|e| panic!("verifying integrity: {}", e));
    if !valid {
        let manifest_realpath = fs::canonicalize(&manifest_path)
            .unwrap_or_else(|e| panic!("evaluating symlink {:?}: {}", manifest_path, e));
        panic!(
            "{:?} is out-of-date. Follow the update instructions in that file to resolve this",
            manifest_realpath
        );
    }
}

#[test]
#[ignore = "requires the build harness to export the _TEST_* variables"]
fn generated_manifest_is_up_to_date() {
    verify_manifest_is_up_to_date();
}

#[test]
fn verification_procedure_passes_against_generated_fixtures() {
    let temp = tempfile::tempdir().unwrap();
    let manifest_path = temp.path().join("manifest.yaml");
    let generator_hash = temp.path().join("generator.sha256");
    let requirements = temp.path().join("requirements.txt");
    fs::write(&generator_hash, "3d4e5f").unwrap();
    fs::write(&requirements, "requests==2.31.0\npyyaml==6.0\n").unwrap();

    let mut payload = Manifest::default();
    payload
        .modules_mapping
        .insert("yaml".to_string(), "pyyaml".to_string());
    write_manifest(&payload, &manifest_path, &generator_hash, &requirements, None).unwrap();

    // Absolute paths so the optional location root cannot interfere.
    std::env::set_var(REQUIREMENTS_ENV, &requirements);
    std::env::set_var(MANIFEST_ENV, &manifest_path);
    std::env::set_var(GENERATOR_HASH_ENV, &generator_hash);

    verify_manifest_is_up_to_date();

    std::env::remove_var(REQUIREMENTS_ENV);
    std::env::remove_var(MANIFEST_ENV);
    std::env::remove_var(GENERATOR_HASH_ENV);
}
