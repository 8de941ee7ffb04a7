use std::fs;
use std::path::Path;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_vk_cpp_generator");

fn fixture() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mini_vk.xml"))
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("vulkan.hpp");

    let status = Command::new(BIN).arg(fixture()).arg("-o").arg(&out).status().unwrap();
    assert!(status.success());

    let header = fs::read_to_string(&out).unwrap();
    assert!(header.starts_with("#pragma once"));
    assert!(header.contains("class ImageCreateInfo {"));
}

#[test]
fn replaces_output_file_whole() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("vulkan.hpp");
    fs::write(&out, "stale contents").unwrap();

    let status = Command::new(BIN).arg(fixture()).arg("-o").arg(&out).status().unwrap();
    assert!(status.success());
    assert!(fs::read_to_string(&out).unwrap().starts_with("#pragma once"));

    // Nothing is left next to the output
    let entries: Vec<String> = fs::read_dir(dir.path()).unwrap()
                                                      .map(|e| e.unwrap().file_name().into_string().unwrap())
                                                      .collect();
    assert_eq!(entries, vec!["vulkan.hpp".to_owned()]);

    // A failed run keeps the previous header
    let broken = dir.path().join("broken.xml");
    fs::write(&broken, "<registry><types>").unwrap();
    let output = Command::new(BIN).arg(&broken).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(fs::read_to_string(&out).unwrap().starts_with("#pragma once"));
}

#[test]
fn writes_stdout_with_namespace() {
    let output = Command::new(BIN).arg(fixture()).args(&["--namespace", "vkw"]).output().unwrap();
    assert!(output.status.success());

    let header = String::from_utf8(output.stdout).unwrap();
    assert!(header.contains("namespace vkw {"));
    assert!(header.contains("} // namespace vkw"));
}

#[test]
fn rejects_bad_argument_count() {
    let output = Command::new(BIN).output().unwrap();
    assert!(!output.status.success());

    let output = Command::new(BIN).arg(fixture()).arg("extra.xml").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn reports_failing_stage() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("vulkan.hpp");

    let output = Command::new(BIN).arg(dir.path().join("missing.xml")).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: reading: "));
    assert!(!out.exists());

    let broken = dir.path().join("broken.xml");
    fs::write(&broken, "<registry><types><member/></types></registry>").unwrap();
    let output = Command::new(BIN).arg(&broken).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: parsing: "));
    assert!(!out.exists());
}
