use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(data_dir: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("phonebank")
        .args(["--data-dir", data_dir.to_str().expect("data dir")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(data_dir: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("phonebank")
        .args(["--data-dir", data_dir.to_str().expect("data dir"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_add_edit_show_delete_flow() {
    let temp = TempDir::new().expect("temp dir");
    let data_dir = temp.path();

    let created = run_cmd_json(
        data_dir,
        &[
            "add-contact",
            "--first-name",
            "Marie",
            "--last-name",
            "Curie",
            "--phone",
            "0612345678",
        ],
    );
    assert_eq!(created["firstName"], "Marie");
    assert_eq!(created["phoneNumber"], "+33 6 12 34 56 78");
    let id = created["id"].as_str().expect("id").to_string();

    let list = run_cmd_json(data_dir, &["list"]);
    assert_eq!(list.as_array().expect("array").len(), 1);

    let updated = run_cmd_json(
        data_dir,
        &["edit-contact", &id, "--status", "rappel", "--email", "m@curie.fr"],
    );
    assert_eq!(updated["status"], "rappel");
    assert_eq!(updated["email"], "m@curie.fr");

    let shown = run_cmd_json(data_dir, &["show", &id]);
    assert_eq!(shown["lastName"], "Curie");

    run_cmd(data_dir, &["delete", &id]);
    let list = run_cmd_json(data_dir, &["list"]);
    assert!(list.as_array().expect("array").is_empty());
}

#[test]
fn cli_import_and_export_roundtrip() {
    let temp = TempDir::new().expect("temp dir");
    let data_dir = temp.path();

    let csv_path = temp.path().join("upload.csv");
    std::fs::write(
        &csv_path,
        "Prénom,Nom,Téléphone\nJean,Dupont,0711223344\n",
    )
    .expect("write upload");

    run_cmd(data_dir, &["import", csv_path.to_str().expect("path")]);

    let list = run_cmd_json(data_dir, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["firstName"], "Jean");
    assert_eq!(items[0]["phoneNumber"], "+33 7 11 22 33 44");

    let exported = run_cmd(data_dir, &["export"]);
    assert!(exported.starts_with("id,"));
    assert!(exported.contains("Jean"));
}

#[test]
fn cli_rejects_unknown_contact_with_not_found_exit_code() {
    let temp = TempDir::new().expect("temp dir");
    let output = cargo_bin_cmd!("phonebank")
        .args([
            "--data-dir",
            temp.path().to_str().expect("data dir"),
            "show",
            "00000000-0000-4000-8000-000000000000",
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_rejects_malformed_contact_id_with_invalid_input_exit_code() {
    let temp = TempDir::new().expect("temp dir");
    let output = cargo_bin_cmd!("phonebank")
        .args([
            "--data-dir",
            temp.path().to_str().expect("data dir"),
            "show",
            "not-a-uuid",
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("invalid contact id"));
}

#[test]
fn cli_edit_sets_and_clears_call_history_fields() {
    let temp = TempDir::new().expect("temp dir");
    let data_dir = temp.path();

    let created = run_cmd_json(data_dir, &["add-contact", "--first-name", "Ada"]);
    let id = created["id"].as_str().expect("id").to_string();

    let updated = run_cmd_json(
        data_dir,
        &[
            "edit-contact",
            &id,
            "--date-appel",
            "01/03/2026",
            "--heure-appel",
            "10:30:00",
            "--duree-appel",
            "02:05",
        ],
    );
    assert_eq!(updated["dateAppel"], "01/03/2026");
    assert_eq!(updated["dureeAppel"], "02:05");

    // An empty flag value clears the field.
    let cleared = run_cmd_json(data_dir, &["edit-contact", &id, "--duree-appel", ""]);
    assert!(cleared["dureeAppel"].is_null());
    assert_eq!(cleared["dateAppel"], "01/03/2026");
}

#[test]
fn cli_delete_all_requires_confirmation() {
    let temp = TempDir::new().expect("temp dir");
    let output = cargo_bin_cmd!("phonebank")
        .args([
            "--data-dir",
            temp.path().to_str().expect("data dir"),
            "delete-all",
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_backup_writes_snapshot() {
    let temp = TempDir::new().expect("temp dir");
    let data_dir = temp.path();

    run_cmd(data_dir, &["add-contact", "--first-name", "Ada"]);
    let report = run_cmd_json(data_dir, &["backup"]);
    let output = report["output"].as_str().expect("snapshot path");
    assert!(Path::new(output).exists());
}
