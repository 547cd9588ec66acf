use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Runs `aura` isolated from any config in the user's home directory.
fn aura(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aura").unwrap();
    cmd.env("AURA_CONFIG", dir.path().join("missing-config.toml"))
        .env_remove("AURA_DEBUG_LOG");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn write_csv(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

mod import_tests {
    use super::*;

    #[test]
    fn test_mapping_email_only() {
        let dir = tempdir().unwrap();
        let file = write_csv(dir.path(), "contacts.csv", "Phone,EMAIL,Notes\n555,a@x.io,hi\n");

        let output = aura(&dir)
            .args(["mapping", &file])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let mapping = json["data"]["mapping"].as_array().unwrap();
        let mapped: Vec<&Value> = mapping.iter().filter(|e| !e["field"].is_null()).collect();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0]["header"], "EMAIL");
        assert_eq!(mapped[0]["field"], "email");
        assert_eq!(json["data"]["preview"][0]["value"], "a@x.io");
    }

    #[test]
    fn test_mapping_shows_picker_labels() {
        let dir = tempdir().unwrap();
        let file = write_csv(
            dir.path(),
            "leads.csv",
            "Full Name,Phone,Deal Size
Ada,555,$900
",
        );

        let output = aura(&dir)
            .args(["mapping", &file, "--map", "Deal Size=value"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let mapping = &json["data"]["mapping"];
        assert_eq!(mapping[0]["label"], "Full Name");
        assert_eq!(mapping[1]["field"], Value::Null);
        assert_eq!(mapping[1]["label"], "Don't Import");
        assert_eq!(mapping[2]["field"], "value");
        assert_eq!(mapping[2]["label"], "Deal Value");
    }

    #[test]
    fn test_import_skips_blank_rows() {
        let dir = tempdir().unwrap();
        let file = write_csv(
            dir.path(),
            "leads.csv",
            "Full Name, Email, Deal Size\nAda,ada@x.io,$5000\n,,\nGrace,grace@x.io,$7000\n",
        );

        let output = aura(&dir)
            .args(["--no-seed", "import", &file, "--map", "Deal Size=value"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["imported"], 2);
        assert_eq!(json["data"]["skipped"], 1);
        assert_eq!(json["data"]["total_leads"], 2);
        assert_eq!(json["data"]["leads"][0]["value"], 5000.0);
        assert_eq!(json["data"]["leads"][0]["tags"][0], "Imported");
    }

    #[test]
    fn test_import_adds_to_demo_leads() {
        let dir = tempdir().unwrap();
        let file = write_csv(dir.path(), "leads.csv", "Name,Stage\nAda,won\n");

        let output = aura(&dir)
            .args(["import", &file, "--tag", "Webinar"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["total_leads"], 7);
        assert_eq!(json["data"]["leads"][0]["status"], "Won");
        assert_eq!(json["data"]["leads"][0]["tags"][0], "Webinar");
    }

    #[test]
    fn test_blank_header_row_fails() {
        let dir = tempdir().unwrap();
        let file = write_csv(dir.path(), "bad.csv", ",,\n1,2,3\n");

        aura(&dir)
            .args(["import", &file])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("No headers"));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["import", "/nonexistent/leads.csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unreadable file"));
    }

    #[test]
    fn test_config_import_tag() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "import_tag = \"From CSV\"\nseed_demo_data = false\n").unwrap();
        let file = write_csv(dir.path(), "leads.csv", "Email\nsolo@x.io\n");

        let output = aura(&dir)
            .args(["--config", config.to_str().unwrap(), "import", &file])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["total_leads"], 1);
        assert_eq!(json["data"]["leads"][0]["name"], "Unknown");
        assert_eq!(json["data"]["leads"][0]["tags"][0], "From CSV");
    }
}

mod board_tests {
    use super::*;

    #[test]
    fn test_board_summary() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["board", "--summary"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let columns = json["data"]["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0]["status"], "New");
        assert_eq!(columns[0]["count"], 2);
        assert_eq!(json["data"]["lost_count"], 0);
        assert_eq!(json["data"]["open_value"], 147700.0);
    }

    #[test]
    fn test_move_lead() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["move", "alice freeman", "won"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["name"], "Alice Freeman");
        assert_eq!(json["data"]["status"], "Won");
    }

    #[test]
    fn test_move_to_lost_is_rejected() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["move", "Alice Freeman", "Lost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a pipeline column"));
    }

    #[test]
    fn test_move_unknown_lead() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["move", "Nobody", "Won"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }
}

mod lead_tests {
    use super::*;

    #[test]
    fn test_add_lead() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args([
                "--no-seed", "leads", "add", "--name", "Ada", "--company", "Engines", "--value",
                "250",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["status"], "New");
        assert_eq!(json["data"]["tags"][0], "New");
    }

    #[test]
    fn test_add_lead_requires_name() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["leads", "add", "--name", "  ", "--company", "Engines"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Name is required"));
    }

    #[test]
    fn test_add_lead_rejects_negative_value() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["leads", "add", "--name", "Ada", "--company", "X", "--value", "-5"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("non-negative"));
    }

    #[test]
    fn test_list_by_tag() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["leads", "list", "--tag", "Enterprise"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["count"], 2);
    }

    #[test]
    fn test_delete_confirmed_with_flag() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["--yes", "leads", "delete", "--lead", "Bob Smith"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["deleted"], 1);
        assert_eq!(json["data"]["remaining"], 5);
    }

    #[test]
    fn test_delete_declined() {
        let dir = tempdir().unwrap();
        let assert = aura(&dir)
            .args(["leads", "delete", "--all"])
            .write_stdin("n\n")
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Are you sure you want to delete 6 leads?",
            ));

        let json = parse_json_output(&assert.get_output().stdout);
        assert_eq!(json["data"]["deleted"], 0);
        assert_eq!(json["data"]["remaining"], 6);
    }

    #[test]
    fn test_delete_then_reconcile() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args([
                "--yes",
                "--list",
                "Hot=Alice Freeman,Bob Smith",
                "leads",
                "delete",
                "--lead",
                "Alice Freeman",
                "--reconcile",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["reconciled"]["list_members_pruned"], 1);
        assert_eq!(json["data"]["reconciled"]["task_links_cleared"], 1);
    }

    #[test]
    fn test_tag_lead() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["leads", "tag", "Evan Wright", "--add", "Referral", "--remove", "Design"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["tags"], serde_json::json!(["Referral"]));
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn test_create_list_from_selection() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args([
                "lists",
                "create",
                "Q3 Push",
                "--lead",
                "Diana Prince",
                "--lead",
                "Alice Freeman",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["name"], "Q3 Push");
        let ids = json["data"]["lead_ids"].as_array().unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn test_create_list_requires_name() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["lists", "create", "   ", "--all"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("List name is required"));
    }

    #[test]
    fn test_add_to_preloaded_list() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args([
                "--list",
                "Hot=Alice Freeman",
                "lists",
                "add",
                "hot",
                "--lead",
                "Alice Freeman",
                "--lead",
                "Fiona Gallagher",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["lead_ids"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_add_to_unknown_list() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args([
                "lists",
                "add",
                "7f7b5c1e-0000-4000-8000-000000000000",
                "--all",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }
}

mod export_tests {
    use super::*;

    #[test]
    fn test_export_everything_to_stdout() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .arg("export")
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "Name,Company,Email,Value,Status,Tags\n",
            ))
            .stdout(predicate::str::contains(
                "Alice Freeman,Nexus Corp,alice@nexus.com,12500,New,\"Enterprise;Q3\"",
            ))
            .stdout(predicate::function(|out: &str| out.lines().count() == 7));
    }

    #[test]
    fn test_export_selection_to_dir() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args([
                "export",
                "--lead",
                "Bob Smith",
                "--dir",
                dir.path().to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["count"], 1);
        let path = json["data"]["path"].as_str().unwrap();
        assert!(path.contains("aura_leads_export_"));
        assert!(path.ends_with(".csv"));

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Bob Smith,Global Tech"));
    }
}

mod task_tests {
    use super::*;

    #[test]
    fn test_list_open_first_with_overdue_flag() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["tasks", "list", "--today", "2023-10-26"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["title"], "Follow up with Nexus Corp");
        assert_eq!(items[0]["overdue"], true);
        assert_eq!(items[1]["title"], "Update CRM records");
        assert_eq!(items[1]["overdue"], false);
        assert_eq!(items[2]["is_complete"], true);
        assert_eq!(items[2]["overdue"], false);
    }

    #[test]
    fn test_add_task_without_due_date() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["tasks", "add", "  Call Acme  "])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["title"], "Call Acme");
        assert_eq!(json["data"]["priority"], "Medium");
        assert!(json["data"]["due_date"].is_null());
    }

    #[test]
    fn test_add_task_rejects_bad_date() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["tasks", "add", "Call Acme", "--due", "next week"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_add_task_rejects_blank_title() {
        let dir = tempdir().unwrap();
        aura(&dir)
            .args(["tasks", "add", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("title is required"));
    }

    #[test]
    fn test_toggle_task_by_title() {
        let dir = tempdir().unwrap();
        let output = aura(&dir)
            .args(["tasks", "toggle", "Update CRM records"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["is_complete"], true);
    }
}

#[test]
fn test_reconcile_on_fresh_session_is_clean() {
    let dir = tempdir().unwrap();
    let output = aura(&dir)
        .arg("reconcile")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json_output(&output);
    assert_eq!(json["data"]["list_members_pruned"], 0);
    assert_eq!(json["data"]["task_links_cleared"], 0);
}

#[test]
fn test_completions() {
    let dir = tempdir().unwrap();
    aura(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aura"));
}
