use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn taskboard(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    let config = file.with_file_name("no-config.toml");
    cmd.env_remove("TASKBOARD_FILE")
        .env_remove("TASKBOARD_USERNAME")
        .env_remove("TASKBOARD_PASSWORD")
        .env_remove("TASKBOARD_DEBUG_LOG")
        .args(["--file", file.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap()])
        .args(["--username", "admin", "--password", "password"]);
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn run_ok(file: &Path, args: &[&str]) -> Value {
    let output = taskboard(file)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json_output(&output);
    assert!(json["success"].as_bool().unwrap());
    json
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}

fn card_texts(list: &Value) -> Vec<String> {
    list["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].as_str().unwrap().to_string())
        .collect()
}

mod list_tests {
    use super::*;

    #[test]
    fn test_list_create_with_cards() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        let json = run_ok(
            &file,
            &["list", "create", "--name", "Groceries", "--card", "milk", "--card", "eggs"],
        );
        assert_eq!(json["data"]["name"], "Groceries");
        assert_eq!(card_texts(&json["data"]), vec!["milk", "eggs"]);

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(on_disk["version"], 2);
        assert_eq!(on_disk["data"]["lists"][0]["name"], "Groceries");
    }

    #[test]
    fn test_list_create_blank_name_fails_without_writing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        taskboard(&file)
            .args(["list", "create", "--name", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
        assert!(!file.exists());
    }

    #[test]
    fn test_list_ls_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 0);
        assert!(!file.exists());
    }

    #[test]
    fn test_list_rename_and_show() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        let created = run_ok(&file, &["list", "create", "--name", "Todo"]);
        let id = extract_id(&created);

        run_ok(&file, &["list", "rename", "--id", &id, "--name", "Doing"]);
        let shown = run_ok(&file, &["list", "show", "--id", &id]);
        assert_eq!(shown["data"]["name"], "Doing");
    }

    #[test]
    fn test_list_move_and_delete() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        for name in ["A", "B", "C"] {
            run_ok(&file, &["list", "create", "--name", name]);
        }
        let moved = run_ok(&file, &["list", "move", "--from-index", "0", "--to-index", "2"]);
        let names: Vec<&str> = moved["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);

        let a_id = moved["data"]["items"][2]["id"].as_str().unwrap().to_string();
        run_ok(&file, &["list", "delete", "--id", &a_id]);
        let listed = run_ok(&file, &["list", "ls"]);
        assert_eq!(listed["data"]["count"], 2);
    }

    #[test]
    fn test_list_move_out_of_range_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        run_ok(&file, &["list", "create", "--name", "Only"]);
        taskboard(&file)
            .args(["list", "move", "--from-index", "0", "--to-index", "3"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));
    }
}

mod card_tests {
    use super::*;

    fn seeded(file: &Path) -> (String, String) {
        let todo = run_ok(
            file,
            &["list", "create", "--name", "Todo", "--card", "a", "--card", "b", "--card", "c"],
        );
        let done = run_ok(file, &["list", "create", "--name", "Done", "--card", "x"]);
        (extract_id(&todo), extract_id(&done))
    }

    #[test]
    fn test_card_add_and_remove() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let (todo, _) = seeded(&file);

        let added = run_ok(&file, &["card", "add", "--list-id", &todo, "--text", "d"]);
        assert_eq!(added["data"]["text"], "d");

        let removed = run_ok(&file, &["card", "remove", "--list-id", &todo, "--index", "0"]);
        assert_eq!(removed["data"]["text"], "a");

        let shown = run_ok(&file, &["list", "show", "--id", &todo]);
        assert_eq!(card_texts(&shown["data"]), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_card_move_within_list() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let (todo, _) = seeded(&file);

        let json = run_ok(
            &file,
            &[
                "card", "move", "--from-list", &todo, "--from-index", "0", "--to-list", &todo,
                "--to-index", "2",
            ],
        );
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(card_texts(&json["data"]["items"][0]), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_card_move_between_lists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let (todo, done) = seeded(&file);

        let json = run_ok(
            &file,
            &[
                "card", "move", "--from-list", &todo, "--from-index", "1", "--to-list", &done,
                "--to-index", "0",
            ],
        );
        assert_eq!(card_texts(&json["data"]["items"][0]), vec!["a", "c"]);
        assert_eq!(card_texts(&json["data"]["items"][1]), vec!["b", "x"]);
    }

    #[test]
    fn test_card_update_and_show() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let (todo, _) = seeded(&file);
        let list = run_ok(&file, &["list", "show", "--id", &todo]);
        let card_id = list["data"]["cards"][0]["id"].as_str().unwrap().to_string();

        let updated = run_ok(
            &file,
            &[
                "card",
                "update",
                "--id",
                &card_id,
                "--description",
                "buy oat milk",
                "--priority",
                "high",
                "--reminder",
                "1 Day Before",
                "--end-date",
                "2024-06-01",
            ],
        );
        assert_eq!(updated["data"]["details"]["priority"], "High");
        assert_eq!(updated["data"]["details"]["reminder"], "1 Day Before");

        let shown = run_ok(&file, &["card", "show", "--id", &card_id]);
        assert_eq!(shown["data"]["index"], 0);
        assert_eq!(shown["data"]["card"]["details"]["description"], "buy oat milk");
        assert_eq!(shown["data"]["card"]["text"], "a");
    }

    #[test]
    fn test_card_update_invalid_priority() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let (todo, _) = seeded(&file);
        let list = run_ok(&file, &["list", "show", "--id", &todo]);
        let card_id = list["data"]["cards"][0]["id"].as_str().unwrap().to_string();

        taskboard(&file)
            .args(["card", "update", "--id", &card_id, "--priority", "urgent"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("priority"));
    }
}

mod drag_tests {
    use super::*;

    #[test]
    fn test_drag_card_between_lists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let todo = run_ok(&file, &["list", "create", "--name", "Todo", "--card", "a", "--card", "b"]);
        let done = run_ok(&file, &["list", "create", "--name", "Done"]);
        let todo_id = extract_id(&todo);
        let done_id = extract_id(&done);
        let card_id = todo["data"]["cards"][0]["id"].as_str().unwrap();

        let event = serde_json::json!({
            "dragged_id": card_id,
            "kind": "card",
            "source": {"container_id": todo_id, "index": 0},
            "destination": {"container_id": done_id, "index": 0},
        });
        let json = run_ok(&file, &["drag", "--event", &event.to_string()]);
        assert_eq!(json["data"]["applied"], true);
        assert_eq!(card_texts(&json["data"]["lists"][0]), vec!["b"]);
        assert_eq!(card_texts(&json["data"]["lists"][1]), vec!["a"]);
    }

    #[test]
    fn test_drag_list_with_legacy_board_id() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let first = run_ok(&file, &["list", "create", "--name", "First"]);
        run_ok(&file, &["list", "create", "--name", "Second"]);

        let event = serde_json::json!({
            "dragged_id": extract_id(&first),
            "kind": "list",
            "source": {"container_id": "all-tasks", "index": 0},
            "destination": {"container_id": "all-tasks", "index": 1},
        });
        let json = run_ok(&file, &["drag", "--event", &event.to_string()]);
        assert_eq!(json["data"]["lists"][0]["name"], "Second");
        assert_eq!(json["data"]["lists"][1]["name"], "First");
    }

    #[test]
    fn test_cancelled_drag_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let todo = run_ok(&file, &["list", "create", "--name", "Todo", "--card", "a"]);
        let before = fs::read(&file).unwrap();

        let event = serde_json::json!({
            "dragged_id": todo["data"]["cards"][0]["id"],
            "kind": "card",
            "source": {"container_id": extract_id(&todo), "index": 0},
            "destination": null,
        });
        let json = run_ok(&file, &["drag", "--event", &event.to_string()]);
        assert_eq!(json["data"]["applied"], false);
        assert_eq!(fs::read(&file).unwrap(), before);
    }

    #[test]
    fn test_malformed_drag_event() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        taskboard(&file)
            .args(["drag", "--event", "{\"kind\": \"sideways\"}"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid drag event"));
    }
}

mod detail_tests {
    use super::*;

    fn seeded_card(file: &Path) -> String {
        let list = run_ok(file, &["list", "create", "--name", "Todo", "--card", "report"]);
        list["data"]["cards"][0]["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_checklist_lifecycle() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let card_id = seeded_card(&file);

        let added = run_ok(&file, &["checklist", "add", "--card-id", &card_id, "--text", "draft"]);
        let item_id = added["data"]["item_id"].as_str().unwrap().to_string();

        let toggled = run_ok(
            &file,
            &["checklist", "toggle", "--card-id", &card_id, "--item-id", &item_id],
        );
        assert_eq!(toggled["data"]["completed"], true);

        taskboard(&file)
            .args(["checklist", "remove", "--card-id", &card_id, "--item-id", &item_id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"));

        run_ok(&file, &["checklist", "toggle", "--card-id", &card_id, "--item-id", &item_id]);
        let removed = run_ok(
            &file,
            &["checklist", "remove", "--card-id", &card_id, "--item-id", &item_id],
        );
        assert!(removed["data"]["details"]["checklist"]["items"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_comment_uses_logged_in_user() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let card_id = seeded_card(&file);

        let json = run_ok(&file, &["comment", "add", "--card-id", &card_id, "--text", "looks good"]);
        assert_eq!(json["data"]["username"], "admin");
        assert_eq!(json["data"]["text"], "looks good");

        let shown = run_ok(&file, &["card", "show", "--id", &card_id]);
        assert_eq!(shown["data"]["card"]["details"]["comments"][0]["text"], "looks good");
    }

    #[test]
    fn test_assign_toggles() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let card_id = seeded_card(&file);

        let first = run_ok(&file, &["assign", "--card-id", &card_id, "--user-id", "2"]);
        assert_eq!(first["data"]["assigned"], true);
        assert_eq!(first["data"]["assignees"][0]["name"], "User B");

        let second = run_ok(&file, &["assign", "--card-id", &card_id, "--user-id", "2"]);
        assert_eq!(second["data"]["assigned"], false);

        taskboard(&file)
            .args(["assign", "--card-id", &card_id, "--user-id", "99"])
            .assert()
            .failure();
    }

    #[test]
    fn test_attach_appends() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let card_id = seeded_card(&file);

        run_ok(&file, &["attach", "--card-id", &card_id, "--name", "notes.txt"]);
        let json = run_ok(
            &file,
            &["attach", "--card-id", &card_id, "--name", "plan.pdf", "--media-type", "application/pdf"],
        );
        let attachments = json["data"]["attachments"].as_array().unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[1]["media_type"], "application/pdf");
    }
}

mod auth_and_storage_tests {
    use super::*;

    #[test]
    fn test_wrong_password_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        let config = dir.path().join("no-config.toml");
        Command::cargo_bin("taskboard")
            .unwrap()
            .args(["--file", file.to_str().unwrap()])
            .args(["--config", config.to_str().unwrap()])
            .args(["--username", "admin", "--password", "hunter2", "list", "ls"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unauthorized"));
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        Command::cargo_bin("taskboard")
            .unwrap()
            .env_remove("TASKBOARD_USERNAME")
            .env_remove("TASKBOARD_PASSWORD")
            .args(["--file", file.to_str().unwrap(), "list", "ls"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Login required"));
    }

    #[test]
    fn test_credentials_from_config_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        let config = dir.path().join("config.toml");
        fs::write(
            &config,
            "[credentials]\nusername = \"dana\"\npassword = \"s3cret\"\n",
        )
        .unwrap();

        Command::cargo_bin("taskboard")
            .unwrap()
            .args(["--file", file.to_str().unwrap()])
            .args(["--config", config.to_str().unwrap()])
            .env("TASKBOARD_USERNAME", "dana")
            .env("TASKBOARD_PASSWORD", "s3cret")
            .args(["list", "ls"])
            .assert()
            .success();
    }

    #[test]
    fn test_legacy_file_is_migrated() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        fs::write(
            &file,
            r#"[{"id": "legacy", "name": "Todo", "descriptions": ["a", "b"]}]"#,
        )
        .unwrap();

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["items"][0]["name"], "Todo");
        assert_eq!(card_texts(&json["data"]["items"][0]), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");
        fs::write(&file, "not json at all").unwrap();

        let json = run_ok(&file, &["list", "ls"]);
        assert_eq!(json["data"]["count"], 0);
    }

    #[test]
    fn test_completions() {
        Command::cargo_bin("taskboard")
            .unwrap()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("taskboard"));
    }

    #[test]
    fn test_missing_required_args() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("board.json");

        taskboard(&file)
            .args(["list", "create"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--name"));
    }
}
