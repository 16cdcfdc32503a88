use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs the binary without a settings file and without the send delay.
fn kubepizza(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kubepizza"))
        .args(args)
        .env_remove("KUBEPIZZA_CONFIG")
        .env_remove("RUST_LOG")
        .env("KUBEPIZZA_SEND_DELAY_MS", "0")
        .output()
        .expect("failed to run kubepizza")
}

fn kubepizza_with_config(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kubepizza"))
        .args(args)
        .env("KUBEPIZZA_CONFIG", config)
        .env_remove("RUST_LOG")
        .env("KUBEPIZZA_SEND_DELAY_MS", "0")
        .output()
        .expect("failed to run kubepizza")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// order create
// ---------------------------------------------------------------------------

#[test]
fn order_create_prints_json_order() {
    let out = kubepizza(&[
        "order",
        "create",
        "--pizza",
        "diavola",
        "--size",
        "large",
        "--toppings",
        "mozzarella,chili",
        "--output",
        "json",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let order: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(order["pizza"], "diavola");
    assert_eq!(order["size"], "large");
    assert_eq!(order["toppings"], serde_json::json!(["mozzarella", "chili"]));
    assert_eq!(order["delivery"], false);
}

#[test]
fn order_create_accepts_aliases_and_casing() {
    let out = kubepizza(&["o", "create", "-p", "MARGHERITA", "-t", "basil", "-t", "Tomato", "-d"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.starts_with("PIZZA"));
    assert!(text.contains("margherita"));
    assert!(text.contains("basil, tomato"));
    assert!(text.contains("yes"));
}

#[test]
fn order_create_yaml_output() {
    let out = kubepizza(&["order", "create", "--pizza", "marinara", "-o", "yaml"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("pizza: marinara"));
    assert!(text.contains("size: medium"));
}

#[test]
fn order_create_reports_every_error() {
    let out = kubepizza(&["order", "create", "--size", "small", "--toppings", "a,b,c,d"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let err = stderr(&out);
    assert!(err.contains("option '--pizza' is required"), "{err}");
    assert!(err.contains("a small pizza takes at most 3 toppings, got 4"), "{err}");
    assert!(err.contains("argument 'a' not recognized for option '--toppings'"), "{err}");
}

#[test]
fn order_create_unknown_pizza_lists_known_pizzas() {
    let out = kubepizza(&["order", "create", "--pizza", "calzone"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("argument 'calzone' not recognized for option '--pizza'"));
    assert!(err.contains("margherita, diavola"));
}

#[test]
fn order_create_rejects_bad_size() {
    let out = kubepizza(&["order", "create", "--pizza", "margherita", "--size", "huge"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("must be one of: small, medium, large"));
}

// ---------------------------------------------------------------------------
// other commands
// ---------------------------------------------------------------------------

#[test]
fn order_list_filters_by_status() {
    let out = kubepizza(&["order", "list", "--status", "open", "--output", "json"]);
    assert!(out.status.success());
    let orders: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(!orders.is_empty());
    assert!(orders.iter().all(|o| o["status"] == "open"));
}

#[test]
fn topping_commands() {
    let out = kubepizza(&["topping", "list"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("mozzarella"));

    let out = kubepizza(&["t", "add", "-n", "Basil", "-o", "json"]);
    assert!(out.status.success());
    let entry: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(entry["name"], "basil");
    assert_eq!(entry["known"], true);

    let out = kubepizza(&["topping", "add"]);
    assert_eq!(out.status.code(), Some(1));
}

// ---------------------------------------------------------------------------
// help, routing and errors
// ---------------------------------------------------------------------------

#[test]
fn help_shows_examples_for_path() {
    for flag in ["--help", "-h", "-?"] {
        let out = kubepizza(&["order", "create", flag]);
        assert!(out.status.success());
        let text = stdout(&out);
        assert!(text.contains("Usage:\n  kubepizza order create [options]"));
        assert!(text.contains("-p, --pizza <name> (REQUIRED)"));
        assert!(text.contains("[default: medium]"));
        assert!(text.contains("-d, --delivery [<true|false>]"));
        assert!(text.contains("Examples:\n  kubepizza order create --pizza margherita"));
    }
}

#[test]
fn router_prints_help_and_succeeds() {
    let out = kubepizza(&["order"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Commands:"));
    assert!(text.contains("create"));
    assert!(text.contains("list"));

    let out = kubepizza(&[]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("order, o"));
}

#[test]
fn unknown_subcommand_fails() {
    let out = kubepizza(&["order", "bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unrecognized command 'bogus' for 'kubepizza order'"));
}

// ---------------------------------------------------------------------------
// completion
// ---------------------------------------------------------------------------

#[test]
fn suggest_toppings_for_chosen_pizza() {
    let out = kubepizza(&["[suggest]", "order", "create", "--pizza", "margherita", "--toppings", ""]);
    assert!(out.status.success());
    let mut lines: Vec<String> = stdout(&out).lines().map(String::from).collect();
    lines.sort();
    assert_eq!(lines, ["basil", "mozzarella", "tomato"]);
}

#[test]
fn suggest_filters_by_partial() {
    let out = kubepizza(&["[suggest]", "order", "create", "--pizza", "dia"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "diavola\n");

    let out = kubepizza(&["[suggest]", "or"]);
    assert_eq!(stdout(&out), "order\n");
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[test]
fn settings_file_selects_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("catalog.yaml");
    fs::write(
        &catalog,
        "pizzas:\n  - name: bianca\n    recommended: [garlic]\ntoppings: [garlic, rosemary]\n",
    )
    .unwrap();
    let config = dir.path().join("settings.yaml");
    fs::write(&config, format!("catalog: {}\n", catalog.display())).unwrap();

    let out = kubepizza_with_config(&config, &["order", "create", "-p", "bianca", "-t", "rosemary"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let out = kubepizza_with_config(&config, &["order", "create", "-p", "margherita"]);
    assert_eq!(out.status.code(), Some(1));

    let out = kubepizza_with_config(&config, &["[suggest]", "order", "create", "-p", "bianca", "-t", ""]);
    assert_eq!(stdout(&out), "garlic\n");
}

#[test]
fn broken_settings_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.yaml");
    fs::write(&config, "send_delay_ms: [not, a, number]\n").unwrap();

    let out = kubepizza_with_config(&config, &["topping", "list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Failed to parse settings"));
}
