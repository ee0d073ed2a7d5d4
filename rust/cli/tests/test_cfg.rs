use ledger_cli::run;
use serial_test::serial;
use serde_json::Value;

const VARS: &[&str] = &[
    "POKER_LEDGER_CONFIG",
    "POKER_LEDGER_STARTING_STACK",
    "POKER_LEDGER_SMALL_BLIND",
    "POKER_LEDGER_BIG_BLIND",
    "POKER_LEDGER_DATA_DIR",
    "POKER_LEDGER_CONFLICT_POLICY",
];

fn clear_env() {
    for var in VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn cfg(extra: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["poker-ledger"];
    argv.extend_from_slice(extra);
    argv.push("cfg");
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn defaults_are_reported_as_default() {
    clear_env();
    let (code, stdout, _) = cfg(&[]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["starting_stack"]["value"], 1000);
    assert_eq!(json["small_blind"]["value"], 10);
    assert_eq!(json["big_blind"]["value"], 20);
    assert_eq!(json["conflict_policy"]["value"], "last-writer-wins");
    for key in ["starting_stack", "small_blind", "big_blind", "data_dir", "conflict_policy"] {
        assert_eq!(json[key]["source"], "default", "{}", key);
    }
}

#[test]
#[serial]
fn env_beats_file_and_flag_beats_env() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("ledger.toml");
    std::fs::write(
        &file,
        "starting_stack = 400\nbig_blind = 40\ndata_dir = \"/from/file\"\n",
    )
    .unwrap();
    unsafe {
        std::env::set_var("POKER_LEDGER_CONFIG", &file);
        std::env::set_var("POKER_LEDGER_BIG_BLIND", "50");
        std::env::set_var("POKER_LEDGER_DATA_DIR", "/from/env");
        std::env::set_var("POKER_LEDGER_CONFLICT_POLICY", "reject-stale");
    }

    let (code, stdout, stderr) = cfg(&["--data-dir", "/from/flag"]);
    clear_env();
    assert_eq!(code, 0, "stderr: {}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["starting_stack"]["value"], 400);
    assert_eq!(json["starting_stack"]["source"], "file");
    assert_eq!(json["big_blind"]["value"], 50);
    assert_eq!(json["big_blind"]["source"], "env");
    assert_eq!(json["data_dir"]["value"], "/from/flag");
    assert_eq!(json["data_dir"]["source"], "cli");
    assert_eq!(json["conflict_policy"]["value"], "reject-stale");
}

#[test]
#[serial]
fn invalid_blinds_fail_every_command() {
    clear_env();
    unsafe {
        std::env::set_var("POKER_LEDGER_SMALL_BLIND", "30");
    }
    let (code, _, stderr) = cfg(&[]);
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("big_blind must be >= small_blind"), "stderr: {}", stderr);
}

#[test]
#[serial]
fn configured_stakes_reach_the_table() {
    clear_env();
    unsafe {
        std::env::set_var("POKER_LEDGER_STARTING_STACK", "500");
    }
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        ["poker-ledger", "sim", "--seats", "2", "--hands", "1", "--seed", "1"],
        &mut out,
        &mut err,
    );
    clear_env();
    assert_eq!(code, 0);
    assert!(String::from_utf8_lossy(&out).contains("Chips in play: 1000"));
}
