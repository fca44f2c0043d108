//! Binary-level tests for startup paths that need no network.
//! Run with: cargo test --test cli_test

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

fn bot() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hello-bot"));
    cmd.env_remove("DISCORD_TOKEN")
        .env_remove("DISCORD_GUILD_ID")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1");
    cmd
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn console_with_input(rust_log: &str, input: &[u8]) -> Output {
    let mut child = bot()
        .arg("console")
        .env("RUST_LOG", rust_log)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Should spawn binary");

    child
        .stdin
        .take()
        .expect("Should have stdin")
        .write_all(input)
        .expect("Should write stdin");

    child.wait_with_output().expect("Should finish")
}

/// Missing token fails with exit code 1 before any connection attempt
#[test]
fn test_missing_token_exits_with_config_error() {
    let started = Instant::now();
    let output = bot()
        .arg("run")
        .env("DISCORD_GUILD_ID", "123456789")
        .output()
        .expect("Should run binary");
    let elapsed = started.elapsed();

    assert_eq!(output.status.code(), Some(1));
    let text = combined(&output);
    assert!(text.contains("DISCORD_TOKEN"), "Output should name the variable: {}", text);
    assert!(!text.contains("Authenticated"), "Should not reach the network: {}", text);

    // The config error is the very first thing logged, nothing ran before it
    let first = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .expect("Should log something");
    assert!(
        first.contains("ERROR") && first.contains("DISCORD_TOKEN"),
        "First log line should be the config error: {}",
        text
    );
    assert!(
        elapsed < Duration::from_secs(5),
        "Should fail fast, took {:?}",
        elapsed
    );
}

/// Missing guild id fails the same way, also when no subcommand is given
#[test]
fn test_missing_guild_exits_with_config_error() {
    let output = bot()
        .env("DISCORD_TOKEN", "not-a-real-token")
        .output()
        .expect("Should run binary");

    assert_eq!(output.status.code(), Some(1));
    let text = combined(&output);
    assert!(text.contains("DISCORD_GUILD_ID"), "Output should name the variable: {}", text);
    assert!(!text.contains("not-a-real-token"), "Token must never be printed");
}

#[test]
fn test_empty_values_count_as_missing() {
    let output = bot()
        .arg("run")
        .env("DISCORD_TOKEN", "")
        .env("DISCORD_GUILD_ID", "")
        .output()
        .expect("Should run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("DISCORD_TOKEN"));
}

#[test]
fn test_non_numeric_guild_is_rejected() {
    let output = bot()
        .arg("run")
        .env("DISCORD_TOKEN", "not-a-real-token")
        .env("DISCORD_GUILD_ID", "my-server")
        .output()
        .expect("Should run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Invalid value for DISCORD_GUILD_ID"));
}

#[test]
fn test_commands_lists_hello() {
    let output = bot().arg("commands").output().expect("Should run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('[').expect("Should print a JSON array");
    let defs: serde_json::Value =
        serde_json::from_str(stdout[start..].trim()).expect("Should parse JSON");

    assert_eq!(
        defs,
        serde_json::json!([{ "name": "hello", "description": "Hello command" }])
    );
}

#[test]
fn test_version() {
    let output = bot().arg("version").output().expect("Should run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("hello-bot v{}", env!("CARGO_PKG_VERSION"))));
}

/// Console mode answers stdin lines and exits cleanly on EOF
#[test]
fn test_console_round() {
    let output = console_with_input("info", b"ping\nxyz\n/hello\npong\n");
    assert!(output.status.success(), "{}", combined(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let replies: Vec<&str> = stdout.lines().filter(|l| l.starts_with("[BOT]")).collect();
    assert_eq!(
        replies,
        vec!["[BOT] Pong!", "[BOT] (/hello) Hello from Bot!", "[BOT] Ping!"]
    );
}

/// RUST_LOG=debug turns on the per-message log line
#[test]
fn test_rust_log_debug_shows_received_messages() {
    let output = console_with_input("debug", b"ping\n");
    assert!(output.status.success(), "{}", combined(&output));

    let text = combined(&output);
    assert!(text.contains("DEBUG"), "Should log at debug: {}", text);
    assert!(text.contains("Received message: ping"), "Should log the message: {}", text);
}

/// RUST_LOG=warn hides info lines but not the replies
#[test]
fn test_rust_log_warn_hides_info() {
    let output = console_with_input("warn", b"ping\n");
    assert!(output.status.success(), "{}", combined(&output));

    let text = combined(&output);
    assert!(!text.contains("INFO"), "Info lines should be filtered: {}", text);
    assert!(!text.contains("Console mode"), "Banner is an info line: {}", text);
    assert!(text.contains("[BOT] Pong!"), "Replies are not logs: {}", text);
}

/// SIGTERM stops console mode even while stdin is still open
#[cfg(unix)]
#[test]
fn test_console_exits_on_sigterm_with_open_stdin() {
    let mut child = bot()
        .arg("console")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Should spawn binary");

    // Keep stdin open for the whole test
    let mut stdin = child.stdin.take().expect("Should have stdin");
    stdin.write_all(b"ping\n").expect("Should write stdin");
    stdin.flush().expect("Should flush stdin");

    // A reply means the signal handlers are already installed
    let mut stdout = BufReader::new(child.stdout.take().expect("Should have stdout"));
    let mut line = String::new();
    while !line.starts_with("[BOT] Pong!") {
        line.clear();
        let read = stdout.read_line(&mut line).expect("Should read stdout");
        assert!(read > 0, "Console exited before replying");
    }

    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("Should run kill");
    assert!(killed.success());

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait().expect("Should poll child") {
            break Some(status);
        }
        if started.elapsed() > Duration::from_secs(5) {
            break None;
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    if status.is_none() {
        let _ = child.kill();
    }
    drop(stdin);
    assert_eq!(
        status.and_then(|s| s.code()),
        Some(0),
        "Console should exit 0 within 5s of SIGTERM"
    );
}
