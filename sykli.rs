//! Sykli CI pipeline for probe-demo
//!
//! Run locally: sykli run
//! Or: cargo run --bin sykli --features sykli -- --emit | sykli run -

use sykli::{Condition, Pipeline, Template};

fn main() {
    let mut p = Pipeline::new();

    // === RESOURCES ===
    let src = p.dir(".");
    let cargo_registry = p.cache("cargo-registry");
    let cargo_git = p.cache("cargo-git");
    let target_cache = p.cache("target");

    // === TEMPLATE ===
    // Common Rust container configuration
    let rust = Template::new()
        .container("rust:1.85")
        .mount_dir(&src, "/src")
        .mount_cache(&cargo_registry, "/usr/local/cargo/registry")
        .mount_cache(&cargo_git, "/usr/local/cargo/git")
        .mount_cache(&target_cache, "/src/target")
        .workdir("/src");

    // === TASKS ===
    // Test - run all tests
    let _ = p
        .task("test")
        .from(&rust)
        .run("cargo test")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    // Lint - run clippy with strict warnings
    let _ = p
        .task("lint")
        .from(&rust)
        .run("cargo clippy --all-targets -- -D warnings")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"]);

    // Format check - verify code formatting
    let _ = p
        .task("fmt")
        .from(&rust)
        .run("cargo fmt -- --check")
        .inputs(&["**/*.rs"]);

    // Build release binary (depends on test, lint, fmt)
    let _ = p
        .task("build")
        .from(&rust)
        .run("cargo build --release --bin probe-demo")
        .inputs(&["**/*.rs", "Cargo.toml", "Cargo.lock"])
        .output("binary", "target/release/probe-demo")
        .after(&["test", "lint", "fmt"]);

    // Smoke test against the release binary: every route, then a slow drain
    let _ = p
        .task("smoke-test")
        .from(&rust)
        .run(
            r#"#!/bin/bash
set -e

PORT=18080 DELAY=2 STARTUP_DELAY=1 RUST_LOG=info \
  ./target/release/probe-demo 2>&1 | tee /tmp/probe-log.txt &
sleep 3
PID=$(pgrep -f target/release/probe-demo)

fail() {
  echo "ERROR: $1"
  cat /tmp/probe-log.txt
  kill "$PID" || true
  exit 1
}

curl -sf http://127.0.0.1:18080/ | grep -q "Hello, World!" || fail "/ did not return greeting"
curl -sf http://127.0.0.1:18080/env | grep -q "^PORT=18080$" || fail "/env missing PORT"

STATUS=$(curl -s -o /dev/null -w '%{http_code}' http://127.0.0.1:18080/health)
[ "$STATUS" = "200" ] || fail "/health should be 200 before /fail, got $STATUS"

curl -sf http://127.0.0.1:18080/fail | grep -q "oh no!" || fail "/fail body"

STATUS=$(curl -s -o /dev/null -w '%{http_code}' http://127.0.0.1:18080/health)
[ "$STATUS" = "500" ] || fail "/health should be 500 after /fail, got $STATUS"

START=$(date +%s)
kill -TERM "$PID"
while kill -0 "$PID" 2>/dev/null; do sleep 0.1; done
ELAPSED=$(( $(date +%s) - START ))
[ "$ELAPSED" -ge 2 ] || fail "process exited after ${ELAPSED}s, before DELAY=2"

grep -q "Server gracefully stopped" /tmp/probe-log.txt || fail "missing shutdown log"
echo "Smoke test passed"
"#,
        )
        .input_from("build", "binary", "/src/target/release/probe-demo")
        .when_cond(Condition::event("push").or(Condition::negate(Condition::branch("*"))))
        .timeout(300);

    p.emit();
}
