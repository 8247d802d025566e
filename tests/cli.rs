mod common;

use assert_cmd::Command;
use common::{EVOLUTION_BODY, Route, StubServer, TREEMAP_BODY};
use predicates::prelude::*;
use std::collections::HashMap;
use std::fs;

#[test]
fn help_lists_the_render_subcommand() {
    let mut cmd = Command::cargo_bin("tradeflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"));
}

#[test]
fn render_requires_a_selection() {
    let mut cmd = Command::cargo_bin("tradeflow").unwrap();
    cmd.arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reporter"));
}

#[test]
fn render_writes_charts_records_and_stats() {
    let mut routes = HashMap::new();
    routes.insert(
        "/CHE/EU27/2010/2020/tradeEvolution.json".to_string(),
        Route::json(EVOLUTION_BODY),
    );
    routes.insert(
        "/CHE/EU27/2020/2020/treemap_HS2.json".to_string(),
        Route::json(TREEMAP_BODY),
    );
    let server = StubServer::start(routes);
    let dir = tempfile::tempdir().unwrap();
    let evolution = dir.path().join("evolution.svg");
    let goods = dir.path().join("goods.svg");
    let records = dir.path().join("records.csv");

    let mut cmd = Command::cargo_bin("tradeflow").unwrap();
    cmd.args([
        "render",
        "--reporter",
        "CHE",
        "--partner",
        "EU27",
        "--year",
        "2020",
        "--base-url",
        server.base_url.as_str(),
        "--stats",
    ])
    .arg("--evolution-out")
    .arg(&evolution)
    .arg("--goods-out")
    .arg(&goods)
    .arg("--out")
    .arg(&records)
    .assert()
    .success()
    .stdout(predicate::str::contains("exports"))
    .stderr(predicate::str::contains("Saved 3 records"));

    assert!(evolution.exists());
    assert!(goods.exists());
    let csv = fs::read_to_string(&records).unwrap();
    assert!(csv.starts_with("year,exports,imports,balance"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn unreachable_api_renders_placeholders_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let evolution = dir.path().join("evolution.svg");
    let goods = dir.path().join("goods.svg");

    let mut cmd = Command::cargo_bin("tradeflow").unwrap();
    cmd.args([
        "render",
        "--reporter",
        "CHE",
        "--partner",
        "EU27",
        "--year",
        "2020",
        "--base-url",
        "http://127.0.0.1:9",
    ])
    .arg("--evolution-out")
    .arg(&evolution)
    .arg("--goods-out")
    .arg(&goods)
    .assert()
    .success()
    .stderr(predicate::str::contains("No trade data available"));

    let svg = fs::read_to_string(&evolution).unwrap();
    assert!(svg.contains("No trade data available"));
    let svg = fs::read_to_string(&goods).unwrap();
    assert!(svg.contains("No goods data available"));
}
