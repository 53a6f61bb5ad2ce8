//! Integration tests for sfgraph
//!
//! These tests run the analyzer and the CLI binary against small metadata
//! trees on disk.

use sfgraph_core::{EdgeType, GraphView};
use sfgraph_indexer::{Analyzer, AnalyzerConfig, ProgressFuture};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = temp_dir.path().join(path);
        fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        fs::write(full_path, content).unwrap();
    }
    temp_dir
}

fn order_org() -> TempDir {
    write_tree(&[
        (
            "force-app/main/default/objects/Order__c/Order__c.object-meta.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <fields>
        <fullName>Customer__c</fullName>
        <referenceTo>Contact</referenceTo>
        <type>MasterDetail</type>
    </fields>
    <label>Order</label>
</CustomObject>
"#,
        ),
        (
            "force-app/main/default/classes/OrderService.cls",
            r#"public with sharing class OrderService {
    public void place(Order__c o) {
        insert Order__c;
        List<Contact> buyers = [SELECT Id FROM Contact];
        new OrderMailer().send(o);
    }
}
"#,
        ),
        (
            "force-app/main/default/classes/OrderMailer.cls",
            "public class OrderMailer { public void send(Order__c o) {} }",
        ),
        (
            "force-app/main/default/classes/OrderServiceTest.cls",
            "@isTest private class OrderServiceTest { static void t() { new OrderService(); } }",
        ),
        (
            "force-app/main/default/triggers/OrderTrigger.trigger",
            "trigger OrderTrigger on order__c (after insert) { new OrderService().place(null); }",
        ),
        (
            "force-app/main/default/lwc/orderList/orderList.js",
            "import place from '@salesforce/apex/OrderService.place';",
        ),
    ])
}

#[test]
fn test_analyze_order_org() {
    let repo = order_org();
    let result = Analyzer::default().analyze(repo.path()).unwrap();
    let graph = &result.graph;

    assert!(graph.component("ApexClass:OrderServiceTest").is_none());
    assert_eq!(result.stats.total_components, 6);
    assert_eq!(result.stats.total_dependencies, 9);

    let service: Vec<(&str, EdgeType, Option<&str>)> = {
        let mut edges: Vec<_> = graph
            .edges_from("ApexClass:OrderService")
            .map(|d| (d.to.as_str(), d.kind, d.source()))
            .collect();
        edges.sort_by_key(|e| e.0);
        edges
    };
    assert_eq!(
        service,
        vec![
            ("ApexClass:OrderMailer", EdgeType::Uses, Some("instantiation")),
            ("CustomObject:Contact", EdgeType::Uses, Some("soql")),
            ("CustomObject:Order__c", EdgeType::Uses, Some("dml")),
        ]
    );

    let trigger: Vec<_> = graph.edges_from("ApexTrigger:OrderTrigger").collect();
    assert_eq!(trigger.len(), 3);
    assert_eq!(trigger[0].kind, EdgeType::TriggersOn);
    assert_eq!(trigger[0].to, "CustomObject:Order__c", "trigger object resolved to indexed casing");
    // The header's `order__c (` also reads as a declaration-position type token.
    assert_eq!(trigger[1].source(), Some("type_reference"));
    assert_eq!(trigger[2].to, "ApexClass:OrderService");
    assert_eq!(trigger[2].weight, Some(8));
}

#[test]
fn test_hotspots_rank_by_incoming_weight() {
    let repo = order_org();
    let result = Analyzer::default().analyze(repo.path()).unwrap();
    let view = GraphView::new(&result.graph);

    // OrderService: trigger 8 + LWC 8. Order__c: dml 6 + triggers_on 3 + two type references.
    let top = view.hotspots(2);
    assert_eq!(top[0].0.id, "ApexClass:OrderService");
    assert_eq!(top[0].1, 16);
    assert_eq!(top[1].0.id, "CustomObject:Order__c");
    assert_eq!(top[1].1, 11);
}

#[tokio::test]
async fn test_async_analysis_matches_sync() {
    let repo = order_org();
    let analyzer = Analyzer::new(AnalyzerConfig::default());

    let sync = analyzer.analyze(repo.path()).unwrap();
    let mut last = None;
    let with_progress = analyzer
        .analyze_with_progress(repo.path(), |processed: usize, total: usize| -> Option<ProgressFuture> {
            last = Some((processed, total));
            None
        })
        .await
        .unwrap();

    assert_eq!(last, Some((6, 6)));
    assert_eq!(sync.stats, with_progress.stats);
}

#[test]
fn test_cli_analyze_prints_json() {
    let repo = order_org();
    let output = Command::new(env!("CARGO_BIN_EXE_sfgraph"))
        .args(["--root", repo.path().to_str().unwrap(), "analyze"])
        .output()
        .expect("Failed to execute sfgraph");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["totalComponents"], 6);
    assert_eq!(json["graph"]["components"]["CustomObject:Order__c"]["type"], "CustomObject");
}

#[test]
fn test_cli_reads_config_file() {
    let repo = order_org();
    let config = repo.path().join("sfgraph.toml");
    fs::write(&config, "skip_test_classes = false\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sfgraph"))
        .args(["--root", repo.path().to_str().unwrap()])
        .args(["--config", config.to_str().unwrap(), "analyze"])
        .output()
        .expect("Failed to execute sfgraph");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["totalComponents"], 7, "test class kept");
}

#[test]
fn test_cli_missing_root_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_sfgraph"))
        .args(["--root", "/no/such/metadata/tree", "analyze"])
        .output()
        .expect("Failed to execute sfgraph");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_sfgraph"))
        .arg("version")
        .output()
        .expect("Failed to execute sfgraph");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("sfgraph v"));
    assert!(Path::new(env!("CARGO_BIN_EXE_sfgraph")).exists());
}
