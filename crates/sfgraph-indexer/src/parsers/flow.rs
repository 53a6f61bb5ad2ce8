//! Flow extractor
//!
//! Reads the flow XML for Apex actions, record operations, the record trigger
//! and subflow calls.

use super::push_unique;
use crate::error::ExtractError;
use crate::extractor::{ExtractionResult, Lookups, MetadataExtractor};
use crate::scanner::MetadataFile;
use serde::Deserialize;
use sfgraph_core::{component_id, Component, ComponentType, Dependency, EdgeType};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowDoc {
    label: Option<String>,
    description: Option<String>,
    #[serde(default)]
    action_calls: Vec<ActionCall>,
    #[serde(default)]
    record_lookups: Vec<RecordOperation>,
    #[serde(default)]
    record_creates: Vec<RecordOperation>,
    #[serde(default)]
    record_updates: Vec<RecordOperation>,
    #[serde(default)]
    record_deletes: Vec<RecordOperation>,
    start: Option<FlowStart>,
    #[serde(default)]
    subflows: Vec<Subflow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionCall {
    action_name: Option<String>,
    action_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RecordOperation {
    object: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlowStart {
    object: Option<String>,
    trigger_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subflow {
    flow_name: Option<String>,
}

/// Non-empty trimmed text of an optional element.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub struct FlowParser;

impl MetadataExtractor for FlowParser {
    fn extract(
        &self,
        file: &MetadataFile,
        content: &str,
        lookups: &dyn Lookups,
    ) -> Result<ExtractionResult, ExtractError> {
        let doc: FlowDoc = quick_xml::de::from_str(content).map_err(|source| ExtractError::Xml {
            path: file.path.clone(),
            source,
        })?;

        let component = Component::new(ComponentType::Flow, file.name.as_str(), &file.path)
            .with_label(doc.label.clone())
            .with_description(doc.description.clone());
        let from = component.id.as_str();
        let mut dependencies: Vec<Dependency> = Vec::new();
        let mut push = |dependency: Dependency| {
            push_unique(&mut dependencies, dependency.weighted());
        };

        if let Some(start) = &doc.start {
            if let Some(object) = text(&start.object) {
                let to = component_id(ComponentType::CustomObject, &lookups.resolve(object));
                let mut edge = Dependency::new(from, to, EdgeType::TriggersOn).with_source("flow_trigger");
                if let Some(trigger_type) = text(&start.trigger_type) {
                    edge = edge.with_meta("triggerType", trigger_type);
                }
                push(edge);
            }
        }

        for action in &doc.action_calls {
            let is_apex = text(&action.action_type).is_some_and(|t| t.eq_ignore_ascii_case("apex"));
            let Some(class) = text(&action.action_name).filter(|_| is_apex) else {
                continue;
            };
            if lookups.accepts_apex_class(class) {
                push(
                    Dependency::new(from, component_id(ComponentType::ApexClass, class), EdgeType::Uses)
                        .with_source("flow_apex_action"),
                );
            }
        }

        let record_operations = [
            (&doc.record_lookups, "flow_record_lookup"),
            (&doc.record_creates, "flow_record_create"),
            (&doc.record_updates, "flow_record_update"),
            (&doc.record_deletes, "flow_record_delete"),
        ];
        for (operations, source) in record_operations {
            for object in operations.iter().filter_map(|op| text(&op.object)) {
                let to = component_id(ComponentType::CustomObject, &lookups.resolve(object));
                push(Dependency::new(from, to, EdgeType::Uses).with_source(source));
            }
        }

        for name in doc.subflows.iter().filter_map(|s| text(&s.flow_name)) {
            push(Dependency::new(from, component_id(ComponentType::Flow, name), EdgeType::Uses).with_source("subflow"));
        }

        tracing::debug!("{}: {} flow edges", from, dependencies.len());
        Ok(ExtractionResult { component, dependencies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{MetadataIndexes, MetadataKind};
    use crate::test_utils::{lookups_with, metadata_file};

    const CLOSE_INVOICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Flow xmlns="http://soap.sforce.com/2006/04/metadata">
    <actionCalls>
        <name>Send_Invoice</name>
        <actionName>InvoiceMailer</actionName>
        <actionType>apex</actionType>
    </actionCalls>
    <actionCalls>
        <name>Post_Chatter</name>
        <actionName>chatterPost</actionName>
        <actionType>chatterPost</actionType>
    </actionCalls>
    <actionCalls>
        <name>Ghost</name>
        <actionName>GhostAction</actionName>
        <actionType>apex</actionType>
    </actionCalls>
    <description>Closes paid invoices</description>
    <label>Close Invoice</label>
    <recordLookups>
        <name>Get_Account</name>
        <object>account</object>
    </recordLookups>
    <recordLookups>
        <name>Get_Account_Again</name>
        <object>Account</object>
    </recordLookups>
    <recordUpdates>
        <name>Mark_Paid</name>
        <object>Invoice__c</object>
    </recordUpdates>
    <start>
        <object>Invoice__c</object>
        <recordTriggerType>Update</recordTriggerType>
        <triggerType>RecordAfterSave</triggerType>
    </start>
    <subflows>
        <name>Notify</name>
        <flowName>Notify_Owner</flowName>
    </subflows>
</Flow>
"#;

    fn flow_file() -> MetadataFile {
        metadata_file(MetadataKind::Flow, "Close_Invoice", "flows/Close_Invoice.flow-meta.xml")
    }

    #[test]
    fn test_flow_edges() {
        let mut indexes = MetadataIndexes::default();
        indexes.apex_classes.insert("InvoiceMailer".to_string());
        indexes.objects.insert("Invoice__c".to_string());
        let lookups = lookups_with(indexes);

        let result = FlowParser.extract(&flow_file(), CLOSE_INVOICE, &lookups).unwrap();
        assert_eq!(result.component.id, "Flow:Close_Invoice");
        assert_eq!(result.component.label.as_deref(), Some("Close Invoice"));

        let edges: Vec<(EdgeType, &str, Option<&str>, Option<u8>)> = result
            .dependencies
            .iter()
            .map(|d| (d.kind, d.to.as_str(), d.source(), d.weight))
            .collect();
        assert_eq!(
            edges,
            vec![
                (EdgeType::TriggersOn, "CustomObject:Invoice__c", Some("flow_trigger"), Some(9)),
                (EdgeType::Uses, "ApexClass:InvoiceMailer", Some("flow_apex_action"), Some(10)),
                (EdgeType::Uses, "CustomObject:Account", Some("flow_record_lookup"), Some(9)),
                (EdgeType::Uses, "CustomObject:Invoice__c", Some("flow_record_update"), Some(9)),
                (EdgeType::Uses, "Flow:Notify_Owner", Some("subflow"), Some(3)),
            ]
        );
        assert_eq!(result.dependencies[0].metadata["triggerType"], "RecordAfterSave");
    }

    #[test]
    fn test_screen_flow_without_start_object() {
        let lookups = lookups_with(MetadataIndexes::default());
        let xml = "<Flow><label>Wizard</label><start><locationX>50</locationX></start></Flow>";
        let result = FlowParser.extract(&flow_file(), xml, &lookups).unwrap();
        assert_eq!(result.component.label.as_deref(), Some("Wizard"));
        assert!(result.dependencies.is_empty());
    }

    #[test]
    fn test_malformed_flow_is_an_error() {
        let lookups = lookups_with(MetadataIndexes::default());
        let err = FlowParser
            .extract(&flow_file(), "<Flow><start></Flow>", &lookups)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Xml { .. }));
    }
}
