//! Business-process significance scoring for edges
//!
//! A pure decision table over the shape of an edge. Extractors call it when
//! they create an edge and readers call it again when a stored weight is
//! missing, so both must see the same answer.

use crate::model::{ComponentType, EdgeType};

/// Score for any edge shape the table does not name.
pub const DEFAULT_WEIGHT: u8 = 3;

/// Every value [`calculate_weight`] can return.
pub const WEIGHT_LEVELS: [u8; 9] = [1, 2, 3, 5, 6, 7, 8, 9, 10];

/// Score an edge. The first matching row wins.
pub fn calculate_weight(
    from: ComponentType,
    to: ComponentType,
    edge: EdgeType,
    source: Option<&str>,
) -> u8 {
    use ComponentType::*;

    match (from, to) {
        (Flow, ApexClass) => 10,
        (Flow, CustomObject) => 9,
        (LightningWebComponent | AuraComponent, ApexClass) => 8,
        (ApexTrigger, ApexClass) => 8,
        (ApexClass, Flow) => 7,
        (ApexTrigger, CustomObject) if edge == EdgeType::TriggersOn => 3,
        (CustomObject, CustomObject) => 6,
        (ApexClass, ApexClass) => 5,
        (ApexClass | ApexTrigger, CustomObject) => match source {
            Some("dml") => 6,
            Some("soql") | Some("soql_or_dml") => 2,
            Some("type_reference") => 1,
            _ => 2,
        },
        _ => DEFAULT_WEIGHT,
    }
}
