//! Metadata extractors, one per file category

pub mod apex;
pub mod aura;
pub mod custom_object;
pub mod flow;
pub mod lwc;

use crate::extractor::MetadataExtractor;
use crate::scanner::MetadataKind;

pub use apex::ApexParser;
pub use aura::AuraParser;
pub use custom_object::CustomObjectParser;
pub use flow::FlowParser;
pub use lwc::LwcParser;

/// Object-looking token: a custom-object suffix or one of the standard names
/// the extractors recognise literally, in any casing.
pub(crate) const SOBJECT_TOKEN: &str =
    r"[A-Za-z][A-Za-z0-9_]*__c|(?i:Account|Contact|Opportunity|Case|Lead)";

/// Get the extractor for a file category.
pub fn get_extractor(kind: MetadataKind) -> &'static dyn MetadataExtractor {
    match kind {
        MetadataKind::CustomObject => &CustomObjectParser,
        MetadataKind::ApexClass | MetadataKind::ApexTrigger => &ApexParser,
        MetadataKind::Flow => &FlowParser,
        MetadataKind::LightningWebComponent => &LwcParser,
        MetadataKind::AuraComponent => &AuraParser,
    }
}

/// Push `item` unless an equal value is already present. Keeps first-seen order.
pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}
