//! Completion list formatting
//!
//! The engine reports one of two result shapes; both flatten into a single
//! `CompletionList`. Ranking comes from the engine's sort keys, never from
//! this module, and the list is never paged.

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, CompletionList, Documentation};

use crate::analyzer::types::{AttributeCompletion, CompletionResult, TagCompletion};

/// Builds the protocol completion list for an engine result.
///
/// `None` for result kinds this bridge does not recognize; the guarantee to
/// old clients is "no items", not an error.
pub fn completion_list(result: CompletionResult) -> Option<CompletionList> {
    let items = match result {
        CompletionResult::ElementTags { elements } => {
            elements.into_iter().map(tag_item).collect()
        }
        CompletionResult::Attributes { attributes } => {
            attributes.into_iter().map(attribute_item).collect()
        }
        CompletionResult::Unrecognized => return None,
    };

    Some(CompletionList {
        is_incomplete: false,
        items,
    })
}

fn tag_item(tag: TagCompletion) -> CompletionItem {
    CompletionItem {
        label: format!("<{}>", tag.tag_name),
        kind: Some(CompletionItemKind::CLASS),
        documentation: Some(Documentation::String(tag.description)),
        insert_text: Some(tag.expand_to),
        ..Default::default()
    }
}

fn attribute_item(attribute: AttributeCompletion) -> CompletionItem {
    CompletionItem {
        label: attribute.name,
        kind: Some(CompletionItemKind::FIELD),
        detail: attribute_detail(attribute.type_name, attribute.inherited_from),
        documentation: Some(Documentation::String(attribute.description)),
        sort_text: Some(attribute.sort_key),
        ..Default::default()
    }
}

/// Detail line policy: declared type first as `{type}`, inheritance origin
/// second as `⊃ origin`, space-joined only when both are present.
fn attribute_detail(type_name: Option<String>, inherited_from: Option<String>) -> Option<String> {
    match (type_name, inherited_from) {
        (Some(type_name), Some(origin)) => Some(format!("{{{}}} ⊃ {}", type_name, origin)),
        (Some(type_name), None) => Some(format!("{{{}}}", type_name)),
        (None, Some(origin)) => Some(format!("⊃ {}", origin)),
        (None, None) => None,
    }
}
