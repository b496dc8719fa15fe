//! In-memory UI tree.
//!
//! Pages are described as nested JSON nodes (a "page fixture") and flattened
//! into document order with parent links, so the label → input lookup can
//! reason about logical groups the same way a DOM query would.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GuideError, GuideResult};
use crate::surface::traits::UiSurface;
use crate::surface::types::{ElementRef, ElementType, UIElement};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiNode {
    /// Generated from the node type when absent (`button_0`, `label_3`, ...).
    #[serde(default)]
    pub id: Option<String>,
    pub kind: ElementType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "for")]
    pub label_for: Option<String>,
    #[serde(default)]
    pub children: Vec<UiNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    pub route: String,
    #[serde(default)]
    pub nodes: Vec<UiNode>,
}

#[derive(Debug, Clone, Default)]
pub struct UiTree {
    route: String,
    elements: Vec<UIElement>,
    index: HashMap<ElementRef, usize>,
}

impl UiTree {
    pub fn from_fixture(fixture: PageFixture) -> GuideResult<Self> {
        let mut elements = Vec::new();
        let mut counters = HashMap::<ElementType, u32>::new();
        for node in &fixture.nodes {
            flatten(node, None, &mut elements, &mut counters);
        }

        let mut index = HashMap::with_capacity(elements.len());
        for (pos, el) in elements.iter().enumerate() {
            if index.insert(el.id.clone(), pos).is_some() {
                return Err(GuideError::Fixture(format!("duplicate element id '{}'", el.id)));
            }
        }

        tracing::debug!(route = %fixture.route, count = elements.len(), "page tree built");
        Ok(Self {
            route: fixture.route,
            elements,
            index,
        })
    }

    pub fn from_json(json: &str) -> GuideResult<Self> {
        let fixture: PageFixture = serde_json::from_str(json)?;
        Self::from_fixture(fixture)
    }

    pub fn load(path: &Path) -> GuideResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuideError::Fixture(format!("cannot read {}: {e}", path.display()))
        })?;
        let tree = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), route = %tree.route, "page fixture loaded");
        Ok(tree)
    }

    pub fn elements(&self) -> &[UIElement] {
        &self.elements
    }

    pub fn get(&self, id: &ElementRef) -> Option<&UIElement> {
        self.index.get(id).map(|&pos| &self.elements[pos])
    }

    fn is_within(&self, el: &UIElement, group: &ElementRef) -> bool {
        let mut parent = el.parent_id.as_ref();
        while let Some(p) = parent {
            if p == group {
                return true;
            }
            parent = self.get(p).and_then(|e| e.parent_id.as_ref());
        }
        false
    }
}

fn flatten(
    node: &UiNode,
    parent_id: Option<&ElementRef>,
    out: &mut Vec<UIElement>,
    counters: &mut HashMap<ElementType, u32>,
) {
    let id = match &node.id {
        Some(id) => ElementRef::new(id.clone()),
        None => {
            let n = counters.entry(node.kind).or_insert(0);
            let generated = ElementRef::new(format!("{}_{}", type_slug(node.kind), n));
            *n += 1;
            generated
        }
    };

    out.push(UIElement {
        id: id.clone(),
        node_type: node.kind,
        text: node.text.trim().to_string(),
        aria_label: node.aria_label.as_ref().map(|s| s.trim().to_string()),
        title: node.title.as_ref().map(|s| s.trim().to_string()),
        label_for: node.label_for.as_ref().map(|s| ElementRef::new(s.clone())),
        parent_id: parent_id.cloned(),
    });

    for child in &node.children {
        flatten(child, Some(&id), out, counters);
    }
}

fn type_slug(kind: ElementType) -> &'static str {
    match kind {
        ElementType::Button => "button",
        ElementType::Link => "link",
        ElementType::Label => "label",
        ElementType::Input => "input",
        ElementType::Select => "select",
        ElementType::TextArea => "textarea",
        ElementType::Heading => "heading",
        ElementType::ColumnHeader => "columnheader",
        ElementType::Text => "text",
        ElementType::Container => "container",
    }
}

impl UiSurface for UiTree {
    fn route(&self) -> String {
        self.route.clone()
    }

    fn elements_of(&self, kind: ElementType) -> Vec<UIElement> {
        self.elements
            .iter()
            .filter(|e| e.node_type == kind)
            .cloned()
            .collect()
    }

    /// Explicit `for` link first; otherwise the input-like control inside the
    /// label's enclosing group, preferring the first one after the label.
    fn associated_input(&self, label: &ElementRef) -> Option<ElementRef> {
        let label_pos = *self.index.get(label)?;
        let label_el = &self.elements[label_pos];

        if let Some(target) = &label_el.label_for {
            match self.get(target) {
                Some(el) if el.node_type.is_input_like() => return Some(el.id.clone()),
                _ => tracing::debug!(label = %label, for_id = %target, "label 'for' target is not an input"),
            }
        }

        // Top-level labels have no group to search.
        let group = label_el.parent_id.as_ref()?;
        let mut before: Option<&UIElement> = None;
        for (pos, el) in self.elements.iter().enumerate() {
            if !el.node_type.is_input_like() || !self.is_within(el, group) {
                continue;
            }
            if pos > label_pos {
                return Some(el.id.clone());
            }
            before = Some(el);
        }
        before.map(|el| el.id.clone())
    }
}
