use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Button,
    Link,
    Label,
    Input,
    Select,
    TextArea,
    Heading,
    ColumnHeader,
    Text,
    Container,
}

impl ElementType {
    /// Controls a "fill" instruction can land on.
    pub fn is_input_like(&self) -> bool {
        matches!(self, ElementType::Input | ElementType::Select | ElementType::TextArea)
    }
}

/// Opaque handle to a live element. Only meaningful against the surface that
/// produced it, and only until that surface changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub const ROOT: &'static str = "body";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Page-level anchor used when a target cannot be found.
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIElement {
    pub id: ElementRef,
    pub node_type: ElementType,
    /// Trimmed visible text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit label → control association (`<label for=…>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_for: Option<ElementRef>,
    /// Enclosing element, used as the logical group for label lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementRef>,
}

impl UIElement {
    pub fn text_matches(&self, needle: &str) -> bool {
        eq_ignore_case(&self.text, needle)
    }

    /// `aria-label`, else `title`.
    pub fn accessible_name(&self) -> Option<&str> {
        self.aria_label
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn aria_matches(&self, needle: &str) -> bool {
        self.accessible_name()
            .is_some_and(|name| eq_ignore_case(name, needle))
    }
}

/// Exact, case-insensitive comparison of trimmed strings.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconButton {
    pub aria_label: String,
}

/// Point-in-time description of the interactive surface, sent along with
/// every outgoing user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSnapshot {
    #[serde(rename = "currentPath", alias = "route")]
    pub route: String,
    pub page_title: String,
    pub table_headers: Vec<String>,
    pub form_labels: Vec<String>,
    pub text_buttons: Vec<String>,
    pub icon_buttons: Vec<IconButton>,
}

impl UiSnapshot {
    /// One-line context string handed to the model ahead of the user question.
    pub fn summary(&self) -> String {
        let mut out = format!("Route: {}. Page: {}. ", self.route, self.page_title);
        if !self.table_headers.is_empty() {
            out.push_str(&format!("Table columns: {}. ", self.table_headers.join(", ")));
        }
        if !self.form_labels.is_empty() {
            out.push_str(&format!("Form fields: {}. ", self.form_labels.join(", ")));
        }
        if !self.text_buttons.is_empty() {
            out.push_str(&format!("Visible buttons: {}. ", self.text_buttons.join(", ")));
        }
        let icons: Vec<&str> = self
            .icon_buttons
            .iter()
            .map(|b| b.aria_label.as_str())
            .filter(|label| !label.is_empty())
            .collect();
        if !icons.is_empty() {
            out.push_str(&format!("Icon buttons: {}. ", icons.join(", ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UiSnapshot {
        UiSnapshot {
            route: "/orders".into(),
            page_title: "Orders".into(),
            table_headers: vec!["Id".into(), "Status".into()],
            form_labels: vec![],
            text_buttons: vec!["Create".into()],
            icon_buttons: vec![
                IconButton { aria_label: "delete".into() },
                IconButton { aria_label: String::new() },
            ],
        }
    }

    #[test]
    fn summary_skips_empty_sections() {
        assert_eq!(
            snapshot().summary(),
            "Route: /orders. Page: Orders. Table columns: Id, Status. \
             Visible buttons: Create. Icon buttons: delete. "
        );
    }

    #[test]
    fn snapshot_wire_format_is_camel_case() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["currentPath"], "/orders");
        assert!(json.get("route").is_none());
        assert_eq!(json["pageTitle"], "Orders");
        assert_eq!(json["iconButtons"][0]["ariaLabel"], "delete");

        let back: UiSnapshot = serde_json::from_value(serde_json::json!({
            "currentPath": "/x",
            "pageTitle": "X",
            "tableHeaders": [],
            "formLabels": [],
            "textButtons": [],
            "iconButtons": []
        }))
        .unwrap();
        assert_eq!(back.route, "/x");

        let legacy: UiSnapshot = serde_json::from_value(serde_json::json!({
            "route": "/y",
            "pageTitle": "Y",
            "tableHeaders": [],
            "formLabels": [],
            "textButtons": [],
            "iconButtons": []
        }))
        .unwrap();
        assert_eq!(legacy.route, "/y");
    }

    #[test]
    fn comparison_trims_and_ignores_case() {
        assert!(eq_ignore_case("  Save ", "save"));
        assert!(!eq_ignore_case("Save draft", "save"));
    }
}
