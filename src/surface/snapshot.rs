use crate::config::SnapshotConfig;
use crate::surface::traits::UiSurface;
use crate::surface::types::{ElementType, IconButton, UiSnapshot};

/// Captures a [`UiSnapshot`] from a surface, leaving out the assistant
/// widget's own controls so the model never suggests clicking them.
#[derive(Debug, Clone)]
pub struct SnapshotExtractor {
    /// Lower-cased exclusion set.
    excluded_buttons: Vec<String>,
}

impl SnapshotExtractor {
    pub fn new<I, S>(excluded_buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_buttons: excluded_buttons
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(cfg: &SnapshotConfig) -> Self {
        Self::new(&cfg.excluded_buttons)
    }

    fn is_excluded(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.excluded_buttons.iter().any(|ex| *ex == text)
    }

    pub fn capture(&self, surface: &dyn UiSurface) -> UiSnapshot {
        let route = surface.route();

        let page_title = surface
            .elements_of(ElementType::Heading)
            .into_iter()
            .next()
            .map(|h| h.text)
            .unwrap_or_else(|| route.clone())
            .trim()
            .to_string();

        let texts = |kind: ElementType| -> Vec<String> {
            surface
                .elements_of(kind)
                .into_iter()
                .map(|e| e.text.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        };

        let buttons = surface.elements_of(ElementType::Button);
        let text_buttons: Vec<String> = buttons
            .iter()
            .map(|b| b.text.trim().to_string())
            .filter(|t| !t.is_empty() && !self.is_excluded(t))
            .collect();
        let icon_buttons = buttons
            .iter()
            .map(|b| IconButton {
                aria_label: b.accessible_name().unwrap_or("").to_string(),
            })
            .collect();

        let snapshot = UiSnapshot {
            route,
            page_title,
            table_headers: texts(ElementType::ColumnHeader),
            form_labels: texts(ElementType::Label),
            text_buttons,
            icon_buttons,
        };
        tracing::debug!(
            route = %snapshot.route,
            title = %snapshot.page_title,
            buttons = snapshot.text_buttons.len(),
            labels = snapshot.form_labels.len(),
            "ui snapshot captured"
        );
        snapshot
    }
}

impl Default for SnapshotExtractor {
    fn default() -> Self {
        Self::from_config(&SnapshotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::tree::UiTree;

    const PAGE: &str = r#"{
        "route": "/orders",
        "nodes": [
            { "kind": "heading", "text": "Orders" },
            { "kind": "heading", "text": "Filters" },
            { "kind": "column_header", "text": "Id" },
            { "kind": "column_header", "text": "  " },
            { "kind": "column_header", "text": "Status" },
            { "kind": "label", "text": "Search" },
            { "kind": "button", "text": "Create order" },
            { "kind": "button", "text": "", "aria_label": "delete" },
            { "kind": "button", "text": "SEND" },
            { "kind": "button", "text": "Show visual demo" }
        ]
    }"#;

    #[test]
    fn captures_page_surface() {
        let tree = UiTree::from_json(PAGE).unwrap();
        let snap = SnapshotExtractor::default().capture(&tree);
        assert_eq!(snap.route, "/orders");
        assert_eq!(snap.page_title, "Orders");
        assert_eq!(snap.table_headers, vec!["Id", "Status"]);
        assert_eq!(snap.form_labels, vec!["Search"]);
        assert_eq!(snap.icon_buttons.len(), 4);
        assert_eq!(snap.icon_buttons[1].aria_label, "delete");
    }

    #[test]
    fn own_widget_buttons_are_excluded() {
        let tree = UiTree::from_json(PAGE).unwrap();
        let snap = SnapshotExtractor::default().capture(&tree);
        assert_eq!(snap.text_buttons, vec!["Create order"]);

        let custom = SnapshotExtractor::new(["create order"]).capture(&tree);
        assert_eq!(custom.text_buttons, vec!["SEND", "Show visual demo"]);
    }

    #[test]
    fn title_falls_back_to_route() {
        let tree = UiTree::from_json(r#"{ "route": "/settings", "nodes": [] }"#).unwrap();
        let snap = SnapshotExtractor::default().capture(&tree);
        assert_eq!(snap.page_title, "/settings");
        assert!(snap.table_headers.is_empty());
        assert!(snap.text_buttons.is_empty());
        assert!(snap.icon_buttons.is_empty());
    }
}
