use crate::guide::types::{ActionKind, ResolvedTarget};
use crate::surface::traits::UiSurface;
use crate::surface::types::ElementType;

/// Maps target text onto a live element.
///
/// Lookup order, first hit wins, exact case-insensitive matches only:
/// 1. button by visible text or aria label
/// 2. link by visible text
/// 3. label, then the input it belongs to (or the label itself)
///
/// No substring matching: "Name" must never land on "Last name".
pub struct TargetResolver<'a> {
    surface: &'a dyn UiSurface,
}

impl<'a> TargetResolver<'a> {
    pub fn new(surface: &'a dyn UiSurface) -> Self {
        Self { surface }
    }

    pub fn resolve(&self, target_text: &str) -> ResolvedTarget {
        let target = target_text.trim();
        if target.is_empty() {
            return ResolvedTarget::Unresolved;
        }

        if let Some(button) = self
            .surface
            .elements_of(ElementType::Button)
            .into_iter()
            .find(|b| b.text_matches(target) || b.aria_matches(target))
        {
            tracing::debug!(target_text = target, element = %button.id, "resolved to button");
            return ResolvedTarget::Element {
                element: button.id,
                interaction: ActionKind::Click,
            };
        }

        if let Some(link) = self
            .surface
            .elements_of(ElementType::Link)
            .into_iter()
            .find(|l| l.text_matches(target))
        {
            tracing::debug!(target_text = target, element = %link.id, "resolved to link");
            return ResolvedTarget::Element {
                element: link.id,
                interaction: ActionKind::Click,
            };
        }

        if let Some(label) = self
            .surface
            .elements_of(ElementType::Label)
            .into_iter()
            .find(|l| l.text_matches(target))
        {
            let element = match self.surface.associated_input(&label.id) {
                Some(input) => input,
                None => {
                    tracing::debug!(target_text = target, label = %label.id, "label has no input, highlighting label");
                    label.id
                }
            };
            tracing::debug!(target_text = target, element = %element, "resolved to field");
            return ResolvedTarget::Element {
                element,
                interaction: ActionKind::Fill,
            };
        }

        tracing::info!(target_text = target, "target not found on page, using root anchor");
        ResolvedTarget::Unresolved
    }
}
