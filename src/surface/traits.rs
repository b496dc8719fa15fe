use crate::surface::types::{ElementRef, ElementType, UIElement};

/// Read-only view of the host UI.
/// Implementations map these predicates onto whatever query mechanism the
/// host toolkit offers; callers never see selectors.
pub trait UiSurface {
    /// Current route path of the host application.
    fn route(&self) -> String;

    /// Elements of the given type, in document order.
    fn elements_of(&self, kind: ElementType) -> Vec<UIElement>;

    /// Input-like control belonging to `label`, if one exists in its group.
    fn associated_input(&self, label: &ElementRef) -> Option<ElementRef>;
}
