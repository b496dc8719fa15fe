use crate::config::DeferralPolicy;
use crate::guide::resolver::TargetResolver;
use crate::guide::types::{Action, ActionKind};
use crate::surface::traits::UiSurface;
use crate::tour::state::{TourSignal, TourStatus, TourStep};

/// State machine behind the "Show Visual Demo" walkthrough.
///
/// With [`DeferralPolicy::NavigationAware`] only the first click is shown on
/// the current page and every other action is held back in its original
/// order, because that click usually navigates and the remaining targets
/// only exist on the next page. The
/// held-back actions are resolved when the route changes or when the
/// first phase reports `Finished`, whichever comes first.
///
/// Only one navigation is modelled. A held-back click followed by more
/// actions (click → navigate → click → navigate → fill) is flagged through
/// [`TourSession::unmodeled_navigation`] and resolved in a single second phase.
#[derive(Debug)]
pub struct TourSession {
    policy: DeferralPolicy,
    steps: Vec<TourStep>,
    cursor: usize,
    status: TourStatus,
    deferred: Vec<Action>,
    /// Route the current phase was resolved against.
    phase_route: Option<String>,
    unmodeled_navigation: bool,
    last_outcome: Option<TourStatus>,
}

impl TourSession {
    pub fn new(policy: DeferralPolicy) -> Self {
        Self {
            policy,
            steps: Vec::new(),
            cursor: 0,
            status: TourStatus::Idle,
            deferred: Vec::new(),
            phase_route: None,
            unmodeled_navigation: false,
            last_outcome: None,
        }
    }

    pub fn status(&self) -> TourStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TourStatus::Running
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        if self.is_running() {
            self.steps.get(self.cursor)
        } else {
            None
        }
    }

    pub fn deferred(&self) -> &[Action] {
        &self.deferred
    }

    pub fn unmodeled_navigation(&self) -> bool {
        self.unmodeled_navigation
    }

    /// How the previous tour ended (`Finished` or `Skipped`).
    pub fn last_outcome(&self) -> Option<TourStatus> {
        self.last_outcome
    }

    /// Starts a tour, discarding whatever tour was running before.
    pub fn start(&mut self, actions: &[Action], surface: &dyn UiSurface) {
        if self.is_running() {
            tracing::info!(steps = self.steps.len(), deferred = self.deferred.len(), "discarding running tour");
        }
        self.reset();

        let actions: Vec<Action> = actions
            .iter()
            .filter(|a| !a.target_text.trim().is_empty())
            .cloned()
            .collect();
        if actions.is_empty() {
            tracing::warn!("tour requested with no actions");
            return;
        }

        let (immediate, deferred) = split_phases(actions, self.policy);

        self.unmodeled_navigation = deferred
            .iter()
            .position(|a| a.kind == ActionKind::Click)
            .is_some_and(|pos| pos + 1 < deferred.len());
        if self.unmodeled_navigation {
            tracing::warn!(
                deferred = deferred.len(),
                "more than one navigating click; later pages are resolved together after the first navigation"
            );
        }

        self.steps = resolve_steps(&immediate, surface);
        self.deferred = deferred;
        self.cursor = 0;
        self.status = TourStatus::Running;
        self.phase_route = Some(surface.route());
        tracing::info!(
            policy = ?self.policy,
            immediate = self.steps.len(),
            deferred = self.deferred.len(),
            route = ?self.phase_route,
            "tour started"
        );
    }

    /// Applies a presentation signal and returns the status it led to.
    /// `Finished`/`Skipped` are reported once; the session is back to
    /// `Idle` right after.
    pub fn signal(&mut self, signal: TourSignal, surface: &dyn UiSurface) -> TourStatus {
        if !self.is_running() {
            tracing::debug!(?signal, status = ?self.status, "signal ignored, no tour running");
            return self.status;
        }

        match signal {
            TourSignal::Advance => {
                if self.cursor + 1 < self.steps.len() {
                    self.cursor += 1;
                    tracing::debug!(cursor = self.cursor, "tour advanced");
                    TourStatus::Running
                } else {
                    self.complete(surface)
                }
            }
            TourSignal::Back => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "tour stepped back");
                TourStatus::Running
            }
            TourSignal::Finished => self.complete(surface),
            TourSignal::Skipped => {
                tracing::info!(
                    cursor = self.cursor,
                    dropped = self.deferred.len(),
                    "tour skipped"
                );
                self.end(TourStatus::Skipped)
            }
        }
    }

    /// Route change notification from the host. Resumes a tour that is
    /// waiting on navigation; returns whether it did.
    pub fn on_route_change(&mut self, surface: &dyn UiSurface) -> bool {
        if !self.is_running() || self.deferred.is_empty() {
            return false;
        }
        let route = surface.route();
        if self.phase_route.as_deref() == Some(route.as_str()) {
            tracing::debug!(route = %route, "route unchanged, tour keeps waiting");
            return false;
        }
        tracing::info!(from = ?self.phase_route, to = %route, "navigation observed");
        self.resume_deferred(surface);
        true
    }

    pub fn reset(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.status = TourStatus::Idle;
        self.deferred.clear();
        self.phase_route = None;
        self.unmodeled_navigation = false;
    }

    fn complete(&mut self, surface: &dyn UiSurface) -> TourStatus {
        if self.deferred.is_empty() {
            self.end(TourStatus::Finished)
        } else {
            self.resume_deferred(surface);
            TourStatus::Running
        }
    }

    fn resume_deferred(&mut self, surface: &dyn UiSurface) {
        let deferred = std::mem::take(&mut self.deferred);
        self.steps = resolve_steps(&deferred, surface);
        self.cursor = 0;
        self.phase_route = Some(surface.route());
        tracing::info!(steps = self.steps.len(), route = ?self.phase_route, "second phase resolved");
    }

    fn end(&mut self, outcome: TourStatus) -> TourStatus {
        self.status = outcome;
        tracing::info!(?outcome, "tour ended");
        self.last_outcome = Some(outcome);
        self.reset();
        outcome
    }
}

impl Default for TourSession {
    fn default() -> Self {
        Self::new(DeferralPolicy::default())
    }
}

/// Splits actions into (shown now, held until navigation).
fn split_phases(mut actions: Vec<Action>, policy: DeferralPolicy) -> (Vec<Action>, Vec<Action>) {
    if policy == DeferralPolicy::Eager {
        return (actions, Vec::new());
    }
    match actions.iter().position(|a| a.kind == ActionKind::Click) {
        Some(first_click) => {
            let click = actions.remove(first_click);
            (vec![click], actions)
        }
        None => (actions, Vec::new()),
    }
}

fn resolve_steps(actions: &[Action], surface: &dyn UiSurface) -> Vec<TourStep> {
    let resolver = TargetResolver::new(surface);
    actions
        .iter()
        .map(|action| TourStep {
            ordinal: action.ordinal,
            display_text: TourStep::describe(action),
            target: resolver.resolve(&action.target_text),
        })
        .collect()
}
