//! Sidebar entry activation
//!
//! Activating an entry closes the panel first and only then navigates,
//! optionally wrapped in a view transition. The generated client script
//! follows the same sequence; these types pin the contract down.

/// How a transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Finished,
    /// Skipped or interrupted, e.g. by another navigation
    Cancelled,
}

/// Something able to animate a view change
pub trait TransitionCapability {
    /// Run `update` inside a transition
    fn run(&self, update: &mut dyn FnMut()) -> TransitionOutcome;
}

/// A panel that can be dismissed
pub trait Panel {
    fn is_open(&self) -> bool;
    fn close(&mut self);
}

/// Open/closed state of the post sidebar
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SidebarPanel {
    open: bool,
}

impl SidebarPanel {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

impl Panel for SidebarPanel {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }
}

/// Run `navigate` inside a transition when a capability is present
///
/// `navigate` runs exactly once in every case: without a capability, when
/// the transition is cancelled, and when a capability returns without ever
/// calling the update.
pub fn with_optional_transition<F: FnOnce()>(
    capability: Option<&dyn TransitionCapability>,
    navigate: F,
) {
    let mut navigate = Some(navigate);

    if let Some(capability) = capability {
        let outcome = capability.run(&mut || {
            if let Some(f) = navigate.take() {
                f();
            }
        });
        if outcome == TransitionOutcome::Cancelled {
            tracing::debug!("View transition cancelled");
        }
    }

    if let Some(f) = navigate.take() {
        f();
    }
}

/// Close `panel`, then navigate to `href`
pub fn activate_entry<P, F>(
    panel: &mut P,
    href: &str,
    capability: Option<&dyn TransitionCapability>,
    navigate: F,
) where
    P: Panel + ?Sized,
    F: FnOnce(&str),
{
    panel.close();
    with_optional_transition(capability, || navigate(href));
}
