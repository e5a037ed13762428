// Event ordering: `Ready` arrives once from `setup`, before any window.
// `ServerBound` follows `Ready` or `Activate` before the main window exists.
// Instance, menu and window events all run on the main thread. `Exited` is last.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellPhase {
    Uninitialized,
    Launching,
    Serving,
    Closing,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleEvent {
    Ready,
    ServerBound,
    SecondInstance,
    Activate,
    WindowClosed,
    QuitRequested,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LifecycleMachine {
    phase: ShellPhase,
}

impl Default for LifecycleMachine {
    fn default() -> Self {
        Self {
            phase: ShellPhase::Uninitialized,
        }
    }
}

pub(crate) fn next_phase(current: ShellPhase, event: LifecycleEvent) -> Option<ShellPhase> {
    use LifecycleEvent as E;
    use ShellPhase as P;

    match (current, event) {
        (P::Terminated, _) => None,
        (_, E::Exited) => Some(P::Terminated),
        (P::Uninitialized, E::Ready) => Some(P::Launching),
        (P::Launching, E::ServerBound) => Some(P::Serving),
        (P::Serving, E::SecondInstance) => Some(P::Serving),
        (P::Launching | P::Serving, E::WindowClosed) => Some(P::Closing),
        (P::Closing, E::Activate) => Some(P::Launching),
        (P::Uninitialized | P::Launching | P::Serving | P::Closing, E::QuitRequested) => {
            Some(P::Closing)
        }
        _ => None,
    }
}

impl LifecycleMachine {
    pub(crate) fn phase(&self) -> ShellPhase {
        self.phase
    }

    pub(crate) fn apply(&mut self, event: LifecycleEvent) -> Option<ShellPhase> {
        let next = next_phase(self.phase, event)?;
        self.phase = next;
        Some(next)
    }

    pub(crate) fn can_launch_window(&self) -> bool {
        self.phase == ShellPhase::Launching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_sequence_reaches_serving() {
        let mut machine = LifecycleMachine::default();
        assert_eq!(machine.apply(LifecycleEvent::Ready), Some(ShellPhase::Launching));
        assert!(machine.can_launch_window());
        assert_eq!(
            machine.apply(LifecycleEvent::ServerBound),
            Some(ShellPhase::Serving)
        );
        assert!(!machine.can_launch_window());
    }

    #[test]
    fn second_instance_keeps_serving() {
        let mut machine = LifecycleMachine::default();
        machine.apply(LifecycleEvent::Ready);
        machine.apply(LifecycleEvent::ServerBound);
        assert_eq!(
            machine.apply(LifecycleEvent::SecondInstance),
            Some(ShellPhase::Serving)
        );
    }

    #[test]
    fn activate_relaunches_only_after_window_closed() {
        let mut machine = LifecycleMachine::default();
        machine.apply(LifecycleEvent::Ready);
        machine.apply(LifecycleEvent::ServerBound);
        assert_eq!(machine.apply(LifecycleEvent::Activate), None);
        assert_eq!(machine.phase(), ShellPhase::Serving);

        assert_eq!(
            machine.apply(LifecycleEvent::WindowClosed),
            Some(ShellPhase::Closing)
        );
        assert_eq!(
            machine.apply(LifecycleEvent::Activate),
            Some(ShellPhase::Launching)
        );
        assert_eq!(
            machine.apply(LifecycleEvent::ServerBound),
            Some(ShellPhase::Serving)
        );
    }

    #[test]
    fn server_bound_is_ignored_outside_launching() {
        let mut machine = LifecycleMachine::default();
        assert_eq!(machine.apply(LifecycleEvent::ServerBound), None);
        assert_eq!(machine.phase(), ShellPhase::Uninitialized);
    }

    #[test]
    fn exited_is_terminal() {
        let mut machine = LifecycleMachine::default();
        machine.apply(LifecycleEvent::Ready);
        assert_eq!(
            machine.apply(LifecycleEvent::QuitRequested),
            Some(ShellPhase::Closing)
        );
        assert_eq!(
            machine.apply(LifecycleEvent::Exited),
            Some(ShellPhase::Terminated)
        );
        assert_eq!(machine.apply(LifecycleEvent::Ready), None);
        assert_eq!(machine.apply(LifecycleEvent::Exited), None);
        assert_eq!(machine.phase(), ShellPhase::Terminated);
    }
}
