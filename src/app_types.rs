use std::sync::{Mutex, MutexGuard};

use crate::{
    asset_server::ServerHandle,
    lifecycle::{LifecycleEvent, LifecycleMachine, ShellPhase},
    shell_config::ShellConfig,
    ZOOM_DEFAULT,
};

#[derive(Debug)]
pub(crate) struct ShellState {
    pub(crate) config: ShellConfig,
    pub(crate) locale: &'static str,
    server: Mutex<Option<ServerHandle>>,
    lifecycle: Mutex<LifecycleMachine>,
    zoom: Mutex<f64>,
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ShellState {
    pub(crate) fn new(config: ShellConfig, locale: &'static str) -> Self {
        Self {
            config,
            locale,
            server: Mutex::new(None),
            lifecycle: Mutex::new(LifecycleMachine::default()),
            zoom: Mutex::new(ZOOM_DEFAULT),
        }
    }

    pub(crate) fn phase(&self) -> ShellPhase {
        lock_or_recover(&self.lifecycle).phase()
    }

    pub(crate) fn apply_event(&self, event: LifecycleEvent) -> Option<ShellPhase> {
        lock_or_recover(&self.lifecycle).apply(event)
    }

    // A recreated webview starts unzoomed, so the stored factor goes with the window.
    pub(crate) fn main_window_destroyed(&self) -> Option<ShellPhase> {
        self.set_zoom(ZOOM_DEFAULT);
        self.apply_event(LifecycleEvent::WindowClosed)
    }

    pub(crate) fn can_launch_window(&self) -> bool {
        lock_or_recover(&self.lifecycle).can_launch_window()
    }

    pub(crate) fn install_server(&self, handle: ServerHandle) -> Option<ServerHandle> {
        lock_or_recover(&self.server).replace(handle)
    }

    pub(crate) fn take_server(&self) -> Option<ServerHandle> {
        lock_or_recover(&self.server).take()
    }

    pub(crate) fn server_url(&self) -> Option<String> {
        lock_or_recover(&self.server).as_ref().map(ServerHandle::url)
    }

    pub(crate) fn zoom(&self) -> f64 {
        *lock_or_recover(&self.zoom)
    }

    pub(crate) fn set_zoom(&self, factor: f64) {
        *lock_or_recover(&self.zoom) = factor;
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;

    use super::*;
    use crate::{asset_server::ServerKind, shell_config::ServerPreference};

    fn state() -> ShellState {
        ShellState::new(
            ShellConfig {
                dev_tools: false,
                server_preference: ServerPreference::Auto,
                asset_root_override: None,
            },
            "en-US",
        )
    }

    #[test]
    fn new_state_starts_uninitialized_without_server() {
        let state = state();
        assert_eq!(state.phase(), ShellPhase::Uninitialized);
        assert!(state.server_url().is_none());
        assert_eq!(state.zoom(), ZOOM_DEFAULT);
    }

    #[test]
    fn take_server_clears_slot_once() {
        let state = state();
        let (tx, _rx) = oneshot::channel();
        let addr = "127.0.0.1:4173".parse().expect("addr");
        assert!(state
            .install_server(ServerHandle::new(ServerKind::Basic, addr, tx))
            .is_none());

        assert_eq!(state.server_url().as_deref(), Some("http://127.0.0.1:4173/"));
        assert!(state.take_server().is_some());
        assert!(state.take_server().is_none());
    }

    #[test]
    fn apply_event_ignores_invalid_transitions() {
        let state = state();
        assert_eq!(state.apply_event(LifecycleEvent::ServerBound), None);
        assert_eq!(
            state.apply_event(LifecycleEvent::Ready),
            Some(ShellPhase::Launching)
        );
        assert!(state.can_launch_window());
    }

    #[test]
    fn main_window_destroyed_resets_zoom_for_the_next_window() {
        let state = state();
        state.apply_event(LifecycleEvent::Ready);
        state.apply_event(LifecycleEvent::ServerBound);
        state.set_zoom(1.7);

        assert_eq!(state.main_window_destroyed(), Some(ShellPhase::Closing));
        assert_eq!(state.zoom(), ZOOM_DEFAULT);
    }
}
