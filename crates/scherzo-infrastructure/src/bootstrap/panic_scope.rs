//! Scoped panic policy
//!
//! While a run is active, panics are logged through `tracing` instead of
//! the default stderr hook, and [`PanicScope::run`] turns them into
//! [`Error::Panic`]. The previous process hook comes back when the last
//! active scope is dropped. Scopes nest, so concurrent runs share one
//! installation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::{Mutex, PoisonError};

use scherzo_domain::error::{Error, Result};
use tracing::error;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

struct HookState {
    depth: usize,
    previous: Option<PanicHook>,
}

static HOOK_STATE: Mutex<HookState> = Mutex::new(HookState {
    depth: 0,
    previous: None,
});

/// Guard installing the run's panic policy
#[must_use = "the panic policy is removed when the scope is dropped"]
pub struct PanicScope {
    _private: (),
}

impl PanicScope {
    /// Install the policy, or join the already installed one
    pub fn enter() -> Self {
        let mut state = HOOK_STATE.lock().unwrap_or_else(PoisonError::into_inner);
        if state.depth == 0 {
            // Still set when the last scope ended during an unwind
            if state.previous.is_none() {
                state.previous = Some(panic::take_hook());
            }
            panic::set_hook(Box::new(log_panic));
        }
        state.depth += 1;
        Self { _private: () }
    }

    /// Run `f`, converting a panic into [`Error::Panic`]
    pub fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            Err(Error::Panic {
                message: panic_message(payload.as_ref()),
            })
        })
    }
}

impl Drop for PanicScope {
    fn drop(&mut self) {
        let mut state = HOOK_STATE.lock().unwrap_or_else(PoisonError::into_inner);
        state.depth = state.depth.saturating_sub(1);
        // set_hook panics on a panicking thread
        if state.depth == 0 && !std::thread::panicking() {
            if let Some(previous) = state.previous.take() {
                panic::set_hook(previous);
            }
        }
    }
}

fn log_panic(info: &PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|location| format!("{}:{}", location.file(), location.line()))
        .unwrap_or_default();
    error!(
        location = %location,
        message = %panic_message(info.payload()),
        "Panic during front controller run"
    );
}

/// Render a panic payload as text
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
