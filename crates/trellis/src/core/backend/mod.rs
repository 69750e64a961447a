//! Terminal drivers.

/// Crossterm backend implementation.
pub mod crossterm;

use std::fmt::Debug;

use crate::error::Result;

/// Control over the terminal mode the backend runs in.
pub trait BackendControl: Debug {
    /// Take over the terminal.
    fn start(&mut self) -> Result<()>;

    /// Give the terminal back.
    fn stop(&mut self) -> Result<()>;
}

/// Pairs a backend start with a stop, even on early return.
#[derive(Debug)]
pub(crate) struct TerminalSession<B: BackendControl> {
    /// The controlled backend.
    backend: B,
    /// Whether the backend is currently started.
    active: bool,
}

impl<B: BackendControl> TerminalSession<B> {
    /// Start the backend and return the guard.
    pub(crate) fn new(mut backend: B) -> Result<Self> {
        backend.start()?;
        Ok(Self {
            backend,
            active: true,
        })
    }

    /// Stop the backend if the session is active.
    pub(crate) fn stop(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.backend.stop()?;
        }
        Ok(())
    }
}

impl<B: BackendControl> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if self.stop().is_err() {
            tracing::warn!("failed to restore the terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    /// Counts starts and stops.
    #[derive(Debug, Default, Clone)]
    struct Counter(Arc<AtomicUsize>, Arc<AtomicUsize>);

    impl BackendControl for Counter {
        fn start(&mut self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn session_stops_once() -> Result<()> {
        let c = Counter::default();
        let mut s = TerminalSession::new(c.clone())?;
        s.stop()?;
        drop(s);
        assert_eq!(c.0.load(Ordering::SeqCst), 1);
        assert_eq!(c.1.load(Ordering::SeqCst), 1);

        drop(TerminalSession::new(c.clone())?);
        assert_eq!(c.1.load(Ordering::SeqCst), 2);
        Ok(())
    }
}
