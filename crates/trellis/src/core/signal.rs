//! Typed event channels that widgets expose to application code.

use std::sync::mpsc::{self, Receiver, Sender};

/// A broadcast channel carrying values of type `T`.
///
/// Each subscriber holds its own [`Receiver`]; dropping the receiver ends the
/// subscription, and the dead sender is pruned on the next emit.
#[derive(Debug)]
pub struct Signal<T> {
    /// Live subscriptions.
    subscribers: Vec<Sender<T>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> Signal<T> {
    /// A signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the signal.
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send `value` to every live subscriber.
    pub fn emit(&mut self, value: T) {
        self.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Number of live subscribers, as of the last emit.
    pub fn subscribers(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut s = Signal::new();
        let a = s.subscribe();
        let b = s.subscribe();
        s.emit(1u32);
        drop(b);
        s.emit(2);
        assert_eq!(s.subscribers(), 1);
        assert_eq!(a.try_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
