//! # Bounded Memory
//!
//! The last *k* exchanges of a conversation, used as structured history in the tutor
//! prompt. Pushing past capacity drops the oldest exchange; retained exchanges are never
//! modified.

use std::collections::VecDeque;

use prompt::ChatMessage;
use tracing::debug;

use crate::types::Exchange;

/// Sliding window over the most recent exchanges.
#[derive(Debug, Clone)]
pub struct BoundedMemory {
    k: usize,
    exchanges: VecDeque<Exchange>,
}

impl BoundedMemory {
    /// Creates an empty window holding at most `k` exchanges.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            exchanges: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Records one exchange, evicting from the front while over capacity.
    pub fn push(&mut self, exchange: Exchange) {
        if self.k == 0 {
            return;
        }
        self.exchanges.push_back(exchange);
        while self.exchanges.len() > self.k {
            self.exchanges.pop_front();
            debug!(window = self.k, "BoundedMemory: dropped oldest exchange");
        }
    }

    /// Retained exchanges, oldest first.
    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// Retained exchanges as alternating user/assistant chat messages.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.exchanges
            .iter()
            .flat_map(|e| {
                [
                    ChatMessage::user(e.request.clone()),
                    ChatMessage::assistant(e.response.clone()),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut memory = BoundedMemory::new(0);
        memory.push(Exchange::new("q", "r"));
        assert!(memory.is_empty());
        assert!(memory.messages().is_empty());
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let mut memory = BoundedMemory::new(usize::MAX);
        memory.push(Exchange::new("q", "r"));
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.capacity(), usize::MAX);
    }

    #[test]
    fn messages_alternate_user_assistant() {
        let mut memory = BoundedMemory::new(3);
        memory.push(Exchange::new("q1", "r1"));
        let msgs = memory.messages();
        assert_eq!(msgs, vec![ChatMessage::user("q1"), ChatMessage::assistant("r1")]);
    }
}
