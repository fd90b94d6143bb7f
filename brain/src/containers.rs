use kinematics::Displacement;
use std::collections::VecDeque;
use thiserror::Error;

/// Returned when taking from an empty queue or stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("container is empty")]
pub struct EmptyError;

/// Displacements still to be travelled, in load order.
#[derive(Debug, Default, Clone)]
pub struct ForwardQueue {
    items: VecDeque<Displacement>,
}

impl ForwardQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, d: Displacement) {
        self.items.push_back(d);
    }

    pub fn dequeue(&mut self) -> Result<Displacement, EmptyError> {
        self.items.pop_front().ok_or(EmptyError)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn to_vec(&self) -> Vec<Displacement> {
        self.items.iter().copied().collect()
    }
}

impl FromIterator<Displacement> for ForwardQueue {
    fn from_iter<I: IntoIterator<Item = Displacement>>(iter: I) -> Self {
        let mut queue = ForwardQueue::new();
        for d in iter {
            queue.enqueue(d);
        }
        queue
    }
}

/// Displacements already travelled, most recent on top.
#[derive(Debug, Default, Clone)]
pub struct VisitedStack {
    items: Vec<Displacement>,
}

impl VisitedStack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, d: Displacement) {
        self.items.push(d);
    }

    pub fn pop(&mut self) -> Result<Displacement, EmptyError> {
        self.items.pop().ok_or(EmptyError)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn to_vec(&self) -> Vec<Displacement> {
        self.items.clone()
    }
}
