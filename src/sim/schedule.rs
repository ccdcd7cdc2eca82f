//! Deferred tasks run against the simulation clock
//!
//! Tasks fire in due-time order, ties broken by scheduling order. A task may
//! name an owning entity; removing that entity cancels the task so nothing
//! runs against a body that no longer exists.

use serde::{Deserialize, Serialize};

/// Work to perform once a task comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Clear the damage flash on an entity
    ClearFlash { entity: u32 },
    /// Remove a faded level-up banner
    RemoveBanner { banner: u32 },
    /// Leave the finished session for the start screen
    ReturnToMenu,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Task {
    due_ms: f64,
    seq: u64,
    owner: Option<u32>,
    action: Deferred,
}

/// Pending deferred tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, owner: Option<u32>, action: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(Task {
            due_ms: now_ms + delay_ms.max(0.0),
            seq,
            owner,
            action,
        });
    }

    /// Drop every task owned by `owner`
    pub fn cancel_owner(&mut self, owner: u32) {
        self.tasks.retain(|t| t.owner != Some(owner));
    }

    /// Remove and return the tasks due at `now_ms`, in firing order
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let mut due: Vec<Task> = Vec::new();
        self.tasks.retain(|t| {
            if t.due_ms <= now_ms {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.action).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 200.0, None, Deferred::ReturnToMenu);
        s.schedule(0.0, 100.0, Some(3), Deferred::ClearFlash { entity: 3 });
        s.schedule(50.0, 50.0, None, Deferred::RemoveBanner { banner: 1 });

        assert!(s.take_due(99.0).is_empty());
        assert_eq!(
            s.take_due(150.0),
            vec![
                Deferred::ClearFlash { entity: 3 },
                Deferred::RemoveBanner { banner: 1 }
            ]
        );
        assert_eq!(s.take_due(1000.0), vec![Deferred::ReturnToMenu]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_cancel_owner() {
        let mut s = Scheduler::new();
        s.schedule(0.0, 100.0, Some(7), Deferred::ClearFlash { entity: 7 });
        s.schedule(0.0, 100.0, Some(8), Deferred::ClearFlash { entity: 8 });
        s.cancel_owner(7);
        assert_eq!(s.take_due(100.0), vec![Deferred::ClearFlash { entity: 8 }]);
    }
}
