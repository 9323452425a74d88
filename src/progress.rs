//! Project progress derived from task completion.

use tracing::debug;

use crate::fields::Status;
use crate::store::TaskListener;
use crate::task::Task;

/// Percentage of `tasks` that are done, rounded half up.
///
/// Returns `None` for an empty list so the caller keeps its previous value.
pub fn compute_progress(tasks: &[Task]) -> Option<u8> {
    let total = tasks.len();
    if total == 0 {
        return None;
    }
    let done = tasks.iter().filter(|t| t.status == Status::Done).count();
    // round(100 * done / total) == floor((200 * done + total) / (2 * total))
    let pct = (200 * done + total) / (2 * total);
    Some(pct as u8)
}

/// Recomputes progress after every store change and reports it upward.
pub struct ProgressAggregator {
    on_progress: Box<dyn FnMut(u8)>,
}

impl ProgressAggregator {
    pub fn new(on_progress: impl FnMut(u8) + 'static) -> Self {
        ProgressAggregator { on_progress: Box::new(on_progress) }
    }
}

impl TaskListener for ProgressAggregator {
    fn tasks_changed(&mut self, tasks: &[Task]) {
        if let Some(pct) = compute_progress(tasks) {
            debug!(progress = pct, total = tasks.len(), "progress recomputed");
            (self.on_progress)(pct);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::store::TaskStore;
    use crate::task::tests::sample;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_done(done: usize, total: usize) -> Vec<Task> {
        (0..total)
            .map(|i| {
                let status = if i < done { Status::Done } else { Status::InProgress };
                sample(&i.to_string(), status, "1")
            })
            .collect()
    }

    #[test]
    fn test_progress_values() {
        assert_eq!(compute_progress(&with_done(1, 4)), Some(25));
        assert_eq!(compute_progress(&with_done(2, 3)), Some(67));
        assert_eq!(compute_progress(&with_done(1, 3)), Some(33));
        assert_eq!(compute_progress(&with_done(1, 8)), Some(13));
        assert_eq!(compute_progress(&with_done(0, 5)), Some(0));
        assert_eq!(compute_progress(&with_done(5, 5)), Some(100));
        assert_eq!(compute_progress(&[]), None);
    }

    #[test]
    fn test_aggregator_reports_and_retains_on_empty() {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = reported.clone();
        let mut store = TaskStore::load(MemoryStore::new(), "1");
        store.subscribe(ProgressAggregator::new(move |pct| sink.borrow_mut().push(pct)));
        // Empty board at subscribe: nothing reported.
        assert!(reported.borrow().is_empty());

        store.add(sample("a", Status::Todo, "1")).unwrap();
        store.add(sample("b", Status::Done, "1")).unwrap();
        store.set_status("a", Status::Done).unwrap();
        store.delete("a").unwrap();
        store.delete("b").unwrap();

        // The final delete empties the board and reports nothing.
        assert_eq!(*reported.borrow(), vec![0, 50, 100, 100]);
    }
}
