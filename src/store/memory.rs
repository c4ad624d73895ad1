//! In-process store. Every handle created with [`MemoryStore::context`] is a
//! separate context sharing the same data, the way same-origin browser tabs
//! share local storage. Clones stay in the same context.

use crate::errors::AppResult;
use crate::store::{KeyValueStore, StorageEvent};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

#[derive(Default)]
struct Shared {
    data: BTreeMap<String, String>,
    queues: HashMap<usize, VecDeque<StorageEvent>>,
    next_context: usize,
}

impl Shared {
    fn register(&mut self) -> usize {
        let id = self.next_context;
        self.next_context += 1;
        self.queues.insert(id, VecDeque::new());
        id
    }

    fn broadcast(&mut self, from: usize, event: StorageEvent) {
        for (ctx, queue) in self.queues.iter_mut() {
            if *ctx != from {
                queue.push_back(event.clone());
            }
        }
    }
}

#[derive(Clone)]
pub struct MemoryStore {
    shared: Rc<RefCell<Shared>>,
    context: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut shared = Shared::default();
        let context = shared.register();
        Self {
            shared: Rc::new(RefCell::new(shared)),
            context,
        }
    }

    /// Open a new context on the same data.
    pub fn context(&self) -> Self {
        let context = self.shared.borrow_mut().register();
        Self {
            shared: Rc::clone(&self.shared),
            context,
        }
    }

    /// Number of events waiting for this context.
    pub fn pending_events(&self) -> usize {
        self.shared
            .borrow()
            .queues
            .get(&self.context)
            .map(VecDeque::len)
            .unwrap_or(0)
    }

    fn write(&mut self, key: &str, value: Option<&str>) {
        let mut shared = self.shared.borrow_mut();
        let old = match value {
            Some(v) => shared.data.insert(key.to_string(), v.to_string()),
            None => shared.data.remove(key),
        };

        if old.as_deref() == value {
            return;
        }

        let event = StorageEvent {
            key: key.to_string(),
            old_value: old,
            new_value: value.map(str::to_string),
        };
        shared.broadcast(self.context, event);
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.shared.borrow().data.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.write(key, Some(value));
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.write(key, None);
        Ok(())
    }

    fn keys(&self) -> AppResult<Vec<String>> {
        Ok(self.shared.borrow().data.keys().cloned().collect())
    }

    fn take_events(&mut self) -> AppResult<Vec<StorageEvent>> {
        let mut shared = self.shared.borrow_mut();
        Ok(shared
            .queues
            .get_mut(&self.context)
            .map(|q| q.drain(..).collect())
            .unwrap_or_default())
    }
}
