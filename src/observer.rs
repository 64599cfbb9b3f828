//! Resource observers.
//!
//! Callers can watch the model's element lifecycle: every element creation
//! and every free reports an event to each registered observer, in
//! registration order. An observer receives the element reference and the
//! event only, never the model itself, so it cannot re-enter the kernel
//! while a structural operation is midway.

use crate::model_error::ElemKind;
use crate::topology::handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, LoopUseId, ShellId, VertexId, VertexUseId,
};

/// Lifecycle event of one element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceEvent {
    /// The element was just created. Its links may not be wired yet.
    New,
    /// The element is about to be freed. Its handle goes stale on return.
    Free,
}

/// Reference to the element an event concerns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElemRef {
    Vertex(VertexId),
    VertexUse(VertexUseId),
    DiskUse(DiskUseId),
    Edge(EdgeId),
    EdgeUse(EdgeUseId),
    Face(FaceId),
    LoopUse(LoopUseId),
    Shell(ShellId),
}

impl ElemRef {
    pub fn kind(self) -> ElemKind {
        match self {
            ElemRef::Vertex(_) => ElemKind::Vertex,
            ElemRef::VertexUse(_) => ElemKind::VertexUse,
            ElemRef::DiskUse(_) => ElemKind::DiskUse,
            ElemRef::Edge(_) => ElemKind::Edge,
            ElemRef::EdgeUse(_) => ElemKind::EdgeUse,
            ElemRef::Face(_) => ElemKind::Face,
            ElemRef::LoopUse(_) => ElemKind::LoopUse,
            ElemRef::Shell(_) => ElemKind::Shell,
        }
    }
}

/// Token returned on registration, used to remove the observer again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(ElemRef, ResourceEvent)>;

/// The model's observer registry.
#[derive(Default)]
pub(crate) struct ObserverSet {
    next_id: u64,
    entries: Vec<(ObserverId, Callback)>,
}

impl ObserverSet {
    pub(crate) fn register(&mut self, cb: Callback) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, cb));
        id
    }

    /// Removes an observer; returns false when the token is unknown.
    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, elem: ElemRef, event: ResourceEvent) {
        for (_, cb) in &mut self.entries {
            cb(elem, event);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet").field("observers", &self.entries.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::handle::Handle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_runs_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut set = ObserverSet::default();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            set.register(Box::new(move |_, _| seen.borrow_mut().push(tag)));
        }
        set.notify(ElemRef::Vertex(VertexId::compose(0, 1)), ResourceEvent::New);
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn remove_by_token() {
        let mut set = ObserverSet::default();
        let id = set.register(Box::new(|_, _| {}));
        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(set.is_empty());
    }
}
