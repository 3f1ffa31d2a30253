use crate::collision::Manifold;

/// Receives the full manifold list once per step, after resolution.
///
/// Any `FnMut(&[Manifold])` closure is an observer.
pub trait CollisionObserver {
    fn on_collisions(&mut self, manifolds: &[Manifold]);
}

impl<F> CollisionObserver for F
where
    F: FnMut(&[Manifold]),
{
    fn on_collisions(&mut self, manifolds: &[Manifold]) {
        self(manifolds)
    }
}

/// Handle returned on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Registered observers, notified in registration order.
#[derive(Default)]
pub(crate) struct ObserverList {
    entries: Vec<(ObserverId, Box<dyn CollisionObserver>)>,
    next_id: u64,
}

impl ObserverList {
    pub fn register(&mut self, observer: Box<dyn CollisionObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, manifolds: &[Manifold]) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_collisions(manifolds);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
