//! Caller-owned storage that options write into.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`Slot`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A shared storage cell an option is bound to.
///
/// Create one per setting, hand a reference to the registration call, and read
/// it back once [`Opts::scan`](crate::Opts::scan) succeeds:
///
/// ```
/// use longopts::{Opts, Slot};
///
/// let verbose = Slot::new(false);
/// Opts::new().simple_option("verbose", &verbose).scan(&["--verbose"]).unwrap();
/// assert!(verbose.get());
/// ```
///
/// Clones share the cell and the [`SlotId`]; two registrations against clones
/// of one slot target the same storage.
pub struct Slot<T> {
    id: SlotId,
    cell: Rc<RefCell<T>>,
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        let id = SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed));
        Self {
            id,
            cell: Rc::new(RefCell::new(value)),
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Store `value`, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.cell.replace(value)
    }

    /// Whether a live [`Slot::borrow`] would make a write panic.
    pub(crate) fn is_borrowed(&self) -> bool {
        self.cell.try_borrow_mut().is_err()
    }

    pub(crate) fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.cell.borrow_mut());
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T: Default> Slot<T> {
    pub fn take(&self) -> T {
        self.cell.take()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("value", &*self.cell.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity_and_storage() {
        let a = Slot::new(7i64);
        let b = a.clone();
        assert_eq!(a.id(), b.id());

        b.set(11);
        assert_eq!(a.get(), 11);
    }

    #[test]
    fn fresh_slots_get_fresh_ids() {
        let a = Slot::new(0i64);
        let b = Slot::new(0i64);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn update_take_and_replace() {
        let list: Slot<Vec<String>> = Slot::default();
        list.update(|v| v.push("a".to_string()));
        assert_eq!(list.borrow().len(), 1);
        assert_eq!(list.take(), vec!["a".to_string()]);
        assert!(list.borrow().is_empty());

        let n = Slot::new(1i64);
        assert_eq!(n.replace(2), 1);
        assert_eq!(n.get(), 2);
    }

    #[test]
    fn outstanding_borrow_is_visible() {
        let a = Slot::new(String::from("x"));
        assert!(!a.is_borrowed());
        let guard = a.borrow();
        assert!(a.clone().is_borrowed());
        drop(guard);
        assert!(!a.is_borrowed());
    }
}
