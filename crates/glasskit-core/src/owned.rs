use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// Single-threaded shared owner for per-control state.
///
/// Controls keep their mutable state in an `Owned` so that scheduled
/// continuations can hold a [`WeakOwned`] back-reference without keeping a
/// dropped control alive.
pub struct Owned<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Run `f` with an immutable reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&*borrow)
    }

    /// Run `f` with a mutable reference to the stored value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut *borrow)
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakOwned<T> {
        WeakOwned {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

pub struct WeakOwned<T> {
    inner: Weak<RefCell<T>>,
}

impl<T> Clone for WeakOwned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakOwned<T> {
    pub fn upgrade(&self) -> Option<Owned<T>> {
        self.inner.upgrade().map(|inner| Owned { inner })
    }
}
