// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten valor y subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers. Se copia la lista antes para que
    /// un callback pueda suscribir o leer el valor sin conflicto de borrow.
    fn notify(&self) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn update_notifies_subscribers_of_every_clone() {
        let state = ReactiveState::new(Vec::<u32>::new());
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            state.subscribe(move || calls.set(calls.get() + 1));
        }

        let other = state.clone();
        other.update(|v| v.push(1));
        state.set(vec![1, 2]);

        assert_eq!(calls.get(), 2);
        assert_eq!(other.get(), vec![1, 2]);
        assert_eq!(state.with(|v| v.len()), 2);
    }

    #[test]
    fn subscriber_can_read_value_during_notify() {
        let state = ReactiveState::new(0u32);
        let seen = Rc::new(Cell::new(0));
        {
            let seen = seen.clone();
            let reader = state.clone();
            state.subscribe(move || seen.set(reader.get()));
        }
        state.set(7);
        assert_eq!(seen.get(), 7);
    }
}
