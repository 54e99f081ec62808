use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

/// Counting gate bounding how many workers copy at once.
///
/// Every worker thread is started immediately and blocks here until a
/// permit frees up. The permit is an RAII guard, so it is returned on every
/// exit path, including unwinding.
#[derive(Clone)]
pub struct Gate {
    inner: Arc<GateInner>,
}

struct GateInner {
    available: Mutex<usize>,
    freed: Condvar,
}

impl Gate {
    pub fn new(permits: usize) -> Self {
        assert!(permits > 0, "gate needs at least one permit");
        Gate {
            inner: Arc::new(GateInner {
                available: Mutex::new(permits),
                freed: Condvar::new(),
            }),
        }
    }

    /// Block until a permit is free.
    pub fn acquire(&self) -> GatePermit {
        let mut available = self.inner.available.lock();
        while *available == 0 {
            self.inner.freed.wait(&mut available);
        }
        *available -= 1;
        GatePermit {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub struct GatePermit {
    inner: Arc<GateInner>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        let mut available = self.inner.available.lock();
        *available += 1;
        self.inner.freed.notify_one();
    }
}
