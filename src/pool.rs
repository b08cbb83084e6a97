//! Slab pool for element records.
//!
//! Each scheme owns one `ElementPool` for its record type. Records are handed
//! out in contiguous runs (one run per child-enumeration or boundary call) and
//! released as a run; a released run is reused by the next request of the
//! same length, so families never fragment the pool. Runs are addressed by
//! [`ElementRun`] handles rather than references, so the slab may grow
//! without invalidating them.

use hashbrown::HashMap;

use crate::config::SchemeConfig;
use crate::eclass::ElementClass;
use crate::scheme_error::SchemeError;

/// Handle to a contiguous run of records in an [`ElementPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRun {
    class: ElementClass,
    start: u32,
    len: u32,
}

impl ElementRun {
    /// Class of the pool the run belongs to.
    pub fn class(&self) -> ElementClass {
        self.class
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn range(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }

    fn invalid(&self, class: ElementClass) -> SchemeError {
        SchemeError::InvalidHandle {
            class,
            start: self.start,
            len: self.len,
        }
    }
}

/// Fixed-block arena of records of one element class.
#[derive(Debug, Clone)]
pub struct ElementPool<E> {
    class: ElementClass,
    slots: Vec<E>,
    block_size: usize,
    capacity: Option<usize>,
    /// start -> len of every run currently handed out
    live: HashMap<u32, u32>,
    /// len -> starts of released runs
    free: HashMap<u32, Vec<u32>>,
    live_records: usize,
}

impl<E: Copy + Default> ElementPool<E> {
    pub fn new(class: ElementClass, config: &SchemeConfig) -> Self {
        Self {
            class,
            slots: Vec::new(),
            block_size: config.pool_block_size.max(1),
            capacity: config.pool_capacity,
            live: HashMap::new(),
            free: HashMap::new(),
            live_records: 0,
        }
    }

    pub fn class(&self) -> ElementClass {
        self.class
    }

    /// Records currently handed out.
    pub fn live_records(&self) -> usize {
        self.live_records
    }

    /// Records held by the slab, live or released.
    pub fn reserved_records(&self) -> usize {
        self.slots.len()
    }

    /// Hands out `len` contiguous default-initialised records.
    pub fn alloc(&mut self, len: usize) -> Result<ElementRun, SchemeError> {
        let run_len = u32::try_from(len).map_err(|_| self.exhausted(len))?;
        if run_len == 0 {
            return Ok(ElementRun {
                class: self.class,
                start: 0,
                len: 0,
            });
        }

        if let Some(start) = self.free.get_mut(&run_len).and_then(Vec::pop) {
            let run = ElementRun {
                class: self.class,
                start,
                len: run_len,
            };
            self.slots[run.range()].fill(E::default());
            log::trace!("{}: reusing run of {len} records at {start}", self.class);
            return Ok(self.track(run));
        }

        let end = self.slots.len() + len;
        if let Some(capacity) = self.capacity {
            if end > capacity {
                let err = self.exhausted(len);
                log::error!("{err}");
                return Err(err);
            }
        }
        let start = u32::try_from(self.slots.len()).map_err(|_| self.exhausted(len))?;
        if end > self.slots.capacity() {
            let blocks = (end - self.slots.capacity()).div_ceil(self.block_size);
            let mut grow = blocks * self.block_size;
            if let Some(capacity) = self.capacity {
                grow = grow.min(capacity - self.slots.len());
            }
            log::trace!("{}: growing pool by {grow} records", self.class);
            self.slots.reserve_exact(grow);
        }
        self.slots.resize(end, E::default());
        Ok(self.track(ElementRun {
            class: self.class,
            start,
            len: run_len,
        }))
    }

    /// Releases a run handed out by [`alloc`](Self::alloc).
    pub fn free(&mut self, run: ElementRun) -> Result<(), SchemeError> {
        if run.is_empty() && run.class == self.class {
            return Ok(());
        }
        if run.class != self.class || self.live.get(&run.start) != Some(&run.len) {
            log::warn!(
                "{}: release of unknown run (start {}, len {})",
                self.class,
                run.start,
                run.len
            );
            return Err(run.invalid(self.class));
        }
        self.live.remove(&run.start);
        self.live_records -= run.len();
        self.free.entry(run.len).or_default().push(run.start);
        Ok(())
    }

    pub fn get(&self, run: ElementRun) -> Result<&[E], SchemeError> {
        self.check(run)?;
        Ok(&self.slots[run.range()])
    }

    pub fn get_mut(&mut self, run: ElementRun) -> Result<&mut [E], SchemeError> {
        self.check(run)?;
        Ok(&mut self.slots[run.range()])
    }

    /// Drops every record and run at once.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live.clear();
        self.free.clear();
        self.live_records = 0;
    }

    fn track(&mut self, run: ElementRun) -> ElementRun {
        self.live.insert(run.start, run.len);
        self.live_records += run.len();
        run
    }

    fn check(&self, run: ElementRun) -> Result<(), SchemeError> {
        let live = run.is_empty() || self.live.get(&run.start) == Some(&run.len);
        if run.class != self.class || !live {
            return Err(run.invalid(self.class));
        }
        Ok(())
    }

    fn exhausted(&self, requested: usize) -> SchemeError {
        SchemeError::PoolExhausted {
            class: self.class,
            requested,
            live: self.live_records,
            capacity: self.capacity.unwrap_or(u32::MAX as usize),
        }
    }
}
