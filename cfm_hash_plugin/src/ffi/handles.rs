//! Handle registry for hash states
//!
//! Handles handed to the host are not addresses. The low half of the pointer
//! value is a slot number (index + 1, so never null) and the high half is the
//! slot's generation. Destroying a handle bumps the generation, which turns
//! any later use of the stale value into `ErrorInvalidHandle`.

use crate::engine::HashState;
use crate::error::{InternalError, Result, UsageError};
use crate::ffi::types::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

const INDEX_BITS: u32 = usize::BITS / 2;
const INDEX_MASK: usize = (1 << INDEX_BITS) - 1;
const GENERATION_MASK: usize = usize::MAX >> INDEX_BITS;

/// Most slots the encoding can address
pub const MAX_SLOTS: usize = INDEX_MASK;

/// Decoded form of a `*mut Hash`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(NonZeroUsize);

impl HandleId {
    fn new(index: usize, generation: usize) -> Option<Self> {
        if index >= MAX_SLOTS {
            return None;
        }
        Self::from_raw(((generation & GENERATION_MASK) << INDEX_BITS) | (index + 1))
    }

    pub fn from_raw(raw: usize) -> Option<Self> {
        if raw & INDEX_MASK == 0 {
            return None;
        }
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn from_ptr(ptr: *mut Hash) -> Option<Self> {
        Self::from_raw(ptr as usize)
    }

    pub fn raw(self) -> usize {
        self.0.get()
    }

    pub fn as_ptr(self) -> *mut Hash {
        self.raw() as *mut Hash
    }

    pub fn index(self) -> usize {
        (self.raw() & INDEX_MASK) - 1
    }

    pub fn generation(self) -> usize {
        self.raw() >> INDEX_BITS
    }
}

pub(crate) type SharedState = Arc<Mutex<HashState>>;

struct Slot {
    generation: usize,
    state: Option<SharedState>,
}

/// Slot table with free-list reuse
pub(crate) struct HandleRegistry {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl HandleRegistry {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store `state`, failing once `limit` handles are live
    pub(crate) fn insert(&mut self, state: HashState, limit: usize) -> Result<HandleId> {
        let limit = limit.min(MAX_SLOTS);
        if self.live >= limit {
            return Err(InternalError::out_of_handles(limit).into());
        }
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.slots.len() >= MAX_SLOTS {
                    return Err(InternalError::out_of_handles(MAX_SLOTS).into());
                }
                self.slots.push(Slot {
                    generation: 0,
                    state: None,
                });
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        let id = HandleId::new(index, slot.generation)
            .ok_or_else(|| InternalError::assertion(format!("slot {index} has no handle encoding")))?;
        slot.state = Some(Arc::new(Mutex::new(state)));
        self.live += 1;
        Ok(id)
    }

    fn slot(&self, id: HandleId) -> Option<&Slot> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation() && slot.state.is_some())
    }

    pub(crate) fn get(&self, id: HandleId) -> Option<SharedState> {
        self.slot(id).and_then(|slot| slot.state.clone())
    }

    pub(crate) fn remove(&mut self, id: HandleId) -> Option<SharedState> {
        self.slot(id)?;
        let slot = &mut self.slots[id.index()];
        let state = slot.state.take();
        slot.generation = (slot.generation + 1) & GENERATION_MASK;
        self.free.push(id.index());
        self.live -= 1;
        state
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }
}

static HASHES: RwLock<HandleRegistry> = RwLock::new(HandleRegistry::new());

fn decode(ptr: *mut Hash) -> Result<HandleId> {
    if ptr.is_null() {
        return Err(UsageError::null_pointer("hash").into());
    }
    HandleId::from_ptr(ptr).ok_or_else(|| UsageError::invalid_handle(ptr as usize).into())
}

/// Issue a handle for `state`
pub(crate) fn register(state: HashState, limit: usize) -> Result<HandleId> {
    HASHES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(state, limit)
}

/// Resolve a host handle to its state
pub(crate) fn lookup(ptr: *mut Hash) -> Result<SharedState> {
    let id = decode(ptr)?;
    HASHES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(id)
        .ok_or_else(|| UsageError::invalid_handle(id.raw()).into())
}

/// Destroy a host handle
pub(crate) fn release(ptr: *mut Hash) -> Result<()> {
    let id = decode(ptr)?;
    let state = HASHES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(id)
        .ok_or_else(|| UsageError::invalid_handle(id.raw()))?;
    // Drop outside the registry lock
    drop(state);
    Ok(())
}

/// Number of handles issued and not yet destroyed
pub fn live_handles() -> usize {
    HASHES.read().unwrap_or_else(PoisonError::into_inner).live()
}
