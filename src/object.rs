//! Heap-allocated objects and their ownership table
//!
//! Every reference-typed value lives in the `Heap`, an index-based object
//! table owned by the VM. Objects are appended at allocation time and
//! released all at once at teardown; nothing is freed in between, so a
//! handle stays valid for the lifetime of the VM that allocated it.

/// A safe handle to a heap-allocated object.
/// This acts as an index into the Heap's object storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub usize);

/// A heap-allocated string: immutable bytes plus a precomputed hash.
/// The hash is kept for the table building block and a future interning
/// pass; no pipeline lookup consumes it yet.
#[derive(Debug, Clone)]
pub struct ObjString {
    pub chars: String,
    pub hash: u32,
}

impl ObjString {
    pub fn new(chars: String) -> Self {
        let hash = hash_string(chars.as_bytes());
        Self { chars, hash }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Polymorphic heap entity. Strings are the only variant today.
#[derive(Debug, Clone)]
pub enum Obj {
    String(ObjString),
}

/// The object table. Allocation appends; release happens in one pass.
pub struct Heap {
    objects: Vec<Obj>,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Allocate a new string object. Equal contents still get distinct
    /// objects: there is no interning.
    pub fn alloc_string(&mut self, chars: String) -> Handle {
        self.alloc(Obj::String(ObjString::new(chars)))
    }

    fn alloc(&mut self, obj: Obj) -> Handle {
        let idx = self.objects.len();
        self.objects.push(obj);
        Handle(idx)
    }

    pub fn get_string(&self, handle: Handle) -> Option<&ObjString> {
        match self.objects.get(handle.0) {
            Some(Obj::String(s)) => Some(s),
            None => None,
        }
    }

    /// Release every object at once. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

/// FNV-1a hash over raw bytes
pub fn hash_string(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 2166136261;
    for &byte in bytes {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(16777619);
    }
    hash
}
