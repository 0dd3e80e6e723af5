/// A simple slab of values addressed by reusable indices.
///
/// `insert` hands out the lowest recently freed index if one exists and
/// otherwise grows the storage. Indices stay valid until the value stored
/// under them is removed.
pub(crate) struct Slab<T> {
    /// Storage for items. `None` marks a free slot.
    entries: Vec<Option<T>>,

    /// Stack of free indices that can be reused.
    free: Vec<usize>,

    /// Number of occupied slots.
    len: usize,
}

impl<T> Slab<T> {
    /// Creates an empty slab with room for `capacity` values.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Inserts a value and returns its index.
    pub(crate) fn insert(&mut self, item: T) -> usize {
        self.len += 1;

        match self.free.pop() {
            Some(index) => {
                self.entries[index] = Some(item);
                index
            }
            None => {
                self.entries.push(Some(item));
                self.entries.len() - 1
            }
        }
    }

    /// Removes and returns the value stored at `index`.
    ///
    /// Returns `None` if the index is out of range or already free.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.entries.get_mut(index)?.take()?;

        self.free.push(index);
        self.len -= 1;

        Some(item)
    }

    /// Removes every value, leaving an empty slab.
    pub(crate) fn drain(&mut self) -> Vec<T> {
        self.free.clear();
        self.len = 0;

        self.entries.drain(..).flatten().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
