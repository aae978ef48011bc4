//! A linked list that flattens all its nodes onto a Vec for storage, gaining
//! data locality and O(1) random access by handle. Removed nodes leave a hole
//! which goes on a freelist and gets reused by the next push.

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeHandle(usize);

/// A node that lives in a linked list.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    /// The key this node is indexed under.
    pub(crate) key: K,

    /// The value being stored.
    pub(crate) value: V,

    /// The hash of `key`, kept so the index never has to rehash a key.
    pub(crate) hash: u64,

    /// The node inserted just before this one, if any.
    prev: Option<NodeHandle>,

    /// The node inserted just after this one, if any.
    next: Option<NodeHandle>,
}

/// A doubly linked list whose nodes live in a single contiguous Vec and are
/// addressed by their position in it. Unlinking a node is a matter of
/// rewriting two handles on its neighbours, and a handle stays valid until
/// the node it refers to is removed.
///
/// Handles are not generational. Once a node is removed its slot may be
/// handed out again, so holders of a handle (the map's index) must forget it
/// at the same time the node is removed.
#[derive(Clone)]
pub(crate) struct LinkedList<K, V> {
    /// The nodes in the list. `None` marks a slot that's on the freelist.
    pub(crate) store: Vec<Option<Node<K, V>>>,

    /// Slots in the store which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The oldest node in the list.
    head: Option<NodeHandle>,

    /// The youngest node in the list.
    tail: Option<NodeHandle>,
}

#[cold]
#[inline(never)]
fn vacant_slot(handle: NodeHandle) -> ! {
    panic!("node handle {} refers to a vacant slot", handle.0);
}

impl<K, V> LinkedList<K, V> {
    /// Creates a new linked list with a specific capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// The length of this linked list.
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    pub(crate) fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeHandle> {
        self.tail
    }

    /// Gets a node from the list. Panics if the handle is stale.
    pub(crate) fn node(&self, handle: NodeHandle) -> &Node<K, V> {
        match self.store.get(handle.0) {
            Some(Some(node)) => node,
            _ => vacant_slot(handle),
        }
    }

    /// Gets a node from the list mutably. Panics if the handle is stale.
    pub(crate) fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<K, V> {
        match self.store.get_mut(handle.0) {
            Some(Some(node)) => node,
            _ => vacant_slot(handle),
        }
    }

    pub(crate) fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).next
    }

    pub(crate) fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).prev
    }

    /// Pushes a node onto the back of the list and returns a handle to it.
    pub(crate) fn push_back(&mut self, hash: u64, key: K, value: V) -> NodeHandle {
        let n = Node {
            key,
            value,
            hash,
            prev: self.tail,
            next: None,
        };

        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let idx = self
            .free
            .pop()
            .unwrap_or_else(|| NodeHandle(self.store.len()));

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(idx),
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);

        if self.store.len() <= idx.0 {
            self.store.push(Some(n));
        } else {
            self.store[idx.0] = Some(n);
        }

        idx
    }

    /// Remove an arbitrary node from the list, returning its key and value.
    pub(crate) fn remove_node(&mut self, handle: NodeHandle) -> (K, V) {
        let node = match self.store.get_mut(handle.0).and_then(Option::take) {
            Some(node) => node,
            None => vacant_slot(handle),
        };

        // link prev to next and next to prev so the node doesn't exist in the
        // chain anymore. an endpoint hands its role to its only neighbour,
        // and removing the sole node empties both ends.
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }

        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(handle);

        (node.key, node.value)
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }
}
