use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;


/// Tag assigned to flow log rows whose (port, protocol) has no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Composite join key: destination port plus a lowercased protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortProtocolKey {
    port: i32,
    protocol: String,
}

impl PortProtocolKey {
    pub fn new(port: i32, protocol: impl AsRef<str>) -> Self {
        Self {
            port,
            protocol: protocol.as_ref().to_lowercase(),
        }
    }

    pub fn port(&self) -> i32 {
        self.port
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }
}

impl Ord for PortProtocolKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.port.cmp(&other.port) {
            Ordering::Equal => self.protocol.cmp(&other.protocol),
            ord => ord,
        }
    }
}

impl PartialOrd for PortProtocolKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PortProtocolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// Frequency table that remembers the order in which keys were first seen.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    entries: Vec<(K, u64)>,
    slots: HashMap<K, usize>,
}

pub type TagCounts = Counter<String>;
pub type PortProtocolCounts = Counter<PortProtocolKey>;

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `key`. The key is only copied the first time it is seen.
    pub fn increment<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        match self.slots.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                let owned = key.to_owned();
                self.slots.insert(owned.clone(), self.entries.len());
                self.entries.push((owned, 1));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn sorted(&self) -> Vec<(&K, u64)>
    where
        K: Ord,
    {
        let mut rows: Vec<(&K, u64)> = self.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }
}
