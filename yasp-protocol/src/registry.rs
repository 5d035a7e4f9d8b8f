//! Command registry
//!
//! A fixed-capacity, append-only table from command id to handler. Lookup
//! is a linear scan in registration order, so when an id is registered
//! twice the first entry wins and the second is never reached.

use heapless::Vec;
use yasp_hal::UartTx;

use crate::handler::{Handler, Link};

/// Registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Every slot is taken
    Full,
}

/// One registered command
#[derive(Debug, Clone)]
pub struct Entry<H> {
    /// Command id, compared against the raw id of inbound frames
    pub id: u16,
    /// Handler invoked for matching frames
    pub handler: H,
}

/// Command table holding up to `N` handlers
#[derive(Debug, Clone)]
pub struct Registry<H, const N: usize> {
    entries: Vec<Entry<H>, N>,
}

impl<H, const N: usize> Default for Registry<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, const N: usize> Registry<H, N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a handler for `id`
    ///
    /// Uniqueness is not checked.
    pub fn register(&mut self, id: u16, handler: H) -> Result<(), RegistryError> {
        self.entries
            .push(Entry { id, handler })
            .map_err(|_| RegistryError::Full)
    }

    /// First handler registered for `id`
    pub fn get(&self, id: u16) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.handler)
    }

    /// First handler registered for `id`, mutably
    pub fn get_mut(&mut self, id: u16) -> Option<&mut H> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.handler)
    }

    /// Whether any handler is registered for `id`
    pub fn contains(&self, id: u16) -> bool {
        self.get(id).is_some()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Entry<H>> {
        self.entries.iter()
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of handlers
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether another registration would fail
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Invoke the first handler registered for `id`
    ///
    /// Returns whether one was found. The handler has returned by the time
    /// this does.
    pub fn dispatch<T: UartTx>(&mut self, id: u16, payload: &[u8], link: &mut Link<'_, T>) -> bool
    where
        H: Handler<T>,
    {
        match self.get_mut(id) {
            Some(handler) => {
                handler.call(payload, link);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    struct Null;

    impl UartTx for Null {
        fn write_blocking(&mut self, _data: &[u8]) {}
    }

    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        tag: u8,
        calls: Vec<(u8, usize), 4>,
    }

    impl Recorder {
        fn tagged(tag: u8) -> Self {
            Self {
                tag,
                calls: Vec::new(),
            }
        }
    }

    impl<T: UartTx> Handler<T> for Recorder {
        fn call(&mut self, payload: &[u8], _link: &mut Link<'_, T>) {
            let _ = self.calls.push((self.tag, payload.len()));
        }
    }

    fn dispatch(registry: &mut Registry<Recorder, 3>, id: u16, payload: &[u8]) -> bool {
        let mut tx = Null;
        let config = EngineConfig::default();
        let mut link = Link::new(&mut tx, &config, registry.capacity());
        registry.dispatch(id, payload, &mut link)
    }

    #[test]
    fn test_register_until_full() {
        let mut registry: Registry<Recorder, 3> = Registry::new();
        assert!(registry.is_empty());

        for id in 0..3 {
            registry.register(id, Recorder::tagged(id as u8)).unwrap();
        }

        assert!(registry.is_full());
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.register(9, Recorder::default()),
            Err(RegistryError::Full)
        );
        assert!(!registry.contains(9));
    }

    #[test]
    fn test_dispatch_passes_payload_length() {
        let mut registry: Registry<Recorder, 3> = Registry::new();
        registry.register(0x0010, Recorder::tagged(1)).unwrap();

        assert!(dispatch(&mut registry, 0x0010, &[1, 2, 3]));
        assert!(dispatch(&mut registry, 0x0010, &[]));

        let calls = &registry.get(0x0010).unwrap().calls;
        assert_eq!(&calls[..], &[(1, 3), (1, 0)]);
    }

    #[test]
    fn test_dispatch_unknown_id() {
        let mut registry: Registry<Recorder, 3> = Registry::new();
        registry.register(0x0010, Recorder::tagged(1)).unwrap();

        assert!(!dispatch(&mut registry, 0x0011, &[1]));
        assert!(registry.get(0x0010).unwrap().calls.is_empty());
    }

    #[test]
    fn test_duplicate_id_first_registration_wins() {
        let mut registry: Registry<Recorder, 3> = Registry::new();
        registry.register(0x0020, Recorder::tagged(1)).unwrap();
        registry.register(0x0020, Recorder::tagged(2)).unwrap();

        assert!(dispatch(&mut registry, 0x0020, &[0]));

        let tags: Vec<u8, 3> = registry
            .iter()
            .map(|entry| entry.handler.calls.len() as u8)
            .collect();
        assert_eq!(&tags[..], &[1, 0]);
    }

    #[test]
    fn test_lookup_uses_raw_id() {
        let mut registry: Registry<Recorder, 3> = Registry::new();
        registry.register(0x0001, Recorder::tagged(1)).unwrap();

        // Ack flag is part of the id as far as lookup is concerned
        assert!(!dispatch(&mut registry, 0x8001, &[]));
    }
}
