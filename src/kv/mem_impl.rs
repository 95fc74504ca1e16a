use core::convert::Infallible;
use core::fmt;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::KvBackend;

#[derive(Default)]
pub struct MemBackend {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for MemBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let mut map = f.debug_map();
        for (key, value) in values.iter() {
            let len = value.len().min(64);
            let printed = String::from_utf8_lossy(&value[..len]);
            map.entry(
                key,
                &format_args!(
                    "{printed:?}{}",
                    if len < value.len() { "…" } else { "" }
                ),
            );
        }
        map.finish()
    }
}

impl KvBackend for MemBackend {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Self::Error> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.into(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_backend() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("history").unwrap(), None);

        backend.set("history", b"[]".to_vec()).unwrap();
        backend.set("history", b"[1]".to_vec()).unwrap();
        assert_eq!(backend.get("history").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(backend.get("other").unwrap(), None);

        dbg!(&backend);
    }
}
