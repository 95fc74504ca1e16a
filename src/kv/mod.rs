//! Local key-value persistence for client state.
//!
//! Values are opaque bytes. Callers own the encoding and replace a key's value
//! wholesale on every write.

pub mod fjall_impl;
pub mod mem_impl;

pub use fjall_impl::FjallBackend;
pub use mem_impl::MemBackend;

pub trait KvBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Self::Error>;
}

impl<B: KvBackend + ?Sized> KvBackend for &B {
    type Error = B::Error;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}
