use std::path::Path;

use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};

use super::KvBackend;

const PARTITION: &str = "history";

/// On-disk backend, one `fjall` keyspace per data directory.
pub struct FjallBackend {
    keyspace: Keyspace,
    values: PartitionHandle,
}

impl FjallBackend {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, fjall::Error> {
        let keyspace = fjall::Config::new(path).open()?;
        let values = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;

        Ok(Self { keyspace, values })
    }
}

impl KvBackend for FjallBackend {
    type Error = fjall::Error;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let value = self.values.get(key)?;
        Ok(value.map(|value| value.to_vec()))
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Self::Error> {
        self.values.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)
    }
}
