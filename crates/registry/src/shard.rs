//! Identity-keyed sharded map
//!
//! Fixed shard count, identity hashed to a shard. Closures run with the
//! shard lock held, so callers must not block inside them; every operation
//! the registry exposes is a short map touch.

use sentra_domain::Identity;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;

const SHARD_COUNT: usize = 16;

pub(crate) struct ShardedMap<V> {
    shards: Vec<RwLock<HashMap<Identity, V>>>,
}

impl<V> ShardedMap<V> {
    pub fn new() -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| RwLock::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    fn shard(&self, identity: &Identity) -> &RwLock<HashMap<Identity, V>> {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    /// Run `f` against the entry for `identity` under the shard read lock.
    pub fn read<R>(&self, identity: &Identity, f: impl FnOnce(Option<&V>) -> R) -> R {
        let shard = self.shard(identity).read().expect("shard lock");
        f(shard.get(identity))
    }

    /// Run `f` against the whole shard map under the shard write lock.
    pub fn write<R>(&self, identity: &Identity, f: impl FnOnce(&mut HashMap<Identity, V>) -> R) -> R {
        let mut shard = self.shard(identity).write().expect("shard lock");
        f(&mut shard)
    }
}
