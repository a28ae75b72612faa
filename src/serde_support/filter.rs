//! `Serialize` / `Deserialize` for [`Filter`].
//!
//! Filters go through an intermediate struct carrying the slot layout,
//! shape, hasher name, and the same slot payload bytes the binary format
//! uses. Deserialization runs the constructor's validation, checks the
//! payload length, and refuses a hasher other than the one requested.

use crate::core::{params, Filter, SlotStore, Strategy};
use crate::hash::{BloomHasher, HashScheme};
use serde::{de, ser};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialization format version.
const FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct FilterSerde {
    version: u16,
    strategy: Strategy,
    size: usize,
    hash_count: u32,
    hasher: String,
    slots: Vec<u8>,
}

impl FilterSerde {
    fn from_filter<S: SlotStore, H: BloomHasher>(
        filter: &Filter<S, H>,
    ) -> std::io::Result<Self> {
        let mut slots = Vec::with_capacity(S::STRATEGY.payload_len(filter.size()));
        filter.with_slots(|store| store.write_slots(&mut slots))?;

        Ok(Self {
            version: FORMAT_VERSION,
            strategy: S::STRATEGY,
            size: filter.size(),
            hash_count: filter.hash_count(),
            hasher: filter.scheme().hasher().name().to_string(),
            slots,
        })
    }

    fn into_filter<S: SlotStore, H: BloomHasher + Default>(
        self,
    ) -> Result<Filter<S, H>, String> {
        if self.version != FORMAT_VERSION {
            return Err(format!(
                "incompatible serialization version: expected {}, got {}",
                FORMAT_VERSION, self.version
            ));
        }

        if self.strategy != S::STRATEGY {
            return Err(format!(
                "expected {} filter, found {}",
                S::STRATEGY,
                self.strategy
            ));
        }

        params::validate(self.size, self.hash_count).map_err(|e| e.to_string())?;

        let hasher = H::default();
        if self.hasher != hasher.name() {
            return Err(format!(
                "hasher mismatch: serialized with '{}', deserializing with '{}'",
                self.hasher,
                hasher.name()
            ));
        }

        let expected = self.strategy.payload_len(self.size);
        if self.slots.len() != expected {
            return Err(format!(
                "slot payload is {} bytes, expected {}",
                self.slots.len(),
                expected
            ));
        }

        let store =
            S::read_slots(self.size, &mut self.slots.as_slice()).map_err(|e| e.to_string())?;

        Ok(Filter::from_store(
            store,
            HashScheme::with_hasher(self.hash_count, hasher),
        ))
    }
}

impl<S: SlotStore, H: BloomHasher> Serialize for Filter<S, H> {
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        FilterSerde::from_filter(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, S: SlotStore, H: BloomHasher + Default> Deserialize<'de> for Filter<S, H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FilterSerde::deserialize(deserializer)?
            .into_filter()
            .map_err(de::Error::custom)
    }
}
