use async_trait::async_trait;
use tokio::sync::RwLock;

use shared::{
    domain::{Address, AddressId},
    error::StoreError,
};

/// CRUD contract over the canonical address collection. Every operation is
/// suspending so a network-backed implementation can slot in behind the same
/// contract; the in-memory mock resolves immediately.
#[async_trait]
pub trait AddressBookStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Address>, StoreError>;
    async fn create(&self, address: Address) -> Result<Address, StoreError>;
    async fn update(&self, address: Address) -> Result<(), StoreError>;
    async fn delete(&self, id: AddressId) -> Result<(), StoreError>;
}

/// Mock backing store holding the canonical collection in process memory.
/// New entries go to the front so the most recent addition lists first.
pub struct InMemoryAddressBook {
    addresses: RwLock<Vec<Address>>,
}

impl InMemoryAddressBook {
    pub fn new() -> Self {
        Self {
            addresses: RwLock::new(Vec::new()),
        }
    }

    /// Store preloaded with the demo dataset.
    pub fn with_seed_entries() -> Self {
        Self {
            addresses: RwLock::new(seed_entries()),
        }
    }
}

impl Default for InMemoryAddressBook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressBookStore for InMemoryAddressBook {
    async fn list(&self) -> Result<Vec<Address>, StoreError> {
        Ok(self.addresses.read().await.clone())
    }

    async fn create(&self, address: Address) -> Result<Address, StoreError> {
        let mut addresses = self.addresses.write().await;
        addresses.insert(0, address.clone());
        Ok(address)
    }

    async fn update(&self, address: Address) -> Result<(), StoreError> {
        let mut addresses = self.addresses.write().await;
        let Some(existing) = addresses.iter_mut().find(|entry| entry.id == address.id) else {
            return Err(StoreError::NotFound(address.id));
        };
        *existing = address;
        Ok(())
    }

    async fn delete(&self, id: AddressId) -> Result<(), StoreError> {
        // Deleting an absent id is benign; the collection is simply unchanged.
        let mut addresses = self.addresses.write().await;
        addresses.retain(|entry| entry.id != id);
        Ok(())
    }
}

/// Null-object store for wiring states where no backing store is available.
/// Every operation fails with a backend error.
pub struct UnavailableAddressBook;

#[async_trait]
impl AddressBookStore for UnavailableAddressBook {
    async fn list(&self) -> Result<Vec<Address>, StoreError> {
        Err(StoreError::backend("address book backing store is unavailable"))
    }

    async fn create(&self, _address: Address) -> Result<Address, StoreError> {
        Err(StoreError::backend("address book backing store is unavailable"))
    }

    async fn update(&self, _address: Address) -> Result<(), StoreError> {
        Err(StoreError::backend("address book backing store is unavailable"))
    }

    async fn delete(&self, _id: AddressId) -> Result<(), StoreError> {
        Err(StoreError::backend("address book backing store is unavailable"))
    }
}

/// The mock dataset shipped with the original address book.
pub fn seed_entries() -> Vec<Address> {
    let phone = |number: &str| Some(number.to_string());
    vec![
        Address::new("Ash", "Ketchum", phone("07812378410")),
        Address::new("Spongebob", "SquarePants", phone("9992221112")),
        Address::new("Patrick", "Star", phone("9992221112")),
        Address::new("Samus", "Aran", phone("9992221112")),
        Address::new("Ronald", "Weasley", phone("9992221112")),
        Address::new("Howl", "Pendragon", phone("9992221112")),
        Address::new("Adol", "Kristin", None),
        Address::new("Frodo", "Baggins", phone("9992221112")),
        Address::new("Hiccup", "Horrendous", phone("9992221112")),
        Address::new("Nancy", "Wheeler", phone("9992221112")),
        Address::new("Toph", "Beifong", phone("9992221112")),
        Address::new("Clark", "Kent", phone("9992221112")),
        Address::new("Mario", "Mario", phone("9992221112")),
        Address::new("Thor", "Odinson", phone("9992221112")),
        Address::new("Dionysus", "Zagreus", phone("9992221112")),
        Address::new("Nyota", "Uhura", phone("9992221112")),
    ]
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
