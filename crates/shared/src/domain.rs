use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an address-book entry. Assigned once at creation and
/// never reassigned afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressId(pub Uuid);

impl AddressId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub name: String,
    pub surname: String,
    pub phone_number: Option<String>,
}

impl Address {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            id: AddressId::generate(),
            name: name.into(),
            surname: surname.into(),
            phone_number,
        }
    }
}

/// Payload produced by an editing surface. A missing `id` means the entry is
/// new; an `id` matching an existing entry means an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDraft {
    pub id: Option<AddressId>,
    pub name: String,
    pub surname: String,
    pub phone_number: Option<String>,
}

impl AddressDraft {
    /// Resolves the draft into a full entry, generating an id when absent.
    pub fn into_address(self) -> Address {
        Address {
            id: self.id.unwrap_or_else(AddressId::generate),
            name: self.name,
            surname: self.surname,
            phone_number: self.phone_number,
        }
    }
}

impl From<Address> for AddressDraft {
    fn from(value: Address) -> Self {
        Self {
            id: Some(value.id),
            name: value.name,
            surname: value.surname,
            phone_number: value.phone_number,
        }
    }
}
