//! Catalog records: menu items, stores and schools.

use serde::{Deserialize, Serialize};

use subtrack_core::{Entity, Money};

/// Menu item with its unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub code: String,
    pub label: String,
    pub unit_price: Money,
}

impl Entity for CatalogItem {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

/// Store that prepares and delivers orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Entity for Store {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

/// School receiving deliveries.
///
/// Every contact field may be empty: unknown schools are represented by a
/// default record rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct School {
    pub name: String,
    pub code: String,
    pub manager_name: String,
    pub phone: String,
    pub address: String,
    pub contact_name: String,
    pub contact_email: String,
    /// Free text such as `"Monday @ 10:30-11:00 AM"`.
    pub delivery_time_description: String,
}

impl School {
    /// Placeholder record for a school that is not in the catalog.
    pub fn unlisted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Time part of the delivery description (`"10:30-11:00 AM"`).
    ///
    /// Falls back to the raw text when there is no `@` separator.
    pub fn delivery_time_only(&self) -> &str {
        match self.delivery_time_description.split_once('@') {
            Some((_, time)) => time.trim(),
            None => &self.delivery_time_description,
        }
    }
}

impl Entity for School {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
