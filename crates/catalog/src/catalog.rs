//! In-memory catalog: ordered records plus keyed lookups.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use subtrack_core::{DomainError, DomainResult, Entity};

use crate::records::{CatalogItem, School, Store};

/// School code embedded in invoice numbers when the school is not listed.
pub const GENERIC_SCHOOL_CODE: &str = "GEN000";

/// Read-only lookup tables keyed by string codes.
///
/// Records keep their source order: `items()` is the canonical menu order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    stores: Vec<Store>,
    schools: Vec<School>,
    item_index: HashMap<String, usize>,
    store_index: HashMap<String, usize>,
    school_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate keys and negative prices.
    pub fn new(
        items: Vec<CatalogItem>,
        stores: Vec<Store>,
        schools: Vec<School>,
    ) -> DomainResult<Self> {
        if let Some(item) = items.iter().find(|i| i.unit_price.is_negative()) {
            return Err(DomainError::validation(format!(
                "menu item {} has a negative price",
                item.code
            )));
        }

        {
            let mut codes = HashSet::new();
            if let Some(dup) = schools
                .iter()
                .filter(|s| !s.code.is_empty())
                .find(|s| !codes.insert(s.code.as_str()))
            {
                return Err(DomainError::validation(format!(
                    "duplicate school code {}",
                    dup.code
                )));
            }
        }

        Ok(Self {
            item_index: index_by_key(&items, "menu item code")?,
            store_index: index_by_key(&stores, "store key")?,
            school_index: index_by_key(&schools, "school name")?,
            items,
            stores,
            schools,
        })
    }

    /// Menu items in canonical order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn menu_codes(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.code.as_str())
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn menu_item(&self, code: &str) -> DomainResult<&CatalogItem> {
        self.item_index
            .get(code)
            .map(|&i| &self.items[i])
            .ok_or_else(|| DomainError::not_found("menu item", code))
    }

    pub fn store(&self, key: &str) -> DomainResult<&Store> {
        self.store_index
            .get(key)
            .map(|&i| &self.stores[i])
            .ok_or_else(|| DomainError::not_found("store", key))
    }

    pub fn find_school(&self, name: &str) -> Option<&School> {
        self.school_index.get(name).map(|&i| &self.schools[i])
    }

    /// School record by name; unknown names yield an empty record.
    pub fn school(&self, name: &str) -> Cow<'_, School> {
        match self.find_school(name) {
            Some(school) => Cow::Borrowed(school),
            None => Cow::Owned(School::unlisted(name)),
        }
    }

    /// The school's invoice code, or [`GENERIC_SCHOOL_CODE`] when unknown.
    pub fn school_code(&self, name: &str) -> &str {
        match self.find_school(name) {
            Some(school) if !school.code.is_empty() => &school.code,
            _ => GENERIC_SCHOOL_CODE,
        }
    }
}

fn index_by_key<E>(records: &[E], what: &str) -> DomainResult<HashMap<String, usize>>
where
    E: Entity<Id = String>,
{
    let mut index = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if index.insert(record.id().clone(), pos).is_some() {
            return Err(DomainError::validation(format!(
                "duplicate {what} {}",
                record.id()
            )));
        }
    }
    Ok(index)
}
