//! # Supplier Repository
//!
//! Supplier directory for the inventory screens. Products reference a
//! supplier by id, but the link is informational: deleting a supplier does
//! not touch the catalog.

use std::sync::Arc;

use ranil_core::validation::validate_supplier;
use ranil_core::Supplier;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Tables;

/// Repository for suppliers.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    tables: Arc<Tables>,
}

impl SupplierRepository {
    pub(crate) fn new(tables: Arc<Tables>) -> Self {
        SupplierRepository { tables }
    }

    pub fn get_by_id(&self, id: &str) -> Option<Supplier> {
        self.tables
            .suppliers
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn list(&self) -> Vec<Supplier> {
        self.tables.suppliers.read().clone()
    }

    /// Inserts a validated supplier.
    pub fn insert(&self, supplier: Supplier) -> StoreResult<Supplier> {
        validate_supplier(&supplier)?;

        let mut suppliers = self.tables.suppliers.write();
        if suppliers.iter().any(|s| s.id == supplier.id) {
            return Err(StoreError::duplicate("supplier id", &supplier.id));
        }

        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");
        suppliers.push(supplier.clone());
        Ok(supplier)
    }

    pub fn update(&self, supplier: Supplier) -> StoreResult<()> {
        validate_supplier(&supplier)?;

        let mut suppliers = self.tables.suppliers.write();
        let slot = suppliers
            .iter_mut()
            .find(|s| s.id == supplier.id)
            .ok_or_else(|| StoreError::not_found("Supplier", &supplier.id))?;

        debug!(id = %supplier.id, "Updating supplier");
        *slot = supplier;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> StoreResult<Supplier> {
        let mut suppliers = self.tables.suppliers.write();
        let index = suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Supplier", id))?;

        debug!(id = %id, "Deleting supplier");
        Ok(suppliers.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Store, StoreConfig};

    use super::*;

    fn supplier(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: "Agro Vet Solutions".to_string(),
            contact: "0773456789".to_string(),
            email: "contact@agrovet.lk".to_string(),
        }
    }

    #[test]
    fn test_crud() {
        let repo = Store::new(StoreConfig::empty()).unwrap().suppliers();

        repo.insert(supplier("5")).unwrap();
        assert!(matches!(
            repo.insert(supplier("5")),
            Err(StoreError::Duplicate { .. })
        ));

        let mut edited = supplier("5");
        edited.contact = "0779999999".to_string();
        repo.update(edited).unwrap();
        assert_eq!(repo.get_by_id("5").unwrap().contact, "0779999999");

        repo.delete("5").unwrap();
        assert!(repo.list().is_empty());
        assert!(repo.update(supplier("5")).is_err());
    }

    #[test]
    fn test_rejects_bad_email() {
        let repo = Store::new(StoreConfig::empty()).unwrap().suppliers();

        let mut bad = supplier("6");
        bad.email = "agrovet".to_string();
        assert!(matches!(
            repo.insert(bad),
            Err(StoreError::Validation(_))
        ));
    }
}
