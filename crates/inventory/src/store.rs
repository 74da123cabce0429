//! In-memory product store: the single point of mutation for product records.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use stockledger_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{MAX_QUANTITY, Product, ProductFields, ProductForm};

/// Ordered collection of product records.
///
/// Insertion order is display order. Each mutation validates first and then
/// changes the collection under a single write lock, so a reader never sees a
/// half-applied update.
#[derive(Debug, Default)]
pub struct InventoryStore {
    products: RwLock<Vec<Product>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations never panic while holding the lock, so a poisoned lock still
    // guards a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parse and validate a form, then append a new record with a fresh id.
    pub fn create(&self, form: &ProductForm) -> DomainResult<Product> {
        self.create_fields(form.parse()?)
    }

    /// Typed variant of [`InventoryStore::create`].
    pub fn create_fields(&self, fields: ProductFields) -> DomainResult<Product> {
        let product = Product::new(fields.validate()?);
        self.write().push(product.clone());

        info!(
            product_id = %product.id(),
            name = product.name(),
            quantity = product.quantity(),
            "product created"
        );
        Ok(product)
    }

    /// Replace the quantity of a record.
    ///
    /// A negative target is declined: the record is returned unchanged and no
    /// error is raised. Targets above [`MAX_QUANTITY`] are clamped to it.
    pub fn set_quantity(&self, id: ProductId, new_quantity: i64) -> DomainResult<Product> {
        let mut products = self.write();
        let product = find_mut(&mut products, id)?;

        match u64::try_from(new_quantity) {
            Ok(requested) => {
                let quantity = requested.min(MAX_QUANTITY);
                product.set_quantity(quantity);
                debug!(product_id = %id, quantity, "quantity set");
            }
            Err(_) => {
                debug!(product_id = %id, requested = new_quantity, "negative quantity ignored");
            }
        }
        Ok(product.clone())
    }

    /// Add `delta` to the current quantity, flooring the result at zero and
    /// capping it at [`MAX_QUANTITY`].
    pub fn adjust_quantity(&self, id: ProductId, delta: i64) -> DomainResult<Product> {
        let mut products = self.write();
        let product = find_mut(&mut products, id)?;

        let current = product.quantity();
        let quantity = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs()).min(MAX_QUANTITY)
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        product.set_quantity(quantity);

        debug!(product_id = %id, delta, from = current, to = quantity, "quantity adjusted");
        Ok(product.clone())
    }

    /// Full-record replace of name, prices and quantity. The id is preserved.
    pub fn edit(&self, id: ProductId, form: &ProductForm) -> DomainResult<Product> {
        // An unknown id wins over invalid fields.
        self.ensure_exists(id)?;
        self.edit_fields(id, form.parse()?)
    }

    /// Typed variant of [`InventoryStore::edit`].
    pub fn edit_fields(&self, id: ProductId, fields: ProductFields) -> DomainResult<Product> {
        let mut products = self.write();
        let product = find_mut(&mut products, id)?;
        product.replace_fields(fields.validate()?);

        info!(product_id = %id, name = product.name(), "product edited");
        Ok(product.clone())
    }

    /// Remove a record. Deleting the same id twice fails the second time.
    pub fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut products = self.write();
        let index = products
            .iter()
            .position(|p| *p.id() == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        let removed = products.remove(index);

        info!(product_id = %id, name = removed.name(), "product deleted");
        Ok(())
    }

    /// Snapshot of every record in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn get(&self, id: ProductId) -> DomainResult<Product> {
        self.read()
            .iter()
            .find(|p| *p.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(id))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn ensure_exists(&self, id: ProductId) -> DomainResult<()> {
        if self.read().iter().any(|p| *p.id() == id) {
            Ok(())
        } else {
            Err(DomainError::not_found(id))
        }
    }
}

fn find_mut(products: &mut [Product], id: ProductId) -> DomainResult<&mut Product> {
    products
        .iter_mut()
        .find(|p| *p.id() == id)
        .ok_or_else(|| DomainError::not_found(id))
}
