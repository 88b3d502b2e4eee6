//! Product table access.

use crate::products::model::{NewProduct, Product};
use crate::store::{StoreClient, StoreResult};

const ID_COLUMN: &str = "id";

/// Typed access to the product table.
#[derive(Clone)]
pub struct ProductRepository {
    store: StoreClient,
    table: String,
}

impl ProductRepository {
    pub fn new(store: StoreClient, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        self.store.table(&self.table).select_all().await
    }

    pub async fn create(&self, product: &NewProduct) -> StoreResult<Vec<Product>> {
        self.store.table(&self.table).insert(product).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<Vec<Product>> {
        self.store
            .table(&self.table)
            .delete_eq(ID_COLUMN, &id.to_string())
            .await
    }

    /// Replace every field of the row identified by `product.id`.
    pub async fn update(&self, product: &Product) -> StoreResult<Vec<Product>> {
        self.store
            .table(&self.table)
            .update_eq(ID_COLUMN, &product.id.to_string(), product)
            .await
    }
}
