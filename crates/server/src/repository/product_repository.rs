use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mercado_core::domain::{NewProduct, Product, ProductChanges, ProductId, ProductRecord, Timestamp};
use mercado_core::store::{Collection, DocumentStore};

use super::documents::Documents;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, new_product: NewProduct) -> Result<ProductRecord>;
    /// `None` when no product has ever been stored.
    async fn list(&self) -> Result<Option<Vec<ProductRecord>>>;
    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<ProductRecord>>;
    async fn update(
        &self,
        product_id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>>;
    async fn delete(&self, product_id: &ProductId) -> Result<bool>;
}

pub struct StoreProductRepository {
    documents: Documents<Product>,
}

impl StoreProductRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: Documents::new(store, Collection::Products),
        }
    }

    fn map_entry((key, product): (String, Product)) -> ProductRecord {
        ProductRecord {
            id: ProductId::from(key),
            product,
        }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<ProductRecord> {
        let product = new_product.publish(Timestamp::now());
        let key = self.documents.insert(&product).await?;

        Ok(Self::map_entry((key, product)))
    }

    async fn list(&self) -> Result<Option<Vec<ProductRecord>>> {
        let entries = self.documents.all().await?;
        Ok(entries.map(|entries| entries.into_iter().map(Self::map_entry).collect()))
    }

    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<ProductRecord>> {
        let product = self.documents.get(product_id.as_str()).await?;
        Ok(product.map(|product| ProductRecord {
            id: product_id.clone(),
            product,
        }))
    }

    async fn update(
        &self,
        product_id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>> {
        let product = self.documents.merge(product_id.as_str(), &changes).await?;
        Ok(product.map(|product| ProductRecord {
            id: product_id.clone(),
            product,
        }))
    }

    async fn delete(&self, product_id: &ProductId) -> Result<bool> {
        self.documents.remove(product_id.as_str()).await
    }
}
