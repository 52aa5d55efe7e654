//! Product catalog endpoints.

use mall_common::{Page, PageRequest, Product, ProductCreate, ProductId};

use crate::{ClientResult, Connection};

/// Create a product listing. Seller session required.
pub async fn create(conn: &Connection, request: &ProductCreate) -> ClientResult<Product> {
    conn.post("/seller/products", request).await
}

/// Fetch one product. Any authenticated session.
pub async fn get(conn: &Connection, id: ProductId) -> ClientResult<Product> {
    conn.get(&format!("/products/{id}")).await
}

/// List products, paginated. Any authenticated session.
pub async fn list(conn: &Connection, page: PageRequest) -> ClientResult<Page<Product>> {
    conn.get_query("/products", &page).await
}
