//! # Categoria Client
//!
//! Admin-only category endpoints. Nothing beyond the standard five.
use crate::model::Categoria;
use async_trait::async_trait;
use resource_framework::{CrudService, ResourceClient};

#[derive(Clone)]
pub struct CategoriaClient {
    inner: ResourceClient<Categoria>,
}

impl CategoriaClient {
    pub fn new(inner: ResourceClient<Categoria>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CrudService<Categoria> for CategoriaClient {
    fn inner(&self) -> &ResourceClient<Categoria> {
        &self.inner
    }
}
