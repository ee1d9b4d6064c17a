use crate::clients::CategoriaClient;
use crate::model::Categoria;
use resource_framework::ResourceStore;

/// Categories use the generic store unchanged.
pub type CategoriaStore = ResourceStore<Categoria, CategoriaClient>;
