use resource_framework::ApiEntity;
use serde::{Deserialize, Serialize};

string_id!(CategoriaId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: CategoriaId,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    /// Names of the extra fields products in this category carry.
    #[serde(default)]
    pub campos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoriaId>,
    pub titulo: String,
    pub descripcion: String,
    pub campos: Vec<String>,
}

impl ApiEntity for Categoria {
    type Id = CategoriaId;
    type Create = CategoriaModify;
    type Update = CategoriaModify;

    const BASE_PATH: &'static str = "/admin/categoria";
    const NAME: &'static str = "categoria";
    const PLURAL: &'static str = "categorias";

    fn id(&self) -> Option<&CategoriaId> {
        Some(&self.id)
    }
}
