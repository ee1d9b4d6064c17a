use super::{CategoriaId, UserId};
use resource_framework::ApiEntity;
use serde::{Deserialize, Serialize};

string_id!(
    /// Server-assigned product identifier.
    ProductoId
);

/// Condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Estado {
    Nuevo,
    ComoNuevo,
    BuenEstado,
    Aceptable,
    Usado,
    Reparado,
    ReparacionesNecesarias,
    #[default]
    Desconocido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Moneda {
    #[default]
    Eur,
    Usd,
    Gbp,
    Jpy,
    Cny,
    Inr,
    Rub,
    Brl,
    Ars,
    Clp,
}

/// A product listing as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: ProductoId,
    pub id_usuario: UserId,
    pub id_categoria: CategoriaId,
    #[serde(default)]
    pub imagenes: Vec<String>,
    #[serde(default)]
    pub marca: String,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub estado: Estado,
    pub precio_centimos: i64,
    #[serde(default)]
    pub moneda: Moneda,
    pub stock: u32,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    pub fecha_modificacion: Option<String>,
    #[serde(default)]
    pub fecha_publicacion: Option<String>,
    #[serde(default)]
    pub fecha_baja: Option<String>,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub activo: bool,
    #[serde(default)]
    pub destacado: bool,
}

/// Create / update payload. Same shape as [`Producto`], id optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductoId>,
    pub id_usuario: UserId,
    pub id_categoria: CategoriaId,
    pub imagenes: Vec<String>,
    pub marca: String,
    pub titulo: String,
    pub descripcion: String,
    pub estado: Estado,
    pub precio_centimos: i64,
    pub moneda: Moneda,
    pub stock: u32,
    pub fecha_creacion: Option<String>,
    pub fecha_modificacion: Option<String>,
    pub fecha_publicacion: Option<String>,
    pub fecha_baja: Option<String>,
    pub direccion: String,
    pub activo: bool,
    pub destacado: bool,
}

impl From<&Producto> for ProductoModify {
    fn from(p: &Producto) -> Self {
        Self {
            id: Some(p.id.clone()),
            id_usuario: p.id_usuario.clone(),
            id_categoria: p.id_categoria.clone(),
            imagenes: p.imagenes.clone(),
            marca: p.marca.clone(),
            titulo: p.titulo.clone(),
            descripcion: p.descripcion.clone(),
            estado: p.estado,
            precio_centimos: p.precio_centimos,
            moneda: p.moneda,
            stock: p.stock,
            fecha_creacion: p.fecha_creacion.clone(),
            fecha_modificacion: p.fecha_modificacion.clone(),
            fecha_publicacion: p.fecha_publicacion.clone(),
            fecha_baja: p.fecha_baja.clone(),
            direccion: p.direccion.clone(),
            activo: p.activo,
            destacado: p.destacado,
        }
    }
}

/// Stock left after selling `requested` units.
///
/// The sold quantity is clamped to what is available, so the result never
/// goes below zero: `max(0, stock - min(requested, stock))`.
pub fn stock_after_sale(stock: u32, requested: u32) -> u32 {
    stock.saturating_sub(requested.min(stock))
}

impl ApiEntity for Producto {
    type Id = ProductoId;
    type Create = ProductoModify;
    type Update = ProductoModify;

    const BASE_PATH: &'static str = "/vendedor/producto";
    const NAME: &'static str = "producto";
    const PLURAL: &'static str = "productos";

    fn id(&self) -> Option<&ProductoId> {
        Some(&self.id)
    }
}
