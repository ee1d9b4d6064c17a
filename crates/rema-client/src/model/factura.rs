use super::{ChatId, ProductoId, UserId};
use resource_framework::ApiEntity;
use serde::{Deserialize, Serialize};

string_id!(FacturaId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstadoFactura {
    #[default]
    Pendiente,
    Pagada,
    Cancelada,
}

/// Invoice for one sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factura {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FacturaId>,
    pub id_producto: ProductoId,
    pub id_comprador: UserId,
    pub id_vendedor: UserId,
    pub cantidad: u32,
    pub precio_centimos: i64,
    #[serde(default)]
    pub iva: f64,
    #[serde(default)]
    pub moneda: String,
    #[serde(default)]
    pub estado: EstadoFactura,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_emision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_pago: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notas_adicionales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_chat: Option<ChatId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo_producto: Option<String>,
}

/// A closed sale the server turns into an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub producto: ProductoId,
    pub comprador: UserId,
    pub vendedor: UserId,
    pub cantidad: u32,
    pub chat: ChatId,
}

impl ApiEntity for Factura {
    type Id = FacturaId;
    type Create = Factura;
    /// Invoices are immutable once issued.
    type Update = ();

    const BASE_PATH: &'static str = "/api/factura";
    const NAME: &'static str = "factura";
    const PLURAL: &'static str = "facturas";

    fn id(&self) -> Option<&FacturaId> {
        self.id.as_ref()
    }
}
