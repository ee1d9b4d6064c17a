use super::{ProductoId, UserId};
use chrono::{DateTime, SecondsFormat, Utc};
use resource_framework::ApiEntity;
use serde::{Deserialize, Serialize};

string_id!(ChatId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mensaje {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub id_emisor: UserId,
    /// Set by the server on arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha: Option<String>,
    pub mensaje: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leido: Option<bool>,
}

impl Mensaje {
    /// An unread outgoing message.
    pub fn new(id_emisor: UserId, mensaje: impl Into<String>) -> Self {
        Self {
            id: None,
            id_emisor,
            fecha: None,
            mensaje: mensaje.into(),
            leido: Some(false),
        }
    }
}

/// Conversation between a buyer and a seller about one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ChatId>,
    pub id_producto: ProductoId,
    pub id_comprador: UserId,
    pub id_vendedor: UserId,
    #[serde(default)]
    pub mensajes: Vec<Mensaje>,
    #[serde(default)]
    pub fecha_creacion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultima_actualizacion: Option<String>,
    #[serde(default)]
    pub activo: bool,
}

impl Chat {
    /// A new, empty, active chat stamped `now`.
    pub fn open(
        id_producto: ProductoId,
        id_comprador: UserId,
        id_vendedor: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            id: None,
            id_producto,
            id_comprador,
            id_vendedor,
            mensajes: Vec::new(),
            fecha_creacion: stamp.clone(),
            ultima_actualizacion: Some(stamp),
            activo: true,
        }
    }

    /// The participant that is not `me`. Without `me`, the seller.
    pub fn partner_of(&self, me: Option<&UserId>) -> &UserId {
        match me {
            Some(me) if *me == self.id_comprador => &self.id_vendedor,
            Some(_) => &self.id_comprador,
            None => &self.id_vendedor,
        }
    }
}

impl ApiEntity for Chat {
    type Id = ChatId;
    type Create = Chat;
    /// Chats are never updated wholesale, only appended to.
    type Update = ();

    const BASE_PATH: &'static str = "/api/chat";
    const NAME: &'static str = "chat";
    const PLURAL: &'static str = "chats";

    fn id(&self) -> Option<&ChatId> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chat() -> Chat {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        Chat::open("p1".into(), "buyer".into(), "seller".into(), now)
    }

    #[test]
    fn test_open_chat_is_active_and_stamped() {
        let chat = chat();
        assert!(chat.activo);
        assert!(chat.mensajes.is_empty());
        assert_eq!(chat.fecha_creacion, "2024-05-01T10:30:00.000Z");

        let wire = serde_json::to_value(&chat).unwrap();
        assert!(wire.get("id").is_none());
        assert_eq!(wire["idComprador"], "buyer");
    }

    #[test]
    fn test_partner_of() {
        let chat = chat();
        assert_eq!(chat.partner_of(Some(&"buyer".into())).as_str(), "seller");
        assert_eq!(chat.partner_of(Some(&"seller".into())).as_str(), "buyer");
        assert_eq!(chat.partner_of(None).as_str(), "seller");
    }
}
