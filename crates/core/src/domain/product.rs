use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{ProductId, Timestamp, UserId};

/// Product document as stored under `productos/{id}`.
///
/// Every field is optional on read: stored records are not guaranteed to
/// carry the server-set fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub precio: Option<Number>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub fecha_publicacion: Option<Timestamp>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub nombre: String,
    pub descripcion: String,
    pub precio: Number,
    pub foto_url: String,
    pub usuario_id: UserId,
}

impl NewProduct {
    pub fn publish(self, fecha_publicacion: Timestamp) -> Product {
        Product {
            nombre: Some(self.nombre),
            descripcion: Some(self.descripcion),
            precio: Some(self.precio),
            foto_url: Some(self.foto_url),
            fecha_publicacion: Some(fecha_publicacion),
            usuario_id: Some(self.usuario_id),
        }
    }
}

/// Mutable product fields. Serializes to the partial document sent to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductChanges {
    pub nombre: String,
    pub descripcion: String,
    pub precio: Number,
    pub foto_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        NewProduct {
            nombre: "Mesa".to_string(),
            descripcion: "Mesa de madera".to_string(),
            precio: Number::from(50),
            foto_url: "http://x/y.jpg".to_string(),
            usuario_id: UserId::from("u1"),
        }
        .publish(Timestamp::now())
    }

    #[test]
    fn change_set_leaves_owner_and_publication_date_out() {
        let changes = ProductChanges {
            nombre: "Silla".to_string(),
            descripcion: "Silla plegable".to_string(),
            precio: Number::from(0),
            foto_url: "http://x/z.jpg".to_string(),
        };

        let json = serde_json::to_value(changes).expect("changes should serialize");
        assert!(json.get("usuario_id").is_none());
        assert!(json.get("fecha_publicacion").is_none());
        assert_eq!(json["precio"], serde_json::json!(0));
    }

    #[test]
    fn integer_price_keeps_its_json_form() {
        let json = serde_json::to_value(sample()).expect("product should serialize");
        assert_eq!(json["precio"], serde_json::json!(50));
    }

    #[test]
    fn record_without_server_fields_still_decodes() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "nombre": "Producto 1",
            "descripcion": "Descripcion 1",
            "precio": 100,
            "foto_url": "url"
        }))
        .expect("legacy record decodes");

        assert_eq!(product.precio, Some(Number::from(100)));
        assert!(product.fecha_publicacion.is_none());
        assert!(product.usuario_id.is_none());

        let json = serde_json::to_value(product).expect("product should serialize");
        assert!(json.get("fecha_publicacion").is_none());
    }
}
