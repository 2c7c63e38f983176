use serde::{Deserialize, Serialize};

use super::UserId;

/// User document as stored under `usuarios/{id}`, password included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub contrasena: String,
    pub contacto: String,
}

impl NewUser {
    pub fn register(self) -> User {
        User {
            nombre: Some(self.nombre),
            apellido: Some(self.apellido),
            correo: Some(self.correo),
            contrasena: Some(self.contrasena),
            contacto: Some(self.contacto),
        }
    }
}

/// Mutable profile fields. The password is not among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserChanges {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub contacto: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes() -> UserChanges {
        UserChanges {
            nombre: "Ana María".to_string(),
            apellido: "Pérez".to_string(),
            correo: "anam@example.com".to_string(),
            contacto: "556".to_string(),
        }
    }

    #[test]
    fn registration_keeps_the_password() {
        let user = NewUser {
            nombre: "Ana".to_string(),
            apellido: "Pérez".to_string(),
            correo: "ana@example.com".to_string(),
            contrasena: "secreta".to_string(),
            contacto: "555".to_string(),
        }
        .register();

        assert_eq!(user.contrasena.as_deref(), Some("secreta"));
    }

    #[test]
    fn change_set_serializes_without_password_key() {
        let json = serde_json::to_value(changes()).expect("changes should serialize");
        assert!(json.get("contrasena").is_none());
        assert_eq!(json.as_object().map(|fields| fields.len()), Some(4));
    }

    #[test]
    fn record_without_password_decodes() {
        let user: User = serde_json::from_str(r#"{"nombre":"Ana","correo":"ana@example.com"}"#)
            .expect("partial record decodes");

        assert_eq!(user.nombre.as_deref(), Some("Ana"));
        assert!(user.contrasena.is_none());
    }
}
