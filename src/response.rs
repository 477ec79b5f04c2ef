use serde::Serialize;

/// Success body shared by all endpoints: `{ "message"?: ..., "data"?: ... }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            message: Some(message),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            message: Some(message),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let json = serde_json::to_string(&Envelope::message("Logged out")).unwrap();
        assert_eq!(json, r#"{"message":"Logged out"}"#);

        let json = serde_json::to_string(&Envelope::data(42)).unwrap();
        assert_eq!(json, r#"{"data":42}"#);
    }

    #[test]
    fn message_and_data_serialize_together() {
        let json = serde_json::to_string(&Envelope::with_message("Created", "x")).unwrap();
        assert_eq!(json, r#"{"message":"Created","data":"x"}"#);
    }
}
