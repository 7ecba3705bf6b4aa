use serde::{Deserialize, Serialize};

/// Value of the `tipo` field on the synthetic connection record.
pub const CONNECTION_KIND: &str = "conexao";

/// Synthetic first record on every stream.
///
/// Serializes as `{"tipo":"conexao","mensagem":"..."}`. Production events
/// carry a `titulo` instead of a `tipo`, which is how the page tells them
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionAck {
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "mensagem")]
    pub message: String,
}

impl ConnectionAck {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: CONNECTION_KIND.to_string(),
            message: message.into(),
        }
    }
}

impl Default for ConnectionAck {
    fn default() -> Self {
        Self::new("connected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn ack_serializes_to_the_connection_record() {
        let value: Value = serde_json::to_value(ConnectionAck::default()).unwrap();
        assert_eq!(value, json!({"tipo": "conexao", "mensagem": "connected"}));
    }

    #[test]
    fn ack_carries_a_custom_message() {
        let ack = ConnectionAck::new("stream aberto");
        assert_eq!(ack.kind, CONNECTION_KIND);
        assert_eq!(ack.message, "stream aberto");
    }
}
