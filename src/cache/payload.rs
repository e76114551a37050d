//! Payload Module
//!
//! The upstream body, carried as unparsed JSON text.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

// == Payload ==
/// An upstream JSON document kept exactly as received.
///
/// Only syntax is checked on construction. Key order, number precision and
/// inner whitespace are never touched; surrounding whitespace is trimmed.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

impl Payload {
    /// Wraps `text`, failing if it is not a single JSON value.
    pub fn from_json(text: impl Into<String>) -> serde_json::Result<Self> {
        RawValue::from_string(text.into()).map(Self)
    }

    /// The JSON text, as received.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn into_string(self) -> String {
        self.0.get().to_owned()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Payload {}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::from_json(value.to_string()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{"Fecha":"14/10/2026","ListaEESSPrecio":[],"Big":12345678901234567890123,"Acc":1.459}"#;

    #[test]
    fn test_text_is_kept_verbatim() {
        let payload = Payload::from_json(FEED).unwrap();
        assert_eq!(payload.as_str(), FEED);
        assert_eq!(payload.into_string(), FEED);
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(Payload::from_json("<html>maintenance</html>").is_err());
        assert!(Payload::from_json("").is_err());
        assert!(Payload::from_json("{} {}").is_err());
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let text = "{ \"b\" : 1,\n  \"a\" : [ 1.50 ] }";
        assert_eq!(Payload::from_json(text).unwrap().as_str(), text);
    }

    #[test]
    fn test_embeds_verbatim_when_serialized() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            payload: Payload,
        }

        let encoded = serde_json::to_string(&Wrapper {
            payload: Payload::from_json(FEED).unwrap(),
        })
        .unwrap();
        assert_eq!(encoded, format!(r#"{{"payload":{}}}"#, FEED));

        let decoded: Wrapper = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.payload.as_str(), FEED);
    }

    #[test]
    fn test_equality_is_textual() {
        let a = Payload::from_json(r#"{"a":1,"b":2}"#).unwrap();
        let b = Payload::from_json(r#"{"b":2,"a":1}"#).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Payload::from_json(r#"{"a":1,"b":2}"#).unwrap());
    }
}
