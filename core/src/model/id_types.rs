use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Identifier assigned by the backend. The backend may hand out strings or numbers,
/// both are kept as their textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Int(i) => i.to_string(),
            RawId::Uint(u) => u.to_string(),
            RawId::Float(f) => f.to_string(),
        };
        Ok(AssetId(id))
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        AssetId(value.to_owned())
    }
}

impl From<String> for AssetId {
    fn from(value: String) -> Self {
        AssetId(value)
    }
}

impl From<i64> for AssetId {
    fn from(value: i64) -> Self {
        AssetId(value.to_string())
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::AssetId;

    #[test]
    fn deserializes_numbers_and_strings() {
        let ids: Vec<AssetId> = serde_json::from_str(r#"[1, "65f0c2", 18446744073709551615]"#)
            .expect("valid ids");
        assert_eq!(
            ids,
            vec![
                AssetId::from(1),
                AssetId::from("65f0c2"),
                AssetId::from("18446744073709551615")
            ]
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&AssetId::from(42)).unwrap();
        assert_eq!(json, r#""42""#);
    }
}
