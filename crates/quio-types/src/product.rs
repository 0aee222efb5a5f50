use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identity of a furniture item ("móvel")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovelId(pub u64);

impl std::fmt::Display for MovelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sub-part of a móvel. Subtotal is computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Componente {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    #[serde(rename = "categoria", alias = "category", default, deserialize_with = "crate::de::null_as_default")]
    pub category: String,
    #[serde(rename = "quantidade", alias = "quantity", default, deserialize_with = "crate::de::null_as_default")]
    pub quantity: u32,
    #[serde(rename = "preco_unitario", alias = "unit_price", default, deserialize_with = "crate::de::null_as_default")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub subtotal: f64,
}

/// One line of the quote.
///
/// Extracted items have no `id` and are addressed by position; items that
/// came back from the server's quote carry a [`MovelId`] and, usually,
/// their components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<MovelId>,
    pub name: String,
    #[serde(default = "one", deserialize_with = "quantity_or_one")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default, deserialize_with = "crate::de::null_as_default")]
    pub componentes: Vec<Componente>,
}

fn one() -> u32 {
    1
}

fn quantity_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1))
}

impl ProductItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            price,
            dimensions: None,
            material: None,
            color: None,
            componentes: Vec::new(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.dimensions = Some(dimensions.into());
        self
    }

    /// price × quantity
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Case-insensitive name comparison used when merging extractions.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}
