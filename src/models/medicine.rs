use serde::{Deserialize, Serialize};

/// Catalogue entry used to price billing lines and fill prescriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub description: String,
}
