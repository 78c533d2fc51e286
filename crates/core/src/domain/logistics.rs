use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SHIPMENT_TYPE: &str = "LTL";

/// One class of cargo. Dimensions and weight stay free text; unparsable
/// numeric strings aggregate as zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Piece {
    pub description: String,
    pub quantity: u32,
    pub length: String,
    pub width: String,
    pub height: String,
    pub weight: String,
}

impl Default for Piece {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: 1,
            length: String::new(),
            width: String::new(),
            height: String::new(),
            weight: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Inside,
    Outside,
}

impl StorageKind {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inside" => Some(Self::Inside),
            "outside" => Some(Self::Outside),
            _ => None,
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inside => "Inside Storage",
            Self::Outside => "Outside Storage",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Self::Inside => "Inside",
            Self::Outside => "Outside",
        }
    }

    pub fn rate_per_sq_ft(self) -> Decimal {
        match self {
            Self::Inside => Decimal::new(150, 2),
            Self::Outside => Decimal::new(75, 2),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogisticsRecord {
    pub pieces: Vec<Piece>,
    pub pickup_address: String,
    pub pickup_city: String,
    pub pickup_state: String,
    pub pickup_zip: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_zip: String,
    pub shipment_type: String,
    pub truck_type: String,
    #[serde(with = "storage_kind_wire")]
    pub storage_type: Option<StorageKind>,
    pub storage_sq_ft: String,
}

impl Default for LogisticsRecord {
    fn default() -> Self {
        Self {
            pieces: Vec::new(),
            pickup_address: String::new(),
            pickup_city: String::new(),
            pickup_state: String::new(),
            pickup_zip: String::new(),
            delivery_address: String::new(),
            delivery_city: String::new(),
            delivery_state: String::new(),
            delivery_zip: String::new(),
            shipment_type: DEFAULT_SHIPMENT_TYPE.to_string(),
            truck_type: String::new(),
            storage_type: None,
            storage_sq_ft: String::new(),
        }
    }
}

impl LogisticsRecord {
    pub fn total_piece_count(&self) -> u32 {
        self.pieces.iter().map(|piece| piece.quantity).sum()
    }

    pub fn total_weight_lbs(&self) -> f64 {
        self.pieces
            .iter()
            .map(|piece| f64::from(piece.quantity) * parse_number_or_zero(&piece.weight))
            .sum()
    }

    /// Estimated storage cost: square footage times the per-kind rate.
    /// `None` when no storage is selected.
    pub fn storage_cost(&self) -> Option<Decimal> {
        let kind = self.storage_type?;
        let sq_ft: Decimal = self.storage_sq_ft.trim().parse().unwrap_or(Decimal::ZERO);
        Some(sq_ft * kind.rate_per_sq_ft())
    }
}

fn parse_number_or_zero(value: &str) -> f64 {
    value.trim().replace(',', "").parse().unwrap_or(0.0)
}

/// Wire format for the storage selector: `"inside"`, `"outside"`, or an
/// empty string for no storage. Unknown values load as no storage.
mod storage_kind_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::StorageKind;

    pub fn serialize<S>(value: &Option<StorageKind>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map_or("", StorageKind::wire_value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<StorageKind>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(StorageKind::from_wire))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn piece(quantity: u32, weight: &str) -> Piece {
        Piece { quantity, weight: weight.to_string(), ..Piece::default() }
    }

    #[test]
    fn defaults_to_ltl_with_no_storage() {
        let record = LogisticsRecord::default();
        assert_eq!(record.shipment_type, "LTL");
        assert_eq!(record.storage_type, None);
        assert!(record.pieces.is_empty());
    }

    #[test]
    fn aggregates_weight_and_counts_treating_unparsable_as_zero() {
        let record = LogisticsRecord {
            pieces: vec![piece(2, "500"), piece(1, "1,200"), piece(3, "heavy")],
            ..LogisticsRecord::default()
        };

        assert_eq!(record.total_piece_count(), 6);
        assert_eq!(record.total_weight_lbs(), 2200.0);
    }

    #[test]
    fn storage_cost_multiplies_square_footage_by_the_kind_rate() {
        let record = LogisticsRecord {
            storage_type: Some(StorageKind::Inside),
            storage_sq_ft: "500".to_string(),
            ..LogisticsRecord::default()
        };
        assert_eq!(record.storage_cost(), Some(Decimal::new(75_000, 2)));

        let outside = LogisticsRecord {
            storage_type: Some(StorageKind::Outside),
            storage_sq_ft: "100".to_string(),
            ..LogisticsRecord::default()
        };
        assert_eq!(outside.storage_cost(), Some(Decimal::new(7_500, 2)));
    }

    #[test]
    fn storage_cost_treats_unparsable_square_footage_as_zero() {
        let record = LogisticsRecord {
            storage_type: Some(StorageKind::Outside),
            storage_sq_ft: "a lot".to_string(),
            ..LogisticsRecord::default()
        };
        assert_eq!(record.storage_cost(), Some(Decimal::ZERO));

        assert_eq!(LogisticsRecord::default().storage_cost(), None);
    }

    #[test]
    fn storage_type_tolerates_empty_and_unknown_wire_values() {
        let empty: LogisticsRecord =
            serde_json::from_str(r#"{"storageType":""}"#).expect("deserialize");
        assert_eq!(empty.storage_type, None);

        let unknown: LogisticsRecord =
            serde_json::from_str(r#"{"storageType":"garage"}"#).expect("deserialize");
        assert_eq!(unknown.storage_type, None);

        let inside: LogisticsRecord =
            serde_json::from_str(r#"{"storageType":"inside"}"#).expect("deserialize");
        assert_eq!(inside.storage_type, Some(StorageKind::Inside));
    }

    #[test]
    fn storage_type_round_trips_through_the_wire_format() {
        let record = LogisticsRecord {
            storage_type: Some(StorageKind::Outside),
            ..LogisticsRecord::default()
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let reloaded: LogisticsRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, reloaded);

        let none = LogisticsRecord::default();
        let json = serde_json::to_string(&none).expect("serialize");
        assert!(json.contains(r#""storageType":"""#));
        let reloaded: LogisticsRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(none, reloaded);
    }
}
