use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

#[cfg(feature = "database")]
use sea_orm::DeriveActiveEnum;

/// The kind of a dining table; seat counts are configured per kind
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    #[cfg_attr(feature = "database", sea_orm(string_value = "STANDARD"))]
    Standard,
    #[cfg_attr(feature = "database", sea_orm(string_value = "LARGE"))]
    Large,
}

/// A dining table together with the seat count of its type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Table {
    pub id: Uuid,
    pub num_table: i32,
    pub table_type: TableType,
    pub seat_count: i32,
}

/// Seat count configured for a table type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TableTypeInfo {
    pub table_type: TableType,
    pub seat_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_type_round_trips_through_strings() {
        for table_type in TableType::iter() {
            let parsed = TableType::from_str(table_type.as_ref()).unwrap();
            assert_eq!(parsed, table_type);
        }

        assert_eq!(TableType::Standard.as_ref(), "STANDARD");
        assert_eq!(TableType::Large.as_ref(), "LARGE");
        assert!(TableType::from_str("HUGE").is_err());
    }
}
