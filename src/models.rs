use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A reporter/partner/year triple identifying the trade flow on display.
///
/// Immutable per refresh cycle; a new `Selection` is built whenever one of
/// the selectors changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Reporting economy code (e.g., `"CHE"`).
    pub reporter: String,
    /// Partner economy code (e.g., `"EU27"`).
    pub partner: String,
    /// Reference year; also the end of the evolution window.
    pub year: i32,
}

impl Selection {
    /// The inclusive 10-year window ending at the selected year.
    pub fn range(&self) -> YearRange {
        YearRange {
            start: self.year - 10,
            end: self.year,
        }
    }
}

/// Inclusive year range used by the evolution endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

/// Parse-with-default for API values that may be numbers, numeric strings,
/// `null`, or absent. Anything non-numeric coerces to `0.0`.
pub fn coerce_f64(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Like [`coerce_f64`] but for year labels. Defaults to `0`.
pub fn coerce_i32(v: &Value) -> i32 {
    match v {
        Value::Number(n) => n.as_i64().map(|y| y as i32).unwrap_or(0),
        Value::String(s) => s.trim().parse::<i32>().unwrap_or(0),
        _ => 0,
    }
}

/// One year of bilateral trade, from the positional
/// `[year, exports, imports, balance]` tuple of the evolution endpoint.
///
/// The API serializes the numeric fields inconsistently (number, numeric
/// string, or missing), so deserialization funnels every element through the
/// coercion helpers above instead of trusting the wire types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub year: i32,
    pub exports: f64,
    pub imports: f64,
    pub balance: f64,
}

impl<'de> Deserialize<'de> for TradeRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = TradeRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a [year, exports, imports, balance] tuple")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<TradeRecord, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut next = || -> Result<Value, A::Error> {
                    Ok(seq.next_element::<Value>()?.unwrap_or(Value::Null))
                };
                let year = coerce_i32(&next()?);
                let exports = coerce_f64(&next()?);
                let imports = coerce_f64(&next()?);
                let balance = coerce_f64(&next()?);
                // Tolerate (and discard) trailing elements.
                while seq.next_element::<Value>()?.is_some() {}
                Ok(TradeRecord {
                    year,
                    exports,
                    imports,
                    balance,
                })
            }
        }

        deserializer.deserialize_seq(RecordVisitor)
    }
}

/// Body of `tradeEvolution.json`. A missing `records` key is treated the
/// same as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionPayload {
    #[serde(default)]
    pub records: Vec<TradeRecord>,
}

/// Body of `treemap_HS2.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreemapPayload {
    #[serde(default)]
    pub treemap: Option<RawGoodsNode>,
}

/// Untrusted node as delivered by the goods endpoint. Internal nodes carry
/// `children`; leaves carry `titlePrefix` and `value`. Aggregated values for
/// internal nodes are recomputed by the hierarchy transform, never read from
/// here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGoodsNode {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "titlePrefix")]
    pub title_prefix: Option<String>,
    #[serde(default, deserialize_with = "de_opt_coerced_f64")]
    pub value: Option<f64>,
    #[serde(default)]
    pub children: Vec<RawGoodsNode>,
}

/// Serde helper: accept a leaf value as number or numeric string; `null`
/// and absence both map to `None`.
fn de_opt_coerced_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        None | Some(Value::Null) => None,
        Some(other) => Some(coerce_f64(&other)),
    })
}
