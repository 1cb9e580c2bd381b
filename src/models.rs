use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{EstimateError, Result};
use crate::fmt::text;

/// A flat section of the record (contractor, carrier, claim, ...) keyed by field name.
pub type Fields = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// `null` or a non-object where a section is expected reads as an empty section.
fn lenient_fields<'de, D>(deserializer: D) -> std::result::Result<Fields, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => Fields::new(),
    })
}

/// `null` or a non-array where a list is expected reads as an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|v| T::deserialize(v).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRecord {
    #[serde(deserialize_with = "lenient_fields")]
    pub contractor: Fields,
    #[serde(deserialize_with = "lenient_fields")]
    pub carrier: Fields,
    #[serde(deserialize_with = "lenient_fields")]
    pub claim: Fields,
    #[serde(deserialize_with = "lenient_fields")]
    pub insured: Fields,
    pub estimate_title: Value,
    pub estimate_subtitle: Value,
    pub section: Value,
    #[serde(deserialize_with = "lenient_fields")]
    pub summary: Fields,
    #[serde(deserialize_with = "lenient_fields")]
    pub footer: Fields,
    #[serde(deserialize_with = "lenient_fields")]
    pub professional_standards: Fields,
    #[serde(deserialize_with = "lenient_list")]
    pub pre_loss_conditions: Vec<Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub line_items: Vec<Category>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Category {
    pub category: Value,
    #[serde(deserialize_with = "lenient_list")]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub description: Value,
    pub quantity: Value,
    pub unit: Value,
    pub tax: Value,
    pub rcv: Value,
    pub age_life: Value,
    pub condition: Value,
    pub dep_percent: Value,
    pub depreciation: Value,
    pub acv: Value,
}

impl EstimateRecord {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|source| EstimateError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a dotted placeholder path such as `claim.lossDate` or `section`.
    /// Unknown paths resolve to null.
    pub fn lookup(&self, path: &str) -> &Value {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let section = match head {
            "contractor" => &self.contractor,
            "carrier" => &self.carrier,
            "claim" => &self.claim,
            "insured" => &self.insured,
            "summary" => &self.summary,
            "footer" => &self.footer,
            "professionalStandards" => &self.professional_standards,
            "estimateTitle" if rest.is_none() => return &self.estimate_title,
            "estimateSubtitle" if rest.is_none() => return &self.estimate_subtitle,
            "section" if rest.is_none() => return &self.section,
            _ => return &NULL,
        };
        rest.and_then(|key| section.get(key)).unwrap_or(&NULL)
    }

    pub fn item_count(&self) -> usize {
        self.line_items.iter().map(|c| c.items.len()).sum()
    }

    fn name_of(section: &Fields, field: &'static str) -> Result<String> {
        let name = section.get("name").map(text).unwrap_or_default();
        match name.trim() {
            "" => Err(EstimateError::MissingField(field)),
            trimmed => Ok(trimmed.to_string()),
        }
    }

    /// `"<contractor> - <insured> Insurance Estimate.pdf"`, with path separators
    /// in either name replaced so the file stays inside the output directory.
    pub fn output_filename(&self) -> Result<String> {
        let contractor = Self::name_of(&self.contractor, "contractor.name")?;
        let insured = Self::name_of(&self.insured, "insured.name")?;
        let name = format!("{contractor} - {insured} Insurance Estimate.pdf");
        Ok(name.replace(['/', '\\'], "-"))
    }
}
