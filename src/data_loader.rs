use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of objects")]
    NotAnArray,
    #[error("missing column: {0}")]
    MissingColumn(String),
}

/// An ordered set of records with named fields, loaded once at startup.
/// The only mutations after load are column renaming, derived-field
/// computation and thinning.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<Map<String, Value>>,
}

impl Dataset {
    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.records.iter().cloned().map(Value::Object).collect())
    }

    /// Parse CSV text. When `headers` is given the input is headerless and
    /// the names are assigned positionally; extra cells are dropped.
    pub fn from_csv_str(text: &str, headers: Option<&[&str]>) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(headers.is_none())
            .from_reader(text.as_bytes());

        let names: Vec<String> = match headers {
            Some(names) => names.iter().map(|s| s.to_string()).collect(),
            None => reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect(),
        };

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Map::new();
            for (name, cell) in names.iter().zip(row.iter()) {
                record.insert(name.clone(), parse_cell(cell));
            }
            records.push(record);
        }

        Ok(Dataset { records })
    }

    /// Parse a JSON array of objects.
    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(text)?;
        let rows = value.as_array().ok_or(DatasetError::NotAnArray)?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match row {
                Value::Object(record) => records.push(record.clone()),
                _ => return Err(DatasetError::NotAnArray),
            }
        }
        Ok(Dataset { records })
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), DatasetError> {
        if !self.records.iter().any(|r| r.contains_key(from)) {
            return Err(DatasetError::MissingColumn(from.to_string()));
        }
        for record in &mut self.records {
            if let Some(value) = record.remove(from) {
                record.insert(to.to_string(), value);
            }
        }
        Ok(())
    }

    /// Add one derived field per record.
    pub fn derive_column<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&Map<String, Value>) -> Value,
    {
        for record in &mut self.records {
            let value = f(record);
            record.insert(name.to_string(), value);
        }
    }

    /// Deterministic half-thinning: keep every other record.
    pub fn sample_half(&mut self) {
        let mut keep = false;
        self.records.retain(|_| {
            keep = !keep;
            keep
        });
    }

    /// Coordinate pairs for the view heuristic; records without numeric
    /// values in both fields are skipped.
    pub fn lng_lat(&self, lng: &str, lat: &str) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| {
                let lng = r.get(lng).and_then(Value::as_f64)?;
                let lat = r.get(lat).and_then(Value::as_f64)?;
                Some((lng, lat))
            })
            .collect()
    }
}

fn parse_cell(cell: &str) -> Value {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}

pub async fn fetch_csv(url: &str, headers: Option<&[&str]>) -> Result<Dataset, DatasetError> {
    info!("Fetching CSV dataset: {}", url);
    let text = reqwest::get(url).await?.error_for_status()?.text().await?;
    let dataset = Dataset::from_csv_str(&text, headers)?;
    debug!("Loaded {} records", dataset.len());
    Ok(dataset)
}

pub async fn fetch_json(url: &str) -> Result<Dataset, DatasetError> {
    info!("Fetching JSON dataset: {}", url);
    let text = reqwest::get(url).await?.error_for_status()?.text().await?;
    let dataset = Dataset::from_json_str(&text)?;
    debug!("Loaded {} records", dataset.len());
    Ok(dataset)
}
