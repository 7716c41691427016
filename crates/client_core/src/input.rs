//! Input model: the editable prediction form and its submit-time schema.

use std::{fmt, str::FromStr};

use shared::{
    domain::{Product, Season},
    error::UnknownChoice,
    protocol::PredictRequest,
};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Country,
    Province,
    Product,
    SeasonName,
    TimeToHarvest,
    Area,
    Production,
}

impl Field {
    /// Declaration order; validation reports the first failure in this order.
    pub const ALL: [Field; 7] = [
        Field::Country,
        Field::Province,
        Field::Product,
        Field::SeasonName,
        Field::TimeToHarvest,
        Field::Area,
        Field::Production,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::Province => "province",
            Field::Product => "product",
            Field::SeasonName => "season_name",
            Field::TimeToHarvest => "time_to_harvest",
            Field::Area => "area",
            Field::Production => "production",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Country => "Country",
            Field::Province => "Province",
            Field::Product => "Product",
            Field::SeasonName => "Season",
            Field::TimeToHarvest => "Time to harvest",
            Field::Area => "Area",
            Field::Production => "Production",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Field {
    type Err = UnknownChoice;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "country" => Field::Country,
            "province" => Field::Province,
            "product" => Field::Product,
            "seasonname" | "season" => Field::SeasonName,
            "timetoharvest" => Field::TimeToHarvest,
            "area" => Field::Area,
            "production" => Field::Production,
            _ => return Err(UnknownChoice::new("field", raw)),
        };
        Ok(field)
    }
}

/// Numeric text entry: anything that is not a finite number becomes `0`.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Current form values. Any partially filled record is representable;
/// only [`validate`] judges it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionInput {
    pub country: String,
    pub province: String,
    pub product: Option<Product>,
    pub season_name: Option<Season>,
    pub time_to_harvest: f64,
    pub area: f64,
    pub production: f64,
}

impl PredictionInput {
    /// Returns a copy with `field` replaced by `value`. Choice fields left
    /// empty or set to an unknown value become unset.
    pub fn update(&self, field: Field, value: &str) -> PredictionInput {
        let mut next = self.clone();
        match field {
            Field::Country => next.country = value.to_string(),
            Field::Province => next.province = value.to_string(),
            Field::Product => next.product = value.parse().ok(),
            Field::SeasonName => next.season_name = value.parse().ok(),
            Field::TimeToHarvest => next.time_to_harvest = coerce_number(value),
            Field::Area => next.area = coerce_number(value),
            Field::Production => next.production = coerce_number(value),
        }
        next
    }

    pub fn with_product(&self, product: Product) -> PredictionInput {
        PredictionInput {
            product: Some(product),
            ..self.clone()
        }
    }

    pub fn with_season(&self, season: Season) -> PredictionInput {
        PredictionInput {
            season_name: Some(season),
            ..self.clone()
        }
    }

    pub fn with_number(&self, field: Field, value: f64) -> PredictionInput {
        let mut next = self.clone();
        match field {
            Field::TimeToHarvest => next.time_to_harvest = value,
            Field::Area => next.area = value,
            Field::Production => next.production = value,
            _ => {}
        }
        next
    }
}

/// A [`PredictionInput`] that passed every constraint. Only [`validate`]
/// constructs one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord(PredictRequest);

impl ValidatedRecord {
    pub fn payload(&self) -> &PredictRequest {
        &self.0
    }

    pub fn into_payload(self) -> PredictRequest {
        self.0
    }
}

fn required_text(field: Field, value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} is required", field.label()),
        ));
    }
    Ok(value.to_string())
}

fn required_choice<T: Copy>(field: Field, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, format!("{} is required", field.label())))
}

fn non_negative(field: Field, value: f64) -> Result<f64, ValidationError> {
    // NaN compares false and is rejected here too.
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field,
            format!("{} must be positive", field.label()),
        ))
    }
}

/// Checks each field in declaration order and stops at the first failure.
pub fn validate(record: &PredictionInput) -> Result<ValidatedRecord, ValidationError> {
    let country = required_text(Field::Country, &record.country)?;
    let province = required_text(Field::Province, &record.province)?;
    let product = required_choice(Field::Product, record.product)?;
    let season_name = required_choice(Field::SeasonName, record.season_name)?;
    let time_to_harvest = non_negative(Field::TimeToHarvest, record.time_to_harvest)?;
    let area = non_negative(Field::Area, record.area)?;
    let production = non_negative(Field::Production, record.production)?;

    Ok(ValidatedRecord(PredictRequest {
        country,
        province,
        product,
        season_name,
        time_to_harvest,
        area,
        production,
    }))
}

/// Owns the snapshot for one form session.
#[derive(Debug, Clone, Default)]
pub struct InputModel {
    current: PredictionInput,
}

impl InputModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &PredictionInput {
        &self.current
    }

    pub fn edit(&mut self, field: Field, value: &str) -> &PredictionInput {
        self.current = self.current.update(field, value);
        &self.current
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
