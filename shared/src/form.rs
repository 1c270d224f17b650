use serde::{Deserialize, Serialize};

/// One of the seven agronomic inputs of the recommendation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    SoilPh,
    Rainfall,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Nitrogen,
        Field::Phosphorus,
        Field::Potassium,
        Field::Temperature,
        Field::Humidity,
        Field::SoilPh,
        Field::Rainfall,
    ];

    /// Key used for this field in the `/api/recommend/` body.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Nitrogen => "N",
            Field::Phosphorus => "P",
            Field::Potassium => "K",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::SoilPh => "ph",
            Field::Rainfall => "rainfall",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Nitrogen => "Nitrogen (N)",
            Field::Phosphorus => "Phosphorus (P)",
            Field::Potassium => "Potassium (K)",
            Field::Temperature => "Temperature (°C)",
            Field::Humidity => "Humidity (%)",
            Field::SoilPh => "Soil pH",
            Field::Rainfall => "Rainfall (mm)",
        }
    }

    /// Input step for the number input; the nutrient fields are whole numbers.
    pub fn step(self) -> &'static str {
        match self {
            Field::Nitrogen | Field::Phosphorus | Field::Potassium => "1",
            _ => "0.1",
        }
    }
}

/// Raw text of every form input, exactly as the user typed it.
///
/// Serializes to the request body of `/api/recommend/`. Values are sent as
/// strings and the service coerces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(rename = "N")]
    pub nitrogen: String,
    #[serde(rename = "P")]
    pub phosphorus: String,
    #[serde(rename = "K")]
    pub potassium: String,
    pub temperature: String,
    pub humidity: String,
    #[serde(rename = "ph")]
    pub soil_ph: String,
    pub rainfall: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nitrogen => &self.nitrogen,
            Field::Phosphorus => &self.phosphorus,
            Field::Potassium => &self.potassium,
            Field::Temperature => &self.temperature,
            Field::Humidity => &self.humidity,
            Field::SoilPh => &self.soil_ph,
            Field::Rainfall => &self.rainfall,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Nitrogen => &mut self.nitrogen,
            Field::Phosphorus => &mut self.phosphorus,
            Field::Potassium => &mut self.potassium,
            Field::Temperature => &mut self.temperature,
            Field::Humidity => &mut self.humidity,
            Field::SoilPh => &mut self.soil_ph,
            Field::Rainfall => &mut self.rainfall,
        }
    }

    /// Overwrites a single field. This is how keystrokes land in the store.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Overwrites a subset of fields in one step, leaving the rest alone.
    pub fn set_fields<I, S>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        for (field, value) in updates {
            self.set_field(field, value);
        }
    }

    /// True when every field has some text in it. Numeric checks are left to
    /// the input elements and the service.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|field| !self.get(*field).trim().is_empty())
    }
}
