use std::{fs, path::Path};

use json::{JsonValue, object};

use crate::{
    dithering::threshold::{
        DEFAULT_MAX_INTENSITY, DEFAULT_THRESHOLD, ordered::DEFAULT_BOX_SIZE,
    },
    error::{HalftoneError, Result},
    transform::grayscale::DEFAULT_GRAYSCALE_WEIGHTS,
};

/// Parameters shared by every mode.
///
/// Every key of the JSON form is optional:
///
/// ```json
/// {
///     "threshold": 128,
///     "max_intensity": 255,
///     "box_size": 16,
///     "grayscale_weights": [0.3, 0.6, 0.1],
///     "gamma": 1.0,
///     "seed": 42,
///     "crop_border": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HalftoneConfig {
    /// pixels strictly above this become `max_intensity`
    pub threshold: f64,
    pub max_intensity: f64,
    /// ordered dithering tile edge
    pub box_size: usize,
    /// R, G, B weights for grayscale reduction
    pub grayscale_weights: [f64; 3],
    pub gamma: f64,
    /// random dithering seed, OS entropy when unset
    pub seed: Option<u64>,
    /// crop the guard border off error diffusion output
    pub crop_border: bool,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_intensity: DEFAULT_MAX_INTENSITY,
            box_size: DEFAULT_BOX_SIZE,
            grayscale_weights: DEFAULT_GRAYSCALE_WEIGHTS,
            gamma: 1.0,
            seed: None,
            crop_border: false,
        }
    }
}

impl HalftoneConfig {
    pub fn from_json_str(json_string: &str) -> Result<HalftoneConfig> {
        let json = json::parse(json_string)?;
        if !json.is_object() {
            return config_error("expected a JSON object");
        }

        let mut config = HalftoneConfig::default();
        if let Some(threshold) = optional(&json, "threshold", JsonValue::as_f64)? {
            config.threshold = threshold;
        }
        if let Some(max_intensity) = optional(&json, "max_intensity", JsonValue::as_f64)? {
            config.max_intensity = max_intensity;
        }
        if let Some(box_size) = optional(&json, "box_size", JsonValue::as_usize)? {
            config.box_size = box_size;
        }
        if let Some(weights) = optional(&json, "grayscale_weights", parse_weights)? {
            config.grayscale_weights = weights;
        }
        if let Some(gamma) = optional(&json, "gamma", JsonValue::as_f64)? {
            config.gamma = gamma;
        }
        config.seed = optional(&json, "seed", JsonValue::as_u64)?;
        if let Some(crop_border) = optional(&json, "crop_border", JsonValue::as_bool)? {
            config.crop_border = crop_border;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        let data = object! {
            threshold: self.threshold,
            max_intensity: self.max_intensity,
            box_size: self.box_size,
            grayscale_weights: self.grayscale_weights.to_vec(),
            gamma: self.gamma,
            seed: self.seed,
            crop_border: self.crop_border
        };
        data.pretty(4)
    }

    /// Reject values no mode can work with.
    pub fn validate(&self) -> Result {
        if !self.threshold.is_finite() {
            return config_error("threshold must be finite");
        }
        if !(self.max_intensity.is_finite() && self.max_intensity > 0.0) {
            return config_error("max_intensity must be a positive number");
        }
        if self.box_size == 0 {
            return config_error("box_size must be at least 1");
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return config_error("gamma must be a positive number");
        }
        if self.grayscale_weights.iter().any(|w| !w.is_finite()) {
            return config_error("grayscale_weights must be finite");
        }
        Ok(())
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<HalftoneConfig> {
        let json_string = fs::read_to_string(path)?;
        HalftoneConfig::from_json_str(&json_string)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        fs::write(path, self.to_json())?;
        Ok(())
    }
}

fn config_error<T>(msg: &str) -> Result<T> {
    Err(HalftoneError::Config(msg.to_string()))
}

/// `Ok(None)` for a missing or null key, an error for a key of the wrong type.
fn optional<T>(
    json: &JsonValue,
    key: &str,
    parse: impl Fn(&JsonValue) -> Option<T>,
) -> Result<Option<T>> {
    let value = &json[key];
    if value.is_null() {
        return Ok(None);
    }
    match parse(value) {
        Some(val) => Ok(Some(val)),
        None => Err(HalftoneError::Config(format!("Couldn't parse {}", key))),
    }
}

fn parse_weights(value: &JsonValue) -> Option<[f64; 3]> {
    if !value.is_array() || value.len() != 3 {
        return None;
    }
    let mut weights = [0.0; 3];
    for (weight, member) in weights.iter_mut().zip(value.members()) {
        *weight = member.as_f64()?;
    }
    Some(weights)
}
