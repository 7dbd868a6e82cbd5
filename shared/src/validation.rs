//! Validation utilities for the Smart Irrigation System
//!
//! Input bounds for the dashboard controls and the prediction API. The five
//! slider fields use the simulated sensor ranges; rainfall is free numeric
//! entry up to a generous forecast ceiling.

use crate::models::SensorReading;

/// Temperature bounds in °C
pub const TEMPERATURE_RANGE: (f32, f32) = (20.0, 40.0);

/// Relative humidity bounds in %
pub const HUMIDITY_RANGE: (f32, f32) = (30.0, 80.0);

/// Soil moisture bounds in %
pub const SOIL_MOISTURE_RANGE: (f32, f32) = (10.0, 60.0);

/// Wind speed bounds in km/h
pub const WIND_SPEED_RANGE: (f32, f32) = (0.0, 15.0);

/// Rainfall forecast bounds in mm
pub const RAINFALL_RANGE: (f32, f32) = (0.0, 500.0);

fn in_range(value: f32, (min, max): (f32, f32)) -> bool {
    value.is_finite() && value >= min && value <= max
}

/// Validate temperature is within the supported sensor range
pub fn validate_temperature(value: f32) -> Result<(), &'static str> {
    if in_range(value, TEMPERATURE_RANGE) {
        Ok(())
    } else {
        Err("Temperature must be between 20 and 40 °C")
    }
}

/// Validate humidity is within the supported sensor range
pub fn validate_humidity(value: f32) -> Result<(), &'static str> {
    if in_range(value, HUMIDITY_RANGE) {
        Ok(())
    } else {
        Err("Humidity must be between 30 and 80 %")
    }
}

/// Validate soil moisture is within the supported sensor range
pub fn validate_soil_moisture(value: f32) -> Result<(), &'static str> {
    if in_range(value, SOIL_MOISTURE_RANGE) {
        Ok(())
    } else {
        Err("Soil moisture must be between 10 and 60 %")
    }
}

/// Validate wind speed is within the supported sensor range
pub fn validate_wind_speed(value: f32) -> Result<(), &'static str> {
    if in_range(value, WIND_SPEED_RANGE) {
        Ok(())
    } else {
        Err("Wind speed must be between 0 and 15 km/h")
    }
}

/// Validate rainfall forecast is within the accepted entry range
pub fn validate_rainfall(value: f32) -> Result<(), &'static str> {
    if in_range(value, RAINFALL_RANGE) {
        Ok(())
    } else {
        Err("Rainfall forecast must be between 0 and 500 mm")
    }
}

/// Validate a complete reading, reporting the first field out of bounds
pub fn validate_reading(reading: &SensorReading) -> Result<(), &'static str> {
    validate_temperature(reading.temperature)?;
    validate_humidity(reading.humidity)?;
    validate_soil_moisture(reading.soil_moisture)?;
    validate_wind_speed(reading.wind_speed)?;
    validate_rainfall(reading.rainfall_forecast)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, Season};

    #[test]
    fn test_bounds_accept_range_endpoints() {
        assert!(validate_temperature(20.0).is_ok());
        assert!(validate_temperature(40.0).is_ok());
        assert!(validate_humidity(30.0).is_ok());
        assert!(validate_soil_moisture(60.0).is_ok());
        assert!(validate_wind_speed(0.0).is_ok());
        assert!(validate_rainfall(0.0).is_ok());
    }

    #[test]
    fn test_bounds_reject_out_of_range() {
        assert!(validate_temperature(19.9).is_err());
        assert!(validate_humidity(85.0).is_err());
        assert!(validate_soil_moisture(5.0).is_err());
        assert!(validate_wind_speed(-1.0).is_err());
        assert!(validate_rainfall(501.0).is_err());
    }

    #[test]
    fn test_bounds_reject_non_finite() {
        assert!(validate_temperature(f32::NAN).is_err());
        assert!(validate_rainfall(f32::INFINITY).is_err());
    }

    #[test]
    fn test_validate_reading() {
        let mut reading = SensorReading {
            temperature: 25.0,
            humidity: 50.0,
            soil_moisture: 20.0,
            wind_speed: 5.0,
            rainfall_forecast: 0.0,
            crop: Crop::Wheat,
            season: Season::Spring,
        };
        assert!(validate_reading(&reading).is_ok());

        reading.soil_moisture = 90.0;
        assert!(validate_reading(&reading).is_err());
    }
}
