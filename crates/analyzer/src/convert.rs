//! Physical unit conversions and derived quantities.
//!
//! Everything here is a pure function of its inputs. Apart from wind speed
//! and humidity, every conversion is an affine transform of the raw
//! time-averaged field value.

/// Seconds per day, for converting mass-flux rates to daily accumulations.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Assumed surface pressure in hPa for the Tetens vapor-pressure derivation.
const SURFACE_PRESSURE_HPA: f64 = 1013.25;

/// kg/m²/s -> mm/day
pub fn rainfall_mm_per_day(mass_flux: f64) -> f64 {
    mass_flux * SECONDS_PER_DAY
}

/// kg/m²/s -> cm/day
pub fn snowfall_cm_per_day(mass_flux: f64) -> f64 {
    mass_flux * SECONDS_PER_DAY * 100.0
}

/// Kelvin -> °C
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

/// Vector magnitude of the component-wise time-averaged wind, m/s -> km/h.
///
/// The magnitude is taken over the already-averaged components, never the
/// average of instantaneous magnitudes.
pub fn wind_speed_kmh(u_mean: f64, v_mean: f64) -> f64 {
    (u_mean * u_mean + v_mean * v_mean).sqrt() * 3.6
}

/// Relative humidity (%) from specific humidity (kg/kg) and temperature (°C),
/// via the Tetens saturation-vapor-pressure formula at an assumed surface
/// pressure of 1013.25 hPa.
pub fn relative_humidity(specific_humidity: f64, temp_celsius: f64) -> f64 {
    let q = specific_humidity;
    let e = (q * SURFACE_PRESSURE_HPA) / (0.622 + 0.378 * q);
    let es = 6.112 * ((17.67 * temp_celsius) / (temp_celsius + 243.5)).exp();
    100.0 * e / es
}

/// Fallback when the paired temperature field is unavailable: treat specific
/// humidity as a fraction and scale to percent.
pub fn relative_humidity_approx(specific_humidity: f64) -> f64 {
    specific_humidity * 100.0
}

/// The affine conversion for scalar variables. AirQuality (optical depth)
/// passes through unchanged; wind speed and humidity are derived elsewhere.
pub fn convert_scalar(variable_name: &str, raw: f64) -> f64 {
    match variable_name {
        "Rainfall" => rainfall_mm_per_day(raw),
        "Snowfall" => snowfall_cm_per_day(raw),
        "Temperature" => kelvin_to_celsius(raw),
        _ => raw,
    }
}
