//! Fuel cost estimation.
//!
//! The model is deliberately simple: litres burned scale linearly with
//! distance, and cost scales linearly with litres.
//!
//! `cost = (distance_km / efficiency_km_per_liter) * price_per_liter`

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fuel price used when the caller does not supply one.
pub const DEFAULT_FUEL_PRICE_PER_LITER: f64 = 1.5;

/// Vehicle efficiency used when the caller does not supply one.
pub const DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER: f64 = 8.0;

/// Price and efficiency parameters for a cost estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPricing {
    /// Price of one litre of fuel (currency units).
    pub price_per_liter: f64,
    /// Kilometres driven per litre of fuel.
    pub efficiency_km_per_liter: f64,
}

impl Default for FuelPricing {
    fn default() -> Self {
        Self {
            price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
            efficiency_km_per_liter: DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER,
        }
    }
}

impl FuelPricing {
    /// Build and validate a pricing configuration.
    pub fn new(price_per_liter: f64, efficiency_km_per_liter: f64) -> Result<Self> {
        let pricing = Self {
            price_per_liter,
            efficiency_km_per_liter,
        };
        pricing.validate()?;
        Ok(pricing)
    }

    /// Validate the pricing configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.price_per_liter.is_finite() || self.price_per_liter < 0.0 {
            return Err(Error::invalid_argument(
                "fuel_price_per_liter",
                format!(
                    "must be finite and non-negative, got {}",
                    self.price_per_liter
                ),
            ));
        }

        if !self.efficiency_km_per_liter.is_finite() || self.efficiency_km_per_liter <= 0.0 {
            return Err(Error::invalid_argument(
                "fuel_efficiency",
                format!(
                    "must be finite and positive, got {}",
                    self.efficiency_km_per_liter
                ),
            ));
        }

        Ok(())
    }
}

fn validate_distance(distance_km: f64) -> Result<()> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::invalid_argument(
            "distance_km",
            format!("must be finite and non-negative, got {}", distance_km),
        ));
    }
    Ok(())
}

/// Litres of fuel needed to cover `distance_km`.
pub fn liters_needed(distance_km: f64, pricing: &FuelPricing) -> Result<f64> {
    validate_distance(distance_km)?;
    pricing.validate()?;
    Ok(distance_km / pricing.efficiency_km_per_liter)
}

/// Estimated fuel cost for `distance_km`.
///
/// # Examples
/// ```
/// use freightgis_lib::{estimate_fuel_cost, FuelPricing};
///
/// let pricing = FuelPricing::new(2.0, 8.0).unwrap();
/// assert_eq!(estimate_fuel_cost(500.0, &pricing).unwrap(), 125.0);
/// assert_eq!(estimate_fuel_cost(0.0, &FuelPricing::default()).unwrap(), 0.0);
/// ```
pub fn estimate_fuel_cost(distance_km: f64, pricing: &FuelPricing) -> Result<f64> {
    Ok(liters_needed(distance_km, pricing)? * pricing.price_per_liter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let pricing = FuelPricing::default();
        assert_eq!(pricing.price_per_liter, 1.5);
        assert_eq!(pricing.efficiency_km_per_liter, 8.0);
    }

    #[test]
    fn zero_efficiency_is_rejected() {
        let err = FuelPricing::new(1.5, 0.0).unwrap_err();
        assert!(err.to_string().contains("fuel_efficiency"));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(FuelPricing::new(-0.1, 8.0).is_err());
    }

    #[test]
    fn free_fuel_costs_nothing() {
        let pricing = FuelPricing::new(0.0, 8.0).unwrap();
        assert_eq!(estimate_fuel_cost(1000.0, &pricing).unwrap(), 0.0);
    }

    #[test]
    fn literal_pricing_is_validated_on_use() {
        let pricing = FuelPricing {
            price_per_liter: 1.0,
            efficiency_km_per_liter: -2.0,
        };
        assert!(estimate_fuel_cost(10.0, &pricing).is_err());
    }

    #[test]
    fn negative_distance_is_rejected() {
        assert!(estimate_fuel_cost(-5.0, &FuelPricing::default()).is_err());
    }

    #[test]
    fn liters_scale_with_efficiency() {
        let pricing = FuelPricing::new(2.5, 7.5).unwrap();
        assert!((liters_needed(1000.0, &pricing).unwrap() - 133.333_333).abs() < 1e-5);
        assert!((estimate_fuel_cost(1000.0, &pricing).unwrap() - 333.333_333).abs() < 1e-5);
    }
}
