//! Shipping Table
//!
//! Static governorate → (flat fee, coordinates) lookup. Loaded once as a
//! const table; no runtime mutation. Unknown or missing governorates get
//! the default fee and no coordinates.

/// Fee applied when the governorate is absent or unrecognized
pub const DEFAULT_SHIPPING_COST: f64 = 50.0;

/// Result of a shipping lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingQuote {
    pub cost: f64,
    /// (latitude, longitude) of the governorate's reference point
    pub coords: Option<(f64, f64)>,
}

/// Flat shipping fee and reference coordinates per governorate
/// (fees roughly scale with distance from Cairo)
const GOVERNORATES: &[(&str, f64, (f64, f64))] = &[
    ("Cairo", 20.0, (30.0444, 31.2357)),
    ("Giza", 25.0, (30.0131, 31.2089)),
    ("Alexandria", 35.0, (31.2001, 29.9187)),
    ("Dakahlia", 30.0, (31.0553, 31.3807)),
    ("Red_Sea", 50.0, (27.2579, 33.8116)),
    ("Beheira", 30.0, (31.0336, 30.4603)),
    ("Fayoum", 28.0, (29.3096, 30.8418)),
    ("Gharbia", 30.0, (30.8750, 31.0364)),
    ("Ismailia", 40.0, (30.5965, 32.2711)),
    ("Menofia", 28.0, (30.4675, 30.9638)),
    ("Minya", 32.0, (28.1096, 30.7500)),
    ("Qalyubia", 25.0, (30.3210, 31.2100)),
    ("New_Valley", 55.0, (25.6904, 30.5561)),
    ("Suez", 45.0, (29.9668, 32.5498)),
    ("Aswan", 60.0, (24.0889, 32.8998)),
    ("Assiut", 50.0, (27.1800, 31.1850)),
    ("Beni_Suef", 35.0, (29.0667, 31.0996)),
    ("Port_Said", 40.0, (31.2653, 32.3019)),
    ("Damietta", 40.0, (31.4167, 31.8133)),
    ("Sharkia", 35.0, (30.7821, 31.5666)),
    ("South_Sinai", 65.0, (28.5565, 33.8886)),
    ("Kafr_El_Sheikh", 30.0, (31.1110, 30.9396)),
    ("Matrouh", 70.0, (31.3546, 27.2373)),
    ("Luxor", 55.0, (25.6872, 32.6396)),
    ("Qena", 50.0, (26.1612, 32.7169)),
    ("North_Sinai", 60.0, (30.5910, 33.8010)),
    ("Sohag", 50.0, (26.5563, 31.6940)),
];

/// Look up the shipping fee and coordinates for a governorate.
pub fn lookup(governorate: Option<&str>) -> ShippingQuote {
    let Some(name) = governorate else {
        return ShippingQuote {
            cost: DEFAULT_SHIPPING_COST,
            coords: None,
        };
    };

    GOVERNORATES
        .iter()
        .find(|(g, _, _)| *g == name)
        .map(|(_, cost, coords)| ShippingQuote {
            cost: *cost,
            coords: Some(*coords),
        })
        .unwrap_or(ShippingQuote {
            cost: DEFAULT_SHIPPING_COST,
            coords: None,
        })
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cairo_is_deterministic() {
        let quote = lookup(Some("Cairo"));
        assert_eq!(quote.cost, 20.0);
        assert_eq!(quote.coords, Some((30.0444, 31.2357)));

        // Same answer every time
        assert_eq!(lookup(Some("Cairo")), quote);
    }

    #[test]
    fn test_unknown_governorate_gets_default() {
        let quote = lookup(Some("Atlantis"));
        assert_eq!(quote.cost, DEFAULT_SHIPPING_COST);
        assert_eq!(quote.coords, None);
    }

    #[test]
    fn test_missing_governorate_gets_default() {
        let quote = lookup(None);
        assert_eq!(quote.cost, DEFAULT_SHIPPING_COST);
        assert_eq!(quote.coords, None);
    }

    #[test]
    fn test_table_covers_all_governorates() {
        assert_eq!(GOVERNORATES.len(), 27);
        for (name, cost, _) in GOVERNORATES {
            let quote = lookup(Some(name));
            assert_eq!(quote.cost, *cost);
            assert!(quote.coords.is_some());
        }
    }
}
