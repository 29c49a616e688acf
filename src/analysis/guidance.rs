//! @ai:module:intent Per-metric guidance text: typical range, likely causes, actions
//! @ai:module:layer domain
//! @ai:module:public_api Guidance, guidance_for
//! @ai:module:stateless true

use serde::Serialize;

/// @ai:intent Resolved guidance for one metric reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub typical_range: &'static str,
    pub causes: &'static str,
    pub actions: &'static str,
}

/// Value-specific override. Missing fields fall back to the metric's defaults.
struct GuidanceRange {
    min: Option<f64>,
    max: Option<f64>,
    typical_range: &'static str,
    causes: &'static str,
    actions: &'static str,
}

impl GuidanceRange {
    fn admits(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

struct GuidanceEntry {
    key: &'static str,
    defaults: Guidance,
    ranges: &'static [GuidanceRange],
}

const fn entry(
    key: &'static str,
    typical_range: &'static str,
    causes: &'static str,
    actions: &'static str,
) -> GuidanceEntry {
    GuidanceEntry {
        key,
        defaults: Guidance {
            typical_range,
            causes,
            actions,
        },
        ranges: &[],
    }
}

static FLOOR_DUST_RANGES: [GuidanceRange; 3] = [
    GuidanceRange {
        min: Some(0.0),
        max: Some(9.99),
        typical_range: "<10 µg/ft²",
        causes: "Normal background; routine household dust",
        actions: "Routine cleaning and HEPA vacuuming",
    },
    GuidanceRange {
        min: Some(10.0),
        max: Some(99.99),
        typical_range: "10-99 µg/ft²",
        causes: "Elevated lead dust - possible localized lead sources",
        actions: "Targeted cleaning, consider source investigation",
    },
    GuidanceRange {
        min: Some(100.0),
        max: None,
        typical_range: ">=100 µg/ft²",
        causes: "Significant contamination; likely active lead sources",
        actions: "Professional cleaning/abatement and occupant protection",
    },
];

static WINDOW_SILL_RANGES: [GuidanceRange; 3] = [
    GuidanceRange {
        min: Some(0.0),
        max: Some(99.99),
        typical_range: "<100 µg/ft²",
        causes: "Typical deposited dust on sills",
        actions: "Wipe/scrub with HEPA-filtered cleaning",
    },
    GuidanceRange {
        min: Some(100.0),
        max: Some(399.99),
        typical_range: "100-399 µg/ft²",
        causes: "Elevated - likely paint wear or nearby sources",
        actions: "Deep cleaning and inspect paint condition",
    },
    GuidanceRange {
        min: Some(400.0),
        max: None,
        typical_range: ">=400 µg/ft²",
        causes: "High contamination; likely ongoing source",
        actions: "Professional abatement recommended",
    },
];

static WINDOW_TROUGH_RANGES: [GuidanceRange; 3] = [
    GuidanceRange {
        min: Some(0.0),
        max: Some(399.99),
        typical_range: "<400 µg/ft²",
        causes: "Normal accumulation",
        actions: "Routine cleaning",
    },
    GuidanceRange {
        min: Some(400.0),
        max: Some(999.99),
        typical_range: "400-999 µg/ft²",
        causes: "Elevated accumulation from nearby sources",
        actions: "Deep clean and investigate nearby paint or soil sources",
    },
    GuidanceRange {
        min: Some(1000.0),
        max: None,
        typical_range: ">=1000 µg/ft²",
        causes: "Severe contamination",
        actions: "Professional remediation and occupant protection",
    },
];

static GUIDANCE: [GuidanceEntry; 12] = [
    entry(
        "carbonDioxide",
        "~400-800 ppm (typical indoor range)",
        "Occupant density, ventilation, combustion sources",
        "Increase ventilation, inspect HVAC, reduce sources",
    ),
    entry(
        "carbonMonoxide",
        "Near 0 ppm in typical homes",
        "Combustion appliances, vehicle exhaust",
        "Ventilate, inspect appliances, use CO alarms",
    ),
    entry(
        "pm25",
        "~5-15 µg/m³ typical indoors",
        "Outdoor pollution infiltration, indoor combustion",
        "Increase filtration, reduce indoor smoking/cooking emissions",
    ),
    entry(
        "relativeHumidity",
        "30-50% typical indoor range",
        "HVAC settings, outdoor humidity, moisture sources",
        "Use dehumidifiers/humidifiers, repair leaks",
    ),
    entry(
        "lead",
        "< 1 ppb in most treated systems (varies)",
        "Lead service lines, solder, plumbing fixtures",
        "Flush lines, use certified filters, replace plumbing",
    ),
    entry(
        "arsenic",
        "Generally low in municipal supplies",
        "Groundwater sources, industrial contamination",
        "Use treatment, test source, consult utility",
    ),
    entry(
        "pfas",
        "Typically non-detect to low ppt levels",
        "Industrial runoff, firefighting foams",
        "Use PFAS-specific treatment, contact authorities",
    ),
    entry(
        "leadPaintXRF",
        "Most modern renovated surfaces: non-detect to low",
        "Legacy lead paint in older buildings",
        "Encapsulation, abatement, targeted cleaning",
    ),
    entry(
        "surfaceMold",
        "Variable - typically low when dry",
        "Moisture intrusion, poor ventilation",
        "Dry the area, remediate mold, investigate source",
    ),
    GuidanceEntry {
        ranges: &FLOOR_DUST_RANGES,
        ..entry(
            "floorDust",
            "Typically <10 µg/ft² in cleaned homes",
            "Lead paint, tracked-in soil",
            "Professional cleaning, HEPA vacuuming",
        )
    },
    GuidanceEntry {
        ranges: &WINDOW_SILL_RANGES,
        ..entry(
            "windowSill",
            "Typically <100 µg/ft²",
            "Exterior paint wear, traffic",
            "Targeted cleaning, abatement if high",
        )
    },
    GuidanceEntry {
        ranges: &WINDOW_TROUGH_RANGES,
        ..entry(
            "windowTrough",
            "Typically <400 µg/ft²",
            "Accumulation from sill and exterior",
            "Clean troughs, reduce sources",
        )
    },
];

/// @ai:intent Guidance for a metric, narrowed to the value's range when one matches
/// @ai:post None when the metric has no guidance text
/// @ai:effects pure
pub fn guidance_for(metric_key: &str, value: Option<f64>) -> Option<Guidance> {
    let entry = GUIDANCE.iter().find(|e| e.key == metric_key)?;

    let matched = value
        .filter(|v| !v.is_nan())
        .and_then(|v| entry.ranges.iter().find(|r| r.admits(v)));

    Some(match matched {
        Some(range) => Guidance {
            typical_range: range.typical_range,
            causes: range.causes,
            actions: range.actions,
        },
        None => entry.defaults,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_value() {
        let guidance = guidance_for("carbonDioxide", None).unwrap();
        assert_eq!(guidance.typical_range, "~400-800 ppm (typical indoor range)");
    }

    #[test]
    fn test_value_specific_range() {
        let guidance = guidance_for("windowSill", Some(150.0)).unwrap();
        assert_eq!(guidance.typical_range, "100-399 µg/ft²");

        let guidance = guidance_for("windowSill", Some(400.0)).unwrap();
        assert_eq!(guidance.actions, "Professional abatement recommended");
    }

    #[test]
    fn test_gap_between_ranges_falls_back_to_defaults() {
        let guidance = guidance_for("floorDust", Some(9.995)).unwrap();
        assert_eq!(guidance.typical_range, "Typically <10 µg/ft² in cleaned homes");
    }

    #[test]
    fn test_metric_without_guidance() {
        assert!(guidance_for("microplastics", Some(600.0)).is_none());
    }
}
