//! @ai:module:intent Built-in metric thresholds for air, water, surface and dust tests
//! @ai:module:layer domain
//! @ai:module:public_api BUILTIN_METRICS
//! @ai:module:stateless true

use crate::catalog::metric::{Category, MetricDefinition, RiskLevel, Tier};

use RiskLevel::{High, Normal, Warning};

// ---------------- AIR ----------------

static CARBON_DIOXIDE: [Tier; 3] = [
    Tier::at_most(1000.0, Normal, "Within healthy indoor range."),
    Tier::at_most(2000.0, Warning, "Elevated levels - improve ventilation."),
    Tier::above(High, "High CO2 - poor ventilation, take action immediately."),
];

static CARBON_MONOXIDE: [Tier; 3] = [
    Tier::at_most(1.0, Normal, "Safe CO levels."),
    Tier::at_most(8.0, Warning, "Slightly elevated - check gas appliances."),
    Tier::above(High, "Dangerous CO concentration - evacuate and ventilate!"),
];

static NITROGEN_DIOXIDE: [Tier; 3] = [
    Tier::at_most(30.0, Normal, "Normal range."),
    Tier::at_most(
        100.0,
        Warning,
        "Elevated - possible gas stove or boiler emissions.",
    ),
    Tier::above(High, "High - check combustion sources immediately."),
];

static PM25: [Tier; 3] = [
    Tier::at_most(12.0, Normal, "Good air quality."),
    Tier::at_most(35.0, Warning, "Moderate - may affect sensitive groups."),
    Tier::above(High, "Unhealthy - reduce exposure."),
];

static PM10: [Tier; 3] = [
    Tier::at_most(50.0, Normal, "Clean air."),
    Tier::at_most(150.0, Warning, "Elevated particulate matter - ventilate."),
    Tier::above(High, "Very high dust - investigate source."),
];

// Band-shaped: both sides of the 40-55% window are a risk. Readings between
// the whole-number warning and normal ranges (39-40, 55-56) count as high.
static RELATIVE_HUMIDITY: [Tier; 7] = [
    Tier::below(30.0, High, "Risk of mold or dryness - adjust humidity."),
    Tier::at_most(39.0, Warning, "Slightly outside comfort zone - monitor."),
    Tier::below(40.0, High, "Risk of mold or dryness - adjust humidity."),
    Tier::at_most(55.0, Normal, "Optimal humidity range."),
    Tier::below(56.0, High, "Risk of mold or dryness - adjust humidity."),
    Tier::at_most(65.0, Warning, "Slightly outside comfort zone - monitor."),
    Tier::above(High, "Risk of mold or dryness - adjust humidity."),
];

static FORMALDEHYDE: [Tier; 3] = [
    Tier::at_most(30.0, Normal, "Normal indoor level."),
    Tier::at_most(
        80.0,
        Warning,
        "Elevated - check for off-gassing from furniture or flooring.",
    ),
    Tier::above(High, "High - improve ventilation immediately."),
];

static TVOC: [Tier; 3] = [
    Tier::at_most(500.0, Normal, "Normal air quality."),
    Tier::at_most(1000.0, Warning, "Elevated VOCs - ventilate."),
    Tier::above(High, "High VOCs - possible chemical contamination."),
];

// ---------------- WATER ----------------

static LEAD: [Tier; 3] = [
    Tier::at_most(5.0, Normal, "Safe for daily consumption."),
    Tier::at_most(14.0, Warning, "Concerning - re-test soon."),
    Tier::above(
        High,
        "Hazardous - stop consumption, investigate plumbing.",
    ),
];

static ARSENIC: [Tier; 3] = [
    Tier::at_most(5.0, Normal, "Safe levels."),
    Tier::at_most(9.0, Warning, "Slightly elevated - re-test."),
    Tier::above(High, "Exceeds safe limit - unsafe."),
];

static CADMIUM: [Tier; 3] = [
    Tier::at_most(2.0, Normal, "Normal range."),
    Tier::at_most(4.0, Warning, "Elevated - monitor source."),
    Tier::above(High, "Hazardous - check pipes or fittings."),
];

static CHROMIUM: [Tier; 3] = [
    Tier::at_most(50.0, Normal, "Safe levels."),
    Tier::at_most(99.0, Warning, "Moderate - monitor levels."),
    Tier::above(High, "High - requires filtration."),
];

static MERCURY: [Tier; 3] = [
    Tier::at_most(1.0, Normal, "Safe levels."),
    Tier::at_most(1.9, Warning, "Slightly elevated - re-test."),
    Tier::above(High, "Hazardous mercury levels."),
];

static PFAS: [Tier; 3] = [
    Tier::at_most(2.0, Normal, "Below EPA limit."),
    Tier::at_most(3.9, Warning, "Near limit - re-test."),
    Tier::above(High, "Exceeds limit - consider filtration."),
];

static MICROPLASTICS: [Tier; 3] = [
    Tier::at_most(100.0, Normal, "Normal range."),
    Tier::at_most(500.0, Warning, "Elevated - possible plastic residue."),
    Tier::above(High, "High - contamination likely."),
];

// ---------------- SURFACE ----------------

static LEAD_PAINT_XRF: [Tier; 3] = [
    Tier::at_most(0.4, Normal, "Within normal range - no action needed."),
    Tier::at_most(
        0.9,
        Warning,
        "Slightly elevated - may occur on older surfaces; consider monitoring or re-testing.",
    ),
    Tier::above(
        High,
        "Hazardous lead level - professional evaluation or remediation advised.",
    ),
];

static SURFACE_MOLD: [Tier; 3] = [
    Tier::at_most(50.0, Normal, "Typical background mold - no concern."),
    Tier::at_most(
        500.0,
        Warning,
        "Moderately elevated - monitor or re-test in 6 months.",
    ),
    Tier::above(
        High,
        "High mold levels - indicates active growth; remediation recommended.",
    ),
];

// ---------------- DUST ----------------

static FLOOR_DUST: [Tier; 3] = [
    Tier::at_most(5.0, Normal, "Lead dust within safe limits."),
    Tier::at_most(9.0, Warning, "Slightly elevated - re-clean and re-test."),
    Tier::above(High, "Hazardous - cleaning or abatement needed."),
];

static WINDOW_SILL: [Tier; 3] = [
    Tier::at_most(40.0, Normal, "Safe lead dust level."),
    Tier::at_most(99.0, Warning, "Moderate - re-clean recommended."),
    Tier::above(
        High,
        "Hazardous - exceeds EPA limit, professional cleaning required.",
    ),
];

static WINDOW_TROUGH: [Tier; 3] = [
    Tier::at_most(200.0, Normal, "Safe range."),
    Tier::at_most(399.0, Warning, "Elevated - clean and monitor."),
    Tier::above(High, "High lead level - abatement recommended."),
];

/// Every metric known to the engine, grouped by category in display order.
pub static BUILTIN_METRICS: [MetricDefinition; 20] = [
    MetricDefinition {
        key: "carbonDioxide",
        label: "Carbon Dioxide",
        short_label: "CO2",
        category: Category::Air,
        unit: "ppm",
        reference: "<=1000 ppm (EPA indoor guideline)",
        tiers: &CARBON_DIOXIDE,
    },
    MetricDefinition {
        key: "carbonMonoxide",
        label: "Carbon Monoxide",
        short_label: "CO",
        category: Category::Air,
        unit: "ppm",
        reference: "<=9 ppm (EPA indoor CO guideline)",
        tiers: &CARBON_MONOXIDE,
    },
    MetricDefinition {
        key: "nitrogenDioxide",
        label: "Nitrogen Dioxide",
        short_label: "NO2",
        category: Category::Air,
        unit: "ppb",
        reference: "<=30 ppb",
        tiers: &NITROGEN_DIOXIDE,
    },
    MetricDefinition {
        key: "pm25",
        label: "PM 2.5",
        short_label: "PM 2.5",
        category: Category::Air,
        unit: "µg/m³",
        reference: "<=12 µg/m³ (EPA daily standard)",
        tiers: &PM25,
    },
    MetricDefinition {
        key: "pm10",
        label: "PM 10",
        short_label: "PM 10",
        category: Category::Air,
        unit: "µg/m³",
        reference: "<=50 µg/m³",
        tiers: &PM10,
    },
    MetricDefinition {
        key: "relativeHumidity",
        label: "Relative Humidity",
        short_label: "RH",
        category: Category::Air,
        unit: "%",
        reference: "40-55% (optimal range)",
        tiers: &RELATIVE_HUMIDITY,
    },
    MetricDefinition {
        key: "formaldehyde",
        label: "Formaldehyde",
        short_label: "HCHO",
        category: Category::Air,
        unit: "ppb",
        reference: "<=30 ppb",
        tiers: &FORMALDEHYDE,
    },
    MetricDefinition {
        key: "tvoc",
        label: "TVOCs",
        short_label: "TVOC",
        category: Category::Air,
        unit: "ppb",
        reference: "<=500 ppb",
        tiers: &TVOC,
    },
    MetricDefinition {
        key: "lead",
        label: "Lead",
        short_label: "Lead",
        category: Category::Water,
        unit: "ppb",
        reference: "15 ppb (EPA MCL)",
        tiers: &LEAD,
    },
    MetricDefinition {
        key: "arsenic",
        label: "Arsenic",
        short_label: "Arsenic",
        category: Category::Water,
        unit: "ppb",
        reference: "10 ppb (EPA MCL)",
        tiers: &ARSENIC,
    },
    MetricDefinition {
        key: "cadmium",
        label: "Cadmium",
        short_label: "Cadmium",
        category: Category::Water,
        unit: "ppb",
        reference: "5 ppb (EPA MCL)",
        tiers: &CADMIUM,
    },
    MetricDefinition {
        key: "chromium",
        label: "Chromium",
        short_label: "Chromium",
        category: Category::Water,
        unit: "ppb",
        reference: "100 ppb (EPA MCL)",
        tiers: &CHROMIUM,
    },
    MetricDefinition {
        key: "mercury",
        label: "Mercury",
        short_label: "Mercury",
        category: Category::Water,
        unit: "ppb",
        reference: "2 ppb (EPA MCL)",
        tiers: &MERCURY,
    },
    MetricDefinition {
        key: "pfas",
        label: "PFAS",
        short_label: "PFAS",
        category: Category::Water,
        unit: "ppt",
        reference: "4 ppt (EPA MCL)",
        tiers: &PFAS,
    },
    MetricDefinition {
        key: "microplastics",
        label: "Microplastics",
        short_label: "Microplastics",
        category: Category::Water,
        unit: "particles/L",
        reference: "<=100 particles/L",
        tiers: &MICROPLASTICS,
    },
    MetricDefinition {
        key: "leadPaintXRF",
        label: "Lead Paint (XRF)",
        short_label: "Lead Paint",
        category: Category::Surface,
        unit: "mg/cm²",
        reference: ">=0.5 mg/cm² (NYC Local Law 31)",
        tiers: &LEAD_PAINT_XRF,
    },
    MetricDefinition {
        key: "surfaceMold",
        label: "Surface Mold",
        short_label: "Mold",
        category: Category::Surface,
        unit: "CFU/cm²",
        reference: ">500 CFU/cm² (threshold for concern)",
        tiers: &SURFACE_MOLD,
    },
    MetricDefinition {
        key: "floorDust",
        label: "Floor Dust",
        short_label: "Floor Dust",
        category: Category::Dust,
        unit: "µg/ft²",
        reference: "<10 µg/ft² (EPA clearance standard)",
        tiers: &FLOOR_DUST,
    },
    MetricDefinition {
        key: "windowSill",
        label: "Window Sill",
        short_label: "Window Sill",
        category: Category::Dust,
        unit: "µg/ft²",
        reference: "<100 µg/ft² (EPA clearance standard)",
        tiers: &WINDOW_SILL,
    },
    MetricDefinition {
        key: "windowTrough",
        label: "Window Trough",
        short_label: "Window Trough",
        category: Category::Dust,
        unit: "µg/ft²",
        reference: "<400 µg/ft² (EPA clearance standard)",
        tiers: &WINDOW_TROUGH,
    },
];
