//! @ai:module:intent Environmental risk classification and paginated report composition
//! @ai:module:layer application
//! @ai:module:public_api catalog, analysis, scoring, layout, report, config, delivery, input, output

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod input;
pub mod layout;
pub mod output;
pub mod report;
pub mod scoring;

pub use analysis::{analyze_all, AnalysisResult, CategoryAnalysis, RiskEvaluator, RiskEvaluatorTrait};
pub use catalog::{Category, MetricCatalog, MetricDefinition, RiskLevel};
pub use config::ReportConfig;
pub use delivery::{DeliveryClientTrait, MockDeliveryClient, WebhookClient, WebhookPayload};
pub use error::{Error, Result};
pub use input::{ClientInfo, Measurements, RawValue, ReportRequest};
pub use layout::{ContentBlock, Document, PageSpec, PaginationEngine};
pub use report::{
    AssembledReport, PlottersChartRenderer, ReportAnalysis, ReportAssembler, ReportGenerator,
};
pub use scoring::{CategoryAggregator, MissingCategoryPolicy, ScoreBand, WeightedScorer};
