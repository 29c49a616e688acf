//! @ai:module:intent Build the ordered content blocks of a report and paginate them
//! @ai:module:layer application
//! @ai:module:public_api ReportAssembler, ReportAnalysis, AssembledReport, RECOMMENDATIONS
//! @ai:module:stateless true

use crate::analysis::{analyze_all, CategoryAnalysis, MetricOutcome, RiskEvaluator};
use crate::catalog::RiskLevel;
use crate::config::{LayoutConfig, ReportConfig};
use crate::input::{ClientInfo, ReportRequest};
use crate::layout::{
    wrap_text, ContentBlock, Document, FitBox, ImageBlock, PaginationEngine, TextBlock, TextRole,
};
use crate::report::charts::{ChartDataset, ChartRendererTrait};
use crate::scoring::{
    score_analyses, CategoryAggregator, CategoryScores, MissingCategoryPolicy, ScoreBand,
    WeightedScorer,
};
use chrono::NaiveDate;
use serde::Serialize;

pub const REPORT_TITLE: &str = "Environmental Test Report";
pub const RECOMMENDATIONS_HEADING: &str = "Care Notes & Recommendations";

/// Fixed closing guidance, one entry per risk level.
pub static RECOMMENDATIONS: [(RiskLevel, &str, &str); 3] = [
    (
        RiskLevel::Normal,
        "Normal Levels",
        "Parameters within normal range require routine monitoring. Continue regular maintenance and testing schedules.",
    ),
    (
        RiskLevel::Warning,
        "Warning Levels",
        "Elevated parameters require attention. Investigate sources, improve ventilation, and consider professional assessment. Retest within 30 days.",
    ),
    (
        RiskLevel::High,
        "High Risk Levels",
        "Immediate action required. Contact environmental health professionals for remediation. Limit exposure until levels are reduced. Follow all safety protocols.",
    ),
];

/// @ai:intent Evaluated results and scores of one report, independent of layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnalysis {
    pub client: ClientInfo,
    pub report_date: NaiveDate,
    pub categories: Vec<CategoryAnalysis>,
    pub scores: CategoryScores,
    pub overall_score: f64,
    pub overall_band: ScoreBand,
    pub missing_category_policy: MissingCategoryPolicy,
}

/// @ai:intent A finished report: analysis, the charts requested, and the paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    pub analysis: ReportAnalysis,
    /// Datasets of every chart that was drawn, in document order.
    pub charts: Vec<ChartDataset>,
    pub document: Document,
}

/// @ai:intent Orchestrates evaluation, scoring, chart requests and pagination
pub struct ReportAssembler<R: ChartRendererTrait> {
    renderer: R,
    evaluator: RiskEvaluator,
    aggregator: CategoryAggregator,
    scorer: WeightedScorer,
    paginator: PaginationEngine,
    layout: LayoutConfig,
}

impl<R: ChartRendererTrait> ReportAssembler<R> {
    /// @ai:intent Create an assembler with the given renderer and configuration
    /// @ai:effects pure
    pub fn new(renderer: R, config: &ReportConfig) -> Self {
        Self {
            renderer,
            evaluator: RiskEvaluator::new(),
            aggregator: CategoryAggregator::new(),
            scorer: WeightedScorer::new(config.scoring.missing_category),
            paginator: PaginationEngine::new(config.page),
            layout: config.layout.clone(),
        }
    }

    /// @ai:effects pure
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// @ai:intent Evaluate and score a request without laying anything out
    /// @ai:effects pure
    pub fn analyze(&self, request: &ReportRequest, report_date: NaiveDate) -> ReportAnalysis {
        let categories = analyze_all(&self.evaluator, &request.measurements);
        let scores = score_analyses(&self.aggregator, &categories);
        let overall_score = self.scorer.score(&scores);

        ReportAnalysis {
            client: request.client.clone(),
            report_date,
            categories,
            scores,
            overall_score,
            overall_band: ScoreBand::from_score(overall_score),
            missing_category_policy: self.scorer.policy(),
        }
    }

    /// @ai:intent Produce the full report for a request
    /// @ai:post the test date is the report date when given, otherwise today
    /// @ai:effects cpu
    pub async fn assemble(&self, request: &ReportRequest) -> AssembledReport {
        let report_date = request
            .client
            .test_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        self.assemble_on(request, report_date).await
    }

    /// @ai:intent Produce the full report with an explicit report date
    /// @ai:post block order: title, client, categories, overall score, summary chart, recommendations
    /// @ai:effects cpu
    pub async fn assemble_on(&self, request: &ReportRequest, report_date: NaiveDate) -> AssembledReport {
        let analysis = self.analyze(request, report_date);
        let mut blocks = Vec::new();
        let mut charts = Vec::new();

        blocks.push(self.text(TextRole::Title, REPORT_TITLE, self.layout.title_line_height_pt));
        blocks.push(self.client_block(&analysis.client, report_date));

        for category in &analysis.categories {
            let score = analysis.scores.get(category.category);
            blocks.push(self.section_heading(category, score));

            for outcome in category.results.iter() {
                blocks.push(self.metric_block(outcome));
                if let Some(guidance) = &outcome.guidance {
                    let text = format!(
                        "Typical range: {}\nLikely causes: {}\nRecommended actions: {}",
                        guidance.typical_range, guidance.causes, guidance.actions
                    );
                    blocks.push(self.text(TextRole::Guidance, &text, self.layout.line_height_pt));
                }
            }

            for key in &category.unavailable {
                let text = format!(
                    "{}: not a recognised {} measurement, result unavailable.",
                    key, category.category
                );
                blocks.push(self.text(TextRole::Unavailable, &text, self.layout.line_height_pt));
            }

            if category.has_nonzero_data() {
                let dataset = ChartDataset::for_category(category);
                let fit = self.layout.category_chart_box;
                blocks.push(self.chart_block(&dataset, fit, &mut charts).await);
            } else {
                let text = if category.results.is_empty() {
                    format!("No {} measurements were submitted.", category.category)
                } else {
                    format!("All {} measurements read zero; no chart drawn.", category.category)
                };
                blocks.push(self.text(TextRole::Placeholder, &text, self.layout.line_height_pt));
            }
        }

        blocks.push(self.overall_block(&analysis));

        let summary = ChartDataset::summary(&analysis.scores);
        if summary.bars.is_empty() {
            blocks.push(self.text(
                TextRole::Placeholder,
                "No category scores to chart.",
                self.layout.line_height_pt,
            ));
        } else {
            let fit = self.layout.summary_chart_box;
            blocks.push(self.chart_block(&summary, fit, &mut charts).await);
        }

        blocks.push(
            TextBlock::new(
                TextRole::Recommendation,
                vec![RECOMMENDATIONS_HEADING.to_string()],
                self.layout.heading_line_height_pt,
            )
            .keep_with_next(self.layout.section_reserve_pt)
            .into(),
        );
        for (_, title, body) in &RECOMMENDATIONS {
            let text = format!("{}: {}", title, body);
            blocks.push(self.text(TextRole::Recommendation, &text, self.layout.line_height_pt));
        }

        let document = self.paginator.layout(blocks);
        tracing::info!(
            "Assembled report for {} ({} pages, overall score {:.1})",
            analysis.client.name,
            document.page_count(),
            analysis.overall_score
        );

        AssembledReport {
            analysis,
            charts,
            document,
        }
    }

    /// @ai:effects pure
    fn text(&self, role: TextRole, text: &str, line_height_pt: f64) -> ContentBlock {
        TextBlock::new(role, wrap_text(text, self.layout.wrap_chars), line_height_pt).into()
    }

    /// @ai:effects pure
    fn client_block(&self, client: &ClientInfo, report_date: NaiveDate) -> ContentBlock {
        let mut lines = vec![format!("Client: {}", client.name)];
        for (label, value) in [
            ("Email", &client.email),
            ("Address", &client.address),
            ("Phone", &client.phone_number),
        ] {
            if !value.trim().is_empty() {
                lines.push(format!("{}: {}", label, value));
            }
        }
        lines.push(format!("Report date: {}", report_date.format("%Y-%m-%d")));

        let lines = lines
            .iter()
            .flat_map(|line| wrap_text(line, self.layout.wrap_chars))
            .collect();
        TextBlock::new(TextRole::ClientInfo, lines, self.layout.line_height_pt).into()
    }

    /// @ai:effects pure
    fn section_heading(&self, category: &CategoryAnalysis, score: Option<f64>) -> ContentBlock {
        let score_line = match score {
            Some(score) => format!(
                "Category score: {:.1} / 100 ({})",
                score,
                ScoreBand::from_score(score)
            ),
            None => "Category score: not available".to_string(),
        };
        TextBlock::new(
            TextRole::SectionHeading,
            vec![category.category.title().to_string(), score_line],
            self.layout.heading_line_height_pt,
        )
        .keep_with_next(self.layout.section_reserve_pt)
        .into()
    }

    /// @ai:effects pure
    fn metric_block(&self, outcome: &MetricOutcome) -> ContentBlock {
        let text = format!(
            "{}: {} {} - {}. {}",
            outcome.label,
            outcome.result.value,
            outcome.unit,
            outcome.result.level.as_str().to_uppercase(),
            outcome.result.message
        );
        self.text(TextRole::Metric, &text, self.layout.line_height_pt)
    }

    /// @ai:effects pure
    fn overall_block(&self, analysis: &ReportAnalysis) -> ContentBlock {
        let mut text = format!(
            "Overall Health Score: {:.1} / 100 ({})",
            analysis.overall_score, analysis.overall_band
        );

        let missing = analysis
            .categories
            .iter()
            .filter(|c| analysis.scores.get(c.category).is_none())
            .count();
        if missing > 0 {
            let note = match analysis.missing_category_policy {
                MissingCategoryPolicy::Exclude => {
                    "Categories without measurements are left out of the overall score."
                }
                MissingCategoryPolicy::Zero => {
                    "Categories without measurements count as zero in the overall score."
                }
            };
            text.push('\n');
            text.push_str(note);
        }

        self.text(TextRole::OverallScore, &text, self.layout.heading_line_height_pt)
    }

    /// @ai:intent Request a chart; fall back to a text summary if rendering fails
    /// @ai:effects cpu
    async fn chart_block(
        &self,
        dataset: &ChartDataset,
        fit: FitBox,
        charts: &mut Vec<ChartDataset>,
    ) -> ContentBlock {
        match self.renderer.render(dataset).await {
            Ok(image) => {
                charts.push(dataset.clone());
                ImageBlock::new(
                    image.bytes,
                    image.width_px,
                    image.height_px,
                    image.format,
                    &dataset.title,
                )
                .fit_into(fit)
                .into()
            }
            Err(err) => {
                tracing::warn!("Chart {} failed, using text summary: {}", dataset.id, err);
                let mut lines = vec![format!("{} (chart unavailable)", dataset.title)];
                lines.extend(
                    dataset
                        .summary_lines()
                        .iter()
                        .flat_map(|line| wrap_text(line, self.layout.wrap_chars)),
                );
                TextBlock::new(TextRole::ChartFallback, lines, self.layout.line_height_pt).into()
            }
        }
    }
}
