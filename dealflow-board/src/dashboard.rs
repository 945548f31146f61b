//! Dashboard metrics, computed on demand from the fetched collections.
//!
//! No caching: every recomputation reads the live deal collection, so the
//! numbers can never go stale relative to what the board shows.

use dealflow_core::{Deal, Stage, StageId};

/// Per-stage row on the analytics screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StagePerformance {
    pub stage_id: StageId,
    pub name: String,
    pub count: usize,
    pub value: f64,
}

/// One step of the conversion funnel: a stage's share of the largest
/// column, in whole percent.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStep {
    pub name: String,
    pub deals: usize,
    pub percentage: u32,
}

/// Headline metrics for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub total_deals: usize,
    /// Summed value of every deal, regardless of stage.
    pub pipeline_value: f64,
    /// Deals sitting in the closed stage.
    pub closed_deals: usize,
    /// closed / total, rounded to whole percent. Zero when there are no
    /// deals.
    pub conversion_rate: u32,
    /// pipeline_value / total_deals. Zero when there are no deals.
    pub avg_deal_size: f64,
    /// Summed value of the closed stage only.
    pub total_revenue: f64,
    /// Deals in any stage other than the closed one (unmatched stage ids
    /// count as active; they are still open work).
    pub active_deals: usize,
    pub stage_performance: Vec<StagePerformance>,
    pub conversion_funnel: Vec<FunnelStep>,
}

impl DashboardMetrics {
    /// Compute the full metric set. `closed_stage` names which stage
    /// counts as won; it is a parameter rather than a convention so the
    /// metrics work against any stage set.
    pub fn compute(stages: &[Stage], deals: &[Deal], closed_stage: &str) -> Self {
        let total_deals = deals.len();
        let pipeline_value: f64 = deals.iter().map(|d| d.value).sum();

        let closed: Vec<&Deal> = deals.iter().filter(|d| d.stage == closed_stage).collect();
        let closed_deals = closed.len();
        let total_revenue: f64 = closed.iter().map(|d| d.value).sum();
        let active_deals = total_deals - closed_deals;

        let conversion_rate = if total_deals > 0 {
            ((closed_deals as f64 / total_deals as f64) * 100.0).round() as u32
        } else {
            0
        };
        let avg_deal_size = if total_deals > 0 {
            pipeline_value / total_deals as f64
        } else {
            0.0
        };

        let stage_counts: Vec<(usize, f64)> = stages
            .iter()
            .map(|stage| {
                let members = deals.iter().filter(|d| d.stage == stage.id);
                let (count, value) = members.fold((0, 0.0), |(c, v), d| (c + 1, v + d.value));
                (count, value)
            })
            .collect();

        let stage_performance = stages
            .iter()
            .zip(&stage_counts)
            .map(|(stage, &(count, value))| StagePerformance {
                stage_id: stage.id.clone(),
                name: stage.name.clone(),
                count,
                value,
            })
            .collect();

        let max_count = stage_counts.iter().map(|&(c, _)| c).max().unwrap_or(0);
        let conversion_funnel = stages
            .iter()
            .zip(&stage_counts)
            .map(|(stage, &(count, _))| FunnelStep {
                name: stage.name.clone(),
                deals: count,
                percentage: if max_count > 0 {
                    ((count as f64 / max_count as f64) * 100.0).round() as u32
                } else {
                    0
                },
            })
            .collect();

        DashboardMetrics {
            total_deals,
            pipeline_value,
            closed_deals,
            conversion_rate,
            avg_deal_size,
            total_revenue,
            active_deals,
            stage_performance,
            conversion_funnel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_test_utils::{deal, stage};

    fn stages() -> Vec<Stage> {
        vec![
            stage("cold-lead", "Cold Lead", 1),
            stage("hot-lead", "Hot Lead", 2),
            stage("estimate-sent", "Estimate Sent", 3),
            stage("deal-closed", "Deal Closed", 4),
        ]
    }

    #[test]
    fn test_empty_collection_yields_zeroes() {
        let metrics = DashboardMetrics::compute(&stages(), &[], "deal-closed");
        assert_eq!(metrics.total_deals, 0);
        assert_eq!(metrics.pipeline_value, 0.0);
        assert_eq!(metrics.conversion_rate, 0);
        assert_eq!(metrics.avg_deal_size, 0.0);
        assert!(metrics.conversion_funnel.iter().all(|s| s.percentage == 0));
    }

    #[test]
    fn test_headline_metrics() {
        let deals = vec![
            deal(1, "cold-lead", 10_000.0),
            deal(2, "hot-lead", 20_000.0),
            deal(3, "deal-closed", 30_000.0),
            deal(4, "deal-closed", 40_000.0),
        ];
        let metrics = DashboardMetrics::compute(&stages(), &deals, "deal-closed");

        assert_eq!(metrics.total_deals, 4);
        assert_eq!(metrics.pipeline_value, 100_000.0);
        assert_eq!(metrics.closed_deals, 2);
        assert_eq!(metrics.conversion_rate, 50);
        assert_eq!(metrics.avg_deal_size, 25_000.0);
        assert_eq!(metrics.total_revenue, 70_000.0);
        assert_eq!(metrics.active_deals, 2);
    }

    #[test]
    fn test_stage_performance_rows_follow_stage_order() {
        let deals = vec![deal(1, "hot-lead", 500.0), deal(2, "hot-lead", 700.0)];
        let metrics = DashboardMetrics::compute(&stages(), &deals, "deal-closed");

        let names: Vec<&str> = metrics
            .stage_performance
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Cold Lead", "Hot Lead", "Estimate Sent", "Deal Closed"]);
        assert_eq!(metrics.stage_performance[1].count, 2);
        assert_eq!(metrics.stage_performance[1].value, 1200.0);
        assert_eq!(metrics.stage_performance[0].count, 0);
    }

    #[test]
    fn test_funnel_relative_to_largest_column() {
        let deals = vec![
            deal(1, "cold-lead", 1.0),
            deal(2, "cold-lead", 1.0),
            deal(3, "cold-lead", 1.0),
            deal(4, "cold-lead", 1.0),
            deal(5, "hot-lead", 1.0),
        ];
        let metrics = DashboardMetrics::compute(&stages(), &deals, "deal-closed");

        assert_eq!(metrics.conversion_funnel[0].percentage, 100);
        assert_eq!(metrics.conversion_funnel[1].percentage, 25);
        assert_eq!(metrics.conversion_funnel[3].percentage, 0);
    }

    #[test]
    fn test_unmatched_stage_counts_as_active() {
        let deals = vec![deal(1, "archived", 100.0), deal(2, "deal-closed", 50.0)];
        let metrics = DashboardMetrics::compute(&stages(), &deals, "deal-closed");

        // pipeline value still counts every deal; stage rows only the matched
        assert_eq!(metrics.pipeline_value, 150.0);
        assert_eq!(metrics.active_deals, 1);
        let placed: usize = metrics.stage_performance.iter().map(|p| p.count).sum();
        assert_eq!(placed, 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let deals = vec![deal(1, "cold-lead", 123.45), deal(2, "hot-lead", 67.89)];
        let first = DashboardMetrics::compute(&stages(), &deals, "deal-closed");
        let second = DashboardMetrics::compute(&stages(), &deals, "deal-closed");
        assert_eq!(first, second);
    }
}
