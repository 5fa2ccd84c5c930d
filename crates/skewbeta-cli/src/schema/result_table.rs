use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skewbeta_sim::{
    config::SimulationConfig,
    table::{ResultTable, SkewnessBetaPoint, TableRow},
};

/// Exported result table together with the configuration that produced it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct ResultDocument {
    pub generated_at: DateTime<Utc>,
    pub config: SimulationConfig,
    pub undefined_trials: usize,
    pub rows: Vec<TableRow>,
}

impl ResultDocument {
    pub(crate) fn new(config: &SimulationConfig, table: &ResultTable) -> Self {
        Self {
            generated_at: Utc::now(),
            config: config.clone(),
            undefined_trials: table.undefined_count(),
            rows: table.rows().collect(),
        }
    }

    /// Points of the rows with defined skewness and coefficients.
    pub(crate) fn points(&self) -> impl Iterator<Item = SkewnessBetaPoint> + '_ {
        self.rows.iter().filter_map(TableRow::point)
    }
}

#[cfg(test)]
mod tests {
    use skewbeta_sim::simulator::Simulator;

    use super::*;

    #[test]
    fn test_document_round_trips_through_json() {
        let config = SimulationConfig {
            trial_count: 5,
            sample_size: 40,
            ..SimulationConfig::default()
        };
        let table = Simulator::new(config.clone()).unwrap().run().unwrap();
        let document = ResultDocument::new(&config, &table);
        assert_eq!(document.rows.len(), 5);
        assert!(document.undefined_trials >= 2);

        let json = serde_json::to_string(&document).unwrap();
        let parsed: ResultDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.config, config);
        assert_eq!(parsed.rows, document.rows);
        assert_eq!(parsed.generated_at, document.generated_at);
        assert_eq!(
            parsed.points().count(),
            table.len() - table.undefined_count()
        );
    }
}
