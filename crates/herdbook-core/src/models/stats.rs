use serde::{Deserialize, Serialize};

/// A figure broken down by the server into current/previous month and year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PeriodStats {
    pub current_month: f64,
    pub previous_month: f64,
    pub current_year: f64,
    pub previous_year: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TypeCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AnimalStats {
    pub total_alive: i64,
    pub total_dead: i64,
    pub by_type: Vec<TypeCount>,
    pub sold: PeriodStats,
    pub purchased: PeriodStats,
}

/// Aggregated dashboard figures from `stats/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct StatsResponse {
    pub sales: PeriodStats,
    pub expenses: PeriodStats,
    pub purchases: PeriodStats,
    pub profits: PeriodStats,
    pub animals: AnimalStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_parse() {
        let json = serde_json::json!({
            "sales": {"current_month": 100.0, "previous_month": 80.0, "current_year": 900.0, "previous_year": 700.0},
            "expenses": {"current_month": 30.0, "previous_month": 25.0, "current_year": 200.0, "previous_year": 180.0},
            "purchases": {"current_month": 0.0, "previous_month": 50.0, "current_year": 120.0, "previous_year": 90.0},
            "profits": {"current_month": 70.0, "previous_month": 5.0, "current_year": 580.0, "previous_year": 430.0},
            "animals": {
                "total_alive": 42,
                "total_dead": 3,
                "by_type": [{"name": "Goat", "count": 30}, {"name": "Sheep", "count": 12}],
                "sold": {"current_month": 2.0, "previous_month": 1.0, "current_year": 9.0, "previous_year": 4.0},
                "purchased": {"current_month": 0.0, "previous_month": 1.0, "current_year": 3.0, "previous_year": 2.0}
            }
        });
        let stats: StatsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(stats.animals.total_alive, 42);
        assert_eq!(stats.animals.by_type.len(), 2);
        assert_eq!(stats.profits.current_month, 70.0);
    }
}
