//! Filtros y agregados del dashboard
//!
//! Los filtros se combinan por conjunción. Todos los agregados se calculan
//! sobre el subconjunto ya filtrado.

use std::collections::{BTreeMap, HashSet};

use crate::models::analytics::{
    DashboardSummary, DepotBreakdown, FleetCharts, RiskCount, ScatterPoint, ServiceAgeBar,
};
use crate::models::fleet_table::{FleetTable, ALL_DEPOTS};
use crate::models::vehicle::{ClassifiedVehicle, RiskLevel};

/// Selección de depósito
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepotSelection {
    #[default]
    All,
    Only(String),
}

impl DepotSelection {
    /// "All", vacío o ausente significan sin filtro
    pub fn from_option(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => DepotSelection::All,
            Some(v) if v.eq_ignore_ascii_case(ALL_DEPOTS) => DepotSelection::All,
            Some(v) => DepotSelection::Only(v.to_string()),
        }
    }

    fn matches(&self, depot: &str) -> bool {
        match self {
            DepotSelection::All => true,
            DepotSelection::Only(selected) => selected == depot,
        }
    }
}

/// Filtros activos del dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetFilters {
    pub depot: DepotSelection,
    /// `None` no restringe. Un conjunto vacío no deja pasar ninguna fila.
    pub risk_levels: Option<HashSet<RiskLevel>>,
    /// Subcadena de `vehicle_id`, sin distinguir mayúsculas
    pub search: Option<String>,
}

impl FleetFilters {
    pub fn depot(mut self, depot: &str) -> Self {
        self.depot = DepotSelection::from_option(Some(depot));
        self
    }

    pub fn risk_levels(mut self, levels: impl IntoIterator<Item = RiskLevel>) -> Self {
        self.risk_levels = Some(levels.into_iter().collect());
        self
    }

    pub fn search(mut self, needle: &str) -> Self {
        self.search = Some(needle.to_string());
        self
    }

    pub fn matches(&self, vehicle: &ClassifiedVehicle) -> bool {
        if !self.depot.matches(vehicle.depot()) {
            return false;
        }

        if let Some(levels) = &self.risk_levels {
            if !levels.contains(&vehicle.risk_level) {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => vehicle
                .vehicle_id()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

impl FleetTable {
    /// Subconjunto que cumple todos los filtros, conservando el orden
    pub fn filter(&self, filters: &FleetFilters) -> FleetTable {
        let vehicles = self
            .vehicles
            .iter()
            .filter(|v| filters.matches(v))
            .cloned()
            .collect();

        FleetTable::new(self.evaluated_at, vehicles)
    }

    /// KPIs del dashboard
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            evaluated_at: self.evaluated_at,
            total_vehicles: self.len(),
            high_risk_vehicles: self.count_by_risk(RiskLevel::High),
            medium_risk_vehicles: self.count_by_risk(RiskLevel::Medium),
            low_risk_vehicles: self.count_by_risk(RiskLevel::Low),
            unknown_risk_vehicles: self.count_by_risk(RiskLevel::Unknown),
            average_days_since_service: mean(
                self.iter().filter_map(|v| v.days_since_service()).map(|d| d as f64),
            ),
            average_breakdown_rate: mean(self.iter().filter_map(|v| v.breakdown_rate())),
            total_breakdowns: self
                .iter()
                .map(|v| v.record().breakdowns_last_6m as u64)
                .sum(),
            average_mileage_km: mean(self.iter().map(|v| v.record().mileage_km as f64)),
            average_fuel_efficiency: mean(self.iter().map(|v| v.record().fuel_efficiency)),
        }
    }

    /// Agrupaciones listas para gráfico
    pub fn charts(&self) -> FleetCharts {
        FleetCharts {
            by_depot: self.depot_breakdown(),
            risk_distribution: self.risk_distribution(),
            days_by_vehicle: self
                .iter()
                .map(|v| ServiceAgeBar {
                    vehicle_id: v.vehicle_id().to_string(),
                    days_since_service: v.days_since_service(),
                    risk_level: v.risk_level,
                })
                .collect(),
            scatter: self
                .iter()
                .map(|v| ScatterPoint {
                    vehicle_id: v.vehicle_id().to_string(),
                    days_since_service: v.days_since_service(),
                    breakdown_rate: v.breakdown_rate(),
                    mileage_km: v.record().mileage_km,
                    risk_level: v.risk_level,
                })
                .collect(),
        }
    }

    /// Conteo por nivel de riesgo, sin niveles vacíos
    pub fn risk_distribution(&self) -> Vec<RiskCount> {
        RiskLevel::ALL
            .iter()
            .map(|&risk_level| RiskCount {
                risk_level,
                count: self.count_by_risk(risk_level),
            })
            .filter(|rc| rc.count > 0)
            .collect()
    }

    /// Conteo por depósito, ordenado por nombre
    pub fn depot_breakdown(&self) -> Vec<DepotBreakdown> {
        let mut by_depot: BTreeMap<&str, DepotBreakdown> = BTreeMap::new();

        for vehicle in self.iter() {
            let entry = by_depot.entry(vehicle.depot()).or_insert_with(|| DepotBreakdown {
                depot: vehicle.depot().to_string(),
                vehicles: 0,
                high: 0,
                medium: 0,
                low: 0,
                unknown: 0,
            });

            entry.vehicles += 1;
            match vehicle.risk_level {
                RiskLevel::High => entry.high += 1,
                RiskLevel::Medium => entry.medium += 1,
                RiskLevel::Low => entry.low += 1,
                RiskLevel::Unknown => entry.unknown += 1,
            }
        }

        by_depot.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{EnrichedVehicle, VehicleRecord};
    use chrono::NaiveDateTime;

    fn vehicle(id: &str, depot: &str, days: Option<i64>, breakdowns: u32, risk_level: RiskLevel) -> ClassifiedVehicle {
        ClassifiedVehicle {
            vehicle: EnrichedVehicle {
                record: VehicleRecord {
                    vehicle_id: id.to_string(),
                    mileage_km: 40_000,
                    engine_hours: 1000,
                    last_service_date: None,
                    breakdowns_last_6m: breakdowns,
                    fuel_efficiency: 8.0,
                    depot: depot.to_string(),
                },
                days_since_service: days,
                breakdown_rate: Some(breakdowns as f64 / 1000.0),
            },
            risk_level,
        }
    }

    fn table() -> FleetTable {
        let evaluated_at = NaiveDateTime::parse_from_str("2024-06-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        FleetTable::new(
            evaluated_at,
            vec![
                vehicle("T001", "North", Some(30), 0, RiskLevel::Low),
                vehicle("T002", "South", Some(95), 3, RiskLevel::High),
                vehicle("T003", "North", Some(65), 1, RiskLevel::Medium),
                vehicle("T010", "West", None, 1, RiskLevel::Unknown),
                vehicle("X100", "North", Some(100), 2, RiskLevel::High),
            ],
        )
    }

    #[test]
    fn test_depot_filter_keeps_only_selected_depot() {
        let fleet = table();
        let north = fleet.filter(&FleetFilters::default().depot("North"));

        assert!(north.iter().all(|v| v.depot() == "North"));
        assert_eq!(north.len(), fleet.iter().filter(|v| v.depot() == "North").count());
        assert_eq!(north.len(), 3);
    }

    #[test]
    fn test_all_depot_is_no_filter() {
        let fleet = table();
        assert_eq!(fleet.filter(&FleetFilters::default().depot("All")).len(), fleet.len());
        assert_eq!(fleet.filter(&FleetFilters::default()).len(), fleet.len());
    }

    #[test]
    fn test_risk_filter_and_empty_selection() {
        let fleet = table();
        let high = fleet.filter(&FleetFilters::default().risk_levels([RiskLevel::High]));
        assert_eq!(high.len(), 2);

        let none = fleet.filter(&FleetFilters::default().risk_levels(Vec::new()));
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let fleet = table();
        let found = fleet.filter(&FleetFilters::default().search("t00"));
        let ids: Vec<&str> = found.iter().map(|v| v.vehicle_id()).collect();
        assert_eq!(ids, vec!["T001", "T002", "T003"]);

        assert_eq!(fleet.filter(&FleetFilters::default().search("  ")).len(), fleet.len());
    }

    #[test]
    fn test_filters_combine_by_conjunction() {
        let fleet = table();
        let filters = FleetFilters::default()
            .depot("North")
            .risk_levels([RiskLevel::High, RiskLevel::Medium])
            .search("t");
        let filtered = fleet.filter(&filters);
        let ids: Vec<&str> = filtered.iter().map(|v| v.vehicle_id()).collect();
        assert_eq!(ids, vec!["T003"]);
    }

    #[test]
    fn test_summary_aggregates() {
        let summary = table().summary();
        assert_eq!(summary.total_vehicles, 5);
        assert_eq!(summary.high_risk_vehicles, 2);
        assert_eq!(summary.medium_risk_vehicles, 1);
        assert_eq!(summary.low_risk_vehicles, 1);
        assert_eq!(summary.unknown_risk_vehicles, 1);
        assert_eq!(summary.total_breakdowns, 7);
        assert_eq!(summary.average_days_since_service, Some(72.5));
        assert_eq!(summary.average_mileage_km, Some(40_000.0));
    }

    #[test]
    fn test_summary_of_empty_subset() {
        let empty = table().filter(&FleetFilters::default().depot("Nowhere"));
        let summary = empty.summary();
        assert_eq!(summary.total_vehicles, 0);
        assert_eq!(summary.average_days_since_service, None);
        assert_eq!(summary.average_breakdown_rate, None);
    }

    #[test]
    fn test_chart_groupings() {
        let charts = table().charts();

        let depots: Vec<&str> = charts.by_depot.iter().map(|d| d.depot.as_str()).collect();
        assert_eq!(depots, vec!["North", "South", "West"]);
        assert_eq!(charts.by_depot[0].vehicles, 3);
        assert_eq!(charts.by_depot[0].high, 1);

        assert_eq!(
            charts.risk_distribution,
            vec![
                RiskCount { risk_level: RiskLevel::High, count: 2 },
                RiskCount { risk_level: RiskLevel::Medium, count: 1 },
                RiskCount { risk_level: RiskLevel::Low, count: 1 },
                RiskCount { risk_level: RiskLevel::Unknown, count: 1 },
            ]
        );
        assert_eq!(charts.days_by_vehicle.len(), 5);
        assert_eq!(charts.scatter[1].breakdown_rate, Some(0.003));
    }

    #[test]
    fn test_depot_options_start_with_all() {
        assert_eq!(table().depot_options(), vec!["All", "North", "South", "West"]);
    }
}
