//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> String {
    let mut output = String::new();

    collect_driver_metrics(state, &mut output).await;
    collect_delivery_metrics(state, &mut output).await;
    collect_assignment_metrics(state, &mut output);

    output
}

/// Registered drivers per city.
async fn collect_driver_metrics(state: &Arc<AppState>, output: &mut String) {
    let counts = state.store.driver_count_by_city().await;
    let cities = state.store.list_cities().await;

    writeln!(
        output,
        "# HELP walt_drivers_registered Number of registered drivers by city"
    )
    .ok();
    writeln!(output, "# TYPE walt_drivers_registered gauge").ok();
    for city in cities {
        let count = counts.get(city.id()).copied().unwrap_or(0);
        writeln!(
            output,
            "walt_drivers_registered{{city=\"{}\"}} {count}",
            escape_label(city.id().as_str())
        )
        .ok();
    }
}

/// Escape a label value for the text exposition format.
fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

async fn collect_delivery_metrics(state: &Arc<AppState>, output: &mut String) {
    let deliveries = state.store.delivery_count().await;

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP walt_deliveries Number of committed deliveries"
    )
    .ok();
    writeln!(output, "# TYPE walt_deliveries gauge").ok();
    writeln!(output, "walt_deliveries {deliveries}").ok();
}

/// Order outcomes since startup.
fn collect_assignment_metrics(state: &Arc<AppState>, output: &mut String) {
    let stats = &state.stats;
    let assigned = stats.assigned.load(Ordering::Relaxed);
    let mismatch = stats.location_mismatch.load(Ordering::Relaxed);
    let no_drivers = stats.no_available_drivers.load(Ordering::Relaxed);
    let failed = stats.failed.load(Ordering::Relaxed);

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP walt_orders_total Orders received by assignment outcome"
    )
    .ok();
    writeln!(output, "# TYPE walt_orders_total counter").ok();
    writeln!(output, "walt_orders_total{{outcome=\"assigned\"}} {assigned}").ok();
    writeln!(
        output,
        "walt_orders_total{{outcome=\"location_mismatch\"}} {mismatch}"
    )
    .ok();
    writeln!(
        output,
        "walt_orders_total{{outcome=\"no_available_drivers\"}} {no_drivers}"
    )
    .ok();
    writeln!(output, "walt_orders_total{{outcome=\"failed\"}} {failed}").ok();
}

#[cfg(test)]
mod tests {
    use walt_core::{City, CityId, Driver};

    use super::*;
    use crate::assignment::RandomDistance;

    #[tokio::test]
    async fn test_collect_metrics_empty_state() {
        let state = AppState::new(Arc::new(RandomDistance::default()));
        let output = collect_metrics(&state).await;

        assert!(output.contains("# TYPE walt_drivers_registered gauge"));
        assert!(output.contains("walt_deliveries 0"));
        assert!(output.contains("walt_orders_total{outcome=\"assigned\"} 0"));
        assert!(output.contains("walt_orders_total{outcome=\"no_available_drivers\"} 0"));
    }

    #[tokio::test]
    async fn test_driver_gauge_per_city() {
        let state = AppState::new(Arc::new(RandomDistance::default()));
        let city = state
            .store
            .add_city(City::with_id(CityId::new("tlv"), "Tel-Aviv"))
            .await
            .unwrap();
        state.store.add_city(City::with_id(CityId::new("hfa"), "Haifa")).await.unwrap();
        state.store.add_driver(Driver::new("Mary", city)).await.unwrap();

        let output = collect_metrics(&state).await;
        assert!(output.contains("walt_drivers_registered{city=\"tlv\"} 1"));
        assert!(output.contains("walt_drivers_registered{city=\"hfa\"} 0"));
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("tlv"), "tlv");
        assert_eq!(escape_label(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_label("line\nbreak"), "line\\nbreak");
    }

    #[tokio::test]
    async fn test_city_label_is_escaped() {
        let state = AppState::new(Arc::new(RandomDistance::default()));
        state
            .store
            .add_city(City::with_id(CityId::new(r#"tel "aviv"\"#), "Tel-Aviv"))
            .await
            .unwrap();

        let output = collect_metrics(&state).await;
        assert!(output.contains(r#"walt_drivers_registered{city="tel \"aviv\"\\"} 0"#));
    }
}
