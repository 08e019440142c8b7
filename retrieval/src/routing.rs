//! Intent routing: map a classified intent plus extracted entities to a
//! catalog query and its bound parameters.
//!
//! This is a total, deterministic function of its inputs. A request the
//! router cannot satisfy resolves to a plan with no query id; nothing here
//! performs I/O or fails.

use crate::models::{EntityBundle, Intent};
use serde::Serialize;
use std::collections::HashMap;

/// A bound query parameter, typed for the Bolt protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
}

/// The router's output: which catalog entry to run, with which parameters.
/// `query_id == None` means no structured query applies to the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryPlan {
    pub query_id: Option<String>,
    pub params: HashMap<String, ParamValue>,
}

impl QueryPlan {
    pub fn none() -> Self {
        Self::default()
    }

    fn with(id: &str, params: Vec<(&str, ParamValue)>) -> Self {
        Self {
            query_id: Some(id.to_string()),
            params: params
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

pub fn route(intent: Intent, entities: &EntityBundle) -> QueryPlan {
    match intent {
        Intent::FlightSearch => route_flight_search(entities),
        Intent::DelayInfo => route_delay_info(entities),
        Intent::LoyaltyMiles => route_loyalty_miles(entities),
        Intent::JourneyStats => route_journey_stats(entities),
        Intent::SatisfactionQuery => QueryPlan::with("satisfaction_query", vec![]),
        Intent::PassengerJourneys => route_passenger_journeys(entities),
        Intent::ClassSearch => route_class_search(entities),
        // similarity-only and conversational intents run no structured query
        Intent::JourneySimilarity | Intent::GeneralChat | Intent::Unknown => QueryPlan::none(),
    }
}

fn first(values: &[String]) -> Option<&str> {
    values.first().map(String::as_str).filter(|v| !v.is_empty())
}

fn second(values: &[String]) -> Option<&str> {
    values.get(1).map(String::as_str).filter(|v| !v.is_empty())
}

/// Origin/destination come from the structured route hint first, then from
/// the airport list in mention order.
fn route_flight_search(entities: &EntityBundle) -> QueryPlan {
    let origin = if !entities.routes.origin.is_empty() {
        Some(entities.routes.origin.as_str())
    } else {
        first(&entities.airports)
    };
    let destination = if !entities.routes.destination.is_empty() {
        Some(entities.routes.destination.as_str())
    } else {
        second(&entities.airports)
    };

    match (origin, destination) {
        (Some(origin), Some(destination)) => QueryPlan::with(
            "flight_search",
            vec![
                ("origin", ParamValue::Str(origin.to_string())),
                ("destination", ParamValue::Str(destination.to_string())),
            ],
        ),
        _ => QueryPlan::none(),
    }
}

/// A concrete flight number narrows the question to that flight; without
/// one the fleet-wide worst-delays aggregate answers it.
fn route_delay_info(entities: &EntityBundle) -> QueryPlan {
    match first(&entities.flights) {
        Some(flight) => QueryPlan::with(
            "delay_info",
            vec![("flight", ParamValue::Str(flight.to_string()))],
        ),
        None => QueryPlan::with("worst_delays", vec![]),
    }
}

fn route_loyalty_miles(entities: &EntityBundle) -> QueryPlan {
    match first(&entities.passengers) {
        Some(level) => QueryPlan::with(
            "loyalty_miles",
            vec![("level", ParamValue::Str(level.to_string()))],
        ),
        None => QueryPlan::none(),
    }
}

/// An explicit leg count switches to the leg-filter query; otherwise the
/// multi-leg aggregate runs.
fn route_journey_stats(entities: &EntityBundle) -> QueryPlan {
    let legs = entities.journeys.iter().find_map(|j| j.parse::<i64>().ok());
    match legs {
        Some(legs) => QueryPlan::with("flights_with_many_legs", vec![("legs", ParamValue::Int(legs))]),
        None => QueryPlan::with("journey_stats", vec![]),
    }
}

fn route_passenger_journeys(entities: &EntityBundle) -> QueryPlan {
    match first(&entities.passengers) {
        Some(locator) => QueryPlan::with(
            "passenger_journeys",
            vec![(
                "record_locator",
                ParamValue::Str(locator.to_uppercase()),
            )],
        ),
        None => QueryPlan::none(),
    }
}

fn route_class_search(entities: &EntityBundle) -> QueryPlan {
    match first(&entities.passengers) {
        Some(class) => QueryPlan::with(
            "class_search",
            vec![("class", ParamValue::Str(capitalize(class)))],
        ),
        None => QueryPlan::none(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteHint;

    fn bundle() -> EntityBundle {
        EntityBundle::default()
    }

    #[test]
    fn routing_is_deterministic() {
        let entities = EntityBundle {
            airports: vec!["LAX".into(), "IAX".into()],
            ..bundle()
        };
        let a = route(Intent::FlightSearch, &entities);
        let b = route(Intent::FlightSearch, &entities);
        assert_eq!(a, b);
    }

    #[test]
    fn flight_search_prefers_route_hint() {
        let entities = EntityBundle {
            airports: vec!["SFX".into(), "JFX".into()],
            routes: RouteHint {
                origin: "LAX".into(),
                destination: "IAX".into(),
            },
            ..bundle()
        };
        let plan = route(Intent::FlightSearch, &entities);

        assert_eq!(plan.query_id.as_deref(), Some("flight_search"));
        assert_eq!(
            plan.params.get("origin"),
            Some(&ParamValue::Str("LAX".into()))
        );
        assert_eq!(
            plan.params.get("destination"),
            Some(&ParamValue::Str("IAX".into()))
        );
    }

    #[test]
    fn flight_search_falls_back_to_airport_list_in_order() {
        let entities = EntityBundle {
            airports: vec!["LAX".into(), "IAX".into()],
            ..bundle()
        };
        let plan = route(Intent::FlightSearch, &entities);

        assert_eq!(plan.query_id.as_deref(), Some("flight_search"));
        assert_eq!(
            plan.params.get("origin"),
            Some(&ParamValue::Str("LAX".into()))
        );
        assert_eq!(
            plan.params.get("destination"),
            Some(&ParamValue::Str("IAX".into()))
        );
    }

    #[test]
    fn flight_search_without_destination_resolves_nothing() {
        let entities = EntityBundle {
            airports: vec!["LAX".into()],
            ..bundle()
        };
        assert_eq!(route(Intent::FlightSearch, &entities), QueryPlan::none());
        assert_eq!(route(Intent::FlightSearch, &bundle()), QueryPlan::none());
    }

    #[test]
    fn delay_info_uses_flight_number_when_present() {
        let entities = EntityBundle {
            flights: vec!["57".into()],
            ..bundle()
        };
        let plan = route(Intent::DelayInfo, &entities);
        assert_eq!(plan.query_id.as_deref(), Some("delay_info"));
        assert_eq!(
            plan.params.get("flight"),
            Some(&ParamValue::Str("57".into()))
        );

        let aggregate = route(Intent::DelayInfo, &bundle());
        assert_eq!(aggregate.query_id.as_deref(), Some("worst_delays"));
        assert!(aggregate.params.is_empty());
    }

    #[test]
    fn loyalty_miles_requires_a_level() {
        let entities = EntityBundle {
            passengers: vec!["premier silver".into()],
            ..bundle()
        };
        let plan = route(Intent::LoyaltyMiles, &entities);
        assert_eq!(plan.query_id.as_deref(), Some("loyalty_miles"));
        assert_eq!(
            plan.params.get("level"),
            Some(&ParamValue::Str("premier silver".into()))
        );

        assert_eq!(route(Intent::LoyaltyMiles, &bundle()), QueryPlan::none());
    }

    #[test]
    fn journey_stats_switches_on_numeric_leg_count() {
        let entities = EntityBundle {
            journeys: vec!["multi-leg".into(), "2".into()],
            ..bundle()
        };
        let plan = route(Intent::JourneyStats, &entities);
        assert_eq!(plan.query_id.as_deref(), Some("flights_with_many_legs"));
        assert_eq!(plan.params.get("legs"), Some(&ParamValue::Int(2)));

        let aggregate = route(Intent::JourneyStats, &bundle());
        assert_eq!(aggregate.query_id.as_deref(), Some("journey_stats"));
    }

    #[test]
    fn passenger_journeys_uppercases_the_record_locator() {
        let entities = EntityBundle {
            passengers: vec!["bnxx5r".into()],
            ..bundle()
        };
        let plan = route(Intent::PassengerJourneys, &entities);
        assert_eq!(plan.query_id.as_deref(), Some("passenger_journeys"));
        assert_eq!(
            plan.params.get("record_locator"),
            Some(&ParamValue::Str("BNXX5R".into()))
        );
    }

    #[test]
    fn class_search_capitalizes_the_class_name() {
        let entities = EntityBundle {
            passengers: vec!["business".into()],
            ..bundle()
        };
        let plan = route(Intent::ClassSearch, &entities);
        assert_eq!(plan.query_id.as_deref(), Some("class_search"));
        assert_eq!(
            plan.params.get("class"),
            Some(&ParamValue::Str("Business".into()))
        );
    }

    #[test]
    fn unroutable_intents_resolve_to_no_query() {
        assert_eq!(route(Intent::Unknown, &bundle()), QueryPlan::none());
        assert_eq!(route(Intent::GeneralChat, &bundle()), QueryPlan::none());
        assert_eq!(route(Intent::JourneySimilarity, &bundle()), QueryPlan::none());
    }

    #[test]
    fn every_routed_query_exists_in_the_catalog() {
        let samples = EntityBundle {
            flights: vec!["42".into()],
            airports: vec!["LAX".into(), "IAX".into()],
            passengers: vec!["premier silver".into()],
            journeys: vec!["2".into()],
            ..bundle()
        };

        for intent in [
            Intent::FlightSearch,
            Intent::DelayInfo,
            Intent::LoyaltyMiles,
            Intent::JourneyStats,
            Intent::SatisfactionQuery,
            Intent::PassengerJourneys,
            Intent::ClassSearch,
        ] {
            let plan = route(intent, &samples);
            let id = plan.query_id.expect("intent should resolve");
            assert!(
                crate::catalog::contains(&id),
                "router produced unknown query id '{}'",
                id
            );
        }
    }
}
