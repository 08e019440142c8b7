//! Read-only registry of the Cypher templates the router can select.
//!
//! Every entry declares the parameters its template binds and the column
//! aliases it returns, so the executor can enforce the parameter contract
//! up front and convert rows without probing the store's type system.

use lazy_static::lazy_static;
use std::collections::HashMap;

pub struct CatalogEntry {
    pub id: &'static str,
    pub cypher: &'static str,
    pub params: &'static [&'static str],
    pub columns: &'static [&'static str],
}

macro_rules! entry {
    ($map:expr, $id:literal, $cypher:expr, $params:expr, $columns:expr) => {
        $map.insert(
            $id,
            CatalogEntry {
                id: $id,
                cypher: $cypher,
                params: $params,
                columns: $columns,
            },
        );
    };
}

lazy_static! {
    static ref CATALOG: HashMap<&'static str, CatalogEntry> = {
        let mut m = HashMap::new();

        // Search flights by origin/destination, with journey averages
        entry!(
            m,
            "flight_search",
            "MATCH (f:Flight)-[:DEPARTS_FROM]->(a1:Airport {station_code: $origin}), \
                   (f)-[:ARRIVES_AT]->(a2:Airport {station_code: $destination}) \
             OPTIONAL MATCH (j:Journey)-[:ON]->(f) \
             RETURN f.flight_number AS flight, \
                    a1.station_code AS origin, \
                    a2.station_code AS destination, \
                    AVG(j.arrival_delay_minutes) AS delay, \
                    AVG(j.food_satisfaction_score) AS food_score",
            &["origin", "destination"],
            &["flight", "origin", "destination", "delay", "food_score"]
        );

        // All flights departing an airport
        entry!(
            m,
            "flight_from_airport",
            "MATCH (f:Flight)-[:DEPARTS_FROM]->(a:Airport {station_code: $origin}) \
             RETURN f.flight_number AS flight, a.station_code AS origin",
            &["origin"],
            &["flight", "origin"]
        );

        // Delay profile of one flight
        entry!(
            m,
            "delay_info",
            "MATCH (j:Journey)-[:ON]->(f:Flight {flight_number: $flight}) \
             RETURN f.flight_number AS flight, \
                    AVG(j.arrival_delay_minutes) AS avg_delay, \
                    MAX(j.arrival_delay_minutes) AS worst_delay",
            &["flight"],
            &["flight", "avg_delay", "worst_delay"]
        );

        // Worst delayed flights, fleet-wide
        entry!(
            m,
            "worst_delays",
            "MATCH (j:Journey)-[:ON]->(f:Flight) \
             RETURN f.flight_number AS flight, \
                    AVG(j.arrival_delay_minutes) AS avg_delay \
             ORDER BY avg_delay DESC LIMIT 10",
            &[],
            &["flight", "avg_delay"]
        );

        // Miles summary per loyalty level
        entry!(
            m,
            "loyalty_miles",
            "MATCH (p:Passenger {loyalty_program_level: $level})-[:TOOK]->(j:Journey) \
             RETURN p.loyalty_program_level AS loyalty, \
                    SUM(j.actual_flown_miles) AS total_miles, \
                    COUNT(j) AS journey_count",
            &["level"],
            &["loyalty", "total_miles", "journey_count"]
        );

        // Fleet-wide food satisfaction average
        entry!(
            m,
            "satisfaction_query",
            "MATCH (j:Journey) \
             RETURN AVG(j.food_satisfaction_score) AS avg_food_score",
            &[],
            &["avg_food_score"]
        );

        // Multi-leg journey count
        entry!(
            m,
            "journey_stats",
            "MATCH (j:Journey) \
             WHERE j.number_of_legs > 1 \
             RETURN COUNT(j) AS multi_leg_count",
            &[],
            &["multi_leg_count"]
        );

        // Journeys taken by one passenger
        entry!(
            m,
            "passenger_journeys",
            "MATCH (p:Passenger {record_locator: $record_locator})-[:TOOK]->(j:Journey) \
             RETURN j.feedback_ID AS journey, \
                    j.arrival_delay_minutes AS delay, \
                    j.food_satisfaction_score AS food_score",
            &["record_locator"],
            &["journey", "delay", "food_score"]
        );

        // Departure count for an airport
        entry!(
            m,
            "airport_traffic",
            "MATCH (f:Flight)-[:DEPARTS_FROM]->(a:Airport {station_code: $origin}) \
             RETURN COUNT(f) AS departures",
            &["origin"],
            &["departures"]
        );

        // Flights by fleet type
        entry!(
            m,
            "fleet_type_flights",
            "MATCH (f:Flight {fleet_type_description: $fleet}) \
             RETURN f.flight_number AS flight",
            &["fleet"],
            &["flight"]
        );

        // Rank flights by food score
        entry!(
            m,
            "avg_food_by_flight",
            "MATCH (j:Journey)-[:ON]->(f:Flight) \
             RETURN f.flight_number AS flight, \
                    AVG(j.food_satisfaction_score) AS avg_food_score \
             ORDER BY avg_food_score DESC",
            &[],
            &["flight", "avg_food_score"]
        );

        // Flights whose journeys exceed a leg count
        entry!(
            m,
            "flights_with_many_legs",
            "MATCH (j:Journey)-[:ON]->(f:Flight) \
             WHERE j.number_of_legs > $legs \
             RETURN f.flight_number AS flight, j.number_of_legs AS legs \
             ORDER BY legs DESC",
            &["legs"],
            &["flight", "legs"]
        );

        // Passenger volume per flight
        entry!(
            m,
            "passenger_count_per_flight",
            "MATCH (p:Passenger)-[:TOOK]->(j:Journey)-[:ON]->(f:Flight) \
             RETURN f.flight_number AS flight, \
                    COUNT(p) AS passenger_count \
             ORDER BY passenger_count DESC",
            &[],
            &["flight", "passenger_count"]
        );

        // Direct airport-to-airport routes
        entry!(
            m,
            "routes_between_airports",
            "MATCH (f:Flight)-[:DEPARTS_FROM]->(a1:Airport {station_code: $origin}), \
                   (f)-[:ARRIVES_AT]->(a2:Airport {station_code: $destination}) \
             RETURN f.flight_number AS flight, \
                    a1.station_code AS origin, \
                    a2.station_code AS destination",
            &["origin", "destination"],
            &["flight", "origin", "destination"]
        );

        // Passenger count by generation cohort
        entry!(
            m,
            "passenger_by_generation",
            "MATCH (p:Passenger {generation: $generation}) \
             RETURN p.generation AS generation, \
                    COUNT(p) AS passenger_count",
            &["generation"],
            &["generation", "passenger_count"]
        );

        // Journeys flown in a cabin class
        entry!(
            m,
            "class_search",
            "MATCH (j:Journey {passenger_class: $class}) \
             RETURN j.feedback_ID AS journey, \
                    j.passenger_class AS class, \
                    j.arrival_delay_minutes AS delay",
            &["class"],
            &["journey", "class", "delay"]
        );

        m
    };
}

pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.get(id)
}

pub fn contains(id: &str) -> bool {
    CATALOG.contains_key(id)
}
