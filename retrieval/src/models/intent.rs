use serde::Serialize;

/// Question categories the upstream classifier can emit. The label set
/// evolves with the classifier prompt; anything unrecognized maps to
/// `Unknown` and routes to no query. Classifier output arrives as a raw
/// string, so parsing goes through `from_label` and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    FlightSearch,
    DelayInfo,
    LoyaltyMiles,
    JourneyStats,
    SatisfactionQuery,
    PassengerJourneys,
    ClassSearch,
    JourneySimilarity,
    GeneralChat,
    Unknown,
}

impl Intent {
    pub fn from_label(label: &str) -> Intent {
        match label.trim() {
            "flight_search" => Intent::FlightSearch,
            "delay_info" => Intent::DelayInfo,
            "loyalty_miles" => Intent::LoyaltyMiles,
            "journey_stats" => Intent::JourneyStats,
            "satisfaction_query" => Intent::SatisfactionQuery,
            "passenger_journeys" => Intent::PassengerJourneys,
            "class_search" => Intent::ClassSearch,
            "journey_similarity" => Intent::JourneySimilarity,
            "general_chat" => Intent::GeneralChat,
            _ => Intent::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intent::FlightSearch => "flight_search",
            Intent::DelayInfo => "delay_info",
            Intent::LoyaltyMiles => "loyalty_miles",
            Intent::JourneyStats => "journey_stats",
            Intent::SatisfactionQuery => "satisfaction_query",
            Intent::PassengerJourneys => "passenger_journeys",
            Intent::ClassSearch => "class_search",
            Intent::JourneySimilarity => "journey_similarity",
            Intent::GeneralChat => "general_chat",
            Intent::Unknown => "unknown",
        }
    }
}
