use crate::error::Result;
use crate::infrastructure::in_memory::Scenario;
use std::io::Read;

/// Reads a storefront [`Scenario`] from a JSON source (file, stdin, bytes).
pub struct ScenarioReader<R: Read> {
    source: R,
}

impl<R: Read> ScenarioReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn scenario(self) -> Result<Scenario> {
        Ok(serde_json::from_reader(self.source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::Step;

    #[test]
    fn test_minimal_scenario() {
        let data = r#"{"locale": {"language": "en", "countryInfo": {"countryCode": "US"}}}"#;
        let scenario = ScenarioReader::new(data.as_bytes()).scenario().unwrap();

        assert_eq!(scenario.locale.tag().as_str(), "en-US");
        assert!(scenario.draft_order.is_none());
        assert!(scenario.payment_configurations.is_empty());
        assert!(scenario.faults.is_empty());
    }

    #[test]
    fn test_scenario_with_faults() {
        let data = r#"{
            "locale": {"language": "de", "countryInfo": {"countryCode": "DE"}},
            "draftOrder": {"orderId": "o-1"},
            "faults": {"calculateCost": {"status": 500, "message": "boom"}}
        }"#;
        let scenario = ScenarioReader::new(data.as_bytes()).scenario().unwrap();

        let fault = &scenario.faults[&Step::CalculateCost];
        assert_eq!(fault.status, Some(500));
        assert_eq!(fault.message, "boom");
    }

    #[test]
    fn test_malformed_scenario() {
        let data = r#"{"locale": "en-US"}"#;
        assert!(ScenarioReader::new(data.as_bytes()).scenario().is_err());
    }
}
