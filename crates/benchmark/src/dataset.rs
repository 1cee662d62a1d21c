//! Shipment dataset types.

use serde::{Deserialize, Serialize};
use u_shipping_core::Package;

/// One shipment: the cartons listed on a single line of a dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Cartons of the shipment, in file order.
    pub packages: Vec<Package>,
}

/// A parsed shipment dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name (usually the file stem).
    pub name: String,
    /// Shipments in file order.
    pub shipments: Vec<Shipment>,
}

impl Dataset {
    /// Returns the total number of cartons over all shipments.
    pub fn package_count(&self) -> usize {
        self.shipments.iter().map(|s| s.packages.len()).sum()
    }

    /// Keeps only the first `limit` shipments.
    pub fn truncate(&mut self, limit: usize) {
        self.shipments.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_count() {
        let mut dataset = Dataset {
            name: "test".into(),
            shipments: vec![
                Shipment {
                    line: 1,
                    packages: vec![Package::STANDARD_CONTAINER; 3],
                },
                Shipment {
                    line: 3,
                    packages: vec![Package::STANDARD_CONTAINER; 2],
                },
            ],
        };
        assert_eq!(dataset.package_count(), 5);

        dataset.truncate(1);
        assert_eq!(dataset.package_count(), 3);
    }

    #[test]
    fn test_shipment_json_checks_packages() {
        let json = r#"{"line":2,"packages":[{"dimensions":{"height":150,"width":350,"length":250},"weight":0}]}"#;
        let shipment: Shipment = serde_json::from_str(json).unwrap();
        assert_eq!(shipment.packages[0].to_string(), "350x250x150");

        let zero = r#"{"line":2,"packages":[{"dimensions":{"height":0,"width":350,"length":250}}]}"#;
        assert!(serde_json::from_str::<Shipment>(zero).is_err());
    }
}
