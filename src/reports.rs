//! The report catalog.
//!
//! A fixed set of 15 aggregate reports over the food donation schema
//! (`providers`, `receivers`, `food_listings`, `claims`). Each report carries
//! its own self-contained SQL text; nothing is parameterized and no user input
//! is ever interpolated. The result column names are a contract: chart
//! selection in [`crate::chart`] keys off them.

use std::fmt;

/// One of the predefined dashboard reports, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    ProvidersVsReceiversPerCity,
    TopProviderTypeByQuantity,
    TopFoodItems,
    TopReceiversByCompletedClaims,
    ListedVsAvailable,
    TopLocationsByQuantity,
    MostClaimedFoodItems,
    ProvidersByCompletedClaims,
    ClaimsPerStatus,
    ClaimedQuantityByCity,
    FrequentReceivers,
    HighVolumeProviders,
    ExpiredListings,
    RecentClaims,
    TopProviderTypeNamePairs,
}

impl Report {
    /// All reports in display order. The selector iterates this slice, so the
    /// match in `label`/`sql` stays exhaustive by construction.
    pub const ALL: [Report; 15] = [
        Report::ProvidersVsReceiversPerCity,
        Report::TopProviderTypeByQuantity,
        Report::TopFoodItems,
        Report::TopReceiversByCompletedClaims,
        Report::ListedVsAvailable,
        Report::TopLocationsByQuantity,
        Report::MostClaimedFoodItems,
        Report::ProvidersByCompletedClaims,
        Report::ClaimsPerStatus,
        Report::ClaimedQuantityByCity,
        Report::FrequentReceivers,
        Report::HighVolumeProviders,
        Report::ExpiredListings,
        Report::RecentClaims,
        Report::TopProviderTypeNamePairs,
    ];

    /// Returns the report at the given zero-based catalog index.
    pub fn from_index(index: usize) -> Option<Report> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position of this report in the catalog.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|r| r == self)
            .unwrap_or_default()
    }

    /// The numbered, human-readable label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Report::ProvidersVsReceiversPerCity => "1. Providers vs Receivers per City",
            Report::TopProviderTypeByQuantity => "2. Provider type with most food listed",
            Report::TopFoodItems => "3. Top 5 most listed food items",
            Report::TopReceiversByCompletedClaims => "4. Top 10 receivers by completed claims",
            Report::ListedVsAvailable => "5. Total listed vs currently available food",
            Report::TopLocationsByQuantity => "6. Top 5 cities with most food listed",
            Report::MostClaimedFoodItems => "7. Top 10 most claimed food items",
            Report::ProvidersByCompletedClaims => "8. Providers with most completed claims",
            Report::ClaimsPerStatus => "9. Number of claims per status",
            Report::ClaimedQuantityByCity => "10. Total food claimed by city",
            Report::FrequentReceivers => "11. Receivers who claimed more than 5 times",
            Report::HighVolumeProviders => "12. Providers who listed more than 100 items",
            Report::ExpiredListings => "13. Expired food items",
            Report::RecentClaims => "14. Claims made in last 30 days",
            Report::TopProviderTypeNamePairs => "15. Top providers by food type contribution",
        }
    }

    /// The literal SQL executed for this report (MySQL dialect).
    ///
    /// Column aliases, ordering, and limits are part of the contract and must
    /// not change: downstream chart selection matches on exact column names.
    pub fn sql(&self) -> &'static str {
        match self {
            Report::ProvidersVsReceiversPerCity => {
                r#"SELECT City,
       SUM(providers_count) AS providers_count,
       SUM(receivers_count) AS receivers_count
FROM (
    SELECT City, COUNT(*) AS providers_count, 0 AS receivers_count
    FROM providers GROUP BY City
    UNION ALL
    SELECT City, 0 AS providers_count, COUNT(*) AS receivers_count
    FROM receivers GROUP BY City
) AS combined
GROUP BY City
ORDER BY City"#
            }
            Report::TopProviderTypeByQuantity => {
                r#"SELECT Provider_Type, SUM(Quantity) AS total_quantity
FROM food_listings f
JOIN providers p ON f.Provider_ID = p.Provider_ID
GROUP BY Provider_Type
ORDER BY total_quantity DESC
LIMIT 1"#
            }
            Report::TopFoodItems => {
                r#"SELECT Food_Name, SUM(Quantity) AS total_quantity
FROM food_listings
GROUP BY Food_Name
ORDER BY total_quantity DESC
LIMIT 5"#
            }
            Report::TopReceiversByCompletedClaims => {
                r#"SELECT r.Receiver_ID, r.Name, r.Type, r.City,
       SUM(f.Quantity) AS total_quantity_claimed,
       COUNT(*) AS completed_claims
FROM claims c
JOIN receivers r ON r.Receiver_ID = c.Receiver_ID
JOIN food_listings f ON f.Food_ID = c.Food_ID
WHERE c.Status = 'Completed'
GROUP BY r.Receiver_ID, r.Name, r.Type, r.City
ORDER BY total_quantity_claimed DESC, completed_claims DESC
LIMIT 10"#
            }
            Report::ListedVsAvailable => {
                r#"WITH total_listed AS (
  SELECT SUM(Quantity) AS total_qty FROM food_listings
),
unexpired AS (
  SELECT Food_ID, Quantity
  FROM food_listings
  WHERE Expiry_Date IS NOT NULL AND DATE(Expiry_Date) >= CURDATE()
),
claimed_completed AS (
  SELECT Food_ID FROM claims WHERE Status='Completed'
)
SELECT (SELECT total_qty FROM total_listed) AS total_listed_qty,
       (SELECT SUM(Quantity) FROM unexpired
        WHERE Food_ID NOT IN (SELECT Food_ID FROM claimed_completed)) AS currently_available_qty"#
            }
            Report::TopLocationsByQuantity => {
                r#"SELECT location, SUM(Quantity) AS total_quantity
FROM food_listings
GROUP BY location
ORDER BY total_quantity DESC
LIMIT 5"#
            }
            Report::MostClaimedFoodItems => {
                r#"SELECT f.Food_Name, COUNT(*) AS claim_count
FROM claims c
JOIN food_listings f ON f.Food_ID = c.Food_ID
WHERE c.Status='Completed'
GROUP BY f.Food_Name
ORDER BY claim_count DESC
LIMIT 10"#
            }
            Report::ProvidersByCompletedClaims => {
                r#"SELECT p.Provider_ID, p.Name, p.Type AS Provider_Type, p.City,
       COUNT(*) AS completed_claims
FROM claims c
JOIN food_listings f ON f.Food_ID = c.Food_ID
JOIN providers p ON p.Provider_ID = f.Provider_ID
WHERE c.Status = 'Completed'
GROUP BY p.Provider_ID, p.Name, p.Type, p.City
ORDER BY completed_claims DESC
LIMIT 10"#
            }
            Report::ClaimsPerStatus => {
                r#"SELECT Status, COUNT(*) AS total_claims
FROM claims
GROUP BY Status"#
            }
            Report::ClaimedQuantityByCity => {
                r#"SELECT r.City, SUM(f.Quantity) AS total_claimed
FROM claims c
JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
JOIN food_listings f ON f.Food_ID = c.Food_ID
WHERE c.Status='Completed'
GROUP BY r.City
ORDER BY total_claimed DESC"#
            }
            Report::FrequentReceivers => {
                r#"SELECT r.Receiver_ID, r.Name, r.City, COUNT(*) AS completed_claims
FROM claims c
JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
WHERE c.Status='Completed'
GROUP BY r.Receiver_ID, r.Name, r.City
HAVING COUNT(*) > 5
ORDER BY completed_claims DESC"#
            }
            Report::HighVolumeProviders => {
                r#"SELECT p.Provider_ID, p.Name, p.City, SUM(f.Quantity) AS total_listed
FROM providers p
JOIN food_listings f ON p.Provider_ID = f.Provider_ID
GROUP BY p.Provider_ID, p.Name, p.City
HAVING SUM(f.Quantity) > 100
ORDER BY total_listed DESC"#
            }
            Report::ExpiredListings => {
                r#"SELECT Food_Name, Quantity, Expiry_Date
FROM food_listings
WHERE Expiry_Date < CURDATE()"#
            }
            Report::RecentClaims => {
                r#"SELECT c.Claim_ID, c.Status, c.Timestamp,
       r.Name AS Receiver_Name, f.Food_Name, f.Quantity
FROM claims c
JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
JOIN food_listings f ON c.Food_ID = f.Food_ID
WHERE c.Timestamp >= DATE_SUB(CURDATE(), INTERVAL 30 DAY)
ORDER BY c.Timestamp DESC"#
            }
            Report::TopProviderTypeNamePairs => {
                r#"SELECT p.Type, p.Name, SUM(f.Quantity) AS total_quantity
FROM providers p
JOIN food_listings f ON p.Provider_ID = f.Provider_ID
GROUP BY p.Type, p.Name
ORDER BY total_quantity DESC
LIMIT 10"#
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_has_fifteen_reports() {
        assert_eq!(Report::ALL.len(), 15);
    }

    #[test]
    fn test_labels_are_numbered_in_order() {
        for (i, report) in Report::ALL.iter().enumerate() {
            let expected_prefix = format!("{}. ", i + 1);
            assert!(
                report.label().starts_with(&expected_prefix),
                "label '{}' should start with '{}'",
                report.label(),
                expected_prefix
            );
        }
    }

    #[test]
    fn test_from_index_round_trips() {
        for (i, report) in Report::ALL.iter().enumerate() {
            assert_eq!(Report::from_index(i), Some(*report));
            assert_eq!(report.index(), i);
        }
        assert_eq!(Report::from_index(15), None);
    }

    #[test]
    fn test_no_report_takes_parameters() {
        for report in Report::ALL {
            assert!(!report.sql().contains('?'));
            assert!(!report.sql().contains('$'));
        }
    }

    #[test]
    fn test_limits_match_catalog_contract() {
        assert!(Report::TopProviderTypeByQuantity.sql().contains("LIMIT 1"));
        assert!(Report::TopFoodItems.sql().contains("LIMIT 5"));
        assert!(Report::TopLocationsByQuantity.sql().contains("LIMIT 5"));
        assert!(Report::TopReceiversByCompletedClaims.sql().contains("LIMIT 10"));
        assert!(Report::MostClaimedFoodItems.sql().contains("LIMIT 10"));
        assert!(Report::ProvidersByCompletedClaims.sql().contains("LIMIT 10"));
        assert!(Report::TopProviderTypeNamePairs.sql().contains("LIMIT 10"));
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        // "more than 5" and "more than 100": strict comparisons, the boundary
        // values themselves are excluded.
        assert!(Report::FrequentReceivers.sql().contains("HAVING COUNT(*) > 5"));
        assert!(Report::HighVolumeProviders
            .sql()
            .contains("HAVING SUM(f.Quantity) > 100"));
        assert!(Report::ExpiredListings.sql().contains("Expiry_Date < CURDATE()"));
    }

    #[test]
    fn test_completed_claim_reports_filter_on_status() {
        for report in [
            Report::TopReceiversByCompletedClaims,
            Report::MostClaimedFoodItems,
            Report::ProvidersByCompletedClaims,
            Report::ClaimedQuantityByCity,
            Report::FrequentReceivers,
        ] {
            assert!(
                report.sql().contains("Status") && report.sql().contains("'Completed'"),
                "{report:?} must filter on completed claims"
            );
        }
    }

    #[test]
    fn test_receiver_ranking_tie_break() {
        // Quantity first, completed-claim count second, both descending.
        assert!(Report::TopReceiversByCompletedClaims
            .sql()
            .contains("ORDER BY total_quantity_claimed DESC, completed_claims DESC"));
    }

    #[test]
    fn test_chart_driving_aliases_present() {
        // These aliases feed the chart selection heuristic.
        assert!(Report::ProvidersVsReceiversPerCity.sql().contains("City"));
        assert!(Report::TopFoodItems.sql().contains("AS total_quantity"));
        assert!(Report::MostClaimedFoodItems.sql().contains("AS claim_count"));
        assert!(Report::ClaimsPerStatus.sql().contains("AS total_claims"));
        assert!(Report::ClaimedQuantityByCity.sql().contains("AS total_claimed"));
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(
            Report::TopFoodItems.to_string(),
            "3. Top 5 most listed food items"
        );
    }
}
