//! Synthetic value generation
//!
//! Placeholder values for rows that could not be recovered from the dump.
//! Dates land within roughly the last 115 days so synthesized sheets look
//! plausibly recent.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::types::SemanticType;

use super::Cell;

const DATE_BACKSPAN_MS: i64 = 10_000_000_000;

pub(crate) fn cell<R: Rng>(ty: SemanticType, index: usize, rng: &mut R) -> Cell {
    match ty {
        SemanticType::Integer => Cell::Integer(rng.gen_range(0..1000)),
        SemanticType::Decimal => {
            let value: f64 = rng.gen::<f64>() * 100.0;
            Cell::Decimal((value * 100.0).round() / 100.0)
        }
        SemanticType::Date => {
            let back = Duration::milliseconds(rng.gen_range(0..DATE_BACKSPAN_MS));
            Cell::Text((Utc::now() - back).date_naive().to_string())
        }
        SemanticType::Text => Cell::Text(format!("sample_data_{}", index + 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_integer_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            match cell(SemanticType::Integer, 0, &mut rng) {
                Cell::Integer(n) => assert!((0..1000).contains(&n)),
                other => panic!("unexpected cell {:?}", other),
            }
        }
    }

    #[test]
    fn test_decimal_two_places() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            match cell(SemanticType::Decimal, 0, &mut rng) {
                Cell::Decimal(v) => {
                    assert!((0.0..100.0).contains(&v));
                    let scaled = v * 100.0;
                    assert!((scaled - scaled.round()).abs() < 1e-9);
                }
                other => panic!("unexpected cell {:?}", other),
            }
        }
    }

    #[test]
    fn test_text_placeholder_is_positional() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            cell(SemanticType::Text, 4, &mut rng),
            Cell::Text("sample_data_5".to_string())
        );
    }

    #[test]
    fn test_date_is_iso_and_not_in_the_future() {
        let mut rng = StdRng::seed_from_u64(4);
        let today = Utc::now().date_naive();
        for _ in 0..50 {
            match cell(SemanticType::Date, 0, &mut rng) {
                Cell::Text(s) => {
                    let parsed = s.parse::<chrono::NaiveDate>().expect("ISO date");
                    assert!(parsed <= today);
                }
                other => panic!("unexpected cell {:?}", other),
            }
        }
    }
}
