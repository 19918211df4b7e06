//! Intrinsic/extrinsic value and theta decay for a selected contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::chain::{OptionContract, OptionType, SHARES_PER_CONTRACT};
use crate::domain::shared::ReferencePrice;

/// Derived value figures for one contract at one reference price.
///
/// Per-share figures plus their per-contract dollar forms. Intrinsic
/// value needs only the strike and reference price and is always
/// present. The extrinsic figures need the premium and stay `None` when
/// the provider did not report one; they are never substituted with
/// zero. The theta decay ratio follows the opposite convention: with a
/// missing or zero premium (or missing theta) it degenerates to `0`,
/// since a decay ratio over an empty denominator carries no information
/// worth flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Value from already being in the money, per share. Never negative.
    pub intrinsic_value: Decimal,
    /// Intrinsic value for a full contract.
    pub intrinsic_value_dollars: Decimal,
    /// Premium minus intrinsic value, per share.
    ///
    /// Passed through unclamped: stale or crossed provider data can make
    /// this negative, and that inconsistency stays visible to the caller.
    pub extrinsic_value: Option<Decimal>,
    /// Extrinsic value for a full contract.
    pub extrinsic_value_dollars: Option<Decimal>,
    /// Daily theta decay as a percentage of the premium.
    pub theta_decay_ratio: Decimal,
}

/// Evaluate a contract's value decomposition against a reference price.
///
/// Pure arithmetic over an already-fetched snapshot: no I/O, no hidden
/// state, identical inputs give identical results.
#[must_use]
pub fn evaluate(contract: &OptionContract, reference_price: ReferencePrice) -> ValuationResult {
    let reference = reference_price.amount();
    let intrinsic = match contract.option_type() {
        OptionType::Call => (reference - contract.strike_price()).max(Decimal::ZERO),
        OptionType::Put => (contract.strike_price() - reference).max(Decimal::ZERO),
    };

    let extrinsic = contract.mark_price().map(|mark| mark - intrinsic);

    let theta_decay_ratio = match (contract.mark_price(), contract.theta()) {
        (Some(mark), Some(theta)) if mark > Decimal::ZERO => {
            theta.abs() / mark * Decimal::ONE_HUNDRED
        }
        _ => Decimal::ZERO,
    };

    ValuationResult {
        intrinsic_value: intrinsic,
        intrinsic_value_dollars: intrinsic * SHARES_PER_CONTRACT,
        extrinsic_value: extrinsic,
        extrinsic_value_dollars: extrinsic.map(|e| e * SHARES_PER_CONTRACT),
        theta_decay_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn reference(price: Decimal) -> ReferencePrice {
        ReferencePrice::new(price).unwrap()
    }

    #[test]
    fn call_in_the_money() {
        let contract = OptionContract::new(dec!(100), OptionType::Call)
            .unwrap()
            .with_mark_price(dec!(7.0));

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.intrinsic_value, dec!(5.0));
        assert_eq!(result.intrinsic_value_dollars, dec!(500.0));
        assert_eq!(result.extrinsic_value, Some(dec!(2.0)));
        assert_eq!(result.extrinsic_value_dollars, Some(dec!(200.0)));
    }

    #[test]
    fn call_out_of_the_money_has_zero_intrinsic() {
        let contract = OptionContract::new(dec!(110), OptionType::Call)
            .unwrap()
            .with_mark_price(dec!(1.25));

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.intrinsic_value, Decimal::ZERO);
        assert_eq!(result.extrinsic_value, Some(dec!(1.25)));
    }

    #[test]
    fn put_intrinsic_is_strike_minus_reference() {
        let contract = OptionContract::new(dec!(110), OptionType::Put)
            .unwrap()
            .with_mark_price(dec!(6.0));

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.intrinsic_value, dec!(5.0));
        assert_eq!(result.extrinsic_value, Some(dec!(1.0)));
    }

    #[test]
    fn missing_premium_leaves_extrinsic_unavailable() {
        let contract = OptionContract::new(dec!(100), OptionType::Call).unwrap();

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.intrinsic_value, dec!(5));
        assert!(result.extrinsic_value.is_none());
        assert!(result.extrinsic_value_dollars.is_none());
        assert_eq!(result.theta_decay_ratio, Decimal::ZERO);
    }

    #[test]
    fn crossed_data_passes_negative_extrinsic_through() {
        let contract = OptionContract::new(dec!(100), OptionType::Call)
            .unwrap()
            .with_mark_price(dec!(3.0));

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.extrinsic_value, Some(dec!(-2.0)));
    }

    #[test]
    fn theta_decay_ratio_from_premium() {
        let contract = OptionContract::new(dec!(100), OptionType::Call)
            .unwrap()
            .with_mark_price(dec!(2.0))
            .with_theta(dec!(-0.05));

        let result = evaluate(&contract, reference(dec!(105)));

        // |−0.05| / 2.0 × 100 = 2.5
        assert_eq!(result.theta_decay_ratio, dec!(2.5));
    }

    #[test_case(Some(dec!(0)), Some(dec!(-0.05)) ; "zero premium")]
    #[test_case(Some(dec!(2.0)), None ; "missing theta")]
    #[test_case(None, Some(dec!(-0.05)) ; "missing premium")]
    fn theta_decay_ratio_degenerates_to_zero(mark: Option<Decimal>, theta: Option<Decimal>) {
        let mut contract = OptionContract::new(dec!(100), OptionType::Call).unwrap();
        if let Some(m) = mark {
            contract = contract.with_mark_price(m);
        }
        if let Some(t) = theta {
            contract = contract.with_theta(t);
        }

        let result = evaluate(&contract, reference(dec!(105)));

        assert_eq!(result.theta_decay_ratio, Decimal::ZERO);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let contract = OptionContract::new(dec!(100), OptionType::Call)
            .unwrap()
            .with_mark_price(dec!(7.0))
            .with_theta(dec!(-0.12));
        let price = reference(dec!(103.57));

        assert_eq!(evaluate(&contract, price), evaluate(&contract, price));
    }

    proptest! {
        #[test]
        fn intrinsic_value_is_never_negative(
            strike_cents in 1i64..10_000_000,
            reference_cents in 1i64..10_000_000,
        ) {
            let strike = Decimal::new(strike_cents, 2);
            let price = reference(Decimal::new(reference_cents, 2));

            for option_type in [OptionType::Call, OptionType::Put] {
                let contract = OptionContract::new(strike, option_type).unwrap();
                let result = evaluate(&contract, price);
                prop_assert!(result.intrinsic_value >= Decimal::ZERO);
            }
        }

        #[test]
        fn call_intrinsic_matches_formula_exactly(
            strike_cents in 1i64..10_000_000,
            reference_cents in 1i64..10_000_000,
        ) {
            let strike = Decimal::new(strike_cents, 2);
            let price = reference(Decimal::new(reference_cents, 2));
            let contract = OptionContract::new(strike, OptionType::Call).unwrap();

            let result = evaluate(&contract, price);

            prop_assert_eq!(
                result.intrinsic_value,
                (price.amount() - strike).max(Decimal::ZERO)
            );
        }
    }
}
