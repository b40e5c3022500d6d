//! The charge computation, free of any event or population plumbing.

use pk_core::TransportMode;

use crate::{ParkingError, ParkingResult};

/// First component of every charge purpose.
pub const PURPOSE_PREFIX: &str = "additionalParkingSearchAndWalkingTime";

/// Counterparty of every charge.  Nobody actually receives the money.
pub const TRANSACTION_PARTNER: &str = "fictiveTransactionPartner";

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Signed monetary amount for `additional_time_loss_seconds` of lost time.
///
/// The time is valued at the opportunity cost of not performing an activity
/// plus the disutility of travelling with the mode, then converted to money
/// with the person's marginal utility of money.  The result must be a
/// finite, strictly negative amount (a charge); anything else means the
/// parameters are inconsistent and is reported as
/// [`ParkingError::InvalidCharge`].
///
/// ```
/// # use pk_parking::time_loss_charge;
/// // 1080 s at (6.0 - (-2.0)) utils/h, 0.5 utils per money unit.
/// let amount = time_loss_charge(1_080.0, 6.0, -2.0, 0.5).unwrap();
/// assert!((amount - -4.8).abs() < 1e-12);
/// ```
pub fn time_loss_charge(
    additional_time_loss_seconds:           f64,
    performing_utils_hr:                    f64,
    marginal_utility_of_traveling_utils_hr: f64,
    marginal_utility_of_money:              f64,
) -> ParkingResult<f64> {
    let disutility_per_hour = performing_utils_hr - marginal_utility_of_traveling_utils_hr;
    let time_loss_disutility = additional_time_loss_seconds / SECONDS_PER_HOUR * disutility_per_hour;
    let cost = time_loss_disutility / marginal_utility_of_money;
    let amount = -cost;

    // Also rejects NaN and -inf.
    if !(amount < 0.0 && amount.is_finite()) {
        return Err(ParkingError::InvalidCharge { amount });
    }
    Ok(amount)
}

/// `additionalParkingSearchAndWalkingTime_mode-<mode>_act-<previous_activity>`.
pub fn charge_purpose(mode: TransportMode, previous_activity: &str) -> String {
    format!("{PURPOSE_PREFIX}_mode-{mode}_act-{previous_activity}")
}
