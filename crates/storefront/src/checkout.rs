//! Checkout form checks.

use thiserror::Error;

/// Payment method that needs the card details block.
pub const CREDIT_CARD: &str = "credit_card";

/// The terms checkbox was left unticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please agree to the Terms of Service and Privacy Policy")]
pub struct TermsNotAccepted;

/// Blocks submission until the terms are accepted.
pub fn validate_terms(accepted: bool) -> Result<(), TermsNotAccepted> {
	if accepted { Ok(()) } else { Err(TermsNotAccepted) }
}

/// Whether the card details block is shown for the chosen payment method.
///
/// With nothing chosen yet the block stays as rendered, i.e. visible.
pub fn card_details_visible(payment_method: Option<&str>) -> bool {
	payment_method.is_none_or(|method| method == CREDIT_CARD)
}
