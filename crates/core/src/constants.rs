use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Cash granted to every newly registered user
pub const DEFAULT_STARTING_CASH: Decimal = dec!(10000);

/// Longest ticker symbol the ledger accepts
pub const MAX_SYMBOL_LEN: usize = 10;

/// Longest username the ledger accepts
pub const MAX_USERNAME_LEN: usize = 50;

/// Shortest acceptable password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Special characters allowed in passwords, besides ASCII letters and digits
pub const PASSWORD_SPECIAL_CHARS: &str = "@#$%^&+=!.ñ";
