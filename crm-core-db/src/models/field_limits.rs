//! Text field limits.
//!
//! Limits count characters, like the request rules and the `VARCHAR(n)`
//! columns. Heapless buffers hold UTF-8 bytes, so each one is sized for the
//! widest encoding of its character limit.

use crm_core_api::ApiError;
use heapless::String as HeaplessString;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PHONE_MAX_CHARS: usize = 50;
pub const COMPANY_MAX_CHARS: usize = 255;
pub const REASON_MAX_CHARS: usize = 500;
pub const ACTOR_MAX_CHARS: usize = 100;

/// Bytes needed to hold `chars` characters of any UTF-8 text.
pub const fn utf8_capacity(chars: usize) -> usize {
    chars * 4
}

pub type NameString = HeaplessString<{ utf8_capacity(NAME_MAX_CHARS) }>;
pub type EmailString = HeaplessString<{ utf8_capacity(EMAIL_MAX_CHARS) }>;
pub type PhoneString = HeaplessString<{ utf8_capacity(PHONE_MAX_CHARS) }>;
pub type CompanyString = HeaplessString<{ utf8_capacity(COMPANY_MAX_CHARS) }>;
pub type ReasonString = HeaplessString<{ utf8_capacity(REASON_MAX_CHARS) }>;
pub type ActorString = HeaplessString<{ utf8_capacity(ACTOR_MAX_CHARS) }>;

/// Copy `value` into a fixed buffer, rejecting more than `max_chars` characters.
pub fn bounded_text<const N: usize>(
    field: &str,
    value: &str,
    max_chars: usize,
) -> Result<HeaplessString<N>, ApiError> {
    let too_long = || ApiError::ValidationError(format!("{field} is too long (max {max_chars} characters)"));
    if value.chars().count() > max_chars {
        return Err(too_long());
    }
    let mut text = HeaplessString::new();
    text.push_str(value).map_err(|_| too_long())?;
    Ok(text)
}
