//! RFC 3986 percent-encoding as required by OAuth 1.0a §3.6.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Every ASCII byte outside the RFC 3986 unreserved set.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes every byte outside the RFC 3986 unreserved set using uppercase hex.
///
/// Unlike `application/x-www-form-urlencoded`, spaces become `%20` and `*`, `'`, `(`, `)`
/// and `!` are always escaped.
pub fn percent_encode(input: &str) -> String {
	utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unreserved_characters_pass_through() {
		assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
	}

	#[test]
	fn reserved_characters_are_escaped() {
		assert_eq!(percent_encode("Hello World!*'()~"), "Hello%20World%21%2A%27%28%29~");
		assert_eq!(percent_encode("a+b/c=d&e"), "a%2Bb%2Fc%3Dd%26e");
	}

	#[test]
	fn multibyte_utf8_is_encoded_per_byte() {
		assert_eq!(percent_encode("é"), "%C3%A9");
	}
}
