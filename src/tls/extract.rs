//! Certificate decoding.

use chrono::{DateTime, Utc};

/// Decodes a DER certificate and returns its not-after timestamp.
///
/// # Errors
///
/// Returns the decoder's message if the bytes are not a valid X.509
/// certificate or the timestamp is out of range.
pub(crate) fn certificate_not_after(der: &[u8]) -> Result<DateTime<Utc>, String> {
    let (_, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| e.to_string())?;
    let timestamp = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| format!("not-after timestamp {timestamp} is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_not_after_rejects_garbage() {
        assert!(certificate_not_after(b"not a certificate").is_err());
    }

    #[test]
    fn test_certificate_not_after_rejects_empty() {
        assert!(certificate_not_after(&[]).is_err());
    }
}
