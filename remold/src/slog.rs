//! Structured-log emission for masked values.
//!
//! Logging a value through this module guarantees that only the masked form
//! reaches the log sink: [`IntoMaskedJson::into_masked_json`] masks first,
//! converts the result to JSON second, and only then hands it to `slog` as a
//! nested value.
//!
//! Nothing here configures loggers or checks that a `Maskable` impl actually
//! masks anything; this is purely the bridge between [`Maskable`] and
//! `slog::Value`.

use serde::Serialize;

use crate::mask::Maskable;

/// Payload stored when the masked value cannot be converted to JSON.
const SERIALIZE_FALLBACK: &str = "Failed to serialize masked value";

/// An already-masked JSON payload, ready to appear in a log record.
///
/// The only way to build one is [`IntoMaskedJson::into_masked_json`], which
/// masks before serializing, so a `MaskedJson` never holds clear-text data.
pub struct MaskedJson(serde_json::Value);

impl slog::Value for MaskedJson {
    fn serialize(
        &self,
        record: &slog::Record<'_>,
        key: slog::Key,
        serializer: &mut dyn slog::Serializer,
    ) -> slog::Result {
        slog::Value::serialize(&slog::Serde(self.0.clone()), record, key, serializer)
    }
}

/// Masks a value and packages the result for structured logging.
///
/// ## Example
/// ```ignore
/// use remold::slog::IntoMaskedJson;
///
/// info!(logger, "customer"; "data" => customer.into_masked_json());
/// ```
pub trait IntoMaskedJson: Maskable + Serialize + Sized {
    /// Consumes `self`, masks it, and captures the masked form as JSON.
    ///
    /// JSON conversion failures do not fail the log call; the payload becomes
    /// the string `"Failed to serialize masked value"` instead.
    fn into_masked_json(self) -> MaskedJson {
        let payload = match serde_json::to_value(self.mask()) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(SERIALIZE_FALLBACK.to_owned()),
        };
        MaskedJson(payload)
    }
}

impl<T> IntoMaskedJson for T where T: Maskable + Serialize {}
