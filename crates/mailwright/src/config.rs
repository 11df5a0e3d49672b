//! Message configuration.

/// Product tag used in `Message-ID` and `MIME-Version` when none is configured.
pub const DEFAULT_PRODUCT: &str = "Mailwright";

/// Charset of every encoded word and text part. Bodies and headers are Rust
/// strings, so the bytes on the wire are always UTF-8.
pub const CHARSET: &str = "utf-8";

/// Settings applied to every message built with them.
///
/// The product tag is sanitized on every path in, including deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "deserialize_product"))]
    product: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT.to_string(),
        }
    }
}

impl Config {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product tag.
    ///
    /// Whitespace and characters that would break the message id are replaced
    /// with `-`; an empty tag falls back to [`DEFAULT_PRODUCT`].
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = sanitize_product(&product.into());
        self
    }

    /// Returns the product tag, rendered as `MIME-Version: 1.0 (<product>)`
    /// and inside the message id.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the `MIME-Version` header value.
    #[must_use]
    pub fn mime_version(&self) -> String {
        format!("1.0 ({})", self.product)
    }
}

fn sanitize_product(product: &str) -> String {
    let product: String = product
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && !"<>@()\"".contains(c) {
                c
            } else {
                '-'
            }
        })
        .collect();
    if product.is_empty() {
        DEFAULT_PRODUCT.to_string()
    } else {
        product
    }
}

#[cfg(feature = "serde")]
fn deserialize_product<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let product = <String as serde::Deserialize>::deserialize(deserializer)?;
    Ok(sanitize_product(&product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.product(), "Mailwright");
        assert_eq!(config.mime_version(), "1.0 (Mailwright)");
    }

    #[test]
    fn test_with_product_sanitizes() {
        assert_eq!(Config::new().with_product("Acme Mailer").product(), "Acme-Mailer");
        assert_eq!(Config::new().with_product("a@b<c>").product(), "a-b-c-");
        assert_eq!(Config::new().with_product("   ").product(), DEFAULT_PRODUCT);
        assert_eq!(
            Config::new().with_product("Swift-SMTP").mime_version(),
            "1.0 (Swift-SMTP)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = serde_json::from_str(r#"{"product":"Relay"}"#).unwrap();
        assert_eq!(config.product(), "Relay");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_sanitizes_product() {
        let config: Config = serde_json::from_str(r#"{"product":"My App <x@y>"}"#).unwrap();
        assert_eq!(config.product(), "My-App--x-y-");
        assert_eq!(config.mime_version(), "1.0 (My-App--x-y-)");

        let config: Config = serde_json::from_str(r#"{"product":"  "}"#).unwrap();
        assert_eq!(config.product(), DEFAULT_PRODUCT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_charset() {
        let result: std::result::Result<Config, _> =
            serde_json::from_str(r#"{"product":"Relay","charset":"iso-8859-1"}"#);
        assert!(result.is_err());
    }
}
